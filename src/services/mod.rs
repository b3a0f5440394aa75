pub mod http;
pub mod navigation;
pub mod session;
pub mod api_client;
pub mod snapshot_cache;

// Endpoints por recurso (`impl ApiClient`)
pub mod auth_service;
pub mod user_service;
pub mod product_service;
pub mod cart_service;
pub mod wishlist_service;
pub mod order_service;
pub mod review_service;

pub use api_client::ApiClient;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use navigation::Navigator;
pub use product_service::ImageUpload;
pub use session::SessionStore;
pub use snapshot_cache::{SnapshotCache, SyncOutcome};
