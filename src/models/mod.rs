pub mod auth;
pub mod session;
pub mod product;
pub mod cart;
pub mod wishlist;
pub mod order;
pub mod review;

pub use auth::*;
pub use session::*;
pub use product::*;
pub use cart::*;
pub use wishlist::*;
pub use order::*;
pub use review::*;
