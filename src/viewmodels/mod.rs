pub mod auth_viewmodel;
pub mod wishlist_viewmodel;
pub mod catalog_viewmodel;
pub mod product_viewmodel;
pub mod cart_viewmodel;
pub mod orders_viewmodel;
pub mod profile_viewmodel;
pub mod moderator_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use wishlist_viewmodel::WishlistViewModel;
pub use catalog_viewmodel::CatalogViewModel;
pub use product_viewmodel::ProductViewModel;
pub use cart_viewmodel::CartViewModel;
pub use orders_viewmodel::OrdersViewModel;
pub use profile_viewmodel::ProfileViewModel;
pub use moderator_viewmodel::ModeratorViewModel;
