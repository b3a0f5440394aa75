// ============================================================================
// VIEWS - Un renderer por página; sólo construyen DOM y enlazan eventos
// ============================================================================

pub mod shared;
pub mod login;
pub mod register;
pub mod home;
pub mod product;
pub mod cart;
pub mod orders;
pub mod profile;
pub mod moderator;

pub use login::render_login;
pub use register::render_register;
pub use home::render_home;
pub use product::render_product;
pub use cart::render_cart;
pub use orders::render_orders;
pub use profile::render_profile;
pub use moderator::render_moderator;
