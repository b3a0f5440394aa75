// Piezas comunes a todas las páginas

pub mod toast;
pub mod header;
pub mod widgets;

pub use toast::*;
pub use header::*;
pub use widgets::*;
