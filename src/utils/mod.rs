// Utils compartidos

pub mod constants;
pub mod storage;
pub mod i18n;
pub mod serde_helper;

pub use constants::*;
pub use storage::*;
pub use i18n::*;
