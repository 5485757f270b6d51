pub use sqlh_core::*;
pub use sqlh_macros::*;
