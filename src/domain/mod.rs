pub mod models;
pub mod reducer;

pub use models::*;
pub use reducer::*;
