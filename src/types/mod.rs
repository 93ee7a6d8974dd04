pub mod fix;
pub mod flight;
pub mod metadata;

pub use fix::*;
pub use flight::*;
pub use metadata::*;
