pub mod endpoint;
pub mod errors;
pub mod usage;

pub use endpoint::*;
pub use errors::*;
pub use usage::*;
