pub mod json;
pub mod tree;

pub use json::JsonReporter;
pub use tree::TreeReporter;
