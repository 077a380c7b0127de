pub mod analyzer;
pub mod bindings;
pub mod extract;
pub mod location;
pub mod parser;
pub mod scanner;
pub mod scope;

pub use analyzer::{analyze, UsageAnalyzer};
pub use bindings::{client_bindings, client_bindings_with_default, DEFAULT_BINDING};
pub use extract::extract_path_candidates;
pub use location::LocationConverter;
pub use parser::{ParsedFile, SourceParser};
pub use scanner::{scan_calls, ScannedUsage};
pub use scope::ScopeIndex;
