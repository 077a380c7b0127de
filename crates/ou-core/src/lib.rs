pub mod logging;
pub mod matcher;
pub mod models;
pub mod openapi;

pub use matcher::find_matching_endpoint;
pub use models::{AnalysisError, CallSite, DeclaredEndpoint, EndpointSet, HttpMethod, UsageMap};
