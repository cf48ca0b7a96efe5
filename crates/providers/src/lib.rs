pub mod google;
pub mod registry;
pub mod traits;
pub(crate) mod util;

// Re-exports for convenience.
pub use registry::build_provider;
pub use traits::{GenerateRequest, GenerateResponse, LlmProvider, Usage};
pub use util::resolve_api_key;
