//! HTTP protocol layer module
//!
//! Response builders and cache validation, kept apart from the preset logic.

pub mod cache;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_304_response, build_404_response, build_405_response, build_health_response,
    build_options_response, build_script_response, ScriptResponse, SCRIPT_CONTENT_TYPE,
};
