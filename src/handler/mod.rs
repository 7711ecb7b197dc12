//! Request handler module
//!
//! Responsible for request dispatch and rendering preset scripts.

pub mod responder;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
