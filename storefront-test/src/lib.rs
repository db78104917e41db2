//! In-process HTTP client for exercising the storefront router in tests.
//!
//! Requests are dispatched with `tower::ServiceExt::oneshot`, so no TCP port
//! is bound and every test gets its own router instance.

mod app;
mod json_path;

pub use app::{TestApp, TestRequest, TestResponse};
pub use json_path::resolve_path;
