//! SiteRegistry implementations.

pub mod http;

pub use http::HttpRegistry;
