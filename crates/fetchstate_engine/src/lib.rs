//! Fetchstate engine: async fetch capabilities and the loaders that drive the
//! core state machines around them.
mod demo_api;
mod engine;
mod error;
mod fetch;
mod loader;

pub use demo_api::{ApiError, ApiSettings, DemoApi, Post, PostsFetcher, User, UserFetcher};
pub use engine::EngineHandle;
pub use error::EngineError;
pub use fetch::{Fetcher, PageFetcher};
pub use loader::{PagedResourceLoader, ResourceLoader};
