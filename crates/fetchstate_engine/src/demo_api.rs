//! Simulated backend used by the demo cases: fixed latency, a user record,
//! an endless stream of posts, and a switch that makes every call fail.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fetchstate_core::Pageable;
use thiserror::Error;

use crate::{Fetcher, PageFetcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub location: String,
}

impl User {
    /// Placeholder record drawn while the real one is loading.
    pub fn stub() -> Self {
        Self {
            id: "user id".to_string(),
            name: "user name".to_string(),
            email: "email address".to_string(),
            location: "location".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
}

impl Post {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: format!("post {id}"),
        }
    }

    /// Ten placeholder rows drawn while the first page is loading.
    pub fn stubs() -> Vec<Post> {
        (0..10)
            .map(|n| Post {
                id: 100_000 + n,
                title: format!("stub{}", n + 1),
            })
            .collect()
    }
}

impl Pageable for Post {
    type Cursor = u64;

    fn cursor_after(&self) -> u64 {
        self.id + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error")]
    Network,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub latency: Duration,
    pub page_size: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            latency: Duration::from_secs(1),
            page_size: 30,
        }
    }
}

#[derive(Debug, Default)]
pub struct DemoApi {
    settings: ApiSettings,
    throw_error: AtomicBool,
    requests: AtomicUsize,
}

impl DemoApi {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            settings,
            throw_error: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Makes every following call fail (or succeed again).
    pub fn set_throw_error(&self, throw_error: bool) {
        self.throw_error.store(throw_error, Ordering::SeqCst);
    }

    pub fn throw_error(&self) -> bool {
        self.throw_error.load(Ordering::SeqCst)
    }

    /// Number of calls made so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub async fn get_user(&self) -> Result<User, ApiError> {
        self.round_trip().await?;
        Ok(User {
            id: "kntkymt".to_string(),
            name: "kntk".to_string(),
            email: "email@example.com".to_string(),
            location: "Tokyo".to_string(),
        })
    }

    /// Returns `count` posts with consecutive ids starting at `min_id`.
    pub async fn get_posts(&self, min_id: u64, count: usize) -> Result<Vec<Post>, ApiError> {
        self.round_trip().await?;
        Ok((min_id..).take(count).map(Post::new).collect())
    }

    async fn round_trip(&self) -> Result<(), ApiError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.settings.latency).await;
        // Checked after the delay so a toggle during the call still applies.
        if self.throw_error() {
            return Err(ApiError::Network);
        }
        Ok(())
    }
}

/// Fetches the demo user.
#[derive(Debug, Clone)]
pub struct UserFetcher {
    api: Arc<DemoApi>,
}

impl UserFetcher {
    pub fn new(api: Arc<DemoApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl Fetcher for UserFetcher {
    type Value = User;
    type Error = ApiError;

    async fn fetch(&self) -> Result<User, ApiError> {
        self.api.get_user().await
    }
}

/// Fetches demo posts one page at a time, starting from id 0.
#[derive(Debug, Clone)]
pub struct PostsFetcher {
    api: Arc<DemoApi>,
}

impl PostsFetcher {
    pub fn new(api: Arc<DemoApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl PageFetcher for PostsFetcher {
    type Item = Post;
    type Cursor = u64;
    type Error = ApiError;

    async fn fetch_initial(&self) -> Result<Vec<Post>, ApiError> {
        self.api.get_posts(0, self.api.settings().page_size).await
    }

    async fn fetch_more(&self, cursor: u64) -> Result<Vec<Post>, ApiError> {
        self.api
            .get_posts(cursor, self.api.settings().page_size)
            .await
    }
}
