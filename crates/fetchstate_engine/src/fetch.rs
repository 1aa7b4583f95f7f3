use fetchstate_core::Pageable;

/// Fetch capability for a single value.
///
/// Any error is opaque to the loaders: it is stored in state as-is and never
/// inspected.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    type Value: Send;
    type Error: Send;

    async fn fetch(&self) -> Result<Self::Value, Self::Error>;
}

/// Fetch capability for a paged collection.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    type Item: Pageable<Cursor = Self::Cursor> + Send;
    type Cursor: Send;
    type Error: Send;

    async fn fetch_initial(&self) -> Result<Vec<Self::Item>, Self::Error>;

    /// Fetches the page that starts at `cursor`, as derived from the current
    /// tail item.
    async fn fetch_more(&self, cursor: Self::Cursor) -> Result<Vec<Self::Item>, Self::Error>;
}
