#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg<V, E> {
    /// Consumer asked for a load (first load, refresh or retry alike).
    LoadRequested,
    /// The fetch issued for the last load resolved with a value.
    LoadSucceeded(V),
    /// The fetch issued for the last load failed.
    LoadFailed(E),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagedMsg<T, E> {
    /// Consumer asked for the first page (initial load, pull-to-refresh, retry).
    LoadRequested,
    LoadSucceeded(Vec<T>),
    LoadFailed(E),
    /// Consumer reached the end of the list and asked for the next page.
    MoreRequested,
    MoreSucceeded(Vec<T>),
    MoreFailed(E),
}
