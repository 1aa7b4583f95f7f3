#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the fetch capability once and report back with a result message.
    Fetch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagedEffect<C> {
    FetchInitial,
    FetchMore { cursor: C },
}
