/// Discriminant of a resource lifecycle, shared by [`crate::ResourceState`] and
/// [`crate::PagedResourceState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    InitialLoading,
    Reloading,
    RetryLoading,
    Success,
    LoadingFailure,
    ReloadingFailure,
    /// Only reachable on a paged resource.
    Paging,
    /// Only reachable on a paged resource.
    PagingFailure,
}

impl Phase {
    /// True for the phases in which a fetch is outstanding.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            Phase::InitialLoading | Phase::Reloading | Phase::RetryLoading | Phase::Paging
        )
    }

    /// True once the last fetch has resolved one way or the other.
    pub fn is_settled(self) -> bool {
        !self.is_in_flight() && self != Phase::Idle
    }
}
