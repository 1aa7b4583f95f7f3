use std::mem;

use crate::Phase;

/// Lifecycle of a single asynchronously fetched value.
///
/// The machine only moves through [`start_load`](Self::start_load),
/// [`on_success`](Self::on_success) and [`on_failure`](Self::on_failure).
/// Once a value has been obtained it stays reachable through every later
/// reload and failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState<V, E> {
    /// No fetch has been attempted yet.
    Idle,
    /// First fetch in flight.
    InitialLoading,
    /// Refreshing while the previous value stays displayable.
    Reloading(V),
    /// Fetching again after a failure that left no value.
    RetryLoading(E),
    Success(V),
    /// Failed with nothing to fall back on.
    LoadingFailure(E),
    /// Failed, but the last good value is still around.
    ReloadingFailure { value: V, error: E },
}

impl<V, E> Default for ResourceState<V, E> {
    fn default() -> Self {
        ResourceState::Idle
    }
}

impl<V, E> ResourceState<V, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self {
            ResourceState::Idle => Phase::Idle,
            ResourceState::InitialLoading => Phase::InitialLoading,
            ResourceState::Reloading(_) => Phase::Reloading,
            ResourceState::RetryLoading(_) => Phase::RetryLoading,
            ResourceState::Success(_) => Phase::Success,
            ResourceState::LoadingFailure(_) => Phase::LoadingFailure,
            ResourceState::ReloadingFailure { .. } => Phase::ReloadingFailure,
        }
    }

    /// Moves into the matching in-flight phase.
    ///
    /// Returns `false` without touching the state when a fetch is already
    /// outstanding.
    pub fn start_load(&mut self) -> bool {
        let next = match mem::replace(self, ResourceState::Idle) {
            ResourceState::Idle => ResourceState::InitialLoading,
            ResourceState::Success(value) | ResourceState::ReloadingFailure { value, .. } => {
                ResourceState::Reloading(value)
            }
            ResourceState::LoadingFailure(error) => ResourceState::RetryLoading(error),
            in_flight @ (ResourceState::InitialLoading
            | ResourceState::Reloading(_)
            | ResourceState::RetryLoading(_)) => {
                *self = in_flight;
                return false;
            }
        };
        *self = next;
        true
    }

    /// Undoes [`start_load`](Self::start_load) when the fetch it announced
    /// was abandoned before settling. Returns `false` outside the in-flight
    /// phases.
    pub fn abandon_load(&mut self) -> bool {
        let previous = match mem::replace(self, ResourceState::Idle) {
            ResourceState::InitialLoading => ResourceState::Idle,
            ResourceState::Reloading(value) => ResourceState::Success(value),
            ResourceState::RetryLoading(error) => ResourceState::LoadingFailure(error),
            settled => {
                *self = settled;
                return false;
            }
        };
        *self = previous;
        true
    }

    pub fn on_success(&mut self, value: V) {
        *self = ResourceState::Success(value);
    }

    /// Records a failed fetch, keeping the last good value when there is one.
    pub fn on_failure(&mut self, error: E) {
        *self = match mem::replace(self, ResourceState::Idle) {
            ResourceState::Reloading(value)
            | ResourceState::Success(value)
            | ResourceState::ReloadingFailure { value, .. } => {
                ResourceState::ReloadingFailure { value, error }
            }
            ResourceState::Idle
            | ResourceState::InitialLoading
            | ResourceState::RetryLoading(_)
            | ResourceState::LoadingFailure(_) => ResourceState::LoadingFailure(error),
        };
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ResourceState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        self.phase().is_in_flight()
    }

    pub fn is_initial_loading(&self) -> bool {
        matches!(self, ResourceState::InitialLoading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResourceState::Success(_))
    }

    /// True in the settled failure phases. A retry in flight is not a failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ResourceState::LoadingFailure(_) | ResourceState::ReloadingFailure { .. }
        )
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            ResourceState::Reloading(value)
            | ResourceState::Success(value)
            | ResourceState::ReloadingFailure { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            ResourceState::RetryLoading(error)
            | ResourceState::LoadingFailure(error)
            | ResourceState::ReloadingFailure { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            ResourceState::Reloading(value)
            | ResourceState::Success(value)
            | ResourceState::ReloadingFailure { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The value to show right now: the current one, or `placeholder` while
    /// nothing has been loaded.
    pub fn display_value<'a>(&'a self, placeholder: &'a V) -> &'a V {
        self.value().unwrap_or(placeholder)
    }
}
