use std::mem;

use crate::{Pageable, Phase};

/// Lifecycle of a paged collection: the [`crate::ResourceState`] phases plus
/// an orthogonal "load more" dimension.
///
/// Items only ever grow at the tail. The collection is dropped only by
/// [`reset`](Self::reset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagedResourceState<T, E> {
    Idle,
    InitialLoading,
    Reloading(Vec<T>),
    RetryLoading(E),
    /// A next-page fetch is in flight; the held items stay displayable.
    Paging(Vec<T>),
    Success(Vec<T>),
    LoadingFailure(E),
    ReloadingFailure { items: Vec<T>, error: E },
    /// The next-page fetch failed; only the "load more" affordance is affected.
    PagingFailure { items: Vec<T>, error: E },
}

impl<T, E> Default for PagedResourceState<T, E> {
    fn default() -> Self {
        PagedResourceState::Idle
    }
}

impl<T, E> PagedResourceState<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self {
            PagedResourceState::Idle => Phase::Idle,
            PagedResourceState::InitialLoading => Phase::InitialLoading,
            PagedResourceState::Reloading(_) => Phase::Reloading,
            PagedResourceState::RetryLoading(_) => Phase::RetryLoading,
            PagedResourceState::Paging(_) => Phase::Paging,
            PagedResourceState::Success(_) => Phase::Success,
            PagedResourceState::LoadingFailure(_) => Phase::LoadingFailure,
            PagedResourceState::ReloadingFailure { .. } => Phase::ReloadingFailure,
            PagedResourceState::PagingFailure { .. } => Phase::PagingFailure,
        }
    }

    /// Starts a (re)load of the first page. No-op while any fetch, including
    /// a page fetch, is outstanding.
    pub fn start_load(&mut self) -> bool {
        let next = match mem::replace(self, PagedResourceState::Idle) {
            PagedResourceState::Idle => PagedResourceState::InitialLoading,
            PagedResourceState::Success(items)
            | PagedResourceState::ReloadingFailure { items, .. }
            | PagedResourceState::PagingFailure { items, .. } => {
                PagedResourceState::Reloading(items)
            }
            PagedResourceState::LoadingFailure(error) => PagedResourceState::RetryLoading(error),
            in_flight @ (PagedResourceState::InitialLoading
            | PagedResourceState::Reloading(_)
            | PagedResourceState::RetryLoading(_)
            | PagedResourceState::Paging(_)) => {
                *self = in_flight;
                return false;
            }
        };
        *self = next;
        true
    }

    /// Starts a next-page fetch. Only a settled phase that holds items
    /// without a pending reload error may page: Success or PagingFailure.
    pub fn start_page(&mut self) -> bool {
        match mem::replace(self, PagedResourceState::Idle) {
            PagedResourceState::Success(items) | PagedResourceState::PagingFailure { items, .. } => {
                *self = PagedResourceState::Paging(items);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Undoes [`start_load`](Self::start_load) or
    /// [`start_page`](Self::start_page) when the fetch was abandoned before
    /// settling. Held items come back as Success.
    pub fn abandon_fetch(&mut self) -> bool {
        let previous = match mem::replace(self, PagedResourceState::Idle) {
            PagedResourceState::InitialLoading => PagedResourceState::Idle,
            PagedResourceState::Reloading(items) | PagedResourceState::Paging(items) => {
                PagedResourceState::Success(items)
            }
            PagedResourceState::RetryLoading(error) => PagedResourceState::LoadingFailure(error),
            settled => {
                *self = settled;
                return false;
            }
        };
        *self = previous;
        true
    }

    pub fn on_success(&mut self, items: Vec<T>) {
        *self = PagedResourceState::Success(items);
    }

    pub fn on_failure(&mut self, error: E) {
        *self = match mem::replace(self, PagedResourceState::Idle) {
            PagedResourceState::Reloading(items)
            | PagedResourceState::Paging(items)
            | PagedResourceState::Success(items)
            | PagedResourceState::ReloadingFailure { items, .. }
            | PagedResourceState::PagingFailure { items, .. } => {
                PagedResourceState::ReloadingFailure { items, error }
            }
            PagedResourceState::Idle
            | PagedResourceState::InitialLoading
            | PagedResourceState::RetryLoading(_)
            | PagedResourceState::LoadingFailure(_) => PagedResourceState::LoadingFailure(error),
        };
    }

    /// Appends a fetched page to the tail. Ignored outside Paging.
    pub fn on_page_success(&mut self, new_items: Vec<T>) -> bool {
        match mem::replace(self, PagedResourceState::Idle) {
            PagedResourceState::Paging(mut items) => {
                items.extend(new_items);
                *self = PagedResourceState::Success(items);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Ignored outside Paging.
    pub fn on_page_failure(&mut self, error: E) -> bool {
        match mem::replace(self, PagedResourceState::Idle) {
            PagedResourceState::Paging(items) => {
                *self = PagedResourceState::PagingFailure { items, error };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Drops everything and goes back to Idle.
    pub fn reset(&mut self) {
        *self = PagedResourceState::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PagedResourceState::Idle)
    }

    /// True while the first page is being (re)fetched. Paging is reported by
    /// [`is_paging`](Self::is_paging) instead.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            PagedResourceState::InitialLoading
                | PagedResourceState::Reloading(_)
                | PagedResourceState::RetryLoading(_)
        )
    }

    pub fn is_initial_loading(&self) -> bool {
        matches!(self, PagedResourceState::InitialLoading)
    }

    pub fn is_paging(&self) -> bool {
        matches!(self, PagedResourceState::Paging(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PagedResourceState::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PagedResourceState::LoadingFailure(_)
                | PagedResourceState::ReloadingFailure { .. }
                | PagedResourceState::PagingFailure { .. }
        )
    }

    pub fn is_paging_failure(&self) -> bool {
        matches!(self, PagedResourceState::PagingFailure { .. })
    }

    pub fn value(&self) -> Option<&[T]> {
        match self {
            PagedResourceState::Reloading(items)
            | PagedResourceState::Paging(items)
            | PagedResourceState::Success(items)
            | PagedResourceState::ReloadingFailure { items, .. }
            | PagedResourceState::PagingFailure { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            PagedResourceState::RetryLoading(error)
            | PagedResourceState::LoadingFailure(error)
            | PagedResourceState::ReloadingFailure { error, .. }
            | PagedResourceState::PagingFailure { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Vec<T>> {
        match self {
            PagedResourceState::Reloading(items)
            | PagedResourceState::Paging(items)
            | PagedResourceState::Success(items)
            | PagedResourceState::ReloadingFailure { items, .. }
            | PagedResourceState::PagingFailure { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn display_value<'a>(&'a self, placeholder: &'a [T]) -> &'a [T] {
        self.value().unwrap_or(placeholder)
    }
}

impl<T: Pageable, E> PagedResourceState<T, E> {
    /// Cursor for the page after the current tail, if there is a tail.
    pub fn next_cursor(&self) -> Option<T::Cursor> {
        self.value()
            .and_then(|items| items.last())
            .map(Pageable::cursor_after)
    }
}
