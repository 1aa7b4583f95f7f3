use std::fmt;

use crate::{PagedResourceState, ResourceState};

/// What the main area of a screen shows for a given state.
#[derive(Debug, PartialEq, Eq)]
pub enum Body<'a, V: ?Sized> {
    /// Nothing yet and no placeholder supplied.
    Blank,
    /// Stub data drawn redacted while the first fetch has not resolved.
    Placeholder(&'a V),
    Content(&'a V),
    /// A collection was loaded and it has no items.
    Empty,
    /// Full-screen error, no value to fall back on.
    ErrorScreen,
}

impl<V: ?Sized> Clone for Body<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> Copy for Body<'_, V> {}

/// The trailing "load more" row of a paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Footer {
    #[default]
    None,
    /// Progress row; reaching it requests the next page.
    Spinner,
    /// The last page fetch failed; tapping retries it.
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceView<'a, V> {
    pub body: Body<'a, V>,
    pub show_progress_overlay: bool,
    pub banner_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedResourceView<'a, T> {
    pub body: Body<'a, [T]>,
    pub footer: Footer,
    pub show_progress_overlay: bool,
    pub banner_error: Option<String>,
}

impl<V, E: fmt::Display> ResourceState<V, E> {
    pub fn view<'a>(&'a self, placeholder: Option<&'a V>) -> ResourceView<'a, V> {
        let body = match self {
            ResourceState::Idle | ResourceState::InitialLoading => {
                placeholder.map_or(Body::Blank, Body::Placeholder)
            }
            ResourceState::Reloading(value)
            | ResourceState::Success(value)
            | ResourceState::ReloadingFailure { value, .. } => Body::Content(value),
            ResourceState::RetryLoading(_) | ResourceState::LoadingFailure(_) => {
                Body::ErrorScreen
            }
        };

        ResourceView {
            body,
            show_progress_overlay: self.is_initial_loading(),
            banner_error: banner_error(self.is_failure(), self.error()),
        }
    }
}

impl<T, E: fmt::Display> PagedResourceState<T, E> {
    pub fn view<'a>(&'a self, placeholder: Option<&'a [T]>) -> PagedResourceView<'a, T> {
        let body = match self {
            PagedResourceState::Idle | PagedResourceState::InitialLoading => {
                placeholder.map_or(Body::Blank, Body::Placeholder)
            }
            PagedResourceState::RetryLoading(_) | PagedResourceState::LoadingFailure(_) => {
                Body::ErrorScreen
            }
            _ => match self.value() {
                Some([]) | None => Body::Empty,
                Some(items) => Body::Content(items),
            },
        };

        let footer = match (self, body) {
            (_, Body::Empty) => Footer::None,
            (PagedResourceState::PagingFailure { .. }, _) => Footer::Retry,
            (PagedResourceState::Success(_) | PagedResourceState::Paging(_), _) => Footer::Spinner,
            _ => Footer::None,
        };

        PagedResourceView {
            body,
            footer,
            show_progress_overlay: self.is_initial_loading(),
            banner_error: banner_error(self.is_failure(), self.error()),
        }
    }
}

fn banner_error<E: fmt::Display>(is_failure: bool, error: Option<&E>) -> Option<String> {
    error.filter(|_| is_failure).map(ToString::to_string)
}
