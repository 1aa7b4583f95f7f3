use std::mem;

use fetchstate_core::{
    update, update_paged, Effect, Msg, PagedEffect, PagedMsg, PagedResourceState, Phase,
    ResourceState,
};
use loader_logging::{loader_debug, loader_info, loader_warn};
use parking_lot::Mutex;

use crate::{Fetcher, PageFetcher};

/// Drives a [`ResourceState`] around a [`Fetcher`].
///
/// Safe to share between tasks: the in-flight check and the phase flip run
/// under one lock, and the lock is released before the fetch is awaited. At
/// most one fetch is ever outstanding; extra calls return `false` straight
/// away.
pub struct ResourceLoader<F: Fetcher> {
    name: String,
    fetcher: F,
    state: Mutex<ResourceState<F::Value, F::Error>>,
}

impl<F: Fetcher> ResourceLoader<F> {
    pub fn new(name: impl Into<String>, fetcher: F) -> Self {
        Self {
            name: name.into(),
            fetcher,
            state: Mutex::new(ResourceState::Idle),
        }
    }

    /// Loads, reloads or retries depending on the current phase.
    ///
    /// Returns whether a fetch was issued.
    pub async fn load(&self) -> bool {
        match self.dispatch(Msg::LoadRequested).as_slice() {
            [Effect::Fetch] => {}
            _ => {
                loader_debug!("{}: load ignored, fetch in flight", self.name);
                return false;
            }
        }
        loader_debug!("{}: fetch started in {:?}", self.name, self.phase());

        let in_flight = InFlight::new(&self.name, &self.state, |state| {
            state.abandon_load();
        });
        let msg = match self.fetcher.fetch().await {
            Ok(value) => Msg::LoadSucceeded(value),
            Err(error) => Msg::LoadFailed(error),
        };
        in_flight.disarm();
        let failed = matches!(msg, Msg::LoadFailed(_));
        self.dispatch(msg);

        let phase = self.phase();
        if failed {
            loader_warn!("{}: fetch failed, now {:?}", self.name, phase);
        } else {
            loader_info!("{}: fetch settled in {:?}", self.name, phase);
        }
        true
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase()
    }

    pub fn state(&self) -> ResourceState<F::Value, F::Error>
    where
        F::Value: Clone,
        F::Error: Clone,
    {
        self.state.lock().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&ResourceState<F::Value, F::Error>) -> R) -> R {
        f(&self.state.lock())
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn dispatch(&self, msg: Msg<F::Value, F::Error>) -> Vec<Effect> {
        let mut guard = self.state.lock();
        let state = mem::take(&mut *guard);
        let (state, effects) = update(state, msg);
        *guard = state;
        effects
    }
}

/// Drives a [`PagedResourceState`] around a [`PageFetcher`].
///
/// `load` and `load_more` share one single-flight guard: neither starts while
/// the other is outstanding.
pub struct PagedResourceLoader<F: PageFetcher> {
    name: String,
    fetcher: F,
    state: Mutex<PagedResourceState<F::Item, F::Error>>,
}

impl<F: PageFetcher> PagedResourceLoader<F> {
    pub fn new(name: impl Into<String>, fetcher: F) -> Self {
        Self {
            name: name.into(),
            fetcher,
            state: Mutex::new(PagedResourceState::Idle),
        }
    }

    /// Fetches the first page, replacing whatever is held once it succeeds.
    pub async fn load(&self) -> bool {
        match self.dispatch(PagedMsg::LoadRequested).as_slice() {
            [PagedEffect::FetchInitial] => {}
            _ => {
                loader_debug!("{}: load ignored, fetch in flight", self.name);
                return false;
            }
        }
        loader_debug!("{}: initial fetch started in {:?}", self.name, self.phase());

        let in_flight = self.in_flight();
        let msg = match self.fetcher.fetch_initial().await {
            Ok(items) => PagedMsg::LoadSucceeded(items),
            Err(error) => PagedMsg::LoadFailed(error),
        };
        in_flight.disarm();
        self.settle(msg);
        true
    }

    /// Fetches the page after the current tail and appends it.
    ///
    /// Returns `false` without fetching while anything is in flight, when no
    /// items are held, or when the phase does not allow paging.
    pub async fn load_more(&self) -> bool {
        let cursor = match self.dispatch(PagedMsg::MoreRequested).pop() {
            Some(PagedEffect::FetchMore { cursor }) => cursor,
            _ => {
                loader_debug!("{}: load more ignored in {:?}", self.name, self.phase());
                return false;
            }
        };
        loader_debug!("{}: page fetch started", self.name);

        let in_flight = self.in_flight();
        let msg = match self.fetcher.fetch_more(cursor).await {
            Ok(items) => PagedMsg::MoreSucceeded(items),
            Err(error) => PagedMsg::MoreFailed(error),
        };
        in_flight.disarm();
        self.settle(msg);
        true
    }

    /// Drops the collection and returns to Idle. Ignored while a fetch is
    /// outstanding, since its result would land on a reset machine.
    pub fn reset(&self) -> bool {
        let mut guard = self.state.lock();
        if guard.phase().is_in_flight() {
            return false;
        }
        guard.reset();
        true
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase()
    }

    pub fn state(&self) -> PagedResourceState<F::Item, F::Error>
    where
        F::Item: Clone,
        F::Error: Clone,
    {
        self.state.lock().clone()
    }

    pub fn with_state<R>(
        &self,
        f: impl FnOnce(&PagedResourceState<F::Item, F::Error>) -> R,
    ) -> R {
        f(&self.state.lock())
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn in_flight(&self) -> InFlight<'_, PagedResourceState<F::Item, F::Error>> {
        InFlight::new(&self.name, &self.state, |state| {
            state.abandon_fetch();
        })
    }

    fn settle(&self, msg: PagedMsg<F::Item, F::Error>) {
        let failed = matches!(msg, PagedMsg::LoadFailed(_) | PagedMsg::MoreFailed(_));
        self.dispatch(msg);

        let (phase, len) = self.with_state(|state| (state.phase(), state.value().map(<[_]>::len)));
        if failed {
            loader_warn!("{}: fetch failed, now {:?} with {:?} items", self.name, phase, len);
        } else {
            loader_info!("{}: fetch settled in {:?} with {:?} items", self.name, phase, len);
        }
    }

    fn dispatch(&self, msg: PagedMsg<F::Item, F::Error>) -> Vec<PagedEffect<F::Cursor>> {
        let mut guard = self.state.lock();
        let state = mem::take(&mut *guard);
        let (state, effects) = update_paged(state, msg);
        *guard = state;
        effects
    }
}

/// Held across a fetch await. Dropped without [`disarm`](Self::disarm), i.e.
/// when the load future is cancelled or the fetcher panics, it rolls the
/// machine back out of its in-flight phase so the next load can run.
struct InFlight<'a, S> {
    name: &'a str,
    state: &'a Mutex<S>,
    abandon: fn(&mut S),
    armed: bool,
}

impl<'a, S> InFlight<'a, S> {
    fn new(name: &'a str, state: &'a Mutex<S>, abandon: fn(&mut S)) -> Self {
        Self {
            name,
            state,
            abandon,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            (self.abandon)(&mut *self.state.lock());
            loader_warn!("{}: fetch abandoned before settling, rolled back", self.name);
        }
    }
}
