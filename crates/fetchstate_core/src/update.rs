use crate::{Effect, Msg, PagedEffect, PagedMsg, PagedResourceState, Pageable, ResourceState};

/// Pure update function: applies a message to a single-value resource and
/// returns the fetch to run, if any.
///
/// The in-flight check and the phase flip happen here, in one synchronous
/// step, so a caller that serializes messages can never issue two fetches.
pub fn update<V, E>(
    mut state: ResourceState<V, E>,
    msg: Msg<V, E>,
) -> (ResourceState<V, E>, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadRequested => {
            if state.is_loading() {
                return (state, Vec::new());
            }
            state.start_load();
            vec![Effect::Fetch]
        }
        Msg::LoadSucceeded(value) => {
            state.on_success(value);
            Vec::new()
        }
        Msg::LoadFailed(error) => {
            state.on_failure(error);
            Vec::new()
        }
    };

    (state, effects)
}

/// Pure update function for a paged collection.
pub fn update_paged<T, E>(
    mut state: PagedResourceState<T, E>,
    msg: PagedMsg<T, E>,
) -> (PagedResourceState<T, E>, Vec<PagedEffect<T::Cursor>>)
where
    T: Pageable,
{
    let effects = match msg {
        PagedMsg::LoadRequested => {
            if state.is_loading() || state.is_paging() {
                return (state, Vec::new());
            }
            state.start_load();
            vec![PagedEffect::FetchInitial]
        }
        PagedMsg::LoadSucceeded(items) => {
            state.on_success(items);
            Vec::new()
        }
        PagedMsg::LoadFailed(error) => {
            state.on_failure(error);
            Vec::new()
        }
        PagedMsg::MoreRequested => {
            if state.is_loading() || state.is_paging() {
                return (state, Vec::new());
            }
            // Nothing to page from without a tail item.
            let Some(cursor) = state.next_cursor() else {
                return (state, Vec::new());
            };
            if !state.start_page() {
                return (state, Vec::new());
            }
            vec![PagedEffect::FetchMore { cursor }]
        }
        PagedMsg::MoreSucceeded(items) => {
            state.on_page_success(items);
            Vec::new()
        }
        PagedMsg::MoreFailed(error) => {
            state.on_page_failure(error);
            Vec::new()
        }
    };

    (state, effects)
}
