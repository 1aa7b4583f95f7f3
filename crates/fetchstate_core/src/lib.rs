//! Fetchstate core: pure lifecycle state machines for asynchronously fetched
//! resources, the update step that guards against overlapping fetches, and
//! view-model helpers.
mod cursor;
mod effect;
mod msg;
mod paged;
mod phase;
mod state;
mod update;
mod view_model;

pub use cursor::Pageable;
pub use effect::{Effect, PagedEffect};
pub use msg::{Msg, PagedMsg};
pub use paged::PagedResourceState;
pub use phase::Phase;
pub use state::ResourceState;
pub use update::{update, update_paged};
pub use view_model::{Body, Footer, PagedResourceView, ResourceView};
