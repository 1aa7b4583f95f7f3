/// An item of a paged collection that knows where the next page starts.
///
/// The cursor is always computed from the tail of the collection currently
/// held, e.g. the last key plus one or an opaque continuation token.
pub trait Pageable {
    type Cursor;

    fn cursor_after(&self) -> Self::Cursor;
}
