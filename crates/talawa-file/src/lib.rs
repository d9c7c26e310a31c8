//! talawa-file - Filesystem snapshot backend.
//!
//! A snapshot is a directory of JSON arrays, one per connection:
//!
//! ```text
//! <root>/posts/<organization id>.json
//! <root>/comments/<post id>.json
//! <root>/post-up-voters/<post id>.json
//! <root>/comment-up-voters/<comment id>.json
//! ```
//!
//! Pages are cut from the arrays in file order. The cursor of a page is the
//! decimal offset just past its last item, so `"10"` continues with the
//! eleventh entry.

mod backend;
mod store;

pub use backend::FileBackend;
pub use store::{ConnectionKind, SnapshotStore};
