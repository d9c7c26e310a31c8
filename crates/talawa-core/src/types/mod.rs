//! Identifier and endpoint types.
//!
//! These types validate at construction time so that the rest of the
//! crate never sees an empty id or a malformed endpoint.

mod api_url;
mod cursor;
mod id;

pub use api_url::ApiUrl;
pub use cursor::Cursor;
pub use id::{CommentId, OrganizationId, PostId, UserId};
