//! Collaborator traits: backends, page sources and failure notification.

mod backend;
mod notifier;
mod source;

pub use backend::Backend;
pub use notifier::{LogNotifier, Notifier};
pub use source::PageSource;
