//! Persistence gateway for the forums slice.

mod memory;

pub use memory::InMemoryForums;

use agora_kernel::domain::forums::{Forum, ForumId, NewThread, Thread, ThreadId};
use async_trait::async_trait;
use std::borrow::Cow;
use std::fmt::Debug;

#[agora_derive::agora_error]
pub enum DataError {
    #[error("Storage unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Conflicting write{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal data error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Data access used by every forum component.
///
/// Lookups return `Ok(None)` when nothing matches; `Err` is reserved for
/// infrastructure failures. Soft-deleted rows are returned as stored and the
/// callers decide visibility. Threads come back with their parent forum and
/// every reply, deleted ones included.
#[async_trait]
pub trait ForumsDataContext: Debug + Send + Sync {
    async fn get_forums(&self) -> Result<Vec<Forum>, DataError>;

    async fn get_forum_by_slug(&self, slug: &str) -> Result<Option<Forum>, DataError>;

    async fn get_thread_by_id(&self, id: ThreadId) -> Result<Option<Thread>, DataError>;

    async fn get_thread_by_slug(&self, slug: &str) -> Result<Option<Thread>, DataError>;

    /// Every thread of the forum, soft-deleted ones included; replies are loaded too.
    async fn get_threads_for_forum(&self, forum_id: ForumId) -> Result<Vec<Thread>, DataError>;

    /// Persists a new thread and returns it with its assigned id and slug.
    async fn create_thread(&self, thread: NewThread) -> Result<Thread, DataError>;

    /// Soft-deletes the thread.
    async fn delete_thread(&self, thread: &Thread) -> Result<(), DataError>;
}
