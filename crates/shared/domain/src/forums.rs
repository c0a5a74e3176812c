//! Forum entities as handed out by the data context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ForumId = u64;
pub type ThreadId = u64;
pub type ReplyId = u64;
pub type UserId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
    pub id: ForumId,
    pub slug: String,
    pub title: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub is_locked: bool,
    pub is_deleted: bool,
    pub is_pinned: bool,
    /// Parent forum, loaded together with the thread.
    pub forum: Forum,
    pub replies: Vec<Reply>,
}

impl Thread {
    /// Soft-deleted threads are never shown, whatever the entry point.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !self.is_deleted
    }

    /// Share/unfurl routes additionally require an active parent forum.
    #[must_use]
    pub const fn is_shareable(&self) -> bool {
        self.is_visible() && self.forum.is_active
    }

    #[must_use]
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }
}

/// Input for creating a thread; the data context assigns id, slug and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewThread {
    pub forum_id: ForumId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
}
