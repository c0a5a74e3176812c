//! View models handed to the external renderer as JSON.

use agora_derive::api_model;
use agora_kernel::domain::forums::{Forum, Reply, Thread};
use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, CONTROLS, PercentEncode, utf8_percent_encode};

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub title: String,
    /// Absent for the current page
    pub url: Option<String>,
}

impl Breadcrumb {
    #[must_use]
    pub fn current(title: impl Into<String>) -> Self {
        Self { title: title.into(), url: None }
    }

    #[must_use]
    pub fn forum(forum_title: &str, forum_slug: &str) -> Self {
        Self { title: forum_title.to_owned(), url: Some(forum_url(forum_slug)) }
    }
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ReplyView {
    pub id: u64,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Reply> for ReplyView {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id,
            author_id: reply.author_id.clone(),
            content: reply.content.clone(),
            created_at: reply.created_at,
        }
    }
}

/// A thread page: the original post plus one page of replies.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ThreadView {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub is_locked: bool,
    pub is_pinned: bool,
    pub forum_slug: String,
    pub forum_title: String,
    pub current_page: usize,
    pub last_page: usize,
    /// Base URL the renderer appends `?page=n` to
    pub pager_url: String,
    pub replies: Vec<ReplyView>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Share/unfurl payload.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ThreadPreview {
    pub slug: String,
    pub title: String,
    pub content_preview: String,
    pub share_link: String,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct FieldError {
    /// `None` for errors that apply to the whole form
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self { field: Some(field.to_owned()), message: message.into() }
    }

    #[must_use]
    pub fn form(message: impl Into<String>) -> Self {
        Self { field: None, message: message.into() }
    }
}

/// Submitted "new thread" form.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CreateThreadForm {
    pub title: String,
    pub content: String,
}

/// The "new thread" form as rendered, with submitted values and errors.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct CreateThreadView {
    pub forum_id: u64,
    pub forum_slug: String,
    pub forum_title: String,
    pub title: String,
    pub content: String,
    pub errors: Vec<FieldError>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl CreateThreadView {
    #[must_use]
    pub fn new(forum: &Forum, form: CreateThreadForm, errors: Vec<FieldError>) -> Self {
        Self {
            forum_id: forum.id,
            forum_slug: forum.slug.clone(),
            forum_title: forum.title.clone(),
            title: form.title,
            content: form.content,
            errors,
            breadcrumbs: vec![
                Breadcrumb::current("Create new thread"),
                Breadcrumb::forum(&forum.title, &forum.slug),
            ],
        }
    }
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ForumSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub url: String,
}

impl From<&Forum> for ForumSummary {
    fn from(forum: &Forum) -> Self {
        Self {
            id: forum.id,
            slug: forum.slug.clone(),
            title: forum.title.clone(),
            url: forum_url(&forum.slug),
        }
    }
}

/// Forums home: active forums plus errors flashed by the previous request.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ForumsHomeView {
    pub forums: Vec<ForumSummary>,
    pub errors: Vec<String>,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub is_pinned: bool,
    pub is_locked: bool,
    /// Visible replies only
    pub reply_count: usize,
    pub url: String,
}

impl From<&Thread> for ThreadSummary {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id,
            slug: thread.slug.clone(),
            title: thread.title.clone(),
            author_id: thread.author_id.clone(),
            created_at: thread.created_at,
            is_pinned: thread.is_pinned,
            is_locked: thread.is_locked,
            reply_count: thread.replies.iter().filter(|reply| !reply.is_deleted).count(),
            url: thread_url(&thread.slug),
        }
    }
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ForumView {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub threads: Vec<ThreadSummary>,
    pub current_page: usize,
    pub last_page: usize,
    pub pager_url: String,
    pub breadcrumbs: Vec<Breadcrumb>,
}

pub const FORUMS_HOME_URL: &str = "/forums";

/// Bytes escaped inside one path segment, on top of controls and non-ASCII.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

fn segment(raw: &str) -> PercentEncode<'_> {
    utf8_percent_encode(raw, PATH_SEGMENT)
}

/// Slugs arrive decoded from the request path, so they are escaped again here.
#[must_use]
pub fn forum_url(forum_slug: &str) -> String {
    format!("{FORUMS_HOME_URL}/{}", segment(forum_slug))
}

#[must_use]
pub fn thread_url(thread_slug: &str) -> String {
    format!("{FORUMS_HOME_URL}/threads/{}", segment(thread_slug))
}

#[must_use]
pub fn thread_page_url(thread_slug: &str, page: i64) -> String {
    format!("{}?page={page}", thread_url(thread_slug))
}

/// Either a page to render or a location to redirect the browser to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<T> {
    Render(T),
    Redirect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_escape_slug_segments() {
        assert_eq!(forum_url("general"), "/forums/general");
        assert_eq!(thread_url("café"), "/forums/threads/caf%C3%A9");
        assert_eq!(thread_url("a?b/c"), "/forums/threads/a%3Fb%2Fc");
        assert_eq!(thread_page_url("raid night", 3), "/forums/threads/raid%20night?page=3");
    }
}
