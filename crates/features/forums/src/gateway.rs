//! Thread access: id/slug resolution, visibility filtering and share previews.

use crate::ForumsInner;
use crate::error::{ForumsError, ForumsErrorExt};
use crate::pagination::paginate_replies;
use crate::preview::preview;
use crate::views::{
    Breadcrumb, FORUMS_HOME_URL, Navigation, ReplyView, ThreadPreview, ThreadView, thread_page_url,
    thread_url,
};
use agora_kernel::context::RequestContext;
use agora_kernel::domain::forums::{Thread, ThreadId};
use tracing::{debug, instrument};

pub const THREAD_MISSING_MESSAGE: &str = "That thread does not exist.";

/// How a thread is addressed in a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadKey {
    Id(ThreadId),
    Slug(String),
}

impl From<&str> for ThreadKey {
    /// Anything that parses as an unsigned integer is an id.
    fn from(raw: &str) -> Self {
        raw.parse::<ThreadId>().map_or_else(|_| Self::Slug(raw.to_owned()), Self::Id)
    }
}

impl ForumsInner {
    /// Browses a thread by id or slug.
    pub async fn resolve_thread(
        &self,
        ctx: &mut RequestContext,
        key: &ThreadKey,
        page: i64,
    ) -> Result<Navigation<ThreadView>, ForumsError> {
        match key {
            ThreadKey::Id(id) => self.thread_by_id(ctx, *id, page).await,
            ThreadKey::Slug(slug) => self.thread_by_slug(ctx, slug, page).await,
        }
    }

    /// Legacy id links always redirect to the canonical slug URL, carrying `page` along.
    #[instrument(level = "debug", skip(self, ctx))]
    pub async fn thread_by_id(
        &self,
        ctx: &mut RequestContext,
        id: ThreadId,
        page: i64,
    ) -> Result<Navigation<ThreadView>, ForumsError> {
        let thread = self.data.get_thread_by_id(id).await.context("get_thread_by_id")?;

        Ok(match thread.filter(Thread::is_visible) {
            Some(thread) => Navigation::Redirect(thread_page_url(&thread.slug, page)),
            None => Self::thread_missing(ctx),
        })
    }

    /// Renders one page of a thread. Pages below 1 redirect to the page-less URL
    /// without touching the data context.
    #[instrument(level = "debug", skip(self, ctx))]
    pub async fn thread_by_slug(
        &self,
        ctx: &mut RequestContext,
        slug: &str,
        page: i64,
    ) -> Result<Navigation<ThreadView>, ForumsError> {
        let Some(page) = usize::try_from(page).ok().filter(|page| *page > 0) else {
            return Ok(Navigation::Redirect(thread_url(slug)));
        };

        let thread = self.data.get_thread_by_slug(slug).await.context("get_thread_by_slug")?;

        Ok(match thread.filter(Thread::is_visible) {
            Some(thread) => Navigation::Render(self.thread_view(&thread, page)),
            None => Self::thread_missing(ctx),
        })
    }

    /// Anonymous unfurl payload. Missing, deleted or inactive-forum threads are `NotFound`.
    #[instrument(level = "debug", skip(self))]
    pub async fn share_thread(&self, slug: &str) -> Result<ThreadPreview, ForumsError> {
        let thread = self
            .data
            .get_thread_by_slug(slug)
            .await
            .context("get_thread_by_slug")?
            .filter(Thread::is_shareable)
            .ok_or_else(|| ForumsError::not_found(format!("thread '{slug}'")))?;

        Ok(ThreadPreview {
            slug: thread.slug.clone(),
            title: thread.title.clone(),
            content_preview: preview(
                self.markdown.as_ref(),
                &thread.content,
                self.settings.preview_length,
            ),
            share_link: self.settings.share_link(thread.id),
        })
    }

    #[must_use]
    pub fn thread_view(&self, thread: &Thread, page: usize) -> ThreadView {
        let replies = paginate_replies(&thread.replies, page, self.settings.page_size);

        ThreadView {
            id: thread.id,
            slug: thread.slug.clone(),
            title: thread.title.clone(),
            content: thread.content.clone(),
            author_id: thread.author_id.clone(),
            created_at: thread.created_at,
            is_locked: thread.is_locked,
            is_pinned: thread.is_pinned,
            forum_slug: thread.forum.slug.clone(),
            forum_title: thread.forum.title.clone(),
            current_page: replies.current_page,
            last_page: replies.last_page,
            pager_url: thread_url(&thread.slug),
            replies: replies.items.into_iter().map(ReplyView::from).collect(),
            breadcrumbs: vec![
                Breadcrumb::current(thread.title.clone()),
                Breadcrumb::forum(&thread.forum.title, &thread.forum.slug),
            ],
        }
    }

    fn thread_missing(ctx: &mut RequestContext) -> Navigation<ThreadView> {
        debug!("Thread missing or deleted, redirecting to forums home");
        ctx.flash.push_error(THREAD_MISSING_MESSAGE);
        Navigation::Redirect(FORUMS_HOME_URL.to_owned())
    }
}
