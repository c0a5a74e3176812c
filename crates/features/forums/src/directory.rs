//! Forums home and per-forum thread listings.

use crate::ForumsInner;
use crate::error::{ForumsError, ForumsErrorExt};
use crate::pagination::paginate;
use crate::views::{
    Breadcrumb, FORUMS_HOME_URL, ForumSummary, ForumView, ForumsHomeView, Navigation,
    ThreadSummary, forum_url,
};
use agora_kernel::context::RequestContext;
use agora_kernel::domain::forums::{Forum, Thread};
use std::cmp::Reverse;
use tracing::instrument;

pub const FORUM_MISSING_MESSAGE: &str = "That forum does not exist.";

impl ForumsInner {
    /// Active forums ordered by title, plus the flash errors pending for this request.
    #[instrument(level = "debug", skip_all)]
    pub async fn forums_home(
        &self,
        ctx: &mut RequestContext,
    ) -> Result<ForumsHomeView, ForumsError> {
        let mut forums: Vec<Forum> = self
            .data
            .get_forums()
            .await
            .context("get_forums")?
            .into_iter()
            .filter(|forum| forum.is_active)
            .collect();
        forums.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

        Ok(ForumsHomeView {
            forums: forums.iter().map(ForumSummary::from).collect(),
            errors: ctx.flash.take(),
        })
    }

    /// One page of a forum's threads, pinned first then newest first.
    #[instrument(level = "debug", skip(self, ctx))]
    pub async fn forum_page(
        &self,
        ctx: &mut RequestContext,
        forum_slug: &str,
        page: i64,
    ) -> Result<Navigation<ForumView>, ForumsError> {
        let Some(page) = usize::try_from(page).ok().filter(|page| *page > 0) else {
            return Ok(Navigation::Redirect(forum_url(forum_slug)));
        };

        let forum = self.data.get_forum_by_slug(forum_slug).await.context("get_forum_by_slug")?;
        let Some(forum) = forum.filter(|forum| forum.is_active) else {
            ctx.flash.push_error(FORUM_MISSING_MESSAGE);
            return Ok(Navigation::Redirect(FORUMS_HOME_URL.to_owned()));
        };

        let mut threads: Vec<Thread> = self
            .data
            .get_threads_for_forum(forum.id)
            .await
            .context("get_threads_for_forum")?
            .into_iter()
            .filter(Thread::is_visible)
            .collect();
        threads.sort_by_key(|thread| {
            (Reverse(thread.is_pinned), Reverse(thread.created_at), Reverse(thread.id))
        });

        let threads = paginate(threads, page, self.settings.page_size);

        Ok(Navigation::Render(ForumView {
            id: forum.id,
            slug: forum.slug.clone(),
            title: forum.title.clone(),
            threads: threads.items.iter().map(ThreadSummary::from).collect(),
            current_page: threads.current_page,
            last_page: threads.last_page,
            pager_url: forum_url(&forum.slug),
            breadcrumbs: vec![Breadcrumb::current(forum.title.clone())],
        }))
    }
}
