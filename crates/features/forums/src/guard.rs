//! Authorization and validation in front of thread creation and deletion.

use crate::ForumsInner;
use crate::error::{ForumsError, ForumsErrorExt};
use crate::views::{CreateThreadForm, CreateThreadView, FieldError, forum_url};
use agora_kernel::domain::forums::{Forum, NewThread, Thread, ThreadId};
use agora_kernel::domain::roles::RoleSet;
use agora_kernel::context::RequestContext;
use agora_kernel::security::identity::Identity;
use tracing::{error, info, instrument};

pub const CREATE_FAILED_MESSAGE: &str =
    "An error occurred while creating the thread. Please try again.";
pub const NOT_AUTHOR_MESSAGE: &str = "You are not the author of this post.";
pub const THREAD_LOCKED_MESSAGE: &str =
    "The thread is locked, therefore you cannot delete the thread.";
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred with your request.";

const TITLE_FIELD: &str = "title";
const CONTENT_FIELD: &str = "content";

/// Result of a "new thread" submission that passed the role check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateThreadOutcome {
    /// Persisted; the browser goes back to the forum page.
    Created { thread: Thread, redirect: String },
    /// The parent forum does not exist.
    ForumMissing,
    /// Field errors; the form is shown again with the submitted values.
    Invalid(CreateThreadView),
    /// The data context failed; the form is shown again with a generic error.
    Failed(CreateThreadView),
}

fn require_writer(identity: &Identity) -> Result<&str, ForumsError> {
    identity
        .require_role(RoleSet::FORUMS_WRITER)
        .map_err(|err| ForumsError::unauthorized(err.to_string()))
}

impl ForumsInner {
    /// Empty "new thread" form for `forum_slug`; `None` when the forum does not exist.
    #[instrument(level = "debug", skip(self, ctx))]
    pub async fn new_thread_form(
        &self,
        ctx: &RequestContext,
        forum_slug: &str,
    ) -> Result<Option<CreateThreadView>, ForumsError> {
        require_writer(&ctx.identity)?;

        let forum = self.data.get_forum_by_slug(forum_slug).await.context("get_forum_by_slug")?;
        Ok(forum.map(|forum| CreateThreadView::new(&forum, CreateThreadForm::default(), Vec::new())))
    }

    /// Field checks for a submission: both fields required, then the trimmed
    /// title must match the configured pattern.
    pub fn validate_submission(&self, form: &CreateThreadForm) -> Result<(), ForumsError> {
        let mut errors = Vec::new();
        if form.title.trim().is_empty() {
            errors.push(FieldError::field(TITLE_FIELD, "The Title field is required."));
        }
        if form.content.trim().is_empty() {
            errors.push(FieldError::field(CONTENT_FIELD, "The Content field is required."));
        }
        if errors.is_empty() && !self.settings.title_pattern.is_match(form.title.trim()) {
            errors.push(FieldError::field(TITLE_FIELD, self.settings.title_error_message.clone()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ForumsError::Validation { errors, context: None })
        }
    }

    /// Handles a "new thread" submission.
    ///
    /// Order: role claim, parent forum, field validation, persistence.
    #[instrument(level = "debug", skip(self, ctx, form))]
    pub async fn submit_thread(
        &self,
        ctx: &RequestContext,
        forum_slug: &str,
        form: CreateThreadForm,
    ) -> Result<CreateThreadOutcome, ForumsError> {
        let author_id = require_writer(&ctx.identity)?;

        let Some(forum) =
            self.data.get_forum_by_slug(forum_slug).await.context("get_forum_by_slug")?
        else {
            return Ok(CreateThreadOutcome::ForumMissing);
        };

        match self.validate_submission(&form) {
            Ok(()) => {},
            Err(ForumsError::Validation { errors, .. }) => {
                return Ok(CreateThreadOutcome::Invalid(CreateThreadView::new(&forum, form, errors)));
            },
            Err(err) => return Err(err),
        }

        let new_thread = NewThread {
            forum_id: forum.id,
            author_id: author_id.to_owned(),
            title: form.title.trim().to_owned(),
            content: form.content.clone(),
        };

        match self.data.create_thread(new_thread).await {
            Ok(thread) => {
                info!(thread_id = thread.id, forum = %forum.slug, author = author_id, "Thread created");
                Ok(CreateThreadOutcome::Created { thread, redirect: forum_url(&forum.slug) })
            },
            Err(err) => {
                error!(error = ?err, forum = %forum.slug, author = author_id, "Failed to create thread");
                Ok(CreateThreadOutcome::Failed(Self::failed_form(&forum, form)))
            },
        }
    }

    /// Soft-deletes a thread on behalf of its author.
    ///
    /// Rejections in order: role claim, missing or deleted thread, authorship, lock.
    #[instrument(level = "debug", skip(self, ctx))]
    pub async fn delete_thread(
        &self,
        ctx: &RequestContext,
        thread_id: ThreadId,
    ) -> Result<(), ForumsError> {
        let user_id = require_writer(&ctx.identity)?;

        let thread = self
            .data
            .get_thread_by_id(thread_id)
            .await
            .context("get_thread_by_id")?
            .filter(Thread::is_visible)
            .ok_or_else(|| ForumsError::not_found(format!("thread {thread_id}")))?;

        if !thread.is_authored_by(user_id) {
            return Err(ForumsError::unauthorized(NOT_AUTHOR_MESSAGE));
        }
        if thread.is_locked {
            return Err(ForumsError::invalid_state(THREAD_LOCKED_MESSAGE));
        }

        self.data.delete_thread(&thread).await.context("delete_thread")?;
        info!(thread_id, author = user_id, "Thread deleted");
        Ok(())
    }

    fn failed_form(forum: &Forum, form: CreateThreadForm) -> CreateThreadView {
        CreateThreadView::new(forum, form, vec![FieldError::form(CREATE_FAILED_MESSAGE)])
    }
}
