mod common;

use agora_forums::data::ForumsDataContext;
use agora_forums::guard::{
    CREATE_FAILED_MESSAGE, CreateThreadOutcome, NOT_AUTHOR_MESSAGE, THREAD_LOCKED_MESSAGE,
};
use agora_forums::views::{CreateThreadForm, FieldError};
use agora_forums::{Forums, ForumsError};
use agora_kernel::context::RequestContext;
use agora_kernel::domain::roles::RoleSet;
use agora_kernel::security::identity::Identity;
use common::{AUTHOR, OTHER_USER, ReadOnlyData, config, fixture, seed_thread, writer};
use std::sync::Arc;

fn form(title: &str, content: &str) -> CreateThreadForm {
    CreateThreadForm { title: title.to_owned(), content: content.to_owned() }
}

#[tokio::test]
async fn creation_requires_writer_claim() {
    let fx = fixture(5);
    let reader = Identity::authenticated(AUTHOR, RoleSet::FORUMS_MODERATOR);

    for ctx in [RequestContext::anonymous(), RequestContext::new(reader)] {
        let result = fx.forums.submit_thread(&ctx, "general", form("Hello there", "Body")).await;
        assert!(matches!(result, Err(ForumsError::Unauthorized { .. })));
        let result = fx.forums.new_thread_form(&ctx, "general").await;
        assert!(matches!(result, Err(ForumsError::Unauthorized { .. })));
    }
}

#[tokio::test]
async fn missing_forum_sends_writer_home() {
    let fx = fixture(5);
    let outcome =
        fx.forums.submit_thread(&writer(AUTHOR), "nowhere", form("Hello there", "Body")).await;
    assert_eq!(outcome.unwrap(), CreateThreadOutcome::ForumMissing);
    assert_eq!(fx.forums.new_thread_form(&writer(AUTHOR), "nowhere").await.unwrap(), None);
}

#[tokio::test]
async fn empty_form_view_has_breadcrumbs() {
    let fx = fixture(5);
    let view = fx.forums.new_thread_form(&writer(AUTHOR), "general").await.unwrap().unwrap();
    assert_eq!(view.forum_id, fx.forum.id);
    assert_eq!(view.breadcrumbs[0].title, "Create new thread");
    assert_eq!(view.breadcrumbs[1].url.as_deref(), Some("/forums/general"));
    assert!(view.errors.is_empty());
}

#[tokio::test]
async fn blank_fields_are_required() {
    let fx = fixture(5);
    let outcome = fx.forums.submit_thread(&writer(AUTHOR), "general", form("  ", "")).await.unwrap();

    let CreateThreadOutcome::Invalid(view) = outcome else {
        panic!("expected field errors, got {outcome:?}");
    };
    let fields: Vec<_> = view.errors.iter().map(|e| e.field.as_deref()).collect();
    assert_eq!(fields, [Some("title"), Some("content")]);
}

#[tokio::test]
async fn title_must_match_pattern() {
    let fx = fixture(5);
    let outcome = fx
        .forums
        .submit_thread(&writer(AUTHOR), "general", form("  ##nope", "Body"))
        .await
        .unwrap();

    let CreateThreadOutcome::Invalid(view) = outcome else {
        panic!("expected field errors, got {outcome:?}");
    };
    assert_eq!(view.title, "  ##nope");
    assert_eq!(view.content, "Body");
    assert_eq!(
        view.errors,
        [FieldError::field("title", fx.forums.settings.title_error_message.clone())]
    );
}

#[tokio::test]
async fn valid_submission_creates_and_redirects_to_forum() {
    let fx = fixture(5);
    let outcome = fx
        .forums
        .submit_thread(&writer(AUTHOR), "general", form("  Weekly raid  ", "See you there"))
        .await
        .unwrap();

    let CreateThreadOutcome::Created { thread, redirect } = outcome else {
        panic!("expected creation, got {outcome:?}");
    };
    assert_eq!(redirect, "/forums/general");
    assert_eq!(thread.title, "Weekly raid");
    assert_eq!(thread.author_id, AUTHOR);
    assert_eq!(thread.forum.id, fx.forum.id);
}

#[tokio::test]
async fn persistence_failure_rerenders_form_with_generic_error() {
    let data = Arc::new(ReadOnlyData::default());
    data.inner.add_forum("general", "General", true);
    let forums = Forums::build(&config(5), data).unwrap();

    let outcome = forums
        .submit_thread(&writer(AUTHOR), "general", form("Weekly raid", "See you there"))
        .await
        .unwrap();

    let CreateThreadOutcome::Failed(view) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(view.errors, [FieldError::form(CREATE_FAILED_MESSAGE)]);
    assert_eq!(view.title, "Weekly raid");
}

#[tokio::test]
async fn author_can_delete_unlocked_thread() {
    let fx = fixture(5);
    let thread = seed_thread(&fx.store, fx.forum.id, "Mine").await;

    fx.forums.delete_thread(&writer(AUTHOR), thread.id).await.unwrap();

    assert!(fx.store.get_thread_by_id(thread.id).await.unwrap().unwrap().is_deleted);
    let again = fx.forums.delete_thread(&writer(AUTHOR), thread.id).await;
    assert!(matches!(again, Err(ForumsError::NotFound { .. })));
}

#[tokio::test]
async fn non_author_is_rejected_even_when_unlocked() {
    let fx = fixture(5);
    let thread = seed_thread(&fx.store, fx.forum.id, "Not yours").await;

    let result = fx.forums.delete_thread(&writer(OTHER_USER), thread.id).await;

    assert!(matches!(
        result,
        Err(ForumsError::Unauthorized { ref message, .. }) if message == NOT_AUTHOR_MESSAGE
    ));
    assert!(!fx.store.get_thread_by_id(thread.id).await.unwrap().unwrap().is_deleted);
}

#[tokio::test]
async fn authorship_is_checked_before_lock_state() {
    let fx = fixture(5);
    let thread = seed_thread(&fx.store, fx.forum.id, "Locked").await;
    fx.store.set_thread_locked(thread.id, true);

    let stranger = fx.forums.delete_thread(&writer(OTHER_USER), thread.id).await;
    assert!(matches!(stranger, Err(ForumsError::Unauthorized { .. })));

    let author = fx.forums.delete_thread(&writer(AUTHOR), thread.id).await;
    assert!(matches!(
        author,
        Err(ForumsError::InvalidState { ref message, .. }) if message == THREAD_LOCKED_MESSAGE
    ));
}

#[tokio::test]
async fn delete_requires_writer_claim_and_existing_thread() {
    let fx = fixture(5);
    let thread = seed_thread(&fx.store, fx.forum.id, "Claims").await;

    let anonymous = fx.forums.delete_thread(&RequestContext::anonymous(), thread.id).await;
    assert!(matches!(anonymous, Err(ForumsError::Unauthorized { .. })));

    let missing = fx.forums.delete_thread(&writer(AUTHOR), 9_999).await;
    assert!(matches!(missing, Err(ForumsError::NotFound { .. })));
}

#[tokio::test]
async fn delete_failure_surfaces_as_data_error() {
    let data = Arc::new(ReadOnlyData::default());
    let forum = data.inner.add_forum("general", "General", true);
    let thread = seed_thread(&data.inner, forum.id, "Sticky").await;
    let forums = Forums::build(&config(5), data).unwrap();

    let result = forums.delete_thread(&writer(AUTHOR), thread.id).await;

    assert!(matches!(result, Err(ForumsError::Data { .. })));
}
