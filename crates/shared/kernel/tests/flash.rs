#![cfg(feature = "server")]

use agora_kernel::context::FlashMessages;
use agora_kernel::server::flash::{persist_flash, take_flash};
use std::sync::Arc;
use tower_sessions::{MemoryStore, Session};

fn session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

#[tokio::test]
async fn flash_survives_until_taken() {
    let session = session();
    let mut flash = FlashMessages::default();
    flash.push_error("That thread does not exist.");

    persist_flash(&session, flash).await.unwrap();

    let taken = take_flash(&session).await.unwrap();
    assert_eq!(taken.errors(), ["That thread does not exist.".to_owned()]);
    assert!(take_flash(&session).await.unwrap().is_empty());
}

#[tokio::test]
async fn persisting_appends_to_pending_errors() {
    let session = session();
    persist_flash(&session, FlashMessages::new(vec!["first".to_owned()])).await.unwrap();
    persist_flash(&session, FlashMessages::new(vec!["second".to_owned()])).await.unwrap();
    persist_flash(&session, FlashMessages::default()).await.unwrap();

    let taken = take_flash(&session).await.unwrap();
    assert_eq!(taken.errors(), ["first".to_owned(), "second".to_owned()]);
}
