use std::time::Duration;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use verso_core::session::Armed;
use verso_core::storage::JsonFileStorage;
use verso_core::store::TranslationMemory;
use verso_types::{AppEvent, PageCommand, PageEvent};

use super::support::test_state;
use crate::events::event_loop;
use crate::io::route_page_event;
use crate::mode_sync::mode_sync;
use crate::page::PageLink;

#[tokio::test]
async fn test_mode_off_from_store_resets_session() {
    let (_dir, state) = test_state(&[], "").await;
    state.memory.set_mode_active(true).await.unwrap();
    {
        let mut session = state.session.lock().await;
        session.set_active(true);
        session.on_selection("Hello");
    }

    let cancel = CancellationToken::new();
    let task = tokio::spawn(mode_sync(state.clone(), cancel.clone()));
    tokio::task::yield_now().await;

    state.memory.set_mode_active(false).await.unwrap();

    timeout(Duration::from_secs(2), async {
        loop {
            if *state.session.lock().await.armed() == Armed::Idle {
                break;
            }
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("session never went idle");
    assert!(!state.session.lock().await.is_active());

    cancel.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_mode_off_written_by_another_process_resets_session() {
    let (_dir, state) = test_state(&[], "").await;
    state.memory.set_mode_active(true).await.unwrap();
    {
        let mut session = state.session.lock().await;
        session.set_active(true);
        session.on_selection("Hello");
    }

    let cancel = CancellationToken::new();
    let task = tokio::spawn(mode_sync(state.clone(), cancel.clone()));

    // a second handle on the same files, as the `mode off` command opens
    let storage = JsonFileStorage::from_config(&state.config.read().await.storage);
    let cli = TranslationMemory::open(storage).unwrap();
    cli.set_mode_active(false).await.unwrap();

    timeout(Duration::from_secs(2), async {
        loop {
            if !state.session.lock().await.is_active() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("session never saw the stored mode change");
    assert_eq!(*state.session.lock().await.armed(), Armed::Idle);

    cancel.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_event_loop_answers_paste_in_order() {
    let (_dir, state) = test_state(&[], "").await;
    let (event_tx, event_rx) = kanal::bounded_async(8);
    let (command_tx, command_rx) = kanal::bounded_async(8);
    let (_result_tx, result_rx) = kanal::bounded_async(8);
    let link = PageLink {
        commands: command_tx,
        insert_results: result_rx,
    };

    tokio::spawn(event_loop(state.clone(), event_rx, link));

    event_tx.send(AppEvent::Page(PageEvent::Paste)).await.unwrap();
    event_tx.send(AppEvent::Page(PageEvent::Paste)).await.unwrap();

    for _ in 0..2 {
        let command = timeout(Duration::from_secs(2), command_rx.recv())
            .await
            .expect("no reply to paste")
            .unwrap();
        assert_eq!(command, PageCommand::AllowDefault);
    }
}

#[tokio::test]
async fn test_insert_results_bypass_the_event_queue() {
    let (event_tx, event_rx) = kanal::bounded_async(8);
    let (result_tx, result_rx) = kanal::bounded_async(8);

    route_page_event(&event_tx, &result_tx, PageEvent::InsertResult { ok: false });
    route_page_event(&event_tx, &result_tx, PageEvent::Paste);

    assert_eq!(result_rx.try_recv().unwrap(), Some(false));
    assert!(matches!(
        event_rx.try_recv().unwrap(),
        Some(AppEvent::Page(PageEvent::Paste))
    ));
    assert!(event_rx.is_empty());
}
