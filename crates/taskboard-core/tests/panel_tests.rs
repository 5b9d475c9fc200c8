//! Notification panel integration tests

mod common;

use std::sync::Arc;

use proptest::prelude::*;
use rstest::rstest;

use common::{notification, Scripted};
use taskboard_core::panel::LOAD_FAILED_NOTICE;
use taskboard_core::{
    FetchError, Notification, NotificationPanel, NotificationSource, PanelEvent, PanelView,
    RefreshOutcome,
};

// === Ordering of overlapping refreshes ===

#[tokio::test]
async fn test_late_response_from_older_request_is_dropped() {
    let (source, mut requests) = Scripted::<Vec<Notification>>::new();
    let panel = Arc::new(NotificationPanel::new(source, PanelView::new()));

    let first = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.refresh().await }
    });
    let (_, answer_first) = requests.recv().await.unwrap();

    let second = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.refresh().await }
    });
    let (_, answer_second) = requests.recv().await.unwrap();

    // Second request resolves first
    answer_second
        .send(Ok(vec![notification(2, "2024-01-02", "second")]))
        .unwrap();
    assert_eq!(second.await.unwrap(), RefreshOutcome::Rendered(1));

    answer_first
        .send(Ok(vec![
            notification(1, "2024-01-01", "first"),
            notification(3, "2024-01-03", "first too"),
        ]))
        .unwrap();
    assert_eq!(first.await.unwrap(), RefreshOutcome::Superseded);

    let view = panel.snapshot();
    assert_eq!(view.len(), 1);
    assert_eq!(view.entries()[0].text, "second");
}

#[tokio::test]
async fn test_late_failure_from_older_request_sets_no_notice() {
    let (source, mut requests) = Scripted::<Vec<Notification>>::new();
    let panel = Arc::new(NotificationPanel::new(source, PanelView::new()));

    let first = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.refresh().await }
    });
    let (_, answer_first) = requests.recv().await.unwrap();

    let second = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.refresh().await }
    });
    let (_, answer_second) = requests.recv().await.unwrap();

    answer_second.send(Ok(vec![notification(5, "t", "ok")])).unwrap();
    second.await.unwrap();

    answer_first
        .send(Err(FetchError::NetworkFailure("reset".into())))
        .unwrap();
    assert_eq!(first.await.unwrap(), RefreshOutcome::Superseded);

    let view = panel.snapshot();
    assert_eq!(view.notice(), None);
    assert_eq!(view.len(), 1);
}

#[tokio::test]
async fn test_in_order_responses_show_latest() {
    let (source, mut requests) = Scripted::<Vec<Notification>>::new();
    let panel = Arc::new(NotificationPanel::new(source, PanelView::new()));

    let first = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.refresh().await }
    });
    let (_, answer_first) = requests.recv().await.unwrap();
    let second = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.refresh().await }
    });
    let (_, answer_second) = requests.recv().await.unwrap();

    answer_first.send(Ok(vec![notification(1, "t", "old")])).unwrap();
    assert_eq!(first.await.unwrap(), RefreshOutcome::Superseded);
    answer_second.send(Ok(vec![notification(2, "t", "new")])).unwrap();
    assert_eq!(second.await.unwrap(), RefreshOutcome::Rendered(1));

    assert_eq!(panel.snapshot().entries()[0].text, "new");
}

// === Error statuses ===

#[rstest]
#[case(FetchError::status(500))]
#[case(FetchError::status(404))]
#[case(FetchError::InvalidResponse("malformed payload".into()))]
#[case(FetchError::NetworkFailure("connection refused".into()))]
#[tokio::test]
async fn test_failure_leaves_entries_untouched(#[case] error: FetchError) {
    let (source, mut requests) = Scripted::<Vec<Notification>>::new();
    let panel = Arc::new(NotificationPanel::new(source, PanelView::new()));

    let ok = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.refresh().await }
    });
    let (_, answer) = requests.recv().await.unwrap();
    answer
        .send(Ok(vec![
            notification(1, "2024-01-01", "A"),
            notification(2, "2024-01-02", "B"),
        ]))
        .unwrap();
    ok.await.unwrap();
    let before = panel.snapshot();

    let failing = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.handle(PanelEvent::Open).await }
    });
    let (_, answer) = requests.recv().await.unwrap();
    answer.send(Err(error.clone())).unwrap();

    assert_eq!(failing.await.unwrap(), Some(RefreshOutcome::Failed(error)));
    let after = panel.snapshot();
    assert_eq!(after.entries(), before.entries());
    assert_eq!(after.notice(), Some(LOAD_FAILED_NOTICE));
}

// === Rendering ===

#[tokio::test]
async fn test_two_records_render_two_links() {
    let (source, mut requests) = Scripted::<Vec<Notification>>::new();
    let panel = Arc::new(NotificationPanel::new(source, PanelView::new()));

    let refresh = tokio::spawn({
        let panel = Arc::clone(&panel);
        async move { panel.refresh().await }
    });
    let (_, answer) = requests.recv().await.unwrap();
    answer
        .send(Ok(vec![
            notification(1, "2024-01-01", "A"),
            notification(2, "2024-01-02", "B"),
        ]))
        .unwrap();
    refresh.await.unwrap();

    let html = panel.snapshot().to_html();
    let first = html.find("href=\"/show_task?id=1\"").unwrap();
    let second = html.find("href=\"/show_task?id=2\"").unwrap();
    assert!(first < second);
    assert!(html.contains("2024-01-01<h6>A</h6>"));
    assert!(html.contains("2024-01-02<h6>B</h6>"));
}

struct Fixed(Vec<Notification>);

#[async_trait::async_trait]
impl NotificationSource for Fixed {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, FetchError> {
        Ok(self.0.clone())
    }
}

proptest! {
    #[test]
    fn test_n_records_render_n_entries_in_order(
        records in prop::collection::vec((0u64..10_000, "[0-9: -]{0,19}", ".{0,40}"), 0..25)
    ) {
        let notifications: Vec<_> = records
            .iter()
            .map(|(id, ts, text)| notification(*id, ts, text))
            .collect();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let panel = NotificationPanel::new(Fixed(notifications.clone()), PanelView::new());

        // Refresh twice: the second must replace, not append
        runtime.block_on(panel.refresh());
        let outcome = runtime.block_on(panel.refresh());
        prop_assert_eq!(outcome, RefreshOutcome::Rendered(notifications.len()));

        let view = panel.snapshot();
        prop_assert_eq!(view.len(), notifications.len());
        for (entry, record) in view.entries().iter().zip(&notifications) {
            prop_assert_eq!(&entry.href, &format!("/show_task?id={}", record.task_id));
            prop_assert_eq!(&entry.timestamp, &record.timestamp);
            prop_assert_eq!(&entry.text, &record.text);
        }
    }
}
