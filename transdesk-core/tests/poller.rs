mod support;

use std::time::Duration;

use support::{job, Call, CountingSleeper, FakeServer};
use transdesk_core::poller::{poll_job, PollUpdate, TranslationStatus};
use transdesk_core::{ApiError, JobStatus};

#[tokio::test]
async fn test_poll_stops_at_terminal_state() {
    let server = FakeServer::new();
    server.script_statuses(vec![
        Ok(job("job-1", JobStatus::Pending, 0.0)),
        Ok(job("job-1", JobStatus::Translating, 40.0)),
        Ok(job("job-1", JobStatus::Completed, 100.0)),
        Ok(job("job-1", JobStatus::Completed, 100.0)),
    ]);
    let sleeper = CountingSleeper::default();
    let mut seen: Vec<PollUpdate> = Vec::new();

    let last = poll_job(
        &server,
        &sleeper,
        "job-1",
        Duration::from_millis(2000),
        |update| seen.push(update.clone()),
    )
    .await;

    assert_eq!(last.status, TranslationStatus::Success);
    assert_eq!(last.target_document.as_deref(), Some("job-1-out"));
    assert_eq!(server.count(|c| matches!(c, Call::Status(_))), 3);
    assert_eq!(sleeper.sleeps.get(), 2);
    assert_eq!(sleeper.last.get(), Some(Duration::from_millis(2000)));
    assert_eq!(
        seen.iter().map(|u| (u.status, u.progress)).collect::<Vec<_>>(),
        vec![
            (TranslationStatus::Translating, 0),
            (TranslationStatus::Translating, 40),
            (TranslationStatus::Success, 100),
        ]
    );
}

#[tokio::test]
async fn test_transient_failure_is_tolerated() {
    let server = FakeServer::new();
    server.script_statuses(vec![
        Ok(job("job-2", JobStatus::Translating, 10.0)),
        Err(ApiError::Network("connection reset".into())),
        Ok(job("job-2", JobStatus::Failed, 10.0)),
    ]);
    let sleeper = CountingSleeper::default();
    let mut statuses = Vec::new();

    let last = poll_job(&server, &sleeper, "job-2", Duration::from_secs(2), |u| {
        statuses.push(u.status)
    })
    .await;

    assert_eq!(server.count(|c| matches!(c, Call::Status(_))), 3);
    assert_eq!(
        statuses,
        vec![TranslationStatus::Translating, TranslationStatus::Error]
    );
    assert_eq!(last.error_message.as_deref(), Some("Translation engine error"));
}

#[tokio::test]
async fn test_server_side_cancel_ends_polling() {
    let server = FakeServer::new();
    server.script_statuses(vec![Ok(job("job-3", JobStatus::Cancelled, 30.0))]);
    let sleeper = CountingSleeper::default();

    let last = poll_job(&server, &sleeper, "job-3", Duration::from_secs(2), |_| {}).await;

    assert_eq!(last.status, TranslationStatus::Cancelled);
    assert_eq!(sleeper.sleeps.get(), 0);
}
