mod support;

use support::{glossary, term, Call, FakeServer};
use transdesk_core::conflict::{select_glossary, ConflictDecision, GlossarySelection, SelectionOutcome};
use transdesk_core::{AppError, ValidationError};

fn server_with(count: usize) -> FakeServer {
    (0..count).fold(FakeServer::new(), |server, i| {
        server.with_glossary(glossary(
            &format!("g{i}"),
            &format!("Glossary {i}"),
            vec![term(&format!("t{i}"), &format!("source {i}"), "target")],
        ))
    })
}

#[tokio::test]
async fn test_sixth_glossary_is_rejected_before_fetch() {
    let server = server_with(6);
    let mut selection = GlossarySelection::default();
    for i in 0..5 {
        let outcome = select_glossary(&mut selection, &server, &format!("g{i}"))
            .await
            .unwrap();
        assert_eq!(outcome, SelectionOutcome::Added { color_index: i });
    }
    server.calls.borrow_mut().clear();

    let err = select_glossary(&mut selection, &server, "g5")
        .await
        .unwrap_err();

    assert_eq!(err, AppError::Validation(ValidationError::SelectionFull(5)));
    assert!(server.calls().is_empty());
    assert_eq!(selection.len(), 5);
}

#[tokio::test]
async fn test_conflicting_glossary_waits_for_decision() {
    let server = FakeServer::new()
        .with_glossary(glossary(
            "legal",
            "Legal",
            vec![term("a1", "Contract", "Hợp đồng"), term("a2", "Party", "Bên")],
        ))
        .with_glossary(glossary(
            "finance",
            "Finance",
            vec![
                term("b1", "Contract", "Hợp đồng tài chính"),
                term("b2", "Invoice", "Hóa đơn"),
            ],
        ));
    let mut selection = GlossarySelection::default();
    select_glossary(&mut selection, &server, "legal").await.unwrap();

    let outcome = select_glossary(&mut selection, &server, "finance")
        .await
        .unwrap();
    let SelectionOutcome::Conflict(conflict) = outcome else {
        panic!("expected a conflict");
    };
    assert_eq!(conflict.count, 1);
    assert_eq!(conflict.examples, vec!["Contract"]);
    assert_eq!(conflict.glossary_name, "Finance");

    // Nothing else can be selected while the prompt is open
    let err = select_glossary(&mut selection, &server, "legal")
        .await
        .unwrap_err();
    assert_eq!(err, AppError::Validation(ValidationError::ConflictPending));

    assert_eq!(selection.resolve(ConflictDecision::Include), Some(1));
    assert_eq!(selection.ids(), vec!["legal", "finance"]);
    assert_eq!(
        server.count(|c| matches!(c, Call::GetGlossary(_))),
        2
    );
}

#[tokio::test]
async fn test_missing_glossary_surfaces_api_error() {
    let server = FakeServer::new();
    let mut selection = GlossarySelection::default();
    let err = select_glossary(&mut selection, &server, "nope")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
    assert!(selection.is_empty());
}

#[tokio::test]
async fn test_deselect_during_fetch_is_kept() {
    use transdesk_core::api::GlossaryApi;

    let server = server_with(2);
    let mut selection = GlossarySelection::default();
    select_glossary(&mut selection, &server, "g0").await.unwrap();

    selection.begin_fetch("g1").unwrap();
    // The user drops g0 while g1 is still loading
    assert!(selection.deselect("g0"));
    let fetched = server.get_glossary("g1").await;
    let outcome = selection.finish_fetch("g1", fetched).unwrap();

    assert_eq!(outcome, SelectionOutcome::Added { color_index: 0 });
    assert_eq!(selection.ids(), vec!["g1"]);
    assert_eq!(selection.fetching(), None);
}

#[tokio::test]
async fn test_one_fetch_at_a_time_and_cleared_fetch_is_dropped() {
    use transdesk_core::api::GlossaryApi;

    let server = server_with(2);
    let mut selection = GlossarySelection::default();
    selection.begin_fetch("g0").unwrap();
    assert_eq!(
        selection.begin_fetch("g1"),
        Err(ValidationError::SelectionBusy)
    );

    selection.clear();
    let fetched = server.get_glossary("g0").await;
    assert_eq!(
        selection.finish_fetch("g0", fetched),
        Ok(SelectionOutcome::Abandoned)
    );
    assert!(selection.is_empty());
    assert!(selection.begin_fetch("g1").is_ok());
}

#[tokio::test]
async fn test_late_fetch_rechecks_capacity() {
    use transdesk_core::api::GlossaryApi;

    let server = server_with(3);
    let mut selection = GlossarySelection::new(2);
    select_glossary(&mut selection, &server, "g0").await.unwrap();

    selection.begin_fetch("g1").unwrap();
    // Another pick fills the last slot before g1 arrives
    let g2 = server.get_glossary("g2").await.unwrap();
    selection.propose(g2.into()).unwrap();

    let fetched = server.get_glossary("g1").await;
    assert_eq!(
        selection.finish_fetch("g1", fetched),
        Err(AppError::Validation(ValidationError::SelectionFull(2)))
    );
    assert_eq!(selection.ids(), vec!["g0", "g2"]);
}
