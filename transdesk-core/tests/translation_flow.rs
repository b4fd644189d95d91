//! End to end: build a glossary, translate a document with it, download.

mod support;

use std::time::Duration;

use support::{job, Call, CountingSleeper, FakeServer, MemoryStore};
use transdesk_core::api::TranslationApi;
use transdesk_core::conflict::{select_glossary, GlossarySelection, SelectionOutcome};
use transdesk_core::poller::{poll_job, TranslationStatus};
use transdesk_core::reconciler::GlossaryEditor;
use transdesk_core::wizard::{GlossaryMode, Wizard, WizardStep};
use transdesk_core::{ClientConfig, JobStatus, UploadedFile};

#[tokio::test]
async fn test_legal_glossary_translation() {
    let server = FakeServer::new();
    let store = MemoryStore::default();
    let config = ClientConfig::default();

    // Glossary "Legal" en -> vi with one term
    let mut editor = GlossaryEditor::create("en", "vi");
    editor.metadata.name = "Legal".into();
    editor.add_term("Contract", "Hợp đồng").unwrap();
    let legal = editor.save(&server).await.unwrap();
    assert_eq!(legal.term_count, 1);

    // Document step
    let mut wizard = Wizard::restore(&store);
    wizard.set_source_language("en");
    wizard.set_target_language("vi");
    wizard.stage_file(UploadedFile {
        name: "agreement.docx".into(),
        size: 48_000,
        mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document".into(),
    });
    wizard.persist(&store);
    assert_eq!(
        wizard.advance(&server, Some("agreement.docx")).await.unwrap(),
        WizardStep::Glossary
    );
    wizard.persist(&store);

    // Glossary step
    let mut selection = GlossarySelection::new(config.max_selected_glossaries);
    wizard.set_glossary_mode(GlossaryMode::Existing);
    let outcome = select_glossary(&mut selection, &server, &legal.id)
        .await
        .unwrap();
    assert_eq!(outcome, SelectionOutcome::Added { color_index: 0 });
    wizard.set_selected_glossaries(selection.ids());
    wizard.advance(&server, None).await.unwrap();
    wizard.persist(&store);

    // A reload in the middle keeps everything
    let mut wizard = Wizard::restore(&store);
    assert_eq!(wizard.step(), WizardStep::Preview);
    assert_eq!(wizard.session().selected_glossary_ids, vec![legal.id.clone()]);
    assert!(wizard.inconsistency().is_none());

    // Execute
    assert_eq!(
        wizard.advance(&server, None).await.unwrap(),
        WizardStep::Execute
    );
    let job_id = wizard.start(&server).await.unwrap();
    wizard.persist(&store);

    server.script_statuses(vec![
        Ok(job(&job_id, JobStatus::Pending, 0.0)),
        Ok(job(&job_id, JobStatus::Translating, 40.0)),
        Ok(job(&job_id, JobStatus::Translating, 90.0)),
        Ok(job(&job_id, JobStatus::Completed, 100.0)),
    ]);
    let sleeper = CountingSleeper::default();
    let mut progress = Vec::new();
    assert!(wizard.should_poll());
    poll_job(
        &server,
        &sleeper,
        &job_id,
        config.poll_interval(),
        |update| {
            progress.push(update.progress);
            wizard.apply_update(update);
        },
    )
    .await;

    assert_eq!(progress, vec![0, 40, 90, 100]);
    assert_eq!(sleeper.last.get(), Some(Duration::from_millis(2000)));
    assert_eq!(wizard.status(), TranslationStatus::Success);
    assert_eq!(wizard.progress(), 100);
    assert!(wizard.can_download());
    assert!(!wizard.should_poll());

    let download_id = wizard.download_id().unwrap().to_string();
    assert_eq!(download_id, format!("{job_id}-out"));
    let bytes = server.download_document(&download_id).await.unwrap();
    assert!(!bytes.is_empty());

    let start = server
        .calls()
        .into_iter()
        .find_map(|c| match c {
            Call::Start(request) => Some(request),
            _ => None,
        })
        .unwrap();
    assert_eq!(start.glossaries, vec![legal.id.clone()]);
    assert_eq!(start.source_language, "en");
    assert_eq!(start.target_language, "vi");

    assert!(wizard.acknowledge_completion(&store));
    assert_eq!(Wizard::restore(&store), Wizard::new());
}
