    use super::*;
    use crate::ingest::flow::{ChunkFlow, ChunkMetadata, SchemeCommit, SchemeFlow, SchemeMetadata};

    fn chunk_outcome(errors: &[&str], fp: Option<&str>) -> ValidationOutcome<ChunkMetadata> {
        ValidationOutcome {
            metadata: ChunkMetadata {
                source: "eit.gz".to_string(),
                title: "EIT now/next".to_string(),
                destination: "239.1.1.1:5000".to_string(),
                size: "188".to_string(),
            },
            errors: errors.iter().map(|e| e.to_string()).collect(),
            fingerprint: fp.map(Fingerprint::new),
        }
    }

    fn staged_chunk_wizard(fp: &str) -> IngestionWizard<ChunkFlow> {
        let mut w = IngestionWizard::<ChunkFlow>::new();
        let t = w.begin_upload("eit.gz").expect("begin upload");
        w.complete_validation(t, Ok(chunk_outcome(&[], Some(fp))));
        assert_eq!(w.step(), WizardStep::Staged);
        w
    }

    #[test]
    fn rejected_upload_fails_without_fingerprint() {
        let mut w = IngestionWizard::<ChunkFlow>::new();
        let t = w.begin_upload("eit.gz").expect("begin upload");
        assert_eq!(w.step(), WizardStep::Uploading);

        let done = w.complete_validation(t, Ok(chunk_outcome(&["bad pid"], Some("x"))));
        assert_eq!(done, Completion::Applied(WizardStep::Failed));
        assert!(w.staged().is_none());
        assert_eq!(
            w.failure(),
            Some(&ConsoleError::ValidationRejected {
                errors: vec!["bad pid".to_string()]
            })
        );
        // Metadata of the rejected file stays visible.
        assert_eq!(w.report().map(|m| m.source.as_str()), Some("eit.gz"));
    }

    #[test]
    fn clean_upload_is_staged_with_its_fingerprint() {
        let w = staged_chunk_wizard("9e107d9d");
        let staged = w.staged().expect("staged artifact");
        assert_eq!(staged.fingerprint, Fingerprint::new("9e107d9d"));
        assert_eq!(staged.metadata.title, "EIT now/next");
        assert!(w.failure().is_none());
    }

    #[test]
    fn transport_failure_during_validation_fails_the_session() {
        let mut w = IngestionWizard::<ChunkFlow>::new();
        let t = w.begin_upload("eit.gz").expect("begin upload");
        w.complete_validation(t, Err(ConsoleError::timeout("validate chunk")));
        assert_eq!(w.step(), WizardStep::Failed);
        assert!(w.failure().is_some_and(ConsoleError::is_transport));
    }

    #[test]
    fn valid_response_without_fingerprint_is_malformed() {
        let mut w = IngestionWizard::<ChunkFlow>::new();
        let t = w.begin_upload("eit.gz").expect("begin upload");
        w.complete_validation(t, Ok(chunk_outcome(&[], None)));
        assert_eq!(w.step(), WizardStep::Failed);
        assert!(matches!(
            w.failure(),
            Some(ConsoleError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn wrong_extension_is_refused_before_any_request() {
        let mut w = IngestionWizard::<ChunkFlow>::new();
        let err = w.begin_upload("week.xls").unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidInput { .. }));
        assert_eq!(w.step(), WizardStep::Idle);
    }

    #[test]
    fn commit_carries_the_current_fingerprint_and_completes() {
        let mut w = staged_chunk_wizard("aaa");
        let req = w.begin_commit(()).expect("begin commit");
        assert_eq!(req.fingerprint, Fingerprint::new("aaa"));
        assert_eq!(w.step(), WizardStep::Committing);

        let done = w.complete_commit(req.ticket, Ok(()));
        assert_eq!(done, Completion::Applied(WizardStep::Committed));

        w.reset();
        assert_eq!(w.step(), WizardStep::Idle);
        assert!(w.staged().is_none());
    }

    #[test]
    fn stale_fingerprint_rejection_fails_and_drops_the_token() {
        let mut w = staged_chunk_wizard("aaa");
        let req = w.begin_commit(()).expect("begin commit");
        w.complete_commit(
            req.ticket,
            Err(ConsoleError::StaleFingerprint {
                message: "artifact changed".to_string(),
            }),
        );
        assert_eq!(w.step(), WizardStep::Failed);
        assert!(matches!(
            w.failure(),
            Some(ConsoleError::StaleFingerprint { .. })
        ));
        assert_eq!(w.begin_commit(()).unwrap_err(), ConsoleError::NoStagedArtifact);

        // Retry goes back through validation.
        let t = w.begin_upload("eit.gz").expect("retry upload");
        w.complete_validation(t, Ok(chunk_outcome(&[], Some("bbb"))));
        assert_eq!(w.step(), WizardStep::Staged);
    }

    #[test]
    fn commit_with_nothing_staged_fails() {
        let mut w = IngestionWizard::<ChunkFlow>::new();
        assert_eq!(w.begin_commit(()).unwrap_err(), ConsoleError::NoStagedArtifact);
        assert_eq!(w.step(), WizardStep::Idle);
    }

    #[test]
    fn reupload_supersedes_staged_artifact_and_late_response() {
        let mut w = IngestionWizard::<ChunkFlow>::new();
        let first = w.begin_upload("a.gz").expect("first upload");
        let second = w.begin_upload("b.gz").expect("second upload");

        // The slow first response arrives after the user picked another file.
        assert_eq!(
            w.complete_validation(first, Ok(chunk_outcome(&[], Some("old")))),
            Completion::Superseded
        );
        assert_eq!(w.step(), WizardStep::Uploading);

        w.complete_validation(second, Ok(chunk_outcome(&[], Some("new"))));
        let req = w.begin_commit(()).expect("commit");
        assert_eq!(req.fingerprint, Fingerprint::new("new"));
    }

    #[test]
    fn response_after_reset_is_ignored() {
        let mut w = staged_chunk_wizard("aaa");
        let req = w.begin_commit(()).expect("commit");
        w.reset();
        assert_eq!(w.complete_commit(req.ticket, Ok(())), Completion::Superseded);
        assert_eq!(w.step(), WizardStep::Idle);
    }

    #[test]
    fn committed_session_must_be_reset_before_new_upload() {
        let mut w = staged_chunk_wizard("aaa");
        let req = w.begin_commit(()).expect("commit");
        w.complete_commit(req.ticket, Ok(()));
        assert!(w.begin_upload("c.gz").is_err());
        w.reset();
        assert!(w.begin_upload("c.gz").is_ok());
    }

    fn scheme_outcome(fp: &str) -> ValidationOutcome<SchemeMetadata> {
        ValidationOutcome {
            metadata: SchemeMetadata {
                source: "week.xls".to_string(),
                description: "week 42".to_string(),
                ..SchemeMetadata::default()
            },
            errors: Vec::new(),
            fingerprint: Some(Fingerprint::new(fp)),
        }
    }

    #[test]
    fn scheme_commit_validates_description_without_leaving_staged() {
        let mut w = IngestionWizard::<SchemeFlow>::new();
        let t = w.begin_upload("week.xls").expect("upload");
        w.complete_validation(t, Ok(scheme_outcome("1697040000")));

        let err = w
            .begin_commit(SchemeCommit {
                description: "abc".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::InvalidInput { .. }));
        assert_eq!(w.step(), WizardStep::Staged);
        assert!(w.activation_token().is_err());

        let req = w
            .begin_commit(SchemeCommit {
                description: "week 42 grid".to_string(),
            })
            .expect("commit");
        w.complete_commit(req.ticket, Ok(()));
        assert_eq!(
            w.activation_token().expect("token"),
            Fingerprint::new("1697040000")
        );
    }

    #[test]
    fn staged_archived_target_can_be_activated_directly() {
        let mut w = IngestionWizard::<SchemeFlow>::new();
        let t = w.begin_stage_existing("a1b2").expect("stage existing");
        w.complete_validation(t, Ok(scheme_outcome("55")));
        assert_eq!(w.step(), WizardStep::Staged);
        assert_eq!(w.selected_target(), Some("a1b2"));
        assert_eq!(w.activation_token().expect("token"), Fingerprint::new("55"));
    }

    #[test]
    fn chunk_flow_has_no_archived_staging() {
        let mut w = IngestionWizard::<ChunkFlow>::new();
        assert!(w.begin_stage_existing("x").is_err());
    }
