    use super::*;

    #[test]
    fn chunk_response_without_error_array_is_malformed() {
        let resp: ChunkValidation =
            serde_json::from_value(serde_json::json!({"source": "a.gz"})).expect("parse");
        let err = ChunkFlow::interpret(resp).unwrap_err();
        assert!(matches!(err, ConsoleError::MalformedResponse { .. }));
    }

    #[test]
    fn chunk_response_with_errors_keeps_metadata_for_display() {
        let resp: ChunkValidation = serde_json::from_value(serde_json::json!({
            "error": ["pid 18 out of range"],
            "source": "eit.gz",
            "md5": ""
        }))
        .expect("parse");
        let outcome = ChunkFlow::interpret(resp).expect("interpret");
        assert_eq!(outcome.errors, vec!["pid 18 out of range"]);
        assert_eq!(outcome.metadata.source, "eit.gz");
        assert!(outcome.fingerprint.is_none());
    }

    #[test]
    fn scheme_fingerprint_comes_from_mtime() {
        let resp: SchemeValidation = serde_json::from_value(serde_json::json!({
            "errorList": [],
            "source": "week42.xls",
            "channel": 12,
            "eit": 3,
            "rule": 140,
            "description": "week 42",
            "mtime": 1697040000
        }))
        .expect("parse");
        let outcome = SchemeFlow::interpret(resp).expect("interpret");
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.fingerprint, Some(Fingerprint::new("1697040000")));
        assert_eq!(outcome.metadata.services, "12");
        assert_eq!(
            SchemeFlow::summary_lines(&outcome.metadata)[3],
            "Rules: 140"
        );
    }

    #[test]
    fn scheme_commit_requires_a_real_description() {
        let short = SchemeCommit {
            description: "wk".to_string(),
        };
        assert!(matches!(
            SchemeFlow::check_commit(&short),
            Err(ConsoleError::InvalidInput { .. })
        ));
        let ok = SchemeCommit {
            description: "  week 42 schedule ".to_string(),
        };
        assert!(SchemeFlow::check_commit(&ok).is_ok());
        let form = SchemeFlow::commit_form(&Fingerprint::new("77"), &ok);
        assert_eq!(
            form,
            vec![
                ("description", "week 42 schedule".to_string()),
                ("mtime", "77".to_string())
            ]
        );
    }

    #[test]
    fn file_extension_filter_is_case_insensitive() {
        assert!(ChunkFlow::accepts("eit_2026.GZ"));
        assert!(!ChunkFlow::accepts("eit_2026.xls"));
        assert!(SchemeFlow::accepts("/tmp/week.xls"));
        assert!(!SchemeFlow::accepts("week"));
    }

    fn assert_send<T: Send>(_: &T) {}

    fn commit_future_is_send<F: IngestFlow + Send>(
        client: &crate::remote::BackendClient,
        wizard: &mut crate::ingest::IngestionWizard<F>,
        input: F::CommitInput,
    ) {
        let fut = crate::ingest::commit(client, wizard, input);
        assert_send(&fut);
    }

    #[test]
    fn commit_runs_on_a_multi_thread_runtime_for_every_flow() {
        let client = crate::remote::BackendClient::new(&crate::model::ConsoleConfig::default())
            .expect("client");
        let mut chunks = crate::ingest::IngestionWizard::<ChunkFlow>::new();
        commit_future_is_send(&client, &mut chunks, ());
        let mut schemes = crate::ingest::IngestionWizard::<SchemeFlow>::new();
        commit_future_is_send(
            &client,
            &mut schemes,
            SchemeCommit {
                description: "weekday plan".to_string(),
            },
        );
    }
