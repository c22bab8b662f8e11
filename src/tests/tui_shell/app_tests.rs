    use super::*;
    use crate::ingest::{ChunkMetadata, Fingerprint, SchemeMetadata};

    fn app() -> App {
        let config = ConsoleConfig {
            // Nothing listens here; background polls fail quietly.
            base_url: "http://127.0.0.1:9".to_string(),
            ..ConsoleConfig::default()
        };
        App::load(config).expect("load app")
    }

    fn stage_chunk(app: &mut App) {
        let wizard = &mut app.chunks.wizard;
        let t = wizard.begin_upload("news.gz").expect("begin upload");
        wizard.complete_validation(
            t,
            Ok(ValidationOutcome {
                metadata: ChunkMetadata::default(),
                errors: vec![],
                fingerprint: Some(Fingerprint::new("abc")),
            }),
        );
        assert_eq!(wizard.step(), WizardStep::Staged);
    }

    fn stage_scheme(app: &mut App) {
        let wizard = &mut app.schemes.wizard;
        let t = wizard.begin_upload("week.xls").expect("begin upload");
        wizard.complete_validation(
            t,
            Ok(ValidationOutcome {
                metadata: SchemeMetadata::default(),
                errors: vec![],
                fingerprint: Some(Fingerprint::new("def")),
            }),
        );
        assert_eq!(wizard.step(), WizardStep::Staged);
    }

    fn open_detail(app: &mut App, id: &str) {
        app.services.detail = Some(ServiceDetail {
            id: id.to_string(),
            state: DetailState::Loading,
        });
    }

    fn running(app: &App) -> [bool; 3] {
        [
            app.services_poll.is_running(),
            app.carousel_poll.is_running(),
            app.system_poll.is_running(),
        ]
    }

    #[test]
    fn leaving_chunks_drops_the_staged_upload() {
        let mut app = app();
        app.set_mode(UiMode::Chunks);
        stage_chunk(&mut app);

        app.set_mode(UiMode::Services);
        assert_eq!(app.chunks.wizard.step(), WizardStep::Idle);
        assert!(app.chunks.wizard.staged().is_none());
    }

    #[test]
    fn leaving_schemes_drops_the_session_and_activation_report() {
        let mut app = app();
        app.set_mode(UiMode::Schemes);
        stage_scheme(&mut app);
        app.schemes.activation = vec!["load scheme: ok".to_string()];

        app.set_mode(UiMode::Carousel);
        assert_eq!(app.schemes.wizard.step(), WizardStep::Idle);
        assert!(app.schemes.wizard.staged().is_none());
        assert!(app.schemes.activation.is_empty());
    }

    #[test]
    fn reselecting_the_same_view_keeps_the_session() {
        let mut app = app();
        app.set_mode(UiMode::Chunks);
        stage_chunk(&mut app);

        app.set_mode(UiMode::Chunks);
        assert_eq!(app.chunks.wizard.step(), WizardStep::Staged);
    }

    #[test]
    fn unnamed_service_only_fails_the_detail() {
        let mut app = app();
        stage_chunk(&mut app);
        open_detail(&mut app, "101");

        app.apply_task(TaskDone::ServiceDetail {
            id: "101".to_string(),
            result: Ok(ServiceInfo::default()),
        });

        let detail = app.services.detail.as_ref().expect("detail stays open");
        assert!(matches!(&detail.state, DetailState::Failed(msg) if msg == "unknown service"));
        assert_eq!(app.chunks.wizard.step(), WizardStep::Staged);
        assert!(!app.services_poll.is_in_flight());
    }

    #[test]
    fn detail_transport_failure_resets_the_session() {
        let mut app = app();
        stage_chunk(&mut app);
        stage_scheme(&mut app);
        app.schemes.activation = vec!["maintain: ok".to_string()];
        open_detail(&mut app, "101");

        app.apply_task(TaskDone::ServiceDetail {
            id: "101".to_string(),
            result: Err(ConsoleError::timeout("service info")),
        });

        assert!(app.services.detail.is_none());
        assert_eq!(app.chunks.wizard.step(), WizardStep::Idle);
        assert_eq!(app.schemes.wizard.step(), WizardStep::Idle);
        assert!(app.schemes.activation.is_empty());
        assert!(app.services_poll.is_in_flight());
        assert!(app.carousel_poll.is_in_flight());
        assert!(app.system_poll.is_in_flight());
    }

    #[test]
    fn stale_detail_completion_is_ignored() {
        let mut app = app();
        open_detail(&mut app, "102");

        app.apply_task(TaskDone::ServiceDetail {
            id: "101".to_string(),
            result: Err(ConsoleError::timeout("service info")),
        });

        let detail = app.services.detail.as_ref().expect("detail stays open");
        assert_eq!(detail.id, "102");
        assert!(matches!(detail.state, DetailState::Loading));
    }

    #[test]
    fn only_the_visible_unpaused_dashboard_polls() {
        let mut app = app();
        assert_eq!(running(&app), [false, false, false]);

        app.sync_polling(Instant::now());
        assert_eq!(running(&app), [true, false, false]);

        app.set_mode(UiMode::Carousel);
        assert_eq!(running(&app), [false, true, false]);

        app.set_mode(UiMode::System);
        assert_eq!(running(&app), [false, false, true]);

        app.set_mode(UiMode::Chunks);
        assert_eq!(running(&app), [false, false, false]);

        app.set_mode(UiMode::Services);
        app.set_paused(true);
        assert_eq!(running(&app), [false, false, false]);

        app.set_paused(false);
        assert_eq!(running(&app), [true, false, false]);
    }

    fn last_error(app: &App) -> Option<&str> {
        app.last_result
            .as_ref()
            .filter(|e| e.kind == EntryKind::Error)
            .and_then(|e| e.lines.first())
            .map(String::as_str)
    }

    #[test]
    fn channel_export_needs_an_open_service() {
        let mut app = app();
        app.cmd_export(&["xml".to_string()]);
        assert_eq!(last_error(&app), Some("export: open a service first"));

        app.cmd_export(&["pdf".to_string()]);
        assert!(last_error(&app).is_some_and(|m| m.contains("export <xml|csv|all>")));
    }

    #[test]
    fn finished_export_lands_on_disk() {
        let mut app = app();
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("101.csv");

        app.apply_task(TaskDone::Export {
            path: path.clone(),
            result: Ok(b"channel,start,stop,title\n".to_vec()),
        });

        assert!(last_error(&app).is_none());
        let body = std::fs::read_to_string(&path).expect("export written");
        assert!(body.starts_with("channel,"));
    }
