    use super::*;

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() -> Result<()> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let path = dir.path().join("console.json");
        std::fs::write(
            &path,
            r#"{"base_url": "http://backend:9000", "timeouts": {"activate_ms": 60000}}"#,
        )?;

        let cfg = ConsoleConfig::load(Some(&path))?;
        assert_eq!(cfg.base_url, "http://backend:9000");
        assert_eq!(cfg.max_columns, 6);
        assert_eq!(cfg.poll_interval_ms, 60_000);
        assert_eq!(cfg.timeouts.activate(), Duration::from_secs(60));
        assert_eq!(cfg.timeouts.detail(), Duration::from_secs(3));
        Ok(())
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().expect("create tempdir");
        let err = ConsoleConfig::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(format!("{:#}", err).contains("read config"));
    }

    #[test]
    fn zero_columns_are_rejected() -> Result<()> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        let path = dir.path().join("console.json");
        std::fs::write(&path, r#"{"max_columns": 0}"#)?;
        assert!(ConsoleConfig::load(Some(&path)).is_err());
        Ok(())
    }
