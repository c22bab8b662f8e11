    use super::*;

    #[test]
    fn second_attach_replaces_first_token() {
        let mut guard: FingerprintGuard<&str> = FingerprintGuard::new();
        guard.attach("first", Fingerprint::new("d41d8cd9"));
        guard.attach("second", Fingerprint::new("1697040000"));

        let token = guard.commit_token().expect("token staged");
        assert_eq!(token, &Fingerprint::new("1697040000"));
        assert_eq!(guard.staged().map(|s| s.metadata), Some("second"));
    }

    #[test]
    fn empty_guard_has_nothing_to_commit() {
        let guard: FingerprintGuard<()> = FingerprintGuard::new();
        assert_eq!(guard.commit_token(), Err(ConsoleError::NoStagedArtifact));
    }

    #[test]
    fn clear_drops_the_staged_token() {
        let mut guard = FingerprintGuard::new();
        guard.attach((), Fingerprint::new("abc"));
        guard.clear();
        assert!(guard.staged().is_none());
        assert_eq!(guard.commit_token(), Err(ConsoleError::NoStagedArtifact));
    }

    #[test]
    fn tokens_compare_by_equality_only() {
        // Timestamp-like tokens are not ordered; only equality matters.
        assert_ne!(Fingerprint::new("0100"), Fingerprint::new("100"));
        assert_eq!(Fingerprint::new("100").as_str(), "100");
    }
