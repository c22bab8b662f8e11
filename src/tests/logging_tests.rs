    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn log_file_name_carries_prefix_and_utc_stamp() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let name = format_log_file_name(fixed).unwrap();
        assert_eq!(name, "epg-console_2023-11-14_22-13-20.log");
    }

    #[test]
    fn prune_keeps_only_newest_logs() {
        let dir = tempfile::tempdir().unwrap();
        for idx in 0..12 {
            ensure_file_exists(&dir.path().join(format!("epg-console_{idx}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        std::fs::write(dir.path().join("report"), b"kept").unwrap();

        prune_old_logs(dir.path(), 10).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.iter().filter(|n| n.ends_with(".log")).count(), 10);
        assert!(names.iter().any(|n| n == "report"));
        assert!(!names.iter().any(|n| n == "epg-console_0.log"));
        assert!(!names.iter().any(|n| n == "epg-console_1.log"));
    }
