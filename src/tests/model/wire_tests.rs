    use super::*;
    use crate::model::SERIES_LIMIT;

    #[test]
    fn service_report_maps_panel_and_entry_states() {
        let report: ServiceReport = serde_json::from_value(serde_json::json!({
            "timestamp": "2026-10-19 10:00:00",
            "status": 1,
            "data": [
                {"id": 7, "name": "Channel Seven HD", "budget": [1, 2, 3], "status": 2, "update": "2026-10-19T09:59:00Z"},
                {"id": "8", "name": "Eight", "status": 0}
            ]
        }))
        .expect("parse service report");

        let status = report.into_status_report();
        assert_eq!(status.overall, OverallState::Degraded);
        assert!(status.message.is_none());
        assert_eq!(status.entries.len(), 2);
        assert_eq!(status.entries[0].id, "7");
        assert_eq!(status.entries[0].display_name, "Channel S");
        assert_eq!(status.entries[0].state, EntryState::Error);
        assert_eq!(status.entries[0].series, vec![1, 2, 3]);
        assert_eq!(status.entries[1].id, "8");
        assert_eq!(status.entries[1].state, EntryState::Ok);
    }

    #[test]
    fn service_status_three_is_fatal_with_banner() {
        let report: ServiceReport = serde_json::from_value(serde_json::json!({
            "timestamp": "t",
            "status": 3
        }))
        .expect("parse fatal report");
        let status = report.into_status_report();
        assert_eq!(status.overall, OverallState::Fatal);
        assert!(status.message.is_some());
        assert!(status.entries.is_empty());

        let other: ServiceReport =
            serde_json::from_value(serde_json::json!({"timestamp": "t", "status": 2, "data": []}))
                .expect("parse error report");
        assert_eq!(other.overall(), OverallState::Error);
    }

    #[test]
    fn carousel_bitrate_reference_rounds_up_to_whole_mbps() {
        let mut report: CarouselReport = serde_json::from_value(serde_json::json!({
            "timestamp": "t",
            "status": 0,
            "streams": [
                {"addr": "239.1.1.1", "port": 5000, "bitrate": 250000},
            ]
        }))
        .expect("parse carousel");
        assert_eq!(report.bitrate_reference(), 1_000_000);

        report.streams[0].bitrate = 2_400_000;
        assert_eq!(report.bitrate_reference(), 3_000_000);
    }

    #[test]
    fn carousel_streams_become_entries_keyed_by_address() {
        let report: CarouselReport = serde_json::from_value(serde_json::json!({
            "timestamp": "t",
            "status": 2,
            "message": "playout stopped",
            "timing": {"overshootProtection": 1},
            "streams": [
                {"addr": "239.1.1.1", "port": 5000, "bitrate": 1000, "tdt": 3, "pcr": true, "last": "x",
                 "files": [{"title": "eit", "pid": 18, "size": 10, "bitrate": 400, "last": "y"}]}
            ]
        }))
        .expect("parse carousel");
        assert!(report.timing.overshoot_protection);
        assert_eq!(report.streams[0].tdt_badge().as_deref(), Some("+2"));

        let status = report.to_status_report();
        assert_eq!(status.overall, OverallState::Fatal);
        assert_eq!(status.message.as_deref(), Some("playout stopped"));
        assert_eq!(status.entries[0].id, "239.1.1.1:5000");
        assert_eq!(status.entries[0].state, EntryState::Warn);
        assert_eq!(status.entries[0].series, vec![1000, 400]);
    }

    #[test]
    fn system_module_details_keep_only_sorted_scalars() {
        let report: SystemReport = serde_json::from_value(serde_json::json!({
            "timestamp": "t",
            "systemStart": "2026-10-01T00:00:00Z",
            "version": {"playout": "1.2", "epg": null, "db": 12},
            "modules": {
                "epg": {"status": 0, "message": "ok", "report": {}},
                "playout": {"status": 1, "message": "slow", "report": {"z": 1, "a": "x", "nested": {"k": 1}}},
                "ntp": {"status": 2, "message": "unsynced"},
                "database": {"status": 0, "message": "ok"}
            }
        }))
        .expect("parse system report");

        assert_eq!(
            report.version_labels(),
            vec!["db: 12", "epg: -", "playout: 1.2"]
        );
        assert_eq!(report.modules.playout.detail_lines(), vec!["a:x", "z:1"]);
        assert_eq!(report.modules.ntp.state(), EntryState::Error);
        assert_eq!(report.module_rows().len(), 4);
    }

    #[test]
    fn entry_series_is_bounded() {
        let series: Vec<i64> = (0..(SERIES_LIMIT as i64 + 10)).collect();
        let e = Entry::new("a", "a", series, EntryState::Ok, "");
        assert_eq!(e.series.len(), SERIES_LIMIT);
        assert_eq!(e.series[0], 10);
    }

    #[test]
    fn tdt_badge_marks_both_directions_of_drift() {
        let stream = |tdt: Option<i64>| CarouselStream {
            addr: "239.1.1.1".to_string(),
            port: 1234,
            bitrate: 0,
            tdt,
            pcr: false,
            last: Scalar::default(),
            files: Vec::new(),
        };
        assert_eq!(stream(Some(3)).tdt_badge().as_deref(), Some("+2"));
        assert_eq!(stream(Some(-2)).tdt_badge().as_deref(), Some("--3"));
        assert_eq!(stream(Some(1)).tdt_badge(), None);
        assert_eq!(stream(Some(0)).tdt_badge(), None);
        assert_eq!(stream(None).tdt_badge(), None);
    }
