    use super::*;

    fn report(streams: serde_json::Value) -> CarouselReport {
        serde_json::from_value(serde_json::json!({
            "timestamp": "t",
            "status": 0,
            "streams": streams,
        }))
        .expect("parse carousel")
    }

    #[test]
    fn streams_sharing_an_address_keep_their_own_state() {
        let mut view = CarouselView::new();
        view.apply(report(serde_json::json!([
            {"addr": "239.1.1.1", "port": 1234, "bitrate": 1000, "tdt": 3},
            {"addr": "239.1.1.1", "port": 1234, "bitrate": 2000},
        ])));

        assert_eq!(view.stream_state(0), Some(EntryState::Warn));
        assert_eq!(view.stream_state(1), Some(EntryState::Ok));
        assert_eq!(view.stream_state(2), None);
    }
