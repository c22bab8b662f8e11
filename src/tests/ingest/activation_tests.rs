    use super::*;

    #[test]
    fn any_failing_sub_action_fails_the_activation() {
        let report = ActivationReport::from_value(serde_json::json!([
            {"success": true, "message": "carousel stopped"},
            {"success": 0, "message": "database reset failed"},
        ]))
        .expect("parse");
        assert_eq!(report.failures(), 1);
        assert!(!report.succeeded());
        assert_eq!(report.lines()[1], "FAIL database reset failed");
    }

    #[test]
    fn all_sub_actions_succeeding_is_success() {
        let report = ActivationReport::from_value(serde_json::json!([
            {"success": 1, "message": "scheme loaded"},
        ]))
        .expect("parse");
        assert!(report.succeeded());
        assert_eq!(report.lines().last().map(String::as_str), Some("activation complete"));
    }

    #[test]
    fn empty_or_non_array_responses_are_failures() {
        let empty = ActivationReport::from_value(serde_json::json!([])).expect("parse");
        assert!(!empty.succeeded());

        let err = ActivationReport::from_value(serde_json::json!({"success": true})).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn flags_parse_and_serialize_as_bits() {
        let o = ActivationOptions::parse(["stop-carousel", "stop-eit"]).expect("parse flags");
        assert!(o.stop_carousel && o.stop_eit && !o.reset_database);
        let form = o.form_fields();
        assert!(form.contains(&("stopCarousel", "1".to_string())));
        assert!(form.contains(&("resetDatabase", "0".to_string())));
        assert_eq!(form.len(), 5);

        assert!(ActivationOptions::parse(["format-disk"]).is_err());
    }
