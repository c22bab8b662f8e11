    use super::*;
    use crate::model::Scalar;

    #[test]
    fn acknowledgement_must_echo_the_requested_target() {
        let ack = TargetAck {
            success: true,
            target: Scalar::from("c0ffee"),
        };
        assert!(acknowledged(&ack, "c0ffee"));
        assert!(!acknowledged(&ack, "deadbeef"));

        let refused = TargetAck {
            success: false,
            target: Scalar::from("c0ffee"),
        };
        assert!(!acknowledged(&refused, "c0ffee"));
    }

    #[test]
    fn numeric_success_flags_are_accepted() {
        let ack: TargetAck =
            serde_json::from_value(serde_json::json!({"success": 1, "target": 42})).expect("parse");
        assert!(acknowledged(&ack, "42"));
    }
