    use super::*;

    fn check(success: i64, message: &str) -> Result<UpdateCheck, ConsoleError> {
        Ok(UpdateCheck {
            success,
            message: message.to_string(),
        })
    }

    #[test]
    fn available_update_is_applied_on_the_next_check() {
        let mut u = UpdateChecker::default();
        assert!(!u.will_apply());

        u.record(check(2, "3 commits behind"));
        assert!(u.will_apply());
        assert_eq!(
            u.state(),
            &UpdateState::Available("3 commits behind".to_string())
        );

        u.record(check(1, "updated"));
        assert!(!u.will_apply());
        assert_eq!(u.state(), &UpdateState::UpToDate("updated".to_string()));
    }

    #[test]
    fn failures_reset_the_apply_flag() {
        let mut u = UpdateChecker::default();
        u.record(check(2, "behind"));
        u.record(Err(ConsoleError::timeout("update check")));
        assert!(!u.will_apply());
        assert_eq!(u.state(), &UpdateState::Failed("Connection error".to_string()));

        u.record(check(2, "behind"));
        u.record(check(0, "merge conflict"));
        assert!(!u.will_apply());
    }
