    use super::*;

    fn def(name: &'static str, aliases: &'static [&'static str]) -> CommandDef {
        CommandDef {
            name,
            aliases,
            usage: "",
            help: "",
        }
    }

    #[test]
    fn aliases_count_towards_the_score() {
        assert_eq!(score_def("r", &def("refresh", &["r"])), 100);
        assert_eq!(score_def("ref", &def("refresh", &[])), 46);
        assert_eq!(score_def("zzz", &def("refresh", &["r"])), 0);
    }

    #[test]
    fn view_commands_win_ties() {
        let mut scored = vec![(10, def("schemes", &[])), (10, def("stage", &[]))];
        sort_scored_suggestions(&mut scored, &["stage"]);
        assert_eq!(scored[0].1.name, "stage");
    }

    #[test]
    fn higher_scores_come_first() {
        let mut scored = vec![(10, def("alpha", &[])), (20, def("beta", &[]))];
        sort_scored_suggestions(&mut scored, &[]);
        assert_eq!(scored[0].1.name, "beta");
    }
