    use super::*;

    fn typed(s: &str) -> Input {
        let mut input = Input::default();
        for c in s.chars() {
            input.insert_char(c);
        }
        input
    }

    #[test]
    fn editing_is_character_based() {
        let mut input = typed("upload prögram.xls");
        assert_eq!(input.cursor_column(), 18);

        for _ in 0..9 {
            input.move_left();
        }
        input.backspace();
        assert_eq!(input.buf, "upload pögram.xls");
        input.delete();
        assert_eq!(input.buf, "upload pgram.xls");
        input.insert_char('ü');
        assert_eq!(input.buf, "upload pügram.xls");
    }

    #[test]
    fn history_walks_back_and_forth() {
        let mut input = Input::default();
        input.push_history("services");
        input.push_history("services");
        input.push_history("open 3");
        assert_eq!(input.history.len(), 2);

        input.history_up();
        assert_eq!(input.buf, "open 3");
        input.history_up();
        assert_eq!(input.buf, "services");
        input.history_down();
        assert_eq!(input.buf, "open 3");
        input.history_down();
        assert!(input.buf.is_empty());
        assert_eq!(input.history_pos, None);
    }
