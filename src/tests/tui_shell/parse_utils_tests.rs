    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tokenize_keeps_quoted_words_together() {
        let out = tokenize(r#"commit "Autumn schedule v2""#).unwrap();
        assert_eq!(out, vec!["commit", "Autumn schedule v2"]);
    }

    #[test]
    fn tokenize_honours_escapes() {
        let out = tokenize(r"upload my\ file.gz").unwrap();
        assert_eq!(out, vec!["upload", "my file.gz"]);
    }

    #[test]
    fn tokenize_rejects_unterminated_quote() {
        assert!(tokenize(r#"commit "oops"#).is_err());
        assert!(tokenize("upload x\\").is_err());
    }

    #[test]
    fn parse_index_requires_one_positive_number() {
        assert_eq!(parse_index(&args(&["3"]), "play <n>"), Ok(3));
        assert!(parse_index(&args(&[]), "play <n>").is_err());
        assert!(parse_index(&args(&["0"]), "play <n>").is_err());
        assert!(parse_index(&args(&["x"]), "play <n>").is_err());
        assert!(parse_index(&args(&["1", "2"]), "play <n>").is_err());
    }
