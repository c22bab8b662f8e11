use time::macros::format_description;

/// Wall-clock stamp for log entries and listings.
pub(in crate::tui_shell) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "--:--:--".to_string())
}
