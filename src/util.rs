/// Label text for a per-connection rate, truncated to whole bytes per second.
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{} B/s", bytes_per_sec.trunc() as i64)
}
