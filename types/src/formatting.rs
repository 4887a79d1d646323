//! Display formatting for combo tables and replay output.
//!
//! Gaps and timestamps are shown the same way everywhere (CLI output,
//! log lines), so all of it lives here.

use std::time::Duration;

/// Format an inter-step gap for display.
///
/// - Gaps below one second are shown in whole milliseconds (`300ms`)
/// - Longer gaps are shown in seconds with two decimals (`1.50s`)
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use combo_types::formatting::format_gap;
/// assert_eq!(format_gap(Duration::from_millis(300)), "300ms");
/// assert_eq!(format_gap(Duration::from_millis(1_500)), "1.50s");
/// assert_eq!(format_gap(Duration::ZERO), "0ms");
/// ```
pub fn format_gap(gap: Duration) -> String {
    let ms = gap.as_millis();
    if ms < 1_000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", gap.as_secs_f64())
    }
}

/// Format a script timestamp (milliseconds from replay start) as `M:SS.mmm`.
///
/// # Examples
/// ```
/// use combo_types::formatting::format_timestamp_ms;
/// assert_eq!(format_timestamp_ms(0), "0:00.000");
/// assert_eq!(format_timestamp_ms(1_250), "0:01.250");
/// assert_eq!(format_timestamp_ms(125_007), "2:05.007");
/// ```
pub fn format_timestamp_ms(ms: u64) -> String {
    let secs = ms / 1_000;
    format!("{}:{:02}.{:03}", secs / 60, secs % 60, ms % 1_000)
}

/// Join combo steps into a readable chain (`Up > Down > Punch`).
///
/// # Examples
/// ```
/// use combo_types::formatting::format_steps;
/// assert_eq!(format_steps(&["Up", "Down", "Punch"]), "Up > Down > Punch");
/// assert_eq!(format_steps::<&str>(&[]), "");
/// ```
pub fn format_steps<S: AsRef<str>>(steps: &[S]) -> String {
    steps
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" > ")
}
