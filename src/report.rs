use owo_colors::{OwoColorize, Stream};

use crate::types::{Measurement, TargetStats};

/// Render one measurement line:
/// `<secs>[ ± <stdev>] (<rate>[ ± <stdev>] GB/s)  <label>`.
///
/// Shared by the live per-trial output and the ranked summaries. Each stdev
/// is printed only when given.
pub fn format_line(
    measurement: Measurement,
    label: &str,
    stdev_seconds: Option<f64>,
    stdev_rate: Option<f64>,
) -> String {
    let plus_minus = |v: Option<f64>| v.map(|v| format!(" ± {:.6}", v)).unwrap_or_default();
    let secs_stdev = plus_minus(stdev_seconds);
    let rate_stdev = plus_minus(stdev_rate);
    format!(
        "{:.6}{} ({:.6}{} GB/s)  {}",
        measurement.seconds, secs_stdev, measurement.rate, rate_stdev, label
    )
}

/// Live progress line for one trial. The warm-up trial is tagged "(ignored)".
pub fn format_trial(measurement: Measurement, label: &str, warm_up: bool) -> String {
    if warm_up {
        let tag = "(ignored)"
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string();
        format_line(measurement, &format!("{} {}", label, tag), None, None)
    } else {
        format_line(measurement, label, None, None)
    }
}

/// Labels ordered ascending by `key`. Ties keep their input order.
pub fn rank<'a>(
    stats: &'a [(String, TargetStats)],
    key: impl Fn(&TargetStats) -> f64,
) -> Vec<&'a (String, TargetStats)> {
    let mut ordered: Vec<_> = stats.iter().collect();
    ordered.sort_by(|a, b| key(&a.1).total_cmp(&key(&b.1)));
    ordered
}

fn section_header(name: &str) -> String {
    format!("--- {} ---", name)
        .if_supports_color(Stream::Stdout, |s| s.bold())
        .to_string()
}

/// The "best" table: each target's minimum time with the rate it implies.
pub fn format_best_table(stats: &[(String, TargetStats)], total_bytes: u64) -> String {
    let mut out = section_header("best");
    out.push('\n');
    for (label, s) in rank(stats, |s| s.best) {
        let measurement = Measurement::from_elapsed(s.best, total_bytes);
        out.push_str(&format_line(measurement, label, None, None));
        out.push('\n');
    }
    out
}

/// The "average" table: mean time and mean per-trial rate, with dispersion
/// when it was computed.
pub fn format_average_table(stats: &[(String, TargetStats)]) -> String {
    let mut out = section_header("average");
    out.push('\n');
    for (label, s) in rank(stats, |s| s.average) {
        let measurement = Measurement {
            seconds: s.average,
            rate: s.mean_rate,
        };
        out.push_str(&format_line(
            measurement,
            label,
            s.dispersion.map(|d| d.seconds),
            s.dispersion.map(|d| d.rate),
        ));
        out.push('\n');
    }
    out
}

/// Both ranked tables, best first.
pub fn format_summary(stats: &[(String, TargetStats)], total_bytes: u64) -> String {
    let mut out = format_best_table(stats, total_bytes);
    out.push_str(&format_average_table(stats));
    out
}
