use std::fmt;

use chrono::{DateTime, Utc};

use super::result::ProbeReport;
use super::thresholds::{
    LOAD_GOOD_SECS, SIZE_GOOD_KB, TTFB_EXCELLENT_SECS, TTFB_LOCAL_TARGET_SECS, Tier,
    detect_issues,
};

const RULE_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 23;

pub fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Banner printed before any request is sent.
pub fn render_banner(url: &str, started_at: DateTime<Utc>) -> String {
    format!(
        "\n{rule}\nPERFORMANCE ANALYSIS: {url}\nStarted at: {}\n{rule}\n",
        started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        rule = heavy_rule(),
    )
}

fn checked(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "✓ {} {}", to_fixed_width(label, LABEL_WIDTH - 1), value)
}

fn plain(f: &mut fmt::Formatter<'_>, label: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{} {}", to_fixed_width(label, LABEL_WIDTH + 1), value)
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = &self.result;
        let headers = &self.headers;
        let stats = &self.ttfb_stats;

        writeln!(f, "📊 TEST 1: Server Response Metrics")?;
        writeln!(f, "{}", light_rule())?;
        checked(f, "Status Code:", result.status)?;
        checked(f, "TTFB (Server Latency):", format_args!("{:.4}s", result.ttfb))?;
        checked(f, "Total Load Time:", format_args!("{:.4}s", result.total_time))?;
        checked(f, "Page Size:", format_args!("{:.2} KB", result.size_kb))?;
        checked(
            f,
            "Content Type:",
            headers.content_type.as_deref().unwrap_or("N/A"),
        )?;

        writeln!(f, "\n📋 TEST 2: Response Headers Analysis")?;
        writeln!(f, "{}", light_rule())?;
        checked(
            f,
            "Server:",
            headers.server.as_deref().unwrap_or("Not disclosed"),
        )?;
        checked(
            f,
            "Cache-Control:",
            headers.cache_control.as_deref().unwrap_or("Not set"),
        )?;
        checked(
            f,
            "Content-Encoding:",
            headers.content_encoding.as_deref().unwrap_or("None"),
        )?;
        checked(
            f,
            "X-Vercel-Cache:",
            headers.cdn_cache.as_deref().unwrap_or("N/A"),
        )?;

        writeln!(f, "\n🎯 TEST 3: Performance Benchmarks (South African Standards)")?;
        writeln!(f, "{}", light_rule())?;
        plain(f, "TTFB Assessment:", Tier::for_ttfb(result.ttfb))?;
        plain(f, "  Target (Global):", format_args!("< {TTFB_EXCELLENT_SECS}s"))?;
        plain(f, "  Target (Local SA):", format_args!("< {TTFB_LOCAL_TARGET_SECS}s"))?;
        plain(f, "  Your Result:", format_args!("{:.4}s", result.ttfb))?;

        writeln!(f)?;
        plain(f, "Load Time Assessment:", Tier::for_load_time(result.total_time))?;
        plain(f, "  Target (LCP):", format_args!("< {LOAD_GOOD_SECS}s"))?;
        plain(f, "  Your Result:", format_args!("{:.4}s", result.total_time))?;

        writeln!(f)?;
        plain(f, "Page Size Assessment:", Tier::for_size(result.size_kb))?;
        plain(f, "  Target:", format_args!("< {SIZE_GOOD_KB} KB"))?;
        plain(f, "  Your Result:", format_args!("{:.2} KB", result.size_kb))?;

        writeln!(
            f,
            "\n⚡ TEST 4: Consistency Test ({} Requests)",
            stats.samples.len()
        )?;
        writeln!(f, "{}", light_rule())?;
        plain(f, "Average TTFB:", format_args!("{:.4}s", stats.average()))?;
        plain(f, "Best TTFB:", format_args!("{:.4}s", stats.min()))?;
        plain(f, "Worst TTFB:", format_args!("{:.4}s", stats.max()))?;
        plain(f, "Consistency:", format_args!("{:.1}%", stats.consistency()))?;

        writeln!(f, "\n{}", heavy_rule())?;
        writeln!(f, "📈 PERFORMANCE SUMMARY")?;
        writeln!(f, "{}", heavy_rule())?;

        let issues = detect_issues(result.ttfb, result.total_time, result.size_kb);
        if issues.is_empty() {
            writeln!(f, "\n🟢 ALL METRICS WITHIN TARGET RANGES!")
        } else {
            writeln!(f, "\n🔴 ISSUES DETECTED:")?;
            for issue in issues {
                writeln!(f, "  {issue}")?;
            }
            Ok(())
        }
    }
}
