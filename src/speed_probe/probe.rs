use std::time::Instant;

use chrono::Utc;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, HeaderMap, HeaderValue};
use url::Url;

use super::body::BodyMeter;
use super::describe_error;
use super::prelude::*;
use super::report::render_banner;
use super::result::bytes_to_kb;

/// Number of requests sent after the primary one to measure TTFB consistency.
pub const FOLLOW_UP_REQUESTS: usize = 5;

struct TimedResponse {
    ttfb: f64,
    total_time: f64,
    body_bytes: u64,
    status: u16,
    headers: HeaderMap,
}

/// Sends a GET and streams the body to the end.
/// TTFB is taken when the response head is available, total time after the last chunk.
/// The body is decoded here rather than by the client so `Content-Encoding` stays in the headers;
/// `body_bytes` is the decoded length.
async fn timed_get(client: &reqwest::Client, url: &Url) -> Result<TimedResponse, ProbeError> {
    let start = Instant::now();
    let mut response = client
        .get(url.clone())
        .header(ACCEPT_ENCODING, HeaderValue::from_static("gzip"))
        .send()
        .await?;
    let ttfb = start.elapsed().as_secs_f64();

    let status = response.status().as_u16();
    let headers = response.headers().clone();

    let mut meter = BodyMeter::for_encoding(
        headers
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok()),
    );
    while let Some(chunk) = response.chunk().await? {
        meter.feed(&chunk).map_err(ProbeError::Body)?;
    }
    let body_bytes = meter.finish().map_err(ProbeError::Body)?;
    let total_time = start.elapsed().as_secs_f64();

    Ok(TimedResponse {
        ttfb,
        total_time,
        body_bytes,
        status,
        headers,
    })
}

/// Runs the primary request and the follow-up requests one after another.
/// The first failure aborts the run; nothing measured before it is kept.
pub async fn run_probe(client: &reqwest::Client, url: &str) -> Result<ProbeReport, ProbeError> {
    let parsed = Url::parse(url).map_err(|source| ProbeError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let primary = timed_get(client, &parsed).await?;
    log::debug!(
        "Primary request to {url}: status {}, ttfb {:.4}s, total {:.4}s, {} bytes",
        primary.status,
        primary.ttfb,
        primary.total_time,
        primary.body_bytes
    );

    let mut samples = Vec::with_capacity(FOLLOW_UP_REQUESTS);
    for i in 0..FOLLOW_UP_REQUESTS {
        let follow_up = timed_get(client, &parsed).await?;
        log::debug!(
            "Follow-up request {}/{FOLLOW_UP_REQUESTS} to {url}: ttfb {:.4}s",
            i + 1,
            follow_up.ttfb
        );
        samples.push(follow_up.ttfb);
    }
    let ttfb_stats = TtfbStats::new(samples);

    Ok(ProbeReport {
        url: url.to_string(),
        result: SpeedResult {
            ttfb: primary.ttfb,
            total_time: primary.total_time,
            size_kb: bytes_to_kb(primary.body_bytes),
            status: primary.status,
            avg_ttfb: ttfb_stats.average(),
        },
        headers: ResponseHeaders::from_header_map(&primary.headers),
        ttfb_stats,
    })
}

/// Probes `url`, prints the report and returns the result record.
/// Any failure is printed and turned into `None`.
pub async fn probe_speed(client: &reqwest::Client, url: &str) -> Option<SpeedResult> {
    println!("{}", render_banner(url, Utc::now()));
    log::info!("Starting speed probe of {url}");

    match run_probe(client, url).await {
        Ok(report) => {
            println!("{report}");
            log::info!(
                "Speed probe of {} completed with status {}",
                report.url,
                report.result.status
            );
            Some(report.result)
        }
        Err(e) => {
            println!("\n❌ ERROR: {}", describe_error(&e));
            if e.is_timeout() {
                log::error!("Speed probe of {url} timed out: {}", describe_error(&e));
            } else {
                log::error!("Speed probe of {url} failed: {}", describe_error(&e));
            }
            None
        }
    }
}
