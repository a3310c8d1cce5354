use reqwest::header::{CACHE_CONTROL, CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, SERVER};
use serde::{Deserialize, Serialize};

/// CDN cache-status header reported by the hosting platform.
pub const CDN_CACHE_HEADER: &str = "x-vercel-cache";

/// Outcome of a successful speed probe. This is the record printed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedResult {
    /// Seconds from request start until the response head was available.
    pub ttfb: f64,
    /// Seconds from request start until the whole body was received.
    pub total_time: f64,
    /// Body size in kilobytes (bytes / 1024).
    pub size_kb: f64,
    /// HTTP status code of the primary request.
    pub status: u16,
    /// Mean TTFB over the follow-up requests.
    pub avg_ttfb: f64,
}

pub fn bytes_to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// Response headers shown in the report. Values that are not valid UTF-8 are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    pub content_type: Option<String>,
    pub server: Option<String>,
    pub cache_control: Option<String>,
    pub content_encoding: Option<String>,
    pub cdn_cache: Option<String>,
}

impl ResponseHeaders {
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        ResponseHeaders {
            content_type: get(CONTENT_TYPE.as_str()),
            server: get(SERVER.as_str()),
            cache_control: get(CACHE_CONTROL.as_str()),
            content_encoding: get(CONTENT_ENCODING.as_str()),
            cdn_cache: get(CDN_CACHE_HEADER),
        }
    }
}

/// TTFB samples of the follow-up requests.
#[derive(Debug, Clone, PartialEq)]
pub struct TtfbStats {
    pub samples: Vec<f64>,
}

impl TtfbStats {
    pub fn new(samples: Vec<f64>) -> Self {
        TtfbStats { samples }
    }

    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn min(&self) -> f64 {
        self.samples.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.samples.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    /// `(1 - (max - min) / avg) * 100`.
    ///
    /// Samples are never negative, so an average of zero means every sample is
    /// zero. There is no spread in that case and the result is 100%.
    pub fn consistency(&self) -> f64 {
        let avg = self.average();
        if avg == 0.0 {
            return 100.0;
        }
        (1.0 - (self.max() - self.min()) / avg) * 100.0
    }
}

/// Everything a completed probe measured, used to render the console report.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub url: String,
    pub result: SpeedResult,
    pub headers: ResponseHeaders,
    pub ttfb_stats: TtfbStats,
}
