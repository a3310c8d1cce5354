use std::fmt;

pub const TTFB_EXCELLENT_SECS: f64 = 0.2;
pub const TTFB_GOOD_SECS: f64 = 0.5;
pub const TTFB_LOCAL_TARGET_SECS: f64 = 0.1;

pub const LOAD_EXCELLENT_SECS: f64 = 1.0;
/// Largest Contentful Paint target.
pub const LOAD_GOOD_SECS: f64 = 2.5;

pub const SIZE_EXCELLENT_KB: f64 = 500.0;
pub const SIZE_GOOD_KB: f64 = 1500.0;

/// Assessment tier of a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Tier {
    /// Both bounds are exclusive: a value equal to a bound falls into the next tier.
    fn classify(value: f64, excellent_below: f64, good_below: f64) -> Tier {
        if value < excellent_below {
            Tier::Excellent
        } else if value < good_below {
            Tier::Good
        } else {
            Tier::NeedsImprovement
        }
    }

    pub fn for_ttfb(ttfb: f64) -> Tier {
        Tier::classify(ttfb, TTFB_EXCELLENT_SECS, TTFB_GOOD_SECS)
    }

    pub fn for_load_time(total_time: f64) -> Tier {
        Tier::classify(total_time, LOAD_EXCELLENT_SECS, LOAD_GOOD_SECS)
    }

    pub fn for_size(size_kb: f64) -> Tier {
        Tier::classify(size_kb, SIZE_EXCELLENT_KB, SIZE_GOOD_KB)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Excellent => write!(f, "🟢 EXCELLENT"),
            Tier::Good => write!(f, "🟡 GOOD"),
            Tier::NeedsImprovement => write!(f, "🔴 NEEDS IMPROVEMENT"),
        }
    }
}

/// A metric that exceeded its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    HighTtfb,
    SlowLoad,
    LargePage,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::HighTtfb => write!(f, "⚠️  High TTFB - Consider CDN optimization"),
            Issue::SlowLoad => write!(f, "⚠️  Slow LCP - Optimize images and defer JS"),
            Issue::LargePage => write!(f, "⚠️  Large page size - Enable compression"),
        }
    }
}

/// Returns the metrics that are over their target, in report order.
/// Unlike the tiers, a value sitting exactly on the target is not an issue.
pub fn detect_issues(ttfb: f64, total_time: f64, size_kb: f64) -> Vec<Issue> {
    let mut issues = Vec::new();
    if ttfb > TTFB_EXCELLENT_SECS {
        issues.push(Issue::HighTtfb);
    }
    if total_time > LOAD_GOOD_SECS {
        issues.push(Issue::SlowLoad);
    }
    if size_kb > SIZE_GOOD_KB {
        issues.push(Issue::LargePage);
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttfb_tiers() {
        assert_eq!(Tier::for_ttfb(0.0), Tier::Excellent);
        assert_eq!(Tier::for_ttfb(0.1), Tier::Excellent);
        assert_eq!(Tier::for_ttfb(0.2), Tier::Good);
        assert_eq!(Tier::for_ttfb(0.3), Tier::Good);
        assert_eq!(Tier::for_ttfb(0.5), Tier::NeedsImprovement);
        assert_eq!(Tier::for_ttfb(0.6), Tier::NeedsImprovement);
    }

    #[test]
    fn test_load_time_tiers() {
        assert_eq!(Tier::for_load_time(0.4), Tier::Excellent);
        assert_eq!(Tier::for_load_time(1.0), Tier::Good);
        assert_eq!(Tier::for_load_time(2.4), Tier::Good);
        assert_eq!(Tier::for_load_time(2.5), Tier::NeedsImprovement);
    }

    #[test]
    fn test_size_tiers() {
        assert_eq!(Tier::for_size(12.5), Tier::Excellent);
        assert_eq!(Tier::for_size(500.0), Tier::Good);
        assert_eq!(Tier::for_size(1499.9), Tier::Good);
        assert_eq!(Tier::for_size(1500.0), Tier::NeedsImprovement);
    }

    #[test]
    fn test_detect_issues() {
        assert!(detect_issues(0.1, 0.5, 100.0).is_empty());
        // Exactly on target is not flagged.
        assert!(detect_issues(0.2, 2.5, 1500.0).is_empty());
        assert_eq!(
            detect_issues(0.21, 3.0, 2048.0),
            vec![Issue::HighTtfb, Issue::SlowLoad, Issue::LargePage]
        );
        assert_eq!(detect_issues(0.1, 2.6, 10.0), vec![Issue::SlowLoad]);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Excellent.to_string(), "🟢 EXCELLENT");
        assert_eq!(Tier::NeedsImprovement.to_string(), "🔴 NEEDS IMPROVEMENT");
    }
}
