use serde::Serialize;

/// Outcome of comparing a percentage against the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Ok,
    Warning,
    Critical,
}

impl Level {
    pub fn label(&self) -> &'static str {
        match self {
            Level::Ok       => "OK",
            Level::Warning  => "WARN",
            Level::Critical => "CRIT",
        }
    }
}

/// `used * 100 / total`, floored and clamped to 0..=100. Zero when total is zero.
pub fn used_percent(used: i64, total: i64) -> u32 {
    if total <= 0 { return 0; }
    let pct = used.saturating_mul(100) / total;
    pct.clamp(0, 100) as u32
}

pub fn classify(percent: u32, warn: u32, crit: u32) -> Level {
    if percent >= crit      { Level::Critical }
    else if percent >= warn { Level::Warning }
    else                    { Level::Ok }
}

/// Disk busy-time classification used by the I/O page.
pub fn classify_activity(tm_act: f64) -> Level {
    if tm_act >= 80.0      { Level::Critical }
    else if tm_act >= 50.0 { Level::Warning }
    else                   { Level::Ok }
}

/// Number of copies a logical volume keeps: physical partitions per logical one.
pub fn mirror_copies(allocated_pps: u64, logical_pps: u64) -> u32 {
    if logical_pps > 0 { (allocated_pps / logical_pps) as u32 } else { 1 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorLevel {
    Single,
    TwoWay,
    NWay(u32),
}

impl MirrorLevel {
    pub fn from_copies(copies: u32) -> Self {
        match copies {
            0 | 1 => MirrorLevel::Single,
            2     => MirrorLevel::TwoWay,
            n     => MirrorLevel::NWay(n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            MirrorLevel::Single  => "single".to_string(),
            MirrorLevel::TwoWay  => "2-way".to_string(),
            MirrorLevel::NWay(n) => format!("{}-way", n),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MirrorLevel::Single  => "○",
            MirrorLevel::TwoWay  => "◐",
            MirrorLevel::NWay(_) => "●",
        }
    }
}

/// Filled cell count of a `width`-wide bar for `percent`.
pub fn bar_fill(percent: u32, width: usize) -> usize {
    (percent.min(100) as usize * width) / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn used_percent_edges() {
        assert_eq!(used_percent(0, 100), 0);
        assert_eq!(used_percent(100, 100), 100);
        assert_eq!(used_percent(5, 0), 0);
        assert_eq!(used_percent(2, 3), 66);
        // malformed input never escapes the display range
        assert_eq!(used_percent(300, 100), 100);
        assert_eq!(used_percent(-5, 100), 0);
    }

    #[test]
    fn classify_boundaries_are_inclusive() {
        assert_eq!(classify(84, 85, 90), Level::Ok);
        assert_eq!(classify(85, 85, 90), Level::Warning);
        assert_eq!(classify(89, 85, 90), Level::Warning);
        assert_eq!(classify(90, 85, 90), Level::Critical);
        assert_eq!(classify(100, 85, 90), Level::Critical);
    }

    #[test]
    fn mirror_copies_guards_zero() {
        assert_eq!(mirror_copies(200, 100), 2);
        assert_eq!(mirror_copies(100, 0), 1);
        assert_eq!(MirrorLevel::from_copies(1), MirrorLevel::Single);
        assert_eq!(MirrorLevel::from_copies(2), MirrorLevel::TwoWay);
        assert_eq!(MirrorLevel::from_copies(3).label(), "3-way");
    }

    #[test]
    fn activity_bands() {
        assert_eq!(classify_activity(10.0), Level::Ok);
        assert_eq!(classify_activity(50.0), Level::Warning);
        assert_eq!(classify_activity(80.0), Level::Critical);
    }

    proptest! {
        #[test]
        fn prop_used_percent_in_range(total in 1i64..10_000_000, frac in 0.0f64..=1.0) {
            let used = (total as f64 * frac) as i64;
            let p = used_percent(used, total);
            prop_assert!(p <= 100);
        }

        #[test]
        fn prop_zero_total_is_zero(used in any::<i64>()) {
            prop_assert_eq!(used_percent(used, 0), 0);
        }

        #[test]
        fn prop_full_is_hundred(total in 1i64..10_000_000) {
            prop_assert_eq!(used_percent(total, total), 100);
            prop_assert_eq!(used_percent(0, total), 0);
        }

        #[test]
        fn prop_classify_monotonic(a in 0u32..=100, b in 0u32..=100, warn in 0u32..=100, gap in 0u32..=20) {
            let crit = (warn + gap).min(100);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify(lo, warn, crit) <= classify(hi, warn, crit));
        }

        #[test]
        fn prop_bar_fill_within_width(p in 0u32..=500, w in 0usize..80) {
            prop_assert!(bar_fill(p, w) <= w);
        }
    }
}
