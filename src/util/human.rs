/// Format a megabyte count the way the AIX tools report it: "512M", "1.5G".
pub fn human_size(mb: f64) -> String {
    if mb >= 1024.0 { format!("{:.1}G", mb / 1024.0) }
    else            { format!("{:.0}M", mb) }
}

/// Size of a partition range: `pps` partitions of `pp_size_mb` each.
pub fn pp_size(pps: u64, pp_size_mb: u64) -> String {
    human_size((pps * pp_size_mb) as f64)
}

/// Parse a `df` / `lsps` percentage field ("42%", "42", "-") into 0..=100.
pub fn parse_percent(s: &str) -> u32 {
    s.trim()
        .trim_end_matches('%')
        .parse::<u32>()
        .unwrap_or(0)
        .min(100)
}

/// Parse a numeric field, yielding zero on failure.
pub fn parse_num(s: &str) -> u64 {
    s.trim().parse().unwrap_or(0)
}

/// Parse a float field ("512.00", "512MB"), yielding zero on failure.
pub fn parse_mb(s: &str) -> f64 {
    let digits = s.trim().trim_end_matches(|c: char| c.is_ascii_alphabetic());
    digits.parse().unwrap_or(0.0)
}

/// Keep the tail of a long path: "/very/long/mount" → ".../long/mount".
pub fn truncate_left(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max { return s.to_string(); }
    let keep = max.saturating_sub(3);
    let tail: String = s.chars().skip(n - keep).collect();
    format!("...{}", tail)
}

/// Cut a string to at most `max` characters.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
