use crate::collectors::Snapshot;
use crate::config::Thresholds;
use crate::util::metrics::{classify, Level};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthCategory {
    StalePartition,
    QuorumDisabled,
    PathFailed,
    PagingFull,
    CapacityFull,
    DiskError,
}

impl HealthCategory {
    pub fn label(&self) -> &'static str {
        match self {
            HealthCategory::StalePartition => "stale",
            HealthCategory::QuorumDisabled => "quorum",
            HealthCategory::PathFailed     => "path",
            HealthCategory::PagingFull     => "paging",
            HealthCategory::CapacityFull   => "capacity",
            HealthCategory::DiskError      => "errlog",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthIssue {
    pub category: HealthCategory,
    pub severity: Level,
    /// The VG, LV, disk, path or mount the issue is about.
    pub subject:  String,
    pub message:  String,
}

impl HealthIssue {
    fn new(category: HealthCategory, severity: Level, subject: &str, message: String) -> Self {
        Self { category, severity, subject: subject.to_string(), message }
    }
}

/// Result of running every rule against one snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthReport {
    /// Sorted Critical first.
    pub issues: Vec<HealthIssue>,
    /// Unused disks still carrying a PVID. Informational, not counted.
    pub remnant_disks: Vec<String>,
    pub path_count: usize,
    /// Error-log entries against hdisk resources.
    pub disk_error_entries: usize,
}

impl HealthReport {
    pub fn issue_count(&self) -> usize { self.issues.len() }

    pub fn passed(&self) -> bool { self.issues.is_empty() }

    pub fn worst(&self) -> Level {
        self.issues.iter().map(|i| i.severity).max().unwrap_or(Level::Ok)
    }

    pub fn of(&self, category: HealthCategory) -> impl Iterator<Item = &HealthIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }
}

/// Evaluate every storage health rule. Thresholds apply to VG, filesystem
/// and paging usage alike.
pub fn evaluate(snap: &Snapshot, thr: &Thresholds) -> HealthReport {
    use HealthCategory::*;
    let mut issues: Vec<HealthIssue> = Vec::new();

    // ── Stale partitions ──────────────────────────────────────────────
    for lv in snap.lvs.iter().filter(|lv| lv.is_stale()) {
        issues.push(HealthIssue::new(StalePartition, Level::Critical, &lv.name,
            format!("{} in {} has stale partitions ({})", lv.name, lv.vg, lv.state)));
    }

    // ── Quorum ────────────────────────────────────────────────────────
    for vg in snap.vgs.iter().filter(|vg| vg.quorum == Some(false)) {
        issues.push(HealthIssue::new(QuorumDisabled, Level::Warning, &vg.name,
            format!("{} has quorum disabled", vg.name)));
    }

    // ── Multipath ─────────────────────────────────────────────────────
    for p in snap.paths.iter().filter(|p| !p.is_enabled()) {
        issues.push(HealthIssue::new(PathFailed, Level::Critical, &p.device,
            format!("{} path via {} is {}", p.device, p.parent, p.status)));
    }

    // ── Paging ────────────────────────────────────────────────────────
    for ps in &snap.paging {
        let level = classify(ps.used_pct, thr.warn_pct, thr.crit_pct);
        if level != Level::Ok {
            issues.push(HealthIssue::new(PagingFull, level, &ps.name,
                format!("{} is {}% used", ps.name, ps.used_pct)));
        }
    }

    // ── Error log ─────────────────────────────────────────────────────
    let disk_entries: Vec<_> = snap.errors.iter().filter(|e| e.is_disk()).collect();
    let mut disks: Vec<&str> = disk_entries.iter().map(|e| e.resource.as_str()).collect();
    disks.sort_unstable();
    disks.dedup();
    for disk in disks {
        let n = disk_entries.iter().filter(|e| e.resource == disk).count();
        issues.push(HealthIssue::new(DiskError, Level::Warning, disk,
            format!("{} has {} hardware error(s) logged", disk, n)));
    }

    // ── Capacity ──────────────────────────────────────────────────────
    for fs in &snap.filesystems {
        let level = classify(fs.used_pct, thr.warn_pct, thr.crit_pct);
        if level != Level::Ok {
            issues.push(HealthIssue::new(CapacityFull, level, &fs.mount,
                format!("{} is {}% full", fs.mount, fs.used_pct)));
        }
    }
    for vg in &snap.vgs {
        let pct = vg.used_pct();
        let level = classify(pct, thr.warn_pct, thr.crit_pct);
        if level != Level::Ok {
            issues.push(HealthIssue::new(CapacityFull, level, &vg.name,
                format!("{} is {}% allocated", vg.name, pct)));
        }
    }

    // Stable: keeps rule order within a severity
    issues.sort_by(|a, b| b.severity.cmp(&a.severity));

    HealthReport {
        issues,
        remnant_disks: snap.unused_pvs().filter(|p| p.has_remnants()).map(|p| p.name.clone()).collect(),
        path_count: snap.paths.len(),
        disk_error_entries: disk_entries.len(),
    }
}
