use crate::collectors::Snapshot;
use crate::config::Thresholds;
use crate::health::{HealthCategory, HealthIssue, HealthReport};
use crate::ui::doc::{Doc, Tone};
use crate::util::metrics::Level;

/// Disk error-log entries listed before collapsing into a count.
const MAX_ERRORS_SHOWN: usize = 3;

fn issue_line(doc: &mut Doc, issue: &HealthIssue) {
    let icon = if issue.severity == Level::Critical { "✖" } else { "⚠" };
    doc.line(issue.severity.into(), format!("  {} {}", icon, issue.message));
}

fn pass_line(doc: &mut Doc, msg: impl Into<String>) {
    doc.line(Tone::Ok, format!("  ✓ {}", msg.into()));
}

fn heading(doc: &mut Doc, title: &str) {
    doc.blank();
    doc.line(Tone::Accent, format!("● {}", title));
}

pub fn compose(snap: &Snapshot, report: &HealthReport, thr: &Thresholds) -> Doc {
    use HealthCategory::*;
    let mut doc = Doc::new();
    doc.section("STORAGE HEALTH CHECK");

    heading(&mut doc, "Stale Physical Partitions");
    let stale: Vec<_> = report.of(StalePartition).collect();
    if stale.is_empty() { pass_line(&mut doc, "No stale partitions"); }
    for i in stale { issue_line(&mut doc, i); }

    heading(&mut doc, "Volume Group Quorum");
    if snap.vgs.is_empty() { doc.line(Tone::Dim, "  - No volume groups"); }
    for vg in &snap.vgs {
        match vg.quorum {
            Some(true)  => pass_line(&mut doc, format!("{}: Quorum Enabled", vg.name)),
            Some(false) => doc.line(Tone::Warn, format!("  ⚠ {}: Quorum Disabled", vg.name)),
            None        => doc.line(Tone::Dim, format!("  - {}: Quorum unknown", vg.name)),
        }
    }

    heading(&mut doc, "Multipath Status");
    let failed: Vec<_> = report.of(PathFailed).collect();
    for i in &failed { issue_line(&mut doc, i); }
    if report.path_count == 0 {
        doc.line(Tone::Dim, "  - No multipath configured");
    } else if failed.is_empty() {
        pass_line(&mut doc, format!("All {} paths healthy", report.path_count));
    }

    heading(&mut doc, "Paging Space");
    if snap.paging.is_empty() { doc.line(Tone::Dim, "  - No paging spaces"); }
    for ps in &snap.paging {
        match report.of(PagingFull).find(|i| i.subject == ps.name) {
            Some(i) => issue_line(&mut doc, i),
            None    => pass_line(&mut doc, format!("{}: {}% used", ps.name, ps.used_pct)),
        }
    }

    heading(&mut doc, "Recent Disk Errors (errpt)");
    let disk_entries: Vec<_> = snap.errors.iter().filter(|e| e.is_disk()).collect();
    if disk_entries.is_empty() { pass_line(&mut doc, "No disk errors in errpt"); }
    for e in disk_entries.iter().take(MAX_ERRORS_SHOWN) {
        doc.line(Tone::Warn, format!("  ⚠ {} {} {} {}", e.identifier, e.timestamp, e.resource, e.description));
    }
    if disk_entries.len() > MAX_ERRORS_SHOWN {
        doc.line(Tone::Warn, format!("    ... and {} more disk errors", disk_entries.len() - MAX_ERRORS_SHOWN));
    }

    heading(&mut doc, "Unused Disks");
    let unused = snap.unused_pvs().count();
    for disk in &report.remnant_disks {
        doc.line(Tone::Warn, format!("  ⚠ {} has VGDA remnants (chpv -C to clear)", disk));
    }
    if unused == 0 {
        doc.line(Tone::Dim, "  - No unused disks");
    } else if report.remnant_disks.is_empty() {
        pass_line(&mut doc, format!("{} unused disk(s), all clean", unused));
    }

    heading(&mut doc, "Capacity");
    let full: Vec<_> = report.of(CapacityFull).collect();
    if full.is_empty() {
        pass_line(&mut doc, format!("All filesystems and volume groups below {}%", thr.warn_pct));
    }
    for i in full { issue_line(&mut doc, i); }

    doc.blank();
    doc.line(Tone::Dim, "─".repeat(50));
    if report.passed() {
        doc.line(Tone::Ok, "✓ SYSTEM HEALTHY - No issues detected");
    } else {
        doc.line(report.worst().into(), format!("✖ {} ISSUE(S) REQUIRE ATTENTION", report.issue_count()));
    }
    doc.blank();
    doc.line(Tone::Dim, format!("Thresholds: warn={}% crit={}%", thr.warn_pct, thr.crit_pct));
    doc
}
