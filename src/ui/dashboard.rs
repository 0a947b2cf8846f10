use crate::collectors::Snapshot;
use crate::config::Thresholds;
use crate::ui::doc::{bar, Doc, DocLine, Tone};
use crate::util::human::{human_size, truncate, truncate_left};
use crate::util::metrics::{classify, Level};

const BANNER: [&str; 6] = [
    "  ███████╗████████╗ ██████╗ ████████╗██╗   ██╗██╗",
    "  ██╔════╝╚══██╔══╝██╔════╝ ╚══██╔══╝██║   ██║██║",
    "  ███████╗   ██║   ██║  ███╗   ██║   ██║   ██║██║",
    "  ╚════██║   ██║   ██║   ██║   ██║   ██║   ██║██║",
    "  ███████║   ██║   ╚██████╔╝   ██║   ╚██████╔╝██║",
    "  ╚══════╝   ╚═╝    ╚═════╝    ╚═╝    ╚═════╝ ╚═╝",
];

/// Resources at or above the warning threshold: filesystems, VGs, paging spaces.
pub fn capacity_alerts(snap: &Snapshot, thr: &Thresholds) -> usize {
    let over = |pct: u32| pct >= thr.warn_pct;
    snap.filesystems.iter().filter(|f| over(f.used_pct)).count()
        + snap.vgs.iter().filter(|v| over(v.used_pct())).count()
        + snap.paging.iter().filter(|p| over(p.used_pct)).count()
}

pub fn compose(snap: &Snapshot, thr: &Thresholds) -> Doc {
    let mut doc = Doc::new();
    let level = |pct: u32| classify(pct, thr.warn_pct, thr.crit_pct);

    for row in BANNER {
        doc.line(Tone::Section, row);
    }
    doc.line(Tone::Dim, "       AIX Storage Explorer");
    doc.line(Tone::Dim, format!("       Thresholds: warn={}% crit={}%", thr.warn_pct, thr.crit_pct));
    doc.blank();

    let alerts = capacity_alerts(snap, thr);
    let status = if alerts == 0 {
        DocLine::text(Tone::Ok, "● HEALTHY")
    } else {
        DocLine::text(Tone::Crit, format!("● {} CAPACITY ALERT(S)", alerts))
    };
    let mut line = DocLine::text(Tone::Text, "  Status: ");
    line.segments.extend(status.segments);
    line.push(Tone::Dim, "    Press 3 for details");
    doc.push(line);
    doc.blank();

    // ── Volume groups ─────────────────────────────────────────────────
    doc.section("VOLUME GROUPS");
    doc.line(Tone::Dim, format!("  {:<12} {:<8} {:>8} {:>8}  {}", "VG", "STATE", "SIZE", "FREE", "PP USAGE"));
    doc.line(Tone::Dim, format!("  {}", "─".repeat(60)));
    if snap.vgs.is_empty() {
        doc.line(Tone::Dim, "  (no volume groups)");
    }
    for vg in &snap.vgs {
        let dot = if vg.is_active() { Tone::Ok } else { Tone::Crit };
        let pct = vg.used_pct();
        let mut l = DocLine::text(Tone::Text, "  ")
            .seg(dot, "● ")
            .seg(Tone::Text, format!("{:<10} {:<8} {:>8} {:>8}  ",
                vg.name, vg.state, human_size(vg.size_mb()), human_size(vg.free_mb())));
        bar(&mut l, pct, 18, level(pct));
        doc.push(l);
    }

    // ── Unused disks ──────────────────────────────────────────────────
    let unused: Vec<_> = snap.unused_pvs().collect();
    if !unused.is_empty() {
        doc.blank();
        doc.section("UNUSED DISKS");
        doc.line(Tone::Dim, format!("  {:<10} {:<8} {:>8}  {}", "DISK", "STATUS", "SIZE", "LUN INFO"));
        doc.line(Tone::Dim, format!("  {}", "─".repeat(55)));
        for pv in unused {
            let (icon, tone, status) = if pv.has_remnants() {
                ("◐", Tone::Remnant, "vgda")
            } else {
                ("○", Tone::Ok, "clean")
            };
            let size = pv.size_mb.map(human_size).unwrap_or_else(|| "-".to_string());
            doc.push(
                DocLine::text(Tone::Text, "  ")
                    .seg(tone, format!("{} ", icon))
                    .seg(Tone::Text, format!("{:<8} ", pv.name))
                    .seg(Tone::Warn, format!("{:<6}", status))
                    .seg(Tone::Text, format!(" {:>8}  {}", size, truncate(&pv.lun.lun_id(), 25))),
            );
        }
        doc.line(Tone::Dim, "  ○ clean (ready to use)  ◐ vgda remnants (needs chpv -C)");
    }

    // ── Paging ────────────────────────────────────────────────────────
    doc.blank();
    doc.section("PAGING SPACE");
    if snap.paging.is_empty() {
        doc.line(Tone::Dim, "  (no paging spaces)");
    }
    for ps in &snap.paging {
        let mut l = DocLine::text(Tone::Text,
            format!("  {:<12} {:<10} {:>8} ", ps.name, ps.vg, human_size(ps.size_mb)));
        bar(&mut l, ps.used_pct, 18, level(ps.used_pct));
        doc.push(l);
    }

    // ── Filesystems ───────────────────────────────────────────────────
    doc.blank();
    doc.section("FILESYSTEMS");
    doc.line(Tone::Dim, format!("  {:<20} {:<4} {:>8} {:>8}  {}", "MOUNT", "TYPE", "SIZE", "FREE", "USAGE"));
    doc.line(Tone::Dim, format!("  {}", "─".repeat(62)));
    for fs in &snap.filesystems {
        let mut l = DocLine::text(Tone::Text, format!("  {:<20} {:<4} {:>8} {:>8}  ",
            truncate_left(&fs.mount, 20), fs.type_label(), human_size(fs.size_mb), human_size(fs.free_mb)));
        bar(&mut l, fs.used_pct, 16, level(fs.used_pct));
        doc.push(l);
    }

    doc
}

/// Overall dashboard color, for the header.
pub fn status_level(snap: &Snapshot, thr: &Thresholds) -> Level {
    let pcts = snap.filesystems.iter().map(|f| f.used_pct)
        .chain(snap.vgs.iter().map(|v| v.used_pct()))
        .chain(snap.paging.iter().map(|p| p.used_pct));
    pcts.map(|p| classify(p, thr.warn_pct, thr.crit_pct)).max().unwrap_or(Level::Ok)
}
