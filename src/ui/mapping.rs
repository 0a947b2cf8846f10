//! Cross-reference pages. Each trace re-queries the LVM tools for the
//! object it follows, so it reflects the system at the moment it is opened
//! rather than the last refresh.

use crate::collectors::runner::CommandRunner;
use crate::collectors::{lslv, lspath, lspv, lsvg, lun, Snapshot};
use crate::config::Thresholds;
use crate::models::volume::PathEntry;
use crate::ui::doc::{arrow, bar, card, CardRow, Doc, DocLine, Tone};
use crate::util::human::{human_size, pp_size};
use crate::util::metrics::{classify, used_percent};
use tracing::debug;

// ── Filesystem → storage ──────────────────────────────────────────────

pub fn fs_to_storage(runner: &dyn CommandRunner, snap: &Snapshot, mount: &str, thr: &Thresholds) -> Doc {
    let mut doc = Doc::new();
    doc.section(&format!("STORAGE MAP: {}", mount));
    doc.blank();

    let Some(fs) = snap.filesystem(mount) else {
        doc.error(format!("Filesystem not found: {}", mount));
        return doc;
    };
    let level = classify(fs.used_pct, thr.warn_pct, thr.crit_pct);

    if let Some((server, path)) = fs.nfs_parts() {
        card(&mut doc, "NFS MOUNT", &[
            CardRow::new("Mount:", &fs.mount),
            CardRow::new("Server:", server),
            CardRow::new("Export:", path),
            CardRow::new("Size:", human_size(fs.size_mb)),
            CardRow::new("Free:", human_size(fs.free_mb)),
            CardRow::toned("Used:", format!("{}%", fs.used_pct), level.into()),
        ]);
        return doc;
    }

    card(&mut doc, "FILESYSTEM", &[
        CardRow::new("Mount:", &fs.mount),
        CardRow::new("Device:", &fs.device),
        CardRow::new("Type:", fs.type_label()),
        CardRow::new("Size:", human_size(fs.size_mb)),
        CardRow::new("Free:", human_size(fs.free_mb)),
        CardRow::toned("Used:", format!("{}%", fs.used_pct), level.into()),
    ]);

    let Some(lv_name) = fs.lv_name() else {
        doc.error(format!("No logical volume behind {}", fs.device));
        return doc;
    };
    let lv = lslv::read_lv_info(runner, lv_name);
    if lv.vg.is_empty() {
        doc.error(format!("lslv returned nothing for {}", lv_name));
        return doc;
    }
    debug!(lv = lv_name, vg = %lv.vg, "tracing filesystem to disks");

    arrow(&mut doc);
    let lv_tone = if lv.state.to_lowercase().contains("stale") { Tone::Crit } else { Tone::Ok };
    card(&mut doc, "LOGICAL VOLUME", &[
        CardRow::new("Name:", lv_name),
        CardRow::new("Type:", &lv.lv_type),
        CardRow::toned("State:", &lv.state, lv_tone),
        CardRow::new("LPs / PPs:", format!("{} / {}", lv.lps, lv.pps)),
        CardRow::new("Copies:", lv.copies.max(1).to_string()),
    ]);

    arrow(&mut doc);
    let vg = lsvg::read_vg(runner, &lv.vg);
    if vg.state.is_empty() {
        doc.error(format!("lsvg returned nothing for {}", lv.vg));
        return doc;
    }
    let vg_pct = vg.used_pct();
    card(&mut doc, "VOLUME GROUP", &[
        CardRow::new("Name:", &vg.name),
        CardRow::new("State:", &vg.state),
        CardRow::new("PP size:", format!("{} MB", vg.pp_size_mb)),
        CardRow::new("Size:", human_size(vg.size_mb())),
        CardRow::new("Free:", human_size(vg.free_mb())),
        CardRow::toned("Used:", format!("{}%", vg_pct), classify(vg_pct, thr.warn_pct, thr.crit_pct).into()),
    ]);

    let disks = lslv::read_lv_disks(runner, lv_name);
    if disks.is_empty() {
        doc.error(format!("No disks found for {}", lv_name));
        return doc;
    }
    for disk in disks {
        arrow(&mut doc);
        let id = lun::read_lun(runner, &disk);
        let paths = lspath::read_disk_paths(runner, &disk);
        card(&mut doc, "PHYSICAL VOLUME", &[
            CardRow::new("Disk:", &disk),
            CardRow::new("PVID:", if id.pvid.is_empty() { "none" } else { id.pvid.as_str() }),
            CardRow::new("LUN:", id.lun_id()),
            CardRow::new("Model:", id.model()),
            path_row(&paths),
        ]);
    }
    doc
}

fn path_row(paths: &[PathEntry]) -> CardRow {
    if paths.is_empty() {
        return CardRow::toned("Paths:", "none reported", Tone::Dim);
    }
    let failed = paths.iter().filter(|p| !p.is_enabled()).count();
    let tone = if failed > 0 { Tone::Crit } else { Tone::Ok };
    CardRow::toned("Paths:", format!("{} enabled, {} failed", paths.len() - failed, failed), tone)
}

// ── Disk → filesystems ────────────────────────────────────────────────

pub fn storage_to_fs(runner: &dyn CommandRunner, snap: &Snapshot, disk: &str, thr: &Thresholds) -> Doc {
    let mut doc = Doc::new();
    doc.section(&format!("DISK MAP: {}", disk));
    doc.blank();

    let Some(pv) = snap.pv(disk) else {
        doc.error(format!("Disk not found: {}", disk));
        return doc;
    };

    let info = lspv::read_pv_info(runner, disk);
    let paths = lspath::read_disk_paths(runner, disk);
    let total = if info.total_pps > 0 { info.total_pps } else { pv.total_pps };
    let used  = if info.total_pps > 0 { info.used_pps } else { pv.used_pps() };
    let pct   = used_percent(used as i64, total as i64);

    let mut rows = vec![
        CardRow::new("Disk:", disk),
        CardRow::new("PVID:", &pv.pvid),
        CardRow::new("LUN:", pv.lun.lun_id()),
        CardRow::new("Model:", pv.lun.model()),
    ];
    if pv.is_unused() {
        rows.push(CardRow::new("Size:", pv.size_mb.map(human_size).unwrap_or_else(|| "-".into())));
    } else {
        rows.push(CardRow::new("PPs used:", format!("{} / {}", used, total)));
    }
    rows.push(path_row(&paths));
    card(&mut doc, "PHYSICAL VOLUME", &rows);

    if !pv.is_unused() {
        let mut l = DocLine::text(Tone::Text, "  ");
        bar(&mut l, pct, 40, classify(pct, thr.warn_pct, thr.crit_pct));
        doc.push(l);
    }

    let Some(vg_name) = pv.vg.as_deref() else {
        doc.blank();
        if pv.has_remnants() {
            doc.line(Tone::Remnant, format!("  ◐ {} is not in a volume group but still carries PVID {}.", disk, pv.pvid));
            doc.line(Tone::Text, format!("    Clear the old VGDA before reuse:  chpv -C {}", disk));
        } else {
            doc.line(Tone::Ok, format!("  ○ {} is clean and ready to use.", disk));
            doc.line(Tone::Text, format!("    Create a volume group:  mkvg -y <vgname> {}", disk));
        }
        return doc;
    };

    arrow(&mut doc);
    let vg = snap.vg(vg_name).cloned().unwrap_or_else(|| lsvg::read_vg(runner, vg_name));
    if vg.state.is_empty() {
        doc.error(format!("lsvg returned nothing for {} (varied off?)", vg_name));
        return doc;
    }
    card(&mut doc, "VOLUME GROUP", &[
        CardRow::new("Name:", &vg.name),
        CardRow::new("State:", &vg.state),
        CardRow::new("PP size:", format!("{} MB", vg.pp_size_mb)),
        CardRow::new("Disks:", vg.pv_count.to_string()),
        CardRow::new("LVs:", vg.lv_count.to_string()),
    ]);

    doc.blank();
    doc.line(Tone::Dim, format!("  {:<15} {:<8} {:>6} {:>8}  {:<14} {}", "LV", "TYPE", "LPs", "SIZE", "STATE", "MOUNT"));
    doc.line(Tone::Dim, format!("  {}", "─".repeat(70)));
    let lvs = lspv::read_pv_lvs(runner, disk);
    if lvs.is_empty() {
        doc.line(Tone::Dim, "  (no logical volumes on this disk)");
    }
    for entry in lvs {
        let lv = lslv::read_lv_info(runner, &entry.name);
        let state_tone = if lv.state.to_lowercase().contains("stale") { Tone::Crit } else { Tone::Ok };
        let mount = entry.mount.or(lv.mount).unwrap_or_else(|| "N/A".into());
        doc.push(
            DocLine::text(Tone::Text, format!("  {:<15} {:<8} {:>6} {:>8}  ",
                entry.name, lv.lv_type, entry.lps, pp_size(entry.lps, vg.pp_size_mb)))
                .seg(state_tone, format!("{:<14}", lv.state))
                .seg(Tone::Text, format!(" {}", mount)),
        );
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::fixtures;
    use crate::collectors::runner::fake::FakeRunner;

    #[test]
    fn filesystem_traces_down_to_disk() {
        let runner = fixtures::with_trace_outputs(fixtures::aix_system());
        let snap = Snapshot::collect(&runner);
        let text = fs_to_storage(&runner, &snap, "/data", &Thresholds::default()).plain();
        for title in ["FILESYSTEM", "LOGICAL VOLUME", "VOLUME GROUP", "PHYSICAL VOLUME"] {
            assert!(text.contains(&format!("┌─ {} ", title)), "missing {}", title);
        }
        assert!(text.contains("opened/stale"));
        assert!(text.contains("3321360050768AB0"));
        assert!(text.contains("1 enabled, 1 failed"));
        assert_eq!(text.matches("┌─ PHYSICAL VOLUME").count(), 1);
    }

    #[test]
    fn nfs_mount_gets_single_card() {
        let runner = fixtures::aix_system();
        let snap = Snapshot::collect(&runner);
        let text = fs_to_storage(&runner, &snap, "/home/shared", &Thresholds::default()).plain();
        assert!(text.contains("┌─ NFS MOUNT"));
        assert!(text.contains("nas01"));
        assert!(text.contains("/export/home"));
        assert!(!text.contains("LOGICAL VOLUME"));
    }

    #[test]
    fn unknown_mount_is_an_inline_error() {
        let runner = fixtures::aix_system();
        let snap = Snapshot::collect(&runner);
        let text = fs_to_storage(&runner, &snap, "/nope", &Thresholds::default()).plain();
        assert!(text.contains("✖ Filesystem not found: /nope"));
    }

    #[test]
    fn disk_lists_its_logical_volumes() {
        let runner = fixtures::with_trace_outputs(fixtures::aix_system());
        let snap = Snapshot::collect(&runner);
        let text = storage_to_fs(&runner, &snap, "hdisk2", &Thresholds::default()).plain();
        assert!(text.contains("┌─ VOLUME GROUP"));
        assert!(text.contains("190 / 200"));
        let row = text.lines().find(|l| l.trim_start().starts_with("fslv00")).unwrap();
        assert!(row.contains("jfs2") && row.contains("23.8G") && row.ends_with("/data"));
    }

    #[test]
    fn unused_disks_get_guidance() {
        let runner = fixtures::aix_system();
        let snap = Snapshot::collect(&runner);
        let remnant = storage_to_fs(&runner, &snap, "hdisk3", &Thresholds::default()).plain();
        assert!(remnant.contains("chpv -C hdisk3"));
        let clean = storage_to_fs(&runner, &snap, "hdisk4", &Thresholds::default()).plain();
        assert!(clean.contains("mkvg -y <vgname> hdisk4"));
        assert!(!clean.contains("VOLUME GROUP"));
    }

    #[test]
    fn filesystem_trace_stops_when_vg_query_is_empty() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        let runner = fixtures::with_trace_outputs(FakeRunner::new());
        let text = fs_to_storage(&runner, &snap, "/data", &Thresholds::default()).plain();
        assert!(text.contains("┌─ LOGICAL VOLUME"));
        assert!(text.contains("✖ lsvg returned nothing for datavg"));
        assert!(!text.contains("VOLUME GROUP"));
        assert!(!text.contains("PHYSICAL VOLUME"));
    }

    #[test]
    fn disk_in_varied_off_vg_is_an_inline_error() {
        let runner = fixtures::with_trace_outputs(
            FakeRunner::new()
                .with("lsvg", "datavg\n")
                .with("lspv", "hdisk2          00f6db0a99887766                    datavg          active\n"),
        );
        let snap = Snapshot::collect(&runner);
        let text = storage_to_fs(&runner, &snap, "hdisk2", &Thresholds::default()).plain();
        assert!(text.contains("┌─ PHYSICAL VOLUME"));
        assert!(text.contains("✖ lsvg returned nothing for datavg"));
        assert!(!text.contains("VOLUME GROUP"));
        assert!(!text.contains("fslv00"));
    }
}
