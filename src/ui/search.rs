use crate::collectors::Snapshot;
use crate::ui::doc::{Doc, DocLine, Tone};

/// Case-insensitive substring search across VGs, LVs, filesystems, disks
/// and paging spaces. LVs also match on mount point, disks on their VG.
pub fn compose(snap: &Snapshot, query: &str) -> Doc {
    let mut doc = Doc::new();
    doc.section(&format!("SEARCH: {}", query));
    doc.blank();

    let q = query.trim().to_lowercase();
    let hit = |s: &str| !q.is_empty() && s.to_lowercase().contains(&q);
    let mut found = 0usize;
    let mut row = |doc: &mut Doc, tag: &str, text: String| {
        found += 1;
        doc.push(DocLine::text(Tone::Accent, format!("  {:<4}", tag)).seg(Tone::Text, text));
    };

    for vg in snap.vgs.iter().filter(|v| hit(&v.name)) {
        row(&mut doc, "VG:", format!("{} ({}, {} LVs, {} disks)", vg.name, vg.state, vg.lv_count, vg.pv_count));
    }
    for lv in snap.lvs.iter().filter(|l| hit(&l.name) || l.mount.as_deref().is_some_and(hit)) {
        row(&mut doc, "LV:", format!("{} in {} → {}", lv.name, lv.vg, lv.mount.as_deref().unwrap_or("N/A")));
    }
    for fs in snap.filesystems.iter().filter(|f| hit(&f.mount) || hit(&f.device)) {
        row(&mut doc, "FS:", format!("{} on {} ({}%)", fs.mount, fs.device, fs.used_pct));
    }
    for pv in snap.pvs.iter().filter(|p| hit(&p.name) || hit(&p.pvid) || p.vg.as_deref().is_some_and(hit)) {
        row(&mut doc, "PV:", format!("{} pvid {} vg {}", pv.name, pv.pvid, pv.vg.as_deref().unwrap_or("None")));
    }
    for ps in snap.paging.iter().filter(|p| hit(&p.name)) {
        row(&mut doc, "PS:", format!("{} on {} in {} ({}% used)", ps.name, ps.pv, ps.vg, ps.used_pct));
    }

    doc.blank();
    if found == 0 {
        doc.line(Tone::Warn, "No results found");
    } else {
        doc.line(Tone::Ok, format!("Found {} result(s)", found));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::fixtures;

    #[test]
    fn matches_are_tagged_by_kind() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        let text = compose(&snap, "DATA").plain();
        assert!(text.contains("VG: datavg"));
        assert!(text.contains("LV: fslv00 in datavg → /data"));
        assert!(text.contains("FS: /data on /dev/fslv00"));
        assert!(text.contains("PV: hdisk2"));
        assert!(text.contains("Found 4 result(s)"));
    }

    #[test]
    fn pvid_is_searchable() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        let text = compose(&snap, "99887766").plain();
        assert!(text.contains("PV: hdisk2 pvid 00f6db0a99887766 vg datavg"));
        assert!(text.contains("Found 1 result(s)"));
    }

    #[test]
    fn nothing_found() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        assert!(compose(&snap, "zzz").plain().contains("No results found"));
        assert!(compose(&snap, "   ").plain().contains("No results found"));
    }

    #[test]
    fn lv_matches_on_mount_point() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        let text = compose(&snap, "/usr").plain();
        assert!(text.contains("LV: hd2 in rootvg → /usr"));
        assert!(text.contains("FS: /usr on /dev/hd2"));
        assert!(text.contains("Found 2 result(s)"));
    }

    #[test]
    fn disk_matches_on_volume_group() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        let text = compose(&snap, "rootvg").plain();
        assert!(text.contains("VG: rootvg"));
        assert!(text.contains("PV: hdisk0 pvid 00f6db0a1b2c3d4e vg rootvg"));
        assert!(text.contains("PV: hdisk1 pvid 00f6db0a1b2c3d4f vg rootvg"));
        assert!(!text.contains("hdisk3"));
        assert!(text.contains("Found 3 result(s)"));
    }

    #[test]
    fn paging_spaces_are_searchable() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        let text = compose(&snap, "hd6").plain();
        assert!(text.contains("PS: hd6 on hdisk0 in rootvg (4% used)"));
        assert!(text.contains("LV: hd6 in rootvg → N/A"));
        assert!(text.contains("Found 2 result(s)"));
    }
}
