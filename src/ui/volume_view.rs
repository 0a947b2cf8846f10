use crate::collectors::Snapshot;
use crate::config::Thresholds;
use crate::ui::doc::{bar, Doc, DocLine, Tone};
use crate::util::human::{human_size, pp_size};
use crate::util::metrics::classify;

// ── Volume group details (page 2) ─────────────────────────────────────

pub fn compose_vgs(snap: &Snapshot, thr: &Thresholds) -> Doc {
    let mut doc = Doc::new();
    doc.section("VOLUME GROUP DETAILS");
    doc.blank();
    if snap.vgs.is_empty() {
        doc.line(Tone::Dim, "  (no volume groups)");
    }

    for vg in &snap.vgs {
        let pct = vg.used_pct();
        let state_tone = if vg.is_active() { Tone::Ok } else { Tone::Crit };
        let (quorum, quorum_tone) = match vg.quorum {
            Some(true)  => ("Enabled", Tone::Ok),
            Some(false) => ("Disabled", Tone::Warn),
            None        => ("-", Tone::Dim),
        };

        doc.push(
            DocLine::text(Tone::Accent, format!("┌─ {} ", vg.name))
                .seg(Tone::Dim, "State: ").seg(state_tone, vg.state.clone())
                .seg(Tone::Dim, format!("  PP: {}MB  Quorum: ", vg.pp_size_mb))
                .seg(quorum_tone, quorum),
        );
        doc.push(DocLine::text(Tone::Accent, "│ ").seg(Tone::Text, format!(
            "PPs  total {}  used {}  free {}   ({} / {})",
            vg.total_pps, vg.used_pps, vg.free_pps,
            pp_size(vg.used_pps, vg.pp_size_mb), human_size(vg.size_mb()),
        )));
        if vg.stale_pps > 0 {
            doc.push(DocLine::text(Tone::Accent, "│ ").seg(Tone::Crit, format!("{} stale PPs", vg.stale_pps)));
        }
        let mut l = DocLine::text(Tone::Accent, "│ ");
        bar(&mut l, pct, 40, classify(pct, thr.warn_pct, thr.crit_pct));
        doc.push(l);

        doc.push(DocLine::text(Tone::Accent, "│"));
        doc.push(DocLine::text(Tone::Accent, "│ ").seg(Tone::Dim,
            format!("{:<10} {:<10} {:>6} {:>6}  {}", "DISK", "STATE", "USED", "TOTAL", "USAGE")));
        for pv in snap.pvs_in(&vg.name) {
            let dot = if pv.state.is_empty() || pv.state == "active" { Tone::Ok } else { Tone::Crit };
            let ppct = pv.used_pct();
            let mut l = DocLine::text(Tone::Accent, "│ ")
                .seg(dot, "● ")
                .seg(Tone::Text, format!("{:<8} {:<10} {:>6} {:>6}  ",
                    pv.name, pv.state, pv.used_pps(), pv.total_pps));
            bar(&mut l, ppct, 20, classify(ppct, thr.warn_pct, thr.crit_pct));
            doc.push(l);
        }
        doc.push(DocLine::text(Tone::Accent, format!("└{}", "─".repeat(60))));
        doc.blank();
    }
    doc
}

// ── Logical volumes (page 4) ──────────────────────────────────────────

pub fn compose_lvs(snap: &Snapshot) -> Doc {
    let mut doc = Doc::new();
    doc.section("LOGICAL VOLUMES");
    doc.blank();
    doc.line(Tone::Dim, format!("  {:<15} {:<10} {:<8} {:>6} {:>6}  {:<14} {}",
        "LV", "VG", "TYPE", "LPs", "PPs", "STATE", "MOUNT"));
    doc.line(Tone::Dim, format!("  {}", "─".repeat(76)));
    if snap.lvs.is_empty() {
        doc.line(Tone::Dim, "  (no logical volumes)");
    }
    for lv in &snap.lvs {
        let state_tone = if lv.is_stale() { Tone::Crit } else if lv.is_synced() { Tone::Ok } else { Tone::Warn };
        doc.push(
            DocLine::text(Tone::Text, format!("  {:<15} {:<10} {:<8} {:>6} {:>6}  ",
                lv.name, lv.vg, lv.lv_type, lv.lps, lv.pps))
                .seg(state_tone, format!("{:<14}", lv.state))
                .seg(Tone::Text, format!(" {}", lv.mount.as_deref().unwrap_or("N/A"))),
        );
    }
    doc
}

// ── Mirror status (page 8) ────────────────────────────────────────────

pub fn compose_mirrors(snap: &Snapshot) -> Doc {
    let mut doc = Doc::new();
    doc.section("MIRROR STATUS");
    doc.blank();

    for vg in &snap.vgs {
        doc.line(Tone::Accent, vg.name.clone());
        for lv in snap.lvs_in(&vg.name) {
            let mirror = lv.mirror();
            let icon_tone = if lv.copies() > 1 { Tone::Ok } else { Tone::Dim };
            let state_tone = if lv.is_stale() { Tone::Crit } else { Tone::Ok };
            doc.push(
                DocLine::text(Tone::Text, "  ")
                    .seg(icon_tone, mirror.icon())
                    .seg(Tone::Text, format!(" {:<15} {:<6} ", lv.name, mirror.label()))
                    .seg(state_tone, lv.state.clone()),
            );
        }
        doc.blank();
    }
    doc.line(Tone::Dim, "Legend: ○=single ◐=2-way mirror ●=3-way mirror");
    doc
}
