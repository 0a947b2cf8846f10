//! Selectable lists for the disk → filesystem (5) and filesystem → disk (6)
//! pages. Row order matches `Snapshot::pvs` / `Snapshot::filesystems`, so
//! the list index is the lookup key for the drill-down.

use crate::collectors::Snapshot;
use crate::config::Thresholds;
use crate::ui::doc::{bar, Doc, DocLine, Tone};
use crate::ui::theme::Theme;
use crate::util::human::{human_size, truncate, truncate_left};
use crate::util::metrics::classify;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub const DISK_HEADER: &str = "  DISK      VG          STATE     PPs USED          PATHS  LUN";
pub const FS_HEADER:   &str = "  MOUNT                TYPE     SIZE     FREE  USAGE                  DEVICE";

pub fn disk_rows(snap: &Snapshot, thr: &Thresholds) -> Vec<DocLine> {
    snap.pvs
        .iter()
        .map(|pv| {
            let (icon, tone) = if !pv.is_unused() { ("●", Tone::Ok) }
                               else if pv.has_remnants() { ("◐", Tone::Remnant) }
                               else { ("○", Tone::Ok) };
            let failed = pv.failed_paths();
            let path_tone = if failed > 0 { Tone::Crit } else { Tone::Text };
            let paths = if pv.paths.is_empty() { "-".to_string() } else { format!("{}/{}", pv.paths.len() - failed, pv.paths.len()) };
            let mut l = DocLine::text(tone, format!("{} ", icon))
                .seg(Tone::Text, format!("{:<9} {:<11} {:<8} ",
                    pv.name, pv.vg.as_deref().unwrap_or("None"), if pv.state.is_empty() { "-" } else { &pv.state }));
            if pv.is_unused() {
                l.push(Tone::Dim, format!("{:<20}", pv.size_mb.map(human_size).unwrap_or_else(|| "unused".into())));
            } else {
                let pct = pv.used_pct();
                bar(&mut l, pct, 14, classify(pct, thr.warn_pct, thr.crit_pct));
            }
            l.push(path_tone, format!("  {:>5}", paths));
            l.push(Tone::Dim, format!("  {}", truncate(&pv.lun.lun_id(), 24)));
            l
        })
        .collect()
}

pub fn fs_rows(snap: &Snapshot, thr: &Thresholds) -> Vec<DocLine> {
    snap.filesystems
        .iter()
        .map(|fs| {
            let mut l = DocLine::text(Tone::Text, format!("{:<20} {:<4} {:>8} {:>8}  ",
                truncate_left(&fs.mount, 20), fs.type_label(), human_size(fs.size_mb), human_size(fs.free_mb)));
            bar(&mut l, fs.used_pct, 16, classify(fs.used_pct, thr.warn_pct, thr.crit_pct));
            l.push(Tone::Dim, format!("  {}", fs.device));
            l
        })
        .collect()
}

/// Plain page form of a list, for `--report` and export.
pub fn list_doc(title: &str, header: &str, rows: Vec<DocLine>) -> Doc {
    let mut doc = Doc::new();
    doc.section(title);
    doc.blank();
    doc.line(Tone::Dim, header);
    for r in rows {
        let mut line = DocLine::text(Tone::Text, "  ");
        line.segments.extend(r.segments);
        doc.push(line);
    }
    doc
}

pub fn render_list(
    f: &mut Frame,
    area: Rect,
    title: &str,
    header: &str,
    rows: &[DocLine],
    state: &mut ListState,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(format!(" {}  ({}) ", title, rows.len()), theme.title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    f.render_widget(Paragraph::new(Line::from(Span::styled(header.to_string(), theme.text_dim))), parts[0]);

    let items: Vec<ListItem> = rows
        .iter()
        .map(|r| ListItem::new(Line::from(
            r.segments.iter().map(|s| Span::styled(s.text.clone(), theme.tone(s.tone))).collect::<Vec<_>>(),
        )))
        .collect();

    let list = List::new(items)
        .highlight_style(theme.selected)
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, parts[1], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::fixtures;

    #[test]
    fn one_row_per_disk_and_filesystem() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        let thr = Thresholds::default();
        let disks = disk_rows(&snap, &thr);
        assert_eq!(disks.len(), snap.pvs.len());
        assert!(disks[2].plain().starts_with("● hdisk2    datavg"));
        assert!(disks[2].plain().contains("1/2"));
        assert!(disks[3].plain().starts_with("◐ hdisk3"));
        assert!(disks[4].plain().starts_with("○ hdisk4"));

        let fs = fs_rows(&snap, &thr);
        assert_eq!(fs.len(), snap.filesystems.len());
        assert!(fs[2].plain().starts_with("/data"));
        assert!(fs[2].plain().ends_with("/dev/fslv00"));
    }

    #[test]
    fn list_doc_has_header_and_rows() {
        let snap = Snapshot::collect(&fixtures::aix_system());
        let doc = list_doc("FILESYSTEMS", FS_HEADER, fs_rows(&snap, &Thresholds::default()));
        let text = doc.plain();
        assert!(text.starts_with("═══ FILESYSTEMS ═══\n\n  MOUNT"));
        assert_eq!(doc.len(), 3 + snap.filesystems.len());
    }
}
