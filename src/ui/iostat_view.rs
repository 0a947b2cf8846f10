use crate::collectors::Snapshot;
use crate::ui::doc::{Doc, DocLine, Tone};
use crate::util::metrics::classify_activity;

pub fn compose(snap: &Snapshot) -> Doc {
    let mut doc = Doc::new();
    doc.section("DISK I/O STATISTICS");
    doc.line(Tone::Dim, format!("Sampled: {}", snap.collected_at));
    doc.blank();
    doc.line(Tone::Dim, format!("  {:<10} {:>8} {:>10} {:>8} {:>12} {:>12}",
        "DISK", "%TM_ACT", "KBPS", "TPS", "KB_READ", "KB_WRTN"));
    doc.line(Tone::Dim, format!("  {}", "─".repeat(66)));

    if snap.disk_io.is_empty() {
        doc.line(Tone::Dim, "  (no iostat data)");
    }
    for io in &snap.disk_io {
        doc.push(
            DocLine::text(Tone::Text, format!("  {:<10} ", io.disk))
                .seg(classify_activity(io.tm_act).into(), format!("{:>7.1}%", io.tm_act))
                .seg(Tone::Text, format!(" {:>10.1} {:>8.1} {:>12} {:>12}",
                    io.kbps, io.tps, io.kb_read, io.kb_wrtn)),
        );
    }
    doc.blank();
    doc.line(Tone::Dim, "Press r to take a new sample");
    doc
}
