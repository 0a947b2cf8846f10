use crate::collectors::labels::{self, cell, Setter};
use crate::collectors::runner::CommandRunner;
use crate::models::volume::LunInfo;
use crate::util::human::parse_mb;

/// PVID and LUN identity of a disk: `lsattr -El` plus `lsmpio -ql`.
pub fn read_lun(runner: &dyn CommandRunner, disk: &str) -> LunInfo {
    let mut lun = LunInfo::default();
    parse_lsattr(&runner.run("lsattr", &["-El", disk]), &mut lun);
    parse_lsmpio(&runner.run("lsmpio", &["-ql", disk]), &mut lun);
    lun
}

/// Raw disk capacity in MB from `bootinfo -s`.
pub fn read_disk_size(runner: &dyn CommandRunner, disk: &str) -> Option<f64> {
    runner.run("bootinfo", &["-s", disk])
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(parse_mb)
}

/// attribute  value  description  user_settable
pub fn parse_lsattr(text: &str, lun: &mut LunInfo) {
    for line in text.lines() {
        let f: Vec<&str> = line.split_whitespace().collect();
        if f.len() < 2 { continue; }
        match f[0] {
            "pvid"      => lun.pvid = f[1].to_string(),
            "unique_id" => lun.unique_id = f[1].to_string(),
            _ => {}
        }
    }
}

const MPIO_LABELS: &[(&str, Setter<LunInfo>)] = &[
    ("Device:",        labels::ignore),
    ("Vendor Id:",     |l: &mut LunInfo, v: &str| l.vendor = cell(v).to_string()),
    ("Product Id:",    |l: &mut LunInfo, v: &str| l.product = cell(v).to_string()),
    ("Revision:",      labels::ignore),
    ("Capacity:",      labels::ignore),
    ("Volume Serial:", labels::ignore),
];

pub fn parse_lsmpio(text: &str, lun: &mut LunInfo) {
    labels::apply(MPIO_LABELS, text, lun);
}
