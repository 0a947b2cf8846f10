use crate::collectors::labels::{self, cell, first_token, ignore, number, Setter};
use crate::collectors::runner::CommandRunner;
use crate::util::human::parse_num;

// ── lspv ─────────────────────────────────────────────────────────────

/// One row of plain `lspv`: hdiskN  PVID  VG  [state]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LspvRow {
    pub name:  String,
    pub pvid:  String,
    pub vg:    Option<String>,
    pub state: String,
}

pub fn read_lspv(runner: &dyn CommandRunner) -> Vec<LspvRow> {
    parse_lspv(&runner.run("lspv", &[]))
}

pub fn parse_lspv(text: &str) -> Vec<LspvRow> {
    text.lines()
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 3 || !f[0].starts_with("hdisk") { return None; }
            Some(LspvRow {
                name:  f[0].to_string(),
                pvid:  f[1].to_string(),
                vg:    if f[2] == "None" { None } else { Some(f[2].to_string()) },
                state: f.get(3).map(|s| s.to_string()).unwrap_or_default(),
            })
        })
        .collect()
}

// ── lspv <pv> ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PvInfo {
    pub vg:        Option<String>,
    pub pvid:      String,
    pub state:     String,
    pub total_pps: u64,
    pub free_pps:  u64,
    pub used_pps:  u64,
}

const PV_LABELS: &[(&str, Setter<PvInfo>)] = &[
    ("PHYSICAL VOLUME:",   ignore),
    ("VOLUME GROUP:",      |pv: &mut PvInfo, v: &str| {
        let name = first_token(v);
        pv.vg = if name.is_empty() || name == "None" { None } else { Some(name.to_string()) };
    }),
    ("PV IDENTIFIER:",     |pv: &mut PvInfo, v: &str| pv.pvid = first_token(v).to_string()),
    ("VG IDENTIFIER",      ignore),
    ("PV STATE:",          |pv: &mut PvInfo, v: &str| pv.state = cell(v).to_string()),
    ("STALE PARTITIONS:",  ignore),
    ("ALLOCATABLE:",       ignore),
    ("PP SIZE:",           ignore),
    ("LOGICAL VOLUMES:",   ignore),
    ("TOTAL PPs:",         |pv: &mut PvInfo, v: &str| pv.total_pps = number(v)),
    ("VG DESCRIPTORS:",    ignore),
    ("FREE PPs:",          |pv: &mut PvInfo, v: &str| pv.free_pps = number(v)),
    ("HOT SPARE:",         ignore),
    ("USED PPs:",          |pv: &mut PvInfo, v: &str| pv.used_pps = number(v)),
    ("MAX REQUEST:",       ignore),
    ("FREE DISTRIBUTION:", ignore),
    ("USED DISTRIBUTION:", ignore),
    ("MIRROR POOL:",       ignore),
];

pub fn read_pv_info(runner: &dyn CommandRunner, pv: &str) -> PvInfo {
    parse_pv_info(&runner.run("lspv", &[pv]))
}

pub fn parse_pv_info(text: &str) -> PvInfo {
    let mut info = PvInfo::default();
    labels::apply(PV_LABELS, text, &mut info);
    if info.used_pps == 0 {
        info.used_pps = info.total_pps.saturating_sub(info.free_pps);
    }
    info
}

// ── lspv -l <pv> ─────────────────────────────────────────────────────

/// A logical volume with partitions on a given disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvLv {
    pub name:  String,
    pub lps:   u64,
    pub mount: Option<String>,
}

pub fn read_pv_lvs(runner: &dyn CommandRunner, pv: &str) -> Vec<PvLv> {
    parse_pv_lvs(&runner.run("lspv", &["-l", pv]))
}

/// LV NAME  LPs  PPs  DISTRIBUTION  MOUNT POINT, after a two-line header.
pub fn parse_pv_lvs(text: &str) -> Vec<PvLv> {
    text.lines()
        .skip(2)
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 2 { return None; }
            let mount = if f.len() >= 5 && f[4] != "N/A" { Some(f[4].to_string()) } else { None };
            Some(PvLv { name: f[0].to_string(), lps: parse_num(f[1]), mount })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lspv_marks_unassigned_disks() {
        let text = "\
hdisk0          00f6db0a1b2c3d4e                    rootvg          active
hdisk1          none                                None
hdisk2          00f6db0a99887766                    None
cd0             none                                None
hdisk3
";
        let rows = parse_lspv(text);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].vg.as_deref(), Some("rootvg"));
        assert_eq!(rows[0].state, "active");
        assert_eq!(rows[1].vg, None);
        assert_eq!(rows[1].pvid, "none");
        assert_eq!(rows[2].state, "");
    }

    #[test]
    fn pv_block_is_parsed() {
        let text = "\
PHYSICAL VOLUME:    hdisk1                   VOLUME GROUP:     datavg
PV IDENTIFIER:      00f6db0a99887766 VG IDENTIFIER     00f6db0a00004c00000001
PV STATE:           active
STALE PARTITIONS:   0                        ALLOCATABLE:      yes
PP SIZE:            64 megabyte(s)           LOGICAL VOLUMES:  3
TOTAL PPs:          399 (25536 megabytes)    VG DESCRIPTORS:   2
FREE PPs:           99 (6336 megabytes)      HOT SPARE:        no
USED PPs:           300 (19200 megabytes)    MAX REQUEST:      256 kilobytes
";
        let info = parse_pv_info(text);
        assert_eq!(info.vg.as_deref(), Some("datavg"));
        assert_eq!(info.pvid, "00f6db0a99887766");
        assert_eq!(info.state, "active");
        assert_eq!(info.total_pps, 399);
        assert_eq!(info.free_pps, 99);
        assert_eq!(info.used_pps, 300);
    }

    #[test]
    fn pv_block_for_unassigned_disk() {
        let info = parse_pv_info("PHYSICAL VOLUME:    hdisk5                   VOLUME GROUP:     None\n");
        assert_eq!(info.vg, None);
        assert_eq!(info.used_pps, 0);
    }

    #[test]
    fn pv_lv_listing() {
        let text = "\
hdisk1:
LV NAME               LPs     PPs     DISTRIBUTION          MOUNT POINT
fslv00                100     100     20..20..20..20..20    /data
loglv00               1       1       01..00..00..00..00    N/A
";
        let lvs = parse_pv_lvs(text);
        assert_eq!(lvs.len(), 2);
        assert_eq!(lvs[0].mount.as_deref(), Some("/data"));
        assert_eq!(lvs[0].lps, 100);
        assert_eq!(lvs[1].mount, None);
    }
}
