use crate::collectors::labels::{self, cell, first_token, ignore, number, Setter};
use crate::collectors::runner::CommandRunner;
use crate::models::volume::{LogicalVolume, VolumeGroup};
use crate::util::human::parse_num;

/// Names of varied-on and defined volume groups, one per line of `lsvg`.
pub fn read_vg_names(runner: &dyn CommandRunner) -> Vec<String> {
    parse_vg_names(&runner.run("lsvg", &[]))
}

pub fn read_vg(runner: &dyn CommandRunner, name: &str) -> VolumeGroup {
    parse_vg_info(name, &runner.run("lsvg", &[name]))
}

pub fn read_lvs(runner: &dyn CommandRunner, vg: &str) -> Vec<LogicalVolume> {
    parse_lv_table(vg, &runner.run("lsvg", &["-l", vg]))
}

pub fn read_vg_disks(runner: &dyn CommandRunner, vg: &str) -> Vec<VgDisk> {
    parse_vg_disks(&runner.run("lsvg", &["-p", vg]))
}

pub fn parse_vg_names(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|l| l.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

// ── lsvg <vg> ────────────────────────────────────────────────────────

const VG_LABELS: &[(&str, Setter<VolumeGroup>)] = &[
    ("VOLUME GROUP:",   ignore),
    ("VG IDENTIFIER:",  ignore),
    ("VG STATE:",       |vg: &mut VolumeGroup, v: &str| vg.state = first_token(v).to_string()),
    ("PP SIZE:",        |vg: &mut VolumeGroup, v: &str| vg.pp_size_mb = number(v)),
    ("VG PERMISSION:",  ignore),
    ("TOTAL PPs:",      |vg: &mut VolumeGroup, v: &str| vg.total_pps = number(v)),
    ("MAX LVs:",        ignore),
    ("FREE PPs:",       |vg: &mut VolumeGroup, v: &str| vg.free_pps = number(v)),
    ("LVs:",            |vg: &mut VolumeGroup, v: &str| vg.lv_count = number(v)),
    ("USED PPs:",       |vg: &mut VolumeGroup, v: &str| vg.used_pps = number(v)),
    ("OPEN LVs:",       ignore),
    ("QUORUM:",         |vg: &mut VolumeGroup, v: &str| vg.quorum = Some(cell(v).contains("Enabled"))),
    ("TOTAL PVs:",      |vg: &mut VolumeGroup, v: &str| vg.pv_count = number(v)),
    ("VG DESCRIPTORS:", ignore),
    ("STALE PVs:",      ignore),
    ("STALE PPs:",      |vg: &mut VolumeGroup, v: &str| vg.stale_pps = number(v)),
    ("ACTIVE PVs:",     ignore),
    ("AUTO ON:",        ignore),
    ("MAX PPs per VG:", ignore),
    ("MAX PPs per PV:", ignore),
    ("MAX PVs:",        ignore),
    ("LTG size (Dynamic):", ignore),
    ("AUTO SYNC:",      ignore),
    ("HOT SPARE:",      ignore),
    ("BB POLICY:",      ignore),
    ("PV RESTRICTION:", ignore),
    ("INFINITE RETRY:", ignore),
    ("DISK BLOCK SIZE:", ignore),
    ("CRITICAL VG:",    ignore),
    ("FS SYNC OPTION:", ignore),
    ("CRITICAL PVs:",   ignore),
];

pub fn parse_vg_info(name: &str, text: &str) -> VolumeGroup {
    let mut vg = VolumeGroup { name: name.to_string(), ..Default::default() };
    labels::apply(VG_LABELS, text, &mut vg);
    vg
}

// ── lsvg -l <vg> ─────────────────────────────────────────────────────

/// LV NAME  TYPE  LPs  PPs  PVs  LV STATE  MOUNT POINT, after a two-line header.
pub fn parse_lv_table(vg: &str, text: &str) -> Vec<LogicalVolume> {
    text.lines()
        .skip(2)
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 7 { return None; }
            Some(LogicalVolume {
                name:     f[0].to_string(),
                vg:       vg.to_string(),
                lv_type:  f[1].to_string(),
                lps:      parse_num(f[2]),
                pps:      parse_num(f[3]),
                pv_count: parse_num(f[4]),
                state:    f[5].to_string(),
                mount:    if f[6] == "N/A" { None } else { Some(f[6].to_string()) },
            })
        })
        .collect()
}

// ── lsvg -p <vg> ─────────────────────────────────────────────────────

/// One member disk of a volume group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VgDisk {
    pub name:      String,
    pub state:     String,
    pub total_pps: u64,
    pub free_pps:  u64,
}

/// PV_NAME  PV STATE  TOTAL PPs  FREE PPs  FREE DISTRIBUTION
pub fn parse_vg_disks(text: &str) -> Vec<VgDisk> {
    text.lines()
        .skip(2)
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 5 || !f[0].starts_with("hdisk") { return None; }
            Some(VgDisk {
                name:      f[0].to_string(),
                state:     f[1].to_string(),
                total_pps: parse_num(f[2]),
                free_pps:  parse_num(f[3]),
            })
        })
        .collect()
}
