use crate::collectors::labels::{self, cell, first_token, ignore, number, Setter};
use crate::collectors::runner::CommandRunner;

/// Attributes of one logical volume from `lslv <lv>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LvInfo {
    pub vg:      String,
    pub lv_type: String,
    pub state:   String,
    pub lps:     u64,
    pub pps:     u64,
    pub copies:  u64,
    pub mount:   Option<String>,
}

const LV_LABELS: &[(&str, Setter<LvInfo>)] = &[
    ("LOGICAL VOLUME:",  ignore),
    ("VOLUME GROUP:",    |lv: &mut LvInfo, v: &str| lv.vg = first_token(v).to_string()),
    ("LV IDENTIFIER:",   ignore),
    ("PERMISSION:",      ignore),
    ("VG STATE:",        ignore),
    ("LV STATE:",        |lv: &mut LvInfo, v: &str| lv.state = cell(v).to_string()),
    ("TYPE:",            |lv: &mut LvInfo, v: &str| lv.lv_type = first_token(v).to_string()),
    ("WRITE VERIFY:",    ignore),
    ("MAX LPs:",         ignore),
    ("PP SIZE:",         ignore),
    ("COPIES:",          |lv: &mut LvInfo, v: &str| lv.copies = number(v)),
    ("SCHED POLICY:",    ignore),
    ("LPs:",             |lv: &mut LvInfo, v: &str| lv.lps = number(v)),
    ("PPs:",             |lv: &mut LvInfo, v: &str| lv.pps = number(v)),
    ("STALE PPs:",       ignore),
    ("BB POLICY:",       ignore),
    ("INTER-POLICY:",    ignore),
    ("RELOCATABLE:",     ignore),
    ("INTRA-POLICY:",    ignore),
    ("UPPER BOUND:",     ignore),
    ("MOUNT POINT:",     |lv: &mut LvInfo, v: &str| {
        let m = cell(v);
        lv.mount = if m.is_empty() || m == "N/A" { None } else { Some(m.to_string()) };
    }),
    ("LABEL:",           ignore),
    ("DEVICE UID:",      ignore),
    ("DEVICE GID:",      ignore),
    ("DEVICE PERMISSIONS:", ignore),
    ("MIRROR WRITE CONSISTENCY:", ignore),
    ("EACH LP COPY ON A SEPARATE PV ?:", ignore),
    ("Serialize IO ?:",  ignore),
    ("INFINITE RETRY:",  ignore),
    ("PREFERRED READ:",  ignore),
    ("DEVICESUBTYPE:",   ignore),
];

pub fn read_lv_info(runner: &dyn CommandRunner, lv: &str) -> LvInfo {
    parse_lv_info(&runner.run("lslv", &[lv]))
}

pub fn parse_lv_info(text: &str) -> LvInfo {
    let mut info = LvInfo::default();
    labels::apply(LV_LABELS, text, &mut info);
    info
}

pub fn read_lv_disks(runner: &dyn CommandRunner, lv: &str) -> Vec<String> {
    parse_lv_map(&runner.run("lslv", &["-m", lv]))
}

/// Disks holding any copy of the LV, in first-seen order, from `lslv -m`:
/// LP  PP1 PV1  [PP2 PV2  [PP3 PV3]]
pub fn parse_lv_map(text: &str) -> Vec<String> {
    let mut disks: Vec<String> = Vec::new();
    for line in text.lines() {
        let f: Vec<&str> = line.split_whitespace().collect();
        for pv in f.iter().skip(2).step_by(2) {
            if pv.starts_with("hdisk") && !disks.iter().any(|d| d == pv) {
                disks.push(pv.to_string());
            }
        }
    }
    disks
}

#[cfg(test)]
mod tests {
    use super::*;

    const LSLV_FSLV00: &str = "\
LOGICAL VOLUME:     fslv00                 VOLUME GROUP:   datavg
LV IDENTIFIER:      00f6db0a00004c000000015a1b2c3d4e.1 PERMISSION:     read/write
VG STATE:           active/complete        LV STATE:       opened/syncd
TYPE:               jfs2                   WRITE VERIFY:   off
MAX LPs:            512                    PP SIZE:        64 megabyte(s)
COPIES:             2                      SCHED POLICY:   parallel
LPs:                100                    PPs:            200
STALE PPs:          0                      BB POLICY:      relocatable
INTER-POLICY:       minimum                RELOCATABLE:    yes
INTRA-POLICY:       middle                 UPPER BOUND:    32
MOUNT POINT:        /data                  LABEL:          /data
MIRROR WRITE CONSISTENCY: on/ACTIVE
EACH LP COPY ON A SEPARATE PV ?: yes
Serialize IO ?:     NO
DEVICESUBTYPE:      DS_LVZ
";

    #[test]
    fn lv_block_is_parsed() {
        let lv = parse_lv_info(LSLV_FSLV00);
        assert_eq!(lv.vg, "datavg");
        assert_eq!(lv.lv_type, "jfs2");
        assert_eq!(lv.state, "opened/syncd");
        assert_eq!(lv.lps, 100);
        assert_eq!(lv.pps, 200);
        assert_eq!(lv.copies, 2);
        assert_eq!(lv.mount.as_deref(), Some("/data"));
    }

    #[test]
    fn unmounted_lv_has_no_mount() {
        let lv = parse_lv_info("MOUNT POINT:        N/A                    LABEL:          None\n");
        assert_eq!(lv.mount, None);
    }

    #[test]
    fn lv_map_collects_every_copy() {
        let text = "\
fslv00:/data
LP    PP1  PV1               PP2  PV2               PP3  PV3
0001  0113 hdisk1            0113 hdisk2
0002  0114 hdisk1            0114 hdisk2
0003  0001 hdisk3
";
        assert_eq!(parse_lv_map(text), vec!["hdisk1", "hdisk2", "hdisk3"]);
    }
}
