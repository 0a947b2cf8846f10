pub mod df;
pub mod errpt;
pub mod iostat;
pub mod labels;
pub mod lslv;
pub mod lspath;
pub mod lsps;
pub mod lspv;
pub mod lsvg;
pub mod lun;
pub mod runner;

use crate::models::activity::{DiskIo, ErrlogEntry};
use crate::models::filesystem::Filesystem;
use crate::models::volume::{LogicalVolume, PagingSpace, PathEntry, PhysicalVolume, VolumeGroup};
use runner::CommandRunner;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Everything one refresh cycle learned about the system's storage.
/// Rebuilt from scratch every time; never patched in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub collected_at: String,
    pub hostname:     String,
    pub vgs:          Vec<VolumeGroup>,
    pub lvs:          Vec<LogicalVolume>,
    pub pvs:          Vec<PhysicalVolume>,
    pub filesystems:  Vec<Filesystem>,
    pub paging:       Vec<PagingSpace>,
    pub paths:        Vec<PathEntry>,
    pub errors:       Vec<ErrlogEntry>,
    pub disk_io:      Vec<DiskIo>,
    /// Commands that failed or were missing during this collection.
    pub command_failures: usize,
}

impl Snapshot {
    /// Run every inventory command once, in sequence.
    pub fn collect(runner: &dyn CommandRunner) -> Self {
        let started = Instant::now();
        let failures_before = runner.failure_count();

        let vg_names = lsvg::read_vg_names(runner);
        let vgs: Vec<VolumeGroup> = vg_names.iter().map(|n| lsvg::read_vg(runner, n)).collect();
        let lvs: Vec<LogicalVolume> = vg_names.iter().flat_map(|n| lsvg::read_lvs(runner, n)).collect();
        let paths = lspath::read_paths(runner);
        let pvs = collect_pvs(runner, &vg_names, &paths);

        let snap = Snapshot {
            collected_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            hostname:     runner.run("hostname", &[]).trim().to_string(),
            filesystems:  df::read_filesystems(runner),
            paging:       lsps::read_paging(runner),
            errors:       errpt::read_hardware_errors(runner),
            disk_io:      iostat::read_disk_io(runner),
            vgs,
            lvs,
            pvs,
            paths,
            command_failures: runner.failure_count().saturating_sub(failures_before),
        };

        info!(
            vgs = snap.vgs.len(),
            pvs = snap.pvs.len(),
            lvs = snap.lvs.len(),
            filesystems = snap.filesystems.len(),
            failures = snap.command_failures,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "storage snapshot collected"
        );
        snap
    }

    pub fn vg(&self, name: &str) -> Option<&VolumeGroup> {
        self.vgs.iter().find(|v| v.name == name)
    }

    pub fn pv(&self, name: &str) -> Option<&PhysicalVolume> {
        self.pvs.iter().find(|p| p.name == name)
    }

    pub fn pvs_in<'a>(&'a self, vg: &'a str) -> impl Iterator<Item = &'a PhysicalVolume> + 'a {
        self.pvs.iter().filter(move |p| p.vg.as_deref() == Some(vg))
    }

    pub fn lvs_in<'a>(&'a self, vg: &'a str) -> impl Iterator<Item = &'a LogicalVolume> + 'a {
        self.lvs.iter().filter(move |l| l.vg == vg)
    }

    pub fn unused_pvs(&self) -> impl Iterator<Item = &PhysicalVolume> {
        self.pvs.iter().filter(|p| p.is_unused())
    }

    pub fn filesystem(&self, mount: &str) -> Option<&Filesystem> {
        self.filesystems.iter().find(|f| f.mount == mount)
    }
}

/// `lspv` rows merged with VG membership counts (`lsvg -p`), MPIO paths,
/// LUN identity, and raw size for disks outside any VG.
fn collect_pvs(runner: &dyn CommandRunner, vg_names: &[String], paths: &[PathEntry]) -> Vec<PhysicalVolume> {
    let members: Vec<lsvg::VgDisk> = vg_names.iter().flat_map(|n| lsvg::read_vg_disks(runner, n)).collect();

    lspv::read_lspv(runner)
        .into_iter()
        .map(|row| {
            let mut pv = PhysicalVolume {
                name:  row.name,
                pvid:  row.pvid,
                vg:    row.vg,
                state: row.state,
                ..Default::default()
            };
            if let Some(m) = members.iter().find(|m| m.name == pv.name) {
                pv.total_pps = m.total_pps;
                pv.free_pps  = m.free_pps;
                if pv.state.is_empty() { pv.state = m.state.clone(); }
            }
            pv.paths = paths.iter().filter(|p| p.device == pv.name).cloned().collect();
            pv.lun = lun::read_lun(runner, &pv.name);
            if pv.is_unused() {
                pv.size_mb = lun::read_disk_size(runner, &pv.name);
            }
            debug!(disk = %pv.name, vg = ?pv.vg, paths = pv.paths.len(), "disk merged");
            pv
        })
        .collect()
}

#[cfg(test)]
pub mod fixtures {
    use super::runner::fake::FakeRunner;

    /// A small two-VG system: mirrored rootvg, datavg near full, one
    /// failed path, one unused disk with an old PVID and one clean disk.
    pub fn aix_system() -> FakeRunner {
        FakeRunner::new()
            .with("hostname", "aixprod01\n")
            .with("lsvg", "rootvg\ndatavg\n")
            .with("lsvg rootvg", "\
VOLUME GROUP:       rootvg                   VG IDENTIFIER:  00f6db0a00004c000000016a1b2c3d4e
VG STATE:           active                   PP SIZE:        64 megabyte(s)
VG PERMISSION:      read/write               TOTAL PPs:      1598 (102272 megabytes)
MAX LVs:            256                      FREE PPs:       1118 (71552 megabytes)
LVs:                4                        USED PPs:       480 (30720 megabytes)
OPEN LVs:           4                        QUORUM:         1 (Disabled)
TOTAL PVs:          2                        VG DESCRIPTORS: 3
STALE PVs:          0                        STALE PPs:      0
ACTIVE PVs:         2                        AUTO ON:        yes
")
            .with("lsvg datavg", "\
VOLUME GROUP:       datavg                   VG IDENTIFIER:  00f6db0a00004c000000016a1b2c9999
VG STATE:           active                   PP SIZE:        128 megabyte(s)
VG PERMISSION:      read/write               TOTAL PPs:      200 (25600 megabytes)
MAX LVs:            256                      FREE PPs:       10 (1280 megabytes)
LVs:                1                        USED PPs:       190 (24320 megabytes)
OPEN LVs:           1                        QUORUM:         2 (Enabled)
TOTAL PVs:          1                        VG DESCRIPTORS: 2
STALE PVs:          0                        STALE PPs:      4
ACTIVE PVs:         1                        AUTO ON:        yes
")
            .with("lsvg -l rootvg", "\
rootvg:
LV NAME             TYPE       LPs     PPs     PVs  LV STATE      MOUNT POINT
hd5                 boot       1       2       2    closed/syncd  N/A
hd6                 paging     8       16      2    open/syncd    N/A
hd4                 jfs2       8       16      2    open/syncd    /
hd2                 jfs2       40      40      1    open/syncd    /usr
")
            .with("lsvg -l datavg", "\
datavg:
LV NAME             TYPE       LPs     PPs     PVs  LV STATE      MOUNT POINT
fslv00              jfs2       190     190     1    open/stale    /data
")
            .with("lsvg -p rootvg", "\
rootvg:
PV_NAME           PV STATE          TOTAL PPs   FREE PPs    FREE DISTRIBUTION
hdisk0            active            799         559         159..100..100..100..100
hdisk1            active            799         559         159..100..100..100..100
")
            .with("lsvg -p datavg", "\
datavg:
PV_NAME           PV STATE          TOTAL PPs   FREE PPs    FREE DISTRIBUTION
hdisk2            active            200         10          00..00..00..00..10
")
            .with("lspv", "\
hdisk0          00f6db0a1b2c3d4e                    rootvg          active
hdisk1          00f6db0a1b2c3d4f                    rootvg          active
hdisk2          00f6db0a99887766                    datavg          active
hdisk3          00f6db0a55554444                    None
hdisk4          none                                None
")
            .with("lspath", "\
Enabled hdisk0 vscsi0
Enabled hdisk1 vscsi1
Enabled hdisk2 fscsi0
Failed  hdisk2 fscsi1
")
            .with("lsattr -El hdisk2", "\
pvid            00f6db0a99887766                   Physical volume identifier       False
unique_id       3321360050768AB00000000000001204214503IBMfcp Unique device identifier False
")
            .with("lsmpio -ql hdisk2", "\
Device:  hdisk2
              Vendor Id:  IBM
             Product Id:  2145
")
            .with("bootinfo -s hdisk3", "51200\n")
            .with("bootinfo -s hdisk4", "20480\n")
            .with("df -m", "\
Filesystem    MB blocks      Free %Used    Iused %Iused Mounted on
/dev/hd4         1024.00    512.00   50%     9854    13% /
/dev/hd2         5120.00    768.00   85%    40000    20% /usr
/dev/fslv00     24320.00   1216.00   95%      120     2% /data
nas01:/export/home  20480.00  18432.00   10%        -     -  /home/shared
")
            .with("lsps -a", "\
Page Space      Physical Volume   Volume Group    Size %Used   Active    Auto    Type   Chksum
hd6             hdisk0            rootvg         512MB     4     yes     yes      lv       0
")
            .with("errpt -d H", "\
IDENTIFIER TIMESTAMP  T C RESOURCE_NAME  DESCRIPTION
DCB47997   0115103024 T H hdisk2         DISK OPERATION ERROR
DCB47997   0115093024 T H hdisk2         DISK OPERATION ERROR
4B436A3D   0114090124 T H fscsi1         LINK ERROR
")
            .with("iostat -d 1 1", "\
Disks:                     % tm_act     Kbps      tps    Kb_read   Kb_wrtn
hdisk0                       3.0      40.0       5.0         20        20
hdisk2                      88.0    9000.0     600.0       8000      1000
")
    }

    /// `aix_system` plus the per-object queries a trace of hdisk2 or
    /// /data issues.
    pub fn with_trace_outputs(r: FakeRunner) -> FakeRunner {
        r.with("lslv fslv00", "\
LOGICAL VOLUME:     fslv00                 VOLUME GROUP:   datavg
LV IDENTIFIER:      00f6db0a00004c000000016a1b2c9999.1 PERMISSION:     read/write
VG STATE:           active/complete        LV STATE:       opened/stale
TYPE:               jfs2                   WRITE VERIFY:   off
MAX LPs:            512                    PP SIZE:        128 megabyte(s)
COPIES:             1                      SCHED POLICY:   parallel
LPs:                190                    PPs:            190
MOUNT POINT:        /data                  LABEL:          /data
")
        .with("lslv -m fslv00", "\
fslv00:/data
LP    PP1  PV1               PP2  PV2               PP3  PV3
0001  0001 hdisk2
0002  0002 hdisk2
")
        .with("lspath -l hdisk2", "Enabled hdisk2 fscsi0\nFailed hdisk2 fscsi1\n")
        .with("lspv hdisk2", "\
PHYSICAL VOLUME:    hdisk2                   VOLUME GROUP:     datavg
PV IDENTIFIER:      00f6db0a99887766 VG IDENTIFIER     00f6db0a00004c000000016a1b2c9999
PV STATE:           active
STALE PARTITIONS:   0                        ALLOCATABLE:      yes
PP SIZE:            128 megabyte(s)          LOGICAL VOLUMES:  1
TOTAL PPs:          200 (25600 megabytes)    VG DESCRIPTORS:   2
FREE PPs:           10 (1280 megabytes)      HOT SPARE:        no
USED PPs:           190 (24320 megabytes)    MAX REQUEST:      256 kilobytes
")
        .with("lspv -l hdisk2", "\
hdisk2:
LV NAME               LPs     PPs     DISTRIBUTION          MOUNT POINT
fslv00                190     190     40..40..40..40..30    /data
")
    }
}
