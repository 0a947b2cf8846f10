use crate::util::metrics::{mirror_copies, used_percent, MirrorLevel};
use serde::Serialize;

// ── Volume group ─────────────────────────────────────────────────────

/// One volume group as reported by `lsvg <vg>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumeGroup {
    pub name:        String,
    pub state:       String,   // "active", "inactive", ...
    pub pp_size_mb:  u64,
    pub total_pps:   u64,
    pub used_pps:    u64,
    pub free_pps:    u64,
    /// `None` until a `QUORUM:` line is seen (e.g. VG not varied on).
    pub quorum:      Option<bool>,
    pub lv_count:    u64,
    pub pv_count:    u64,
    pub stale_pps:   u64,
}

impl VolumeGroup {
    pub fn used_pct(&self) -> u32 { used_percent(self.used_pps as i64, self.total_pps as i64) }
    pub fn is_active(&self) -> bool { self.state == "active" }
    pub fn size_mb(&self) -> f64 { (self.total_pps * self.pp_size_mb) as f64 }
    pub fn free_mb(&self) -> f64 { (self.free_pps * self.pp_size_mb) as f64 }
}

// ── Physical volume ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEntry {
    pub status: String,   // "Enabled", "Failed", "Missing", ...
    pub device: String,
    pub parent: String,   // adapter, e.g. "fscsi0"
}

impl PathEntry {
    pub fn is_enabled(&self) -> bool { self.status == "Enabled" }
}

/// Identification of the LUN behind a disk (`lsattr -El`, `lsmpio -ql`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LunInfo {
    pub pvid:      String,
    pub unique_id: String,
    pub vendor:    String,
    pub product:   String,
}

impl LunInfo {
    /// "vendor product", or "(virtual)" when the disk reports neither.
    pub fn model(&self) -> String {
        let s = format!("{} {}", self.vendor, self.product);
        if s.trim().is_empty() { "(virtual)".to_string() } else { s.trim().to_string() }
    }

    /// Best identifier for cross-reference cards: unique id, else vendor/product.
    pub fn lun_id(&self) -> String {
        if !self.unique_id.is_empty() { return self.unique_id.clone(); }
        let s = format!("{} {}", self.vendor, self.product);
        if s.trim().is_empty() { "(virtual disk)".to_string() } else { s.trim().to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhysicalVolume {
    pub name:      String,           // "hdisk0"
    pub pvid:      String,           // "none" when unset
    pub vg:        Option<String>,   // None when lspv reports "None"
    pub state:     String,
    pub total_pps: u64,
    pub free_pps:  u64,
    pub paths:     Vec<PathEntry>,
    pub lun:       LunInfo,
    /// Raw capacity from `bootinfo -s`, collected for unused disks.
    pub size_mb:   Option<f64>,
}

impl PhysicalVolume {
    pub fn is_unused(&self) -> bool { self.vg.is_none() }

    pub fn has_pvid(&self) -> bool {
        !self.pvid.is_empty() && self.pvid != "none"
    }

    /// Unused disk still carrying a PVID: old VGDA left behind.
    pub fn has_remnants(&self) -> bool { self.is_unused() && self.has_pvid() }

    pub fn used_pps(&self) -> u64 { self.total_pps.saturating_sub(self.free_pps) }

    pub fn used_pct(&self) -> u32 { used_percent(self.used_pps() as i64, self.total_pps as i64) }

    pub fn failed_paths(&self) -> usize { self.paths.iter().filter(|p| !p.is_enabled()).count() }
}

// ── Logical volume ───────────────────────────────────────────────────

/// One row of `lsvg -l <vg>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogicalVolume {
    pub name:    String,
    pub vg:      String,
    pub lv_type: String,
    pub lps:     u64,
    pub pps:     u64,
    pub pv_count: u64,
    pub state:   String,           // "open/syncd", "open/stale", ...
    pub mount:   Option<String>,   // None for "N/A"
}

impl LogicalVolume {
    pub fn copies(&self) -> u32 { mirror_copies(self.pps, self.lps) }
    pub fn mirror(&self) -> MirrorLevel { MirrorLevel::from_copies(self.copies()) }
    pub fn is_stale(&self) -> bool { self.state.to_lowercase().contains("stale") }
    pub fn is_synced(&self) -> bool { self.state.contains("syncd") }
}

// ── Paging space ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PagingSpace {
    pub name:     String,
    pub pv:       String,
    pub vg:       String,
    pub size_mb:  f64,
    pub used_pct: u32,
}
