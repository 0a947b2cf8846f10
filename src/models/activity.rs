use serde::Serialize;

/// Per-disk sample from `iostat -d`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskIo {
    pub disk:    String,
    pub tm_act:  f64,   // % of time the disk was busy
    pub kbps:    f64,
    pub tps:     f64,
    pub kb_read: u64,
    pub kb_wrtn: u64,
}

/// One summary line of `errpt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrlogEntry {
    pub identifier:  String,
    pub timestamp:   String,   // MMDDhhmmYY
    pub err_type:    String,   // P, T, U, I
    pub class:       String,   // H, S, O, U
    pub resource:    String,
    pub description: String,
}

impl ErrlogEntry {
    pub fn is_disk(&self) -> bool { self.resource.to_lowercase().starts_with("hdisk") }
}
