use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FsKind {
    Local,
    Network,
}

/// One mounted filesystem as reported by `df -m`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filesystem {
    pub device:   String,   // "/dev/fslv00" or "server:/export"
    pub mount:    String,
    pub size_mb:  f64,
    pub free_mb:  f64,
    pub used_pct: u32,
    pub kind:     FsKind,
}

impl Filesystem {
    pub fn type_label(&self) -> &'static str {
        match self.kind {
            FsKind::Local   => "jfs2",
            FsKind::Network => "nfs",
        }
    }

    pub fn is_network(&self) -> bool { self.kind == FsKind::Network }

    /// Logical volume name behind a local device ("fslv00" from "/dev/fslv00").
    pub fn lv_name(&self) -> Option<&str> {
        if self.is_network() { return None; }
        self.device.strip_prefix("/dev/")
    }

    /// ("server", "/export") for a network mount.
    pub fn nfs_parts(&self) -> Option<(&str, &str)> {
        if !self.is_network() { return None; }
        self.device.split_once(':')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs(device: &str, kind: FsKind) -> Filesystem {
        Filesystem { device: device.into(), mount: "/x".into(), size_mb: 1.0, free_mb: 1.0, used_pct: 0, kind }
    }

    #[test]
    fn local_device_maps_to_lv() {
        assert_eq!(fs("/dev/fslv00", FsKind::Local).lv_name(), Some("fslv00"));
        assert_eq!(fs("/dev/fslv00", FsKind::Local).nfs_parts(), None);
    }

    #[test]
    fn network_device_splits_on_first_colon() {
        let f = fs("nas01:/export/home:v2", FsKind::Network);
        assert_eq!(f.nfs_parts(), Some(("nas01", "/export/home:v2")));
        assert_eq!(f.lv_name(), None);
        assert_eq!(f.type_label(), "nfs");
    }
}
