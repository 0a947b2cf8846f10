use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Automatic refresh period in seconds (0 = refresh on `r` only)
    pub refresh_interval_sec: u64,
    /// Directory for exported reports. Empty = system temp dir.
    pub export_dir: String,
    /// Show the count of failed inventory commands in the header.
    pub show_command_errors: bool,
}

/// Usage percentages at which a VG, filesystem or paging space turns
/// yellow and red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub warn_pct: u32,
    pub crit_pct: u32,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { refresh_interval_sec: 0, export_dir: String::new(), show_command_errors: false }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { warn_pct: 85, crit_pct: 90 }
    }
}

impl Thresholds {
    /// Clamp both values to 100 and keep crit at or above warn.
    pub fn sanitized(self) -> Self {
        let warn_pct = self.warn_pct.min(100);
        let crit_pct = self.crit_pct.min(100).max(warn_pct);
        Self { warn_pct, crit_pct }
    }

    /// Apply `warn_threshold=` / `crit_threshold=` lines from a legacy rc file.
    /// Unparseable values are ignored.
    pub fn apply_rc(&mut self, text: &str) {
        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else { continue };
            let Ok(n) = value.trim().parse::<u32>() else {
                debug!(line, "ignoring malformed rc value");
                continue;
            };
            match key.trim() {
                "warn_threshold" => self.warn_pct = n,
                "crit_threshold" => self.crit_pct = n,
                _ => {}
            }
        }
    }
}

impl GeneralConfig {
    pub fn export_dir(&self) -> PathBuf {
        if self.export_dir.is_empty() { std::env::temp_dir() } else { PathBuf::from(&self.export_dir) }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        let mut cfg = Self::config_path().map(|p| Self::load_or_init(&p)).unwrap_or_default();
        if let Some(rc) = Self::legacy_rc_path() {
            if let Ok(text) = fs::read_to_string(&rc) {
                cfg.thresholds.apply_rc(&text);
            }
        }
        cfg.thresholds = cfg.thresholds.sanitized();
        cfg
    }

    /// Read `path`, writing defaults there if it does not exist yet.
    /// An unreadable or malformed file is left untouched.
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            if let Err(e) = write_defaults(path) {
                warn!(path = %path.display(), error = %e, "could not write default config");
            }
            return Config::default();
        }
        match Self::load_from(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unusable config, using defaults");
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&text)?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stgtui").join("stgtui.toml"))
    }

    pub fn legacy_rc_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".stgtuirc"))
    }
}

pub fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# stgtui configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stgtui").join("stgtui.toml");
        write_defaults(&path).unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.thresholds, Thresholds { warn_pct: 85, crit_pct: 90 });
        assert_eq!(cfg.general.refresh_interval_sec, 0);
    }

    #[test]
    fn partial_file_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "[thresholds]\nwarn_pct = 70\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.thresholds.warn_pct, 70);
        assert_eq!(cfg.thresholds.crit_pct, 90);
        assert!(!cfg.general.show_command_errors);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[thresholds\nwarn_pct = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn legacy_rc_overrides_and_skips_garbage() {
        let mut t = Thresholds::default();
        t.apply_rc("# comment\nwarn_threshold=75\ncrit_threshold=lots\nother=1\n");
        assert_eq!(t, Thresholds { warn_pct: 75, crit_pct: 90 });
    }

    #[test]
    fn sanitize_keeps_crit_above_warn() {
        let t = Thresholds { warn_pct: 95, crit_pct: 80 }.sanitized();
        assert_eq!(t, Thresholds { warn_pct: 95, crit_pct: 95 });
        let t = Thresholds { warn_pct: 150, crit_pct: 200 }.sanitized();
        assert_eq!(t, Thresholds { warn_pct: 100, crit_pct: 100 });
    }

    #[test]
    fn malformed_file_is_kept_and_defaults_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stgtui.toml");
        let broken = "[thresholds]\nwarn_pct = \"high\"\n";
        fs::write(&path, broken).unwrap();
        let cfg = Config::load_or_init(&path);
        assert_eq!(cfg.thresholds, Thresholds { warn_pct: 85, crit_pct: 90 });
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn missing_file_gets_defaults_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stgtui").join("stgtui.toml");
        let cfg = Config::load_or_init(&path);
        assert_eq!(cfg.thresholds, Thresholds::default());
        assert!(fs::read_to_string(&path).unwrap().starts_with("# stgtui configuration"));
        assert_eq!(Config::load_from(&path).unwrap().thresholds, Thresholds::default());
    }

    #[test]
    fn existing_file_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stgtui.toml");
        fs::write(&path, "[thresholds]\ncrit_pct = 95\n").unwrap();
        let cfg = Config::load_or_init(&path);
        assert_eq!(cfg.thresholds.crit_pct, 95);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[thresholds]\ncrit_pct = 95\n");
    }
}
