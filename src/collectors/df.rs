use crate::collectors::runner::CommandRunner;
use crate::models::filesystem::{Filesystem, FsKind};
use crate::util::human::{parse_mb, parse_percent};

/// Column layout of `df -m` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// AIX: Filesystem  MB blocks  Free  %Used  Iused  %Iused  Mounted on
    Native,
    /// GNU coreutils: Filesystem  1M-blocks  Used  Available  Use%  Mounted on
    Gnu,
}

impl Dialect {
    /// Detected from the header line alone.
    pub fn detect(text: &str) -> Self {
        match text.lines().next() {
            Some(header) if header.contains("Available") => Dialect::Gnu,
            _ => Dialect::Native,
        }
    }

    fn min_fields(&self) -> usize {
        match self {
            Dialect::Native => 7,
            Dialect::Gnu    => 6,
        }
    }
}

/// Local (`/dev/...`) and network (`host:/path`) filesystems.
pub fn read_filesystems(runner: &dyn CommandRunner) -> Vec<Filesystem> {
    parse_df(&runner.run("df", &["-m"]))
}

pub fn parse_df(text: &str) -> Vec<Filesystem> {
    let dialect = Dialect::detect(text);
    text.lines()
        .filter_map(|line| parse_line(line, dialect))
        .collect()
}

fn parse_line(line: &str, dialect: Dialect) -> Option<Filesystem> {
    let f: Vec<&str> = line.split_whitespace().collect();
    let device = *f.first()?;

    let is_local   = device.starts_with("/dev/");
    let is_network = device.contains(':');
    if !is_local && !is_network { return None; }
    if f.len() < dialect.min_fields() { return None; }

    let kind = if is_network { FsKind::Network } else { FsKind::Local };
    let (size_mb, free_mb, pct, mount) = match dialect {
        Dialect::Native => (parse_mb(f[1]), parse_mb(f[2]), f[3], f[6]),
        Dialect::Gnu => {
            let size = parse_mb(f[1]);
            let used = parse_mb(f[2]);
            (size, size - used, f[4], f[5])
        }
    };

    Some(Filesystem {
        device: device.to_string(),
        mount: mount.to_string(),
        size_mb,
        free_mb,
        used_pct: parse_percent(pct),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATIVE: &str = "\
Filesystem    MB blocks      Free %Used    Iused %Iused Mounted on
/dev/hd4         512.00    301.45   42%     9854    13% /
/dev/fslv00  10240  5120  50%  120  2%  /data
/proc                 -         -    -          -     -  /proc
nas01:/export/home  20480.00  2048.00   90%        -     -  /home/shared
";

    #[test]
    fn native_line_fields() {
        let fs = parse_df(NATIVE);
        assert_eq!(fs.len(), 3);
        let data = &fs[1];
        assert_eq!(data.size_mb, 10240.0);
        assert_eq!(data.free_mb, 5120.0);
        assert_eq!(data.used_pct, 50);
        assert_eq!(data.mount, "/data");
        assert_eq!(data.kind, FsKind::Local);
    }

    #[test]
    fn network_mounts_are_kept_pseudo_filesystems_are_not() {
        let fs = parse_df(NATIVE);
        assert!(fs.iter().all(|f| f.mount != "/proc"));
        assert_eq!(fs[2].kind, FsKind::Network);
        assert_eq!(fs[2].mount, "/home/shared");
        assert_eq!(fs[2].used_pct, 90);
    }

    #[test]
    fn gnu_line_computes_free_from_used() {
        let text = "\
Filesystem     1M-blocks  Used Available Use% Mounted on
/dev/sda1  10240  5120  5120  50%  /data
";
        assert_eq!(Dialect::detect(text), Dialect::Gnu);
        let fs = parse_df(text);
        assert_eq!(fs.len(), 1);
        assert_eq!(fs[0].size_mb, 10240.0);
        assert_eq!(fs[0].free_mb, 5120.0);
        assert_eq!(fs[0].used_pct, 50);
        assert_eq!(fs[0].mount, "/data");
    }

    #[test]
    fn short_lines_do_not_abort_parsing() {
        let text = "\
Filesystem    MB blocks      Free %Used    Iused %Iused Mounted on
/dev/hd2   4096  1024
/dev/hd3   not-a-number  x  y%  1  1%  /tmp
/dev/hd1   1024  512  50%  10  1%  /home
";
        let fs = parse_df(text);
        assert_eq!(fs.len(), 2);
        assert_eq!(fs[0].mount, "/tmp");
        assert_eq!(fs[0].size_mb, 0.0);
        assert_eq!(fs[0].used_pct, 0);
        assert_eq!(fs[1].mount, "/home");
    }

    #[test]
    fn empty_output_is_empty() {
        assert!(parse_df("").is_empty());
    }
}
