use crate::collectors::runner::CommandRunner;
use crate::models::volume::PathEntry;

/// Every MPIO path on the system.
pub fn read_paths(runner: &dyn CommandRunner) -> Vec<PathEntry> {
    parse_paths(&runner.run("lspath", &[]))
}

/// Paths of a single disk.
pub fn read_disk_paths(runner: &dyn CommandRunner, disk: &str) -> Vec<PathEntry> {
    parse_paths(&runner.run("lspath", &["-l", disk]))
}

/// status  device  parent
pub fn parse_paths(text: &str) -> Vec<PathEntry> {
    text.lines()
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 2 { return None; }
            Some(PathEntry {
                status: f[0].to_string(),
                device: f[1].to_string(),
                parent: f.get(2).map(|s| s.to_string()).unwrap_or_default(),
            })
        })
        .collect()
}
