use crate::collectors::runner::CommandRunner;
use crate::models::volume::PagingSpace;
use crate::util::human::{parse_mb, parse_percent};

pub fn read_paging(runner: &dyn CommandRunner) -> Vec<PagingSpace> {
    parse_lsps(&runner.run("lsps", &["-a"]))
}

/// Page Space  Physical Volume  Volume Group  Size  %Used  Active  Auto  Type
pub fn parse_lsps(text: &str) -> Vec<PagingSpace> {
    text.lines()
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 5 { return None; }
            if !(f[0].starts_with("hd") || f[0].starts_with("paging")) { return None; }
            Some(PagingSpace {
                name:     f[0].to_string(),
                pv:       f[1].to_string(),
                vg:       f[2].to_string(),
                size_mb:  parse_mb(f[3]),
                used_pct: parse_percent(f[4]),
            })
        })
        .collect()
}
