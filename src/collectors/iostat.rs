use crate::collectors::runner::CommandRunner;
use crate::models::activity::DiskIo;
use crate::util::human::parse_num;

/// One-second disk sample. Blocks for the sampling interval.
pub fn read_disk_io(runner: &dyn CommandRunner) -> Vec<DiskIo> {
    parse_iostat(&runner.run("iostat", &["-d", "1", "1"]))
}

/// Disks:  % tm_act  Kbps  tps  Kb_read  Kb_wrtn
pub fn parse_iostat(text: &str) -> Vec<DiskIo> {
    text.lines()
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 6 || !f[0].starts_with("hdisk") { return None; }
            Some(DiskIo {
                disk:    f[0].to_string(),
                tm_act:  f[1].parse().unwrap_or(0.0),
                kbps:    f[2].parse().unwrap_or(0.0),
                tps:     f[3].parse().unwrap_or(0.0),
                kb_read: parse_num(f[4]),
                kb_wrtn: parse_num(f[5]),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_rows_only() {
        let text = "\

System configuration: lcpu=8 drives=3 paths=4 vdisks=1

Disks:                     % tm_act     Kbps      tps    Kb_read   Kb_wrtn
hdisk0                      12.0     180.0      22.0        120        60
hdisk1                      85.5    4096.0     300.0       4000        96
cd0                          0.0       0.0       0.0          0         0
";
        let io = parse_iostat(text);
        assert_eq!(io.len(), 2);
        assert_eq!(io[0].tm_act, 12.0);
        assert_eq!(io[1].kb_read, 4000);
        assert_eq!(io[1].tps, 300.0);
    }
}
