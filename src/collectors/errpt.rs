use crate::collectors::runner::CommandRunner;
use crate::models::activity::ErrlogEntry;

/// Hardware-class entries of the AIX error log.
pub fn read_hardware_errors(runner: &dyn CommandRunner) -> Vec<ErrlogEntry> {
    parse_errpt(&runner.run("errpt", &["-d", "H"]))
}

/// IDENTIFIER  TIMESTAMP  T  C  RESOURCE_NAME  DESCRIPTION...
pub fn parse_errpt(text: &str) -> Vec<ErrlogEntry> {
    text.lines()
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 6 || f[0] == "IDENTIFIER" { return None; }
            Some(ErrlogEntry {
                identifier:  f[0].to_string(),
                timestamp:   f[1].to_string(),
                err_type:    f[2].to_string(),
                class:       f[3].to_string(),
                resource:    f[4].to_string(),
                description: f[5..].join(" "),
            })
        })
        .collect()
}
