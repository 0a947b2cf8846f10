mod app;
mod collectors;
mod config;
mod health;
mod input;
mod models;
mod ui;
mod util;

use app::{App, Page, PageSet};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use collectors::runner::SystemRunner;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use util::metrics::Level;

#[derive(Parser, Debug)]
#[command(name = "stgtui", about = "Terminal explorer for AIX volume groups, disks and filesystems", version)]
struct Cli {
    /// Auto-refresh interval in seconds (0 = manual, overrides the config file)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Color theme: default, dracula, gruvbox, nord
    #[arg(short = 't', long, default_value = "default")]
    theme: String,

    /// Print one page as plain text and exit
    #[arg(long, value_enum, value_name = "PAGE")]
    report: Option<Page>,

    /// Print a one-shot JSON snapshot of all storage data and exit
    #[arg(long)]
    json: bool,

    /// One-shot health check: exit 0=OK, 1=WARNING, 2=CRITICAL (nagios/cron compatible)
    #[arg(long)]
    check: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Write tracing output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let interactive = cli.report.is_none() && !cli.json && !cli.check && !cli.config;
    init_tracing(cli.log_file.as_deref(), interactive)?;

    if cli.config {
        return run_print_config();
    }
    if let Some(page) = cli.report {
        return run_report(page);
    }
    if cli.json {
        return run_json_snapshot();
    }
    if cli.check {
        return run_check();
    }

    let initial_theme = ui::theme::ThemeVariant::from_name(&cli.theme);

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run(initial_theme, cli.interval);
    restore_terminal()?;
    result
}

/// The TUI owns the terminal, so interactive sessions only log to a file.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if !interactive => {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn collect_pages() -> (config::Config, PageSet) {
    let cfg = config::Config::load();
    let pages = PageSet::build(&SystemRunner::new(), &cfg.thresholds);
    (cfg, pages)
}

fn run_report(page: Page) -> Result<()> {
    let (_, pages) = collect_pages();
    print!("{}", pages.doc(page).plain());
    Ok(())
}

fn run_json_snapshot() -> Result<()> {
    let (_, pages) = collect_pages();
    let out = serde_json::json!({
        "snapshot": pages.snapshot,
        "health":   pages.report,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run_check() -> Result<()> {
    let (_, pages) = collect_pages();
    let snap   = &pages.snapshot;
    let report = &pages.report;

    if report.passed() {
        println!(
            "OK — {} VG(s), {} disk(s), {} filesystem(s), no issues",
            snap.vgs.len(), snap.pvs.len(), snap.filesystems.len(),
        );
        std::process::exit(0);
    }

    for i in &report.issues {
        println!("[{}] {}: {}", i.severity.label(), i.category.label(), i.message);
    }

    match report.worst() {
        Level::Critical => std::process::exit(2),
        Level::Warning  => std::process::exit(1),
        Level::Ok       => std::process::exit(0),
    }
}

fn run_print_config() -> Result<()> {
    let cfg = config::Config::load();
    let path = config::Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let rc = config::Config::legacy_rc_path()
        .filter(|p| p.exists())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(none)".to_string());
    let g = &cfg.general;
    let t = &cfg.thresholds;
    println!("Config: {}", path);
    println!("Legacy: {}", rc);
    println!();
    println!("[general]");
    println!("  refresh_interval_sec = {}", g.refresh_interval_sec);
    println!("  export_dir           = {}", g.export_dir().display());
    println!("  show_command_errors  = {}", g.show_command_errors);
    println!();
    println!("[thresholds]");
    println!("  warn_pct = {}%", t.warn_pct);
    println!("  crit_pct = {}%", t.crit_pct);
    Ok(())
}

fn run(initial_theme: ui::theme::ThemeVariant, interval: Option<u64>) -> Result<()> {
    let cfg = config::Config::load();
    let secs = interval.unwrap_or(cfg.general.refresh_interval_sec);
    let refresh_every = (secs > 0).then(|| Duration::from_secs(secs));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(cfg, initial_theme, Arc::new(SystemRunner::new()), refresh_every);
    app.run(&mut term)?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
