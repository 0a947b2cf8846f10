use crate::collectors::runner::CommandRunner;
use crate::collectors::Snapshot;
use crate::config::{Config, Thresholds};
use crate::health::{self, HealthReport};
use crate::input::{handle_key, handle_prompt_key, Action, PromptEdit};
use crate::ui::doc::{Doc, DocLine};
use crate::ui::popup::{self, Popup};
use crate::ui::theme::{Theme, ThemeVariant};
use crate::ui::{dashboard, footer, health_view, help, iostat_view, lists, mapping, search, volume_view};
use crate::util::export;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, ListState, Paragraph},
    Frame,
};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};
use tracing::{info, warn};

// ── Pages ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Page {
    Dashboard,
    #[value(name = "vgs")]
    VolumeGroups,
    Health,
    #[value(name = "lvs")]
    LogicalVolumes,
    #[value(name = "disks")]
    DiskToFs,
    #[value(name = "filesystems")]
    FsToDisk,
    #[value(name = "iostat")]
    IoStats,
    Mirrors,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Dashboard, Page::VolumeGroups, Page::Health, Page::LogicalVolumes,
        Page::DiskToFs, Page::FsToDisk, Page::IoStats, Page::Mirrors,
    ];

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub fn number(&self) -> u8 {
        Self::ALL.iter().position(|p| p == self).map(|i| i as u8 + 1).unwrap_or(1)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard      => "Dashboard",
            Page::VolumeGroups   => "Volume Groups",
            Page::Health         => "Health",
            Page::LogicalVolumes => "Logical Volumes",
            Page::DiskToFs       => "Disk → FS",
            Page::FsToDisk       => "FS → Disk",
            Page::IoStats        => "I/O Stats",
            Page::Mirrors        => "Mirrors",
        }
    }
}

/// What the body area currently shows; drives the footer hints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Page(Page),
    Detail,
}

/// Every page composed from one snapshot. Built off the UI thread and
/// swapped in whole.
pub struct PageSet {
    pub snapshot:  Snapshot,
    pub report:    HealthReport,
    pub dashboard: Doc,
    pub vgs:       Doc,
    pub health:    Doc,
    pub lvs:       Doc,
    pub io:        Doc,
    pub mirrors:   Doc,
    pub disk_rows: Vec<DocLine>,
    pub fs_rows:   Vec<DocLine>,
}

impl PageSet {
    pub fn build(runner: &dyn CommandRunner, thr: &Thresholds) -> Self {
        Self::from_snapshot(Snapshot::collect(runner), thr)
    }

    pub fn from_snapshot(snapshot: Snapshot, thr: &Thresholds) -> Self {
        let report = health::evaluate(&snapshot, thr);
        Self {
            dashboard: dashboard::compose(&snapshot, thr),
            vgs:       volume_view::compose_vgs(&snapshot, thr),
            health:    health_view::compose(&snapshot, &report, thr),
            lvs:       volume_view::compose_lvs(&snapshot),
            io:        iostat_view::compose(&snapshot),
            mirrors:   volume_view::compose_mirrors(&snapshot),
            disk_rows: lists::disk_rows(&snapshot, thr),
            fs_rows:   lists::fs_rows(&snapshot, thr),
            report,
            snapshot,
        }
    }

    /// Text pages; `None` for the two selectable lists.
    fn text(&self, page: Page) -> Option<&Doc> {
        match page {
            Page::Dashboard      => Some(&self.dashboard),
            Page::VolumeGroups   => Some(&self.vgs),
            Page::Health         => Some(&self.health),
            Page::LogicalVolumes => Some(&self.lvs),
            Page::IoStats        => Some(&self.io),
            Page::Mirrors        => Some(&self.mirrors),
            Page::DiskToFs | Page::FsToDisk => None,
        }
    }

    /// Any page as a document, lists included. Used for export and `--report`.
    pub fn doc(&self, page: Page) -> Doc {
        match page {
            Page::DiskToFs => lists::list_doc("DISK → FILESYSTEM", lists::DISK_HEADER, self.disk_rows.clone()),
            Page::FsToDisk => lists::list_doc("FILESYSTEM → DISK", lists::FS_HEADER, self.fs_rows.clone()),
            _ => self.text(page).cloned().unwrap_or_default(),
        }
    }

    fn rows(&self, page: Page) -> &[DocLine] {
        match page {
            Page::DiskToFs => &self.disk_rows,
            Page::FsToDisk => &self.fs_rows,
            _ => &[],
        }
    }
}

/// A trace or search result opened over the page.
pub struct Detail {
    pub title:  String,
    pub doc:    Doc,
    pub scroll: usize,
}

const POLL_TIMEOUT: Duration = Duration::from_millis(150);

// ── App ───────────────────────────────────────────────────────────────

pub struct App {
    pub config: Config,

    pub theme:         Theme,
    pub theme_variant: ThemeVariant,

    runner: Arc<dyn CommandRunner>,

    pub pages:      PageSet,
    pub page:       Page,
    pub detail:     Option<Detail>,
    pub popup:      Option<Popup>,
    pub show_help:  bool,
    pub refreshing: bool,

    /// Scroll offset per text page, indexed by `Page::number() - 1`.
    scroll:         [usize; 8],
    pub disk_state: ListState,
    pub fs_state:   ListState,
    /// Body height at the last draw, for PageUp/PageDown.
    body_height:    usize,

    refresh_every: Option<Duration>,
    last_refresh:  Instant,
    refresh_tx:    mpsc::Sender<PageSet>,
    refresh_rx:    mpsc::Receiver<PageSet>,

    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: Config,
        initial_theme: ThemeVariant,
        runner: Arc<dyn CommandRunner>,
        refresh_every: Option<Duration>,
    ) -> Self {
        let (refresh_tx, refresh_rx) = mpsc::channel();
        let thr = config.thresholds;
        Self {
            config,
            theme:         Theme::for_variant(initial_theme),
            theme_variant: initial_theme,
            runner,
            pages:       PageSet::from_snapshot(Snapshot::default(), &thr),
            page:        Page::Dashboard,
            detail:      None,
            popup:       None,
            show_help:   false,
            refreshing:  false,
            scroll:      [0; 8],
            disk_state:  ListState::default(),
            fs_state:    ListState::default(),
            body_height: 20,
            refresh_every,
            last_refresh: Instant::now(),
            refresh_tx,
            refresh_rx,
            should_quit: false,
        }
    }

    pub fn view(&self) -> View {
        if self.detail.is_some() { View::Detail } else { View::Page(self.page) }
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        self.start_refresh();
        loop {
            self.consume_refresh();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(POLL_TIMEOUT)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if matches!(self.popup, Some(Popup::Search(_))) {
                            self.handle_prompt(handle_prompt_key(key));
                        } else if self.popup.is_some() {
                            self.popup = None;
                        } else {
                            self.handle_action(handle_key(key));
                        }
                    }
                    Event::Mouse(me) => match me.kind {
                        MouseEventKind::ScrollDown => self.handle_action(Action::SelectDown),
                        MouseEventKind::ScrollUp   => self.handle_action(Action::SelectUp),
                        _ => {}
                    },
                    _ => {}
                }
            }

            if self.should_quit { break; }

            if let Some(every) = self.refresh_every {
                if !self.refreshing && self.last_refresh.elapsed() >= every {
                    self.start_refresh();
                }
            }
        }
        Ok(())
    }

    // ── Background refresh ────────────────────────────────────────────

    pub fn start_refresh(&mut self) {
        if self.refreshing { return; }
        self.refreshing = true;
        let tx     = self.refresh_tx.clone();
        let runner = Arc::clone(&self.runner);
        let thr    = self.config.thresholds;
        std::thread::spawn(move || {
            let pages = PageSet::build(runner.as_ref(), &thr);
            let _ = tx.send(pages);
        });
    }

    pub fn consume_refresh(&mut self) {
        while let Ok(pages) = self.refresh_rx.try_recv() {
            info!(
                issues = pages.report.issue_count(),
                failures = pages.snapshot.command_failures,
                "pages refreshed"
            );
            self.pages = pages;
            self.refreshing   = false;
            self.last_refresh = Instant::now();
            clamp_selection(&mut self.disk_state, self.pages.disk_rows.len());
            clamp_selection(&mut self.fs_state, self.pages.fs_rows.len());
        }
    }

    // ── Input dispatch ────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: Action) {
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::ShowHelp | Action::Back => self.show_help = false,
                _ => {}
            }
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,

            Action::ShowHelp => self.show_help = true,

            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
            }

            Action::GoPage(n) => {
                if let Some(page) = Page::from_number(n) {
                    self.page   = page;
                    self.detail = None;
                }
            }

            Action::Refresh => self.start_refresh(),

            Action::Export => self.export_current(),

            Action::Search => self.popup = Some(Popup::Search(String::new())),

            Action::Confirm => self.open_trace(),

            Action::Back => self.detail = None,

            Action::SelectUp   => self.move_by(-1),
            Action::SelectDown => self.move_by(1),
            Action::PageUp     => self.move_by(-(self.body_height.max(1) as i64)),
            Action::PageDown   => self.move_by(self.body_height.max(1) as i64),
            Action::JumpTop    => self.move_by(i64::MIN / 2),
            Action::JumpBottom => self.move_by(i64::MAX / 2),

            Action::None => {}
        }
    }

    fn handle_prompt(&mut self, edit: PromptEdit) {
        let Some(Popup::Search(query)) = self.popup.as_mut() else { return };
        match edit {
            PromptEdit::Insert(c) => query.push(c),
            PromptEdit::Backspace => { query.pop(); }
            PromptEdit::Cancel    => self.popup = None,
            PromptEdit::Submit    => {
                let query = query.clone();
                self.popup = None;
                if !query.trim().is_empty() {
                    self.detail = Some(Detail {
                        title:  format!("Search: {}", query.trim()),
                        doc:    search::compose(&self.pages.snapshot, &query),
                        scroll: 0,
                    });
                }
            }
            PromptEdit::None => {}
        }
    }

    /// Scroll the detail or text page, or move the list selection.
    fn move_by(&mut self, delta: i64) {
        if let Some(d) = self.detail.as_mut() {
            d.scroll = step(d.scroll, delta, d.doc.len());
            return;
        }
        let len = self.pages.rows(self.page).len();
        match self.page {
            Page::DiskToFs => select_step(&mut self.disk_state, delta, len),
            Page::FsToDisk => select_step(&mut self.fs_state, delta, len),
            page => {
                let idx = page.number() as usize - 1;
                let len = self.pages.text(page).map(Doc::len).unwrap_or(0);
                self.scroll[idx] = step(self.scroll[idx], delta, len);
            }
        }
    }

    /// Enter on a list row: trace that disk or filesystem through the stack.
    fn open_trace(&mut self) {
        if self.detail.is_some() { return; }
        let thr  = self.config.thresholds;
        let snap = &self.pages.snapshot;
        let detail = match self.page {
            Page::DiskToFs => self.disk_state.selected()
                .and_then(|i| snap.pvs.get(i))
                .map(|pv| Detail {
                    title:  format!("{} → filesystems", pv.name),
                    doc:    mapping::storage_to_fs(self.runner.as_ref(), snap, &pv.name, &thr),
                    scroll: 0,
                }),
            Page::FsToDisk => self.fs_state.selected()
                .and_then(|i| snap.filesystems.get(i))
                .map(|fs| Detail {
                    title:  format!("{} → storage", fs.mount),
                    doc:    mapping::fs_to_storage(self.runner.as_ref(), snap, &fs.mount, &thr),
                    scroll: 0,
                }),
            _ => None,
        };
        if detail.is_some() { self.detail = detail; }
    }

    fn export_current(&mut self) {
        let doc = match &self.detail {
            Some(d) => d.doc.clone(),
            None    => self.pages.doc(self.page),
        };
        let dir = self.config.general.export_dir();
        self.popup = Some(match export::write_report(&doc, &dir) {
            Ok(path) => Popup::Exported(path),
            Err(e) => {
                warn!(error = %e, "export failed");
                Popup::ExportFailed(format!("{:#}", e))
            }
        });
    }

    // ── Drawing ───────────────────────────────────────────────────────

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)])
            .split(f.area());

        self.draw_header(f, chunks[0]);
        self.body_height = chunks[1].height.saturating_sub(2) as usize;

        let theme = self.theme.clone();
        if let Some(d) = &self.detail {
            draw_doc(f, chunks[1], &d.title, &d.doc, d.scroll, &theme);
        } else {
            let idx = self.page.number() as usize - 1;
            match self.page {
                Page::DiskToFs => lists::render_list(
                    f, chunks[1], "Disk → Filesystem", lists::DISK_HEADER,
                    &self.pages.disk_rows, &mut self.disk_state, &theme,
                ),
                Page::FsToDisk => lists::render_list(
                    f, chunks[1], "Filesystem → Disk", lists::FS_HEADER,
                    &self.pages.fs_rows, &mut self.fs_state, &theme,
                ),
                page => {
                    let doc = self.pages.text(page).cloned().unwrap_or_default();
                    draw_doc(f, chunks[1], page.title(), &doc, self.scroll[idx], &theme);
                }
            }
        }

        footer::render_footer(f, chunks[2], &self.view(), &theme);

        if self.show_help {
            help::render(f, &theme);
        }
        if let Some(p) = &self.popup {
            popup::render(f, p, &theme);
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let t = &self.theme;
        let snap = &self.pages.snapshot;
        let dot = t.level(dashboard::status_level(snap, &self.config.thresholds));

        let mut spans = vec![
            Span::styled(" stgtui ", t.title),
            Span::styled("● ", dot),
            Span::styled(format!("{}  ", if snap.hostname.is_empty() { "-" } else { &snap.hostname }), t.text),
        ];
        for page in Page::ALL {
            let style = if self.detail.is_none() && page == self.page { t.selected } else { t.text_dim };
            spans.push(Span::styled(format!(" {} {} ", page.number(), page.title()), style));
        }
        if self.refreshing {
            spans.push(Span::styled("  ⟳ refreshing…", t.warn));
        } else if !snap.collected_at.is_empty() {
            spans.push(Span::styled(format!("  {}", snap.collected_at), t.text_dim));
        }
        if self.config.general.show_command_errors && snap.command_failures > 0 {
            spans.push(Span::styled(format!("  ✖ {} failed commands", snap.command_failures), t.crit));
        }
        f.render_widget(Paragraph::new(Line::from(spans)).style(t.header), area);
    }
}

fn draw_doc(f: &mut Frame, area: Rect, title: &str, doc: &Doc, scroll: usize, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", title), theme.title));
    let para = Paragraph::new(doc.to_lines(theme))
        .block(block)
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    f.render_widget(para, area);
}

/// `cur + delta` clamped to `0..len`.
fn step(cur: usize, delta: i64, len: usize) -> usize {
    let max = len.saturating_sub(1) as i64;
    (cur as i64).saturating_add(delta).clamp(0, max) as usize
}

fn select_step(state: &mut ListState, delta: i64, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let cur = state.selected().unwrap_or(0);
    state.select(Some(step(cur, delta, len)));
}

fn clamp_selection(state: &mut ListState, len: usize) {
    match (state.selected(), len) {
        (_, 0)          => state.select(None),
        (None, _)       => state.select(Some(0)),
        (Some(i), n)    => state.select(Some(i.min(n - 1))),
    }
}
