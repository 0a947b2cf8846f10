use crate::app::{Page, View};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_footer(f: &mut Frame, area: Rect, view: &View, theme: &Theme) {
    let base: &[(&str, &str)] = match view {
        View::Page(Page::DiskToFs) | View::Page(Page::FsToDisk) => &[
            ("q", "Quit"), ("1-8", "Page"), ("↑↓/jk", "Select"), ("g/G", "Top/Bot"),
            ("Enter", "Trace"), ("/", "Search"), ("e", "Export"), ("r", "Refresh"),
        ],
        View::Page(_) => &[
            ("q", "Quit"), ("1-8", "Page"), ("↑↓/jk", "Scroll"), ("PgUp/Dn", "Page"),
            ("/", "Search"), ("e", "Export"), ("r", "Refresh"),
        ],
        View::Detail => &[
            ("Esc", "Back"), ("↑↓/jk", "Scroll"), ("g/G", "Top/Bot"),
            ("/", "Search"), ("e", "Export"), ("q", "Quit"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];
    for (key, desc) in base {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }
    spans.push(Span::styled(" t ", theme.footer_key));
    spans.push(Span::styled("Theme  ", theme.footer_text));
    spans.push(Span::styled(" ? ", theme.footer_key));
    spans.push(Span::styled("Help  ", theme.footer_text));

    let para = Paragraph::new(Line::from(spans)).style(theme.footer_bg);
    f.render_widget(para, area);
}
