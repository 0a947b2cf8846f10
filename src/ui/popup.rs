use crate::ui::help::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::PathBuf;

/// Modal shown over the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    /// Search prompt with the text typed so far.
    Search(String),
    Exported(PathBuf),
    ExportFailed(String),
}

pub fn render(f: &mut Frame, popup: &Popup, theme: &Theme) {
    let area = centered_rect(64, 7, f.area());
    f.render_widget(Clear, area);

    let (title, lines) = match popup {
        Popup::Search(query) => (
            " Search ",
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("  Find: ", theme.text_dim),
                    Span::styled(format!("{}▏", query), theme.text),
                ]),
                Line::from(""),
                Line::from(Span::styled("  VG, LV, mount, device, disk or PVID · Enter to search", theme.text_dim)),
            ],
        ),

        Popup::Exported(path) => (
            " Export ",
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("  Saved to: ", theme.text_dim),
                    Span::styled(path.display().to_string(), theme.ok),
                ]),
                Line::from(""),
                Line::from(Span::styled("  Press any key to dismiss", theme.text_dim)),
            ],
        ),

        Popup::ExportFailed(msg) => (
            " Export ",
            vec![
                Line::from(""),
                Line::from(Span::styled(format!("  Error: {}", msg), theme.crit)),
                Line::from(""),
                Line::from(Span::styled("  Press any key to dismiss", theme.text_dim)),
            ],
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(title, theme.title));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
