use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(76, 24, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" stgtui — Keybindings (? to close) ", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = vec![
        key_line(theme, "Pages", ""),
        key_line(theme, "  1", "Dashboard"),
        key_line(theme, "  2", "Volume group details"),
        key_line(theme, "  3", "Health check"),
        key_line(theme, "  4", "Logical volumes"),
        key_line(theme, "  5", "Disk → filesystem"),
        key_line(theme, "  6", "Filesystem → disk"),
        key_line(theme, "  7", "I/O statistics"),
        key_line(theme, "  8", "Mirror status"),
        Line::from(""),
        key_line(theme, "Global", ""),
        key_line(theme, "  q / Ctrl-C", "Quit"),
        key_line(theme, "  r", "Refresh all data"),
        key_line(theme, "  e", "Export page to text file"),
        key_line(theme, "  /", "Search"),
        key_line(theme, "  t", "Cycle color theme"),
        key_line(theme, "  ? / F1", "Toggle this help"),
    ];

    let right = vec![
        key_line(theme, "Navigation", ""),
        key_line(theme, "  ↑↓ / j k", "Select / scroll"),
        key_line(theme, "  PageUp/Dn", "Scroll one screen"),
        key_line(theme, "  g / G", "Jump first / last"),
        key_line(theme, "  Enter", "Trace disk or filesystem"),
        key_line(theme, "  Esc", "Back from trace / search"),
        Line::from(""),
        key_line(theme, "CLI modes", ""),
        key_line(theme, "  --report PAGE", "Print one page and exit"),
        key_line(theme, "  --json", "JSON snapshot and exit"),
        key_line(theme, "  --check", "Exit 0=OK 1=WARN 2=CRIT"),
        key_line(theme, "  --config", "Print config values"),
        key_line(theme, "  --log-file F", "Write tracing output to F"),
        key_line(theme, "  --completions SH", "Shell completion script"),
        Line::from(""),
        key_line(theme, "Config  ~/.config/stgtui/stgtui.toml", ""),
        key_line(theme, "  ~/.stgtuirc overrides thresholds", ""),
    ];

    f.render_widget(Paragraph::new(left), cols[0]);
    f.render_widget(Paragraph::new(right), cols[1]);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        Line::from(vec![Span::styled(key, theme.title)])
    } else {
        Line::from(vec![
            Span::styled(format!("{:<18}", key), theme.footer_key),
            Span::styled(desc, theme.text_dim),
        ])
    }
}

/// Centered Rect of at most `width` x `height`, capped at the available area.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_capped() {
        let r = centered_rect(76, 24, Rect::new(0, 0, 40, 10));
        assert_eq!(r, Rect::new(0, 0, 40, 10));
        let r = centered_rect(20, 4, Rect::new(0, 0, 100, 40));
        assert_eq!(r, Rect::new(40, 18, 20, 4));
    }
}
