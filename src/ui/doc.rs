//! Styled text documents. Every page is composed into a [`Doc`] off the UI
//! thread; the same value renders in the terminal ([`Doc::to_lines`]) and
//! exports as plain text ([`Doc::plain`]).

use crate::ui::theme::Theme;
use crate::util::metrics::{bar_fill, Level};
use ratatui::text::{Line, Span};

/// Semantic color of a text run, resolved against the active theme at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Text,
    Dim,
    Title,
    Section,
    Accent,
    Ok,
    Warn,
    Crit,
    Remnant,
}

impl From<Level> for Tone {
    fn from(level: Level) -> Self {
        match level {
            Level::Ok       => Tone::Ok,
            Level::Warning  => Tone::Warn,
            Level::Critical => Tone::Crit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub tone: Tone,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocLine {
    pub segments: Vec<Segment>,
}

impl DocLine {
    pub fn new() -> Self { Self::default() }

    pub fn text(tone: Tone, text: impl Into<String>) -> Self {
        Self::new().seg(tone, text)
    }

    pub fn seg(mut self, tone: Tone, text: impl Into<String>) -> Self {
        self.segments.push(Segment { tone, text: text.into() });
        self
    }

    pub fn push(&mut self, tone: Tone, text: impl Into<String>) {
        self.segments.push(Segment { tone, text: text.into() });
    }

    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doc {
    pub lines: Vec<DocLine>,
}

impl Doc {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, line: DocLine) { self.lines.push(line); }

    pub fn line(&mut self, tone: Tone, text: impl Into<String>) {
        self.lines.push(DocLine::text(tone, text));
    }

    pub fn blank(&mut self) { self.lines.push(DocLine::new()); }

    /// "═══ TITLE ═══" section heading.
    pub fn section(&mut self, title: &str) {
        self.line(Tone::Section, format!("═══ {} ═══", title));
    }

    /// Inline failure, e.g. a cross-reference that could not be resolved.
    pub fn error(&mut self, msg: impl Into<String>) {
        self.line(Tone::Crit, format!("  ✖ {}", msg.into()));
    }

    pub fn append(&mut self, other: Doc) { self.lines.extend(other.lines); }

    pub fn len(&self) -> usize { self.lines.len() }

    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// The document without styling, one line per row, newline-terminated.
    pub fn plain(&self) -> String {
        let mut out = String::new();
        for l in &self.lines {
            out.push_str(l.plain().trim_end());
            out.push('\n');
        }
        out
    }

    pub fn to_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        self.lines
            .iter()
            .map(|l| {
                Line::from(
                    l.segments
                        .iter()
                        .map(|s| Span::styled(s.text.clone(), theme.tone(s.tone)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

/// Usage bar "████░░░░  42%", the filled part toned by `level`.
pub fn bar(line: &mut DocLine, percent: u32, width: usize, level: Level) {
    let pct = percent.min(100);
    let filled = bar_fill(pct, width);
    line.push(level.into(), "█".repeat(filled));
    line.push(Tone::Dim, "░".repeat(width - filled));
    line.push(Tone::Text, format!(" {:>3}%", pct));
}

// ── Cards ────────────────────────────────────────────────────────────

const LABEL_W: usize = 14;
const VALUE_W: usize = 35;
/// Outer width of a card in characters, borders included.
pub const CARD_W: usize = LABEL_W + VALUE_W + 4;

/// A labelled value inside a card.
pub struct CardRow {
    pub label: String,
    pub value: String,
    pub tone:  Tone,
}

impl CardRow {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self { label: label.to_string(), value: value.into(), tone: Tone::Text }
    }

    pub fn toned(label: &str, value: impl Into<String>, tone: Tone) -> Self {
        Self { label: label.to_string(), value: value.into(), tone }
    }
}

/// Box-drawn card, e.g. one hop of a filesystem → disk trace.
pub fn card(doc: &mut Doc, title: &str, rows: &[CardRow]) {
    let title_w = title.chars().count();
    let fill = CARD_W.saturating_sub(title_w + 5);
    doc.push(
        DocLine::text(Tone::Accent, "┌─ ")
            .seg(Tone::Title, title)
            .seg(Tone::Accent, format!(" {}┐", "─".repeat(fill))),
    );
    for row in rows {
        doc.push(
            DocLine::text(Tone::Accent, "│ ")
                .seg(Tone::Dim, pad(&row.label, LABEL_W))
                .seg(row.tone, pad(&row.value, VALUE_W))
                .seg(Tone::Accent, " │"),
        );
    }
    doc.line(Tone::Accent, format!("└{}┘", "─".repeat(CARD_W - 2)));
}

/// Connector drawn between two cards.
pub fn arrow(doc: &mut Doc) {
    doc.line(Tone::Accent, format!("{:>w$}", "│", w = CARD_W / 2));
    doc.line(Tone::Accent, format!("{:>w$}", "▼", w = CARD_W / 2));
}

/// Left-align to exactly `w` characters, cutting long values.
fn pad(s: &str, w: usize) -> String {
    let cut: String = s.chars().take(w).collect();
    let n = cut.chars().count();
    format!("{}{}", cut, " ".repeat(w - n))
}
