use crate::search::fuzzy;
use crate::selector::scroll::ScrollState;
use crate::selector::{Row, ScoredCandidate, row_at};
use crate::ui::frame::Frame;
use crate::ui::highlight::render_text_spans;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::ui::time::format_relative_time;
use unicode_width::UnicodeWidthStr;

/// Rows reserved for header, query echo, separators, counter, and hints.
const CHROME_ROWS: u16 = 8;
/// Columns consumed by the marker and icon to the left of a row's text.
const ROW_PREFIX_COLS: usize = 5;

pub struct FrameInput<'a> {
    pub query: &'a str,
    pub rows: &'a [ScoredCandidate<'a>],
    pub cursor: usize,
    pub scroll: ScrollState,
    pub max_visible: usize,
    pub width: u16,
    pub now: f64,
}

pub fn visible_rows(height: u16) -> usize {
    height.saturating_sub(CHROME_ROWS).max(3) as usize
}

fn title_style() -> Style {
    Style::new().color(Color::Yellow).bold()
}

fn dim_style() -> Style {
    Style::new().color(Color::DarkGrey)
}

fn highlight_style() -> Style {
    Style::new().color(Color::Yellow).bold()
}

/// The selected row renders everything from the name to the end of the
/// metadata in reverse video.
fn selectable(style: Style, selected: bool) -> Style {
    if selected { style.reverse() } else { style }
}

pub fn build_frame(input: &FrameInput) -> Frame {
    let mut frame = Frame::new();
    let width = input.width as usize;
    let separator: SpanLine = vec![Span::styled(
        "─".repeat(width.saturating_sub(1).max(1)),
        dim_style(),
    )];

    frame.push(vec![Span::styled(
        "📁 Try Directory Selection",
        title_style(),
    )]);
    frame.push(separator.clone());
    frame.push(vec![
        Span::styled("Search: ", highlight_style()),
        Span::new(input.query),
    ]);
    frame.push(separator.clone());

    let total = input.rows.len() + 1;
    let (start, end) = input.scroll.visible_range(total, input.max_visible);
    for idx in start..end {
        match row_at(input.rows, idx) {
            Row::Existing(scored) => {
                frame.push(candidate_line(input, scored, idx == input.cursor));
            }
            Row::CreateNew => {
                // Breathing room between the list and the synthetic row.
                if !input.rows.is_empty() {
                    frame.push_blank();
                }
                frame.push(create_line(input, idx == input.cursor));
            }
        }
    }

    if let Some(counter) = input.scroll.counter(total, input.max_visible) {
        frame.push(separator.clone());
        frame.push(vec![Span::styled(counter, dim_style())]);
    }
    frame.push(separator);
    frame.push(vec![Span::styled(
        "↑↓: Navigate  Enter: Select  ESC: Cancel",
        dim_style(),
    )]);

    frame
}

fn marker_span(selected: bool) -> Span {
    if selected {
        Span::styled("→ ", highlight_style())
    } else {
        Span::new("  ")
    }
}

fn candidate_line(input: &FrameInput, scored: &ScoredCandidate<'_>, selected: bool) -> SpanLine {
    let mut line = vec![marker_span(selected), Span::new("📁 ")];

    let basename = scored.candidate.basename.as_str();
    line.extend(name_spans(basename, input.query, selected));

    let meta = format!(
        "{}, {:.1}",
        format_relative_time(scored.candidate.modified_at, input.now),
        scored.score
    );
    let text_width = UnicodeWidthStr::width(basename);
    let meta_width = UnicodeWidthStr::width(meta.as_str()) + 1;
    let padding = (input.width as usize)
        .saturating_sub(ROW_PREFIX_COLS + text_width + meta_width)
        .max(1);
    line.push(Span::styled(
        " ".repeat(padding),
        selectable(Style::new(), selected),
    ));
    line.push(Span::styled(
        format!(" {meta}"),
        selectable(dim_style(), selected),
    ));
    line
}

/// Name rendering: date-token names split into a dim date and an emphasized
/// name part; query matches are highlighted per character. The separating
/// hyphen lights up only when the query itself contains one.
fn name_spans(basename: &str, query: &str, selected: bool) -> Vec<Span> {
    let base = selectable(Style::new(), selected);
    let marked = selectable(highlight_style(), selected);
    let dim = selectable(dim_style(), selected);

    match fuzzy::split_date_name(basename) {
        Some((date_part, name_part)) => {
            let mut spans = vec![Span::styled(date_part, dim)];
            let hyphen = if !query.is_empty() && query.contains('-') {
                marked
            } else {
                dim
            };
            spans.push(Span::styled("-", hyphen));
            if query.is_empty() {
                spans.push(Span::styled(name_part, base));
            } else {
                let ranges = fuzzy::positions_to_ranges(&fuzzy::match_positions(name_part, query));
                spans.extend(render_text_spans(name_part, &ranges, base, marked));
            }
            spans
        }
        None => {
            if query.is_empty() {
                vec![Span::styled(basename, base)]
            } else {
                let ranges = fuzzy::positions_to_ranges(&fuzzy::match_positions(basename, query));
                render_text_spans(basename, &ranges, base, marked)
            }
        }
    }
}

fn create_line(input: &FrameInput, selected: bool) -> SpanLine {
    let display = if input.query.is_empty() {
        "Create new".to_string()
    } else {
        format!("Create new: {}", input.query)
    };
    let padding = (input.width as usize)
        .saturating_sub(ROW_PREFIX_COLS + UnicodeWidthStr::width(display.as_str()))
        .max(1);
    vec![
        marker_span(selected),
        Span::new("+ "),
        Span::styled(display, selectable(Style::new(), selected)),
        Span::styled(" ".repeat(padding), selectable(Style::new(), selected)),
    ]
}

/// The cooked-mode prompt shown when creating a try with no query typed.
pub fn build_prompt_frame(date_prefix: &str) -> Frame {
    let mut frame = Frame::new();
    frame.push(vec![Span::styled(
        "Enter new try name",
        Style::new().color(Color::Cyan).bold(),
    )]);
    frame.push(vec![
        Span::new("> "),
        Span::styled(format!("{date_prefix}-"), dim_style()),
    ]);
    frame
}
