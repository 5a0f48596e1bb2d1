use crate::ui::span::Span;
use crate::ui::style::Style;

/// Split `text` into spans so that the char ranges in `highlights` carry
/// `base.merge(highlight)` and everything else carries `base`. Ranges are
/// `(start, end)` char indices, end exclusive.
pub fn render_text_spans(
    text: &str,
    highlights: &[(usize, usize)],
    base: Style,
    highlight: Style,
) -> Vec<Span> {
    if highlights.is_empty() {
        return vec![Span::styled(text, base)];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut sorted = highlights.to_vec();
    sorted.sort_unstable();

    let mut spans = Vec::new();
    let mut cursor = 0usize;
    for (start, end) in sorted {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > cursor {
            let plain: String = chars[cursor..start].iter().collect();
            spans.push(Span::styled(plain, base));
        }
        if end > start {
            let marked: String = chars[start..end].iter().collect();
            spans.push(Span::styled(marked, base.merge(highlight)));
        }
        cursor = end.max(cursor);
    }
    if cursor < chars.len() {
        let tail: String = chars[cursor..].iter().collect();
        spans.push(Span::styled(tail, base));
    }

    if spans.is_empty() {
        spans.push(Span::styled(text, base));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::render_text_spans;
    use crate::ui::style::{Color, Style};

    #[test]
    fn no_highlights_yields_single_span() {
        let spans = render_text_spans("alpha", &[], Style::new(), Style::new().bold());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "alpha");
    }

    #[test]
    fn highlighted_ranges_are_split_out() {
        let hl = Style::new().color(Color::Yellow).bold();
        let spans = render_text_spans("alpha-beta", &[(0, 1), (6, 7)], Style::new(), hl);
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "lpha-", "b", "eta"]);
        assert!(spans[0].style.bold);
        assert!(!spans[1].style.bold);
        assert!(spans[2].style.bold);
    }

    #[test]
    fn out_of_bounds_ranges_are_clamped() {
        let spans = render_text_spans("ab", &[(1, 99)], Style::new(), Style::new().bold());
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
