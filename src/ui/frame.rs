use crate::ui::span::SpanLine;

/// One full-screen redraw, top to bottom. Rebuilt from scratch every loop
/// iteration; there is no diffing against the previous frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<SpanLine>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }

    pub fn push_blank(&mut self) {
        self.lines.push(Vec::new());
    }

    pub fn lines(&self) -> &[SpanLine] {
        &self.lines
    }
}
