pub mod render;
pub mod scroll;

use crate::error::Result;
use crate::search::fuzzy;
use crate::selector::scroll::ScrollState;
use crate::store::{Candidate, Store};
use crate::terminal::{self, KeyCode, KeyEvent, KeyModifiers, Terminal, TerminalEvent};
use crate::ui::time::unix_now;
use std::cmp::Ordering;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::debug;

/// What a finished session resolved to. Produced exactly once; translating
/// it into a shell command is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    EnterExisting(PathBuf),
    CreateNew(PathBuf),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a Candidate,
    pub score: f64,
}

/// A row of the virtual list: the ranked candidates followed by one
/// synthetic create-new entry.
pub enum Row<'a> {
    Existing(&'a ScoredCandidate<'a>),
    CreateNew,
}

pub fn row_at<'a>(ranked: &'a [ScoredCandidate<'a>], index: usize) -> Row<'a> {
    match ranked.get(index) {
        Some(scored) => Row::Existing(scored),
        None => Row::CreateNew,
    }
}

/// Score every candidate against the query, filter out non-matches when the
/// query is non-empty, and sort best-first. The sort is stable, so equal
/// scores keep their prior order.
pub fn rank_candidates<'a>(
    entries: &'a [Candidate],
    query: &str,
    now: f64,
) -> Vec<ScoredCandidate<'a>> {
    let mut ranked: Vec<ScoredCandidate<'a>> = entries
        .iter()
        .map(|candidate| ScoredCandidate {
            score: fuzzy::score(
                &candidate.basename,
                query,
                candidate.created_at,
                candidate.modified_at,
                now,
            ),
            candidate,
        })
        .collect();
    if !query.is_empty() {
        ranked.retain(|scored| scored.score > 0.0);
    }
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

enum Step {
    Continue,
    Confirm,
    Cancel,
}

/// The interactive session: query buffer, cursor over the virtual list, and
/// scroll window, driven by a read-decode-update-render loop.
pub struct Selector {
    store: Store,
    query: String,
    cursor: usize,
    scroll: ScrollState,
}

impl Selector {
    /// `initial_query` seeds the buffer: tabs become spaces, surrounding
    /// whitespace is dropped, and embedded spaces collapse to hyphens.
    pub fn new(initial_query: &str, base_path: impl Into<PathBuf>) -> Self {
        Self {
            store: Store::new(base_path),
            query: normalize_query(initial_query),
            cursor: 0,
            scroll: ScrollState::new(),
        }
    }

    pub fn run(&mut self) -> Result<SelectionResult> {
        terminal::ensure_interactive()?;
        debug!(query = %self.query, "selector session started");

        let entries = self.store.entries().to_vec();
        let mut terminal = Terminal::new()?;
        terminal.enter_raw_mode()?;

        loop {
            let now = unix_now();
            let ranked = rank_candidates(&entries, &self.query, now);
            let total = ranked.len() + 1;
            let size = terminal.size();
            let max_visible = render::visible_rows(size.height);

            self.cursor = self.cursor.min(total - 1);
            self.scroll.ensure_visible(self.cursor, total, max_visible);

            terminal.draw(&render::build_frame(&render::FrameInput {
                query: &self.query,
                rows: &ranked,
                cursor: self.cursor,
                scroll: self.scroll,
                max_visible,
                width: size.width,
                now,
            }))?;

            let key = match terminal.read_event()? {
                TerminalEvent::Resize => continue,
                TerminalEvent::Key(key) => key,
            };

            match self.step(key, ranked.len()) {
                Step::Continue => {}
                Step::Cancel => return Ok(SelectionResult::Cancelled),
                Step::Confirm => match row_at(&ranked, self.cursor) {
                    Row::Existing(scored) => {
                        return Ok(SelectionResult::EnterExisting(scored.candidate.path.clone()));
                    }
                    Row::CreateNew => {
                        if !self.query.is_empty() {
                            return Ok(SelectionResult::CreateNew(
                                self.new_try_path(&self.query, &today()),
                            ));
                        }
                        // Empty query: ask for a name in cooked mode; an
                        // empty line falls back to browsing.
                        if let Some(result) = self.prompt_new_name(&mut terminal)? {
                            return Ok(result);
                        }
                    }
                },
            }
        }
    }

    fn step(&mut self, key: KeyEvent, candidate_count: usize) -> Step {
        let virtual_len = candidate_count + 1;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Step::Cancel,
                KeyCode::Char('p') => {
                    self.cursor = self.cursor.saturating_sub(1);
                    Step::Continue
                }
                KeyCode::Char('n') => {
                    self.cursor = (self.cursor + 1).min(virtual_len - 1);
                    Step::Continue
                }
                _ => Step::Continue,
            };
        }

        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                Step::Continue
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(virtual_len - 1);
                Step::Continue
            }
            KeyCode::Enter => Step::Confirm,
            KeyCode::Backspace | KeyCode::Delete => {
                self.query.pop();
                self.cursor = 0;
                Step::Continue
            }
            KeyCode::Esc => Step::Cancel,
            KeyCode::Char(ch)
                if is_query_char(ch)
                    && (key.modifiers == KeyModifiers::NONE
                        || key.modifiers == KeyModifiers::SHIFT) =>
            {
                self.query.push(ch);
                self.cursor = 0;
                Step::Continue
            }
            _ => Step::Continue,
        }
    }

    fn prompt_new_name(&self, terminal: &mut Terminal) -> Result<Option<SelectionResult>> {
        let date = today();
        terminal.draw_prompt(&render::build_prompt_frame(&date))?;
        terminal.suspend_raw_mode()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line);

        // Raw mode comes back unconditionally, even when the read failed.
        terminal.resume_raw_mode()?;
        read?;

        Ok(self.submit_new_name(line.trim(), &date))
    }

    fn submit_new_name(&self, line: &str, date: &str) -> Option<SelectionResult> {
        if line.is_empty() {
            return None;
        }
        Some(SelectionResult::CreateNew(self.new_try_path(line, date)))
    }

    fn new_try_path(&self, name: &str, date: &str) -> PathBuf {
        let dirname = format!("{date}-{name}").replace(' ', "-");
        self.store.base().join(dirname)
    }
}

fn normalize_query(raw: &str) -> String {
    raw.replace('\t', " ").trim().replace(' ', "-")
}

fn is_query_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | ' ')
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::{KeyCode, KeyEvent, SelectionResult, Selector, Step, rank_candidates, row_at};
    use crate::store::Candidate;
    use std::path::PathBuf;

    const NOW: f64 = 1_700_000_000.0;

    fn candidate(basename: &str, modified_at: f64) -> Candidate {
        Candidate {
            basename: basename.to_string(),
            path: PathBuf::from("/tries").join(basename),
            created_at: 0.0,
            modified_at,
        }
    }

    fn selector() -> Selector {
        Selector::new("", "/tries")
    }

    #[test]
    fn initial_query_is_normalized() {
        let selector = Selector::new("  foo bar\tbaz ", "/tries");
        assert_eq!(selector.query, "foo-bar-baz");
    }

    #[test]
    fn empty_query_keeps_everything_ordered_by_recency() {
        let entries = vec![
            candidate("2024-01-01-alpha", NOW - 30.0 * 86_400.0),
            candidate("2024-06-01-beta", NOW - 3_600.0),
        ];
        let ranked = rank_candidates(&entries, "", NOW);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate.basename, "2024-06-01-beta");
    }

    #[test]
    fn non_matching_candidates_are_filtered_out() {
        let entries = vec![candidate("alpha-beta", NOW), candidate("xyz", NOW)];
        let ranked = rank_candidates(&entries, "ab", NOW);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate.basename, "alpha-beta");
        assert!(ranked[0].score > 0.0);
    }

    #[test]
    fn ranking_is_idempotent() {
        let entries = vec![
            candidate("2024-01-01-alpha", NOW - 60.0),
            candidate("2024-01-02-beta", NOW - 60.0),
            candidate("gamma", NOW - 120.0),
        ];
        let first: Vec<(String, f64)> = rank_candidates(&entries, "a", NOW)
            .iter()
            .map(|s| (s.candidate.basename.clone(), s.score))
            .collect();
        let second: Vec<(String, f64)> = rank_candidates(&entries, "a", NOW)
            .iter()
            .map(|s| (s.candidate.basename.clone(), s.score))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn synthetic_row_sits_past_the_candidates() {
        let entries = vec![candidate("alpha", NOW)];
        let ranked = rank_candidates(&entries, "", NOW);
        assert!(matches!(row_at(&ranked, 0), super::Row::Existing(_)));
        assert!(matches!(row_at(&ranked, 1), super::Row::CreateNew));
    }

    #[test]
    fn cursor_stops_at_both_ends() {
        let mut s = selector();
        s.step(KeyEvent::plain(KeyCode::Up), 2);
        assert_eq!(s.cursor, 0);
        for _ in 0..10 {
            s.step(KeyEvent::plain(KeyCode::Down), 2);
        }
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn ctrl_p_and_ctrl_n_move_the_cursor() {
        let mut s = selector();
        s.step(KeyEvent::ctrl('n'), 3);
        s.step(KeyEvent::ctrl('n'), 3);
        assert_eq!(s.cursor, 2);
        s.step(KeyEvent::ctrl('p'), 3);
        assert_eq!(s.cursor, 1);
    }

    #[test]
    fn typing_appends_and_snaps_cursor_to_top() {
        let mut s = selector();
        s.cursor = 3;
        s.step(KeyEvent::plain(KeyCode::Char('f')), 5);
        s.step(KeyEvent::plain(KeyCode::Char('o')), 5);
        s.step(KeyEvent::plain(KeyCode::Char('o')), 5);
        assert_eq!(s.query, "foo");
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn backspace_drops_last_char_and_resets_cursor() {
        let mut s = selector();
        s.query = "foo".to_string();
        s.cursor = 2;
        s.step(KeyEvent::plain(KeyCode::Backspace), 5);
        assert_eq!(s.query, "fo");
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn backspace_on_empty_query_is_harmless() {
        let mut s = selector();
        s.step(KeyEvent::plain(KeyCode::Backspace), 5);
        assert_eq!(s.query, "");
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn unlisted_characters_are_ignored() {
        let mut s = selector();
        s.cursor = 2;
        s.step(KeyEvent::plain(KeyCode::Char('/')), 5);
        s.step(KeyEvent::plain(KeyCode::Char('!')), 5);
        assert_eq!(s.query, "");
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn escape_and_ctrl_c_cancel() {
        let mut s = selector();
        assert!(matches!(
            s.step(KeyEvent::plain(KeyCode::Esc), 1),
            Step::Cancel
        ));
        assert!(matches!(s.step(KeyEvent::ctrl('c'), 1), Step::Cancel));
    }

    #[test]
    fn enter_confirms() {
        let mut s = selector();
        assert!(matches!(
            s.step(KeyEvent::plain(KeyCode::Enter), 1),
            Step::Confirm
        ));
    }

    #[test]
    fn empty_prompt_line_returns_to_browsing() {
        let s = selector();
        assert_eq!(s.submit_new_name("", "2024-03-02"), None);
    }

    #[test]
    fn prompt_line_becomes_a_dated_directory() {
        let s = selector();
        assert_eq!(
            s.submit_new_name("cool idea", "2024-03-02"),
            Some(SelectionResult::CreateNew(PathBuf::from(
                "/tries/2024-03-02-cool-idea"
            )))
        );
    }

    #[test]
    fn typed_query_creates_directly_with_date_prefix() {
        let s = Selector::new("cool idea", "/tries");
        assert_eq!(
            s.new_try_path(&s.query, "2024-03-02"),
            PathBuf::from("/tries/2024-03-02-cool-idea")
        );
    }
}
