use crate::error::{Error, Result};
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::frame::Frame;
use crate::ui::span::Span;
use crate::ui::style::Color;
use crossterm::event::{Event, KeyEventKind, read};
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::tty::IsTty;
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stderr, Write};

const FALLBACK_SIZE: Size = Size {
    width: 80,
    height: 24,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize,
}

/// Raw-mode terminal session drawing to stderr. Stdout stays untouched so the
/// caller can capture the emitted shell command from it.
///
/// The terminal's mode state is owned here for the session's lifetime: raw
/// mode is entered at most once and `Drop` restores cooked mode, the cursor,
/// and a clean screen on every exit path, errors included.
pub struct Terminal {
    stderr: Stderr,
    raw: bool,
}

/// Both ends of the conversation must be real terminals before any mode
/// change is attempted: stdin for keys, stderr for drawing.
pub fn ensure_interactive() -> Result<()> {
    if io::stdin().is_tty() && io::stderr().is_tty() {
        Ok(())
    } else {
        Err(Error::NotInteractive)
    }
}

impl Terminal {
    pub fn new() -> Result<Self> {
        Ok(Self {
            stderr: io::stderr(),
            raw: false,
        })
    }

    pub fn enter_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        execute!(self.stderr, cursor::Hide)?;
        Ok(())
    }

    /// Temporary drop to cooked mode for line-buffered input. The caller is
    /// expected to `resume_raw_mode` afterwards; `Drop` covers the case where
    /// it cannot.
    pub fn suspend_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.raw = false;
        Ok(())
    }

    pub fn resume_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        execute!(self.stderr, cursor::Hide)?;
        Ok(())
    }

    /// Current viewport, falling back to 80x24 when the terminal cannot be
    /// queried or reports a zero dimension.
    pub fn size(&self) -> Size {
        match terminal::size() {
            Ok((width, height)) if width > 0 && height > 0 => Size { width, height },
            _ => FALLBACK_SIZE,
        }
    }

    /// Block until the next key press or resize. Repeat events, releases, and
    /// other event kinds are skipped. Escape sequences are assembled by the
    /// crossterm event parser; a lone ESC byte arrives as `KeyCode::Esc`.
    pub fn read_event(&mut self) -> io::Result<TerminalEvent> {
        loop {
            match read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(TerminalEvent::Key(map_key_event(key)));
                }
                Event::Resize(_, _) => return Ok(TerminalEvent::Resize),
                _ => continue,
            }
        }
    }

    /// Full-frame redraw: home the cursor, clear, then write every line with
    /// `\r\n` endings (output post-processing is off in raw mode).
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(
            self.stderr,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::All)
        )?;
        for (i, line) in frame.lines().iter().enumerate() {
            if i > 0 {
                queue!(self.stderr, Print("\r\n"))?;
            }
            for span in line {
                self.queue_span(span)?;
            }
        }
        self.stderr.flush()
    }

    /// Draw a frame and leave a visible cursor at the end of its last line,
    /// ready for cooked-mode input.
    pub fn draw_prompt(&mut self, frame: &Frame) -> io::Result<()> {
        self.draw(frame)?;
        execute!(self.stderr, cursor::Show)
    }

    fn queue_span(&mut self, span: &Span) -> io::Result<()> {
        let style = span.style;
        if let Some(color) = style.color {
            queue!(self.stderr, SetForegroundColor(map_color(color)))?;
        }
        if style.bold {
            queue!(self.stderr, SetAttribute(Attribute::Bold))?;
        }
        if style.reverse {
            queue!(self.stderr, SetAttribute(Attribute::Reverse))?;
        }
        queue!(self.stderr, Print(span.text.as_str()))?;
        if !style.is_plain() {
            queue!(self.stderr, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }
}

impl Drop for Terminal {
    // Best effort on every exit path; a failed restore must not panic after
    // the user already has their result.
    fn drop(&mut self) {
        if self.raw {
            let _ = terminal::disable_raw_mode();
        }
        let _ = execute!(
            self.stderr,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Show
        );
    }
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Yellow => crossterm::style::Color::Yellow,
        Color::Cyan => crossterm::style::Color::Cyan,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        _ => KeyCode::Other,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::SHIFT) {
        mapped |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped |= KeyModifiers::ALT;
    }
    mapped
}
