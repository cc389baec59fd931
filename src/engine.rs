use tracing::{debug, trace};

use crate::key::{KeyCode, KeyEvent, Modifiers};
use crate::motion::{self, WordScan};
use crate::position;
use crate::traits::Surface;
use crate::types::{Command, Disposition, Mode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One registered editable line and the engine's own cursor memory for it.
///
/// The remembered cursor is where the engine last placed the caret, not
/// necessarily where the host's caret is now; motions always re-read the
/// surface before moving.
#[derive(Debug, Clone)]
pub struct TrackedLine<S> {
    surface: S,
    cursor: usize,
}

impl<S> TrackedLine<S> {
    fn new(surface: S) -> Self {
        Self { surface, cursor: 0 }
    }

    /// The registered surface handle.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The last caret offset the engine placed in this line.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// The modal navigation engine.
///
/// A session owns the line registry (which editable surfaces exist, which
/// one is active) and the mode state, and turns key events into
/// [`Command`]s for the host to apply. It holds surface handles but never
/// mutates a surface itself.
#[derive(Debug, Clone)]
pub struct Session<S: Surface> {
    lines: Vec<TrackedLine<S>>,
    active: usize,
    mode: Mode,
}

/// A point-in-time copy of the session's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionSnapshot {
    pub mode: Mode,
    /// Index of the active line, `None` while the registry is empty.
    pub active_line: Option<usize>,
    pub line_count: usize,
    /// The active line's remembered cursor offset.
    pub cursor: Option<usize>,
}

pub struct SessionBuilder {
    mode: Mode,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self { mode: Mode::Normal }
    }
}

impl SessionBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build<S: Surface>(self) -> Session<S> {
        Session { lines: Vec::new(), active: 0, mode: self.mode }
    }
}

impl<S: Surface> Default for Session<S> {
    fn default() -> Self {
        SessionBuilder::default().build()
    }
}

impl<S: Surface> Session<S> {
    /// A session in normal mode with an empty line registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Index of the active line, `None` while the registry is empty.
    pub fn active_index(&self) -> Option<usize> {
        (!self.lines.is_empty()).then_some(self.active)
    }

    /// The registered lines, in registry order.
    pub fn lines(&self) -> &[TrackedLine<S>] {
        &self.lines
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            active_line: self.active_index(),
            line_count: self.lines.len(),
            cursor: self.active_line().map(TrackedLine::cursor),
        }
    }

    fn active_line(&self) -> Option<&TrackedLine<S>> {
        self.lines.get(self.active)
    }

    fn active_surface(&self) -> Option<S> {
        self.active_line().map(|line| line.surface.clone())
    }

    /// Replace the whole line registry with a fresh scan's results.
    ///
    /// The previous active surface is unsubscribed before anything else,
    /// so at most one surface holds the key subscription at any point in
    /// the returned command sequence. The active index carries over,
    /// clamped to the new list; remembered cursors reset to 0. An empty
    /// `surfaces` leaves the session dormant until the next call.
    pub fn set_lines(&mut self, surfaces: Vec<S>) -> Vec<Command<S>> {
        let mut commands = Vec::new();
        if let Some(line) = self.active_line() {
            commands.push(Command::Unlisten(line.surface.clone()));
        }
        let target = self.active.min(surfaces.len().saturating_sub(1));
        self.lines = surfaces.into_iter().map(TrackedLine::new).collect();
        debug!(lines = self.lines.len(), "line registry replaced");
        if self.lines.is_empty() {
            self.active = 0;
        } else {
            commands.extend(self.activate(target));
        }
        commands
    }

    /// Make the line at `index` (clamped to the registry) the active one.
    ///
    /// No-op on an empty registry. Re-activating the current line is
    /// allowed and re-emits its focus and subscription commands.
    pub fn set_active_line(&mut self, index: usize) -> Vec<Command<S>> {
        if self.lines.is_empty() {
            return vec![];
        }
        let index = index.min(self.lines.len() - 1);
        let mut commands = Vec::new();
        if let Some(line) = self.active_line() {
            commands.push(Command::Unlisten(line.surface.clone()));
        }
        commands.extend(self.activate(index));
        commands
    }

    fn activate(&mut self, index: usize) -> Vec<Command<S>> {
        let surface = self.lines[index].surface.clone();
        trace!(index, "line activated");
        self.active = index;
        vec![Command::Focus(surface.clone()), Command::Listen(surface)]
    }

    /// Interpret one key event under the current mode.
    ///
    /// Returns whether the host must suppress the event, plus the commands
    /// to apply. Keys with CTRL, ALT, or META held always pass through.
    /// In normal mode the motion keys are handled even when they produce
    /// no commands (cursor already at a boundary, empty registry), so the
    /// host never types an `h` into a surface.
    pub fn handle_key(&mut self, key: KeyEvent) -> (Disposition, Vec<Command<S>>) {
        if key.mods.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META) {
            return (Disposition::PassThrough, vec![]);
        }
        match (self.mode, key.code) {
            (Mode::Normal, KeyCode::Char('i' | 'a')) => {
                (Disposition::Handled, self.switch_mode(Mode::Insert))
            }
            (Mode::Normal, KeyCode::Char('h')) => (Disposition::Handled, self.char_left()),
            (Mode::Normal, KeyCode::Char('l')) => (Disposition::Handled, self.char_right()),
            (Mode::Normal, KeyCode::Char('k')) => (Disposition::Handled, self.line_up()),
            (Mode::Normal, KeyCode::Char('j')) => (Disposition::Handled, self.line_down()),
            (Mode::Normal, KeyCode::Char('w')) => (Disposition::Handled, self.word_forward()),
            (Mode::Insert, KeyCode::Esc) => (Disposition::Handled, self.switch_mode(Mode::Normal)),
            _ => (Disposition::PassThrough, vec![]),
        }
    }

    fn switch_mode(&mut self, mode: Mode) -> Vec<Command<S>> {
        self.mode = mode;
        debug!(?mode, "mode switched");
        vec![Command::Indicator(mode.indicator())]
    }

    fn char_left(&mut self) -> Vec<Command<S>> {
        let Some(surface) = self.active_surface() else {
            return vec![];
        };
        let current = position::to_linear_offset(&surface);
        if current == 0 {
            return vec![];
        }
        self.place(self.active, current - 1)
    }

    fn char_right(&mut self) -> Vec<Command<S>> {
        let Some(surface) = self.active_surface() else {
            return vec![];
        };
        let current = position::to_linear_offset(&surface);
        if current >= motion::char_len(&surface.text()) {
            return vec![];
        }
        self.place(self.active, current + 1)
    }

    fn line_up(&mut self) -> Vec<Command<S>> {
        self.set_active_line(self.active.saturating_sub(1))
    }

    fn line_down(&mut self) -> Vec<Command<S>> {
        self.set_active_line(self.active.saturating_add(1))
    }

    /// The `w` motion: hop within the active line, or spill onto the next
    /// line's first word when the line has no further landing.
    fn word_forward(&mut self) -> Vec<Command<S>> {
        let Some(surface) = self.active_surface() else {
            return vec![];
        };
        let text = surface.text();
        let origin = position::to_linear_offset(&surface);
        match motion::next_word_hop(&text, origin) {
            WordScan::Landed(offset) => self.place(self.active, offset),
            WordScan::AtEnd => {
                let next = self.active + 1;
                if next < self.lines.len() {
                    let mut commands = self.set_active_line(next);
                    let text = self.lines[next].surface.text();
                    let landing =
                        motion::first_non_blank(&text).unwrap_or_else(|| motion::char_len(&text));
                    commands.extend(self.place(next, landing));
                    commands
                } else {
                    self.place(self.active, motion::char_len(&text))
                }
            }
        }
    }

    /// Record the cursor and emit the caret placement for line `index`.
    fn place(&mut self, index: usize, offset: usize) -> Vec<Command<S>> {
        let Some(line) = self.lines.get_mut(index) else {
            return vec![];
        };
        line.cursor = offset;
        let caret = position::to_caret(&line.surface, offset);
        vec![Command::SetCaret { surface: line.surface.clone(), caret }]
    }
}
