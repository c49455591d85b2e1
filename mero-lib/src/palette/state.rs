//! Palette state: query, ranked matches and cursor.

use log::trace;

use super::Command;
use super::FilterMatch;
use super::MatchMode;
use super::rank;

/// A command palette.
///
/// Owns the commands, the current query and a cursor over the ranked
/// matches. Changing the query re-ranks and puts the cursor on the best
/// match; cursor movement wraps at both ends.
///
/// # Example
///
/// ```
/// use mero_lib::palette::{Command, Palette};
///
/// let mut palette = Palette::new(vec![
///     Command::new("open", "Open File"),
///     Command::new("save", "Save File"),
///     Command::new("quit", "Quit"),
/// ]);
///
/// palette.set_query("file");
/// assert_eq!(palette.len(), 2);
///
/// palette.cursor_down();
/// palette.cursor_down();
/// // Wrapped back to the first match.
/// assert_eq!(palette.cursor(), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    commands: Vec<Command>,
    /// Match text per command, parallel to `commands`.
    haystacks: Vec<String>,
    mode: MatchMode,
    limit: Option<usize>,
    query: String,
    filtered: Vec<FilterMatch>,
    cursor: Option<usize>,
}

impl Palette {
    /// Create a fuzzy palette over `commands` with an empty query.
    pub fn new(commands: Vec<Command>) -> Self {
        let haystacks = commands.iter().map(Command::haystack).collect();
        let mut palette = Self {
            commands,
            haystacks,
            mode: MatchMode::Fuzzy,
            limit: None,
            query: String::new(),
            filtered: Vec::new(),
            cursor: None,
        };
        palette.refilter();
        palette
    }

    /// Set the match mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self.refilter();
        self
    }

    /// Keep at most `limit` matches.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self.refilter();
        self
    }

    /// Replace the commands, keeping the query.
    pub fn set_commands(&mut self, commands: Vec<Command>) {
        self.haystacks = commands.iter().map(Command::haystack).collect();
        self.commands = commands;
        self.refilter();
    }

    // -------------------------------------------------------------------------
    // Query
    // -------------------------------------------------------------------------

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and re-rank.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    pub fn clear_query(&mut self) {
        self.set_query(String::new());
    }

    fn refilter(&mut self) {
        self.filtered = rank(&self.query, &self.haystacks, self.mode);
        if let Some(limit) = self.limit {
            self.filtered.truncate(limit);
        }
        self.cursor = if self.filtered.is_empty() { None } else { Some(0) };
        trace!(
            "palette: {:?} matched {}/{}",
            self.query,
            self.filtered.len(),
            self.commands.len()
        );
    }

    // -------------------------------------------------------------------------
    // Matches
    // -------------------------------------------------------------------------

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Matched commands, best first.
    pub fn matches(&self) -> Vec<&Command> {
        self.filtered
            .iter()
            .map(|m| &self.commands[m.index])
            .collect()
    }

    /// Ranked matches with their scores.
    pub fn ranked(&self) -> &[FilterMatch] {
        &self.filtered
    }

    /// Matched commands grouped by section, sections in first-seen order.
    pub fn sections(&self) -> Vec<(&str, Vec<&Command>)> {
        let mut sections: Vec<(&str, Vec<&Command>)> = Vec::new();
        for command in self.matches() {
            let name = command.section();
            match sections.iter_mut().find(|(s, _)| *s == name) {
                Some((_, commands)) => commands.push(command),
                None => sections.push((name, vec![command])),
            }
        }
        sections
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    /// Current cursor position (index into matches).
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The command under the cursor.
    pub fn selected(&self) -> Option<&Command> {
        self.cursor
            .and_then(|i| self.filtered.get(i))
            .map(|m| &self.commands[m.index])
    }

    /// Move the cursor to `index`. Returns `false` if out of range.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index < self.filtered.len() {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    /// Move the cursor down, wrapping to the first match.
    pub fn cursor_down(&mut self) -> Option<usize> {
        let len = self.filtered.len();
        if len == 0 {
            return None;
        }
        let next = match self.cursor {
            Some(cursor) => (cursor + 1) % len,
            None => 0,
        };
        self.cursor = Some(next);
        self.cursor
    }

    /// Move the cursor up, wrapping to the last match.
    pub fn cursor_up(&mut self) -> Option<usize> {
        let len = self.filtered.len();
        if len == 0 {
            return None;
        }
        let next = match self.cursor {
            Some(0) | None => len - 1,
            Some(cursor) => cursor - 1,
        };
        self.cursor = Some(next);
        self.cursor
    }

    pub fn cursor_first(&mut self) -> Option<usize> {
        if self.filtered.is_empty() {
            return None;
        }
        self.cursor = Some(0);
        self.cursor
    }

    pub fn cursor_last(&mut self) -> Option<usize> {
        self.cursor = self.filtered.len().checked_sub(1);
        self.cursor
    }
}
