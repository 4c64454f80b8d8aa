//! Text-level helpers for turning a raw schema into statements and column fragments.
//!
//! Two strategies are supported for the column list:
//! - [`ParenMode::Greedy`] matches the first `(` through the last `)` and splits on
//!   every comma. Composite clauses such as `FOREIGN KEY (a, b)` break apart.
//! - [`ParenMode::Balanced`] tracks nesting depth and quoting, so only top-level
//!   commas separate fragments.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static GREEDY_COLUMN_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*\)").expect("column list pattern is valid"));

/// How the parenthesized column list of a statement is located and split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParenMode {
    /// First `(` to last `)`, naive comma split
    Greedy,
    /// Depth-tracking scan, top-level comma split
    #[default]
    Balanced,
}

/// Tracks whether the scanner is inside a quoted identifier or literal
#[derive(Debug, Default)]
struct QuoteState {
    open: Option<char>,
}

impl QuoteState {
    /// Feed one character; returns true when the character is part of quoted text
    fn step(&mut self, c: char) -> bool {
        match self.open {
            Some(q) if q == c => {
                self.open = None;
                true
            }
            Some(_) => true,
            None if matches!(c, '\'' | '"' | '`') => {
                self.open = Some(c);
                true
            }
            None => false,
        }
    }
}

/// Collapse the schema into a single logical line with uniform identifier quoting
pub fn normalize(text: &str, strip_comments: bool) -> String {
    let text = if strip_comments {
        remove_comments(text)
    } else {
        text.to_string()
    };
    text.replace('\n', "").replace('"', "`")
}

/// Drop `-- line` and `/* block */` comments that are not inside quotes
pub fn remove_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quotes = QuoteState::default();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if quotes.step(c) {
            out.push(c);
            continue;
        }

        match (c, chars.peek()) {
            ('-', Some('-')) => {
                // keep the newline so the following line is not glued to the comment
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

/// Return the text between the column list parentheses of a statement
pub fn column_list(segment: &str, mode: ParenMode) -> Result<&str> {
    match mode {
        ParenMode::Greedy => GREEDY_COLUMN_LIST
            .find(segment)
            .map(|m| &segment[m.start() + 1..m.end() - 1])
            .ok_or_else(|| Error::malformed(segment, "no parenthesized column list")),
        ParenMode::Balanced => balanced_column_list(segment),
    }
}

fn balanced_column_list(segment: &str) -> Result<&str> {
    let open = segment
        .find('(')
        .ok_or_else(|| Error::malformed(segment, "no parenthesized column list"))?;

    let mut depth = 0usize;
    let mut quotes = QuoteState::default();

    for (offset, c) in segment[open..].char_indices() {
        if quotes.step(c) {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&segment[open + 1..open + offset]);
                }
            }
            _ => {}
        }
    }

    Err(Error::malformed(segment, "unbalanced parentheses in column list"))
}

/// Split a column list into raw column declaration fragments
pub fn split_fragments(list: &str, mode: ParenMode) -> Vec<String> {
    let list = list.trim();
    match mode {
        ParenMode::Greedy => list.split(',').map(str::to_string).collect(),
        ParenMode::Balanced => split_top_level(list),
    }
}

fn split_top_level(list: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quotes = QuoteState::default();

    for c in list.chars() {
        if quotes.step(c) {
            current.push(c);
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                fragments.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    fragments.push(current);

    fragments
}

/// Split a column declaration on whitespace outside parentheses and quotes,
/// so `DECIMAL(10, 2)` stays one word
pub fn top_level_words(declaration: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = None;
    let mut depth = 0usize;
    let mut quotes = QuoteState::default();

    for (offset, c) in declaration.char_indices() {
        if !quotes.step(c) {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if c.is_whitespace() && depth == 0 => {
                    if let Some(begin) = start.take() {
                        words.push(&declaration[begin..offset]);
                    }
                    continue;
                }
                _ => {}
            }
        }
        start.get_or_insert(offset);
    }
    if let Some(begin) = start {
        words.push(&declaration[begin..]);
    }

    words
}
