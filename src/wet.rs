//! WET messages: Warnings, Errors and Troubleshooting.
//!
//! WET messages guide users through problems whose solution is known to the
//! Farseer-NMR community. Each message links to its entry in the WET list:
//! <https://github.com/Farseer-NMR/FarSeer-NMR/wiki/WET-List>.
//!
//! ```text
//! ****************************** TESTING *******************************
//! *   This is a testing message for Farseer-NMR WET list. It contains  *
//! *         several lines. Tabbed with triple quoted strings.          *
//! *                                                                    *
//! *                           Please visit:                            *
//! *   https://github.com/Farseer-NMR/FarSeer-NMR/wiki/WET-List#wet1    *
//! **********************************************************************
//! ```

use std::fmt::Write as _;

/// Base link of the WET list; the WET number is appended.
pub const BASE_LINK: &str = "https://github.com/Farseer-NMR/FarSeer-NMR/wiki/WET-List#wet";

/// Generates a WET message with default formatting.
#[must_use]
pub fn generate(title: &str, msg: &str, wetnum: u32) -> String {
    WetHandler::new(title, msg, wetnum).generate()
}

/// Builds WET messages.
#[derive(Debug, Clone)]
pub struct WetHandler {
    /// Title, for example `ERROR` or `WARNING`.
    pub title: String,
    /// Message body. Line breaks and indentation are normalised.
    pub msg: String,
    /// Number of the entry in the WET list.
    pub wetnum: u32,
    /// Total width of the box. Defaults to 70.
    pub width: usize,
    /// Border character. Defaults to `*`.
    pub style: char,
    /// Text shown above the link. Defaults to "Please visit:".
    pub please_visit: String,
}

impl WetHandler {
    /// Creates a handler with default formatting.
    #[must_use]
    pub fn new(title: impl Into<String>, msg: impl Into<String>, wetnum: u32) -> Self {
        Self {
            title: title.into(),
            msg: msg.into(),
            wetnum,
            width: 70,
            style: '*',
            please_visit: "Please visit:".to_string(),
        }
    }

    /// Sets the box width.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the border character.
    #[must_use]
    pub fn with_style(mut self, style: char) -> Self {
        self.style = style;
        self
    }

    /// Link to this message's WET list entry.
    #[must_use]
    pub fn link(&self) -> String {
        format!("{BASE_LINK}{}", self.wetnum)
    }

    /// Returns the formatted message.
    #[must_use]
    pub fn generate(&self) -> String {
        let width = self.width.max(6);
        let inner = width - 2;
        let wrap_at = width - 4;
        let style = self.style;

        let mut out = String::from("\n");

        let title = format!(" {} ", self.title);
        let _ = writeln!(out, "{}", center(&title, width, style));

        for line in wrap(&normalise(&self.msg), wrap_at) {
            let _ = writeln!(out, "{style}{line:^inner$}{style}");
        }

        let _ = writeln!(out, "{style}{}{style}", " ".repeat(inner));
        let _ = writeln!(out, "{style}{:^inner$}{style}", self.please_visit);

        for line in wrap(&self.link(), wrap_at) {
            let _ = writeln!(out, "{style}{line:^inner$}{style}");
        }

        let _ = writeln!(out, "{}", style.to_string().repeat(width));
        out
    }
}

/// Trims every line of `msg` and joins them with single spaces.
fn normalise(msg: &str) -> String {
    msg.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

/// Centres `text` in `width` columns padded with `fill`; extra padding goes
/// to the right.
fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    let mut s = String::with_capacity(width);
    s.extend(std::iter::repeat_n(fill, left));
    s.push_str(text);
    s.extend(std::iter::repeat_n(fill, right));
    s
}

/// Greedy word wrap.
///
/// Leading whitespace of the first line is kept, whitespace at other line
/// boundaries is dropped, words may break after inner hyphens and words
/// longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks: Vec<String> = split_chunks(text);
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();

    while !chunks.is_empty() {
        let mut current: Vec<String> = Vec::new();
        let mut current_len = 0;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_space(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            let len = chunk.chars().count();
            if current_len + len <= width {
                current_len += len;
                current.extend(chunks.pop());
            } else {
                break;
            }
        }

        if let Some(chunk) = chunks.last_mut() {
            if chunk.chars().count() > width {
                let space_left = width.saturating_sub(current_len).max(1);
                let head: String = chunk.chars().take(space_left).collect();
                let tail: String = chunk.chars().skip(space_left).collect();
                *chunk = tail;
                current.push(head);
            }
        }

        if current.last().is_some_and(|c| is_space(c)) {
            current.pop();
        }

        if !current.is_empty() {
            lines.push(current.concat());
        }
    }

    lines
}

fn is_space(chunk: &str) -> bool {
    chunk.chars().all(char::is_whitespace)
}

/// Splits text into whitespace runs and words; words also split after a
/// hyphen that sits between two letters or digits.
fn split_chunks(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut in_space = false;

    for (i, &c) in chars.iter().enumerate() {
        let space = c.is_whitespace();
        if !current.is_empty() && space != in_space {
            chunks.push(std::mem::take(&mut current));
        }
        in_space = space;
        current.push(c);

        let hyphen_break = c == '-'
            && i >= 2
            && chars[i - 1].is_alphanumeric()
            && chars[i - 2].is_alphanumeric()
            && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric());
        if hyphen_break {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
