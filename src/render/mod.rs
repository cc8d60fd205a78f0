/*!
Human rendering of command payloads.

  Text primitive   literal block, emitted unchanged
  Table primitive  fully expanded aligned table: every row, no truncation,
                   numeric cells right-aligned, text cells left-aligned

Front ends differ only in how a sequence is joined:
  - CLI   `render_cli`     primitives separated by a blank line
  - chat  `chat_messages`  one message per primitive, wrapped in ``` fences

Style:
  - StyleOptions::detect() -> colour unless NO_COLOR is set or stdout is not a terminal
  - StyleOptions::plain()  -> never colour (chat, tests, --json paths never render)

This module never prints; it returns strings.
*/

use std::borrow::Cow;
use std::io::IsTerminal;

use crate::dispatch::{Cell, CommandPrimitive, CommandValue, Table};

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOptions {
    pub use_color: bool,
}

impl StyleOptions {
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self {
            use_color: !no_color && std::io::stdout().is_terminal(),
        }
    }

    pub const fn plain() -> Self {
        Self { use_color: false }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Accent,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Accent => "38;5;213",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

/* -------------------------------------------------------------------------- */
/* Table Rendering                                                            */
/* -------------------------------------------------------------------------- */

const GAP: &str = "  ";

pub fn table(t: &Table, style: &StyleOptions) -> String {
    let columns = t.columns();
    if columns.is_empty() {
        return String::new();
    }

    let cells: Vec<Vec<String>> = t
        .rows()
        .iter()
        .map(|row| row.iter().map(Cell::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| display_width(c)).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }
    // A column is right-aligned when all its non-empty cells are numeric.
    let numeric: Vec<bool> = (0..columns.len())
        .map(|i| {
            let mut filled = t.rows().iter().map(|r| &r[i]).filter(|c| **c != Cell::Empty);
            let mut any = false;
            let all = filled.all(|c| {
                any = true;
                c.is_numeric()
            });
            any && all
        })
        .collect();

    let mut lines: Vec<String> = Vec::with_capacity(cells.len() + 2);
    lines.push(join_row(columns.iter().map(String::as_str), &widths, &numeric, |s| {
        color(Role::Accent, s, style)
    }));
    let sep = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join(GAP);
    lines.push(color(Role::Dim, sep, style));
    for row in &cells {
        lines.push(join_row(row.iter().map(String::as_str), &widths, &numeric, |s| s));
    }
    lines.join("\n")
}

fn join_row<'a, I, F>(cells: I, widths: &[usize], numeric: &[bool], paint: F) -> String
where
    I: Iterator<Item = &'a str>,
    F: Fn(String) -> String,
{
    let rendered: Vec<String> = cells
        .enumerate()
        .map(|(i, cell)| paint(pad(cell, widths[i], numeric[i])))
        .collect();
    rendered.join(GAP).trim_end().to_string()
}

fn pad(s: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(s)));
    if right {
        format!("{fill}{s}")
    } else {
        format!("{s}{fill}")
    }
}

/* -------------------------------------------------------------------------- */
/* Payloads                                                                   */
/* -------------------------------------------------------------------------- */

pub fn render_primitive(p: &CommandPrimitive, style: &StyleOptions) -> String {
    match p {
        CommandPrimitive::Text(s) => s.clone(),
        CommandPrimitive::Table(t) => table(t, style),
    }
}

/// CLI form of a value: primitives in order, separated by a blank line.
pub fn render_cli(value: &CommandValue, style: &StyleOptions) -> String {
    value
        .primitives()
        .iter()
        .map(|p| render_primitive(p, style))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Chat form: one fenced message per primitive, in emission order.
pub fn chat_messages(value: &CommandValue) -> Vec<String> {
    value
        .primitives()
        .iter()
        .map(|p| fence(&render_primitive(p, &StyleOptions::plain())))
        .collect()
}

pub fn fence(body: &str) -> String {
    format!("```\n{body}\n```")
}

/* -------------------------------------------------------------------------- */
/* ANSI / Width Utilities                                                     */
/* -------------------------------------------------------------------------- */

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI runs until the first ASCII letter.
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        buf.push(c);
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
