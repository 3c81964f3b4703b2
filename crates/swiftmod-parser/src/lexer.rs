//! Token recognizers and delimiter-aware scanning for type spellings.
//!
//! The grammar never tokenizes a whole type. It scans spans left to right,
//! tracking angle, parenthesis and bracket depth independently, and cuts
//! the span at top-level commas and arrows.

use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{opt, recognize},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};
use smallvec::SmallVec;

/// Parse an identifier (starts with letter/underscore, followed by alphanumeric/underscore).
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// Parse a type attribute such as `@escaping`, returning its name without the `@`.
pub fn attribute(input: &str) -> IResult<&str, &str> {
    terminated(preceded(char('@'), identifier), multispace0)(input)
}

/// Parse every leading attribute of a span.
pub fn attributes(input: &str) -> IResult<&str, Vec<&str>> {
    preceded(multispace0, many0(attribute))(input)
}

/// Parse a closure parameter label (`name:` or `_ name:`) and return the remainder.
pub fn parameter_label(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        identifier,
        opt(preceded(multispace1, identifier)),
        multispace0,
        char(':'),
    )))(input)
}

/// Delimiter kinds tracked by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Angle,
    Paren,
    Bracket,
}

impl Delimiter {
    pub fn open(self) -> char {
        match self {
            Self::Angle => '<',
            Self::Paren => '(',
            Self::Bracket => '[',
        }
    }

    pub fn close(self) -> char {
        match self {
            Self::Angle => '>',
            Self::Paren => ')',
            Self::Bracket => ']',
        }
    }
}

/// A character of interest found while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Open(Delimiter),
    Close(Delimiter),
    /// `->`; its `>` never closes an angle bracket.
    Arrow,
    Comma,
    Other,
}

/// Scan a span, yielding the byte offset of every mark.
pub fn marks(input: &str) -> impl Iterator<Item = (usize, Mark)> + '_ {
    let mut chars = input.char_indices().peekable();
    std::iter::from_fn(move || {
        let (i, c) = chars.next()?;
        let mark = match c {
            '-' if matches!(chars.peek(), Some((_, '>'))) => {
                chars.next();
                Mark::Arrow
            }
            '<' => Mark::Open(Delimiter::Angle),
            '>' => Mark::Close(Delimiter::Angle),
            '(' => Mark::Open(Delimiter::Paren),
            ')' => Mark::Close(Delimiter::Paren),
            '[' => Mark::Open(Delimiter::Bracket),
            ']' => Mark::Close(Delimiter::Bracket),
            ',' => Mark::Comma,
            _ => Mark::Other,
        };
        Some((i, mark))
    })
}

/// Independent nesting depths for each delimiter kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Depth {
    pub angle: i32,
    pub paren: i32,
    pub bracket: i32,
}

impl Depth {
    fn slot(&mut self, delimiter: Delimiter) -> &mut i32 {
        match delimiter {
            Delimiter::Angle => &mut self.angle,
            Delimiter::Paren => &mut self.paren,
            Delimiter::Bracket => &mut self.bracket,
        }
    }

    /// Apply a mark. Returns the delimiter whose depth went negative, if any.
    pub fn apply(&mut self, mark: Mark) -> Option<Delimiter> {
        match mark {
            Mark::Open(d) => *self.slot(d) += 1,
            Mark::Close(d) => {
                let slot = self.slot(d);
                *slot -= 1;
                if *slot < 0 {
                    return Some(d);
                }
            }
            _ => {}
        }
        None
    }

    pub fn is_top_level(&self) -> bool {
        self.angle == 0 && self.paren == 0 && self.bracket == 0
    }
}

/// Check that every delimiter kind is balanced.
pub fn check_balanced(input: &str) -> Result<(), String> {
    let mut depth = Depth::default();
    for (_, mark) in marks(input) {
        if let Some(d) = depth.apply(mark) {
            return Err(format!("unexpected '{}'", d.close()));
        }
    }
    for (count, d) in [
        (depth.angle, Delimiter::Angle),
        (depth.paren, Delimiter::Paren),
        (depth.bracket, Delimiter::Bracket),
    ] {
        if count != 0 {
            return Err(format!("unclosed '{}'", d.open()));
        }
    }
    Ok(())
}

/// Byte offset of the first arrow outside all delimiters.
pub fn find_top_level_arrow(input: &str) -> Option<usize> {
    let mut depth = Depth::default();
    for (i, mark) in marks(input) {
        if mark == Mark::Arrow && depth.is_top_level() {
            return Some(i);
        }
        depth.apply(mark);
    }
    None
}

/// Byte offset of the delimiter closing the one opened at `open`.
///
/// Only delimiters of the same kind are counted.
pub fn matching_close(input: &str, open: usize) -> Option<usize> {
    let delimiter = match input[open..].chars().next()? {
        '<' => Delimiter::Angle,
        '(' => Delimiter::Paren,
        '[' => Delimiter::Bracket,
        _ => return None,
    };
    let mut depth = 0;
    for (i, mark) in marks(&input[open..]) {
        match mark {
            Mark::Open(d) if d == delimiter => depth += 1,
            Mark::Close(d) if d == delimiter => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// If the whole span is one `( ... )` group, return what is inside.
pub fn strip_parens(input: &str) -> Option<&str> {
    if !input.starts_with('(') {
        return None;
    }
    match matching_close(input, 0) {
        Some(close) if close == input.len() - 1 => Some(&input[1..close]),
        _ => None,
    }
}

/// Split by comma, respecting every delimiter kind. Segments are trimmed.
pub fn split_top_level(input: &str) -> SmallVec<[&str; 4]> {
    let mut parts = SmallVec::new();
    let mut start = 0;
    let mut depth = Depth::default();

    for (i, mark) in marks(input) {
        if mark == Mark::Comma && depth.is_top_level() {
            parts.push(input[start..i].trim());
            start = i + 1;
        }
        depth.apply(mark);
    }
    parts.push(input[start..].trim());

    parts
}

/// Strip a trailing keyword (`throws`, `async`) that stands on its own.
pub fn strip_keyword_suffix<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = input.strip_suffix(keyword)?;
    match rest.chars().last() {
        None => Some(rest),
        Some(c) if c.is_whitespace() || c == ')' => Some(rest.trim_end()),
        Some(_) => None,
    }
}
