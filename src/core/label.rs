//! Transition label mini-language.
//!
//! A label is either a literal string or a bracketed list of elements:
//!
//! | label     | matches                                  |
//! |-----------|------------------------------------------|
//! | `ab`      | the literal `"ab"`                       |
//! | (empty)   | anything, consuming nothing (lambda)     |
//! | `[a,b,c]` | `"a"`, `"b"` or `"c"`                    |
//! | `[a..c]`  | any one character from `a` to `c`        |
//! | `[ab..c]` | the literal `"ab..c"` (not a range)      |
//!
//! Only the text between the first `[` and the first `]` after it is read
//! for a list label. Malformed syntax never fails; it degrades to literal
//! matching.

use indexmap::IndexSet;
use log::trace;
use std::fmt;

const RANGE_SEPARATOR: &str = "..";
const ELEMENT_SEPARATOR: char = ',';

/// One element of a list label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// A literal token.
    Literal(String),

    /// Inclusive code-point range. Empty when `first > last`.
    Range { first: char, last: char },
}

impl Element {
    fn parse(text: &str) -> Self {
        if text.contains(RANGE_SEPARATOR) {
            let pieces: Vec<&str> = text.split(RANGE_SEPARATOR).collect();
            if let [first, last] = pieces.as_slice() {
                if let (Some(first), Some(last)) =
                    (single_char(first.trim()), single_char(last.trim()))
                {
                    return Element::Range { first, last };
                }
            }
            trace!("{text:?} is not a character range, matching it literally");
        }
        Element::Literal(text.to_string())
    }

    /// Length in bytes of the token this element matches at the start of
    /// `remaining`, if any.
    fn prefix_len(&self, remaining: &str) -> Option<usize> {
        match self {
            Element::Literal(token) => remaining.starts_with(token.as_str()).then_some(token.len()),
            Element::Range { first, last } => remaining
                .chars()
                .next()
                .filter(|c| (*first..=*last).contains(c))
                .map(char::len_utf8),
        }
    }

    fn push_tokens(&self, tokens: &mut IndexSet<String>) {
        match self {
            Element::Literal(token) => {
                tokens.insert(token.clone());
            }
            Element::Range { first, last } => {
                tokens.extend((*first..=*last).map(String::from));
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Literal(token) => f.write_str(token),
            Element::Range { first, last } => write!(f, "{first}{RANGE_SEPARATOR}{last}"),
        }
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Body of a list label: the text strictly between the first `[` and the
/// first `]` that follows it.
fn list_body(text: &str) -> Option<&str> {
    let open = text.find('[')?;
    let body = &text[open + 1..];
    let close = body.find(']')?;
    Some(&body[..close])
}

/// A parsed transition label.
///
/// # Example
///
/// ```rust
/// use fsasim::core::Label;
///
/// let label = Label::parse("[a..c]");
/// let matches = label.matches("bcd");
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].token, "b");
/// assert_eq!(matches[0].rest, "cd");
///
/// assert!(Label::parse("").is_lambda());
/// assert!(Label::parse("[ab..c]").matches("b").is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Label {
    /// A single literal string. The empty literal is a lambda label.
    Literal(String),

    /// A bracketed list of literal and range elements.
    List(Vec<Element>),
}

/// A successful match of a label against the unconsumed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match<'a> {
    /// The consumed prefix.
    pub token: &'a str,
    /// The input left after the token.
    pub rest: &'a str,
}

impl<'a> Match<'a> {
    fn split(remaining: &'a str, len: usize) -> Self {
        let (token, rest) = remaining.split_at(len);
        Self { token, rest }
    }
}

impl Label {
    /// Parse label text. Never fails.
    pub fn parse(text: &str) -> Self {
        match list_body(text) {
            Some(body) => Label::List(
                body.split(ELEMENT_SEPARATOR)
                    .filter(|element| !element.is_empty())
                    .map(Element::parse)
                    .collect(),
            ),
            None => Label::Literal(text.to_string()),
        }
    }

    /// The lambda label.
    pub fn lambda() -> Self {
        Label::Literal(String::new())
    }

    /// True only for the empty literal. List labels are never lambda.
    pub fn is_lambda(&self) -> bool {
        matches!(self, Label::Literal(text) if text.is_empty())
    }

    /// True for bracketed list labels.
    pub fn is_list(&self) -> bool {
        matches!(self, Label::List(_))
    }

    /// Every way this label can consume a prefix of `remaining`.
    ///
    /// Tokens are reported once each, in element order.
    pub fn matches<'a>(&self, remaining: &'a str) -> Vec<Match<'a>> {
        match self {
            Label::Literal(token) => {
                if remaining.starts_with(token.as_str()) {
                    vec![Match::split(remaining, token.len())]
                } else {
                    Vec::new()
                }
            }
            Label::List(elements) => {
                // Two tokens that are both prefixes of `remaining` are equal
                // iff they have the same length.
                let lengths: IndexSet<usize> = elements
                    .iter()
                    .filter_map(|element| element.prefix_len(remaining))
                    .collect();
                lengths
                    .into_iter()
                    .map(|len| Match::split(remaining, len))
                    .collect()
            }
        }
    }

    /// The concrete tokens this label accepts, deduplicated, in element order.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Label::Literal(token) => vec![token.clone()],
            Label::List(elements) => {
                let mut tokens = IndexSet::new();
                for element in elements {
                    element.push_tokens(&mut tokens);
                }
                tokens.into_iter().collect()
            }
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::parse(text)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Literal(token) => f.write_str(token),
            Label::List(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{ELEMENT_SEPARATOR}")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
        }
    }
}
