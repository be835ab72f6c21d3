//! Path text parser.
//!
//! This is a hand-written state machine over the characters of the path. Paths
//! are parsed once when configuration is loaded, so the parser favors precise
//! error offsets over zero-copy output.

use snafu::ensure;

use crate::encode::is_bareword_char;
use crate::error::{
    EmptySegmentSnafu, InvalidCharacterSnafu, InvalidEscapeSnafu, KeysOnScalarSnafu,
    UnterminatedBracketSnafu, UnterminatedQuoteSnafu,
};
use crate::{Namespace, PathParseError};

#[derive(Clone, Copy)]
enum State {
    Namespace,
    Continue,
    Dot { offset: usize },
    Field { start: usize },
    BracketStart { offset: usize },
    Quote { offset: usize, quote: char },
    EscapedQuote { offset: usize, quote: char },
    QuoteEnd { offset: usize },
}

/// Parses path text into its namespace and ordered keys.
///
/// An empty key list is the root of the namespace. Both `.key` and `["key"]`
/// are accepted for keys that are valid barewords, so the output of
/// [`crate::encode`] is not the only text that decodes to a given path.
pub fn decode(path: &str) -> Result<(Namespace, Vec<String>), PathParseError> {
    ensure!(!path.is_empty(), crate::error::EmptySnafu);

    let mut namespace = None;
    let mut keys = Vec::new();
    let mut buffer = String::new();
    let mut state = State::Namespace;

    for (index, c) in path.char_indices() {
        state = match state {
            State::Namespace => match c {
                c if is_bareword_char(c) => State::Namespace,
                '.' => {
                    namespace = Some(path[..index].parse::<Namespace>()?);
                    State::Dot { offset: index }
                }
                '[' => {
                    namespace = Some(path[..index].parse::<Namespace>()?);
                    State::BracketStart { offset: index }
                }
                _ => return invalid(c, index),
            },
            State::Continue => match c {
                '.' => State::Dot { offset: index },
                '[' => State::BracketStart { offset: index },
                _ => return invalid(c, index),
            },
            State::Dot { offset } => match c {
                c if is_bareword_char(c) => State::Field { start: index },
                '.' | '[' => return EmptySegmentSnafu { offset }.fail(),
                _ => return invalid(c, index),
            },
            State::Field { start } => match c {
                c if is_bareword_char(c) => State::Field { start },
                '.' => {
                    keys.push(path[start..index].to_owned());
                    State::Dot { offset: index }
                }
                '[' => {
                    keys.push(path[start..index].to_owned());
                    State::BracketStart { offset: index }
                }
                _ => return invalid(c, index),
            },
            State::BracketStart { offset } => match c {
                '"' | '\'' => State::Quote { offset, quote: c },
                _ => return invalid(c, index),
            },
            State::Quote { offset, quote } => match c {
                c if c == quote => State::QuoteEnd { offset },
                '\\' => State::EscapedQuote { offset, quote },
                c => {
                    buffer.push(c);
                    State::Quote { offset, quote }
                }
            },
            State::EscapedQuote { offset, quote } => match c {
                '\\' | '"' | '\'' => {
                    buffer.push(c);
                    State::Quote { offset, quote }
                }
                _ => {
                    return InvalidEscapeSnafu {
                        character: c,
                        offset: index,
                    }
                    .fail()
                }
            },
            State::QuoteEnd { .. } => match c {
                ']' => {
                    keys.push(std::mem::take(&mut buffer));
                    State::Continue
                }
                _ => return invalid(c, index),
            },
        };
    }

    match state {
        State::Namespace => namespace = Some(path.parse::<Namespace>()?),
        State::Continue => {}
        State::Field { start } => keys.push(path[start..].to_owned()),
        State::Dot { offset } => return EmptySegmentSnafu { offset }.fail(),
        State::BracketStart { offset } | State::QuoteEnd { offset } => {
            return UnterminatedBracketSnafu { offset }.fail()
        }
        State::Quote { offset, .. } | State::EscapedQuote { offset, .. } => {
            return UnterminatedQuoteSnafu { offset: offset + 1 }.fail()
        }
    }

    // Every non-namespace state is entered only after the namespace was parsed.
    let namespace = match namespace {
        Some(namespace) => namespace,
        None => path.parse::<Namespace>()?,
    };

    ensure!(
        namespace.is_keyed() || keys.is_empty(),
        KeysOnScalarSnafu { namespace }
    );

    Ok((namespace, keys))
}

fn invalid<T>(character: char, offset: usize) -> Result<T, PathParseError> {
    InvalidCharacterSnafu { character, offset }.fail()
}
