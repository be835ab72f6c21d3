use snafu::Snafu;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PathParseError {
    #[snafu(display("Path is empty."))]
    Empty,

    #[snafu(display(
        "Unknown namespace {:?}, expected one of: {}.",
        namespace,
        crate::Namespace::tokens().join(", ")
    ))]
    UnknownNamespace { namespace: String },

    #[snafu(display("Empty key segment at offset {}.", offset))]
    EmptySegment { offset: usize },

    #[snafu(display("Invalid character {:?} at offset {}.", character, offset))]
    InvalidCharacter { character: char, offset: usize },

    #[snafu(display("Unterminated quote starting at offset {}.", offset))]
    UnterminatedQuote { offset: usize },

    #[snafu(display("Unterminated bracket starting at offset {}.", offset))]
    UnterminatedBracket { offset: usize },

    #[snafu(display("Invalid escape sequence \"\\{}\" at offset {}.", character, offset))]
    InvalidEscape { character: char, offset: usize },

    #[snafu(display("Namespace {} holds a single value and cannot have keys.", namespace))]
    KeysOnScalar { namespace: crate::Namespace },
}
