//! An object model for regular expressions.
//!
//! Pattern source text is parsed into an immutable tree of typed nodes
//! covering literals, character classes, quantifiers, groups, alternation,
//! lookaround, backreferences and anchors. Trees can also be built
//! programmatically, inspected for match length bounds, and serialized back
//! to normalized pattern source for a native matching engine.

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::missing_errors_doc, clippy::too_many_lines)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod render;

pub use self::{
    ast::{
        BackRef, CharClass, CharRange, CharSet, Check, Choice, Len, Literal, Look, LookDirection,
        NamedClass, Node, Repeat,
    },
    lexer::{Lexer, Token},
    parser::parse_pattern,
    render::{escape, escape_class},
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The source contains content that is not part of the grammar.
    #[error("unrecognized content in pattern at {pos}")]
    Unrecognized { pos: usize },

    /// A group was closed without being opened, or opened and never closed.
    #[error("mismatched parentheses at {pos}")]
    MismatchedParens { pos: usize },

    /// A quantifier appeared with no atom before it.
    #[error("nothing to repeat at {pos}")]
    NothingToRepeat { pos: usize },

    /// A bracket expression was opened without a closing `]`.
    #[error("unterminated character class at {pos}")]
    UnterminatedClass { pos: usize },

    /// A backslash escape that is not part of the grammar.
    #[error("invalid escape at {pos}")]
    InvalidEscape { pos: usize },

    /// A backreference to a capture group that has not been closed yet.
    #[error("invalid backreference \\{number} at {pos}")]
    InvalidBackRef { pos: usize, number: usize },

    /// A literal must contain at least one character.
    #[error("literal text must not be empty")]
    EmptyLiteral,

    /// A character set must contain at least one character.
    #[error("character set must not be empty")]
    EmptyClass,

    /// A choice must offer at least two alternatives.
    #[error("choice needs at least 2 alternatives, got {0}")]
    NotEnoughAlternatives(usize),

    /// Repeat bounds must satisfy `min <= max` and `max != 0`.
    #[error("invalid repeat bounds {{{min},{}}}", match .max { Some(n) => n.to_string(), None => String::new() })]
    InvalidBounds { min: usize, max: Option<usize> },

    /// Capture group numbers start at 1.
    #[error("capture group numbers start at 1")]
    InvalidGroupNumber,

    /// A negated class or `.` has no spelling inside a bracket expression.
    #[error("character class cannot be rendered as a bracket expression member")]
    UnrenderableClass,

    /// The serialized pattern was rejected by the matching engine.
    #[error("engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A value that can be turned into a [`Node`] tree.
///
/// Implemented for pattern source text, for [`Node`] itself (returned
/// unchanged), and for compiled engine patterns (only their source text is
/// used). Anything else is rejected at compile time by the trait bound.
pub trait Pattern {
    fn into_node(self) -> Result<Node>;
}

impl Pattern for &str {
    fn into_node(self) -> Result<Node> {
        parser::parse_pattern(self)
    }
}

impl Pattern for String {
    fn into_node(self) -> Result<Node> {
        parser::parse_pattern(&self)
    }
}

impl Pattern for &String {
    fn into_node(self) -> Result<Node> {
        parser::parse_pattern(self)
    }
}

impl Pattern for Node {
    fn into_node(self) -> Result<Node> {
        Ok(self)
    }
}

impl Pattern for &Node {
    fn into_node(self) -> Result<Node> {
        Ok(self.clone())
    }
}

impl Pattern for &fancy_regex::Regex {
    fn into_node(self) -> Result<Node> {
        parser::parse_pattern(self.as_str())
    }
}

/// Builds a [`Node`] tree from any pattern-like value.
///
/// Passing a [`Node`] is idempotent: the tree is returned unchanged.
///
/// # Errors
///
/// If the pattern source cannot be parsed, an [`Error`] is returned.
pub fn compile(pattern: impl Pattern) -> Result<Node> {
    pattern.into_node()
}
