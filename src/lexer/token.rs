use crate::ast::{CharClass, LookDirection, NamedClass};

/// A pattern source token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A maximal run of characters with no special meaning.
    Run(String),
    /// `.`
    Dot,
    /// `|`
    Pipe,
    /// `)`
    RParen,
    /// `^`
    Caret,
    /// `$`
    Dollar,
    /// `?`, `*`, `+`, `{m}`, `{m,}` or `{m,n}`, optionally lazy-suffixed.
    Quantifier(Quantifier),
    /// `(`, `(?:` or a lookaround opener.
    Group(GroupKind),
    /// A complete bracket expression.
    Class(CharClass),
    /// A backslash escape.
    Escape(Escape),
}

/// Repetition bounds. A `max` of [`None`] is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantifier {
    pub min: usize,
    pub max: Option<usize>,
    pub lazy: bool,
}

/// The kind of group a `(` opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `(`
    Capture,
    /// `(?:`
    NonCapture,
    /// `(?=`, `(?!`, `(?<=` or `(?<!`
    Look(LookDirection),
}

/// A backslash escape outside a bracket expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// `\d`, `\D`, `\w`, `\W`, `\s` or `\S`
    Class(NamedClass),
    /// `\1`, `\2`, ... with as many digits as follow.
    BackRef(usize),
    /// `\b` or `\B`
    Boundary { negated: bool },
    /// Any escape that decodes to a single character.
    Literal(char),
}

/// A [`Token`] with the source byte offset it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct PosToken {
    /// The start position of the token in the pattern source.
    pub pos: usize,
    /// The token.
    pub token: Token,
}
