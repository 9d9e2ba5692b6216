//! Character class nodes.

use super::super::{Error, Result};
use std::sync::LazyLock;

/// One character drawn from a set.
///
/// Classes are a category of their own because bracket expressions compose:
/// a union renders its members back-to-back inside one pair of brackets, and
/// only some class shapes have such a member spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// A literal set of characters, e.g. `[abc]`.
    Set(CharSet),
    /// Several classes inside one bracket expression, e.g. `[a-z0-9_]`.
    Union(Vec<CharClass>),
    /// The complement of a class, e.g. `[^abc]`.
    Negated(Box<CharClass>),
    /// An inclusive character range, e.g. `a-z`.
    Range(CharRange),
    /// A predefined class with its own spelling, e.g. `\d` or `.`.
    Named(NamedClass),
}

/// An explicit set of characters, matched one at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharSet {
    chars: String,
}

impl CharSet {
    /// # Errors
    ///
    /// Returns [`Error::EmptyClass`] if `chars` is empty.
    pub fn new(chars: impl Into<String>) -> Result<Self> {
        let chars = chars.into();
        if chars.is_empty() {
            return Err(Error::EmptyClass);
        }
        Ok(CharSet { chars })
    }

    #[must_use]
    pub fn chars(&self) -> &str {
        &self.chars
    }
}

/// An inclusive character range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharRange {
    pub from: char,
    pub to: char,
}

/// A predefined character class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamedClass {
    /// `\d`
    Digit,
    /// `\D`
    NotDigit,
    /// `\w`
    Word,
    /// `\W`
    NotWord,
    /// `\s`
    Space,
    /// `\S`
    NotSpace,
    /// `.`: any character except line terminators.
    Dot,
}

impl NamedClass {
    /// The spelling used in pattern source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            NamedClass::Digit => "\\d",
            NamedClass::NotDigit => "\\D",
            NamedClass::Word => "\\w",
            NamedClass::NotWord => "\\W",
            NamedClass::Space => "\\s",
            NamedClass::NotSpace => "\\S",
            NamedClass::Dot => ".",
        }
    }

    /// The class the symbol stands for, spelled out as an explicit
    /// definition. Definitions are built once per process and shared.
    #[must_use]
    pub fn definition(self) -> &'static CharClass {
        match self {
            NamedClass::Digit => &DIGIT,
            NamedClass::NotDigit => &NOT_DIGIT,
            NamedClass::Word => &WORD,
            NamedClass::NotWord => &NOT_WORD,
            NamedClass::Space => &SPACE,
            NamedClass::NotSpace => &NOT_SPACE,
            NamedClass::Dot => &DOT,
        }
    }
}

fn set(chars: &str) -> CharClass {
    CharClass::Set(CharSet {
        chars: chars.to_string(),
    })
}

fn range(from: char, to: char) -> CharClass {
    CharClass::Range(CharRange { from, to })
}

static DIGIT: LazyLock<CharClass> = LazyLock::new(|| range('0', '9'));

static NOT_DIGIT: LazyLock<CharClass> =
    LazyLock::new(|| CharClass::Negated(Box::new(DIGIT.clone())));

static WORD: LazyLock<CharClass> = LazyLock::new(|| {
    CharClass::Union(vec![
        range('0', '9'),
        range('A', 'Z'),
        range('a', 'z'),
        set("_"),
    ])
});

static NOT_WORD: LazyLock<CharClass> = LazyLock::new(|| CharClass::Negated(Box::new(WORD.clone())));

static SPACE: LazyLock<CharClass> = LazyLock::new(|| {
    CharClass::Union(vec![
        set(" \u{c}\n\r\t\u{b}\u{a0}\u{1680}"),
        range('\u{2000}', '\u{200a}'),
        set("\u{2028}\u{2029}\u{202f}\u{205f}\u{3000}\u{feff}"),
    ])
});

static NOT_SPACE: LazyLock<CharClass> =
    LazyLock::new(|| CharClass::Negated(Box::new(SPACE.clone())));

static DOT: LazyLock<CharClass> =
    LazyLock::new(|| CharClass::Negated(Box::new(set("\r\n\u{2028}\u{2029}"))));
