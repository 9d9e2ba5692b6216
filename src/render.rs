//! Serialization of node trees back to pattern source.
//!
//! Rendering is precedence-aware: sub-expressions are wrapped in
//! non-capturing groups only when a following quantifier or a surrounding
//! concatenation requires it.

use std::fmt::Write as _;

use super::{
    Error, Result,
    ast::{CharClass, Check, LookDirection, NamedClass, Node},
};

/// Metacharacters outside a bracket expression.
fn is_meta(c: char) -> bool {
    matches!(
        c,
        '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
    )
}

/// Characters that need escaping inside a bracket expression.
fn is_class_meta(c: char) -> bool {
    matches!(c, '[' | ']' | '^' | '-' | '\\')
}

fn push_char(out: &mut String, c: char, in_class: bool) {
    match c {
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        c if c.is_control() => {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
        c if in_class && is_class_meta(c) => {
            out.push('\\');
            out.push(c);
        }
        c if !in_class && is_meta(c) => {
            out.push('\\');
            out.push(c);
        }
        c => out.push(c),
    }
}

/// Escapes text so every character matches literally in pattern source.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_char(&mut out, c, false);
    }
    out
}

/// Escapes text for use inside a bracket expression.
#[must_use]
pub fn escape_class(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_char(&mut out, c, true);
    }
    out
}

impl Node {
    /// Renders the node as standalone pattern source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrenderableClass`] if the tree uses a negated
    /// class or `.` as a bracket expression member.
    pub fn to_source(&self) -> Result<String> {
        let mut out = String::new();
        self.write(&mut out)?;
        Ok(out)
    }

    /// Renders the node so that a following quantifier binds to all of it.
    ///
    /// Multi-character literals and multi-element sequences, choices and
    /// repeats are wrapped in a non-capturing group; a single character, a
    /// class leaf or an already-delimited construct stands as is.
    ///
    /// # Errors
    ///
    /// Same as [`Node::to_source`].
    pub fn to_atom(&self) -> Result<String> {
        match self {
            Node::Literal(literal) => {
                let text = literal.text();
                if text.chars().nth(1).is_none() {
                    Ok(escape(text))
                } else {
                    Ok(format!("(?:{})", escape(text)))
                }
            }
            Node::Sequence(children) if children.len() == 1 => children[0].to_atom(),
            Node::Sequence(_) | Node::Choice(_) | Node::Repeat(_) => {
                Ok(format!("(?:{})", self.to_source()?))
            }
            _ => self.to_source(),
        }
    }

    /// Builds a native matching engine for the subtree.
    ///
    /// # Errors
    ///
    /// Rendering errors, plus [`Error::Engine`] if the engine rejects the
    /// serialized pattern.
    pub fn to_regex(&self) -> Result<fancy_regex::Regex> {
        fancy_regex::Regex::new(&self.to_source()?).map_err(|err| Error::Engine(err.to_string()))
    }

    /// Builds a native matching engine with inline flags, e.g. `"i"`.
    ///
    /// # Errors
    ///
    /// Same as [`Node::to_regex`].
    pub fn to_regex_with_flags(&self, flags: &str) -> Result<fancy_regex::Regex> {
        let source = self.to_source()?;
        let pattern = if flags.is_empty() {
            source
        } else {
            format!("(?{flags}:{source})")
        };
        fancy_regex::Regex::new(&pattern).map_err(|err| Error::Engine(err.to_string()))
    }

    fn write(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Literal(literal) => out.push_str(&escape(literal.text())),
            Node::Sequence(children) => {
                for child in children {
                    // A bare choice would swallow the rest of the sequence.
                    if matches!(child, Node::Choice(_)) {
                        out.push_str("(?:");
                        child.write(out)?;
                        out.push(')');
                    } else {
                        child.write(out)?;
                    }
                }
            }
            Node::Choice(choice) => {
                for (i, child) in choice.children().iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    child.write(out)?;
                }
            }
            Node::Repeat(repeat) => {
                out.push_str(&repeat.child().to_atom()?);
                write_bounds(out, repeat.min_count(), repeat.max_count());
                if !repeat.is_greedy() {
                    out.push('?');
                }
            }
            Node::Capture(child) => {
                out.push('(');
                child.write(out)?;
                out.push(')');
            }
            Node::Look(look) => {
                out.push_str(match look.direction {
                    LookDirection::Ahead => "(?=",
                    LookDirection::AheadNegated => "(?!",
                    LookDirection::Behind => "(?<=",
                    LookDirection::BehindNegated => "(?<!",
                });
                look.child.write(out)?;
                out.push(')');
            }
            Node::BackRef(backref) => {
                let _ = write!(out, "\\{}", backref.number());
            }
            Node::Class(class) => class.write(out)?,
            Node::Check(check) => out.push_str(match check {
                Check::StartAnchor => "^",
                Check::EndAnchor => "$",
                Check::WordBoundary => "\\b",
                Check::NotWordBoundary => "\\B",
            }),
        }
        Ok(())
    }
}

/// Quantifier suffix selection from repetition bounds.
fn write_bounds(out: &mut String, min: usize, max: Option<usize>) {
    match (min, max) {
        (0, Some(1)) => out.push('?'),
        (0, None) => out.push('*'),
        (1, None) => out.push('+'),
        (min, None) => {
            let _ = write!(out, "{{{min},}}");
        }
        (min, Some(max)) if min == max => {
            let _ = write!(out, "{{{min}}}");
        }
        (min, Some(max)) => {
            let _ = write!(out, "{{{min},{max}}}");
        }
    }
}

impl CharClass {
    /// Renders the class as a standalone pattern atom.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrenderableClass`] if a negated class or `.` is
    /// used as a bracket expression member.
    pub fn to_source(&self) -> Result<String> {
        let mut out = String::new();
        self.write(&mut out)?;
        Ok(out)
    }

    fn write(&self, out: &mut String) -> Result<()> {
        match self {
            CharClass::Named(named) => out.push_str(named.symbol()),
            CharClass::Negated(inner) => {
                out.push_str("[^");
                inner.write_member(out)?;
                out.push(']');
            }
            _ => {
                out.push('[');
                self.write_member(out)?;
                out.push(']');
            }
        }
        Ok(())
    }

    /// Renders the class as a member of an enclosing bracket expression.
    /// Negated classes and `.` have no such spelling.
    fn write_member(&self, out: &mut String) -> Result<()> {
        match self {
            CharClass::Set(chars) => out.push_str(&escape_class(chars.chars())),
            CharClass::Union(members) => {
                for member in members {
                    member.write_member(out)?;
                }
            }
            CharClass::Range(range) => {
                push_char(out, range.from, true);
                out.push('-');
                push_char(out, range.to, true);
            }
            CharClass::Named(NamedClass::Dot) | CharClass::Negated(_) => {
                return Err(Error::UnrenderableClass);
            }
            CharClass::Named(named) => out.push_str(named.symbol()),
        }
        Ok(())
    }
}
