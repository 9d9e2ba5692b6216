//! Context-sensitive tokenization of pattern source text.
//!
//! The meaning of a character depends on where it appears: bracket
//! expressions use their own escape grammar and are consumed by a dedicated
//! sub-scan, quantifier braces only mean repetition when they parse as
//! bounds, and `(` greedily matches the longest group opener.

use super::{
    Error, Result,
    ast::{CharClass, CharRange, CharSet, LookDirection, NamedClass},
};

pub mod token;

pub use self::token::{Escape, GroupKind, PosToken, Quantifier, Token};

/// Characters that terminate a plain literal run.
fn is_meta(c: char) -> bool {
    matches!(
        c,
        '^' | '$' | '.' | '\\' | '[' | '(' | ')' | '?' | '*' | '+' | '{' | '|'
    )
}

/// A member collected while scanning a bracket expression.
enum ClassItem {
    Char(char),
    Class(CharClass),
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    lookahead: Option<PosToken>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            lookahead: None,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Returns the next token without consuming it.
    ///
    /// # Errors
    ///
    /// If the upcoming byte sequence is not a valid token, an [`Error`] is
    /// returned.
    pub fn peek(&mut self) -> Result<Option<&PosToken>> {
        if self.lookahead.is_none() {
            self.lookahead = self.scan_token()?;
        }
        Ok(self.lookahead.as_ref())
    }

    /// Returns the next token, advancing past it.
    ///
    /// # Errors
    ///
    /// If the upcoming byte sequence is not a valid token, an [`Error`] is
    /// returned.
    pub fn next_token(&mut self) -> Result<Option<PosToken>> {
        if let Some(token) = self.lookahead.take() {
            return Ok(Some(token));
        }
        self.scan_token()
    }

    fn scan_token(&mut self) -> Result<Option<PosToken>> {
        let pos = self.pos;
        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let token = match c {
            '.' => Token::Dot,
            '|' => Token::Pipe,
            ')' => Token::RParen,
            '^' => Token::Caret,
            '$' => Token::Dollar,
            '?' | '*' | '+' | '{' => self.scan_quantifier(c, pos)?,
            '(' => Token::Group(self.scan_group(pos)?),
            '[' => Token::Class(self.scan_class(pos)?),
            '\\' => Token::Escape(self.scan_escape(pos)?),
            _ => {
                while let Some(next) = self.peek_char()
                    && !is_meta(next)
                {
                    self.pos += next.len_utf8();
                }
                Token::Run(self.input[pos..self.pos].to_string())
            }
        };

        Ok(Some(PosToken { pos, token }))
    }

    fn scan_quantifier(&mut self, first: char, pos: usize) -> Result<Token> {
        let (min, max) = match first {
            '?' => (0, Some(1)),
            '*' => (0, None),
            '+' => (1, None),
            _ => self.scan_bounds(pos)?,
        };
        let lazy = self.eat('?');
        Ok(Token::Quantifier(Quantifier { min, max, lazy }))
    }

    /// Scans the remainder of `{m}`, `{m,}` or `{m,n}`.
    fn scan_bounds(&mut self, pos: usize) -> Result<(usize, Option<usize>)> {
        let min = self
            .scan_number()
            .ok_or(Error::Unrecognized { pos })?;
        let max = if self.eat(',') {
            self.scan_number()
        } else {
            Some(min)
        };
        if self.eat('}') {
            Ok((min, max))
        } else {
            Err(Error::Unrecognized { pos })
        }
    }

    fn scan_number(&mut self) -> Option<usize> {
        let start = self.pos;
        while let Some(c) = self.peek_char()
            && c.is_ascii_digit()
        {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        self.input[start..self.pos].parse().ok()
    }

    fn scan_group(&mut self, pos: usize) -> Result<GroupKind> {
        if !self.eat('?') {
            return Ok(GroupKind::Capture);
        }
        match self.advance() {
            Some(':') => Ok(GroupKind::NonCapture),
            Some('=') => Ok(GroupKind::Look(LookDirection::Ahead)),
            Some('!') => Ok(GroupKind::Look(LookDirection::AheadNegated)),
            Some('<') => match self.advance() {
                Some('=') => Ok(GroupKind::Look(LookDirection::Behind)),
                Some('!') => Ok(GroupKind::Look(LookDirection::BehindNegated)),
                _ => Err(Error::Unrecognized { pos }),
            },
            _ => Err(Error::Unrecognized { pos }),
        }
    }

    fn scan_escape(&mut self, pos: usize) -> Result<Escape> {
        let Some(c) = self.advance() else {
            return Err(Error::InvalidEscape { pos });
        };
        Ok(match c {
            'd' => Escape::Class(NamedClass::Digit),
            'D' => Escape::Class(NamedClass::NotDigit),
            'w' => Escape::Class(NamedClass::Word),
            'W' => Escape::Class(NamedClass::NotWord),
            's' => Escape::Class(NamedClass::Space),
            'S' => Escape::Class(NamedClass::NotSpace),
            'b' => Escape::Boundary { negated: false },
            'B' => Escape::Boundary { negated: true },
            '1'..='9' => {
                let start = self.pos - 1;
                while let Some(next) = self.peek_char()
                    && next.is_ascii_digit()
                {
                    self.pos += 1;
                }
                let number = self.input[start..self.pos]
                    .parse()
                    .map_err(|_| Error::InvalidEscape { pos })?;
                Escape::BackRef(number)
            }
            '0' => {
                // `\01` is an octal spelling, which the grammar rejects.
                if self.peek_char().is_some_and(|next| next.is_ascii_digit()) {
                    return Err(Error::InvalidEscape { pos });
                }
                Escape::Literal('\0')
            }
            _ => Escape::Literal(self.decode_escape(c, pos)?),
        })
    }

    /// Decodes the body of an escape that stands for a single character.
    fn decode_escape(&mut self, c: char, pos: usize) -> Result<char> {
        Ok(match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{b}',
            'f' => '\u{c}',
            '0' => '\0',
            'c' => {
                let Some(letter) = self.advance().filter(char::is_ascii_alphabetic) else {
                    return Err(Error::InvalidEscape { pos });
                };
                char::from(letter.to_ascii_uppercase() as u8 - b'A' + 1)
            }
            'x' => self.scan_hex(2, pos)?,
            'u' => {
                if self.eat('{') {
                    let start = self.pos;
                    while let Some(next) = self.peek_char()
                        && next.is_ascii_hexdigit()
                    {
                        self.pos += 1;
                    }
                    let end = self.pos;
                    if end == start || !self.eat('}') {
                        return Err(Error::InvalidEscape { pos });
                    }
                    let value = u32::from_str_radix(&self.input[start..end], 16)
                        .map_err(|_| Error::InvalidEscape { pos })?;
                    char::from_u32(value).ok_or(Error::InvalidEscape { pos })?
                } else {
                    self.scan_hex(4, pos)?
                }
            }
            _ => c,
        })
    }

    fn scan_hex(&mut self, digits: usize, pos: usize) -> Result<char> {
        let start = self.pos;
        for _ in 0..digits {
            if !self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                return Err(Error::InvalidEscape { pos });
            }
            self.pos += 1;
        }
        let value = u32::from_str_radix(&self.input[start..self.pos], 16)
            .map_err(|_| Error::InvalidEscape { pos })?;
        char::from_u32(value).ok_or(Error::InvalidEscape { pos })
    }

    /// Consumes a bracket expression up to its unescaped `]`.
    ///
    /// Members are literal characters, decoded escapes and named classes;
    /// `-` between two single characters forms a range unless its position
    /// makes it literal. Consecutive single characters coalesce into one
    /// set, and the collected members form a union (or stand alone when
    /// there is only one).
    fn scan_class(&mut self, open_pos: usize) -> Result<CharClass> {
        let negated = self.eat('^');
        let mut items = Vec::new();

        loop {
            let item = match self.peek_char() {
                None => return Err(Error::UnterminatedClass { pos: open_pos }),
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    self.scan_class_escape()?
                }
                Some(c) => {
                    self.pos += c.len_utf8();
                    ClassItem::Char(c)
                }
            };

            let from = match item {
                ClassItem::Class(class) => {
                    // A named class cannot start a range.
                    items.push(ClassItem::Class(class));
                    continue;
                }
                ClassItem::Char(c) => c,
            };

            // `-` is literal right before `]`, e.g. `[a-]`.
            let mut after = self.input[self.pos..].chars();
            if after.next() != Some('-') || after.next() == Some(']') {
                items.push(ClassItem::Char(from));
                continue;
            }
            self.pos += 1;

            let to = match self.peek_char() {
                None => return Err(Error::UnterminatedClass { pos: open_pos }),
                Some('\\') => {
                    self.pos += 1;
                    match self.scan_class_escape()? {
                        ClassItem::Char(c) => c,
                        ClassItem::Class(class) => {
                            // `[a-\d]` keeps the dash literal.
                            items.push(ClassItem::Char(from));
                            items.push(ClassItem::Char('-'));
                            items.push(ClassItem::Class(class));
                            continue;
                        }
                    }
                }
                Some(c) => {
                    self.pos += c.len_utf8();
                    c
                }
            };
            items.push(ClassItem::Class(CharClass::Range(CharRange { from, to })));
        }

        let mut members = Vec::new();
        let mut run = String::new();
        for item in items {
            match item {
                ClassItem::Char(c) => run.push(c),
                ClassItem::Class(class) => {
                    if !run.is_empty() {
                        members.push(CharClass::Set(CharSet::new(std::mem::take(&mut run))?));
                    }
                    members.push(class);
                }
            }
        }
        if !run.is_empty() {
            members.push(CharClass::Set(CharSet::new(run)?));
        }

        let class = if members.len() == 1 {
            members.remove(0)
        } else {
            CharClass::Union(members)
        };
        Ok(if negated {
            CharClass::Negated(Box::new(class))
        } else {
            class
        })
    }

    /// Decodes an escape inside a bracket expression, where `\b` is a
    /// backspace and digit escapes other than `\0` are invalid.
    fn scan_class_escape(&mut self) -> Result<ClassItem> {
        let pos = self.pos - 1;
        let Some(c) = self.advance() else {
            return Err(Error::InvalidEscape { pos });
        };
        Ok(match c {
            'd' => ClassItem::Class(CharClass::Named(NamedClass::Digit)),
            'D' => ClassItem::Class(CharClass::Named(NamedClass::NotDigit)),
            'w' => ClassItem::Class(CharClass::Named(NamedClass::Word)),
            'W' => ClassItem::Class(CharClass::Named(NamedClass::NotWord)),
            's' => ClassItem::Class(CharClass::Named(NamedClass::Space)),
            'S' => ClassItem::Class(CharClass::Named(NamedClass::NotSpace)),
            'b' => ClassItem::Char('\u{8}'),
            '1'..='9' => return Err(Error::InvalidEscape { pos }),
            _ => ClassItem::Char(self.decode_escape(c, pos)?),
        })
    }
}
