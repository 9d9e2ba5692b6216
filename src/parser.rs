//! Pattern source parsing.
//!
//! A single forward scan over the token stream drives an explicit stack of
//! open contexts: one frame per open group plus the outermost frame. Each
//! frame accumulates finished nodes and, once `|` has been seen, the
//! alternatives of a pending choice. Quantifiers always apply through one
//! centralized pop-wrap-push step, whether the preceding atom came from a
//! literal run, an escape, or a closed group.

use std::collections::HashMap;

use super::{
    Error, Result,
    ast::{BackRef, CharClass, Check, Choice, Literal, Look, LookDirection, NamedClass, Node},
    lexer::{Escape, GroupKind, Lexer, PosToken, Quantifier, Token},
};

/// Parses pattern source text into a [`Node`] tree.
///
/// # Errors
///
/// If the pattern source is invalid, an [`Error`] is returned and no
/// partial tree is produced.
pub fn parse_pattern(pattern: &str) -> Result<Node> {
    Parser::new(pattern).parse()
}

/// One open parsing context.
struct Frame {
    kind: FrameKind,
    open_pos: usize,
    parts: Vec<Node>,
    alternatives: Vec<Node>,
}

impl Frame {
    fn new(kind: FrameKind, open_pos: usize) -> Self {
        Frame {
            kind,
            open_pos,
            parts: Vec::new(),
            alternatives: Vec::new(),
        }
    }
}

enum FrameKind {
    Root,
    Capture { index: usize },
    Group,
    Look(LookDirection),
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Enclosing frames, outermost first. `current` is the innermost.
    stack: Vec<Frame>,
    current: Frame,
    captures_opened: usize,
    captures_closed: usize,
    /// Bodies of closed capture groups, keyed by group index.
    closed: HashMap<usize, Node>,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(pattern),
            stack: Vec::new(),
            current: Frame::new(FrameKind::Root, 0),
            captures_opened: 0,
            captures_closed: 0,
            closed: HashMap::new(),
        }
    }

    fn parse(mut self) -> Result<Node> {
        while let Some(PosToken { pos, token }) = self.lexer.next_token()? {
            match token {
                Token::Run(text) => self.push_run(&text)?,
                Token::Dot => self.push(Node::Class(CharClass::Named(NamedClass::Dot))),
                Token::Caret => self.push(Node::Check(Check::StartAnchor)),
                Token::Dollar => self.push(Node::Check(Check::EndAnchor)),
                Token::Pipe => self.split_alternative(),
                Token::Group(kind) => self.open_group(kind, pos),
                Token::RParen => self.close_group(pos)?,
                Token::Class(class) => self.push(Node::Class(class)),
                Token::Escape(escape) => self.push_escape(escape, pos)?,
                Token::Quantifier(quantifier) => self.apply_quantifier(quantifier, pos)?,
            }
        }

        if !self.stack.is_empty() {
            return Err(Error::MismatchedParens {
                pos: self.current.open_pos,
            });
        }
        let Frame {
            parts,
            alternatives,
            ..
        } = self.current;
        finish_body(parts, alternatives)
    }

    fn push(&mut self, node: Node) {
        self.current.parts.push(node);
    }

    /// Appends literal text, merging with a trailing literal fragment.
    fn push_text(&mut self, text: &str) -> Result<()> {
        if let Some(Node::Literal(last)) = self.current.parts.last() {
            let merged = format!("{}{}", last.text(), text);
            self.current.parts.pop();
            self.current.parts.push(Node::Literal(Literal::new(merged)?));
        } else {
            self.current.parts.push(Node::Literal(Literal::new(text)?));
        }
        Ok(())
    }

    /// Returns a quantifier token if one is next, consuming it.
    fn take_quantifier(&mut self) -> Result<Option<Quantifier>> {
        let quantifier = match self.lexer.peek()? {
            Some(PosToken {
                token: Token::Quantifier(quantifier),
                ..
            }) => Some(*quantifier),
            _ => None,
        };
        if quantifier.is_some() {
            self.lexer.next_token()?;
        }
        Ok(quantifier)
    }

    /// A plain run. A quantifier right after it binds only to the run's
    /// last character; the remainder stays literal.
    fn push_run(&mut self, text: &str) -> Result<()> {
        let Some(quantifier) = self.take_quantifier()? else {
            return self.push_text(text);
        };
        let Some(last) = text.chars().next_back() else {
            return Ok(());
        };
        let head = &text[..text.len() - last.len_utf8()];
        if !head.is_empty() {
            self.push_text(head)?;
        }
        self.push_repeat(Node::Literal(Literal::new(last.to_string())?), quantifier)
    }

    fn push_escape(&mut self, escape: Escape, pos: usize) -> Result<()> {
        match escape {
            Escape::Class(named) => self.push(Node::Class(CharClass::Named(named))),
            Escape::Boundary { negated } => self.push(Node::Check(if negated {
                Check::NotWordBoundary
            } else {
                Check::WordBoundary
            })),
            Escape::BackRef(number) => {
                // A reference is valid when its group has already closed, or
                // when at least `number` groups have closed so the numbering
                // can still work out (the group itself may be an ancestor
                // that is still open, leaving the reference unresolved).
                let backref = match self.closed.get(&number) {
                    Some(group) => BackRef::resolved(number, group.clone())?,
                    None if number > self.captures_closed => {
                        return Err(Error::InvalidBackRef { pos, number });
                    }
                    None => BackRef::new(number)?,
                };
                self.push(Node::BackRef(backref));
            }
            Escape::Literal(c) => {
                if let Some(quantifier) = self.take_quantifier()? {
                    self.push_repeat(
                        Node::Literal(Literal::new(c.to_string())?),
                        quantifier,
                    )?;
                } else {
                    self.push_text(&c.to_string())?;
                }
            }
        }
        Ok(())
    }

    fn push_repeat(&mut self, node: Node, quantifier: Quantifier) -> Result<()> {
        self.push(Node::repeat(
            node,
            quantifier.min,
            quantifier.max,
            !quantifier.lazy,
        )?);
        Ok(())
    }

    /// `|`: the accumulator so far becomes one alternative of the frame's
    /// pending choice. The frame itself stays open.
    fn split_alternative(&mut self) {
        let alternative = finish_parts(std::mem::take(&mut self.current.parts));
        self.current.alternatives.push(alternative);
    }

    fn open_group(&mut self, kind: GroupKind, pos: usize) {
        let kind = match kind {
            GroupKind::Capture => {
                self.captures_opened += 1;
                FrameKind::Capture {
                    index: self.captures_opened,
                }
            }
            GroupKind::NonCapture => FrameKind::Group,
            GroupKind::Look(direction) => FrameKind::Look(direction),
        };
        let outer = std::mem::replace(&mut self.current, Frame::new(kind, pos));
        self.stack.push(outer);
    }

    fn close_group(&mut self, pos: usize) -> Result<()> {
        let Some(outer) = self.stack.pop() else {
            return Err(Error::MismatchedParens { pos });
        };
        let Frame {
            kind,
            parts,
            alternatives,
            ..
        } = std::mem::replace(&mut self.current, outer);
        let body = finish_body(parts, alternatives)?;

        let node = match kind {
            FrameKind::Root | FrameKind::Group => body,
            FrameKind::Capture { index } => {
                let capture = Node::Capture(Box::new(body));
                self.closed.insert(index, capture.clone());
                self.captures_closed += 1;
                capture
            }
            FrameKind::Look(direction) => Node::Look(Look::new(direction, body)),
        };
        self.push(node);
        Ok(())
    }

    /// A free-standing quantifier wraps whatever was pushed last.
    fn apply_quantifier(&mut self, quantifier: Quantifier, pos: usize) -> Result<()> {
        let Some(node) = self.current.parts.pop() else {
            return Err(Error::NothingToRepeat { pos });
        };
        self.push_repeat(node, quantifier)
    }
}

/// Closes an accumulator: nothing becomes the empty sequence, a sole member
/// stands alone, anything more becomes a sequence.
fn finish_parts(mut parts: Vec<Node>) -> Node {
    match parts.len() {
        0 => Node::empty(),
        1 => parts.swap_remove(0),
        _ => Node::Sequence(parts),
    }
}

fn finish_body(parts: Vec<Node>, mut alternatives: Vec<Node>) -> Result<Node> {
    if alternatives.is_empty() {
        return Ok(finish_parts(parts));
    }
    alternatives.push(finish_parts(parts));
    Ok(Node::Choice(Choice::new(alternatives)?))
}
