use super::{
    super::{Error, Result},
    class::CharClass,
    len::Len,
};

/// A single construct in a pattern's object model.
///
/// Nodes are immutable once built: composite kinds own their children and no
/// mutation API exists, so finished trees can be read and shared freely.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Exact fixed text.
    Literal(Literal),
    /// Ordered concatenation. May be empty, matching only the empty string.
    Sequence(Vec<Node>),
    /// Ordered alternation between at least two alternatives.
    Choice(Choice),
    /// Bounded repetition of one child.
    Repeat(Repeat),
    /// A capturing group. The group index is assigned externally, by order
    /// of opening parentheses among capturing groups only.
    Capture(Box<Node>),
    /// A zero-width lookaround assertion.
    Look(Look),
    /// A zero-width reference to an earlier capture's match.
    BackRef(BackRef),
    /// One character out of a class.
    Class(CharClass),
    /// A zero-width positional assertion.
    Check(Check),
}

impl Node {
    /// An empty sequence, matching only the empty string.
    #[must_use]
    pub const fn empty() -> Self {
        Node::Sequence(Vec::new())
    }

    pub fn literal(text: impl Into<String>) -> Result<Self> {
        Ok(Node::Literal(Literal::new(text)?))
    }

    #[must_use]
    pub fn sequence(children: Vec<Node>) -> Self {
        Node::Sequence(children)
    }

    pub fn choice(children: Vec<Node>) -> Result<Self> {
        Ok(Node::Choice(Choice::new(children)?))
    }

    pub fn repeat(child: Node, min: usize, max: Option<usize>, greedy: bool) -> Result<Self> {
        Ok(Node::Repeat(Repeat::new(child, min, max, greedy)?))
    }

    #[must_use]
    pub fn capture(child: Node) -> Self {
        Node::Capture(Box::new(child))
    }

    #[must_use]
    pub fn look(direction: LookDirection, child: Node) -> Self {
        Node::Look(Look::new(direction, child))
    }

    pub fn backref(number: usize) -> Result<Self> {
        Ok(Node::BackRef(BackRef::new(number)?))
    }

    /// The shortest length of text this node can match.
    #[must_use]
    pub fn min_length(&self) -> Len {
        match self {
            Node::Literal(literal) => Len::Finite(literal.text.chars().count()),
            Node::Sequence(children) => children
                .iter()
                .fold(Len::ZERO, |sum, child| sum + child.min_length()),
            Node::Choice(choice) => choice
                .children
                .iter()
                .map(Node::min_length)
                .reduce(Len::min)
                .unwrap_or(Len::ZERO),
            Node::Repeat(repeat) => repeat.child.min_length().times(Some(repeat.min)),
            Node::Capture(child) => child.min_length(),
            Node::Look(_) | Node::Check(_) => Len::ZERO,
            Node::BackRef(backref) => backref
                .resolved
                .as_deref()
                .map_or(Len::Unknown, Node::min_length),
            Node::Class(_) => Len::Finite(1),
        }
    }

    /// The longest length of text this node can match.
    #[must_use]
    pub fn max_length(&self) -> Len {
        match self {
            Node::Literal(literal) => Len::Finite(literal.text.chars().count()),
            Node::Sequence(children) => children
                .iter()
                .fold(Len::ZERO, |sum, child| sum + child.max_length()),
            Node::Choice(choice) => choice
                .children
                .iter()
                .map(Node::max_length)
                .reduce(Len::max)
                .unwrap_or(Len::ZERO),
            Node::Repeat(repeat) => repeat.child.max_length().times(repeat.max),
            Node::Capture(child) => child.max_length(),
            Node::Look(_) | Node::Check(_) => Len::ZERO,
            Node::BackRef(backref) => backref
                .resolved
                .as_deref()
                .map_or(Len::Unknown, Node::max_length),
            Node::Class(_) => Len::Finite(1),
        }
    }

    /// The exact match length when every match has the same length, or
    /// [`None`] when the length varies or cannot be determined.
    #[must_use]
    pub fn fixed_length(&self) -> Option<usize> {
        match (self.min_length(), self.max_length()) {
            (Len::Finite(min), Len::Finite(max)) if min == max => Some(min),
            _ => None,
        }
    }
}

/// Exact text, matched character for character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    text: String,
}

impl Literal {
    /// # Errors
    ///
    /// Returns [`Error::EmptyLiteral`] if `text` is empty.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::EmptyLiteral);
        }
        Ok(Literal { text })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An ordered alternation.
#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    children: Vec<Node>,
}

impl Choice {
    /// # Errors
    ///
    /// Returns [`Error::NotEnoughAlternatives`] for fewer than two children.
    pub fn new(children: Vec<Node>) -> Result<Self> {
        if children.len() < 2 {
            return Err(Error::NotEnoughAlternatives(children.len()));
        }
        Ok(Choice { children })
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// Bounded repetition of one child. A `max` of [`None`] is unbounded.
#[derive(Clone, Debug, PartialEq)]
pub struct Repeat {
    child: Box<Node>,
    min: usize,
    max: Option<usize>,
    greedy: bool,
}

impl Repeat {
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] unless `min <= max` and `max != 0`.
    pub fn new(child: Node, min: usize, max: Option<usize>, greedy: bool) -> Result<Self> {
        if max.is_some_and(|max| max < min || max == 0) {
            return Err(Error::InvalidBounds { min, max });
        }
        Ok(Repeat {
            child: Box::new(child),
            min,
            max,
            greedy,
        })
    }

    #[must_use]
    pub fn child(&self) -> &Node {
        &self.child
    }

    #[must_use]
    pub fn min_count(&self) -> usize {
        self.min
    }

    #[must_use]
    pub fn max_count(&self) -> Option<usize> {
        self.max
    }

    #[must_use]
    pub fn is_greedy(&self) -> bool {
        self.greedy
    }
}

/// A zero-width lookaround assertion.
#[derive(Clone, Debug, PartialEq)]
pub struct Look {
    pub direction: LookDirection,
    pub child: Box<Node>,
}

impl Look {
    #[must_use]
    pub fn new(direction: LookDirection, child: Node) -> Self {
        Look {
            direction,
            child: Box::new(child),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookDirection {
    /// `(?=`
    Ahead,
    /// `(?!`
    AheadNegated,
    /// `(?<=`
    Behind,
    /// `(?<!`
    BehindNegated,
}

/// A zero-width reference to the text matched by an earlier capture.
///
/// When the referenced group is known, the backreference borrows its length
/// bounds from it; otherwise the bounds are [`Len::Unknown`].
#[derive(Clone, Debug, PartialEq)]
pub struct BackRef {
    number: usize,
    resolved: Option<Box<Node>>,
}

impl BackRef {
    /// An unresolved backreference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroupNumber`] if `number` is zero.
    pub fn new(number: usize) -> Result<Self> {
        if number == 0 {
            return Err(Error::InvalidGroupNumber);
        }
        Ok(BackRef {
            number,
            resolved: None,
        })
    }

    /// A backreference bound to the capture it refers to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroupNumber`] if `number` is zero.
    pub fn resolved(number: usize, group: Node) -> Result<Self> {
        if number == 0 {
            return Err(Error::InvalidGroupNumber);
        }
        Ok(BackRef {
            number,
            resolved: Some(Box::new(group)),
        })
    }

    #[must_use]
    pub fn number(&self) -> usize {
        self.number
    }

    /// The capture this reference was resolved against, if any.
    #[must_use]
    pub fn group(&self) -> Option<&Node> {
        self.resolved.as_deref()
    }
}

/// A zero-width positional assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// `^`
    StartAnchor,
    /// `$`
    EndAnchor,
    /// `\b`
    WordBoundary,
    /// `\B`
    NotWordBoundary,
}
