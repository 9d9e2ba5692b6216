use omar::{
    BackRef, CharClass, CharRange, CharSet, Check, Error, NamedClass, Node, parse_pattern,
};

fn parse_ok(pattern: &str) -> Node {
    parse_pattern(pattern).unwrap_or_else(|err| panic!("parser failed for {pattern:?}: {err}"))
}

fn lit(text: &str) -> Node {
    Node::literal(text).unwrap()
}

fn repeat(child: Node, min: usize, max: Option<usize>, greedy: bool) -> Node {
    Node::repeat(child, min, max, greedy).unwrap()
}

fn choice(children: Vec<Node>) -> Node {
    Node::choice(children).unwrap()
}

fn set(chars: &str) -> Node {
    Node::Class(CharClass::Set(CharSet::new(chars).unwrap()))
}

fn range(from: char, to: char) -> CharClass {
    CharClass::Range(CharRange { from, to })
}

fn dot() -> Node {
    Node::Class(CharClass::Named(NamedClass::Dot))
}

#[test]
fn test_literal_runs() {
    assert_eq!(parse_ok("abc"), lit("abc"));
    assert_eq!(parse_ok(""), Node::empty());
    assert_eq!(
        parse_ok("a.c"),
        Node::Sequence(vec![lit("a"), dot(), lit("c")])
    );
}

#[test]
fn test_escapes_coalesce_into_literals() {
    assert_eq!(parse_ok("a\\x62c"), lit("abc"));
    assert_eq!(parse_ok("\\t\\n"), lit("\t\n"));
    assert_eq!(parse_ok("a\\.b"), lit("a.b"));
    assert_eq!(parse_ok("\\u0041\\u{42}"), lit("AB"));
}

#[test]
fn test_anchors_and_boundaries() {
    assert_eq!(
        parse_ok("^a$"),
        Node::Sequence(vec![
            Node::Check(Check::StartAnchor),
            lit("a"),
            Node::Check(Check::EndAnchor),
        ])
    );
    assert_eq!(
        parse_ok("\\bword\\B"),
        Node::Sequence(vec![
            Node::Check(Check::WordBoundary),
            lit("word"),
            Node::Check(Check::NotWordBoundary),
        ])
    );
}

#[test]
fn test_quantifiers() {
    assert_eq!(parse_ok("a*"), repeat(lit("a"), 0, None, true));
    assert_eq!(parse_ok("a+?"), repeat(lit("a"), 1, None, false));
    assert_eq!(parse_ok("a{2,5}"), repeat(lit("a"), 2, Some(5), true));
    assert_eq!(parse_ok("a{3}"), repeat(lit("a"), 3, Some(3), true));
    assert_eq!(parse_ok("a{3,}"), repeat(lit("a"), 3, None, true));
    assert_eq!(parse_ok(".*"), repeat(dot(), 0, None, true));
}

#[test]
fn test_quantifier_binds_last_run_character() {
    assert_eq!(
        parse_ok("ab+"),
        Node::Sequence(vec![lit("a"), repeat(lit("b"), 1, None, true)])
    );
    assert_eq!(
        parse_ok("abc{2}d"),
        Node::Sequence(vec![
            lit("ab"),
            repeat(lit("c"), 2, Some(2), true),
            lit("d"),
        ])
    );
    // Escaped atoms quantify the same way as run characters.
    assert_eq!(
        parse_ok("a\\d*"),
        Node::Sequence(vec![
            lit("a"),
            repeat(Node::Class(CharClass::Named(NamedClass::Digit)), 0, None, true),
        ])
    );
    assert_eq!(
        parse_ok("a\\n*"),
        Node::Sequence(vec![lit("a"), repeat(lit("\n"), 0, None, true)])
    );
}

#[test]
fn test_groups() {
    assert_eq!(parse_ok("(a)"), Node::capture(lit("a")));
    assert_eq!(parse_ok("()"), Node::capture(Node::empty()));
    assert_eq!(parse_ok("(?:ab)"), lit("ab"));
    assert_eq!(
        parse_ok("(a(b)c)"),
        Node::capture(Node::Sequence(vec![
            lit("a"),
            Node::capture(lit("b")),
            lit("c"),
        ]))
    );
    assert_eq!(
        parse_ok("(?:ab)*"),
        repeat(lit("ab"), 0, None, true)
    );
    assert_eq!(
        parse_ok("(a)?"),
        repeat(Node::capture(lit("a")), 0, Some(1), true)
    );
}

#[test]
fn test_lookaround() {
    assert_eq!(
        parse_ok("(?=a)b"),
        Node::Sequence(vec![
            Node::look(omar::LookDirection::Ahead, lit("a")),
            lit("b"),
        ])
    );
    assert_eq!(
        parse_ok("(?!a)"),
        Node::look(omar::LookDirection::AheadNegated, lit("a"))
    );
    assert_eq!(
        parse_ok("(?<=a)b"),
        Node::Sequence(vec![
            Node::look(omar::LookDirection::Behind, lit("a")),
            lit("b"),
        ])
    );
    assert_eq!(
        parse_ok("(?<!a)b"),
        Node::Sequence(vec![
            Node::look(omar::LookDirection::BehindNegated, lit("a")),
            lit("b"),
        ])
    );
}

#[test]
fn test_alternation() {
    assert_eq!(
        parse_ok("ab|cd|ef"),
        choice(vec![lit("ab"), lit("cd"), lit("ef")])
    );
    assert_eq!(
        parse_ok("a|"),
        choice(vec![lit("a"), Node::empty()])
    );
    assert_eq!(
        parse_ok("(a|b)c"),
        Node::Sequence(vec![
            Node::capture(choice(vec![lit("a"), lit("b")])),
            lit("c"),
        ])
    );
    // Alternation spans the whole group, not just the last atom.
    assert_eq!(
        parse_ok("(?:ab|c)d"),
        Node::Sequence(vec![choice(vec![lit("ab"), lit("c")]), lit("d")])
    );
}

#[test]
fn test_character_classes() {
    assert_eq!(parse_ok("[abc]"), set("abc"));
    assert_eq!(
        parse_ok("[^abc]"),
        Node::Class(CharClass::Negated(Box::new(CharClass::Set(
            CharSet::new("abc").unwrap()
        ))))
    );
    assert_eq!(
        parse_ok("[a-z0-9_]"),
        Node::Class(CharClass::Union(vec![
            range('a', 'z'),
            range('0', '9'),
            CharClass::Set(CharSet::new("_").unwrap()),
        ]))
    );
    assert_eq!(
        parse_ok("[abc]*"),
        repeat(set("abc"), 0, None, true)
    );
    assert_eq!(
        parse_ok("[\\d]"),
        Node::Class(CharClass::Named(NamedClass::Digit))
    );
}

#[test]
fn test_backreferences() {
    let group = Node::capture(repeat(lit("a"), 1, None, true));
    assert_eq!(
        parse_ok("(a+)\\1"),
        Node::Sequence(vec![
            group.clone(),
            Node::BackRef(BackRef::resolved(1, group).unwrap()),
        ])
    );

    // Numbering follows opening order among capturing groups, so the inner
    // group of `((a)\2)` is group 2 and is closed when referenced.
    let inner = Node::capture(lit("a"));
    assert_eq!(
        parse_ok("((a)\\2)"),
        Node::capture(Node::Sequence(vec![
            inner.clone(),
            Node::BackRef(BackRef::resolved(2, inner).unwrap()),
        ]))
    );
}

#[test]
fn test_backreference_to_open_group_stays_unresolved() {
    // One group has closed when `\1` appears, satisfying the numbering
    // check, but group 1 itself is still open.
    let node = parse_ok("((a)\\1)");
    let Node::Capture(body) = node else {
        panic!("expected capture");
    };
    let Node::Sequence(children) = *body else {
        panic!("expected sequence");
    };
    let Node::BackRef(backref) = &children[1] else {
        panic!("expected backreference");
    };
    assert_eq!(backref.number(), 1);
    assert_eq!(backref.group(), None);
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_pattern("(a"), Err(Error::MismatchedParens { pos: 0 }));
    assert_eq!(parse_pattern("a)"), Err(Error::MismatchedParens { pos: 1 }));
    assert_eq!(parse_pattern("a(b(c)"), Err(Error::MismatchedParens { pos: 1 }));
    assert_eq!(parse_pattern("*"), Err(Error::NothingToRepeat { pos: 0 }));
    assert_eq!(parse_pattern("a|*"), Err(Error::NothingToRepeat { pos: 2 }));
    assert_eq!(
        parse_pattern("a{5,2}"),
        Err(Error::InvalidBounds {
            min: 5,
            max: Some(2)
        })
    );
    assert_eq!(
        parse_pattern("a{0,0}"),
        Err(Error::InvalidBounds {
            min: 0,
            max: Some(0)
        })
    );
    assert_eq!(
        parse_pattern("\\9"),
        Err(Error::InvalidBackRef { pos: 0, number: 9 })
    );
    assert_eq!(
        parse_pattern("(a)\\2"),
        Err(Error::InvalidBackRef { pos: 3, number: 2 })
    );
    assert_eq!(parse_pattern("[a"), Err(Error::UnterminatedClass { pos: 0 }));
    assert_eq!(parse_pattern("a\\x4g"), Err(Error::InvalidEscape { pos: 1 }));
    assert_eq!(parse_pattern("(?>a)"), Err(Error::Unrecognized { pos: 0 }));
}

#[test]
fn test_real_world_patterns() {
    assert!(parse_pattern("https?://[a-z.-]+\\.[a-z]+").is_ok());
    assert!(parse_pattern("^[\\w.+-]+@[\\w.-]+\\.\\w+$").is_ok());
    assert!(parse_pattern("(\\d{1,2})/(\\d{1,2})/(\\d{4})").is_ok());
    assert!(parse_pattern("\"([^\"]*)\"\\s*:\\s*\"([^\"]*)\"").is_ok());
    assert!(parse_pattern("(?<=\\$)\\d+(?:\\.\\d{2})?").is_ok());
}
