// Public API behaviour on whole documents

use conf::{Document, ErrKind, NotFound, ParseError};

fn parse(input: &str) -> Document {
    match input.parse::<Document>() {
        Ok(doc) => doc,
        Err(e) => panic!("Parse error for {:?}: {}", input, e),
    }
}

#[test]
fn test_single_section_single_key() {
    let doc = parse("[a]\nx=1\n");
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.section("a").map(|s| s.len()), Some(1));
    assert_eq!(doc.get("a", "x"), Ok("1"));
}

#[test]
fn test_comments_between_lines() {
    let doc = parse("#c\n[a]\n;c2\nx=1\ny=2\n");
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get("a", "x"), Ok("1"));
    assert_eq!(doc.get("a", "y"), Ok("2"));
    assert_eq!(doc.section("a").map(|s| s.len()), Some(2));
}

#[test]
fn test_missing_section_is_not_found() {
    let doc = parse("[a]\nx=1\n[b]\ny=2\n");
    let err: NotFound = doc.get("c", "x").unwrap_err();
    assert_eq!(err.section(), "c");
    assert!(err.to_string().starts_with("not found"));
}

#[test]
fn test_missing_key_is_not_found() {
    let doc = parse("[a]\nx=1\n[b]\ny=2\n");
    assert!(doc.get("a", "y").is_err());
    assert!(doc.get("b", "x").is_err());
}

#[test]
fn test_realistic_file() {
    let doc = parse(
        "; database settings\n\
         [database]\n\
         host=db.internal\n\
         port=5432\n\
         \n\
         # credentials live elsewhere\n\
         [cache]\n\
         ttl=300\n\
         servers=a:11211,b:11211\n",
    );
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get("database", "host"), Ok("db.internal"));
    assert_eq!(doc.get("database", "port"), Ok("5432"));
    assert_eq!(doc.get("cache", "ttl"), Ok("300"));
    assert_eq!(doc.get("cache", "servers"), Ok("a:11211,b:11211"));
}

#[test]
fn test_indented_lines() {
    // Leading blanks are skipped between tokens; the key itself is kept verbatim
    let doc = parse("  [a]\n\tx=1\n   # note\n  y=2\n");
    assert_eq!(doc.get("a", "x"), Ok("1"));
    assert_eq!(doc.get("a", "y"), Ok("2"));
}

#[test]
fn test_values_are_not_trimmed_or_typed() {
    let doc = parse("[t]\nn=  42\nb=true \ne=\n");
    assert_eq!(doc.get("t", "n"), Ok("  42"));
    assert_eq!(doc.get("t", "b"), Ok("true "));
    assert_eq!(doc.get("t", "e"), Ok(""));
}

#[test]
fn test_documents_from_same_input_are_equal() {
    assert_eq!(parse("[a]\nx=1\n[b]\n"), parse("[b]\n[a]\nx=1"));
}

macro_rules! rejects {
    ($($name:ident: $input:expr => $kind:ident, $message:expr;)*) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_rejects_ $name>]() {
                    match $input.parse::<Document>() {
                        Err(ParseError::Syntax(e)) => {
                            assert_eq!(e.kind(), ErrKind::$kind, "input: {:?}", $input);
                            assert_eq!(e.to_string(), $message, "input: {:?}", $input);
                        }
                        other => panic!("Expected {} for {:?}, got: {:?}", stringify!($kind), $input, other),
                    }
                }
            }
        )*
    };
}

rejects! {
    key_before_section: "x=1\n" => KeyNotInSection, "key not in section: x";
    key_after_comment: ";c\nkey=v\n" => KeyNotInSection, "key not in section: k";
    bare_word: "hello" => KeyNotInSection, "key not in section: h";
    duplicate_section: "[a]\nx=1\n[a]\n" => DuplicateSection, "duplicate section: a";
    duplicate_empty_section: "[]\n[]\n" => DuplicateSection, "duplicate section: ";
    duplicate_key: "[a]\nx=1\nx=2\n" => DuplicateKey, "duplicate key in section: x";
    duplicate_key_after_comment: "[a]\nx=1\n#\nx=1\n" => DuplicateKey, "duplicate key in section: x";
    unclosed_section_newline: "[a\nx=1\n" => BrokenSectionName, "broken section name: a";
    unclosed_section_eof: "[abc" => BrokenSectionName, "broken section name: abc";
    unclosed_second_section: "[a]\n[b\n" => BrokenSectionName, "broken section name: b";
    key_without_equals: "[a]\nkey\n" => BrokenKeyName, "broken key name: key";
    key_without_equals_eof: "[a]\nkey" => BrokenKeyName, "broken key name: key";
}

#[test]
fn test_error_carries_line() {
    let err = "[a]\nx=1\n\n\n[a]\n".parse::<Document>().unwrap_err();
    assert_eq!(err.syntax().map(|e| e.line()), Some(5));
}
