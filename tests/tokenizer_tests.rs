// Tokenizer behavior over single and multiple line sources.

use std::{cell::Cell, rc::Rc};
use test_case::test_case;
use tforth::lang::tokenizing::{LineSource, Token, tokenize, tokenize_from_source};

fn texts(source: &str) -> Vec<String> {
    tokenize_from_source("<test>", source)
        .unwrap()
        .iter()
        .map(|token| token.text().clone())
        .collect()
}

#[test]
fn definition_line_with_comment() {
    let tokens = tokenize_from_source("<test>", "\"level4\" : =: ; # level 4").unwrap();

    assert_eq!(tokens.len(), 4);
    assert!(tokens[0].is_string());
    assert_eq!(tokens[0].text(), "\"level4\"");
    assert_eq!(tokens[0].string_value(), Some("level4"));

    let words: Vec<&String> = tokens[1..].iter().map(Token::text).collect();
    assert_eq!(words, vec![":", "=:", ";"]);
    assert!(tokens[1..].iter().all(Token::is_word));
}

#[test_case("DUP Swap", &["dup", "swap"]; "words are lower cased")]
#[test_case("  a \t b  ", &["a", "b"]; "surrounding whitespace")]
#[test_case("# only a comment", &[]; "whole line comment")]
#[test_case("a#b # c", &["a#b"]; "hash inside a word")]
#[test_case("\"MiXeD\"", &["\"MiXeD\""]; "strings keep their case")]
#[test_case("\"abc\"def", &["\"abc\"", "def"]; "word right after a string")]
#[test_case("\"\"", &["\"\""]; "empty string")]
#[test_case("", &[]; "empty source")]
fn splits_tokens(source: &str, expected: &[&str]) {
    assert_eq!(texts(source), expected);
}

#[test_case(r#""a\tb""#, "\"a\tb\""; "tab")]
#[test_case(r#""\n\r\\\'\"""#, "\"\n\r\\'\"\""; "simple escapes")]
#[test_case(r#""\a\b\f\v""#, "\"\x07\x08\x0c\x0b\""; "control characters")]
#[test_case(r#""\101\x41""#, "\"AA\""; "octal and hex")]
#[test_case(r#""\u00e9\U0001F600""#, "\"\u{e9}\u{1F600}\""; "unicode")]
#[test_case(r#""\q""#, "\"\\q\""; "unknown escape kept")]
#[test_case(r#""\xZZ""#, "\"\\xZZ\""; "bad hex kept")]
fn resolves_escapes(source: &str, expected: &str) {
    assert_eq!(texts(source), vec![expected.to_string()]);
}

#[test]
fn strings_span_lines() {
    let tokens = tokenize_from_source("<test>", "\"first\nsecond\" after").unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text(), "\"first\nsecond\"");
    assert_eq!(tokens[0].location().line(), 1);
    assert_eq!(tokens[1].text(), "after");
    assert_eq!(tokens[1].location().line(), 2);
}

#[test]
fn unterminated_string_is_kept_at_source_end() {
    assert_eq!(texts("word \"never closed"), vec!["word", "\"never closed"]);
    assert_eq!(texts("\"trailing\\"), vec!["\"trailing\\"]);
}

#[test]
fn open_string_does_not_leak_into_next_source() {
    let sources = vec![
        LineSource::from_text("one", "\"open"),
        LineSource::from_text("two", "next"),
    ];

    let tokens: Vec<Token> = tokenize(sources).collect::<Result<_, _>>().unwrap();

    assert_eq!(tokens.len(), 2);
    assert!(tokens[0].is_string());
    assert_eq!(tokens[0].text(), "\"open");
    assert!(tokens[1].is_word());
    assert_eq!(tokens[1].location().path(), "two");
}

#[test]
fn tokens_know_where_they_came_from() {
    let tokens = tokenize_from_source("script.f", "a\n  b").unwrap();

    assert_eq!(tokens[0].location().path(), "script.f");
    assert_eq!((tokens[0].location().line(), tokens[0].location().column()), (1, 1));
    assert_eq!((tokens[1].location().line(), tokens[1].location().column()), (2, 3));
}

#[test]
fn lines_are_read_lazily() {
    let pulled = Rc::new(Cell::new(0));
    let counter = pulled.clone();

    let lines = (1..=3).map(move |index| {
        counter.set(counter.get() + 1);
        format!("line{}", index)
    });

    let mut tokens = tokenize([LineSource::new("<lazy>", lines)]);

    assert_eq!(tokens.next().unwrap().unwrap().text(), "line1");
    assert_eq!(pulled.get(), 1);

    assert_eq!(tokens.count(), 2);
    assert_eq!(pulled.get(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let error = LineSource::from_file("/definitely/not/here.f").err().unwrap();

    assert_eq!(error.kind(), tforth::runtime::error::ErrorKind::Io);
}

#[test]
fn tokenizes_a_file() {
    let path = std::env::temp_dir().join(format!("tforth-tokens-{}.f", std::process::id()));
    std::fs::write(&path, "\"greeting\" Hello\n# done\n").unwrap();

    let path_text = path.to_string_lossy().to_string();
    let tokens = tforth::lang::tokenizing::tokenize_from_file(&path_text).unwrap();

    let _ = std::fs::remove_file(&path);

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].location().path(), &path_text);
    assert_eq!(tokens[1].text(), "hello");
}

#[test_case("a\x0cb", &["a", "b"]; "form feed")]
#[test_case("a\x0bb", &["a", "b"]; "vertical tab")]
#[test_case("a\u{a0}b\u{2003}c", &["a", "b", "c"]; "unicode spaces")]
fn any_whitespace_separates(source: &str, expected: &[&str]) {
    assert_eq!(texts(source), expected);
}
