use indoc::indoc;

use crate::lexer::{MAX_WORD_LEN, TokenKind, lex};

fn snapshot(source: &str) -> String {
    lex(source)
        .iter()
        .map(|t| format!("{:?} {:?}", t.kind, t.text(source)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn words_strings_and_trivia() {
    let input = indoc! {r#"
    PUSH "hi there" # note
    PRINT
    "#};

    insta::assert_snapshot!(snapshot(input), @r##"
    Word "PUSH"
    Whitespace " "
    StringLiteral "\"hi there\""
    Whitespace " "
    Comment "# note"
    Whitespace "\n"
    Word "PRINT"
    Whitespace "\n"
    "##);
}

#[test]
fn comment_ends_word() {
    insta::assert_snapshot!(snapshot("ADD#x\nSUB"), @r##"
    Word "ADD"
    Comment "#x"
    Whitespace "\n"
    Word "SUB"
    "##);
}

#[test]
fn unterminated_string_runs_to_end() {
    insta::assert_snapshot!(snapshot("PUSH \"open\nPRINT"), @r#"
    Word "PUSH"
    Whitespace " "
    StringLiteral "\"open\nPRINT"
    "#);
}

#[test]
fn quote_inside_word_is_part_of_it() {
    insta::assert_snapshot!(snapshot("a\"b"), @r#"Word "a\"b""#);
}

#[test]
fn long_words_are_split() {
    let word = "x".repeat(MAX_WORD_LEN * 2 + 10);
    let tokens = lex(&word);

    let lens: Vec<_> = tokens.iter().map(|t| t.span.len()).collect();
    assert_eq!(lens, vec![MAX_WORD_LEN, MAX_WORD_LEN, 10]);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Word));
}

#[test]
fn long_words_split_on_char_boundaries() {
    let word = "é".repeat(200);
    let tokens = lex(&word);

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].span.len(), 254);
    assert!(tokens.iter().all(|t| t.text(&word).chars().all(|c| c == 'é')));
}

#[test]
fn empty_source() {
    assert!(lex("").is_empty());
}
