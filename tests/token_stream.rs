//! Integration tests for consuming dtdx tokens through the stream API

use dtdx::dtdx::{collect_tokens, scanner};
use dtdx::{start, tokenize, DtdxTokenType, TokenType};

fn large_document(sections: usize) -> String {
    (0..sections)
        .map(|i| format!("section{i} id=#ID\n    title?\n    para...*\n        line\n"))
        .collect()
}

#[test]
fn test_stream_yields_the_synchronous_tokens() {
    let source = large_document(200);
    let streamed: Vec<_> = start(source.as_str()).collect();
    assert_eq!(streamed, tokenize(&source));
}

#[test]
fn test_stream_ends_after_error_token() {
    let mut stream = start("a\n    b\n  c\nd");
    let mut last = None;
    while let Some(token) = stream.next_token() {
        last = Some(token);
    }
    let last = last.unwrap();
    assert_eq!(last.kind, TokenType::ERROR);
    assert_eq!(last.value, "Inconsistent dedent. Expecting 0 but found 2");
    assert_eq!(stream.next_token(), None);
    assert_eq!(stream.next_token(), None);
}

#[test]
fn test_cancel_after_first_definition() {
    let mut stream = scanner(large_document(5_000)).start_with_lookahead(1);
    let first = stream.next_token().unwrap();
    assert_eq!(first.kind, DtdxTokenType::Identifier);
    assert_eq!(first.value, "section0");

    stream.cancel();
    assert!(stream.is_finished());
    assert_eq!(stream.next_token(), None);
}

#[test]
fn test_dropping_an_unread_stream() {
    for _ in 0..50 {
        drop(start(large_document(100)));
    }
}

#[test]
fn test_collect_tokens_reports_location() {
    let source = "a\n  b='x";
    let error = collect_tokens(source, start(source)).unwrap_err();
    assert_eq!(error.to_string(), "2:6: Runaway quote: x");
}

#[tokio::test]
async fn test_async_consumer_counts_levels() {
    let mut stream = start(large_document(20));
    let (mut indents, mut dedents) = (0, 0);
    while let Some(token) = stream.next_token_async().await {
        if token.kind == DtdxTokenType::Indent {
            indents += 1;
        } else if token.kind == DtdxTokenType::Dedent {
            dedents += 1;
        }
    }
    assert_eq!(indents, 40);
    assert_eq!(dedents, 40);
}
