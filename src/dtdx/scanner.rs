//! Lexical states of the DTDX grammar
//!
//!     The scanner is a graph of [`StateFn`]s over [`Lex<IndentStack>`]. Scanning starts in
//!     [`NEWLINE`] so that the indentation of the first line is measured like any other.
//!
//! States
//!
//!     NEWLINE drops the line break and measures the leading whitespace of the next line.
//!     Blank lines are skipped without touching the indentation. An `indent` or `dedent`
//!     token is emitted when the width grows or shrinks (see
//!     [`indentation`](crate::dtdx::indentation)), then scanning continues in OUTER.
//!
//!     OUTER ignores whitespace and emits every single-character token. It moves to
//!         - NEWLINE       after a newline
//!         - DOUBLE_QUOTE  after `"`
//!         - SINGLE_QUOTE  after `'`
//!         - REFERENCE     after `.`
//!         - DIRECTIVE     after `#` followed by an uppercase letter
//!         - COMMENT       after any other `#`
//!         - IDENTIFIER    after a letter, `_` or `:`
//!     At end of input it closes the open indentation levels and emits `eof`.
//!
//!     The remaining states scan one token each and return to OUTER. Every lexical error
//!     ends the scan with a single error token.

use crate::dtdx::error::LexError;
use crate::dtdx::indentation::{measure, IndentStack};
use crate::dtdx::tokens::DtdxTokenType;
use crate::lexer::{Lex, StateFn};
use std::cmp::Ordering;
use unicode_general_category::{get_general_category, GeneralCategory};

/// The DTDX engine: a lexer carrying the indentation stack.
pub type DtdxLex = Lex<IndentStack>;

type State = StateFn<IndentStack>;

pub const OUTER: State = StateFn {
    name: "outer",
    run: outer,
};
pub const NEWLINE: State = StateFn {
    name: "newline",
    run: newline,
};
pub const DOUBLE_QUOTE: State = StateFn {
    name: "double_quote",
    run: double_quote,
};
pub const SINGLE_QUOTE: State = StateFn {
    name: "single_quote",
    run: single_quote,
};
pub const DIRECTIVE: State = StateFn {
    name: "directive",
    run: directive,
};
pub const COMMENT: State = StateFn {
    name: "comment",
    run: comment,
};
pub const IDENTIFIER: State = StateFn {
    name: "identifier",
    run: identifier,
};
pub const REFERENCE: State = StateFn {
    name: "reference",
    run: reference,
};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Whitespace that may indent a line.
const INDENT_CHARS: &str = " \t";

/// A letter of any script (general category L).
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// A decimal digit of any script (general category Nd).
fn is_digit(c: char) -> bool {
    matches!(get_general_category(c), GeneralCategory::DecimalNumber)
}

/// Handles all single-character tokens and delegates to the other states.
fn outer(l: &mut DtdxLex) -> Option<State> {
    loop {
        if l.is_closed() {
            return None;
        }
        let Some(c) = l.next_char() else {
            // Close the open levels before the final token.
            update_indent(l);
            l.emit(DtdxTokenType::Eof);
            return None;
        };
        if let Some(kind) = DtdxTokenType::from_punctuation(c) {
            l.emit(kind);
            continue;
        }
        match c {
            ' ' | '\t' => l.ignore(),
            '\n' => return Some(NEWLINE),
            '"' => return Some(DOUBLE_QUOTE),
            '\'' => return Some(SINGLE_QUOTE),
            '.' => return Some(REFERENCE),
            '#' => {
                return match l.peek_char() {
                    Some('A'..='Z') => Some(DIRECTIVE),
                    _ => Some(COMMENT),
                }
            }
            c if is_letter(c) || c == '_' || c == ':' => return Some(IDENTIFIER),
            c => return l.error(LexError::UnexpectedCharacter(c)),
        }
    }
}

/// Consumes a line break and the indentation of the following line.
fn newline(l: &mut DtdxLex) -> Option<State> {
    l.ignore();
    l.accept_run(INDENT_CHARS);
    if l.looking_at("\n") {
        // Blank line: skip it and measure the next one.
        l.next_char();
        return Some(NEWLINE);
    }
    update_indent(l)
}

/// Compares the pending whitespace with the indentation stack and emits indent/dedent
/// tokens.
fn update_indent(l: &mut DtdxLex) -> Option<State> {
    let width = measure(l.current());
    match width.cmp(&l.state.top()) {
        Ordering::Equal => l.ignore(),
        Ordering::Greater => {
            l.state.push(width);
            l.emit(DtdxTokenType::Indent);
        }
        Ordering::Less => {
            while width < l.state.top() {
                l.emit(DtdxTokenType::Dedent);
                l.state.pop();
            }
            let expected = l.state.top();
            if expected != width {
                return l.error(LexError::InconsistentDedent {
                    expected,
                    found: width,
                });
            }
        }
    }
    Some(OUTER)
}

/// Handles values of the form `"..."`.
fn double_quote(l: &mut DtdxLex) -> Option<State> {
    quote(l, "\"")
}

/// Handles values of the form `'...'`.
fn single_quote(l: &mut DtdxLex) -> Option<State> {
    quote(l, "'")
}

fn quote(l: &mut DtdxLex, delimiter: &str) -> Option<State> {
    l.ignore(); // drop the opening delimiter
    l.accept_to(delimiter);
    if !l.looking_at(delimiter) {
        let text = l.current().to_owned();
        return l.error(LexError::RunawayQuote(text));
    }
    l.emit(DtdxTokenType::Quote);
    l.next_char();
    l.ignore(); // drop the closing delimiter
    Some(OUTER)
}

/// Handles `#UPPERCASE` directives.
fn directive(l: &mut DtdxLex) -> Option<State> {
    l.accept_run(UPPERCASE);
    l.emit(DtdxTokenType::Directive);
    Some(OUTER)
}

/// Handles `#` comments, up to the end of the line.
fn comment(l: &mut DtdxLex) -> Option<State> {
    l.accept_to("");
    l.emit(DtdxTokenType::Comment);
    Some(OUTER)
}

/// Handles identifiers (NMTOKEN-like names).
fn identifier(l: &mut DtdxLex) -> Option<State> {
    l.accept_while(|c| is_letter(c) || is_digit(c) || c == '_');
    l.emit(DtdxTokenType::Identifier);
    Some(OUTER)
}

/// Handles the reference ellipsis `...`.
fn reference(l: &mut DtdxLex) -> Option<State> {
    l.accept_run(".");
    if l.current() != "..." {
        let text = l.current().to_owned();
        return l.error(LexError::MalformedReference(text));
    }
    l.emit(DtdxTokenType::Reference);
    Some(OUTER)
}
