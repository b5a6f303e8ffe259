//! State-function lexing engine
//!
//!     A [`Lex`] owns a [`Cursor`] over one source text, a start state and a piece of
//!     scanner-specific session state `S` (the DTDX scanner keeps its indentation stack
//!     there). Running the engine repeatedly calls the current [`StateFn`], which reads
//!     through the cursor, emits zero or more tokens and returns the next state. `None`
//!     ends the run.
//!
//!     Tokens go to one of two sinks:
//!         - [`Lex::run`] drives the states on the calling thread and collects the tokens.
//!         - [`Lex::start`] moves the engine onto a producer thread and streams tokens
//!           through a bounded channel to the returned [`TokenStream`].
//!
//!     Errors are in-band: [`Lex::error`] delivers a single token of kind
//!     [`TokenType::ERROR`] and stops the run. Nothing is delivered after it.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::cursor::Cursor;
use super::stream::TokenStream;
use super::token::{Token, TokenType};

/// Tokens the producer may run ahead of the consumer.
pub const DEFAULT_LOOKAHEAD: usize = 2;

/// One state of a lexer state machine.
///
/// `name` only shows up in trace logs.
pub struct StateFn<S> {
    pub name: &'static str,
    pub run: fn(&mut Lex<S>) -> Option<StateFn<S>>,
}

impl<S> Clone for StateFn<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for StateFn<S> {}

impl<S> fmt::Debug for StateFn<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateFn").field(&self.name).finish()
    }
}

enum Sink {
    Buffer(Vec<Token>),
    Channel(mpsc::Sender<Token>),
}

pub struct Lex<S> {
    cursor: Cursor,
    start_state: StateFn<S>,
    /// Scanner-owned session state.
    pub state: S,
    sink: Sink,
    closed: bool,
}

impl<S: Default> Lex<S> {
    pub fn new(source: impl Into<Arc<str>>, start_state: StateFn<S>) -> Self {
        Self::with_state(source, start_state, S::default())
    }
}

impl<S> Lex<S> {
    pub fn with_state(source: impl Into<Arc<str>>, start_state: StateFn<S>, state: S) -> Self {
        Lex {
            cursor: Cursor::new(source),
            start_state,
            state,
            sink: Sink::Buffer(Vec::new()),
            closed: false,
        }
    }

    /// Runs the state machine to completion on this thread and returns every token.
    pub fn run(mut self) -> Vec<Token> {
        self.drive();
        match self.sink {
            Sink::Buffer(tokens) => tokens,
            Sink::Channel(_) => Vec::new(),
        }
    }

    /// Starts producing tokens on a dedicated thread with the default lookahead.
    pub fn start(self) -> TokenStream
    where
        S: Send + 'static,
    {
        self.start_with_lookahead(DEFAULT_LOOKAHEAD)
    }

    /// Starts producing tokens on a dedicated thread.
    ///
    /// The producer blocks once `lookahead` tokens are waiting for the consumer.
    ///
    /// # Panics
    ///
    /// Panics if `lookahead` is zero.
    pub fn start_with_lookahead(mut self, lookahead: usize) -> TokenStream
    where
        S: Send + 'static,
    {
        assert!(lookahead > 0, "lookahead must be at least one token");
        let (sender, receiver) = mpsc::channel(lookahead);
        self.sink = Sink::Channel(sender);
        debug!(
            lookahead,
            source_len = self.cursor.source().len(),
            "starting lexer"
        );
        let producer = thread::spawn(move || self.drive());
        TokenStream::new(receiver, producer)
    }

    fn drive(&mut self) {
        let mut state = Some(self.start_state);
        while let Some(current) = state {
            if self.closed {
                break;
            }
            trace!(
                state = current.name,
                offset = self.cursor.position(),
                "enter state"
            );
            state = (current.run)(self);
        }
        self.closed = true;
    }

    fn deliver(&mut self, token: Token) {
        if self.closed {
            return;
        }
        match &mut self.sink {
            Sink::Buffer(tokens) => tokens.push(token),
            Sink::Channel(sender) => {
                if sender.blocking_send(token).is_err() {
                    debug!(
                        offset = self.cursor.position(),
                        "token stream closed by consumer, stopping"
                    );
                    self.closed = true;
                }
            }
        }
    }

    /// True once the run has ended, was cancelled, or produced its error token.
    ///
    /// State functions that loop without returning should stop when this is set.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Emits the pending text as a token of `kind` and drops it from the cursor.
    pub fn emit(&mut self, kind: impl Into<TokenType>) {
        let token = Token::new(kind.into(), self.cursor.current(), self.cursor.span());
        self.cursor.ignore();
        trace!(kind = %token.kind, value = %token.value, "emit");
        self.deliver(token);
    }

    /// Emits the terminal error token carrying `message` and ends the run.
    ///
    /// Written as `return l.error(...)` from a state function.
    pub fn error(&mut self, message: impl fmt::Display) -> Option<StateFn<S>> {
        let message = message.to_string();
        debug!(offset = self.cursor.start(), %message, "lexical error");
        let token = Token::new(TokenType::ERROR, message, self.cursor.span());
        self.deliver(token);
        self.closed = true;
        None
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn next_char(&mut self) -> Option<char> {
        self.cursor.next_char()
    }

    pub fn backup(&mut self) {
        self.cursor.backup()
    }

    pub fn peek_char(&mut self) -> Option<char> {
        self.cursor.peek_char()
    }

    pub fn accept(&mut self, chars: &str) -> bool {
        self.cursor.accept(chars)
    }

    pub fn accept_run(&mut self, chars: &str) {
        self.cursor.accept_run(chars)
    }

    pub fn accept_while(&mut self, predicate: impl Fn(char) -> bool) {
        self.cursor.accept_while(predicate)
    }

    pub fn accept_to(&mut self, chars: &str) {
        self.cursor.accept_to(chars)
    }

    pub fn looking_at(&self, prefix: &str) -> bool {
        self.cursor.looking_at(prefix)
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    pub fn current(&self) -> &str {
        self.cursor.current()
    }

    pub fn span(&self) -> Range<usize> {
        self.cursor.span()
    }

    pub fn ignore(&mut self) {
        self.cursor.ignore()
    }
}
