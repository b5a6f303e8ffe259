//! Consumer side of a running lexer
//!
//!     [`TokenStream`] pulls tokens from the producer thread started by
//!     [`Lex::start`](super::engine::Lex::start). The channel between them is bounded, so
//!     the producer never runs more than its lookahead ahead of the consumer.
//!
//!     Once the stream reports its end (`None`), every later call reports the end again.
//!     A consumer that stops early should call [`TokenStream::cancel`] (dropping the stream
//!     has the same effect without waiting for the producer); the producer notices on its
//!     next delivery and stops instead of blocking forever.

use std::panic;
use std::thread::JoinHandle;

use tokio::sync::mpsc;
use tracing::debug;

use super::token::Token;

pub struct TokenStream {
    receiver: mpsc::Receiver<Token>,
    producer: Option<JoinHandle<()>>,
    finished: bool,
}

impl TokenStream {
    pub(crate) fn new(receiver: mpsc::Receiver<Token>, producer: JoinHandle<()>) -> Self {
        TokenStream {
            receiver,
            producer: Some(producer),
            finished: false,
        }
    }

    /// Blocks until the next token is available, or returns `None` once the stream ended.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime (use
    /// [`TokenStream::next_token_async`] there), and re-raises a panic of the producer
    /// thread.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.receiver.blocking_recv();
        if token.is_none() {
            self.finish();
        }
        token
    }

    /// Async counterpart of [`TokenStream::next_token`].
    pub async fn next_token_async(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.receiver.recv().await;
        if token.is_none() {
            self.finish();
        }
        token
    }

    /// Stops the producer and waits for it to exit.
    ///
    /// Tokens still buffered are discarded; later calls to `next_token` return `None`.
    pub fn cancel(&mut self) {
        if !self.finished {
            debug!("token stream cancelled by consumer");
            self.receiver.close();
        }
        self.finish();
    }

    /// True once the end of the stream has been observed or the stream was cancelled.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(producer) = self.producer.take() {
            if let Err(payload) = producer.join() {
                panic::resume_unwind(payload);
            }
        }
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

impl Drop for TokenStream {
    fn drop(&mut self) {
        self.receiver.close();
    }
}
