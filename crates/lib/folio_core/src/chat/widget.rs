//! Chat widget — client-side conversation state.
//!
//! [`ChatSession`] is the pure state machine: history, draft input and the
//! loading flag. [`ChatWidget`] drives a session over a [`ChatTransport`].
//!
//! The loading flag is the only concurrency guard. While a request is in
//! flight every further send is rejected with [`SendRejected::InFlight`], so
//! at most one transport call is outstanding per widget.

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

use super::transport::{ChatTransport, TransportError};
use super::{CONNECTION_APOLOGY, ChatHistory, ChatMessage, ChatRequest};

/// Why a send was refused. History is never touched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SendRejected {
    #[error("message is empty")]
    Blank,

    #[error("a message is already being sent")]
    InFlight,
}

/// Keyboard input the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter { shift: bool },
}

/// In-memory conversation for one widget instance.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: ChatHistory,
    draft: String,
    loading: bool,
}

impl ChatSession {
    /// New session seeded with a single assistant greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(greeting)],
            draft: String::new(),
            loading: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        !self.loading && !self.draft.trim().is_empty()
    }

    /// Start sending `input`.
    ///
    /// On success the user turn is already in history, the draft is cleared
    /// and the session is loading. The returned request carries the history
    /// as it was *before* the user turn was appended.
    pub fn begin_send(&mut self, input: &str) -> Result<ChatRequest, SendRejected> {
        if input.trim().is_empty() {
            return Err(SendRejected::Blank);
        }
        if self.loading {
            return Err(SendRejected::InFlight);
        }

        let history = self.messages.clone();
        self.messages.push(ChatMessage::user(input));
        self.draft.clear();
        self.loading = true;

        Ok(ChatRequest {
            message: input.to_string(),
            history,
        })
    }

    /// Send whatever is in the draft.
    pub fn submit_draft(&mut self) -> Result<ChatRequest, SendRejected> {
        let input = self.draft.clone();
        self.begin_send(&input)
    }

    /// Record the outcome of the in-flight send and leave the loading state.
    pub fn finish(&mut self, outcome: Result<String, TransportError>) {
        let reply = match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                CONNECTION_APOLOGY.to_string()
            }
        };
        self.messages.push(ChatMessage::assistant(reply));
        self.loading = false;
    }

    /// Apply a key press. Enter without Shift submits the draft.
    ///
    /// Returns a request only when the key started a send.
    pub fn on_key(&mut self, key: Key) -> Option<Result<ChatRequest, SendRejected>> {
        if self.loading && key != (Key::Enter { shift: false }) {
            // Input is disabled while loading.
            return None;
        }
        match key {
            Key::Char(c) => {
                self.draft.push(c);
                None
            }
            Key::Backspace => {
                self.draft.pop();
                None
            }
            Key::Enter { shift: true } => {
                self.draft.push('\n');
                None
            }
            Key::Enter { shift: false } => Some(self.submit_draft()),
        }
    }
}

/// A [`ChatSession`] connected to a transport.
pub struct ChatWidget<T> {
    session: Mutex<ChatSession>,
    transport: T,
}

fn lock(session: &Mutex<ChatSession>) -> MutexGuard<'_, ChatSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Leaves the loading state when dropped, even if the send never completed
/// (future dropped, transport panicked).
struct PendingSend<'a> {
    session: &'a Mutex<ChatSession>,
    finished: bool,
}

impl PendingSend<'_> {
    fn finish(mut self, outcome: Result<String, TransportError>) {
        lock(self.session).finish(outcome);
        self.finished = true;
    }
}

impl Drop for PendingSend<'_> {
    fn drop(&mut self) {
        if !self.finished {
            lock(self.session).finish(Err(TransportError::Interrupted));
        }
    }
}

impl<T: ChatTransport> ChatWidget<T> {
    pub fn new(greeting: impl Into<String>, transport: T) -> Self {
        Self {
            session: Mutex::new(ChatSession::new(greeting)),
            transport,
        }
    }

    fn session(&self) -> MutexGuard<'_, ChatSession> {
        lock(&self.session)
    }

    /// Snapshot of the conversation so far.
    pub fn messages(&self) -> ChatHistory {
        self.session().messages().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.session().is_loading()
    }

    /// Latest message in the conversation.
    pub fn last_message(&self) -> Option<ChatMessage> {
        self.session().messages().last().cloned()
    }

    /// Send `input` and wait for the reply to land in history.
    ///
    /// Transport failures are not returned: they show up as the fixed
    /// connection apology in history. If this future is dropped before the
    /// reply arrives, the apology is recorded and loading is cleared.
    pub async fn submit(&self, input: &str) -> Result<(), SendRejected> {
        let request = self.session().begin_send(input)?;
        let pending = PendingSend {
            session: &self.session,
            finished: false,
        };
        debug!(history_len = request.history.len(), "sending chat message");

        let outcome = self.transport.send(&request).await;
        pending.finish(outcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::chat::Role;

    const GREETING: &str = "Hi! Ask me anything.";

    #[test]
    fn new_session_has_greeting_only() {
        let session = ChatSession::new(GREETING);
        assert_eq!(session.messages(), [ChatMessage::assistant(GREETING)]);
        assert!(!session.is_loading());
    }

    #[test]
    fn blank_input_is_rejected_without_mutation() {
        let mut session = ChatSession::new(GREETING);
        for input in ["", "   ", "\n\t "] {
            assert_eq!(session.begin_send(input), Err(SendRejected::Blank));
        }
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_loading());
    }

    #[test]
    fn begin_send_appends_user_and_sends_prior_history() {
        let mut session = ChatSession::new(GREETING);
        session.set_draft("Hello");

        let req = session.submit_draft().expect("accepted");

        assert_eq!(req.message, "Hello");
        assert_eq!(req.history, [ChatMessage::assistant(GREETING)]);
        assert_eq!(session.messages().last(), Some(&ChatMessage::user("Hello")));
        assert_eq!(session.draft(), "");
        assert!(session.is_loading());
    }

    #[test]
    fn second_send_while_loading_is_rejected() {
        let mut session = ChatSession::new(GREETING);
        session.begin_send("first").expect("accepted");

        assert_eq!(session.begin_send("second"), Err(SendRejected::InFlight));
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn finish_appends_reply_or_apology_and_clears_loading() {
        let mut session = ChatSession::new(GREETING);
        session.begin_send("one").expect("accepted");
        session.finish(Ok("reply one".into()));
        assert!(!session.is_loading());
        assert_eq!(
            session.messages().last(),
            Some(&ChatMessage::assistant("reply one"))
        );

        session.begin_send("two").expect("accepted");
        session.finish(Err(TransportError::Status(500)));
        assert!(!session.is_loading());
        assert_eq!(
            session.messages().last(),
            Some(&ChatMessage::assistant(CONNECTION_APOLOGY))
        );
    }

    #[test]
    fn enter_submits_and_shift_enter_inserts_newline() {
        let mut session = ChatSession::new(GREETING);
        for c in "Hi".chars() {
            assert!(session.on_key(Key::Char(c)).is_none());
        }
        assert!(session.on_key(Key::Enter { shift: true }).is_none());
        session.on_key(Key::Char('!'));
        assert_eq!(session.draft(), "Hi\n!");

        let req = session
            .on_key(Key::Enter { shift: false })
            .expect("submitted")
            .expect("accepted");
        assert_eq!(req.message, "Hi\n!");
    }

    #[test]
    fn keys_are_ignored_while_loading() {
        let mut session = ChatSession::new(GREETING);
        session.begin_send("pending").expect("accepted");

        assert!(session.on_key(Key::Char('x')).is_none());
        assert_eq!(session.draft(), "");
        assert!(!session.can_send());
        assert_eq!(
            session.on_key(Key::Enter { shift: false }),
            Some(Err(SendRejected::Blank))
        );
    }

    struct CountingTransport {
        calls: AtomicUsize,
        release: Arc<Notify>,
        reply: Result<&'static str, u16>,
    }

    #[async_trait]
    impl ChatTransport for CountingTransport {
        async fn send(&self, _request: &ChatRequest) -> Result<String, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            self.reply
                .map(str::to_string)
                .map_err(TransportError::Status)
        }
    }

    fn widget(reply: Result<&'static str, u16>) -> (Arc<ChatWidget<CountingTransport>>, Arc<Notify>) {
        let release = Arc::new(Notify::new());
        let transport = CountingTransport {
            calls: AtomicUsize::new(0),
            release: release.clone(),
            reply,
        };
        (Arc::new(ChatWidget::new(GREETING, transport)), release)
    }

    #[tokio::test]
    async fn rapid_submits_make_one_transport_call() {
        let (widget, release) = widget(Ok("Test reply"));

        let first = tokio::spawn({
            let widget = widget.clone();
            async move { widget.submit("Hello").await }
        });
        while widget.transport.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        assert!(widget.is_loading());
        assert_eq!(widget.submit("Hello again").await, Err(SendRejected::InFlight));
        assert_eq!(widget.transport.calls.load(Ordering::SeqCst), 1);

        release.notify_one();
        first.await.expect("join").expect("accepted");

        assert!(!widget.is_loading());
        assert_eq!(
            widget.messages(),
            [
                ChatMessage::assistant(GREETING),
                ChatMessage::user("Hello"),
                ChatMessage::assistant("Test reply"),
            ]
        );
    }

    #[tokio::test]
    async fn transport_failure_becomes_local_apology() {
        let (widget, release) = widget(Err(500));
        release.notify_one();

        widget.submit("Hello").await.expect("accepted");

        let last = widget.last_message().expect("message");
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, CONNECTION_APOLOGY);
        assert!(!widget.is_loading());
    }

    #[tokio::test]
    async fn dropped_submit_clears_loading() {
        let (widget, _release) = widget(Ok("never sent"));

        let timed_out = tokio::time::timeout(Duration::from_millis(20), widget.submit("Hello")).await;
        assert!(timed_out.is_err());

        assert!(!widget.is_loading());
        assert_eq!(
            widget.messages(),
            [
                ChatMessage::assistant(GREETING),
                ChatMessage::user("Hello"),
                ChatMessage::assistant(CONNECTION_APOLOGY),
            ]
        );

        // The next send is accepted and reaches the transport.
        let again = tokio::time::timeout(Duration::from_millis(20), widget.submit("again")).await;
        assert!(again.is_err());
        assert_eq!(widget.transport.calls.load(Ordering::SeqCst), 2);
    }

    struct PanickingTransport;

    #[async_trait]
    impl ChatTransport for PanickingTransport {
        async fn send(&self, _request: &ChatRequest) -> Result<String, TransportError> {
            panic!("transport blew up");
        }
    }

    #[tokio::test]
    async fn transport_panic_clears_loading() {
        let widget = Arc::new(ChatWidget::new(GREETING, PanickingTransport));

        let joined = tokio::spawn({
            let widget = widget.clone();
            async move { widget.submit("Hello").await }
        })
        .await;
        assert!(joined.unwrap_err().is_panic());

        assert!(!widget.is_loading());
        assert_eq!(
            widget.last_message(),
            Some(ChatMessage::assistant(CONNECTION_APOLOGY))
        );
        assert_eq!(widget.session().begin_send("again").map(|r| r.message), Ok("again".into()));
    }

    #[tokio::test]
    async fn blank_submit_never_reaches_transport() {
        let (widget, _release) = widget(Ok("unused"));

        assert_eq!(widget.submit("  ").await, Err(SendRejected::Blank));
        assert_eq!(widget.transport.calls.load(Ordering::SeqCst), 0);
        assert_eq!(widget.messages().len(), 1);
    }
}
