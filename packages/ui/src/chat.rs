//! # Chat / regeneration state machine
//!
//! The detail view of a generated document is a linear thread: a synthetic
//! system entry, the generated content (or the fetched thread), then follow-up
//! questions and regenerations.
//!
//! ```text
//! Idle ─▶ Loading ─▶ Viewing ─▶ Sending ──────▶ Viewing
//!                       │                          ▲
//!                       └──────▶ Regenerating ─────┘
//! ```
//!
//! A user message is appended optimistically as `Pending` before the request
//! resolves. If the request fails the entry is marked `Failed` with the reason,
//! and the user can retry or discard it. Only one request is in flight at a
//! time; [`ChatState::can_send`] drives the disabled state of the controls.
//!
//! Every [`seed`](ChatState::seed) starts a new generation. Replies that
//! arrive for an earlier generation (the user moved to another document while
//! a request was in flight) are dropped.

use api::{Message, MessageRole};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatPhase {
    #[default]
    Idle,
    Loading,
    Viewing,
    Sending,
    Regenerating,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntryStatus {
    Pending,
    Sent,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatEntry {
    pub local_id: u64,
    pub role: MessageRole,
    pub content: String,
    pub status: EntryStatus,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatState {
    pub phase: ChatPhase,
    pub entries: Vec<ChatEntry>,
    /// Load / regeneration failure shown above the input.
    pub error: Option<String>,
    next_id: u64,
    generation: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, role: MessageRole, content: String, status: EntryStatus) -> u64 {
        self.next_id += 1;
        let local_id = self.next_id;
        self.entries.push(ChatEntry {
            local_id,
            role,
            content,
            status,
        });
        local_id
    }

    fn find_mut(&mut self, local_id: u64) -> Option<&mut ChatEntry> {
        self.entries.iter_mut().find(|e| e.local_id == local_id)
    }

    /// Start loading a document; replaces any previous thread with the
    /// synthetic system entry.
    pub fn seed(&mut self, title: &str) {
        self.generation += 1;
        self.entries.clear();
        self.error = None;
        self.phase = ChatPhase::Loading;
        self.push(
            MessageRole::System,
            format!("Generated {title}. Ask a follow-up question or regenerate."),
            EntryStatus::Sent,
        );
    }

    /// Show a single generated content blob.
    pub fn load_content(&mut self, content: &str) {
        if !content.trim().is_empty() {
            self.push(MessageRole::Assistant, content.to_string(), EntryStatus::Sent);
        }
        self.phase = ChatPhase::Viewing;
    }

    /// Show a fetched thread. Server-side system messages are skipped; the
    /// synthetic one from [`seed`](Self::seed) already leads the thread.
    pub fn load_thread(&mut self, messages: Vec<Message>) {
        for m in messages.into_iter().filter(|m| m.role != MessageRole::System) {
            self.push(m.role, m.content, EntryStatus::Sent);
        }
        self.phase = ChatPhase::Viewing;
    }

    pub fn load_failed(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
        self.phase = ChatPhase::Viewing;
    }

    /// Whether the input and regenerate button are enabled.
    pub fn can_send(&self) -> bool {
        self.phase == ChatPhase::Viewing
    }

    /// Optimistically append a user message. Returns its local id, or `None`
    /// if the text is empty or another request is pending.
    pub fn begin_send(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() || !self.can_send() {
            return None;
        }
        self.error = None;
        self.phase = ChatPhase::Sending;
        Some(self.push(MessageRole::User, text.to_string(), EntryStatus::Pending))
    }

    /// Settle a pending send with the server's reply or failure reason.
    ///
    /// Ignored unless `local_id` is still a pending entry of the current
    /// thread; local ids are never reused across [`seed`](Self::seed).
    pub fn resolve_send(&mut self, local_id: u64, result: Result<Message, String>) {
        if self.phase != ChatPhase::Sending {
            return;
        }
        let Some(entry) = self.find_mut(local_id) else {
            return;
        };
        if entry.status != EntryStatus::Pending {
            return;
        }
        match result {
            Ok(reply) => {
                entry.status = EntryStatus::Sent;
                self.push(MessageRole::Assistant, reply.content, EntryStatus::Sent);
            }
            Err(reason) => entry.status = EntryStatus::Failed(reason),
        }
        self.phase = ChatPhase::Viewing;
    }

    /// Re-send a failed message. Returns its text when the retry was started.
    pub fn retry_failed(&mut self, local_id: u64) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        let entry = self.find_mut(local_id)?;
        if !matches!(entry.status, EntryStatus::Failed(_)) {
            return None;
        }
        entry.status = EntryStatus::Pending;
        let text = entry.content.clone();
        self.phase = ChatPhase::Sending;
        Some(text)
    }

    /// Remove a failed message from the thread.
    pub fn discard_failed(&mut self, local_id: u64) {
        self.entries
            .retain(|e| !(e.local_id == local_id && matches!(e.status, EntryStatus::Failed(_))));
    }

    /// Start a regeneration. Returns the generation to hand back to
    /// [`resolve_regenerate`](Self::resolve_regenerate).
    pub fn begin_regenerate(&mut self) -> Option<u64> {
        if !self.can_send() {
            return None;
        }
        self.error = None;
        self.phase = ChatPhase::Regenerating;
        Some(self.generation)
    }

    /// A regeneration is appended as a new assistant entry, never replacing
    /// earlier content. Results from an earlier generation are dropped.
    pub fn resolve_regenerate(&mut self, generation: u64, result: Result<Message, String>) {
        if generation != self.generation || self.phase != ChatPhase::Regenerating {
            return;
        }
        self.phase = ChatPhase::Viewing;
        match result {
            Ok(message) => {
                self.push(MessageRole::Assistant, message.content, EntryStatus::Sent);
            }
            Err(reason) => self.error = Some(reason),
        }
    }

    /// The latest assistant content, which is what gets exported.
    pub fn transcript(&self) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.role == MessageRole::Assistant)
            .map(|e| e.content.as_str())
    }

    pub fn has_failed(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.status, EntryStatus::Failed(_)))
    }
}
