//! Scripted realtime backend.
//!
//! Mimics the observable contract of the messaging service: sends are
//! echoed back as `new_message` pushes (the sender gets their own message
//! through the channel, never locally), and creates are answered with a
//! `conversation_created` push — there is no synchronous acknowledgment.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::Duration as ChronoDuration;
use courtside_channel::wire::{ClientCommand, ServerEvent};
use courtside_core::model::{Conversation, Message, Participant};

use crate::fixtures::base_time;

/// Shared handle to the scripted server.
pub type SharedSimServer = Arc<SimServer>;

/// Snapshot of everything the server has received.
#[derive(Debug, Clone, Default)]
pub struct ServerLog {
    /// Commands in arrival order.
    pub received: Vec<ClientCommand>,
}

impl ServerLog {
    /// Count of `join_conversation` commands.
    pub fn join_count(&self) -> usize {
        self.received
            .iter()
            .filter(|c| matches!(c, ClientCommand::JoinConversation { .. }))
            .count()
    }

    /// Count of conversation-create commands (1:1 and group).
    pub fn create_count(&self) -> usize {
        self.received
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    ClientCommand::CreateConversation { .. }
                        | ClientCommand::CreateGroupConversation { .. }
                )
            })
            .count()
    }
}

struct ServerState {
    user_id: String,
    received: Vec<ClientCommand>,
    pushes: VecDeque<ServerEvent>,
    next_conversation: u64,
    next_message: u64,
    fail_next_create: Option<String>,
}

/// Scripted realtime backend.
pub struct SimServer {
    state: Mutex<ServerState>,
}

impl SimServer {
    /// Server simulating pushes for the given authenticated user.
    pub fn new(user_id: impl Into<String>) -> SharedSimServer {
        Arc::new(Self {
            state: Mutex::new(ServerState {
                user_id: user_id.into(),
                received: Vec::new(),
                pushes: VecDeque::new(),
                next_conversation: 0,
                next_message: 0,
                fail_next_create: None,
            }),
        })
    }

    /// Process a command the way the backend would.
    pub fn handle_command(&self, command: ClientCommand) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.received.push(command.clone());

        match command {
            ClientCommand::SendMessage { conversation_id, content } => {
                state.next_message += 1;
                let seq = state.next_message;
                let message = Message {
                    id: format!("m-sim-{seq}"),
                    conversation_id,
                    sender_id: state.user_id.clone(),
                    content,
                    created_at: base_time() + ChronoDuration::seconds(i64::try_from(seq).unwrap_or(0)),
                    sender: None,
                };
                state.pushes.push_back(ServerEvent::NewMessage(message));
            }
            ClientCommand::CreateConversation { recipient_id } => {
                if let Some(message) = state.fail_next_create.take() {
                    state.pushes.push_back(ServerEvent::Error { message });
                    return;
                }
                state.next_conversation += 1;
                let conversation = Conversation {
                    id: format!("conv-sim-{}", state.next_conversation),
                    is_group: false,
                    name: None,
                    participants: vec![
                        Participant::bare(state.user_id.clone()),
                        Participant::bare(recipient_id),
                    ],
                    last_message: None,
                };
                state.pushes.push_back(ServerEvent::ConversationCreated(conversation));
            }
            ClientCommand::CreateGroupConversation { name, recipient_ids } => {
                if let Some(message) = state.fail_next_create.take() {
                    state.pushes.push_back(ServerEvent::Error { message });
                    return;
                }
                state.next_conversation += 1;
                let mut participants = vec![Participant::bare(state.user_id.clone())];
                participants.extend(recipient_ids.into_iter().map(Participant::bare));
                let conversation = Conversation {
                    id: format!("conv-sim-{}", state.next_conversation),
                    is_group: true,
                    name: Some(name),
                    participants,
                    last_message: None,
                };
                state.pushes.push_back(ServerEvent::ConversationCreated(conversation));
            }
            ClientCommand::JoinConversation { .. }
            | ClientCommand::Typing { .. }
            | ClientCommand::TypingStopped { .. } => {}
        }
    }

    /// Queue an unsolicited push (peer typing, a message from someone
    /// else, an error).
    pub fn push(&self, event: ServerEvent) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).pushes.push_back(event);
    }

    /// Make the next create command fail with a domain error.
    pub fn fail_next_create(&self, message: impl Into<String>) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).fail_next_create =
            Some(message.into());
    }

    /// Next pending push, if any.
    pub fn pop_push(&self) -> Option<ServerEvent> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).pushes.pop_front()
    }

    /// True while pushes are pending.
    pub fn has_pending_pushes(&self) -> bool {
        !self.state.lock().unwrap_or_else(PoisonError::into_inner).pushes.is_empty()
    }

    /// Everything received so far.
    pub fn log(&self) -> ServerLog {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        ServerLog { received: state.received.clone() }
    }
}
