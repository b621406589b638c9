//! Channel-to-application translation layer.
//!
//! The [`Bridge`] adapts between the view-model's vocabulary and the wire:
//! protocol [`AppAction`]s become [`ClientCommand`]s accumulated for the
//! driver to flush, and inbound [`ServerEvent`]s become [`AppEvent`]s.
//!
//! Sending produces no synthetic events: the server pushes the sender's own
//! message back over the channel, so the log is only ever fed by
//! [`ServerEvent::NewMessage`]. This keeps the server the single authority
//! on ordering and persistence.

use courtside_channel::wire::{ClientCommand, ServerEvent};

use crate::{AppAction, AppEvent};

/// Bridge between the App and the realtime channel.
#[derive(Debug, Default)]
pub struct Bridge {
    outgoing: Vec<ClientCommand>,
}

impl Bridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an App action, queueing wire commands for protocol intents.
    ///
    /// Non-protocol actions (render, fetches, notifications) are not the
    /// bridge's concern and produce nothing.
    pub fn process_app_action<I>(&mut self, action: AppAction) -> Vec<AppEvent<I>> {
        match action {
            AppAction::JoinConversation { conversation_id } => {
                self.outgoing.push(ClientCommand::JoinConversation { conversation_id });
            }
            AppAction::SendMessage { conversation_id, content } => {
                self.outgoing.push(ClientCommand::SendMessage { conversation_id, content });
            }
            AppAction::NotifyTypingStarted { conversation_id } => {
                self.outgoing.push(ClientCommand::Typing { conversation_id });
            }
            AppAction::NotifyTypingStopped { conversation_id } => {
                self.outgoing.push(ClientCommand::TypingStopped { conversation_id });
            }
            AppAction::CreateConversation { recipient_id } => {
                self.outgoing.push(ClientCommand::CreateConversation { recipient_id });
            }
            AppAction::CreateGroupConversation { name, recipient_ids } => {
                self.outgoing
                    .push(ClientCommand::CreateGroupConversation { name, recipient_ids });
            }
            AppAction::Render
            | AppAction::Quit
            | AppAction::Notify(_)
            | AppAction::FetchConversations
            | AppAction::FetchDirectory
            | AppAction::FetchMessages { .. } => {}
        }
        vec![]
    }

    /// Translate an inbound channel event.
    ///
    /// `now` stamps time-sensitive events (typing notices) so the App's
    /// idle windows work on both real and virtual clocks.
    pub fn handle_server_event<I>(&mut self, event: ServerEvent, now: I) -> Vec<AppEvent<I>> {
        match event {
            ServerEvent::NewMessage(message) => vec![AppEvent::MessageReceived(message)],
            ServerEvent::UserTyping { conversation_id } => {
                vec![AppEvent::TypingReceived { conversation_id, now }]
            }
            ServerEvent::ConversationCreated(conversation) => {
                vec![AppEvent::ConversationCreated(conversation)]
            }
            ServerEvent::Error { message } => vec![AppEvent::ChannelError { message }],
        }
    }

    /// Take pending outgoing commands.
    pub fn take_outgoing(&mut self) -> Vec<ClientCommand> {
        std::mem::take(&mut self.outgoing)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn send_message_queues_wire_command_without_echo() {
        let mut bridge = Bridge::new();
        let events: Vec<AppEvent<std::time::Instant>> = bridge.process_app_action(
            AppAction::SendMessage { conversation_id: "c1".into(), content: "hey".into() },
        );

        // No optimistic echo: the message arrives back as a server push.
        assert!(events.is_empty());
        assert_eq!(
            bridge.take_outgoing(),
            vec![ClientCommand::SendMessage { conversation_id: "c1".into(), content: "hey".into() }]
        );
        assert!(bridge.take_outgoing().is_empty());
    }

    #[test]
    fn server_error_becomes_channel_error_event() {
        let mut bridge = Bridge::new();
        let events = bridge.handle_server_event::<std::time::Instant>(
            ServerEvent::Error { message: "conversation not found".into() },
            std::time::Instant::now(),
        );
        assert!(matches!(&events[..], [AppEvent::ChannelError { message }] if message == "conversation not found"));
    }
}
