//! Conversation/session view-model state machine.
//!
//! [`App`] is the single source of truth for "what conversations exist" and
//! "what is in the active conversation". It reconciles three independent
//! asynchronous inputs: paginated historical fetches, live channel pushes,
//! and user intents. It is a pure state machine: it consumes
//! [`AppEvent`]s and intent method calls, and produces [`AppAction`]
//! instructions for the runtime to execute. No I/O, no clock reads; time
//! arrives inside events.
//!
//! # Responsibilities
//!
//! - Conversation list with upsert-by-id (never a duplicate entry).
//! - Active message log, append-only in channel arrival order.
//! - Typing windows: the transient peer indicator and the self
//!   typing-start/stop protocol, both serviced by ticks.
//! - The group- and 1:1-creation workflows, validated client-side.

use std::{ops::Sub, time::Duration};

use courtside_channel::ChannelState;
use courtside_core::model::{
    Conversation, ConversationId, CurrentUser, Message, User, upsert,
};

use crate::{AppAction, AppEvent, Notice};

/// Idle window after which the peer typing indicator clears.
pub const DEFAULT_PEER_TYPING_WINDOW: Duration = Duration::from_millis(800);

/// Pause after which a typing-stop notice is emitted.
pub const DEFAULT_TYPING_STOP_AFTER: Duration = Duration::from_secs(3);

/// View-model tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Idle window for the peer typing indicator.
    pub peer_typing_window: Duration,
    /// Pause before the self typing-stop notice.
    pub typing_stop_after: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            peer_typing_window: DEFAULT_PEER_TYPING_WINDOW,
            typing_stop_after: DEFAULT_TYPING_STOP_AFTER,
        }
    }
}

/// Conversation/session view-model.
///
/// Generic over the instant type so the same machine runs on real and
/// virtual time.
#[derive(Debug, Clone)]
pub struct App<I> {
    config: AppConfig,
    channel_state: ChannelState,
    current_user: Option<CurrentUser>,
    directory: Vec<User>,
    conversations: Vec<Conversation>,
    active_conversation: Option<ConversationId>,
    messages: Vec<Message>,
    composer: String,
    loading_conversations: bool,
    loading_messages: bool,
    creating_conversation: bool,
    dialog_open: bool,
    /// Last peer typing notice for the active conversation.
    peer_typing_since: Option<I>,
    /// Last local keystroke while a typing-start notice is outstanding.
    self_typing_since: Option<I>,
}

impl<I> App<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create an idle view-model.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            channel_state: ChannelState::Absent,
            current_user: None,
            directory: Vec::new(),
            conversations: Vec::new(),
            active_conversation: None,
            messages: Vec::new(),
            composer: String::new(),
            loading_conversations: false,
            loading_messages: false,
            creating_conversation: false,
            dialog_open: false,
            peer_typing_since: None,
            self_typing_since: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent<I>) -> Vec<AppAction> {
        match event {
            AppEvent::SessionEstablished { user } => {
                self.current_user = Some(user);
                self.loading_conversations = true;
                vec![AppAction::FetchConversations, AppAction::FetchDirectory, AppAction::Render]
            }
            AppEvent::ChannelStateChanged(state) => {
                self.channel_state = state;
                vec![AppAction::Render]
            }
            AppEvent::ConversationsLoaded(mut conversations) => {
                for conversation in &mut conversations {
                    conversation.enrich_participants(&self.directory, self.current_user.as_ref());
                }
                self.conversations = conversations;
                self.loading_conversations = false;

                // Auto-select the first conversation in server order when
                // none is active yet.
                let first = match &self.active_conversation {
                    None => self.conversations.first().map(|c| c.id.clone()),
                    Some(_) => None,
                };
                match first {
                    Some(id) => self.activate(id),
                    None => vec![AppAction::Render],
                }
            }
            AppEvent::ConversationsFailed { message } => {
                self.loading_conversations = false;
                vec![
                    AppAction::Notify(Notice::error(format!(
                        "Failed to load conversations: {message}"
                    ))),
                    AppAction::Render,
                ]
            }
            AppEvent::DirectoryLoaded(users) => {
                self.directory = users;
                // Reconciliation pass: enrich everything already loaded now
                // that richer identity data exists.
                let current_user = self.current_user.clone();
                for conversation in &mut self.conversations {
                    conversation.enrich_participants(&self.directory, current_user.as_ref());
                }
                vec![AppAction::Render]
            }
            AppEvent::MessagesLoaded { conversation_id, messages } => {
                if self.active_conversation.as_deref() != Some(conversation_id.as_str()) {
                    // Superseded fetch; never applied.
                    return vec![];
                }
                self.messages = messages;
                self.loading_messages = false;
                vec![AppAction::Render]
            }
            AppEvent::MessagesFailed { conversation_id, message } => {
                if self.active_conversation.as_deref() != Some(conversation_id.as_str()) {
                    return vec![];
                }
                self.loading_messages = false;
                vec![
                    AppAction::Notify(Notice::error(format!("Failed to load messages: {message}"))),
                    AppAction::Render,
                ]
            }
            AppEvent::MessageReceived(message) => self.on_message_received(message),
            AppEvent::TypingReceived { conversation_id, now } => {
                if self.active_conversation.as_deref() != Some(conversation_id.as_str()) {
                    return vec![];
                }
                // Repeat notices inside the window re-arm it: the indicator
                // stays visible continuously, no flicker.
                self.peer_typing_since = Some(now);
                vec![AppAction::Render]
            }
            AppEvent::ConversationCreated(conversation) => {
                self.on_conversation_created(conversation)
            }
            AppEvent::ChannelError { message } => {
                self.creating_conversation = false;
                vec![AppAction::Notify(Notice::error(message)), AppAction::Render]
            }
            AppEvent::Tick { now } => self.on_tick(now),
        }
    }

    fn on_message_received(&mut self, message: Message) -> Vec<AppAction> {
        let active = self.active_conversation.as_deref() == Some(message.conversation_id.as_str());

        // The list preview updates regardless of which conversation is
        // active; the visible log only for the active one.
        if let Some(conversation) =
            self.conversations.iter_mut().find(|c| c.id == message.conversation_id)
        {
            conversation.last_message = Some(message.clone());
        }
        if active {
            self.messages.push(message);
        }
        vec![AppAction::Render]
    }

    fn on_conversation_created(&mut self, mut conversation: Conversation) -> Vec<AppAction> {
        conversation.enrich_participants(&self.directory, self.current_user.as_ref());
        let id = conversation.id.clone();
        upsert(&mut self.conversations, conversation);

        self.active_conversation = Some(id.clone());
        self.messages.clear();
        self.loading_messages = false;
        self.creating_conversation = false;
        self.dialog_open = false;

        vec![
            AppAction::JoinConversation { conversation_id: id },
            AppAction::Notify(Notice::success("Conversation ready")),
            AppAction::Render,
        ]
    }

    fn on_tick(&mut self, now: I) -> Vec<AppAction> {
        let mut actions = Vec::new();

        if let Some(since) = self.peer_typing_since {
            if now - since >= self.config.peer_typing_window {
                self.peer_typing_since = None;
                actions.push(AppAction::Render);
            }
        }

        if let Some(since) = self.self_typing_since {
            if now - since >= self.config.typing_stop_after {
                self.self_typing_since = None;
                if let Some(conversation_id) = self.active_conversation.clone() {
                    actions.push(AppAction::NotifyTypingStopped { conversation_id });
                }
            }
        }

        actions
    }

    // --- user intents ----------------------------------------------------

    /// Select a conversation from the list.
    ///
    /// Fetches its history and joins its push room. Unknown ids and
    /// re-selecting the active conversation are no-ops.
    pub fn select_conversation(&mut self, conversation_id: ConversationId) -> Vec<AppAction> {
        if self.active_conversation.as_deref() == Some(conversation_id.as_str()) {
            return vec![AppAction::Render];
        }
        if !self.conversations.iter().any(|c| c.id == conversation_id) {
            return vec![];
        }
        self.activate(conversation_id)
    }

    /// Update the message composer, emitting a typing-start notice at most
    /// once per idle period and re-arming the typing-stop timer.
    pub fn input_changed(&mut self, text: impl Into<String>, now: I) -> Vec<AppAction> {
        self.composer = text.into();
        let Some(conversation_id) = self.active_conversation.clone() else {
            return vec![AppAction::Render];
        };

        let mut actions = Vec::new();
        if self.self_typing_since.is_none() {
            actions.push(AppAction::NotifyTypingStarted { conversation_id });
        }
        self.self_typing_since = Some(now);
        actions.push(AppAction::Render);
        actions
    }

    /// Send the composed message.
    ///
    /// Requires non-empty trimmed content and an active conversation.
    /// Clears the composer and cancels the pending typing-stop timer. No
    /// optimistic append: the message shows up when the server pushes it
    /// back.
    pub fn send_message(&mut self) -> Vec<AppAction> {
        let Some(conversation_id) = self.active_conversation.clone() else {
            return vec![];
        };
        let content = self.composer.trim().to_string();
        if content.is_empty() {
            return vec![];
        }

        self.composer.clear();
        self.self_typing_since = None;
        vec![AppAction::SendMessage { conversation_id, content }, AppAction::Render]
    }

    /// Open the "new message" dialog.
    pub fn open_dialog(&mut self) -> Vec<AppAction> {
        self.dialog_open = true;
        vec![AppAction::Render]
    }

    /// Close the "new message" dialog.
    pub fn close_dialog(&mut self) -> Vec<AppAction> {
        self.dialog_open = false;
        vec![AppAction::Render]
    }

    /// Start a 1:1 conversation with `recipient_id`.
    ///
    /// If a non-group conversation with that participant already exists it
    /// is simply activated; otherwise a create request goes out and the
    /// `conversation_created` push completes the flow (there is no
    /// synchronous acknowledgment).
    pub fn start_conversation(&mut self, recipient_id: impl Into<String>) -> Vec<AppAction> {
        let recipient_id = recipient_id.into();
        let Some(user) = self.current_user.clone() else {
            return vec![];
        };

        let existing = self
            .conversations
            .iter()
            .find(|c| c.is_direct_with(&user.id, &recipient_id))
            .map(|c| c.id.clone());
        if let Some(id) = existing {
            self.dialog_open = false;
            self.creating_conversation = false;
            let mut actions = self.select_conversation(id);
            actions.push(AppAction::Notify(Notice::info("Opening existing conversation")));
            return actions;
        }

        self.creating_conversation = true;
        vec![AppAction::CreateConversation { recipient_id }, AppAction::Render]
    }

    /// Create a named group conversation.
    ///
    /// Validated client-side: a non-empty name and at least two recipients,
    /// or nothing reaches the transport.
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        recipient_ids: Vec<String>,
    ) -> Vec<AppAction> {
        let name = name.into().trim().to_string();
        if name.is_empty() || recipient_ids.len() < 2 {
            return vec![
                AppAction::Notify(Notice::error(
                    "A group needs a name and at least two members",
                )),
                AppAction::Render,
            ];
        }

        self.creating_conversation = true;
        vec![AppAction::CreateGroupConversation { name, recipient_ids }, AppAction::Render]
    }

    fn activate(&mut self, conversation_id: ConversationId) -> Vec<AppAction> {
        self.active_conversation = Some(conversation_id.clone());
        self.messages.clear();
        self.loading_messages = true;
        self.peer_typing_since = None;
        self.self_typing_since = None;
        vec![
            AppAction::FetchMessages { conversation_id: conversation_id.clone() },
            AppAction::JoinConversation { conversation_id },
            AppAction::Render,
        ]
    }

    // --- accessors -------------------------------------------------------

    /// The authenticated user, once the session is established.
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    /// Channel lifecycle state, for the connection indicator.
    pub fn channel_state(&self) -> ChannelState {
        self.channel_state
    }

    /// All known conversations, most recently created/updated first.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Currently selected conversation id.
    pub fn active_conversation_id(&self) -> Option<&str> {
        self.active_conversation.as_deref()
    }

    /// Currently selected conversation.
    pub fn active_conversation(&self) -> Option<&Conversation> {
        let id = self.active_conversation.as_deref()?;
        self.conversations.iter().find(|c| c.id == id)
    }

    /// The active conversation's message log, in arrival order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current composer contents.
    pub fn composer(&self) -> &str {
        &self.composer
    }

    /// True while the conversation listing is loading.
    pub fn is_loading_conversations(&self) -> bool {
        self.loading_conversations
    }

    /// True while the active conversation's history is loading.
    pub fn is_loading_messages(&self) -> bool {
        self.loading_messages
    }

    /// True while a create request awaits its `conversation_created` push.
    pub fn is_creating_conversation(&self) -> bool {
        self.creating_conversation
    }

    /// True while the "new message" dialog is open.
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// True while the peer typing indicator should show.
    pub fn is_peer_typing(&self) -> bool {
        self.peer_typing_since.is_some()
    }

    /// Users offered by the recipient picker (everyone but the current
    /// user).
    pub fn recipient_candidates(&self) -> impl Iterator<Item = &User> {
        let current_id = self.current_user.as_ref().map(|u| u.id.clone());
        self.directory.iter().filter(move |user| Some(&user.id) != current_id.as_ref())
    }

    /// Display title for a conversation, resolved against the current user.
    pub fn conversation_title(&self, conversation: &Conversation) -> String {
        let current_id = self.current_user.as_ref().map_or("", |u| u.id.as_str());
        conversation.display_name(current_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use courtside_core::model::{Participant, UserType};

    use super::*;

    /// Virtual instant in milliseconds for tick-driven tests.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Ms(u64);

    impl Sub for Ms {
        type Output = Duration;
        fn sub(self, rhs: Self) -> Duration {
            Duration::from_millis(self.0 - rhs.0)
        }
    }

    fn current_user(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.into(),
            first_name: "Jo".into(),
            last_name: "Reyes".into(),
            account_type: UserType::Player,
            email: None,
        }
    }

    fn participant(id: &str, first: &str, last: &str) -> Participant {
        Participant {
            id: id.into(),
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            ..Participant::default()
        }
    }

    fn conversation(id: &str, me: &str, other_id: &str) -> Conversation {
        Conversation {
            id: id.into(),
            is_group: false,
            name: None,
            participants: vec![Participant::bare(me), participant(other_id, "Maya", "Okafor")],
            last_message: None,
        }
    }

    fn message(id: &str, conversation_id: &str, sender: &str, content: &str) -> Message {
        Message {
            id: id.into(),
            conversation_id: conversation_id.into(),
            sender_id: sender.into(),
            content: content.into(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
            sender: None,
        }
    }

    /// App with a session, directory, and two conversations, `c1` active.
    fn loaded_app() -> App<Ms> {
        let mut app = App::new(AppConfig::default());
        let _ = app.handle(AppEvent::SessionEstablished { user: current_user("me") });
        let _ = app.handle(AppEvent::ConversationsLoaded(vec![
            conversation("c1", "me", "u1"),
            conversation("c2", "me", "u2"),
        ]));
        app
    }

    #[test]
    fn session_established_starts_initial_load() {
        let mut app: App<Ms> = App::new(AppConfig::default());
        let actions = app.handle(AppEvent::SessionEstablished { user: current_user("me") });

        assert!(actions.contains(&AppAction::FetchConversations));
        assert!(actions.contains(&AppAction::FetchDirectory));
        assert!(app.is_loading_conversations());
    }

    #[test]
    fn conversations_loaded_auto_selects_first_in_server_order() {
        let app = loaded_app();
        assert_eq!(app.active_conversation_id(), Some("c1"));
        assert!(app.is_loading_messages());
    }

    #[test]
    fn auto_select_fetches_and_joins() {
        let mut app: App<Ms> = App::new(AppConfig::default());
        let _ = app.handle(AppEvent::SessionEstablished { user: current_user("me") });
        let actions =
            app.handle(AppEvent::ConversationsLoaded(vec![conversation("c1", "me", "u1")]));

        assert!(actions.contains(&AppAction::FetchMessages { conversation_id: "c1".into() }));
        assert!(actions.contains(&AppAction::JoinConversation { conversation_id: "c1".into() }));
    }

    #[test]
    fn push_for_inactive_conversation_updates_preview_only() {
        let mut app = loaded_app();
        let _ = app.handle(AppEvent::MessagesLoaded {
            conversation_id: "c1".into(),
            messages: vec![],
        });

        let _ = app.handle(AppEvent::MessageReceived(message("m9", "c2", "u2", "pssst")));

        assert!(app.messages().is_empty());
        let c2 = app.conversations().iter().find(|c| c.id == "c2").unwrap();
        assert_eq!(c2.last_message.as_ref().unwrap().content, "pssst");
    }

    #[test]
    fn push_for_active_conversation_appends_in_arrival_order() {
        let mut app = loaded_app();
        let _ = app.handle(AppEvent::MessagesLoaded {
            conversation_id: "c1".into(),
            messages: vec![message("m1", "c1", "u1", "first")],
        });

        let _ = app.handle(AppEvent::MessageReceived(message("m2", "c1", "me", "second")));
        let _ = app.handle(AppEvent::MessageReceived(message("m3", "c1", "u1", "third")));

        let contents: Vec<_> = app.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[test]
    fn stale_history_response_is_discarded() {
        let mut app = loaded_app();
        // The user switches to c2 while c1's history is still in flight.
        let _ = app.select_conversation("c2".into());

        let actions = app.handle(AppEvent::MessagesLoaded {
            conversation_id: "c1".into(),
            messages: vec![message("m1", "c1", "u1", "late")],
        });

        assert!(actions.is_empty());
        assert!(app.messages().is_empty());
        assert!(app.is_loading_messages());
    }

    #[test]
    fn typing_indicator_rearms_without_flicker() {
        let mut app = loaded_app();
        let _ = app.handle(AppEvent::TypingReceived { conversation_id: "c1".into(), now: Ms(0) });
        assert!(app.is_peer_typing());

        // Repeat notice inside the window keeps it visible.
        let _ = app.handle(AppEvent::Tick { now: Ms(500) });
        let _ = app.handle(AppEvent::TypingReceived { conversation_id: "c1".into(), now: Ms(600) });
        let _ = app.handle(AppEvent::Tick { now: Ms(1300) });
        assert!(app.is_peer_typing());

        // Window elapses with no further notice.
        let _ = app.handle(AppEvent::Tick { now: Ms(1400) });
        assert!(!app.is_peer_typing());
    }

    #[test]
    fn typing_notice_for_inactive_conversation_is_ignored() {
        let mut app = loaded_app();
        let actions =
            app.handle(AppEvent::TypingReceived { conversation_id: "c2".into(), now: Ms(0) });
        assert!(actions.is_empty());
        assert!(!app.is_peer_typing());
    }

    #[test]
    fn typing_start_emitted_once_per_idle_period() {
        let mut app = loaded_app();
        let first = app.input_changed("h", Ms(0));
        assert!(first.contains(&AppAction::NotifyTypingStarted { conversation_id: "c1".into() }));

        let second = app.input_changed("he", Ms(100));
        assert!(
            !second.contains(&AppAction::NotifyTypingStarted { conversation_id: "c1".into() })
        );

        // Pause long enough for the stop notice, then type again.
        let tick = app.handle(AppEvent::Tick { now: Ms(3200) });
        assert!(tick.contains(&AppAction::NotifyTypingStopped { conversation_id: "c1".into() }));

        let third = app.input_changed("hey", Ms(3300));
        assert!(third.contains(&AppAction::NotifyTypingStarted { conversation_id: "c1".into() }));
    }

    #[test]
    fn send_message_requires_trimmed_content_and_active_conversation() {
        let mut app = loaded_app();
        let _ = app.input_changed("   ", Ms(0));
        assert!(app.send_message().is_empty());

        let _ = app.input_changed("  hello there  ", Ms(10));
        let actions = app.send_message();
        assert!(actions.contains(&AppAction::SendMessage {
            conversation_id: "c1".into(),
            content: "hello there".into(),
        }));
        assert_eq!(app.composer(), "");

        // No optimistic append.
        assert!(app.messages().is_empty());
    }

    #[test]
    fn send_message_cancels_stop_timer_silently() {
        let mut app = loaded_app();
        let _ = app.input_changed("hello", Ms(0));
        let _ = app.send_message();

        // Well past the stop window: no stop notice, the timer was
        // cancelled rather than fired.
        let tick = app.handle(AppEvent::Tick { now: Ms(10_000) });
        assert!(
            !tick.iter().any(|a| matches!(a, AppAction::NotifyTypingStopped { .. }))
        );
    }

    #[test]
    fn start_conversation_reuses_existing_direct_thread() {
        let mut app = loaded_app();
        let _ = app.open_dialog();

        let actions = app.start_conversation("u2");

        assert!(!actions.iter().any(|a| matches!(a, AppAction::CreateConversation { .. })));
        assert_eq!(app.active_conversation_id(), Some("c2"));
        assert!(!app.is_dialog_open());
        assert!(!app.is_creating_conversation());
    }

    #[test]
    fn start_conversation_with_stranger_emits_create() {
        let mut app = loaded_app();
        let actions = app.start_conversation("u99");

        assert!(
            actions.contains(&AppAction::CreateConversation { recipient_id: "u99".into() })
        );
        assert!(app.is_creating_conversation());
    }

    #[test]
    fn create_group_validates_before_any_network() {
        let mut app = loaded_app();

        let empty_name = app.create_group("   ", vec!["u1".into(), "u2".into()]);
        assert!(
            !empty_name.iter().any(|a| matches!(a, AppAction::CreateGroupConversation { .. }))
        );

        let one_member = app.create_group("Squad", vec!["u1".into()]);
        assert!(
            !one_member.iter().any(|a| matches!(a, AppAction::CreateGroupConversation { .. }))
        );
        assert!(!app.is_creating_conversation());

        let ok = app.create_group("Squad", vec!["u1".into(), "u2".into()]);
        assert!(ok.contains(&AppAction::CreateGroupConversation {
            name: "Squad".into(),
            recipient_ids: vec!["u1".into(), "u2".into()],
        }));
        assert!(app.is_creating_conversation());
    }

    #[test]
    fn conversation_created_upserts_activates_and_joins() {
        let mut app = loaded_app();
        let _ = app.handle(AppEvent::MessagesLoaded {
            conversation_id: "c1".into(),
            messages: vec![message("m1", "c1", "u1", "old")],
        });
        let _ = app.open_dialog();
        let _ = app.start_conversation("u99");

        let mut created = conversation("c9", "me", "u99");
        created.participants = vec![Participant::bare("me"), Participant::bare("u99")];
        let actions = app.handle(AppEvent::ConversationCreated(created.clone()));

        assert!(actions.contains(&AppAction::JoinConversation { conversation_id: "c9".into() }));
        assert_eq!(app.active_conversation_id(), Some("c9"));
        assert!(app.messages().is_empty());
        assert!(!app.is_dialog_open());
        assert!(!app.is_creating_conversation());

        // A second push with the same id replaces rather than duplicates.
        let _ = app.handle(AppEvent::ConversationCreated(created));
        let count = app.conversations().iter().filter(|c| c.id == "c9").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn channel_error_rolls_back_creating_state() {
        let mut app = loaded_app();
        let _ = app.start_conversation("u99");
        assert!(app.is_creating_conversation());

        let actions = app.handle(AppEvent::ChannelError { message: "boom".into() });
        assert!(!app.is_creating_conversation());
        assert!(actions.iter().any(|a| matches!(a, AppAction::Notify(n) if n.kind == crate::NoticeKind::Error)));
    }

    #[test]
    fn directory_load_triggers_enrichment_reconciliation() {
        let mut app: App<Ms> = App::new(AppConfig::default());
        let _ = app.handle(AppEvent::SessionEstablished { user: current_user("me") });

        // Conversation arrives before the directory: participants bare.
        let bare = Conversation {
            id: "c1".into(),
            is_group: false,
            name: None,
            participants: vec![Participant::bare("me"), Participant::bare("u1")],
            last_message: None,
        };
        let _ = app.handle(AppEvent::ConversationsLoaded(vec![bare]));
        let pending = app.conversations()[0].clone();
        assert_eq!(app.conversation_title(&pending), "Loading...");

        let directory = vec![User {
            id: "u1".into(),
            name: "Maya Okafor".into(),
            account_type: UserType::Player,
            email: None,
        }];
        let _ = app.handle(AppEvent::DirectoryLoaded(directory));

        let enriched = app.conversations()[0].clone();
        assert_eq!(app.conversation_title(&enriched), "Maya Okafor");
    }
}
