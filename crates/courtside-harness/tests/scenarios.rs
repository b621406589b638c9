//! End-to-end scenarios for the messaging core.
//!
//! Two styles, both running production code:
//!
//! - Full-loop runs: `Runtime` + `SimDriver` with scripted intents, then
//!   assertions on what actually crossed the wire.
//! - Manual pumps: `App` + `Bridge` + `SimServer` driven event by event,
//!   for assertions on the view-model state itself.

#![allow(clippy::unwrap_used)]

use courtside_app::{App, AppAction, AppConfig, AppEvent, Bridge, Driver, Runtime};
use courtside_channel::wire::{ClientCommand, ServerEvent};
use courtside_core::{MemoryTokenStore, SessionStore};
use courtside_harness::{
    ScriptStep, SharedSimServer, SimDriver, SimInstant, SimServer,
    fixtures::{current_user, direct_conversation, directory_user, message, participant},
};

fn authed_session() -> SessionStore {
    SessionStore::new(MemoryTokenStore::with_token("tok"))
}

/// Route App actions through the Bridge and deliver queued commands to the
/// scripted server, exactly as the runtime would.
fn process_actions(
    app: &mut App<SimInstant>,
    bridge: &mut Bridge,
    server: &SharedSimServer,
    actions: Vec<AppAction>,
) {
    for action in actions {
        match action {
            AppAction::JoinConversation { .. }
            | AppAction::SendMessage { .. }
            | AppAction::NotifyTypingStarted { .. }
            | AppAction::NotifyTypingStopped { .. }
            | AppAction::CreateConversation { .. }
            | AppAction::CreateGroupConversation { .. } => {
                let events = bridge.process_app_action::<SimInstant>(action);
                assert!(events.is_empty(), "bridge must not synthesize events");
                for command in bridge.take_outgoing() {
                    server.handle_command(command);
                }
            }
            _ => {}
        }
    }
}

/// Deliver every pending server push into the App.
fn drain_pushes(
    app: &mut App<SimInstant>,
    bridge: &mut Bridge,
    server: &SharedSimServer,
    now: SimInstant,
) {
    while let Some(push) = server.pop_push() {
        for event in bridge.handle_server_event(push, now) {
            let actions = app.handle(event);
            process_actions(app, bridge, server, actions);
        }
    }
}

/// App loaded with `me` + two direct conversations, pumped by hand.
fn loaded_app(server: &SharedSimServer) -> (App<SimInstant>, Bridge) {
    let mut app = App::new(AppConfig::default());
    let mut bridge = Bridge::new();

    let actions = app.handle(AppEvent::SessionEstablished { user: current_user("me", "Jo", "Reyes") });
    process_actions(&mut app, &mut bridge, server, actions);

    let actions = app.handle(AppEvent::ConversationsLoaded(vec![
        direct_conversation("c1", "me", participant("u1", "Maya", "Okafor")),
        direct_conversation("c2", "me", participant("u2", "Dre", "Holt")),
    ]));
    process_actions(&mut app, &mut bridge, server, actions);

    let actions = app.handle(AppEvent::MessagesLoaded {
        conversation_id: "c1".into(),
        messages: vec![message("m1", "c1", "u1", "warmup at 6?")],
    });
    process_actions(&mut app, &mut bridge, server, actions);

    (app, bridge)
}

// --- scenario A: no stored token ----------------------------------------

#[tokio::test]
async fn scenario_a_no_token_never_joins() {
    let session = SessionStore::new(MemoryTokenStore::new());
    let server = SimServer::new("me");
    let driver = SimDriver::new(session.clone(), server.clone())
        .with_script([ScriptStep::SelectConversation("c1".into())]);

    Runtime::new(driver, session).run().await.unwrap();

    let log = server.log();
    assert_eq!(log.join_count(), 0);
    assert!(log.received.is_empty(), "nothing may reach the channel without a session");
}

#[tokio::test]
async fn scenario_a_channel_acquisition_is_null_without_token() {
    let session = SessionStore::new(MemoryTokenStore::new());
    let server = SimServer::new("me");
    let mut driver = SimDriver::new(session, server);

    let acquired = driver.connect_channel().await.unwrap();
    assert!(!acquired);
}

// --- scenario B: existing 1:1 is reused ----------------------------------

#[tokio::test]
async fn scenario_b_existing_direct_conversation_is_reused() {
    let session = authed_session();
    let server = SimServer::new("me");
    let conversations = vec![
        direct_conversation("c1", "me", participant("u1", "Maya", "Okafor")),
        direct_conversation("c2", "me", participant("u2", "Dre", "Holt")),
    ];
    let driver = SimDriver::new(session.clone(), server.clone())
        .with_profile(current_user("me", "Jo", "Reyes"))
        .with_conversations(conversations)
        .with_directory(vec![directory_user("u1", "Maya Okafor"), directory_user("u2", "Dre Holt")])
        .with_script([ScriptStep::OpenDialog, ScriptStep::StartConversation("u2".into())]);
    let observed = driver.observed();

    Runtime::new(driver, session).run().await.unwrap();

    let log = server.log();
    assert_eq!(log.create_count(), 0, "no create_conversation for an existing thread");
    // The existing conversation is activated: auto-select joined c1, the
    // reuse joined c2.
    assert!(log.received.contains(&ClientCommand::JoinConversation { conversation_id: "c2".into() }));

    let observed = observed.lock().unwrap();
    assert!(observed.notices.iter().any(|n| n.message.contains("existing conversation")));
}

#[test]
fn scenario_b_state_activates_existing_thread() {
    let server = SimServer::new("me");
    let (mut app, mut bridge) = loaded_app(&server);

    let actions = app.open_dialog();
    process_actions(&mut app, &mut bridge, &server, actions);
    let actions = app.start_conversation("u2");
    process_actions(&mut app, &mut bridge, &server, actions);

    assert_eq!(app.active_conversation_id(), Some("c2"));
    assert!(!app.is_dialog_open());
    assert_eq!(server.log().create_count(), 0);
}

// --- scenario C: group creation ------------------------------------------

#[tokio::test]
async fn scenario_c_group_creation_round_trip() {
    let session = authed_session();
    let server = SimServer::new("me");
    let driver = SimDriver::new(session.clone(), server.clone())
        .with_profile(current_user("me", "Jo", "Reyes"))
        .with_directory(vec![directory_user("u1", "Maya Okafor"), directory_user("u2", "Dre Holt")])
        .with_script([
            ScriptStep::OpenDialog,
            ScriptStep::CreateGroup { name: "Squad".into(), recipients: vec!["u1".into(), "u2".into()] },
        ]);
    let observed = driver.observed();

    Runtime::new(driver, session).run().await.unwrap();

    let log = server.log();
    assert!(log.received.contains(&ClientCommand::CreateGroupConversation {
        name: "Squad".into(),
        recipient_ids: vec!["u1".into(), "u2".into()],
    }));
    // The push completed the flow: the new group's room was joined.
    assert!(
        log.received
            .iter()
            .any(|c| matches!(c, ClientCommand::JoinConversation { conversation_id } if conversation_id == "conv-sim-1"))
    );
    let observed = observed.lock().unwrap();
    assert!(observed.notices.iter().any(|n| n.message.contains("Conversation ready")));
}

#[test]
fn scenario_c_state_after_created_push() {
    let server = SimServer::new("me");
    let (mut app, mut bridge) = loaded_app(&server);

    let actions = app.open_dialog();
    process_actions(&mut app, &mut bridge, &server, actions);
    let actions = app.create_group("Squad", vec!["u1".into(), "u2".into()]);
    process_actions(&mut app, &mut bridge, &server, actions);
    assert!(app.is_creating_conversation());

    drain_pushes(&mut app, &mut bridge, &server, SimInstant::from_millis(0));

    let active = app.active_conversation().unwrap();
    assert!(active.is_group);
    assert_eq!(app.conversation_title(active), "Squad");
    assert!(app.messages().is_empty(), "a new group starts with an empty log");
    assert!(!app.is_dialog_open());
    assert!(!app.is_creating_conversation());
}

// --- scenario D: push for an inactive conversation -----------------------

#[test]
fn scenario_d_inactive_push_updates_preview_only() {
    let server = SimServer::new("me");
    let (mut app, mut bridge) = loaded_app(&server);
    assert_eq!(app.active_conversation_id(), Some("c1"));
    let log_before: Vec<_> = app.messages().to_vec();

    server.push(ServerEvent::NewMessage(message("m7", "c2", "u2", "you up?")));
    drain_pushes(&mut app, &mut bridge, &server, SimInstant::from_millis(0));

    assert_eq!(app.messages(), log_before.as_slice(), "C1's visible log is unchanged");
    let c2 = app.conversations().iter().find(|c| c.id == "c2").unwrap();
    assert_eq!(c2.last_message.as_ref().unwrap().content, "you up?");
}

// --- send round trip ------------------------------------------------------

#[test]
fn sent_message_appears_only_via_server_echo() {
    let server = SimServer::new("me");
    let (mut app, mut bridge) = loaded_app(&server);

    let actions = app.input_changed("see you at the gym", SimInstant::from_millis(0));
    process_actions(&mut app, &mut bridge, &server, actions);
    let actions = app.send_message();
    process_actions(&mut app, &mut bridge, &server, actions);

    // Not yet: no optimistic append.
    assert_eq!(app.messages().len(), 1);

    drain_pushes(&mut app, &mut bridge, &server, SimInstant::from_millis(10));

    let last = app.messages().last().unwrap();
    assert_eq!(last.content, "see you at the gym");
    assert_eq!(last.sender_id, "me");
}

// --- channel error rolls back creation ------------------------------------

#[test]
fn create_failure_rolls_back_and_notifies() {
    let server = SimServer::new("me");
    let (mut app, mut bridge) = loaded_app(&server);
    server.fail_next_create("recipient not found");

    let actions = app.start_conversation("u99");
    process_actions(&mut app, &mut bridge, &server, actions);
    assert!(app.is_creating_conversation());

    drain_pushes(&mut app, &mut bridge, &server, SimInstant::from_millis(0));
    assert!(!app.is_creating_conversation());
}
