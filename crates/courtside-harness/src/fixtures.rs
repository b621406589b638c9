//! Fixture builders shared by harness tests.
//!
//! Timestamps are fixed: nothing in the harness reads the wall clock.

use chrono::{DateTime, TimeZone, Utc};
use courtside_core::model::{Conversation, CurrentUser, Message, Participant, User, UserType};

/// Fixed base timestamp for fixture messages.
pub fn base_time() -> DateTime<Utc> {
    // Deliberately constant; tests never depend on wall time.
    Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).single().unwrap_or_default()
}

/// Current-user fixture.
pub fn current_user(id: &str, first: &str, last: &str) -> CurrentUser {
    CurrentUser {
        id: id.into(),
        first_name: first.into(),
        last_name: last.into(),
        account_type: UserType::Player,
        email: Some(format!("{first}.{last}@example.com").to_lowercase()),
    }
}

/// Directory-user fixture.
pub fn directory_user(id: &str, name: &str) -> User {
    User { id: id.into(), name: name.into(), account_type: UserType::Player, email: None }
}

/// Named-participant fixture.
pub fn participant(id: &str, first: &str, last: &str) -> Participant {
    Participant {
        id: id.into(),
        first_name: Some(first.into()),
        last_name: Some(last.into()),
        ..Participant::default()
    }
}

/// 1:1 conversation fixture between `me` and a named other participant.
pub fn direct_conversation(id: &str, me: &str, other: Participant) -> Conversation {
    Conversation {
        id: id.into(),
        is_group: false,
        name: None,
        participants: vec![Participant::bare(me), other],
        last_message: None,
    }
}

/// Message fixture with the fixed base timestamp.
pub fn message(id: &str, conversation_id: &str, sender_id: &str, content: &str) -> Message {
    Message {
        id: id.into(),
        conversation_id: conversation_id.into(),
        sender_id: sender_id.into(),
        content: content.into(),
        created_at: base_time(),
        sender: None,
    }
}
