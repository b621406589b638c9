//! Property-based tests for the conversation model.
//!
//! Display-name resolution must be a pure, deterministic function of the
//! conversation plus the current user id, and the list upsert must never
//! produce duplicate ids.

#![allow(clippy::unwrap_used)]

use courtside_core::model::{
    Conversation, LOADING_PLACEHOLDER, Participant, upsert,
};
use proptest::prelude::*;

fn participant_strategy() -> impl Strategy<Value = Participant> {
    (
        "[a-z]{1,8}",
        proptest::option::of("[A-Za-z]{1,10}"),
        proptest::option::of("[A-Za-z]{1,10}"),
        proptest::option::of("[a-z]{1,8}@[a-z]{1,8}\\.com"),
    )
        .prop_map(|(id, first_name, last_name, email)| Participant {
            id,
            first_name,
            last_name,
            email,
            profile_picture: None,
        })
}

fn conversation_strategy() -> impl Strategy<Value = Conversation> {
    (
        "[a-z0-9]{1,8}",
        any::<bool>(),
        proptest::option::of("[A-Za-z ]{0,12}"),
        proptest::collection::vec(participant_strategy(), 0..4),
    )
        .prop_map(|(id, is_group, name, participants)| Conversation {
            id,
            is_group,
            name,
            participants,
            last_message: None,
        })
}

proptest! {
    #[test]
    fn prop_display_name_is_deterministic(
        conv in conversation_strategy(),
        current in "[a-z]{1,8}",
    ) {
        let first = conv.display_name(&current);
        let second = conv.display_name(&current);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_display_name_is_never_empty(
        conv in conversation_strategy(),
        current in "[a-z]{1,8}",
    ) {
        prop_assert!(!conv.display_name(&current).is_empty());
    }

    #[test]
    fn prop_unresolvable_participants_yield_placeholder(
        id in "[a-z0-9]{1,8}",
        current in "[a-z]{1,8}",
        is_group in any::<bool>(),
    ) {
        let conv = Conversation {
            id,
            is_group,
            name: None,
            participants: Vec::new(),
            last_message: None,
        };
        prop_assert_eq!(conv.display_name(&current), LOADING_PLACEHOLDER);
    }

    #[test]
    fn prop_upsert_never_duplicates_ids(
        convs in proptest::collection::vec(conversation_strategy(), 0..10),
    ) {
        let mut list = Vec::new();
        for conv in convs {
            let expected_front = conv.id.clone();
            upsert(&mut list, conv);

            prop_assert_eq!(&list[0].id, &expected_front);
            let mut ids: Vec<_> = list.iter().map(|c| c.id.clone()).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), list.len());
        }
    }
}
