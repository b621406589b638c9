//! Follow graph, events, and the leaderboard.

use crate::{
    ApiClient, ApiError,
    types::{Event, LeaderboardEntry},
};

impl ApiClient {
    /// Follow a user.
    pub async fn follow(&self, user_id: &str) -> Result<(), ApiError> {
        self.post_unit(&format!("/users/{user_id}/follow"), &()).await
    }

    /// Stop following a user.
    pub async fn unfollow(&self, user_id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/users/{user_id}/follow")).await
    }

    /// List upcoming events.
    pub async fn events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_json("/events").await
    }

    /// Register the current user for an event.
    pub async fn register_event(&self, event_id: &str) -> Result<(), ApiError> {
        self.post_unit(&format!("/events/{event_id}/register"), &()).await
    }

    /// Fetch the leaderboard.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.get_json("/leaderboard").await
    }
}
