//! Request and response shapes for the REST service.
//!
//! Field names are camelCase on the wire. Conversation and message payloads
//! reuse the core model types directly; everything else is defined here.

use chrono::{DateTime, Utc};
use courtside_core::model::{Conversation, CurrentUser, Message, Participant, User, UserId, UserType};
use serde::{Deserialize, Serialize};

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Plaintext password, sent over TLS only.
    pub password: String,
}

/// New-account registration form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email.
    pub email: String,
    /// Plaintext password, sent over TLS only.
    pub password: String,
    /// Requested account category.
    pub account_type: UserType,
}

/// Successful authentication: the bearer token plus the user it belongs to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Bearer token for subsequent REST and channel use.
    pub token: String,
    /// The authenticated user's profile.
    pub user: CurrentUser,
}

/// Profile responses wrap the user one level deep.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileEnvelope {
    pub user: CurrentUser,
}

/// Directory responses wrap the listing one level deep.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DirectoryEnvelope {
    pub users: Vec<DirectoryUser>,
}

/// Raw directory entry; mapped into [`User`] for the rest of the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DirectoryUser {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub account_type: UserType,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<DirectoryUser> for User {
    fn from(raw: DirectoryUser) -> Self {
        Self {
            id: raw.id,
            name: format!("{} {}", raw.first_name, raw.last_name).trim().to_string(),
            account_type: raw.account_type,
            email: raw.email,
        }
    }
}

/// A feed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-issued identifier.
    pub id: String,
    /// Author's user id.
    pub author_id: UserId,
    /// Post body.
    pub content: String,
    /// Attached image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Server-side creation time.
    pub created_at: DateTime<Utc>,
    /// Like count.
    pub likes: u64,
    /// Comments, newest last.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Server-issued identifier.
    pub id: String,
    /// Commenter's user id.
    pub commenter_id: UserId,
    /// Comment body.
    pub text: String,
    /// Server-side creation time.
    pub created_at: DateTime<Utc>,
}

/// Page-based pagination envelope metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total pages available for the query.
    pub total_pages: u32,
}

/// One page of the post feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    /// Posts in server-provided order. Ordering is an untrusted backend
    /// behavior; the client preserves it verbatim.
    pub items: Vec<Post>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

/// A platform event (game, tryout, meetup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Server-issued identifier.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Scheduled time.
    pub date: DateTime<Utc>,
    /// Venue.
    pub location: String,
    /// Users registered to attend.
    #[serde(default)]
    pub registered_users: Vec<UserId>,
}

/// A leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Position, 1-based.
    pub rank: u32,
    /// Ranked user.
    pub user_id: UserId,
    /// Score in the category.
    pub score: i64,
    /// Ranking category.
    pub category: String,
}

/// Raw conversation as the history endpoints return it.
///
/// Some deployments send the latest message as a one-element `messages`
/// array instead of a `lastMessage` field; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConversationDto {
    pub id: String,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub last_message: Option<Message>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl From<ConversationDto> for Conversation {
    fn from(dto: ConversationDto) -> Self {
        let last_message = dto.last_message.or_else(|| dto.messages.into_iter().next_back());
        Self {
            id: dto.id,
            is_group: dto.is_group,
            name: dto.name,
            participants: dto.participants,
            last_message,
        }
    }
}
