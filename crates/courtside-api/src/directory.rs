//! User directory.

use courtside_core::model::User;

use crate::{ApiClient, ApiError, types::DirectoryEnvelope};

impl ApiClient {
    /// Fetch the non-administrative user listing.
    ///
    /// Used for best-effort participant enrichment and the recipient
    /// picker. Message delivery never depends on this call succeeding.
    pub async fn non_admin_users(&self) -> Result<Vec<User>, ApiError> {
        let envelope: DirectoryEnvelope = self.get_json("/users/non-admin").await?;
        Ok(envelope.users.into_iter().map(User::from).collect())
    }
}
