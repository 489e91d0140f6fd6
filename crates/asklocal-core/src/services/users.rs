use std::sync::Arc;

use crate::domain::User;
use crate::error::DomainError;
use crate::ports::{Repositories, UserRepository};

/// User listing and self-deletion.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            users: repos.users.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.list().await?)
    }

    /// Delete a user along with their questions, answers and
    /// recommendations. Only the user themself may do this.
    pub async fn delete_user(&self, caller_id: i32, user_id: i32) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;
        if caller_id != user.id {
            return Err(DomainError::Authorization {
                action: "delete",
                entity: "user",
            });
        }
        self.users.delete(user_id).await?;
        tracing::info!(user_id, "User deleted");
        Ok(user)
    }
}
