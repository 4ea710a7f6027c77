use super::*;

impl UserService {
    /// Returns every user ordered by email.
    pub async fn list(&self) -> AppResult<Vec<PublicUser>> {
        let users = self.user_repository.list().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    /// Returns a user by ID.
    pub async fn find_by_id(&self, user_id: UserId) -> AppResult<PublicUser> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| user_not_found(user_id))
    }

    /// Returns a user by email, matching any letter case.
    pub async fn find_by_email(&self, email: &str) -> AppResult<PublicUser> {
        self.require_by_email(email).await.map(PublicUser::from)
    }
}
