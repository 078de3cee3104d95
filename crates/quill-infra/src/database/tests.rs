#[cfg(test)]
mod tests {
    use crate::database::entity::{post, user};
    use crate::database::sqlite_repo::{SqlitePostRepository, SqliteUserRepository};
    use quill_core::domain::{Post, User};
    use quill_core::ports::{BaseRepository, PostRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user_row(username: &str) -> user::Model {
        user::Model {
            id: uuid::Uuid::new_v4(),
            username: username.to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: chrono::Utc::now().into(),
        }
    }

    fn post_row(user_id: uuid::Uuid, content: &str) -> post::Model {
        post::Model {
            id: uuid::Uuid::new_v4(),
            content: content.to_owned(),
            user_id,
            created_at: chrono::Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn find_post_by_id_maps_to_domain() {
        let row = post_row(uuid::Uuid::new_v4(), "hello");
        let post_id = row.id;

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = SqlitePostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.id, post_id);
        assert_eq!(post.content, "hello");
    }

    #[tokio::test]
    async fn find_user_by_username_maps_to_domain() {
        let row = user_row("alice");
        let user_id = row.id;

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = SqliteUserRepository::new(db);

        let result: Option<User> = repo.find_by_username("alice").await.unwrap();

        let user = result.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn missing_username_yields_none() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![Vec::<user::Model>::new()])
            .into_connection();

        let repo = SqliteUserRepository::new(db);

        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_returns_every_row() {
        let owner = uuid::Uuid::new_v4();
        let rows = vec![post_row(owner, "one"), post_row(owner, "two")];

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![rows])
            .into_connection();

        let repo = SqlitePostRepository::new(db);

        let posts = repo.find_all().await.unwrap();
        assert_eq!(posts.len(), 2);
    }
}
