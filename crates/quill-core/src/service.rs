//! The domain core: every user-facing operation of the posting service.
//!
//! `BlogService` sits between the HTTP boundary and the two collaborators it
//! is handed at construction (persistence, password hashing). Identity is
//! threaded in explicitly: operations that change session state take a
//! [`SessionManager`] handle, owner-gated operations take the resolved
//! caller id.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::DomainError;
use crate::ports::{PasswordService, PostRepository, SessionManager, UserRepository};

/// A feed entry: a post paired with its author's username for rendering.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub post: Post,
    pub author: String,
}

/// Result of an owner-gated post lookup.
///
/// `Denied` signals the caller should be bounced back to the feed exactly as
/// if the lookup had succeeded; it is not surfaced as an error.
#[derive(Debug)]
pub enum PostAccess {
    Granted(Post),
    Denied,
}

/// The domain core. Holds its collaborators as injected handles; carries no
/// state of its own beyond them.
pub struct BlogService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl BlogService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            posts,
            passwords,
        }
    }

    /// The shared feed.
    ///
    /// Anonymous viewers get the empty landing feed. Authenticated viewers
    /// get every post in the store exactly once, in store order (no defined
    /// sort), each paired with its author's username.
    pub async fn feed(&self, viewer: Option<Uuid>) -> Result<Vec<FeedItem>, DomainError> {
        if viewer.is_none() {
            return Ok(Vec::new());
        }

        let posts = self.posts.find_all().await?;

        let mut authors: HashMap<Uuid, String> = HashMap::new();
        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            if !authors.contains_key(&post.user_id) {
                let user = self.users.find_by_id(post.user_id).await?.ok_or_else(|| {
                    DomainError::Internal(format!("post {} has no author row", post.id))
                })?;
                authors.insert(post.user_id, user.username);
            }
            let author = authors[&post.user_id].clone();
            items.push(FeedItem { post, author });
        }

        Ok(items)
    }

    /// Register a new account and sign it in.
    ///
    /// Checks run in order: confirmation must match, then the username must
    /// be free. Every failure collapses into the one generic
    /// [`DomainError::InvalidCredentials`] message so callers cannot tell
    /// which check failed.
    pub async fn register(
        &self,
        session: &dyn SessionManager,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> Result<User, DomainError> {
        if username.is_empty() || confirm != password {
            return Err(DomainError::InvalidCredentials);
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::InvalidCredentials);
        }

        let password_hash = self.passwords.hash(password)?;
        let user = self
            .users
            .save(User::new(username.to_owned(), password_hash))
            .await?;

        session.establish(user.id)?;
        Ok(user)
    }

    /// Sign in an existing account.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(
        &self,
        session: &dyn SessionManager,
        username: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            return Err(DomainError::InvalidCredentials);
        }

        session.establish(user.id)?;
        Ok(user)
    }

    /// End the caller's session. Requires an authenticated identity.
    pub fn logout(&self, session: &dyn SessionManager) -> Result<(), DomainError> {
        if session.current_user()?.is_none() {
            return Err(DomainError::Unauthenticated);
        }
        session.terminate();
        Ok(())
    }

    /// Create a post owned by `author` with a server-assigned timestamp.
    ///
    /// Content presence is a caller-side precondition; the HTTP boundary
    /// rejects empty bodies before this is reached.
    pub async fn add_post(&self, author: Uuid, content: &str) -> Result<Post, DomainError> {
        let post = self
            .posts
            .save(Post::new(author, content.to_owned()))
            .await?;
        Ok(post)
    }

    /// Fetch a post for the owner's edit form.
    ///
    /// A missing post is a hard `NotFound`; a post owned by someone else
    /// yields `Denied`, which callers render as the plain redirect home.
    pub async fn post_for_edit(
        &self,
        caller: Uuid,
        post_id: Uuid,
    ) -> Result<PostAccess, DomainError> {
        let post = self.find_post(post_id).await?;
        if post.user_id != caller {
            return Ok(PostAccess::Denied);
        }
        Ok(PostAccess::Granted(post))
    }

    /// Replace a post's content.
    ///
    /// The non-owner case is a silent no-op: the post is untouched and the
    /// caller observes the same success as the owner path.
    pub async fn edit_post(
        &self,
        caller: Uuid,
        post_id: Uuid,
        new_content: &str,
    ) -> Result<(), DomainError> {
        let mut post = self.find_post(post_id).await?;
        if post.user_id != caller {
            return Ok(());
        }

        post.content = new_content.to_owned();
        self.posts.save(post).await?;
        Ok(())
    }

    /// Permanently remove a post. Same silent non-owner semantics as
    /// [`edit_post`](Self::edit_post).
    pub async fn delete_post(&self, caller: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        let post = self.find_post(post_id).await?;
        if post.user_id != caller {
            return Ok(());
        }

        self.posts.delete(post.id).await?;
        Ok(())
    }

    /// Replace the caller's credential.
    ///
    /// The current password must verify against the stored hash; otherwise
    /// the credential is left untouched and the specific "Incorrect current
    /// password" error is returned. The new password is stored
    /// unconditionally once the gate passes.
    pub async fn update_password(
        &self,
        caller: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let mut user = self
            .users
            .find_by_id(caller)
            .await?
            .ok_or(DomainError::Unauthenticated)?;

        if !self
            .passwords
            .verify(current_password, &user.password_hash)?
        {
            return Err(DomainError::IncorrectPassword);
        }

        user.password_hash = self.passwords.hash(new_password)?;
        self.users.save(user).await?;
        Ok(())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id: post_id,
            })
    }
}
