//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{MutationResult, NewUser, UpdateUser, User};
use crate::repository::UserRepository;

pub const DEFAULT_COLLECTION: &str = "users";

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Repository over the `users` collection of `db`
    ///
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoUserRepository::new(client.database("accounts"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// Create the lookup index on `email`.
    ///
    /// The index is deliberately not unique: uniqueness is checked by the
    /// service before create and update.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().name("email_1".to_string()).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(collection = %self.collection.name(), "User indexes ready");
        Ok(())
    }

    /// Matches the `_id` written by `User`'s BSON binary encoding
    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": bson::Uuid::from(id) }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, input), fields(email = %input.email))]
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let user = User::new(input);

        self.collection.insert_one(&user).await?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<User>> {
        use futures_util::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self, input))]
    async fn update_profile(&self, id: Uuid, input: UpdateUser) -> UserResult<MutationResult> {
        let update = doc! {
            "$set": {
                "name": input.name,
                "email": input.email,
                "updated_at": bson::DateTime::from_chrono(Utc::now()),
            }
        };

        let result = self.collection.update_one(Self::id_filter(id), update).await?;

        tracing::info!(
            user_id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "User profile updated"
        );
        Ok(MutationResult::new(result.matched_count, result.modified_count))
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: String,
    ) -> UserResult<MutationResult> {
        let update = doc! {
            "$set": {
                "password_hash": password_hash,
                "updated_at": bson::DateTime::from_chrono(Utc::now()),
            }
        };

        let result = self.collection.update_one(Self::id_filter(id), update).await?;

        tracing::info!(user_id = %id, matched = result.matched_count, "User password updated");
        Ok(MutationResult::new(result.matched_count, result.modified_count))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<MutationResult> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        tracing::info!(user_id = %id, deleted = result.deleted_count, "User delete executed");
        Ok(MutationResult::new(result.deleted_count, result.deleted_count))
    }
}
