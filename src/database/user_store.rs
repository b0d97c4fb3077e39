use crate::{
    database::{MongoDB, USERS_COLLECTION},
    models::UserDocument,
    utils::error::AppError,
};
use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::Collection;

const DUPLICATE_KEY: i32 = 11000;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserDocument>, AppError>;

    async fn contact_exists(&self, contact_number: &str) -> Result<bool, AppError>;

    /// Fails with `Conflict` when a unique field is already taken.
    async fn insert(&self, user: &UserDocument) -> Result<ObjectId, AppError>;

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<UserDocument>, AppError>;
}

pub struct MongoUserStore {
    db: MongoDB,
}

impl MongoUserStore {
    pub fn new(db: MongoDB) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<UserDocument> {
        self.db.collection::<UserDocument>(USERS_COLLECTION)
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        *e.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref we)) if we.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserDocument>, AppError> {
        Ok(self.collection().find_one(doc! { "email": email }).await?)
    }

    async fn contact_exists(&self, contact_number: &str) -> Result<bool, AppError> {
        let found = self
            .collection()
            .find_one(doc! { "contactNo": contact_number })
            .await?;
        Ok(found.is_some())
    }

    async fn insert(&self, user: &UserDocument) -> Result<ObjectId, AppError> {
        let result = match self.collection().insert_one(user).await {
            Ok(result) => result,
            Err(e) if is_duplicate_key(&e) => {
                return Err(AppError::Conflict(
                    "email or contact number already exists".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("Inserted id is not an ObjectId".to_string()))
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<UserDocument>, AppError> {
        let filter = doc! { "_id": { "$in": ids.to_vec() } };
        let mut cursor = self.collection().find(filter).await?;
        let mut users = Vec::new();

        while let Some(result) = cursor.next().await {
            users.push(result?);
        }

        Ok(users)
    }
}
