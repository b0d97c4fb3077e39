use crate::{
    database::{MongoDB, TODOS_COLLECTION},
    models::{TodoDocument, Volunteer},
    utils::error::AppError,
};
use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use mongodb::error::ErrorKind;
use mongodb::Collection;

/// Which todos a list query returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoFilter {
    All,
    /// Exact, case-sensitive match on `orgName`
    Organisation(String),
    /// Exact, case-sensitive match on `volType`
    VolunteerType(String),
}

impl TodoFilter {
    pub fn to_document(&self) -> Document {
        match self {
            TodoFilter::All => doc! {},
            TodoFilter::Organisation(name) => doc! { "orgName": name },
            TodoFilter::VolunteerType(vol_type) => doc! { "volType": vol_type },
        }
    }
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn find(&self, filter: &TodoFilter) -> Result<Vec<TodoDocument>, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<TodoDocument>, AppError>;

    async fn insert(&self, todo: &TodoDocument) -> Result<ObjectId, AppError>;

    /// Sets `task` and `completed`, appends `volunteers`. Returns the matched count.
    async fn set_and_push(
        &self,
        id: ObjectId,
        task: &str,
        completed: bool,
        volunteers: &[Volunteer],
    ) -> Result<u64, AppError>;

    /// Returns the deleted count.
    async fn delete(&self, id: ObjectId) -> Result<u64, AppError>;
}

pub struct MongoTodoStore {
    db: MongoDB,
}

impl MongoTodoStore {
    pub fn new(db: MongoDB) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<TodoDocument> {
        self.db.collection::<TodoDocument>(TODOS_COLLECTION)
    }
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    async fn find(&self, filter: &TodoFilter) -> Result<Vec<TodoDocument>, AppError> {
        let mut cursor = self.collection().find(filter.to_document()).await?;
        let mut todos = Vec::new();

        while let Some(result) = cursor.next().await {
            match result {
                Ok(todo) => todos.push(todo),
                // A single malformed row does not fail the whole listing
                Err(e) if matches!(*e.kind, ErrorKind::BsonDeserialization(_)) => {
                    log::warn!("⚠️ Skipping undecodable todo ({:?}): {}", filter, e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(todos)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<TodoDocument>, AppError> {
        Ok(self.collection().find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, todo: &TodoDocument) -> Result<ObjectId, AppError> {
        let result = self.collection().insert_one(todo).await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("Inserted id is not an ObjectId".to_string()))
    }

    async fn set_and_push(
        &self,
        id: ObjectId,
        task: &str,
        completed: bool,
        volunteers: &[Volunteer],
    ) -> Result<u64, AppError> {
        let volunteers = to_bson(volunteers)
            .map_err(|e| AppError::DatabaseError(format!("Failed to encode volunteers: {}", e)))?;

        let update = doc! {
            "$set": { "task": task, "completed": completed },
            "$push": { "volunteer": { "$each": volunteers } },
        };

        let result = self.collection().update_one(doc! { "_id": id }, update).await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self.collection().delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}
