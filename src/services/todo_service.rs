// ==================== TODO REPOSITORY ====================
// CRUD sobre a coleção `todos` + listagens filtradas por organização e tipo de voluntário

use crate::{
    database::{TodoFilter, TodoStore},
    models::{Todo, TodoDocument},
    utils::error::AppError,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

fn parse_todo_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::NotFound(format!("invalid todo id: {}", id)))
}

pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>, AppError> {
        let docs = self.store.find(&filter).await.map_err(|e| {
            log::error!("❌ Error listing todos ({:?}): {}", filter, e);
            e
        })?;

        Ok(docs.into_iter().map(Todo::from).collect())
    }

    /// All todos, unordered and unpaginated.
    pub async fn list_all(&self) -> Result<Vec<Todo>, AppError> {
        self.list(TodoFilter::All).await
    }

    pub async fn list_by_organisation(&self, org_name: &str) -> Result<Vec<Todo>, AppError> {
        self.list(TodoFilter::Organisation(org_name.to_string())).await
    }

    pub async fn list_by_volunteer_type(&self, vol_type: &str) -> Result<Vec<Todo>, AppError> {
        self.list(TodoFilter::VolunteerType(vol_type.to_string())).await
    }

    /// Malformed ids and missing documents are both `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<Todo, AppError> {
        let object_id = parse_todo_id(id)?;

        self.store
            .find_by_id(object_id)
            .await?
            .map(Todo::from)
            .ok_or_else(|| AppError::NotFound(format!("todo {} not found", id)))
    }

    /// Persists a new todo and returns its id (hex).
    pub async fn insert(&self, entry: Todo) -> Result<String, AppError> {
        let doc = TodoDocument::new_entry(entry, Utc::now());

        let id = self.store.insert(&doc).await.map_err(|e| {
            log::error!("❌ Error inserting todo: {}", e);
            e
        })?;

        log::info!("✅ Todo created: {}", id.to_hex());
        Ok(id.to_hex())
    }

    /// Sets `task` and `completed` from `entry` and appends its volunteers.
    ///
    /// Every other field of `entry` is ignored. Returns how many documents
    /// matched; zero is not an error.
    pub async fn update(&self, id: &str, entry: Todo) -> Result<u64, AppError> {
        let object_id = parse_todo_id(id)?;

        log::debug!("Updating todo {}: {:?}", id, entry);

        self.store
            .set_and_push(object_id, &entry.task, entry.completed, &entry.volunteer)
            .await
            .map_err(|e| {
                log::error!("❌ Error updating todo {}: {}", id, e);
                e
            })
    }

    /// Deleting a well-formed id that matches nothing succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let object_id = parse_todo_id(id)?;

        let deleted = self.store.delete(object_id).await.map_err(|e| {
            log::error!("❌ Error deleting todo {}: {}", id, e);
            e
        })?;

        log::info!("🗑️  Deleted {} todo(s) for id {}", deleted, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryTodoStore;
    use crate::models::Volunteer;
    use chrono::{Duration, TimeZone};

    fn service() -> TodoService {
        TodoService::new(Arc::new(MemoryTodoStore::new()))
    }

    fn todo(task: &str, org: &str, vol_type: &str) -> Todo {
        Todo {
            task: task.into(),
            description: format!("{} description", task),
            organisation_name: org.into(),
            volunteer_type: vol_type.into(),
            organisation_type: "charity".into(),
            ..Default::default()
        }
    }

    fn volunteer(id: &str, name: &str) -> Volunteer {
        Volunteer {
            volunteer_id: id.into(),
            volunteer_name: name.into(),
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let svc = service();
        let mut entry = todo("Clean park", "GreenOrg", "outdoor");
        entry.volunteer = vec![volunteer("v1", "Ann")];

        let before = Utc::now();
        let id = svc.insert(entry).await.unwrap();
        let stored = svc.get_by_id(&id).await.unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.task, "Clean park");
        assert_eq!(stored.description, "Clean park description");
        assert_eq!(stored.organisation_name, "GreenOrg");
        assert_eq!(stored.volunteer_type, "outdoor");
        assert_eq!(stored.organisation_type, "charity");
        assert!(stored.volunteer.is_empty());

        let time = stored.time.unwrap();
        assert!(time >= before - Duration::seconds(1) && time <= Utc::now());
    }

    #[tokio::test]
    async fn test_insert_keeps_supplied_time() {
        let svc = service();
        let supplied = Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap();
        let mut entry = todo("Sort books", "Library", "indoor");
        entry.time = Some(supplied);

        let id = svc.insert(entry).await.unwrap();
        assert_eq!(svc.get_by_id(&id).await.unwrap().time, Some(supplied));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let svc = service();

        let err = svc.get_by_id("not-an-id").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = svc.get_by_id(&ObjectId::new().to_hex()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_appends_volunteers() {
        let svc = service();
        let id = svc.insert(todo("Clean park", "GreenOrg", "outdoor")).await.unwrap();

        let patch = Todo {
            task: "X".into(),
            completed: true,
            description: "should not be written".into(),
            organisation_name: "Other".into(),
            volunteer: vec![volunteer("v1", "Ann")],
            ..Default::default()
        };

        assert_eq!(svc.update(&id, patch.clone()).await.unwrap(), 1);
        svc.update(&id, patch).await.unwrap();

        let stored = svc.get_by_id(&id).await.unwrap();
        assert_eq!(stored.task, "X");
        assert!(stored.completed);
        assert_eq!(stored.description, "Clean park description");
        assert_eq!(stored.organisation_name, "GreenOrg");
        assert_eq!(
            stored.volunteer,
            vec![volunteer("v1", "Ann"), volunteer("v1", "Ann")]
        );
    }

    #[tokio::test]
    async fn test_update_sets_empty_task_and_false() {
        let svc = service();
        let id = svc.insert(todo("Clean park", "GreenOrg", "outdoor")).await.unwrap();
        let done = Todo {
            completed: true,
            task: "Y".into(),
            ..Default::default()
        };
        svc.update(&id, done).await.unwrap();

        svc.update(&id, Todo::default()).await.unwrap();

        let stored = svc.get_by_id(&id).await.unwrap();
        assert_eq!(stored.task, "");
        assert!(!stored.completed);
    }

    #[tokio::test]
    async fn test_update_invalid_id() {
        let err = service().update("xyz", Todo::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let svc = service();
        let id = svc.insert(todo("Clean park", "GreenOrg", "outdoor")).await.unwrap();

        svc.delete(&id).await.unwrap();
        assert!(svc.get_by_id(&id).await.is_err());

        // Valid but unknown id still succeeds
        svc.delete(&ObjectId::new().to_hex()).await.unwrap();
        assert!(svc.delete("garbage").await.is_err());
    }

    #[tokio::test]
    async fn test_filtered_lists_exact_match() {
        let svc = service();
        svc.insert(todo("a", "Acme", "outdoor")).await.unwrap();
        svc.insert(todo("b", "acme", "indoor")).await.unwrap();
        svc.insert(todo("c", "Acme Corp", "outdoor")).await.unwrap();
        svc.insert(todo("d", "Acme", "indoor")).await.unwrap();

        let mut by_org: Vec<String> = svc
            .list_by_organisation("Acme")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.task)
            .collect();
        by_org.sort();
        assert_eq!(by_org, vec!["a", "d"]);

        let by_vol = svc.list_by_volunteer_type("outdoor").await.unwrap();
        assert_eq!(by_vol.len(), 2);
        assert!(by_vol.iter().all(|t| t.volunteer_type == "outdoor"));

        assert_eq!(svc.list_all().await.unwrap().len(), 4);
        assert!(svc.list_by_organisation("Nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let svc = TodoService::new(Arc::new(MemoryTodoStore::failing()));

        assert!(matches!(svc.list_all().await, Err(AppError::DatabaseError(_))));
        assert!(matches!(
            svc.insert(Todo::default()).await,
            Err(AppError::DatabaseError(_))
        ));
        assert!(matches!(
            svc.delete(&ObjectId::new().to_hex()).await,
            Err(AppError::DatabaseError(_))
        ));
    }
}
