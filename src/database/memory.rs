//! In-memory stores used by the unit and handler tests.

use crate::{
    database::{TodoFilter, TodoStore, UserStore},
    models::{TodoDocument, UserDocument, Volunteer},
    utils::error::AppError,
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

fn filter_matches(filter: &TodoFilter, todo: &TodoDocument) -> bool {
    match filter {
        TodoFilter::All => true,
        TodoFilter::Organisation(name) => &todo.organisation_name == name,
        TodoFilter::VolunteerType(vol_type) => &todo.volunteer_type == vol_type,
    }
}

fn unavailable() -> AppError {
    AppError::DatabaseError("store unavailable".to_string())
}

#[derive(Default)]
pub struct MemoryTodoStore {
    todos: Mutex<Vec<TodoDocument>>,
    failing: bool,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with a database error.
    pub fn failing() -> Self {
        Self {
            todos: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn find(&self, filter: &TodoFilter) -> Result<Vec<TodoDocument>, AppError> {
        self.check()?;
        let todos = self.todos.lock().unwrap();
        Ok(todos.iter().filter(|t| filter_matches(filter, t)).cloned().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<TodoDocument>, AppError> {
        self.check()?;
        let todos = self.todos.lock().unwrap();
        Ok(todos.iter().find(|t| t.id == Some(id)).cloned())
    }

    async fn insert(&self, todo: &TodoDocument) -> Result<ObjectId, AppError> {
        self.check()?;
        let id = ObjectId::new();
        let mut stored = todo.clone();
        stored.id = Some(id);
        self.todos.lock().unwrap().push(stored);
        Ok(id)
    }

    async fn set_and_push(
        &self,
        id: ObjectId,
        task: &str,
        completed: bool,
        volunteers: &[Volunteer],
    ) -> Result<u64, AppError> {
        self.check()?;
        let mut todos = self.todos.lock().unwrap();
        match todos.iter_mut().find(|t| t.id == Some(id)) {
            Some(todo) => {
                todo.task = task.to_string();
                todo.completed = completed;
                todo.volunteer.extend_from_slice(volunteers);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, AppError> {
        self.check()?;
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| t.id != Some(id));
        Ok((before - todos.len()) as u64)
    }
}

/// Enforces email / contact uniqueness on insert, like the unique indexes do.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<UserDocument>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<UserDocument> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserDocument>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| !u.email.is_empty() && u.email == email)
            .cloned())
    }

    async fn contact_exists(&self, contact_number: &str) -> Result<bool, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .any(|u| !u.contact_number.is_empty() && u.contact_number == contact_number))
    }

    async fn insert(&self, user: &UserDocument) -> Result<ObjectId, AppError> {
        let mut users = self.users.lock().unwrap();
        // Empty values are not stored, like the sparse unique indexes
        let taken = |a: &str, b: &str| !a.is_empty() && a == b;
        if users.iter().any(|u| {
            taken(&user.email, &u.email) || taken(&user.contact_number, &u.contact_number)
        }) {
            return Err(AppError::Conflict(
                "email or contact number already exists".to_string(),
            ));
        }

        let id = ObjectId::new();
        let mut stored = user.clone();
        stored.id = Some(id);
        users.push(stored);
        Ok(id)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<UserDocument>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .filter(|u| u.id.map(|id| ids.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    }
}
