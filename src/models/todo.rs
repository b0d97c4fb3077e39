use chrono::{DateTime, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Person signed up for a todo (denormalized snapshot, not a reference)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Volunteer {
    #[serde(rename = "volunteerId", default, skip_serializing_if = "String::is_empty")]
    pub volunteer_id: String,
    #[serde(rename = "volunteerName", default, skip_serializing_if = "String::is_empty")]
    pub volunteer_name: String,
}

/// Todo as stored in the `todos` collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default)]
    pub task: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "orgName", default)]
    pub organisation_name: String,

    #[serde(rename = "volType", default)]
    pub volunteer_type: String,

    #[serde(rename = "orgType", default)]
    pub organisation_type: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<BsonDateTime>,

    #[serde(default)]
    pub volunteer: Vec<Volunteer>,
}

/// Todo as exchanged over HTTP
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Todo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub task: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(rename = "orgName", default, skip_serializing_if = "String::is_empty")]
    pub organisation_name: String,

    #[serde(rename = "volType", default, skip_serializing_if = "String::is_empty")]
    pub volunteer_type: String,

    #[serde(rename = "orgType", default, skip_serializing_if = "String::is_empty")]
    pub organisation_type: String,

    #[serde(default)]
    pub completed: bool,

    /// Creation time; filled with the current time on insert when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volunteer: Vec<Volunteer>,
}

/// Seconds from the Unix epoch to `0001-01-01T00:00:00Z`, the zero time clients send
const ZERO_TIME_SECS: i64 = -62_135_596_800;

impl TodoDocument {
    /// Builds the document persisted for a newly created todo.
    ///
    /// The client-supplied id and volunteer list are discarded; a missing
    /// or zero (`0001-01-01T00:00:00Z`) creation time becomes `now`.
    pub fn new_entry(entry: Todo, now: DateTime<Utc>) -> Self {
        let time = entry
            .time
            .filter(|t| t.timestamp() != ZERO_TIME_SECS || t.timestamp_subsec_nanos() != 0)
            .unwrap_or(now);

        TodoDocument {
            id: None,
            task: entry.task,
            description: entry.description,
            organisation_name: entry.organisation_name,
            volunteer_type: entry.volunteer_type,
            organisation_type: entry.organisation_type,
            completed: entry.completed,
            time: Some(BsonDateTime::from_millis(time.timestamp_millis())),
            volunteer: Vec::new(),
        }
    }
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Todo {
            id: doc.id.map(|id| id.to_hex()).unwrap_or_default(),
            task: doc.task,
            description: doc.description,
            organisation_name: doc.organisation_name,
            volunteer_type: doc.volunteer_type,
            organisation_type: doc.organisation_type,
            completed: doc.completed,
            time: doc
                .time
                .and_then(|t| DateTime::<Utc>::from_timestamp_millis(t.timestamp_millis())),
            volunteer: doc.volunteer,
        }
    }
}
