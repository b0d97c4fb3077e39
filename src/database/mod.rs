use mongodb::{Client, Collection, Database};
use std::error::Error;

pub mod todo_store;
pub mod user_store;

#[cfg(test)]
pub mod memory;

pub use todo_store::*;
pub use user_store::*;

pub const DATABASE_NAME: &str = "volunteerService-backend-db";
pub const USERS_COLLECTION: &str = "users";
pub const TODOS_COLLECTION: &str = "todos";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(DATABASE_NAME);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the service relies on.
    ///
    /// The unique indexes on `users` are what actually guarantees email and
    /// contact number uniqueness; the signup pre-check only produces the
    /// friendlier error message. They are sparse because users without an
    /// email or contact number leave the field out.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS_COLLECTION);

        for field in ["email", "contactNo"] {
            let index = IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(IndexOptions::builder().unique(true).sparse(true).build())
                .build();

            match users.create_index(index).await {
                Ok(_) => log::info!("   ✅ Unique index ready: users({})", field),
                // Existing duplicate rows make this fail; signup still runs the pre-check
                Err(e) => log::warn!("   ⚠️  Could not create unique index users({}): {}", field, e),
            }
        }

        let todos = self.collection::<mongodb::bson::Document>(TODOS_COLLECTION);

        for field in ["orgName", "volType"] {
            let index = IndexModel::builder().keys(doc! { field: 1 }).build();

            match todos.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index ready: todos({})", field),
                Err(e) => log::debug!("   ℹ️  Index not created: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
