use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

pub const USERS_COLLECTION: &str = "users";
pub const ROLES_COLLECTION: &str = "roles";
pub const QUIZZES_COLLECTION: &str = "quizzes";
pub const QUIZ_TYPES_COLLECTION: &str = "quiz_types";

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(2);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!("Connected to MongoDB database '{}'", config.mongo_db_name);

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }
}

/// True when the store rejected a write because of a unique index.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// Parses a hex ObjectId, reporting `what` in the error message.
pub fn parse_object_id(raw: &str, what: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::MalformedId(format!("Invalid {} ID format", what)))
}

pub fn parse_optional_id(raw: Option<&str>, what: &str) -> AppResult<Option<ObjectId>> {
    raw.map(|raw| parse_object_id(raw, what)).transpose()
}
