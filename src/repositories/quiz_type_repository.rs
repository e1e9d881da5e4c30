use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{is_duplicate_key, Database, QUIZ_TYPES_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{QuizType, QuizTypeChanges},
};

pub const DUPLICATE_NAME_MESSAGE: &str = "Quiz type name already exists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizTypeRepository: Send + Sync {
    async fn create(&self, quiz_type: QuizType) -> AppResult<QuizType>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<QuizType>>;
    async fn find_all(&self) -> AppResult<Vec<QuizType>>;
    async fn update(&self, id: &ObjectId, changes: QuizTypeChanges) -> AppResult<Option<QuizType>>;
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizTypeRepository {
    collection: Collection<QuizType>,
}

impl MongoQuizTypeRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZ_TYPES_COLLECTION);
        Self { collection }
    }
}

fn map_write_error(err: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&err) {
        AppError::AlreadyExists(DUPLICATE_NAME_MESSAGE.to_string())
    } else {
        err.into()
    }
}

#[async_trait]
impl QuizTypeRepository for MongoQuizTypeRepository {
    async fn create(&self, quiz_type: QuizType) -> AppResult<QuizType> {
        self.collection
            .insert_one(&quiz_type)
            .await
            .map_err(map_write_error)?;
        Ok(quiz_type)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<QuizType>> {
        let quiz_type = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(quiz_type)
    }

    async fn find_all(&self) -> AppResult<Vec<QuizType>> {
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();
        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let items: Vec<QuizType> = cursor.try_collect().await?;
        Ok(items)
    }

    async fn update(&self, id: &ObjectId, changes: QuizTypeChanges) -> AppResult<Option<QuizType>> {
        let set = bson::to_document(&changes)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let quiz_type = self
            .collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(map_write_error)?;
        Ok(quiz_type)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("name_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(name_index).await?;
        log::info!("Ensured unique index on quiz_types.name");

        Ok(())
    }
}
