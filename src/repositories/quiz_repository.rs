use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{Database, QUIZZES_COLLECTION, QUIZ_TYPES_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizChanges, QuizDetail},
};

/// Quizzes are always addressed together with their owner, so one user can
/// never read or change another user's quiz.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_detail(&self, id: &ObjectId, user_id: &ObjectId) -> AppResult<Option<QuizDetail>>;
    async fn list_details_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<QuizDetail>>;
    async fn update(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
        changes: QuizChanges,
    ) -> AppResult<Option<Quiz>>;
    async fn delete(&self, id: &ObjectId, user_id: &ObjectId) -> AppResult<bool>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZZES_COLLECTION);
        Self { collection }
    }

    async fn aggregate_details(&self, filter: Document) -> AppResult<Vec<QuizDetail>> {
        let cursor = self.collection.aggregate(detail_pipeline(filter)).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(|document| bson::from_document::<QuizDetail>(document).map_err(AppError::from))
            .collect()
    }
}

fn detail_pipeline(filter: Document) -> Vec<Document> {
    vec![
        doc! { "$match": filter },
        doc! {
            "$lookup": {
                "from": QUIZ_TYPES_COLLECTION,
                "localField": "quiz_type_id",
                "foreignField": "_id",
                "as": "quiz_type",
            }
        },
        doc! { "$unwind": { "path": "$quiz_type", "preserveNullAndEmptyArrays": true } },
        doc! { "$sort": { "created_at": 1, "_id": 1 } },
    ]
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_detail(&self, id: &ObjectId, user_id: &ObjectId) -> AppResult<Option<QuizDetail>> {
        let mut details = self
            .aggregate_details(doc! { "_id": *id, "user_id": *user_id })
            .await?;
        Ok(details.pop())
    }

    async fn list_details_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<QuizDetail>> {
        self.aggregate_details(doc! { "user_id": *user_id }).await
    }

    async fn update(
        &self,
        id: &ObjectId,
        user_id: &ObjectId,
        changes: QuizChanges,
    ) -> AppResult<Option<Quiz>> {
        let set = bson::to_document(&changes)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let quiz = self
            .collection
            .find_one_and_update(doc! { "_id": *id, "user_id": *user_id }, doc! { "$set": set })
            .with_options(options)
            .await?;
        Ok(quiz)
    }

    async fn delete(&self, id: &ObjectId, user_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": *id, "user_id": *user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_id".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_index).await?;
        log::info!("Ensured index on quizzes.user_id");

        Ok(())
    }
}
