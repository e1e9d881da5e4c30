use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{is_duplicate_key, Database, ROLES_COLLECTION, USERS_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{User, UserChanges, UserProfile, UserSummary},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`AppError::DuplicateEmail`] when the email is taken.
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// The user joined with its role, without the password.
    async fn find_profile(&self, id: &ObjectId) -> AppResult<Option<UserProfile>>;
    async fn find_all(&self) -> AppResult<Vec<UserSummary>>;
    async fn update(&self, id: &ObjectId, changes: UserChanges) -> AppResult<Option<User>>;
    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(USERS_COLLECTION);
        Self { collection }
    }
}

fn map_write_error(err: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&err) {
        AppError::DuplicateEmail
    } else {
        err.into()
    }
}

fn profile_pipeline(id: ObjectId) -> Vec<Document> {
    vec![
        doc! { "$match": { "_id": id } },
        doc! {
            "$lookup": {
                "from": ROLES_COLLECTION,
                "localField": "role_id",
                "foreignField": "_id",
                "as": "role",
            }
        },
        doc! { "$unwind": { "path": "$role", "preserveNullAndEmptyArrays": true } },
        doc! { "$project": { "password": 0 } },
    ]
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_profile(&self, id: &ObjectId) -> AppResult<Option<UserProfile>> {
        let mut cursor = self.collection.aggregate(profile_pipeline(*id)).await?;

        match cursor.try_next().await? {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> AppResult<Vec<UserSummary>> {
        let options = FindOptions::builder()
            .projection(doc! { "password": 0 })
            .build();

        let cursor = self
            .collection
            .clone_with_type::<UserSummary>()
            .find(doc! {})
            .with_options(options)
            .await?;
        let users: Vec<UserSummary> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn update(&self, id: &ObjectId, changes: UserChanges) -> AppResult<Option<User>> {
        let set = bson::to_document(&changes)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let user = self
            .collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(map_write_error)?;
        Ok(user)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": *id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("email_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Ensured unique index on users.email");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_pipeline_drops_password_and_joins_roles() {
        let id = ObjectId::new();
        let pipeline = profile_pipeline(id);

        assert_eq!(pipeline.len(), 4);
        assert_eq!(
            pipeline[0].get_document("$match").unwrap().get_object_id("_id").unwrap(),
            id
        );
        let lookup = pipeline[1].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), ROLES_COLLECTION);
        assert_eq!(
            pipeline[3].get_document("$project").unwrap().get_i32("password").unwrap(),
            0
        );
    }
}
