use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::domain::role::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Stored user document, including the password hash.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub firstname: String,
    pub lastname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<i64>,
    pub email: String,
    pub password: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<ObjectId>,
}

impl User {
    pub fn new(
        firstname: &str,
        lastname: &str,
        email: &str,
        password_hash: &str,
        gender: Gender,
    ) -> Self {
        User {
            id: ObjectId::new(),
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            phone_no: None,
            email: email.to_string(),
            password: password_hash.to_string(),
            gender,
            role_id: None,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            phone_no: self.phone_no,
            email: self.email.clone(),
            gender: self.gender,
            role_id: self.role_id,
        }
    }
}

/// A user as read through a projection that drops the password.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub phone_no: Option<i64>,
    pub email: String,
    pub gender: Gender,
    #[serde(default)]
    pub role_id: Option<ObjectId>,
}

/// A user joined with its role document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub phone_no: Option<i64>,
    pub email: String,
    pub gender: Gender,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Fields a user may change on their own record. `None` leaves the stored
/// value untouched; `password` must already be hashed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self == &UserChanges::default()
    }

    pub fn apply_to(self, user: &mut User) {
        if let Some(firstname) = self.firstname {
            user.firstname = firstname;
        }
        if let Some(lastname) = self.lastname {
            user.lastname = lastname;
        }
        if let Some(phone_no) = self.phone_no {
            user.phone_no = Some(phone_no);
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(gender) = self.gender {
            user.gender = gender;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_user_serializes_id_as_underscore_id() {
        let user = User::new("John", "Doe", "john@example.com", "$2b$hash", Gender::Male);
        let doc = bson::to_document(&user).unwrap();

        assert_eq!(doc.get_object_id("_id").unwrap(), user.id);
        assert_eq!(doc.get_str("gender").unwrap(), "Male");
        assert!(!doc.contains_key("role_id"));
    }

    #[test]
    fn test_summary_has_no_password() {
        let user = User::new("Jane", "Smith", "jane@example.com", "$2b$hash", Gender::Female);
        let doc = bson::to_document(&user.summary()).unwrap();

        assert!(!doc.contains_key("password"));
        assert_eq!(doc.get_str("email").unwrap(), "jane@example.com");
    }

    #[test]
    fn test_changes_only_serialize_present_fields() {
        let changes = UserChanges {
            lastname: Some("Updated".to_string()),
            gender: Some(Gender::Other),
            ..Default::default()
        };
        let doc = bson::to_document(&changes).unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get_str("lastname").unwrap(), "Updated");
        assert_eq!(doc.get_str("gender").unwrap(), "Other");
    }

    #[test]
    fn test_changes_apply_to_user() {
        let mut user = User::new("Old", "Name", "old@example.com", "$2b$hash", Gender::Male);
        UserChanges {
            firstname: Some("New".to_string()),
            phone_no: Some(5551234),
            ..Default::default()
        }
        .apply_to(&mut user);

        assert_eq!(user.firstname, "New");
        assert_eq!(user.lastname, "Name");
        assert_eq!(user.phone_no, Some(5551234));
        assert!(UserChanges::default().is_empty());
    }
}
