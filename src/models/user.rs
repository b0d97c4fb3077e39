use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

// User model, as stored in the `users` collection
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    // Left out when empty so the sparse unique indexes ignore it
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default)]
    pub password: String, // bcrypt hash, never plaintext
    #[serde(rename = "contactNo", default, skip_serializing_if = "String::is_empty")]
    pub contact_number: String,
    #[serde(rename = "userType", default)]
    pub user_type: String, // "organisation", "volunteer", ...
    #[serde(rename = "volType", default)]
    pub volunteer_type: String,
    #[serde(rename = "orgName", default)]
    pub organisation_name: String,
}

// Request/Response structures
#[derive(Debug, Deserialize, Clone, Default, utoipa::ToSchema)]
pub struct SignupRequest {
    #[serde(rename = "firstName", default)]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "contactNo", default)]
    pub contact_number: String,
    #[serde(rename = "userType", default)]
    pub user_type: String,
    #[serde(rename = "volType", default)]
    pub volunteer_type: String,
    #[serde(rename = "orgName", default)]
    pub organisation_name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct SignupResponse {
    #[serde(rename = "userType")]
    pub user_type: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Profile returned by a successful login. The token travels in the cookie.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, utoipa::ToSchema)]
pub struct LoginResponse {
    #[serde(rename = "userType")]
    pub user_type: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "contactNo")]
    pub contact_number: String,
    pub email: String,
    #[serde(rename = "orgName")]
    pub organisation_name: String,
}

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, utoipa::ToSchema)]
pub struct UserInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "firstName", default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(rename = "lastName", default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(rename = "contactNo", default, skip_serializing_if = "String::is_empty")]
    pub contact_number: String,
    #[serde(rename = "userType", default, skip_serializing_if = "String::is_empty")]
    pub user_type: String,
    #[serde(rename = "volType", default, skip_serializing_if = "String::is_empty")]
    pub volunteer_type: String,
    #[serde(rename = "orgName", default)]
    pub organisation_name: String,
}

impl UserDocument {
    /// Builds the stored record from a signup request and an already hashed password.
    pub fn from_signup(request: SignupRequest, password_hash: String) -> Self {
        UserDocument {
            id: None,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: password_hash,
            contact_number: request.contact_number,
            user_type: request.user_type,
            volunteer_type: request.volunteer_type,
            organisation_name: request.organisation_name,
        }
    }

    fn hex_id(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

impl From<&UserDocument> for LoginResponse {
    fn from(user: &UserDocument) -> Self {
        LoginResponse {
            user_type: user.user_type.clone(),
            id: user.hex_id(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            contact_number: user.contact_number.clone(),
            email: user.email.clone(),
            organisation_name: user.organisation_name.clone(),
        }
    }
}

impl From<UserDocument> for UserInfo {
    fn from(user: UserDocument) -> Self {
        UserInfo {
            id: user.hex_id(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            contact_number: user.contact_number,
            user_type: user.user_type,
            volunteer_type: user.volunteer_type,
            organisation_name: user.organisation_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_info_hides_password() {
        let mut user = UserDocument::from_signup(
            SignupRequest {
                email: "a@x.com".into(),
                password: "pw123".into(),
                ..Default::default()
            },
            "$2b$04$hash".into(),
        );
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserInfo::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["orgName"], "");
    }

    #[test]
    fn test_login_response_field_names() {
        let id = ObjectId::new();
        let user = UserDocument {
            id: Some(id),
            user_type: "organisation".into(),
            organisation_name: "GreenOrg".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(LoginResponse::from(&user)).unwrap();
        assert_eq!(json["ID"], id.to_hex());
        assert_eq!(json["userType"], "organisation");
        assert_eq!(json["orgName"], "GreenOrg");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_empty_unique_fields_are_not_stored() {
        let user = UserDocument::from_signup(
            SignupRequest {
                email: "a@x.com".into(),
                ..Default::default()
            },
            "h".into(),
        );

        let stored = mongodb::bson::to_document(&user).unwrap();
        assert_eq!(stored.get_str("email").unwrap(), "a@x.com");
        assert!(!stored.contains_key("contactNo"));

        let back: UserDocument = mongodb::bson::from_document(stored).unwrap();
        assert_eq!(back.contact_number, "");
    }
}
