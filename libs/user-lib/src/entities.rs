use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

pub const USERNAME_MIN_LENGTH: u64 = 2;
pub const USERNAME_MAX_LENGTH: u64 = 30;
pub const PASSWORD_MIN_LENGTH: u64 = 4;

fn not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(message.into());
        return Err(err);
    }
    Ok(())
}

fn username_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Username should not be blank")
}

fn email_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Email should not be blank")
}

fn password_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Password should not be blank")
}

fn first_name_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "First name should not be blank")
}

fn last_name_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Last name should not be blank")
}

// Missing and null fields become "" so the blank checks report them.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload for creating a user
#[derive(Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(
        custom(function = "username_not_blank"),
        length(min = 2, max = 30, message = "Username should be between 2 and 30 characters long")
    )]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,

    #[validate(
        custom(function = "email_not_blank"),
        email(message = "Email should be valid")
    )]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,

    #[validate(
        custom(function = "password_not_blank"),
        length(min = 4, message = "Password should be greater than 4 characters long")
    )]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,

    #[validate(custom(function = "first_name_not_blank"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,

    #[validate(custom(function = "last_name_not_blank"))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
}

impl UserRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Runs the field constraints and returns one message per violated field,
    /// keyed by the JSON field name.
    pub fn violations(&self) -> Option<BTreeMap<String, String>> {
        match self.validate() {
            Ok(()) => None,
            Err(errors) => Some(field_messages(&errors)),
        }
    }
}

// Passwords stay out of logs.
impl std::fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// User profile together with its realm roles and groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub groups: Vec<String>,
}

/// Flattens validator output into `field -> first message`.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{field} is invalid"));
            (to_camel_case(&field), message)
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
