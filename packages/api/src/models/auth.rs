//! Request and response bodies of the `/Auth` endpoints.

use serde::{Deserialize, Serialize};

use super::UserInfo;

/// `POST /Auth/register`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
}

impl SignUpRequest {
    /// Client-side checks run before the request is sent. Returns the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err("First and last name are required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Please enter a valid email".to_string());
        }
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters".to_string());
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}

/// `POST /Auth/reset-password`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

/// Successful login. Some deployments omit the profile; callers then fetch it
/// from `/Auth/me`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    #[serde(alias = "accessToken", alias = "jwt")]
    pub token: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
}
