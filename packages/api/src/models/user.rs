//! # User profile as returned by the backend
//!
//! [`UserInfo`] is the profile returned by the login and `/Auth/me` endpoints
//! and stored (as JSON) under the `user` session key. The fields that drive
//! access decisions are numeric on the wire:
//!
//! | Field | Values |
//! |-------|--------|
//! | `role` | `1` admin, `2` staff, anything else regular |
//! | `plan` | `0` free, `1` basic, `2` premium (unknown → free) |
//!
//! Both also accept their names as strings (`"admin"`, `"premium"`), which some
//! older endpoints send.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::wire;

/// Account role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Staff,
    #[default]
    Regular,
}

impl Role {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Role::Admin,
            2 => Role::Staff,
            _ => Role::Regular,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Staff => 2,
            Role::Regular => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Regular => "Teacher",
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_i64().map(Self::from_code).unwrap_or_default(),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "admin" | "1" => Role::Admin,
                "staff" | "2" => Role::Staff,
                _ => Role::Regular,
            },
            _ => Role::Regular,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(d)?))
    }
}

/// Subscription plan. Ordered so `plan >= PlanTier::Basic` reads naturally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlanTier {
    #[default]
    Free,
    Basic,
    Premium,
}

impl PlanTier {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => PlanTier::Basic,
            2 => PlanTier::Premium,
            _ => PlanTier::Free,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            PlanTier::Free => 0,
            PlanTier::Basic => 1,
            PlanTier::Premium => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Basic => "Basic",
            PlanTier::Premium => "Premium",
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_i64().map(Self::from_code).unwrap_or_default(),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "basic" | "1" => PlanTier::Basic,
                "premium" | "2" => PlanTier::Premium,
                _ => PlanTier::Free,
            },
            _ => PlanTier::Free,
        }
    }
}

impl Serialize for PlanTier {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for PlanTier {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(d)?))
    }
}

/// User profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub email: String,
    #[serde(default, alias = "firstname")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastname")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, alias = "planType", alias = "subscriptionPlan")]
    pub plan: PlanTier,
    #[serde(default, alias = "emailConfirmed", alias = "verified")]
    pub is_verified: bool,
    #[serde(default, alias = "school")]
    pub school_name: Option<String>,
}

impl UserInfo {
    /// Full name, falling back to the email address.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Decode the profile JSON stored under the `user` session key.
    pub fn from_session(session: &store::Session) -> Option<Self> {
        serde_json::from_str(session.user_json.as_deref()?).ok()
    }

    /// Build the session that should be persisted after a successful login.
    pub fn to_session(&self, token: String) -> store::Session {
        store::Session {
            token: Some(token),
            user_json: serde_json::to_string(self).ok(),
            user_id: Some(self.id.clone()),
            email: Some(self.email.clone()),
        }
    }
}

/// Body of `PUT /Users/{id}` when an admin changes a role.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoleUpdate {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_role_and_plan() {
        let user: UserInfo = serde_json::from_value(json!({
            "id": 12,
            "email": "head@school.ng",
            "firstName": "Ada",
            "lastName": "Obi",
            "role": 1,
            "plan": 2,
            "isVerified": true
        }))
        .unwrap();
        assert_eq!(user.id, "12");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.plan, PlanTier::Premium);
        assert!(user.is_verified);
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "Ada Obi");
    }

    #[test]
    fn test_string_codes_and_aliases() {
        let user: UserInfo = serde_json::from_value(json!({
            "id": "u-1",
            "email": "t@school.ng",
            "role": "staff",
            "planType": "basic",
            "emailConfirmed": true
        }))
        .unwrap();
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.plan, PlanTier::Basic);
        assert!(user.is_verified);
        assert_eq!(user.display_name(), "t@school.ng");
    }

    #[test]
    fn test_missing_and_unknown_codes_default() {
        let user: UserInfo = serde_json::from_value(json!({
            "id": 3,
            "email": "x@y.z",
            "role": 9,
            "plan": null
        }))
        .unwrap();
        assert_eq!(user.role, Role::Regular);
        assert_eq!(user.plan, PlanTier::Free);
        assert!(!user.is_verified);
    }

    #[test]
    fn test_plan_ordering() {
        assert!(PlanTier::Premium > PlanTier::Basic);
        assert!(PlanTier::Basic > PlanTier::Free);
    }

    #[test]
    fn test_session_roundtrip() {
        let user = UserInfo {
            id: "5".into(),
            email: "a@b.c".into(),
            first_name: Some("Ngozi".into()),
            last_name: None,
            role: Role::Staff,
            plan: PlanTier::Basic,
            is_verified: true,
            school_name: None,
        };
        let session = user.to_session("tok".into());
        assert_eq!(session.token.as_deref(), Some("tok"));
        assert_eq!(session.user_id.as_deref(), Some("5"));
        assert_eq!(UserInfo::from_session(&session), Some(user));
    }

    #[test]
    fn test_role_update_serialises_code() {
        let body = serde_json::to_value(RoleUpdate { role: Role::Staff }).unwrap();
        assert_eq!(body, json!({ "role": 2 }));
    }
}
