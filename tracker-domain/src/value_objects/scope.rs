// Ownership scope value objects

use serde::{Deserialize, Serialize};

use crate::entities::ApiKey;
use crate::value_objects::{GroupId, UserId};

/// How strictly anomaly rows are isolated between callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipScope {
    /// Every key in a group sees and edits the group's anomalies.
    #[default]
    Group,
    /// Keys only see and edit anomalies created by their own user within the group.
    User,
}

impl OwnershipScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipScope::Group => "group",
            OwnershipScope::User => "user",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "group" => Some(OwnershipScope::Group),
            "user" => Some(OwnershipScope::User),
            _ => None,
        }
    }
}

/// Filter applied by the store to every anomaly read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub group_id: GroupId,
    pub user_id: Option<UserId>,
}

impl Scope {
    pub fn resolve(key: &ApiKey, mode: OwnershipScope) -> Self {
        let user_id = match mode {
            OwnershipScope::Group => None,
            OwnershipScope::User => Some(key.user_id),
        };
        Self {
            group_id: key.group_id,
            user_id,
        }
    }

    pub fn group(group_id: GroupId) -> Self {
        Self {
            group_id,
            user_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::ApiKeyId;
    use chrono::Utc;

    fn key() -> ApiKey {
        ApiKey {
            id: ApiKeyId(1),
            token: "T1".to_string(),
            key_type: "standard".to_string(),
            user_id: UserId(1),
            group_id: GroupId(7),
            created_by: UserId(1),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn group_mode_ignores_user() {
        let scope = Scope::resolve(&key(), OwnershipScope::Group);
        assert_eq!(scope, Scope::group(GroupId(7)));
    }

    #[test]
    fn user_mode_keeps_user() {
        let scope = Scope::resolve(&key(), OwnershipScope::User);
        assert_eq!(scope.group_id, GroupId(7));
        assert_eq!(scope.user_id, Some(UserId(1)));
    }

    #[test]
    fn ownership_scope_parse_is_lenient_on_case() {
        assert_eq!(OwnershipScope::parse(" User "), Some(OwnershipScope::User));
        assert_eq!(OwnershipScope::parse("group"), Some(OwnershipScope::Group));
        assert_eq!(OwnershipScope::parse("tenant"), None);
    }
}
