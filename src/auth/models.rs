// Identity models shared by the authentication extractor

use serde::{Deserialize, Serialize};

/// Closed set of roles known to the system.
///
/// Every request is dispatched by matching on this enum; there is no
/// string-based role comparison anywhere in the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Reseller,
    Baker,
    Shipper,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Reseller => "reseller",
            Role::Baker => "baker",
            Role::Shipper => "shipper",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity attached to every authenticated request.
///
/// The identity provider (login, password storage) is an external
/// collaborator; this backend only validates the bearer token it issued.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: i32,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Shipper).unwrap(), "\"shipper\"");
    }

    #[test]
    fn role_roundtrips_through_json() {
        for role in [Role::Admin, Role::Reseller, Role::Baker, Role::Shipper] {
            let json = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }
}
