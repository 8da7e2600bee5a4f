use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Customer,
    Business,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "customer",
            UserType::Business => "business",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(UserType::Customer),
            "business" => Some(UserType::Business),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_values() {
        assert_eq!(UserType::parse("business"), Some(UserType::Business));
        assert_eq!(UserType::parse(UserType::Customer.as_str()), Some(UserType::Customer));
        assert_eq!(UserType::parse("admin"), None);
    }
}
