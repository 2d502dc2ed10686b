use serde::{Deserialize, Serialize};

pub mod environment {
    use std::collections::BTreeMap;

    use super::*;

    /// Environment descriptor returned by `GET /api/v1/environment`.
    ///
    /// Produced once per successful bootstrap; the client treats it as
    /// immutable until the next bootstrap.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EnvironmentDescriptor {
        #[serde(default)]
        pub account_list: BTreeMap<String, AccountInfo>,
        #[serde(default)]
        pub category_list: BTreeMap<String, CategoryInfo>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AccountInfo {
        pub display_name: String,
        /// Profile picture URL; absent when the account has none.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub pic: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryInfo {
        pub name: String,
    }
}

#[cfg(test)]
mod tests {
    use super::environment::EnvironmentDescriptor;

    #[test]
    fn environment_deserializes_wire_shape() {
        let body = serde_json::json!({
            "account_list": {
                "acc-1": { "display_name": "Alice", "pic": "https://cdn/pic.png" },
                "acc-2": { "display_name": "Bob" }
            },
            "category_list": {
                "cat-1": { "name": "Movies" }
            }
        });

        let env: EnvironmentDescriptor =
            serde_json::from_value(body).expect("valid environment body");
        assert_eq!(env.account_list.len(), 2);
        assert_eq!(
            env.account_list["acc-1"].pic.as_deref(),
            Some("https://cdn/pic.png")
        );
        assert!(env.account_list["acc-2"].pic.is_none());
        assert_eq!(env.category_list["cat-1"].name, "Movies");
    }

    #[test]
    fn environment_tolerates_missing_sections() {
        let env: EnvironmentDescriptor =
            serde_json::from_value(serde_json::json!({})).expect("empty body");
        assert!(env.account_list.is_empty());
        assert!(env.category_list.is_empty());
    }
}
