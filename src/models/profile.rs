use serde::{Deserialize, Serialize};

/// Read-only client context used to personalize the fallback system prompt.
///
/// Supplied by the portal's profile provider at session creation; the chat
/// core never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub products: Vec<String>,
    pub portfolio_value: f64,
}

impl UserProfile {
    /// Demo profile bundled with the service, used when a session is created
    /// without explicit client context.
    pub fn demo() -> Self {
        serde_json::from_str(include_str!("../../data/demo_profile.json"))
            .expect("bundled demo profile is valid JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_profile_loads() {
        let profile = UserProfile::demo();
        assert!(!profile.name.is_empty());
        assert!(!profile.products.is_empty());
        assert!(profile.portfolio_value > 0.0);
    }

    #[test]
    fn profile_deserializes_camel_case() {
        let json = r#"{
            "name": "Sam",
            "products": ["Everyday Account"],
            "portfolioValue": 1200.5
        }"#;
        let profile: UserProfile = serde_json::from_str(json).expect("deserialize");
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.portfolio_value, 1200.5);
    }
}
