//! Learner profile and conversation types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile key holding free text such as "Level 4: Building foundations"
pub const MASTERY_LEVEL_SUMMARY: &str = "mastery_level_summary";

/// Profile key holding the preferred teaching style, e.g. "visual"
pub const PREFERRED_TEACHING_STYLE: &str = "preferred_teaching_style";

/// One turn of prior conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Opaque learner profile
///
/// The pipeline only reads [`MASTERY_LEVEL_SUMMARY`] and
/// [`PREFERRED_TEACHING_STYLE`]; everything else is forwarded to the tool
/// as `user_info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserContext(Map<String, Value>);

impl UserContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for UserContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Source of learner profiles
pub trait UserContextProvider: Send + Sync {
    /// Profile for `user_id`; lookups always succeed
    fn user_context(&self, user_id: &str) -> UserContext;
}

/// Serves the same demo profile to every user
#[derive(Debug, Clone)]
pub struct StaticProfileProvider {
    profile: UserContext,
}

impl StaticProfileProvider {
    /// Serve `profile`, with `user_id` filled in per request
    pub fn new(profile: UserContext) -> Self {
        Self { profile }
    }
}

impl Default for StaticProfileProvider {
    fn default() -> Self {
        Self::new(
            UserContext::new()
                .with("name", "Student")
                .with("grade_level", "10")
                .with(
                    "learning_style_summary",
                    "Prefers visual explanations and structured notes",
                )
                .with("emotional_state_summary", "Confused")
                .with(
                    MASTERY_LEVEL_SUMMARY,
                    "Level 4: Building foundational knowledge",
                )
                .with(PREFERRED_TEACHING_STYLE, "visual"),
        )
    }
}

impl UserContextProvider for StaticProfileProvider {
    fn user_context(&self, user_id: &str) -> UserContext {
        self.profile.clone().with("user_id", user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_static_profile() {
        let provider = StaticProfileProvider::default();
        let context = provider.user_context("student123");

        assert_eq!(context.get_str("user_id"), Some("student123"));
        assert_eq!(context.get_str(PREFERRED_TEACHING_STYLE), Some("visual"));
        assert_eq!(
            context.get_str(MASTERY_LEVEL_SUMMARY),
            Some("Level 4: Building foundational knowledge")
        );
    }

    #[test]
    fn test_get_str_ignores_non_strings() {
        let context = UserContext::new().with("grade_level", 10);
        assert_eq!(context.get_str("grade_level"), None);
        assert_eq!(context.get("grade_level"), Some(&json!(10)));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let context = UserContext::new().with("name", "Ada");
        assert_eq!(serde_json::to_value(&context).unwrap(), json!({"name": "Ada"}));
        assert_eq!(context.to_value(), json!({"name": "Ada"}));
    }

    #[test]
    fn test_chat_message_shape() {
        let message: ChatMessage =
            serde_json::from_value(json!({"role": "user", "content": "hi"})).unwrap();
        assert_eq!(message, ChatMessage::new("user", "hi"));
    }
}
