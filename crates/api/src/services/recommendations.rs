//! Rule-based wellness suggestions.
//!
//! Each rule looks at one field of the request and contributes at most one
//! suggestion. Rules run in a fixed order, so the output order is stable:
//! sleep, then stress, then morning.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/recommendations`.
///
/// Fields are kept as raw JSON so any shape is accepted; shapes a rule
/// doesn't understand simply don't match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Accepted for forward compatibility; no rule reads it yet.
    #[serde(default)]
    pub preferences: Option<Value>,
    /// An array of goal keywords, or free text.
    #[serde(default)]
    pub goals: Option<Value>,
    #[serde(default)]
    pub time_of_day: Option<Value>,
}

/// One suggested activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

const SLEEP: Suggestion = Suggestion {
    kind: "sound-therapy",
    title: "Evening Sleep Sounds",
    description: "Try our rain sounds for 10 minutes before bed",
    action: "Play Now",
};

const STRESS: Suggestion = Suggestion {
    kind: "breathing",
    title: "4-7-8 Breathing",
    description: "Practice this technique for instant stress relief",
    action: "Start Now",
};

const MORNING: Suggestion = Suggestion {
    kind: "meditation",
    title: "Morning Mindfulness",
    description: "5-minute meditation to start your day right",
    action: "Begin Session",
};

/// Suggestions for a request, in rule order.
#[must_use]
pub fn recommend(request: &RecommendationRequest) -> Vec<Suggestion> {
    let goals = request.goals.as_ref();
    let mut suggestions = Vec::new();

    if mentions_goal(goals, "sleep") {
        suggestions.push(SLEEP);
    }
    if mentions_goal(goals, "stress") {
        suggestions.push(STRESS);
    }
    if request.time_of_day.as_ref().and_then(Value::as_str) == Some("morning") {
        suggestions.push(MORNING);
    }

    suggestions
}

/// Arrays match on an element equal to `keyword`; strings match on substring.
fn mentions_goal(goals: Option<&Value>, keyword: &str) -> bool {
    match goals {
        Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(keyword)),
        Some(Value::String(text)) => text.contains(keyword),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(body: Value) -> RecommendationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_all_rules_in_order() {
        let got = recommend(&request(json!({
            "goals": ["stress", "sleep"],
            "timeOfDay": "morning"
        })));
        assert_eq!(got, vec![SLEEP, STRESS, MORNING]);
    }

    #[test]
    fn test_empty_request() {
        assert!(recommend(&RecommendationRequest::default()).is_empty());
        assert!(recommend(&request(json!({}))).is_empty());
    }

    #[test]
    fn test_array_goals_match_whole_elements() {
        assert_eq!(recommend(&request(json!({ "goals": ["sleep"] }))), vec![SLEEP]);
        assert!(recommend(&request(json!({ "goals": ["better sleep"] }))).is_empty());
    }

    #[test]
    fn test_string_goals_match_substrings() {
        let got = recommend(&request(json!({ "goals": "less stress, more sleep" })));
        assert_eq!(got, vec![SLEEP, STRESS]);
    }

    #[test]
    fn test_other_goal_shapes_match_nothing() {
        assert!(recommend(&request(json!({ "goals": 7 }))).is_empty());
        assert!(recommend(&request(json!({ "goals": { "sleep": true } }))).is_empty());
        assert!(recommend(&request(json!({ "goals": null }))).is_empty());
    }

    #[test]
    fn test_time_of_day_must_be_exact() {
        assert!(recommend(&request(json!({ "timeOfDay": "evening" }))).is_empty());
        assert!(recommend(&request(json!({ "timeOfDay": "Morning" }))).is_empty());
        assert!(recommend(&request(json!({ "timeOfDay": ["morning"] }))).is_empty());
    }

    #[test]
    fn test_preferences_are_ignored() {
        let got = recommend(&request(json!({ "preferences": { "sound": "rain" } })));
        assert!(got.is_empty());
    }

    #[test]
    fn test_suggestion_wire_shape() {
        let value = serde_json::to_value(SLEEP).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "sound-therapy",
                "title": "Evening Sleep Sounds",
                "description": "Try our rain sounds for 10 minutes before bed",
                "action": "Play Now"
            })
        );
    }
}
