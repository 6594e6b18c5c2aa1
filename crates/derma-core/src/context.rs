//! Survey-derived context forwarded alongside an analysis request.

use serde::{Deserialize, Serialize};

/// Auxiliary request fields derived from a user's survey.
///
/// The submission flow treats this as opaque: it is flattened into
/// multipart text fields and never inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyContext {
    pub username: String,
    /// Newline-separated free text describing the user.
    pub user_context: String,
    pub safety_warnings: Vec<String>,
    pub age_recommendations: Vec<String>,
}

impl SurveyContext {
    /// Multipart field name/value pairs. List fields are encoded as JSON arrays.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("user_context", self.user_context.clone()),
            (
                "safety_warnings",
                serde_json::Value::from(self.safety_warnings.clone()).to_string(),
            ),
            (
                "age_recommendations",
                serde_json::Value::from(self.age_recommendations.clone()).to_string(),
            ),
            ("username", self.username.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn list_fields_are_json_encoded() {
        let context = SurveyContext {
            username: "ana".into(),
            user_context: "User: ana\nAge: 31".into(),
            safety_warnings: vec!["Avoid fragranced products".into()],
            age_recommendations: Vec::new(),
        };

        assert_eq!(
            context.form_fields(),
            vec![
                ("user_context", "User: ana\nAge: 31".to_string()),
                (
                    "safety_warnings",
                    r#"["Avoid fragranced products"]"#.to_string()
                ),
                ("age_recommendations", "[]".to_string()),
                ("username", "ana".to_string()),
            ]
        );
    }
}
