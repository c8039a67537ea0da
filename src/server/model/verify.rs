use serde::{Deserialize, Serialize};
use serenity::all::RoleId;

use crate::server::util::parse::parse_optional_id;

pub const DEFAULT_VERIFY_TITLE: &str = "Verify to access";
pub const DEFAULT_VERIFY_DESCRIPTION: &str = "Click verify to unlock access.";

fn default_title() -> String {
    DEFAULT_VERIFY_TITLE.to_string()
}

fn default_description() -> String {
    DEFAULT_VERIFY_DESCRIPTION.to_string()
}

/// Verification panel settings, stored under the `verify` key of the guild config.
///
/// Field names are camelCase in storage so the dashboard can edit the document
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyConfig {
    #[serde(default)]
    pub verified_role: Option<String>,
    #[serde(default)]
    pub unverified_role: Option<String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub footer_text: Option<String>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            verified_role: None,
            unverified_role: None,
            title: default_title(),
            description: default_description(),
            banner_url: None,
            footer_text: None,
        }
    }
}

impl VerifyConfig {
    pub fn verified_role_id(&self) -> Option<RoleId> {
        self.verified_role
            .as_deref()
            .and_then(parse_optional_id)
            .map(RoleId::new)
    }

    pub fn unverified_role_id(&self) -> Option<RoleId> {
        self.unverified_role
            .as_deref()
            .and_then(parse_optional_id)
            .map(RoleId::new)
    }

    /// Messages are only gated when both roles are configured.
    pub fn gate_active(&self) -> bool {
        self.verified_role_id().is_some() && self.unverified_role_id().is_some()
    }

    /// Applies values from the setup modal. Blank optional inputs clear the field,
    /// blank title or description fall back to the defaults.
    pub fn apply_form(&mut self, form: VerifyForm) {
        fn non_empty(value: String) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        self.verified_role = non_empty(form.verified_role);
        self.unverified_role = non_empty(form.unverified_role);
        self.title = non_empty(form.title).unwrap_or_else(default_title);
        self.description = non_empty(form.description).unwrap_or_else(default_description);
        self.banner_url = non_empty(form.banner_url)
            .filter(|url| crate::server::model::rules::is_valid_banner_url(url));
        self.footer_text = non_empty(form.footer_text);
    }
}

/// Raw text submitted through the verification setup modal.
#[derive(Debug, Clone, Default)]
pub struct VerifyForm {
    pub unverified_role: String,
    pub verified_role: String,
    pub title: String,
    pub description: String,
    pub banner_url: String,
    pub footer_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_requires_both_roles() {
        let mut config = VerifyConfig {
            verified_role: Some("10".to_string()),
            ..Default::default()
        };
        assert!(!config.gate_active());

        config.unverified_role = Some("11".to_string());
        assert!(config.gate_active());
    }

    #[test]
    fn form_blanks_fall_back_to_defaults() {
        let mut config = VerifyConfig::default();
        config.apply_form(VerifyForm {
            verified_role: " 42 ".to_string(),
            title: "   ".to_string(),
            banner_url: "https://example.com/page".to_string(),
            ..Default::default()
        });

        assert_eq!(config.verified_role_id(), Some(RoleId::new(42)));
        assert_eq!(config.unverified_role, None);
        assert_eq!(config.title, DEFAULT_VERIFY_TITLE);
        assert_eq!(config.description, DEFAULT_VERIFY_DESCRIPTION);
        // Not an image link
        assert_eq!(config.banner_url, None);
    }

    #[test]
    fn reads_camel_case_document() {
        let config: VerifyConfig = serde_json::from_value(serde_json::json!({
            "verifiedRole": "1",
            "unverifiedRole": "2",
            "footerText": "Welcome"
        }))
        .unwrap();

        assert!(config.gate_active());
        assert_eq!(config.title, DEFAULT_VERIFY_TITLE);
        assert_eq!(config.footer_text.as_deref(), Some("Welcome"));
    }
}
