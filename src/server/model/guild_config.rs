//! Per-guild settings document.
//!
//! Settings are a free-form JSON object so the dashboard can add keys without a
//! migration. Known keys get typed accessors here, everything else passes through
//! untouched on merge.

use serde_json::{Map, Value};

use crate::server::{
    error::AppError,
    model::{rules::RulesConfig, verify::VerifyConfig},
    util::parse::{parse_optional_id, parse_u64_from_string},
};

pub const KEY_VERIFY: &str = "verify";
pub const KEY_RULES: &str = "rules";
pub const KEY_VERIFIED_ROLE_ID: &str = "verified_role_id";
pub const KEY_TICKET_CATEGORY_ID: &str = "ticket_category_id";
pub const KEY_TICKET_TRANSCRIPT_CHANNEL_ID: &str = "ticket_transcript_channel_id";
pub const KEY_TICKET_SAVE_TRANSCRIPTS: &str = "ticket_save_transcripts";
pub const KEY_MOD_LOG_CHANNEL_ID: &str = "mod_log_channel_id";
pub const KEY_LEVEL_UP_CHANNEL_ID: &str = "level_up_channel_id";
pub const KEY_PREFIX: &str = "prefix";

pub const DEFAULT_PREFIX: &str = "!";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuildSettings {
    pub guild_id: u64,
    pub values: Map<String, Value>,
}

/// Ticket options written by the ticket setup request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketSettings {
    pub category_id: Option<u64>,
    pub save_transcripts: bool,
    pub transcript_channel_id: Option<u64>,
}

impl GuildSettings {
    pub fn empty(guild_id: u64) -> Self {
        Self {
            guild_id,
            values: Map::new(),
        }
    }

    /// Converts an entity model, treating a non-object document as empty.
    pub fn from_entity(entity: entity::guild_config::Model) -> Result<Self, AppError> {
        let values = match serde_json::from_str::<Value>(&entity.settings)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            values,
        })
    }

    pub fn into_dto(self) -> Value {
        Value::Object(self.values)
    }

    /// Shallow merge: top level keys in `patch` replace existing ones.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            self.values.insert(key, value);
        }
    }

    /// Reads an id stored either as a string or as a JSON number.
    pub fn id(&self, key: &str) -> Option<u64> {
        match self.values.get(key)? {
            Value::String(raw) => parse_optional_id(raw),
            Value::Number(number) => number.as_u64().filter(|id| *id != 0),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(raw)) => matches!(raw.as_str(), "True" | "true" | "1"),
            Some(Value::Number(number)) => number.as_u64() == Some(1),
            _ => false,
        }
    }

    pub fn prefix(&self) -> String {
        self.values
            .get(KEY_PREFIX)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(DEFAULT_PREFIX)
            .to_string()
    }

    /// Falls back to defaults when the stored document is missing or malformed.
    pub fn verify(&self) -> VerifyConfig {
        self.values
            .get(KEY_VERIFY)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    pub fn rules(&self) -> RulesConfig {
        self.values
            .get(KEY_RULES)
            .cloned()
            .and_then(|value| serde_json::from_value::<RulesConfig>(value).ok())
            .unwrap_or_default()
            .sanitized()
    }

    pub fn tickets(&self) -> TicketSettings {
        TicketSettings {
            category_id: self.id(KEY_TICKET_CATEGORY_ID),
            save_transcripts: self.flag(KEY_TICKET_SAVE_TRANSCRIPTS),
            transcript_channel_id: self.id(KEY_TICKET_TRANSCRIPT_CHANNEL_ID),
        }
    }
}

/// Builds a single-key patch for [`GuildSettings::merge`].
pub fn patch(key: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(value: Value) -> GuildSettings {
        GuildSettings {
            guild_id: 1,
            values: value.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn ids_accept_strings_and_numbers() {
        let settings = settings(json!({
            "verified_role_id": "42",
            "mod_log_channel_id": 7,
            "level_up_channel_id": "None",
        }));

        assert_eq!(settings.id(KEY_VERIFIED_ROLE_ID), Some(42));
        assert_eq!(settings.id(KEY_MOD_LOG_CHANNEL_ID), Some(7));
        assert_eq!(settings.id(KEY_LEVEL_UP_CHANNEL_ID), None);
    }

    #[test]
    fn prefix_defaults_when_blank() {
        assert_eq!(settings(json!({})).prefix(), "!");
        assert_eq!(settings(json!({ "prefix": "  " })).prefix(), "!");
        assert_eq!(settings(json!({ "prefix": "?" })).prefix(), "?");
    }

    #[test]
    fn merge_replaces_top_level_keys_only() {
        let mut settings = settings(json!({ "prefix": "!", "verify": { "title": "Old" } }));

        settings.merge(patch(KEY_VERIFY, json!({ "title": "New" })));

        assert_eq!(settings.values["prefix"], "!");
        assert_eq!(settings.verify().title, "New");
    }

    #[test]
    fn malformed_rules_fall_back_to_defaults() {
        let settings = settings(json!({ "rules": "not an object" }));
        assert_eq!(settings.rules().title_text, "Server Rules");
    }

    #[test]
    fn ticket_settings_read_legacy_flag_strings() {
        let settings = settings(json!({
            "ticket_category_id": "10",
            "ticket_save_transcripts": "True",
            "ticket_transcript_channel_id": "",
        }));

        assert_eq!(
            settings.tickets(),
            TicketSettings {
                category_id: Some(10),
                save_transcripts: true,
                transcript_channel_id: None,
            }
        );
    }
}
