//! Server scaffolding templates applied by the bot.

use serde::{Deserialize, Serialize};

use crate::model::template::{TemplateCategoryDto, TemplateChannelDto, TemplateDto, TemplateRoleDto};

/// Default role color, Discord's neutral grey.
pub const DEFAULT_ROLE_COLOR: u32 = 0x99AAB5;

fn default_role_color() -> u32 {
    DEFAULT_ROLE_COLOR
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    #[default]
    Text,
    Voice,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRole {
    pub name: String,
    #[serde(default = "default_role_color")]
    pub color: u32,
    /// Raw permission bitfield.
    #[serde(default)]
    pub permissions: u64,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub mentionable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateChannel {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ChannelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl TemplateChannel {
    pub fn text(name: &str, topic: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            kind: ChannelKind::Text,
            topic: topic.map(str::to_string),
        }
    }

    pub fn voice(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ChannelKind::Voice,
            topic: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateCategory {
    pub name: String,
    #[serde(default)]
    pub channels: Vec<TemplateChannel>,
}

/// Roles plus categories of channels, created in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerTemplate {
    #[serde(default)]
    pub roles: Vec<TemplateRole>,
    #[serde(default)]
    pub categories: Vec<TemplateCategory>,
}

impl ServerTemplate {
    /// Number of guild channels the template creates, categories included.
    pub fn channel_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| 1 + category.channels.len())
            .sum()
    }

    pub fn into_dto(self) -> TemplateDto {
        let channel_count = self.channel_count();

        TemplateDto {
            roles: self
                .roles
                .into_iter()
                .map(|role| TemplateRoleDto {
                    name: role.name,
                    color: role.color,
                    permissions: role.permissions,
                    hoist: role.hoist,
                    mentionable: role.mentionable,
                })
                .collect(),
            categories: self
                .categories
                .into_iter()
                .map(|category| TemplateCategoryDto {
                    name: category.name,
                    channels: category
                        .channels
                        .into_iter()
                        .map(|channel| TemplateChannelDto {
                            name: channel.name,
                            kind: channel.kind.as_str().to_string(),
                            topic: channel.topic,
                        })
                        .collect(),
                })
                .collect(),
            channel_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_custom_template() {
        let template: ServerTemplate = serde_json::from_str(
            r#"{"categories":[{"name":"INFO","channels":[{"name":"rules"},{"name":"Lounge","type":"voice"}]}]}"#,
        )
        .unwrap();

        assert!(template.roles.is_empty());
        assert_eq!(template.categories[0].channels[0].kind, ChannelKind::Text);
        assert_eq!(template.categories[0].channels[1].kind, ChannelKind::Voice);
        assert_eq!(template.channel_count(), 3);
    }

    #[test]
    fn role_color_defaults_to_grey() {
        let role: TemplateRole = serde_json::from_str(r#"{"name":"Member"}"#).unwrap();
        assert_eq!(role.color, DEFAULT_ROLE_COLOR);
        assert!(!role.hoist);
    }
}
