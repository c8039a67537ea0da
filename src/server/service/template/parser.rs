//! Line based server structure format used by the dashboard and `/help`.
//!
//! ```text
//! INFORMATION (category)
//!   #announcements | Server news
//!   🔊 Lounge
//!   Stage (voice)
//!
//! STAFF (roles)
//!   Moderator | Color: #ff944d | Permissions: [Kick Members, Manage Messages]
//! ```

use crate::server::{
    error::template::TemplateError,
    model::{
        permission::parse_permission_list,
        template::{
            ServerTemplate, TemplateCategory, TemplateChannel, TemplateRole, DEFAULT_ROLE_COLOR,
        },
    },
    util::parse::parse_hex_color,
};

const CATEGORY_MARKER: &str = "(category)";
const ROLES_MARKER: &str = "(roles)";
const VOICE_MARKER: &str = "(voice)";
const VOICE_PREFIX: &str = "🔊";

/// Name of the category that collects channels listed before any header.
pub const UNCATEGORIZED: &str = "GENERAL";

enum Section {
    None,
    Category,
    Roles,
}

/// Strips a case-insensitive trailing marker such as `(category)`.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let split = line.len().checked_sub(marker.len())?;
    if !line.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = line.split_at(split);
    tail.eq_ignore_ascii_case(marker).then_some(head.trim())
}

/// Parses a structure document into a template.
///
/// # Returns
/// - `Ok(ServerTemplate)` - At least one category or role was found
/// - `Err(TemplateError::EmptyStructure)` - Input had no recognizable lines
pub fn parse_structure(raw: &str) -> Result<ServerTemplate, TemplateError> {
    let mut template = ServerTemplate::default();
    let mut section = Section::None;

    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if strip_marker(line, ROLES_MARKER).is_some() {
            section = Section::Roles;
            continue;
        }

        if let Some(name) = strip_marker(line, CATEGORY_MARKER) {
            template.categories.push(TemplateCategory {
                name: name.to_string(),
                channels: Vec::new(),
            });
            section = Section::Category;
            continue;
        }

        match section {
            Section::Roles => {
                if let Some(role) = parse_role_line(line) {
                    template.roles.push(role);
                }
            }
            Section::Category | Section::None => {
                let Some(channel) = parse_channel_line(line) else {
                    continue;
                };

                if template.categories.is_empty() {
                    template.categories.push(TemplateCategory {
                        name: UNCATEGORIZED.to_string(),
                        channels: Vec::new(),
                    });
                }
                if let Some(category) = template.categories.last_mut() {
                    category.channels.push(channel);
                }
            }
        }
    }

    if template.categories.is_empty() && template.roles.is_empty() {
        return Err(TemplateError::EmptyStructure);
    }

    Ok(template)
}

fn parse_channel_line(line: &str) -> Option<TemplateChannel> {
    if let Some(name) = line.strip_prefix(VOICE_PREFIX) {
        let name = name.trim();
        return (!name.is_empty()).then(|| TemplateChannel::voice(name));
    }

    if let Some(name) = strip_marker(line, VOICE_MARKER) {
        return (!name.is_empty()).then(|| TemplateChannel::voice(name));
    }

    let (name, topic) = match line.split_once('|') {
        Some((name, topic)) => (name, Some(topic.trim()).filter(|topic| !topic.is_empty())),
        None => (line, None),
    };

    let name = name.trim().trim_start_matches('#').trim();
    if name.is_empty() {
        return None;
    }

    Some(TemplateChannel::text(name, topic))
}

/// `Name | Color: #hex | Permissions: [A, B]`, attributes in any order.
fn parse_role_line(line: &str) -> Option<TemplateRole> {
    let mut parts = line.split('|').map(str::trim);

    let name = parts.next().filter(|name| !name.is_empty())?;
    let mut role = TemplateRole {
        name: name.to_string(),
        color: DEFAULT_ROLE_COLOR,
        permissions: 0,
        hoist: false,
        mentionable: false,
    };

    for part in parts {
        let Some((key, value)) = part.split_once(':') else {
            continue;
        };

        match key.trim().to_lowercase().as_str() {
            "color" | "colour" => {
                role.color = parse_hex_color(value).unwrap_or(DEFAULT_ROLE_COLOR);
            }
            "permissions" | "perms" => {
                role.permissions = parse_permission_list(value).bits();
            }
            "hoist" => role.hoist = value.trim().eq_ignore_ascii_case("true"),
            "mentionable" => role.mentionable = value.trim().eq_ignore_ascii_case("true"),
            _ => {}
        }
    }

    Some(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::template::ChannelKind;
    use serenity::all::Permissions;

    #[test]
    fn parses_categories_and_channels() {
        let template = parse_structure(
            "INFORMATION (category)\n  #announcements | Server news\n  #bot-info\n\nVOICE (Category)\n  🔊 Lounge\n  Stage (voice)\n",
        )
        .unwrap();

        assert_eq!(template.categories.len(), 2);
        let info = &template.categories[0];
        assert_eq!(info.name, "INFORMATION");
        assert_eq!(info.channels[0].name, "announcements");
        assert_eq!(info.channels[0].topic.as_deref(), Some("Server news"));
        assert_eq!(info.channels[1].topic, None);

        let voice = &template.categories[1];
        assert!(voice.channels.iter().all(|c| c.kind == ChannelKind::Voice));
        assert_eq!(voice.channels[1].name, "Stage");
    }

    #[test]
    fn parses_roles_block() {
        let template = parse_structure(
            "STAFF & ADMIN (roles)\n  Owner | Color: #ff0000 | Permissions: [Administrator, Manage Server]\n  Helper\n",
        )
        .unwrap();

        assert!(template.categories.is_empty());
        assert_eq!(template.roles.len(), 2);
        assert_eq!(template.roles[0].color, 0xFF0000);
        assert_eq!(
            template.roles[0].permissions,
            (Permissions::ADMINISTRATOR | Permissions::MANAGE_GUILD).bits()
        );
        assert_eq!(template.roles[1].color, DEFAULT_ROLE_COLOR);
    }

    #[test]
    fn channels_before_a_header_are_grouped() {
        let template = parse_structure("#general\n#memes").unwrap();

        assert_eq!(template.categories.len(), 1);
        assert_eq!(template.categories[0].name, UNCATEGORIZED);
        assert_eq!(template.categories[0].channels.len(), 2);
    }

    #[test]
    fn blank_input_is_an_error() {
        assert_eq!(parse_structure("  \n\n"), Err(TemplateError::EmptyStructure));
    }

    #[test]
    fn marker_match_survives_multibyte_names() {
        assert_eq!(strip_marker("🎮 GAMES (category)", CATEGORY_MARKER), Some("🎮 GAMES"));
        assert_eq!(strip_marker("🎮", CATEGORY_MARKER), None);
    }
}
