//! Server scaffolding templates.
//!
//! Templates come from three places: the built in [`catalog`], JSON posted by the
//! dashboard, and the line based text format handled by [`parser`]. All of them end up
//! as a [`ServerTemplate`] that must pass [`validate`] before it is queued or built.

pub mod builder;
pub mod catalog;
pub mod parser;

use crate::server::{error::template::TemplateError, model::template::ServerTemplate};

/// Discord's per-guild channel cap, categories included.
pub const MAX_CHANNELS: usize = 500;
/// Discord's per-guild role cap, minus headroom for managed roles.
pub const MAX_ROLES: usize = 200;

/// Checks a template against guild limits before it is queued or applied.
///
/// # Returns
/// - `Ok(())` - Template has content and fits within the limits
/// - `Err(TemplateError::Empty)` - No roles and no categories
/// - `Err(TemplateError::TooManyChannels)` - More than 500 channels and categories
/// - `Err(TemplateError::TooManyRoles)` - More than 200 roles
pub fn validate(template: &ServerTemplate) -> Result<(), TemplateError> {
    if template.categories.is_empty() && template.roles.is_empty() {
        return Err(TemplateError::Empty);
    }

    let channels = template.channel_count();
    if channels > MAX_CHANNELS {
        return Err(TemplateError::TooManyChannels(channels));
    }

    if template.roles.len() > MAX_ROLES {
        return Err(TemplateError::TooManyRoles(template.roles.len()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::template::{TemplateCategory, TemplateChannel, TemplateRole};

    fn role(name: &str) -> TemplateRole {
        TemplateRole {
            name: name.to_string(),
            color: 0,
            permissions: 0,
            hoist: false,
            mentionable: false,
        }
    }

    #[test]
    fn rejects_empty_template() {
        assert_eq!(validate(&ServerTemplate::default()), Err(TemplateError::Empty));
    }

    #[test]
    fn counts_categories_toward_channel_limit() {
        let template = ServerTemplate {
            roles: vec![],
            categories: (0..100)
                .map(|i| TemplateCategory {
                    name: format!("cat {}", i),
                    channels: (0..4).map(|j| TemplateChannel::text(&format!("c{}", j), None)).collect(),
                })
                .collect(),
        };

        // 100 categories + 400 channels
        assert_eq!(validate(&template), Ok(()));

        let mut over = template;
        over.categories[0].channels.push(TemplateChannel::voice("extra"));
        assert_eq!(validate(&over), Err(TemplateError::TooManyChannels(501)));
    }

    #[test]
    fn rejects_too_many_roles() {
        let template = ServerTemplate {
            roles: (0..201).map(|i| role(&format!("r{}", i))).collect(),
            categories: vec![],
        };

        assert_eq!(validate(&template), Err(TemplateError::TooManyRoles(201)));
    }

    #[test]
    fn catalog_templates_are_valid() {
        for name in catalog::TEMPLATE_NAMES {
            assert_eq!(validate(&catalog::template(name)), Ok(()), "{}", name);
        }
    }
}
