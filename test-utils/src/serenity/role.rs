//! Serenity `Role` fixtures.

use serenity::all::Role;

fn role_json(role_id: u64, name: &str, position: i16, managed: bool) -> serde_json::Value {
    serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": "0",
        "managed": managed,
        "mentionable": false,
    })
}

/// Creates a test Serenity Role that is not managed by an integration.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
pub fn create_test_role(role_id: u64, name: &str, position: i16) -> Role {
    serde_json::from_value(role_json(role_id, name, position, false))
        .expect("Failed to create test role - invalid JSON structure")
}

/// Creates a role owned by an integration such as another bot.
pub fn create_managed_role(role_id: u64, name: &str, position: i16) -> Role {
    serde_json::from_value(role_json(role_id, name, position, true))
        .expect("Failed to create managed test role - invalid JSON structure")
}
