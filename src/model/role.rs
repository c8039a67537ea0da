use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GuildRoleDto {
    pub id: String,
    pub name: String,
    /// `#rrggbb`, `#99aab5` for roles without a color.
    pub color: String,
    pub position: i64,
    pub managed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRoleDto {
    pub name: String,
    /// Hex color such as `#ff0000`. Falls back to `#99aab5` when invalid.
    pub color: Option<String>,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub mentionable: bool,
    /// Permission names such as `Manage Messages`.
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteRoleDto {
    pub role_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkRolesDto {
    pub role_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LevelRoleDto {
    pub level: i32,
    pub role_id: String,
}
