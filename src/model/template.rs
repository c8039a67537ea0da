use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplyTemplateDto {
    /// Catalog name: `gaming`, `community`, `support` or `creative`.
    pub template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StructureDto {
    /// Indented text structure, see `/help` in the bot for the format.
    pub structure: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateRoleDto {
    pub name: String,
    pub color: u32,
    pub permissions: u64,
    pub hoist: bool,
    pub mentionable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateChannelDto {
    pub name: String,
    /// `text` or `voice`.
    pub kind: String,
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateCategoryDto {
    pub name: String,
    pub channels: Vec<TemplateChannelDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateDto {
    pub roles: Vec<TemplateRoleDto>,
    pub categories: Vec<TemplateCategoryDto>,
    pub channel_count: usize,
}
