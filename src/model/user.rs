use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardUserDto {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
}

/// A guild from the logged in user's Discord guild list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserGuildDto {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub owner: bool,
    /// Permission bitfield as returned by Discord.
    pub permissions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub user: DashboardUserDto,
    pub guilds: Vec<UserGuildDto>,
}

/// Landing response: who is logged in, if anyone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndexDto {
    pub logged_in: bool,
    pub user: Option<DashboardUserDto>,
    pub login_url: String,
}
