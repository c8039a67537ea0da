use sea_orm::DatabaseConnection;

use crate::server::{
    data::custom_command::CustomCommandRepository,
    error::AppError,
    model::custom_command::{
        normalize_name, CustomCommand, UpsertCustomCommandParam, MAX_COMMAND_RESPONSE,
    },
};

pub struct CustomCommandService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CustomCommandService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<CustomCommand>, AppError> {
        CustomCommandRepository::new(self.db).list(guild_id).await
    }

    /// Creates or replaces a command after normalizing its name.
    ///
    /// # Returns
    /// - `Ok(CustomCommand)` - Stored command
    /// - `Err(AppError::BadRequest)` - Blank or invalid name, blank or oversized response
    pub async fn save(
        &self,
        guild_id: u64,
        name: &str,
        response: &str,
        is_embed: bool,
        created_by: Option<u64>,
    ) -> Result<CustomCommand, AppError> {
        if name.trim().is_empty() || response.trim().is_empty() {
            return Err(AppError::BadRequest("Missing name or response".to_string()));
        }
        let name = normalize_name(name).ok_or_else(|| {
            AppError::BadRequest("Command names must be a single word of up to 32 characters".to_string())
        })?;
        if response.chars().count() > MAX_COMMAND_RESPONSE {
            return Err(AppError::BadRequest(format!(
                "Response must be at most {} characters",
                MAX_COMMAND_RESPONSE
            )));
        }

        CustomCommandRepository::new(self.db)
            .upsert(UpsertCustomCommandParam {
                guild_id,
                name,
                response: response.to_string(),
                is_embed,
                created_by,
            })
            .await
    }

    /// # Returns
    /// - `Ok(())` - Command deleted
    /// - `Err(AppError::BadRequest)` - Blank name
    /// - `Err(AppError::NotFound)` - No command with that name
    pub async fn delete(&self, guild_id: u64, name: &str) -> Result<(), AppError> {
        let name = normalize_name(name)
            .ok_or_else(|| AppError::BadRequest("Missing name".to_string()))?;

        let deleted = CustomCommandRepository::new(self.db)
            .delete(guild_id, &name)
            .await?;
        if !deleted {
            return Err(AppError::NotFound(format!("Command '{}' not found", name)));
        }

        Ok(())
    }

    /// Looks up the command a message invokes, if any.
    pub async fn find(&self, guild_id: u64, name: &str) -> Result<Option<CustomCommand>, AppError> {
        let Some(name) = normalize_name(name) else {
            return Ok(None);
        };

        CustomCommandRepository::new(self.db)
            .find_by_name(guild_id, &name)
            .await
    }
}
