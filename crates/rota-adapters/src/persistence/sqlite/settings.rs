use async_trait::async_trait;
use chrono::Local;

use rota_core::settings::Settings;
use rota_ports::error::PortError;
use rota_ports::outbound::SettingsRepository;

use super::SqliteDb;

impl SqliteDb {
    async fn upsert_settings(&self, settings: &Settings) -> Result<(), PortError> {
        let data =
            serde_json::to_string(settings).map_err(|e| PortError::Persistence(e.to_string()))?;
        let updated_at = Local::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO settings (id, data, updated_at) VALUES (1, ?, ?)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
        )
        .bind(&data)
        .bind(&updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for SqliteDb {
    async fn load(&self) -> Result<Settings, PortError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        match row {
            Some((data,)) => {
                serde_json::from_str(&data).map_err(|e| PortError::Persistence(e.to_string()))
            }
            None => {
                let settings = Settings::default();
                self.upsert_settings(&settings).await?;
                tracing::info!("settings initialized with defaults");
                Ok(settings)
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), PortError> {
        self.upsert_settings(settings).await
    }
}
