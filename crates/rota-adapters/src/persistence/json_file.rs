use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use rota_core::settings::Settings;
use rota_ports::error::PortError;
use rota_ports::outbound::SettingsRepository;

/// Settings kept as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, settings: &Settings) -> Result<(), PortError> {
        let data = serde_json::to_string_pretty(settings)
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| PortError::Persistence(e.to_string()))?;
        }

        // write next to the target, then rename over it
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, data)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for JsonFileStore {
    async fn load(&self) -> Result<Settings, PortError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => {
                serde_json::from_str(&data).map_err(|e| PortError::Persistence(e.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let settings = Settings::default();
                self.write(&settings).await?;
                tracing::info!(path = %self.path.display(), "settings file created with defaults");
                Ok(settings)
            }
            Err(e) => Err(PortError::Persistence(e.to_string())),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), PortError> {
        self.write(settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::participant::Roster;

    #[tokio::test]
    async fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("settings.json"));

        let settings = store.load().await.unwrap();

        assert_eq!(settings, Settings::default());
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn save_then_load_returns_saved_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        let mut settings = Settings::default();
        settings.rotation.users = Roster::from_names(["A", "B", "C"]);
        settings.reminder.minute = 30;

        store.save(&settings).await.unwrap();

        assert_eq!(store.load().await.unwrap(), settings);
        assert!(!dir.path().join("settings.json.tmp").exists());
    }

    #[tokio::test]
    async fn reads_document_written_by_hand() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"users":[{"name":"Ali"},{"name":"Veli"}],"rotationStartWeek":10,"rotationStartYear":2025,"botToken":"t","chatId":"c"}"#,
        )
        .unwrap();

        let settings = JsonFileStore::new(&path).load().await.unwrap();

        assert_eq!(settings.rotation.users.names(), vec!["Ali", "Veli"]);
        assert_eq!(settings.rotation.rotation_start_week, 10);
        assert_eq!(settings.reminder.day, 5);
        assert!(settings.target.is_configured());
    }

    #[tokio::test]
    async fn malformed_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();

        assert!(matches!(err, PortError::Persistence(_)));
    }
}
