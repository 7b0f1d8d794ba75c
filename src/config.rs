use crate::error::{ClinicMapError, Result};
use clinic_map_common::DashboardConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub dashboard: DashboardConfig,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dashboard: DashboardConfig::default(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    /// 既定の設定ファイルを読む。無ければ既定値
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut root: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)?;
        // dashboard 節はブラウザ側と同じ読み方で上書き
        let dashboard = match root.remove("dashboard") {
            Some(section) => DashboardConfig::from_json(&section.to_string())?,
            None => DashboardConfig::default(),
        };
        let mut config: Config = serde_json::from_value(serde_json::Value::Object(root))?;
        config.dashboard = dashboard;
        config.validate()?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ClinicMapError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("clinic-map").join("config.json"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(ClinicMapError::Config("timeoutSeconds は1以上".into()));
        }
        if self.dashboard.min_zoom > self.dashboard.initial_zoom {
            return Err(ClinicMapError::Config(format!(
                "minZoom({}) が initialZoom({}) より大きい",
                self.dashboard.min_zoom, self.dashboard.initial_zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.dashboard.initial_zoom, 6);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_file_partial_json() {
        let dir = tempfile::tempdir().expect("一時ディレクトリ作成失敗");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeoutSeconds": 5, "dashboard": {"flyZoom": 12}}"#)
            .expect("書き込み失敗");

        let config = Config::from_file(&path).expect("読み込み失敗");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.dashboard.fly_zoom, 12);
        assert_eq!(config.dashboard.initial_zoom, 6);
    }

    #[test]
    fn test_from_file_rejects_zero_timeout() {
        let dir = tempfile::tempdir().expect("一時ディレクトリ作成失敗");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeoutSeconds": 0}"#).expect("書き込み失敗");

        let result = Config::from_file(&path);
        assert!(matches!(result, Err(ClinicMapError::Config(_))));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let dir = tempfile::tempdir().expect("一時ディレクトリ作成失敗");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").expect("書き込み失敗");

        assert!(matches!(Config::from_file(&path), Err(ClinicMapError::Json(_))));
    }

    #[test]
    fn test_from_file_invalid_dashboard_section() {
        let dir = tempfile::tempdir().expect("一時ディレクトリ作成失敗");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"timeoutSeconds": 5, "dashboard": {"flyZoom": "ten"}}"#)
            .expect("書き込み失敗");

        let result = Config::from_file(&path);
        assert!(matches!(
            result,
            Err(ClinicMapError::Common(clinic_map_common::Error::Json(_)))
        ));
    }
}
