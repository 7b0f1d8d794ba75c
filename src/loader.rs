//! データ取得
//!
//! クリニックCSVと境界GeoJSONを並行して取得する。
//! どちらの失敗も他方を止めない。

use crate::config::Config;
use crate::error::{ClinicMapError, Result};
use clinic_map_common::LoadFailure;

/// 両ソースの取得結果
#[derive(Debug)]
pub struct LoadedSources {
    pub clinics: std::result::Result<String, LoadFailure>,
    pub boundaries: std::result::Result<String, LoadFailure>,
}

pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(config.timeout()).build()?)
}

/// URLの本文をテキストで取得（2xx以外はエラー）
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    tracing::debug!(url = %url, "fetching");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClinicMapError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.text().await?)
}

/// 両ソースを並行取得
pub async fn load_sources(client: &reqwest::Client, config: &Config) -> LoadedSources {
    let (clinics, boundaries) = tokio::join!(
        fetch_text(client, &config.dashboard.clinics_url),
        fetch_text(client, &config.dashboard.boundaries_url),
    );

    LoadedSources {
        clinics: clinics.map_err(into_failure),
        boundaries: boundaries.map_err(into_failure),
    }
}

fn into_failure(error: ClinicMapError) -> LoadFailure {
    tracing::warn!(error = %error, "source fetch failed");
    LoadFailure::new(error.to_string())
}
