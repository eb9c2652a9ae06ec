use anyhow::Context;
use common::settings::SearchSettings;

use crate::config::BackendConfig;

/// Search settings from the configured dictionary file, or the built-in defaults.
pub async fn load_search_settings(config: &BackendConfig) -> anyhow::Result<SearchSettings> {
    let Some(path) = &config.dictionary_path else {
        tracing::info!("no dictionary configured, using default search settings");
        return Ok(SearchSettings::default());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read dictionary {}", path))?;
    let settings = SearchSettings::from_json(&raw).with_context(|| format!("Failed to parse dictionary {}", path))?;
    tracing::info!("loaded search settings from {}", path);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_path_falls_back_to_defaults() {
        let settings = load_search_settings(&BackendConfig::default()).await.unwrap();
        assert_eq!(settings, SearchSettings::default());
    }

    #[tokio::test]
    async fn unreadable_dictionary_is_an_error() {
        let config = BackendConfig { dictionary_path: Some("/nonexistent/dictionary.json".to_string()), ..Default::default() };
        let err = load_search_settings(&config).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dictionary.json"));
    }
}
