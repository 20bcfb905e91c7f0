use crate::errors::{Result, StoreError};
use url::Url;

/// Connection settings for the remote store, resolved once at startup and
/// handed to [`crate::PostgrestStore::new`]. Nothing in this crate reads the
/// environment after construction.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl StoreConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Config(format!("invalid store URL '{base_url}': {e}")))?;
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(StoreError::Config("api key is empty".to_string()));
        }
        Ok(Self { base_url, api_key })
    }

    /// Reads `DBURL` and `DBAPIKEY`, loading a `.env` file first when one is
    /// present in the working directory.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("DBURL")
            .map_err(|_| StoreError::Config("DBURL is not set".to_string()))?;
        let api_key = std::env::var("DBAPIKEY")
            .map_err(|_| StoreError::Config("DBAPIKEY is not set".to_string()))?;
        Self::new(&base_url, api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_url() {
        let err = StoreConfig::new("not a url", "key").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn rejects_empty_api_key() {
        let err = StoreConfig::new("https://db.example.com", "").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
