use crate::config::StoreConfig;
use crate::errors::{Result, StoreError};
use crate::models::{Game, User};
use crate::store::GameStore;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

const USER_RESOURCE: &str = "rest/v1/user";
const GAME_RESOURCE: &str = "rest/v1/game";

/// PostgREST-backed [`GameStore`]. Authentication headers and resource URLs
/// are resolved once at construction; the inner `reqwest::Client` is cheap to
/// clone and safe to share across worker tasks.
pub struct PostgrestStore {
    http: reqwest::Client,
    user_url: Url,
    game_url: Url,
}

/// Equality predicate in PostgREST filter syntax (`username=eq.Alice`).
fn eq(value: &str) -> String {
    format!("eq.{value}")
}

impl PostgrestStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.api_key);
        let apikey = HeaderValue::from_str(&config.api_key)
            .map_err(|e| StoreError::Config(format!("api key is not a valid header: {e}")))?;
        let bearer = HeaderValue::from_str(&bearer)
            .map_err(|e| StoreError::Config(format!("api key is not a valid header: {e}")))?;
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let join = |resource: &'static str| {
            config
                .base_url
                .join(resource)
                .map_err(|e| StoreError::Config(format!("cannot build {resource} URL: {e}")))
        };

        Ok(Self {
            http,
            user_url: join(USER_RESOURCE)?,
            game_url: join(GAME_RESOURCE)?,
        })
    }

    async fn expect_success(
        response: reqwest::Response,
        resource: &'static str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Remote {
            status: status.as_u16(),
            resource,
            body,
        })
    }
}

#[async_trait]
impl GameStore for PostgrestStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        self.insert_users(std::slice::from_ref(user)).await
    }

    async fn insert_users(&self, users: &[User]) -> Result<()> {
        log::debug!("inserting {} user row(s)", users.len());
        let response = self
            .http
            .post(self.user_url.clone())
            .json(users)
            .send()
            .await?;
        Self::expect_success(response, USER_RESOURCE).await?;
        Ok(())
    }

    async fn get_user(&self, username: &str) -> Result<User> {
        let response = self
            .http
            .get(self.user_url.clone())
            .query(&[("username", eq(username))])
            .send()
            .await?;
        let rows: Vec<User> = Self::expect_success(response, USER_RESOURCE)
            .await?
            .json()
            .await?;
        rows.into_iter().next().ok_or_else(|| StoreError::NotFound {
            entity: "user",
            key: username.to_string(),
        })
    }

    async fn delete_user(&self, username: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.user_url.clone())
            .query(&[("username", eq(username))])
            .send()
            .await?;
        Self::expect_success(response, USER_RESOURCE).await?;
        Ok(())
    }

    async fn insert_game(&self, game: &Game) -> Result<()> {
        self.insert_games(std::slice::from_ref(game)).await
    }

    async fn insert_games(&self, games: &[Game]) -> Result<()> {
        log::debug!("inserting a batch of {} game row(s)", games.len());
        let response = self
            .http
            .post(self.game_url.clone())
            .json(games)
            .send()
            .await?;
        Self::expect_success(response, GAME_RESOURCE).await?;
        Ok(())
    }

    async fn get_game(&self, gameid: i64) -> Result<Game> {
        let response = self
            .http
            .get(self.game_url.clone())
            .query(&[("gameid", eq(&gameid.to_string()))])
            .send()
            .await?;
        let rows: Vec<Game> = Self::expect_success(response, GAME_RESOURCE)
            .await?
            .json()
            .await?;
        rows.into_iter().next().ok_or_else(|| StoreError::NotFound {
            entity: "game",
            key: gameid.to_string(),
        })
    }

    async fn get_games_by_players(
        &self,
        whiteplayer: &str,
        blackplayer: &str,
    ) -> Result<Vec<Game>> {
        let response = self
            .http
            .get(self.game_url.clone())
            .query(&[
                ("whiteplayer", eq(whiteplayer)),
                ("blackplayer", eq(blackplayer)),
            ])
            .send()
            .await?;
        let rows: Vec<Game> = Self::expect_success(response, GAME_RESOURCE)
            .await?
            .json()
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound {
                entity: "game",
                key: format!("{whiteplayer} vs {blackplayer}"),
            });
        }
        Ok(rows)
    }

    async fn delete_game(&self, gameid: i64) -> Result<()> {
        let response = self
            .http
            .delete(self.game_url.clone())
            .query(&[("gameid", eq(&gameid.to_string()))])
            .send()
            .await?;
        Self::expect_success(response, GAME_RESOURCE).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_builds_postgrest_predicate() {
        assert_eq!(eq("Alice"), "eq.Alice");
        assert_eq!(eq("42"), "eq.42");
    }

    #[test]
    fn resource_urls_join_onto_base() {
        let config = StoreConfig::new("https://db.example.com/", "secret").unwrap();
        let store = PostgrestStore::new(&config).unwrap();
        assert_eq!(store.user_url.as_str(), "https://db.example.com/rest/v1/user");
        assert_eq!(store.game_url.as_str(), "https://db.example.com/rest/v1/game");
    }
}
