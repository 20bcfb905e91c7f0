use crate::errors::Result;
use crate::models::{Game, User};
use async_trait::async_trait;

/// CRUD capability over the remote store, one method set per entity type.
///
/// The contract has no update operation: rows are inserted, read back, and
/// deleted, never modified in place. Deleting a key with no matching row is
/// not an error. Implementations must be safe for concurrent use by distinct
/// calls; workers share one instance behind an `Arc`.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn insert_users(&self, users: &[User]) -> Result<()>;
    async fn get_user(&self, username: &str) -> Result<User>;
    async fn delete_user(&self, username: &str) -> Result<()>;

    async fn insert_game(&self, game: &Game) -> Result<()>;
    /// Submits a batch of games as one ordered insert call.
    async fn insert_games(&self, games: &[Game]) -> Result<()>;
    async fn get_game(&self, gameid: i64) -> Result<Game>;
    async fn get_games_by_players(&self, whiteplayer: &str, blackplayer: &str)
        -> Result<Vec<Game>>;
    async fn delete_game(&self, gameid: i64) -> Result<()>;
}
