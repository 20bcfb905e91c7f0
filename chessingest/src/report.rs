use serde::Serialize;
use std::path::PathBuf;

/// A file the run could not parse. The rest of the run proceeds without it.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// A game batch whose insert call failed. The player pair of every game in
/// the batch is kept so the batch can be replayed.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub players: Vec<(String, String)>,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserFailure {
    pub username: String,
    pub error: String,
}

/// Aggregated outcome of one ingestion run. Persistence failures never abort
/// a run; they end up here instead.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files_ingested: usize,
    pub file_failures: Vec<FileFailure>,
    pub games_inserted: usize,
    pub users_inserted: usize,
    pub failed_game_batches: Vec<BatchFailure>,
    pub failed_users: Vec<UserFailure>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.file_failures.is_empty()
            && self.failed_game_batches.is_empty()
            && self.failed_users.is_empty()
    }

    /// Number of games whose insert never succeeded.
    pub fn games_failed(&self) -> usize {
        self.failed_game_batches.iter().map(|b| b.players.len()).sum()
    }

    pub fn users_failed(&self) -> usize {
        self.failed_users.len()
    }
}
