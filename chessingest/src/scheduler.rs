use crate::report::{BatchFailure, FileFailure, RunReport, UserFailure};
use chesstore::models::{Game, User};
use chesstore::store::GameStore;
use pgnfetcher::models::Pgn;
use pgnfetcher::{chunk, discover_pgn_files, parse_pgn_file};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Tuning for one ingestion run. Both knobs are independent of input size:
/// a ten-thousand-game file with a batch size of ten still only keeps
/// `workers` insert calls in flight.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Games submitted per insert call.
    pub batch_size: usize,
    /// Size of the insert worker pool.
    pub workers: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            workers: 8,
        }
    }
}

enum WorkItem {
    GameBatch(Vec<Game>),
    User(User),
}

enum WorkOutcome {
    GamesInserted(usize),
    GameBatchFailed {
        players: Vec<(String, String)>,
        error: String,
    },
    UserInserted,
    UserFailed {
        username: String,
        error: String,
    },
}

/// Coordinates one ingestion run: parse all files, derive and deduplicate
/// the records, then drain a bounded work queue with a fixed-size pool of
/// insert workers. Every worker outcome flows back over a result channel and
/// is folded into the [`RunReport`].
pub struct Scheduler {
    store: Arc<dyn GameStore>,
    options: IngestOptions,
}

impl Scheduler {
    pub fn new(store: Arc<dyn GameStore>, options: IngestOptions) -> Self {
        assert!(options.batch_size >= 1, "batch size must be at least 1");
        assert!(options.workers >= 1, "worker pool must hold at least one worker");
        Self { store, options }
    }

    /// Runs ingestion over every file of `dir`.
    ///
    /// Only an unreadable directory is fatal. A file that fails to parse is
    /// recorded and skipped; a failed insert is recorded with its entity keys
    /// and the run carries on.
    pub async fn run(&self, dir: &Path) -> anyhow::Result<RunReport> {
        let paths = discover_pgn_files(dir)?;
        info!(files = paths.len(), dir = %dir.display(), "starting ingestion run");

        let mut report = RunReport::default();
        let parsed = parse_files(paths).await;

        // Flatten in file order: batch numbering and first-seen user dedup
        // both depend on it.
        let mut all_pgns: Vec<Pgn> = Vec::new();
        let mut work_items: Vec<WorkItem> = Vec::new();
        for (path, outcome) in parsed {
            match outcome {
                Ok(pgns) => {
                    report.files_ingested += 1;
                    for batch in chunk(&pgnfetcher::mapper::games_from_pgns(&pgns), self.options.batch_size) {
                        work_items.push(WorkItem::GameBatch(batch));
                    }
                    all_pgns.extend(pgns);
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping file");
                    report.file_failures.push(FileFailure {
                        path,
                        error: error.to_string(),
                    });
                }
            }
        }

        for user in pgnfetcher::mapper::dedupe_users(&all_pgns) {
            work_items.push(WorkItem::User(user));
        }
        debug!(items = work_items.len(), "work queue built");

        self.dispatch(work_items, &mut report).await;

        info!(
            files = report.files_ingested,
            games = report.games_inserted,
            users = report.users_inserted,
            games_failed = report.games_failed(),
            users_failed = report.users_failed(),
            "ingestion run finished"
        );
        Ok(report)
    }

    /// Fans the work queue out to the pool and folds the results back in.
    async fn dispatch(&self, work_items: Vec<WorkItem>, report: &mut RunReport) {
        let (work_tx, work_rx) = mpsc::channel::<WorkItem>(self.options.workers * 2);
        let (result_tx, mut result_rx) = mpsc::channel::<WorkOutcome>(64);
        let work_rx = Arc::new(Mutex::new(work_rx));

        let mut workers = JoinSet::new();
        for _ in 0..self.options.workers {
            let store = Arc::clone(&self.store);
            let queue = Arc::clone(&work_rx);
            let results = result_tx.clone();
            workers.spawn(insert_worker(store, queue, results));
        }
        drop(result_tx);

        let feeder = tokio::spawn(async move {
            for item in work_items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
        });

        while let Some(outcome) = result_rx.recv().await {
            match outcome {
                WorkOutcome::GamesInserted(count) => report.games_inserted += count,
                WorkOutcome::GameBatchFailed { players, error } => {
                    warn!(games = players.len(), %error, "game batch insert failed");
                    report.failed_game_batches.push(BatchFailure { players, error });
                }
                WorkOutcome::UserInserted => report.users_inserted += 1,
                WorkOutcome::UserFailed { username, error } => {
                    warn!(%username, %error, "user insert failed");
                    report.failed_users.push(UserFailure { username, error });
                }
            }
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(error) = joined {
                warn!(%error, "insert worker panicked");
            }
        }
        if let Err(error) = feeder.await {
            warn!(%error, "work feeder panicked");
        }
    }
}

/// Parses every file on the blocking pool, keeping results in input order.
async fn parse_files(
    paths: Vec<PathBuf>,
) -> Vec<(PathBuf, pgnfetcher::Result<Vec<Pgn>>)> {
    let mut tasks = JoinSet::new();
    for (index, path) in paths.into_iter().enumerate() {
        tasks.spawn_blocking(move || {
            let outcome = parse_pgn_file(&path);
            (index, path, outcome)
        });
    }

    let mut parsed: Vec<Option<(PathBuf, pgnfetcher::Result<Vec<Pgn>>)>> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, path, outcome)) => {
                if parsed.len() <= index {
                    parsed.resize_with(index + 1, || None);
                }
                parsed[index] = Some((path, outcome));
            }
            Err(error) => warn!(%error, "parse task panicked"),
        }
    }
    parsed.into_iter().flatten().collect()
}

/// One pool worker: pulls items off the shared queue until it closes, makes
/// the insert call, and reports the outcome. Never aborts the run.
async fn insert_worker(
    store: Arc<dyn GameStore>,
    queue: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
    results: mpsc::Sender<WorkOutcome>,
) {
    loop {
        let item = { queue.lock().await.recv().await };
        let Some(item) = item else { break };

        let outcome = match item {
            WorkItem::GameBatch(games) => match store.insert_games(&games).await {
                Ok(()) => WorkOutcome::GamesInserted(games.len()),
                Err(error) => WorkOutcome::GameBatchFailed {
                    players: games
                        .iter()
                        .map(|g| (g.whiteplayer.clone(), g.blackplayer.clone()))
                        .collect(),
                    error: error.to_string(),
                },
            },
            WorkItem::User(user) => match store.insert_user(&user).await {
                Ok(()) => WorkOutcome::UserInserted,
                Err(error) => WorkOutcome::UserFailed {
                    username: user.username,
                    error: error.to_string(),
                },
            },
        };

        if results.send(outcome).await.is_err() {
            break;
        }
    }
}
