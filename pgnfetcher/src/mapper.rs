use crate::models::Pgn;
use chesstore::models::{Game, User};
use std::collections::HashMap;

/// Maps one parsed game onto a `game` row.
///
/// Total over any header set: missing tags become empty strings. The winner
/// is resolved from the `Result` tag; anything other than `1-0`/`0-1`
/// (draws, unknown, malformed) leaves it empty.
pub fn game_from_pgn(pgn: &Pgn) -> Game {
    let whiteplayer = pgn.header("White").to_string();
    let blackplayer = pgn.header("Black").to_string();
    let winner = match pgn.header("Result") {
        "1-0" => whiteplayer.clone(),
        "0-1" => blackplayer.clone(),
        _ => String::new(),
    };

    Game {
        gameid: None,
        whiteplayer,
        blackplayer,
        winner,
        opening: pgn.header("Opening").to_string(),
        gamemoves: pgn.moves.clone(),
        result: pgn.header("Termination").to_string(),
    }
}

pub fn games_from_pgns(pgns: &[Pgn]) -> Vec<Game> {
    pgns.iter().map(game_from_pgn).collect()
}

/// Derives the white and black `user` rows for one game. A missing or
/// non-numeric Elo tag yields rating 0; the mapping never fails.
pub fn users_from_pgn(pgn: &Pgn) -> (User, User) {
    let white = User {
        username: pgn.header("White").to_string(),
        rating: parse_rating(pgn.header("WhiteElo")),
    };
    let black = User {
        username: pgn.header("Black").to_string(),
        rating: parse_rating(pgn.header("BlackElo")),
    };
    (white, black)
}

fn parse_rating(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

/// Deduplicates the users derived from a run's games before dispatch, so a
/// player who appears in thousands of games costs one insert call.
///
/// Identity is the username alone; the first-seen rating wins and later
/// ratings for the same username are dropped. Output order is arbitrary.
pub fn dedupe_users(pgns: &[Pgn]) -> Vec<User> {
    let mut by_name: HashMap<String, User> = HashMap::new();
    for pgn in pgns {
        let (white, black) = users_from_pgn(pgn);
        for user in [white, black] {
            by_name.entry(user.username.clone()).or_insert(user);
        }
    }
    by_name.into_values().collect()
}
