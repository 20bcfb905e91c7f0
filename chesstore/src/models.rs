use serde::{Deserialize, Serialize};

/// One row of the `user` collection. The remote store enforces uniqueness on
/// `username`; a rating of 0 means the rating was unknown at ingestion time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct User {
    pub username: String,
    pub rating: i32,
}

/// One row of the `game` collection. `gameid` is assigned by the store and is
/// absent before insertion. Rows are never updated in place.
///
/// Invariant: `winner` is empty (draw or unknown result) or equal to one of
/// `whiteplayer`/`blackplayer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gameid: Option<i64>,
    pub whiteplayer: String,
    pub blackplayer: String,
    pub winner: String,
    pub opening: String,
    pub gamemoves: String,
    pub result: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_insert_row_omits_gameid() {
        let game = Game {
            gameid: None,
            whiteplayer: "Alice".to_string(),
            blackplayer: "Bob".to_string(),
            winner: "Alice".to_string(),
            opening: "Ruy Lopez".to_string(),
            gamemoves: "1. e4 e5 ".to_string(),
            result: "Normal".to_string(),
        };
        let row = serde_json::to_value(&game).unwrap();
        assert!(row.get("gameid").is_none());
        assert_eq!(row["whiteplayer"], "Alice");
        assert_eq!(row["gamemoves"], "1. e4 e5 ");
    }

    #[test]
    fn game_read_row_carries_server_assigned_id() {
        let game: Game = serde_json::from_str(
            r#"{"gameid":7,"whiteplayer":"Alice","blackplayer":"Bob","winner":"",
                "opening":"","gamemoves":"1. d4 ","result":"Time forfeit"}"#,
        )
        .unwrap();
        assert_eq!(game.gameid, Some(7));
        assert_eq!(game.winner, "");
    }

    #[test]
    fn user_row_round_trips() {
        let user = User {
            username: "Bob".to_string(),
            rating: 1400,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(serde_json::from_str::<User>(&json).unwrap(), user);
    }
}
