use std::collections::HashMap;

/// One raw game as parsed from a PGN file: its tag pairs plus the mainline
/// movetext in move-numbered algebraic form (`"1. e4 e5 2. Nf3 "`).
///
/// Consumed by the mapper and discarded; never persisted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pgn {
    pub headers: HashMap<String, String>,
    pub moves: String,
}

impl Pgn {
    /// Header lookup that treats a missing tag as the empty string, so the
    /// mapping stage is total over any header set.
    pub fn header(&self, key: &str) -> &str {
        self.headers.get(key).map(String::as_str).unwrap_or("")
    }
}
