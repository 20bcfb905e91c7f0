use crate::error::{PgnError, Result};
use crate::models::Pgn;
use crate::visitor::PgnVisitor;
use pgn_reader::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Parses every game in one PGN file, preserving file order.
///
/// Opening the file is the only fatal failure. Individual malformed games are
/// handled best-effort by the underlying scanner; whatever it cannot make
/// sense of simply yields fewer records.
pub fn parse_pgn_file(path: &Path) -> Result<Vec<Pgn>> {
    let file = File::open(path).map_err(|source| PgnError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = Reader::new(BufReader::new(file));
    let mut visitor = PgnVisitor::new();
    let mut games = Vec::new();

    loop {
        match reader.read_game(&mut visitor) {
            Ok(Some(pgn)) => games.push(pgn),
            Ok(None) => break,
            Err(source) => {
                return Err(PgnError::Scan {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    log::debug!("parsed {} game(s) from {}", games.len(), path.display());
    Ok(games)
}

/// Lists the files of a PGN directory, non-recursively.
///
/// Entries are sorted by name: `read_dir` order is platform-dependent and the
/// run's file order feeds batch numbering and first-seen user deduplication.
pub fn discover_pgn_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| PgnError::DirAccess {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PgnError::DirAccess {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_GAMES: &str = "\
[Event \"Round A\"]
[White \"Alice\"]
[Black \"Bob\"]
[Result \"1-0\"]

1. e4 e5 1-0

[Event \"Round B\"]
[White \"Carol\"]
[Black \"Dave\"]
[Result \"0-1\"]

1. d4 d5 0-1
";

    fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_games_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "games.pgn", TWO_GAMES);

        let games = parse_pgn_file(&path).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].header("White"), "Alice");
        assert_eq!(games[1].header("White"), "Carol");
        assert_eq!(games[1].moves, "1. d4 d5 ");
    }

    #[test]
    fn empty_file_yields_no_games() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "empty.pgn", "");
        assert!(parse_pgn_file(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_a_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_pgn_file(&dir.path().join("nope.pgn")).unwrap_err();
        assert!(matches!(err, PgnError::FileAccess { .. }));
    }

    #[test]
    fn discovery_is_sorted_and_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "b.pgn", "");
        write_fixture(dir.path(), "a.pgn", "");
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write_fixture(&dir.path().join("nested"), "c.pgn", "");

        let paths = discover_pgn_files(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.pgn", "b.pgn"]);
    }

    #[test]
    fn missing_directory_is_a_dir_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_pgn_files(&dir.path().join("nowhere")).unwrap_err();
        assert!(matches!(err, PgnError::DirAccess { .. }));
    }
}
