use std::fs;
use std::path::{Path, PathBuf};

use crate::model::BoardConfig;

/// Name of the directory that marks a board root
pub const BOARD_DIR: &str = ".todoboard";

/// Error type for locating and loading a board
#[derive(Debug, thiserror::Error)]
pub enum BoardIoError {
    #[error("not a todo board: no .todoboard/ directory found (run `tb init`)")]
    NotABoard,
    #[error("cannot resolve board directory {path}: {source}")]
    BadBoardDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("a board already exists at {0} (use --force to reinitialize)")]
    AlreadyExists(PathBuf),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("could not serialize config.toml: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A located board: its root, its `.todoboard/` directory, and its config
#[derive(Debug, Clone)]
pub struct Board {
    pub root: PathBuf,
    pub board_dir: PathBuf,
    pub config: BoardConfig,
}

/// Walk up from `start` looking for a `.todoboard/config.toml`
pub fn discover_board(start: &Path) -> Result<PathBuf, BoardIoError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(BOARD_DIR).join("config.toml").is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(BoardIoError::NotABoard);
        }
    }
}

/// Find and load the board enclosing `dir`, or the working directory when `None`
pub fn locate_board(dir: Option<&Path>) -> Result<Board, BoardIoError> {
    let start = match dir {
        Some(dir) => fs::canonicalize(dir).map_err(|source| BoardIoError::BadBoardDir {
            path: dir.to_path_buf(),
            source,
        })?,
        None => std::env::current_dir()?,
    };
    let root = discover_board(&start)?;
    load_board(&root)
}

pub fn load_board(root: &Path) -> Result<Board, BoardIoError> {
    let board_dir = root.join(BOARD_DIR);
    if !board_dir.is_dir() {
        return Err(BoardIoError::NotABoard);
    }
    let config_path = board_dir.join("config.toml");
    let text = fs::read_to_string(&config_path).map_err(|source| BoardIoError::Read {
        path: config_path.clone(),
        source,
    })?;
    let config: BoardConfig = toml::from_str(&text)?;
    Ok(Board {
        root: root.to_path_buf(),
        board_dir,
        config,
    })
}

/// Create `.todoboard/config.toml` under `root` and return the loaded board.
///
/// The collection file is left to the store, which treats a missing file
/// as an empty collection.
pub fn init_board(root: &Path, name: &str, force: bool) -> Result<Board, BoardIoError> {
    let board_dir = root.join(BOARD_DIR);
    if board_dir.join("config.toml").exists() && !force {
        return Err(BoardIoError::AlreadyExists(root.to_path_buf()));
    }
    fs::create_dir_all(&board_dir)?;

    let mut config = BoardConfig::default();
    config.board.name = name.to_string();
    let text = toml::to_string_pretty(&config)?;
    crate::io::atomic::atomic_write(&board_dir.join("config.toml"), text.as_bytes())?;

    tracing::info!(root = %root.display(), name, "initialized board");
    load_board(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_then_discover_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        init_board(tmp.path(), "home", false).unwrap();
        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();
        assert_eq!(discover_board(&sub).unwrap(), tmp.path());
    }

    #[test]
    fn discover_fails_outside_a_board() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_board(tmp.path()),
            Err(BoardIoError::NotABoard)
        ));
    }

    #[test]
    fn locate_from_explicit_directory() {
        let tmp = TempDir::new().unwrap();
        init_board(tmp.path(), "home", false).unwrap();
        let sub = tmp.path().join("notes");
        fs::create_dir_all(&sub).unwrap();
        let board = locate_board(Some(&sub)).unwrap();
        assert_eq!(board.config.board.name, "home");

        assert!(matches!(
            locate_board(Some(&tmp.path().join("missing"))),
            Err(BoardIoError::BadBoardDir { .. })
        ));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        init_board(tmp.path(), "home", false).unwrap();
        assert!(matches!(
            init_board(tmp.path(), "again", false),
            Err(BoardIoError::AlreadyExists(_))
        ));
        let board = init_board(tmp.path(), "again", true).unwrap();
        assert_eq!(board.config.board.name, "again");
    }

    #[test]
    fn load_reads_hand_written_config() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(BOARD_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.toml"),
            "[board]\nname = \"errands\"\n\n[store]\ncollection = \"errands\"\n",
        )
        .unwrap();
        let board = load_board(tmp.path()).unwrap();
        assert_eq!(board.config.board.name, "errands");
        assert_eq!(board.config.store.collection, "errands");
        assert_eq!(board.board_dir, dir);
    }

    #[test]
    fn bad_config_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(BOARD_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "[store]\nlock_timeout_ms = \"soon\"\n").unwrap();
        assert!(matches!(
            load_board(tmp.path()),
            Err(BoardIoError::ConfigParse(_))
        ));
    }
}
