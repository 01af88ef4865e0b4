use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::board_io;

/// Infer a board name from a directory name: hyphens become spaces, words title-cased.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + chars.as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs, board_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match board_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            std::fs::canonicalize(dir)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?
        }
        None => std::env::current_dir()?,
    };

    // Check for an enclosing board and warn
    if let Some(parent) = root.parent()
        && let Ok(parent_root) = board_io::discover_board(parent)
    {
        eprintln!(
            "Note: parent board found at {}/",
            parent_root.join(board_io::BOARD_DIR).display()
        );
    }

    let name = args.name.unwrap_or_else(|| name_for(&root));
    let board = board_io::init_board(&root, &name, args.force)?;

    println!("Initialized board: {}", board.config.board.name);
    Ok(())
}

fn name_for(root: &Path) -> String {
    root.file_name()
        .and_then(|n| n.to_str())
        .map(infer_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("weekend-chores"), "Weekend Chores");
        assert_eq!(infer_name("home"), "Home");
        assert_eq!(infer_name("shop_list"), "Shop List");
        assert_eq!(infer_name("--"), "");
    }

    #[test]
    fn test_name_for_root_path() {
        assert_eq!(name_for(Path::new("/tmp/grocery-run")), "Grocery Run");
        assert_eq!(name_for(Path::new("/")), "Untitled");
    }
}
