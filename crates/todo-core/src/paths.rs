use std::path::{Path, PathBuf};

pub const TODO_DIR: &str = ".todo";
pub const CONFIG_FILE: &str = ".todo/config.yaml";

pub fn todo_dir(root: &Path) -> PathBuf {
    root.join(TODO_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
