use std::path::{Path, PathBuf};
use todo_core::paths::TODO_DIR;

/// Resolve the project root that holds `.todo/config.yaml`.
///
/// Priority:
/// 1. `--root` flag / `TODO_ROOT` env var (passed in as `explicit`)
/// 2. Nearest ancestor of `cwd` containing `.todo/`
/// 3. Nearest ancestor of `cwd` containing `.git/`
/// 4. `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_upwards(&cwd, TODO_DIR)
        .or_else(|| find_upwards(&cwd, ".git"))
        .unwrap_or(cwd)
}

fn find_upwards(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}
