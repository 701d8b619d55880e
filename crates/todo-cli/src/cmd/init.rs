use anyhow::Context;
use std::path::Path;
use todo_core::{config::Config, paths};

pub fn run(root: &Path) -> anyhow::Result<()> {
    let written = Config::init(root).context("failed to write config")?;
    let path = paths::config_path(root);
    if written {
        println!("Initialized {}", path.display());
    } else {
        println!("Already initialized: {}", path.display());
    }
    Ok(())
}
