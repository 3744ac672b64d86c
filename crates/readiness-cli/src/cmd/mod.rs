pub mod assess;
pub mod catalog;
pub mod config;
pub mod init;
pub mod page;
pub mod report;
pub mod roadmap;
pub mod ui;

use anyhow::Context;
use readiness_core::config::Config;
use std::path::Path;

/// Load the project config, pointing at `readiness init` when it is missing.
pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    Config::load(root).with_context(|| {
        format!(
            "no planner project at {} (run `readiness init`)",
            root.display()
        )
    })
}
