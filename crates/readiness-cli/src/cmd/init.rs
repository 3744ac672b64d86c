use anyhow::Context;
use readiness_core::{config::Config, io, paths, roadmap::RoadmapSnapshot};
use std::path::Path;

pub fn run(root: &Path, name: Option<&str>) -> anyhow::Result<()> {
    let project_name = match name {
        Some(n) => n.to_string(),
        None => root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string()),
    };

    println!("Initializing AI readiness planner in: {}", root.display());

    // 1. Create .readiness directory structure
    let dirs = [
        paths::READINESS_DIR,
        paths::STORAGE_DIR,
        paths::SUBMISSIONS_DIR,
    ];
    for dir in dirs {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    // 2. Write config.yaml if missing
    let config_path = paths::config_path(root);
    if !config_path.exists() {
        let cfg = Config::new(&project_name);
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    // 3. Write an empty roadmap snapshot if missing
    let roadmap_path = paths::roadmap_path(root);
    if !roadmap_path.exists() {
        RoadmapSnapshot::save(root, &[]).context("failed to write roadmap.yaml")?;
        println!("  created: {}", paths::ROADMAP_FILE);
    } else {
        println!("  exists:  {}", paths::ROADMAP_FILE);
    }

    println!("\nNext: `readiness catalog list` or `readiness assess sections`");
    Ok(())
}
