use crate::error::{ReadinessError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const READINESS_DIR: &str = ".readiness";
pub const STORAGE_DIR: &str = ".readiness/storage";
pub const SUBMISSIONS_DIR: &str = ".readiness/submissions";

pub const CONFIG_FILE: &str = ".readiness/config.yaml";
pub const ROADMAP_FILE: &str = ".readiness/roadmap.yaml";
pub const ROADMAP_BACKUP_FILE: &str = ".readiness/roadmap.yaml.bak";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn readiness_dir(root: &Path) -> PathBuf {
    root.join(READINESS_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn roadmap_path(root: &Path) -> PathBuf {
    root.join(ROADMAP_FILE)
}

pub fn roadmap_backup_path(root: &Path) -> PathBuf {
    root.join(ROADMAP_BACKUP_FILE)
}

pub fn storage_dir(root: &Path) -> PathBuf {
    root.join(STORAGE_DIR)
}

pub fn storage_entry(root: &Path, key: &str) -> PathBuf {
    storage_dir(root).join(format!("{key}.json"))
}

pub fn submissions_dir(root: &Path) -> PathBuf {
    root.join(SUBMISSIONS_DIR)
}

pub fn submission_path(root: &Path, id: &str) -> PathBuf {
    submissions_dir(root).join(format!("{id}.yaml"))
}

// ---------------------------------------------------------------------------
// Id validation
// ---------------------------------------------------------------------------

static ID_RE: OnceLock<Regex> = OnceLock::new();

fn id_re() -> &'static Regex {
    ID_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Catalog ids, storage keys, and roadmap ids share one shape.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 64 || !id_re().is_match(id) {
        return Err(ReadinessError::InvalidId(id.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids() {
        for id in ["customer-service-chatbot", "a", "uc-01", "assessment-draft"] {
            validate_id(id).unwrap_or_else(|_| panic!("expected valid: {id}"));
        }
    }

    #[test]
    fn invalid_ids() {
        for id in ["", "-lead", "trail-", "has spaces", "UPPER", "a_b", "../etc"] {
            assert!(validate_id(id).is_err(), "expected invalid: {id}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.readiness/config.yaml")
        );
        assert_eq!(
            storage_entry(root, "recent-searches"),
            PathBuf::from("/tmp/proj/.readiness/storage/recent-searches.json")
        );
        assert_eq!(
            submission_path(root, "abc"),
            PathBuf::from("/tmp/proj/.readiness/submissions/abc.yaml")
        );
    }
}
