use once_cell::sync::Lazy;
use std::env;
use std::path::{Component, Path, PathBuf};

const DATA_DIR: &str = "data";
const PUBLIC_DIR: &str = "public";
const PAGES_DIR: &str = "pages";
const LOG_DIR: &str = "logs";
pub const CNAME_FILE: &str = "CNAME";

static CWD: Lazy<PathBuf> = Lazy::new(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

pub fn get_cwd() -> PathBuf {
    CWD.clone()
}

pub fn get_log_dir(root: &Path) -> PathBuf {
    root.join(LOG_DIR)
}

pub fn get_data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

pub fn get_public_dir(root: &Path) -> PathBuf {
    root.join(PUBLIC_DIR)
}

pub fn get_pages_dir(root: &Path) -> PathBuf {
    root.join(PAGES_DIR)
}

pub fn get_cname_path(root: &Path) -> PathBuf {
    root.join(CNAME_FILE)
}

/// Joins a URL-relative path onto `base`, refusing anything that could leave
/// `base` (`..`, absolute roots, drive prefixes). Returns `None` for an empty
/// relative path.
pub fn join_confined(base: &Path, relative: &str) -> Option<PathBuf> {
    let mut joined = base.to_path_buf();
    let mut pushed = false;
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => {
                joined.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    pushed.then_some(joined)
}
