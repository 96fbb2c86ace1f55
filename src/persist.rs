use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::picks::Pick;

const CACHE_DIR: &str = "draft26_terminal";
const CACHE_FILE: &str = "picks.json";
const CACHE_VERSION: u32 = 1;

// Pick storage is the caller's job; the standings core never holds picks
// between calls. One file, keyed per season so a new season starts clean.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PicksFile {
    version: u32,
    seasons: HashMap<String, HashMap<String, Pick>>,
}

pub fn load_picks(season: u16) -> HashMap<String, Pick> {
    let Some(path) = cache_path() else {
        return HashMap::new();
    };
    let Some(file) = read_picks_file(&path) else {
        return HashMap::new();
    };
    if file.version != CACHE_VERSION {
        return HashMap::new();
    }
    file.seasons
        .get(&season.to_string())
        .cloned()
        .unwrap_or_default()
}

pub fn save_picks(season: u16, picks: &HashMap<String, Pick>) {
    let Some(path) = cache_path() else {
        return;
    };
    let Some(dir) = path.parent() else {
        return;
    };
    let _ = fs::create_dir_all(dir);

    let mut file = read_picks_file(&path).unwrap_or_else(|| PicksFile {
        version: CACHE_VERSION,
        seasons: HashMap::new(),
    });
    file.version = CACHE_VERSION;
    file.seasons.insert(season.to_string(), picks.clone());

    if let Ok(json) = serde_json::to_string(&file) {
        let tmp = path.with_extension("json.tmp");
        if fs::write(&tmp, json).is_ok() {
            let _ = fs::rename(&tmp, &path);
        }
    }
}

fn read_picks_file(path: &Path) -> Option<PicksFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str::<PicksFile>(&raw).ok()
}

fn cache_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    // Fallback to ~/.cache on linux-like systems.
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}
