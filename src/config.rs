use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

pub const CFG_FILE_NAME: &str = "postdex.toml";

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub output_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            posts_dir: PathBuf::from("posts"),
            output_file: PathBuf::from("public/posts/index.json"),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct IndexOptions {
    pub required_fields: Vec<String>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub page_size: u32,
}

impl Default for IndexOptions {
    fn default() -> Self {
        IndexOptions {
            required_fields: vec!["title".to_string(), "date".to_string()],
            sort_by: SortBy::Date,
            sort_order: SortOrder::Descending,
            page_size: 12,
        }
    }
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Date,
    Title,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub index: IndexOptions,
    pub log: Option<Log>,
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => {
            return Err(io::Error::new(
                e.kind(),
                format!("Error opening configuration file {}: {}", cfg_path.display(), e),
            ))
        }
    };

    let cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("Error parsing configuration file: {}", e),
            ))
        }
    };

    Ok(cfg)
}

/// Looks for postdex.toml next to the executable, then in the working
/// directory, then in the user configuration directory.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let candidate = exe_dir.join(CFG_FILE_NAME);
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        let candidate = cur_dir.join(CFG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    if let Some(cfg_dir) = dirs::config_dir() {
        let candidate = cfg_dir.join(CFG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    None
}

/// Explicit path first, then discovery, then compiled-in defaults. A
/// missing file is only an error when it was explicitly named.
pub fn load_config(cfg_path: Option<PathBuf>) -> io::Result<Config> {
    match cfg_path.or_else(find_config) {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}
