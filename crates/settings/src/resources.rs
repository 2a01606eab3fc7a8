use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MENU_CONFIG_FILE: &str = "menu_config.json";
pub const LOCALIZATION_FILE: &str = "localization.json";
pub const COLOR_SCHEMES_FILE: &str = "color_schemes.json";

/// Bundled application assets are mandatory; any failure here aborts startup.
/// 內建資源為必要檔案，載入失敗即終止啟動。
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read resource {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves files under the bundled `assets/config` directory.
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    dir: PathBuf,
}

impl ResourceLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Prefers the directory next to the executable, then the working directory.
    /// （優先使用執行檔旁的資源目錄，其次為工作目錄。）
    pub fn locate() -> Self {
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("assets").join("config")));
        match beside_exe {
            Some(dir) if dir.is_dir() => Self::new(dir),
            _ => Self::new(PathBuf::from("assets").join("config")),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn read(&self, file: &str) -> Result<String, ResourceError> {
        let path = self.path_for(file);
        if !path.is_file() {
            return Err(ResourceError::NotFound(path));
        }
        fs::read_to_string(&path).map_err(|source| ResourceError::Read { path, source })
    }
}
