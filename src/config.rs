//! 설정 파일 및 작업 공간 경로
//!
//! 백업 목록 파일과 스테이징 디렉토리는 모두 하나의 작업 공간 루트를 기준으로
//! 해석된다. 설정은 TOML 파일로 저장된다.

use crate::utils::error::{BackupError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 설정 파일 경로를 바꾸는 환경 변수
pub const SETTINGS_ENV: &str = "BACKUP_TUI_SETTINGS_FILE";

pub const DEFAULT_LIST_FILE: &str = "backup_list.txt";
pub const DEFAULT_STAGING_DIR: &str = "tmp";

/// 디스크에 저장되는 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: u32,
    /// 작업 공간 루트 (없으면 현재 작업 디렉토리)
    pub workspace_root: Option<PathBuf>,
    /// 백업 목록 파일 이름
    pub list_file: String,
    /// 스테이징 디렉토리 이름
    pub staging_dir: String,
    /// 테마 이름
    pub theme: String,
    /// 피커에서 숨김 파일 표시 여부
    pub show_hidden: bool,
    /// 마지막으로 사용한 백업 대상 디렉토리
    pub last_destination: Option<PathBuf>,
}

impl Settings {
    pub const VERSION: u32 = 1;

    pub fn encode(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// 버전이 다르거나 값이 비어 있으면 None
    pub fn decode(data: &str) -> Option<Self> {
        let parsed: Settings = toml::from_str(data).ok()?;
        if parsed.version != Self::VERSION {
            return None;
        }
        if parsed.list_file.trim().is_empty() || parsed.staging_dir.trim().is_empty() {
            return None;
        }
        Some(parsed)
    }

    /// 설정 파일을 읽는다. 파일이 없거나 잘못되었으면 기본값.
    pub fn load(path: &Path) -> Self {
        let Ok(data) = fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::decode(&data) {
            Some(settings) => settings,
            None => {
                tracing::warn!(path = %path.display(), "ignoring unreadable settings file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = self
            .encode()
            .map_err(|e| BackupError::Config(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    /// 설정 파일 위치: 환경 변수 > ~/.backup-tui/settings.toml
    pub fn store_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(SETTINGS_ENV) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::home_dir().map(|home| home.join(".backup-tui").join("settings.toml"))
    }

    /// 설정으로부터 작업 공간 생성
    pub fn workspace(&self) -> Workspace {
        let root = self
            .workspace_root
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Workspace::with_names(root, &self.list_file, &self.staging_dir)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: Self::VERSION,
            workspace_root: None,
            list_file: DEFAULT_LIST_FILE.to_string(),
            staging_dir: DEFAULT_STAGING_DIR.to_string(),
            theme: "dark".to_string(),
            show_hidden: false,
            last_destination: None,
        }
    }
}

/// 작업 공간: 목록 파일과 스테이징 디렉토리의 기준 루트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    pub list_file: PathBuf,
    pub staging_dir: PathBuf,
}

impl Workspace {
    pub fn with_names(root: PathBuf, list_file: &str, staging_dir: &str) -> Self {
        Self {
            list_file: root.join(list_file),
            staging_dir: root.join(staging_dir),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_workspace_names() {
        let ws = Settings {
            workspace_root: Some(PathBuf::from("/work")),
            ..Settings::default()
        }
        .workspace();
        assert_eq!(ws.list_file, PathBuf::from("/work/backup_list.txt"));
        assert_eq!(ws.staging_dir, PathBuf::from("/work/tmp"));
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings {
            workspace_root: Some(PathBuf::from("/data/backups")),
            theme: "light".to_string(),
            show_hidden: true,
            last_destination: Some(PathBuf::from("/mnt/usb")),
            ..Settings::default()
        };
        let encoded = settings.encode().unwrap();
        assert_eq!(Settings::decode(&encoded), Some(settings));
    }

    #[test]
    fn test_decode_rejects_other_version_and_garbage() {
        let mut settings = Settings::default();
        settings.version = 99;
        let encoded = settings.encode().unwrap();
        assert!(Settings::decode(&encoded).is_none());
        assert!(Settings::decode("not = [valid").is_none());
    }

    #[test]
    fn test_decode_fills_missing_fields_with_defaults() {
        let parsed = Settings::decode("version = 1\ntheme = \"light\"\n").unwrap();
        assert_eq!(parsed.theme, "light");
        assert_eq!(parsed.list_file, DEFAULT_LIST_FILE);
        assert_eq!(parsed.staging_dir, DEFAULT_STAGING_DIR);
    }

    #[test]
    fn test_load_missing_file_uses_defaults_and_save_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("settings.toml");
        assert_eq!(Settings::load(&path), Settings::default());

        let settings = Settings {
            theme: "light".to_string(),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_workspace_from_settings_uses_root() {
        let settings = Settings {
            workspace_root: Some(PathBuf::from("/srv/ws")),
            list_file: "targets.txt".to_string(),
            staging_dir: ".staging".to_string(),
            ..Settings::default()
        };
        let ws = settings.workspace();
        assert_eq!(ws.list_file, PathBuf::from("/srv/ws/targets.txt"));
        assert_eq!(ws.staging_dir, PathBuf::from("/srv/ws/.staging"));
    }
}
