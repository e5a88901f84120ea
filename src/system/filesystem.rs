use crate::models::file_entry::{FileEntry, FileType};
use crate::utils::error::{BackupError, Result};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 파일 시스템 모듈
pub struct FileSystem;

/// 디렉토리 복사 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryCopy {
    pub files: usize,
    pub bytes: u64,
    /// 복사하지 않은 특수 파일 (FIFO, 소켓, 장치 파일)
    pub special: Vec<PathBuf>,
}

impl FileSystem {
    /// 새 파일 시스템 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 읽기
    ///
    /// 주어진 경로의 디렉토리를 읽어서 파일 엔트리 리스트를 반환합니다.
    /// 읽을 수 없는 엔트리는 건너뜁니다.
    pub fn read_directory(&self, path: &Path) -> Result<Vec<FileEntry>> {
        // 1. 경로 존재 확인
        if !path.exists() {
            return Err(BackupError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        // 2. 디렉토리 여부 확인
        if !path.is_dir() {
            return Err(BackupError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        // 3. 디렉토리 읽기
        let read_dir = fs::read_dir(path).map_err(|e| map_io_error(e, path))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();

            // 링크 자체 메타데이터
            let Ok(link_metadata) = fs::symlink_metadata(&entry_path) else {
                continue;
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = if link_metadata.is_symlink() {
                FileType::Symlink
            } else if link_metadata.is_dir() {
                FileType::Directory
            } else {
                FileType::File
            };

            // 표시용 메타데이터 (symlink는 대상 메타데이터 우선)
            let target_metadata = fs::metadata(&entry_path).ok();
            let display_metadata = target_metadata.as_ref().unwrap_or(&link_metadata);

            let size = if display_metadata.is_dir() {
                0
            } else {
                display_metadata.len()
            };

            let mut file_entry = FileEntry::new(name, entry_path, file_type, size);
            file_entry.target_is_dir = display_metadata.is_dir();
            entries.push(file_entry);
        }

        Ok(entries)
    }

    /// 파일 복사 (수정 시간 유지)
    ///
    /// 반환값: 복사된 바이트 수
    #[allow(clippy::unused_self)]
    pub fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64> {
        if !src.exists() {
            return Err(BackupError::PathNotFound {
                path: src.to_path_buf(),
            });
        }

        let bytes = fs::copy(src, dest).map_err(|e| copy_error(e, src, dest))?;

        // 수정 시간 복원. 읽기 전용 파일 등은 쓰기로 열 수 없으므로 실패해도 진행
        let restored = fs::metadata(src)
            .and_then(|m| m.modified())
            .and_then(|mtime| {
                OpenOptions::new()
                    .write(true)
                    .open(dest)
                    .and_then(|f| f.set_modified(mtime))
            });
        if let Err(e) = restored {
            tracing::debug!(path = %dest.display(), error = %e, "could not restore mtime");
        }

        Ok(bytes)
    }

    /// 디렉토리 재귀 복사
    ///
    /// 소스 디렉토리 트리 전체를 `dest` 아래에 같은 구조로 복사합니다.
    /// 심볼릭 링크는 따라가서 내용을 복사합니다. `skip` 경로 아래는 건너뜁니다.
    /// 일반 파일이 아닌 항목은 열지 않고 `special`에 모읍니다 (FIFO는 열면 멈춘다).
    pub fn copy_directory(
        &self,
        src: &Path,
        dest: &Path,
        skip: Option<&Path>,
    ) -> Result<DirectoryCopy> {
        if !src.exists() {
            return Err(BackupError::PathNotFound {
                path: src.to_path_buf(),
            });
        }

        if !src.is_dir() {
            return Err(BackupError::NotADirectory {
                path: src.to_path_buf(),
            });
        }

        fs::create_dir_all(dest).map_err(|e| copy_error(e, src, dest))?;

        let mut copied = DirectoryCopy::default();

        let walker = WalkDir::new(src)
            .follow_links(true)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| skip.map_or(true, |skip| e.path() != skip));

        for entry in walker {
            let entry = entry.map_err(|e| BackupError::CopyFailed {
                src: e.path().unwrap_or(src).to_path_buf(),
                dest: dest.to_path_buf(),
                reason: e.to_string(),
            })?;

            let rel_path = entry
                .path()
                .strip_prefix(src)
                .map_err(|e| BackupError::CopyFailed {
                    src: entry.path().to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: e.to_string(),
                })?;
            let dest_path = dest.join(rel_path);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                fs::create_dir_all(&dest_path)
                    .map_err(|e| copy_error(e, entry.path(), &dest_path))?;
            } else if file_type.is_file() {
                copied.bytes += self.copy_file(entry.path(), &dest_path)?;
                copied.files += 1;
            } else {
                tracing::debug!(path = %entry.path().display(), "skipping special file");
                copied.special.push(entry.path().to_path_buf());
            }
        }

        Ok(copied)
    }

    /// 디렉토리 재귀 영구 삭제
    #[allow(clippy::unused_self)]
    pub fn delete_directory(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(BackupError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        if !path.is_dir() {
            return Err(BackupError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        fs::remove_dir_all(path).map_err(|e| {
            if e.kind() == io::ErrorKind::PermissionDenied {
                BackupError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                BackupError::DeleteFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn map_io_error(e: io::Error, path: &Path) -> BackupError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        BackupError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        BackupError::Io(e)
    }
}

fn copy_error(e: io::Error, src: &Path, dest: &Path) -> BackupError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        BackupError::PermissionDenied {
            path: src.to_path_buf(),
        }
    } else {
        BackupError::CopyFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs as unix_fs;

    #[test]
    fn test_read_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), b"hello").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let fs_ = FileSystem::new();
        let mut entries = fs_.read_directory(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].size, 5);
        assert!(entries[1].is_directory());
    }

    #[test]
    fn test_read_nonexistent_directory() {
        let fs_ = FileSystem::new();
        let result = fs_.read_directory(&PathBuf::from("/nonexistent/path/12345"));

        match result {
            Err(BackupError::PathNotFound { .. }) => {}
            _ => panic!("Expected PathNotFound error"),
        }
    }

    #[test]
    fn test_read_file_as_directory_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        match FileSystem::new().read_directory(&file) {
            Err(BackupError::NotADirectory { .. }) => {}
            _ => panic!("Expected NotADirectory error"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_read_directory_detects_symlink_to_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        unix_fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let entries = FileSystem::new().read_directory(temp.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_symlink());
        assert!(link.is_directory());
    }

    #[test]
    fn test_copy_file_preserves_content_and_mtime() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.bin");
        let dest = temp.path().join("dest.bin");
        fs::write(&src, b"\x00\x01payload").unwrap();

        let past = SystemTime::now() - Duration::from_secs(3600 * 24 * 30);
        fs::File::options()
            .write(true)
            .open(&src)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let bytes = FileSystem::new().copy_file(&src, &dest).unwrap();

        assert_eq!(bytes, 9);
        assert_eq!(fs::read(&dest).unwrap(), b"\x00\x01payload");
        let src_mtime = fs::metadata(&src).unwrap().modified().unwrap();
        let dest_mtime = fs::metadata(&dest).unwrap().modified().unwrap();
        assert_eq!(src_mtime, dest_mtime);
    }

    #[test]
    fn test_copy_directory_keeps_structure() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("foo");
        fs::create_dir_all(src.join("deep").join("er")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::write(src.join("a.txt"), b"a").unwrap();
        fs::write(src.join("deep").join("er").join("b.txt"), b"bb").unwrap();

        let dest = temp.path().join("staging").join("foo");
        let copied = FileSystem::new().copy_directory(&src, &dest, None).unwrap();

        assert_eq!(copied.files, 2);
        assert_eq!(copied.bytes, 3);
        assert!(copied.special.is_empty());
        assert_eq!(fs::read(dest.join("a.txt")).unwrap(), b"a");
        assert_eq!(fs::read(dest.join("deep/er/b.txt")).unwrap(), b"bb");
        assert!(dest.join("empty").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_directory_does_not_open_fifo() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.txt"), b"a").unwrap();
        let fifo = src.join("pipe");
        let status = std::process::Command::new("mkfifo")
            .arg(&fifo)
            .status()
            .unwrap();
        assert!(status.success());

        let dest = temp.path().join("copy");
        let copied = FileSystem::new().copy_directory(&src, &dest, None).unwrap();

        assert_eq!(copied.files, 1);
        assert_eq!(copied.special, vec![fifo]);
        assert!(dest.join("a.txt").exists());
        assert!(!dest.join("pipe").exists());
    }

    #[test]
    fn test_copy_directory_skips_excluded_subtree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("root");
        fs::create_dir_all(src.join("tmp")).unwrap();
        fs::write(src.join("tmp").join("staged.txt"), b"s").unwrap();
        fs::write(src.join("keep.txt"), b"k").unwrap();

        let dest = temp.path().join("copy");
        let copied = FileSystem::new()
            .copy_directory(&src, &dest, Some(src.join("tmp").as_path()))
            .unwrap();

        assert_eq!(copied.files, 1);
        assert!(dest.join("keep.txt").exists());
        assert!(!dest.join("tmp").exists());
    }

    #[test]
    fn test_copy_directory_rejects_file_source() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f.txt");
        fs::write(&file, b"x").unwrap();

        match FileSystem::new().copy_directory(&file, &temp.path().join("out"), None) {
            Err(BackupError::NotADirectory { .. }) => {}
            other => panic!("Expected NotADirectory, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("gone");
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("inner").join("x"), b"x").unwrap();

        let fs_ = FileSystem::new();
        fs_.delete_directory(&dir).unwrap();
        assert!(!dir.exists());

        assert!(matches!(
            fs_.delete_directory(&dir),
            Err(BackupError::PathNotFound { .. })
        ));
    }
}
