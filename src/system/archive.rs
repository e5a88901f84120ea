use crate::utils::error::{BackupError, Result};
use chrono::{DateTime, Datelike, Local, Timelike};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions as ZipFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 아카이브 이름 접두사
pub const ARCHIVE_PREFIX: &str = "backup_";

/// 아카이브 생성 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipOutcome {
    Written { files: usize, dirs: usize },
    Cancelled,
}

/// `backup_<ISO-8601>` 형식 기본 이름
///
/// 시각은 마이크로초까지 포함하며 ':' 와 '.' 은 모두 '-' 로 바뀐다.
pub fn archive_base_name(now: DateTime<Local>) -> String {
    let stamp = now
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
        .replace([':', '.'], "-");
    format!("{}{}", ARCHIVE_PREFIX, stamp)
}

/// 대상 디렉토리 안의 `<base>.zip` 경로
pub fn archive_path(destination: &Path, base_name: &str) -> PathBuf {
    destination.join(format!("{}.zip", base_name))
}

/// 스테이징 디렉토리 트리 전체를 zip으로 압축한다.
///
/// 디렉토리는 명시적 엔트리로 기록되고, 파일은 deflate로 압축되며
/// 원본의 수정 시간을 유지한다. 출력 파일이 이미 있으면 실패한다.
/// 취소되면 쓰던 아카이브를 지우고 `Cancelled`를 반환한다.
pub fn zip_directory(source_dir: &Path, output_path: &Path, cancel: &AtomicBool) -> Result<ZipOutcome> {
    if output_path.exists() {
        return Err(BackupError::ArchiveCreateFailed {
            path: output_path.to_path_buf(),
            reason: "Destination archive already exists".to_string(),
        });
    }

    let file = File::create(output_path).map_err(|e| create_error(output_path, e))?;
    let mut writer = ZipWriter::new(file);

    let result = write_tree(&mut writer, source_dir, output_path, cancel).and_then(|outcome| {
        writer
            .finish()
            .map_err(|e| create_error(output_path, e))?;
        Ok(outcome)
    });

    match result {
        Ok(ZipOutcome::Cancelled) | Err(_) => {
            if let Err(e) = fs::remove_file(output_path) {
                tracing::warn!(path = %output_path.display(), error = %e, "could not remove partial archive");
            }
        }
        Ok(ZipOutcome::Written { .. }) => {}
    }
    result
}

fn write_tree(
    writer: &mut ZipWriter<File>,
    source_dir: &Path,
    output_path: &Path,
    cancel: &AtomicBool,
) -> Result<ZipOutcome> {
    let mut files = 0usize;
    let mut dirs = 0usize;

    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        if cancel.load(Ordering::Relaxed) {
            return Ok(ZipOutcome::Cancelled);
        }

        let entry = entry.map_err(|e| create_error(output_path, e))?;
        let rel_path = entry
            .path()
            .strip_prefix(source_dir)
            .map_err(|e| create_error(output_path, e))?;
        let mut name = archive_entry_name(rel_path);

        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
        let options = ZipFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip_time(modified));

        if entry.file_type().is_dir() {
            if !name.ends_with('/') {
                name.push('/');
            }
            writer
                .add_directory(name, options)
                .map_err(|e| create_error(output_path, e))?;
            dirs += 1;
        } else {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            writer
                .start_file(name, options.large_file(size > u32::MAX as u64))
                .map_err(|e| create_error(output_path, e))?;
            let mut src = File::open(entry.path()).map_err(|e| create_error(output_path, e))?;
            io::copy(&mut src, writer).map_err(|e| create_error(output_path, e))?;
            files += 1;
        }
    }

    Ok(ZipOutcome::Written { files, dirs })
}

/// 상대 경로를 '/' 구분 zip 엔트리 이름으로 변환
fn archive_entry_name(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(v) => Some(v.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// 파일 수정 시간을 zip 시각으로 변환 (범위 밖이면 기본값)
fn zip_time(modified: Option<SystemTime>) -> zip::DateTime {
    let Some(mtime) = modified else {
        return zip::DateTime::default_for_write();
    };
    let dt: DateTime<Local> = mtime.into();
    let (Ok(year), Ok(month), Ok(day), Ok(hour), Ok(minute), Ok(second)) = (
        u16::try_from(dt.year()),
        u8::try_from(dt.month()),
        u8::try_from(dt.day()),
        u8::try_from(dt.hour()),
        u8::try_from(dt.minute()),
        u8::try_from(dt.second()),
    ) else {
        return zip::DateTime::default_for_write();
    };
    zip::DateTime::from_date_and_time(year, month, day, hour, minute, second)
        .unwrap_or_else(|_| zip::DateTime::default_for_write())
}

fn create_error(path: &Path, e: impl std::fmt::Display) -> BackupError {
    BackupError::ArchiveCreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn read_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(File::open(path).expect("open zip")).expect("read zip");
        let mut out = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).expect("zip entry");
            let mut data = Vec::new();
            entry.read_to_end(&mut data).expect("read entry");
            out.push((entry.name().to_string(), data));
        }
        out
    }

    #[test]
    fn test_archive_base_name_is_filesystem_safe() {
        let now = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("valid local time");
        let name = archive_base_name(now);

        assert_eq!(name, "backup_2024-03-09T14-05-07-000000");
        assert!(!name.contains(':'));
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_archive_base_name_differs_across_seconds() {
        let a = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).single().unwrap();
        let b = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 2).single().unwrap();
        assert_ne!(archive_base_name(a), archive_base_name(b));
    }

    #[test]
    fn test_archive_path_appends_zip() {
        assert_eq!(
            archive_path(Path::new("/mnt/usb"), "backup_x"),
            PathBuf::from("/mnt/usb/backup_x.zip")
        );
    }

    #[test]
    fn test_zip_directory_writes_tree() {
        let temp = tempdir().expect("create tempdir");
        let staging = temp.path().join("tmp");
        fs::create_dir_all(staging.join("foo").join("empty")).unwrap();
        fs::write(staging.join("alpha.txt"), b"alpha").unwrap();
        fs::write(staging.join("foo").join("a.txt"), b"A contents").unwrap();

        let out = temp.path().join("out.zip");
        let outcome = zip_directory(&staging, &out, &AtomicBool::new(false)).unwrap();

        assert_eq!(outcome, ZipOutcome::Written { files: 2, dirs: 2 });
        let entries = read_entries(&out);
        let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"alpha.txt"));
        assert!(names.contains(&"foo/"));
        assert!(names.contains(&"foo/empty/"));
        let a = entries.iter().find(|(n, _)| n == "foo/a.txt").unwrap();
        assert_eq!(a.1, b"A contents");
        // 스테이징 디렉토리 이름은 엔트리에 포함되지 않음
        assert!(names.iter().all(|n| !n.starts_with("tmp")));
    }

    #[test]
    fn test_zip_directory_refuses_existing_output() {
        let temp = tempdir().unwrap();
        let staging = temp.path().join("tmp");
        fs::create_dir_all(&staging).unwrap();
        let out = temp.path().join("out.zip");
        fs::write(&out, b"keep me").unwrap();

        let result = zip_directory(&staging, &out, &AtomicBool::new(false));

        assert!(matches!(result, Err(BackupError::ArchiveCreateFailed { .. })));
        assert_eq!(fs::read(&out).unwrap(), b"keep me");
    }

    #[test]
    fn test_zip_directory_cancelled_removes_partial_archive() {
        let temp = tempdir().unwrap();
        let staging = temp.path().join("tmp");
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("a.txt"), b"a").unwrap();
        let out = temp.path().join("out.zip");

        let outcome = zip_directory(&staging, &out, &AtomicBool::new(true)).unwrap();

        assert_eq!(outcome, ZipOutcome::Cancelled);
        assert!(!out.exists());
    }

    #[test]
    fn test_zip_time_falls_back_without_mtime() {
        let t = zip_time(None);
        assert_eq!(t.year(), zip::DateTime::default_for_write().year());
        assert_eq!(t.month(), zip::DateTime::default_for_write().month());
    }
}
