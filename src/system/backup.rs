//! 백업 실행 엔진
//!
//! 목록의 각 경로를 스테이징 디렉토리에 복사한 뒤 zip으로 압축하고
//! 스테이징 디렉토리를 지운다. 진행 상황과 경고는 채널로 보고한다.

use crate::system::archive::{archive_base_name, archive_path, zip_directory, ZipOutcome};
use crate::system::filesystem::FileSystem;
use crate::utils::error::{BackupError, Result};
use crate::utils::formatter::format_elapsed_secs;
use chrono::Local;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

pub const EMPTY_BACKUP_MESSAGE: &str =
    "Backup has no valid files or directories -> first add a valid file or directory";

/// 백업 요청
#[derive(Debug, Clone)]
pub struct BackupRequest {
    /// 목록 순서 그대로의 항목
    pub entries: Vec<String>,
    /// 아카이브를 쓸 디렉토리
    pub destination: PathBuf,
    /// 스테이징 디렉토리 (실행 전에 존재하면 안 됨)
    pub staging_dir: PathBuf,
    /// 상대 경로 항목의 기준 디렉토리
    pub base_dir: PathBuf,
}

/// 실행 중 보고되는 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupEvent {
    Info(String),
    Warning(String),
    /// `index`는 1부터 시작
    Staging {
        index: usize,
        total: usize,
        path: String,
    },
    /// 스테이징 완료, 압축 시작
    Compressing,
}

/// 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Completed {
        archive_path: PathBuf,
        elapsed: Duration,
        staged: usize,
        skipped: usize,
    },
    /// 스테이징된 항목 없음. 아카이브 없음
    Empty,
    Cancelled,
}

/// 스테이징 디렉토리 상태
struct Staging<'a> {
    fs: &'a FileSystem,
    dir: &'a Path,
    created: bool,
    /// 스테이징 루트에서 이미 쓰인 이름
    used_names: HashSet<OsString>,
}

impl<'a> Staging<'a> {
    fn new(fs: &'a FileSystem, dir: &'a Path) -> Self {
        Self {
            fs,
            dir,
            created: false,
            used_names: HashSet::new(),
        }
    }

    fn ensure_created(&mut self) -> Result<()> {
        if !self.created {
            fs::create_dir_all(self.dir)?;
            self.created = true;
            tracing::debug!(staging = %self.dir.display(), "created staging directory");
        }
        Ok(())
    }

    /// 충돌하지 않는 스테이징 이름 (`a.txt` -> `a (2).txt`)
    fn claim_name(&mut self, base: &OsString, is_dir: bool) -> OsString {
        if self.used_names.insert(base.clone()) {
            return base.clone();
        }

        let base_path = Path::new(base);
        let (stem, ext) = if is_dir {
            (base.clone(), None)
        } else {
            (
                base_path
                    .file_stem()
                    .map(OsString::from)
                    .unwrap_or_else(|| base.clone()),
                base_path.extension().map(OsString::from),
            )
        };

        let mut n = 2usize;
        loop {
            let mut candidate = stem.clone();
            candidate.push(format!(" ({})", n));
            if let Some(ext) = &ext {
                candidate.push(".");
                candidate.push(ext);
            }
            if self.used_names.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn remove(&mut self) -> Result<()> {
        if self.created && self.dir.exists() {
            self.fs.delete_directory(self.dir)?;
            tracing::debug!(staging = %self.dir.display(), "removed staging directory");
        }
        self.created = false;
        Ok(())
    }
}

/// 백업 실행
///
/// 스테이징 디렉토리는 결과와 관계없이 반환 전에 제거된다.
pub fn run_backup(
    request: &BackupRequest,
    events: &Sender<BackupEvent>,
    cancel: &AtomicBool,
) -> Result<BackupOutcome> {
    let started = Instant::now();

    if request.staging_dir.exists() {
        return Err(BackupError::StagingBusy {
            path: request.staging_dir.clone(),
        });
    }
    validate_destination(&request.destination)?;

    tracing::info!(
        entries = request.entries.len(),
        destination = %request.destination.display(),
        "backup started"
    );

    let filesystem = FileSystem::new();
    let mut staging = Staging::new(&filesystem, &request.staging_dir);

    let mut result = stage_and_archive(request, events, cancel, &mut staging);

    if let Err(e) = staging.remove() {
        tracing::warn!(error = %e, "could not remove staging directory");
        emit(
            events,
            BackupEvent::Warning(format!(
                "Could not remove staging directory {}: {}",
                request.staging_dir.display(),
                e
            )),
        );
    }

    if let Ok(BackupOutcome::Completed {
        archive_path,
        elapsed,
        ..
    }) = &mut result
    {
        *elapsed = started.elapsed();
        emit(
            events,
            BackupEvent::Info(format!("Backup complete @ {}", archive_path.display())),
        );
        emit(
            events,
            BackupEvent::Info(format!(
                "Backup complete ({} sec)",
                format_elapsed_secs(*elapsed)
            )),
        );
    }

    match &result {
        Ok(BackupOutcome::Completed { archive_path, .. }) => {
            tracing::info!(archive = %archive_path.display(), "backup finished")
        }
        Ok(outcome) => tracing::info!(?outcome, "backup finished without archive"),
        Err(e) => tracing::warn!(error = %e, "backup failed"),
    }
    result
}

fn stage_and_archive(
    request: &BackupRequest,
    events: &Sender<BackupEvent>,
    cancel: &AtomicBool,
    staging: &mut Staging<'_>,
) -> Result<BackupOutcome> {
    let total = request.entries.len();
    let mut staged = 0usize;
    let mut skipped = 0usize;

    for (i, entry) in request.entries.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Ok(cancelled(events));
        }

        emit(
            events,
            BackupEvent::Staging {
                index: i + 1,
                total,
                path: entry.clone(),
            },
        );

        let source = resolve_entry(&request.base_dir, entry);
        if !source.exists() {
            emit(events, BackupEvent::Warning(format!("{} does not exist", entry)));
            skipped += 1;
            continue;
        }
        if !source.is_file() && !source.is_dir() {
            emit(
                events,
                BackupEvent::Warning(format!("{} is not a regular file or directory", entry)),
            );
            skipped += 1;
            continue;
        }

        staging.ensure_created()?;

        match stage_entry(staging, &source) {
            Ok(outcome) => {
                if let Some(renamed) = outcome.renamed {
                    emit(
                        events,
                        BackupEvent::Warning(format!(
                            "{} staged as {} (name already used)",
                            entry,
                            renamed.to_string_lossy()
                        )),
                    );
                }
                for special in outcome.special {
                    emit(
                        events,
                        BackupEvent::Warning(format!(
                            "{} is not a regular file or directory",
                            special.display()
                        )),
                    );
                }
                staged += 1;
            }
            Err(e) => {
                tracing::warn!(entry = %entry, error = %e, "failed to stage entry");
                emit(
                    events,
                    BackupEvent::Warning(format!("Could not copy {}: {}", entry, e)),
                );
                skipped += 1;
            }
        }
    }

    if staged == 0 {
        emit(events, BackupEvent::Warning(EMPTY_BACKUP_MESSAGE.to_string()));
        return Ok(BackupOutcome::Empty);
    }

    if cancel.load(Ordering::Relaxed) {
        return Ok(cancelled(events));
    }

    emit(events, BackupEvent::Compressing);
    let output = archive_path(&request.destination, &archive_base_name(Local::now()));
    if zip_directory(staging.dir, &output, cancel)? == ZipOutcome::Cancelled {
        return Ok(cancelled(events));
    }

    // 경과 시간은 스테이징 정리 후 run_backup에서 채운다
    Ok(BackupOutcome::Completed {
        archive_path: output,
        elapsed: Duration::ZERO,
        staged,
        skipped,
    })
}

/// 항목 하나의 스테이징 결과
struct StagedEntry {
    /// 이름 충돌로 바뀐 스테이징 이름
    renamed: Option<OsString>,
    /// 디렉토리 안에서 건너뛴 특수 파일
    special: Vec<PathBuf>,
}

/// 항목 하나를 스테이징한다.
fn stage_entry(staging: &mut Staging<'_>, source: &Path) -> Result<StagedEntry> {
    let is_dir = source.is_dir();
    let base = staged_base_name(source);
    let name = staging.claim_name(&base, is_dir);
    let target = staging.dir.join(&name);

    let copied = if is_dir {
        let skip = nested_skip_path(source, staging.dir);
        staging
            .fs
            .copy_directory(source, &target, skip.as_deref())
            .map(|copied| copied.special)
    } else {
        staging.fs.copy_file(source, &target).map(|_| Vec::new())
    };

    let special = match copied {
        Ok(special) => special,
        Err(e) => {
            // 부분 복사본 정리
            if target.is_dir() {
                let _ = fs::remove_dir_all(&target);
            } else if target.exists() {
                let _ = fs::remove_file(&target);
            }
            return Err(e);
        }
    };

    Ok(StagedEntry {
        renamed: (name != base).then_some(name),
        special,
    })
}

/// 스테이징에 쓸 기본 이름 (`/`, `..` 처럼 이름이 없으면 정규화된 경로 기준)
fn staged_base_name(source: &Path) -> OsString {
    if let Some(name) = source.file_name() {
        return name.to_os_string();
    }
    source
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_os_string()))
        .unwrap_or_else(|| OsString::from("root"))
}

/// 디렉토리 항목이 스테이징 디렉토리를 포함하면, 복사 시 건너뛸 경로
fn nested_skip_path(source: &Path, staging_dir: &Path) -> Option<PathBuf> {
    let source_real = source.canonicalize().ok()?;
    let staging_real = staging_dir.canonicalize().ok()?;
    let rel = staging_real.strip_prefix(&source_real).ok()?;
    Some(source.join(rel))
}

fn resolve_entry(base_dir: &Path, entry: &str) -> PathBuf {
    let path = Path::new(entry);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn validate_destination(destination: &Path) -> Result<()> {
    if !destination.exists() {
        return Err(BackupError::DestinationInvalid {
            path: destination.to_path_buf(),
            reason: "does not exist".to_string(),
        });
    }
    if !destination.is_dir() {
        return Err(BackupError::DestinationInvalid {
            path: destination.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(())
}

fn cancelled(events: &Sender<BackupEvent>) -> BackupOutcome {
    emit(events, BackupEvent::Warning("Backup cancelled".to_string()));
    BackupOutcome::Cancelled
}

fn emit(events: &Sender<BackupEvent>, event: BackupEvent) {
    // 수신 측이 사라져도 백업은 계속한다
    let _ = events.send(event);
}
