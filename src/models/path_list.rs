use crate::utils::error::{BackupError, Result};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// 백업 목록 저장소
///
/// 한 줄에 경로 하나씩 기록된 텍스트 파일. 첫 항목이 추가될 때 파일이
/// 생성되며, 추가는 append, 삭제는 전체 다시 쓰기로 처리한다.
/// 단일 프로세스 전용 (잠금 없음).
#[derive(Debug, Clone)]
pub struct PathListStore {
    path: PathBuf,
}

impl PathListStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// 목록 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 목록 파일 존재 여부
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// 항목 추가
    ///
    /// 빈 경로는 무시하고 `false`를 반환한다.
    pub fn append(&self, entry: &str) -> Result<bool> {
        if entry.trim().is_empty() {
            return Ok(false);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry)?;
        tracing::debug!(list = %self.path.display(), entry, "appended backup entry");
        Ok(true)
    }

    /// 전체 항목 읽기 (파일 순서 유지)
    pub fn read_all(&self) -> Result<Vec<String>> {
        if !self.exists() {
            return Err(BackupError::ListMissing {
                path: self.path.clone(),
            });
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// 남길 항목만으로 파일 전체를 다시 쓴다.
    pub fn rewrite(&self, keep: &[String]) -> Result<()> {
        let mut content = String::new();
        for entry in keep {
            content.push_str(entry);
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        tracing::debug!(list = %self.path.display(), kept = keep.len(), "rewrote backup list");
        Ok(())
    }

    /// 주어진 위치의 항목들을 삭제하고 삭제된 항목을 반환한다.
    ///
    /// 위치 기준이므로 같은 경로가 여러 번 있어도 각각 따로 지울 수 있다.
    pub fn remove_indices(&self, indices: &HashSet<usize>) -> Result<Vec<String>> {
        let entries = self.read_all()?;
        let (removed, keep): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .enumerate()
            .partition(|(i, _)| indices.contains(i));

        let keep: Vec<String> = keep.into_iter().map(|(_, e)| e).collect();
        self.rewrite(&keep)?;
        Ok(removed.into_iter().map(|(_, e)| e).collect())
    }
}
