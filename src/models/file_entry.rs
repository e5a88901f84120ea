use std::path::PathBuf;

/// 파일 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// 디렉토리
    Directory,
    /// 일반 파일
    File,
    /// 심볼릭 링크 (대상 종류는 `target_is_dir`)
    Symlink,
}

/// 피커에 표시되는 파일 엔트리
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// 파일/디렉토리 이름
    pub name: String,
    /// 전체 경로
    pub path: PathBuf,
    pub file_type: FileType,
    /// 심볼릭 링크가 디렉토리를 가리키는지 여부
    pub target_is_dir: bool,
    /// 바이트 단위 크기 (디렉토리는 0)
    pub size: u64,
    /// 숨김 파일 여부
    pub is_hidden: bool,
}

impl FileEntry {
    pub fn new(name: String, path: PathBuf, file_type: FileType, size: u64) -> Self {
        let is_hidden = name.starts_with('.');
        Self {
            name,
            path,
            file_type,
            target_is_dir: false,
            size,
            is_hidden,
        }
    }

    /// 디렉토리처럼 탐색 가능한지 (디렉토리 링크 포함)
    pub fn is_directory(&self) -> bool {
        match self.file_type {
            FileType::Directory => true,
            FileType::Symlink => self.target_is_dir,
            FileType::File => false,
        }
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_creation() {
        let entry = FileEntry::new(
            "test.txt".to_string(),
            PathBuf::from("/tmp/test.txt"),
            FileType::File,
            1024,
        );

        assert_eq!(entry.name, "test.txt");
        assert_eq!(entry.size, 1024);
        assert!(!entry.is_directory());
        assert!(!entry.is_hidden);
    }

    #[test]
    fn test_dotfile_is_hidden() {
        let entry = FileEntry::new(
            ".config".to_string(),
            PathBuf::from("/home/u/.config"),
            FileType::Directory,
            0,
        );
        assert!(entry.is_hidden);
        assert!(entry.is_directory());
    }

    #[test]
    fn test_symlink_to_directory_is_browsable() {
        let mut entry = FileEntry::new(
            "link".to_string(),
            PathBuf::from("/tmp/link"),
            FileType::Symlink,
            0,
        );
        assert!(!entry.is_directory());

        entry.target_is_dir = true;
        assert!(entry.is_directory());
        assert!(entry.is_symlink());
    }
}
