use std::fs;
use std::path::{Path, MAIN_SEPARATOR};

/// 경로 입력 필드 편집 (커서는 바이트 위치, 항상 문자 경계)
pub(super) struct TextBufferEdit;

impl TextBufferEdit {
    pub(super) fn insert_char(value: &mut String, cursor_pos: &mut usize, c: char) {
        value.insert(*cursor_pos, c);
        *cursor_pos += c.len_utf8();
    }

    pub(super) fn backspace(value: &mut String, cursor_pos: &mut usize) {
        if *cursor_pos == 0 {
            return;
        }
        let prev = Self::prev_char_start(value, *cursor_pos);
        value.remove(prev);
        *cursor_pos = prev;
    }

    pub(super) fn delete(value: &mut String, cursor_pos: &mut usize) {
        if *cursor_pos < value.len() {
            value.remove(*cursor_pos);
        }
    }

    pub(super) fn left(value: &str, cursor_pos: &mut usize) {
        *cursor_pos = Self::prev_char_start(value, *cursor_pos);
    }

    pub(super) fn right(value: &str, cursor_pos: &mut usize) {
        if let Some(c) = value[*cursor_pos..].chars().next() {
            *cursor_pos += c.len_utf8();
        }
    }

    pub(super) fn home(cursor_pos: &mut usize) {
        *cursor_pos = 0;
    }

    pub(super) fn end(value: &str, cursor_pos: &mut usize) {
        *cursor_pos = value.len();
    }

    /// Ctrl+W: 직전 경로 구성요소 삭제 (끝의 구분자 포함)
    pub(super) fn delete_prev_component(value: &mut String, cursor_pos: &mut usize) {
        let head = &value[..*cursor_pos];
        let trimmed = head.trim_end_matches(MAIN_SEPARATOR);
        let start = trimmed
            .rfind(MAIN_SEPARATOR)
            .map(|i| i + MAIN_SEPARATOR.len_utf8())
            .unwrap_or(0);
        value.replace_range(start..*cursor_pos, "");
        *cursor_pos = start;
    }

    fn prev_char_start(value: &str, cursor_pos: usize) -> usize {
        value[..cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// 입력값의 마지막 구성요소로 시작하는 경로 후보
///
/// 상대 경로는 `base` 기준으로 찾는다. 디렉토리 후보는 구분자로 끝난다.
/// 숨김 항목은 입력이 `.`으로 시작할 때만 후보가 된다.
pub(super) fn path_completions(value: &str, base: &Path, dirs_only: bool) -> Vec<String> {
    let (dir_part, partial) = match value.rfind(MAIN_SEPARATOR) {
        Some(i) => value.split_at(i + MAIN_SEPARATOR.len_utf8()),
        None => ("", value),
    };

    let dir_path = if dir_part.is_empty() {
        base.to_path_buf()
    } else if Path::new(dir_part).is_absolute() {
        Path::new(dir_part).to_path_buf()
    } else {
        base.join(dir_part)
    };

    let mut candidates: Vec<String> = fs::read_dir(dir_path)
        .ok()
        .into_iter()
        .flat_map(|iter| iter.flatten())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.starts_with(partial) {
                return None;
            }
            if name.starts_with('.') && !partial.starts_with('.') {
                return None;
            }
            let is_dir = entry.path().is_dir();
            if dirs_only && !is_dir {
                return None;
            }
            let suffix = if is_dir {
                MAIN_SEPARATOR.to_string()
            } else {
                String::new()
            };
            Some(format!("{}{}{}", dir_part, name, suffix))
        })
        .collect();
    candidates.sort_unstable();
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_insert_backspace_delete_utf8_cursor_boundary() {
        let mut value = "\u{AC00}\u{B098}".to_string();
        let mut cursor_pos = "\u{AC00}".len();

        TextBufferEdit::insert_char(&mut value, &mut cursor_pos, '\u{B2E4}');
        assert_eq!(value, "\u{AC00}\u{B2E4}\u{B098}");
        assert_eq!(cursor_pos, "\u{AC00}\u{B2E4}".len());

        TextBufferEdit::backspace(&mut value, &mut cursor_pos);
        assert_eq!(value, "\u{AC00}\u{B098}");
        assert_eq!(cursor_pos, "\u{AC00}".len());

        cursor_pos = 0;
        TextBufferEdit::delete(&mut value, &mut cursor_pos);
        assert_eq!(value, "\u{B098}");
        assert_eq!(cursor_pos, 0);
    }

    #[test]
    fn test_cursor_movement() {
        let value = "a\u{AC00}b".to_string();
        let mut cursor_pos = value.len();

        TextBufferEdit::left(&value, &mut cursor_pos);
        assert_eq!(cursor_pos, "a\u{AC00}".len());
        TextBufferEdit::left(&value, &mut cursor_pos);
        assert_eq!(cursor_pos, 1);
        TextBufferEdit::right(&value, &mut cursor_pos);
        assert_eq!(cursor_pos, "a\u{AC00}".len());

        TextBufferEdit::home(&mut cursor_pos);
        TextBufferEdit::left(&value, &mut cursor_pos);
        assert_eq!(cursor_pos, 0);

        TextBufferEdit::end(&value, &mut cursor_pos);
        TextBufferEdit::right(&value, &mut cursor_pos);
        assert_eq!(cursor_pos, value.len());
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_prev_component() {
        let mut value = "/home/user/docs/".to_string();
        let mut cursor_pos = value.len();

        TextBufferEdit::delete_prev_component(&mut value, &mut cursor_pos);
        assert_eq!(value, "/home/user/");
        assert_eq!(cursor_pos, value.len());

        TextBufferEdit::delete_prev_component(&mut value, &mut cursor_pos);
        assert_eq!(value, "/home/");

        let mut value = "name".to_string();
        let mut cursor_pos = 4;
        TextBufferEdit::delete_prev_component(&mut value, &mut cursor_pos);
        assert_eq!(value, "");
        assert_eq!(cursor_pos, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_path_completions() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        fs::create_dir(temp.path().join(".dotdir")).unwrap();
        fs::write(temp.path().join("draft.txt"), b"d").unwrap();
        fs::write(temp.path().join("notes.txt"), b"n").unwrap();

        let base = temp.path();
        assert_eq!(
            path_completions("d", base, false),
            vec!["docs/".to_string(), "draft.txt".to_string()]
        );
        assert_eq!(path_completions("d", base, true), vec!["docs/".to_string()]);
        assert_eq!(path_completions(".", base, true), vec![".dotdir/".to_string()]);

        let absolute = format!("{}/no", base.display());
        assert_eq!(
            path_completions(&absolute, Path::new("/"), false),
            vec![format!("{}/notes.txt", base.display())]
        );
        assert!(path_completions("missing/x", base, false).is_empty());
    }
}
