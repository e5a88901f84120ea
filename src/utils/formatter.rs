// Formatters - 파일 크기, 경과 시간, 경로 축약

use std::time::Duration;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

/// 경과 시간을 초 단위 소수로 포맷팅
pub fn format_elapsed_secs(elapsed: Duration) -> String {
    format!("{:.3}", elapsed.as_secs_f64())
}

/// 개수에 따라 단수/복수형 반환
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// 표시 너비가 `max_width`를 넘으면 앞부분을 "..."으로 생략한다.
///
/// 경로는 끝부분(파일명)이 더 중요하므로 뒤쪽을 남긴다.
pub fn truncate_left(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut width = 0;
    let mut tail: Vec<char> = Vec::new();
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        tail.push(ch);
    }
    tail.reverse();
    format!("...{}", tail.into_iter().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1.0 MB");
        assert_eq!(format_file_size(2_147_483_648), "2.0 GB");
    }

    #[test]
    fn test_format_elapsed_secs() {
        assert_eq!(format_elapsed_secs(Duration::from_millis(1500)), "1.500");
        assert_eq!(format_elapsed_secs(Duration::ZERO), "0.000");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "entry", "entries"), "0 entries");
        assert_eq!(pluralize(1, "entry", "entries"), "1 entry");
    }

    #[test]
    fn test_truncate_left_keeps_tail() {
        assert_eq!(truncate_left("/home/user/file.txt", 40), "/home/user/file.txt");
        assert_eq!(truncate_left("/home/user/file.txt", 11), "...file.txt");
        assert_eq!(truncate_left("abcdef", 3), "...");
    }

    #[test]
    fn test_truncate_left_wide_chars() {
        // 한글은 폭 2
        let text = "/tmp/\u{D55C}\u{AE00}";
        let out = truncate_left(text, 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('\u{AE00}'));
    }
}
