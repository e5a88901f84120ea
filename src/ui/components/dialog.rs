//! 다이얼로그 시스템
//!
//! 파일/디렉토리 피커, 경로 직접 입력, 목록 제거 체크리스트, 도움말

mod builders;
mod kind;
mod render;

pub use kind::DialogKind;
pub use render::{picker_list_height, Dialog};
