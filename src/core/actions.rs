//! 액션 시스템: 단일 진실 원천 (Single Source of Truth)
//!
//! 키 바인딩, 액션 목록 패널, 커맨드바 항목, 도움말 내용이
//! 모두 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Backup
    AddFile,
    AddDirectory,
    StartBackup,
    ShowList,
    RemoveEntries,
    // Navigation
    MoveUp,
    MoveDown,
    Activate,
    // Log
    ScrollLogUp,
    ScrollLogDown,
    ScrollLogEnd,
    // System
    CancelBackup,
    ShowHelp,
    ToggleTheme,
    Quit,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Backup,
    Navigation,
    Log,
    System,
}

impl ActionCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ActionCategory::Backup => "Backup",
            ActionCategory::Navigation => "Navigation",
            ActionCategory::Log => "Log",
            ActionCategory::System => "System",
        }
    }
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Backup (액션 목록 패널 순서)
    ActionDef {
        action: Action::AddFile,
        label: "Add File",
        category: ActionCategory::Backup,
        shortcut_display: Some("F2 / a"),
        command_bar: Some(CommandBarEntry {
            key: "F2",
            label: "File",
            priority: 20,
        }),
    },
    ActionDef {
        action: Action::AddDirectory,
        label: "Add Directory",
        category: ActionCategory::Backup,
        shortcut_display: Some("F3 / d"),
        command_bar: Some(CommandBarEntry {
            key: "F3",
            label: "Dir",
            priority: 30,
        }),
    },
    ActionDef {
        action: Action::StartBackup,
        label: "Start Backup",
        category: ActionCategory::Backup,
        shortcut_display: Some("F5 / b"),
        command_bar: Some(CommandBarEntry {
            key: "F5",
            label: "Backup",
            priority: 50,
        }),
    },
    ActionDef {
        action: Action::ShowList,
        label: "Show Backup List",
        category: ActionCategory::Backup,
        shortcut_display: Some("F6 / l"),
        command_bar: Some(CommandBarEntry {
            key: "F6",
            label: "List",
            priority: 60,
        }),
    },
    ActionDef {
        action: Action::RemoveEntries,
        label: "Remove",
        category: ActionCategory::Backup,
        shortcut_display: Some("F8 / r"),
        command_bar: Some(CommandBarEntry {
            key: "F8",
            label: "Remove",
            priority: 80,
        }),
    },
    // Navigation
    ActionDef {
        action: Action::MoveUp,
        label: "Move up / down",
        category: ActionCategory::Navigation,
        shortcut_display: Some("k / j"),
        command_bar: None,
    },
    ActionDef {
        action: Action::MoveDown,
        label: "Move down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::Activate,
        label: "Run selected action",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Enter"),
        command_bar: None,
    },
    // Log
    ActionDef {
        action: Action::ScrollLogUp,
        label: "Scroll log",
        category: ActionCategory::Log,
        shortcut_display: Some("PgUp / PgDn"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ScrollLogDown,
        label: "Scroll log down",
        category: ActionCategory::Log,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::ScrollLogEnd,
        label: "Follow log",
        category: ActionCategory::Log,
        shortcut_display: Some("End"),
        command_bar: None,
    },
    // System
    ActionDef {
        action: Action::CancelBackup,
        label: "Cancel running backup",
        category: ActionCategory::System,
        shortcut_display: Some("Esc"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ShowHelp,
        label: "Help",
        category: ActionCategory::System,
        shortcut_display: Some("F1 / ?"),
        command_bar: Some(CommandBarEntry {
            key: "F1",
            label: "Help",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::ToggleTheme,
        label: "Toggle theme",
        category: ActionCategory::System,
        shortcut_display: Some("t"),
        command_bar: None,
    },
    ActionDef {
        action: Action::Quit,
        label: "Quit",
        category: ActionCategory::System,
        shortcut_display: Some("F10 / q / ^C"),
        command_bar: Some(CommandBarEntry {
            key: "F10",
            label: "Quit",
            priority: 100,
        }),
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    let bind = |code, modifiers, action| KeyBinding {
        code,
        modifiers,
        action,
    };
    let none = Some(KeyModifiers::NONE);
    vec![
        // 백업 액션
        bind(KeyCode::F(2), None, Action::AddFile),
        bind(KeyCode::Char('a'), none, Action::AddFile),
        bind(KeyCode::F(3), None, Action::AddDirectory),
        bind(KeyCode::Char('d'), none, Action::AddDirectory),
        bind(KeyCode::F(5), None, Action::StartBackup),
        bind(KeyCode::Char('b'), none, Action::StartBackup),
        bind(KeyCode::F(6), None, Action::ShowList),
        bind(KeyCode::Char('l'), none, Action::ShowList),
        bind(KeyCode::F(8), None, Action::RemoveEntries),
        bind(KeyCode::Char('r'), none, Action::RemoveEntries),
        // 이동
        bind(KeyCode::Up, None, Action::MoveUp),
        bind(KeyCode::Char('k'), none, Action::MoveUp),
        bind(KeyCode::Down, None, Action::MoveDown),
        bind(KeyCode::Char('j'), none, Action::MoveDown),
        bind(KeyCode::Enter, None, Action::Activate),
        // 로그
        bind(KeyCode::PageUp, None, Action::ScrollLogUp),
        bind(KeyCode::PageDown, None, Action::ScrollLogDown),
        bind(KeyCode::End, None, Action::ScrollLogEnd),
        // 시스템
        bind(KeyCode::Esc, None, Action::CancelBackup),
        bind(KeyCode::F(1), None, Action::ShowHelp),
        bind(KeyCode::Char('?'), None, Action::ShowHelp),
        bind(KeyCode::Char('t'), none, Action::ToggleTheme),
        bind(KeyCode::F(10), None, Action::Quit),
        bind(KeyCode::Char('q'), none, Action::Quit),
        bind(KeyCode::Char('c'), Some(KeyModifiers::CONTROL), Action::Quit),
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    key_bindings()
        .iter()
        .find(|binding| {
            binding.code == code
                && binding
                    .modifiers
                    .map_or(true, |required| modifiers == required)
        })
        .map(|binding| binding.action)
}

/// 액션 목록 패널에 표시되는 백업 액션 (레지스트리 순서)
pub fn backup_actions() -> Vec<&'static ActionDef> {
    ACTION_DEFS
        .iter()
        .filter(|d| d.category == ActionCategory::Backup)
        .collect()
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    [
        ActionCategory::Backup,
        ActionCategory::Navigation,
        ActionCategory::Log,
        ActionCategory::System,
    ]
    .iter()
    .map(|cat| {
        let items: Vec<(&'static str, &'static str)> = ACTION_DEFS
            .iter()
            .filter(|d| d.category == *cat)
            .filter_map(|d| d.shortcut_display.map(|key| (key, d.label)))
            .collect();
        (cat.title(), items)
    })
    .filter(|(_, items)| !items.is_empty())
    .collect()
}
