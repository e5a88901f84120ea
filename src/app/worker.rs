//! 백그라운드 백업 워커
//!
//! 엔진은 별도 스레드에서 실행되고 이벤트는 채널로 받아 메인 루프에서 로그에 반영한다.

use super::*;
use crate::system::{run_backup, BackupEvent, BackupOutcome, BackupRequest};
use crate::utils::error::{BackupError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::JoinHandle;

pub(super) struct BackupWorker {
    events: Receiver<BackupEvent>,
    handle: Option<JoinHandle<Result<BackupOutcome>>>,
    cancel: Arc<AtomicBool>,
    /// 상태바 표시용 진행 상황
    progress: String,
}

impl App {
    pub fn is_backup_running(&self) -> bool {
        self.backup_worker.is_some()
    }

    /// 상태바에 표시할 진행 상황
    pub fn backup_progress(&self) -> Option<&str> {
        self.backup_worker.as_ref().map(|w| w.progress.as_str())
    }

    pub(super) fn spawn_backup(&mut self, request: BackupRequest) {
        if self.is_backup_running() {
            self.log.warning("A backup is already running");
            return;
        }

        let (events_tx, events_rx) = mpsc::channel::<BackupEvent>();
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_for_worker = Arc::clone(&cancel);

        let spawned = std::thread::Builder::new()
            .name("backup-worker".to_string())
            .spawn(move || run_backup(&request, &events_tx, &cancel_for_worker));

        match spawned {
            Ok(handle) => {
                self.backup_worker = Some(BackupWorker {
                    events: events_rx,
                    handle: Some(handle),
                    cancel,
                    progress: "Starting".to_string(),
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "could not spawn backup worker");
                self.log.warning(format!("Could not start backup: {}", e));
            }
        }
    }

    /// 워커 이벤트 반영 및 종료 처리 (메인 루프에서 호출)
    pub fn poll_backup(&mut self) {
        self.drain_backup_events();

        let finished = self
            .backup_worker
            .as_ref()
            .and_then(|w| w.handle.as_ref())
            .is_some_and(JoinHandle::is_finished);
        if finished {
            self.join_backup();
        }
    }

    /// Esc: 실행 중인 백업 취소 요청
    pub fn cancel_backup(&mut self) {
        let Some(worker) = &self.backup_worker else {
            return;
        };
        if !worker.cancel.swap(true, Ordering::SeqCst) {
            tracing::info!("backup cancellation requested");
            self.log.info("Cancelling backup...");
        }
    }

    /// 종료 시: 취소 요청 후 워커가 스테이징을 정리할 때까지 대기
    pub(super) fn shutdown_backup(&mut self) {
        if let Some(worker) = &self.backup_worker {
            worker.cancel.store(true, Ordering::SeqCst);
            self.join_backup();
        }
    }

    fn drain_backup_events(&mut self) {
        let Some(worker) = &mut self.backup_worker else {
            return;
        };

        let events: Vec<BackupEvent> = worker.events.try_iter().collect();
        for event in events {
            match event {
                BackupEvent::Info(message) => self.log.info(message),
                BackupEvent::Warning(message) => self.log.warning(message),
                BackupEvent::Staging { index, total, path } => {
                    tracing::debug!(index, total, path = %path, "staging entry");
                    if let Some(worker) = &mut self.backup_worker {
                        worker.progress = format!("Staging {}/{}", index, total);
                    }
                }
                BackupEvent::Compressing => {
                    if let Some(worker) = &mut self.backup_worker {
                        worker.progress = "Compressing".to_string();
                    }
                }
            }
        }
    }

    /// 워커 스레드 종료를 기다리고 결과 보고
    fn join_backup(&mut self) {
        let Some(mut worker) = self.backup_worker.take() else {
            return;
        };
        let Some(handle) = worker.handle.take() else {
            return;
        };

        let result = handle.join().map_err(|_| BackupError::ArchiveCreateFailed {
            path: self.workspace.staging_dir.clone(),
            reason: "backup worker thread panicked".to_string(),
        });

        // 스레드가 끝난 뒤 남은 이벤트
        self.backup_worker = Some(worker);
        self.drain_backup_events();
        self.backup_worker = None;

        match result {
            Ok(Ok(outcome)) => {
                tracing::debug!(?outcome, "backup worker finished");
            }
            Ok(Err(e)) | Err(e) => {
                tracing::warn!(error = %e, "backup failed");
                self.log.warning(format!("Backup failed: {}", e));
            }
        }
    }
}
