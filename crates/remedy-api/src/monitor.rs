//! Background monitoring loop.
//!
//! One tokio task generates a synthetic log line every tick and feeds it
//! through the engine. The loop is the sole writer to the core state;
//! request handlers only read snapshots, so viewers never wait on an
//! in-flight classifier call.

use remedy_engine::DecisionEngine;
use remedy_gen::LogGenerator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Seconds between synthetic log lines.
const TICK: Duration = Duration::from_secs(3);

pub struct Monitor {
    running: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Monitor {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start the loop. Returns false if it was already running.
    pub fn start(&self, engine: Arc<DecisionEngine>) -> bool {
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }

        let running = Arc::clone(&self.running);
        let task = tokio::spawn(async move {
            tracing::info!("monitoring loop started");
            let mut generator = LogGenerator::new();
            let mut ticker = tokio::time::interval(TICK);
            while running.load(Ordering::SeqCst) {
                ticker.tick().await;
                let line = generator.next_line();
                engine.process(&line).await;
            }
            tracing::info!("monitoring loop stopped");
        });

        *self.lock_handle() = Some(task);
        true
    }

    /// Stop the loop. Returns false if it was not running.
    pub fn stop(&self) -> bool {
        if !self.running.swap(false, Ordering::SeqCst) {
            return false;
        }
        if let Some(task) = self.lock_handle().take() {
            task.abort();
        }
        true
    }

    fn lock_handle(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedy_core::KnowledgeBase;
    use remedy_engine::CoreState;
    use remedy_store::TicketStore;

    fn engine() -> Arc<DecisionEngine> {
        let state = Arc::new(CoreState::new(TicketStore::in_memory()));
        Arc::new(DecisionEngine::new(KnowledgeBase::empty(), None, state))
    }

    #[tokio::test]
    async fn test_start_stop_idempotent() {
        let monitor = Arc::new(Monitor::new());
        assert!(!monitor.is_running());

        assert!(monitor.start(engine()));
        assert!(monitor.is_running());
        // Second start is a no-op
        assert!(!monitor.start(engine()));

        assert!(monitor.stop());
        assert!(!monitor.is_running());
        // Second stop is a no-op
        assert!(!monitor.stop());
    }

    #[tokio::test]
    async fn test_loop_ingests_lines() {
        let engine = engine();
        let monitor = Arc::new(Monitor::new());
        monitor.start(Arc::clone(&engine));

        // First tick fires immediately
        tokio::time::sleep(Duration::from_millis(100)).await;
        monitor.stop();

        assert!(engine.state().snapshot().total_logs >= 1);
    }
}
