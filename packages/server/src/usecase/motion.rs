//! Timed driver motion.
//!
//! `MotionRun` walks a `MotionPlan` on the tokio clock, handing one position
//! per step to a `MotionSink`. The run reports how it ended through its
//! handle, which lets the ride move to the next phase only once a leg has
//! really finished.

use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::domain::{Coordinate, MotionPlan};

/// How a motion run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionOutcome {
    /// Every position of the plan was emitted.
    Completed,
    /// The run was cancelled or the sink refused a position.
    Cancelled,
}

/// Receiver of the positions of a motion run.
#[async_trait]
pub trait MotionSink: Send + Sync + 'static {
    /// Returns `false` to stop the run.
    async fn emit(&self, position: Coordinate) -> bool;
}

pub struct MotionRun;

impl MotionRun {
    /// Start emitting the plan, one position per `step_delay`.
    ///
    /// The first position is emitted one delay after the call.
    pub fn spawn<S: MotionSink>(plan: MotionPlan, step_delay: Duration, sink: S) -> MotionHandle {
        let task = tokio::spawn(async move {
            for position in plan {
                tokio::time::sleep(step_delay).await;
                if !sink.emit(position).await {
                    return MotionOutcome::Cancelled;
                }
            }
            MotionOutcome::Completed
        });
        MotionHandle { task }
    }
}

/// Handle of a running motion. Dropping it cancels the run.
pub struct MotionHandle {
    task: JoinHandle<MotionOutcome>,
}

impl MotionHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Wait for the run to end.
    pub async fn finished(mut self) -> MotionOutcome {
        match (&mut self.task).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if !e.is_cancelled() {
                    tracing::error!("Motion run failed: {}", e);
                }
                MotionOutcome::Cancelled
            }
        }
    }
}

impl Drop for MotionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
