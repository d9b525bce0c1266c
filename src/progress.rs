//! Staged progress reporter — the cosmetic post-submission analysis run.
//!
//! After the submission is acknowledged, a fixed table of named stages is
//! played back on a tick schedule, independent of the real analysis latency.
//! The run is a spawned task holding the only sender side of its channels:
//! aborting the task (explicit cancel or handle drop) drops the completion
//! sender, so a cancelled run can never signal completion. There is no
//! "is mounted" flag to forget.

use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::IntakeConfig;

/// One named pseudo-analysis stage.
#[derive(Debug, Clone, Copy)]
pub struct StageSpec {
    pub label: &'static str,
    pub duration: Duration,
}

impl StageSpec {
    pub const fn new(label: &'static str, duration_ms: u64) -> Self {
        Self {
            label,
            duration: Duration::from_millis(duration_ms),
        }
    }
}

/// The analysis stage table, in playback order.
pub const ANALYSIS_STAGES: [StageSpec; 4] = [
    StageSpec::new("Encrypting and Uploading Data...", 1500),
    StageSpec::new("Analyzing Dermatological Biomarkers...", 2500),
    StageSpec::new("Processing Genomic VCF Data...", 2500),
    StageSpec::new("Calculating Metabolic Risk Score...", 2000),
];

/// Progress updates per stage.
pub const TICKS_PER_STAGE: u32 = 20;

/// Pause at 100% before completion is signaled.
pub const TRAILING_PAUSE: Duration = Duration::from_millis(500);

/// Published progress of an active run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    /// 0-based index into the stage table.
    pub stage_index: usize,
    pub stage_label: &'static str,
    /// Monotonically non-decreasing within one run; clamped to 100.0.
    pub percent_complete: f64,
}

/// Drives the staged progress sequence.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    stages: Vec<StageSpec>,
    ticks_per_stage: u32,
    trailing_pause: Duration,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self {
            stages: ANALYSIS_STAGES.to_vec(),
            ticks_per_stage: TICKS_PER_STAGE,
            trailing_pause: TRAILING_PAUSE,
        }
    }
}

impl ProgressReporter {
    /// Reporter with the standard stage table and the config's pacing.
    pub fn from_config(config: &IntakeConfig) -> Self {
        Self {
            stages: ANALYSIS_STAGES.to_vec(),
            ticks_per_stage: config.ticks_per_stage.max(1),
            trailing_pause: config.trailing_pause,
        }
    }

    /// Reporter with a custom stage table.
    pub fn with_stages(
        stages: Vec<StageSpec>,
        ticks_per_stage: u32,
        trailing_pause: Duration,
    ) -> Self {
        Self {
            stages,
            ticks_per_stage: ticks_per_stage.max(1),
            trailing_pause,
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Start a run. Stages execute strictly in table order; the returned
    /// handle is the only way to observe or cancel the run.
    pub fn start(&self) -> ProgressRun {
        let initial = ProgressState {
            stage_index: 0,
            stage_label: self.stages.first().map(|s| s.label).unwrap_or(""),
            percent_complete: 0.0,
        };
        let (state_tx, state_rx) = watch::channel(initial);
        let (done_tx, done_rx) = oneshot::channel();

        let stages = self.stages.clone();
        let ticks = self.ticks_per_stage;
        let pause = self.trailing_pause;
        let handle = tokio::spawn(drive(stages, ticks, pause, state_tx, done_tx));

        ProgressRun {
            updates: state_rx,
            completion: Some(done_rx),
            handle,
        }
    }
}

async fn drive(
    stages: Vec<StageSpec>,
    ticks_per_stage: u32,
    trailing_pause: Duration,
    state_tx: watch::Sender<ProgressState>,
    done_tx: oneshot::Sender<()>,
) {
    let stage_count = stages.len();
    let increment = if stage_count == 0 {
        0.0
    } else {
        100.0 / stage_count as f64 / ticks_per_stage as f64
    };
    let mut percent = 0.0_f64;

    for (stage_index, stage) in stages.iter().enumerate() {
        tracing::debug!(stage = stage.label, "analysis stage started");
        state_tx.send_replace(ProgressState {
            stage_index,
            stage_label: stage.label,
            percent_complete: percent,
        });

        let tick = stage.duration / ticks_per_stage;
        for _ in 0..ticks_per_stage {
            tokio::time::sleep(tick).await;
            percent = (percent + increment).min(100.0);
            state_tx.send_replace(ProgressState {
                stage_index,
                stage_label: stage.label,
                percent_complete: percent,
            });
        }
    }

    // Land on exactly 100.0 regardless of accumulated rounding drift.
    state_tx.send_replace(ProgressState {
        stage_index: stage_count.saturating_sub(1),
        stage_label: stages.last().map(|s| s.label).unwrap_or(""),
        percent_complete: 100.0,
    });

    tokio::time::sleep(trailing_pause).await;
    let _ = done_tx.send(());
}

/// Handle to an active progress run.
///
/// Dropping the handle aborts the run; a dropped or cancelled run never
/// delivers its completion signal.
#[derive(Debug)]
pub struct ProgressRun {
    updates: watch::Receiver<ProgressState>,
    completion: Option<oneshot::Receiver<()>>,
    handle: JoinHandle<()>,
}

impl ProgressRun {
    /// Subscribe to progress updates.
    pub fn progress(&self) -> watch::Receiver<ProgressState> {
        self.updates.clone()
    }

    /// Stop the run: no further ticks are scheduled and completion will
    /// never be signaled.
    pub fn cancel(&mut self) {
        self.handle.abort();
    }

    /// Wait for the run to finish. Returns `true` on natural completion,
    /// `false` if the run was cancelled first.
    pub async fn wait(mut self) -> bool {
        match self.completion.take() {
            Some(completion) => completion.await.is_ok(),
            None => false,
        }
    }
}

impl Drop for ProgressRun {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_reporter() -> ProgressReporter {
        ProgressReporter::with_stages(
            vec![
                StageSpec::new("stage one", 100),
                StageSpec::new("stage two", 100),
            ],
            4,
            Duration::from_millis(50),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn percent_is_monotonic_and_ends_at_exactly_100() {
        let run = ProgressReporter::default().start();
        let mut rx = run.progress();

        let collector = tokio::spawn(async move {
            let mut seen = vec![rx.borrow().percent_complete];
            while rx.changed().await.is_ok() {
                seen.push(rx.borrow().percent_complete);
            }
            seen
        });

        assert!(run.wait().await, "run should complete naturally");

        let seen = collector.await.unwrap();
        for pair in seen.windows(2) {
            assert!(
                pair[1] >= pair[0],
                "percent regressed: {} -> {}",
                pair[0],
                pair[1]
            );
        }
        assert!(seen.iter().all(|p| *p <= 100.0));
        assert_eq!(*seen.last().unwrap(), 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn stages_advance_in_table_order() {
        let run = ProgressReporter::default().start();
        let mut rx = run.progress();

        let collector = tokio::spawn(async move {
            let mut labels = vec![rx.borrow().stage_label];
            while rx.changed().await.is_ok() {
                let label = rx.borrow().stage_label;
                if *labels.last().unwrap() != label {
                    labels.push(label);
                }
            }
            labels
        });

        assert!(run.wait().await);
        let labels = collector.await.unwrap();
        let expected: Vec<&str> = ANALYSIS_STAGES.iter().map(|s| s.label).collect();
        assert_eq!(labels, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_prevents_completion() {
        let mut run = quick_reporter().start();
        let rx = run.progress();

        // Let a few ticks elapse, then tear the run down mid-flight.
        tokio::time::sleep(Duration::from_millis(60)).await;
        run.cancel();
        let at_cancel = rx.borrow().percent_complete;
        assert!(at_cancel < 100.0);

        assert!(!run.wait().await, "cancelled run must not complete");

        // No further ticks fire after cancellation.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(rx.borrow().percent_complete, at_cancel);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_run_aborts_it() {
        let run = quick_reporter().start();
        let rx = run.progress();
        drop(run);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.borrow().percent_complete < 100.0);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_waits_for_trailing_pause() {
        let reporter = ProgressReporter::with_stages(
            vec![StageSpec::new("only", 100)],
            2,
            Duration::from_millis(500),
        );
        let run = reporter.start();
        let rx = run.progress();

        let started = tokio::time::Instant::now();
        assert!(run.wait().await);
        let elapsed = started.elapsed();

        assert_eq!(rx.borrow().percent_complete, 100.0);
        // 100ms of ticks plus the 500ms pause.
        assert!(elapsed >= Duration::from_millis(600), "elapsed: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_takes_the_nominal_total() {
        let started = tokio::time::Instant::now();
        assert!(ProgressReporter::default().start().wait().await);
        let elapsed = started.elapsed();
        // 1500 + 2500 + 2500 + 2000 + 500 trailing.
        assert!(elapsed >= Duration::from_millis(9000), "elapsed: {elapsed:?}");
        assert!(elapsed < Duration::from_millis(9500), "elapsed: {elapsed:?}");
    }
}
