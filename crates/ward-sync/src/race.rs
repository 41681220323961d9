//! Balanced increment/decrement runs.
//!
//! Workers are scoped, named OS threads. They block on a start gate (a
//! zero-capacity channel that is never sent on) and all begin when the
//! gate's sender is dropped. Each worker sends a completion report over a
//! crossbeam channel when it finishes; the runner joins every worker
//! before reading the counter.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use crate::config::{CounterConfig, CounterStrategy};
use crate::counter::{AtomicCounter, MutexCounter, SharedCounter};
use crate::error::SyncError;

/// What a worker thread does to the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Adds one per iteration.
    Incrementer,
    /// Subtracts one per iteration.
    Decrementer,
}

impl Role {
    fn delta(self) -> i64 {
        match self {
            Self::Incrementer => 1,
            Self::Decrementer => -1,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incrementer => write!(f, "incrementer"),
            Self::Decrementer => write!(f, "decrementer"),
        }
    }
}

/// Outcome of a balanced run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceReport {
    /// Counter value read after every worker was joined.
    pub final_value: i64,
    /// Increments applied across all incrementer workers.
    pub increments: u64,
    /// Decrements applied across all decrementer workers.
    pub decrements: u64,
    /// Strategy named by the run's config.
    pub strategy: CounterStrategy,
    /// Time from opening the start gate to the last join.
    pub elapsed: Duration,
}

impl RaceReport {
    /// Whether as many increments as decrements were applied.
    pub fn is_balanced(&self) -> bool {
        self.increments == self.decrements
    }
}

/// Sent by a worker once all of its adjustments are applied.
#[derive(Debug)]
struct TaskReport {
    role: Role,
    applied: u64,
}

/// Run `config.pairs` incrementers and as many decrementers against a
/// fresh counter of the configured strategy.
///
/// With equal iteration counts the final value is always 0.
///
/// # Errors
///
/// See [`run_balanced_with`].
pub fn run_balanced(config: &CounterConfig) -> Result<RaceReport, SyncError> {
    match config.strategy {
        CounterStrategy::Atomic => run_balanced_with(&AtomicCounter::default(), config),
        CounterStrategy::Mutex => run_balanced_with(&MutexCounter::default(), config),
    }
}

/// Run a balanced race against a caller-supplied counter.
///
/// [`RaceReport::final_value`] is the counter's value after the run, so a
/// counter starting at `k` ends at `k`.
///
/// # Errors
///
/// - [`SyncError::Config`] if the config fails validation. No thread is
///   spawned.
/// - [`SyncError::ThreadSpawnFailed`] if a worker cannot be spawned. Workers
///   already spawned are released without touching the counter and joined.
/// - [`SyncError::WorkerPanicked`] if a worker panics. The first panicked
///   worker in spawn order is reported.
pub fn run_balanced_with<C: SharedCounter>(
    counter: &C,
    config: &CounterConfig,
) -> Result<RaceReport, SyncError> {
    config.validate()?;

    let (gate_tx, gate_rx) = crossbeam_channel::bounded::<()>(0);
    let (report_tx, report_rx) = crossbeam_channel::unbounded::<TaskReport>();
    let abort = AtomicBool::new(false);
    let iterations = config.iterations;

    let elapsed = thread::scope(|s| {
        let mut handles = Vec::with_capacity(config.pairs.saturating_mul(2));
        let mut spawn_error = None;

        'spawn: for pair in 0..config.pairs {
            for role in [Role::Incrementer, Role::Decrementer] {
                let gate = gate_rx.clone();
                let reports = report_tx.clone();
                let abort = &abort;
                let spawned = thread::Builder::new()
                    .name(format!("ward-{role}-{pair}"))
                    .spawn_scoped(s, move || {
                        worker(counter, role, iterations, &gate, abort, &reports)
                    });
                match spawned {
                    Ok(handle) => handles.push((role, handle)),
                    Err(e) => {
                        spawn_error = Some(SyncError::ThreadSpawnFailed {
                            reason: e.to_string(),
                        });
                        break 'spawn;
                    }
                }
            }
        }
        debug!(workers = handles.len(), iterations, "workers spawned");

        if spawn_error.is_some() {
            abort.store(true, Ordering::Release);
        }
        let started = Instant::now();
        drop(gate_tx);

        let mut panicked = None;
        for (role, handle) in handles {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(SyncError::WorkerPanicked { role });
            }
        }
        let elapsed = started.elapsed();

        match spawn_error.or(panicked) {
            Some(e) => Err(e),
            None => Ok(elapsed),
        }
    })?;

    // Every worker has been joined, so every report is already queued.
    let mut increments = 0u64;
    let mut decrements = 0u64;
    for report in report_rx.try_iter() {
        match report.role {
            Role::Incrementer => increments = increments.saturating_add(report.applied),
            Role::Decrementer => decrements = decrements.saturating_add(report.applied),
        }
    }

    let report = RaceReport {
        final_value: counter.value(),
        increments,
        decrements,
        strategy: config.strategy,
        elapsed,
    };
    info!(
        final_value = report.final_value,
        increments,
        decrements,
        strategy = %report.strategy,
        elapsed_us = report.elapsed.as_micros() as u64,
        "balanced run complete"
    );
    Ok(report)
}

fn worker<C: SharedCounter>(
    counter: &C,
    role: Role,
    iterations: u64,
    gate: &Receiver<()>,
    abort: &AtomicBool,
    reports: &Sender<TaskReport>,
) {
    // Nothing is ever sent on the gate; disconnection is the start signal.
    let _ = gate.recv();
    if abort.load(Ordering::Acquire) {
        return;
    }
    let delta = role.delta();
    for _ in 0..iterations {
        counter.adjust(delta);
    }
    // The receiver outlives the scope, so this cannot fail.
    let _ = reports.send(TaskReport {
        role,
        applied: iterations,
    });
}
