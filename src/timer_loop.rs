use crossbeam_channel::{RecvTimeoutError, Sender};

use crate::errors::QuiesceError;
use std::time::{Duration, Instant};

pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

pub(crate) enum TimerCmd {
    Arm(Task),
    Cancel,
}

/// Owns the single pending scheduled execution of a debouncer.
///
/// TimerLoop runs on a separate thread and holds at most one `(deadline, task)`
/// pair. An `Arm` command replaces the pending pair in one step, so superseding
/// never leaves a window with two live timers. A `Cancel` command clears it and
/// is safe to send when nothing is pending or the task has already fired.
/// When the deadline passes with no command arriving, the task runs on this
/// thread, exactly once.
pub(crate) struct TimerLoop {
    cmd_tx: Sender<TimerCmd>,
}

impl Clone for TimerLoop {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
        }
    }
}

impl TimerLoop {
    pub(crate) fn run(delay: Duration) -> Result<Self, QuiesceError> {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<TimerCmd>();

        std::thread::Builder::new()
            .name("quiesce-timer".to_string())
            .spawn(move || {
                let mut pending: Option<(Instant, Task)> = None;
                loop {
                    let received = match &pending {
                        Some((deadline, _)) => {
                            let wait = deadline.saturating_duration_since(Instant::now());
                            match cmd_rx.recv_timeout(wait) {
                                Ok(cmd) => Some(cmd),
                                Err(RecvTimeoutError::Timeout) => None,
                                Err(RecvTimeoutError::Disconnected) => break,
                            }
                        }
                        None => match cmd_rx.recv() {
                            Ok(cmd) => Some(cmd),
                            Err(_) => break,
                        },
                    };

                    match received {
                        Some(TimerCmd::Arm(task)) => {
                            log::trace!("timer armed [{:?}]", delay);
                            pending = Some((Instant::now() + delay, task));
                        }
                        Some(TimerCmd::Cancel) => {
                            if pending.take().is_some() {
                                log::trace!("pending timer cancelled");
                            }
                        }
                        None => {
                            // Deadline reached with no superseding command.
                            if let Some((_, task)) = pending.take() {
                                log::trace!("timer fired [{:?}]", delay);
                                task();
                            }
                        }
                    }
                }
                // All handles dropped: abandon whatever was pending, unfired.
                log::trace!("timer loop exiting");
            })?;

        Ok(Self { cmd_tx })
    }

    /// Schedules `task` to run after the configured delay, replacing any
    /// pending one.
    pub(crate) fn arm(&self, task: Task) {
        let _ = self.cmd_tx.send(TimerCmd::Arm(task));
    }

    /// Clears the pending task, if any. A no-op on an idle or already-fired
    /// timer.
    pub(crate) fn cancel(&self) {
        let _ = self.cmd_tx.send(TimerCmd::Cancel);
    }
}
