pub use main_type::{Debouncer, DebouncerBuilder};

mod main_type {
    use std::{sync::Arc, time::Duration};

    use parking_lot::Mutex;

    use crate::{
        config::{QuiesceConfig, RepsLimit},
        errors::QuiesceError,
        timer_loop::TimerLoop,
    };

    use super::rep_count::RepCount;

    pub struct DebouncerBuilder {
        delay: Option<Duration>,
        config: QuiesceConfig,
    }
    impl DebouncerBuilder {
        /// Sets the quiet period to wait for before a submitted action runs.
        /// Required. A zero delay is legal and fires on the next timer turn.
        pub fn set_delay(&mut self, delay: Duration) -> &mut Self {
            self.delay = Some(delay);
            self
        }
        /// Overrides the reps threshold carried by the configuration.
        pub fn set_max_reps(&mut self, reps: impl Into<RepsLimit>) -> &mut Self {
            self.config = self.config.max_reps(reps);
            self
        }
        pub fn build(&mut self) -> Result<Debouncer, QuiesceError> {
            if let Some(delay) = self.delay.take() {
                let timer = TimerLoop::run(delay)?;

                Ok(Debouncer {
                    count: Arc::new(Mutex::new(RepCount::new())),
                    timer,
                    delay,
                    max_reps: self.config.get_max_reps(),
                })
            } else {
                Err(QuiesceError::BuildErrorNoDelaySet)
            }
        }
    }

    pub struct Debouncer {
        count: Arc<Mutex<RepCount>>,
        timer: TimerLoop,
        delay: Duration,
        max_reps: RepsLimit,
    }
    impl Clone for Debouncer {
        fn clone(&self) -> Self {
            Self {
                count: self.count.clone(),
                timer: self.timer.clone(),
                delay: self.delay,
                max_reps: self.max_reps,
            }
        }
    }

    impl Debouncer {
        ///
        ///
        /// Creates a new [`DebouncerBuilder`] to configure and build a [`Debouncer`].
        ///
        /// A debouncer coalesces a burst of [`submit`](Debouncer::submit) calls into a
        /// single execution: the most recently submitted action runs once the calls stop
        /// for the configured delay, or inline once the configured reps threshold is
        /// reached, whichever comes first.
        ///
        /// Clones share the same state, so one debouncer can be handed to several
        /// threads. Dropping the last clone stops the timer thread and abandons any
        /// pending action.
        ///
        /// ### Example
        /// ```rust
        /// use quiesce::{Debouncer, QuiesceConfig};
        /// use std::time::Duration;
        ///
        /// let debouncer = Debouncer::new(QuiesceConfig::default())
        ///     .set_delay(Duration::from_millis(50))
        ///     .build()
        ///     .unwrap();
        ///
        /// debouncer.submit(|| println!("traffic settled"));
        /// ```

        pub fn new(config: QuiesceConfig) -> DebouncerBuilder {
            DebouncerBuilder {
                delay: None,
                config,
            }
        }
        ////// Requests that `action` eventually runs, superseding any action still
        /// waiting on the timer.
        ///
        /// Consecutive submissions are counted. While the count stays below the reps
        /// threshold, the timer is rearmed for the full delay and the previous pending
        /// action will never run. When the count reaches the threshold, `action` runs
        /// inline on the calling thread before `submit` returns, and the count restarts
        /// at zero. With [`RepsLimit::Disabled`](crate::RepsLimit) only the timer can
        /// release an action.
        ///
        /// A timer release happens on the debouncer's own thread and leaves the count
        /// untouched. Panics from `action` are not caught: an inline release unwinds
        /// the caller, a timer release unwinds the timer thread and ends delayed
        /// delivery for this instance.
        ///
        /// ### Example
        /// ```rust
        /// use quiesce::{Debouncer, QuiesceConfig};
        /// use std::time::Duration;
        ///
        /// let debouncer = Debouncer::new(QuiesceConfig::new().max_reps(2u64))
        ///     .set_delay(Duration::from_secs(60))
        ///     .build()
        ///     .unwrap();
        ///
        /// debouncer.submit(|| println!("first"));
        /// debouncer.submit(|| println!("second"));
        /// // Third consecutive submission: released inline, no 60s wait.
        /// debouncer.submit(|| println!("third"));
        /// ```

        pub fn submit<F>(&self, action: F)
        where
            F: FnOnce() + Send + 'static,
        {
            let mut count = self.count.lock();

            match self.max_reps {
                RepsLimit::Limit(reps) if count.value() == reps => {
                    self.timer.cancel();
                    log::trace!("rep threshold [{}] reached, releasing inline", reps);
                    action();
                    count.reset();
                }
                _ => {
                    count.bump();
                    self.timer.arm(Box::new(action));
                }
            }
        }

        pub fn delay(&self) -> Duration {
            self.delay
        }
        pub fn max_reps(&self) -> RepsLimit {
            self.max_reps
        }
    }
}

mod rep_count {
    /// Consecutive submissions since the last inline release.
    ///
    /// Only an inline release resets it; a timer release leaves it where it is.
    pub(super) struct RepCount {
        count: u64,
    }

    impl RepCount {
        pub fn new() -> Self {
            Self { count: 0 }
        }
        pub fn value(&self) -> u64 {
            self.count
        }
        pub fn bump(&mut self) {
            self.count += 1;
        }
        pub fn reset(&mut self) {
            self.count = 0;
        }
    }
}
