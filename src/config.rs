/// Upper bound on consecutive delay-path submissions before the next one
/// is released inline instead of being rescheduled.
///
/// `Limit(0)` releases every submission immediately. `Disabled` falls back
/// to pure delay-based debouncing. A negative integer converts to
/// `Disabled`, so callers holding a signed count can pass it straight
/// through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepsLimit {
    Disabled,
    Limit(u64),
}

impl From<u64> for RepsLimit {
    fn from(reps: u64) -> Self {
        RepsLimit::Limit(reps)
    }
}

impl From<i64> for RepsLimit {
    fn from(reps: i64) -> Self {
        if reps < 0 {
            RepsLimit::Disabled
        } else {
            RepsLimit::Limit(reps as u64)
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct QuiesceConfig {
    max_reps: RepsLimit,
}

impl Default for QuiesceConfig {
    fn default() -> Self {
        Self {
            max_reps: RepsLimit::Disabled,
        }
    }
}
impl QuiesceConfig {
    pub fn new() -> Self {
        let config = Self::default();
        config
    }
    pub fn get_max_reps(&self) -> RepsLimit {
        self.max_reps
    }
    pub fn max_reps(mut self, reps: impl Into<RepsLimit>) -> Self {
        self.max_reps = reps.into();
        self
    }
}

#[cfg(test)]
mod config_test {
    use super::RepsLimit;

    #[test]
    fn negative_reps_disable_the_limit() {
        assert_eq!(RepsLimit::from(-1i64), RepsLimit::Disabled);
        assert_eq!(RepsLimit::from(0i64), RepsLimit::Limit(0));
        assert_eq!(RepsLimit::from(4u64), RepsLimit::Limit(4));
    }
}
