/// Tunables for the scheduling and accounting core.
///
/// The core itself performs no file or environment loading; the embedding
/// process constructs one of these and hands it to [`Marketplace`].
///
/// [`Marketplace`]: crate::market::Marketplace
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// How long after its last check-in a worker still counts as active.
    pub activity_window_secs: i64,
    /// Scale factor applied when reporting aggregate queued work
    /// (e.g. raw pixel-steps reported as megapixel-steps).
    pub thing_divisor: f64,
    /// When false, the anonymous account is treated as nonexistent by
    /// ledger resolution instead of getting anonymous-specific denials.
    pub allow_anonymous: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            activity_window_secs: 300,
            thing_divisor: 1.0,
            allow_anonymous: true,
        }
    }
}

impl CoreConfig {
    pub fn with_activity_window(mut self, secs: i64) -> Self {
        self.activity_window_secs = secs;
        self
    }

    pub fn with_thing_divisor(mut self, divisor: f64) -> Self {
        self.thing_divisor = divisor;
        self
    }

    pub fn with_allow_anonymous(mut self, allow: bool) -> Self {
        self.allow_anonymous = allow;
        self
    }

    /// The activity window as a chrono duration, for timestamp arithmetic.
    pub fn activity_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.activity_window_secs)
    }
}
