/// Wall-clock milliseconds (Date.now() in the browser)
#[inline]
fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::sync::OnceLock;
        use std::time::Instant;
        static ORIGIN: OnceLock<Instant> = OnceLock::new();
        ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
    }
}

/// Tick stopwatch: total time since `start` plus per-phase laps
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    start_ms: f64,
    lap_ms: f64,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        let now = now_ms();
        PerfTimer { start_ms: now, lap_ms: now }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        now_ms() - self.start_ms
    }

    /// Milliseconds since the previous lap (or start); restarts the lap.
    pub(crate) fn lap(&mut self) -> f64 {
        let now = now_ms();
        let dt = now - self.lap_ms;
        self.lap_ms = now;
        dt
    }
}
