use std::time::Instant;

/// Emits a pair of tracing events around a scope, the closing one carries
/// the elapsed time.
pub struct ScopedTimer<'a> {
    process: &'a str,
    method: &'static str,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(process: &'a str, method: &'static str) -> Self {
        tracing::debug!(
            action = "measure",
            process = process,
            method = method,
            event = "start"
        );
        Self {
            process,
            method,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        tracing::debug!(
            action = "measure",
            method = self.method,
            process = self.process,
            event = "end",
            elapsed_us = self.start.elapsed().as_micros() as u64
        );
    }
}

macro_rules! trace_time {
    ($process:tt, $method:tt, $block:expr) => {{
        let _timer = $crate::internal::common::trace::ScopedTimer::new($process, $method);
        $block
    }};
}
