//! Optional before/after diagnostics around the rounding call.

use crate::config::{trace_from_setting, TRACE_ENV};
use log::{debug, info};
use std::sync::OnceLock;

/// Log target for trace records, so they can be filtered separately (`RUST_LOG=requant::trace=info`).
pub const TRACE_TARGET: &str = "requant::trace";

/// One-shot resolution of the trace flag, same contract as [`crate::config::ModeSelector`].
pub struct Tracer {
    cell: OnceLock<bool>,
}

impl Tracer {
    pub const fn new() -> Self { Self { cell: OnceLock::new() } }

    pub fn enabled(&self) -> bool {
        self.enabled_or_resolve(|| std::env::var_os(TRACE_ENV).map(|v| v.to_string_lossy().into_owned()))
    }

    pub fn enabled_or_resolve<F>(&self, read: F) -> bool
    where
        F: FnOnce() -> Option<String>,
    {
        *self.cell.get_or_init(|| {
            let on = trace_from_setting(read().as_deref());
            debug!("rescale tracing {}", if on { "enabled" } else { "disabled" });
            on
        })
    }
}

impl Default for Tracer {
    fn default() -> Self { Self::new() }
}

static PROCESS_TRACER: Tracer = Tracer::new();

/// The process-wide trace flag, resolved from `TF_SHOW_DATA` on first use.
pub fn process_trace_enabled() -> bool { PROCESS_TRACER.enabled() }

#[cold]
#[inline(never)]
pub(crate) fn before(x: i32, multiplier: i32, shift: i32) {
    info!(target: TRACE_TARGET, "before scaling {{ x={} multiplier={} shift={}", x, multiplier, shift);
}

#[cold]
#[inline(never)]
pub(crate) fn after(x: i32, multiplier: i32, shift: i32, result: i32) {
    info!(target: TRACE_TARGET, "after scaling }} x={} multiplier={} shift={} result={}", x, multiplier, shift, result);
}
