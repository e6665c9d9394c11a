//! `tracing` integration.
//!
//! The crate only emits `trace!` events; install a subscriber in the host
//! application and filter on the targets below to see them.

/// Target names for log filtering.
pub mod targets {
    /// Binding, copy, move and erase of views.
    pub const VIEW: &str = "colview::view";
    /// Visit, sort and mutate fan-out.
    pub const DISPATCH: &str = "colview::dispatch";
}
