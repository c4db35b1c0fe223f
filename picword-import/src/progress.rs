//! Hooks for showing where a category build is.

/// Receives updates while a category is built.
///
/// Phases run in a fixed order (scan, normalize, merge, prepare images,
/// number, install, write). Only the image phases report per entry.
pub trait ImportProgress {
    /// A new phase has begun; `message` names it for display.
    fn on_phase(&self, message: &str);

    /// `current` of `total` entries in the running phase are done; `label`
    /// is the key or file name just handled.
    fn on_entry(&self, current: usize, total: usize, label: &str);

    /// The build finished (or stopped after planning, for a dry run).
    fn on_complete(&self, message: &str);
}

/// Ignores every update. Used by tests and library callers without a UI.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_entry(&self, _current: usize, _total: usize, _label: &str) {}
    fn on_complete(&self, _message: &str) {}
}
