/// Receives lifecycle notifications while a trainer runs.
///
/// Implementations must tolerate being driven for several labels in a row
/// (one `start`/`end` bracket per epoch).
pub trait ProgressIndicator {
    /// A phase with `total_steps` steps is beginning.
    fn start(&mut self, label: &str, total_steps: usize);

    /// Step `step` (zero-based) has been processed.
    fn processed(&mut self, step: usize);

    /// The current phase is complete.
    fn end(&mut self);
}

/// Progress indicator that ignores every notification. The accepted
/// default wherever a [`ProgressIndicator`] is required.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressIndicator for NoopProgress {
    fn start(&mut self, _label: &str, _total_steps: usize) {}
    fn processed(&mut self, _step: usize) {}
    fn end(&mut self) {}
}

/// Progress indicator that reports through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress {
    label: String,
    total_steps: usize,
}

impl ProgressIndicator for LogProgress {
    fn start(&mut self, label: &str, total_steps: usize) {
        self.label = label.to_string();
        self.total_steps = total_steps;
        log::info!("{}: started ({} steps)", self.label, total_steps);
    }

    fn processed(&mut self, step: usize) {
        log::trace!("{}: {}/{}", self.label, step + 1, self.total_steps);
    }

    fn end(&mut self) {
        log::info!("{}: finished", self.label);
    }
}
