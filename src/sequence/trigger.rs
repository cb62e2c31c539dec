use crate::sequence::clock::Clock;
use crate::sequence::controller::SequenceController;
use crate::sequence::particle::VelocitySource;

/// Starts the sequence when the watched region becomes visible enough.
///
/// May be fed any number of observations; the controller accepts at most one effective start per
/// run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f64,
}

impl VisibilityTrigger {
    pub const DEFAULT_THRESHOLD: f64 = 0.5;

    /// `threshold` is the visible fraction in `[0, 1]` that counts as intersecting.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: clamp_ratio(threshold),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_intersecting(&self, ratio: f64) -> bool {
        let ratio = clamp_ratio(ratio);
        ratio > 0.0 && ratio >= self.threshold
    }

    /// Feed one intersection ratio. Returns `true` when this observation started the sequence.
    pub fn observe<C: Clock, V: VelocitySource>(
        &self,
        ratio: f64,
        controller: &mut SequenceController<C, V>,
    ) -> bool {
        if !self.is_intersecting(ratio) {
            return false;
        }
        let started = controller.start();
        tracing::debug!(ratio, started, "visibility observation");
        started
    }
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

fn clamp_ratio(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/trigger.rs"]
mod tests;
