use crate::content::IconType;
use crate::foundation::core::Millis;
use crate::sequence::clock::Clock;
use crate::sequence::particle::{Particle, VelocitySource, spawn_particles};
use crate::sequence::stage::{SequenceStage, VisibilityFlags};

/// Delays between scheduled transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequenceTimings {
    /// `chars -> settled`, measured from `start()`.
    pub chars_ms: Millis,
    /// `settled -> finalShow`.
    pub settle_ms: Millis,
    /// `finalShow -> complete`.
    pub final_show_ms: Millis,
    /// `reset()` -> `idle`.
    pub reset_ms: Millis,
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self {
            chars_ms: 4000,
            settle_ms: 500,
            final_show_ms: 1500,
            reset_ms: 800,
        }
    }
}

impl SequenceTimings {
    /// Forward transitions as offsets from `start()`, strictly increasing.
    pub fn schedule(&self) -> [(Millis, Transition); 3] {
        let settled = self.chars_ms;
        let final_show = settled.saturating_add(self.settle_ms);
        let complete = final_show.saturating_add(self.final_show_ms);
        [
            (settled, Transition::Settle),
            (final_show, Transition::FinalShow),
            (complete, Transition::Complete),
        ]
    }

    /// Offset of `complete` from `start()`.
    pub fn total_ms(&self) -> Millis {
        self.schedule()[2].0
    }
}

/// A scheduled stage change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    Settle,
    FinalShow,
    Complete,
    ResetToIdle,
}

impl Transition {
    pub fn target(self) -> SequenceStage {
        match self {
            Self::Settle => SequenceStage::Settled,
            Self::FinalShow => SequenceStage::FinalShow,
            Self::Complete => SequenceStage::Complete,
            Self::ResetToIdle => SequenceStage::Idle,
        }
    }
}

/// Side effects for the presentation layer, drained with
/// [`SequenceController::drain_events`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ControllerEvent {
    StageChanged {
        from: SequenceStage,
        to: SequenceStage,
        at: Millis,
    },
    ParticlesSpawned {
        count: usize,
        at: Millis,
    },
    /// Fire-and-forget request to smooth-scroll the page back to the top.
    ScrollToTop { at: Millis },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    due: Millis,
    transition: Transition,
}

/// One-shot reveal state machine.
///
/// `start()` is accepted only from `idle` with nothing pending, which replaces a separate
/// "already started" latch. Transitions fire when [`poll`](Self::poll) observes their due time;
/// each is stamped with its due time rather than the poll time.
pub struct SequenceController<C, V> {
    clock: C,
    velocities: V,
    icons: Vec<IconType>,
    timings: SequenceTimings,

    stage: SequenceStage,
    previous: Option<SequenceStage>,
    stage_since: Millis,
    started_at: Option<Millis>,
    particles: Vec<Particle>,
    pending: Vec<Pending>,
    events: Vec<ControllerEvent>,
}

impl<C: Clock, V: VelocitySource> SequenceController<C, V> {
    /// `icons` is the card icon list; one particle is spawned per entry.
    pub fn new(clock: C, velocities: V, icons: Vec<IconType>) -> Self {
        let now = clock.now();
        Self {
            clock,
            velocities,
            icons,
            timings: SequenceTimings::default(),
            stage: SequenceStage::Idle,
            previous: None,
            stage_since: now,
            started_at: None,
            particles: Vec::new(),
            pending: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn with_timings(mut self, timings: SequenceTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Begin the reveal. Returns `false` (and changes nothing) unless idle with nothing pending.
    #[tracing::instrument(level = "debug", skip(self), fields(stage = %self.stage))]
    pub fn start(&mut self) -> bool {
        if self.stage != SequenceStage::Idle || !self.pending.is_empty() {
            tracing::debug!(pending = self.pending.len(), "start ignored");
            return false;
        }

        let now = self.clock.now();
        self.started_at = Some(now);
        self.enter(SequenceStage::Chars, now);
        for (offset, transition) in self.timings.schedule() {
            self.schedule(now.saturating_add(offset), transition);
        }
        tracing::info!(at = now, "sequence started");
        true
    }

    /// Request a return to `idle`.
    ///
    /// Emits [`ControllerEvent::ScrollToTop`] now and lands in `idle` after
    /// `timings.reset_ms`. Pending forward transitions are discarded. Returns `false` when a reset
    /// is already pending.
    #[tracing::instrument(level = "debug", skip(self), fields(stage = %self.stage))]
    pub fn reset(&mut self) -> bool {
        if self
            .pending
            .iter()
            .any(|p| p.transition == Transition::ResetToIdle)
        {
            tracing::debug!("reset already pending");
            return false;
        }

        let now = self.clock.now();
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            tracing::warn!(
                dropped,
                stage = %self.stage,
                "reset before completion; discarding pending transitions"
            );
        }
        self.events.push(ControllerEvent::ScrollToTop { at: now });
        self.schedule(
            now.saturating_add(self.timings.reset_ms),
            Transition::ResetToIdle,
        );
        true
    }

    /// Invalidate every pending transition. Returns how many were discarded.
    pub fn cancel(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        if n > 0 {
            tracing::debug!(discarded = n, stage = %self.stage, "pending transitions cancelled");
        }
        n
    }

    /// Apply every transition due at or before the clock's current time, in due order.
    pub fn poll(&mut self) -> Vec<Transition> {
        let now = self.clock.now();
        let due = self.pending.partition_point(|p| p.due <= now);
        let fired: Vec<Pending> = self.pending.drain(..due).collect();

        let mut applied = Vec::with_capacity(fired.len());
        for p in fired {
            if self.apply(p) {
                applied.push(p.transition);
            }
        }
        applied
    }

    fn apply(&mut self, p: Pending) -> bool {
        let target = p.transition.target();
        if p.transition == Transition::ResetToIdle && self.stage == SequenceStage::Idle {
            self.particles.clear();
            self.started_at = None;
            return true;
        }
        if !self.stage.can_transition_to(target) {
            tracing::warn!(from = %self.stage, to = %target, "illegal transition skipped");
            return false;
        }

        match p.transition {
            Transition::Settle | Transition::Complete => self.enter(target, p.due),
            Transition::FinalShow => {
                self.enter(target, p.due);
                self.particles = spawn_particles(&self.icons, &mut self.velocities);
                tracing::debug!(count = self.particles.len(), "particles spawned");
                self.events.push(ControllerEvent::ParticlesSpawned {
                    count: self.particles.len(),
                    at: p.due,
                });
            }
            Transition::ResetToIdle => {
                self.enter(target, p.due);
                self.particles.clear();
                self.started_at = None;
                tracing::info!(at = p.due, "sequence re-armed");
            }
        }
        true
    }

    fn enter(&mut self, to: SequenceStage, at: Millis) {
        let from = self.stage;
        self.previous = Some(from);
        self.stage = to;
        self.stage_since = at;
        tracing::debug!(%from, %to, at, "stage changed");
        self.events
            .push(ControllerEvent::StageChanged { from, to, at });
    }

    fn schedule(&mut self, due: Millis, transition: Transition) {
        let at = self.pending.partition_point(|p| p.due <= due);
        self.pending.insert(at, Pending { due, transition });
    }

    pub fn stage(&self) -> SequenceStage {
        self.stage
    }

    /// Stage left by the most recent change, `None` before the first one.
    pub fn previous_stage(&self) -> Option<SequenceStage> {
        self.previous
    }

    pub fn flags(&self) -> VisibilityFlags {
        self.stage.flags()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Clock time at which the current stage was entered.
    pub fn stage_since(&self) -> Millis {
        self.stage_since
    }

    /// Clock time of the effective `start()`, `None` while idle.
    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    pub fn elapsed_in_stage(&self) -> Millis {
        self.clock.now().saturating_sub(self.stage_since)
    }

    /// Pending transitions as `(due, transition)`, in due order.
    pub fn pending_schedule(&self) -> Vec<(Millis, Transition)> {
        self.pending.iter().map(|p| (p.due, p.transition)).collect()
    }

    /// Earliest pending due time.
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.first().map(|p| p.due)
    }

    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timings(&self) -> &SequenceTimings {
        &self.timings
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/controller.rs"]
mod tests;
