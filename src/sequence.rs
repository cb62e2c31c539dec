//! The reveal sequence: a one-shot, timer-driven state machine.
//!
//! [`SequenceController`] owns the stage and the finale particles. Forward transitions are
//! scheduled as `(offset, transition)` pairs against a [`Clock`] at `start()` time and applied by
//! [`SequenceController::poll`], so a [`ManualClock`] drives the whole sequence deterministically.

pub mod clock;
pub mod controller;
pub mod particle;
pub mod stage;
pub mod trigger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{ControllerEvent, SequenceController, SequenceTimings, Transition};
pub use particle::{FixedVelocities, Particle, SeededVelocities, VelocitySource, spawn_particles};
pub use stage::{SequenceStage, VisibilityFlags};
pub use trigger::VisibilityTrigger;
