use super::*;
use crate::content::ContentSet;
use crate::sequence::clock::ManualClock;
use crate::sequence::particle::SeededVelocities;
use crate::sequence::stage::SequenceStage;

fn controller(clock: &ManualClock) -> SequenceController<ManualClock, SeededVelocities> {
    SequenceController::new(
        clock.clone(),
        SeededVelocities::new(3),
        ContentSet::default().icon_sequence(),
    )
}

#[test]
fn below_threshold_never_starts() {
    let clock = ManualClock::new();
    let mut ctrl = controller(&clock);
    let trigger = VisibilityTrigger::default();
    for ratio in [0.0, 0.1, 0.49, f64::NAN, -3.0] {
        assert!(!trigger.observe(ratio, &mut ctrl));
    }
    assert_eq!(ctrl.stage(), SequenceStage::Idle);
}

#[test]
fn flaky_signal_starts_once() {
    let clock = ManualClock::new();
    let mut ctrl = controller(&clock);
    let trigger = VisibilityTrigger::default();

    assert!(trigger.observe(0.5, &mut ctrl));
    let schedule = ctrl.pending_schedule();
    clock.advance(300);
    assert!(!trigger.observe(0.9, &mut ctrl));
    assert!(!trigger.observe(1.0, &mut ctrl));
    assert_eq!(ctrl.pending_schedule(), schedule);
    assert_eq!(ctrl.started_at(), Some(0));
}

#[test]
fn rearmed_after_reset() {
    let clock = ManualClock::new();
    let mut ctrl = controller(&clock);
    let trigger = VisibilityTrigger::default();
    trigger.observe(1.0, &mut ctrl);
    clock.set(6000);
    ctrl.poll();
    ctrl.reset();
    clock.set(6800);
    ctrl.poll();
    assert!(trigger.observe(0.75, &mut ctrl));
    assert_eq!(ctrl.started_at(), Some(6800));
}

#[test]
fn threshold_is_clamped() {
    assert_eq!(VisibilityTrigger::new(7.0).threshold(), 1.0);
    assert!(!VisibilityTrigger::new(0.0).is_intersecting(0.0));
    assert!(VisibilityTrigger::new(0.0).is_intersecting(0.01));
}
