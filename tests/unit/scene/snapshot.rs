use super::*;
use crate::sequence::{ManualClock, SeededVelocities};

#[test]
fn capture_tracks_stage_and_finale_time() {
    let content = ContentSet::default();
    let clock = ManualClock::new();
    let mut ctrl = SequenceController::new(
        clock.clone(),
        SeededVelocities::new(5),
        content.icon_sequence(),
    );
    let mut modal = CardModal::new();

    let idle = SceneSnapshot::capture(&ctrl, &modal, &content);
    assert_eq!(idle.stage, SequenceStage::Idle);
    assert_eq!(idle.sequence_elapsed_ms, None);
    assert_eq!(idle.finale_elapsed_ms, None);
    assert_eq!(idle.previous_stage, None);
    assert_eq!(idle.scroll_y, Section::Tribute.top());
    assert_eq!(idle.clone().scrolled_to(360.0).scroll_y, 360.0);

    clock.set(200);
    ctrl.start();
    clock.set(4700);
    ctrl.poll();
    let finale = SceneSnapshot::capture(&ctrl, &modal, &content);
    assert_eq!(finale.stage, SequenceStage::FinalShow);
    assert_eq!(finale.stage_elapsed_ms, 0);
    assert_eq!(finale.sequence_elapsed_ms, Some(4500));
    assert_eq!(finale.finale_elapsed_ms, Some(0));
    assert_eq!(finale.previous_stage, Some(SequenceStage::Settled));
    assert_eq!(finale.particles.len(), 6);
    assert!(finale.flags.particles_visible);

    clock.set(7000);
    ctrl.poll();
    modal.select(&content, "starve").unwrap();
    let complete = SceneSnapshot::capture(&ctrl, &modal, &content);
    assert_eq!(complete.stage, SequenceStage::Complete);
    assert_eq!(complete.stage_elapsed_ms, 800);
    assert_eq!(complete.finale_elapsed_ms, Some(2300));
    assert_eq!(complete.active_card.unwrap().id, "starve");
}
