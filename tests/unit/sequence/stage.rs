use super::*;

#[test]
fn forward_path_is_linear() {
    let mut path = vec![SequenceStage::Idle];
    while let Some(next) = path.last().and_then(|s| s.next()) {
        path.push(next);
    }
    assert_eq!(path, SequenceStage::ALL.to_vec());
}

#[test]
fn transition_table() {
    use SequenceStage::*;
    assert!(Idle.can_transition_to(Chars));
    assert!(Chars.can_transition_to(Settled));
    assert!(Settled.can_transition_to(FinalShow));
    assert!(FinalShow.can_transition_to(Complete));
    assert!(Complete.can_transition_to(Idle));
    assert!(Chars.can_transition_to(Idle));

    assert!(!Idle.can_transition_to(Idle));
    assert!(!Idle.can_transition_to(Settled));
    assert!(!Complete.can_transition_to(Chars));
    assert!(!Settled.can_transition_to(Chars));
}

#[test]
fn main_content_hidden_iff_finale() {
    for stage in SequenceStage::ALL {
        let flags = stage.flags();
        let finale = stage == SequenceStage::FinalShow || stage == SequenceStage::Complete;
        assert_eq!(flags.main_content_hidden, finale, "{stage}");
        assert_eq!(flags.finale_overlay_visible, finale, "{stage}");
        assert_eq!(flags.character_row_visible, stage != SequenceStage::Idle);
        assert_eq!(flags.finale_text_settled, stage == SequenceStage::Complete);
        assert_eq!(stage.holds_particles(), finale);
    }
}

#[test]
fn serializes_camel_case() {
    assert_eq!(
        serde_json::to_value(SequenceStage::FinalShow).unwrap(),
        serde_json::json!("finalShow")
    );
    let flags = serde_json::to_value(SequenceStage::Chars.flags()).unwrap();
    assert_eq!(flags["characterRowVisible"], serde_json::json!(true));
    assert_eq!(flags["mainContentHidden"], serde_json::json!(false));
}
