use super::*;

#[test]
fn select_toggles_and_replaces() {
    let content = ContentSet::default();
    let mut modal = CardModal::new();
    assert!(!modal.is_open());

    assert_eq!(modal.select(&content, "chess").unwrap(), Some("chess"));
    assert_eq!(modal.active(&content).unwrap().title, "象棋");

    assert_eq!(modal.select(&content, "running").unwrap(), Some("running"));
    assert_eq!(modal.active_id(), Some("running"));

    assert_eq!(modal.select(&content, "running").unwrap(), None);
    assert!(!modal.is_open());
}

#[test]
fn dismiss_closes_and_unknown_is_rejected() {
    let content = ContentSet::default();
    let mut modal = CardModal::new();
    modal.select(&content, "career").unwrap();
    modal.dismiss();
    assert!(modal.active(&content).is_none());

    assert!(modal.select(&content, "nope").is_err());
    assert!(!modal.is_open());
}
