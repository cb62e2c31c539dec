use super::*;
use crate::content::modal::CardModal;
use crate::sequence::{ManualClock, SeededVelocities, SequenceController};

fn snapshot_at(ms: Millis, select: Option<&str>) -> (SceneSnapshot, ContentSet) {
    let content = ContentSet::default();
    let clock = ManualClock::new();
    let mut ctrl = SequenceController::new(
        clock.clone(),
        SeededVelocities::new(11),
        content.icon_sequence(),
    );
    let mut modal = CardModal::new();
    if let Some(id) = select {
        modal.select(&content, id).unwrap();
    }
    if ms > 0 {
        ctrl.start();
        clock.set(ms);
        ctrl.poll();
    }
    (SceneSnapshot::capture(&ctrl, &modal, &content), content)
}

fn parse(svg: &str) -> usvg::Tree {
    usvg::Tree::from_str(svg, &usvg::Options::default()).expect("scene svg parses")
}

#[test]
fn idle_scene_parses_and_blooms() {
    let (mut snap, content) = snapshot_at(0, None);
    snap.stage_elapsed_ms = 1500;
    let svg = build_scene_svg(&snap, &content, Canvas::new(640, 360).unwrap());
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="640" height="360""#));
    assert!(svg.contains("<line "));
    assert!(!svg.contains(HEART_PATH));
    parse(&svg);
}

#[test]
fn final_show_draws_one_group_per_particle() {
    let (snap, content) = snapshot_at(4500 + 300, None);
    assert_eq!(snap.stage, SequenceStage::FinalShow);
    let svg = build_scene_svg(&snap, &content, Canvas::default());
    assert!(!svg.contains(HEART_PATH), "heart reveal starts one second in");
    assert_eq!(svg.matches(r#"scale(0.4)">"#).count(), 6);
    parse(&svg);
}

#[test]
fn complete_scene_shows_finale_text_without_particles() {
    let (snap, content) = snapshot_at(6000 + 500, None);
    assert_eq!(snap.stage, SequenceStage::Complete);
    let svg = build_scene_svg(&snap, &content, Canvas::default());
    assert!(svg.contains(FINALE_TITLE));
    assert!(svg.contains(HEART_PATH));
    assert!(!svg.contains("<line "));
    assert!(!svg.contains(MESSAGE_LINES[0]));
    parse(&svg);
}

#[test]
fn modal_renders_escaped_card_copy() {
    let (mut snap, content) = snapshot_at(0, Some("dragon"));
    if let Some(card) = snap.active_card.as_mut() {
        card.title = "<龙族 & co>".to_owned();
    }
    let svg = build_scene_svg(&snap, &content, Canvas::default());
    assert!(svg.contains("&lt;龙族 &amp; co&gt;"));
    assert!(svg.contains("CLOSE VIEW"));
    parse(&svg);
}

#[test]
fn main_content_fades_over_one_second() {
    let (snap, _) = snapshot_at(4000, None);
    assert_eq!(main_content_fade(&snap), 0.0);
    let (snap, _) = snapshot_at(5000, None);
    assert!((main_content_fade(&snap) - 0.5).abs() < 1e-9);
    let (snap, _) = snapshot_at(7000, None);
    assert_eq!(main_content_fade(&snap), 1.0);
}

#[test]
fn idle_bloom_restarts_with_the_stage() {
    let (mut snap, content) = snapshot_at(0, None);
    let canvas = Canvas::default();
    snap.now = 50_000;
    snap.stage_elapsed_ms = 0;
    assert!(!build_scene_svg(&snap, &content, canvas).contains("<line "));
    snap.stage_elapsed_ms = 1500;
    assert!(build_scene_svg(&snap, &content, canvas).contains("<line "));
}

#[test]
fn main_content_fades_back_in_after_a_reset() {
    let (mut snap, _) = snapshot_at(0, None);
    assert_eq!(main_content_fade(&snap), 0.0);

    snap.previous_stage = Some(SequenceStage::Complete);
    snap.stage_elapsed_ms = 0;
    assert_eq!(main_content_fade(&snap), 1.0);
    snap.stage_elapsed_ms = 250;
    assert!((main_content_fade(&snap) - 0.75).abs() < 1e-9);
    snap.stage_elapsed_ms = 1000;
    assert_eq!(main_content_fade(&snap), 0.0);

    snap.previous_stage = Some(SequenceStage::Chars);
    snap.stage_elapsed_ms = 0;
    assert_eq!(main_content_fade(&snap), 0.0, "content was never hidden");
}

#[test]
fn opening_section_greets_and_prompts() {
    let (snap, content) = snapshot_at(0, None);
    let mut snap = snap.scrolled_to(Section::Opening.top());
    snap.now = 2000;
    let svg = build_scene_svg(&snap, &content, Canvas::default());
    assert!(svg.contains(r#"<g id="opening""#));
    assert!(svg.contains(OPENING_TITLE));
    assert!(svg.contains(OPENING_SUBTITLE));
    assert!(svg.contains(SCROLL_PROMPT));
    assert!(svg.contains(r#"fill="url(#chess)""#));
    assert!(!svg.contains(r#"<g id="cards""#));
    assert!(!svg.contains(MESSAGE_LINES[0]));
    parse(&svg);
}

#[test]
fn opening_hero_fades_in_on_load() {
    let (snap, content) = snapshot_at(0, None);
    let snap = snap.scrolled_to(0.0);
    let svg = build_scene_svg(&snap, &content, Canvas::default());
    let title = format!(r#"fill-opacity="0">{OPENING_TITLE}<"#);
    assert!(svg.contains(&title), "title waits for its delay");

    let mut later = snap.clone();
    later.now = 1800;
    let svg = build_scene_svg(&later, &content, Canvas::default());
    assert!(svg.contains(&format!(r#"fill-opacity="1">{OPENING_TITLE}<"#)));
}

#[test]
fn card_grid_draws_every_card() {
    let (snap, content) = snapshot_at(0, None);
    let snap = snap.scrolled_to(Section::Cards.top());
    let svg = build_scene_svg(&snap, &content, Canvas::default());
    assert!(svg.contains(r#"<g id="cards""#));
    assert_eq!(svg.matches(EXPLORE).count(), content.cards.len());
    for card in &content.cards {
        let bar = format!(r#"fill="{}" fill-opacity="0.6""#, card.accent.to_svg_paint());
        assert!(svg.contains(&bar), "accent bar for {}", card.id);
    }
    assert!(svg.contains(r#"<g opacity="1" transform="translate(640 360) scale(1)"#));
    assert!(!svg.contains(OPENING_TITLE));
    parse(&svg);
}

#[test]
fn open_modal_dims_the_card_grid() {
    let (snap, content) = snapshot_at(0, Some("chess"));
    let snap = snap.scrolled_to(Section::Cards.top());
    let svg = build_scene_svg(&snap, &content, Canvas::default());
    assert!(svg.contains(r#"<g opacity="0.3" transform="translate(640 360) scale(0.95)"#));
    assert!(svg.contains("CLOSE VIEW"));
    parse(&svg);
}

#[test]
fn viewport_between_sections_draws_both() {
    let (snap, content) = snapshot_at(0, None);
    let snap = snap.scrolled_to(1000.0);
    let svg = build_scene_svg(&snap, &content, Canvas::default());
    assert!(svg.contains(r#"<g transform="translate(0 -1000)">"#));
    assert!(svg.contains(r#"<g id="cards""#));
    assert!(svg.contains(r#"<g id="tribute""#));
    assert!(!svg.contains(r#"<g id="opening""#));
}

#[test]
fn grid_columns_follow_the_breakpoints() {
    assert_eq!(grid_columns(1280.0), 6);
    assert_eq!(grid_columns(1100.0), 3);
    assert_eq!(grid_columns(800.0), 2);
    assert_eq!(grid_columns(500.0), 1);
}

#[test]
fn character_entries_follow_keyframes() {
    let start = character_entry(Character::Dragon, 0.0);
    assert_eq!((start.dx, start.dy, start.opacity), (15.0, 15.0, 0.0));
    let mid = character_entry(Character::Starve, 0.5);
    assert_eq!((mid.dx, mid.opacity), (5.0, 1.0));
    let end = character_entry(Character::Ball, 1.0);
    assert_eq!(end.rotate_deg, 30.0);
}

#[test]
fn helpers() {
    assert_eq!(wrap_chars("abcdefg", 3), vec!["abc", "def", "g"]);
    assert!(wrap_chars("", 3).is_empty());
    assert_eq!(escape_xml(r#"a<b>"c"&'d'"#), "a&lt;b&gt;&quot;c&quot;&amp;&apos;d&apos;");
    assert_eq!(num(1.5), "1.5");
    assert_eq!(num(2.0), "2");
    assert_eq!(num(-0.0001), "0");
}
