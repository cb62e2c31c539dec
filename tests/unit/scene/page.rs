use super::*;

#[test]
fn sections_stack_top_to_bottom() {
    assert_eq!(Section::Opening.top(), 0.0);
    assert_eq!(Section::Cards.top(), 720.0);
    assert_eq!(Section::Tribute.top(), 1440.0);
}

#[test]
fn visible_ratio_is_the_viewport_overlap() {
    assert_eq!(Section::Opening.visible_ratio(0.0), 1.0);
    assert_eq!(Section::Cards.visible_ratio(0.0), 0.0);
    assert_eq!(Section::Cards.visible_ratio(360.0), 0.5);
    assert_eq!(Section::Opening.visible_ratio(360.0), 0.5);
    assert_eq!(Section::Tribute.visible_ratio(1440.0), 1.0);
    assert!(!Section::Tribute.in_view(720.0));
    assert!(Section::Tribute.in_view(721.0));
}

#[test]
fn scroll_eases_between_sections() {
    let mut scroll = PageScroll::at(Section::Cards);
    assert!(!scroll.is_moving(0));
    scroll.scroll_to(1000, Section::Tribute, 800);

    assert_eq!(scroll.offset_at(1000), 720.0);
    assert_eq!(scroll.offset_at(1400), 1080.0);
    assert!(scroll.offset_at(1200) < 900.0, "eased in");
    assert_eq!(scroll.offset_at(1800), 1440.0);
    assert_eq!(scroll.offset_at(5000), 1440.0);
    assert!(scroll.is_moving(1799));
    assert!(!scroll.is_moving(1800));
    assert_eq!(scroll.settles_at(), 1800);
}

#[test]
fn retargeting_starts_from_the_current_offset() {
    let mut scroll = PageScroll::at(Section::Opening);
    scroll.scroll_to(0, Section::Tribute, 800);
    let mid = scroll.offset_at(400);
    scroll.scroll_to(400, Section::Opening, SMOOTH_SCROLL_MS);
    assert_eq!(scroll.offset_at(400), mid);
    assert_eq!(scroll.offset_at(1200), 0.0);
    assert!(!scroll.is_moving(1200));
}
