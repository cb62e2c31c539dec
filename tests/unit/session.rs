use super::*;
use crate::config::ScriptEvent;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Fps};
use crate::scene::page::Section;

fn small_config() -> RevealConfig {
    RevealConfig {
        canvas: Canvas {
            width: 64,
            height: 36,
        },
        fps: Fps { num: 10, den: 1 },
        duration_ms: 7000,
        seed: Some(42),
        ..RevealConfig::default()
    }
}

fn session(config: RevealConfig) -> RevealSession {
    RevealSession::with_rasterizer(config, ContentSet::default(), SvgRasterizer::without_fonts())
        .unwrap()
}

fn at(at_ms: Millis, action: ScriptAction) -> ScriptEvent {
    ScriptEvent { at_ms, action }
}

#[test]
fn default_script_timeline() {
    let mut cfg = small_config();
    cfg.duration_ms = 13_000;
    let s = session(cfg);
    let tl = s.timeline().unwrap();
    let got: Vec<(Millis, SequenceStage, usize)> =
        tl.iter().map(|e| (e.at_ms, e.to, e.particles)).collect();
    // The tribute section is half in view midway through the second scroll.
    assert_eq!(
        got,
        vec![
            (5400, SequenceStage::Chars, 0),
            (9400, SequenceStage::Settled, 0),
            (9900, SequenceStage::FinalShow, 6),
            (11_400, SequenceStage::Complete, 6),
        ]
    );
    assert_eq!(s.snapshot_at(5399).unwrap().stage, SequenceStage::Idle);
    assert_eq!(s.snapshot_at(5400).unwrap().stage, SequenceStage::Chars);
}

#[test]
fn viewport_follows_the_scroll_script() {
    let s = session(small_config());
    assert_eq!(s.snapshot_at(0).unwrap().scroll_y, Section::Opening.top());
    let mid = s.snapshot_at(3400).unwrap().scroll_y;
    assert!(mid > 0.0 && mid < Section::Cards.top(), "{mid}");
    assert_eq!(s.snapshot_at(4000).unwrap().scroll_y, Section::Cards.top());
    assert_eq!(s.snapshot_at(6000).unwrap().scroll_y, Section::Tribute.top());
}

#[test]
fn first_frame_shows_the_opening() {
    let s = session(small_config());
    let svg = s.scene_svg_at(0).unwrap();
    assert!(svg.contains("亲爱的焕哥哥，祝你生日快乐"));
    assert!(svg.contains("快往下看好不好？"));
    assert!(!svg.contains(r#"<g id="tribute""#));
}

#[test]
fn card_grid_is_dimmed_behind_an_open_modal() {
    let mut cfg = small_config();
    cfg.script.insert(
        1,
        at(4000, ScriptAction::SelectCard { id: "running".into() }),
    );
    let s = session(cfg);

    let svg = s.scene_svg_at(3900).unwrap();
    assert_eq!(svg.matches("EXPLORE").count(), 6);
    assert!(svg.contains(r#"<g opacity="1" transform="translate(640 360) scale(1)"#));

    let svg = s.scene_svg_at(4100).unwrap();
    assert_eq!(svg.matches("EXPLORE").count(), 6);
    assert!(svg.contains(r#"<g opacity="0.3" transform="translate(640 360) scale(0.95)"#));
    assert!(svg.contains("CLOSE VIEW"));
}

#[test]
fn reset_scrolls_back_to_the_opening_and_rearms_the_trigger() {
    let mut cfg = small_config();
    cfg.duration_ms = 20_000;
    cfg.script = vec![
        at(
            0,
            ScriptAction::Scroll {
                to: Section::Tribute,
                duration_ms: 0,
            },
        ),
        at(7000, ScriptAction::Reset),
        at(
            8000,
            ScriptAction::Scroll {
                to: Section::Cards,
                duration_ms: 0,
            },
        ),
        at(
            9000,
            ScriptAction::Scroll {
                to: Section::Tribute,
                duration_ms: 800,
            },
        ),
    ];
    let s = session(cfg);
    assert_eq!(s.snapshot_at(0).unwrap().stage, SequenceStage::Chars);

    let back = s.snapshot_at(7400).unwrap().scroll_y;
    assert!(back > 0.0 && back < Section::Tribute.top(), "{back}");
    let idle = s.snapshot_at(7800).unwrap();
    assert_eq!(idle.stage, SequenceStage::Idle);
    assert_eq!(idle.scroll_y, Section::Opening.top());

    let starts: Vec<Millis> = s
        .timeline()
        .unwrap()
        .iter()
        .filter(|e| e.to == SequenceStage::Chars)
        .map(|e| e.at_ms)
        .collect();
    assert_eq!(starts, vec![0, 9400]);
}

#[test]
fn start_section_is_observed_at_time_zero() {
    let mut cfg = small_config();
    cfg.start_section = Section::Tribute;
    cfg.script.clear();
    let s = session(cfg);
    let tl = s.timeline().unwrap();
    assert_eq!(tl.first().map(|e| (e.at_ms, e.to)), Some((0, SequenceStage::Chars)));
}

#[test]
fn below_threshold_visibility_never_starts() {
    let mut cfg = small_config();
    cfg.script = vec![at(0, ScriptAction::Visibility { ratio: 0.3 })];
    let s = session(cfg);
    assert!(s.timeline().unwrap().is_empty());
    assert_eq!(s.snapshot_at(6000).unwrap().stage, SequenceStage::Idle);
}

#[test]
fn scripted_reset_rearms_and_restarts() {
    let mut cfg = small_config();
    cfg.duration_ms = 20_000;
    cfg.script = vec![
        ScriptEvent {
            at_ms: 0,
            action: ScriptAction::Visibility { ratio: 1.0 },
        },
        ScriptEvent {
            at_ms: 7000,
            action: ScriptAction::Reset,
        },
        ScriptEvent {
            at_ms: 8000,
            action: ScriptAction::Visibility { ratio: 0.9 },
        },
    ];
    let s = session(cfg);
    let tl = s.timeline().unwrap();
    let stages: Vec<(Millis, SequenceStage)> = tl.iter().map(|e| (e.at_ms, e.to)).collect();
    assert_eq!(
        stages,
        vec![
            (0, SequenceStage::Chars),
            (4000, SequenceStage::Settled),
            (4500, SequenceStage::FinalShow),
            (6000, SequenceStage::Complete),
            (7800, SequenceStage::Idle),
            (8000, SequenceStage::Chars),
            (12_000, SequenceStage::Settled),
            (12_500, SequenceStage::FinalShow),
            (14_000, SequenceStage::Complete),
        ]
    );
    assert_eq!(tl[4].particles, 0);
    assert_eq!(tl[7].particles, 6);
}

#[test]
fn modal_follows_the_script() {
    let mut cfg = small_config();
    cfg.script = vec![
        ScriptEvent {
            at_ms: 100,
            action: ScriptAction::SelectCard { id: "dragon".into() },
        },
        ScriptEvent {
            at_ms: 300,
            action: ScriptAction::DismissCard,
        },
    ];
    let s = session(cfg);
    assert!(s.snapshot_at(50).unwrap().active_card.is_none());
    let open = s.snapshot_at(200).unwrap();
    assert_eq!(open.active_card.map(|c| c.id), Some("dragon".to_owned()));
    assert!(s.snapshot_at(300).unwrap().active_card.is_none());
}

#[test]
fn unknown_card_fails_construction() {
    let mut cfg = small_config();
    cfg.script = vec![ScriptEvent {
        at_ms: 0,
        action: ScriptAction::SelectCard { id: "ghost".into() },
    }];
    let err = RevealSession::with_rasterizer(
        cfg,
        ContentSet::default(),
        SvgRasterizer::without_fonts(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn render_frame_matches_render_range() {
    let s = session(small_config());
    let range = FrameRange::new(FrameIndex(48), FrameIndex(52)).unwrap();
    let mut sink = InMemorySink::new();
    s.render_range(range, &mut sink).unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.frames().len(), 4);
    for (idx, frame) in sink.frames() {
        let single = s.render_frame(*idx).unwrap();
        assert_eq!(single.data, frame.data, "frame {}", idx.0);
    }
}

#[test]
fn frames_are_cleared_to_the_theme_background() {
    let s = session(small_config());
    let frame = s.render_frame(FrameIndex(0)).unwrap();
    assert_eq!((frame.width, frame.height), (64, 36));
    assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn out_of_range_frames_are_rejected() {
    let s = session(small_config());
    assert!(s.render_frame(FrameIndex(70)).is_err());
    let range = FrameRange::new(FrameIndex(60), FrameIndex(71)).unwrap();
    assert!(s.render_range(range, &mut InMemorySink::new()).is_err());
}

#[test]
fn seeded_sessions_are_reproducible() {
    let a = session(small_config()).snapshot_at(10_000).unwrap();
    let b = session(small_config()).snapshot_at(10_000).unwrap();
    assert_eq!(a.particles, b.particles);
    assert_eq!(a.particles.len(), 6);
}
