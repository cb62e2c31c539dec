use crate::content::{CardData, ContentSet, IconType, Theme};
use crate::foundation::core::{Canvas, Millis};
use crate::foundation::math::{Rng64, lerp, progress};
use crate::icons::{Character, character_svg, icon_svg};
use crate::scene::SceneSnapshot;
use crate::scene::ease::{Ease, ping_pong};
use crate::scene::page::{SECTION_HEIGHT, Section};
use crate::sequence::SequenceStage;
use std::fmt::Write as _;

/// Height of the reference layout; everything is scaled from it.
const REF_HEIGHT: f64 = SECTION_HEIGHT;

const OPENING_TITLE: &str = "亲爱的焕哥哥，祝你生日快乐";
const OPENING_SUBTITLE: &str =
    "愿棋逢对手，球遇良友，跑赴热爱，饥有粮草，龙藏锋芒，职途坦荡，万事无忧";
const SCROLL_PROMPT: &str = "快往下看好不好？";
const EXPLORE: &str = "EXPLORE";
const MESSAGE_LINES: [&str; 3] = [
    "30 岁，是更从容的开始，亦是人生的新起点。",
    "愿你在最好的年纪绽放属于自己的光芒！",
    "俯仰流年三十春，昂然前路千重锦；胸藏丘壑青云远，步履铿锵日月新",
];
const FINALE_TITLE: &str = "愿我们心脏同频，始终共鸣";
const FOOTER: &str = "HAPPY BIRTHDAY MY DARLING";
const HEART_PATH: &str =
    "M50 88 C50 88 10 70 10 40 C10 20 30 15 50 35 C70 15 90 20 90 40 C90 70 50 88 50 88 Z";

const FADE_MS: f64 = 1000.0;
const CHAR_FRAME: f64 = 40.0;
const CHAR_GAP: f64 = 15.0;
const CHAR_ENTRY_MS: f64 = 1000.0;
const CHAR_STAGGER_MS: f64 = 500.0;
const STRANDS: usize = 16;
const STRAND_LEN: f64 = 150.0;
const IDLE_BLOOM_MS: f64 = 3000.0;
const IDLE_BLOOM_STAGGER_MS: f64 = 100.0;
const FINALE_BLOOM_MS: f64 = 1200.0;
const SCATTER_MS: f64 = 1500.0;
const PARTICLE_SCALE: f64 = 15.0;
const PARTICLE_SIZE: f64 = 40.0;
const HEART_DELAY_MS: f64 = 1000.0;
const HEART_REVEAL_MS: f64 = 2000.0;
const HEARTBEAT_MS: f64 = 4000.0;
const CAKE_PULSE_MS: f64 = 3000.0;
const MODAL_WRAP_CHARS: usize = 18;

const CAKE_SCALE_IN_MS: f64 = 1200.0;
const TITLE_DELAY_MS: f64 = 300.0;
const SUBTITLE_DELAY_MS: f64 = 800.0;
const HERO_FADE_MS: f64 = 1500.0;
const FLOAT_SLOW_MS: f64 = 10_000.0;
const FLOAT_DELAYED_MS: f64 = 12_000.0;
const BOUNCE_MS: f64 = 1000.0;
const RIBBONS: usize = 12;
const RIBBON_SEED: u64 = 0x6769_6c74;
const CHESS_CELL: f64 = 30.0;

const GRID_GAP: f64 = 24.0;
const GRID_MAX_W: f64 = 1280.0;
const CARD_PAD: f64 = 24.0;
const CARD_ICON: f64 = 64.0;
const CARD_H: f64 = CARD_PAD * 2.0 + CARD_ICON + 16.0 + 4.0 + 16.0 + 12.0;
const DIMMED_OPACITY: f64 = 0.3;
const DIMMED_SCALE: f64 = 0.95;

/// Render `snap` as a complete SVG document sized to `canvas`.
pub fn build_scene_svg(snap: &SceneSnapshot, content: &ContentSet, canvas: Canvas) -> String {
    let scale = canvas.layout_scale();
    let layout = Layout {
        w: f64::from(canvas.width) / scale,
        h: REF_HEIGHT,
        theme: content.theme,
    };

    let mut svg = String::with_capacity(16 * 1024);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        canvas.width, canvas.height, canvas.width, canvas.height
    );
    let _ = write!(
        svg,
        r##"<defs><linearGradient id="page" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="{bg}"/><stop offset="1" stop-color="#e8e8e8"/></linearGradient><pattern id="chess" width="{cell}" height="{cell}" patternUnits="userSpaceOnUse"><path d="M{cell} 0 H0 V{cell}" fill="none" stroke="{ink}" stroke-opacity="0.03"/></pattern></defs>"##,
        bg = layout.theme.bg.to_svg_paint(),
        ink = layout.theme.text.to_svg_paint(),
        cell = num(CHESS_CELL),
    );
    let _ = write!(svg, r#"<g transform="scale({})">"#, num(scale));

    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        num(layout.w),
        num(layout.h),
        layout.theme.bg.to_svg_paint()
    );

    let shown = 1.0 - main_content_fade(snap);
    let _ = write!(svg, r#"<g transform="translate(0 {})">"#, num(-snap.scroll_y));
    if Section::Opening.in_view(snap.scroll_y) {
        layout.opening(&mut svg, snap, shown);
    }
    if Section::Cards.in_view(snap.scroll_y) {
        layout.card_grid(&mut svg, snap, &content.cards, shown);
    }
    if Section::Tribute.in_view(snap.scroll_y) {
        layout.tribute(&mut svg, snap, shown);
    }
    svg.push_str("</g>");

    if snap.flags.finale_overlay_visible {
        layout.finale(&mut svg, snap);
    }
    if snap.flags.firework_visible {
        layout.firework(&mut svg, snap);
    }
    if let Some(card) = &snap.active_card {
        layout.modal(&mut svg, card);
    }

    svg.push_str("</g></svg>");
    svg
}

/// 0 while the main content is shown, 1 once fully faded out.
///
/// Fades out with the finale overlay and back in over the same second once a reset lands in idle.
fn main_content_fade(snap: &SceneSnapshot) -> f64 {
    if snap.flags.main_content_hidden {
        return snap
            .finale_elapsed_ms
            .map_or(1.0, |t| progress(ms(t), 0.0, FADE_MS));
    }
    match (snap.stage, snap.previous_stage) {
        (SequenceStage::Idle, Some(prev)) if prev.holds_particles() => {
            1.0 - progress(ms(snap.stage_elapsed_ms), 0.0, FADE_MS)
        }
        _ => 0.0,
    }
}

struct Layout {
    w: f64,
    h: f64,
    theme: Theme,
}

impl Layout {
    fn cx(&self) -> f64 {
        self.w / 2.0
    }

    /// Hero section: chess grid, drifting ribbons, the cake and the greeting.
    fn opening(&self, svg: &mut String, snap: &SceneSnapshot, opacity: f64) {
        if opacity <= 0.0 {
            return;
        }
        let now = ms(snap.now);
        let gilt = self.theme.gilt.to_svg_paint();
        let ink = self.theme.text.to_svg_paint();
        let cx = self.cx();

        let _ = write!(
            svg,
            r#"<g id="opening" opacity="{}" transform="translate(0 {})">"#,
            num(opacity),
            num(Section::Opening.top())
        );
        let _ = write!(
            svg,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="url(#chess)"/>"#,
            num(self.w),
            num(self.h)
        );
        self.ribbons(svg, now);

        let drift = ping_pong(now, FLOAT_SLOW_MS);
        place_icon(
            svg,
            &icon_svg(IconType::Cake, self.theme.gilt, &self.theme),
            80.0 + 20.0 * drift,
            80.0 - 20.0 * drift,
            80.0,
            0.0,
            0.2,
        );
        self.candles(svg, ping_pong(now, FLOAT_DELAYED_MS));

        let (title_size, body_size) = match self.w {
            w if w >= 1024.0 => (72.0, 16.0),
            w if w >= 768.0 => (60.0, 16.0),
            _ => (36.0, 14.0),
        };
        let title = wrap_chars(OPENING_TITLE, fit_chars(self.w - 32.0, title_size));
        let subtitle = wrap_chars(
            OPENING_SUBTITLE,
            fit_chars(672.0f64.min(self.w - 32.0), body_size * 1.1),
        );
        let title_h = title_size * 1.1 * (title.len() as f64);
        let stack_h = 124.0 + title_h + 32.0 + body_size * 1.6 * (subtitle.len() as f64);
        let top = (self.h - stack_h) / 2.0;

        let p = Ease::OutCubic.apply(progress(now, 0.0, CAKE_SCALE_IN_MS));
        place_icon(
            svg,
            &icon_svg(IconType::Cake, self.theme.gilt, &self.theme),
            cx,
            top + 50.0,
            100.0 * lerp(0.5, 1.0, p),
            0.0,
            p,
        );

        let p = Ease::OutCubic.apply(progress(now, TITLE_DELAY_MS, HERO_FADE_MS));
        let mut y = top + 124.0 + 20.0 * (1.0 - p);
        for line in &title {
            y += title_size;
            text(svg, cx, y, title_size, &gilt, p, line);
            y += title_size * 0.1;
        }

        let p = Ease::OutCubic.apply(progress(now, SUBTITLE_DELAY_MS, HERO_FADE_MS));
        let mut y = top + 124.0 + title_h + 32.0 + 20.0 * (1.0 - p);
        for line in &subtitle {
            y += body_size * 1.3;
            text(svg, cx, y, body_size, &ink, p, line);
            y += body_size * 0.3;
        }

        let bounce = 6.0 * (1.0 - ping_pong(now, BOUNCE_MS));
        svg.push_str(r#"<g opacity="0.6">"#);
        text(svg, cx, self.h - 80.0, 12.0, &ink, 1.0, SCROLL_PROMPT);
        let _ = write!(
            svg,
            r#"<rect x="{}" y="{}" width="2" height="24" fill="{gilt}"/>"#,
            num(cx - 1.0),
            num(self.h - 72.0 - bounce)
        );
        svg.push_str("</g></g>");
    }

    fn ribbons(&self, svg: &mut String, now: f64) {
        let gilt = self.theme.gilt.to_svg_paint();
        let mut rng = Rng64::new(RIBBON_SEED);
        for _ in 0..RIBBONS {
            let left = rng.next_f64_01() * self.w;
            let top = -rng.next_f64_01() * 0.2 * self.h;
            let period = lerp(5000.0, 15_000.0, rng.next_f64_01());
            let delay = rng.next_f64_01() * 5000.0;

            let t = now - delay;
            if t < 0.0 {
                continue;
            }
            let phase = Ease::Linear.apply(t.rem_euclid(period) / period);
            let opacity = if phase < 0.2 {
                0.3 * phase / 0.2
            } else {
                0.3 * (1.0 - phase) / 0.8
            };
            if opacity <= 0.0 {
                continue;
            }
            let _ = write!(
                svg,
                r#"<rect x="0" y="0" width="30" height="8" rx="4" fill="none" stroke="{gilt}" stroke-opacity="{}" transform="translate({} {}) rotate({} 15 4)"/>"#,
                num(opacity),
                num(left + 50.0 * phase),
                num(top + self.h * phase),
                num(360.0 * phase),
            );
        }
    }

    /// Two candle outlines floating in the bottom-right corner.
    fn candles(&self, svg: &mut String, drift: f64) {
        let gilt = self.theme.gilt.to_svg_paint();
        let top = self.h - 160.0;
        let _ = write!(
            svg,
            r#"<g opacity="0.15" transform="translate({} {})">"#,
            num(-30.0 * drift),
            num(-10.0 * drift)
        );
        for (x, y, h) in [(self.w - 60.0, top, 80.0), (self.w - 42.0, top + 16.0, 64.0)] {
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="2" height="{}" fill="{gilt}"/><rect x="{}" y="{}" width="20" height="32" rx="10" fill="none" stroke="{gilt}"/>"#,
                num(x),
                num(y),
                num(h),
                num(x - 8.0),
                num(y - 16.0),
            );
        }
        svg.push_str("</g>");
    }

    /// Bordered card per entry, dimmed and shrunk while a card modal is open.
    fn card_grid(
        &self,
        svg: &mut String,
        snap: &SceneSnapshot,
        cards: &[CardData],
        opacity: f64,
    ) {
        if opacity <= 0.0 || cards.is_empty() {
            return;
        }
        let cols = grid_columns(self.w).min(cards.len());
        let rows = cards.len().div_ceil(cols);
        let grid_w = (self.w - 32.0).min(GRID_MAX_W);
        let card_w = (grid_w - GRID_GAP * ((cols - 1) as f64)) / (cols as f64);
        let grid_h = CARD_H * (rows as f64) + GRID_GAP * ((rows - 1) as f64);
        let x0 = self.cx() - grid_w / 2.0;
        let y0 = (self.h - grid_h) / 2.0;
        let cx = self.cx();
        let cy = self.h / 2.0;

        let (dim, scale) = if snap.active_card.is_some() {
            (DIMMED_OPACITY, DIMMED_SCALE)
        } else {
            (1.0, 1.0)
        };
        let _ = write!(
            svg,
            r#"<g id="cards" transform="translate(0 {})"><g opacity="{}" transform="translate({} {}) scale({}) translate({} {})">"#,
            num(Section::Cards.top()),
            num(dim * opacity),
            num(cx),
            num(cy),
            num(scale),
            num(-cx),
            num(-cy),
        );

        let gilt = self.theme.gilt.to_svg_paint();
        let bg = self.theme.bg.to_svg_paint();
        let ink = self.theme.text.to_svg_paint();
        for (i, card) in cards.iter().enumerate() {
            let x = x0 + ((i % cols) as f64) * (card_w + GRID_GAP);
            let y = y0 + ((i / cols) as f64) * (CARD_H + GRID_GAP);
            let mid = x + card_w / 2.0;
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{CARD_H}" rx="8" fill="{bg}" stroke="{gilt}" stroke-width="2"/>"#,
                num(x),
                num(y),
                num(card_w),
            );
            place_icon(
                svg,
                &icon_svg(card.icon, card.accent, &self.theme),
                mid,
                y + CARD_PAD + CARD_ICON / 2.0,
                CARD_ICON,
                0.0,
                1.0,
            );
            let bar_y = y + CARD_PAD + CARD_ICON + 16.0;
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="32" height="4" rx="2" fill="{}" fill-opacity="0.6"/>"#,
                num(mid - 16.0),
                num(bar_y),
                card.accent.to_svg_paint(),
            );
            text(svg, mid, bar_y + 4.0 + 16.0 + 10.0, 10.0, &ink, 0.4, EXPLORE);
        }
        svg.push_str("</g></g>");
    }

    /// Message block, character row and footer.
    fn tribute(&self, svg: &mut String, snap: &SceneSnapshot, shown: f64) {
        let _ = write!(
            svg,
            r#"<g id="tribute" transform="translate(0 {})"><rect x="0" y="0" width="{}" height="{}" fill="url(#page)"/>"#,
            num(Section::Tribute.top()),
            num(self.w),
            num(self.h)
        );
        self.message(svg, shown);
        if snap.flags.character_row_visible {
            self.character_row(svg, snap);
        }
        self.footer(svg, shown);
        svg.push_str("</g>");
    }

    fn message(&self, svg: &mut String, opacity: f64) {
        if opacity <= 0.0 {
            return;
        }
        let _ = write!(svg, r#"<g opacity="{}">"#, num(opacity));
        let top = self.h * 0.30;
        place_icon(
            svg,
            &icon_svg(IconType::Chess, self.theme.gilt, &self.theme),
            self.cx() - 300.0,
            top - 60.0,
            32.0,
            12.0,
            0.4,
        );
        for (i, line) in MESSAGE_LINES.iter().enumerate() {
            let y = top + (i as f64) * 40.0;
            text(svg, self.cx(), y, 20.0, &self.theme.text.to_svg_paint(), 1.0, line);
        }
        svg.push_str("</g>");
    }

    fn footer(&self, svg: &mut String, opacity: f64) {
        if opacity <= 0.0 {
            return;
        }
        text(
            svg,
            self.cx(),
            self.h - 24.0,
            10.0,
            &self.theme.text.to_svg_paint(),
            0.3 * opacity,
            FOOTER,
        );
    }

    fn character_row(&self, svg: &mut String, snap: &SceneSnapshot) {
        if snap.flags.characters_collapsed {
            return;
        }
        let Some(elapsed) = snap.sequence_elapsed_ms.map(ms) else {
            return;
        };

        let n = Character::ROW.len() as f64;
        let row_w = n * CHAR_FRAME + (n - 1.0) * CHAR_GAP;
        let x0 = self.cx() - row_w / 2.0;
        let y = self.h * 0.62;
        let gilt = self.theme.gilt.to_svg_paint();
        let bg = self.theme.bg.to_svg_paint();

        for (i, character) in Character::ROW.into_iter().enumerate() {
            let p = progress(elapsed, (i as f64) * CHAR_STAGGER_MS, CHAR_ENTRY_MS);
            if p <= 0.0 {
                continue;
            }
            let x = x0 + (i as f64) * (CHAR_FRAME + CHAR_GAP);
            let cx = x + CHAR_FRAME / 2.0;
            let cy = y + CHAR_FRAME / 2.0;
            let entry = character_entry(character, p);

            let _ = write!(
                svg,
                r#"<g opacity="{}" transform="translate({} {}) rotate({} {} {}) translate({} {}) scale({}) translate({} {})">"#,
                num(entry.opacity),
                num(entry.dx),
                num(entry.dy),
                num(entry.rotate_deg),
                num(cx),
                num(cy),
                num(cx),
                num(cy),
                num(entry.scale),
                num(-cx),
                num(-cy),
            );
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="{CHAR_FRAME}" height="{CHAR_FRAME}" rx="2" fill="{bg}" stroke="{gilt}" stroke-width="2"/>"#,
                num(x),
                num(y)
            );
            place_icon(
                svg,
                &character_svg(character, &self.theme),
                cx,
                cy,
                36.0,
                0.0,
                1.0,
            );
            svg.push_str("</g>");
        }
    }

    fn firework(&self, svg: &mut String, snap: &SceneSnapshot) {
        let (layer_opacity, finale) = match snap.stage {
            SequenceStage::Idle => (0.2, false),
            SequenceStage::FinalShow => (1.0, true),
            _ => return,
        };
        let gilt = self.theme.gilt.to_svg_paint();
        let cx = self.cx();
        let cy = self.h / 2.0;

        let _ = write!(svg, r#"<g opacity="{}">"#, num(layer_opacity));
        for i in 0..STRANDS {
            let p = if finale {
                progress(ms(snap.stage_elapsed_ms), 0.0, FINALE_BLOOM_MS)
            } else {
                let delay = (i as f64) * IDLE_BLOOM_STAGGER_MS;
                let t = ms(snap.stage_elapsed_ms) - delay;
                if t < 0.0 {
                    continue;
                }
                t.rem_euclid(IDLE_BLOOM_MS) / IDLE_BLOOM_MS
            };
            let opacity = 1.0 - p;
            let len = STRAND_LEN * p;
            if opacity <= 0.0 || len <= 0.0 {
                continue;
            }
            let _ = write!(
                svg,
                r#"<line x1="0" y1="0" x2="0" y2="{}" stroke="{gilt}" stroke-width="2" stroke-opacity="{}" transform="translate({} {}) rotate({})"/>"#,
                num(len),
                num(opacity),
                num(cx),
                num(cy),
                num((i as f64) * 360.0 / (STRANDS as f64)),
            );
        }
        svg.push_str("</g>");
    }

    fn finale(&self, svg: &mut String, snap: &SceneSnapshot) {
        let Some(fe) = snap.finale_elapsed_ms.map(ms) else {
            return;
        };
        let gilt = self.theme.gilt.to_svg_paint();
        let cx = self.cx();
        let cy = self.h / 2.0;

        let _ = write!(
            svg,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
            num(self.w),
            num(self.h),
            self.theme.bg.to_svg_paint(),
            num(0.9 * Ease::OutCubic.apply(progress(fe, 0.0, FADE_MS)))
        );

        let reveal = Ease::OutCubic.apply(progress(fe, HEART_DELAY_MS, HEART_REVEAL_MS));
        if reveal > 0.0 {
            let beat = ping_pong(fe, HEARTBEAT_MS);
            let size = (0.8 * self.w).min(800.0);
            let s = size / 100.0 * lerp(0.8, 1.0, reveal) * (1.0 + 0.1 * beat);
            let _ = write!(
                svg,
                r#"<path d="{HEART_PATH}" fill="none" stroke="{gilt}" stroke-width="0.5" stroke-opacity="{}" transform="translate({} {}) scale({}) translate(-50 -50)"/>"#,
                num(reveal * (0.1 + 0.1 * beat)),
                num(cx),
                num(cy),
                num(s),
            );
        }

        if snap.flags.particles_visible {
            let p = progress(ms(snap.stage_elapsed_ms), 0.0, SCATTER_MS);
            let opacity = if p < 0.2 { p / 0.2 } else { 1.0 - (p - 0.2) / 0.8 };
            let scale = lerp(0.5, 2.0, p);
            let ox = self.w * 0.5;
            let oy = self.h * 0.75;
            let icon_scale = PARTICLE_SIZE / 100.0;
            for particle in &snap.particles {
                let d = particle.displacement(PARTICLE_SCALE);
                let _ = write!(
                    svg,
                    r#"<g opacity="{}" transform="translate({} {}) scale({}) translate({} {}) scale({})">"#,
                    num(0.4 * opacity.clamp(0.0, 1.0)),
                    num(ox + particle.origin.x),
                    num(oy + particle.origin.y),
                    num(scale),
                    num(d.x),
                    num(d.y),
                    num(icon_scale),
                );
                svg.push_str(&icon_svg(particle.icon, self.theme.gilt, &self.theme));
                svg.push_str("</g>");
            }
        }

        if snap.flags.finale_text_settled {
            let p = Ease::OutCubic.apply(progress(ms(snap.stage_elapsed_ms), 0.0, FADE_MS));
            let s = lerp(0.95, 1.0, p);
            let _ = write!(
                svg,
                r#"<g opacity="{}" transform="translate({} {}) scale({}) translate({} {})">"#,
                num(p),
                num(cx),
                num(cy),
                num(s),
                num(-cx),
                num(-cy)
            );
            text(svg, cx, cy - 60.0, 40.0, &gilt, 1.0, FINALE_TITLE);
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="192" height="2" fill="{gilt}" fill-opacity="0.3"/>"#,
                num(cx - 96.0),
                num(cy - 20.0)
            );
            let pulse = ping_pong(ms(snap.stage_elapsed_ms), CAKE_PULSE_MS);
            let _ = write!(svg, r#"<g opacity="{}">"#, num(1.0 - 0.2 * pulse));
            place_icon(
                svg,
                &icon_svg(IconType::Cake, self.theme.gilt, &self.theme),
                cx,
                cy + 60.0,
                80.0 * (1.0 + 0.05 * pulse),
                0.0,
                1.0,
            );
            svg.push_str("</g></g>");
        }
    }

    fn modal(&self, svg: &mut String, card: &CardData) {
        let gilt = self.theme.gilt.to_svg_paint();
        let bg = self.theme.bg.to_svg_paint();
        let cx = self.cx();
        let cy = self.h / 2.0;
        let lines = wrap_chars(&card.copy, MODAL_WRAP_CHARS);
        let card_w = 480.0;
        let card_h = 300.0 + 30.0 * (lines.len() as f64);
        let top = cy - card_h / 2.0;

        let _ = write!(
            svg,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{bg}" fill-opacity="0.4"/>"#,
            num(self.w),
            num(self.h)
        );
        let _ = write!(
            svg,
            r#"<rect x="{}" y="{}" width="{card_w}" height="{}" rx="8" fill="{bg}" stroke="{gilt}" stroke-width="2"/>"#,
            num(cx - card_w / 2.0),
            num(top),
            num(card_h)
        );
        place_icon(
            svg,
            &icon_svg(card.icon, card.accent, &self.theme),
            cx,
            top + 100.0,
            120.0,
            0.0,
            1.0,
        );
        text(svg, cx, top + 200.0, 20.0, &gilt, 1.0, &card.title);
        for (i, line) in lines.iter().enumerate() {
            let y = top + 240.0 + (i as f64) * 30.0;
            text(svg, cx, y, 18.0, &self.theme.text.to_svg_paint(), 1.0, line);
        }
        text(
            svg,
            cx,
            top + card_h - 30.0,
            10.0,
            &gilt,
            1.0,
            "CLOSE VIEW",
        );
    }
}

struct CharacterEntry {
    opacity: f64,
    dx: f64,
    dy: f64,
    rotate_deg: f64,
    scale: f64,
}

/// Per-character entry keyframes at progress `p`.
fn character_entry(character: Character, p: f64) -> CharacterEntry {
    let mut e = CharacterEntry {
        opacity: p,
        dx: 0.0,
        dy: 0.0,
        rotate_deg: 0.0,
        scale: 1.0,
    };
    match character {
        Character::Rd => e.dy = lerp(10.0, 0.0, p),
        Character::Ball => e.rotate_deg = lerp(0.0, 30.0, p),
        Character::Chess => e.scale = lerp(0.8, 1.0, p),
        Character::Starve => {
            e.opacity = (p * 2.0).min(1.0);
            e.dx = 5.0 * (1.0 - (2.0 * p - 1.0).abs());
        }
        Character::Dragon => {
            e.dx = lerp(15.0, 0.0, p);
            e.dy = lerp(15.0, 0.0, p);
        }
        Character::Run => {}
    }
    e
}

/// Place a 100x100 icon group centered on `(cx, cy)` at `size` pixels.
fn place_icon(
    svg: &mut String,
    group: &str,
    cx: f64,
    cy: f64,
    size: f64,
    rotate_deg: f64,
    opacity: f64,
) {
    let _ = write!(
        svg,
        r#"<g opacity="{}" transform="translate({} {}) rotate({}) scale({}) translate(-50 -50)">{group}</g>"#,
        num(opacity),
        num(cx),
        num(cy),
        num(rotate_deg),
        num(size / 100.0),
    );
}

fn text(svg: &mut String, x: f64, y: f64, size: f64, fill: &str, opacity: f64, body: &str) {
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" font-size="{}" font-family="serif" text-anchor="middle" fill="{fill}" fill-opacity="{}">{}</text>"#,
        num(x),
        num(y),
        num(size),
        num(opacity),
        escape_xml(body)
    );
}

/// Responsive column count of the card grid for a layout `width`.
fn grid_columns(width: f64) -> usize {
    match width {
        w if w >= 1280.0 => 6,
        w if w >= 1024.0 => 3,
        w if w >= 768.0 => 2,
        _ => 1,
    }
}

/// How many glyphs of `size` fit in `width`, at least one.
fn fit_chars(width: f64, size: f64) -> usize {
    ((width / size).floor() as usize).max(1)
}

/// Break `s` into lines of at most `max` characters (no word boundaries in CJK copy).
pub(crate) fn wrap_chars(s: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let chars: Vec<char> = s.chars().collect();
    chars.chunks(max).map(|c| c.iter().collect()).collect()
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn ms(v: Millis) -> f64 {
    v as f64
}

fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
