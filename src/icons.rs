//! Line-art iconography on a 100x100 view box.
//!
//! Icons are emitted as SVG `<g>` fragments so the scene can place them with a transform, or as
//! standalone documents for `gilt icon`.

use crate::content::color::Rgba8;
use crate::content::{IconType, Theme};
use std::fmt::Write as _;

const STROKE_WIDTH: f64 = 2.0;
/// Accent strokes are drawn at ~60% opacity.
const ACCENT_OPACITY: f64 = 0.6;

/// One of the six characters in the easter-egg row, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
    Rd,
    Ball,
    Chess,
    Starve,
    Dragon,
    Run,
}

impl Character {
    pub const ROW: [Character; 6] = [
        Character::Rd,
        Character::Ball,
        Character::Chess,
        Character::Starve,
        Character::Dragon,
        Character::Run,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rd => "rd",
            Self::Ball => "ball",
            Self::Chess => "chess",
            Self::Starve => "starve",
            Self::Dragon => "dragon",
            Self::Run => "run",
        }
    }
}

struct Pen {
    gilt: String,
    accent: String,
}

impl Pen {
    fn new(theme: &Theme, accent: Rgba8) -> Self {
        Self {
            gilt: theme.gilt.to_svg_paint(),
            accent: accent.to_svg_paint(),
        }
    }

    fn gilt(&self, out: &mut String, shape: &str) {
        let _ = write!(
            out,
            r#"<{shape} stroke="{}" stroke-width="{STROKE_WIDTH}" fill="none"/>"#,
            self.gilt
        );
    }

    fn accent(&self, out: &mut String, shape: &str) {
        let _ = write!(
            out,
            r#"<{shape} stroke="{}" stroke-opacity="{ACCENT_OPACITY}" stroke-width="{STROKE_WIDTH}" fill="none"/>"#,
            self.accent
        );
    }

    fn dot(&self, out: &mut String, cx: f64, cy: f64, r: f64, paint: &str) {
        let _ = write!(out, r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{paint}"/>"#);
    }
}

/// SVG group for `icon`, drawn in the 100x100 icon space.
pub fn icon_svg(icon: IconType, accent: Rgba8, theme: &Theme) -> String {
    let pen = Pen::new(theme, accent);
    let mut g = String::from("<g>");
    match icon {
        IconType::Chess => {
            pen.gilt(&mut g, r#"circle cx="50" cy="50" r="42""#);
            pen.accent(
                &mut g,
                r#"path d="M35 35 L65 35 M50 35 L50 65 M35 65 L65 65 M40 50 L60 50""#,
            );
        }
        IconType::Basketball => {
            pen.gilt(&mut g, r#"circle cx="50" cy="50" r="40""#);
            pen.accent(
                &mut g,
                r#"path d="M30 20 Q50 50 30 80 M70 20 Q50 50 70 80 M15 50 L85 50 M50 15 L50 85""#,
            );
        }
        IconType::Dragon => {
            pen.gilt(
                &mut g,
                r#"path d="M30 35 C30 15 70 15 70 35 C70 55 30 55 30 75 C30 95 70 95 70 85""#,
            );
            pen.gilt(&mut g, r#"path d="M30 35 L20 30 L25 45 Z""#);
            pen.accent(&mut g, r#"path d="M30 25 L25 15 M35 25 L40 15""#);
            pen.dot(&mut g, 28.0, 35.0, 1.0, &pen.accent);
        }
        IconType::Starve => {
            pen.gilt(&mut g, r#"rect x="30" y="35" width="40" height="35" rx="4""#);
            pen.gilt(&mut g, r#"path d="M40 35 V28 Q50 22 60 28 V35""#);
            pen.accent(&mut g, r#"path d="M42 52 H58 M50 45 V60""#);
        }
        IconType::Running => {
            pen.gilt(&mut g, r#"path d="M25 70 Q30 40 50 40 L85 55 L88 70 Z""#);
            pen.accent(&mut g, r#"path d="M15 78 L85 78 M20 84 L80 84""#);
        }
        IconType::Career => {
            pen.gilt(&mut g, r#"rect x="20" y="30" width="60" height="45" rx="3""#);
            pen.accent(&mut g, r#"path d="M35 30 V75 M55 30 V75 M20 45 H80""#);
            pen.accent(&mut g, r#"path d="M65 55 L75 55 M65 65 L72 65""#);
        }
        IconType::Cake => {
            pen.gilt(&mut g, r#"rect x="25" y="55" width="50" height="25" rx="2""#);
            pen.gilt(&mut g, r#"rect x="30" y="35" width="40" height="20" rx="2""#);
            pen.gilt(&mut g, r#"path d="M50 35 V25""#);
            pen.dot(&mut g, 50.0, 22.0, 2.0, &pen.gilt);
            let _ = write!(
                g,
                r#"<path d="M25 65 H75 M30 45 H70" stroke="{}" stroke-width="1" stroke-opacity="0.4" fill="none"/>"#,
                pen.gilt
            );
        }
    }
    g.push_str("</g>");
    g
}

/// SVG group for one character glyph, drawn in gilt only.
pub fn character_svg(character: Character, theme: &Theme) -> String {
    let pen = Pen::new(theme, theme.gilt);
    let thin = |g: &mut String, d: &str, opacity: f64| {
        let _ = write!(
            g,
            r#"<path d="{d}" stroke="{}" stroke-width="1" stroke-opacity="{opacity}" fill="none"/>"#,
            pen.gilt
        );
    };

    let mut g = String::from("<g>");
    match character {
        Character::Rd => {
            pen.gilt(&mut g, r#"circle cx="50" cy="38" r="18""#);
            pen.gilt(&mut g, r#"path d="M35 32 Q50 10 65 32""#);
            pen.gilt(&mut g, r#"rect x="32" y="65" width="36" height="20" rx="1""#);
            thin(&mut g, "M32 75 H68", 1.0);
            pen.gilt(&mut g, r#"path d="M25 60 Q15 70 30 70 M75 60 Q85 70 70 70""#);
        }
        Character::Ball => {
            pen.gilt(&mut g, r#"circle cx="50" cy="40" r="20""#);
            pen.gilt(&mut g, r#"path d="M35 30 L65 30 L50 12 Z""#);
            pen.gilt(&mut g, r#"circle cx="80" cy="70" r="12""#);
            thin(&mut g, "M72 70 H88 M80 62 V78", 1.0);
        }
        Character::Chess => {
            pen.gilt(&mut g, r#"circle cx="50" cy="40" r="20""#);
            pen.gilt(&mut g, r#"path d="M32 30 H68 L50 12 Z""#);
            pen.gilt(&mut g, r#"path d="M40 70 H60 L50 90 Z""#);
            pen.gilt(&mut g, r#"circle cx="50" cy="65" r="5""#);
        }
        Character::Starve => {
            pen.gilt(&mut g, r#"circle cx="50" cy="40" r="20""#);
            pen.gilt(&mut g, r#"path d="M42 12 L58 12 L50 2 Z""#);
            pen.gilt(&mut g, r#"path d="M80 30 L30 90""#);
            pen.gilt(&mut g, r#"path d="M75 25 Q90 30 80 50""#);
            pen.dot(&mut g, 35.0, 75.0, 3.0, &pen.gilt);
        }
        Character::Dragon => {
            pen.gilt(&mut g, r#"circle cx="50" cy="40" r="20""#);
            pen.gilt(&mut g, r#"path d="M30 35 L20 30 L25 45 Z""#);
            pen.gilt(&mut g, r#"path d="M30 25 L25 15 M35 25 L40 15""#);
            pen.gilt(&mut g, r#"path d="M30 65 Q50 85 70 65""#);
        }
        Character::Run => {
            pen.gilt(&mut g, r#"circle cx="50" cy="40" r="20""#);
            pen.gilt(&mut g, r#"path d="M40 22 L60 22 L50 8 Z""#);
            pen.gilt(&mut g, r#"rect x="30" y="65" width="40" height="20" rx="2""#);
            thin(&mut g, "M35 75 H65", 0.5);
        }
    }
    g.push_str("</g>");
    g
}

/// Wrap an icon into a complete SVG document of `size` x `size` pixels.
pub fn standalone_icon_svg(icon: IconType, accent: Rgba8, theme: &Theme, size: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" width="{size}" height="{size}">{}</svg>"#,
        icon_svg(icon, accent, theme)
    )
}
