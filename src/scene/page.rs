use crate::foundation::core::Millis;
use crate::foundation::math::progress;
use crate::scene::ease::Ease;

/// Height of one section (and of the viewport) in layout units.
pub const SECTION_HEIGHT: f64 = 720.0;

/// Duration of a smooth scroll, including the one requested by `reset()`.
pub const SMOOTH_SCROLL_MS: Millis = 800;

/// The three full-height sections of the page, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Hero with the cake, the greeting and the scroll prompt.
    Opening,
    /// Grid of the content cards.
    Cards,
    /// Messages, the character row and the finale trigger region.
    Tribute,
}

impl Section {
    pub fn index(self) -> usize {
        match self {
            Self::Opening => 0,
            Self::Cards => 1,
            Self::Tribute => 2,
        }
    }

    /// Page offset of the section's top edge.
    pub fn top(self) -> f64 {
        (self.index() as f64) * SECTION_HEIGHT
    }

    /// Fraction of the section inside a viewport scrolled to `offset`.
    pub fn visible_ratio(self, offset: f64) -> f64 {
        let top = self.top();
        let overlap = (offset + SECTION_HEIGHT).min(top + SECTION_HEIGHT) - offset.max(top);
        (overlap / SECTION_HEIGHT).clamp(0.0, 1.0)
    }

    /// Whether any part of the section is inside a viewport scrolled to `offset`.
    pub fn in_view(self, offset: f64) -> bool {
        self.visible_ratio(offset) > 0.0
    }
}

/// Vertical scroll position of the viewport, with an optional smooth-scroll animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageScroll {
    from: f64,
    to: f64,
    start: Millis,
    duration: Millis,
}

impl PageScroll {
    pub fn at(section: Section) -> Self {
        let top = section.top();
        Self {
            from: top,
            to: top,
            start: 0,
            duration: 0,
        }
    }

    /// Eased offset at `now`.
    pub fn offset_at(&self, now: Millis) -> f64 {
        if now >= self.settles_at() {
            return self.to;
        }
        let p = progress(
            now.saturating_sub(self.start) as f64,
            0.0,
            self.duration as f64,
        );
        self.from + (self.to - self.from) * Ease::InOutQuad.apply(p)
    }

    /// Start scrolling from wherever the viewport is at `now` towards `section`.
    pub fn scroll_to(&mut self, now: Millis, section: Section, duration: Millis) {
        self.from = self.offset_at(now);
        self.to = section.top();
        self.start = now;
        self.duration = duration;
    }

    /// Time at which the viewport comes to rest.
    pub fn settles_at(&self) -> Millis {
        self.start.saturating_add(self.duration)
    }

    pub fn is_moving(&self, now: Millis) -> bool {
        now < self.settles_at() && self.from != self.to
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/page.rs"]
mod tests;
