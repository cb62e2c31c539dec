//! Presentation layer: turn controller state into an SVG scene of the tribute viewport.

pub mod builder;
pub mod ease;
pub mod page;

pub use builder::build_scene_svg;
pub use page::{PageScroll, Section};

use crate::content::CardData;
use crate::content::ContentSet;
use crate::content::modal::CardModal;
use crate::foundation::core::Millis;
use crate::sequence::{
    Clock, Particle, SequenceController, SequenceStage, VelocitySource, VisibilityFlags,
};

/// Everything the scene needs from one instant of a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneSnapshot {
    /// Clock time of the snapshot; drives the looping idle animations.
    pub now: Millis,
    pub stage: SequenceStage,
    /// Stage before the most recent change; drives the fade back in after a reset.
    pub previous_stage: Option<SequenceStage>,
    pub flags: VisibilityFlags,
    /// Time spent in the current stage.
    pub stage_elapsed_ms: Millis,
    /// Time since the effective `start()`, `None` while idle.
    pub sequence_elapsed_ms: Option<Millis>,
    /// Time since the finale overlay appeared, `None` outside the finale.
    pub finale_elapsed_ms: Option<Millis>,
    pub particles: Vec<Particle>,
    pub active_card: Option<CardData>,
    /// Viewport offset into the page, in layout units.
    pub scroll_y: f64,
}

impl SceneSnapshot {
    pub fn capture<C: Clock, V: VelocitySource>(
        controller: &SequenceController<C, V>,
        modal: &CardModal,
        content: &ContentSet,
    ) -> Self {
        let now = controller.clock().now();
        let stage = controller.stage();
        let stage_elapsed_ms = controller.elapsed_in_stage();
        let finale_elapsed_ms = match stage {
            SequenceStage::FinalShow => Some(stage_elapsed_ms),
            SequenceStage::Complete => {
                Some(stage_elapsed_ms.saturating_add(controller.timings().final_show_ms))
            }
            _ => None,
        };

        Self {
            now,
            stage,
            previous_stage: controller.previous_stage(),
            flags: stage.flags(),
            stage_elapsed_ms,
            sequence_elapsed_ms: controller.started_at().map(|t| now.saturating_sub(t)),
            finale_elapsed_ms,
            particles: controller.particles().to_vec(),
            active_card: modal.active(content).cloned(),
            scroll_y: Section::Tribute.top(),
        }
    }

    /// Frame the viewport at `scroll_y` instead of the tribute section.
    pub fn scrolled_to(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene/snapshot.rs"]
mod tests;
