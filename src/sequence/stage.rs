/// One discrete phase of the reveal.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SequenceStage {
    #[default]
    Idle,
    Chars,
    Settled,
    FinalShow,
    Complete,
}

impl SequenceStage {
    pub const ALL: [SequenceStage; 5] = [
        SequenceStage::Idle,
        SequenceStage::Chars,
        SequenceStage::Settled,
        SequenceStage::FinalShow,
        SequenceStage::Complete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Chars => "chars",
            Self::Settled => "settled",
            Self::FinalShow => "finalShow",
            Self::Complete => "complete",
        }
    }

    /// Next stage on the forward path, `None` once complete.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Chars),
            Self::Chars => Some(Self::Settled),
            Self::Settled => Some(Self::FinalShow),
            Self::FinalShow => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Legal-transition table: one step forward, or back to `Idle` from any running stage.
    pub fn can_transition_to(self, to: Self) -> bool {
        if to == Self::Idle {
            return self != Self::Idle;
        }
        self.next() == Some(to)
    }

    /// Stages in which the finale particles exist.
    pub fn holds_particles(self) -> bool {
        matches!(self, Self::FinalShow | Self::Complete)
    }

    pub fn flags(self) -> VisibilityFlags {
        VisibilityFlags::for_stage(self)
    }
}

impl std::fmt::Display for SequenceStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation flags derived purely from the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityFlags {
    pub main_content_hidden: bool,
    pub character_row_visible: bool,
    pub finale_overlay_visible: bool,
    pub finale_text_settled: bool,
    /// Opening bloom while idle, one-shot burst at the finale.
    pub firework_visible: bool,
    /// Particles are drawn only while the finale is being shown.
    pub particles_visible: bool,
    /// Character frames shrink away while the finale is being shown.
    pub characters_collapsed: bool,
}

impl VisibilityFlags {
    pub fn for_stage(stage: SequenceStage) -> Self {
        use SequenceStage::*;
        let finale = matches!(stage, FinalShow | Complete);
        Self {
            main_content_hidden: finale,
            character_row_visible: stage != Idle,
            finale_overlay_visible: finale,
            finale_text_settled: stage == Complete,
            firework_visible: matches!(stage, Idle | FinalShow),
            particles_visible: stage == FinalShow,
            characters_collapsed: stage == FinalShow,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/stage.rs"]
mod tests;
