//! Reveal configuration: output geometry, timings and the scripted interaction list.

use crate::content::ContentSet;
use crate::content::color::Rgba8;
use crate::foundation::core::{Canvas, Fps, Millis};
use crate::foundation::error::{GiltError, GiltResult};
use crate::scene::page::{SMOOTH_SCROLL_MS, Section};
use crate::sequence::{SequenceTimings, VisibilityTrigger};
use std::path::{Path, PathBuf};

/// A scripted interaction, applied by a render session at `at_ms`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEvent {
    pub at_ms: Millis,
    pub action: ScriptAction,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Report the visible fraction of the tribute region directly.
    Visibility { ratio: f64 },
    /// Smooth-scroll the viewport to the top of a section.
    Scroll {
        to: Section,
        #[serde(default = "default_scroll_ms")]
        duration_ms: Millis,
    },
    /// Click a card (toggles its modal).
    SelectCard { id: String },
    DismissCard,
    /// Press the "replay" control.
    Reset,
}

fn default_scroll_ms() -> Millis {
    SMOOTH_SCROLL_MS
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    pub duration_ms: Millis,
    /// Particle velocity seed; a time-derived seed is used when absent.
    pub seed: Option<u64>,
    pub timings: SequenceTimings,
    pub trigger_threshold: f64,
    /// Section the viewport rests on at t=0.
    pub start_section: Section,
    /// Content JSON, resolved relative to the config file.
    pub content: Option<PathBuf>,
    /// Clear color behind the scene; the theme background when absent.
    pub background: Option<Rgba8>,
    /// Extra font directory for text rendering.
    pub font_dir: Option<PathBuf>,
    pub script: Vec<ScriptEvent>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps { num: 30, den: 1 },
            duration_ms: 13_000,
            seed: None,
            timings: SequenceTimings::default(),
            trigger_threshold: VisibilityTrigger::DEFAULT_THRESHOLD,
            start_section: Section::Opening,
            content: None,
            background: None,
            font_dir: None,
            script: vec![
                ScriptEvent {
                    at_ms: 3000,
                    action: ScriptAction::Scroll {
                        to: Section::Cards,
                        duration_ms: SMOOTH_SCROLL_MS,
                    },
                },
                ScriptEvent {
                    at_ms: 5000,
                    action: ScriptAction::Scroll {
                        to: Section::Tribute,
                        duration_ms: SMOOTH_SCROLL_MS,
                    },
                },
            ],
        }
    }
}

impl RevealConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> GiltResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| GiltError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config file; relative `content` and `font_dir` paths are resolved against its
    /// directory.
    pub fn from_path(path: impl AsRef<Path>) -> GiltResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let mut cfg = Self::from_reader(std::io::BufReader::new(f))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for p in [&mut cfg.content, &mut cfg.font_dir].into_iter().flatten() {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> GiltResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration_ms == 0 {
            return Err(GiltError::validation("duration_ms must be > 0"));
        }
        if !self.trigger_threshold.is_finite() || !(0.0..=1.0).contains(&self.trigger_threshold) {
            return Err(GiltError::validation(
                "trigger_threshold must be within [0, 1]",
            ));
        }

        let mut last = 0;
        for (i, ev) in self.script.iter().enumerate() {
            if ev.at_ms < last {
                return Err(GiltError::validation(format!(
                    "script[{i}] at {} ms is before the previous entry ({last} ms)",
                    ev.at_ms
                )));
            }
            last = ev.at_ms;
            match &ev.action {
                ScriptAction::Visibility { ratio } if !ratio.is_finite() => {
                    return Err(GiltError::validation(format!(
                        "script[{i}] visibility ratio must be finite"
                    )));
                }
                ScriptAction::SelectCard { id } if id.trim().is_empty() => {
                    return Err(GiltError::validation(format!(
                        "script[{i}] select_card id must be non-empty"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Every card id named by the script must exist in `content`.
    pub fn validate_against(&self, content: &ContentSet) -> GiltResult<()> {
        for ev in &self.script {
            if let ScriptAction::SelectCard { id } = &ev.action
                && content.card(id).is_none()
            {
                return Err(GiltError::validation(format!(
                    "script selects unknown card '{id}'"
                )));
            }
        }
        Ok(())
    }

    /// The configured content file, or the built-in cards.
    pub fn load_content(&self) -> GiltResult<ContentSet> {
        match &self.content {
            Some(path) => ContentSet::from_path(path),
            None => Ok(ContentSet::default()),
        }
    }

    /// Color behind the scene: the configured background or the theme's.
    pub fn background_color(&self, content: &ContentSet) -> Rgba8 {
        self.background.unwrap_or(content.theme.bg)
    }

    /// Clear color for rendered frames.
    pub fn clear_rgba(&self, content: &ContentSet) -> [u8; 4] {
        self.background_color(content).to_array()
    }

    pub fn frame_count(&self) -> u64 {
        self.fps.millis_to_frames_ceil(self.duration_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
