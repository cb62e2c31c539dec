//! Deterministic playback of a [`RevealConfig`] script against a virtual clock.

use std::collections::VecDeque;

use crate::sequence::clock::Clock;
use crate::config::{RevealConfig, ScriptAction, ScriptEvent};
use crate::content::ContentSet;
use crate::content::modal::CardModal;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange, Millis};
use crate::foundation::error::{GiltError, GiltResult};
use crate::render::raster::{FrameRGBA, SvgRasterizer};
use crate::scene::page::{PageScroll, SMOOTH_SCROLL_MS, Section};
use crate::scene::{SceneSnapshot, build_scene_svg};
use crate::sequence::{
    ControllerEvent, ManualClock, SeededVelocities, SequenceController, SequenceStage,
    VisibilityTrigger,
};

/// One stage change observed while playing the script.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimelineEntry {
    pub at_ms: Millis,
    pub from: SequenceStage,
    pub to: SequenceStage,
    /// Particles alive once the change has been applied.
    pub particles: usize,
}

/// Renders frames of a scripted reveal.
///
/// Every run starts from a fresh controller at t=0, so a frame depends only on its index.
#[derive(Debug)]
pub struct RevealSession {
    config: RevealConfig,
    content: ContentSet,
    seed: u64,
    trigger: VisibilityTrigger,
    rasterizer: SvgRasterizer,
}

impl RevealSession {
    pub fn new(config: RevealConfig, content: ContentSet) -> GiltResult<Self> {
        let rasterizer = SvgRasterizer::new(config.font_dir.as_deref());
        Self::with_rasterizer(config, content, rasterizer)
    }

    /// Like [`new`](Self::new) with a caller-provided rasterizer (e.g. one without system fonts).
    pub fn with_rasterizer(
        config: RevealConfig,
        content: ContentSet,
        rasterizer: SvgRasterizer,
    ) -> GiltResult<Self> {
        config.validate()?;
        content.validate()?;
        config.validate_against(&content)?;

        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = time_seed();
                tracing::info!(seed, "no seed configured; using a time-derived seed");
                seed
            }
        };
        let trigger = VisibilityTrigger::new(config.trigger_threshold);
        Ok(Self {
            config,
            content,
            seed,
            trigger,
            rasterizer,
        })
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentSet {
        &self.content
    }

    /// The effective particle seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `[0, frame_count)` for the configured duration.
    pub fn full_range(&self) -> GiltResult<FrameRange> {
        FrameRange::new(FrameIndex(0), FrameIndex(self.config.frame_count()))
    }

    /// Scene snapshot at `at_ms`.
    pub fn snapshot_at(&self, at_ms: Millis) -> GiltResult<SceneSnapshot> {
        let mut run = self.run();
        run.advance_to(at_ms, &self.content, &self.trigger)?;
        Ok(run.snapshot(&self.content))
    }

    /// SVG scene at `at_ms`.
    pub fn scene_svg_at(&self, at_ms: Millis) -> GiltResult<String> {
        let snap = self.snapshot_at(at_ms)?;
        Ok(build_scene_svg(&snap, &self.content, self.config.canvas))
    }

    pub fn render_at(&self, at_ms: Millis) -> GiltResult<FrameRGBA> {
        let svg = self.scene_svg_at(at_ms)?;
        self.rasterize(&svg)
    }

    pub fn render_frame(&self, frame: FrameIndex) -> GiltResult<FrameRGBA> {
        let total = self.config.frame_count();
        if frame.0 >= total {
            return Err(GiltError::validation(format!(
                "frame {} is out of range (0..{total})",
                frame.0
            )));
        }
        self.render_at(self.config.fps.frame_to_millis(frame))
    }

    /// Render `range` in order into `sink`, playing the script once.
    #[tracing::instrument(skip(self, sink), fields(start = range.start.0, end = range.end.0))]
    pub fn render_range(&self, range: FrameRange, sink: &mut dyn FrameSink) -> GiltResult<()> {
        if range.end.0 > self.config.frame_count() {
            return Err(GiltError::validation(format!(
                "range end {} exceeds frame count {}",
                range.end.0,
                self.config.frame_count()
            )));
        }

        sink.begin(SinkConfig {
            width: self.config.canvas.width,
            height: self.config.canvas.height,
            fps: self.config.fps,
        })?;

        let mut run = self.run();
        for idx in range.iter() {
            let at = self.config.fps.frame_to_millis(idx);
            run.advance_to(at, &self.content, &self.trigger)?;
            let svg = build_scene_svg(&run.snapshot(&self.content), &self.content, self.config.canvas);
            let frame = self.rasterize(&svg)?;
            sink.push_frame(idx, &frame)?;
        }
        tracing::info!(frames = range.len_frames(), "render range finished");
        sink.end()
    }

    /// Every stage change over the configured duration.
    pub fn timeline(&self) -> GiltResult<Vec<TimelineEntry>> {
        let mut run = self.run();
        run.advance_to(self.config.duration_ms, &self.content, &self.trigger)?;

        let mut out: Vec<TimelineEntry> = Vec::new();
        let mut alive = 0;
        for ev in run.events {
            match ev {
                ControllerEvent::StageChanged { from, to, at } => {
                    if !to.holds_particles() {
                        alive = 0;
                    }
                    out.push(TimelineEntry {
                        at_ms: at,
                        from,
                        to,
                        particles: alive,
                    });
                }
                ControllerEvent::ParticlesSpawned { count, .. } => {
                    alive = count;
                    if let Some(last) = out.last_mut() {
                        last.particles = count;
                    }
                }
                ControllerEvent::ScrollToTop { .. } => {}
            }
        }
        Ok(out)
    }

    fn rasterize(&self, svg: &str) -> GiltResult<FrameRGBA> {
        self.rasterizer.rasterize(
            svg,
            self.config.canvas,
            Some(self.config.clear_rgba(&self.content)),
        )
    }

    fn run(&self) -> Run {
        let clock = ManualClock::new();
        let controller = SequenceController::new(
            clock.clone(),
            SeededVelocities::new(self.seed),
            self.content.icon_sequence(),
        )
        .with_timings(self.config.timings);
        let mut run = Run {
            clock,
            controller,
            modal: CardModal::new(),
            script: self.config.script.iter().cloned().collect(),
            scroll: PageScroll::at(self.config.start_section),
            tribute_seen: false,
            events: Vec::new(),
        };
        run.observe_viewport(&self.trigger);
        run
    }
}

/// One playthrough: the controller, the modal, the viewport and the unplayed script tail.
struct Run {
    clock: ManualClock,
    controller: SequenceController<ManualClock, SeededVelocities>,
    modal: CardModal,
    script: VecDeque<ScriptEvent>,
    scroll: PageScroll,
    /// Whether the tribute section was intersecting at the last viewport observation.
    tribute_seen: bool,
    /// Controller events in the order they were emitted.
    events: Vec<ControllerEvent>,
}

impl Run {
    /// Move the clock forward to `at`, applying script entries and due transitions in time order.
    ///
    /// While the viewport is scrolling the run steps one millisecond at a time so the tribute
    /// section is observed at the instant it crosses the trigger threshold.
    fn advance_to(
        &mut self,
        at: Millis,
        content: &ContentSet,
        trigger: &VisibilityTrigger,
    ) -> GiltResult<()> {
        loop {
            let now = self.clock.now();
            let next_script = self.script.front().map(|ev| ev.at_ms).filter(|&t| t <= at);
            let target = next_script.unwrap_or(at).max(now);

            if self.scroll.is_moving(now) && now < target {
                self.step_to(now + 1, trigger);
                continue;
            }
            self.step_to(target, trigger);

            match next_script {
                Some(_) => {
                    if let Some(ev) = self.script.pop_front() {
                        self.apply(&ev.action, content, trigger)?;
                    }
                }
                None => return Ok(()),
            }
        }
    }

    /// Set the clock to `t`, apply due transitions and observe the viewport.
    fn step_to(&mut self, t: Millis, trigger: &VisibilityTrigger) {
        self.clock.set(t);
        self.controller.poll();
        self.collect_events();
        self.observe_viewport(trigger);
    }

    /// Feed the tribute section's visibility to `trigger` when it starts intersecting.
    fn observe_viewport(&mut self, trigger: &VisibilityTrigger) {
        let ratio = Section::Tribute.visible_ratio(self.scroll.offset_at(self.clock.now()));
        let seen = trigger.is_intersecting(ratio);
        if seen && !self.tribute_seen {
            trigger.observe(ratio, &mut self.controller);
            self.collect_events();
        }
        self.tribute_seen = seen;
    }

    fn collect_events(&mut self) {
        for ev in self.controller.drain_events() {
            if let ControllerEvent::ScrollToTop { at } = ev {
                self.scroll.scroll_to(at, Section::Opening, SMOOTH_SCROLL_MS);
            }
            self.events.push(ev);
        }
    }

    fn apply(
        &mut self,
        action: &ScriptAction,
        content: &ContentSet,
        trigger: &VisibilityTrigger,
    ) -> GiltResult<()> {
        match action {
            ScriptAction::Visibility { ratio } => {
                trigger.observe(*ratio, &mut self.controller);
            }
            ScriptAction::Scroll { to, duration_ms } => {
                self.scroll.scroll_to(self.clock.now(), *to, *duration_ms);
                self.observe_viewport(trigger);
            }
            ScriptAction::SelectCard { id } => {
                self.modal.select(content, id)?;
            }
            ScriptAction::DismissCard => self.modal.dismiss(),
            ScriptAction::Reset => {
                self.controller.reset();
            }
        }
        self.collect_events();
        Ok(())
    }

    fn snapshot(&self, content: &ContentSet) -> SceneSnapshot {
        SceneSnapshot::capture(&self.controller, &self.modal, content)
            .scrolled_to(self.scroll.offset_at(self.clock.now()))
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
