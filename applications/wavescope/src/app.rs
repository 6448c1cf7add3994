//! Visualizer window
//!
//! The window owns the pipeline and advances it one step per frame, so
//! reading, playback and drawing all stay on the UI thread. Pacing comes from
//! the blocking sink write inside each step.

use std::cell::RefCell;
use std::io::Read;
use std::rc::Rc;
use wavescope_core::{DrawPrimitive, PlaybackSink, Result};
use wavescope_playback::{Pipeline, PipelineState, PipelineStats};
use wavescope_visual::{DisplayList, Layout};

/// Window title
pub const WINDOW_TITLE: &str = "Wavescope";

const BACKGROUND: egui::Color32 = egui::Color32::BLACK;
const FOREGROUND: egui::Color32 = egui::Color32::WHITE;

/// How the streaming session ended, shared with the caller of `run_native`
///
/// `None` means the window was closed before the stream finished.
pub type Outcome = Rc<RefCell<Option<Result<PipelineStats>>>>;

/// Native window options for a surface of `layout`'s size
pub fn native_options(layout: Layout) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([layout.width() as f32, layout.height() as f32])
            .with_resizable(false),
        ..Default::default()
    }
}

/// Translate recorded primitives into egui shapes anchored at `origin`
pub fn to_shapes(primitives: &[DrawPrimitive], origin: egui::Pos2) -> Vec<egui::Shape> {
    let point = |p: wavescope_core::Point| origin + egui::vec2(p.x as f32, p.y as f32);

    primitives
        .iter()
        .filter_map(|primitive| match *primitive {
            DrawPrimitive::Line { from, to } => Some(egui::Shape::line_segment(
                [point(from), point(to)],
                egui::Stroke::new(1.0, FOREGROUND),
            )),
            DrawPrimitive::FillRect(rect) if rect.width == 0 || rect.height == 0 => None,
            DrawPrimitive::FillRect(rect) => Some(egui::Shape::rect_filled(
                egui::Rect::from_min_size(
                    point(rect.origin()),
                    egui::vec2(rect.width as f32, rect.height as f32),
                ),
                0.0,
                FOREGROUND,
            )),
        })
        .collect()
}

/// eframe application driving one pipeline
pub struct ScopeApp<R, K> {
    pipeline: Pipeline<R, K, DisplayList>,
    outcome: Outcome,
}

impl<R, K> ScopeApp<R, K>
where
    R: Read,
    K: PlaybackSink,
{
    /// Wrap an idle pipeline; the result is written to `outcome`
    pub fn new(pipeline: Pipeline<R, K, DisplayList>, outcome: Outcome) -> Self {
        Self { pipeline, outcome }
    }

    fn advance(&mut self, ctx: &egui::Context) {
        if self.pipeline.state().is_terminated() {
            return;
        }

        let finished = match self.pipeline.step() {
            Ok(PipelineState::Terminated) => Some(Ok(self.pipeline.stats())),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        };

        if let Some(result) = finished {
            *self.outcome.borrow_mut() = Some(result);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else {
            ctx.request_repaint();
        }
    }
}

impl<R, K> eframe::App for ScopeApp<R, K>
where
    R: Read,
    K: PlaybackSink,
{
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.advance(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(BACKGROUND))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                if let Some(surface) = self.pipeline.surface() {
                    painter.extend(to_shapes(surface.presented(), response.rect.min));
                }
            });
    }
}
