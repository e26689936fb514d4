//! Full-window constellation viewer built with eframe/egui.
//!
//! [`Viewer`] owns a [`Scene`], feeds it the egui clock every repaint and
//! replays the scene's last [`DrawList`] onto the central panel. Repaints
//! that fall between scheduled frames replay the same picture without
//! aging anything.

use std::time::Duration;

use eframe::App;
use glam::Vec2;
use rand::rngs::StdRng;
use sim_core::{
    color::Rgba,
    config::Config,
    frame::FramePacing,
    scene::Scene,
    surface::{DrawCommand, DrawList, Glow},
};
use tracing::error;

/// Number of translucent rings used to fake a blurred glow.
const GLOW_RINGS: usize = 4;
/// Fraction of the blur radius the outermost ring reaches.
const GLOW_SPREAD: f32 = 0.5;
/// Opacity of a single glow ring relative to the glow color.
const GLOW_RING_ALPHA: f32 = 0.12;

/// Main application state for the viewer.
///
/// The scene is built on the first frame, once the size of the central
/// panel is known, unless the config pins `width` and `height`.
///
/// ### Fields
/// - `config` - Scene configuration the scene is built from.
/// - `scene` - The running scene, once built.
/// - `build_error` - Why the scene could not be built, shown instead of it.
/// - `last_frame_time` - egui time of the last rendered frame (display only).
/// - `last_frame_dt` - Time between the last two rendered frames.
pub struct Viewer {
    config: Config,
    scene: Option<Scene<StdRng>>,
    build_error: Option<String>,
    last_frame_time: f64,
    last_frame_dt: f64,
}

impl Viewer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            scene: None,
            build_error: None,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        }
    }

    /// Surface size for a panel of `available` size, honoring a configured
    /// `width`/`height`.
    fn surface_size(&self, available: egui::Vec2) -> (f32, f32) {
        (
            self.config.width.unwrap_or(available.x),
            self.config.height.unwrap_or(available.y),
        )
    }

    /// Builds and starts the scene if that has not happened yet.
    fn ensure_scene(&mut self, available: egui::Vec2, now: Duration) {
        if self.scene.is_some() || self.build_error.is_some() {
            return;
        }
        let (w, h) = self.surface_size(available);
        match Scene::from_config(self.config.clone(), w, h) {
            Ok(mut scene) => {
                scene.start(now);
                self.scene = Some(scene);
            }
            Err(e) => {
                error!(error = %e, "failed to build scene");
                self.build_error = Some(e.to_string());
            }
        }
    }

    /// Builds the bottom status bar (counts, frame timing, run/pause).
    fn ui_status_bar(&mut self, ctx: &egui::Context, now: Duration) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let Some(scene) = self.scene.as_mut() else {
                    ui.label("starting…");
                    return;
                };

                let running = scene.is_running();
                if ui.button(if running { "⏸ Pause" } else { "▶ Run" }).clicked() {
                    if running {
                        scene.stop();
                    } else {
                        scene.start(now);
                    }
                }
                ui.separator();
                ui.label(format!("dt last = {:.3} s", self.last_frame_dt));
                ui.label(format!("frames = {}", scene.frame_count()));
                ui.separator();
                ui.label(format!("lines = {}", scene.line_count()));
                ui.label(format!("points = {}", scene.point_count()));
            });
        });
    }

    /// Builds the central panel: advances the scene and paints its picture.
    fn ui_central_panel(&mut self, ctx: &egui::Context, now: Duration) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;

                self.ensure_scene(rect.size(), now);

                if let Some(message) = &self.build_error {
                    painter.rect_filled(rect, 0.0, to_color32(self.config.background));
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        message,
                        egui::FontId::proportional(16.0),
                        egui::Color32::LIGHT_RED,
                    );
                    return;
                }
                let Some(scene) = self.scene.as_mut() else {
                    return;
                };

                if scene.update(now).is_some() {
                    let t = now.as_secs_f64();
                    if self.last_frame_time > 0.0 {
                        self.last_frame_dt = t - self.last_frame_time;
                    }
                    self.last_frame_time = t;
                }

                if scene.draw_list().is_empty() {
                    painter.rect_filled(rect, 0.0, to_color32(scene.config().background));
                }
                painter.extend(draw_list_shapes(scene.draw_list(), rect));

                if scene.is_running() {
                    match scene.config().frame_pacing() {
                        FramePacing::Vsync => ctx.request_repaint(),
                        FramePacing::Fixed(interval) => ctx.request_repaint_after(interval),
                    }
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback: status bar first, then the animated panel.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0));
        self.ui_status_bar(ctx, now);
        self.ui_central_panel(ctx, now);
    }
}

/// Converts a scene color to an egui color, clamping alpha to `0..=1`.
fn to_color32(c: Rgba) -> egui::Color32 {
    let a = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

/// Maps a surface position (origin top-left, y down) into `rect`.
fn to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
}

/// Glow rings for a shape drawn at `presence` opacity, outermost first.
///
/// Each ring is `(extra_size, color)`; `extra_size` is added to the
/// shape's radius (discs) or width (segments).
fn glow_rings(glow: Glow, presence: f32) -> Vec<(f32, egui::Color32)> {
    let alpha = glow.color.a * presence.clamp(0.0, 1.0) * GLOW_RING_ALPHA;
    let color = to_color32(glow.color.with_alpha(alpha));
    (1..=GLOW_RINGS)
        .rev()
        .map(|k| (glow.blur * GLOW_SPREAD * k as f32 / GLOW_RINGS as f32, color))
        .collect()
}

/// Translates one recorded draw call into egui shapes inside `rect`.
fn command_shapes(cmd: &DrawCommand, rect: egui::Rect) -> Vec<egui::Shape> {
    match *cmd {
        DrawCommand::Clear(color) => vec![egui::Shape::rect_filled(rect, 0.0, to_color32(color))],

        DrawCommand::Disc {
            center,
            radius,
            fill,
            glow,
        } => {
            let center = to_screen(center, rect);
            let mut shapes: Vec<egui::Shape> = glow_rings(glow, fill.a)
                .into_iter()
                .map(|(extra, color)| egui::Shape::circle_filled(center, radius + extra, color))
                .collect();
            shapes.push(egui::Shape::circle_filled(center, radius, to_color32(fill)));
            shapes
        }

        DrawCommand::Segment {
            from,
            to,
            width,
            stroke,
            glow,
        } => {
            let points = [to_screen(from, rect), to_screen(to, rect)];
            let mut shapes: Vec<egui::Shape> = glow_rings(glow, stroke.a)
                .into_iter()
                .map(|(extra, color)| {
                    egui::Shape::line_segment(points, egui::Stroke::new(width + extra, color))
                })
                .collect();
            shapes.push(egui::Shape::line_segment(
                points,
                egui::Stroke::new(width, to_color32(stroke)),
            ));
            shapes
        }
    }
}

/// Translates a whole frame into egui shapes, in recording order.
fn draw_list_shapes(list: &DrawList, rect: egui::Rect) -> Vec<egui::Shape> {
    list.commands()
        .iter()
        .flat_map(|cmd| command_shapes(cmd, rect))
        .collect()
}
