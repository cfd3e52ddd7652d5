//! GUI module for the application.
//!
//! Provides the main window (capture button, extracted text, history)
//! plus two transient viewports driven by the pipeline state: the
//! full-screen selection overlay and the snip preview window. The hotkey
//! and tray listeners are polled here each frame, so every pipeline
//! transition happens on the GUI thread.

pub mod render;
pub mod selector;

use std::time::Duration;

use eframe::egui::{self, Color32, TextureOptions, Vec2};

use crate::capture::{DesktopCapturer, ScreenSource};
use crate::clipboard::SystemClipboard;
use crate::config::AppConfig;
use crate::geometry::{DesktopBounds, SelectionRect};
use crate::hotkey::HotkeyListener;
use crate::ocr::TesseractEngine;
use crate::pipeline::{ExtractionPipeline, PipelineState};
use crate::tray::{Tray, TrayCommand};

use selector::RegionSelector;

type Pipeline = ExtractionPipeline<DesktopCapturer, TesseractEngine, SystemClipboard>;

/// Main GUI application struct: the composed root owning the pipeline
/// and all trigger listeners, constructed once at startup.
pub struct SnipApp {
    pipeline: Pipeline,
    selector: RegionSelector,
    /// Desktop bounds used to place the overlay for the current
    /// selection; queried when the flow starts.
    overlay_bounds: Option<DesktopBounds>,
    /// Texture for the preview window, uploaded once per capture.
    preview_texture: Option<egui::TextureHandle>,
    hotkey: Option<HotkeyListener>,
    tray: Option<Tray>,
}

impl SnipApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        let hotkey = if config.hotkey_enabled {
            match HotkeyListener::new() {
                Ok(listener) => Some(listener),
                Err(e) => {
                    tracing::warn!("global hotkey unavailable: {e:#}");
                    None
                }
            }
        } else {
            None
        };

        let tray = match Tray::new() {
            Ok(tray) => Some(tray),
            Err(e) => {
                tracing::warn!("tray icon unavailable: {e:#}");
                None
            }
        };

        let pipeline = ExtractionPipeline::new(
            DesktopCapturer,
            TesseractEngine::new(config),
            SystemClipboard::new(),
        );

        Self {
            pipeline,
            selector: RegionSelector::new(),
            overlay_bounds: None,
            preview_texture: None,
            hotkey,
            tray,
        }
    }

    /// Entry point shared by all three triggers. Re-entrant calls while
    /// a flow is in flight are ignored by the pipeline guard.
    fn begin_capture(&mut self) {
        if !self.pipeline.request_capture() {
            return;
        }

        // The overlay needs the desktop extent before the first frame.
        match DesktopCapturer.desktop_bounds() {
            Ok(bounds) => {
                self.selector.reset();
                self.overlay_bounds = Some(bounds);
            }
            Err(e) => {
                self.overlay_bounds = None;
                self.pipeline.abort_selection(e);
            }
        }
    }

    /// Full-screen translucent overlay spanning the virtual desktop.
    fn show_overlay(&mut self, ctx: &egui::Context) {
        let Some(bounds) = self.overlay_bounds else {
            self.pipeline.cancel_selection();
            return;
        };

        let ppp = ctx.pixels_per_point();
        let position = egui::pos2(bounds.min_x as f32 / ppp, bounds.min_y as f32 / ppp);
        let size = Vec2::new(bounds.width() as f32 / ppp, bounds.height() as f32 / ppp);

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("snip_overlay"),
            egui::ViewportBuilder::default()
                .with_title("Select Region")
                .with_position(position)
                .with_inner_size(size)
                .with_decorations(false)
                .with_transparent(true)
                .with_always_on_top()
                .with_taskbar(false),
            |ctx, _class| {
                let ppp = ctx.pixels_per_point();
                let to_desktop = |pos: egui::Pos2| {
                    (
                        (pos.x * ppp).round() as i32 + bounds.min_x,
                        (pos.y * ppp).round() as i32 + bounds.min_y,
                    )
                };

                let mut finished: Option<SelectionRect> = None;
                let mut cancelled = false;

                ctx.input(|i| {
                    if i.key_pressed(egui::Key::Escape) || i.viewport().close_requested() {
                        cancelled = true;
                        return;
                    }
                    if let Some(pos) = i.pointer.latest_pos() {
                        let (x, y) = to_desktop(pos);
                        if i.pointer.primary_pressed() {
                            self.selector.pointer_down(x, y);
                        } else if i.pointer.primary_released() {
                            finished = self.selector.pointer_up(x, y);
                        } else if i.pointer.primary_down() {
                            self.selector.pointer_move(x, y);
                        }
                    }
                });

                egui::CentralPanel::default()
                    .frame(egui::Frame::none().fill(Color32::from_black_alpha(96)))
                    .show(ctx, |ui| {
                        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);

                        if let Some(drag) = self.selector.drag_rect() {
                            let to_local = |x: i32, y: i32| {
                                egui::pos2(
                                    (x - bounds.min_x) as f32 / ppp,
                                    (y - bounds.min_y) as f32 / ppp,
                                )
                            };
                            let outline = egui::Rect::from_min_max(
                                to_local(drag.x1, drag.y1),
                                to_local(drag.x2, drag.y2),
                            );
                            ui.painter().rect_stroke(
                                outline,
                                0.0,
                                egui::Stroke::new(2.0, Color32::RED),
                            );
                        }
                    });

                if cancelled {
                    self.selector.reset();
                    self.pipeline.cancel_selection();
                } else if let Some(rect) = finished {
                    // Leaving Selecting closes the overlay: it is simply
                    // not shown on the next frame.
                    self.pipeline.finish_selection(rect);
                }
            },
        );
    }

    /// Preview window with confirm-or-discard buttons for the crop.
    fn show_preview(&mut self, ctx: &egui::Context) {
        if self.preview_texture.is_none() {
            if let Some(image) = self.pipeline.pending_image() {
                let size = [image.width() as usize, image.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
                self.preview_texture =
                    Some(ctx.load_texture("snip_preview", color_image, TextureOptions::LINEAR));
            }
        }

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("snip_preview"),
            egui::ViewportBuilder::default()
                .with_title("Preview Snip")
                .with_inner_size(Vec2::new(420.0, 340.0))
                .with_always_on_top(),
            |ctx, _class| {
                let mut confirm = false;
                let mut discard = false;

                if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.viewport().close_requested())
                {
                    discard = true;
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    if let Some(texture) = &self.preview_texture {
                        let tex_size = texture.size_vec2();
                        let max = Vec2::new(ui.available_width(), 260.0);
                        let scale = (max.x / tex_size.x).min(max.y / tex_size.y).min(1.0);
                        ui.centered_and_justified(|ui| {
                            ui.image((texture.id(), tex_size * scale));
                        });
                    }

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Run OCR").clicked() {
                            confirm = true;
                        }
                        ui.add_space(12.0);
                        if ui.button("Discard").clicked() {
                            discard = true;
                        }
                    });
                });

                if confirm {
                    self.preview_texture = None;
                    self.pipeline.confirm_extract();
                } else if discard {
                    self.preview_texture = None;
                    self.pipeline.discard_preview();
                }
            },
        );
    }
}

impl eframe::App for SnipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Background triggers are polled here rather than handled on
        // their own threads, so the pipeline guard stays single-threaded.
        if self.hotkey.as_ref().is_some_and(HotkeyListener::poll) {
            tracing::info!("capture triggered by hotkey");
            self.begin_capture();
        }
        match self.tray.as_ref().and_then(Tray::poll) {
            Some(TrayCommand::Capture) => {
                tracing::info!("capture triggered from tray");
                self.begin_capture();
            }
            Some(TrayCommand::Quit) => {
                tracing::info!("quit requested from tray");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            None => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let capture_clicked =
                    render::render_header(ui, self.pipeline.state() == PipelineState::Idle);

                if let Some(message) = self.pipeline.last_error().map(String::from) {
                    if render::render_error(ui, &message) {
                        self.pipeline.dismiss_error();
                    }
                }

                let copy_clicked = render::render_output(ui, self.pipeline.output());
                render::render_history(ui, self.pipeline.history());

                if capture_clicked {
                    tracing::info!("capture triggered by button");
                    self.begin_capture();
                }
                if copy_clicked {
                    self.pipeline.copy_output();
                }
            });
        });

        match self.pipeline.state() {
            PipelineState::Selecting => self.show_overlay(ctx),
            PipelineState::PreviewConfirm => self.show_preview(ctx),
            PipelineState::Idle | PipelineState::Extracting => {}
        }

        // Keep polling the hotkey and tray channels even when the window
        // has no input focus.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

/// Run the GUI application. Blocks until the main window closes, which
/// also drops the tray icon and hotkey registration.
pub fn run_gui(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(900.0, 700.0))
            .with_min_inner_size(Vec2::new(500.0, 400.0))
            .with_title("Screen Text Extractor"),
        ..Default::default()
    };

    eframe::run_native(
        "Screen Text Extractor",
        options,
        Box::new(move |cc| Ok(Box::new(SnipApp::new(cc, &config)))),
    )
}
