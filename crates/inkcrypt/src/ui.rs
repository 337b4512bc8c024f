//! UI helper components

use eframe::egui;
use inkcrypt_core::{Channel, PresentedResult};

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 212, 170);
const SUCCESS: egui::Color32 = egui::Color32::from_rgb(60, 180, 90);
const FAILURE: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);
const WARNING: egui::Color32 = egui::Color32::from_rgb(220, 180, 50);

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(ACCENT));
}

/// Clickable drop target for one document slot
pub fn upload_target(
    ui: &mut egui::Ui,
    id_salt: &str,
    text: &str,
    has_file: bool,
    drag_hover: bool,
) -> egui::Response {
    let stroke_color = if drag_hover {
        ACCENT
    } else if has_file {
        SUCCESS
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    let inner = egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .inner_margin(egui::Margin::same(24.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("📄").size(32.0));
                ui.label(egui::RichText::new(text).strong());
                ui.label(egui::RichText::new("PDF files only").weak().small());
            });
        });

    ui.interact(
        inner.response.rect,
        ui.id().with(id_salt),
        egui::Sense::click(),
    )
    .on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Result region. Returns the frame response so callers can scroll to it.
pub fn result_panel(ui: &mut egui::Ui, view: &PresentedResult) -> egui::Response {
    let (icon, color) = match view.channel {
        Channel::Success => ("✅", SUCCESS),
        Channel::Failure if view.revoked => ("⚠️", WARNING),
        Channel::Failure => ("❌", FAILURE),
    };

    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.5, color))
        .fill(color.gamma_multiply(0.12))
        .inner_margin(egui::Margin::same(14.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("{icon} {}", view.title))
                    .size(17.0)
                    .strong()
                    .color(color),
            );
            ui.label(&view.message);

            if !view.details.is_empty() {
                ui.add_space(6.0);
                egui::Grid::new("result_details")
                    .num_columns(2)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        for line in &view.details {
                            ui.label(egui::RichText::new(format!("{}:", line.label)).strong());
                            ui.label(egui::RichText::new(&line.value).monospace());
                            ui.end_row();
                        }
                    });
            }
        })
        .response
}

/// Modal spinner shown while a request is in flight
pub fn busy_overlay(ctx: &egui::Context) {
    let screen = ctx.screen_rect();
    ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("busy_backdrop"),
    ))
    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(140));

    egui::Window::new("busy")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Processing...");
            });
        });
}
