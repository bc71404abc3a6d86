//! Canvas rendering: gizmo strokes for shapes, egui overlays for text labels.

use bevy::gizmos::prelude::*;
use bevy::prelude::*;
use bevy_egui::egui;
use bevy_egui::EguiContexts;

use crate::constants::TEXT_FONT_SIZE;
use crate::model::{Element, Point, Shape};
use crate::theme;

use super::params::{CanvasFrame, CanvasParams};
use super::state::{ActiveDrawing, HoverState};

/// Half length of each arm of the origin cross
const ORIGIN_ARM: f32 = 8.0;

/// Radius of the dots marking placed points
const PENDING_POINT_RADIUS: f32 = 2.5;

/// Radius of the ring around a touched control point
const HOVER_POINT_RADIUS: f32 = 6.0;

/// Stroke the outline of a shape; labels are drawn by egui
fn draw_shape(gizmos: &mut Gizmos, frame: &CanvasFrame, shape: &Shape, color: Color) {
    match shape {
        Shape::Polyline { points, closed } => {
            let mut strip: Vec<Vec2> = points.iter().map(|p| frame.to_world(*p)).collect();
            if *closed && let Some(first) = strip.first().copied() {
                strip.push(first);
            }
            gizmos.linestrip_2d(strip, color);
        }
        Shape::Ellipse { center, rx, ry } => {
            gizmos.ellipse_2d(
                Isometry2d::from_translation(frame.to_world(*center)),
                Vec2::new(*rx as f32, *ry as f32),
                color,
            );
        }
        Shape::Label { .. } => {}
    }
}

/// Box around a label, used for highlighting
fn draw_label_box(gizmos: &mut Gizmos, frame: &CanvasFrame, anchor: Point, size: (i32, i32), color: Color) {
    gizmos.rect_2d(
        Isometry2d::from_translation(frame.to_world(anchor)),
        Vec2::new(size.0 as f32, size.1 as f32),
        color,
    );
}

fn draw_outline(gizmos: &mut Gizmos, frame: &CanvasFrame, element: &Element, color: Color) {
    match element.shape() {
        Shape::Label { anchor, size, .. } => draw_label_box(gizmos, frame, anchor, size, color),
        shape => draw_shape(gizmos, frame, &shape, color),
    }
}

/// Committed elements, back to front
pub fn render_elements(mut gizmos: Gizmos, active: Res<ActiveDrawing>, canvas: CanvasParams) {
    let Some(frame) = canvas.frame() else {
        return;
    };

    for element in active.drawing.elements() {
        draw_shape(&mut gizmos, &frame, &element.shape(), theme::ELEMENT_STROKE);
    }
}

/// The shape being placed, finished at the snapped pointer
pub fn render_preview(
    mut gizmos: Gizmos,
    active: Res<ActiveDrawing>,
    hover: Res<HoverState>,
    canvas: CanvasParams,
) {
    let Some(frame) = canvas.frame() else {
        return;
    };

    let builder = active.drawing.builder();
    for point in builder.points() {
        gizmos.circle_2d(
            Isometry2d::from_translation(frame.to_world(*point)),
            PENDING_POINT_RADIUS,
            theme::PENDING_POINT,
        );
    }

    // Without a pointer only the text preview has something to show
    let cursor = hover
        .snapped
        .or_else(|| builder.text().and(builder.points().first().copied()));
    let Some(preview) = cursor.and_then(|cursor| active.drawing.preview(cursor)) else {
        return;
    };

    match preview.shape() {
        Shape::Label { text, .. } if text.is_empty() => {}
        _ => draw_outline(&mut gizmos, &frame, &preview, theme::PREVIEW_STROKE),
    }
}

/// Highlight the element under the pointer and the control point it touches
pub fn render_hover(
    mut gizmos: Gizmos,
    active: Res<ActiveDrawing>,
    hover: Res<HoverState>,
    canvas: CanvasParams,
) {
    let Some(hit) = hover.hit else {
        return;
    };
    let Some(element) = active.drawing.scene().get(hit.index) else {
        return;
    };
    let Some(frame) = canvas.frame() else {
        return;
    };

    draw_outline(&mut gizmos, &frame, element, theme::HOVER_STROKE);

    if let Some(point) = hit.point_index.and_then(|index| element.point_touch(index)) {
        gizmos.circle_2d(
            Isometry2d::from_translation(frame.to_world(point)),
            HOVER_POINT_RADIUS,
            theme::HOVER_POINT,
        );
    }
}

/// Cross marking the export origin
pub fn render_origin(mut gizmos: Gizmos, active: Res<ActiveDrawing>, canvas: CanvasParams) {
    let Some(frame) = canvas.frame() else {
        return;
    };

    let center = frame.to_world(active.drawing.scene().origin());
    gizmos.line_2d(
        center - Vec2::X * ORIGIN_ARM,
        center + Vec2::X * ORIGIN_ARM,
        theme::ORIGIN_MARKER,
    );
    gizmos.line_2d(
        center - Vec2::Y * ORIGIN_ARM,
        center + Vec2::Y * ORIGIN_ARM,
        theme::ORIGIN_MARKER,
    );
}

fn show_label(ctx: &egui::Context, id: egui::Id, anchor: Point, text: &str, color: egui::Color32) {
    egui::Area::new(id)
        .fixed_pos(egui::pos2(anchor.x as f32, anchor.y as f32))
        .pivot(egui::Align2::CENTER_CENTER)
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .color(color)
                    .size(TEXT_FONT_SIZE as f32),
            );
        });
}

/// Render text labels using egui, centred on their anchors
pub fn render_text_labels(mut contexts: EguiContexts, active: Res<ActiveDrawing>) -> Result {
    let ctx = contexts.ctx_mut()?;

    for (index, element) in active.drawing.elements().iter().enumerate() {
        if let Element::Text { anchor, label } = element {
            show_label(
                ctx,
                egui::Id::new(("canvas_text", index)),
                *anchor,
                label,
                theme::bevy_to_egui(theme::ELEMENT_STROKE),
            );
        }
    }

    let builder = active.drawing.builder();
    if let (Some(text), Some(anchor)) = (builder.text(), builder.points().first()) {
        show_label(
            ctx,
            egui::Id::new("canvas_text_pending"),
            *anchor,
            &format!("{}|", text),
            theme::bevy_to_egui(theme::PENDING_POINT),
        );
    }

    Ok(())
}
