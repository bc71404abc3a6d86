use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::canvas::tools::{display_name, usage_hint, ALL_TOOLS};
use crate::canvas::{ActiveDrawing, HoverState};
use crate::config::StoreCanvasSettingsRequest;
use crate::constants::{MAX_GRID_STEP, MIN_GRID_STEP};
use crate::model::{Builder, ElementKind, Pending, Scene};
use crate::theme;

/// Main toolbar showing tools, grid step and edit actions
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveDrawing>,
    mut store_events: MessageWriter<StoreCanvasSettingsRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                // Tool buttons with keyboard shortcuts
                for tool in ALL_TOOLS {
                    let selected = active.drawing.tool() == tool;

                    let button = egui::Button::new(
                        egui::RichText::new(tool_button_label(tool)).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(selected);

                    let response = ui.add(button);
                    if response.clicked() {
                        active.drawing.set_tool(tool);
                    }
                    response.on_hover_text(display_name(tool));
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                // Grid step
                let mut step = active.drawing.scene().grid_step();
                let response = ui
                    .add(egui::Slider::new(&mut step, MIN_GRID_STEP..=MAX_GRID_STEP).text("Grid"))
                    .on_hover_text("Snapping pitch in pixels (1-9)");
                if response.changed() {
                    active.drawing.set_grid_step(step);
                    let scene = active.drawing.scene();
                    store_events.write(StoreCanvasSettingsRequest {
                        origin: scene.origin(),
                        grid_step: scene.grid_step(),
                    });
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let can_commit = can_commit(active.drawing.builder());
                if ui
                    .add_enabled(can_commit, egui::Button::new("Commit"))
                    .on_hover_text("Finish the polygon or label (Enter)")
                    .clicked()
                {
                    active.drawing.commit_pending();
                }

                let has_elements = !active.drawing.elements().is_empty();
                if ui
                    .add_enabled(has_elements, egui::Button::new("Undo"))
                    .on_hover_text("Remove the last element (Ctrl+Z)")
                    .clicked()
                {
                    active.drawing.undo();
                }

                if ui
                    .add_enabled(has_elements, egui::Button::new("Clear"))
                    .on_hover_text("Remove every element (Ctrl+Shift+Delete)")
                    .clicked()
                {
                    active.drawing.clear_all();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{} elements", active.drawing.elements().len()))
                            .color(theme::ui::LABEL_TEXT),
                    );
                });
            });
        });
    Ok(())
}

/// Status bar: pointer position, builder state and what the pointer touches
pub fn status_bar_ui(
    mut contexts: EguiContexts,
    active: Res<ActiveDrawing>,
    hover: Res<HoverState>,
) -> Result {
    let scene = active.drawing.scene();

    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 4)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                let position = hover
                    .snapped
                    .map(|p| scene.to_export(p).to_string())
                    .unwrap_or_else(|| "-".to_string());
                ui.label(egui::RichText::new(position).monospace())
                    .on_hover_text("Snapped pointer position relative to the origin");

                ui.separator();
                ui.label(describe_builder(active.drawing.builder()));

                if let Some(hit) = hover.hit {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(describe_hit(scene, hit.index, hit.point_index))
                            .color(theme::ui::SUCCESS_TEXT),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "origin {}  grid {}",
                            scene.origin(),
                            scene.grid_step()
                        ))
                        .color(theme::ui::HINT_TEXT)
                        .size(11.0),
                    );
                });
            });
        });
    Ok(())
}

/// Get the button label for a tool (with keyboard shortcut)
fn tool_button_label(tool: ElementKind) -> &'static str {
    match tool {
        ElementKind::Line => "Line [L]",
        ElementKind::Rect => "Rect [R]",
        ElementKind::Oval => "Oval [O]",
        ElementKind::Polygon => "Polygon [P]",
        ElementKind::Text => "Text [T]",
    }
}

fn can_commit(builder: &Builder) -> bool {
    match builder.pending() {
        Pending::Points(points) => builder.tool() == ElementKind::Polygon && points.len() >= 2,
        Pending::Label { text, .. } => !text.is_empty(),
        Pending::Empty => false,
    }
}

/// One-line summary of the shape being placed
pub fn describe_builder(builder: &Builder) -> String {
    let tool = builder.tool();
    match builder.pending() {
        Pending::Empty => usage_hint(tool).to_string(),
        Pending::Points(points) if tool == ElementKind::Polygon => {
            format!("polygon: {} vertices, Enter to close", points.len())
        }
        Pending::Points(_) => format!("{}: click the second point, Esc to cancel", tool),
        Pending::Label { text, .. } if text.is_empty() => {
            "text: type a label, Esc to cancel".to_string()
        }
        Pending::Label { text, .. } => format!("text: \"{}\", Enter to finish", text),
    }
}

/// Hit-test result as "rect #2, point 1 (x, y)" in export coordinates.
///
/// Elements are numbered from 1 in draw order, matching the export panel lines.
pub fn describe_hit(scene: &Scene, index: usize, point_index: Option<usize>) -> String {
    let Some(element) = scene.get(index) else {
        return String::new();
    };
    let prefix = format!("{} #{}", element.kind(), index + 1);
    match point_index.and_then(|i| element.point_touch(i).map(|p| (i, p))) {
        Some((i, point)) => format!("{}, point {} {}", prefix, i, scene.to_export(point)),
        None => format!("{}, inside", prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, Point};

    #[test]
    fn test_tool_button_labels_have_shortcuts() {
        for tool in ALL_TOOLS {
            assert!(tool_button_label(tool).contains('['), "{:?}", tool);
        }
    }

    #[test]
    fn test_describe_hit_control_point() {
        let mut scene = Scene::new(Point::new(100, 100), 1);
        scene.append(Element::line(0, 0, 1, 1));
        scene.append(Element::rect(100, 100, 200, 150));
        assert_eq!(describe_hit(&scene, 1, Some(2)), "rect #2, point 2 (100, -50)");
    }

    #[test]
    fn test_describe_hit_interior() {
        let mut scene = Scene::default();
        scene.append(Element::oval(50, 50, 10, 10));
        assert_eq!(describe_hit(&scene, 0, None), "oval #1, inside");
        assert_eq!(describe_hit(&scene, 3, None), "");
    }

    #[test]
    fn test_describe_builder_states() {
        let mut builder = Builder::new(ElementKind::Polygon);
        assert_eq!(describe_builder(&builder), usage_hint(ElementKind::Polygon));
        builder.add_point(Point::new(0, 0));
        builder.add_point(Point::new(5, 0));
        assert_eq!(describe_builder(&builder), "polygon: 2 vertices, Enter to close");

        let mut builder = Builder::new(ElementKind::Text);
        builder.add_point(Point::new(0, 0));
        builder.append_text_char('h');
        builder.append_text_char('i');
        assert_eq!(describe_builder(&builder), "text: \"hi\", Enter to finish");
    }

    #[test]
    fn test_can_commit() {
        let mut builder = Builder::new(ElementKind::Polygon);
        builder.add_point(Point::new(0, 0));
        assert!(!can_commit(&builder));
        builder.add_point(Point::new(3, 3));
        assert!(can_commit(&builder));

        let mut builder = Builder::new(ElementKind::Text);
        builder.add_point(Point::new(0, 0));
        assert!(!can_commit(&builder));
        builder.append_text_char('a');
        assert!(can_commit(&builder));
    }
}
