use eframe::egui;
use egui_plot::{Legend, Line, Plot};

use crate::app::GraphOxide;
use crate::constants::layout::{ENTRY_WINDOW_SIZE, SERIES_LIST_WIDTH};
use crate::constants::plot::{HIGHLIGHT_COLOR, SERIES_COLOR};
use crate::constants::scale::DEGENERATE_PADDING;
use crate::data::AxisRange;
use crate::state::{Axis, DatasetEntry, Edit};

/// What the user did inside one window this frame
#[derive(Default)]
struct WindowResponse {
    edits: Vec<Edit>,
    highlight: Option<Option<String>>,
    closed: bool,
}

/// Render one window per visible entry
pub fn render_entry_windows(app: &mut GraphOxide, ctx: &egui::Context) {
    profiling::scope!("render_entry_windows");

    let show_grid = app.state.config.show_grid;
    let show_legend = app.state.config.show_legend;
    let line_width = app.state.config.line_width;
    let resize_to = app.state.ui.resize_windows_to.take();

    let mut responses = Vec::new();
    for index in 0..app.state.project.len() {
        let Some(entry) = app.state.project.entry_mut(index) else {
            continue;
        };
        if !entry.visible() {
            continue;
        }
        entry.refresh_curves();

        let mut open = true;
        let mut response = WindowResponse::default();
        let mut window = egui::Window::new(entry.display_name().to_string())
            .id(egui::Id::new(("entry_window", entry.view().id())))
            .default_size(ENTRY_WINDOW_SIZE)
            .open(&mut open);
        if let Some(size) = resize_to {
            window = window.fixed_size(size);
        }
        let mut content_size = None;
        window.show(ctx, |ui| {
            content_size = Some(ui.max_rect().size());
            egui::SidePanel::right(egui::Id::new(("series_list", entry.view().id())))
                .resizable(false)
                .exact_width(SERIES_LIST_WIDTH)
                .show_inside(ui, |ui| render_series_list(entry, ui, &mut response));
            egui::CentralPanel::default().show_inside(ui, |ui| {
                render_entry_plot(entry, ui, show_grid, show_legend, line_width);
            });
        });
        if let Some(size) = content_size {
            entry.view_mut().window_size = Some(size.into());
        }
        response.closed = !open;
        responses.push((index, response));
    }

    for (index, response) in responses {
        if let (Some(highlight), Some(entry)) = (response.highlight, app.state.project.entry_mut(index)) {
            entry.view_mut().highlighted = highlight;
        }
        for edit in response.edits {
            let result = app.state.project.apply(index, edit);
            app.report(result);
        }
        if response.closed {
            let result = app.state.project.set_entry_visible(index, false);
            app.report(result);
        }
    }
}

fn render_series_list(entry: &DatasetEntry, ui: &mut egui::Ui, response: &mut WindowResponse) {
    let mut all = entry.all_series_visible();
    if ui.checkbox(&mut all, "All").changed() {
        response.edits.push(Edit::SetAllSeriesVisible(all));
    }
    ui.separator();

    let highlighted = entry.view().highlighted.as_deref();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (series, (name, &visible)) in entry
            .data()
            .series_names()
            .zip(entry.series_visible())
            .enumerate()
        {
            ui.horizontal(|ui| {
                let mut checked = visible;
                if ui.checkbox(&mut checked, "").changed() {
                    response.edits.push(Edit::SetSeriesVisible {
                        series,
                        visible: checked,
                    });
                }
                let is_highlighted = highlighted == Some(name);
                if ui
                    .selectable_label(is_highlighted, name)
                    .on_hover_text("Click to highlight")
                    .clicked()
                {
                    response.highlight = Some((!is_highlighted).then(|| name.to_string()));
                }
            });
        }
    });
}

fn render_entry_plot(
    entry: &mut DatasetEntry,
    ui: &mut egui::Ui,
    show_grid: bool,
    show_legend: bool,
    line_width: f32,
) {
    let target = (entry.scale(Axis::X), entry.scale(Axis::Y));
    let push_bounds = entry.view().applied_bounds != Some(target);

    let highlighted = entry.view().highlighted.clone();
    let lines: Vec<Line> = entry
        .data()
        .series_names()
        .filter_map(|name| {
            let curve = entry.view().curve(name)?;
            if !curve.visible {
                return None;
            }
            let color = if highlighted.as_deref() == Some(name) {
                HIGHLIGHT_COLOR
            } else {
                SERIES_COLOR
            };
            Some(
                Line::new(name, curve.points.clone())
                    .color(color)
                    .width(line_width),
            )
        })
        .collect();

    let mut plot = Plot::new(("entry_plot", entry.view().id()))
        .show_grid(show_grid)
        .x_axis_label(entry.data().index_name())
        .y_axis_label(y_axis_label(entry));
    if show_legend {
        plot = plot.legend(Legend::default().position(egui_plot::Corner::RightTop));
    }

    plot.show(ui, |plot_ui| {
        if push_bounds {
            let (x, y) = target;
            let (x, y) = (padded(x), padded(y));
            plot_ui.set_plot_bounds_x(x.min..=x.max);
            plot_ui.set_plot_bounds_y(y.min..=y.max);
        }
        for line in lines {
            plot_ui.line(line);
        }
    });

    if push_bounds {
        entry.view_mut().applied_bounds = Some(target);
    }
}

/// Y values are plotted in the display unit
fn y_axis_label(entry: &DatasetEntry) -> &'static str {
    entry.unit_final().label()
}

/// Zero-width ranges cannot be shown; widen them around their value
fn padded(range: AxisRange) -> AxisRange {
    if range.width() > 0.0 {
        range
    } else {
        AxisRange::new(range.min - DEGENERATE_PADDING, range.max + DEGENERATE_PADDING)
    }
}
