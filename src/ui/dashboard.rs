// src/ui/dashboard.rs
use chrono::{DateTime, Local};
use eframe::egui::{self, Color32, RichText, Stroke};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::model::{RadarAxis, StrategyAnalysis};
use crate::ui::force_graph::ForceGraphView;
use crate::ui::{markdown, parse_hex_color};

const ACCENT: Color32 = Color32::from_rgb(0x06, 0xb6, 0xd4);
const MUTED: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8);
const GRID: Color32 = Color32::from_rgb(0x33, 0x41, 0x55);

pub fn draw_dashboard(
    ui: &mut egui::Ui,
    analysis: &StrategyAnalysis,
    generated_at: DateTime<Local>,
    graph: &mut ForceGraphView,
) {
    egui::ScrollArea::vertical()
        .id_source("dashboard_scroll")
        .show(ui, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("STRATEGY GENERATED").small().color(ACCENT));
                ui.label(
                    RichText::new(generated_at.format("%Y-%m-%d %H:%M:%S").to_string())
                        .small()
                        .weak(),
                );
            });
            ui.heading(RichText::new(analysis.core_concept.as_str()).size(28.0).strong());
            ui.add_space(12.0);

            graph.show(ui, 400.0);
            ui.add_space(12.0);

            ui.columns(2, |columns| {
                columns[0].group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new("Performance radar").small().color(MUTED));
                    draw_radar(ui, &analysis.radar_chart_data);
                });
                columns[1].group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new("Metric breakdown").small().color(MUTED));
                    ui.add_space(6.0);
                    draw_metric_bars(ui, &analysis.radar_chart_data);
                });
            });
            ui.add_space(12.0);

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.heading("Core design principles");
                ui.add_space(4.0);
                for (i, principle) in analysis.design_principles.iter().enumerate() {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            RichText::new(format!("{}", i + 1))
                                .monospace()
                                .color(ACCENT),
                        );
                        ui.label(principle);
                    });
                    ui.add_space(2.0);
                }
            });
            ui.add_space(12.0);

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.heading("Mood palette");
                ui.add_space(6.0);
                draw_palette(ui, &analysis.color_palette_suggestion);
            });
            ui.add_space(12.0);

            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.heading("Detailed analysis");
                ui.add_space(4.0);
                markdown::render(ui, &analysis.detailed_analysis);
            });
            ui.add_space(8.0);
        });
}

fn draw_radar(ui: &mut egui::Ui, axes: &[RadarAxis]) {
    if axes.is_empty() {
        ui.label(RichText::new("No radar data returned.").weak());
        return;
    }
    let n = axes.len();
    // Axis 0 points straight up; the rest go clockwise.
    let point = |i: usize, r: f64| {
        let angle = std::f64::consts::FRAC_PI_2 - i as f64 * std::f64::consts::TAU / n as f64;
        [r * angle.cos(), r * angle.sin()]
    };

    let plot = Plot::new("performance_radar")
        .height(270.0)
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_background(false)
        .show_x(false)
        .show_y(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.5)
        .include_x(1.5)
        .include_y(-1.5)
        .include_y(1.5);

    plot.show(ui, |plot_ui| {
        for ring in 1..=5 {
            let r = ring as f64 / 5.0;
            let mut points: Vec<[f64; 2]> = (0..n).map(|i| point(i, r)).collect();
            points.push(points[0]);
            plot_ui.line(Line::new(PlotPoints::from(points)).color(GRID).width(1.0));
        }
        for i in 0..n {
            plot_ui.line(
                Line::new(PlotPoints::from(vec![[0.0, 0.0], point(i, 1.0)]))
                    .color(GRID)
                    .width(1.0),
            );
        }

        let values: Vec<[f64; 2]> = axes
            .iter()
            .enumerate()
            .map(|(i, axis)| point(i, axis.normalized()))
            .collect();
        plot_ui.polygon(
            Polygon::new(PlotPoints::from(values))
                .fill_color(Color32::from_rgba_unmultiplied(0x06, 0xb6, 0xd4, 80))
                .stroke(Stroke::new(2.0, ACCENT)),
        );

        for (i, axis) in axes.iter().enumerate() {
            let [x, y] = point(i, 1.25);
            plot_ui.text(
                Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(axis.subject.as_str()).size(12.0),
                )
                .color(MUTED)
                .anchor(egui::Align2::CENTER_CENTER),
            );
        }
    });
}

fn draw_metric_bars(ui: &mut egui::Ui, axes: &[RadarAxis]) {
    for axis in axes {
        ui.horizontal(|ui| {
            ui.label(RichText::new(axis.subject.as_str()).small());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("{:.0}%", axis.normalized() * 100.0))
                        .small()
                        .monospace()
                        .color(ACCENT),
                );
            });
        });
        ui.add(
            egui::ProgressBar::new(axis.normalized() as f32)
                .desired_width(ui.available_width())
                .fill(ACCENT),
        );
        ui.add_space(8.0);
    }
}

fn draw_palette(ui: &mut egui::Ui, colors: &[String]) {
    ui.horizontal(|ui| {
        for value in colors {
            ui.vertical(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(44.0, 44.0), egui::Sense::hover());
                match parse_hex_color(value) {
                    Some(color) => {
                        ui.painter().rect_filled(rect, 6.0, color);
                        ui.painter()
                            .rect_stroke(rect, 6.0, Stroke::new(1.0, Color32::from_gray(120)));
                    }
                    None => {
                        // Unparseable entries were already logged when the
                        // result arrived; show a neutral placeholder.
                        ui.painter()
                            .rect_stroke(rect, 6.0, Stroke::new(1.0, Color32::from_gray(90)));
                    }
                }
                ui.label(RichText::new(value.as_str()).small().monospace().weak());
            });
            ui.add_space(8.0);
        }
    });
}
