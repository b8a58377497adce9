// src/app.rs
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use eframe::egui;

use crate::model::StrategyAnalysis;
use crate::service::{ServiceConfig, StrategyClient, StrategyError};
use crate::state::{AnalysisPhase, AppState, RequestToken};
use crate::ui::force_graph::ForceGraphView;
use crate::ui::{dashboard, input_panel};

/// Completion of one spawned request, delivered back to the UI thread.
struct AnalysisOutcome {
    token: RequestToken,
    result: Result<StrategyAnalysis, StrategyError>,
}

pub struct StrataApp {
    state: AppState,
    client: Arc<StrategyClient>,
    model_name: String,
    runtime: tokio::runtime::Handle,
    outcome_tx: Sender<AnalysisOutcome>,
    outcome_rx: Receiver<AnalysisOutcome>,
    /// Lives only while the success view is on screen; dropping it stops
    /// the layout simulation.
    graph_view: Option<ForceGraphView>,
}

impl StrataApp {
    pub fn new(config: ServiceConfig, runtime: tokio::runtime::Handle) -> Self {
        let (outcome_tx, outcome_rx) = channel();
        Self {
            state: AppState::new(),
            model_name: config.model.clone(),
            client: Arc::new(StrategyClient::new(config)),
            runtime,
            outcome_tx,
            outcome_rx,
            graph_view: None,
        }
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.state.finish_analysis(outcome.token, outcome.result);
        }
    }

    fn spawn_analysis(&mut self, ctx: &egui::Context) {
        let Some(token) = self.state.begin_analysis() else {
            return;
        };
        self.graph_view = None;

        let client = self.client.clone();
        let input = self.state.form.clone();
        let tx = self.outcome_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = client.generate(&input).await;
            if tx.send(AnalysisOutcome { token, result }).is_err() {
                log::debug!("analysis outcome dropped: app already shut down");
            }
            ctx.request_repaint();
        });
    }

    fn show_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("Model: {}", self.model_name)).small().weak());
            if !self.client.has_credential() {
                ui.separator();
                ui.colored_label(
                    egui::Color32::YELLOW,
                    egui::RichText::new("GEMINI_API_KEY not set").small(),
                );
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let status = match &self.state.phase {
                    AnalysisPhase::Idle => "idle",
                    AnalysisPhase::Analyzing { .. } => "analyzing...",
                    AnalysisPhase::Success { .. } => "strategy ready",
                    AnalysisPhase::Error { .. } => "error",
                };
                ui.label(egui::RichText::new(status).small().weak());
            });
        });
    }

    fn show_central(&mut self, ui: &mut egui::Ui) {
        let mut retry_clicked = false;
        match &self.state.phase {
            AnalysisPhase::Idle => {
                ui.add_space(ui.available_height() * 0.35);
                ui.vertical_centered(|ui| {
                    ui.heading("Ready to ideate");
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(
                            "Enter your project brief on the left to generate \
                             a full spatial strategy analysis.",
                        )
                        .weak(),
                    );
                });
            }
            AnalysisPhase::Analyzing { .. } => {
                ui.add_space(ui.available_height() * 0.35);
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(32.0));
                    ui.add_space(10.0);
                    ui.label(egui::RichText::new("Generating strategy...").strong());
                    ui.label(
                        egui::RichText::new(
                            "Connecting functional zones and analyzing user circulation.",
                        )
                        .small()
                        .weak(),
                    );
                });
            }
            AnalysisPhase::Error { message } => {
                ui.add_space(ui.available_height() * 0.35);
                ui.vertical_centered(|ui| {
                    ui.heading(egui::RichText::new("Analysis failed").color(egui::Color32::RED));
                    ui.add_space(6.0);
                    ui.label(message);
                    ui.add_space(12.0);
                    if ui.button("Retry").clicked() {
                        retry_clicked = true;
                    }
                });
            }
            AnalysisPhase::Success {
                analysis,
                generated_at,
            } => {
                let graph_view = self
                    .graph_view
                    .get_or_insert_with(|| ForceGraphView::new(&analysis.spatial_graph_data));
                dashboard::draw_dashboard(ui, analysis, *generated_at, graph_view);
            }
        }
        if retry_clicked {
            self.state.reset_after_error();
        }
    }
}

impl eframe::App for StrataApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_outcomes();

        // The force layout is scoped to the success view; tear it down the
        // moment the phase moves away so no simulation outlives its result.
        if !matches!(self.state.phase, AnalysisPhase::Success { .. }) {
            self.graph_view = None;
        }

        egui::SidePanel::left("input_panel")
            .exact_width(320.0)
            .resizable(false)
            .show(ctx, |ui| {
                if input_panel::draw_input_panel(ui, &mut self.state) {
                    self.spawn_analysis(ctx);
                }
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.show_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_central(ui);
        });
    }
}
