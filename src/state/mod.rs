// src/state/mod.rs
use chrono::{DateTime, Local};

use crate::model::{DesignInput, StrategyAnalysis};
use crate::service::StrategyError;

/// The one message shown for every failure kind. The underlying error is
/// logged with full detail instead.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Strategy generation failed. Check your API key and try again.";

/// Identifies one in-flight request. A completion carrying a token other
/// than the current one is stale and gets discarded, so only the most
/// recent request's result is ever honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Request lifecycle as a tagged variant: the result exists only in
/// `Success` and the message only in `Error`, so illegal combinations are
/// unrepresentable.
#[derive(Debug)]
pub enum AnalysisPhase {
    Idle,
    Analyzing {
        token: RequestToken,
    },
    Success {
        analysis: StrategyAnalysis,
        generated_at: DateTime<Local>,
    },
    Error {
        message: String,
    },
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AnalysisPhase,
    /// Draft brief owned by the input form.
    pub form: DesignInput,
    next_token: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: AnalysisPhase::Idle,
            form: DesignInput::default(),
            next_token: 0,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, AnalysisPhase::Analyzing { .. })
    }

    pub fn can_submit(&self) -> bool {
        !self.is_analyzing() && self.form.is_complete()
    }

    /// Enter `Analyzing` and hand out the token for the request about to be
    /// spawned. Returns `None` while a request is outstanding; the submit
    /// path is a no-op in that state.
    pub fn begin_analysis(&mut self) -> Option<RequestToken> {
        if self.is_analyzing() {
            log::debug!("submit ignored: a request is already in flight");
            return None;
        }
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.phase = AnalysisPhase::Analyzing { token };
        Some(token)
    }

    /// Deliver the outcome of a spawned request. Stale outcomes (token
    /// mismatch, or no request outstanding) leave the phase untouched.
    pub fn finish_analysis(
        &mut self,
        token: RequestToken,
        result: Result<StrategyAnalysis, StrategyError>,
    ) {
        match self.phase {
            AnalysisPhase::Analyzing { token: current } if current == token => {}
            _ => {
                log::warn!("discarding stale analysis outcome for {token:?}");
                return;
            }
        }
        self.phase = match result {
            Ok(analysis) => {
                log::info!("strategy \"{}\" generated", analysis.core_concept);
                for color in &analysis.color_palette_suggestion {
                    if crate::model::analysis::parse_hex_rgb(color).is_none() {
                        log::warn!("palette entry {color:?} is not a hex color");
                    }
                }
                AnalysisPhase::Success {
                    analysis,
                    generated_at: Local::now(),
                }
            }
            Err(err) => {
                log::error!("strategy request failed: {err}");
                AnalysisPhase::Error {
                    message: GENERIC_ERROR_MESSAGE.to_string(),
                }
            }
        };
    }

    /// Manual retry from the error view. Resets UI state only; nothing is
    /// resubmitted and the form keeps its contents.
    pub fn reset_after_error(&mut self) {
        if matches!(self.phase, AnalysisPhase::Error { .. }) {
            self.phase = AnalysisPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_form() -> DesignInput {
        DesignInput {
            project_name: "Library".to_string(),
            requirements: "quiet study pods".to_string(),
            target_users: "students".to_string(),
            spatial_context: "120 sqm, north light".to_string(),
        }
    }

    fn sample_analysis() -> StrategyAnalysis {
        serde_json::from_value(json!({
            "coreConcept": "Quiet Oasis",
            "designPrinciples": ["Acoustic zoning"],
            "radarChartData": [{ "subject": "Acoustics", "A": 88, "fullMark": 100 }],
            "spatialGraphData": { "nodes": [], "links": [] },
            "detailedAnalysis": "Pods line the north wall.",
            "colorPaletteSuggestion": ["#0e7490"]
        }))
        .unwrap()
    }

    fn parse_error() -> StrategyError {
        StrategyError::Parse(serde_json::from_str::<serde_json::Value>("not json").unwrap_err())
    }

    #[test]
    fn submit_transitions_to_analyzing_then_success() {
        let mut state = AppState::new();
        state.form = sample_form();
        assert!(state.can_submit());

        let token = state.begin_analysis().expect("token issued");
        assert!(state.is_analyzing());

        state.finish_analysis(token, Ok(sample_analysis()));
        match &state.phase {
            AnalysisPhase::Success { analysis, .. } => {
                assert_eq!(analysis.core_concept, "Quiet Oasis");
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn second_submit_while_analyzing_is_a_no_op() {
        let mut state = AppState::new();
        state.form = sample_form();
        let first = state.begin_analysis();
        assert!(first.is_some());
        assert!(state.begin_analysis().is_none());
        assert!(!state.can_submit());
        assert!(state.is_analyzing());
    }

    #[test]
    fn failure_lands_in_error_with_the_generic_message() {
        let mut state = AppState::new();
        state.form = sample_form();
        let token = state.begin_analysis().unwrap();
        state.finish_analysis(token, Err(parse_error()));
        match &state.phase {
            AnalysisPhase::Error { message } => assert_eq!(message, GENERIC_ERROR_MESSAGE),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn retry_resets_to_idle_without_resubmitting() {
        let mut state = AppState::new();
        state.form = sample_form();
        let token = state.begin_analysis().unwrap();
        state.finish_analysis(token, Err(parse_error()));

        state.reset_after_error();
        assert!(matches!(state.phase, AnalysisPhase::Idle));
        // Form kept its contents and is ready to submit again.
        assert!(state.can_submit());
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut state = AppState::new();
        state.form = sample_form();
        let stale = state.begin_analysis().unwrap();

        // The first attempt errored and a second request was started.
        state.finish_analysis(stale, Err(parse_error()));
        state.reset_after_error();
        let current = state.begin_analysis().unwrap();

        // The stale completion arrives late; the new request is untouched.
        state.finish_analysis(stale, Ok(sample_analysis()));
        assert!(state.is_analyzing());

        state.finish_analysis(current, Ok(sample_analysis()));
        assert!(matches!(state.phase, AnalysisPhase::Success { .. }));
    }

    #[test]
    fn reset_is_ignored_outside_error() {
        let mut state = AppState::new();
        state.form = sample_form();
        let token = state.begin_analysis().unwrap();
        state.reset_after_error();
        assert!(state.is_analyzing());
        state.finish_analysis(token, Ok(sample_analysis()));
        state.reset_after_error();
        assert!(matches!(state.phase, AnalysisPhase::Success { .. }));
    }
}
