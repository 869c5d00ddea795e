use crate::analysis::{self, CostSummary, ServiceSummary, SPEND_CEILING, UTILIZATION_FLOOR};
use crate::chat::ChatOrchestrator;
use crate::models::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    ConfirmQuit,
    /// Popup raised when the newest cost point trips the anomaly thresholds.
    Alert,
}

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Dashboard,
    Chat,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub running: bool,
    pub status: String,
    pub screen: Screen,
    pub focus: Focus,
    pub compact_mode: bool,
    pub refreshing: bool,
    pub snapshot: Snapshot,
    pub summary: CostSummary,
    pub service_summary: ServiceSummary,
    pub forecast_summary: CostSummary,
    pub alert: Option<String>,
    pub chat: ChatOrchestrator,
    pub chat_input: String,
    pub chat_scroll: usize,
    pub confirm_selected: usize,
    pub last_refresh: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            running: true,
            status: "ready".into(),
            screen: Screen::Dashboard,
            focus: Focus::Dashboard,
            compact_mode: false,
            refreshing: false,
            snapshot: Snapshot::default(),
            summary: analysis::summarize(&[]),
            service_summary: analysis::summarize_services(&[]),
            forecast_summary: analysis::summarize(&[]),
            alert: None,
            chat: ChatOrchestrator::new(),
            chat_input: String::new(),
            chat_scroll: 0,
            confirm_selected: 0,
            last_refresh: "never".into(),
        }
    }
}

impl AppState {
    /// Replace the visible dataset and recompute every derived view. Summaries
    /// are transient and rebuilt here on each successful refresh.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.summary = analysis::summarize(&snapshot.cost);
        self.service_summary = analysis::summarize_services(&snapshot.services);
        self.forecast_summary = analysis::summarize(&snapshot.forecast);
        self.alert = analysis::latest_anomaly(&snapshot.cost).map(|point| {
            format!(
                "Cost anomaly at {}: spend over ${SPEND_CEILING:.0} with utilization below {UTILIZATION_FLOOR:.0}%",
                point.timestamp
            )
        });
        self.last_refresh = snapshot
            .fetched_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".into());
        self.snapshot = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CostPoint;
    use chrono::Utc;

    fn snapshot_with_latest(aws: f64, utilization: f64) -> Snapshot {
        Snapshot {
            cost: vec![
                CostPoint {
                    timestamp: "d1".into(),
                    aws: 10.0,
                    gcp: 10.0,
                    azure: 10.0,
                    utilization: 90.0,
                },
                CostPoint {
                    timestamp: "d2".into(),
                    aws,
                    gcp: 0.0,
                    azure: 0.0,
                    utilization,
                },
            ],
            fetched_at: Some(Utc::now()),
            ..Snapshot::default()
        }
    }

    #[test]
    fn apply_snapshot_recomputes_summary_and_alert() {
        let mut state = AppState::default();
        state.apply_snapshot(snapshot_with_latest(2500.0, 40.0));

        assert_eq!(state.summary.total_cost, 2530.0);
        assert_eq!(state.summary.anomalies.len(), 1);
        let alert = state.alert.as_deref().expect("alert");
        assert!(alert.contains("d2"));
        assert!(alert.contains("$2000"));
        assert!(alert.contains("70%"));
        assert_ne!(state.last_refresh, "never");
    }

    #[test]
    fn healthy_latest_point_clears_the_alert() {
        let mut state = AppState::default();
        state.apply_snapshot(snapshot_with_latest(2500.0, 40.0));
        state.apply_snapshot(snapshot_with_latest(100.0, 95.0));
        assert!(state.alert.is_none());
    }
}
