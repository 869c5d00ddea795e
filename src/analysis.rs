use crate::models::{CostPoint, ServicePoint};

/// Utilization below this while spend is above `SPEND_CEILING` marks a point
/// anomalous. Both values appear verbatim in user-facing copy.
pub const UTILIZATION_FLOOR: f64 = 70.0;
pub const SPEND_CEILING: f64 = 2000.0;

/// Fixed provider ordering; ties on equal spend resolve to the earliest entry.
const PROVIDERS: [&str; 3] = ["aws", "gcp", "azure"];
const SERVICES: [&str; 4] = ["ec2", "s3", "lambda", "rds"];

/// A point in a spend series that can be screened for anomalies.
pub trait SpendPoint {
    fn total_spend(&self) -> f64;
    fn utilization(&self) -> f64;
}

impl SpendPoint for CostPoint {
    fn total_spend(&self) -> f64 {
        self.aws + self.gcp + self.azure
    }

    fn utilization(&self) -> f64 {
        self.utilization
    }
}

impl SpendPoint for ServicePoint {
    fn total_spend(&self) -> f64 {
        self.ec2 + self.s3 + self.lambda + self.rds
    }

    fn utilization(&self) -> f64 {
        self.utilization
    }
}

/// Derived view over a cost series. Not persisted; recomputed per render.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    pub total_cost: f64,
    pub avg_utilization: f64,
    pub dominant_provider: (String, f64),
    pub anomalies: Vec<CostPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSummary {
    pub total_cost: f64,
    pub avg_utilization: f64,
    pub dominant_service: (String, f64),
    pub anomalies: Vec<ServicePoint>,
}

fn mean_utilization<P: SpendPoint>(points: &[P]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points.iter().map(SpendPoint::utilization).sum::<f64>() / points.len() as f64
}

fn dominant(labels: &[&str], sums: &[f64]) -> (String, f64) {
    let mut best = 0;
    for (idx, sum) in sums.iter().enumerate() {
        if *sum > sums[best] {
            best = idx;
        }
    }
    (labels[best].to_string(), sums[best])
}

/// Summarize a multi-cloud cost series. Safe on empty input: zero totals,
/// zero utilization (never NaN), first-ordered provider at zero spend.
pub fn summarize(points: &[CostPoint]) -> CostSummary {
    let sums = [
        points.iter().map(|p| p.aws).sum::<f64>(),
        points.iter().map(|p| p.gcp).sum::<f64>(),
        points.iter().map(|p| p.azure).sum::<f64>(),
    ];

    CostSummary {
        total_cost: sums.iter().sum(),
        avg_utilization: mean_utilization(points),
        dominant_provider: dominant(&PROVIDERS, &sums),
        anomalies: detect_anomalies(points),
    }
}

/// Summarize the AWS per-service breakdown series.
pub fn summarize_services(points: &[ServicePoint]) -> ServiceSummary {
    let sums = [
        points.iter().map(|p| p.ec2).sum::<f64>(),
        points.iter().map(|p| p.s3).sum::<f64>(),
        points.iter().map(|p| p.lambda).sum::<f64>(),
        points.iter().map(|p| p.rds).sum::<f64>(),
    ];

    ServiceSummary {
        total_cost: sums.iter().sum(),
        avg_utilization: mean_utilization(points),
        dominant_service: dominant(&SERVICES, &sums),
        anomalies: detect_anomalies(points),
    }
}

/// Flag points with low utilization and high spend. Both thresholds are
/// strict: exactly 70% utilization or exactly $2000 spend is not anomalous.
/// Input order is preserved; the result may be empty.
pub fn detect_anomalies<P: SpendPoint + Clone>(points: &[P]) -> Vec<P> {
    points
        .iter()
        .filter(|p| p.utilization() < UTILIZATION_FLOOR && p.total_spend() > SPEND_CEILING)
        .cloned()
        .collect()
}

/// The alert condition the dashboard raises on refresh: the most recent
/// point in the series is anomalous.
pub fn latest_anomaly(points: &[CostPoint]) -> Option<&CostPoint> {
    points
        .last()
        .filter(|p| p.utilization < UTILIZATION_FLOOR && p.total_spend() > SPEND_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(aws: f64, gcp: f64, azure: f64, utilization: f64) -> CostPoint {
        CostPoint {
            timestamp: "d1".into(),
            aws,
            gcp,
            azure,
            utilization,
        }
    }

    #[test]
    fn summarize_totals_match_per_point_sums() {
        let points = vec![point(100.0, 50.0, 25.0, 80.0), point(200.0, 75.0, 10.0, 60.0)];
        let summary = summarize(&points);
        assert_eq!(summary.total_cost, 460.0);
        assert_eq!(summary.avg_utilization, 70.0);
        assert_eq!(summary.dominant_provider, ("aws".to_string(), 300.0));
    }

    #[test]
    fn summarize_empty_series_is_nan_safe() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.avg_utilization, 0.0);
        assert!(!summary.avg_utilization.is_nan());
        assert_eq!(summary.dominant_provider, ("aws".to_string(), 0.0));
        assert!(summary.anomalies.is_empty());
    }

    #[test]
    fn dominant_provider_tie_breaks_by_fixed_ordering() {
        let points = vec![point(500.0, 500.0, 100.0, 90.0)];
        let summary = summarize(&points);
        assert_eq!(summary.dominant_provider.0, "aws");
    }

    #[test]
    fn detects_high_spend_low_utilization() {
        let points = vec![point(1500.0, 400.0, 200.0, 50.0)];
        let anomalies = detect_anomalies(&points);
        assert_eq!(anomalies, points);
    }

    #[test]
    fn high_utilization_is_not_anomalous() {
        let points = vec![point(1500.0, 400.0, 200.0, 80.0)];
        assert!(detect_anomalies(&points).is_empty());
    }

    #[test]
    fn thresholds_are_strict() {
        // Exactly 70% utilization: not an anomaly.
        let at_floor = vec![point(1500.0, 400.0, 200.0, UTILIZATION_FLOOR)];
        assert!(detect_anomalies(&at_floor).is_empty());

        // Exactly $2000 total: not an anomaly.
        let at_ceiling = vec![point(1000.0, 600.0, 400.0, 50.0)];
        assert!(detect_anomalies(&at_ceiling).is_empty());

        let just_over = vec![point(1000.0, 600.0, 400.01, 69.99)];
        assert_eq!(detect_anomalies(&just_over).len(), 1);
    }

    #[test]
    fn detect_anomalies_preserves_order_and_is_idempotent() {
        let points = vec![
            point(2500.0, 0.0, 0.0, 10.0),
            point(10.0, 10.0, 10.0, 95.0),
            point(0.0, 3000.0, 0.0, 20.0),
        ];
        let first = detect_anomalies(&points);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].aws, 2500.0);
        assert_eq!(first[1].gcp, 3000.0);
        assert_eq!(detect_anomalies(&first), first);
    }

    #[test]
    fn service_points_use_four_way_spend() {
        let points = vec![ServicePoint {
            timestamp: "d1".into(),
            ec2: 900.0,
            s3: 500.0,
            lambda: 400.0,
            rds: 300.0,
            utilization: 40.0,
        }];
        let summary = summarize_services(&points);
        assert_eq!(summary.total_cost, 2100.0);
        assert_eq!(summary.dominant_service, ("ec2".to_string(), 900.0));
        assert_eq!(summary.anomalies.len(), 1);
    }

    #[test]
    fn latest_anomaly_only_checks_the_newest_point() {
        let healthy_tail = vec![point(2500.0, 0.0, 0.0, 10.0), point(10.0, 10.0, 10.0, 95.0)];
        assert!(latest_anomaly(&healthy_tail).is_none());

        let alerting_tail = vec![point(10.0, 10.0, 10.0, 95.0), point(2500.0, 0.0, 0.0, 10.0)];
        assert!(latest_anomaly(&alerting_tail).is_some());
        assert!(latest_anomaly(&[]).is_none());
    }
}
