//! Alert and metrics synthesis.

use chrono::{Duration, TimeZone, Utc};
use riskdesk_core::{
    alert_synthesizer::{AlertSynthesizer, ALERT_BATCH_SIZE},
    metrics_synthesizer::MetricsSynthesizer,
    model::{AlertStatus, AlertType},
    rng::SynthRng,
};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap()
}

#[test]
fn always_twelve_alerts() {
    let synth = AlertSynthesizer::new();
    let mut rng = SynthRng::seeded(42);
    for _ in 0..50 {
        let alerts = synth.synthesize_alerts(now(), &mut rng);
        assert_eq!(alerts.len(), ALERT_BATCH_SIZE);
        assert_eq!(alerts.len(), 12);
    }
}

#[test]
fn alert_fields_are_well_formed() {
    let synth = AlertSynthesizer::new();
    let mut rng = SynthRng::seeded(7);
    let type_tokens: Vec<&str> = AlertType::ALL.iter().map(|t| t.as_str()).collect();

    for _ in 0..50 {
        for alert in synth.synthesize_alerts(now(), &mut rng) {
            assert!(
                matches!(alert.status, AlertStatus::New | AlertStatus::Investigating),
                "Fresh alert has status {:?}",
                alert.status
            );
            assert!(alert.timestamp <= now());
            assert!(alert.timestamp > now() - Duration::hours(6), "Alert older than 6h");
            assert!(alert.id.starts_with("ALR") && alert.id.len() == 12, "Bad id {}", alert.id);
            assert!(alert.transaction_id.starts_with("TXN") && alert.transaction_id.len() == 12);

            let token = alert
                .title
                .strip_prefix("Suspicious ")
                .and_then(|rest| rest.strip_suffix(" activity detected"))
                .unwrap_or_else(|| panic!("Unexpected title {}", alert.title));
            assert!(type_tokens.contains(&token), "Unknown type token {token}");

            if let Some(assignee) = &alert.assigned_to {
                assert_eq!(assignee, "analyst@bank.com");
            }
        }
    }
}

#[test]
fn status_and_assignee_splits_are_plausible() {
    let synth = AlertSynthesizer::new();
    let mut rng = SynthRng::seeded(2718);
    let alerts: Vec<_> = (0..500)
        .flat_map(|_| synth.synthesize_alerts(now(), &mut rng))
        .collect();
    let total = alerts.len() as f64;

    let new_share = alerts.iter().filter(|a| a.status == AlertStatus::New).count() as f64 / total;
    assert!((new_share - 0.4).abs() < 0.03, "New share was {new_share}");

    let assigned = alerts.iter().filter(|a| a.assigned_to.is_some()).count() as f64 / total;
    assert!((assigned - 0.5).abs() < 0.03, "Assigned share was {assigned}");
}

#[test]
fn alert_json_uses_front_end_field_names() {
    let mut rng = SynthRng::seeded(1);
    let alerts = AlertSynthesizer::new().synthesize_alerts(now(), &mut rng);
    let value = serde_json::to_value(&alerts[0]).unwrap();
    assert!(value.get("type").is_some(), "Missing 'type': {value}");
    assert!(value.get("transactionId").is_some(), "Missing 'transactionId': {value}");
    match &alerts[0].assigned_to {
        Some(_) => assert!(value.get("assignedTo").is_some()),
        None => assert!(value.get("assignedTo").is_none()),
    }
}

#[test]
fn metrics_are_a_fixed_snapshot() {
    let metrics = MetricsSynthesizer::new().synthesize_metrics();
    assert_eq!(metrics.total_transactions, 15_427);
    assert_eq!(metrics.flagged_transactions, 342);
    assert_eq!(metrics.false_positive_rate, 0.12);
    assert_eq!(metrics.average_risk_score, 0.23);
    assert_eq!(metrics.alerts_today, 23);
    assert_eq!(metrics.blocked_amount, 2_847_392.45);
    assert_eq!(metrics.review_backlog, 18);
    assert_eq!(metrics.response_time, 4.2);
    assert_eq!(metrics, MetricsSynthesizer::new().synthesize_metrics());
}
