//! Health score arithmetic against hand-computed values.

use nexusiq::config::schema::ScoringConfig;
use nexusiq::data::rewriter::QualityDimensions;
use nexusiq::metrics::status::HealthStatus;
use nexusiq::metrics::{
    SystemHealth, clamp_score, content_health_from, latency_score, query_performance_from,
    user_adoption_from,
};

fn quality(v: f64) -> QualityDimensions {
    QualityDimensions {
        relevance: v,
        groundedness: v,
        completeness: v,
    }
}

#[test]
fn content_health_is_inverse_of_zero_rate() {
    assert_eq!(content_health_from(8.3).display_value(), 92);
    assert_eq!(content_health_from(0.0).display_value(), 100);
    assert_eq!(content_health_from(100.0).display_value(), 0);
    assert_eq!(content_health_from(140.0).display_value(), 0);
}

#[test]
fn query_performance_weights_three_inputs() {
    let cfg = ScoringConfig::default();
    // latency 18 ms -> 100 - 8 * (100/90) = 91.11; x0.4 = 36.44
    // match rate 60 -> 18; quality 4/5 -> 80 x0.3 = 24
    let score = query_performance_from(18.0, 60.0, &quality(4.0), &cfg);
    assert!((score.value - 78.444).abs() < 0.01, "{}", score.value);
    assert_eq!(score.display_value(), 78);
    assert_eq!(score.components.len(), 3);
}

#[test]
fn worked_examples() {
    let cfg = ScoringConfig::default();
    let q = QualityDimensions {
        relevance: 4.2,
        groundedness: 4.5,
        completeness: 4.0,
    };
    let qp = query_performance_from(18.0, 62.0, &q, &cfg);
    assert!((qp.value - 80.44).abs() < 0.01, "{}", qp.value);
    assert_eq!(qp.display_value(), 80);

    let ua = user_adoption_from(30.0, 80.0, 120, &cfg);
    assert!((ua.value - 72.0).abs() < 1e-9);
    assert_eq!(ua.display_value(), 72);
}

#[test]
fn latency_score_bounds() {
    let cfg = ScoringConfig::default();
    assert_eq!(latency_score(0.0, &cfg), 100.0);
    assert_eq!(latency_score(10.0, &cfg), 100.0);
    assert_eq!(latency_score(100.0, &cfg), 0.0);
    assert_eq!(latency_score(500.0, &cfg), 0.0);
    assert!((latency_score(55.0, &cfg) - 50.0).abs() < 1e-9);
}

#[test]
fn user_adoption_caps_stickiness_and_wau() {
    let cfg = ScoringConfig::default();
    // stickiness 25 of cap 50 -> 50 x0.4 = 20; positive 80 x0.3 = 24; WAU at cap -> 30
    let score = user_adoption_from(25.0, 80.0, 150, &cfg);
    assert!((score.value - 74.0).abs() < 1e-9);

    let capped = user_adoption_from(90.0, 100.0, 10_000, &cfg);
    assert_eq!(capped.display_value(), 100);
}

#[test]
fn overall_labels_follow_thresholds() {
    let cfg = ScoringConfig::default();
    let at = |v: f64| {
        SystemHealth::from_scores(
            content_health_from(100.0 - v),
            content_health_from(100.0 - v),
            content_health_from(100.0 - v),
            &cfg,
        )
    };
    assert_eq!(at(70.0).status, HealthStatus::Healthy);
    assert_eq!(at(69.4).status, HealthStatus::NeedsAttention);
    assert_eq!(at(50.0).status, HealthStatus::NeedsAttention);
    assert_eq!(at(49.0).status, HealthStatus::ActionRequired);
    assert_eq!(at(49.0).status.label(), "action required");
}

#[test]
fn label_matches_the_displayed_overall() {
    let cfg = ScoringConfig::default();
    // Mean 69.6 is shown as 70, so it must read healthy.
    let health = SystemHealth::from_scores(
        content_health_from(30.4),
        content_health_from(30.4),
        content_health_from(30.4),
        &cfg,
    );
    assert_eq!(health.overall_display(), 70);
    assert_eq!(health.status, HealthStatus::Healthy);

    let health = SystemHealth::from_scores(
        content_health_from(50.4),
        content_health_from(50.4),
        content_health_from(50.4),
        &cfg,
    );
    assert_eq!(health.overall_display(), 50);
    assert_eq!(health.status, HealthStatus::NeedsAttention);
}

#[test]
fn non_finite_inputs_do_not_poison_scores() {
    let cfg = ScoringConfig::default();
    assert_eq!(clamp_score(f64::NAN), 0.0);
    assert_eq!(clamp_score(f64::INFINITY), 0.0);

    let score = query_performance_from(f64::NAN, f64::NAN, &quality(f64::NAN), &cfg);
    assert!(score.value.is_finite());
    assert!((0.0..=100.0).contains(&score.value));
}

#[test]
fn weights_come_from_config() {
    let cfg = ScoringConfig {
        latency_weight: 1.0,
        match_rate_weight: 0.0,
        quality_weight: 0.0,
        ..ScoringConfig::default()
    };
    let score = query_performance_from(55.0, 90.0, &quality(5.0), &cfg);
    assert!((score.value - 50.0).abs() < 1e-9);

    let strict = ScoringConfig {
        healthy_threshold: 90.0,
        ..ScoringConfig::default()
    };
    let health = SystemHealth::from_scores(
        content_health_from(20.0),
        content_health_from(20.0),
        content_health_from(20.0),
        &strict,
    );
    assert_eq!(health.overall_display(), 80);
    assert_eq!(health.status, HealthStatus::NeedsAttention);
}
