//! Integration tests for greenscore-core
//!
//! These tests exercise the full classify → score → insights/incentives
//! pipeline over the built-in sample set and imported files.

use greenscore_core::{
    category_summary, eligible_incentives, esg_breakdown,
    import::parse_csv,
    insights, score, tier_and_progress, Category, Classifier, InMemorySource, MalformedPolicy,
    Priority, ScoreStatus, ScoringEngine, TierId, Transaction, TransactionSource,
};

fn sample_transactions() -> Vec<Transaction> {
    let classifier = Classifier::embedded().expect("embedded rules should parse");
    InMemorySource::sample(&classifier)
        .expect("sample set should classify")
        .all()
}

// =============================================================================
// Scoring Pipeline Tests
// =============================================================================

#[test]
fn test_sample_set_score() {
    let txns = sample_transactions();
    let result = score(&txns).unwrap();

    assert_eq!(result.total_transactions, 16);
    assert_eq!(result.weighted_sum, 30.5);
    assert_eq!(result.green_score, 81);
    assert_eq!(result.status, ScoreStatus::High);
    assert_eq!(result.net_impact, 25);
    assert_eq!(result.skipped, 0);

    assert_eq!(result.esg.environmental, 75);
    assert_eq!(result.esg.social, 69);
    assert_eq!(result.esg.governance, 59);
    assert_eq!(esg_breakdown(&txns).unwrap(), result.esg);

    assert!(result.explanation.starts_with("Excellent!"));
}

#[test]
fn test_sample_set_score_is_deterministic() {
    let txns = sample_transactions();
    let first = score(&txns).unwrap();
    for _ in 0..5 {
        assert_eq!(score(&txns).unwrap(), first);
    }

    let json_a = serde_json::to_string(&first).unwrap();
    let json_b = serde_json::to_string(&score(&txns).unwrap()).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn test_sample_set_score_ignores_order() {
    let txns = sample_transactions();
    let expected = score(&txns).unwrap();

    let mut reversed = txns.clone();
    reversed.reverse();
    assert_eq!(score(&reversed).unwrap(), expected);

    // interleave odd and even positions
    let (even, odd): (Vec<_>, Vec<_>) = txns
        .iter()
        .cloned()
        .enumerate()
        .partition(|(i, _)| i % 2 == 0);
    let interleaved: Vec<Transaction> = odd.into_iter().chain(even).map(|(_, t)| t).collect();
    assert_eq!(score(&interleaved).unwrap(), expected);
}

#[test]
fn test_sample_category_summary() {
    let summary = category_summary(&sample_transactions());

    let transport = &summary[&Category::Transport];
    assert_eq!(transport.count, 6);
    assert_eq!(transport.total_impact, 8);
    assert_eq!(transport.weighted_impact, 12.0);
    assert_eq!(transport.total_amount, 26700.0);

    assert_eq!(summary[&Category::Shopping].weighted_impact, 0.0);
    assert_eq!(summary[&Category::Donations].count, 1);
    assert!(!summary.contains_key(&Category::Other));
}

#[test]
fn test_adversarial_batches_stay_in_range() {
    let classifier = Classifier::embedded().unwrap();
    let flight = classifier
        .classify_record(&greenscore_core::RawTransaction::new(
            "Flight Ticket",
            7500.0,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        ))
        .unwrap();
    let metro = classifier
        .classify_record(&greenscore_core::RawTransaction::new(
            "Metro Rail Pass",
            1500.0,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        ))
        .unwrap();

    for n in [1usize, 7, 20, 200] {
        let low = score(&vec![flight.clone(); n]).unwrap();
        let high = score(&vec![metro.clone(); n]).unwrap();
        assert!(low.green_score <= 100 && high.green_score <= 100);
        assert!(low.green_score <= 50 && high.green_score >= 50);
    }
    assert_eq!(score(&vec![flight; 20]).unwrap().green_score, 0);
    assert_eq!(score(&vec![metro; 20]).unwrap().green_score, 100);
}

#[test]
fn test_malformed_record_policies() {
    let mut txns = sample_transactions();
    txns[3].eco_impact = 11;

    assert!(score(&txns).unwrap_err().is_invalid_input());

    let skipped = ScoringEngine::with_policy(MalformedPolicy::Skip)
        .score(&txns)
        .unwrap();
    assert_eq!(skipped.skipped, 1);
    assert_eq!(skipped.total_transactions, 15);
}

// =============================================================================
// Insights and Incentives Tests
// =============================================================================

#[test]
fn test_sample_insights() {
    let txns = sample_transactions();
    let scored = score(&txns).unwrap();
    let result = insights(&scored, &txns);

    assert_eq!(
        result.summary,
        "Excellent sustainability profile! You made 11 eco-friendly choices this period."
    );

    let titles: Vec<_> = result.highlights.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Top Sustainable Choice", "Sustainability Champion", "Green Contributor"]
    );
    assert_eq!(
        result.highlights[0].description,
        "Metro Rail Monthly Pass - Excellent eco-friendly decision!"
    );

    let keys: Vec<_> = result.recommendations.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["recommendation:worst:TXN006", "recommendation:keep_up"]);
    assert_eq!(result.recommendations[0].priority, Priority::Medium);
    assert_eq!(
        result.recommendations[0].action,
        "Review spending like 'Flight Ticket - Domestic'"
    );

    let dist = result.impact_distribution;
    assert_eq!(dist.positive_count, 11);
    assert_eq!(dist.negative_count, 4);
    assert_eq!(dist.neutral_count, 1);
    assert_eq!(dist.total_positive_impact, 41);
    assert_eq!(dist.total_negative_impact, -16);

    let esg = result.esg_insights.unwrap();
    assert_eq!(esg.environmental.insight, "9 of 14 transactions are eco-friendly");
    assert_eq!(esg.governance.insight, "2 digital/transparent payment(s) detected");
}

#[test]
fn test_insights_are_deterministic() {
    let txns = sample_transactions();
    let scored = score(&txns).unwrap();

    let mut reversed = txns.clone();
    reversed.reverse();
    assert_eq!(insights(&scored, &txns), insights(&scored, &reversed));
}

#[test]
fn test_sample_incentives() {
    let scored = score(&sample_transactions()).unwrap();
    let standing = tier_and_progress(i64::from(scored.green_score)).unwrap();

    assert_eq!(standing.tier.id, TierId::Gold);
    assert_eq!(standing.progress.next_tier, Some(TierId::Platinum));
    assert_eq!(standing.progress.points_needed, 4);
    assert_eq!(standing.progress.percent_to_next, 73);

    let report = eligible_incentives(i64::from(scored.green_score)).unwrap();
    assert!(report.incentives.iter().all(|i| i.eligible));
}

#[test]
fn test_empty_pipeline() {
    let scored = score(&[]).unwrap();
    assert_eq!(scored.green_score, 50);

    let result = insights(&scored, &[]);
    assert_eq!(result.summary, "No transaction data available for analysis.");

    assert_eq!(tier_and_progress(50).unwrap().tier.id, TierId::Silver);
}

// =============================================================================
// Import Tests
// =============================================================================

#[test]
fn test_imported_csv_pipeline() {
    let data = "\
date,description,amount,merchant
2026-02-01,Flight Ticket - International,42000,AirIndia
2026-02-03,Petrol Fuel Purchase,3000,Indian Oil
2026-02-04,Fast Fashion Haul,6000,QuickTrends
2026-02-05,Hardware Store,900,
";
    let raws = parse_csv(data.as_bytes()).unwrap();
    let classifier = Classifier::embedded().unwrap();
    let source = InMemorySource::from_raw(&classifier, &raws).unwrap();
    let txns = source.all();

    // -7.5 - 6 - 3.2 + 0 = -16.7 → 33.3 → 33
    let scored = score(&txns).unwrap();
    assert_eq!(scored.green_score, 33);
    assert_eq!(scored.status, ScoreStatus::Low);
    assert_eq!(scored.breakdown[&Category::Other].count, 1);

    let result = insights(&scored, &txns);
    assert!(result.summary.starts_with("Room for improvement"));
    // the worst flight leads, then boost (17), Transport (13.5), Shopping (3.2)
    let keys: Vec<_> = result.recommendations.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys.len(), 4);
    assert!(keys[0].starts_with("recommendation:worst:TXN-"));
    assert_eq!(
        result.recommendations[0].action,
        "Review spending like 'Flight Ticket - International'"
    );
    assert_eq!(
        &keys[1..],
        &[
            "recommendation:boost",
            "recommendation:category:Transport",
            "recommendation:category:Shopping",
        ]
    );
    assert_eq!(result.recommendations[1].priority, Priority::High);
    assert!(result.highlights.is_empty());

    assert_eq!(tier_and_progress(33).unwrap().tier.id, TierId::Bronze);
}
