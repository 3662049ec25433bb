use chrono::{DateTime, Duration, TimeZone, Utc};
use ideapile::buckets::{group_by_time, Tier};
use ideapile::store::types::Idea;

fn idea_at(id: &str, timestamp: DateTime<Utc>) -> Idea {
    Idea {
        id: id.to_string(),
        content: format!("idea {id}"),
        timestamp,
        tags: Vec::new(),
        is_favorite: false,
        connections: Vec::new(),
        enrichments: Vec::new(),
    }
}

/// Thursday 2026-08-06, 16:00 UTC.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 16, 0, 0).unwrap()
}

#[test]
fn identical_inputs_produce_identical_buckets() {
    let ideas: Vec<Idea> = (0..50)
        .map(|i| idea_at(&format!("i{i:02}"), now() - Duration::hours(i * 17)))
        .collect();

    let first = group_by_time(&ideas, now());
    let second = group_by_time(&ideas, now());

    let flat = |buckets: &[ideapile::buckets::Bucket]| -> Vec<(String, Vec<String>)> {
        buckets
            .iter()
            .map(|b| (b.key.clone(), b.ideas.iter().map(|i| i.id.clone()).collect()))
            .collect()
    };
    assert_eq!(flat(&first), flat(&second));
}

#[test]
fn exact_five_am_is_morning_not_overnight() {
    let five_am = Utc.with_ymd_and_hms(2026, 8, 6, 5, 0, 0).unwrap();
    let buckets = group_by_time(&[idea_at("a", five_am)], now());
    assert_eq!(buckets[0].key, "today-morning");
}

#[test]
fn exact_midnight_is_overnight_of_its_own_day() {
    let midnight = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
    let buckets = group_by_time(&[idea_at("a", midnight)], now());
    assert_eq!(buckets[0].key, "today-overnight");
}

#[test]
fn a_lone_idea_still_gets_a_bucket() {
    let buckets = group_by_time(&[idea_at("solo", now() - Duration::minutes(5))], now());
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].ideas.len(), 1);
    assert_eq!(buckets[0].tier, Tier::Success);
}

#[test]
fn empty_input_produces_no_buckets() {
    assert!(group_by_time(&[], now()).is_empty());
}

#[test]
fn buckets_follow_the_fixed_priority_order() {
    // One idea per recency class, captured out of order on purpose.
    let ideas = vec![
        // Older: May 2026
        idea_at("old", Utc.with_ymd_and_hms(2026, 5, 10, 10, 0, 0).unwrap()),
        // Yesterday evening
        idea_at("ye", Utc.with_ymd_and_hms(2026, 8, 5, 19, 0, 0).unwrap()),
        // Today morning
        idea_at("tm", Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap()),
        // Last month (July)
        idea_at("lm", Utc.with_ymd_and_hms(2026, 7, 20, 10, 0, 0).unwrap()),
        // This week: Monday 2026-08-03
        idea_at("wk", Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap()),
        // Last week: Tuesday 2026-07-28
        idea_at("lw", Utc.with_ymd_and_hms(2026, 7, 28, 10, 0, 0).unwrap()),
    ];

    let keys: Vec<String> = group_by_time(&ideas, now())
        .into_iter()
        .map(|b| b.key)
        .collect();
    assert_eq!(
        keys,
        vec![
            "today-morning",
            "yesterday-evening",
            "this-week-1",
            "last-week-2",
            "last-month",
            "older-2026-05",
        ]
    );
}

#[test]
fn tier_follows_recency_class() {
    let ideas = vec![
        idea_at("tm", Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap()),
        idea_at("ye", Utc.with_ymd_and_hms(2026, 8, 5, 19, 0, 0).unwrap()),
        idea_at("wk", Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap()),
        idea_at("lw", Utc.with_ymd_and_hms(2026, 7, 28, 10, 0, 0).unwrap()),
        idea_at("old", Utc.with_ymd_and_hms(2026, 5, 10, 10, 0, 0).unwrap()),
    ];
    let tiers: Vec<Tier> = group_by_time(&ideas, now()).into_iter().map(|b| b.tier).collect();
    assert_eq!(
        tiers,
        vec![Tier::Success, Tier::Warning, Tier::Primary, Tier::Muted, Tier::Faint]
    );
}

#[test]
fn the_now_snapshot_anchors_the_whole_pass() {
    // The same ideas grouped against two different instants land in
    // different buckets; each call is internally consistent.
    let stamp = Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap();
    let ideas = vec![idea_at("a", stamp)];

    let same_day = group_by_time(&ideas, now());
    assert_eq!(same_day[0].key, "today-morning");

    let next_day = group_by_time(&ideas, now() + Duration::days(1));
    assert_eq!(next_day[0].key, "yesterday-morning");
}
