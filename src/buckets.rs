//! Temporal bucketing of ideas for display.
//!
//! [`group_by_time`] is a pure function from an idea collection and a
//! reference instant to an ordered sequence of display buckets. It performs
//! no I/O and evaluates `now` exactly once per call, so two invocations with
//! the same inputs return identical bucket sequences.

use chrono::{DateTime, Datelike, Months, TimeZone, Timelike};

use crate::store::types::Idea;

/// Display color tier for a bucket's recency class. Cosmetic metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Today.
    Success,
    /// Yesterday.
    Warning,
    /// Current week.
    Primary,
    /// Last week through last month.
    Muted,
    /// Older than last month.
    Faint,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Primary => "primary",
            Self::Muted => "muted",
            Self::Faint => "faint",
        }
    }
}

/// An ephemeral display grouping. Never persisted.
#[derive(Debug, Clone)]
pub struct Bucket {
    /// Stable key used for ordering, e.g. `today-morning`.
    pub key: String,
    pub title: String,
    pub subtitle: String,
    pub tier: Tier,
    /// Member ideas, most-recent-first.
    pub ideas: Vec<Idea>,
}

/// Fixed bucket priority. Keys absent from this list (the `older-*` family)
/// sort after all listed keys, ordered among themselves by their most recent
/// member.
const BUCKET_ORDER: &[&str] = &[
    "today-morning",
    "today-afternoon",
    "today-evening",
    "today-overnight",
    "yesterday-morning",
    "yesterday-afternoon",
    "yesterday-evening",
    "yesterday-overnight",
    "this-week-6",
    "this-week-5",
    "this-week-4",
    "this-week-3",
    "this-week-2",
    "this-week-1",
    "this-week-0",
    "last-week-6",
    "last-week-5",
    "last-week-4",
    "last-week-3",
    "last-week-2",
    "last-week-1",
    "last-week-0",
    "this-month-week-5",
    "this-month-week-4",
    "this-month-week-3",
    "this-month-week-2",
    "this-month-week-1",
    "last-month",
];

/// Group ideas into ordered display buckets relative to `now`.
///
/// All calendar math happens in `now`'s timezone. Day, band, week, and month
/// boundaries are half-open: the lower bound is inclusive, the upper bound
/// exclusive.
pub fn group_by_time<Tz: TimeZone>(ideas: &[Idea], now: DateTime<Tz>) -> Vec<Bucket> {
    let tz = now.timezone();
    let today = now.date_naive();
    let yesterday = today.pred_opt().unwrap_or(today);
    let this_week_start = today
        - chrono::Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let last_week_start = this_week_start - chrono::Duration::days(7);
    let this_month_start = today.with_day(1).unwrap_or(today);
    let last_month_start = this_month_start
        .checked_sub_months(Months::new(1))
        .unwrap_or(this_month_start);

    let mut sorted: Vec<&Idea> = ideas.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

    let mut buckets: Vec<Bucket> = Vec::new();

    for idea in sorted {
        let local = idea.timestamp.with_timezone(&tz).naive_local();
        let date = local.date();

        let (key, title, subtitle, tier) = if date == today {
            let band = day_band(local.hour());
            (
                format!("today-{band}"),
                "Today".to_string(),
                band_subtitle(band),
                Tier::Success,
            )
        } else if date == yesterday {
            let band = day_band(local.hour());
            (
                format!("yesterday-{band}"),
                "Yesterday".to_string(),
                band_subtitle(band),
                Tier::Warning,
            )
        } else if date >= this_week_start {
            (
                format!("this-week-{}", date.weekday().num_days_from_sunday()),
                date.format("%A").to_string(),
                "this week".to_string(),
                Tier::Primary,
            )
        } else if date >= last_week_start {
            (
                format!("last-week-{}", date.weekday().num_days_from_sunday()),
                date.format("%A").to_string(),
                "last week".to_string(),
                Tier::Muted,
            )
        } else if date >= this_month_start {
            let week = (date.day() + 6) / 7;
            (
                format!("this-month-week-{week}"),
                format!("Week {week}"),
                "this month".to_string(),
                Tier::Muted,
            )
        } else if date >= last_month_start {
            (
                "last-month".to_string(),
                "Last month".to_string(),
                last_month_start.format("%B").to_string(),
                Tier::Muted,
            )
        } else {
            (
                format!("older-{}-{:02}", date.year(), date.month()),
                date.format("%B %Y").to_string(),
                relative_age(&idea.timestamp, &now),
                Tier::Faint,
            )
        };

        match buckets.iter_mut().find(|b| b.key == key) {
            Some(bucket) => bucket.ideas.push(idea.clone()),
            None => buckets.push(Bucket {
                key,
                title,
                subtitle,
                tier,
                ideas: vec![idea.clone()],
            }),
        }
    }

    buckets.sort_by(|a, b| {
        let pa = BUCKET_ORDER.iter().position(|k| *k == a.key);
        let pb = BUCKET_ORDER.iter().position(|k| *k == b.key);
        match (pa, pb) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            // Older buckets: most recent member first. Buckets are never empty.
            (None, None) => b.ideas[0].timestamp.cmp(&a.ideas[0].timestamp),
        }
    });

    buckets
}

/// Time-of-day band. Half-open bands: [05,12) morning, [12,18) afternoon,
/// [18,22) evening, the rest overnight.
fn day_band(hour: u32) -> &'static str {
    match hour {
        5..=11 => "morning",
        12..=17 => "afternoon",
        18..=21 => "evening",
        _ => "overnight",
    }
}

fn band_subtitle(band: &str) -> String {
    match band {
        "overnight" => "overnight".to_string(),
        other => format!("in the {other}"),
    }
}

/// Coarse human-readable age of `then` relative to `now`.
pub fn relative_age<Tz: TimeZone, Tz2: TimeZone>(
    then: &DateTime<Tz>,
    now: &DateTime<Tz2>,
) -> String {
    let elapsed = now.clone().signed_duration_since(then.clone());
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = elapsed.num_days();
    if days < 7 {
        return if days == 1 {
            "yesterday".to_string()
        } else {
            format!("{days} days ago")
        };
    }
    if days < 30 {
        let weeks = days / 7;
        return if weeks == 1 {
            "1 week ago".to_string()
        } else {
            format!("{weeks} weeks ago")
        };
    }
    let months = days / 30;
    if months < 12 {
        return if months == 1 {
            "1 month ago".to_string()
        } else {
            format!("{months} months ago")
        };
    }
    let years = days / 365;
    if years <= 1 {
        "1 year ago".to_string()
    } else {
        format!("{years} years ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    /// Wednesday 2026-08-05, 15:30 UTC.
    fn wednesday_afternoon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 5, 15, 30, 0).unwrap()
    }

    #[test]
    fn band_edges_are_half_open() {
        assert_eq!(day_band(4), "overnight");
        assert_eq!(day_band(5), "morning");
        assert_eq!(day_band(11), "morning");
        assert_eq!(day_band(12), "afternoon");
        assert_eq!(day_band(17), "afternoon");
        assert_eq!(day_band(18), "evening");
        assert_eq!(day_band(21), "evening");
        assert_eq!(day_band(22), "overnight");
        assert_eq!(day_band(0), "overnight");
    }

    #[test]
    fn five_am_today_is_morning() {
        let now = wednesday_afternoon();
        let ideas = vec![idea_at("a", Utc.with_ymd_and_hms(2026, 8, 5, 5, 0, 0).unwrap())];
        let buckets = group_by_time(&ideas, now);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "today-morning");
        assert_eq!(buckets[0].tier, Tier::Success);
    }

    #[test]
    fn today_and_yesterday_subdivide_by_band() {
        let now = wednesday_afternoon();
        let ideas = vec![
            idea_at("t1", Utc.with_ymd_and_hms(2026, 8, 5, 9, 0, 0).unwrap()),
            idea_at("t2", Utc.with_ymd_and_hms(2026, 8, 5, 14, 0, 0).unwrap()),
            idea_at("y1", Utc.with_ymd_and_hms(2026, 8, 4, 19, 0, 0).unwrap()),
            idea_at("y2", Utc.with_ymd_and_hms(2026, 8, 4, 2, 0, 0).unwrap()),
        ];
        let buckets = group_by_time(&ideas, now);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "today-morning",
                "today-afternoon",
                "yesterday-evening",
                "yesterday-overnight"
            ]
        );
        assert_eq!(buckets[2].tier, Tier::Warning);
    }

    #[test]
    fn weekday_buckets_for_both_weeks() {
        // Wednesday; this week started Sunday 2026-08-02.
        let now = wednesday_afternoon();
        let ideas = vec![
            // Monday this week
            idea_at("m", Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap()),
            // Friday last week
            idea_at("f", Utc.with_ymd_and_hms(2026, 7, 31, 10, 0, 0).unwrap()),
        ];
        let buckets = group_by_time(&ideas, now);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["this-week-1", "last-week-5"]);
        assert_eq!(buckets[0].title, "Monday");
        assert_eq!(buckets[0].subtitle, "this week");
        assert_eq!(buckets[1].title, "Friday");
        assert_eq!(buckets[1].subtitle, "last week");
    }

    #[test]
    fn month_weeks_and_older_buckets() {
        // Late in a 31-day month so week 5 exists.
        let now = Utc.with_ymd_and_hms(2026, 8, 31, 12, 0, 0).unwrap();
        let ideas = vec![
            // Aug 14 → week 2 of this month (outside both weeks)
            idea_at("w2", Utc.with_ymd_and_hms(2026, 8, 14, 10, 0, 0).unwrap()),
            // July → last month
            idea_at("lm", Utc.with_ymd_and_hms(2026, 7, 10, 10, 0, 0).unwrap()),
            // March → older
            idea_at("old", Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()),
        ];
        let buckets = group_by_time(&ideas, now);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["this-month-week-2", "last-month", "older-2026-03"]);
        assert_eq!(buckets[0].title, "Week 2");
        assert_eq!(buckets[1].subtitle, "July");
        assert_eq!(buckets[2].title, "March 2026");
        assert_eq!(buckets[2].tier, Tier::Faint);
    }

    #[test]
    fn older_buckets_sort_by_most_recent_member() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let ideas = vec![
            idea_at("jan", Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()),
            idea_at("mar", Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap()),
            idea_at("feb", Utc.with_ymd_and_hms(2026, 2, 15, 10, 0, 0).unwrap()),
        ];
        let buckets = group_by_time(&ideas, now);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["older-2026-03", "older-2026-02", "older-2026-01"]);
    }

    #[test]
    fn members_stay_recency_descending() {
        let now = wednesday_afternoon();
        let ideas = vec![
            idea_at("older", Utc.with_ymd_and_hms(2026, 8, 5, 13, 0, 0).unwrap()),
            idea_at("newer", Utc.with_ymd_and_hms(2026, 8, 5, 14, 0, 0).unwrap()),
        ];
        let buckets = group_by_time(&ideas, now);
        assert_eq!(buckets.len(), 1);
        let ids: Vec<&str> = buckets[0].ideas.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["newer", "older"]);
    }

    #[test]
    fn grouping_is_deterministic() {
        let now = wednesday_afternoon();
        let ideas: Vec<Idea> = (0..20)
            .map(|i| {
                idea_at(
                    &format!("i{i}"),
                    now - chrono::Duration::hours(i * 11) - chrono::Duration::days(i % 40),
                )
            })
            .collect();

        let first = group_by_time(&ideas, now);
        let second = group_by_time(&ideas, now);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.key, b.key);
            let ids_a: Vec<&str> = a.ideas.iter().map(|i| i.id.as_str()).collect();
            let ids_b: Vec<&str> = b.ideas.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids_a, ids_b);
        }
    }

    #[test]
    fn relative_age_labels() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let cases = [
            (chrono::Duration::seconds(30), "just now"),
            (chrono::Duration::minutes(5), "5m ago"),
            (chrono::Duration::hours(3), "3h ago"),
            (chrono::Duration::days(1), "yesterday"),
            (chrono::Duration::days(3), "3 days ago"),
            (chrono::Duration::days(14), "2 weeks ago"),
            (chrono::Duration::days(90), "3 months ago"),
            (chrono::Duration::days(800), "2 years ago"),
        ];
        for (offset, expected) in cases {
            assert_eq!(relative_age(&(now - offset), &now), expected);
        }
    }
}
