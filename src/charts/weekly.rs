use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Days, NaiveDate};

use super::num;
use crate::model::Application;

pub const WIDTH: f64 = 1200.0;
pub const HEIGHT: f64 = 350.0;
pub const PADDING_TOP: f64 = 20.0;
pub const PADDING_RIGHT: f64 = 60.0;
pub const PADDING_BOTTOM: f64 = 80.0;
pub const PADDING_LEFT: f64 = 60.0;
const Y_TICKS: usize = 5;
const BAR_FILL: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub count: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPoint {
    pub x: f64,
    pub y: f64,
    pub bar_x: f64,
    pub bar_width: f64,
    pub bar_height: f64,
    pub count: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YTick {
    pub value: usize,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyGraph {
    pub chart_width: f64,
    pub chart_height: f64,
    pub points: Vec<WeeklyPoint>,
    pub ticks: Vec<YTick>,
    pub line_path: String,
    pub total: usize,
    pub weeks: usize,
    pub average: String,
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Unique company/position pairs per week, oldest week first. Records without
/// a readable timestamp are skipped.
pub fn weekly_buckets(applications: &[Application]) -> Vec<WeekBucket> {
    let mut weeks = BTreeMap::<NaiveDate, HashSet<String>>::new();
    for app in applications {
        let Some(received) = app.received() else {
            continue;
        };
        weeks
            .entry(week_start(received.date_naive()))
            .or_default()
            .insert(app.unique_key());
    }
    weeks
        .into_iter()
        .map(|(week_start, apps)| WeekBucket {
            week_start,
            count: apps.len(),
            label: week_start.format("%b %-d").to_string(),
        })
        .collect()
}

pub fn layout(applications: &[Application]) -> Option<WeeklyGraph> {
    let buckets = weekly_buckets(applications);
    if buckets.is_empty() {
        return None;
    }
    let chart_width = WIDTH - PADDING_LEFT - PADDING_RIGHT;
    let chart_height = HEIGHT - PADDING_TOP - PADDING_BOTTOM;
    let n = buckets.len();
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(1).max(1) as f64;

    let y_scale = |value: f64| chart_height - value / max * chart_height;
    let x_scale = |index: usize| {
        if n == 1 {
            chart_width / 2.0
        } else {
            index as f64 / (n - 1) as f64 * chart_width
        }
    };
    let bar_width = chart_width / n as f64 * BAR_FILL;

    let points = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let x = x_scale(i);
            let y = y_scale(b.count as f64);
            WeeklyPoint {
                x,
                y,
                bar_x: x - bar_width / 2.0,
                bar_width,
                bar_height: chart_height - y,
                count: b.count,
                label: b.label.clone(),
            }
        })
        .collect::<Vec<_>>();

    let line_path = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { "M" } else { "L" };
            format!("{cmd} {} {}", num(p.x), num(p.y))
        })
        .collect::<Vec<_>>()
        .join(" ");

    let ticks = (0..=Y_TICKS)
        .map(|i| {
            let value = (max / Y_TICKS as f64 * i as f64).round() as usize;
            YTick {
                value,
                y: y_scale(value as f64),
            }
        })
        .collect();

    let total = buckets.iter().map(|b| b.count).sum::<usize>();
    Some(WeeklyGraph {
        chart_width,
        chart_height,
        points,
        ticks,
        line_path,
        total,
        weeks: n,
        average: format!("{:.1}", total as f64 / n as f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(company: &str, title: &str, received: &str) -> Application {
        Application {
            company_name: Some(company.to_string()),
            job_title: Some(title.to_string()),
            received_at: Some(received.to_string()),
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-01-14 is a Sunday, belongs to the week of Monday the 8th
        assert_eq!(week_start(date(2024, 1, 14)), date(2024, 1, 8));
        assert_eq!(week_start(date(2024, 1, 15)), date(2024, 1, 15));
        assert_eq!(week_start(date(2024, 1, 17)), date(2024, 1, 15));
    }

    #[test]
    fn test_buckets_count_unique_pairs() {
        let apps = vec![
            app("Acme", "Engineer", "2024-01-15T09:00:00"),
            app("Acme", "Engineer", "2024-01-16T09:00:00"),
            app("Acme", "Manager", "2024-01-17T09:00:00"),
            app("Globex", "Engineer", "2024-01-08T12:00:00"),
            app("Initech", "Engineer", "not a date"),
        ];
        let buckets = weekly_buckets(&apps);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].week_start, date(2024, 1, 8));
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].label, "Jan 8");
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].label, "Jan 15");
    }

    #[test]
    fn test_layout_scales() {
        let apps = vec![
            app("A", "x", "2024-01-01T00:00:00"),
            app("B", "x", "2024-01-08T00:00:00"),
            app("C", "x", "2024-01-09T00:00:00"),
            app("D", "x", "2024-01-10T00:00:00"),
            app("E", "x", "2024-01-11T00:00:00"),
            app("F", "x", "2024-01-12T00:00:00"),
        ];
        let graph = layout(&apps).unwrap();
        assert_eq!(graph.chart_width, 1080.0);
        assert_eq!(graph.chart_height, 250.0);
        assert_eq!(graph.points.len(), 2);

        let (first, last) = (&graph.points[0], &graph.points[1]);
        assert_eq!(first.x, 0.0);
        assert_eq!(last.x, 1080.0);
        assert_eq!(last.y, 0.0);
        assert_eq!(first.y, 200.0);
        assert!((first.bar_width - 324.0).abs() < 1e-9);
        assert!((first.bar_x + 162.0).abs() < 1e-9);
        assert_eq!(first.bar_height, 50.0);
        assert_eq!(graph.line_path, "M 0 200 L 1080 0");

        let tick_values = graph.ticks.iter().map(|t| t.value).collect::<Vec<_>>();
        assert_eq!(tick_values, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(graph.ticks[0].y, 250.0);

        assert_eq!(graph.total, 6);
        assert_eq!(graph.weeks, 2);
        assert_eq!(graph.average, "3.0");
    }

    #[test]
    fn test_single_week_is_centred() {
        let graph = layout(&[app("A", "x", "2024-02-01")]).unwrap();
        assert_eq!(graph.points[0].x, 540.0);
        assert_eq!(graph.points[0].y, 0.0);
        assert_eq!(graph.line_path, "M 540 0");
    }

    #[test]
    fn test_no_dates_no_graph() {
        assert!(layout(&[app("A", "x", "")]).is_none());
        assert!(layout(&[]).is_none());
    }
}
