use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};

use super::{num, status_color};
use crate::model::Application;

pub const WIDTH: f64 = 400.0;
pub const HEIGHT: f64 = 400.0;
const MARGIN: f64 = 40.0;
const LABEL_RADIUS_RATIO: f64 = 0.7;
// slices at or below this share of the total get no in-chart label
const LABEL_MIN_SHARE: f64 = 0.03;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: usize,
    pub percentage: String,
    pub color: &'static str,
    pub path: String,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub total: usize,
    pub slices: Vec<PieSlice>,
}

/// Counts per normalised status, largest first. Ties keep first-seen order.
pub fn status_counts(applications: &[Application]) -> Vec<(String, usize)> {
    let mut index = HashMap::<&str, usize>::new();
    let mut counts = Vec::<(String, usize)>::new();
    for app in applications {
        let status = app.status_label();
        match index.get(status) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(status, counts.len());
                counts.push((status.to_string(), 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn point(center_x: f64, center_y: f64, radius: f64, angle: f64) -> (f64, f64) {
    (
        center_x + radius * angle.cos(),
        center_y + radius * angle.sin(),
    )
}

pub fn layout(applications: &[Application]) -> Option<PieChart> {
    if applications.is_empty() {
        return None;
    }
    let total = applications.len();
    let counts = status_counts(applications);
    let radius = WIDTH.min(HEIGHT) / 2.0 - MARGIN;
    let (cx, cy) = (WIDTH / 2.0, HEIGHT / 2.0);
    let single = counts.len() == 1;

    let mut current = -FRAC_PI_2;
    let slices = counts
        .into_iter()
        .map(|(name, value)| {
            let start = current;
            let angle = value as f64 / total as f64 * 2.0 * PI;
            current += angle;
            let end = current;

            let path = if single {
                // an arc whose endpoints coincide renders nothing, so draw two halves
                format!(
                    "M {cx} {top} A {r} {r} 0 1 1 {cx} {bottom} A {r} {r} 0 1 1 {cx} {top} Z",
                    cx = num(cx),
                    top = num(cy - radius),
                    bottom = num(cy + radius),
                    r = num(radius),
                )
            } else {
                let (x1, y1) = point(cx, cy, radius, start);
                let (x2, y2) = point(cx, cy, radius, end);
                let large_arc = if angle > PI { 1 } else { 0 };
                format!(
                    "M {} {} L {} {} A {r} {r} 0 {large_arc} 1 {} {} Z",
                    num(cx),
                    num(cy),
                    num(x1),
                    num(y1),
                    num(x2),
                    num(y2),
                    r = num(radius),
                )
            };

            let (label_x, label_y) =
                point(cx, cy, radius * LABEL_RADIUS_RATIO, start + angle / 2.0);
            let percentage = format!("{:.1}", value as f64 / total as f64 * 100.0);
            let label = if value as f64 > total as f64 * LABEL_MIN_SHARE {
                format!("{percentage}%")
            } else {
                String::new()
            };

            PieSlice {
                color: status_color(&name),
                name,
                value,
                percentage,
                path,
                label,
                label_x,
                label_y,
            }
        })
        .collect();

    Some(PieChart { total, slices })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(statuses: &[&str]) -> Vec<Application> {
        statuses
            .iter()
            .map(|s| Application {
                application_status: Some(s.to_string()),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_empty_input_has_no_chart() {
        assert!(layout(&[]).is_none());
    }

    #[test]
    fn test_counts_sorted_with_stable_ties() {
        let apps = with_status(&["Applied", "Rejection", "Rejection", "Offer made", ""]);
        let counts = status_counts(&apps);
        assert_eq!(
            counts,
            vec![
                ("Rejection".to_string(), 2),
                ("Applied".to_string(), 1),
                ("Offer made".to_string(), 1),
                ("Unknown".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_half_and_quarter_slices() {
        let apps = with_status(&["Rejection", "Rejection", "Applied", "Offer made"]);
        let chart = layout(&apps).unwrap();
        assert_eq!(chart.total, 4);

        let first = &chart.slices[0];
        assert_eq!(first.name, "Rejection");
        assert_eq!(first.percentage, "50.0");
        assert_eq!(first.label, "50.0%");
        assert_eq!(first.color, "#dc2626");
        // starts at the top, ends at the bottom, exactly half so no large arc
        assert_eq!(first.path, "M 200 200 L 200 40 A 160 160 0 0 1 200 360 Z");
        // label sits on the right-hand side at 70% of the radius
        assert!((first.label_x - 312.0).abs() < 1e-9);
        assert!((first.label_y - 200.0).abs() < 1e-9);

        let second = &chart.slices[1];
        assert_eq!(second.path, "M 200 200 L 200 360 A 160 160 0 0 1 40 200 Z");
    }

    #[test]
    fn test_large_arc_flag() {
        let apps = with_status(&["Applied", "Applied", "Applied", "Rejection"]);
        let chart = layout(&apps).unwrap();
        assert!(chart.slices[0].path.contains(" 0 1 1 "));
        assert!(chart.slices[1].path.contains(" 0 0 1 "));
    }

    #[test]
    fn test_small_slices_are_unlabelled() {
        let mut statuses = vec!["Applied"; 40];
        statuses.push("Offer made");
        let chart = layout(&with_status(&statuses)).unwrap();
        let offer = chart.slices.iter().find(|s| s.name == "Offer made").unwrap();
        assert_eq!(offer.percentage, "2.4");
        assert!(offer.label.is_empty());
    }

    #[test]
    fn test_single_status_draws_full_circle() {
        let chart = layout(&with_status(&["Applied", "Applied"])).unwrap();
        assert_eq!(chart.slices.len(), 1);
        assert_eq!(
            chart.slices[0].path,
            "M 200 40 A 160 160 0 1 1 200 360 A 160 160 0 1 1 200 40 Z"
        );
        assert_eq!(chart.slices[0].label, "100.0%");
    }
}
