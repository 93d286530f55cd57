use std::collections::{HashMap, HashSet};

use super::num;
use crate::model::Application;

pub const WIDTH: f64 = 1200.0;
pub const HEIGHT: f64 = 400.0;
pub const NODE_WIDTH: f64 = 30.0;
const NODE_PADDING: f64 = 20.0;
const TARGET_HEIGHT: f64 = 40.0;
const SOURCE_HEIGHT: f64 = 200.0;
const SOURCE_X: f64 = 200.0;
const TARGET_X: f64 = WIDTH - 200.0;

/// Flow targets in display order: (label, backend status, color).
const TARGETS: [(&str, &str, &str); 7] = [
    ("Offers", "Offer made", "#16a34a"),
    ("Rejected", "Rejection", "#dc2626"),
    ("Interviews", "Interview invitation", "#06b6d4"),
    ("Availability", "Availability request", "#10b981"),
    ("Assessments", "Assessment sent", "#eab308"),
    ("Awaiting", "Action required from company", "#6b7280"),
    ("Ghosted", "Applied", "#94a3b8"),
];

/// Unique applications and the status each one was first seen with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowCounts {
    pub total: usize,
    by_status: HashMap<String, usize>,
}

impl FlowCounts {
    pub fn for_status(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }
}

pub fn flow_counts(applications: &[Application]) -> FlowCounts {
    let mut seen = HashSet::new();
    let mut by_status = HashMap::<String, usize>::new();
    for app in applications {
        if seen.insert(app.unique_key()) {
            *by_status.entry(app.status_label().to_string()).or_default() += 1;
        }
    }
    FlowCounts {
        total: seen.len(),
        by_status,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyLink {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
    /// Vertical centre of the target node.
    pub target_y: f64,
    pub thickness: f64,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyDiagram {
    pub total: usize,
    pub source_x: f64,
    pub source_y: f64,
    pub source_height: f64,
    pub center_y: f64,
    pub target_x: f64,
    pub node_width: f64,
    pub target_height: f64,
    pub links: Vec<SankeyLink>,
}

/// Closed ribbon from the right edge of the source node to the target node.
fn link_path(source_y: f64, target_y: f64, thickness: f64) -> String {
    let half = thickness / 2.0;
    let start_x = SOURCE_X + NODE_WIDTH;
    let mid_x = (SOURCE_X + TARGET_X) / 2.0;
    format!(
        "M {sx} {s_top} C {mx} {s_top}, {mx} {t_top}, {tx} {t_top} L {tx} {t_bot} C {mx} {t_bot}, {mx} {s_bot}, {sx} {s_bot} Z",
        sx = num(start_x),
        mx = num(mid_x),
        tx = num(TARGET_X),
        s_top = num(source_y - half),
        s_bot = num(source_y + half),
        t_top = num(target_y - half),
        t_bot = num(target_y + half),
    )
}

pub fn layout(applications: &[Application]) -> Option<SankeyDiagram> {
    let counts = flow_counts(applications);
    if counts.total == 0 {
        return None;
    }
    let center_y = HEIGHT / 2.0;
    let targets = TARGETS
        .iter()
        .map(|&(name, status, color)| (name, counts.for_status(status), color))
        .filter(|(_, value, _)| *value > 0)
        .collect::<Vec<_>>();

    let stack = targets.len() as f64 * TARGET_HEIGHT
        + targets.len().saturating_sub(1) as f64 * NODE_PADDING;
    let mut current = (HEIGHT - stack) / 2.0;

    let links = targets
        .into_iter()
        .map(|(name, value, color)| {
            let thickness = value as f64 / counts.total as f64 * SOURCE_HEIGHT;
            let target_y = current + TARGET_HEIGHT / 2.0;
            current += TARGET_HEIGHT + NODE_PADDING;
            SankeyLink {
                name,
                value,
                color,
                target_y,
                thickness,
                path: link_path(center_y, target_y, thickness),
            }
        })
        .collect();

    Some(SankeyDiagram {
        total: counts.total,
        source_x: SOURCE_X,
        source_y: center_y - SOURCE_HEIGHT / 2.0,
        source_height: SOURCE_HEIGHT,
        center_y,
        target_x: TARGET_X,
        node_width: NODE_WIDTH,
        target_height: TARGET_HEIGHT,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(company: &str, title: &str, status: &str) -> Application {
        Application {
            company_name: Some(company.to_string()),
            job_title: Some(title.to_string()),
            application_status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_status_wins_per_application() {
        let apps = vec![
            app("Acme", "Engineer", "Applied"),
            app("Acme", "Engineer", "Rejection"),
            app("Globex", "Engineer", "Rejection"),
            app(" Globex ", "Engineer ", "Offer made"),
        ];
        let counts = flow_counts(&apps);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.for_status("Applied"), 1);
        assert_eq!(counts.for_status("Rejection"), 1);
        assert_eq!(counts.for_status("Offer made"), 0);
    }

    #[test]
    fn test_empty_has_no_diagram() {
        assert!(layout(&[]).is_none());
    }

    #[test]
    fn test_zero_targets_are_dropped_and_stacked() {
        let apps = vec![
            app("A", "x", "Rejection"),
            app("B", "x", "Rejection"),
            app("C", "x", "Rejection"),
            app("D", "x", "Offer made"),
            app("E", "x", "False positive"),
        ];
        let diagram = layout(&apps).unwrap();
        assert_eq!(diagram.total, 5);
        assert_eq!(diagram.source_y, 100.0);
        let names = diagram.links.iter().map(|l| l.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Offers", "Rejected"]);

        // two 40px nodes with 20px between them, centred in 400px
        assert_eq!(diagram.links[0].target_y, 170.0);
        assert_eq!(diagram.links[1].target_y, 230.0);
        assert_eq!(diagram.links[0].thickness, 40.0);
        assert_eq!(diagram.links[1].thickness, 120.0);
    }

    #[test]
    fn test_link_path_geometry() {
        let diagram = layout(&[app("A", "x", "Applied")]).unwrap();
        let link = &diagram.links[0];
        assert_eq!(link.name, "Ghosted");
        assert_eq!(link.target_y, 200.0);
        assert_eq!(
            link.path,
            "M 230 100 C 600 100, 600 100, 1000 100 L 1000 300 C 600 300, 600 300, 230 300 Z"
        );
    }
}
