//! SVG layout for the dashboard charts.
//!
//! Each submodule turns the backend's application records into plain
//! numbers and path strings; the components in `app::charts` only render
//! them.

pub mod pie;
pub mod sankey;
pub mod weekly;

/// Fallback for statuses without an assigned color.
pub const DEFAULT_COLOR: &str = "#94a3b8";

pub fn status_color(status: &str) -> &'static str {
    match status {
        "Rejection" => "#dc2626",
        "Interview invitation" => "#06b6d4",
        "Offer made" => "#16a34a",
        "Applied" => "#94a3b8",
        "Assessment sent" => "#eab308",
        "Availability request" => "#10b981",
        "Information request" => "#14b8a6",
        "Action required from company" => "#6b7280",
        "Did not apply - inbound request" => "#9333ea",
        "Hiring freeze notification" => "#f97316",
        "Withdrew application" => "#ec4899",
        "False positive" => "#f59e0b",
        _ => DEFAULT_COLOR,
    }
}

/// Formats a coordinate for SVG output: at most two decimals, no trailing zeros.
pub fn num(value: f64) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(200.0), "200");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(-4.257), "-4.26");
    }

    #[test]
    fn test_status_color_fallback() {
        assert_eq!(status_color("Offer made"), "#16a34a");
        assert_eq!(status_color("Unknown"), DEFAULT_COLOR);
    }
}
