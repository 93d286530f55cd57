use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Downloads the backend renders for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportKind {
    Csv,
    Sankey,
    PieChart,
    WeeklyGraph,
}

pub const EXPORT_KINDS: [ExportKind; 4] = [
    ExportKind::Csv,
    ExportKind::Sankey,
    ExportKind::PieChart,
    ExportKind::WeeklyGraph,
];

impl ExportKind {
    pub fn from_slug(slug: &str) -> Option<Self> {
        EXPORT_KINDS.into_iter().find(|k| k.slug() == slug)
    }

    pub fn slug(self) -> &'static str {
        match self {
            ExportKind::Csv => "csv",
            ExportKind::Sankey => "sankey",
            ExportKind::PieChart => "pie-chart",
            ExportKind::WeeklyGraph => "weekly-graph",
        }
    }

    pub fn backend_path(self) -> &'static str {
        match self {
            ExportKind::Csv => "/process-csv",
            ExportKind::Sankey => "/process-sankey",
            ExportKind::PieChart => "/process-pie-chart",
            ExportKind::WeeklyGraph => "/process-weekly-graph",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Csv => "CSV",
            ExportKind::Sankey => "Sankey Diagram",
            ExportKind::PieChart => "Pie Chart",
            ExportKind::WeeklyGraph => "Weekly Graph",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportKind::Csv => "text/csv",
            _ => "image/png",
        }
    }

    pub fn file_name(self, date: NaiveDate) -> String {
        let (stem, ext) = match self {
            ExportKind::Csv => ("job_applications", "csv"),
            ExportKind::Sankey => ("sankey_diagram", "png"),
            ExportKind::PieChart => ("status_pie_chart", "png"),
            ExportKind::WeeklyGraph => ("weekly_applications_graph", "png"),
        };
        format!("{stem}_{}.{ext}", date.format("%Y-%m-%d"))
    }

    pub fn href(self) -> String {
        format!("/export/{}", self.slug())
    }
}

/// Why a download failed, carried back to the dashboard in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFailure {
    RateLimited,
    Failed,
}

impl ExportFailure {
    pub fn as_param(self) -> &'static str {
        match self {
            ExportFailure::RateLimited => "rate_limited",
            ExportFailure::Failed => "failed",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "rate_limited" => Some(ExportFailure::RateLimited),
            "failed" => Some(ExportFailure::Failed),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ExportFailure::RateLimited => {
                "Download limit reached. Please wait before trying again."
            }
            ExportFailure::Failed => {
                "Please try again or contact help@justajobapp.com if the issue persists."
            }
        }
    }

    /// Dashboard URL that reports this failure.
    pub fn redirect_to(self, kind: ExportKind) -> String {
        format!(
            "/dashboard?export_error={}&export={}",
            self.as_param(),
            kind.slug()
        )
    }
}

#[cfg(feature = "ssr")]
pub use handler::export_handler;

#[cfg(feature = "ssr")]
mod handler {
    use axum::{
        body::Body,
        extract::{Path, State},
        http::{header, HeaderMap, HeaderValue, StatusCode},
        response::{IntoResponse, Redirect, Response},
    };

    use super::{ExportFailure, ExportKind};
    use crate::backend::{forwarded_cookie, BackendError};
    use crate::state::SiteState;

    pub async fn export_handler(
        State(state): State<SiteState>,
        Path(slug): Path<String>,
        headers: HeaderMap,
    ) -> Response {
        let Some(kind) = ExportKind::from_slug(&slug) else {
            return (StatusCode::NOT_FOUND, "Unknown export").into_response();
        };
        let cookie = forwarded_cookie(&headers);

        let failure = match state.backend.export(cookie.as_ref(), kind).await {
            Ok(resp) => {
                let content_type = resp
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .cloned()
                    .unwrap_or_else(|| HeaderValue::from_static(kind.content_type()));
                match resp.bytes().await {
                    Ok(bytes) => {
                        let file_name = kind.file_name(chrono::Utc::now().date_naive());
                        tracing::info!(export = kind.slug(), size = bytes.len(), "export served");
                        return (
                            [
                                (header::CONTENT_TYPE, content_type),
                                (
                                    header::CONTENT_DISPOSITION,
                                    HeaderValue::from_str(&format!(
                                        "attachment; filename=\"{file_name}\""
                                    ))
                                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
                                ),
                            ],
                            Body::from(bytes),
                        )
                            .into_response();
                    }
                    Err(e) => {
                        tracing::error!(export = kind.slug(), error = %e, "export body failed");
                        ExportFailure::Failed
                    }
                }
            }
            Err(BackendError::RateLimited) => ExportFailure::RateLimited,
            Err(e) => {
                tracing::error!(export = kind.slug(), error = %e, "export failed");
                ExportFailure::Failed
            }
        };
        Redirect::to(&failure.redirect_to(kind)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs() {
        for kind in EXPORT_KINDS {
            assert_eq!(ExportKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ExportKind::from_slug("pdf"), None);
    }

    #[test]
    fn test_file_names() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(ExportKind::Csv.file_name(date), "job_applications_2025-03-07.csv");
        assert_eq!(ExportKind::Sankey.file_name(date), "sankey_diagram_2025-03-07.png");
        assert_eq!(
            ExportKind::WeeklyGraph.file_name(date),
            "weekly_applications_graph_2025-03-07.png"
        );
    }

    #[test]
    fn test_failure_redirect() {
        let url = ExportFailure::RateLimited.redirect_to(ExportKind::PieChart);
        assert_eq!(url, "/dashboard?export_error=rate_limited&export=pie-chart");
        assert_eq!(
            ExportFailure::from_param("rate_limited").map(ExportFailure::message),
            Some("Download limit reached. Please wait before trying again.")
        );
        assert_eq!(ExportFailure::from_param("nope"), None);
    }
}
