use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_STATUS: &str = "Unknown";
pub const UNKNOWN_COMPANY: &str = "Unknown";
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// Statuses the classifier can assign, in the backend's lower-case form.
pub const APPLICATION_STATUSES: [&str; 12] = [
    "application confirmation",
    "rejection",
    "availability request",
    "information request",
    "assessment sent",
    "interview invitation",
    "did not apply - inbound request",
    "action required from company",
    "hiring freeze notification",
    "withdrew application",
    "offer made",
    "false positive",
];

/// One classified email as returned by the backend. Display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub application_status: Option<String>,
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub email_from: Option<String>,
    #[serde(default)]
    pub is_demo_email: bool,
}

fn label<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
}

impl Application {
    pub fn status_label(&self) -> &str {
        label(&self.application_status, UNKNOWN_STATUS)
    }

    pub fn company_label(&self) -> &str {
        label(&self.company_name, UNKNOWN_COMPANY)
    }

    pub fn job_title_label(&self) -> &str {
        label(&self.job_title, UNKNOWN_POSITION)
    }

    /// Identifies a company/position pair; several emails usually share one.
    pub fn unique_key(&self) -> String {
        format!("{}-{}", self.company_label(), self.job_title_label())
    }

    pub fn received(&self) -> Option<DateTime<Utc>> {
        self.received_at.as_deref().and_then(parse_timestamp)
    }
}

/// Accepts RFC 3339, naive ISO-8601 (as written by Python's `isoformat`) and
/// bare dates. Naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationsPage {
    pub applications: Vec<Application>,
    pub total_pages: u32,
}

/// `/get-emails` answers either a bare list or a paged envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EmailsResponse {
    Paged {
        data: Vec<Application>,
        #[serde(rename = "totalPages", default = "one")]
        total_pages: u32,
    },
    Bare(Vec<Application>),
}

fn one() -> u32 {
    1
}

impl From<EmailsResponse> for ApplicationsPage {
    fn from(value: EmailsResponse) -> Self {
        match value {
            EmailsResponse::Paged { data, total_pages } => ApplicationsPage {
                applications: data,
                total_pages: total_pages.max(1),
            },
            EmailsResponse::Bare(applications) => ApplicationsPage {
                applications,
                total_pages: 1,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DashboardLoad {
    Unauthenticated,
    NoApplications,
    Loaded(ApplicationsPage),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub overview: Overview,
    pub status_breakdown: StatusBreakdown,
    pub activity: Activity,
    pub top_companies: Vec<CompanyCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub total_emails: u64,
    pub unique_companies: u64,
    pub total_applications: u64,
    pub days_active: u64,
    pub first_application: Option<String>,
    pub last_application: Option<String>,
    pub response_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBreakdown {
    pub rejections: u64,
    pub interviews: u64,
    pub offers: u64,
    pub assessments: u64,
    pub awaiting_response: u64,
    pub availability_requests: u64,
    pub information_requests: u64,
    pub inbound_requests: u64,
    pub withdrew: u64,
    pub hiring_freeze: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub last_7_days: u64,
    pub last_30_days: u64,
    pub avg_per_week: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyCount {
    pub company: String,
    pub count: u64,
}

/// Test email as stored by the backend's admin endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestEmail {
    pub id: String,
    pub company_name: String,
    pub application_status: String,
    pub received_at: String,
    pub job_title: String,
    pub subject: String,
    pub email_from: String,
    pub email_body: String,
    pub is_demo_email: bool,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Body of add/update calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestEmailDraft {
    pub company_name: String,
    pub application_status: String,
    pub subject: String,
    pub job_title: String,
    pub email_from: String,
    pub email_body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TestEmailDraft {
    /// Returns the first required field that is blank.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("company_name", &self.company_name),
            ("application_status", &self.application_status),
            ("subject", &self.subject),
            ("job_title", &self.job_title),
            ("email_from", &self.email_from),
            ("email_body", &self.email_body),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
    }
}

impl From<&TestEmail> for TestEmailDraft {
    fn from(email: &TestEmail) -> Self {
        TestEmailDraft {
            company_name: email.company_name.clone(),
            application_status: email.application_status.clone(),
            subject: email.subject.clone(),
            job_title: email.job_title.clone(),
            email_from: email.email_from.clone(),
            email_body: email.email_body.clone(),
            category: email.category.clone(),
            notes: email.notes.clone(),
        }
    }
}

/// Demo mode is inferred from the presence of demo emails.
pub fn demo_mode_active(emails: &[TestEmail]) -> bool {
    emails.iter().any(|e| e.is_demo_email)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoModeChange {
    pub message: String,
    pub loaded_count: u64,
    pub demo_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn app(company: Option<&str>, title: Option<&str>, status: Option<&str>) -> Application {
        Application {
            company_name: company.map(str::to_string),
            job_title: title.map(str::to_string),
            application_status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_labels_default_when_blank() {
        let a = app(Some("  "), None, Some(" Rejection "));
        assert_eq!(a.company_label(), "Unknown");
        assert_eq!(a.job_title_label(), "Unknown Position");
        assert_eq!(a.status_label(), "Rejection");
        assert_eq!(a.unique_key(), "Unknown-Unknown Position");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let naive = parse_timestamp("2024-01-15T10:30:00").expect("naive iso");
        assert_eq!((naive.day(), naive.hour()), (15, 10));

        let frac = parse_timestamp("2024-01-15T10:30:00.123456").expect("fractional");
        assert_eq!(frac.minute(), 30);

        let offset = parse_timestamp("2024-01-15T23:30:00-05:00").expect("rfc3339");
        assert_eq!((offset.day(), offset.hour()), (16, 4));

        let date = parse_timestamp("2024-03-01").expect("date");
        assert_eq!(date.month(), 3);

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_emails_response_shapes() {
        let bare: EmailsResponse =
            serde_json::from_str(r#"[{"id":"1","company_name":"Acme"}]"#).unwrap();
        let page = ApplicationsPage::from(bare);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.applications[0].company_label(), "Acme");

        let paged: EmailsResponse =
            serde_json::from_str(r#"{"data":[{"id":"1"},{"id":"2"}],"totalPages":4}"#).unwrap();
        let page = ApplicationsPage::from(paged);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.applications.len(), 2);
    }

    #[test]
    fn test_stats_tolerates_missing_sections() {
        let stats: Stats =
            serde_json::from_str(r#"{"overview":{"total_applications":12,"days_active":3}}"#)
                .unwrap();
        assert_eq!(stats.overview.total_applications, 12);
        assert_eq!(stats.status_breakdown.offers, 0);
        assert!(stats.top_companies.is_empty());
    }

    #[test]
    fn test_draft_missing_field() {
        let mut draft = TestEmailDraft {
            company_name: "Acme".into(),
            application_status: "rejection".into(),
            subject: "Update".into(),
            job_title: "Engineer".into(),
            email_from: "jobs@acme.test".into(),
            email_body: " ".into(),
            ..Default::default()
        };
        assert_eq!(draft.missing_field(), Some("email_body"));
        draft.email_body = "Thanks for applying".into();
        assert_eq!(draft.missing_field(), None);
    }

    #[test]
    fn test_demo_mode_active() {
        let mut emails = vec![TestEmail::default(), TestEmail::default()];
        assert!(!demo_mode_active(&emails));
        emails[1].is_demo_email = true;
        assert!(demo_mode_active(&emails));
    }
}
