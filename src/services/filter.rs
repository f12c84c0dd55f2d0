//! Listing filters
//!
//! Turns optional query parameters into SQL predicates. Each filter also
//! evaluates in memory with the same semantics, which keeps the SQL honest
//! in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use crate::models::{RegistrationStatus, Scholarship, WebinarRegistration};
use crate::utils::errors::{ScholarHubError, Result};
use crate::utils::helpers::{contains_pattern, non_blank, parse_date};

/// Raw scholarship listing parameters as they arrive on the query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScholarshipQuery {
    pub kategori: Option<String>,
    pub jenjang: Option<String>,
    pub lokasi: Option<String>,
    pub deadline: Option<String>,
}

/// Parsed scholarship filter; `None` fields impose no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScholarshipFilter {
    pub category: Option<String>,
    pub level: Option<String>,
    pub location: Option<String>,
    pub deadline_from: Option<NaiveDate>,
}

impl ScholarshipFilter {
    /// Parse query parameters. An unparseable deadline is a client error,
    /// never an empty result.
    pub fn from_query(query: &ScholarshipQuery) -> Result<Self> {
        let deadline_from = match non_blank(query.deadline.as_deref()) {
            Some(raw) => Some(parse_date(raw).ok_or_else(|| {
                ScholarHubError::validation("Invalid deadline date format. Use YYYY-MM-DD")
            })?),
            None => None,
        };

        Ok(Self {
            category: non_blank(query.kategori.as_deref()).map(str::to_string),
            level: non_blank(query.jenjang.as_deref()).map(str::to_string),
            location: non_blank(query.lokasi.as_deref()).map(str::to_string),
            deadline_from,
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// In-memory equivalent of the SQL predicate
    pub fn matches(&self, scholarship: &Scholarship) -> bool {
        contains_ignore_case(&scholarship.category, self.category.as_deref())
            && contains_ignore_case(&scholarship.level, self.level.as_deref())
            && contains_ignore_case(&scholarship.location, self.location.as_deref())
            && self
                .deadline_from
                .map_or(true, |from| scholarship.deadline >= from)
    }

    /// Append `AND ...` predicates; the builder must already contain a `WHERE` clause
    pub fn push_predicates(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        let text_filters = [
            ("category", &self.category),
            ("level", &self.level),
            ("location", &self.location),
        ];

        for (column, value) in text_filters {
            if let Some(value) = value {
                builder.push(format!(" AND {} ILIKE ", column));
                builder.push_bind(contains_pattern(value));
            }
        }

        if let Some(from) = self.deadline_from {
            builder.push(" AND deadline >= ");
            builder.push_bind(from);
        }
    }
}

fn contains_ignore_case(field: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => field.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Filter for the admin registration listing, with the webinar already resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFilter {
    pub webinar_id: Option<i64>,
    pub status: Option<RegistrationStatus>,
}

impl RegistrationFilter {
    /// Parse the status parameter; blank means no constraint
    pub fn parse_status(raw: Option<&str>) -> Result<Option<RegistrationStatus>> {
        non_blank(raw).map(str::parse).transpose()
    }

    /// In-memory equivalent of the SQL predicate
    pub fn matches(&self, registration: &WebinarRegistration) -> bool {
        self.webinar_id.map_or(true, |id| registration.webinar_id == id)
            && self
                .status
                .map_or(true, |status| registration.status == status.as_str())
    }

    pub fn push_predicates(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if let Some(webinar_id) = self.webinar_id {
            builder.push(" AND r.webinar_id = ");
            builder.push_bind(webinar_id);
        }

        if let Some(status) = self.status {
            builder.push(" AND r.status = ");
            builder.push_bind(status.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn scholarship(category: &str, level: &str, location: &str, deadline: NaiveDate) -> Scholarship {
        Scholarship {
            id: 1,
            uuid: Uuid::new_v4(),
            title: "Beasiswa".to_string(),
            description: "desc".to_string(),
            detail: "detail".to_string(),
            category: category.to_string(),
            level: level.to_string(),
            location: location.to_string(),
            deadline,
            organizer: "Org".to_string(),
            link: None,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_absent_parameters_impose_no_constraint() {
        let filter = ScholarshipFilter::from_query(&ScholarshipQuery::default()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&scholarship("Seni", "S2", "Bandung", date(2020, 1, 1))));
    }

    #[test]
    fn test_blank_parameters_are_ignored() {
        let query = ScholarshipQuery {
            kategori: Some("  ".to_string()),
            deadline: Some(String::new()),
            ..Default::default()
        };
        assert!(ScholarshipFilter::from_query(&query).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_deadline_is_client_error() {
        let query = ScholarshipQuery {
            deadline: Some("31-12-2025".to_string()),
            ..Default::default()
        };
        assert_matches!(ScholarshipFilter::from_query(&query), Err(ScholarHubError::Validation(_)));
    }

    #[test]
    fn test_category_and_deadline_scenario() {
        let query = ScholarshipQuery {
            kategori: Some("Sains".to_string()),
            deadline: Some("2025-01-01".to_string()),
            ..Default::default()
        };
        let filter = ScholarshipFilter::from_query(&query).unwrap();

        let fixture = vec![
            scholarship("Sains", "S1", "Jakarta", date(2024, 12, 31)),
            scholarship("Sains", "S1", "Jakarta", date(2025, 1, 1)),
            scholarship("Sains", "S2", "Bandung", date(2025, 6, 1)),
            scholarship("Seni", "S1", "Jakarta", date(2025, 6, 1)),
            scholarship("Seni", "S1", "Jakarta", date(2024, 6, 1)),
        ];

        let selected: Vec<_> = fixture.iter().filter(|s| filter.matches(s)).collect();
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|s| s.category == "Sains" && s.deadline >= date(2025, 1, 1)));
    }

    #[test]
    fn test_sql_predicates() {
        let filter = ScholarshipFilter {
            category: Some("Sains".to_string()),
            level: None,
            location: Some("Jakarta".to_string()),
            deadline_from: Some(date(2025, 1, 1)),
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM scholarships WHERE 1=1");
        filter.push_predicates(&mut builder);
        assert_eq!(
            builder.sql(),
            "SELECT * FROM scholarships WHERE 1=1 AND category ILIKE $1 AND location ILIKE $2 AND deadline >= $3"
        );
    }

    #[test]
    fn test_registration_status_parameter() {
        assert_eq!(RegistrationFilter::parse_status(None).unwrap(), None);
        assert_eq!(RegistrationFilter::parse_status(Some(" ")).unwrap(), None);
        assert_eq!(
            RegistrationFilter::parse_status(Some("Terdaftar")).unwrap(),
            Some(RegistrationStatus::Registered)
        );
        assert!(RegistrationFilter::parse_status(Some("unknown")).is_err());
    }

    #[test]
    fn test_registration_sql_predicates() {
        let filter = RegistrationFilter {
            webinar_id: Some(7),
            status: Some(RegistrationStatus::Attended),
        };
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM webinar_registrations r WHERE 1=1");
        filter.push_predicates(&mut builder);
        assert!(builder.sql().ends_with("AND r.webinar_id = $1 AND r.status = $2"));
    }

    fn registration(webinar_id: i64, status: RegistrationStatus) -> WebinarRegistration {
        WebinarRegistration {
            id: 1,
            uuid: Uuid::new_v4(),
            webinar_id,
            user_id: None,
            name: "Andi".to_string(),
            education_level: "S1".to_string(),
            institution: "UI".to_string(),
            major: None,
            email: "a@x.com".to_string(),
            phone: None,
            reason: None,
            status: status.as_str().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_registration_filter_selects_webinar_and_status() {
        let fixture = vec![
            registration(7, RegistrationStatus::Registered),
            registration(7, RegistrationStatus::Attended),
            registration(8, RegistrationStatus::Attended),
        ];

        let everything = RegistrationFilter::default();
        assert_eq!(fixture.iter().filter(|r| everything.matches(r)).count(), 3);

        let by_webinar = RegistrationFilter { webinar_id: Some(7), status: None };
        assert_eq!(fixture.iter().filter(|r| by_webinar.matches(r)).count(), 2);

        let both = RegistrationFilter {
            webinar_id: Some(7),
            status: Some(RegistrationStatus::Attended),
        };
        let selected: Vec<_> = fixture.iter().filter(|r| both.matches(r)).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].status, "attended");

        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM webinar_registrations r WHERE 1=1");
        both.push_predicates(&mut builder);
        assert!(builder.sql().contains("r.webinar_id") && builder.sql().contains("r.status"));
    }

    proptest! {
        #[test]
        fn prop_category_filter_is_case_insensitive_substring(
            category in "[A-Za-z ]{0,12}",
            needle in "[A-Za-z]{1,4}",
        ) {
            let query = ScholarshipQuery { kategori: Some(needle.clone()), ..Default::default() };
            let filter = ScholarshipFilter::from_query(&query).unwrap();
            let posting = scholarship(&category, "S1", "Jakarta", date(2025, 1, 1));
            let expected = category.to_lowercase().contains(&needle.to_lowercase());
            prop_assert_eq!(filter.matches(&posting), expected);
        }

        #[test]
        fn prop_deadline_filter_keeps_only_later_dates(offset in -400i64..400) {
            let cutoff = date(2025, 1, 1);
            let deadline = cutoff + chrono::Duration::days(offset);
            let query = ScholarshipQuery { deadline: Some("2025-01-01".to_string()), ..Default::default() };
            let filter = ScholarshipFilter::from_query(&query).unwrap();
            let posting = scholarship("Sains", "S1", "Jakarta", deadline);
            prop_assert_eq!(filter.matches(&posting), deadline >= cutoff);
        }
    }
}
