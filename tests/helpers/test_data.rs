//! Test data builders

use chrono::NaiveDate;
use serde_json::{json, Value};
use scholar_hub::models::scholarship::{CreateScholarshipRequest, Scholarship};
use scholar_hub::models::webinar::{CreateWebinarRequest, Webinar, WebinarStatus};
use scholar_hub::AppState;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn create_scholarship(state: &AppState, title: &str, category: &str, deadline: NaiveDate) -> Scholarship {
    state
        .database
        .scholarships
        .create(CreateScholarshipRequest {
            title: title.to_string(),
            description: "Deskripsi".to_string(),
            detail: "Detail".to_string(),
            category: category.to_string(),
            level: "S1".to_string(),
            location: "Jakarta".to_string(),
            deadline,
            organizer: "Penyelenggara".to_string(),
            link: None,
            image: None,
        })
        .await
        .expect("Failed to create scholarship")
}

pub async fn create_webinar(state: &AppState, title: &str, status: WebinarStatus) -> Webinar {
    state
        .database
        .webinars
        .create(CreateWebinarRequest {
            title: title.to_string(),
            description: None,
            speaker: Some("Dr. Sari".to_string()),
            organizer: "ScholarHub".to_string(),
            event_date: date(2025, 3, 1),
            event_time: Some("19:00".to_string()),
            status: Some(status),
            link: None,
        })
        .await
        .expect("Failed to create webinar")
}

pub fn registration_body(webinar_id: &str, email: &str) -> Value {
    json!({
        "webinarId": webinar_id,
        "name": "Andi",
        "education_level": "S1",
        "institution": "Universitas Indonesia",
        "email": email,
        "phone": "081234567890",
        "reason": "Ingin belajar"
    })
}

pub fn mentoring_fields(status: &str) -> Vec<(&'static str, String)> {
    vec![
        ("title", "Menulis esai beasiswa".to_string()),
        ("description", "Sesi tanya jawab".to_string()),
        ("mentor_name", "Budi".to_string()),
        ("mentor_expertise", "Essay".to_string()),
        ("participant_count", "10".to_string()),
        ("status", status.to_string()),
        ("category", "Beasiswa".to_string()),
        ("link", "https://meet.example.com/abc".to_string()),
    ]
}
