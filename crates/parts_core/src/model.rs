//! History records and the identification they carry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Part name shown while a record is still being analyzed.
pub const PLACEHOLDER_PART_NAME: &str = "Анализируется...";
/// Part number shown while a record is still being analyzed.
pub const PLACEHOLDER_PART_NUMBER: &str = "...";
/// Part name written to a record whose analysis failed.
pub const FAILED_PART_NAME: &str = "Не распознано";
/// Part number written to a record whose analysis failed.
pub const FAILED_PART_NUMBER: &str = "—";

/// Image reference used by the seed records.
pub const SEED_IMAGE: &str = "/placeholder.svg";

/// Identifier of a history record, derived from its creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out timestamp-derived ids that never repeat within one generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Returns an id for `now`, bumping past the previous one when two
    /// records land on the same millisecond.
    pub fn next_at(&mut self, now: DateTime<Utc>) -> RecordId {
        let millis = now.timestamp_millis().max(self.last + 1);
        self.last = millis;
        RecordId(millis.to_string())
    }
}

/// What a recognition provider reports for one photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartIdentification {
    pub part_name: String,
    pub part_number: String,
    pub compatibility: Vec<String>,
}

impl PartIdentification {
    pub fn new(
        part_name: impl Into<String>,
        part_number: impl Into<String>,
        compatibility: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            part_name: part_name.into(),
            part_number: part_number.into(),
            compatibility: compatibility.into_iter().map(Into::into).collect(),
        }
    }
}

/// Where a record is in its single placeholder-to-final transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    Pending,
    Identified,
    /// Analysis finished without an identification.
    Failed(String),
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Identified => "identified",
            AnalysisStatus::Failed(_) => "failed",
        }
    }
}

/// One entry in the analysis history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: RecordId,
    /// Data URI of the uploaded photo (or a static reference for seed records).
    pub image: String,
    pub part_name: String,
    pub part_number: String,
    pub date: NaiveDate,
    pub compatibility: Vec<String>,
    pub status: AnalysisStatus,
}

impl AnalysisResult {
    /// A freshly uploaded record that has not been analyzed yet.
    pub fn placeholder(id: RecordId, image: String, date: NaiveDate) -> Self {
        Self {
            id,
            image,
            part_name: PLACEHOLDER_PART_NAME.to_string(),
            part_number: PLACEHOLDER_PART_NUMBER.to_string(),
            date,
            compatibility: Vec::new(),
            status: AnalysisStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == AnalysisStatus::Pending
    }

    /// `YYYY-MM-DD`.
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub(crate) fn identify(&mut self, found: PartIdentification) {
        self.part_name = found.part_name;
        self.part_number = found.part_number;
        self.compatibility = found.compatibility;
        self.status = AnalysisStatus::Identified;
    }

    pub(crate) fn fail(&mut self, reason: String) {
        self.part_name = FAILED_PART_NAME.to_string();
        self.part_number = FAILED_PART_NUMBER.to_string();
        self.compatibility.clear();
        self.status = AnalysisStatus::Failed(reason);
    }
}

/// The two example records every session starts with.
pub fn seed_history() -> Vec<AnalysisResult> {
    let seed = |id: &str, name: &str, number: &str, (y, m, d): (i32, u32, u32), models: &[&str]| {
        AnalysisResult {
            id: RecordId::new(id),
            image: SEED_IMAGE.to_string(),
            part_name: name.to_string(),
            part_number: number.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
            compatibility: models.iter().map(|m| m.to_string()).collect(),
            status: AnalysisStatus::Identified,
        }
    };
    vec![
        seed(
            "1",
            "Тормозной диск передний",
            "BR-2847-VNT",
            (2026, 1, 2),
            &["BMW 3 Series", "BMW 5 Series", "BMW X3"],
        ),
        seed(
            "2",
            "Амортизатор задний",
            "SH-1923-KYB",
            (2026, 1, 1),
            &["Toyota Camry", "Toyota RAV4"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn ids_follow_the_clock() {
        let mut ids = IdGenerator::default();
        let t = Utc.timestamp_millis_opt(1_767_225_600_123).unwrap();
        assert_eq!(ids.next_at(t).as_str(), "1767225600123");
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut ids = IdGenerator::default();
        let t = Utc.timestamp_millis_opt(1_767_225_600_000).unwrap();
        let a = ids.next_at(t);
        let b = ids.next_at(t);
        let c = ids.next_at(t);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(c.as_str(), "1767225600002");
    }

    #[test]
    fn placeholder_starts_pending_and_empty() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let rec = AnalysisResult::placeholder(RecordId::new("7"), "data:,".into(), date);
        assert!(rec.is_pending());
        assert_eq!(rec.part_name, PLACEHOLDER_PART_NAME);
        assert_eq!(rec.part_number, PLACEHOLDER_PART_NUMBER);
        assert!(rec.compatibility.is_empty());
        assert_eq!(rec.date_label(), "2026-10-15");
    }

    #[test]
    fn seed_history_has_two_identified_records() {
        let seeds = seed_history();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].id.as_str(), "1");
        assert_eq!(seeds[0].date_label(), "2026-01-02");
        assert_eq!(seeds[1].compatibility, vec!["Toyota Camry", "Toyota RAV4"]);
        assert!(seeds.iter().all(|s| s.status == AnalysisStatus::Identified));
    }
}
