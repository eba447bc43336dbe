use crate::model::AnalysisResult;
use anyhow::Result;
use std::path::Path;

/// Export history rows to CSV with headers:
/// id,date,part_name,part_number,status,compatibility
pub fn export_history_csv(rows: &[AnalysisResult], path: impl AsRef<Path>) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "id",
        "date",
        "part_name",
        "part_number",
        "status",
        "compatibility",
    ])?;

    for record in rows {
        let date = record.date_label();
        let models = record.compatibility.join("; ");
        wtr.write_record([
            record.id.as_str(),
            date.as_str(),
            record.part_name.as_str(),
            record.part_number.as_str(),
            record.status.as_str(),
            models.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisResult, RecordId, seed_history};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn export_writes_header_and_rows_in_history_order() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.csv");
        let mut rows = seed_history();
        rows.insert(
            0,
            AnalysisResult::placeholder(
                RecordId::new("1767225600000"),
                "data:image/png;base64,AA==".into(),
                NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
            ),
        );

        export_history_csv(&rows, &path)?;

        let mut rdr = csv::Reader::from_path(&path)?;
        let headers = rdr.headers()?.clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["id", "date", "part_name", "part_number", "status", "compatibility"]
        );

        let mut recs = rdr.records();
        let r1 = recs.next().unwrap()?;
        assert_eq!(&r1[0], "1767225600000");
        assert_eq!(&r1[1], "2026-10-15");
        assert_eq!(&r1[2], "Анализируется...");
        assert_eq!(&r1[4], "pending");
        assert_eq!(&r1[5], "");

        let r2 = recs.next().unwrap()?;
        assert_eq!(&r2[0], "1");
        assert_eq!(&r2[3], "BR-2847-VNT");
        assert_eq!(&r2[4], "identified");
        assert_eq!(&r2[5], "BMW 3 Series; BMW 5 Series; BMW X3");

        let r3 = recs.next().unwrap()?;
        assert_eq!(&r3[2], "Амортизатор задний");

        assert!(recs.next().is_none());
        Ok(())
    }

    #[test]
    fn empty_history_still_gets_a_header() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv");
        export_history_csv(&[], &path)?;
        let content = std::fs::read_to_string(&path)?;
        assert_eq!(content.trim(), "id,date,part_name,part_number,status,compatibility");
        Ok(())
    }
}
