//! Export service domain logic.
//!
//! Generates CSV exports of the income record snapshot, including the
//! filename the presentation layer should offer for the download.

use anyhow::Result;
use chrono::Utc;
use log::info;

use shared::ExportDataResponse;

use crate::domain::record_service::RecordService;

/// Service that handles export-related business logic
#[derive(Clone)]
pub struct ExportService {
    // No internal state needed for now
}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// Export all income records as CSV data
    pub fn export_records_csv(&self, record_service: &RecordService) -> Result<ExportDataResponse> {
        let records = record_service.snapshot();
        info!("Exporting {} income records as CSV", records.len());

        let mut csv_content = String::new();
        csv_content.push_str("record_date,hours_worked,sales_amount,tips_amount,total_revenue\n");

        for record in &records {
            let row = format!(
                "{},{:.2},{:.2},{:.2},{:.2}\n",
                record.date.format("%Y/%m/%d"),
                record.hours_worked,
                record.sales_amount,
                record.tips_amount,
                record.total_revenue
            );
            csv_content.push_str(&row);
        }

        let filename = format!("tip_income_{}.csv", Utc::now().format("%Y%m%d"));

        info!(
            "Generated CSV export ({} bytes) with filename: {}",
            csv_content.len(),
            filename
        );

        Ok(ExportDataResponse {
            csv_content,
            filename,
            record_count: records.len(),
        })
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{IncomeRecord, UpsertRecordRequest};

    #[test]
    fn test_export_empty_snapshot_is_header_only() {
        let export_service = ExportService::new();
        let record_service = RecordService::new();

        let response = export_service.export_records_csv(&record_service).unwrap();

        assert_eq!(response.record_count, 0);
        assert_eq!(
            response.csv_content,
            "record_date,hours_worked,sales_amount,tips_amount,total_revenue\n"
        );
        assert!(response.filename.starts_with("tip_income_"));
        assert!(response.filename.ends_with(".csv"));
    }

    #[test]
    fn test_export_formats_rows_chronologically() {
        let export_service = ExportService::new();
        let record_service = RecordService::new();

        for (date, tips) in [("2025-01-12", 30.0), ("2025-01-10", 25.5)] {
            record_service
                .upsert_record(UpsertRecordRequest {
                    record: IncomeRecord {
                        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                        hours_worked: 8.0,
                        sales_amount: 100.0,
                        tips_amount: tips,
                        total_revenue: 150.0,
                    },
                })
                .unwrap();
        }

        let response = export_service.export_records_csv(&record_service).unwrap();

        assert_eq!(response.record_count, 2);
        let lines: Vec<&str> = response.csv_content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2025/01/10,8.00,100.00,25.50,150.00");
        assert_eq!(lines[2], "2025/01/12,8.00,100.00,30.00,150.00");
    }
}
