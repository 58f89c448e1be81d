use shared::IncomeRecord;

#[derive(Debug, thiserror::Error)]
pub enum RecordValidationError {
    #[error("Hours worked cannot be negative")]
    NegativeHours,
    #[error("Sales amount cannot be negative")]
    NegativeSales,
    #[error("Tips amount cannot be negative")]
    NegativeTips,
    #[error("Total revenue cannot be negative")]
    NegativeRevenue,
    #[error("Numeric fields must be finite")]
    NonFiniteValue,
}

/// Validate an income record before it enters the snapshot.
pub fn validate_record(record: &IncomeRecord) -> Result<(), RecordValidationError> {
    let values = [
        record.hours_worked,
        record.sales_amount,
        record.tips_amount,
        record.total_revenue,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(RecordValidationError::NonFiniteValue);
    }
    if record.hours_worked < 0.0 {
        return Err(RecordValidationError::NegativeHours);
    }
    if record.sales_amount < 0.0 {
        return Err(RecordValidationError::NegativeSales);
    }
    if record.tips_amount < 0.0 {
        return Err(RecordValidationError::NegativeTips);
    }
    if record.total_revenue < 0.0 {
        return Err(RecordValidationError::NegativeRevenue);
    }
    Ok(())
}
