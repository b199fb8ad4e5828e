use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One itemised line of a rendered report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub formatted_amount: String,
    pub formatted_date: String,
}

/// Display-ready weekly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub expenses: Vec<ReportLine>,
    pub total: Decimal,
    pub formatted_total: String,
    pub formatted_start: String,
    pub formatted_end: String,
}
