use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// One preview row: column name -> cell value, in the column order the
/// backend sent (`serde_json` is built with `preserve_order`).
pub type PreviewRow = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub rows: u64,
    #[serde(default)]
    pub columns: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Shape {
    pub rows: u64,
    pub columns: u64,
}

/// Numeric column statistics. `min`/`max`/`iqr` are newer backend fields and
/// may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnStatistics {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub iqr: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnStat {
    pub name: String,
    pub dtype: String,
    pub null_count: u64,
    pub null_percentage: String,
    pub unique: u64,
    /// Present only for numeric columns; absence means categorical/text.
    #[serde(default)]
    pub statistics: Option<ColumnStatistics>,
    #[serde(default)]
    pub top_values: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    pub outliers: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryReport {
    pub shape: Shape,
    pub memory_usage: String,
    pub total_missing: u64,
    pub missing_percentage: String,
    #[serde(default)]
    pub insights: Vec<String>,
    pub columns: Vec<ColumnStat>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub duplicate_rows: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Correlation {
    pub f1: String,
    pub f2: String,
    pub corr: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureReport {
    #[serde(default)]
    pub numeric_features: Vec<String>,
    #[serde(default)]
    pub categorical_features: Vec<String>,
    #[serde(default)]
    pub datetime_features: Vec<String>,
    #[serde(default)]
    pub strong_correlations: Vec<Correlation>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMethod {
    Drop,
    Mean,
    Median,
    Mode,
    Constant,
    Ffill,
    Bfill,
}

impl MissingMethod {
    pub fn parse(token: &str) -> Result<Self, AppError> {
        match token {
            "drop" => Ok(MissingMethod::Drop),
            "mean" => Ok(MissingMethod::Mean),
            "median" => Ok(MissingMethod::Median),
            "mode" => Ok(MissingMethod::Mode),
            "constant" => Ok(MissingMethod::Constant),
            "ffill" => Ok(MissingMethod::Ffill),
            "bfill" => Ok(MissingMethod::Bfill),
            other => Err(AppError::Validation(format!(
                "Unknown missing-value method '{}'. Expected one of: drop, mean, median, mode, constant, ffill, bfill",
                other
            ))),
        }
    }
}

/// How missing values are handled. `value` is serialized ONLY for the
/// constant method; downstream may misinterpret a stray value otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct MissingStrategy {
    pub method: MissingMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl MissingStrategy {
    /// Builds the strategy, attaching `constant` only when the method asks
    /// for it. A blank constant is legal and kept as the empty string.
    pub fn new(method: MissingMethod, constant: &str) -> Self {
        let value = match method {
            MissingMethod::Constant => Some(constant.to_string()),
            _ => None,
        };
        MissingStrategy { method, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    Iqr,
    Zscore,
}

#[derive(Debug, Clone, Serialize)]
pub struct CleanConfig {
    pub remove_duplicates: bool,
    pub remove_empty_cols: bool,
    pub missing: MissingStrategy,
    /// Optional outlier handling; omitted entirely unless requested so a
    /// plain config stays identical to what older backends expect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_outliers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlier_method: Option<OutlierMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlier_cap: Option<bool>,
}

impl CleanConfig {
    pub fn new(remove_duplicates: bool, remove_empty_cols: bool, missing: MissingStrategy) -> Self {
        CleanConfig {
            remove_duplicates,
            remove_empty_cols,
            missing,
            remove_outliers: None,
            outlier_method: None,
            outlier_cap: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanActions {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub before: Option<Shape>,
    #[serde(default)]
    pub after: Option<Shape>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CleanReport {
    pub report: CleanActions,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualizeRequest {
    #[serde(rename = "type")]
    pub chart_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartSet {
    #[serde(default)]
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetResult {
    #[serde(default)]
    pub success: bool,
}

/// Uniform failure shape: any endpoint may answer `{error: string}` instead
/// of its success fields. The error field is checked FIRST; when present no
/// other field of the response is interpreted.
pub fn backend_error(value: &Value) -> Option<String> {
    let err = value.as_object()?.get("error")?;
    match err {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Decodes a backend reply into its typed success shape, surfacing a
/// server-reported `{error}` verbatim as `AppError::Backend`.
pub fn decode_reply<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    if let Some(message) = backend_error(&value) {
        return Err(AppError::Backend(message));
    }
    serde_json::from_value(value).map_err(|e| AppError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_field_wins_over_success_fields() {
        let value = json!({"error": "boom", "success": true, "filename": "x.csv"});
        let result: Result<UploadResult, _> = decode_reply(value);
        match result {
            Err(AppError::Backend(msg)) => assert_eq!(msg, "boom"),
            other => panic!("expected backend error, got {:?}", other.map(|r| r.filename)),
        }
    }

    #[test]
    fn decodes_upload_result() {
        let value = json!({"success": true, "filename": "sales.csv", "rows": 120, "columns": 7});
        let result: UploadResult = decode_reply(value).unwrap();
        assert!(result.success);
        assert_eq!(result.filename, "sales.csv");
        assert_eq!(result.rows, 120);
        assert_eq!(result.columns, 7);
    }

    #[test]
    fn preview_rows_keep_column_order() {
        let value = json!([{"z": 1, "a": 2, "m": 3}]);
        let rows: Vec<PreviewRow> = decode_reply(value).unwrap();
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn column_without_statistics_decodes_to_none() {
        let value = json!({
            "shape": {"rows": 3, "columns": 1},
            "memory_usage": "1.00 KB",
            "total_missing": 0,
            "missing_percentage": "0.00%",
            "columns": [{
                "name": "city", "dtype": "object",
                "null_count": 0, "null_percentage": "0.00%", "unique": 3
            }]
        });
        let report: SummaryReport = decode_reply(value).unwrap();
        assert!(report.columns[0].statistics.is_none());
        assert!(report.size.is_none());
    }

    #[test]
    fn clean_config_omits_value_for_non_constant_methods() {
        let config = CleanConfig::new(
            true,
            true,
            MissingStrategy::new(MissingMethod::Mean, "ignored"),
        );
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["missing"].get("value").is_none());
        assert_eq!(json["missing"]["method"], "mean");
        assert!(json.get("remove_outliers").is_none());
    }

    #[test]
    fn clean_config_keeps_blank_constant_value() {
        let config = CleanConfig::new(
            false,
            true,
            MissingStrategy::new(MissingMethod::Constant, ""),
        );
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["missing"]["value"], "");
        assert_eq!(json["missing"]["method"], "constant");
        assert_eq!(json["remove_duplicates"], false);
    }

    #[test]
    fn non_string_error_is_still_an_error() {
        let value = json!({"error": {"code": 500}});
        let result: Result<ResetResult, _> = decode_reply(value);
        assert!(matches!(result, Err(AppError::Backend(_))));
    }
}
