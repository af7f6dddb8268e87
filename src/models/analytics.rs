//! Chart series returned by the analytics endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Single labelled score, used for class and subject performance bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePoint {
    pub name: String,
    pub score: f64,
}

/// Attendance percentage for one bucket (weekday, week, month...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendancePoint {
    pub name: String,
    pub students: f64,
    pub teachers: f64,
}

/// Point of a multi-series chart: a label plus one value per series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

/// Aggregation window for attendance data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendancePeriod {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl AttendancePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendancePeriod::Day => "day",
            AttendancePeriod::Week => "week",
            AttendancePeriod::Month => "month",
            AttendancePeriod::Year => "year",
        }
    }
}

impl fmt::Display for AttendancePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendancePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(AttendancePeriod::Day),
            "week" => Ok(AttendancePeriod::Week),
            "month" => Ok(AttendancePeriod::Month),
            "year" => Ok(AttendancePeriod::Year),
            other => Err(format!(
                "invalid period '{}' (expected day, week, month or year)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_and_default() {
        assert_eq!(AttendancePeriod::default(), AttendancePeriod::Week);
        assert_eq!("Month".parse::<AttendancePeriod>(), Ok(AttendancePeriod::Month));
        assert!("quarter".parse::<AttendancePeriod>().is_err());
    }

    #[test]
    fn test_series_point_flattens_values() {
        let point: SeriesPoint =
            serde_json::from_str(r#"{"name":"Term 1","average":81.5,"top":97}"#).unwrap();
        assert_eq!(point.name, "Term 1");
        assert_eq!(point.values.get("average"), Some(&81.5));
        assert_eq!(point.values.get("top"), Some(&97.0));
    }
}
