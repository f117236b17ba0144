//! CSV 历史观测数据源
//!
//! `http://` / `https://` 位置通过 HTTP 下载，其余按本地文件路径读取

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use reqwest::Client;
use salescast_ports::{Observation, ObservationSource, SourceError};

pub struct CsvObservationSource {
    location: String,
    date_column: String,
    value_column: String,
    client: Client,
}

impl CsvObservationSource {
    pub fn new(
        location: impl Into<String>,
        date_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            date_column: date_column.into(),
            value_column: value_column.into(),
            client: Client::new(),
        }
    }

    fn is_remote(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }

    async fn read_raw(&self) -> Result<String, SourceError> {
        if self.is_remote() {
            let response = self
                .client
                .get(&self.location)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| SourceError::Unavailable(e.to_string()))?;

            response
                .text()
                .await
                .map_err(|e| SourceError::Unavailable(e.to_string()))
        } else {
            tokio::fs::read_to_string(&self.location)
                .await
                .map_err(|e| SourceError::Unavailable(format!("{}: {}", self.location, e)))
        }
    }
}

#[async_trait]
impl ObservationSource for CsvObservationSource {
    async fn fetch(&self) -> Result<Vec<Observation>, SourceError> {
        let raw = self.read_raw().await?;
        parse_observations(&raw, &self.date_column, &self.value_column)
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// 解析 CSV 文本，按表头名称定位日期列和数值列
///
/// 数值列为空时记为 NaN
pub fn parse_observations(
    raw: &str,
    date_column: &str,
    value_column: &str,
) -> Result<Vec<Observation>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SourceError::Unavailable(e.to_string()))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SourceError::MissingField(name.to_string()))
    };
    let date_idx = column(date_column)?;
    let value_idx = column(value_column)?;

    let mut observations = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| SourceError::Malformed {
            row,
            reason: e.to_string(),
        })?;

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| SourceError::Malformed {
            row,
            reason: format!("invalid date '{}'", raw_date),
        })?;

        let raw_value = record.get(value_idx).unwrap_or_default();
        let value = if raw_value.is_empty() {
            f64::NAN
        } else {
            raw_value.parse::<f64>().map_err(|_| SourceError::Malformed {
                row,
                reason: format!("invalid value '{}'", raw_value),
            })?
        };

        observations.push(Observation::new(date, value));
    }

    Ok(observations)
}

/// 解析日期或日期时间，只保留日历日期
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-31"), Some(date(2024, 1, 31)));
        assert_eq!(parse_date("2022-09-03 17:10:08.079328"), Some(date(2022, 9, 3)));
        assert_eq!(parse_date("2022-09-03 17:10:08"), Some(date(2022, 9, 3)));
        assert_eq!(parse_date("2022-09-03T17:10:08"), Some(date(2022, 9, 3)));
        assert_eq!(parse_date("2022-09-03T17:10:08+02:00"), Some(date(2022, 9, 3)));
        assert_eq!(parse_date("03/09/2022"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_observations_by_header_name() {
        let raw = "id,sales,date\n1,55.29,2022-09-03 17:10:08.079328\n2,53.85,2022-09-04 17:10:08.079328\n";
        let observations = parse_observations(raw, "date", "sales").unwrap();
        assert_eq!(
            observations,
            vec![
                Observation::new(date(2022, 9, 3), 55.29),
                Observation::new(date(2022, 9, 4), 53.85),
            ]
        );
    }

    #[test]
    fn test_missing_columns() {
        let raw = "day,sales\n2024-01-01,1.0\n";
        assert_eq!(
            parse_observations(raw, "date", "sales"),
            Err(SourceError::MissingField("date".into()))
        );

        let raw = "date,revenue\n2024-01-01,1.0\n";
        assert_eq!(
            parse_observations(raw, "date", "sales"),
            Err(SourceError::MissingField("sales".into()))
        );

        assert_eq!(
            parse_observations("", "date", "sales"),
            Err(SourceError::MissingField("date".into()))
        );
    }

    #[test]
    fn test_malformed_rows() {
        let raw = "date,sales\n2024-01-01,1.0\nnot-a-date,2.0\n";
        assert!(matches!(
            parse_observations(raw, "date", "sales"),
            Err(SourceError::Malformed { row: 2, .. })
        ));

        let raw = "date,sales\n2024-01-01,lots\n";
        assert!(matches!(
            parse_observations(raw, "date", "sales"),
            Err(SourceError::Malformed { row: 1, .. })
        ));
    }

    #[test]
    fn test_empty_value_is_nan() {
        let raw = "date,sales\n2024-01-01,\n";
        let observations = parse_observations(raw, "date", "sales").unwrap();
        assert!(observations[0].value.is_nan());
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "date,sales").unwrap();
        writeln!(file, "2024-01-30,100.5").unwrap();
        writeln!(file, "2024-01-31,101.2").unwrap();

        let source = CsvObservationSource::new(file.path().to_string_lossy(), "date", "sales");
        let observations = source.fetch().await.unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].date, date(2024, 1, 31));
    }

    #[tokio::test]
    async fn test_missing_local_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        let source = CsvObservationSource::new(path.to_string_lossy(), "date", "sales");
        assert!(matches!(
            source.fetch().await,
            Err(SourceError::Unavailable(_))
        ));
    }
}
