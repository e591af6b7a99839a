// ==========================================
// 医院容量规划系统 - CSV 导出
// ==========================================
// 职责: 数据集 → 前端下载/外部系统消费的分隔文本
// 契约: ISO 日期, 数值3位小数, 固定表头; 未观测实际值导出为空
// ==========================================

use std::path::Path;

use thiserror::Error;

use crate::domain::record::{DriverKind, SimulationDataset};

/// 导出表头 (列顺序即契约)
pub const EXPORT_HEADER: [&str; 18] = [
    "date",
    "resource",
    "plan",
    "forecast",
    "capacity",
    "actuals",
    "actuals_to_date",
    "gap",
    "norm_gap",
    "driver_flu_index",
    "driver_weather_risk",
    "driver_event_impact",
    "driver_verweildauer",
    "driver_op_zeiten",
    "driver_nurse_ratio",
    "driver_abwesenheiten",
    "driver_cluster",
    "driver_rest",
];

// ==========================================
// ExportError - 导出层错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("导出内容不是合法 UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;

/// 数据集 → CSV 字符串
pub fn to_csv(dataset: &SimulationDataset) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;

    for row in dataset.iter() {
        let mut record: Vec<String> = Vec::with_capacity(EXPORT_HEADER.len());
        record.push(row.date.format("%Y-%m-%d").to_string());
        record.push(row.resource.to_string());
        record.push(format!("{:.3}", row.plan));
        record.push(format!("{:.3}", row.forecast));
        record.push(format!("{:.3}", row.capacity));
        record.push(format!("{:.3}", row.actuals));
        record.push(match row.actuals_to_date {
            Some(value) => format!("{:.3}", value),
            None => String::new(),
        });
        record.push(format!("{:.3}", row.gap));
        record.push(format!("{:.3}", row.norm_gap));
        for kind in DriverKind::ALL {
            record.push(format!("{:.3}", row.drivers.get(kind)));
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// 数据集 → CSV 文件
pub fn write_csv(dataset: &SimulationDataset, path: &Path) -> ExportResult<()> {
    let content = to_csv(dataset)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), rows = dataset.len(), "CSV 导出完成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{DailyRecord, DriverContributions};
    use crate::domain::types::Ressource;
    use chrono::{Datelike, NaiveDate};

    fn sample_dataset() -> SimulationDataset {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        SimulationDataset::new(vec![DailyRecord {
            date,
            resource: Ressource::Op,
            plan: 75.5,
            forecast_raw: 80.0,
            forecast: 80.1234,
            capacity: 70.0,
            actuals: 81.0,
            actuals_to_date: None,
            weekday: date.weekday().num_days_from_monday(),
            week: date.iso_week().week(),
            seasonality: 0.0,
            flu_index: 0.0,
            weather_risk: 0.0,
            event_impact: 0.0,
            drivers: DriverContributions::default(),
            gap: 10.1234,
            norm_gap: 0.14462,
        }])
    }

    #[test]
    fn test_header_and_row_format() {
        let csv_text = to_csv(&sample_dataset()).unwrap();
        let mut lines = csv_text.lines();

        assert_eq!(lines.next().unwrap(), EXPORT_HEADER.join(","));
        let row = lines.next().unwrap();
        assert!(row.starts_with("2024-02-29,OP,75.500,80.123,70.000,81.000,,10.123,0.145"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_observed_actuals_are_exported() {
        let mut dataset = sample_dataset();
        dataset.rows[0].actuals_to_date = Some(81.0);
        let csv_text = to_csv(&dataset).unwrap();
        assert!(csv_text.contains(",81.000,81.000,"));
    }
}
