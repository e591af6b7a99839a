// ==========================================
// 医院容量规划系统 - 模拟配置
// ==========================================
// 显式不可变配置值, 每次调用传入管线; 核心不持有进程级状态
// 职责: 参数容器 + 取值范围校验 + 观测截止日推导
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::thresholds::AmpelThresholds;
use crate::domain::types::{Rhythmus, BASE_CLUSTER_COUNT, BASE_NURSE_RATIO};

// ==========================================
// ConfigError - 配置层错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("参数超出范围: {field}={value} (允许 {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("参数不是有限数值: {field}")]
    NotFinite { field: &'static str },

    #[error("未知的数据节奏: {0}")]
    UnknownRhythmus(String),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// SimulationConfig - 模拟配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    // ===== 模拟范围 =====
    pub year: i32,
    pub seed: u64,

    // ===== 内部参数 =====
    pub budget_growth: f64,      // 预算增长率
    pub verweildauer_delta: f64, // 住院时长偏移 (天)
    pub op_zeiten_delta: f64,    // 手术时长偏移 (分钟)
    pub nurse_ratio: f64,        // 患者-护理配比
    pub abwesenheiten: f64,      // 缺勤率
    pub cluster_anzahl: i64,     // 病区聚类数

    // ===== 外部因子强度 =====
    pub saisonalitaet_staerke: f64,
    pub flu_index_staerke: f64,
    pub weather_risk_staerke: f64,

    // ===== 同化节奏 =====
    pub rhythmus: Rhythmus,

    // ===== 观测截止日 (可选覆盖) =====
    pub stichtag: Option<NaiveDate>,
}

impl SimulationConfig {
    /// 按前端默认参数构造指定年份的配置
    pub fn new(year: i32) -> Self {
        Self {
            year,
            seed: 42,
            budget_growth: 0.03,
            verweildauer_delta: 0.2,
            op_zeiten_delta: 5.0,
            nurse_ratio: BASE_NURSE_RATIO,
            abwesenheiten: 0.06,
            cluster_anzahl: BASE_CLUSTER_COUNT,
            saisonalitaet_staerke: 1.0,
            flu_index_staerke: 0.8,
            weather_risk_staerke: 0.6,
            rhythmus: Rhythmus::Woechentlich,
            stichtag: None,
        }
    }

    /// 推导观测截止日
    ///
    /// # 规则
    /// - 显式指定时使用指定值
    /// - 模拟年份为当前年份时使用今天
    /// - 否则使用该年12月31日
    pub fn resolve_stichtag(&self) -> NaiveDate {
        if let Some(date) = self.stichtag {
            return date;
        }
        let today = chrono::Local::now().date_naive();
        if today.year() == self.year {
            today
        } else {
            NaiveDate::from_ymd_opt(self.year, 12, 31).expect("12月31日恒为有效日期")
        }
    }

    /// 校验全部参数的取值范围与有限性
    ///
    /// # 返回
    /// - `Ok(())`: 校验通过
    /// - `Err(ConfigError)`: 首个越界/非法参数
    pub fn validate(&self) -> ConfigResult<()> {
        check_range("year", self.year as f64, 2020.0, 2035.0)?;
        check_range("seed", self.seed as f64, 1.0, 9999.0)?;
        check_range("budget_growth", self.budget_growth, 0.0, 0.20)?;
        check_range("verweildauer_delta", self.verweildauer_delta, -1.0, 2.0)?;
        check_range("op_zeiten_delta", self.op_zeiten_delta, -20.0, 25.0)?;
        check_range("nurse_ratio", self.nurse_ratio, 3.0, 8.0)?;
        check_range("abwesenheiten", self.abwesenheiten, 0.0, 0.20)?;
        check_range("cluster_anzahl", self.cluster_anzahl as f64, 2.0, 10.0)?;
        check_range(
            "saisonalitaet_staerke",
            self.saisonalitaet_staerke,
            0.0,
            2.0,
        )?;
        check_range("flu_index_staerke", self.flu_index_staerke, 0.0, 1.5)?;
        check_range("weather_risk_staerke", self.weather_risk_staerke, 0.0, 1.5)?;
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(chrono::Local::now().year())
    }
}

/// 校验信号灯阈值的取值范围
///
/// 注意: 只校验各自的取值区间, 不校验 gruen < gelb 的次序约定
/// (倒置阈值属于调用方责任, 见 AmpelThresholds 的前置条件说明)
pub fn validate_thresholds(thresholds: &AmpelThresholds) -> ConfigResult<()> {
    check_range("ampel_gruen", thresholds.gruen, 0.01, 0.10)?;
    check_range("ampel_gelb", thresholds.gelb, 0.05, 0.30)?;
    Ok(())
}

/// 单参数范围校验 (含有限性检查)
fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> ConfigResult<()> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
