// ==========================================
// 医院容量规划系统 - 日度记录领域模型
// ==========================================
// 每个 (日期, 资源) 组合一行, 模拟运行一次性生成, 之后不可变
// 红线: 驱动因子分解必须精确, rest 按构造闭合
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::Ressource;

// ==========================================
// 驱动因子 (DriverKind)
// ==========================================
// 封闭集合: 三个外部因子 + 五个内部参数 + 残差
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    FluIndex,
    WeatherRisk,
    EventImpact,
    Verweildauer,
    OpZeiten,
    NurseRatio,
    Abwesenheiten,
    Cluster,
    Rest,
}

impl DriverKind {
    /// 固定遍历顺序 (与导出列顺序一致)
    pub const ALL: [DriverKind; 9] = [
        DriverKind::FluIndex,
        DriverKind::WeatherRisk,
        DriverKind::EventImpact,
        DriverKind::Verweildauer,
        DriverKind::OpZeiten,
        DriverKind::NurseRatio,
        DriverKind::Abwesenheiten,
        DriverKind::Cluster,
        DriverKind::Rest,
    ];

    /// 因子键名
    pub fn key(&self) -> &'static str {
        match self {
            DriverKind::FluIndex => "flu_index",
            DriverKind::WeatherRisk => "weather_risk",
            DriverKind::EventImpact => "event_impact",
            DriverKind::Verweildauer => "verweildauer",
            DriverKind::OpZeiten => "op_zeiten",
            DriverKind::NurseRatio => "nurse_ratio",
            DriverKind::Abwesenheiten => "abwesenheiten",
            DriverKind::Cluster => "cluster",
            DriverKind::Rest => "rest",
        }
    }

    /// 导出列名 (`driver_<key>`)
    pub fn column_name(&self) -> &'static str {
        match self {
            DriverKind::FluIndex => "driver_flu_index",
            DriverKind::WeatherRisk => "driver_weather_risk",
            DriverKind::EventImpact => "driver_event_impact",
            DriverKind::Verweildauer => "driver_verweildauer",
            DriverKind::OpZeiten => "driver_op_zeiten",
            DriverKind::NurseRatio => "driver_nurse_ratio",
            DriverKind::Abwesenheiten => "driver_abwesenheiten",
            DriverKind::Cluster => "driver_cluster",
            DriverKind::Rest => "driver_rest",
        }
    }
}

// ==========================================
// 驱动因子贡献 (绝对单位)
// ==========================================
// 因子集合封闭可枚举, 用定宽结构而非动态映射
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverContributions {
    pub flu_index: f64,
    pub weather_risk: f64,
    pub event_impact: f64,
    pub verweildauer: f64,
    pub op_zeiten: f64,
    pub nurse_ratio: f64,
    pub abwesenheiten: f64,
    pub cluster: f64,
    pub rest: f64, // 残差: (forecast_raw - plan) - 其余贡献之和
}

impl DriverContributions {
    /// 具名因子之和 (不含残差)
    pub fn named_sum(&self) -> f64 {
        self.flu_index
            + self.weather_risk
            + self.event_impact
            + self.verweildauer
            + self.op_zeiten
            + self.nurse_ratio
            + self.abwesenheiten
            + self.cluster
    }

    /// 全部贡献之和 (含残差), 恒等于 forecast_raw - plan
    pub fn total(&self) -> f64 {
        self.named_sum() + self.rest
    }

    /// 按因子取值
    pub fn get(&self, kind: DriverKind) -> f64 {
        match kind {
            DriverKind::FluIndex => self.flu_index,
            DriverKind::WeatherRisk => self.weather_risk,
            DriverKind::EventImpact => self.event_impact,
            DriverKind::Verweildauer => self.verweildauer,
            DriverKind::OpZeiten => self.op_zeiten,
            DriverKind::NurseRatio => self.nurse_ratio,
            DriverKind::Abwesenheiten => self.abwesenheiten,
            DriverKind::Cluster => self.cluster,
            DriverKind::Rest => self.rest,
        }
    }
}

// ==========================================
// DailyRecord - 日度记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    // ===== 主键 =====
    pub date: NaiveDate,
    pub resource: Ressource,

    // ===== 序列值 =====
    pub plan: f64,         // 计划值 (预算口径)
    pub forecast_raw: f64, // 同化前预测
    pub forecast: f64,     // 同化后预测
    pub capacity: f64,     // 可用容量
    pub actuals: f64,      // 模拟实际值

    // ===== 观测状态 =====
    // 未到观测日的实际值为 None, 而非 NaN 哨兵
    pub actuals_to_date: Option<f64>,

    // ===== 日历维度 =====
    pub weekday: u32, // 0=周一 .. 6=周日
    pub week: u32,    // ISO 周号

    // ===== 当日外部指数 =====
    pub seasonality: f64,
    pub flu_index: f64,
    pub weather_risk: f64,
    pub event_impact: f64,

    // ===== 派生指标 =====
    pub drivers: DriverContributions,
    pub gap: f64,      // forecast - capacity (正=短缺)
    pub norm_gap: f64, // gap / capacity (容量为0时取0)
}

// ==========================================
// SimulationDataset - 模拟数据集
// ==========================================
// 行序固定: 资源优先, 日期升序; 每次请求重新推导, 不持久化
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationDataset {
    pub rows: Vec<DailyRecord>,
}

impl SimulationDataset {
    pub fn new(rows: Vec<DailyRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyRecord> {
        self.rows.iter()
    }

    /// 观测窗口内的行 (date <= stichtag)
    pub fn past_rows(&self, stichtag: NaiveDate) -> Vec<&DailyRecord> {
        self.rows.iter().filter(|r| r.date <= stichtag).collect()
    }
}
