// ==========================================
// 医院容量规划系统 - 周度聚合领域模型
// ==========================================
// (资源, ISO周) 单元格, 每次请求从日度记录重新聚合, 不持久化
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::{AmpelStatus, Ressource};

// ==========================================
// WeeklyCell - 周度聚合单元格
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyCell {
    pub resource: Ressource,
    pub week: u32,
    pub gap_sum: f64,
    pub capacity_sum: f64,
    pub days: usize,
    /// gap_sum / capacity_sum, 容量为0时取0 (退化容量保护, 不是错误)
    pub norm_gap: f64,
}

// ==========================================
// CellDetail - 前端明细行契约
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellDetail {
    pub resource: Ressource,
    pub kw: u32, // Kalenderwoche (ISO 周号)
    pub status: AmpelStatus,
    pub farbe: String,
    pub gap: f64,
    pub norm_gap: f64,
    pub empfehlung: String,
}

// ==========================================
// WeeklyTotals - 周度汇总 (Sparkline 数据源)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    pub week: u32,
    pub actuals: f64,
    pub forecast: f64,
    pub capacity: f64,
}
