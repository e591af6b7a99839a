// ==========================================
// 医院容量规划系统 - KPI 聚合引擎
// ==========================================
// 职责: 驾驶舱指标生成
// 输入: 模拟数据集 + 观测截止日 + 信号灯阈值
// 输出: 五项运营指标 + 因子/周度汇总
// ==========================================

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::record::{DailyRecord, DriverKind, SimulationDataset};
use crate::domain::thresholds::AmpelThresholds;
use crate::domain::types::Ressource;
use crate::domain::weekly::WeeklyTotals;

// 无历史数据时的回退窗口: 数据集前7行
const FALLBACK_WINDOW_ROWS: usize = 7;

// Sparkline 的回退窗口: 数据集前30行
const SPARKLINE_FALLBACK_ROWS: usize = 30;

// 取消率启发式: 0.5% 基础 + 5% × 正向归一化 Gap
const CANCELLATION_BASE: f64 = 0.005;
const CANCELLATION_SLOPE: f64 = 0.05;

// 护理压力插值控制点 (norm_gap → 分值)
const NURSE_PRESSURE_POINTS: [(f64, f64); 4] =
    [(-0.1, 10.0), (0.0, 30.0), (0.3, 70.0), (0.6, 95.0)];

// ==========================================
// KpiSet - 驾驶舱指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    /// 利用率 (%), 上限 100
    pub auslastung_pct: f64,
    /// 周度预测误差 MAPE (%)
    pub mape_pct: f64,
    /// 等待天数 (累计正向 Gap, 积压体量代理)
    pub wartetage: f64,
    /// 取消率 (%)
    pub stornoquote_pct: f64,
    /// 护理压力评分 (0-100)
    pub pflege_engpass: f64,
}

// ==========================================
// KpiEngine - KPI 聚合引擎
// ==========================================
pub struct KpiEngine {
    // 无状态引擎
}

impl KpiEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算五项驾驶舱指标
    ///
    /// # 参数
    /// - `dataset`: 模拟数据集
    /// - `stichtag`: 观测截止日
    /// - `_thresholds`: 信号灯阈值 (接口保留, 当前指标不消费)
    pub fn compute(
        &self,
        dataset: &SimulationDataset,
        stichtag: NaiveDate,
        _thresholds: &AmpelThresholds,
    ) -> KpiSet {
        let past = past_or_fallback(dataset, stichtag, FALLBACK_WINDOW_ROWS);

        KpiSet {
            auslastung_pct: self.utilisation(dataset, stichtag) * 100.0,
            mape_pct: self.mape(&past) * 100.0,
            wartetage: past.iter().map(|r| r.gap.max(0.0)).sum(),
            stornoquote_pct: self.cancellation_rate(&past) * 100.0,
            pflege_engpass: self.nurse_pressure(&past),
        }
    }

    /// 利用率: 当前 ISO 周已观测行的 Σactuals / Σcapacity, 上限 1.0
    fn utilisation(&self, dataset: &SimulationDataset, stichtag: NaiveDate) -> f64 {
        let current_week = stichtag.iso_week().week();
        let mut actual_sum = 0.0;
        let mut capacity_sum = 0.0;

        for row in dataset.iter().filter(|r| r.week == current_week) {
            if let Some(observed) = row.actuals_to_date {
                actual_sum += observed;
                capacity_sum += row.capacity;
            }
        }

        if capacity_sum > 0.0 {
            (actual_sum / capacity_sum).min(1.0)
        } else {
            0.0
        }
    }

    /// MAPE: 历史窗口按 (周, 资源) 汇总后的平均绝对百分比误差
    ///
    /// 实际值为0的分组按0贡献计入 (显式除零保护), 无分组时返回0
    fn mape(&self, past: &[&DailyRecord]) -> f64 {
        let mut groups: BTreeMap<(u32, Ressource), (f64, f64)> = BTreeMap::new();
        for row in past {
            let entry = groups.entry((row.week, row.resource)).or_insert((0.0, 0.0));
            entry.0 += row.actuals;
            entry.1 += row.forecast;
        }

        if groups.is_empty() {
            return 0.0;
        }

        let sum: f64 = groups
            .values()
            .map(|(actuals, forecast)| {
                if *actuals == 0.0 {
                    0.0
                } else {
                    (actuals - forecast).abs() / actuals
                }
            })
            .sum();
        sum / groups.len() as f64
    }

    /// 取消率: 过载 (正向 norm_gap) 线性拉高的启发式
    fn cancellation_rate(&self, past: &[&DailyRecord]) -> f64 {
        if past.is_empty() {
            return 0.0;
        }
        let sum: f64 = past
            .iter()
            .map(|r| CANCELLATION_BASE + CANCELLATION_SLOPE * r.norm_gap.max(0.0))
            .sum();
        sum / past.len() as f64
    }

    /// 护理压力评分: Personal 资源平均 norm_gap 的分段线性插值
    fn nurse_pressure(&self, past: &[&DailyRecord]) -> f64 {
        let personal: Vec<&&DailyRecord> = past
            .iter()
            .filter(|r| r.resource == Ressource::Personal)
            .collect();
        if personal.is_empty() {
            return 0.0;
        }
        let mean = personal.iter().map(|r| r.norm_gap).sum::<f64>() / personal.len() as f64;
        piecewise_linear(mean, &NURSE_PRESSURE_POINTS)
    }

    /// 指定日期的 Top-3 驱动因子 (全资源合计, 按绝对贡献降序)
    ///
    /// 目标日期无数据时取最近的已有日期
    pub fn top_drivers(
        &self,
        dataset: &SimulationDataset,
        target: NaiveDate,
    ) -> Vec<(DriverKind, f64)> {
        if dataset.is_empty() {
            return Vec::new();
        }

        let snapshot_date = if dataset.iter().any(|r| r.date == target) {
            target
        } else {
            // 最近日期, 距离相同时取行序在前者
            let mut nearest = dataset.rows[0].date;
            let mut best = (nearest - target).num_days().abs();
            for row in dataset.iter() {
                let distance = (row.date - target).num_days().abs();
                if distance < best {
                    best = distance;
                    nearest = row.date;
                }
            }
            nearest
        };

        let mut totals = [0.0f64; DriverKind::ALL.len()];
        for row in dataset.iter().filter(|r| r.date == snapshot_date) {
            for (slot, kind) in totals.iter_mut().zip(DriverKind::ALL) {
                *slot += row.drivers.get(kind);
            }
        }

        let mut items: Vec<(DriverKind, f64)> =
            DriverKind::ALL.into_iter().zip(totals).collect();
        items.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items.truncate(3);
        items
    }

    /// 周度汇总 (实际/预测/容量), Sparkline 数据源
    pub fn weekly_totals(
        &self,
        dataset: &SimulationDataset,
        stichtag: NaiveDate,
    ) -> Vec<WeeklyTotals> {
        let past = past_or_fallback(dataset, stichtag, SPARKLINE_FALLBACK_ROWS);

        let mut groups: BTreeMap<u32, (f64, f64, f64)> = BTreeMap::new();
        for row in past {
            let entry = groups.entry(row.week).or_insert((0.0, 0.0, 0.0));
            entry.0 += row.actuals;
            entry.1 += row.forecast;
            entry.2 += row.capacity;
        }

        groups
            .into_iter()
            .map(|(week, (actuals, forecast, capacity))| WeeklyTotals {
                week,
                actuals,
                forecast,
                capacity,
            })
            .collect()
    }
}

impl Default for KpiEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 驱动因子的本地化显示标签
pub fn driver_label(kind: DriverKind) -> String {
    crate::i18n::t(&format!("driver.{}", kind.key()))
}

/// 历史窗口: date <= stichtag 的行; 为空时回退到数据集前 `fallback` 行
fn past_or_fallback(
    dataset: &SimulationDataset,
    stichtag: NaiveDate,
    fallback: usize,
) -> Vec<&DailyRecord> {
    let past = dataset.past_rows(stichtag);
    if past.is_empty() {
        dataset.iter().take(fallback).collect()
    } else {
        past
    }
}

/// 分段线性插值, 控制点外侧取边界值
fn piecewise_linear(x: f64, points: &[(f64, f64)]) -> f64 {
    let first = points[0];
    let last = points[points.len() - 1];
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    for window in points.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        if x <= x1 {
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    last.1
}
