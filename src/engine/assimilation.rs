// ==========================================
// 医院容量规划系统 - 预测同化引擎
// ==========================================
// 职责: 按节奏边界把实际值的偏差平滑注入预测
// 算法: 一阶指数平滑, 只在离散观测点更新 (非连续 Kalman 更新)
// 状态: 每个资源一个标量 correction, 按日期升序单向推进
// ==========================================

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::record::DailyRecord;
use crate::domain::types::{Ressource, Rhythmus};

/// 指数平滑系数, 0 < α < 1 保证滤波稳定
pub const ASSIMILATION_ALPHA: f64 = 0.3;

// ==========================================
// AssimilationEngine - 预测同化引擎
// ==========================================
pub struct AssimilationEngine {
    // 无状态引擎, correction 状态只在单次遍历内存在
}

impl AssimilationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 以默认平滑系数执行同化
    ///
    /// # 前提
    /// `rows` 按资源分组、组内日期升序 (模拟引擎的固定输出顺序)
    pub fn assimilate(&self, rows: &mut [DailyRecord], rhythmus: Rhythmus, stichtag: NaiveDate) {
        self.assimilate_with_alpha(rows, rhythmus, stichtag, ASSIMILATION_ALPHA);
    }

    /// 执行同化并写回 `forecast` 字段
    ///
    /// # 参数
    /// - `rows`: 日度记录 (按资源分组、组内日期升序)
    /// - `rhythmus`: 同化节奏
    /// - `stichtag`: 观测截止日, 之后不再触发同化事件
    /// - `alpha`: 平滑系数
    pub fn assimilate_with_alpha(
        &self,
        rows: &mut [DailyRecord],
        rhythmus: Rhythmus,
        stichtag: NaiveDate,
        alpha: f64,
    ) {
        let mut current: Option<Ressource> = None;
        let mut correction = 0.0;
        let mut events = 0usize;

        for row in rows.iter_mut() {
            // 资源切换时重置同化状态
            if current != Some(row.resource) {
                current = Some(row.resource);
                correction = 0.0;
            }

            let mut forecast = row.forecast_raw + correction;

            if Self::should_assimilate(row.date, rhythmus, stichtag) {
                let difference = row.actuals - row.forecast_raw;
                correction = (1.0 - alpha) * correction + alpha * difference;
                forecast = row.forecast_raw + correction;
                events += 1;
            }

            row.forecast = forecast;
        }

        tracing::debug!(
            rhythmus = %rhythmus,
            stichtag = %stichtag,
            events,
            "预测同化完成"
        );
    }

    /// 判断某日是否触发同化事件
    ///
    /// # 规则
    /// - 晚于观测截止日: 不触发
    /// - 每周节奏: 仅周日触发
    /// - 每月节奏: 仅每月1日触发
    fn should_assimilate(date: NaiveDate, rhythmus: Rhythmus, stichtag: NaiveDate) -> bool {
        if date > stichtag {
            return false;
        }
        match rhythmus {
            Rhythmus::Woechentlich => date.weekday() == Weekday::Sun,
            Rhythmus::Monatlich => date.day() == 1,
        }
    }
}

impl Default for AssimilationEngine {
    fn default() -> Self {
        Self::new()
    }
}
