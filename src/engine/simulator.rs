// ==========================================
// 医院容量规划系统 - 年度序列模拟引擎
// ==========================================
// 职责: 为每个资源生成全年日度 计划/预测/容量/实际 序列
// 输入: SimulationConfig (不可变)
// 输出: SimulationDataset (资源优先、日期升序)
// 红线: 随机数消耗顺序固定 (先指数生成, 再按资源优先/日期升序取噪声),
//       打乱顺序会破坏种子复现
// ==========================================

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::config::SimulationConfig;
use crate::domain::record::{DailyRecord, DriverContributions, SimulationDataset};
use crate::domain::types::{Ressource, BASE_ABSENCES, BASE_CLUSTER_COUNT, BASE_NURSE_RATIO};
use crate::engine::assimilation::AssimilationEngine;
use crate::engine::indices::IndexEngine;

// 周末/工作日的计划修正
const WEEKEND_FACTOR: f64 = 0.05;
const WEEKDAY_FACTOR: f64 = -0.03;

// 实际值噪声: 标准差 = 基线容量 × 该系数
const NOISE_SCALE: f64 = 0.08;

// ==========================================
// SimulationEngine - 年度序列模拟引擎
// ==========================================
pub struct SimulationEngine {
    index_engine: IndexEngine,
    assimilation_engine: AssimilationEngine,
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self {
            index_engine: IndexEngine::new(),
            assimilation_engine: AssimilationEngine::new(),
        }
    }

    /// 模拟一个日历年的全部资源序列
    ///
    /// # 参数
    /// - `config`: 模拟配置 (取值范围由调用方校验)
    ///
    /// # 返回
    /// SimulationDataset: (全年天数 × 5 资源) 行, 同化与 gap 派生已完成
    pub fn simulate_year(&self, config: &SimulationConfig) -> SimulationDataset {
        let dates = dates_for_year(config.year);
        let stichtag = config.resolve_stichtag();
        let mut rng = StdRng::seed_from_u64(config.seed);

        let indices = self.index_engine.generate(
            &dates,
            config.saisonalitaet_staerke,
            config.flu_index_staerke,
            config.weather_risk_staerke,
            &mut rng,
        );

        let total_days = dates.len();
        let mut rows = Vec::with_capacity(total_days * Ressource::ALL.len());

        for resource in Ressource::ALL {
            let base = resource.baseline();
            let ext_weights = resource.external_weights();
            let int_weights = resource.internal_weights();

            // σ 为正的常量乘积, 构造必然成功
            let noise = Normal::new(0.0, base * NOISE_SCALE).expect("噪声标准差恒为正");

            for (idx, date) in dates.iter().enumerate() {
                let year_progress = idx as f64 / (total_days.saturating_sub(1)).max(1) as f64;
                let weekday = date.weekday().num_days_from_monday();
                let weekend_factor = if weekday >= 5 {
                    WEEKEND_FACTOR
                } else {
                    WEEKDAY_FACTOR
                };
                // 围绕年中对称的线性趋势
                let trend_factor = 0.05 * (year_progress - 0.5);

                let seasonality = indices.seasonality[idx];
                let flu_index = indices.flu_index[idx];
                let weather_risk = indices.weather_risk[idx];
                let event_impact = indices.event_impact[idx];

                // 计划值: 预算增长 + 季节性/周末/趋势修正
                let plan_base = base * (1.0 + config.budget_growth);
                let plan_modifiers =
                    1.0 + 0.25 * seasonality + weekend_factor + trend_factor * 0.3;
                let plan_value = plan_base * plan_modifiers;

                // 内部参数偏差 → 百分比修正 (相对各自的固定基准)
                let verweildauer_pct =
                    int_weights.verweildauer * config.verweildauer_delta * 0.02;
                let op_zeiten_pct =
                    int_weights.op_zeiten * (config.op_zeiten_delta / 60.0) * 0.05;
                let nurse_ratio_pct = int_weights.nurse_ratio
                    * ((BASE_NURSE_RATIO - config.nurse_ratio) / BASE_NURSE_RATIO)
                    * 0.6;
                let abwesenheiten_pct = int_weights.abwesenheiten
                    * ((config.abwesenheiten - BASE_ABSENCES) / BASE_ABSENCES.max(1e-3))
                    * 0.4;
                let cluster_pct = int_weights.cluster
                    * ((config.cluster_anzahl - BASE_CLUSTER_COUNT) as f64
                        / (BASE_CLUSTER_COUNT.max(1)) as f64)
                    * 0.05;

                let internal_pct = verweildauer_pct
                    + op_zeiten_pct
                    + nurse_ratio_pct
                    + abwesenheiten_pct
                    + cluster_pct;

                // 外部因子 → 百分比修正
                let external_pct = ext_weights.flu_index * flu_index * 0.4
                    + ext_weights.weather_risk * weather_risk * 0.3
                    + ext_weights.event_impact * event_impact * 0.2;

                let forecast_raw = plan_value * (1.0 + internal_pct + external_pct);

                // 可用容量: 缺勤率压低缓冲, 周末反向修正
                let capacity_buffer = 0.9 + 0.1 * (1.0 - config.abwesenheiten / 0.12);
                let capacity =
                    base * capacity_buffer * (1.0 + 0.15 * seasonality - 0.5 * weekend_factor);

                // 实际值 = 原始预测 + 高斯噪声, 截断为非负
                let actuals = (forecast_raw + noise.sample(&mut rng)).max(0.0);

                // 因子贡献 (绝对单位), 残差按构造闭合分解
                let mut drivers = DriverContributions {
                    flu_index: plan_value * ext_weights.flu_index * flu_index * 0.4,
                    weather_risk: plan_value * ext_weights.weather_risk * weather_risk * 0.3,
                    event_impact: plan_value * ext_weights.event_impact * event_impact * 0.2,
                    verweildauer: plan_value * verweildauer_pct,
                    op_zeiten: plan_value * op_zeiten_pct,
                    nurse_ratio: plan_value * nurse_ratio_pct,
                    abwesenheiten: plan_value * abwesenheiten_pct,
                    cluster: plan_value * cluster_pct,
                    rest: 0.0,
                };
                drivers.rest = (forecast_raw - plan_value) - drivers.named_sum();

                rows.push(DailyRecord {
                    date: *date,
                    resource,
                    plan: plan_value,
                    forecast_raw,
                    forecast: forecast_raw,
                    capacity,
                    actuals,
                    actuals_to_date: None,
                    weekday,
                    week: date.iso_week().week(),
                    seasonality,
                    flu_index,
                    weather_risk,
                    event_impact,
                    drivers,
                    gap: 0.0,
                    norm_gap: 0.0,
                });
            }
        }

        // 同化 + 派生指标
        self.assimilation_engine
            .assimilate(&mut rows, config.rhythmus, stichtag);

        for row in rows.iter_mut() {
            row.gap = row.forecast - row.capacity;
            row.norm_gap = if row.capacity > 0.0 {
                row.gap / row.capacity
            } else {
                0.0
            };
            row.actuals_to_date = if row.date <= stichtag {
                Some(row.actuals)
            } else {
                None
            };
        }

        tracing::debug!(
            year = config.year,
            seed = config.seed,
            rows = rows.len(),
            stichtag = %stichtag,
            "年度模拟完成"
        );

        SimulationDataset::new(rows)
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 生成指定年份的全部日期 (升序)
pub fn dates_for_year(year: i32) -> Vec<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .expect("1月1日恒为有效日期")
        .iter_days()
        .take_while(|d| d.year() == year)
        .collect()
}
