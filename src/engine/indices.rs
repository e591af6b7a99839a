// ==========================================
// 医院容量规划系统 - 外部因子指数引擎
// ==========================================
// 职责: 为全年每一天生成四条外部因子指数曲线
// 输入: 年度日期序列 + 三个强度系数 + 种子随机源
// 输出: 四个等长数组 (季节性/流感/天气/事件)
// 红线: 相同 (year, seed) 必须产出完全一致的数组
// ==========================================

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::Rng;

// 固定节假日 (月, 日): 新年/平安夜/除夕/4月1日/8月1日
const HOLIDAYS: [(u32, u32); 5] = [(1, 1), (12, 24), (12, 31), (4, 1), (8, 1)];

// 节假日影响窗口: 前后各2天
const HOLIDAY_WINDOW_DAYS: i64 = 2;

// 随机事件冲击数量, 每次持续2天
const RANDOM_IMPULSES: usize = 6;

// ==========================================
// ExternalIndices - 外部因子指数
// ==========================================
/// 四条并行指数曲线, 与日期序列逐位对齐
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalIndices {
    pub seasonality: Vec<f64>,
    pub flu_index: Vec<f64>,
    pub weather_risk: Vec<f64>,
    pub event_impact: Vec<f64>,
}

// ==========================================
// IndexEngine - 外部因子指数引擎
// ==========================================
pub struct IndexEngine {
    // 无状态引擎, 随机源由调用方注入
}

impl IndexEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成全年外部因子指数
    ///
    /// # 参数
    /// - `dates`: 年度日期序列 (升序, 覆盖全年)
    /// - `saisonalitaet_staerke`: 季节性强度
    /// - `flu_staerke`: 流感/疫情强度
    /// - `weather_staerke`: 天气/事故强度
    /// - `rng`: 种子随机源 (事件冲击从这里消耗随机数)
    ///
    /// # 返回
    /// ExternalIndices, 各数组长度等于 `dates.len()`
    pub fn generate(
        &self,
        dates: &[NaiveDate],
        saisonalitaet_staerke: f64,
        flu_staerke: f64,
        weather_staerke: f64,
        rng: &mut StdRng,
    ) -> ExternalIndices {
        let n = dates.len();
        let days_in_year = n as f64;

        let mut seasonality = Vec::with_capacity(n);
        let mut flu_index = Vec::with_capacity(n);
        let mut weather_risk = Vec::with_capacity(n);
        let mut event_impact = vec![0.0; n];

        for date in dates {
            let day_of_year = date.ordinal() as f64;

            // 平滑年度正弦周期 (符号对称)
            let seasonality_base = (2.0 * PI * day_of_year / days_in_year).sin();

            // 流感指数: 冬季与晚秋两个高斯峰
            let flu_peak_winter = (-0.5 * ((day_of_year - 15.0) / 18.0).powi(2)).exp();
            let flu_peak_autumn = (-0.5 * ((day_of_year - 330.0) / 20.0).powi(2)).exp();
            let flu = flu_staerke * (0.7 * flu_peak_winter + 0.5 * flu_peak_autumn);

            // 天气风险: 冬季剖面 (冰雪) + 季节性分量
            let winter_profile =
                0.5 * (1.0 + (2.0 * PI * (day_of_year - 20.0) / days_in_year).cos());
            let weather = weather_staerke * (0.6 * winter_profile + 0.1 * seasonality_base);

            seasonality.push(saisonalitaet_staerke * seasonality_base);
            flu_index.push(flu);
            weather_risk.push(weather);
        }

        // 事件冲击: 固定节假日 ±2 天加成
        for (idx, date) in dates.iter().enumerate() {
            for (month, day) in HOLIDAYS {
                if date.month() == month
                    && (date.day() as i64 - day as i64).abs() <= HOLIDAY_WINDOW_DAYS
                {
                    event_impact[idx] += 0.4;
                }
            }
        }

        // 额外随机冲击 (城市马拉松/展会等): 6 个不重复起始日, 各持续2天
        let impulse_days = rand::seq::index::sample(rng, n, RANDOM_IMPULSES);
        for idx in impulse_days.iter() {
            let magnitude = rng.gen_range(0.2..0.5);
            event_impact[idx] += magnitude;
            if idx + 1 < n {
                event_impact[idx + 1] += magnitude;
            }
        }

        ExternalIndices {
            seasonality,
            flu_index,
            weather_risk,
            event_impact,
        }
    }
}

impl Default for IndexEngine {
    fn default() -> Self {
        Self::new()
    }
}
