// ==========================================
// 医院容量规划系统 - 驾驶舱 API
// ==========================================
// 职责: 封装引擎层, 为前端驾驶舱提供统一入口
// 架构: API 层 → 引擎层 (Simulation/Kpi/Ampel)
// 说明: 计算为纯函数, 每次刷新重新推导全量数据集, 无进程级状态
// ==========================================

use chrono::NaiveDate;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{validate_thresholds, SimulationConfig};
use crate::domain::record::{DriverKind, SimulationDataset};
use crate::domain::thresholds::AmpelThresholds;
use crate::domain::weekly::{CellDetail, WeeklyTotals};
use crate::engine::{AmpelEngine, KpiEngine, KpiSet, SimulationEngine};
use crate::export;

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责:
/// 1. 配置校验后执行年度模拟
/// 2. KPI / 信号灯明细 / 因子与周度汇总查询
/// 3. CSV 导出
pub struct DashboardApi {
    simulation_engine: SimulationEngine,
    kpi_engine: KpiEngine,
    ampel_engine: AmpelEngine,
}

impl DashboardApi {
    pub fn new() -> Self {
        Self {
            simulation_engine: SimulationEngine::new(),
            kpi_engine: KpiEngine::new(),
            ampel_engine: AmpelEngine::new(),
        }
    }

    /// 执行年度模拟
    ///
    /// # 参数
    /// - `config`: 模拟配置 (先校验再执行)
    ///
    /// # 返回
    /// - `Ok(SimulationDataset)`: 全年 × 5 资源的日度数据集
    /// - `Err(ApiError)`: 配置越界/非法
    pub fn run_simulation(&self, config: &SimulationConfig) -> ApiResult<SimulationDataset> {
        config.validate()?;
        Ok(self.simulation_engine.simulate_year(config))
    }

    /// 计算驾驶舱 KPI
    pub fn compute_kpis(
        &self,
        dataset: &SimulationDataset,
        stichtag: NaiveDate,
        thresholds: &AmpelThresholds,
    ) -> ApiResult<KpiSet> {
        self.ensure_dataset(dataset)?;
        validate_thresholds(thresholds)?;
        Ok(self.kpi_engine.compute(dataset, stichtag, thresholds))
    }

    /// 信号灯明细行 (按严重度排序)
    pub fn ampel_details(
        &self,
        dataset: &SimulationDataset,
        thresholds: &AmpelThresholds,
        nurse_ratio: f64,
    ) -> ApiResult<Vec<CellDetail>> {
        self.ensure_dataset(dataset)?;
        validate_thresholds(thresholds)?;
        Ok(self
            .ampel_engine
            .detail_rows(dataset, thresholds, nurse_ratio))
    }

    /// 指定日期的 Top-3 驱动因子
    pub fn top_drivers(
        &self,
        dataset: &SimulationDataset,
        target: NaiveDate,
    ) -> ApiResult<Vec<(DriverKind, f64)>> {
        self.ensure_dataset(dataset)?;
        Ok(self.kpi_engine.top_drivers(dataset, target))
    }

    /// 周度汇总 (Sparkline 数据源)
    pub fn weekly_totals(
        &self,
        dataset: &SimulationDataset,
        stichtag: NaiveDate,
    ) -> ApiResult<Vec<WeeklyTotals>> {
        self.ensure_dataset(dataset)?;
        Ok(self.kpi_engine.weekly_totals(dataset, stichtag))
    }

    /// 导出 CSV 字符串
    pub fn export_csv(&self, dataset: &SimulationDataset) -> ApiResult<String> {
        self.ensure_dataset(dataset)?;
        Ok(export::to_csv(dataset)?)
    }

    fn ensure_dataset(&self, dataset: &SimulationDataset) -> ApiResult<()> {
        if dataset.is_empty() {
            return Err(ApiError::InvalidInput("数据集为空".to_string()));
        }
        Ok(())
    }
}

impl Default for DashboardApi {
    fn default() -> Self {
        Self::new()
    }
}
