// ==========================================
// 医院容量规划系统 - 引擎层
// ==========================================
// 职责: 实现模拟/同化/聚合/分级的业务规则, 无 I/O
// 红线: 引擎纯函数化, 全部结果可由配置复现
// ==========================================

pub mod ampel;
pub mod assimilation;
pub mod indices;
pub mod kpi;
pub mod simulator;

// 重导出核心引擎
pub use ampel::AmpelEngine;
pub use assimilation::{AssimilationEngine, ASSIMILATION_ALPHA};
pub use indices::{ExternalIndices, IndexEngine};
pub use kpi::{driver_label, KpiEngine, KpiSet};
pub use simulator::{dates_for_year, SimulationEngine};
