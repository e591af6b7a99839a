// ==========================================
// 医院容量规划系统 - 领域层
// ==========================================
// 职责: 实体与类型定义, 无业务规则, 无 I/O
// ==========================================

pub mod record;
pub mod thresholds;
pub mod types;
pub mod weekly;

// 重导出核心类型
pub use record::{DailyRecord, DriverContributions, DriverKind, SimulationDataset};
pub use thresholds::AmpelThresholds;
pub use types::{
    AmpelStatus, ExternalWeights, InternalWeights, Ressource, Rhythmus, BASE_ABSENCES,
    BASE_CLUSTER_COUNT, BASE_NURSE_RATIO,
};
pub use weekly::{CellDetail, WeeklyCell, WeeklyTotals};
