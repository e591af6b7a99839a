// ==========================================
// 医院容量规划 Co-Pilot - 核心库
// ==========================================
// 技术栈: Rust + chrono + serde + csv
// 系统定位: 决策支持系统 (合成数据, 人工最终控制权)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "de");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 模拟配置
pub mod config;

// 引擎层 - 业务规则
pub mod engine;

// 导出层 - CSV 契约
pub mod export;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AmpelStatus, Ressource, Rhythmus};

// 领域实体
pub use domain::{
    AmpelThresholds, CellDetail, DailyRecord, DriverContributions, DriverKind,
    SimulationDataset, WeeklyCell, WeeklyTotals,
};

// 配置
pub use config::{ConfigError, SimulationConfig};

// 引擎
pub use engine::{AmpelEngine, AssimilationEngine, IndexEngine, KpiEngine, KpiSet, SimulationEngine};

// API
pub use api::{ApiError, ApiResult, DashboardApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "医院容量规划 Co-Pilot";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
