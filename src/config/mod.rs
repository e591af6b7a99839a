// ==========================================
// 医院容量规划系统 - 配置层
// ==========================================

pub mod simulation_config;

pub use simulation_config::{
    validate_thresholds, ConfigError, ConfigResult, SimulationConfig,
};
