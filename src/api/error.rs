// ==========================================
// 医院容量规划系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 转换下层错误为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use thiserror::Error;

use crate::config::ConfigError;
use crate::export::ExportError;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 配置校验错误
    // ==========================================
    #[error("配置校验失败: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    Export(#[from] ExportError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
