// ==========================================
// 医院容量规划系统 - 信号灯阈值
// ==========================================
// 前置条件: 0 < gruen < gelb (文档化约定, 不做强制校验;
// 倒置阈值会使五分支判定的边界不再单调, 由调用方自行保证)
// ==========================================

use serde::{Deserialize, Serialize};

/// 信号灯阈值 (归一化 Gap 口径)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmpelThresholds {
    /// 绿色缓冲: |norm_gap| 低于该值视为正常
    pub gruen: f64,
    /// 黄色边界: norm_gap 达到该值升级为 ROT
    pub gelb: f64,
}

impl AmpelThresholds {
    pub fn new(gruen: f64, gelb: f64) -> Self {
        Self { gruen, gelb }
    }
}

impl Default for AmpelThresholds {
    fn default() -> Self {
        Self {
            gruen: 0.05,
            gelb: 0.15,
        }
    }
}
