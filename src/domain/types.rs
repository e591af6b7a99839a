// ==========================================
// 医院容量规划系统 - 领域类型定义
// ==========================================
// 五类资源池为封闭枚举, 基线容量与因子权重为固定常量
// 序列化格式: 与导出/前端契约一致的显示名称
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 固定基准常量
// ==========================================
// 内部参数的偏差均相对这些基准计算
pub const BASE_NURSE_RATIO: f64 = 5.0;
pub const BASE_ABSENCES: f64 = 0.05;
pub const BASE_CLUSTER_COUNT: i64 = 4;

// ==========================================
// 资源池 (Ressource)
// ==========================================
// 红线: 封闭集合, 权重/基线不可由用户配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ressource {
    Betten,       // 床位
    #[serde(rename = "OP")]
    Op,           // 手术室
    Personal,     // 护理人员
    Sprechstunden, // 门诊
    Notfall,      // 急诊
}

impl Ressource {
    /// 固定遍历顺序 (模拟噪声按此顺序消耗随机源)
    pub const ALL: [Ressource; 5] = [
        Ressource::Betten,
        Ressource::Op,
        Ressource::Personal,
        Ressource::Sprechstunden,
        Ressource::Notfall,
    ];

    /// 基线容量 (单位/天)
    pub fn baseline(&self) -> f64 {
        match self {
            Ressource::Betten => 120.0,
            Ressource::Op => 75.0,
            Ressource::Personal => 90.0,
            Ressource::Sprechstunden => 60.0,
            Ressource::Notfall => 55.0,
        }
    }

    /// 外部因子权重 (流感/天气/事件)
    pub fn external_weights(&self) -> ExternalWeights {
        match self {
            Ressource::Betten => ExternalWeights {
                flu_index: 0.9,
                weather_risk: 0.5,
                event_impact: 0.3,
            },
            Ressource::Op => ExternalWeights {
                flu_index: 0.4,
                weather_risk: 0.2,
                event_impact: 0.5,
            },
            Ressource::Personal => ExternalWeights {
                flu_index: 0.3,
                weather_risk: 0.2,
                event_impact: 0.4,
            },
            Ressource::Sprechstunden => ExternalWeights {
                flu_index: 0.2,
                weather_risk: 0.2,
                event_impact: 0.6,
            },
            Ressource::Notfall => ExternalWeights {
                flu_index: 0.7,
                weather_risk: 0.8,
                event_impact: 0.4,
            },
        }
    }

    /// 内部运营参数权重
    pub fn internal_weights(&self) -> InternalWeights {
        match self {
            Ressource::Betten => InternalWeights {
                verweildauer: 0.7,
                op_zeiten: 0.2,
                nurse_ratio: 0.4,
                abwesenheiten: 0.6,
                cluster: 0.1,
            },
            Ressource::Op => InternalWeights {
                verweildauer: 0.1,
                op_zeiten: 0.8,
                nurse_ratio: 0.3,
                abwesenheiten: 0.4,
                cluster: 0.2,
            },
            Ressource::Personal => InternalWeights {
                verweildauer: 0.2,
                op_zeiten: 0.2,
                nurse_ratio: 0.9,
                abwesenheiten: 0.7,
                cluster: 0.3,
            },
            Ressource::Sprechstunden => InternalWeights {
                verweildauer: 0.3,
                op_zeiten: 0.3,
                nurse_ratio: 0.4,
                abwesenheiten: 0.5,
                cluster: 0.4,
            },
            Ressource::Notfall => InternalWeights {
                verweildauer: 0.4,
                op_zeiten: 0.2,
                nurse_ratio: 0.5,
                abwesenheiten: 0.5,
                cluster: 0.2,
            },
        }
    }

    /// 从字符串解析资源名称
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Betten" => Some(Ressource::Betten),
            "OP" => Some(Ressource::Op),
            "Personal" => Some(Ressource::Personal),
            "Sprechstunden" => Some(Ressource::Sprechstunden),
            "Notfall" => Some(Ressource::Notfall),
            _ => None,
        }
    }
}

impl fmt::Display for Ressource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ressource::Betten => write!(f, "Betten"),
            Ressource::Op => write!(f, "OP"),
            Ressource::Personal => write!(f, "Personal"),
            Ressource::Sprechstunden => write!(f, "Sprechstunden"),
            Ressource::Notfall => write!(f, "Notfall"),
        }
    }
}

// ==========================================
// 外部因子权重
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalWeights {
    pub flu_index: f64,    // 流感/疫情
    pub weather_risk: f64, // 天气/事故
    pub event_impact: f64, // 事件冲击
}

// ==========================================
// 内部参数权重
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalWeights {
    pub verweildauer: f64,  // 住院时长
    pub op_zeiten: f64,     // 手术时长
    pub nurse_ratio: f64,   // 患者-护理配比
    pub abwesenheiten: f64, // 缺勤率
    pub cluster: f64,       // 病区聚类数
}

// ==========================================
// 数据节奏 (Rhythmus)
// ==========================================
// 同化事件只在节奏边界触发: 每周日 / 每月1日
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rhythmus {
    Woechentlich, // 每周
    Monatlich,    // 每月
}

impl Rhythmus {
    /// 从字符串解析数据节奏
    ///
    /// 兼容前端的德语取值 ("wöchentlich"/"monatlich"), 按首字母识别
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower.starts_with('w') {
            Some(Rhythmus::Woechentlich)
        } else if lower.starts_with('m') {
            Some(Rhythmus::Monatlich)
        } else {
            None
        }
    }
}

impl fmt::Display for Rhythmus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rhythmus::Woechentlich => write!(f, "WOECHENTLICH"),
            Rhythmus::Monatlich => write!(f, "MONATLICH"),
        }
    }
}

// ==========================================
// 信号灯状态 (Ampel)
// ==========================================
// 顺序即严重度: ROT < GELB < GRÜN < BLAU (排序用)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AmpelStatus {
    #[serde(rename = "ROT")]
    Rot, // 严重 (短缺或过剩超阈值)
    #[serde(rename = "GELB")]
    Gelb, // 中度短缺
    #[serde(rename = "GRÜN")]
    Gruen, // 缓冲区内
    #[serde(rename = "BLAU")]
    Blau, // 中度过剩
}

impl AmpelStatus {
    /// 前端热力图用的固定颜色
    pub fn farbe(&self) -> &'static str {
        match self {
            AmpelStatus::Gruen => "#2e7d32",
            AmpelStatus::Gelb => "#f9a825",
            AmpelStatus::Rot => "#c62828",
            AmpelStatus::Blau => "#1565c0",
        }
    }

    /// 严重度排名 (0 最严重, 明细列表按此升序)
    pub fn severity_rank(&self) -> u8 {
        match self {
            AmpelStatus::Rot => 0,
            AmpelStatus::Gelb => 1,
            AmpelStatus::Gruen => 2,
            AmpelStatus::Blau => 3,
        }
    }
}

impl fmt::Display for AmpelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmpelStatus::Rot => write!(f, "ROT"),
            AmpelStatus::Gelb => write!(f, "GELB"),
            AmpelStatus::Gruen => write!(f, "GRÜN"),
            AmpelStatus::Blau => write!(f, "BLAU"),
        }
    }
}
