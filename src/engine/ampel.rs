// ==========================================
// 医院容量规划系统 - 信号灯与建议引擎
// ==========================================
// 职责: (资源, 周) 单元格分级 + 启发式处置建议
// 红线: 五分支判定顺序固定, 首个命中生效; 所有建议必须可解释
// ==========================================

use std::collections::BTreeMap;

use crate::domain::record::SimulationDataset;
use crate::domain::thresholds::AmpelThresholds;
use crate::domain::types::{AmpelStatus, Ressource};
use crate::domain::weekly::{CellDetail, WeeklyCell};
use crate::i18n;

// 中度短缺 (GELB) 时按低系数出建议, 其余状态全量
const GELB_ACTION_FACTOR: f64 = 0.35;

// ==========================================
// AmpelEngine - 信号灯与建议引擎
// ==========================================
pub struct AmpelEngine {
    // 无状态引擎
}

impl AmpelEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 归一化 Gap 分级
    ///
    /// # 判定顺序 (首个命中生效)
    /// 1. norm_gap >= gelb   → ROT  (短缺超阈值)
    /// 2. norm_gap >= gruen  → GELB (中度短缺)
    /// 3. norm_gap <= -gelb  → ROT  (过剩超阈值, 对称)
    /// 4. norm_gap <= -gruen → BLAU (中度过剩)
    /// 5. 其余               → GRÜN (缓冲区内)
    pub fn ampel_status(&self, norm_gap: f64, thresholds: &AmpelThresholds) -> AmpelStatus {
        if norm_gap >= thresholds.gelb {
            return AmpelStatus::Rot;
        }
        if norm_gap >= thresholds.gruen {
            return AmpelStatus::Gelb;
        }
        if norm_gap <= -thresholds.gelb {
            return AmpelStatus::Rot;
        }
        if norm_gap <= -thresholds.gruen {
            return AmpelStatus::Blau;
        }
        AmpelStatus::Gruen
    }

    /// 生成处置建议文本
    ///
    /// # 参数
    /// - `resource`: 资源池
    /// - `gap`: 周度累计 Gap (正=短缺)
    /// - `capacity`: 周度累计容量
    /// - `nurse_ratio`: 患者-护理配比 (换算排班建议)
    /// - `status`: 调用方已判定的信号灯状态
    pub fn format_recommendation(
        &self,
        resource: Ressource,
        gap: f64,
        capacity: f64,
        nurse_ratio: f64,
        status: AmpelStatus,
    ) -> String {
        if capacity <= 0.0 {
            return i18n::t("ampel.unknown_capacity");
        }

        let norm_gap = gap / capacity;
        let shortage = gap > 0.0;
        let magnitude = norm_gap.abs();

        if status == AmpelStatus::Gruen {
            return i18n::t("ampel.no_action");
        }

        let factor = if status == AmpelStatus::Gelb {
            GELB_ACTION_FACTOR
        } else {
            1.0
        };

        let op_shift = (gap.max(0.0) * factor / capacity.max(1.0) * 100.0).ceil() as i64;
        let open_beds = (gap.max(0.0) * factor / 2.0).ceil() as i64;
        let staff_reassign = (gap.max(0.0) * factor / nurse_ratio.max(1e-6)).ceil() as i64;

        if !shortage {
            // 过剩: 建议提前安排与弹性关闭
            let release = (gap.abs() * factor / 2.0).ceil() as i64;
            return i18n::t_with_args("ampel.overcapacity", &[("release", &release.to_string())]);
        }

        let mut suggestions = Vec::new();
        if matches!(resource, Ressource::Op | Ressource::Sprechstunden) && op_shift > 0 {
            suggestions.push(i18n::t_with_args(
                "ampel.op_shift",
                &[("n", &op_shift.to_string())],
            ));
        }
        if matches!(resource, Ressource::Betten | Ressource::Notfall) && open_beds > 0 {
            suggestions.push(i18n::t_with_args(
                "ampel.open_beds",
                &[("n", &open_beds.to_string())],
            ));
        }
        if staff_reassign > 0 {
            suggestions.push(i18n::t_with_args(
                "ampel.staff_reassign",
                &[("n", &staff_reassign.to_string())],
            ));
        }

        if suggestions.is_empty() {
            let base = ((magnitude * 10.0).ceil() as i64).max(1);
            suggestions.push(i18n::t_with_args(
                "ampel.adjust_units",
                &[("n", &base.to_string())],
            ));
        }

        suggestions.join(", ")
    }

    /// 按 (ISO 周, 资源) 聚合全量数据集
    pub fn build_week_cells(&self, dataset: &SimulationDataset) -> Vec<WeeklyCell> {
        let mut groups: BTreeMap<(u32, Ressource), (f64, f64, usize)> = BTreeMap::new();
        for row in dataset.iter() {
            let entry = groups
                .entry((row.week, row.resource))
                .or_insert((0.0, 0.0, 0));
            entry.0 += row.gap;
            entry.1 += row.capacity;
            entry.2 += 1;
        }

        groups
            .into_iter()
            .map(|((week, resource), (gap_sum, capacity_sum, days))| WeeklyCell {
                resource,
                week,
                gap_sum,
                capacity_sum,
                days,
                norm_gap: if capacity_sum != 0.0 {
                    gap_sum / capacity_sum
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// 单元格 → 前端明细行
    pub fn describe_cell(
        &self,
        cell: &WeeklyCell,
        thresholds: &AmpelThresholds,
        nurse_ratio: f64,
    ) -> CellDetail {
        let status = self.ampel_status(cell.norm_gap, thresholds);
        let empfehlung = self.format_recommendation(
            cell.resource,
            cell.gap_sum,
            cell.capacity_sum,
            nurse_ratio,
            status,
        );
        CellDetail {
            resource: cell.resource,
            kw: cell.week,
            status,
            farbe: status.farbe().to_string(),
            gap: cell.gap_sum,
            norm_gap: cell.norm_gap,
            empfehlung,
        }
    }

    /// 全量明细行, 按严重度升序、|norm_gap| 降序 (最需处置的在前)
    pub fn detail_rows(
        &self,
        dataset: &SimulationDataset,
        thresholds: &AmpelThresholds,
        nurse_ratio: f64,
    ) -> Vec<CellDetail> {
        let mut details: Vec<CellDetail> = self
            .build_week_cells(dataset)
            .iter()
            .map(|cell| self.describe_cell(cell, thresholds, nurse_ratio))
            .collect();

        details.sort_by(|a, b| {
            a.status
                .severity_rank()
                .cmp(&b.status.severity_rank())
                .then(
                    b.norm_gap
                        .abs()
                        .partial_cmp(&a.norm_gap.abs())
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });
        details
    }
}

impl Default for AmpelEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> AmpelThresholds {
        AmpelThresholds::new(0.05, 0.15)
    }

    #[test]
    fn test_status_ordering() {
        let engine = AmpelEngine::new();
        let t = thresholds();

        assert_eq!(engine.ampel_status(0.20, &t), AmpelStatus::Rot);
        assert_eq!(engine.ampel_status(0.10, &t), AmpelStatus::Gelb);
        assert_eq!(engine.ampel_status(0.0, &t), AmpelStatus::Gruen);
        assert_eq!(engine.ampel_status(-0.08, &t), AmpelStatus::Blau);
        assert_eq!(engine.ampel_status(-0.20, &t), AmpelStatus::Rot);
    }

    #[test]
    fn test_status_boundaries_inclusive() {
        let engine = AmpelEngine::new();
        let t = thresholds();

        assert_eq!(engine.ampel_status(0.15, &t), AmpelStatus::Rot);
        assert_eq!(engine.ampel_status(0.05, &t), AmpelStatus::Gelb);
        assert_eq!(engine.ampel_status(-0.05, &t), AmpelStatus::Blau);
        assert_eq!(engine.ampel_status(-0.15, &t), AmpelStatus::Rot);
    }

    #[test]
    fn test_unknown_capacity_message() {
        let engine = AmpelEngine::new();
        let text = engine.format_recommendation(
            Ressource::Betten,
            10.0,
            0.0,
            5.0,
            AmpelStatus::Rot,
        );
        assert!(text.contains("manuelle Prüfung"));
    }

    #[test]
    fn test_green_needs_no_action() {
        let engine = AmpelEngine::new();
        let text = engine.format_recommendation(
            Ressource::Betten,
            1.0,
            100.0,
            5.0,
            AmpelStatus::Gruen,
        );
        assert!(text.contains("Keine Maßnahmen"));
    }

    #[test]
    fn test_surplus_release_with_gelb_factor() {
        let engine = AmpelEngine::new();
        // gap=-20, capacity=100, GELB → ceil(20*0.35/2) = 4
        let text = engine.format_recommendation(
            Ressource::Betten,
            -20.0,
            100.0,
            5.0,
            AmpelStatus::Gelb,
        );
        assert!(text.contains("Überkapazität"));
        assert!(text.contains("4 Termine"));
    }

    #[test]
    fn test_surplus_release_full_factor() {
        let engine = AmpelEngine::new();
        // ROT 过剩: factor=1.0 → ceil(20/2) = 10
        let text = engine.format_recommendation(
            Ressource::Betten,
            -20.0,
            100.0,
            5.0,
            AmpelStatus::Rot,
        );
        assert!(text.contains("10 Termine"));
    }

    #[test]
    fn test_shortage_suggestions_gated_by_resource() {
        let engine = AmpelEngine::new();

        // OP: 手术程序平滑 + 排班
        let text =
            engine.format_recommendation(Ressource::Op, 30.0, 100.0, 5.0, AmpelStatus::Rot);
        assert!(text.contains("OP-Programm um 30% glätten"));
        assert!(text.contains("6 Pflege-Schichten umplanen"));
        assert!(!text.contains("Betten temporär"));

        // Betten: 临时开床 + 排班
        let text =
            engine.format_recommendation(Ressource::Betten, 30.0, 100.0, 5.0, AmpelStatus::Rot);
        assert!(text.contains("15 Betten temporär öffnen"));
        assert!(!text.contains("OP-Programm"));

        // Notfall 同样走开床通道
        let text =
            engine.format_recommendation(Ressource::Notfall, 10.0, 100.0, 5.0, AmpelStatus::Rot);
        assert!(text.contains("5 Betten temporär öffnen"));
    }

    #[test]
    fn test_personal_shortage_yields_only_staffing_suggestion() {
        let engine = AmpelEngine::new();
        // Personal 不走手术平滑/开床通道, 只给排班建议
        // staff_reassign = ceil(16 * 0.35 / 4.0) = 2
        let text = engine.format_recommendation(
            Ressource::Personal,
            16.0,
            100.0,
            4.0,
            AmpelStatus::Gelb,
        );
        assert_eq!(text.matches(',').count(), 0);
        assert!(text.contains("2 Pflege-Schichten umplanen"));
    }

    #[test]
    fn test_zero_capacity_cell_is_green_and_safe() {
        let engine = AmpelEngine::new();
        let cell = WeeklyCell {
            resource: Ressource::Betten,
            week: 7,
            gap_sum: 42.0,
            capacity_sum: 0.0,
            days: 7,
            norm_gap: 0.0,
        };
        let detail = engine.describe_cell(&cell, &thresholds(), 5.0);

        assert_eq!(detail.status, AmpelStatus::Gruen);
        assert_eq!(detail.norm_gap, 0.0);
        assert!(detail.empfehlung.contains("manuelle Prüfung"));
    }

    #[test]
    fn test_detail_rows_sorted_by_severity_then_magnitude() {
        use crate::domain::record::{DailyRecord, DriverContributions};
        use chrono::{Datelike, NaiveDate};

        let engine = AmpelEngine::new();

        let make_row = |date: NaiveDate, resource: Ressource, gap: f64| {
            let capacity = 100.0;
            DailyRecord {
                date,
                resource,
                plan: 0.0,
                forecast_raw: 0.0,
                forecast: capacity + gap,
                capacity,
                actuals: 0.0,
                actuals_to_date: None,
                weekday: date.weekday().num_days_from_monday(),
                week: date.iso_week().week(),
                seasonality: 0.0,
                flu_index: 0.0,
                weather_risk: 0.0,
                event_impact: 0.0,
                drivers: DriverContributions::default(),
                gap,
                norm_gap: gap / capacity,
            }
        };

        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let rows = vec![
            make_row(monday, Ressource::Betten, 2.0),                    // GRÜN
            make_row(monday, Ressource::Op, 30.0),                       // ROT
            make_row(monday, Ressource::Personal, 8.0),                  // GELB
            make_row(monday, Ressource::Notfall, 50.0),                  // ROT (更大)
        ];

        let details = engine.detail_rows(&SimulationDataset::new(rows), &thresholds(), 5.0);

        assert_eq!(details.len(), 4);
        assert_eq!(details[0].status, AmpelStatus::Rot);
        assert_eq!(details[0].resource, Ressource::Notfall);
        assert_eq!(details[1].status, AmpelStatus::Rot);
        assert_eq!(details[1].resource, Ressource::Op);
        assert_eq!(details[2].status, AmpelStatus::Gelb);
        assert_eq!(details[3].status, AmpelStatus::Gruen);
    }
}
