// ==========================================
// AmpelEngine 引擎集成测试
// ==========================================
// 测试目标: 验证周度聚合、信号灯分级与建议文本
// 覆盖范围: 五分支判定顺序、容量为0保护、建议数量换算、明细排序
// ==========================================

use chrono::{Datelike, NaiveDate};
use klinik_kapa::domain::record::{DailyRecord, DriverContributions, SimulationDataset};
use klinik_kapa::domain::thresholds::AmpelThresholds;
use klinik_kapa::domain::types::{AmpelStatus, Ressource};
use klinik_kapa::domain::weekly::WeeklyCell;
use klinik_kapa::engine::AmpelEngine;

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建测试用的日度记录 (gap 直接给定, 容量固定100)
fn create_test_row(date: NaiveDate, resource: Ressource, gap: f64) -> DailyRecord {
    let capacity = 100.0;
    DailyRecord {
        date,
        resource,
        plan: capacity,
        forecast_raw: capacity + gap,
        forecast: capacity + gap,
        capacity,
        actuals: capacity,
        actuals_to_date: Some(capacity),
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
}

fn test_thresholds() -> AmpelThresholds {
    AmpelThresholds::new(0.05, 0.15)
}

// ==========================================
// 测试用例 1: 分级判定顺序
// ==========================================

#[test]
fn test_classification_ordering_contract() {
    let engine = AmpelEngine::new();
    let thresholds = test_thresholds();

    let cases = [
        (0.20, AmpelStatus::Rot),
        (0.10, AmpelStatus::Gelb),
        (0.0, AmpelStatus::Gruen),
        (-0.08, AmpelStatus::Blau),
        (-0.20, AmpelStatus::Rot),
    ];
    for (norm_gap, expected) in cases {
        assert_eq!(
            engine.ampel_status(norm_gap, &thresholds),
            expected,
            "norm_gap={}",
            norm_gap
        );
    }
}

#[test]
fn test_inverted_thresholds_first_match_wins() {
    // 倒置阈值 (文档化前置条件之外): 首个命中分支生效, 不报错
    let engine = AmpelEngine::new();
    let inverted = AmpelThresholds::new(0.20, 0.10);

    // 0.15 >= gelb(0.10), 首分支 ROT 生效, 后续分支不再参与
    assert_eq!(engine.ampel_status(0.15, &inverted), AmpelStatus::Rot);
}

// ==========================================
// 测试用例 2: 周度聚合
// ==========================================

#[test]
fn test_week_cells_aggregate_gap_and_capacity() {
    let engine = AmpelEngine::new();
    let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
    let rows = vec![
        create_test_row(monday, Ressource::Betten, 10.0),
        create_test_row(monday.succ_opt().unwrap(), Ressource::Betten, -4.0),
    ];

    let cells = engine.build_week_cells(&SimulationDataset::new(rows));
    assert_eq!(cells.len(), 1);

    let cell = &cells[0];
    assert_eq!(cell.resource, Ressource::Betten);
    assert_eq!(cell.week, 2);
    assert_eq!(cell.days, 2);
    assert!((cell.gap_sum - 6.0).abs() < 1e-12);
    assert!((cell.capacity_sum - 200.0).abs() < 1e-12);
    assert!((cell.norm_gap - 0.03).abs() < 1e-12);
}

#[test]
fn test_zero_capacity_cell_guard() {
    let engine = AmpelEngine::new();
    let cell = WeeklyCell {
        resource: Ressource::Sprechstunden,
        week: 12,
        gap_sum: 15.0,
        capacity_sum: 0.0,
        days: 7,
        norm_gap: 0.0,
    };

    let detail = engine.describe_cell(&cell, &test_thresholds(), 5.0);
    assert_eq!(detail.status, AmpelStatus::Gruen);
    assert_eq!(detail.norm_gap, 0.0);
    assert!(detail.empfehlung.contains("manuelle Prüfung erforderlich"));
}

// ==========================================
// 测试用例 3: 建议文本
// ==========================================

#[test]
fn test_surplus_recommendation_contract() {
    let engine = AmpelEngine::new();

    // gap=-20, capacity=100, GELB → ceil(20 × 0.35 / 2) = 4
    let text = engine.format_recommendation(
        Ressource::Betten,
        -20.0,
        100.0,
        5.0,
        AmpelStatus::Gelb,
    );
    assert!(text.contains("4 Termine vorziehen"));
    assert!(text.contains("Betten flexibel schließen"));
}

#[test]
fn test_shortage_recommendation_quantities() {
    let engine = AmpelEngine::new();

    // Sprechstunden, ROT: op_shift = ceil(24/120*100) = 20%, staff = ceil(24/6) = 4
    let text = engine.format_recommendation(
        Ressource::Sprechstunden,
        24.0,
        120.0,
        6.0,
        AmpelStatus::Rot,
    );
    assert!(text.contains("OP-Programm um 20% glätten"));
    assert!(text.contains("4 Pflege-Schichten umplanen"));

    // GELB 低系数: op_shift = ceil(24*0.35/120*100) = 7%
    let text = engine.format_recommendation(
        Ressource::Sprechstunden,
        24.0,
        120.0,
        6.0,
        AmpelStatus::Gelb,
    );
    assert!(text.contains("OP-Programm um 7% glätten"));
}

#[test]
fn test_green_cell_recommendation() {
    let engine = AmpelEngine::new();
    let text =
        engine.format_recommendation(Ressource::Notfall, 2.0, 100.0, 5.0, AmpelStatus::Gruen);
    assert_eq!(text, "Keine Maßnahmen nötig – innerhalb des Puffers.");
}

// ==========================================
// 测试用例 4: 明细排序契约
// ==========================================

#[test]
fn test_detail_rows_worst_first() {
    let engine = AmpelEngine::new();
    let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let next_monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();

    let rows = vec![
        create_test_row(monday, Ressource::Betten, 1.0),        // GRÜN
        create_test_row(monday, Ressource::Op, 20.0),           // ROT 0.20
        create_test_row(monday, Ressource::Notfall, -30.0),     // ROT 0.30 (过剩)
        create_test_row(next_monday, Ressource::Personal, 7.0), // GELB
        create_test_row(next_monday, Ressource::Betten, -6.0),  // BLAU
    ];

    let details = engine.detail_rows(&SimulationDataset::new(rows), &test_thresholds(), 5.0);
    assert_eq!(details.len(), 5);

    // 严重度升序, 同级按 |norm_gap| 降序
    assert_eq!(details[0].status, AmpelStatus::Rot);
    assert_eq!(details[0].resource, Ressource::Notfall);
    assert_eq!(details[1].status, AmpelStatus::Rot);
    assert_eq!(details[1].resource, Ressource::Op);
    assert_eq!(details[2].status, AmpelStatus::Gelb);
    assert_eq!(details[3].status, AmpelStatus::Gruen);
    assert_eq!(details[4].status, AmpelStatus::Blau);

    // 颜色与状态一致
    for detail in &details {
        assert_eq!(detail.farbe, detail.status.farbe());
    }
}
