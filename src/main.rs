// ==========================================
// 医院容量规划 Co-Pilot - 命令行入口
// ==========================================
// 职责: 解析参数 → 执行模拟管线 → 输出 KPI/建议/CSV
// ==========================================

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::Parser;

use klinik_kapa::config::ConfigError;
use klinik_kapa::domain::thresholds::AmpelThresholds;
use klinik_kapa::domain::types::Rhythmus;
use klinik_kapa::engine::driver_label;
use klinik_kapa::{i18n, logging, DashboardApi, SimulationConfig};

#[derive(Parser, Debug)]
#[command(
    name = "klinik-kapa",
    about = "医院容量规划 Co-Pilot - 合成年度序列模拟与信号灯决策支持",
    version
)]
struct Cli {
    /// 模拟年份 (2020-2035)
    #[arg(long)]
    year: Option<i32>,

    /// 随机种子 (1-9999)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// 预算增长率 (0-0.20)
    #[arg(long, default_value_t = 0.03)]
    budget_growth: f64,

    /// 住院时长偏移, 天 (-1.0-2.0)
    #[arg(long, default_value_t = 0.2)]
    verweildauer_delta: f64,

    /// 手术时长偏移, 分钟 (-20-25)
    #[arg(long, default_value_t = 5.0)]
    op_zeiten_delta: f64,

    /// 患者-护理配比 (3.0-8.0)
    #[arg(long, default_value_t = 5.0)]
    nurse_ratio: f64,

    /// 缺勤率 (0-0.20)
    #[arg(long, default_value_t = 0.06)]
    abwesenheiten: f64,

    /// 病区聚类数 (2-10)
    #[arg(long, default_value_t = 4)]
    cluster_anzahl: i64,

    /// 季节性强度 (0-2.0)
    #[arg(long, default_value_t = 1.0)]
    saisonalitaet: f64,

    /// 流感/疫情强度 (0-1.5)
    #[arg(long, default_value_t = 0.8)]
    flu_index: f64,

    /// 天气/事故强度 (0-1.5)
    #[arg(long, default_value_t = 0.6)]
    weather_risk: f64,

    /// 数据节奏 (woechentlich / monatlich)
    #[arg(long, default_value = "woechentlich")]
    rhythmus: String,

    /// 绿色缓冲阈值 (0.01-0.10)
    #[arg(long, default_value_t = 0.05)]
    ampel_gruen: f64,

    /// 黄色边界阈值 (0.05-0.30)
    #[arg(long, default_value_t = 0.15)]
    ampel_gelb: f64,

    /// 观测截止日 (YYYY-MM-DD, 默认按年份推导)
    #[arg(long)]
    stichtag: Option<NaiveDate>,

    /// CSV 导出路径 (不指定则不导出)
    #[arg(long)]
    out: Option<PathBuf>,

    /// 以 JSON 输出驾驶舱摘要 (供外部系统消费)
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();
    let cli = Cli::parse();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", klinik_kapa::APP_NAME);
    tracing::info!("系统版本: {}", klinik_kapa::VERSION);
    tracing::info!("==================================================");

    let rhythmus = Rhythmus::from_str(&cli.rhythmus)
        .ok_or_else(|| ConfigError::UnknownRhythmus(cli.rhythmus.clone()))?;

    let config = SimulationConfig {
        year: cli.year.unwrap_or_else(|| chrono::Local::now().year()),
        seed: cli.seed,
        budget_growth: cli.budget_growth,
        verweildauer_delta: cli.verweildauer_delta,
        op_zeiten_delta: cli.op_zeiten_delta,
        nurse_ratio: cli.nurse_ratio,
        abwesenheiten: cli.abwesenheiten,
        cluster_anzahl: cli.cluster_anzahl,
        saisonalitaet_staerke: cli.saisonalitaet,
        flu_index_staerke: cli.flu_index,
        weather_risk_staerke: cli.weather_risk,
        rhythmus,
        stichtag: cli.stichtag,
    };
    let thresholds = AmpelThresholds::new(cli.ampel_gruen, cli.ampel_gelb);
    let stichtag = config.resolve_stichtag();

    let api = DashboardApi::new();

    tracing::info!(year = config.year, seed = config.seed, "开始年度模拟...");
    let dataset = api.run_simulation(&config)?;
    tracing::info!(rows = dataset.len(), "模拟完成");

    // 驾驶舱 KPI
    let kpis = api.compute_kpis(&dataset, stichtag, &thresholds)?;
    let details = api.ampel_details(&dataset, &thresholds, config.nurse_ratio)?;

    if cli.json {
        // 机器可读摘要
        let summary = serde_json::json!({
            "stichtag": stichtag.to_string(),
            "kpis": kpis,
            "ampel": details,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        if let Some(path) = cli.out {
            klinik_kapa::export::write_csv(&dataset, &path)?;
        }
        return Ok(());
    }

    println!("{} {}", i18n::t("kpi.auslastung"), format_pct(kpis.auslastung_pct));
    println!("{} {}", i18n::t("kpi.mape"), format_pct(kpis.mape_pct));
    println!("{} {:.0}", i18n::t("kpi.wartetage"), kpis.wartetage);
    println!("{} {}", i18n::t("kpi.stornoquote"), format_pct(kpis.stornoquote_pct));
    println!("{} {:.0}", i18n::t("kpi.pflege_engpass"), kpis.pflege_engpass);

    // Top 驱动因子
    println!();
    for (kind, value) in api.top_drivers(&dataset, stichtag)? {
        println!("• {}: {:.1}", driver_label(kind), value);
    }

    // 最需处置的单元格 (前5行)
    println!();
    for detail in details.iter().take(5) {
        println!(
            "KW {} – {}: {} • Gap {:.1} → {}",
            detail.kw, detail.resource, detail.status, detail.gap, detail.empfehlung
        );
    }

    // CSV 导出
    if let Some(path) = cli.out {
        klinik_kapa::export::write_csv(&dataset, &path)?;
        println!("\nCSV: {}", path.display());
    }

    Ok(())
}

fn format_pct(value: f64) -> String {
    format!("{:.1}%", value)
}
