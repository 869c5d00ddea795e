mod analysis;
mod api;
mod chat;
mod config;
mod error;
mod markdown;
mod models;
mod service;
mod ui;

use analysis::{SPEND_CEILING, UTILIZATION_FLOOR};
use chat::{ChatContext, ChatOrchestrator};
use clap::{Parser, Subcommand};
use config::{ensure_initialized, load_config};
use error::AppError;
use models::ChatRole;
use service::DashboardService;
use ui::run::run_tui;

#[derive(Debug, Parser)]
#[command(name = "cloudlens")]
#[command(about = "Terminal cloud cost and utilization dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Init,
    Tui,
    Fetch,
    Analyze {
        /// Also request the backend cost analysis and print its recommendations.
        #[arg(long)]
        remote: bool,
    },
    Ask {
        question: String,
        /// Print the reply as a rendered HTML fragment instead of plain text.
        #[arg(long)]
        html: bool,
    },
    Forecast,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            ensure_initialized()?;
            println!("Initialized cloudlens config directory.");
        }
        Commands::Tui => {
            ensure_initialized()?;
            run_tui().await?;
        }
        Commands::Fetch => {
            ensure_initialized()?;
            let cfg = load_config()?;
            let svc = DashboardService::new(&cfg)?;
            let snap = svc.fetch_all().await?;
            println!(
                "Fetched {} cost points, {} forecast points, {} service points, {} usage rows at {}",
                snap.cost.len(),
                snap.forecast.len(),
                snap.services.len(),
                snap.usage.len(),
                snap.fetched_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            );
        }
        Commands::Analyze { remote } => {
            ensure_initialized()?;
            let cfg = load_config()?;
            let svc = DashboardService::new(&cfg)?;
            let cost = svc.client().cost_data().await?;
            let summary = analysis::summarize(&cost);

            println!("Total cloud costs: ${:.2}", summary.total_cost);
            println!("Average utilization: {:.1}%", summary.avg_utilization);
            println!(
                "Highest cost provider: {} (${:.2})",
                summary.dominant_provider.0, summary.dominant_provider.1
            );
            if summary.anomalies.is_empty() {
                println!("No anomalies detected.");
            } else {
                println!(
                    "Alert: {} points where costs exceeded ${SPEND_CEILING:.0} while utilization was below {UTILIZATION_FLOOR:.0}%:",
                    summary.anomalies.len()
                );
                for point in &summary.anomalies {
                    println!(
                        "  {}  ${:.2} at {:.1}% utilization",
                        point.timestamp,
                        point.aws + point.gcp + point.azure,
                        point.utilization
                    );
                }
            }

            if remote {
                let remote_analysis = svc.client().cost_analysis(&cost).await?;
                println!("Backend recommendations:");
                for rec in &remote_analysis.recommendations {
                    println!("  - {rec}");
                }
            }
        }
        Commands::Ask { question, html } => {
            if question.trim().is_empty() {
                return Err(AppError::Config("question must not be empty".into()));
            }
            ensure_initialized()?;
            let cfg = load_config()?;
            let svc = DashboardService::new(&cfg)?;
            let snap = svc.fetch_all().await?;

            let ctx = ChatContext {
                cost_data: &snap.cost,
                aws_service_data: &snap.services,
                api_usage: &snap.usage,
            };
            let mut chat = ChatOrchestrator::new();
            chat.submit(svc.client(), &question, &ctx).await;

            let reply = chat
                .messages()
                .iter()
                .rev()
                .find(|m| m.role == ChatRole::Assistant)
                .map(|m| m.content.clone())
                .unwrap_or_default();
            if html {
                println!("{}", markdown::render_html(&reply));
            } else {
                println!("{reply}");
            }
        }
        Commands::Forecast => {
            ensure_initialized()?;
            let cfg = load_config()?;
            let svc = DashboardService::new(&cfg)?;
            let (historical, forecast) =
                tokio::join!(svc.client().cost_data(), svc.client().forecast_data());
            let historical = historical?;
            let forecast = forecast?;

            let outlook = svc.client().forecast_analysis(&historical, &forecast).await?;
            let predicted = analysis::summarize(&outlook.predicted_costs);
            println!("Predicted spend over the forecast window: ${:.2}", predicted.total_cost);
            println!("Utilization trend: {:?}", outlook.utilization_trend);
            if !outlook.recommended_instances.is_empty() {
                println!("Reserved instance recommendations:");
                for ri in &outlook.recommended_instances {
                    println!(
                        "  - {} x{} for {} (saves ${:.2})",
                        ri.provider, ri.count, ri.duration, ri.potential_savings
                    );
                }
            }
            for rec in &outlook.recommendations {
                println!("  - {rec}");
            }
        }
    }

    Ok(())
}
