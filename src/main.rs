use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

mod compliance;
mod distribution;
mod export;
mod fetch;
mod groups;
mod models;
mod ranking;
mod report;

use distribution::GeoField;
use fetch::{EntityFetcher, HttpFetcher, ServiceConfig, SnapshotFetcher};

#[derive(Parser)]
#[command(name = "campaign-metrics")]
#[command(about = "Compliance and performance metrics for campaign field structures", long_about = None)]
struct Cli {
    /// Read entity collections from a directory of JSON snapshot files
    /// instead of the live data service
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score leader compliance against voter targets
    Compliance {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Also write the full record set as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Bucket voters by a geographic field
    Distribution {
        #[arg(long, value_enum)]
        field: GeoField,
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Also write the top buckets as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Roll up per-group structure performance
    Groups,
    /// Generate a markdown dashboard report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn build_fetcher(snapshot: Option<PathBuf>) -> anyhow::Result<Box<dyn EntityFetcher>> {
    if let Some(dir) = snapshot {
        return Ok(Box::new(SnapshotFetcher::new(dir)));
    }

    let base_url = std::env::var("CAMPAIGN_API_URL")
        .context("CAMPAIGN_API_URL must point at the campaign data service")?;
    Ok(Box::new(HttpFetcher::new(ServiceConfig::new(base_url))))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let fetcher = build_fetcher(cli.snapshot)?;

    match cli.command {
        Commands::Compliance { limit, csv } => {
            let leaders = fetcher.leaders().await?;
            let voters = fetcher.voters().await?;
            let records = compliance::compute_compliance(&leaders, &voters);

            if records.is_empty() {
                println!("No leaders with targets set.");
                return Ok(());
            }

            println!(
                "Overall compliance: {:.1}% across {} targeted leaders.",
                ranking::overall_compliance_rate(&records),
                records.len()
            );

            println!("Top performers:");
            for record in ranking::top_performers(&records, limit) {
                println!(
                    "- {} {} ({:.1}%, {} of {} voters)",
                    record.leader_name,
                    record.leader_surname,
                    record.compliance_rate,
                    record.assigned_voters,
                    record.target
                );
            }

            let risky = ranking::at_risk(&records, 5);
            if !risky.is_empty() {
                println!("At risk:");
                for record in risky {
                    println!(
                        "- {} {} ({:.1}%, {} of {} voters)",
                        record.leader_name,
                        record.leader_surname,
                        record.compliance_rate,
                        record.assigned_voters,
                        record.target
                    );
                }
            }

            if let Some(path) = csv {
                let written = export::write_compliance_csv(&path, &records)?;
                println!("Wrote {written} records to {}.", path.display());
            }
        }
        Commands::Distribution { field, top, csv } => {
            let voters = fetcher.voters().await?;
            let dist = distribution::distribution(&voters, field);
            let buckets = dist.top_n(top);

            if buckets.is_empty() {
                println!("No voters registered.");
                return Ok(());
            }

            println!("{} voters across {} locations:", dist.total(), dist.counts().len());
            for bucket in &buckets {
                println!("- {}: {}", bucket.label, bucket.count);
            }

            if let Some(path) = csv {
                let written = export::write_distribution_csv(&path, &buckets)?;
                println!("Wrote {written} buckets to {}.", path.display());
            }
        }
        Commands::Groups => {
            let all_groups = fetcher.groups().await?;
            if all_groups.is_empty() {
                println!("No groups defined.");
                return Ok(());
            }

            let records = groups::compute_batch(fetcher.as_ref(), &all_groups).await;
            for record in records {
                println!(
                    "- {}: {} recommended, {} leaders, {} voters, efficiency {:.2}",
                    record.group_name,
                    record.recommended_count,
                    record.unique_leader_count,
                    record.unique_voter_count,
                    record.efficiency
                );
            }
        }
        Commands::Report { out } => {
            let leaders = fetcher.leaders().await?;
            let voters = fetcher.voters().await?;
            let all_groups = fetcher.groups().await?;

            let records = compliance::compute_compliance(&leaders, &voters);
            let group_records = groups::compute_batch(fetcher.as_ref(), &all_groups).await;

            let rendered = report::build_report(
                Utc::now().date_naive(),
                &records,
                &voters,
                &group_records,
            );
            std::fs::write(&out, rendered)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
