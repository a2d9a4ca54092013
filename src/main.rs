use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use clash_group_sync::app::sync_use_case::{FeedSource, SyncOptions, SyncReport, SyncUseCase};
use clash_group_sync::config::Settings;
use clash_group_sync::domain::Region;
use clash_group_sync::infra::http_client::ReqwestFeedFetcher;
use clash_group_sync::logging;

#[derive(Parser)]
#[command(name = "clash_group_sync")]
#[command(about = "Sync the 🔙 送中节点 group and region groups with the flagged-node feed")]
#[command(version)]
struct Cli {
    /// Read the feed from a local TSV file instead of the remote URL
    #[arg(long, value_name = "PATH")]
    source: Option<PathBuf>,

    /// Proxy configuration file to rewrite
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Remote feed URL (overrides settings and environment)
    #[arg(long)]
    url: Option<String>,

    /// TOML settings file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Compute the new configuration without writing it
    #[arg(long)]
    dry_run: bool,

    /// Do not list individual nodes
    #[arg(short, long)]
    quiet: bool,
}

fn build_options(cli: &Cli) -> anyhow::Result<SyncOptions> {
    let settings = Settings::load(cli.settings.as_deref()).context("Failed to load settings")?;

    let source = match &cli.source {
        Some(path) => FeedSource::Local(path.clone()),
        None => FeedSource::Remote {
            url: cli.url.clone().unwrap_or_else(|| settings.feed.url.clone()),
            timeout: settings.feed.timeout(),
        },
    };

    Ok(SyncOptions {
        source,
        config_path: cli.config.clone().unwrap_or(settings.target.config_path),
        dry_run: cli.dry_run,
    })
}

fn print_report(report: &SyncReport, quiet: bool) {
    let plan = &report.plan;

    println!("\n📥 Flagged nodes: {}", plan.names.len());
    if !quiet {
        for name in &plan.names {
            println!("   - {}", name);
        }
    }

    println!("\n🔎 Generated pattern:\n{}", plan.inclusion_pattern);

    println!("\n🌏 Region groups:");
    for region in Region::ALL {
        let excluded = plan.classified.get(region);
        let status = if plan.updated_regions.contains(&region) {
            "updated"
        } else if excluded.is_empty() {
            "unchanged"
        } else {
            "skipped"
        };
        println!("   {} ({} excluded): {}", region, excluded.len(), status);
    }
    if !plan.classified.unassigned().is_empty() {
        println!("   No region: {}", plan.classified.unassigned().len());
    }

    if !plan.skipped_regions.is_empty() {
        println!("\n⚠️  Warnings:");
        for warning in &plan.skipped_regions {
            println!("   - {}", warning);
        }
    }

    let outcome = if report.written {
        "✅ Configuration updated"
    } else if report.changed {
        "📝 Dry run, configuration not written"
    } else {
        "✅ Configuration already up to date"
    };
    println!("\n{}: {}", outcome, report.config_path.display());
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = build_options(&cli)?;
    println!("🔄 Reading node feed from {}", options.source.describe());

    let fetcher = ReqwestFeedFetcher::new().context("Failed to build HTTP client")?;
    let use_case = SyncUseCase::new(Box::new(fetcher));
    let report = use_case.run(&options)?;

    print_report(&report, cli.quiet);
    Ok(())
}

fn main() {
    dotenv::dotenv().ok();
    let guard = logging::init_logging();

    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            error!("Sync failed: {:#}", e);
            println!("❌ Sync failed: {:#}", e);
            1
        }
    };

    // Flush file logs before exiting
    drop(guard);
    std::process::exit(code);
}
