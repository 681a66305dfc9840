//! DNSWard — policy-engine operator CLI.
//!
//! This binary does not speak DNS wire format or forward queries; that is
//! the job of the (out-of-scope) front-end described in spec.md §1. It
//! exists to exercise the policy engine standalone: `serve` keeps an
//! engine alive and wired to SIGHUP/SIGTERM like a real daemon would, and
//! `classify` runs one-off lookups against the configured store for
//! operator debugging.

mod bootstrap;

use clap::{Parser, Subcommand};
use dnsward_application::use_cases::{ClassifyUseCase, GetStatsUseCase};
use dnsward_domain::config::CliOverrides;
use dnsward_infrastructure::{PolicyEngine, RefreshController};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

#[derive(Parser)]
#[command(name = "dnsward")]
#[command(version)]
#[command(about = "Policy engine for a high-throughput DNS resolver extension")]
struct Cli {
    /// Path to a TOML config file. Missing file falls back to defaults.
    #[arg(short = 'c', long, default_value = "dnsward.toml")]
    config: PathBuf,

    /// Override `store-path`.
    #[arg(long)]
    store_path: Option<String>,

    /// Override `pool-size`.
    #[arg(long)]
    pool_size: Option<u32>,

    /// Override `lru-capacity`.
    #[arg(long)]
    lru_capacity: Option<usize>,

    /// Override the logging level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine, reloading on SIGHUP and reporting counters until
    /// SIGTERM or Ctrl-C.
    Serve {
        /// Seconds between periodic stats log lines. 0 disables.
        #[arg(long, default_value_t = 60)]
        stats_interval_secs: u64,
    },
    /// Classify one or more names against the configured store and print
    /// the resulting disposition, one line per name.
    Classify {
        /// Question names to classify.
        names: Vec<String>,

        /// Emit a JSON array instead of tab-separated lines.
        #[arg(long)]
        json: bool,
    },
}

#[derive(serde::Serialize)]
struct ClassifyResult {
    name: String,
    kind: String,
    matched_rule: Option<String>,
    alias_target: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        store_path: cli.store_path.clone(),
        pool_size: cli.pool_size,
        lru_capacity: cli.lru_capacity,
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(&cli.config, overrides)?;
    bootstrap::init_logging(&config.logging);

    let engine = Arc::new(PolicyEngine::new(&config).await);

    match cli.command {
        Commands::Serve { stats_interval_secs } => run_serve(engine, stats_interval_secs).await,
        Commands::Classify { names, json } => run_classify(engine, names, json).await,
    }
}

async fn run_serve(engine: Arc<PolicyEngine>, stats_interval_secs: u64) -> anyhow::Result<()> {
    info!("dnsward engine started; waiting for SIGHUP (reload) or SIGTERM (shutdown)");

    let refresh = RefreshController::new(engine.clone());
    let refresh_task = tokio::spawn(refresh.run());

    let stats_task = if stats_interval_secs > 0 {
        let stats_engine = engine.clone();
        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(stats_interval_secs));
            loop {
                interval.tick().await;
                let snapshot = GetStatsUseCase::new(stats_engine.clone()).execute();
                info!(
                    total_queries = snapshot.total_queries,
                    lru_hit_rate = snapshot.lru_hit_rate(),
                    bloom_positive_rate = snapshot.bloom_positive_rate(),
                    block_regex_hits = snapshot.block_regex_hits,
                    block_exact_hits = snapshot.block_exact_hits,
                    domain_alias_hits = snapshot.domain_alias_hits,
                    block_wildcard_hits = snapshot.block_wildcard_hits,
                    fqdn_dns_allow_hits = snapshot.fqdn_dns_allow_hits,
                    fqdn_dns_block_hits = snapshot.fqdn_dns_block_hits,
                    passthrough_total = snapshot.passthrough_total,
                    alias_depth_truncations = snapshot.alias_depth_truncations,
                    store_errors = snapshot.store_errors,
                    "pipeline stats"
                );
            }
        }))
    } else {
        None
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigterm.recv() => {
            info!("SIGTERM received; draining and shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received; draining and shutting down");
        }
    }

    refresh_task.abort();
    if let Some(task) = stats_task {
        task.abort();
    }

    info!("shutdown complete");
    Ok(())
}

async fn run_classify(engine: Arc<PolicyEngine>, names: Vec<String>, json: bool) -> anyhow::Result<()> {
    let use_case = ClassifyUseCase::new(engine);
    let mut results = Vec::with_capacity(names.len());

    for raw in names {
        let disposition = use_case.execute(&raw).await;
        results.push(ClassifyResult {
            name: raw,
            kind: format!("{:?}", disposition.kind),
            matched_rule: disposition.matched_rule.map(|t| t.as_str().to_string()),
            alias_target: disposition.alias_target.map(|n| n.to_string()),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for r in &results {
            match &r.alias_target {
                Some(target) => println!("{}\t{}\t-> {}\t({:?})", r.name, r.kind, target, r.matched_rule),
                None => println!("{}\t{}\t({:?})", r.name, r.kind, r.matched_rule),
            }
        }
    }
    Ok(())
}
