mod analysis;
mod commands;
mod config;
mod llm;
mod report;
mod strategy;

use crate::analysis::MatchAnalyzer;
use crate::commands::{Command, help_text};
use crate::config::config::AppCfg;
use crate::llm::GeminiClient;
use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the plan / analysis, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = commands::parse_args(&args)?;

    let cfg = AppCfg::load("config.yml")?;

    let span = info_span!(
        "Supervisor",
        pid = %std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
    );
    let _enter = span.enter();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    match command {
        Command::Help => println!("{}", help_text()),
        Command::Plan(plan_args) => {
            info!("Computing staking plan");
            commands::plan::run(&cfg.staking, plan_args, &mut stdin.lock(), &mut stdout)?;
        }
        Command::Analyze { team_a, team_b } => {
            cfg.require_api_key()?;

            info!("Initializing Client");
            let client = Client::builder()
                .user_agent(cfg.http.user_agent.clone())
                .pool_idle_timeout(cfg.http.pool_idle_timeout)
                .pool_max_idle_per_host(cfg.http.pool_max_idle_per_host)
                .tcp_keepalive(cfg.http.tcp_keep_alive)
                .timeout(cfg.http.timeout)
                .build()
                .context("building http client")?;

            let gemini = GeminiClient::new(cfg.llm.clone(), client);
            let analyzer = MatchAnalyzer::new(Arc::new(gemini));
            commands::analyze::run(&analyzer, &team_a, &team_b, &mut stdout).await?;
        }
    }

    Ok(())
}
