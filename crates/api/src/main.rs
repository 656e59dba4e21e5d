use std::sync::Arc;

use anyhow::Context;

use splitledger_api::{ApiConfig, LedgerService};
use splitledger_ledger::{ExpenseLedger, PlannerConfig, SettlementPlanner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    splitledger_observability::init(config.log_format);
    tracing::info!(
        bind_addr = %config.bind_addr,
        log_format = ?config.log_format,
        settlement_tolerance = %config.settlement_tolerance,
        "configuration loaded"
    );

    let planner = SettlementPlanner::new(PlannerConfig {
        tolerance: config.settlement_tolerance,
    });
    let services = Arc::new(LedgerService::new(ExpenseLedger::new(), planner));
    let app = splitledger_api::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
