use daabi_common::snowflake::{ProcessId, WorkerId};
use daabi_db::{client::DbClient, feed::Feed, issues::IssueBoard};
use serde::Deserialize;
use server::ServerState;
use sqlx::postgres::PgPoolOptions;
use std::{
    net::{IpAddr, SocketAddr},
    time::Duration,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod server;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error configuring database pool: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Error binding tcp listener: {0}")]
    TcpBind(std::io::Error),
    #[error("Error serving server: {0}")]
    TcpServe(std::io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    server_address: IpAddr,
    server_port: u16,
    database_url: String,
    #[serde(default)]
    worker_id: WorkerId,
    #[serde(default)]
    process_id: ProcessId,
    #[serde(default = "default_database_timeout_secs")]
    database_timeout_secs: u64,
}

fn default_database_timeout_secs() -> u64 {
    5
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "daabi_api=debug,\
                daabi_db=debug,\
                tower_http=debug,axum::rejection=trace,sqlx=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .env file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for ctrl-c, shutting down");
        return;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    // The users endpoints report an unreachable database per request.
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(env.database_timeout_secs))
        .connect_lazy(&env.database_url)?;
    let db_client = DbClient::new(pool, env.worker_id, env.process_id);
    if let Err(e) = db_client.migrate().await {
        warn!(error = %e, "Could not run migrations");
    }

    let state = ServerState::new(
        db_client,
        Feed::seeded(env.worker_id, env.process_id),
        IssueBoard::seeded(env.worker_id, env.process_id),
    );
    let app = server::app(state);

    let server_address = SocketAddr::new(env.server_address, env.server_port);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .map_err(InitError::TcpBind)?;
    info!(%server_address, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InitError::TcpServe)?;

    Ok(())
}
