use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use server::ServerSettings;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Redirect store HTTP server.
#[derive(Debug, Parser)]
#[command(name = "redirect-store-server", version)]
struct Args {
    /// Listen address; overrides `server.host`/`server.port` from the config file.
    #[arg(long, env = "REDIRECT_STORE_ADDR")]
    addr: Option<SocketAddr>,
    /// Record file; overrides `store.path` from the config file.
    #[arg(long, env = "REDIRECT_STORE_DB")]
    db: Option<PathBuf>,
}

fn main() -> std::process::ExitCode {
    dotenv().ok();
    let args = Args::parse();

    let (cfg, cfg_err) = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => (cfg, None),
        Err(e) => (configs::AppConfig::default(), Some(e)),
    };
    init_logging(cfg.server.log_format.parse().unwrap_or(LogFormat::Compact));
    if let Some(e) = cfg_err {
        warn!(service = "server", event = "config_fallback", error = %e, "invalid config, using defaults");
    }

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let addr = match args.addr {
        Some(addr) => addr,
        None => match cfg.server.bind_addr().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(e) => {
                error!(service = "server", event = "bad_addr", error = %e, "invalid listen address");
                return std::process::ExitCode::FAILURE;
            }
        },
    };
    let db_path = args.db.unwrap_or_else(|| PathBuf::from(&cfg.store.path));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        %addr,
        db = %db_path.display(),
        "redirect store starting"
    );

    rt.block_on(async move {
        match server::run(ServerSettings { addr, db_path }).await {
            Ok(()) => {
                info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
