//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; the panels live behind the InputPort.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use zerowaste::adapters::mock::{MockAuthAdapter, MockScannerAdapter};
use zerowaste::adapters::persistence::SessionJson;
use zerowaste::adapters::ui::tui::TuiInputPort;
use zerowaste::ports::{AuthPort, InputPort, ScannerPort, SessionStorePort};
use zerowaste::usecases::{AuthService, PantryService, ReminderService, ScannerService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    zerowaste::adapters::ui::init_ui();

    let cfg = zerowaste::shared::config::AppConfig::load().unwrap_or_default();

    let data_dir = cfg.data_dir_or_default();
    let data_path = PathBuf::from(&data_dir);
    tokio::fs::create_dir_all(&data_path).await?;
    let data_dir_abs = data_path
        .canonicalize()
        .unwrap_or_else(|_| data_path.clone());
    info!(path = %data_dir_abs.display(), "data directory");

    let session_path = cfg
        .session_path
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_path.join("session.json"));

    // --- Outbound adapters (all mock backends today) ---
    let auth_adapter: Arc<dyn AuthPort> =
        Arc::new(MockAuthAdapter::with_delay(cfg.auth_delay_ms_or_default()));
    let scanner_adapter: Arc<dyn ScannerPort> = Arc::new(MockScannerAdapter::with_step_delay(
        cfg.scan_step_delay_ms_or_default(),
    ));
    let session: Arc<dyn SessionStorePort> = Arc::new(SessionJson::new(&session_path));

    // --- Services ---
    let pantry = Arc::new(PantryService::new());
    let auth_service = Arc::new(AuthService::new(auth_adapter, session));
    let scanner_service = Arc::new(ScannerService::new(scanner_adapter, Arc::clone(&pantry)));
    let reminder_service = Arc::new(ReminderService::new(Arc::clone(&pantry)));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        auth_service,
        Arc::clone(&pantry),
        scanner_service,
        reminder_service,
    ));

    // --- Run (auth gate -> dashboard loop) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
