use std::sync::Arc;

use appassets_shell::config::{AppState, Config};
use appassets_shell::origin::INITIAL_URL;
use appassets_shell::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg.logging)?;

    // Worker count follows config; defaults to one per CPU core
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_info(&format!("[CONFIG] Using {workers} worker threads"));
    } else {
        logger::log_info("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(cfg)?);
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &state.config, state.interceptor.router());
    logger::log_info(&format!(
        "[INFO] Open http://{addr}/ with Host: {} to load {INITIAL_URL}",
        state.interceptor.router().origin().host()
    ));

    server::run(listener, state).await
}
