mod app_state;
mod cli;
mod crash;
mod headless;
mod settings;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use strix_config::StrixConfig;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let path = crash::write_crash_report(info);

        eprintln!("\n--- Strix crashed ---");
        if let Some(p) = &path {
            eprintln!("Crash report written to: {}", p.display());
        }
        eprintln!("Please report this issue at: https://github.com/dylan/strix/issues");
        eprintln!("---------------------\n");

        default_hook(info);
    }));
}

fn main() {
    // Install panic hook for crash reports
    install_panic_hook();

    // Parse CLI arguments
    let args = cli::parse();

    // Load config before logging so the file's directive can seed the
    // filter. The loader's own tracing calls are lost, which is fine.
    let config_result = match args.config.as_deref() {
        Some(path) => strix_config::toml_loader::load_from_path(std::path::Path::new(path)),
        None => strix_config::load_config(),
    };

    // Initialize logging. Precedence: RUST_LOG, then --log-level, then
    // the configured directive.
    let log_directive = args.log_level.as_deref().unwrap_or(match &config_result {
        Ok(config) => config.logging.directive.as_str(),
        Err(_) => "strix=info",
    });
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "strix=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Strix v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let config = config_result.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        StrixConfig::default()
    });
    tracing::info!(
        "Config loaded (homepage: {}, max tabs: {})",
        config.session.homepage,
        config.session.max_tabs
    );

    if args.headless {
        if let Err(e) = headless::run(&config, &args) {
            tracing::error!("Headless run failed: {e}");
            std::process::exit(1);
        }
        tracing::info!("Shutdown complete");
        return;
    }

    // Create event loop and run
    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = app_state::StrixApp::new(config, args.urls.clone());

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
