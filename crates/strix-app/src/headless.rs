//! Windowless run mode.
//!
//! Opens one tab per requested URL against the simulated engine, waits
//! for every page to finish loading, optionally writes a PNG of the
//! active tab, and shuts the session down. Used for scripted checks
//! and CI smoke runs.

use std::sync::Arc;
use std::time::Duration;

use strix_common::errors::StrixError;
use strix_common::geometry::LogicalSize;
use strix_config::StrixConfig;
use strix_engine::SimEngine;
use strix_session::{HeadlessHost, QueueDispatcher, SignalSuppression, TabShell};

use crate::cli::Args;
use crate::settings::session_settings;

pub fn run(config: &StrixConfig, args: &Args) -> Result<(), StrixError> {
    let settings = session_settings(config);
    let engine = SimEngine::new(config.engine.sim_load_pumps);
    let dispatcher = Arc::new(QueueDispatcher::default());
    let suppression = SignalSuppression::new();
    let host = HeadlessHost::new(suppression.clone());
    let mut shell = TabShell::new(
        settings,
        Arc::new(engine),
        Box::new(host),
        dispatcher,
        suppression,
    );

    shell.handle_view_resize(
        LogicalSize::new(config.window.width as i32, config.window.height as i32),
        1.0,
    );

    let urls: Vec<String> = if args.urls.is_empty() {
        vec![shell.settings().homepage.clone()]
    } else {
        args.urls.clone()
    };

    let mut opened = Vec::new();
    for url in &urls {
        let index = shell.create_tab(url);
        if index < 0 {
            continue;
        }
        if let Some(tab_id) = shell.tab_id_at(index as usize) {
            shell.surface_ready(tab_id);
            opened.push((tab_id, url.clone()));
        }
    }

    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(shell.settings().page_load_timeout);

    let mut failures = 0usize;
    for (tab_id, url) in &opened {
        match shell.wait_for_load(*tab_id, timeout) {
            Ok(()) => tracing::info!(%tab_id, url = %url, "Load complete"),
            Err(e) => {
                failures += 1;
                tracing::warn!(%tab_id, url = %url, "Load wait failed: {e}");
            }
        }
    }

    let mut screenshot_result: Result<(), StrixError> = Ok(());
    if let Some(path) = &args.screenshot {
        screenshot_result = shell.screenshot_active().and_then(|png| {
            std::fs::write(path, &png)?;
            tracing::info!(path = %path.display(), bytes = png.len(), "Screenshot written");
            Ok(())
        });
    }

    shell.shutdown();
    screenshot_result?;

    if failures > 0 {
        return Err(StrixError::Other(format!("{failures} page load(s) failed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(urls: &[&str], timeout_ms: u64) -> Args {
        Args {
            urls: urls.iter().map(|u| u.to_string()).collect(),
            config: None,
            log_level: None,
            headless: true,
            screenshot: None,
            timeout_ms: Some(timeout_ms),
        }
    }

    #[test]
    fn loads_every_requested_url() {
        let config = StrixConfig::default();
        let args = args_with(&["sim://one", "sim://two"], 2_000);

        assert!(run(&config, &args).is_ok());
    }

    #[test]
    fn falls_back_to_the_homepage_without_urls() {
        let config = StrixConfig::default();
        let args = args_with(&[], 2_000);

        assert!(run(&config, &args).is_ok());
    }

    #[test]
    fn a_hanging_page_fails_the_run() {
        let config = StrixConfig::default();
        let args = args_with(&["sim://hang"], 60);

        let err = run(&config, &args).unwrap_err();
        assert!(err.to_string().contains("1 page load(s) failed"));
    }

    #[test]
    fn writes_the_requested_screenshot() {
        let config = StrixConfig::default();
        let path =
            std::env::temp_dir().join(format!("strix-headless-shot-{}.png", std::process::id()));
        let mut args = args_with(&["sim://shot"], 2_000);
        args.screenshot = Some(path.clone());

        assert!(run(&config, &args).is_ok());

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let _ = std::fs::remove_file(&path);
    }
}
