//! Maps the loaded config file onto session settings.

use std::time::Duration;

use strix_common::geometry::LogicalSize;
use strix_config::colors::parse_hex_rgb;
use strix_config::StrixConfig;
use strix_session::SessionSettings;

/// View background when the configured neutral color fails to parse.
const FALLBACK_RGB: [u8; 3] = [0x1e, 0x1e, 0x1e];

pub fn session_settings(config: &StrixConfig) -> SessionSettings {
    SessionSettings {
        homepage: config.session.homepage.clone(),
        max_tabs: config.session.max_tabs,
        resize_tolerance_px: config.session.resize_tolerance_px,
        script_eval_timeout: Duration::from_millis(config.session.script_eval_timeout_ms),
        page_load_timeout: Duration::from_millis(config.session.page_load_timeout_ms),
        initial_view: LogicalSize::new(config.window.width as i32, config.window.height as i32),
        frame_rate: config.engine.frame_rate,
        background_rgb: parse_hex_rgb(&config.engine.neutral_color).unwrap_or(FALLBACK_RGB),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_maps_through() {
        let config = StrixConfig::default();
        let settings = session_settings(&config);

        assert_eq!(settings.homepage, config.session.homepage);
        assert_eq!(settings.max_tabs, config.session.max_tabs);
        assert_eq!(
            settings.page_load_timeout,
            Duration::from_millis(config.session.page_load_timeout_ms)
        );
        assert_eq!(settings.initial_view, LogicalSize::new(1024, 768));
        assert_eq!(settings.background_rgb, [0x1e, 0x1e, 0x1e]);
    }

    #[test]
    fn unparseable_neutral_color_falls_back() {
        let mut config = StrixConfig::default();
        config.engine.neutral_color = "not-a-color".to_string();

        let settings = session_settings(&config);

        assert_eq!(settings.background_rgb, FALLBACK_RGB);
    }

    #[test]
    fn custom_neutral_color_is_honored() {
        let mut config = StrixConfig::default();
        config.engine.neutral_color = "#336699".to_string();

        let settings = session_settings(&config);

        assert_eq!(settings.background_rgb, [0x33, 0x66, 0x99]);
    }
}
