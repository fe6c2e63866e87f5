//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Strix Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Strix"
# width = 1024            # initial logical width
# height = 768            # initial logical height
# dynamic_title = true    # show the active tab's title in the title bar

[session]
# homepage = "about:blank"
# max_tabs = 32                 # 1-128
# script_eval_timeout_ms = 5000   # 100-600000
# page_load_timeout_ms = 15000    # 100-600000
# resize_tolerance_px = 2         # 0-16 physical pixels

[engine]
# frame_rate = 30          # 1-240 fps for windowless rendering
# neutral_color = "#1e1e1e"  # shown while waiting for a size-matched frame
# sim_load_pumps = 3       # simulated engine: pump cycles per page load

[logging]
# directive = "strix=info"
"##
    .to_string()
}
