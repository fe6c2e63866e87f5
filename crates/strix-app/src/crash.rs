use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;
use std::path::PathBuf;

const APP_DIR: &str = "strix";

/// Directory crash reports are written to, under the platform data dir.
pub fn crash_report_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("crashes"))
}

/// Writes a crash report to disk when a panic occurs.
///
/// Returns the path to the written report, or `None` if writing failed.
/// This function runs inside a panic hook and never panics itself; all
/// errors are silently swallowed.
pub fn write_crash_report(info: &PanicHookInfo) -> Option<PathBuf> {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let dir = crash_report_dir()?;
    let path = dir.join(format!("crash_{timestamp}.json"));

    let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    let location = info.location().map(|loc| {
        serde_json::json!({
            "file": loc.file(),
            "line": loc.line(),
            "column": loc.column(),
        })
    });

    let backtrace = Backtrace::force_capture().to_string();

    let report = serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "panic_message": message,
        "location": location,
        "backtrace": backtrace,
    });

    let _ = std::fs::create_dir_all(&dir);
    std::fs::write(&path, serde_json::to_string_pretty(&report).ok()?).ok()?;

    // Restrict file permissions to owner-only on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
    }

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crash_report_dir_ends_with_app_dirs() {
        if let Some(dir) = crash_report_dir() {
            assert!(dir.ends_with("strix/crashes"));
        }
    }
}
