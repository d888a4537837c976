// src/utils/report.rs

//! Console progress reporting with server-style formatting.
//!
//! Everything goes through the `log` facade so the CLI's logger decides
//! what is shown.

/// Log a header
pub fn header(title: &str) {
    let border = "═".repeat(60);
    log::info!("{}", border);
    log::info!("  {}", title);
    log::info!("{}", border);
}

/// Log a step in a process
pub fn step(step_num: usize, total: usize, message: &str) {
    log::info!("[STEP {}/{}] {}", step_num, total, message);
}

/// Log a success message
pub fn success(message: &str) {
    log::info!("✓ {}", message);
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    log::info!("    {}", message);
}

/// Log a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    log::info!("[SUMMARY] {}", title);
    for (key, value) in items {
        log::info!("    {}: {}", key, value);
    }
}

/// Log a warning with a marker
pub fn warning(message: &str) {
    log::warn!("⚠ {}", message);
}

/// Log an error with a marker
pub fn error(message: &str) {
    log::error!("✗ {}", message);
}
