//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Wrench emoji for install operations
pub const WRENCH: Emoji = Emoji("🔧", "*");

/// Hammer emoji for build operations
pub const HAMMER: Emoji = Emoji("🔨", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Chart emoji for measurement output
pub const CHART: Emoji = Emoji("📊", "~");

/// Speech-balloon emoji for comment posting
pub const BALLOON: Emoji = Emoji("💬", ">");

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use asset_delta::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a signed byte delta with an explicit sign prefix
///
/// Zero is rendered unsigned.
///
/// # Examples
///
/// ```
/// use asset_delta::fmt::format_bytes_signed;
///
/// assert_eq!(format_bytes_signed(512), "+512 B");
/// assert_eq!(format_bytes_signed(-2048), "-2.00 KB");
/// assert_eq!(format_bytes_signed(0), "0 B");
/// ```
pub fn format_bytes_signed(delta: i64) -> String {
    if delta == 0 {
        return "0 B".to_string();
    }
    let sign = if delta > 0 { "+" } else { "-" };
    format!("{}{}", sign, format_bytes(delta.unsigned_abs()))
}
