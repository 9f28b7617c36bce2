//! Named file-size ceilings, ported from the original framework's
//! `FileSizeLimits` convenience constants.

/// Recommended file-size ceilings for different deployment scenarios, in bytes.
pub struct FileSizeLimits;

impl FileSizeLimits {
    pub const PRODUCTION_SMALL: u64 = 10 * 1024 * 1024;
    pub const PRODUCTION_MEDIUM: u64 = 50 * 1024 * 1024;
    pub const PRODUCTION_LARGE: u64 = 100 * 1024 * 1024;
    pub const DEVELOPMENT: u64 = 500 * 1024 * 1024;
    pub const TESTING: u64 = 1024 * 1024 * 1024;
    pub const REAL_TIME: u64 = 5 * 1024 * 1024;
    pub const BATCH_PROCESSING: u64 = 200 * 1024 * 1024;
    pub const MEMORY_CONSTRAINED: u64 = 25 * 1024 * 1024;
}

/// Format a byte count the way the original `_format_file_size` helper does.
pub fn format_file_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1}{}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1}TB", size)
}
