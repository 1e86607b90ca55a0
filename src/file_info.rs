//! Selected file metadata as shown next to the upload area.

use crate::numeric::to_fixed_2;
use crate::schema::FileInfo;

/// Converts a byte count to megabytes (1 MB = 1024 × 1024 bytes).
pub fn mb_from_bytes(bytes: f64) -> f64 {
    bytes / 1024.0 / 1024.0
}

/// Formats a byte count as `"<mb, two decimals> MB"`.
///
/// # Example
///
/// ```ignore
/// assert_eq!(format_size_mb(1_048_576.0), "1.00 MB");
/// ```
pub fn format_size_mb(bytes: f64) -> String {
    format!("{} MB", to_fixed_2(mb_from_bytes(bytes)))
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size_bytes: f64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Label/value pairs, one per rendered line.
    pub fn fields(&self) -> [(&'static str, String); 2] {
        [
            ("File:", self.name.clone()),
            ("Size:", format_size_mb(self.size_bytes)),
        ]
    }

    /// The two display lines as plain text.
    pub fn lines(&self) -> [String; 2] {
        self.fields().map(|(label, value)| format!("{} {}", label, value))
    }
}
