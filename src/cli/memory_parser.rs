//! Memory size parsing utilities
//!
//! Parses budget strings such as `64K` or `1.5MB` into bytes and formats
//! byte counts for reports.

use thiserror::Error;

/// Memory parsing errors
#[derive(Debug, Error, PartialEq)]
pub enum MemoryParseError {
    #[error("Invalid memory size format: {input}. Expected format like '512', '64K', '1.5MB'")]
    InvalidFormat { input: String },

    #[error("Invalid memory unit: {unit}. Supported units: B, K, M, G, T (with optional 'B' or 'iB' suffix)")]
    InvalidUnit { unit: String },

    #[error("Memory size too large: {input}")]
    SizeTooLarge { input: String },
}

const UNITS: &[(&[&str], u64)] = &[
    (&["", "B", "BYTES"], 1),
    (&["K", "KB", "KIB"], 1 << 10),
    (&["M", "MB", "MIB"], 1 << 20),
    (&["G", "GB", "GIB"], 1 << 30),
    (&["T", "TB", "TIB"], 1 << 40),
];

/// Parse a memory size string into bytes. Units are binary multiples and
/// case-insensitive; a decimal fraction is allowed (`0.5K` is 512).
///
/// # Examples
///
/// ```
/// use linkq::cli::memory_parser::parse_memory_size;
///
/// assert_eq!(parse_memory_size("1024").unwrap(), 1024);
/// assert_eq!(parse_memory_size("64K").unwrap(), 64 * 1024);
/// assert_eq!(parse_memory_size("1.5MB").unwrap(), 1536 * 1024);
/// ```
pub fn parse_memory_size(input: &str) -> Result<usize, MemoryParseError> {
    let normalized = input.trim().to_uppercase();
    let split = normalized
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(normalized.len());
    let (number, unit) = normalized.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| MemoryParseError::InvalidFormat { input: input.to_string() })?;

    let unit = unit.trim();
    let multiplier = UNITS
        .iter()
        .find(|(names, _)| names.contains(&unit))
        .map(|(_, multiplier)| *multiplier)
        .ok_or_else(|| MemoryParseError::InvalidUnit { unit: unit.to_string() })?;

    let bytes = value * multiplier as f64;
    if !bytes.is_finite() || bytes >= usize::MAX as f64 {
        return Err(MemoryParseError::SizeTooLarge { input: input.to_string() });
    }
    Ok(bytes as usize)
}

/// Format bytes as human-readable string
pub fn format_memory_size(bytes: usize) -> String {
    const NAMES: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < NAMES.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else if size.fract() == 0.0 {
        format!("{:.0} {}", size, NAMES[unit])
    } else {
        format!("{:.1} {}", size, NAMES[unit])
    }
}
