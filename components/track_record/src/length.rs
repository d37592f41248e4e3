/// How track length is written into the `length` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthFormat {
    /// Whole seconds, e.g. `225`
    #[default]
    Seconds,
    /// Minutes and zero-padded seconds, e.g. `3:45`
    MinutesSeconds,
}

impl LengthFormat {
    pub fn format(&self, seconds: u64) -> String {
        match self {
            LengthFormat::Seconds => seconds.to_string(),
            LengthFormat::MinutesSeconds => format!("{}:{:02}", seconds / 60, seconds % 60),
        }
    }
}

/// Parse a `length` cell written in either [`LengthFormat`].
///
/// # Examples
/// ```
/// # use track_record::parse_length;
/// assert_eq!(parse_length("225"), Some(225));
/// assert_eq!(parse_length("3:45"), Some(225));
/// assert_eq!(parse_length(""), None);
/// ```
pub fn parse_length(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    match cell.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = minutes.trim().parse::<u64>().ok()?;
            let seconds = seconds.trim().parse::<u64>().ok()?;
            if seconds >= 60 {
                return None;
            }
            minutes.checked_mul(60)?.checked_add(seconds)
        }
        None => cell.parse::<u64>().ok(),
    }
}
