use serde::{Deserialize, Serialize};
use std::fmt;

/// Disc position of a track.
///
/// Numeric when the raw value is a plain base-10 integer, otherwise the raw
/// text is kept exactly as found ("1/2", "A", ...). Nothing is coerced or
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Disc {
    Number(i64),
    Text(String),
}

impl Disc {
    /// Parse a raw disc value.
    ///
    /// Empty (or whitespace-only) input means "no disc" and yields `None`.
    ///
    /// # Examples
    /// ```
    /// # use track_record::Disc;
    /// assert_eq!(Disc::parse("3"), Some(Disc::Number(3)));
    /// assert_eq!(Disc::parse("3/5"), Some(Disc::Text("3/5".to_string())));
    /// assert_eq!(Disc::parse(""), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.parse::<i64>() {
            Ok(n) => Some(Disc::Number(n)),
            Err(_) => Some(Disc::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disc::Number(n) => write!(f, "{}", n),
            Disc::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3", Some(Disc::Number(3)))]
    #[case(" 2 ", Some(Disc::Number(2)))]
    #[case("+4", Some(Disc::Number(4)))]
    #[case("3/5", Some(Disc::Text("3/5".to_string())))]
    #[case("A", Some(Disc::Text("A".to_string())))]
    #[case("-1", Some(Disc::Number(-1)))]
    #[case("0", Some(Disc::Number(0)))]
    #[case("", None)]
    #[case("   ", None)]
    fn parses_raw_disc_values(#[case] raw: &str, #[case] expected: Option<Disc>) {
        assert_eq!(Disc::parse(raw), expected);
    }

    #[test]
    fn text_disc_displays_verbatim() {
        let disc = Disc::parse("1 of 2").unwrap();
        assert_eq!(disc.to_string(), "1 of 2");
        assert_eq!(disc, Disc::Text("1 of 2".to_string()));
    }

    #[test]
    fn numeric_disc_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Disc::Number(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Disc::Number(-1)).unwrap(), "-1");
        assert_eq!(
            serde_json::to_string(&Disc::Text("3/5".to_string())).unwrap(),
            "\"3/5\""
        );
    }
}
