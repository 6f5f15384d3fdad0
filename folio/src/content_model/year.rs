//! Year values as authored in content files

use serde::{Deserialize, Serialize};
use std::fmt;

/// A year written either as a JSON number (`2024`) or a string (`"2023-24"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearLabel {
    Number(i64),
    Text(String),
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearLabel::Number(n) => write!(f, "{}", n),
            YearLabel::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for YearLabel {
    fn from(year: i64) -> Self {
        YearLabel::Number(year)
    }
}

impl From<&str> for YearLabel {
    fn from(year: &str) -> Self {
        YearLabel::Text(year.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_text_years() {
        let years: Vec<YearLabel> = serde_json::from_str(r#"[2022, "2023-24"]"#).unwrap();
        assert_eq!(years, vec![YearLabel::from(2022), YearLabel::from("2023-24")]);
        assert_eq!(years[0].to_string(), "2022");
        assert_eq!(years[1].to_string(), "2023-24");
    }
}
