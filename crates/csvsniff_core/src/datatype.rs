use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    #[serde(rename = "Numeric")]
    Numeric,
    #[serde(rename = "Date/Time")]
    DateTime,
    #[serde(rename = "Categorical (Text)")]
    Categorical,
}

impl ColumnType {
    /// Label used when displaying this type to users.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::DateTime => "Date/Time",
            Self::Categorical => "Categorical (Text)",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inferred type for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnTypeGuess {
    pub column_name: String,
    pub data_type: ColumnType,
}

impl ColumnTypeGuess {
    pub fn new(column_name: impl Into<String>, data_type: ColumnType) -> Self {
        ColumnTypeGuess {
            column_name: column_name.into(),
            data_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_guess() {
        let guesses = vec![
            ColumnTypeGuess::new("Date", ColumnType::DateTime),
            ColumnTypeGuess::new("Temp", ColumnType::Numeric),
            ColumnTypeGuess::new("Notes", ColumnType::Categorical),
        ];

        let s = serde_json::to_string(&guesses).unwrap();
        let expected = concat!(
            r#"[{"columnName":"Date","dataType":"Date/Time"},"#,
            r#"{"columnName":"Temp","dataType":"Numeric"},"#,
            r#"{"columnName":"Notes","dataType":"Categorical (Text)"}]"#,
        );
        assert_eq!(expected, s);

        let back: Vec<ColumnTypeGuess> = serde_json::from_str(&s).unwrap();
        assert_eq!(guesses, back);
    }
}
