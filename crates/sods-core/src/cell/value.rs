//! Cell value types

use std::fmt;

/// The type of value a cell holds, as named by the document format
///
/// A formula cell carries the type of the result its formula produces;
/// there is no separate "formula" type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueType {
    /// Numeric value
    Float,
    /// Date or date-time value, carried in `date_value`
    Date,
    /// Plain text
    #[default]
    String,
    /// TRUE/FALSE
    Boolean,
}

impl ValueType {
    /// The attribute value used in `office:value-type`
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::Date => "date",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
        }
    }

    /// Parse an `office:value-type` attribute value
    ///
    /// `percentage` is read as [`ValueType::Float`]; percentage formatting is
    /// not modeled, so the marker is lost. Unknown types return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "float" | "percentage" => Some(ValueType::Float),
            "date" => Some(ValueType::Date),
            "string" => Some(ValueType::String),
            "boolean" => Some(ValueType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(ValueType::parse("float"), Some(ValueType::Float));
        assert_eq!(ValueType::parse("date"), Some(ValueType::Date));
        assert_eq!(ValueType::parse("string"), Some(ValueType::String));
        assert_eq!(ValueType::parse("boolean"), Some(ValueType::Boolean));
    }

    #[test]
    fn test_percentage_is_float() {
        assert_eq!(ValueType::parse("percentage"), Some(ValueType::Float));
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(ValueType::parse("currency"), None);
        assert_eq!(ValueType::parse(""), None);
    }

    #[test]
    fn test_display_matches_attribute() {
        for t in [
            ValueType::Float,
            ValueType::Date,
            ValueType::String,
            ValueType::Boolean,
        ] {
            assert_eq!(ValueType::parse(&t.to_string()), Some(t));
        }
    }
}
