use std::fmt;

/// Generic data variant for model data
#[derive(Debug, Clone, PartialEq)]
pub enum ModelData {
    /// Text value.
    String(String),
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// No value, e.g. for a row out of range.
    None,
}

impl ModelData {
    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ModelData::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ModelData::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns `true` if there is no value.
    pub fn is_none(&self) -> bool {
        matches!(self, ModelData::None)
    }
}

impl From<String> for ModelData {
    fn from(s: String) -> Self {
        ModelData::String(s)
    }
}

impl From<&str> for ModelData {
    fn from(s: &str) -> Self {
        ModelData::String(s.to_string())
    }
}

impl From<bool> for ModelData {
    fn from(b: bool) -> Self {
        ModelData::Bool(b)
    }
}

impl From<i64> for ModelData {
    fn from(i: i64) -> Self {
        ModelData::Int(i)
    }
}

impl fmt::Display for ModelData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelData::String(s) => f.write_str(s),
            ModelData::Bool(b) => write!(f, "{}", b),
            ModelData::Int(i) => write!(f, "{}", i),
            ModelData::None => Ok(()),
        }
    }
}

/// Trait defining a flat, role-addressed list model.
///
/// Views look rows up by position and ask for one role at a time. Positions
/// are only valid until the next change reported through a
/// [ListObserver](crate::observer::ListObserver).
pub trait ItemModel {
    /// Role key used to address the columns of a row.
    type Role: Copy;

    /// Number of rows in the model
    fn row_count(&self) -> usize;

    /// Get data for a specific row and role.
    ///
    /// Returns [ModelData::None] for rows out of range.
    fn data(&self, row: usize, role: Self::Role) -> ModelData;

    /// Role keys together with the names views bind to.
    fn role_names(&self) -> Vec<(Self::Role, &'static str)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_data_conversions() {
        assert_eq!(ModelData::from("abc").as_str(), Some("abc"));
        assert_eq!(ModelData::from(true).as_bool(), Some(true));
        assert_eq!(ModelData::from(String::from("x")).as_bool(), None);
        assert!(ModelData::None.is_none());
    }

    #[test]
    fn test_model_data_display() {
        assert_eq!(ModelData::from(42i64).to_string(), "42");
        assert_eq!(ModelData::None.to_string(), "");
        assert_eq!(ModelData::from(false).to_string(), "false");
    }
}
