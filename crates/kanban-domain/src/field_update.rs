/// Represents a field update operation for partial updates
///
/// This type provides a clear, three-state pattern for updating optional fields:
/// - `NoChange`: Field keeps its existing value
/// - `Set(value)`: Field is updated to the provided value
/// - `Clear`: Field is cleared
///
/// # Example
///
/// ```
/// use kanban_domain::FieldUpdate;
///
/// let start = FieldUpdate::from_submitted(Some("2024-05-01".to_string()));
/// assert_eq!(start, FieldUpdate::Set("2024-05-01".to_string()));
///
/// let end = FieldUpdate::<String>::from_submitted(Some(String::new()));
/// assert_eq!(end, FieldUpdate::Clear);
///
/// let untouched = FieldUpdate::<String>::from_submitted(None);
/// assert_eq!(untouched, FieldUpdate::NoChange);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Do not modify this field (keep existing value)
    #[default]
    NoChange,
    /// Set the field to the provided value
    Set(T),
    /// Clear the field
    Clear,
}

impl FieldUpdate<String> {
    /// Build an update from a submitted text field: absent is `NoChange`,
    /// blank is `Clear`, anything else is `Set` with surrounding whitespace
    /// removed.
    pub fn from_submitted(value: Option<String>) -> Self {
        match value {
            None => FieldUpdate::NoChange,
            Some(v) if v.trim().is_empty() => FieldUpdate::Clear,
            Some(v) => FieldUpdate::Set(v.trim().to_string()),
        }
    }

    /// Apply this update to a text field where the empty string means unset.
    pub fn apply_to_text(self, field: &mut String) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = value,
            FieldUpdate::Clear => field.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_to_text() {
        let mut field = "2024-01-01".to_string();
        FieldUpdate::NoChange.apply_to_text(&mut field);
        assert_eq!(field, "2024-01-01");

        FieldUpdate::Clear.apply_to_text(&mut field);
        assert_eq!(field, "");

        FieldUpdate::Set("2024-02-02".to_string()).apply_to_text(&mut field);
        assert_eq!(field, "2024-02-02");
    }

    #[test]
    fn test_absent_field_keeps_value() {
        let mut field = "2024-03-01".to_string();
        FieldUpdate::from_submitted(None).apply_to_text(&mut field);
        assert_eq!(field, "2024-03-01");
    }

    #[test]
    fn test_from_submitted_whitespace_clears() {
        assert_eq!(
            FieldUpdate::<String>::from_submitted(Some("   ".to_string())),
            FieldUpdate::Clear
        );
        assert_eq!(
            FieldUpdate::from_submitted(Some(" 2024-06-01 ".to_string())),
            FieldUpdate::Set("2024-06-01".to_string())
        );
    }

}
