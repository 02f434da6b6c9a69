//! Parsing of `name=value` attribute assignments into records.
//!
//! Assignments always produce string (`S`) attributes.

use crate::store::{Result, StoreError};

use super::{AttributeValue, Record};

/// Parses a single `name=value` assignment.
///
/// The value may be empty and may itself contain `=`; the name may not be empty.
pub fn parse_assignment(assignment: &str) -> Result<(String, String)> {
    let (name, value) = assignment.split_once('=').ok_or_else(|| {
        StoreError::Request(format!(
            "invalid attribute assignment '{assignment}': expected name=value"
        ))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::Request(format!(
            "invalid attribute assignment '{assignment}': attribute name is empty"
        )));
    }

    Ok((name.to_string(), value.to_string()))
}

/// Builds a record from a list of assignments.
///
/// Assigning the same attribute twice is rejected rather than silently overwritten.
pub fn parse_record<S: AsRef<str>>(assignments: &[S]) -> Result<Record> {
    let mut record = Record::new();
    for assignment in assignments {
        let (name, value) = parse_assignment(assignment.as_ref())?;
        if record.contains(&name) {
            return Err(StoreError::Request(format!(
                "attribute '{name}' assigned more than once"
            )));
        }
        record.insert(name, AttributeValue::S(value));
    }

    if record.is_empty() {
        return Err(StoreError::Request("record has no attributes".to_string()));
    }

    Ok(record)
}

/// Builds a record from a comma separated list, e.g. `dummy=a,timestamp=b`.
pub fn parse_record_list(list: &str) -> Result<Record> {
    let assignments: Vec<&str> = list.split(',').filter(|s| !s.trim().is_empty()).collect();
    parse_record(&assignments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("dummy=hoge").unwrap(),
            ("dummy".to_string(), "hoge".to_string())
        );
    }

    #[test]
    fn test_parse_assignment_keeps_equals_in_value() {
        assert_eq!(
            parse_assignment("expr=a=b").unwrap(),
            ("expr".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_parse_assignment_allows_empty_value() {
        assert_eq!(
            parse_assignment("dummy=").unwrap(),
            ("dummy".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_assignment_rejects_missing_equals() {
        let result = parse_assignment("dummy");
        assert!(matches!(result, Err(StoreError::Request(_))));
    }

    #[test]
    fn test_parse_assignment_rejects_empty_name() {
        let result = parse_assignment(" =hoge");
        assert!(matches!(result, Err(StoreError::Request(_))));
    }

    #[test]
    fn test_parse_record() {
        let record = parse_record(&["dummy=hoge", "timestamp=now"]).unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("dummy").and_then(|v| v.as_s()), Some("hoge"));
        assert_eq!(record.get("timestamp").and_then(|v| v.as_s()), Some("now"));
    }

    #[test]
    fn test_parse_record_rejects_duplicate_names() {
        let result = parse_record(&["dummy=a", "dummy=b"]);
        assert_eq!(
            result,
            Err(StoreError::Request(
                "attribute 'dummy' assigned more than once".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_record_rejects_empty() {
        let empty: [&str; 0] = [];
        assert!(matches!(parse_record(&empty), Err(StoreError::Request(_))));
    }

    #[test]
    fn test_parse_record_list() {
        let record = parse_record_list("dummy=a, timestamp=b").unwrap();

        assert_eq!(record.get("dummy").and_then(|v| v.as_s()), Some("a"));
        assert_eq!(record.get("timestamp").and_then(|v| v.as_s()), Some("b"));
    }
}
