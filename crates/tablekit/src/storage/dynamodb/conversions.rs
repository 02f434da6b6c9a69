//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between SDK `AttributeValue` maps and the
//! core record model. Testable without DynamoDB access.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::types::AttributeValue as SdkValue;
use tablekit_core::record::{AttributeValue, Key, Record};
use tablekit_core::store::StoreError;

/// An item as the SDK represents it.
pub type Item = HashMap<String, SdkValue>;

/// Convert a core value to an SDK value.
pub fn to_sdk_value(value: &AttributeValue) -> SdkValue {
    match value {
        AttributeValue::S(s) => SdkValue::S(s.clone()),
        AttributeValue::N(n) => SdkValue::N(n.clone()),
        AttributeValue::Bool(b) => SdkValue::Bool(*b),
        AttributeValue::Null(b) => SdkValue::Null(*b),
        AttributeValue::L(items) => SdkValue::L(items.iter().map(to_sdk_value).collect()),
        AttributeValue::M(map) => SdkValue::M(
            map.iter()
                .map(|(name, value)| (name.clone(), to_sdk_value(value)))
                .collect(),
        ),
        AttributeValue::Ss(values) => SdkValue::Ss(values.clone()),
    }
}

/// Convert an SDK value to a core value.
///
/// Binary and number-set values are not modelled and are rejected.
pub fn from_sdk_value(value: &SdkValue) -> Result<AttributeValue, StoreError> {
    match value {
        SdkValue::S(s) => Ok(AttributeValue::S(s.clone())),
        SdkValue::N(n) => Ok(AttributeValue::N(n.clone())),
        SdkValue::Bool(b) => Ok(AttributeValue::Bool(*b)),
        SdkValue::Null(b) => Ok(AttributeValue::Null(*b)),
        SdkValue::L(items) => items
            .iter()
            .map(from_sdk_value)
            .collect::<Result<Vec<_>, _>>()
            .map(AttributeValue::L),
        SdkValue::M(map) => map
            .iter()
            .map(|(name, value)| Ok((name.clone(), from_sdk_value(value)?)))
            .collect::<Result<BTreeMap<_, _>, StoreError>>()
            .map(AttributeValue::M),
        SdkValue::Ss(values) => Ok(AttributeValue::Ss(values.clone())),
        other => Err(StoreError::Request(format!(
            "unsupported attribute value: {:?}",
            other
        ))),
    }
}

/// Convert a record to a DynamoDB item.
pub fn record_to_item(record: &Record) -> Item {
    record
        .iter()
        .map(|(name, value)| (name.clone(), to_sdk_value(value)))
        .collect()
}

/// Convert a key to the item map GetItem and DeleteItem expect.
pub fn key_to_item(key: &Key) -> Item {
    key.iter()
        .map(|(name, value)| (name.clone(), to_sdk_value(value)))
        .collect()
}

/// Convert a DynamoDB item to a record.
pub fn item_to_record(item: &Item) -> Result<Record, StoreError> {
    item.iter()
        .map(|(name, value)| Ok((name.clone(), from_sdk_value(value)?)))
        .collect()
}

/// Convert an optional returned attribute map, treating an empty map as absent.
pub fn optional_record(item: Option<&Item>) -> Result<Option<Record>, StoreError> {
    match item {
        Some(item) if !item.is_empty() => item_to_record(item).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;

    fn sample_record() -> Record {
        Record::new()
            .with_string("dummy", "dummy-1705314600")
            .with_string("timestamp", "2024-01-15T10:30:00+00:00")
    }

    #[test]
    fn test_record_round_trip() {
        let record = sample_record();
        let item = record_to_item(&record);
        let parsed = item_to_record(&item).unwrap();

        assert_eq!(record, parsed);
    }

    #[test]
    fn test_record_item_has_string_attributes() {
        let item = record_to_item(&sample_record());

        assert_eq!(item.len(), 2);
        assert_eq!(
            item.get("dummy").unwrap().as_s().unwrap(),
            "dummy-1705314600"
        );
        assert_eq!(
            item.get("timestamp").unwrap().as_s().unwrap(),
            "2024-01-15T10:30:00+00:00"
        );
    }

    #[test]
    fn test_key_to_item() {
        let item = key_to_item(&Key::string("dummy", "hoge"));

        assert_eq!(item.len(), 1);
        assert_eq!(item.get("dummy").unwrap().as_s().unwrap(), "hoge");
    }

    #[test]
    fn test_nested_values_convert() {
        let mut map = BTreeMap::new();
        map.insert("count".to_string(), AttributeValue::N("3".to_string()));
        map.insert("done".to_string(), AttributeValue::Bool(false));
        let value = AttributeValue::L(vec![
            AttributeValue::M(map),
            AttributeValue::Null(true),
            AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]),
        ]);

        let sdk = to_sdk_value(&value);
        assert_eq!(from_sdk_value(&sdk).unwrap(), value);
    }

    #[test]
    fn test_binary_value_is_rejected() {
        let value = SdkValue::B(Blob::new(vec![1, 2, 3]));
        assert!(matches!(
            from_sdk_value(&value),
            Err(StoreError::Request(_))
        ));
    }

    #[test]
    fn test_optional_record_treats_empty_as_absent() {
        assert_eq!(optional_record(None).unwrap(), None);
        assert_eq!(optional_record(Some(&HashMap::new())).unwrap(), None);

        let item = record_to_item(&sample_record());
        assert_eq!(
            optional_record(Some(&item)).unwrap(),
            Some(sample_record())
        );
    }
}
