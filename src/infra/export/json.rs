use anyhow::{Context, Result};

use crate::domain::entities::dataset::Record;

/// Pretty JSON array of record objects, two-space indented.
pub fn to_json(records: &[Record]) -> Result<String> {
    serde_json::to_string_pretty(records).context("failed to serialize records to json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_prints_records_in_column_order() {
        let records: Vec<Record> = vec![[("name", "Bob"), ("age", "30")].into_iter().collect()];

        let json = to_json(&records).expect("records should serialize");

        assert_eq!(
            json,
            "[\n  {\n    \"name\": \"Bob\",\n    \"age\": \"30\"\n  }\n]"
        );
    }

    #[test]
    fn empty_export_is_an_empty_array() {
        assert_eq!(to_json(&[]).expect("empty export"), "[]");
    }
}
