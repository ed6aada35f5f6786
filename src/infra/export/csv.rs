use crate::domain::entities::dataset::Record;

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Header line followed by one fully quoted line per record, joined by `\n`.
pub fn serialize<'a>(records: impl IntoIterator<Item = &'a Record>, headers: &[String]) -> String {
    let mut lines = vec![headers.join(",")];
    lines.extend(records.into_iter().map(|record| {
        headers
            .iter()
            .map(|header| quote(record.value(header)))
            .collect::<Vec<_>>()
            .join(",")
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_inner_quotes() {
        let record: Record = [("a", "x\"y")].into_iter().collect();
        assert_eq!(serialize([&record], &["a".to_string()]), "a\n\"x\"\"y\"");
    }

    #[test]
    fn follows_requested_column_order() {
        let record: Record = [("a", "1"), ("b", "2,3")].into_iter().collect();
        let csv = serialize([&record], &["b".to_string(), "a".to_string()]);
        assert_eq!(csv, "b,a\n\"2,3\",\"1\"");
    }

    #[test]
    fn no_records_yields_only_headers() {
        let csv = serialize(std::iter::empty::<&Record>(), &["a".to_string(), "b".to_string()]);
        assert_eq!(csv, "a,b");
    }
}
