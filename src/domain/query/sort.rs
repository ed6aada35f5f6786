use std::cmp::Ordering;

use crate::domain::entities::dataset::{Dataset, SortDirection, SortState, View};
use crate::domain::query::filter::parse_number;

/// Total order over cells: numbers first, compared numerically, then everything else
/// in byte-wise string order.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Stable sort of `view` by `column`. Ties keep their relative order in both directions.
pub fn sort(dataset: &Dataset, view: &View, column: &str, direction: SortDirection) -> View {
    let mut rows = view.rows().to_vec();
    rows.sort_by(|left, right| {
        let a = cell(dataset, *left, column);
        let b = cell(dataset, *right, column);
        match direction {
            SortDirection::Asc => compare_cells(a, b),
            SortDirection::Desc => compare_cells(b, a),
        }
    });
    View::from_rows(rows)
}

pub fn apply_sort(dataset: &Dataset, view: View, state: &SortState) -> View {
    match &state.column {
        Some(column) => sort(dataset, &view, column, state.direction),
        None => view,
    }
}

fn cell<'a>(dataset: &'a Dataset, row: usize, column: &str) -> &'a str {
    dataset
        .records
        .get(row)
        .map(|record| record.value(column))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dataset::Record;

    fn dataset(values: &[(&str, &str)]) -> Dataset {
        let records: Vec<Record> = values
            .iter()
            .map(|(name, age)| [("name", *name), ("age", *age)].into_iter().collect())
            .collect();
        Dataset::new(vec!["name".to_string(), "age".to_string()], records)
    }

    fn names(dataset: &Dataset, view: &View) -> Vec<String> {
        view.records(dataset)
            .map(|record| record.value("name").to_string())
            .collect()
    }

    #[test]
    fn sorts_numbers_numerically() {
        let data = dataset(&[("Bob", "30"), ("Al", "25"), ("Cy", "100")]);
        let view = sort(&data, &View::all(&data), "age", SortDirection::Asc);
        assert_eq!(names(&data, &view), vec!["Al", "Bob", "Cy"]);
    }

    #[test]
    fn mixed_values_fall_back_to_string_order() {
        let data = dataset(&[("b", "x"), ("B", "y"), ("a", "z")]);
        let view = sort(&data, &View::all(&data), "name", SortDirection::Asc);
        assert_eq!(names(&data, &view), vec!["B", "a", "b"]);
    }

    #[test]
    fn numbers_sort_before_text_in_mixed_columns() {
        let pool = ["9", "10", "1a", "8", "100", "2b", "", "-3", "abc", "7.5"];
        let rows: Vec<(String, &str)> = (0..40)
            .map(|idx| (format!("r{idx}"), pool[(idx * 7) % pool.len()]))
            .collect();
        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|(name, age)| (name.as_str(), *age))
            .collect();
        let data = dataset(&pairs);

        let view = sort(&data, &View::all(&data), "age", SortDirection::Asc);
        let ages: Vec<&str> = view
            .records(&data)
            .map(|record| record.value("age"))
            .collect();

        assert_eq!(ages.len(), 40);
        let first_text = ages
            .iter()
            .position(|age| parse_number(age).is_none())
            .expect("column has text cells");
        assert!(ages[first_text..].iter().all(|age| parse_number(age).is_none()));
        assert!(ages
            .windows(2)
            .all(|pair| compare_cells(pair[0], pair[1]) != Ordering::Greater));
        assert_eq!(ages[0], "-3");
        assert_eq!(ages[39], "abc");

        let desc = sort(&data, &View::all(&data), "age", SortDirection::Desc);
        assert_eq!(desc.records(&data).next().map(|r| r.value("age")), Some("abc"));
    }

    #[test]
    fn descending_keeps_ties_in_original_order() {
        let data = dataset(&[("first", "1"), ("second", "2"), ("third", "1")]);
        let view = sort(&data, &View::all(&data), "age", SortDirection::Desc);
        assert_eq!(names(&data, &view), vec!["second", "first", "third"]);
    }

    #[test]
    fn final_order_does_not_depend_on_previous_sort() {
        let data = dataset(&[("a", "2"), ("b", "1"), ("c", "2"), ("d", "1")]);
        let all = View::all(&data);

        let resorted = sort(
            &data,
            &sort(&data, &all, "age", SortDirection::Asc),
            "age",
            SortDirection::Desc,
        );
        let direct = sort(&data, &all, "age", SortDirection::Desc);

        assert_eq!(resorted, direct);
    }
}
