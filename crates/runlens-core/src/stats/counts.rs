use crate::model::ModelRow;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Occurrence counts keyed in order of first appearance.
pub fn first_seen_counts<'a, I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect()
}

/// Descending by count; ties keep their incoming order.
pub fn sorted_by_count(mut counts: Vec<(String, usize)>) -> Vec<(String, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Schema × materialization count matrix. Rows and columns are sorted; cells
/// without models hold zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<usize>>,
}

impl CountMatrix {
    pub fn schema_by_materialization(models: &[ModelRow]) -> Self {
        let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        let mut rows: Vec<&str> = Vec::new();
        let mut columns: Vec<&str> = Vec::new();
        for m in models {
            *pairs
                .entry((m.schema.as_str(), m.materialized.as_str()))
                .or_default() += 1;
            rows.push(&m.schema);
            columns.push(&m.materialized);
        }
        rows.sort_unstable();
        rows.dedup();
        columns.sort_unstable();
        columns.dedup();

        let cells = rows
            .iter()
            .map(|r| {
                columns
                    .iter()
                    .map(|c| pairs.get(&(*r, *c)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Self {
            rows: rows.into_iter().map(String::from).collect(),
            columns: columns.into_iter().map(String::from).collect(),
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn max(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|r| r.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(schema: &str, materialized: &str) -> ModelRow {
        ModelRow {
            model_id: format!("model.{}.{}", schema, materialized),
            resource_type: "model".into(),
            materialized: materialized.into(),
            schema: schema.into(),
            unique_id_length: 0,
            file_path_length: 0,
        }
    }

    #[test]
    fn test_first_seen_order() {
        let counts = first_seen_counts(["model", "test", "model", "seed", "test", "model"]);
        assert_eq!(
            counts,
            vec![
                ("model".to_string(), 3),
                ("test".to_string(), 2),
                ("seed".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_sorted_by_count_is_stable() {
        let counts = sorted_by_count(first_seen_counts(["fail", "pass", "warn", "pass"]));
        let keys: Vec<_> = counts.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["pass", "fail", "warn"]);
    }

    #[test]
    fn test_matrix_fills_missing_pairs_with_zero() {
        let models = vec![
            model("staging", "view"),
            model("marts", "table"),
            model("staging", "view"),
            model("marts", "unknown"),
        ];
        let m = CountMatrix::schema_by_materialization(&models);

        assert_eq!(m.rows, vec!["marts", "staging"]);
        assert_eq!(m.columns, vec!["table", "unknown", "view"]);
        assert_eq!(m.cells, vec![vec![1, 1, 0], vec![0, 0, 2]]);
        assert_eq!(m.max(), 2);
        assert!(!m.is_empty());
    }

    #[test]
    fn test_empty_matrix() {
        let m = CountMatrix::schema_by_materialization(&[]);
        assert!(m.is_empty());
        assert_eq!(m.max(), 0);
    }
}
