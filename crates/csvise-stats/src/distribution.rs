//! Value frequency tables.

use serde::Serialize;

use csvise_model::Table;

use crate::describe::percentage;
use crate::error::Result;
use crate::{column_index, count_values, present_values};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueFrequency {
    pub value: String,
    pub count: usize,
    /// Share of non-empty values, in percent.
    pub percentage: f64,
}

/// Most frequent values of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub column: String,
    pub total_values: usize,
    pub non_empty: usize,
    pub unique: usize,
    /// Sorted by count descending, ties in first-seen order; at most `top_n`.
    pub top_values: Vec<ValueFrequency>,
}

/// Frequencies of the non-empty values of `column`, keeping the `top_n` most common.
pub fn value_distribution(table: &Table, column: &str, top_n: usize) -> Result<Distribution> {
    let index = column_index(table, column)?;
    Ok(distribution_at(table, index, top_n))
}

/// [`value_distribution`] for every column whose expected type is not numeric.
pub fn categorical_distributions(table: &Table, top_n: usize) -> Vec<Distribution> {
    table
        .columns()
        .iter()
        .filter(|c| !c.expected.is_numeric())
        .map(|c| distribution_at(table, c.index, top_n))
        .collect()
}

fn distribution_at(table: &Table, index: usize, top_n: usize) -> Distribution {
    let present = present_values(table, index);
    let mut counts = count_values(&present);
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let unique = counts.len();
    let top_values = counts
        .into_iter()
        .take(top_n)
        .map(|(value, count)| ValueFrequency {
            value: value.to_string(),
            count,
            percentage: percentage(count, present.len()),
        })
        .collect();
    Distribution {
        column: table
            .column(index)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        total_values: table.row_count(),
        non_empty: present.len(),
        unique,
        top_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csvise_model::{Row, Schema, TypeTag};

    fn table() -> Table {
        let values = ["b", "a", "b", "", "c", "a", "b"];
        Table::new(
            vec!["letter".into(), "n".into()],
            &Schema::new(vec![TypeTag::Str, TypeTag::Int]),
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Row::from_values(i + 1, [*v, "1"]))
                .collect(),
            ",",
        )
    }

    #[test]
    fn sorted_by_count_then_first_seen() {
        let dist = value_distribution(&table(), "letter", 10).unwrap();
        let top: Vec<(&str, usize)> = dist
            .top_values
            .iter()
            .map(|v| (v.value.as_str(), v.count))
            .collect();
        assert_eq!(top, vec![("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(dist.non_empty, 6);
        assert!((dist.top_values[0].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn top_n_truncates_but_counts_all_unique() {
        let dist = value_distribution(&table(), "letter", 1).unwrap();
        assert_eq!(dist.top_values.len(), 1);
        assert_eq!(dist.unique, 3);
    }

    #[test]
    fn categorical_distributions_skip_numeric_columns() {
        let all = categorical_distributions(&table(), 5);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].column, "letter");
    }
}
