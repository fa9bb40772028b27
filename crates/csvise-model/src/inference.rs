//! Majority-vote schema inference.

use tracing::debug;

use crate::table::{Row, Schema};
use crate::types::TypeTag;

/// Per-tag vote counts for one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnVotes {
    counts: [usize; 4],
}

impl ColumnVotes {
    fn slot(tag: TypeTag) -> usize {
        match tag {
            TypeTag::Bool => 0,
            TypeTag::Int => 1,
            TypeTag::Float => 2,
            TypeTag::Str => 3,
        }
    }

    pub fn record(&mut self, tag: TypeTag) {
        self.counts[Self::slot(tag)] += 1;
    }

    pub fn count(&self, tag: TypeTag) -> usize {
        self.counts[Self::slot(tag)]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Tag with the most votes; ties go to `str > float > int > bool`.
    /// A column without votes is `str`.
    pub fn winner(&self) -> TypeTag {
        TypeTag::ALL
            .into_iter()
            .filter(|tag| self.count(*tag) > 0)
            .max_by_key(|tag| (self.count(*tag), tag.tie_rank()))
            .unwrap_or(TypeTag::Str)
    }
}

impl FromIterator<TypeTag> for ColumnVotes {
    fn from_iter<I: IntoIterator<Item = TypeTag>>(iter: I) -> Self {
        let mut votes = Self::default();
        for tag in iter {
            votes.record(tag);
        }
        votes
    }
}

/// Majority type of a single column's tags.
pub fn majority_type<I>(votes: I) -> TypeTag
where
    I: IntoIterator<Item = TypeTag>,
{
    votes.into_iter().collect::<ColumnVotes>().winner()
}

/// Infer one expected type per column.
///
/// Rows without a value in a column cast no vote for it; fields beyond the
/// column count are ignored.
pub fn infer_schema(rows: &[Row], column_count: usize) -> Schema {
    let mut votes = vec![ColumnVotes::default(); column_count];
    for row in rows {
        for (column, field) in votes.iter_mut().zip(&row.fields) {
            column.record(field.tag());
        }
    }
    let types: Vec<TypeTag> = votes
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let winner = column.winner();
            debug!(
                column = index + 1,
                votes = column.total(),
                expected = %winner,
                "inferred column type"
            );
            winner
        })
        .collect();
    Schema::new(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plurality_wins() {
        let votes = [
            TypeTag::Int,
            TypeTag::Int,
            TypeTag::Str,
            TypeTag::Int,
            TypeTag::Float,
            TypeTag::Int,
            TypeTag::Int,
        ];
        assert_eq!(majority_type(votes), TypeTag::Int);
    }

    #[test]
    fn ties_prefer_least_restrictive() {
        assert_eq!(majority_type([TypeTag::Int, TypeTag::Str]), TypeTag::Str);
        assert_eq!(majority_type([TypeTag::Int, TypeTag::Float]), TypeTag::Float);
        assert_eq!(majority_type([TypeTag::Bool, TypeTag::Int]), TypeTag::Int);
    }

    #[test]
    fn no_votes_defaults_to_str() {
        assert_eq!(majority_type(Vec::<TypeTag>::new()), TypeTag::Str);
        let schema = infer_schema(&[], 2);
        assert_eq!(schema.types(), &[TypeTag::Str, TypeTag::Str]);
    }

    #[test]
    fn short_rows_cast_no_vote() {
        let rows = vec![
            Row::from_values(1, ["a", "1"]),
            Row::from_values(2, ["b"]),
            Row::from_values(3, ["c", "2", "extra"]),
        ];
        let schema = infer_schema(&rows, 2);
        assert_eq!(schema.types(), &[TypeTag::Str, TypeTag::Int]);
    }
}
