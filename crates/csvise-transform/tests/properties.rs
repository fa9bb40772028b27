use proptest::prelude::*;

use csvise_model::{Row, Schema, Table, TypeTag};
use csvise_transform::{CleaningStep, DateFormat, FillStrategy};

fn table_strategy() -> impl Strategy<Value = Table> {
    let row = prop::collection::vec("[ab ]{0,3}|[0-9]{1,2}|0?[1-9]/[12][0-9]/20[0-9]{2}", 0..4);
    prop::collection::vec(row, 0..12).prop_map(|rows| {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, values)| Row::from_values(idx + 1, values))
            .collect();
        Table::new(
            vec!["a".into(), "b".into(), "c".into()],
            &Schema::new(vec![TypeTag::Str, TypeTag::Int, TypeTag::Str]),
            rows,
            ",",
        )
    })
}

fn steps() -> Vec<CleaningStep> {
    vec![
        CleaningStep::RemoveDuplicates { columns: None },
        CleaningStep::RemoveDuplicates {
            columns: Some(vec!["a".into()]),
        },
        CleaningStep::NormalizeWhitespace { columns: None },
        CleaningStep::StandardizeCase {
            style: csvise_model::CaseStyle::Sentence,
            columns: None,
        },
        CleaningStep::FillMissing {
            strategy: FillStrategy::Mode,
            columns: None,
        },
        CleaningStep::FillMissing {
            strategy: FillStrategy::Mean,
            columns: Some(vec!["b".into()]),
        },
        CleaningStep::RemoveEmptyRows { threshold: 0.5 },
        CleaningStep::NormalizeDates {
            columns: vec!["a".into(), "c".into()],
            format: DateFormat::Eu,
        },
    ]
}

proptest! {
    #[test]
    fn every_step_is_idempotent(table in table_strategy()) {
        for step in steps() {
            let once = step.apply(&table).expect("step applies");
            let twice = step.apply(&table.with_rows(once.rows.clone())).expect("step applies");
            prop_assert_eq!(&twice.rows, &once.rows, "{}", step);
        }
    }

    #[test]
    fn dedupe_keeps_first_occurrences_in_order(table in table_strategy()) {
        let out = CleaningStep::RemoveDuplicates { columns: None }.apply(&table).expect("dedupe");
        let positions: Vec<usize> = out.rows.iter().map(|r| r.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
        prop_assert_eq!(out.rows.len() + out.rows_removed, table.row_count());
    }
}
