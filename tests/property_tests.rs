use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use stockdesk_api::models::AdjustmentDraft;

#[derive(Debug, Clone)]
enum Op {
    Add { quantity: u32, unit_cost: u32 },
    Remove { index: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..1000, 0u32..10_000).prop_map(|(quantity, unit_cost)| Op::Add {
            quantity,
            unit_cost
        }),
        (0usize..32).prop_map(|index| Op::Remove { index }),
    ]
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
}

proptest! {
    /// After any sequence of adds and removes, item numbers are exactly the
    /// contiguous sequence 1..N in original relative order.
    #[test]
    fn item_numbers_stay_contiguous(ops in proptest::collection::vec(op_strategy(), 1..64)) {
        let mut draft = AdjustmentDraft::new(today());
        let mut next_article_id: i64 = 1;
        // Shadow list of article ids, in the order they should survive
        let mut expected_articles: Vec<i64> = Vec::new();

        for op in ops {
            match op {
                Op::Add { quantity, unit_cost } => {
                    draft
                        .add_line(
                            next_article_id,
                            Decimal::from(quantity),
                            Decimal::from(unit_cost),
                        )
                        .unwrap();
                    expected_articles.push(next_article_id);
                    next_article_id += 1;
                }
                Op::Remove { index } => {
                    if index < expected_articles.len() {
                        draft.remove_line(index).unwrap();
                        expected_articles.remove(index);
                    } else {
                        prop_assert!(draft.remove_line(index).is_err());
                    }
                }
            }

            let numbers: Vec<u32> = draft.lines().iter().map(|l| l.item_number).collect();
            let expected_numbers: Vec<u32> = (1..=draft.lines().len() as u32).collect();
            prop_assert_eq!(numbers, expected_numbers);

            let articles: Vec<i64> = draft.lines().iter().map(|l| l.article_id).collect();
            prop_assert_eq!(&articles, &expected_articles);
        }
    }

    /// The running total always equals the sum over the surviving lines and
    /// is stable across repeated computation.
    #[test]
    fn total_matches_the_line_sum(ops in proptest::collection::vec(op_strategy(), 1..64)) {
        let mut draft = AdjustmentDraft::new(today());
        let mut article_id: i64 = 1;

        for op in ops {
            match op {
                Op::Add { quantity, unit_cost } => {
                    draft
                        .add_line(article_id, Decimal::from(quantity), Decimal::from(unit_cost))
                        .unwrap();
                    article_id += 1;
                }
                Op::Remove { index } => {
                    let _ = draft.remove_line(index);
                }
            }
        }

        let expected: Decimal = draft
            .lines()
            .iter()
            .map(|l| l.quantity * l.unit_cost)
            .sum();
        prop_assert_eq!(draft.total(), expected);
        prop_assert_eq!(draft.total(), draft.total());
    }
}
