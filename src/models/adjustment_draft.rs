//! In-memory adjustment document under construction: header fields plus an
//! ordered list of line items. The draft is exclusively owned by one workflow
//! session; nothing here touches the database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Stock sign of an adjustment document.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentKind {
    #[serde(rename = "POSITIVE")]
    Positive,
    #[serde(rename = "NEGATIVE")]
    Negative,
}

impl AdjustmentKind {
    /// Multiplier applied to line quantities when mutating stock.
    pub fn sign(self) -> Decimal {
        match self {
            AdjustmentKind::Positive => Decimal::ONE,
            AdjustmentKind::Negative => Decimal::NEGATIVE_ONE,
        }
    }
}

/// Rejections raised while building or validating a draft. These surface as
/// user-visible warnings, never panics. The submit-validation variants are
/// reported first-violation-wins in the order branch, warehouse, reason,
/// lines, then the remaining identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("select an article before adding the item")]
    MissingArticle,
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,
    #[error("unit cost cannot be negative")]
    NegativeUnitCost,
    #[error("no line item at position {0}")]
    NoSuchLine(usize),
    #[error("document number is already assigned")]
    NumberAlreadyAssigned,
    #[error("branch is required")]
    MissingBranch,
    #[error("warehouse is required")]
    MissingWarehouse,
    #[error("adjustment reason is required")]
    MissingReason,
    #[error("the document has no line items")]
    EmptyLines,
    #[error("user is required")]
    MissingUser,
    #[error("currency is required")]
    MissingCurrency,
}

/// One line of a draft. `item_number` is 1-based and kept contiguous by the
/// draft on every removal.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub article_id: i64,
    pub item_number: u32,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

impl DraftLine {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentDraft {
    pub branch_id: i64,
    pub warehouse_id: i64,
    pub user_id: i64,
    pub currency_id: i64,
    pub reason_id: i64,
    document_number: Option<i64>,
    pub document_date: NaiveDate,
    pub exchange_rate: Decimal,
    pub kind: AdjustmentKind,
    pub observation: Option<String>,
    lines: Vec<DraftLine>,
}

impl AdjustmentDraft {
    /// Blank draft with header defaults: today's date, exchange rate 1,
    /// positive kind, no lines, no number.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            branch_id: 0,
            warehouse_id: 0,
            user_id: 0,
            currency_id: 0,
            reason_id: 0,
            document_number: None,
            document_date: today,
            exchange_rate: Decimal::ONE,
            kind: AdjustmentKind::Positive,
            observation: None,
            lines: Vec::new(),
        }
    }

    pub fn document_number(&self) -> Option<i64> {
        self.document_number
    }

    /// Records the issued document number. Assignable at most once; the
    /// number is immutable afterwards.
    pub fn assign_number(&mut self, number: i64) -> Result<(), DraftError> {
        if self.document_number.is_some() {
            return Err(DraftError::NumberAlreadyAssigned);
        }
        self.document_number = Some(number);
        Ok(())
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Appends a line with `item_number = len + 1` and returns that number.
    /// Rejects an unset article or a non-positive quantity.
    pub fn add_line(
        &mut self,
        article_id: i64,
        quantity: Decimal,
        unit_cost: Decimal,
    ) -> Result<u32, DraftError> {
        if article_id == 0 {
            return Err(DraftError::MissingArticle);
        }
        if quantity <= Decimal::ZERO {
            return Err(DraftError::NonPositiveQuantity);
        }
        if unit_cost < Decimal::ZERO {
            return Err(DraftError::NegativeUnitCost);
        }
        let item_number = self.lines.len() as u32 + 1;
        self.lines.push(DraftLine {
            article_id,
            item_number,
            quantity,
            unit_cost,
        });
        Ok(item_number)
    }

    /// Removes the line at `index` (0-based) and renumbers the remaining
    /// lines so item numbers stay the contiguous sequence 1..N.
    pub fn remove_line(&mut self, index: usize) -> Result<DraftLine, DraftError> {
        if index >= self.lines.len() {
            return Err(DraftError::NoSuchLine(index));
        }
        let removed = self.lines.remove(index);
        for (position, line) in self.lines.iter_mut().enumerate() {
            line.item_number = position as u32 + 1;
        }
        Ok(removed)
    }

    /// Document total: Σ(quantity × unit_cost). Pure; safe to call repeatedly.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(DraftLine::line_total).sum()
    }

    /// Clears back to a blank draft. Used for explicit cancel and for
    /// post-submit cleanup.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Pre-submit validation, fail-fast with the first violation. The order
    /// is part of the contract: branch, warehouse, reason, line items, then
    /// the remaining identifier fields.
    pub fn validate_for_submit(&self) -> Result<(), DraftError> {
        if self.branch_id == 0 {
            return Err(DraftError::MissingBranch);
        }
        if self.warehouse_id == 0 {
            return Err(DraftError::MissingWarehouse);
        }
        if self.reason_id == 0 {
            return Err(DraftError::MissingReason);
        }
        if self.lines.is_empty() {
            return Err(DraftError::EmptyLines);
        }
        if self.user_id == 0 {
            return Err(DraftError::MissingUser);
        }
        if self.currency_id == 0 {
            return Err(DraftError::MissingCurrency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn draft_with_lines(count: usize) -> AdjustmentDraft {
        let mut draft = AdjustmentDraft::new(today());
        for i in 0..count {
            draft
                .add_line(i as i64 + 100, dec!(1), dec!(2.50))
                .expect("line should be accepted");
        }
        draft
    }

    fn item_numbers(draft: &AdjustmentDraft) -> Vec<u32> {
        draft.lines().iter().map(|l| l.item_number).collect()
    }

    #[test]
    fn new_draft_has_documented_defaults() {
        let draft = AdjustmentDraft::new(today());
        assert_eq!(draft.document_date, today());
        assert_eq!(draft.exchange_rate, Decimal::ONE);
        assert_eq!(draft.kind, AdjustmentKind::Positive);
        assert!(draft.lines().is_empty());
        assert_eq!(draft.document_number(), None);
    }

    #[test]
    fn add_line_appends_with_next_item_number() {
        let draft = draft_with_lines(3);
        assert_eq!(item_numbers(&draft), vec![1, 2, 3]);
    }

    #[test]
    fn add_line_rejects_unset_article_and_bad_quantities() {
        let mut draft = AdjustmentDraft::new(today());
        assert_eq!(
            draft.add_line(0, dec!(1), dec!(1)).unwrap_err(),
            DraftError::MissingArticle
        );
        assert_eq!(
            draft.add_line(7, dec!(0), dec!(1)).unwrap_err(),
            DraftError::NonPositiveQuantity
        );
        assert_eq!(
            draft.add_line(7, dec!(-2), dec!(1)).unwrap_err(),
            DraftError::NonPositiveQuantity
        );
        assert_eq!(
            draft.add_line(7, dec!(1), dec!(-0.01)).unwrap_err(),
            DraftError::NegativeUnitCost
        );
        assert!(draft.lines().is_empty());
    }

    #[test]
    fn remove_line_renumbers_contiguously() {
        let mut draft = draft_with_lines(5);
        draft.remove_line(2).unwrap();
        assert_eq!(item_numbers(&draft), vec![1, 2, 3, 4]);

        // Relative order of the survivors is preserved
        let articles: Vec<i64> = draft.lines().iter().map(|l| l.article_id).collect();
        assert_eq!(articles, vec![100, 101, 103, 104]);

        draft.remove_line(0).unwrap();
        draft.remove_line(2).unwrap();
        assert_eq!(item_numbers(&draft), vec![1, 2]);
    }

    #[test]
    fn remove_line_rejects_out_of_range_index() {
        let mut draft = draft_with_lines(1);
        assert_eq!(draft.remove_line(5).unwrap_err(), DraftError::NoSuchLine(5));
    }

    #[test]
    fn total_is_exact_and_idempotent() {
        let mut draft = AdjustmentDraft::new(today());
        draft.add_line(1, dec!(5), dec!(10.50)).unwrap();
        draft.add_line(2, dec!(3), dec!(0.10)).unwrap();

        let first = draft.total();
        let second = draft.total();
        assert_eq!(first, dec!(52.80));
        assert_eq!(first, second);
    }

    #[test]
    fn document_number_is_assignable_exactly_once() {
        let mut draft = AdjustmentDraft::new(today());
        draft.assign_number(42).unwrap();
        assert_eq!(draft.document_number(), Some(42));
        assert_eq!(
            draft.assign_number(43).unwrap_err(),
            DraftError::NumberAlreadyAssigned
        );
        assert_eq!(draft.document_number(), Some(42));
    }

    #[test]
    fn validation_reports_first_violation_in_contract_order() {
        // Missing branch AND empty lines: branch wins
        let mut draft = AdjustmentDraft::new(today());
        draft.user_id = 9;
        draft.currency_id = 1;
        assert_eq!(
            draft.validate_for_submit().unwrap_err(),
            DraftError::MissingBranch
        );

        draft.branch_id = 1;
        assert_eq!(
            draft.validate_for_submit().unwrap_err(),
            DraftError::MissingWarehouse
        );

        draft.warehouse_id = 2;
        assert_eq!(
            draft.validate_for_submit().unwrap_err(),
            DraftError::MissingReason
        );

        draft.reason_id = 3;
        assert_eq!(
            draft.validate_for_submit().unwrap_err(),
            DraftError::EmptyLines
        );

        draft.add_line(77, dec!(1), dec!(1)).unwrap();
        assert!(draft.validate_for_submit().is_ok());
    }

    #[test]
    fn reset_returns_to_blank_state() {
        let mut draft = draft_with_lines(2);
        draft.branch_id = 1;
        draft.assign_number(42).unwrap();
        draft.reset(today());

        assert!(draft.lines().is_empty());
        assert_eq!(draft.document_number(), None);
        assert_eq!(draft.branch_id, 0);
        assert_eq!(draft.kind, AdjustmentKind::Positive);
    }

    #[test]
    fn kind_round_trips_through_strings() {
        assert_eq!(AdjustmentKind::Positive.to_string(), "POSITIVE");
        assert_eq!(
            "NEGATIVE".parse::<AdjustmentKind>().unwrap(),
            AdjustmentKind::Negative
        );
        assert_eq!(AdjustmentKind::Negative.sign(), dec!(-1));
    }
}
