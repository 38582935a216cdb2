pub mod adjustment_draft;
pub mod document_number;
pub mod suggestion;

pub use adjustment_draft::{AdjustmentDraft, AdjustmentKind, DraftError, DraftLine};
pub use document_number::DocumentNumber;
pub use suggestion::{SuggestionAction, SuggestionCursor};
