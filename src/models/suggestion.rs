//! Cursor protocol for autocomplete suggestion lists: a highlighted index
//! bounded to [-1, len-1], where -1 (modelled as `None`) means nothing is
//! highlighted and Enter falls through to full term resolution.

/// What an Enter keypress should do given the current highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionAction {
    /// Pick the suggestion at this index.
    Select(usize),
    /// Nothing highlighted: run the full resolve algorithm on the typed term.
    ResolveFull,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionCursor {
    len: usize,
    highlighted: Option<usize>,
}

impl SuggestionCursor {
    /// Cursor over a fresh suggestion list; nothing highlighted yet.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            highlighted: None,
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Replaces the backing list (the user kept typing). The highlight resets.
    pub fn replace(&mut self, len: usize) {
        self.len = len;
        self.highlighted = None;
    }

    /// ArrowDown: move the highlight down, clamped to the last entry.
    pub fn move_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(self.len - 1),
        });
    }

    /// ArrowUp: move the highlight up; from the first entry it clears back
    /// to the no-highlight state.
    pub fn move_up(&mut self) {
        self.highlighted = match self.highlighted {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Enter: select the highlighted suggestion, or resolve the raw term.
    pub fn enter(&self) -> SuggestionAction {
        match self.highlighted {
            Some(i) => SuggestionAction::Select(i),
            None => SuggestionAction::ResolveFull,
        }
    }

    /// Escape: dismiss the list entirely.
    pub fn dismiss(&mut self) {
        self.len = 0;
        self.highlighted = None;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
