/// Whether the option panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open,
}

/// Open/closed flag plus the highlighted index into the current visible-option list.
///
/// `highlighted` is `None` or a valid index into the list it was computed
/// against; anything that changes that list must call [`clear_highlight`].
///
/// [`clear_highlight`]: DropdownState::clear_highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropdownState {
    phase: Phase,
    highlighted: Option<usize>,
}

impl DropdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Closed → Open. Returns false if already open.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.phase = Phase::Open;
        self.highlighted = None;
        true
    }

    /// Open → Closed. Returns false if already closed.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.phase = Phase::Closed;
        self.highlighted = None;
        true
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Move forward with wraparound: `(i + 1) mod n`, starting at 0.
    pub fn highlight_next(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + 1) % visible,
            None => 0,
        });
    }

    /// Move backward with wraparound: from 0 or nothing to `n - 1`.
    pub fn highlight_prev(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i > 0 && i <= visible => i - 1,
            _ => visible - 1,
        });
    }

    /// Set the highlight to `index` if it is inside the visible list
    pub fn hover(&mut self, index: usize, visible: usize) -> bool {
        if index < visible {
            self.highlighted = Some(index);
            true
        } else {
            false
        }
    }

    /// Highlighted index, if still valid for a list of `visible` entries
    pub fn valid_highlight(&self, visible: usize) -> Option<usize> {
        self.highlighted.filter(|&i| i < visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_reset_highlight() {
        let mut dd = DropdownState::new();
        assert!(dd.open());
        assert!(!dd.open());
        dd.highlight_next(3);
        assert_eq!(dd.highlighted(), Some(0));
        assert!(dd.close());
        assert_eq!(dd.highlighted(), None);
        assert!(!dd.close());
    }

    #[test]
    fn test_wraparound() {
        let mut dd = DropdownState::new();
        dd.open();
        dd.hover(2, 3);
        dd.highlight_next(3);
        assert_eq!(dd.highlighted(), Some(0));
        dd.highlight_prev(3);
        assert_eq!(dd.highlighted(), Some(2));
    }

    #[test]
    fn test_prev_from_nothing_goes_to_last() {
        let mut dd = DropdownState::new();
        dd.highlight_prev(4);
        assert_eq!(dd.highlighted(), Some(3));
    }

    #[test]
    fn test_empty_list_is_noop() {
        let mut dd = DropdownState::new();
        dd.highlight_next(0);
        dd.highlight_prev(0);
        assert_eq!(dd.highlighted(), None);
        assert!(!dd.hover(0, 0));
    }

    #[test]
    fn test_valid_highlight_bounds() {
        let mut dd = DropdownState::new();
        dd.hover(2, 3);
        assert_eq!(dd.valid_highlight(3), Some(2));
        assert_eq!(dd.valid_highlight(2), None);
    }
}
