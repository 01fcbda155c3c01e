use super::dropdown::Phase;

/// Keys the widget reacts to, independent of the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Tab,
    Backspace,
    /// A single printable character
    Char(char),
    Other,
}

/// What the navigator needs to know beyond the dropdown phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavContext {
    /// Length of the current visible-option list
    pub visible: usize,
    /// Current highlight, already validated against `visible`
    pub highlighted: Option<usize>,
    pub input_empty: bool,
}

/// State transition requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    HighlightNext,
    HighlightPrev,
    /// Select-or-create the visible option at this index
    Activate(usize),
    /// Enter with nothing highlighted: exact match or create from the query
    Submit,
    RemoveLast,
    Ignore,
}

/// Transition table for the dropdown.
///
/// | phase  | key                 | command                          |
/// |--------|---------------------|----------------------------------|
/// | Closed | ArrowDown, Char     | Open                             |
/// | Open   | ArrowDown / ArrowUp | HighlightNext / HighlightPrev    |
/// | Open   | Escape, Tab         | Close                            |
/// | any    | Enter               | Activate(highlight) or Submit    |
/// | any    | Backspace (empty)   | RemoveLast                       |
pub fn navigate(phase: Phase, key: Key, ctx: NavContext) -> Command {
    match (phase, key) {
        (Phase::Closed, Key::ArrowDown) => Command::Open,
        (Phase::Open, Key::ArrowDown) if ctx.visible > 0 => Command::HighlightNext,
        (Phase::Open, Key::ArrowUp) if ctx.visible > 0 => Command::HighlightPrev,
        (Phase::Open, Key::Escape | Key::Tab) => Command::Close,
        (Phase::Open, Key::Enter) => match ctx.highlighted {
            Some(i) if i < ctx.visible => Command::Activate(i),
            _ => Command::Submit,
        },
        (Phase::Closed, Key::Enter) => Command::Submit,
        (_, Key::Backspace) if ctx.input_empty => Command::RemoveLast,
        (Phase::Closed, Key::Char(_)) => Command::Open,
        _ => Command::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(visible: usize, highlighted: Option<usize>) -> NavContext {
        NavContext {
            visible,
            highlighted,
            input_empty: false,
        }
    }

    #[test]
    fn test_closed_opens_on_down_or_char() {
        assert_eq!(navigate(Phase::Closed, Key::ArrowDown, ctx(0, None)), Command::Open);
        assert_eq!(navigate(Phase::Closed, Key::Char('a'), ctx(0, None)), Command::Open);
        assert_eq!(navigate(Phase::Closed, Key::ArrowUp, ctx(3, None)), Command::Ignore);
        assert_eq!(navigate(Phase::Closed, Key::Escape, ctx(3, None)), Command::Ignore);
    }

    #[test]
    fn test_open_arrows() {
        assert_eq!(
            navigate(Phase::Open, Key::ArrowDown, ctx(3, None)),
            Command::HighlightNext
        );
        assert_eq!(
            navigate(Phase::Open, Key::ArrowUp, ctx(3, Some(1))),
            Command::HighlightPrev
        );
        assert_eq!(navigate(Phase::Open, Key::ArrowDown, ctx(0, None)), Command::Ignore);
    }

    #[test]
    fn test_open_close_keys() {
        assert_eq!(navigate(Phase::Open, Key::Escape, ctx(1, None)), Command::Close);
        assert_eq!(navigate(Phase::Open, Key::Tab, ctx(1, None)), Command::Close);
        assert_eq!(navigate(Phase::Open, Key::Char('x'), ctx(1, None)), Command::Ignore);
    }

    #[test]
    fn test_enter() {
        assert_eq!(
            navigate(Phase::Open, Key::Enter, ctx(2, Some(1))),
            Command::Activate(1)
        );
        assert_eq!(navigate(Phase::Open, Key::Enter, ctx(2, None)), Command::Submit);
        assert_eq!(navigate(Phase::Open, Key::Enter, ctx(1, Some(4))), Command::Submit);
        assert_eq!(navigate(Phase::Closed, Key::Enter, ctx(0, None)), Command::Submit);
    }

    #[test]
    fn test_backspace_only_on_empty_input() {
        let empty = NavContext {
            visible: 0,
            highlighted: None,
            input_empty: true,
        };
        assert_eq!(navigate(Phase::Open, Key::Backspace, empty), Command::RemoveLast);
        assert_eq!(navigate(Phase::Closed, Key::Backspace, empty), Command::RemoveLast);
        assert_eq!(navigate(Phase::Open, Key::Backspace, ctx(0, None)), Command::Ignore);
    }
}
