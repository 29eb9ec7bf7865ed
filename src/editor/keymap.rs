/// Arrow direction for focus commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    InsertBelow,
    Indent,
    Outdent,
    DeleteIfEmpty,
    Focus(Direction),
}

/// The parts of a keydown event the keymap looks at.
#[derive(Clone, Copy, Debug)]
pub struct KeyInput<'a> {
    /// `KeyboardEvent.key`
    pub key: &'a str,
    pub shift: bool,
    /// IME composition in progress.
    pub composing: bool,
}

/// Map a keystroke in a node's input to an engine command.
///
/// `None` means the browser keeps the key (typing, Shift+Enter line breaks, plain arrows).
pub fn command_for_key(input: KeyInput<'_>, text_is_empty: bool) -> Option<Command> {
    if input.composing {
        return None;
    }

    match (input.key, input.shift) {
        ("Enter", false) => Some(Command::InsertBelow),
        ("Tab", false) => Some(Command::Indent),
        ("Tab", true) => Some(Command::Outdent),
        ("Backspace", _) if text_is_empty => Some(Command::DeleteIfEmpty),
        ("ArrowUp", true) => Some(Command::Focus(Direction::Up)),
        ("ArrowDown", true) => Some(Command::Focus(Direction::Down)),
        ("ArrowLeft", true) => Some(Command::Focus(Direction::Left)),
        ("ArrowRight", true) => Some(Command::Focus(Direction::Right)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: &str, shift: bool) -> KeyInput<'_> {
        KeyInput {
            key,
            shift,
            composing: false,
        }
    }

    #[test]
    fn test_structural_keys() {
        assert_eq!(command_for_key(key("Enter", false), false), Some(Command::InsertBelow));
        assert_eq!(command_for_key(key("Enter", true), false), None);
        assert_eq!(command_for_key(key("Tab", false), false), Some(Command::Indent));
        assert_eq!(command_for_key(key("Tab", true), false), Some(Command::Outdent));
    }

    #[test]
    fn test_backspace_only_when_empty() {
        assert_eq!(command_for_key(key("Backspace", false), true), Some(Command::DeleteIfEmpty));
        assert_eq!(command_for_key(key("Backspace", false), false), None);
    }

    #[test]
    fn test_shift_arrows_navigate() {
        assert_eq!(
            command_for_key(key("ArrowUp", true), false),
            Some(Command::Focus(Direction::Up))
        );
        assert_eq!(
            command_for_key(key("ArrowRight", true), true),
            Some(Command::Focus(Direction::Right))
        );
        assert_eq!(command_for_key(key("ArrowDown", false), false), None);
    }

    #[test]
    fn test_composition_swallows_everything() {
        let input = KeyInput {
            key: "Enter",
            shift: false,
            composing: true,
        };
        assert_eq!(command_for_key(input, true), None);
    }
}
