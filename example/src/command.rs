//! Typed commands read from the terminal.

use chronogrid::{DateTimePicker, Lateral, PickerKey};

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A picker key, e.g. `ArrowLeft` or `Enter`.
    Key(PickerKey),
    /// Activate the cell at `row`, `column` (zero-based).
    Pick(usize, usize),
    /// The up button.
    Up,
    /// The left or right button.
    Lateral(Lateral),
    /// Clear the value.
    Clear,
    /// Print the help text.
    Help,
    /// Leave the loop.
    Quit,
}

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  h j k l          move left, down, up, right
  pgup pgdn        previous or next page (keys: PageUp, PageDown)
  home end         first or last cell
  enter            activate the active cell
  pick ROW COL     activate a cell by position
  up | < | >       navigation buttons
  clear            clear the value
  help | quit";

impl Command {
    /// Parses one input line. Returns `None` for unrecognized input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let head = words.next()?;
        let command = match head.to_ascii_lowercase().as_str() {
            "h" => Command::Key(PickerKey::ArrowLeft),
            "j" => Command::Key(PickerKey::ArrowDown),
            "k" => Command::Key(PickerKey::ArrowUp),
            "l" => Command::Key(PickerKey::ArrowRight),
            "pgup" => Command::Key(PickerKey::PageUp),
            "pgdn" => Command::Key(PickerKey::PageDown),
            "home" => Command::Key(PickerKey::Home),
            "end" => Command::Key(PickerKey::End),
            "enter" => Command::Key(PickerKey::Enter),
            "up" | "^" => Command::Up,
            "<" => Command::Lateral(Lateral::Left),
            ">" => Command::Lateral(Lateral::Right),
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            "pick" => {
                let row = words.next()?.parse().ok()?;
                let column = words.next()?.parse().ok()?;
                Command::Pick(row, column)
            }
            _ => return head.parse().ok().map(Command::Key),
        };
        Some(command)
    }

    /// Applies the command. Returns false if it could not be applied.
    pub fn apply(self, picker: &mut DateTimePicker) -> bool {
        match self {
            Command::Key(key) => picker.handle_key(key).handled,
            Command::Pick(row, column) => {
                let view = picker.view_model();
                let Some(cell) = view.grid.get(row).and_then(|cells| cells.get(column)) else {
                    return false;
                };
                picker.on_cell_activate(cell.instant);
                true
            }
            Command::Up => {
                let before = picker.granularity();
                picker.on_ascend();
                before != picker.granularity()
            }
            Command::Lateral(lateral) => {
                picker.on_lateral_navigate(lateral);
                true
            }
            Command::Clear => {
                picker.set_value(None);
                true
            }
            Command::Help | Command::Quit => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use chronogrid::{FixedClock, Granularity, Instant, PickerConfig, Zone};

    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("l"), Some(Command::Key(PickerKey::ArrowRight)));
        assert_eq!(Command::parse("pick 2 3"), Some(Command::Pick(2, 3)));
        assert_eq!(Command::parse("PageDown"), Some(Command::Key(PickerKey::PageDown)));
        assert_eq!(Command::parse(">"), Some(Command::Lateral(Lateral::Right)));
        assert_eq!(Command::parse("pick 2"), None);
        assert_eq!(Command::parse("   "), None);
        assert_eq!(Command::parse("dance"), None);
    }

    #[test]
    fn test_apply() {
        let now = Instant::from_millis(1_704_460_800_000);
        let mut picker =
            DateTimePicker::new(PickerConfig::default().zone(Zone::Utc).clock(FixedClock(now)));

        assert!(Command::Pick(1, 5).apply(&mut picker));
        assert_eq!(picker.granularity(), Granularity::Day);
        assert!(!Command::Pick(9, 9).apply(&mut picker));
        assert!(Command::Up.apply(&mut picker));
        assert!(Command::Up.apply(&mut picker));
        assert!(Command::Up.apply(&mut picker));
        assert!(!Command::Up.apply(&mut picker));
        assert_eq!(picker.granularity(), Granularity::Decade);
    }
}
