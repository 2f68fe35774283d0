use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Heading;

/// Discrete commands delivered to the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Direction(Heading),
    TogglePause,
    Start,
    Quit,
}

/// Source of player commands.
pub trait InputSource {
    /// Waits at most `timeout` for the next command.
    fn poll_command(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Keyboard input read through crossterm.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(command_for_key(key)),
            _ => Ok(None),
        }
    }
}

/// Maps a key press to a command. Releases and repeats map to nothing.
#[must_use]
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::Direction(Heading::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::Direction(Heading::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(Command::Direction(Heading::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Command::Direction(Heading::Right)),
        KeyCode::Char(' ' | 'p') => Some(Command::TogglePause),
        KeyCode::Char('s') | KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use crate::snake::Heading;

    use super::{Command, command_for_key};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_map_to_headings() {
        assert_eq!(
            command_for_key(press(KeyCode::Up)),
            Some(Command::Direction(Heading::Up))
        );
        assert_eq!(
            command_for_key(press(KeyCode::Down)),
            Some(Command::Direction(Heading::Down))
        );
        assert_eq!(
            command_for_key(press(KeyCode::Left)),
            Some(Command::Direction(Heading::Left))
        );
        assert_eq!(
            command_for_key(press(KeyCode::Right)),
            Some(Command::Direction(Heading::Right))
        );
    }

    #[test]
    fn space_pauses_and_s_starts() {
        assert_eq!(
            command_for_key(press(KeyCode::Char(' '))),
            Some(Command::TogglePause)
        );
        assert_eq!(
            command_for_key(press(KeyCode::Char('s'))),
            Some(Command::Start)
        );
        assert_eq!(command_for_key(press(KeyCode::Enter)), Some(Command::Start));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(command_for_key(press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(command_for_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(command_for_key(release), None);
        assert_eq!(command_for_key(press(KeyCode::Char('x'))), None);
    }
}
