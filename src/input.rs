use crossterm::event::{poll, read, Event, KeyCode};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crate::interpreter::NUM_KEYS;

/// keypad layout on the left-hand side of a qwerty keyboard,
/// where '1' => 0x01 and 'z' => 0x0a
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// how many polls a key stays held after its press event. Terminals
/// deliver key presses only, never releases, so a press has to decay
/// on its own
const KEY_HOLD_POLLS: u8 = 6;

/// reads keypresses
pub trait Input {
    /// drain pending key events and refresh the held-key states
    fn poll_keys(&mut self) -> Result<(), io::Error>;

    /// held state of the sixteen keypad keys
    fn keys(&self) -> [bool; NUM_KEYS];

    /// whether the user asked to leave the emulator
    fn quit_requested(&self) -> bool;
}

/// Input implementation reading the terminal via crossterm. Puts the
/// terminal into raw mode for its lifetime.
pub struct TermInput {
    hold: [u8; NUM_KEYS],
    keymap: HashMap<char, u8>,
    quit: bool,
}

impl TermInput {
    pub fn new() -> Result<TermInput, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TermInput {
            hold: [0; NUM_KEYS],
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            quit: false,
        })
    }
}

impl Drop for TermInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for TermInput {
    fn poll_keys(&mut self) -> Result<(), io::Error> {
        for held in self.hold.iter_mut() {
            *held = held.saturating_sub(1);
        }
        while poll(Duration::from_millis(0))? {
            if let Event::Key(evt) = read()? {
                match evt.code {
                    KeyCode::Char(key) => match self.keymap.get(&key) {
                        Some(&mapped) => self.hold[mapped as usize] = KEY_HOLD_POLLS,
                        None => eprintln!("Warning: can't map {:?} to a keypad key", key),
                    },
                    KeyCode::Esc => self.quit = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn keys(&self) -> [bool; NUM_KEYS] {
        let mut keys = [false; NUM_KEYS];
        for (key, held) in keys.iter_mut().zip(self.hold.iter()) {
            *key = *held > 0;
        }
        keys
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// dummy Input implementation for testing
pub struct DummyInput {
    keys: [bool; NUM_KEYS],
}

impl DummyInput {
    pub fn new(pressed: &[u8]) -> Self {
        let mut keys = [false; NUM_KEYS];
        for &key in pressed {
            keys[(key & 0x0f) as usize] = true;
        }
        DummyInput { keys }
    }
}

impl Input for DummyInput {
    fn poll_keys(&mut self) -> Result<(), io::Error> {
        Ok(())
    }

    fn keys(&self) -> [bool; NUM_KEYS] {
        self.keys
    }

    fn quit_requested(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_the_whole_keypad() {
        let mut codes: Vec<u8> = CHIP8_CONVENTIONAL_KEYMAP.iter().map(|&(_, c)| c).collect();
        codes.sort_unstable();
        let expected: Vec<u8> = (0..16).collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn test_keymap_chars_are_distinct() {
        let map = HashMap::from(CHIP8_CONVENTIONAL_KEYMAP);
        assert_eq!(map.len(), 16);
    }

    #[test]
    fn test_dummy_input_reports_pressed_keys() {
        let input = DummyInput::new(&[0x1, 0xb]);
        let keys = input.keys();
        assert!(keys[0x1]);
        assert!(keys[0xb]);
        assert_eq!(keys.iter().filter(|&&k| k).count(), 2);
        assert!(!input.quit_requested());
    }
}
