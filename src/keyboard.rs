//! On-screen keyboard model
//!
//! Holds the clickable key grid, the character to key mapping and the
//! transient success/failure tint of every key. Rendering lives in
//! `ui::keyboard`; both sides share the geometry defined here.

use crate::session::Outcome;
use ratatui::layout::Rect;
use std::collections::HashMap;

/// Width of a regular key in cells
pub const KEY_WIDTH: u16 = 4;
/// Gap between neighbouring keys
pub const KEY_GAP: u16 = 1;
/// Rows the grid occupies
pub const GRID_HEIGHT: u16 = 5;
/// Columns needed to draw the widest row
pub const GRID_WIDTH: u16 = 1 + 12 * (KEY_WIDTH + KEY_GAP);

const SPACE_INDENT: u16 = 12;
const SPACE_WIDTH: u16 = 6 * (KEY_WIDTH + KEY_GAP) - KEY_GAP;

/// Index of a key in the grid, resolved once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyTint {
    #[default]
    Idle,
    Success,
    Failure,
}

impl KeyTint {
    /// Flash colour for a submit outcome; ignored submits are not shown
    pub fn for_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Correct => Some(KeyTint::Success),
            Outcome::Incorrect => Some(KeyTint::Failure),
            Outcome::Ignored => None,
        }
    }
}

/// A single key on the grid
#[derive(Debug, Clone)]
pub struct VisualKey {
    pub label: &'static str,
    /// Character submitted when the key is clicked
    pub char: char,
    /// Row in the grid, 0 is the top
    pub row: u16,
    /// Column offset from the left edge of the grid
    pub x: u16,
    pub width: u16,
    pub tint: KeyTint,
    resting: KeyTint,
    generation: u64,
}

/// Deferred instruction to put a key back to the tint it had before a flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revert {
    pub key: KeyHandle,
    pub restore: KeyTint,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct OnScreenKeyboard {
    keys: Vec<VisualKey>,
    by_char: HashMap<char, KeyHandle>,
}

impl Default for OnScreenKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnScreenKeyboard {
    pub fn new() -> Self {
        let rows: [(u16, &[(&'static str, char)]); 4] = [
            (
                0,
                &[
                    ("1", '1'),
                    ("2", '2'),
                    ("3", '3'),
                    ("4", '4'),
                    ("5", '5'),
                    ("6", '6'),
                    ("7", '7'),
                    ("8", '8'),
                    ("9", '9'),
                    ("0", '0'),
                    ("-", '-'),
                    ("+", '+'),
                ],
            ),
            (
                2,
                &[
                    ("Q", 'q'),
                    ("W", 'w'),
                    ("E", 'e'),
                    ("R", 'r'),
                    ("T", 't'),
                    ("Y", 'y'),
                    ("U", 'u'),
                    ("I", 'i'),
                    ("O", 'o'),
                    ("P", 'p'),
                ],
            ),
            (
                3,
                &[
                    ("A", 'a'),
                    ("S", 's'),
                    ("D", 'd'),
                    ("F", 'f'),
                    ("G", 'g'),
                    ("H", 'h'),
                    ("J", 'j'),
                    ("K", 'k'),
                    ("L", 'l'),
                ],
            ),
            (
                5,
                &[
                    ("Z", 'z'),
                    ("X", 'x'),
                    ("C", 'c'),
                    ("V", 'v'),
                    ("B", 'b'),
                    ("N", 'n'),
                    ("M", 'm'),
                    (",", ','),
                    (".", '.'),
                ],
            ),
        ];

        let mut keys = Vec::new();
        for (row, (indent, row_keys)) in rows.iter().enumerate() {
            let mut x = *indent;
            for &(label, c) in row_keys.iter() {
                keys.push(VisualKey::new(label, c, row as u16, x, KEY_WIDTH));
                x += KEY_WIDTH + KEY_GAP;
            }
        }
        keys.push(VisualKey::new("space", ' ', 4, SPACE_INDENT, SPACE_WIDTH));

        let mut by_char = HashMap::new();
        for (idx, key) in keys.iter().enumerate() {
            by_char.insert(key.char, KeyHandle(idx));
            if key.char.is_ascii_lowercase() {
                by_char.insert(key.char.to_ascii_uppercase(), KeyHandle(idx));
            }
        }

        Self { keys, by_char }
    }

    pub fn keys(&self) -> &[VisualKey] {
        &self.keys
    }

    pub fn handle_for(&self, c: char) -> Option<KeyHandle> {
        self.by_char.get(&c).copied()
    }

    pub fn key(&self, handle: KeyHandle) -> &VisualKey {
        &self.keys[handle.0]
    }

    pub fn tint_of(&self, c: char) -> Option<KeyTint> {
        self.handle_for(c).map(|h| self.key(h).tint)
    }

    /// Tint the key for `c` according to `outcome`.
    ///
    /// Returns the revert to schedule, or `None` when there is nothing to
    /// highlight. A newer flash on the same key supersedes older reverts.
    pub fn flash(&mut self, c: char, outcome: Outcome) -> Option<Revert> {
        let tint = KeyTint::for_outcome(outcome)?;
        let handle = self.handle_for(c)?;
        let key = &mut self.keys[handle.0];

        key.generation += 1;
        key.tint = tint;

        Some(Revert {
            key: handle,
            restore: key.resting,
            generation: key.generation,
        })
    }

    /// Apply a revert. Stale reverts are ignored.
    pub fn apply(&mut self, revert: Revert) -> bool {
        let Some(key) = self.keys.get_mut(revert.key.0) else {
            return false;
        };
        if key.generation != revert.generation {
            return false;
        }
        key.tint = revert.restore;
        true
    }

    /// Key under the cell (`x`, `y`) for a grid drawn in `area`
    pub fn key_at(&self, area: Rect, x: u16, y: u16) -> Option<KeyHandle> {
        if y < area.y || x < area.x + 1 {
            return None;
        }
        let row = y - area.y;
        let col = x - area.x - 1;

        self.keys
            .iter()
            .position(|k| k.row == row && col >= k.x && col < k.x + k.width)
            .map(KeyHandle)
    }
}

impl VisualKey {
    fn new(label: &'static str, c: char, row: u16, x: u16, width: u16) -> Self {
        Self {
            label,
            char: c,
            row,
            x,
            width,
            tint: KeyTint::Idle,
            resting: KeyTint::Idle,
            generation: 0,
        }
    }
}
