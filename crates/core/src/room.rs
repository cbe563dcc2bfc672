//! Room identifiers and the six-digit code entry form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of digit cells in a room code.
pub const CODE_LEN: usize = 6;

/// Identifier of a room, used in paths and queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,)]
#[serde(transparent)]
pub struct RoomId(String,);

impl RoomId {
    #[must_use]
    pub fn new(id: impl Into<String,>,) -> Self {
        Self(id.into(),)
    }

    #[must_use]
    pub fn as_str(&self,) -> &str {
        &self.0
    }

    /// Six-digit codes are shown as `XXX-XXX`, anything else as is.
    #[must_use]
    pub fn display_code(&self,) -> String {
        if self.0.len() == CODE_LEN && self.0.bytes().all(|b| b.is_ascii_digit(),) {
            format!("{}-{}", &self.0[..3], &self.0[3..])
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result {
        f.write_str(&self.0,)
    }
}

impl From<&str,> for RoomId {
    fn from(id: &str,) -> Self {
        Self::new(id,)
    }
}

/// Digit cells of the join form plus the focused cell.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct CodeForm {
    cells: [Option<char,>; CODE_LEN],
    focus: usize,
}

impl CodeForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn focus(&self,) -> usize {
        self.focus
    }

    /// Text of one cell, empty when unset.
    #[must_use]
    pub fn cell(&self, index: usize,) -> String {
        self.cells
            .get(index,)
            .copied()
            .flatten()
            .map(String::from,)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn cells(&self,) -> [String; CODE_LEN] {
        std::array::from_fn(|i| self.cell(i,),)
    }

    /// Applies an edit of cell `index`. Only an empty value or one decimal
    /// digit is accepted; returns whether the edit was applied.
    pub fn input(&mut self, index: usize, value: &str,) -> bool {
        if index >= CODE_LEN {
            return false;
        }

        let mut chars = value.chars();
        let digit = match (chars.next(), chars.next(),) {
            | (None, _,) => None,
            | (Some(c,), None,) if c.is_ascii_digit() => Some(c,),
            | _ => return false,
        };

        self.cells[index] = digit;
        self.focus = if digit.is_some() && index < CODE_LEN - 1 {
            index + 1
        } else {
            index
        };
        true
    }

    /// Backspace in cell `index`: clears a filled cell, or moves focus back
    /// from an empty one.
    pub fn backspace(&mut self, index: usize,) {
        if index >= CODE_LEN {
            return;
        }
        if self.cells[index].is_some() {
            self.cells[index] = None;
            self.focus = index;
        } else {
            self.focus = index.saturating_sub(1,);
        }
    }

    /// Distributes the digits of `text` over the cells from the left.
    pub fn paste(&mut self, text: &str,) {
        let digits: Vec<char,> = text
            .chars()
            .filter(char::is_ascii_digit,)
            .take(CODE_LEN,)
            .collect();

        self.cells = [None; CODE_LEN];
        for (cell, digit,) in self.cells.iter_mut().zip(&digits,) {
            *cell = Some(*digit,);
        }

        self.focus = self
            .cells
            .iter()
            .position(Option::is_none,)
            .unwrap_or_else(|| digits.len().min(CODE_LEN - 1,),);
    }

    #[must_use]
    pub fn is_join_disabled(&self,) -> bool {
        self.cells.iter().any(Option::is_none,)
    }

    /// The entered code once every cell is filled.
    #[must_use]
    pub fn room_id(&self,) -> Option<RoomId,> {
        self.cells
            .iter()
            .copied()
            .collect::<Option<String,>>()
            .map(RoomId::new,)
    }
}
