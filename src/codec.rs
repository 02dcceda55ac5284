//! Text forms of a [`BitGrid`].
//!
//! Two exports exist: one decimal digit per cell (`uint8_t[32][32]`) and one
//! hex word per row (`uint32_t[32]`). Only the first can be read back, since
//! [`decode`] looks for isolated `0`/`1` tokens and nothing else.

use crate::bit_grid::{BitGrid, CELL_COUNT, GRID_SIZE};
use crate::error::DecodeError;
use regex::Regex;
use std::sync::LazyLock;

static CELL_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[01]\b").unwrap());

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    ByteArray,
    PackedRows,
}

impl Encoding {
    pub fn encode(self, grid: &BitGrid) -> String {
        match self {
            Self::ByteArray => encode_byte_array(grid),
            Self::PackedRows => encode_packed_rows(grid),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ByteArray => "uint8_t[32][32]",
            Self::PackedRows => "uint32_t[32]",
        }
    }
}

pub fn encode_byte_array(grid: &BitGrid) -> String {
    let mut out = String::from("const uint8_t customBitmap[32][32] = {\n");
    for (i, on) in grid.cells().enumerate() {
        let col = i % GRID_SIZE;
        out.push_str(if col == 0 { "  {" } else { ", " });
        out.push(if on { '1' } else { '0' });
        if col == GRID_SIZE - 1 {
            out.push_str("},\n");
        }
    }
    out.push_str("};\n");
    out
}

pub fn encode_packed_rows(grid: &BitGrid) -> String {
    let body: String = grid.rows().map(|bits| format!("  0x{bits:08X},\n")).collect();
    format!("const uint32_t customBitmap[32] = {{\n{body}}};\n")
}

/// Reads a grid from any text holding exactly 1024 standalone `0`/`1` digits.
///
/// Surrounding syntax is ignored; the digits fill the grid row-major in the
/// order they appear.
pub fn decode(text: &str) -> Result<BitGrid, DecodeError> {
    let tokens: Vec<bool> = cell_tokens(text).collect();
    let count = tokens.len();
    BitGrid::from_cells(tokens).ok_or(DecodeError::TokenCount(count))
}

/// How many cell values [`decode`] would see in `text`.
pub fn count_tokens(text: &str) -> usize {
    cell_tokens(text).count()
}

fn cell_tokens(text: &str) -> impl Iterator<Item = bool> + '_ {
    CELL_TOKEN.find_iter(text).map(|m| m.as_str() == "1")
}
