//! Encoding, checksum and progress-bar functions.

use crate::interpreter::Atom;
use crate::interpreter::encoding;

use super::{Arg, MAX_WIDTH, map_text};

const CRC_TABLE: [u32; 256] = crc_table();

const fn crc_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 == 0 {
                crc >> 1
            } else {
                0xEDB8_8320 ^ (crc >> 1)
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// IEEE CRC-32.
fn checksum(bytes: &[u8]) -> u32 {
    !bytes.iter().fold(!0_u32, |crc, &byte| {
        CRC_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8)
    })
}

/// `$ansi(x)`
pub fn ansi(args: &[Arg]) -> Atom {
    map_text(&args[0], encoding::to_ansi)
}

/// `$ascii(x)`
pub fn ascii(args: &[Arg]) -> Atom {
    map_text(&args[0], encoding::to_ascii)
}

/// `$crc32(x)`: CRC-32 of the UTF-8 text, in decimal.
pub fn crc32(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| checksum(t.as_bytes()).to_string())
}

/// `$hex(n)`, `$hex(n,len)`: upper-case hexadecimal of `n` modulo 2^32,
/// zero-padded to `len` digits.
pub fn hex(args: &[Arg]) -> Atom {
    let value = args[0].wrapped_u32();
    let width = args.get(1).map_or(0, |a| a.count().min(MAX_WIDTH));
    Atom::found(format!("{value:0width$X}"))
}

/// `$progress(pos,range,len,knob,bar)`: a bar of `len` cells with the knob at
/// the position's cell.
pub fn progress(args: &[Arg]) -> Atom {
    let [pos, range, len, knob, bar] = args else {
        return Atom::absent();
    };
    let len = len.count().min(MAX_WIDTH);
    let knob_at = bar_cell(pos, range, len).min(len.saturating_sub(1));
    let mut out = String::new();
    for cell in 0..len {
        out.push_str(if cell == knob_at { knob.text() } else { bar.text() });
    }
    Atom::literal(out)
}

/// `$progress2(pos,range,len,filled,empty)`: `len` cells, filled up to the
/// position.
pub fn progress2(args: &[Arg]) -> Atom {
    let [pos, range, len, filled, empty] = args else {
        return Atom::absent();
    };
    let len = len.count().min(MAX_WIDTH);
    let filled_cells = bar_cell(pos, range, len).min(len);
    let mut out = filled.text().repeat(filled_cells);
    out.push_str(&empty.text().repeat(len - filled_cells));
    Atom::literal(out)
}

/// `pos * len / range`, at least zero. A zero range puts the position at 0.
fn bar_cell(pos: &Arg, range: &Arg, len: usize) -> usize {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let cell = pos
        .number()
        .saturating_mul(len)
        .checked_div(range.number())
        .unwrap_or(0);
    usize::try_from(cell).unwrap_or(0)
}
