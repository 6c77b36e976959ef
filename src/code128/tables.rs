//! # Code 128 Lookup Tables
//!
//! Symbol-name tables for the three character sets and the bar pattern of
//! every symbol value. Tables are indexed by symbol value (0-106).
//!
//! ## Naming
//!
//! | Name | Meaning |
//! |------|---------|
//! | `SP` | Space (0x20) |
//! | `NUL`..`US` | Control characters 0x00-0x1F (Set A only) |
//! | `DEL` | 0x7F (Set B only) |
//! | `FNC1`..`FNC4`, `SHIFT` | Function codes |
//! | `CodeA`/`CodeB`/`CodeC` | Set switch codes |
//! | `STARTA`/`STARTB`/`STARTC`, `STOP` | Framing codes |
//!
//! Bar patterns are written as module strings, `1` = bar, `0` = space.
//! Values 0-105 are 11 modules wide, STOP (106) is 13 modules wide
//! because it carries the trailing termination bar.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::CharacterSet;

/// Number of defined symbol values (0-106).
pub const SYMBOL_COUNT: usize = 107;

pub(crate) static SET_A: [&str; SYMBOL_COUNT] = [
    "SP", "!", "\"", "#", "$", "%", "&", "'",
    "(", ")", "*", "+", ",", "-", ".", "/",
    "0", "1", "2", "3", "4", "5", "6", "7",
    "8", "9", ":", ";", "<", "=", ">", "?",
    "@", "A", "B", "C", "D", "E", "F", "G",
    "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W",
    "X", "Y", "Z", "[", "\\", "]", "^", "_",
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL",
    "BS", "HT", "LF", "VT", "FF", "CR", "SO", "SI",
    "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB",
    "CAN", "EM", "SUB", "ESC", "FS", "GS", "RS", "US",
    "FNC3", "FNC2", "SHIFT", "CodeC", "CodeB", "FNC4", "FNC1", "STARTA",
    "STARTB", "STARTC", "STOP",
];

pub(crate) static SET_B: [&str; SYMBOL_COUNT] = [
    "SP", "!", "\"", "#", "$", "%", "&", "'",
    "(", ")", "*", "+", ",", "-", ".", "/",
    "0", "1", "2", "3", "4", "5", "6", "7",
    "8", "9", ":", ";", "<", "=", ">", "?",
    "@", "A", "B", "C", "D", "E", "F", "G",
    "H", "I", "J", "K", "L", "M", "N", "O",
    "P", "Q", "R", "S", "T", "U", "V", "W",
    "X", "Y", "Z", "[", "\\", "]", "^", "_",
    "`", "a", "b", "c", "d", "e", "f", "g",
    "h", "i", "j", "k", "l", "m", "n", "o",
    "p", "q", "r", "s", "t", "u", "v", "w",
    "x", "y", "z", "{", "|", "}", "~", "DEL",
    "FNC3", "FNC2", "SHIFT", "CodeC", "FNC4", "CodeA", "FNC1", "STARTA",
    "STARTB", "STARTC", "STOP",
];

pub(crate) static SET_C: [&str; SYMBOL_COUNT] = [
    "00", "01", "02", "03", "04", "05", "06", "07",
    "08", "09", "10", "11", "12", "13", "14", "15",
    "16", "17", "18", "19", "20", "21", "22", "23",
    "24", "25", "26", "27", "28", "29", "30", "31",
    "32", "33", "34", "35", "36", "37", "38", "39",
    "40", "41", "42", "43", "44", "45", "46", "47",
    "48", "49", "50", "51", "52", "53", "54", "55",
    "56", "57", "58", "59", "60", "61", "62", "63",
    "64", "65", "66", "67", "68", "69", "70", "71",
    "72", "73", "74", "75", "76", "77", "78", "79",
    "80", "81", "82", "83", "84", "85", "86", "87",
    "88", "89", "90", "91", "92", "93", "94", "95",
    "96", "97", "98", "99", "CodeB", "CodeA", "FNC1", "STARTA",
    "STARTB", "STARTC", "STOP",
];

pub(crate) static BAR_PATTERNS: [&str; SYMBOL_COUNT] = [
    "11011001100", "11001101100", "11001100110", "10010011000", // 0
    "10010001100", "10001001100", "10011001000", "10011000100", // 4
    "10001100100", "11001001000", "11001000100", "11000100100", // 8
    "10110011100", "10011011100", "10011001110", "10111001100", // 12
    "10011101100", "10011100110", "11001110010", "11001011100", // 16
    "11001001110", "11011100100", "11001110100", "11101101110", // 20
    "11101001100", "11100101100", "11100100110", "11101100100", // 24
    "11100110100", "11100110010", "11011011000", "11011000110", // 28
    "11000110110", "10100011000", "10001011000", "10001000110", // 32
    "10110001000", "10001101000", "10001100010", "11010001000", // 36
    "11000101000", "11000100010", "10110111000", "10110001110", // 40
    "10001101110", "10111011000", "10111000110", "10001110110", // 44
    "11101110110", "11010001110", "11000101110", "11011101000", // 48
    "11011100010", "11011101110", "11101011000", "11101000110", // 52
    "11100010110", "11101101000", "11101100010", "11100011010", // 56
    "11101111010", "11001000010", "11110001010", "10100110000", // 60
    "10100001100", "10010110000", "10010000110", "10000101100", // 64
    "10000100110", "10110010000", "10110000100", "10011010000", // 68
    "10011000010", "10000110100", "10000110010", "11000010010", // 72
    "11001010000", "11110111010", "11000010100", "10001111010", // 76
    "10100111100", "10010111100", "10010011110", "10111100100", // 80
    "10011110100", "10011110010", "11110100100", "11110010100", // 84
    "11110010010", "11011011110", "11011110110", "11110110110", // 88
    "10101111000", "10100011110", "10001011110", "10111101000", // 92
    "10111100010", "11110101000", "11110100010", "10111011110", // 96
    "10111101110", "11101011110", "11110101110", "11010000100", // 100
    "11010010000", "11010011100", "1100011101011", // 104
];

type SetIndex = HashMap<&'static str, u8>;

static SET_INDEX: OnceLock<[SetIndex; 3]> = OnceLock::new();

fn build_index(names: &'static [&'static str; SYMBOL_COUNT]) -> SetIndex {
    names
        .iter()
        .enumerate()
        .map(|(value, name)| (*name, value as u8))
        .collect()
}

fn set_index(set: CharacterSet) -> &'static SetIndex {
    let index = SET_INDEX.get_or_init(|| {
        [
            build_index(&SET_A),
            build_index(&SET_B),
            build_index(&SET_C),
        ]
    });
    match set {
        CharacterSet::A => &index[0],
        CharacterSet::B => &index[1],
        CharacterSet::C => &index[2],
    }
}

/// Symbol names of a character set, indexed by value.
pub fn set_names(set: CharacterSet) -> &'static [&'static str; SYMBOL_COUNT] {
    match set {
        CharacterSet::A => &SET_A,
        CharacterSet::B => &SET_B,
        CharacterSet::C => &SET_C,
    }
}

/// Look up the value of a token name in a character set.
pub fn symbol_value(set: CharacterSet, name: &str) -> Option<u8> {
    set_index(set).get(name).copied()
}

/// Bar pattern for a symbol value, or `None` above 106.
pub fn bar_pattern(value: u8) -> Option<&'static str> {
    BAR_PATTERNS.get(value as usize).copied()
}
