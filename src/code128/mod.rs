//! # Code 128 Encoder
//!
//! Turns text into a checksummed sequence of Code 128 symbol values and the
//! concatenated bar pattern of those symbols.
//!
//! ## Pipeline
//!
//! ```text
//! text → tokenize → set-selection fold → checksum + STOP → modules
//!         "1234"      [START C, 12, 34]     [.., 82, 106]    "1101001110..."
//! ```
//!
//! ## Set Selection
//!
//! Each token is looked up in the current character set first. If the current
//! set cannot represent it, the remaining sets are tried in the fallback order
//! B, A, C and a switch code is emitted before the token itself. The first
//! token picks the start code the same way, with no current set.
//!
//! | Set | Repertoire | Start | Switch |
//! |-----|------------|-------|--------|
//! | A | Uppercase, digits, punctuation, control characters | 103 | 101 |
//! | B | Uppercase, lowercase, digits, punctuation | 104 | 100 |
//! | C | Digit pairs `00`-`99` | 105 | 99 |
//!
//! ## Example
//!
//! ```
//! use barcode128::code128;
//!
//! let encoding = code128::encode("ABC").unwrap();
//! assert_eq!(encoding.symbols(), &[104, 33, 34, 35, 1, 106]);
//! assert_eq!(encoding.module_count(), 11 * 5 + 13);
//! ```

pub mod tables;

use std::borrow::Cow;
use std::fmt;

use crate::error::{BarcodeError, Result};
use tables::{BAR_PATTERNS, symbol_value};

// ============================================================================
// SYMBOL VALUES
// ============================================================================

pub const START_A: u8 = 103;
pub const START_B: u8 = 104;
pub const START_C: u8 = 105;
pub const STOP: u8 = 106;

pub const CODE_A: u8 = 101;
pub const CODE_B: u8 = 100;
pub const CODE_C: u8 = 99;

const CHECKSUM_MODULUS: u64 = 103;

// ============================================================================
// CHARACTER SETS AND TOKENS
// ============================================================================

/// One of the three Code 128 character repertoires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSet {
    A,
    B,
    C,
}

impl CharacterSet {
    /// Order in which sets are tried when the current set can't encode a token.
    pub const FALLBACK_ORDER: [CharacterSet; 3] = [CharacterSet::B, CharacterSet::A, CharacterSet::C];

    /// START code that opens a symbol in this set.
    pub fn start_code(self) -> u8 {
        match self {
            CharacterSet::A => START_A,
            CharacterSet::B => START_B,
            CharacterSet::C => START_C,
        }
    }

    /// Code emitted to switch *into* this set.
    pub fn switch_code(self) -> u8 {
        match self {
            CharacterSet::A => CODE_A,
            CharacterSet::B => CODE_B,
            CharacterSet::C => CODE_C,
        }
    }

    /// Value of the token in this set, if the set can represent it.
    pub fn value_of(self, token: &Token) -> Option<u8> {
        symbol_value(self, &token.name())
    }
}

/// Function codes shared by the character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Fnc1,
    Fnc2,
    Fnc3,
    /// Not available in Set C
    Fnc4,
    /// Not available in Set C
    Shift,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Fnc1 => "FNC1",
            Function::Fnc2 => "FNC2",
            Function::Fnc3 => "FNC3",
            Function::Fnc4 => "FNC4",
            Function::Shift => "SHIFT",
        }
    }
}

/// One unit of input after tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A printable character looked up by itself
    Char(char),
    /// Two digits packed into one Set C symbol (0-99)
    Pair(u8),
    /// Named non-printing character: `SP`, `NUL`..`US`, `DEL`
    Control(&'static str),
    /// Function code inserted by the caller
    Function(Function),
}

impl Token {
    /// Token for a single character. Space and control characters map to
    /// their symbol names.
    pub fn from_char(ch: char) -> Token {
        match ch {
            ' ' => Token::Control("SP"),
            '\u{7f}' => Token::Control("DEL"),
            // NUL..US occupy values 64-95 of Set A
            '\u{0}'..='\u{1f}' => Token::Control(tables::SET_A[64 + ch as usize]),
            _ => Token::Char(ch),
        }
    }

    /// Table key for this token.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            Token::Char(ch) => Cow::Owned(ch.to_string()),
            Token::Pair(pair) => Cow::Owned(format!("{:02}", pair)),
            Token::Control(name) => Cow::Borrowed(*name),
            Token::Function(function) => Cow::Borrowed(function.name()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Split text into tokens, pairing adjacent ASCII digits left to right.
///
/// A digit is only paired with a following digit, so the last character of
/// the input is never part of a pair: `"123"` becomes `["12", "3"]`.
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        match (chars[i].to_digit(10), chars.get(i + 1).and_then(|c| c.to_digit(10))) {
            (Some(high), Some(low)) => {
                tokens.push(Token::Pair((high * 10 + low) as u8));
                i += 2;
            }
            _ => {
                tokens.push(Token::from_char(chars[i]));
                i += 1;
            }
        }
    }

    tokens
}

// ============================================================================
// CHECKSUM
// ============================================================================

/// Running mod-103 checksum.
///
/// The first contribution (the START code) is added as-is; the k-th
/// contribution after it is multiplied by k.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checksum {
    sum: u64,
    count: u64,
}

impl Checksum {
    pub fn add(self, value: u8) -> Self {
        let weight = self.count.max(1);
        Self {
            sum: (self.sum + value as u64 * weight) % CHECKSUM_MODULUS,
            count: self.count + 1,
        }
    }

    pub fn value(self) -> u8 {
        (self.sum % CHECKSUM_MODULUS) as u8
    }
}

// ============================================================================
// ENCODER
// ============================================================================

/// A complete, framed Code 128 symbol sequence.
///
/// Always `[START, data.., checksum, STOP]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    symbols: Vec<u8>,
    modules: Vec<bool>,
    start_set: CharacterSet,
}

impl Encoding {
    /// Symbol values in emission order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// One entry per module, `true` = bar.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn start_set(&self) -> CharacterSet {
        self.start_set
    }

    /// The checksum symbol (second to last).
    pub fn checksum(&self) -> u8 {
        self.symbols[self.symbols.len() - 2]
    }

    /// Bar pattern of each emitted symbol.
    pub fn patterns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.symbols.iter().map(|&value| BAR_PATTERNS[value as usize])
    }

    /// Modules as a `0`/`1` string.
    pub fn bit_string(&self) -> String {
        self.modules.iter().map(|&bar| if bar { '1' } else { '0' }).collect()
    }
}

/// Fold state: the active set plus everything emitted so far.
struct EncodeState {
    set: CharacterSet,
    symbols: Vec<u8>,
    checksum: Checksum,
}

impl EncodeState {
    fn start(set: CharacterSet) -> Self {
        Self {
            set,
            symbols: Vec::new(),
            checksum: Checksum::default(),
        }
        .emit(set.start_code())
    }

    fn emit(mut self, value: u8) -> Self {
        self.symbols.push(value);
        self.checksum = self.checksum.add(value);
        self
    }

    fn push_token(self, position: usize, token: &Token) -> Result<Self> {
        let (set, value) = select_set(Some(self.set), position, token)?;
        let state = if set != self.set {
            let mut switched = self.emit(set.switch_code());
            switched.set = set;
            switched
        } else {
            self
        };
        Ok(state.emit(value))
    }

    fn finish(mut self) -> Encoding {
        let checksum = self.checksum.value();
        self.symbols.push(checksum);
        self.symbols.push(STOP);

        let modules = self
            .symbols
            .iter()
            .flat_map(|&value| BAR_PATTERNS[value as usize].bytes())
            .map(|bit| bit == b'1')
            .collect();

        Encoding {
            start_set: set_of_start(self.symbols[0]),
            symbols: self.symbols,
            modules,
        }
    }
}

fn set_of_start(code: u8) -> CharacterSet {
    match code {
        START_A => CharacterSet::A,
        START_C => CharacterSet::C,
        _ => CharacterSet::B,
    }
}

/// Pick the set for a token, staying in `current` when possible.
fn select_set(
    current: Option<CharacterSet>,
    position: usize,
    token: &Token,
) -> Result<(CharacterSet, u8)> {
    if let Some(set) = current {
        if let Some(value) = set.value_of(token) {
            return Ok((set, value));
        }
    }

    CharacterSet::FALLBACK_ORDER
        .into_iter()
        .filter(|&set| Some(set) != current)
        .find_map(|set| set.value_of(token).map(|value| (set, value)))
        .ok_or_else(|| BarcodeError::UnencodableCharacter {
            token: token.name().into_owned(),
            position,
        })
}

/// Encode a caller-built token list.
///
/// Empty input is valid and yields `[START B, 1, STOP]`.
pub fn encode_tokens(tokens: &[Token]) -> Result<Encoding> {
    let start_set = match tokens.first() {
        Some(token) => select_set(None, 0, token)?.0,
        None => CharacterSet::B,
    };

    let state = tokens
        .iter()
        .enumerate()
        .try_fold(EncodeState::start(start_set), |state, (position, token)| {
            state.push_token(position, token)
        })?;

    Ok(state.finish())
}

/// Encode text into a framed, checksummed Code 128 sequence.
pub fn encode(text: &str) -> Result<Encoding> {
    encode_tokens(&tokenize(text))
}
