//! Shift Arithmetic
//!
//! Caesar and Vigenère transforms over ASCII letters. Case is preserved and
//! every other character passes through untouched.

use crate::{Error, Result, ALPHABET_LEN};

const N: i32 = ALPHABET_LEN as i32;

fn shift_char(c: char, shift: i32) -> char {
    let base = if c.is_ascii_lowercase() {
        b'a'
    } else if c.is_ascii_uppercase() {
        b'A'
    } else {
        return c;
    };
    let offset = (c as u8 - base) as i32;
    ((offset + shift).rem_euclid(N) as u8 + base) as char
}

// ═══════════════════════════════════════════════════════════
// CAESAR
// ═══════════════════════════════════════════════════════════

pub fn caesar_encrypt(input: &str, shift: u8) -> String {
    input.chars().map(|c| shift_char(c, shift as i32)).collect()
}

pub fn caesar_decrypt(input: &str, shift: u8) -> String {
    input.chars().map(|c| shift_char(c, -(shift as i32))).collect()
}

// ═══════════════════════════════════════════════════════════
// VIGENÈRE
// ═══════════════════════════════════════════════════════════

/// Shift values of a keyword ('A' = 0)
pub fn keyword_shifts(keyword: &str) -> Result<Vec<u8>> {
    if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidKey(format!(
            "keyword must be non-empty alphabetic, got {:?}",
            keyword
        )));
    }
    Ok(keyword
        .bytes()
        .map(|b| b.to_ascii_uppercase() - b'A')
        .collect())
}

/// Uppercase keyword for a sequence of shifts
pub fn keyword_from_shifts(shifts: &[u8]) -> String {
    shifts
        .iter()
        .map(|&s| (b'A' + s % ALPHABET_LEN as u8) as char)
        .collect()
}

pub fn vigenere_encrypt(input: &str, keyword: &str) -> Result<String> {
    let shifts = keyword_shifts(keyword)?;
    Ok(apply_shifts(input, &shifts, 1))
}

pub fn vigenere_decrypt(input: &str, keyword: &str) -> Result<String> {
    let shifts = keyword_shifts(keyword)?;
    Ok(apply_shifts(input, &shifts, -1))
}

/// Key position advances on letters only
fn apply_shifts(input: &str, shifts: &[u8], direction: i32) -> String {
    let mut key_idx = 0;
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let shift = shifts[key_idx % shifts.len()] as i32 * direction;
                key_idx += 1;
                shift_char(c, shift)
            } else {
                c
            }
        })
        .collect()
}

/// Shortest block whose repetition spells the keyword (`KEYKEY` -> `KEY`)
pub fn primitive_keyword(keyword: &str) -> &str {
    let len = keyword.len();
    (1..len)
        .filter(|period| len % period == 0)
        .find(|&period| {
            let block = &keyword.as_bytes()[..period];
            keyword.as_bytes().chunks(period).all(|chunk| chunk == block)
        })
        .map(|period| &keyword[..period])
        .unwrap_or(keyword)
}
