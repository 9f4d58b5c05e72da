//! CPF (Cadastro de Pessoas Físicas) parsing and canonicalisation
//!
//! Accepts either the bare 11-digit form or the formatted `000.000.000-00`
//! form. The canonical representation is always 11 digits.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::{Error, Result};

lazy_static::lazy_static! {
    /// Bare or dotted/dashed CPF
    static ref CPF_PATTERN: Regex =
        Regex::new(r"^[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}$").unwrap();
}

/// A validated CPF in canonical 11-digit form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Parse and canonicalise a CPF
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !CPF_PATTERN.is_match(trimmed) {
            return Err(Error::Validation(
                "CPF must have 11 digits, optionally formatted as 000.000.000-00".to_string(),
            ));
        }

        let digits: Vec<u8> = trimmed
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        if digits.len() != 11 {
            return Err(Error::Validation("CPF must have 11 digits".to_string()));
        }

        if digits.iter().all(|d| *d == digits[0]) {
            return Err(Error::Validation("CPF is invalid".to_string()));
        }

        let (first, second) = check_digits(&digits[..9]);
        if digits[9] != first || digits[10] != second {
            return Err(Error::Validation("CPF is invalid".to_string()));
        }

        Ok(Self(digits.iter().map(|d| char::from(b'0' + d)).collect()))
    }

    /// Build a valid CPF from its first nine digits by appending the check digits
    pub fn from_base(base: &str) -> Result<Self> {
        if base.len() != 9 || !base.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Validation("CPF base must have 9 digits".to_string()));
        }
        let digits: Vec<u8> = base.bytes().map(|b| b - b'0').collect();
        let (first, second) = check_digits(&digits);
        Self::parse(&format!("{}{}{}", base, first, second))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formatted representation, `000.000.000-00`
    pub fn formatted(&self) -> String {
        let s = &self.0;
        format!("{}.{}.{}-{}", &s[0..3], &s[3..6], &s[6..9], &s[9..11])
    }
}

/// Compute both verification digits for the first nine digits of a CPF
fn check_digits(base: &[u8]) -> (u8, u8) {
    let digit = |values: &[u8], start_weight: u32| -> u8 {
        let sum: u32 = values
            .iter()
            .zip((2..=start_weight).rev())
            .map(|(d, w)| u32::from(*d) * w)
            .sum();
        match sum % 11 {
            r if r < 2 => 0,
            r => (11 - r) as u8,
        }
    };

    let first = digit(base, 10);
    let mut extended = base.to_vec();
    extended.push(first);
    let second = digit(&extended, 11);
    (first, second)
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Cpf::parse(&raw).map_err(serde::de::Error::custom)
    }
}
