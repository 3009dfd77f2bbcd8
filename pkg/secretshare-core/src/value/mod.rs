/*
 * secretshare: Shamir secret sharing over prime fields
 * Copyright (C) 2018-2022 Aleksa Sarai <cyphar@cyphar.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

mod secret;
mod share;

pub use secret::Secret;
pub use share::Share;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use num_bigint::BigUint;

use crate::error::{DecodeError, Error};

pub trait ToWire {
    /// Canonical fixed-width byte representation.
    fn to_wire(&self) -> Vec<u8>;

    /// Lowercase hex encoding of [`ToWire::to_wire`].
    fn to_hex(&self) -> String {
        hex::encode(self.to_wire())
    }

    /// Standard (padded) base64 encoding of [`ToWire::to_wire`].
    fn to_base64(&self) -> String {
        BASE64.encode(self.to_wire())
    }
}

pub trait FromWire: Sized {
    fn from_wire<B: AsRef<[u8]>>(input: B) -> Result<Self, Error>;

    /// Parse a hex-encoded value. Upper case digits, a `0x` prefix and an odd
    /// number of digits are all accepted.
    fn from_hex<S: AsRef<str>>(input: S) -> Result<Self, Error> {
        let input = input.as_ref().trim();
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        let bytes = if digits.len() % 2 == 1 {
            hex::decode(format!("0{}", digits))
        } else {
            hex::decode(digits)
        }
        .map_err(DecodeError::from)?;
        Self::from_wire(bytes)
    }

    /// Parse a standard base64-encoded value. Surrounding whitespace (such as
    /// a trailing newline) is ignored.
    fn from_base64<S: AsRef<str>>(input: S) -> Result<Self, Error> {
        let bytes = BASE64
            .decode(input.as_ref().trim())
            .map_err(DecodeError::from)?;
        Self::from_wire(bytes)
    }
}

/// Big-endian bytes of `value`, left-padded with zeroes to `width` bytes.
///
/// The caller must guarantee that `value` fits in `width` bytes, which holds
/// for any element of a field whose modulus is `width` bytes wide.
pub(crate) fn to_padded_bytes(value: &BigUint, width: usize) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    assert!(
        bytes.len() <= width,
        "field element does not fit in its modulus width"
    );
    let mut padded = vec![0u8; width];
    padded[width - bytes.len()..].copy_from_slice(&bytes);
    padded
}
