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

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid hex string: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64 string: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("no data to decode")]
    Empty,

    #[error("encoded value is {len} bytes long but at most {max} bytes are supported")]
    TooLong { len: usize, max: usize },

    #[error("no modulus tier has a {0}-byte wide field element")]
    UnknownWidth(usize),

    #[error("share point must not be zero")]
    ZeroPoint,

    #[error("encoded value is not a member of its field")]
    ValueOutOfRange,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "invalid sharing parameters: need 1 <= threshold <= share count, got threshold {} and share count {}",
        threshold,
        share_count
    )]
    InvalidParameters { threshold: u8, share_count: u8 },

    #[error(
        "secret needs {} bits but the largest modulus tier only supports {} bits",
        bits,
        max_bits
    )]
    UnsupportedSecretSize { bits: u64, max_bits: u64 },

    #[error("more than one share uses the point {0}")]
    DuplicatePoint(u8),

    #[error(
        "shares disagree on their width: expected {} bytes but found {} bytes",
        expected,
        found
    )]
    InconsistentShareWidth { expected: usize, found: usize },

    #[error("no shares were provided")]
    NoShares,

    #[error("invalid share: {0}")]
    InvalidShare(&'static str),

    #[error("[critical security issue] value has no inverse in the field")]
    NotInvertible,

    #[error("failed to decode value: {0}")]
    Decode(#[from] DecodeError),
}
