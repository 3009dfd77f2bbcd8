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

//! Shamir's `(t, n)`-threshold secret sharing over prime fields.
//!
//! A [`Secret`] is split by a [`SecretShare`] engine into `n` [`Share`]s, any
//! `t` of which reconstruct the secret through Lagrange interpolation. Each
//! split picks the smallest prime from a fixed, versioned [table][field::tier]
//! that can hold the secret, and the serialised width of a share is enough to
//! recover which prime was used.
//!
//! ## Security ##
//! **[`combine`] cannot tell a correct reconstruction from an incorrect one.**
//! Combining fewer than `t` shares, or shares from different sharing sessions,
//! returns a well-formed but meaningless secret without any error. Callers who
//! need to detect this must verify the result out-of-band (for instance by
//! comparing a digest of the recovered secret against a published one). The
//! threshold and share count are also not stored in the shares, and must be
//! tracked by the application.
//!
//! This implementation is not constant time.

#![forbid(unsafe_code)]

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

mod error;

/// Modular arithmetic, primality testing and the modulus tier table.
pub mod field;

/// Implementation of Shamir Secret Sharing.
pub mod shamir;

/// Secret and share value types, and their wire encodings.
pub mod value;

pub use error::{DecodeError, Error};
pub use field::tier::{select_modulus, Modulus, TABLE_VERSION};
pub use shamir::{combine, SecretShare};
pub use value::{FromWire, Secret, Share, ToWire};
