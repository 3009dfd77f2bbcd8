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

//! The table of prime moduli ("tiers") shares are computed over.
//!
//! Every tier is a prime of the form `2^bits - c` and is serialised using
//! `ceil(bits / 8)` bytes. No two tiers share a width, which is what allows a
//! decoder to recover the tier of a share purely from its length.
//!
//! **Changing this table breaks compatibility with every share issued under a
//! previous [`TABLE_VERSION`].**

use std::fmt;

use num_bigint::BigUint;
use num_traits::One;
use once_cell::sync::Lazy;

use crate::error::Error;

/// Version of the modulus table (and thus of the share wire format).
pub const TABLE_VERSION: u32 = 1;

// (bits, c) for each prime 2^bits - c, in ascending order. All but 2^255 - 19
// are Mersenne primes.
const TIER_FORMS: [(u32, u32); 7] = [
    (127, 1),
    (255, 19),
    (521, 1),
    (1279, 1),
    (2203, 1),
    (4253, 1),
    (9689, 1),
];

static TIERS: Lazy<Vec<Modulus>> = Lazy::new(|| {
    TIER_FORMS
        .iter()
        .map(|&(bits, c)| Modulus {
            bits,
            width: (bits as usize + 7) / 8,
            prime: (BigUint::one() << bits) - c,
        })
        .collect()
});

/// A prime modulus from the tier table.
#[derive(Clone, PartialEq, Eq)]
pub struct Modulus {
    bits: u32,
    width: usize,
    prime: BigUint,
}

impl Modulus {
    /// All tiers, in ascending order.
    pub fn all() -> &'static [Modulus] {
        &TIERS
    }

    pub fn smallest() -> &'static Modulus {
        TIERS.first().expect("modulus table must not be empty")
    }

    pub fn largest() -> &'static Modulus {
        TIERS.last().expect("modulus table must not be empty")
    }

    /// Look up the tier whose field elements are `width` bytes wide.
    pub fn for_width(width: usize) -> Option<&'static Modulus> {
        TIERS.iter().find(|m| m.width == width)
    }

    /// Smallest tier which has `value` as a member of its field.
    pub fn for_value(value: &BigUint) -> Option<&'static Modulus> {
        TIERS.iter().find(|m| value < &m.prime)
    }

    /// The prime `p` itself.
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Bit length of the prime.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of bytes used to serialise an element of this field.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Largest bit length of a value that [`select_modulus`] maps to this
    /// tier (or a smaller one).
    pub fn capacity_bits(&self) -> u64 {
        u64::from(self.bits) - 1
    }
}

impl fmt::Debug for Modulus {
    // The primes are thousands of digits long, so just describe the tier.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modulus")
            .field("bits", &self.bits)
            .field("width", &self.width)
            .finish()
    }
}

/// Select the smallest tier whose prime is strictly greater than
/// `2^required_bits`, so that it can hold any `required_bits`-bit value.
pub fn select_modulus(required_bits: u64) -> Result<&'static Modulus, Error> {
    let modulus = TIERS
        .iter()
        .find(|m| u64::from(m.bits) > required_bits)
        .ok_or(Error::UnsupportedSecretSize {
            bits: required_bits,
            max_bits: Modulus::largest().capacity_bits(),
        })?;
    tracing::trace!(required_bits, tier_bits = modulus.bits, "selected modulus tier");
    Ok(modulus)
}
