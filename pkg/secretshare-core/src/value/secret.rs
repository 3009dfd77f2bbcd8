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

use std::fmt;

use num_bigint::{BigUint, RandBigInt};
use rand::{CryptoRng, RngCore};

#[cfg(test)]
use quickcheck::Arbitrary;

use crate::{
    error::{DecodeError, Error},
    field::tier::{select_modulus, Modulus},
    value::{to_padded_bytes, FromWire, ToWire},
};

/// A secret value to be shared.
///
/// The value is a non-negative integer which must be a member of the field of
/// the largest [`Modulus`] tier. Its canonical encoding is big-endian, padded
/// to the width of the tier [`select_modulus`] picks for its bit length, which
/// is the tier a split of a small share count uses. Values too long to be split
/// (more than [`Secret::max_bits`] bits) are padded to the largest tier.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret {
    value: BigUint,
    modulus: &'static Modulus,
}

impl Secret {
    pub fn new<V: Into<BigUint>>(value: V) -> Result<Self, Error> {
        let value = value.into();
        let modulus = select_modulus(value.bits())
            .ok()
            .or_else(|| Modulus::for_value(&value));
        match modulus {
            Some(modulus) => Ok(Self { value, modulus }),
            None => Err(Error::UnsupportedSecretSize {
                bits: value.bits(),
                max_bits: Self::max_bits(),
            }),
        }
    }

    /// Generate a uniformly random secret of at most `bits` bits.
    pub fn random<R: CryptoRng + RngCore + ?Sized>(rng: &mut R, bits: u64) -> Result<Self, Error> {
        if bits > Self::max_bits() {
            return Err(Error::UnsupportedSecretSize {
                bits,
                max_bits: Self::max_bits(),
            });
        }
        Self::new(rng.gen_biguint(bits))
    }

    /// Largest bit length of a secret which can still be split.
    pub fn max_bits() -> u64 {
        Modulus::largest().capacity_bits()
    }

    /// Largest number of arbitrary bytes which are guaranteed to fit in a
    /// splittable secret.
    pub fn max_bytes() -> usize {
        (Self::max_bits() / 8) as usize
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Number of bits needed to represent the value (zero for a zero value).
    pub fn bit_length(&self) -> u64 {
        self.value.bits()
    }

    /// The smallest tier whose field contains this secret, which determines the
    /// width of [`ToWire::to_wire`].
    pub fn modulus(&self) -> &'static Modulus {
        self.modulus
    }

    /// Minimal big-endian representation, without any zero padding.
    ///
    /// Note that leading zero bytes of any input the secret was created from
    /// are not preserved.
    pub fn to_bytes_trimmed(&self) -> Vec<u8> {
        self.value.to_bytes_be()
    }
}

impl fmt::Debug for Secret {
    // Never print the value itself, so secrets don't end up in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("bits", &self.bit_length())
            .field("modulus", &self.modulus)
            .finish_non_exhaustive()
    }
}

impl TryFrom<BigUint> for Secret {
    type Error = Error;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl ToWire for Secret {
    fn to_wire(&self) -> Vec<u8> {
        to_padded_bytes(&self.value, self.modulus.width())
    }
}

impl FromWire for Secret {
    fn from_wire<B: AsRef<[u8]>>(input: B) -> Result<Self, Error> {
        let input = input.as_ref();
        if input.is_empty() {
            return Err(DecodeError::Empty.into());
        }
        let max = Modulus::largest().width();
        if input.len() > max {
            return Err(DecodeError::TooLong {
                len: input.len(),
                max,
            }
            .into());
        }
        Self::new(BigUint::from_bytes_be(input)).map_err(|_| DecodeError::ValueOutOfRange.into())
    }
}

#[cfg(test)]
impl Arbitrary for Secret {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut bytes = Vec::<u8>::arbitrary(g);
        // Keep the tests reasonably quick.
        bytes.truncate(512);
        Self::new(BigUint::from_bytes_be(&bytes)).expect("512-byte values fit the largest tier")
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.value
                .to_bytes_be()
                .shrink()
                .map(|bytes| Self::new(BigUint::from_bytes_be(&bytes)))
                .filter_map(Result::ok),
        )
    }
}
