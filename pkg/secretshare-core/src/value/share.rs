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

use num_bigint::BigUint;

#[cfg(test)]
use quickcheck::Arbitrary;

use crate::{
    error::{DecodeError, Error},
    field::tier::Modulus,
    value::{to_padded_bytes, FromWire, ToWire},
};

/// One evaluation `(x, f(x))` of a sharing polynomial.
///
/// The modulus tier is not stored explicitly on the wire. Instead it is
/// implied by the width of the encoded value, so all shares from a single
/// split have the same length.
#[derive(Clone, PartialEq, Eq)]
pub struct Share {
    point: u8,
    value: BigUint,
    modulus: &'static Modulus,
}

impl Share {
    pub fn new(point: u8, value: BigUint, modulus: &'static Modulus) -> Result<Self, Error> {
        if point == 0 {
            return Err(Error::InvalidShare("point must not be zero"));
        }
        if &value >= modulus.prime() {
            return Err(Error::InvalidShare("value is not a member of the field"));
        }
        Ok(Self {
            point,
            value,
            modulus,
        })
    }

    /// The x-coordinate, which is never zero.
    pub fn point(&self) -> u8 {
        self.point
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn modulus(&self) -> &'static Modulus {
        self.modulus
    }

    /// Width in bytes of the encoded value (not counting the point).
    pub fn width(&self) -> usize {
        self.modulus.width()
    }
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("point", &self.point)
            .field("modulus", &self.modulus)
            .finish_non_exhaustive()
    }
}

impl ToWire for Share {
    fn to_wire(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.width());
        bytes.push(self.point);
        bytes.extend_from_slice(&to_padded_bytes(&self.value, self.width()));
        bytes
    }
}

impl FromWire for Share {
    fn from_wire<B: AsRef<[u8]>>(input: B) -> Result<Self, Error> {
        let (point, value) = match input.as_ref().split_first() {
            Some(split) => split,
            None => return Err(DecodeError::Empty.into()),
        };
        let modulus =
            Modulus::for_width(value.len()).ok_or(DecodeError::UnknownWidth(value.len()))?;
        if *point == 0 {
            return Err(DecodeError::ZeroPoint.into());
        }
        let value = BigUint::from_bytes_be(value);
        if &value >= modulus.prime() {
            return Err(DecodeError::ValueOutOfRange.into());
        }
        Ok(Self {
            point: *point,
            value,
            modulus,
        })
    }
}

#[cfg(test)]
impl Arbitrary for Share {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Only the smaller tiers, the larger ones make quickcheck crawl.
        let modulus = g
            .choose(&Modulus::all()[..4])
            .expect("modulus table has at least four tiers");
        let value = BigUint::from_bytes_be(&Vec::<u8>::arbitrary(g)) % modulus.prime();
        Self {
            point: u8::arbitrary(g).max(1),
            value,
            modulus,
        }
    }
}
