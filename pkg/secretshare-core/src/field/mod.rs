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

//! Arithmetic in `GF(p)` for a prime `p` chosen per operation.
//!
//! Field elements are plain [`BigUint`]s in `[0, p)`. Every function takes the
//! modulus explicitly and always returns a fully reduced value, so callers
//! never have to reason about intermediate representations.

use std::mem;

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::Error;

pub mod prime;
pub mod tier;

/// `(a + b) mod p`.
pub fn mod_add(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a + b) % p
}

/// `(a - b) mod p`, without ever going negative.
pub fn mod_sub(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    let (a, b) = (a % p, b % p);
    if a >= b {
        a - b
    } else {
        p - b + a
    }
}

/// `(a * b) mod p`.
pub fn mod_mul(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    (a * b) % p
}

/// `base^exp mod p`.
pub fn mod_pow(base: &BigUint, exp: &BigUint, p: &BigUint) -> BigUint {
    base.modpow(exp, p)
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `a*x + b*y == g == gcd(a, b)`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = mem::replace(&mut s, next_s);

        let next_t = &old_t - &quotient * &t;
        old_t = mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Multiplicative inverse of `a` in `GF(p)`.
///
/// For a prime `p` this only fails when `a == 0 (mod p)`, which the sharing
/// protocol never produces for well-formed input. Hitting this error is a bug.
pub fn mod_inverse(a: &BigUint, p: &BigUint) -> Result<BigUint, Error> {
    let a = a % p;
    if a.is_zero() {
        return Err(Error::NotInvertible);
    }

    let p_signed = BigInt::from(p.clone());
    let (gcd, x, _) = extended_gcd(&BigInt::from(a), &p_signed);
    if !gcd.is_one() {
        return Err(Error::NotInvertible);
    }

    // x may be negative, so shift it back into [0, p).
    (((x % &p_signed) + &p_signed) % &p_signed)
        .to_biguint()
        .ok_or(Error::NotInvertible)
}

/// Uniformly random field element in `[0, p)`.
///
/// The randomness source is always provided by the caller. Production paths
/// use the operating system CSPRNG, tests can use a seeded one.
pub fn random_below<R: CryptoRng + RngCore + ?Sized>(p: &BigUint, rng: &mut R) -> BigUint {
    rng.gen_biguint_below(p)
}
