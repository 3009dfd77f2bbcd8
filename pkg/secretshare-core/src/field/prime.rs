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

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// All primes below 100, used both for trial division and as Miller-Rabin
/// witnesses.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Maximum number of Miller-Rabin rounds [`is_probable_prime`] can run.
pub const MAX_ROUNDS: usize = SMALL_PRIMES.len();

/// Probabilistic primality test.
///
/// After trial division by the primes below 100, runs Miller-Rabin using the
/// first `rounds` of those primes as witnesses (capped at [`MAX_ROUNDS`]). The
/// witnesses are fixed, so the result is deterministic. Using the first 13
/// witnesses is exact for every `n < 3.3 * 10^24`. For larger `n` a composite
/// passes each round with probability at most `1/4`.
///
/// This is meant for checking the published modulus table, not for testing
/// adversarially chosen numbers.
pub fn is_probable_prime(n: &BigUint, rounds: usize) -> bool {
    if n < &BigUint::from(2u32) {
        return false;
    }
    for p in SMALL_PRIMES {
        if n == &BigUint::from(p) {
            return true;
        }
        if (n % p).is_zero() {
            return false;
        }
    }

    // n - 1 = d * 2^s with d odd.
    let n_minus_one = n - 1u32;
    let s = n_minus_one
        .trailing_zeros()
        .expect("n - 1 is non-zero for n > 2");
    let d = &n_minus_one >> s;

    'witness: for a in SMALL_PRIMES.iter().take(rounds.min(MAX_ROUNDS)) {
        let mut x = BigUint::from(*a).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
