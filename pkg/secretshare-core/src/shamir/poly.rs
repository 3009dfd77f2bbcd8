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
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use rayon::prelude::*;

use crate::{
    error::Error,
    field::{mod_add, mod_inverse, mod_mul, mod_sub, random_below},
};

/// A polynomial in `GF(p)`.
// The coefficients are in *increasing* degree.
#[derive(Clone, PartialEq, Eq)]
pub struct Polynomial {
    coeffs: Vec<BigUint>,
    prime: BigUint,
}

impl Polynomial {
    /// Construct a polynomial from its coefficients, constant term first.
    /// Coefficients are reduced modulo `prime`, which must be at least 2.
    pub(crate) fn new(coeffs: Vec<BigUint>, prime: BigUint) -> Self {
        assert!(!coeffs.is_empty(), "Polynomial must have at least one coefficient");
        let coeffs = coeffs.into_iter().map(|c| c % &prime).collect();
        Self { coeffs, prime }
    }

    /// Random polynomial of the given degree whose constant term is `constant`.
    ///
    /// Every other coefficient is drawn uniformly from `[0, prime)`. Note that
    /// this means the leading coefficient may be zero.
    pub(crate) fn new_rand<R: CryptoRng + RngCore + ?Sized>(
        constant: BigUint,
        degree: usize,
        prime: BigUint,
        rng: &mut R,
    ) -> Self {
        let mut coeffs = Vec::with_capacity(degree + 1);
        coeffs.push(constant);
        coeffs.extend((0..degree).map(|_| random_below(&prime, rng)));
        Self::new(coeffs, prime)
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Retrieve the constant term of the polynomial, i.e. the secret.
    pub fn constant(&self) -> &BigUint {
        &self.coeffs[0]
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Evaluate the polynomial at a given `x` value, using Horner's method.
    pub fn evaluate(&self, x: &BigUint) -> BigUint {
        let p = &self.prime;
        self.coeffs
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, coeff| {
                mod_add(&mod_mul(&acc, x, p), coeff, p)
            })
    }

    /// Evaluate, at `x`, the unique polynomial of degree `points.len() - 1`
    /// passing through every `(x_j, y_j)` in `points`.
    ///
    /// Computed by [Lagrange interpolation][lagrange]:
    ///
    /// ```text
    ///   L(x) = \sum_{j} y_j \prod_{m != j} \frac{x - x_m}{x_j - x_m}
    /// ```
    ///
    /// Each term of the sum only depends on the input points, so they are
    /// computed in parallel. The `x_j` must be distinct modulo `prime`,
    /// otherwise [`Error::NotInvertible`] is returned.
    ///
    /// [lagrange]: https://en.wikipedia.org/wiki/Lagrange_polynomial
    pub fn lagrange_at<P: AsRef<[(BigUint, BigUint)]>>(
        x: &BigUint,
        points: P,
        prime: &BigUint,
    ) -> Result<BigUint, Error> {
        let points = points.as_ref();
        if points.is_empty() {
            return Err(Error::NoShares);
        }
        // GF(0) and GF(1) have no invertible elements at all.
        if prime < &BigUint::from(2u32) {
            return Err(Error::NotInvertible);
        }

        points
            .par_iter()
            .enumerate()
            .map(|(j, (x_j, y_j))| -> Result<BigUint, Error> {
                let (num, den) = points
                    .iter()
                    .enumerate()
                    .filter(|(m, _)| *m != j)
                    .fold(
                        (BigUint::one(), BigUint::one()),
                        |(num, den), (_, (x_m, _))| {
                            (
                                mod_mul(&num, &mod_sub(x, x_m, prime), prime),
                                mod_mul(&den, &mod_sub(x_j, x_m, prime), prime),
                            )
                        },
                    );
                // y_j * num / den
                let term = mod_mul(y_j, &num, prime);
                Ok(mod_mul(&term, &mod_inverse(&den, prime)?, prime))
            })
            .try_reduce(BigUint::zero, |a, b| Ok(mod_add(&a, &b, prime)))
    }
}

impl fmt::Debug for Polynomial {
    // The constant term is the secret.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("degree", &self.degree())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    fn points(xs: &[u32], ys: &[u32]) -> Vec<(BigUint, BigUint)> {
        xs.iter().zip(ys).map(|(x, y)| (big(*x), big(*y))).collect()
    }

    fn mersenne_127() -> BigUint {
        (BigUint::one() << 127u32) - 1u32
    }

    #[test]
    fn evaluate_known_values() {
        let poly = Polynomial::new(vec![big(2), big(3), big(4), big(5)], big(7));
        assert_eq!(poly.degree(), 3);
        assert_eq!(poly.constant(), &big(2));
        assert_eq!(poly.evaluate(&big(0)), big(2));
        // 2 + 3 + 4 + 5 = 14 = 0 (mod 7)
        assert_eq!(poly.evaluate(&big(1)), big(0));
        // 2 + 6 + 16 + 40 = 64 = 1 (mod 7)
        assert_eq!(poly.evaluate(&big(2)), big(1));
    }

    #[test]
    fn coefficients_are_reduced() {
        let poly = Polynomial::new(vec![big(9), big(10)], big(7));
        assert_eq!(poly.constant(), &big(2));
        assert_eq!(poly, Polynomial::new(vec![big(2), big(3)], big(7)));
    }

    #[test]
    fn lagrange_known_values() {
        // f(x) = x^2 + 1 over GF(11).
        let value = Polynomial::lagrange_at(&big(1), points(&[0, 2, 4], &[1, 5, 17]), &big(11));
        assert_eq!(value.unwrap(), big(2));

        let value = Polynomial::lagrange_at(&big(0), points(&[2, 4, 6], &[3, 4, 6]), &big(7));
        assert_eq!(value.unwrap(), big(3));
    }

    #[test]
    fn lagrange_single_point() {
        // A degree-0 polynomial is constant everywhere.
        let value = Polynomial::lagrange_at(&big(0), points(&[5], &[42]), &big(101));
        assert_eq!(value.unwrap(), big(42));
    }

    #[test]
    fn lagrange_invalid_points() {
        assert!(matches!(
            Polynomial::lagrange_at(&big(0), Vec::<(BigUint, BigUint)>::new(), &big(7)),
            Err(Error::NoShares)
        ));
        assert!(matches!(
            Polynomial::lagrange_at(&big(0), points(&[1, 1], &[2, 3]), &big(7)),
            Err(Error::NotInvertible)
        ));
        for prime in [0u32, 1] {
            assert!(matches!(
                Polynomial::lagrange_at(&big(0), points(&[1, 2], &[2, 3]), &big(prime)),
                Err(Error::NotInvertible)
            ));
        }
        // 1 and 8 are the same element of GF(7).
        assert!(matches!(
            Polynomial::lagrange_at(&big(0), points(&[1, 8], &[2, 3]), &big(7)),
            Err(Error::NotInvertible)
        ));
    }

    #[test]
    fn new_rand_is_deterministic_for_seed() {
        let p = mersenne_127();
        let a = Polynomial::new_rand(big(1234), 4, p.clone(), &mut ChaCha20Rng::seed_from_u64(7));
        let b = Polynomial::new_rand(big(1234), 4, p.clone(), &mut ChaCha20Rng::seed_from_u64(7));
        let c = Polynomial::new_rand(big(1234), 4, p, &mut ChaCha20Rng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.degree(), 4);
        assert_eq!(a.constant(), &big(1234));
    }

    #[quickcheck]
    fn lagrange_recovers_constant(constant: u128, degree: u8, seed: u64) -> bool {
        let p = mersenne_127();
        let degree = usize::from(degree % 10);
        let poly = Polynomial::new_rand(
            BigUint::from(constant) % &p,
            degree,
            p.clone(),
            &mut ChaCha20Rng::seed_from_u64(seed),
        );

        let points = (1..=degree as u32 + 1)
            .map(|x| (big(x), poly.evaluate(&big(x))))
            .collect::<Vec<_>>();
        Polynomial::lagrange_at(&BigUint::zero(), &points, &p).unwrap() == *poly.constant()
    }

    #[quickcheck]
    fn lagrange_matches_evaluate(degree: u8, x: u32, seed: u64) -> bool {
        let p = mersenne_127();
        let degree = usize::from(degree % 10);
        let poly = Polynomial::new_rand(
            big(0),
            degree,
            p.clone(),
            &mut ChaCha20Rng::seed_from_u64(seed),
        );

        let points = (1000..=1000 + degree as u32)
            .map(|x| (big(x), poly.evaluate(&big(x))))
            .collect::<Vec<_>>();
        let value = Polynomial::lagrange_at(&big(x), &points, &p).unwrap();
        value == poly.evaluate(&big(x))
    }
}
