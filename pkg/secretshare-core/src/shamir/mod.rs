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

//! This module implements Shamir Secret Sharing over the prime fields of the
//! [modulus table](crate::field::tier). A secret is embedded as the constant
//! term of a random polynomial of degree `t - 1`, and share `i` is the value
//! of that polynomial at `x = i`.
//!
//! ## Security ##
//! **This implementation is not constant time and has not been reviewed by
//! any cryptographers.** Shares are not authenticated, and [`combine`] will
//! happily interpolate an incorrect secret from too few shares or from shares
//! which belong to different secrets.

mod poly;

pub use poly::Polynomial;

use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use rayon::prelude::*;

use crate::{
    error::Error,
    field::tier::select_modulus,
    value::{Secret, Share},
};

/// Splits secrets into `share_count` shares, `threshold` of which are needed
/// to recover them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecretShare {
    threshold: u8,
    share_count: u8,
}

impl SecretShare {
    pub fn new(threshold: u8, share_count: u8) -> Result<Self, Error> {
        if threshold == 0 || threshold > share_count {
            return Err(Error::InvalidParameters {
                threshold,
                share_count,
            });
        }
        Ok(Self {
            threshold,
            share_count,
        })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn share_count(&self) -> u8 {
        self.share_count
    }

    /// Split `secret` using the operating system's CSPRNG.
    pub fn split(&self, secret: &Secret) -> Result<Vec<Share>, Error> {
        self.split_with_rng(secret, &mut OsRng)
    }

    /// Split `secret` into shares at the points `1..=share_count`, in order.
    ///
    /// The modulus is the smallest tier which is larger than both the secret
    /// and the share count.
    pub fn split_with_rng<R: CryptoRng + RngCore + ?Sized>(
        &self,
        secret: &Secret,
        rng: &mut R,
    ) -> Result<Vec<Share>, Error> {
        let count_bits = u64::from(u8::BITS - self.share_count.leading_zeros());
        let modulus = select_modulus(secret.bit_length().max(count_bits))?;
        tracing::debug!(
            threshold = self.threshold,
            share_count = self.share_count,
            tier_bits = modulus.bits(),
            "splitting secret"
        );

        let poly = Polynomial::new_rand(
            secret.value().clone(),
            usize::from(self.threshold - 1),
            modulus.prime().clone(),
            rng,
        );

        (1..=self.share_count)
            .into_par_iter()
            .map(|x| Share::new(x, poly.evaluate(&BigUint::from(x)), modulus))
            .collect()
    }

    /// Equivalent to the free function [`combine`]. The threshold of the
    /// engine is *not* checked against the number of shares.
    pub fn combine<S: AsRef<[Share]>>(&self, shares: S) -> Result<Secret, Error> {
        combine(shares)
    }
}

/// Reconstruct a secret from a set of shares by interpolating the sharing
/// polynomial at `x = 0`.
///
/// Shares must all have distinct points and the same width (i.e. come from
/// the same modulus tier). Beyond that, nothing is checked: the result is
/// only the original secret if at least `threshold` shares from the same
/// split were provided.
pub fn combine<S: AsRef<[Share]>>(shares: S) -> Result<Secret, Error> {
    let shares = shares.as_ref();
    let first = shares.first().ok_or(Error::NoShares)?;

    if let Some(point) = shares.iter().map(Share::point).duplicates().next() {
        return Err(Error::DuplicatePoint(point));
    }
    if let Some(share) = shares.iter().find(|s| s.width() != first.width()) {
        return Err(Error::InconsistentShareWidth {
            expected: first.width(),
            found: share.width(),
        });
    }

    let modulus = first.modulus();
    tracing::debug!(
        num_shares = shares.len(),
        tier_bits = modulus.bits(),
        "combining shares"
    );

    let points = shares
        .iter()
        .map(|s| (BigUint::from(s.point()), s.value().clone()))
        .collect::<Vec<_>>();
    let value = Polynomial::lagrange_at(&BigUint::zero(), points, modulus.prime())?;
    Secret::new(value)
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::{
        error::DecodeError,
        field::tier::Modulus,
        value::{FromWire, ToWire},
    };

    use num_traits::One;
    use quickcheck::TestResult;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn seeded(seed: u64) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(seed)
    }

    #[test]
    fn invalid_parameters() {
        for (threshold, share_count) in [(0, 3), (4, 3), (0, 0), (1, 0), (255, 254)] {
            assert!(
                matches!(
                    SecretShare::new(threshold, share_count),
                    Err(Error::InvalidParameters { .. })
                ),
                "({}, {})",
                threshold,
                share_count
            );
        }
        for (threshold, share_count) in [(1, 1), (1, 255), (3, 5), (255, 255)] {
            let sharer = SecretShare::new(threshold, share_count).unwrap();
            assert_eq!(sharer.threshold(), threshold);
            assert_eq!(sharer.share_count(), share_count);
        }
    }

    #[test]
    fn every_subset_recovers() {
        let secret = Secret::new(1234567890u32).unwrap();
        let shares = SecretShare::new(3, 5).unwrap().split(&secret).unwrap();
        assert_eq!(shares.len(), 5);

        for subset in shares.iter().cloned().combinations(3) {
            assert_eq!(combine(&subset).unwrap(), secret);
        }
        // More than the threshold also works.
        for subset in shares.iter().cloned().combinations(4) {
            assert_eq!(combine(&subset).unwrap(), secret);
        }
        assert_eq!(combine(&shares).unwrap(), secret);
    }

    #[test]
    fn order_does_not_matter() {
        let secret = Secret::new(1234567890u32).unwrap();
        let mut shares = SecretShare::new(3, 5)
            .unwrap()
            .split_with_rng(&secret, &mut seeded(1))
            .unwrap();
        shares.reverse();
        assert_eq!(combine(&shares[..3]).unwrap(), secret);
        shares.swap(0, 2);
        assert_eq!(combine(&shares[1..4]).unwrap(), secret);
    }

    #[test]
    fn too_few_shares_diverge() {
        let secret = Secret::new(1234567890u32).unwrap();
        let shares = SecretShare::new(3, 5)
            .unwrap()
            .split_with_rng(&secret, &mut seeded(2))
            .unwrap();

        for subset in shares.iter().cloned().combinations(2) {
            // No error, just the wrong answer.
            let recovered = combine(&subset).unwrap();
            assert_ne!(recovered, secret);
        }
    }

    #[test]
    fn points_are_sequential() {
        let secret = Secret::new(42u32).unwrap();
        let shares = SecretShare::new(2, 10).unwrap().split(&secret).unwrap();
        let points = shares.iter().map(Share::point).collect::<Vec<_>>();
        assert_eq!(points, (1..=10).collect::<Vec<u8>>());
        assert!(shares.iter().all(|s| s.modulus() == Modulus::smallest()));
    }

    #[test]
    fn duplicate_points() {
        let secret = Secret::new(42u32).unwrap();
        let shares = SecretShare::new(2, 3).unwrap().split(&secret).unwrap();
        let duplicated = vec![shares[0].clone(), shares[1].clone(), shares[0].clone()];
        assert!(matches!(
            combine(duplicated),
            Err(Error::DuplicatePoint(1))
        ));
    }

    #[test]
    fn inconsistent_widths() {
        let small = SecretShare::new(2, 3)
            .unwrap()
            .split(&Secret::new(42u32).unwrap())
            .unwrap();
        let large_secret = Secret::new(BigUint::one() << 200u32).unwrap();
        let large = SecretShare::new(2, 3).unwrap().split(&large_secret).unwrap();

        assert!(matches!(
            combine(vec![small[0].clone(), large[1].clone()]),
            Err(Error::InconsistentShareWidth {
                expected: 16,
                found: 32
            })
        ));
    }

    #[test]
    fn no_shares() {
        assert!(matches!(combine(Vec::<Share>::new()), Err(Error::NoShares)));
        let sharer = SecretShare::new(1, 1).unwrap();
        assert!(matches!(sharer.combine(Vec::<Share>::new()), Err(Error::NoShares)));
    }

    #[test]
    fn threshold_of_one() {
        let secret = Secret::new(1234567890u32).unwrap();
        let shares = SecretShare::new(1, 5).unwrap().split(&secret).unwrap();
        for share in &shares {
            assert_eq!(share.value(), secret.value());
            assert_eq!(combine([share.clone()]).unwrap(), secret);
        }
    }

    #[test]
    fn threshold_of_all() {
        let secret = Secret::new(1234567890u32).unwrap();
        let shares = SecretShare::new(5, 5)
            .unwrap()
            .split_with_rng(&secret, &mut seeded(3))
            .unwrap();
        assert_eq!(combine(&shares).unwrap(), secret);
        for subset in shares.iter().cloned().combinations(4) {
            assert_ne!(combine(&subset).unwrap(), secret);
        }
    }

    #[test]
    fn maximum_share_count() {
        let secret = Secret::new(0u32).unwrap();
        let shares = SecretShare::new(3, 255).unwrap().split(&secret).unwrap();
        assert_eq!(shares.len(), 255);
        assert_eq!(shares.last().unwrap().point(), 255);
        assert_eq!(combine(&shares[100..103]).unwrap(), secret);
    }

    #[test]
    fn deterministic_with_seed() {
        let secret = Secret::new(1234567890u32).unwrap();
        let sharer = SecretShare::new(3, 5).unwrap();
        let a = sharer.split_with_rng(&secret, &mut seeded(4)).unwrap();
        let b = sharer.split_with_rng(&secret, &mut seeded(4)).unwrap();
        let c = sharer.split_with_rng(&secret, &mut seeded(5)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn every_tier_roundtrips() {
        let sharer = SecretShare::new(2, 3).unwrap();
        for modulus in Modulus::all() {
            // Largest secret which is still split in this tier.
            let secret = Secret::new((BigUint::one() << modulus.capacity_bits()) - 1u32).unwrap();
            let shares = sharer.split_with_rng(&secret, &mut seeded(6)).unwrap();
            assert!(shares.iter().all(|s| s.modulus() == modulus), "{:?}", modulus);
            assert_eq!(combine(&shares[1..]).unwrap(), secret, "{:?}", modulus);
        }
    }

    #[test]
    fn unsupported_secret_size() {
        // Representable, but too large to leave room for a larger prime.
        let secret = Secret::new((BigUint::one() << 9688u32) + 1u32).unwrap();
        assert_eq!(secret.bit_length(), 9689);
        assert!(matches!(
            SecretShare::new(2, 3).unwrap().split(&secret),
            Err(Error::UnsupportedSecretSize {
                bits: 9689,
                max_bits: 9688
            })
        ));
    }

    #[test]
    fn mixed_sessions_diverge() {
        let secret = Secret::new(1234567890u32).unwrap();
        let sharer = SecretShare::new(3, 5).unwrap();
        let a = sharer.split_with_rng(&secret, &mut seeded(7)).unwrap();
        let b = sharer.split_with_rng(&secret, &mut seeded(8)).unwrap();
        let mixed = vec![a[0].clone(), a[1].clone(), b[2].clone()];
        assert_ne!(combine(mixed).unwrap(), secret);
    }

    #[test]
    fn hex_transport() {
        let secret = Secret::from_hex("0xdeadbeefcafebabe").unwrap();
        let encoded = SecretShare::new(2, 4)
            .unwrap()
            .split(&secret)
            .unwrap()
            .iter()
            .map(ToWire::to_hex)
            .collect::<Vec<_>>();
        assert!(encoded.iter().all(|s| s.len() == 2 * 17));

        let decoded = encoded[2..]
            .iter()
            .map(Share::from_hex)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(combine(decoded).unwrap(), secret);
    }

    #[test]
    fn truncated_share_is_rejected() {
        let secret = Secret::new(42u32).unwrap();
        let shares = SecretShare::new(2, 3).unwrap().split(&secret).unwrap();
        let mut wire = shares[0].to_wire();
        wire.pop();
        assert!(matches!(
            Share::from_wire(wire),
            Err(Error::Decode(DecodeError::UnknownWidth(15)))
        ));
    }

    #[quickcheck]
    fn split_combine_roundtrip(secret: Secret, threshold: u8, share_count: u8) -> TestResult {
        let share_count = share_count % 8 + 1;
        let threshold = threshold % share_count + 1;
        let shares = match SecretShare::new(threshold, share_count)
            .and_then(|sharer| sharer.split(&secret))
        {
            Ok(shares) => shares,
            Err(err) => return TestResult::error(err.to_string()),
        };
        let start = usize::from(share_count - threshold);
        TestResult::from_bool(combine(&shares[start..]).unwrap() == secret)
    }
}
