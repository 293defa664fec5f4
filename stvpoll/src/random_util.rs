// Copyright 2023-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! The source of all chance in a count. Nothing else in the crate touches a random number generator.

use rand::{Rng, SeedableRng};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use crate::ballot_metadata::ProposalIndex;

/// Where random decisions come from.
/// ```
/// use stvpoll::random_util::Randomness;
/// let mut a = Randomness::seeded(3);
/// let mut b = Randomness::seeded(3);
/// assert_eq!(a.permutation(10),b.permutation(10));
/// assert_eq!(None,Randomness::Disallowed.permutation(10));
/// ```
#[derive(Clone,Debug)]
pub enum Randomness {
    PRNG(ChaCha20Rng),
    /// Any decision needing chance leaves the count incomplete.
    Disallowed,
}

impl Randomness {
    pub fn seeded(seed:u64) -> Self { Randomness::PRNG(ChaCha20Rng::seed_from_u64(seed)) }
    /// Seeded from the thread generator. Not reproducible.
    pub fn from_entropy() -> Self { Self::seeded(rand::rng().random::<u64>()) }

    pub fn is_allowed(&self) -> bool { matches!(self,Randomness::PRNG(_)) }

    /// A uniformly random ordering of the first `n` proposals, or None if chance is not allowed.
    pub fn permutation(&mut self,n:usize) -> Option<Vec<ProposalIndex>> {
        match self {
            Randomness::PRNG(rng) => {
                let mut res : Vec<ProposalIndex> = (0..n).map(ProposalIndex).collect();
                res.shuffle(rng);
                Some(res)
            }
            Randomness::Disallowed => None,
        }
    }

    /// A uniformly random index into something of length `len` (>0), or None if chance is not allowed.
    pub fn choose_index(&mut self,len:usize) -> Option<usize> {
        match self {
            Randomness::PRNG(rng) if len>0 => Some(rng.random_range(0..len)),
            _ => None,
        }
    }
}
