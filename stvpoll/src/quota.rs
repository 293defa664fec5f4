// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Quota formulae. The quota is computed once per count, from the non-empty ballots.

use std::fmt;
use num::{BigInt, BigRational};
use serde::{Deserialize, Serialize};

/// What a quota is computed from.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct QuotaInputs {
    /// the number of formal (non-empty) ballots.
    pub ballot_count : usize,
    /// reported, but not used by any of the standard quotas.
    pub empty_ballot_count : usize,
    pub seats : usize,
}

#[derive(Clone,Serialize,Deserialize)]
pub enum QuotaRule {
    /// floor(ballots/(seats+1))+1
    Droop,
    /// floor(ballots/(seats+1))
    HagenbachBischof,
    /// floor(ballots/2)+1, a strict majority.
    IrvMajority,
    /// A number decided in advance.
    Fixed(u64),
    /// Caller supplied formula. Can't be serialized.
    #[serde(skip)]
    Custom(fn(&QuotaInputs)->BigRational),
}

impl QuotaRule {
    pub fn compute(&self,inputs:&QuotaInputs) -> BigRational {
        let whole = |n:usize|BigRational::from_integer(BigInt::from(n));
        match self {
            QuotaRule::Droop => whole(inputs.ballot_count/(inputs.seats+1)+1),
            QuotaRule::HagenbachBischof => whole(inputs.ballot_count/(inputs.seats+1)),
            QuotaRule::IrvMajority => whole(inputs.ballot_count/2+1),
            QuotaRule::Fixed(n) => BigRational::from_integer(BigInt::from(*n)),
            QuotaRule::Custom(f) => f(inputs),
        }
    }
}

impl fmt::Debug for QuotaRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaRule::Droop => f.write_str("Droop"),
            QuotaRule::HagenbachBischof => f.write_str("HagenbachBischof"),
            QuotaRule::IrvMajority => f.write_str("IrvMajority"),
            QuotaRule::Fixed(n) => write!(f,"Fixed({})",n),
            QuotaRule::Custom(_) => f.write_str("Custom"),
        }
    }
}
