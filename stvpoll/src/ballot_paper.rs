// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Ballots. A [RankedVote] is what the voter wrote, and never changes once ingested.
//! A [PreferenceBallot] is the state of such a vote part way through a count.

use std::collections::HashSet;
use num::{BigRational, One, BigInt};
use serde::{Deserialize, Serialize};
use crate::ballot_metadata::ProposalIndex;
use crate::transfer_value::TransferValue;

/// A ranking of distinct proposals, most preferred first, cast by `n` identical voters.
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RankedVote {
    pub prefs : Vec<ProposalIndex>,
    pub n : usize,
}

/// A vote part way through being distributed.
/// May consist of multiple independent identical votes.
///
/// The preferences are borrowed so that many counts (such as CPO duels) can share one copy
/// of the ballots while each keeps its own position and weight.
#[derive(Clone,Debug)]
pub struct PreferenceBallot<'a> {
    /// Preferred proposals, with index 0 being the most favoured.
    pub prefs : &'a [ProposalIndex],
    /// The number of voters.
    pub count : usize,
    /// The fraction of the ballot still live. Never increases.
    multiplier : BigRational,
    /// the preference currently being considered. Equal to prefs.len() when exhausted.
    upto : usize,
}

impl <'a> PreferenceBallot<'a> {
    pub fn new(vote:&'a RankedVote) -> Self {
        PreferenceBallot{ prefs: &vote.prefs, count: vote.n, multiplier: BigRational::one(), upto: 0 }
    }

    pub fn multiplier(&self) -> &BigRational { &self.multiplier }

    /// count × multiplier
    pub fn value(&self) -> BigRational {
        &self.multiplier*BigRational::from_integer(BigInt::from(self.count))
    }

    pub fn is_exhausted(&self) -> bool { self.upto>=self.prefs.len() }

    /// The proposal this ballot currently counts for, or None if exhausted.
    pub fn current_preference(&self) -> Option<ProposalIndex> { self.prefs.get(self.upto).cloned() }

    /// Move on past the current preference to the next one that is still standing.
    /// Returns it, or None if the ballot has become exhausted. Does nothing to an exhausted ballot.
    pub fn advance_to_next_standing(&mut self,standing:&HashSet<ProposalIndex>) -> Option<ProposalIndex> {
        while !self.is_exhausted() {
            self.upto+=1;
            if let Some(p) = self.current_preference() {
                if standing.contains(&p) { return Some(p); }
            }
        }
        None
    }

    /// Keep only the given fraction of the ballot's weight (the part that moves on).
    pub fn decrease_value(&mut self,fraction:&TransferValue) {
        debug_assert!(fraction.is_valid_fraction());
        self.multiplier*=fraction.as_rational();
    }
}
