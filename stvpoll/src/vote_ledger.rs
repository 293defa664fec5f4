// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! The tally of votes per proposal, and the single path by which votes move between proposals.
//!
//! Conservation: at all times the sum of the ledger plus the exhausted total equals the sum of
//! the counts of all (non-empty) ballots.

use std::collections::{BTreeMap, HashSet};
use num::{BigRational, One, Zero};
use log::debug;
use crate::ballot_metadata::ProposalIndex;
use crate::ballot_paper::PreferenceBallot;
use crate::transfer_value::TransferValue;

/// Vote weight per proposal. A proposal has no entry once its votes have been transferred away
/// on exclusion, or before it is first seeded.
#[derive(Clone,Debug,PartialEq)]
pub struct VoteLedger {
    tallies : Vec<Option<BigRational>>,
    exhausted : BigRational,
}

/// What happened in one call to [VoteLedger::transfer] or [VoteLedger::initial_votes].
#[derive(Clone,Debug)]
pub struct TransferLogEntry {
    /// (from,to) -> weight. None for the initial distribution of first preferences.
    pub transfers : Option<BTreeMap<(ProposalIndex,ProposalIndex),BigRational>>,
    /// the ledger after the transfer.
    pub current_votes : VoteLedger,
    pub exhausted_votes : BigRational,
}

impl VoteLedger {
    /// An empty ledger for `num_proposals` proposals.
    pub fn new(num_proposals:usize) -> Self {
        VoteLedger{ tallies: vec![None;num_proposals], exhausted: BigRational::zero() }
    }

    /// The votes for a proposal, zero if it has no entry.
    pub fn get(&self,proposal:ProposalIndex) -> BigRational {
        self.tallies[proposal.0].clone().unwrap_or_else(BigRational::zero)
    }
    pub fn contains(&self,proposal:ProposalIndex) -> bool { self.tallies[proposal.0].is_some() }
    pub fn set(&mut self,proposal:ProposalIndex,votes:BigRational) { self.tallies[proposal.0]=Some(votes); }
    pub fn remove(&mut self,proposal:ProposalIndex) -> Option<BigRational> { self.tallies[proposal.0].take() }
    fn add(&mut self,proposal:ProposalIndex,votes:&BigRational) {
        *self.tallies[proposal.0].get_or_insert_with(BigRational::zero)+=votes;
    }
    pub fn exhausted(&self) -> &BigRational { &self.exhausted }

    /// entries present, in proposal order.
    pub fn iter(&self) -> impl Iterator<Item=(ProposalIndex,&BigRational)> + '_ {
        self.tallies.iter().enumerate().filter_map(|(i,v)|v.as_ref().map(|v|(ProposalIndex(i),v)))
    }

    /// Sum of all entries (not including exhausted).
    pub fn total(&self) -> BigRational {
        self.iter().fold(BigRational::zero(),|acc,(_,v)|acc+v)
    }

    /// Seed the ledger with every ballot's first preference at full value.
    /// Every proposal in `seed` gets an entry, even if zero.
    pub fn initial_votes(&mut self,ballots:&[PreferenceBallot<'_>],seed:&[ProposalIndex]) -> TransferLogEntry {
        for &p in seed { if !self.contains(p) { self.set(p,BigRational::zero()); } }
        for ballot in ballots {
            if let Some(p) = ballot.current_preference() {
                self.add(p,&ballot.value());
            }
        }
        TransferLogEntry{ transfers: None, current_votes: self.clone(), exhausted_votes: self.exhausted.clone() }
    }

    /// Move the votes of `departing` on to the next standing preference of each ballot currently with it.
    ///
    /// Each such ballot keeps `fraction` of its value, which moves on; what does not move stays with
    /// `departing`. If `fraction` is one (an exclusion) `departing` loses its entry entirely; otherwise
    /// it keeps the retained part (for an elected proposal with a surplus, exactly the quota).
    pub fn transfer(&mut self,ballots:&mut [PreferenceBallot<'_>],departing:ProposalIndex,fraction:&TransferValue,standing:&HashSet<ProposalIndex>) -> TransferLogEntry {
        let mut transfers : BTreeMap<(ProposalIndex,ProposalIndex),BigRational> = BTreeMap::new();
        let mut moved = BigRational::zero();
        for ballot in ballots.iter_mut() {
            if ballot.current_preference()==Some(departing) {
                ballot.decrease_value(fraction);
                let value = ballot.value();
                moved+=&value;
                match ballot.advance_to_next_standing(standing) {
                    Some(target) => {
                        self.add(target,&value);
                        *transfers.entry((departing,target)).or_insert_with(BigRational::zero)+=&value;
                    }
                    None => { self.exhausted+=&value; }
                }
            }
        }
        let previous = self.remove(departing).unwrap_or_else(BigRational::zero);
        if !fraction.as_rational().is_one() {
            self.set(departing,previous-&moved);
        }
        debug!("Transferred {} from {} at fraction {}; exhausted now {}",moved,departing,fraction,self.exhausted);
        TransferLogEntry{ transfers: Some(transfers), current_votes: self.clone(), exhausted_votes: self.exhausted.clone() }
    }
}
