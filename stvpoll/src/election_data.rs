// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! An election: the proposals, the seats, the ballots, and how to count them.

use std::collections::HashSet;
use serde::{Deserialize,Serialize};
use crate::ballot_metadata::{PollMetadata, Proposal, ProposalIndex};
use crate::ballot_paper::RankedVote;
use crate::election_result::ElectionResult;
use crate::error::StvError;
use crate::quota::QuotaRule;
use crate::random_util::Randomness;
use crate::rules::CountingMethod;
use crate::tie_resolution::TieBreaker;

/// Settings that may be changed from the defaults for the counting method.
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct ElectionOptions {
    /// None means the counting method's usual quota.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota : Option<QuotaRule>,
    /// None means the counting method's usual tie breakers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_breakers : Option<Vec<TieBreaker>>,
    /// If false, any tie needing chance leaves the count incomplete.
    pub random_in_tiebreaks : bool,
    /// Resolve the order of proposals elected in the same round by tie breakers rather than just by votes.
    pub pedantic_order : bool,
    /// Seed for the random number generator used by [Election::calculate]. None means a fresh one each time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed : Option<u64>,
    /// Number of threads used for comparing outcomes in CPO-STV.
    pub duel_threads : usize,
}

impl Default for ElectionOptions {
    fn default() -> Self {
        ElectionOptions{ quota: None, tie_breakers: None, random_in_tiebreaks: true, pedantic_order: false, seed: None, duel_threads: 1 }
    }
}

/// A poll that ballots can be added to, and then counted.
#[derive(Debug,Clone)]
pub struct Election {
    pub method : CountingMethod,
    pub metadata : PollMetadata,
    pub seats : usize,
    /// Non-empty ballots.
    pub votes : Vec<RankedVote>,
    /// Ballots with no preferences. Reported, but not counted.
    pub empty_ballot_count : usize,
    pub options : ElectionOptions,
}

impl Election {
    /// Set up a poll. Some methods fix the number of seats (IRV has one), in which case `seats` is ignored.
    pub fn new<P:Into<Proposal>>(method:CountingMethod,seats:usize,proposals:impl IntoIterator<Item=P>,options:ElectionOptions) -> Result<Self,StvError> {
        let seats = method.forced_seats().unwrap_or(seats);
        if seats==0 { return Err(StvError::NoSeats); }
        if options.duel_threads==0 { return Err(StvError::Specification("duel_threads must be at least 1".to_string())); }
        let metadata = PollMetadata::new(proposals.into_iter().map(|p|p.into()).collect())?;
        if metadata.num_proposals()<seats { return Err(StvError::NotEnoughCandidates{ seats, proposals: metadata.num_proposals() }); }
        Ok(Election{ method, metadata, seats, votes: vec![], empty_ballot_count: 0, options })
    }

    /// Add `count` identical ballots. An empty ranking is recorded as an empty ballot.
    pub fn add_ballot<P:Into<Proposal>>(&mut self,ranking:impl IntoIterator<Item=P>,count:usize) -> Result<(),StvError> {
        if count==0 { return Err(StvError::ZeroBallotCount); }
        let mut prefs : Vec<ProposalIndex> = vec![];
        let mut seen : HashSet<ProposalIndex> = HashSet::new();
        for proposal in ranking {
            let proposal : Proposal = proposal.into();
            let index = self.metadata.find(&proposal).ok_or_else(||StvError::CandidateDoesNotExist(proposal.clone()))?;
            if !seen.insert(index) { return Err(StvError::RepeatedPreference(proposal)); }
            prefs.push(index);
        }
        if prefs.is_empty() { self.empty_ballot_count+=count; }
        else { self.votes.push(RankedVote{ prefs, n: count }); }
        Ok(())
    }

    /// The number of non-empty ballots.
    pub fn ballot_count(&self) -> usize { self.votes.iter().map(|v|v.n).sum() }

    /// Count the votes, using randomness as specified in the options.
    pub fn calculate(&self) -> ElectionResult {
        let mut randomness = match self.options.seed {
            Some(seed) => Randomness::seeded(seed),
            None => Randomness::from_entropy(),
        };
        self.calculate_with_randomness(&mut randomness)
    }

    /// Count the votes, drawing on the provided randomness for anything decided by chance.
    pub fn calculate_with_randomness(&self,randomness:&mut Randomness) -> ElectionResult {
        self.method.count(self,randomness)
    }
}

/// A complete description of an election, as might be read from a file.
/// ```
/// use stvpoll::election_data::ElectionSpecification;
/// let spec : ElectionSpecification = serde_json::from_str(r#"{
///   "method":"IRV", "seats":1, "proposals":["a","b"],
///   "ballots":[{"prefs":["a"],"n":2},{"prefs":["b"]}]
/// }"#).unwrap();
/// let result = spec.into_election().unwrap().calculate();
/// assert_eq!(vec![stvpoll::ballot_metadata::Proposal::from("a")],result.elected_names());
/// ```
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ElectionSpecification {
    pub method : CountingMethod,
    pub seats : usize,
    pub proposals : Vec<Proposal>,
    #[serde(default)]
    pub ballots : Vec<BallotSpecification>,
    #[serde(default)]
    pub options : ElectionOptions,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct BallotSpecification {
    pub prefs : Vec<Proposal>,
    #[serde(default="one")]
    pub n : usize,
}

fn one() -> usize { 1 }

impl ElectionSpecification {
    pub fn into_election(self) -> Result<Election,StvError> {
        let mut election = Election::new(self.method,self.seats,self.proposals,self.options)?;
        for ballot in self.ballots {
            election.add_ballot(ballot.prefs,ballot.n)?;
        }
        Ok(election)
    }
}
