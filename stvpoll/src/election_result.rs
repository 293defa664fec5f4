// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Store the history of a count, and what came out of it.

use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};
use num::{BigRational, Zero};
use serde::{Serialize,Deserialize};
use crate::ballot_metadata::{Proposal, ProposalIndex, ProposalStatus};
use crate::transfer_value::StringSerializedRational;
use crate::vote_ledger::{TransferLogEntry, VoteLedger};

/// key in [ElectionResult::extra_data] that is true iff chance decided something.
pub const RANDOMIZED : &str = "randomized";
/// key in [ElectionResult::extra_data] holding the random ordering of proposals used, if it was used.
pub const RANDOMIZED_PROPOSAL_LIST : &str = "randomized_proposal_list";

/// How the proposal(s) in a round were picked.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum SelectionMethod {
    /// Reached quota, or was unambiguously lowest.
    #[serde(rename = "direct")]
    Direct,
    /// A tie resolved by looking at earlier tallies.
    #[serde(rename = "tiebreak_history")]
    History,
    /// A tie resolved by lot.
    #[serde(rename = "tiebreak_random")]
    Random,
    /// As many standing as seats left.
    #[serde(rename = "no_competition_left")]
    NoCompetition,
    /// Chosen as the best outcome by comparison of pairs of outcomes.
    #[serde(rename = "cpo")]
    Cpo,
}

/// One round of the count. Created with a snapshot of the tallies at the start of the round.
#[derive(Clone,Debug)]
pub struct ElectionRound {
    /// 1 is the first round.
    pub index : usize,
    pub votes : VoteLedger,
    pub selected : Vec<ProposalIndex>,
    /// If several proposals are selected one at a time, this is how the last was selected.
    pub method : Option<SelectionMethod>,
    pub status : Option<ProposalStatus>,
}

impl ElectionRound {
    fn select(&mut self,proposals:&[ProposalIndex],method:SelectionMethod,status:ProposalStatus) {
        self.selected.extend_from_slice(proposals);
        self.method=Some(method);
        self.status=Some(status);
    }
}

/// Everything that came out of a count.
#[derive(Clone,Debug)]
pub struct ElectionResult {
    /// All proposals, in the order used by [ProposalIndex].
    pub proposals : Vec<Proposal>,
    pub seats : usize,
    pub rounds : Vec<ElectionRound>,
    /// in order of election.
    pub elected : Vec<ProposalIndex>,
    pub transfer_log : Vec<TransferLogEntry>,
    pub quota : BigRational,
    pub exhausted : BigRational,
    pub empty_ballot_count : usize,
    pub runtime : Duration,
    /// Facts recorded by tie resolution and similar, such as whether randomness was used.
    pub extra_data : BTreeMap<String,serde_json::Value>,
    /// Why the count stopped early, if it did.
    pub incomplete_reason : Option<String>,
    started : Instant,
}

impl ElectionResult {
    pub fn new(proposals:Vec<Proposal>,seats:usize,empty_ballot_count:usize) -> Self {
        let mut extra_data = BTreeMap::new();
        extra_data.insert(RANDOMIZED.to_string(),serde_json::Value::Bool(false));
        ElectionResult{
            proposals,
            seats,
            rounds: vec![],
            elected: vec![],
            transfer_log: vec![],
            quota: BigRational::zero(),
            exhausted: BigRational::zero(),
            empty_ballot_count,
            runtime: Duration::ZERO,
            extra_data,
            incomplete_reason: None,
            started: Instant::now(),
        }
    }

    pub fn new_round(&mut self,votes:&VoteLedger) {
        let index = self.rounds.len()+1;
        self.rounds.push(ElectionRound{ index, votes: votes.clone(), selected: vec![], method: None, status: None });
    }

    fn current_round(&mut self) -> &mut ElectionRound {
        if self.rounds.is_empty() { self.new_round(&VoteLedger::new(self.proposals.len())); }
        let last = self.rounds.len()-1;
        &mut self.rounds[last]
    }

    pub fn elect(&mut self,proposals:&[ProposalIndex],method:SelectionMethod) {
        self.elected.extend_from_slice(proposals);
        self.current_round().select(proposals,method,ProposalStatus::Elected);
    }

    pub fn exclude(&mut self,proposal:ProposalIndex,method:SelectionMethod) {
        self.current_round().select(&[proposal],method,ProposalStatus::Excluded);
    }

    pub fn finish(&mut self) {
        self.runtime=self.started.elapsed();
    }

    pub fn is_complete(&self) -> bool { self.elected.len()==self.seats }

    pub fn elected_names(&self) -> Vec<Proposal> { self.elected.iter().map(|p|self.proposals[p.0].clone()).collect() }

    pub fn elected_as_set(&self) -> HashSet<Proposal> { self.elected_names().into_iter().collect() }

    pub fn randomized(&self) -> bool {
        self.extra_data.get(RANDOMIZED).and_then(|v|v.as_bool()).unwrap_or(false)
    }

    /// Note that chance was used. The ordering used, if any, is recorded the first time.
    pub fn set_randomized(&mut self,proposal_order:Option<&[ProposalIndex]>) {
        self.extra_data.insert(RANDOMIZED.to_string(),serde_json::Value::Bool(true));
        if self.extra_data.contains_key(RANDOMIZED_PROPOSAL_LIST) { return; }
        if let Some(order) = proposal_order {
            let names : Vec<Proposal> = order.iter().map(|p|self.proposals[p.0].clone()).collect();
            if let Ok(value) = serde_json::to_value(names) {
                self.extra_data.insert(RANDOMIZED_PROPOSAL_LIST.to_string(),value);
            }
        }
    }

    /// A summary suitable for serialization.
    pub fn as_report(&self) -> ElectionReport {
        let name = |p:&ProposalIndex|self.proposals[p.0].clone();
        ElectionReport{
            winners: self.elected.iter().map(name).collect(),
            proposals: self.proposals.clone(),
            complete: self.is_complete(),
            rounds: self.rounds.iter().map(|r|RoundReport{
                status: r.status,
                selected: r.selected.iter().map(name).collect(),
                method: r.method,
                vote_count: r.votes.iter().map(|(p,v)|(name(&p),v.into())).collect(),
            }).collect(),
            quota: (&self.quota).into(),
            runtime: self.runtime.as_secs_f64(),
            empty_ballot_count: self.empty_ballot_count,
            incomplete_reason: self.incomplete_reason.clone(),
            extra_data: self.extra_data.clone(),
        }
    }
}

#[derive(Clone,Debug,Serialize)]
pub struct RoundReport {
    pub status : Option<ProposalStatus>,
    pub selected : Vec<Proposal>,
    pub method : Option<SelectionMethod>,
    pub vote_count : Vec<(Proposal,StringSerializedRational)>,
}

/// The externally visible form of an [ElectionResult].
#[derive(Clone,Debug,Serialize)]
pub struct ElectionReport {
    pub winners : Vec<Proposal>,
    pub proposals : Vec<Proposal>,
    pub complete : bool,
    pub rounds : Vec<RoundReport>,
    pub quota : StringSerializedRational,
    /// seconds
    pub runtime : f64,
    pub empty_ballot_count : usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_reason : Option<String>,
    #[serde(flatten)]
    pub extra_data : BTreeMap<String,serde_json::Value>,
}
