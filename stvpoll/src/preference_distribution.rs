// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! The engine shared by all counting methods. The per-round decisions are made by an
//! implementation of [CountingRules]; everything that moves votes or records what happened is here.

use std::collections::{HashSet, VecDeque};
use std::marker::PhantomData;
use log::{debug, info, warn};
use num::BigRational;
use crate::ballot_metadata::{ProposalIndex, ProposalStatus};
use crate::ballot_paper::PreferenceBallot;
use crate::election_data::Election;
use crate::election_result::{ElectionResult, SelectionMethod};
use crate::quota::{QuotaInputs, QuotaRule};
use crate::random_util::Randomness;
use crate::tie_resolution::{TieBreaker, TieBreakerChain, TieContext, Unresolved};
use crate::transfer_value::TransferValue;
use crate::util::extreme_with_ties;
use crate::vote_ledger::VoteLedger;

/// The parts of a counting method that differ between methods.
pub(crate) trait CountingRules {
    fn name() -> &'static str;
    fn default_quota() -> QuotaRule;
    /// The chain used when none is specified.
    fn default_tie_breakers(random_in_tiebreaks:bool) -> Vec<TieBreaker>;
    /// Whether the pedantic_order option is honoured.
    fn allows_pedantic_order() -> bool { true }
    /// Decide and apply the next step of the count. Must make progress: elect, exclude or transfer something.
    fn calculate_round(distributor:&mut PreferenceDistributor<'_,Self>) -> Result<(),Unresolved> where Self:Sized;
}

pub(crate) struct PreferenceDistributor<'a,Rules:CountingRules> {
    pub(crate) election : &'a Election,
    pub(crate) ballots : Vec<PreferenceBallot<'a>>,
    pub(crate) votes : VoteLedger,
    status : Vec<ProposalStatus>,
    seats : usize,
    pub(crate) quota : BigRational,
    pedantic_order : bool,
    random_in_tiebreaks : bool,
    /// drawn once, before counting, if chance is allowed.
    random_list : Option<Vec<ProposalIndex>>,
    tie_breakers : TieBreakerChain,
    randomness : &'a mut Randomness,
    /// elected proposals whose surplus has not been transferred yet, in order of election.
    pub(crate) pending_surplus_distribution : VecDeque<ProposalIndex>,
    pub(crate) result : ElectionResult,
    _rules : PhantomData<Rules>,
}

impl <'a,Rules:CountingRules> PreferenceDistributor<'a,Rules> {
    pub(crate) fn new(election:&'a Election,randomness:&'a mut Randomness) -> Self {
        let options = &election.options;
        let num_proposals = election.metadata.num_proposals();
        let quota_rule = options.quota.clone().unwrap_or_else(Rules::default_quota);
        let quota = quota_rule.compute(&QuotaInputs{ ballot_count: election.ballot_count(), empty_ballot_count: election.empty_ballot_count, seats: election.seats });
        let random_list = if options.random_in_tiebreaks { randomness.permutation(num_proposals) } else { None };
        let tie_breakers = TieBreakerChain::new(options.tie_breakers.clone().unwrap_or_else(||Rules::default_tie_breakers(options.random_in_tiebreaks)));
        let mut result = ElectionResult::new(election.metadata.proposals.clone(),election.seats,election.empty_ballot_count);
        result.quota=quota.clone();
        PreferenceDistributor{
            election,
            ballots: election.votes.iter().map(PreferenceBallot::new).collect(),
            votes: VoteLedger::new(num_proposals),
            status: vec![ProposalStatus::Hopeful;num_proposals],
            seats: election.seats,
            quota,
            pedantic_order: options.pedantic_order && Rules::allows_pedantic_order(),
            random_in_tiebreaks: options.random_in_tiebreaks,
            random_list,
            tie_breakers,
            randomness,
            pending_surplus_distribution: VecDeque::new(),
            result,
            _rules: PhantomData,
        }
    }

    pub(crate) fn seats_to_fill(&self) -> usize { self.seats.saturating_sub(self.result.elected.len()) }

    /// Proposals neither elected nor excluded, in proposal order.
    pub(crate) fn standing_proposals(&self) -> Vec<ProposalIndex> {
        self.status.iter().enumerate().filter(|(_,s)|**s==ProposalStatus::Hopeful).map(|(i,_)|ProposalIndex(i)).collect()
    }
    fn standing_set(&self) -> HashSet<ProposalIndex> { self.standing_proposals().into_iter().collect() }

    pub(crate) fn get_votes(&self,proposal:ProposalIndex) -> BigRational { self.votes.get(proposal) }

    /// The proposal in `sample` with the most (or least) votes, resolving ties via the tie breaker chain.
    pub(crate) fn get_proposal(&mut self,most_votes:bool,sample:&[ProposalIndex]) -> Result<(ProposalIndex,SelectionMethod),Unresolved> {
        let ties = extreme_with_ties(sample,|&p|self.votes.get(p),most_votes);
        match ties.len() {
            0 => Err(Unresolved("No proposals to choose from".to_string())),
            1 => Ok((ties[0],SelectionMethod::Direct)),
            _ => {
                debug!("Tie between {:?} for {} votes",ties,if most_votes {"most"} else {"fewest"});
                let mut context = TieContext{ result: &mut self.result, random_list: self.random_list.as_deref() };
                self.tie_breakers.resolve(ties,most_votes,&mut context)
            }
        }
    }

    /// The `n` proposals in `candidates` with the most votes, or all of them if there are no more than `n`.
    /// A tie at the cut off is resolved by the tie breaker chain.
    pub(crate) fn most_votes(&mut self,candidates:Vec<ProposalIndex>,n:usize) -> Result<Vec<ProposalIndex>,Unresolved> {
        if candidates.len()<=n { return Ok(candidates); }
        let mut sorted = candidates;
        sorted.sort_by(|a,b|self.votes.get(*b).cmp(&self.votes.get(*a)));
        if n==0 { return Ok(vec![]); }
        let cut_off = self.votes.get(sorted[n-1]);
        let (mut chosen,mut tied) : (Vec<ProposalIndex>,Vec<ProposalIndex>) = sorted.into_iter().filter(|&p|self.votes.get(p)>=cut_off).partition(|&p|self.votes.get(p)>cut_off);
        while chosen.len()<n {
            if chosen.len()+tied.len()==n { chosen.append(&mut tied); break; }
            let (proposal,_) = self.get_proposal(true,&tied)?;
            tied.retain(|&p|p!=proposal);
            chosen.push(proposal);
        }
        Ok(chosen)
    }

    /// Choose one of `n` equally good options by lot.
    pub(crate) fn choice(&mut self,n:usize) -> Result<usize,Unresolved> {
        if !self.random_in_tiebreaks { return Err(Unresolved("Could not resolve ties (random disallowed)".to_string())); }
        let chosen = self.randomness.choose_index(n).ok_or_else(||Unresolved("Could not resolve ties (no source of randomness)".to_string()))?;
        warn!("Chose option {} of {} by lot",chosen,n);
        self.result.set_randomized(None);
        Ok(chosen)
    }

    fn note_elected(&mut self,proposal:ProposalIndex,method:SelectionMethod) {
        self.status[proposal.0]=ProposalStatus::Elected;
        info!("Elected {} ({:?}) with {} votes",self.election.metadata.proposal(proposal),method,self.votes.get(proposal));
    }

    pub(crate) fn elect(&mut self,proposal:ProposalIndex,method:SelectionMethod) {
        self.result.new_round(&self.votes);
        self.result.elect(&[proposal],method);
        self.note_elected(proposal,method);
    }

    /// Elect several proposals in one round. Returns them in the order elected, which is by decreasing
    /// votes. With pedantic ordering, equal votes are ordered by the tie breaker chain.
    pub(crate) fn elect_multiple(&mut self,proposals:Vec<ProposalIndex>,method:SelectionMethod) -> Result<Vec<ProposalIndex>,Unresolved> {
        if proposals.is_empty() { return Ok(vec![]); }
        let mut order : Vec<(ProposalIndex,SelectionMethod)> = vec![];
        if self.pedantic_order {
            let mut remaining = proposals;
            while !remaining.is_empty() {
                let (proposal,how) = self.get_proposal(true,&remaining)?;
                remaining.retain(|&p|p!=proposal);
                order.push((proposal,if how==SelectionMethod::Direct { method } else { how }));
            }
        } else {
            let mut sorted = proposals;
            sorted.sort_by(|a,b|self.votes.get(*b).cmp(&self.votes.get(*a)));
            order.extend(sorted.into_iter().map(|p|(p,method)));
        }
        self.result.new_round(&self.votes);
        for &(proposal,how) in &order {
            self.result.elect(&[proposal],how);
            self.note_elected(proposal,how);
        }
        Ok(order.into_iter().map(|(p,_)|p).collect())
    }

    pub(crate) fn exclude(&mut self,proposal:ProposalIndex,method:SelectionMethod) {
        self.status[proposal.0]=ProposalStatus::Excluded;
        self.result.new_round(&self.votes);
        self.result.exclude(proposal,method);
        info!("Excluded {} ({:?}) with {} votes",self.election.metadata.proposal(proposal),method,self.votes.get(proposal));
    }

    /// Pass on the given fraction of each of the departing proposal's ballots to the next standing preference.
    pub(crate) fn transfer_votes(&mut self,departing:ProposalIndex,fraction:&TransferValue) {
        let standing = self.standing_set();
        let entry = self.votes.transfer(&mut self.ballots,departing,fraction,&standing);
        self.result.exhausted=entry.exhausted_votes.clone();
        self.result.transfer_log.push(entry);
    }

    /// Transfer whatever is above quota, leaving the proposal with exactly the quota.
    pub(crate) fn transfer_surplus(&mut self,proposal:ProposalIndex) {
        let fraction = TransferValue::from_surplus(&self.votes.get(proposal),&self.quota);
        self.transfer_votes(proposal,&fraction);
    }

    pub(crate) fn initial_votes(&mut self) {
        let all : Vec<ProposalIndex> = self.election.metadata.all_indices().collect();
        let entry = self.votes.initial_votes(&self.ballots,&all);
        self.result.transfer_log.push(entry);
    }

    pub(crate) fn go(&mut self) {
        info!("Counting {} ballots for {} seats with {} rules, quota {}",self.election.ballot_count(),self.seats,Rules::name(),self.quota);
        self.initial_votes();
        while self.seats_to_fill()>0 {
            let outcome = if self.standing_proposals().is_empty() && self.pending_surplus_distribution.is_empty() {
                Err(Unresolved("No proposals left standing".to_string()))
            } else { Rules::calculate_round(self) };
            if let Err(Unresolved(reason)) = outcome {
                warn!("Count incomplete : {}",reason);
                self.result.incomplete_reason=Some(reason);
                break;
            }
        }
        self.result.finish();
        info!("Elected {:?}",self.result.elected_names());
    }
}

/// Run a complete count of the election with the given rules.
pub(crate) fn distribute_preferences<Rules:CountingRules>(election:&Election,randomness:&mut Randomness) -> ElectionResult {
    let mut work : PreferenceDistributor<'_,Rules> = PreferenceDistributor::new(election,randomness);
    work.go();
    work.result
}
