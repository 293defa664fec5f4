// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Comparison of Pairs of Outcomes STV.
//!
//! After electing anyone clearly over quota, every possible set of winners for the remaining seats
//! (an outcome) is compared against every other in a small count of its own (a duel). The outcome
//! that wins all its duels is elected. Failing that, the Smith set of outcomes is found and
//! the one with the smallest worst defeat is elected.

use std::collections::{BTreeSet, HashSet};
use std::thread;
use itertools::Itertools;
use log::{debug, info};
use num::BigRational;
use num::Zero;
use crate::ballot_metadata::ProposalIndex;
use crate::ballot_paper::{PreferenceBallot, RankedVote};
use crate::election_result::SelectionMethod;
use crate::preference_distribution::{CountingRules, PreferenceDistributor};
use crate::quota::{QuotaInputs, QuotaRule};
use crate::smith_set::{minimax, smith_set, PairwiseResult};
use crate::tie_resolution::{TieBreaker, Unresolved};
use crate::transfer_value::TransferValue;
use crate::util::choose;
use crate::vote_ledger::VoteLedger;

pub struct CpoStv {}

impl CpoStv {
    /// The number of possible outcomes when choosing `winners` of `proposals`, or None if too many to count.
    pub fn possible_combinations(proposals:usize,winners:usize) -> Option<usize> { choose(proposals,winners) }
}

impl CountingRules for CpoStv {
    fn name() -> &'static str { "CPOSTV" }
    fn default_quota() -> QuotaRule { QuotaRule::HagenbachBischof }
    fn default_tie_breakers(random_in_tiebreaks: bool) -> Vec<TieBreaker> {
        if random_in_tiebreaks { vec![TieBreaker::TransferHistory,TieBreaker::RandomList] } else { vec![TieBreaker::TransferHistory] }
    }
    fn allows_pedantic_order() -> bool { false }

    /// The whole count is decided in one call.
    fn calculate_round(distributor: &mut PreferenceDistributor<'_, Self>) -> Result<(), Unresolved> {
        let standing = distributor.standing_proposals();
        if distributor.result.elected.is_empty() && standing.len()==distributor.seats_to_fill() {
            distributor.elect_multiple(standing,SelectionMethod::Direct)?;
            return Ok(());
        }
        let over_quota : Vec<ProposalIndex> = standing.iter().cloned().filter(|&p|distributor.get_votes(p)>distributor.quota).collect();
        let over_quota = distributor.most_votes(over_quota,distributor.seats_to_fill())?;
        let elected = distributor.elect_multiple(over_quota,SelectionMethod::Direct)?;
        settle_surpluses(distributor,elected);
        if distributor.seats_to_fill()==0 { return Ok(()); }
        let standing = distributor.standing_proposals();
        if standing.len()<=distributor.seats_to_fill() {
            distributor.elect_multiple(standing,SelectionMethod::NoCompetition)?;
            return Ok(());
        }
        let outcome = best_outcome(distributor,&standing)?;
        let elected = distributor.elect_multiple(outcome,SelectionMethod::Cpo)?;
        settle_surpluses(distributor,elected);
        Ok(())
    }
}

/// Pass on anything above quota. Those elected never keep more than the quota.
fn settle_surpluses(distributor:&mut PreferenceDistributor<'_,CpoStv>,elected:Vec<ProposalIndex>) {
    for p in elected {
        if distributor.get_votes(p)>distributor.quota { distributor.transfer_surplus(p); }
    }
}

/// The winning set of proposals, chosen from all combinations of `seats_to_fill` of the `standing` proposals.
fn best_outcome(distributor:&mut PreferenceDistributor<'_,CpoStv>,standing:&[ProposalIndex]) -> Result<Vec<ProposalIndex>,Unresolved> {
    let outcomes : Vec<Vec<ProposalIndex>> = standing.iter().cloned().combinations(distributor.seats_to_fill()).collect();
    let pairs : Vec<(usize,usize)> = (0..outcomes.len()).tuple_combinations().collect();
    info!("Comparing {} possible outcomes in {} duels",outcomes.len(),pairs.len());
    let election = distributor.election;
    let context = DuelContext{
        votes: &election.votes,
        num_proposals: election.metadata.num_proposals(),
        quota: QuotaRule::HagenbachBischof.compute(&QuotaInputs{ ballot_count: election.ballot_count(), empty_ballot_count: election.empty_ballot_count, seats: election.seats }),
        already_elected: &distributor.result.elected,
        outcomes: &outcomes,
    };
    let duels = context.run_all(&pairs,election.options.duel_threads);
    if let Some(winner) = undefeated(outcomes.len(),&duels) {
        debug!("Outcome {:?} won all its duels",outcomes[winner]);
        return Ok(outcomes[winner].clone());
    }
    let smith = smith_set(outcomes.len(),&duels);
    debug!("Smith set is {:?}",smith.iter().map(|&o|&outcomes[o]).collect::<Vec<_>>());
    let best = minimax(&smith,&duels);
    let chosen = if best.len()==1 { best[0] } else { best[distributor.choice(best.len())?] };
    Ok(outcomes[chosen].clone())
}

/// The single outcome, if there is one, that won at least one duel and did not lose or tie any.
fn undefeated(num_outcomes:usize,duels:&[PairwiseResult]) -> Option<usize> {
    let mut wins = vec![false;num_outcomes];
    let mut losses = vec![false;num_outcomes];
    for duel in duels {
        losses[duel.loser]=true;
        if duel.is_tie() { losses[duel.winner]=true; } else { wins[duel.winner]=true; }
    }
    let mut undefeated = (0..num_outcomes).filter(|&o|wins[o] && !losses[o]);
    match (undefeated.next(),undefeated.next()) {
        (Some(winner),None) => Some(winner),
        _ => None,
    }
}

/// What every duel shares. Read only, so duels can be run on several threads.
struct DuelContext<'a> {
    votes : &'a [RankedVote],
    num_proposals : usize,
    quota : BigRational,
    already_elected : &'a [ProposalIndex],
    outcomes : &'a [Vec<ProposalIndex>],
}

impl <'a> DuelContext<'a> {
    /// Run the duels between the given pairs of outcomes. Results are in the same order as `pairs`
    /// regardless of the number of threads.
    fn run_all(&self,pairs:&[(usize,usize)],num_threads:usize) -> Vec<PairwiseResult> {
        if num_threads<=1 || pairs.len()<2 {
            return pairs.iter().map(|&(first,second)|self.duel(first,second)).collect();
        }
        let chunk_size = pairs.len().div_ceil(num_threads);
        thread::scope(|scope| {
            let handles : Vec<_> = pairs.chunks(chunk_size).map(|chunk|scope.spawn(move||{
                chunk.iter().map(|&(first,second)|self.duel(first,second)).collect::<Vec<_>>()
            })).collect();
            let mut res = Vec::with_capacity(pairs.len());
            for handle in handles {
                match handle.join() {
                    Ok(partial) => res.extend(partial),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            res
        })
    }

    /// A count in which only the proposals in the two outcomes and those already elected take part.
    /// Those already elected but in neither outcome are elected immediately and pass on their surplus.
    /// Each outcome then scores the votes of all remaining proposals other than those only in the other outcome.
    fn duel(&self,first:usize,second:usize) -> PairwiseResult {
        let compared : BTreeSet<ProposalIndex> = self.outcomes[first].iter().chain(self.outcomes[second].iter()).cloned().collect();
        let winners : BTreeSet<ProposalIndex> = compared.iter().chain(self.already_elected.iter()).cloned().collect();
        let mut ballots : Vec<PreferenceBallot> = self.votes.iter().map(PreferenceBallot::new).collect();
        let mut ledger = VoteLedger::new(self.num_proposals);
        let all : Vec<ProposalIndex> = (0..self.num_proposals).map(ProposalIndex).collect();
        ledger.initial_votes(&ballots,&all);
        let mut standing : HashSet<ProposalIndex> = all.iter().cloned().collect();
        for &p in &all {
            if !winners.contains(&p) {
                standing.remove(&p);
                ledger.transfer(&mut ballots,p,&TransferValue::one(),&standing);
            }
        }
        let elect : Vec<ProposalIndex> = winners.difference(&compared).cloned().collect();
        for p in &elect { standing.remove(p); }
        for &p in &elect {
            let fraction = TransferValue::from_surplus(&ledger.get(p),&self.quota);
            ledger.transfer(&mut ballots,p,&fraction,&standing);
            if ledger.get(p)>self.quota { ledger.set(p,self.quota.clone()); }
        }
        let total = |outcome:&[ProposalIndex]| -> BigRational {
            winners.iter().filter(|&&p|outcome.contains(&p) || !compared.contains(&p)).map(|&p|ledger.get(p)).fold(BigRational::zero(),|acc,v|acc+v)
        };
        let first_total = total(&self.outcomes[first]);
        let second_total = total(&self.outcomes[second]);
        let res = if second_total>=first_total {
            PairwiseResult{ winner: second, loser: first, margin: second_total-first_total }
        } else {
            PairwiseResult{ winner: first, loser: second, margin: first_total-second_total }
        };
        debug!("Duel {:?} vs {:?} : {} beats {} by {}",self.outcomes[first],self.outcomes[second],res.winner,res.loser,res.margin);
        res
    }
}
