// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Resolving ties between proposals with the same number of votes.

use std::fmt::{Display, Formatter};
use log::{debug, warn};
use serde::{Serialize,Deserialize};
use crate::ballot_metadata::ProposalIndex;
use crate::election_result::{ElectionResult, SelectionMethod};
use crate::util::extreme_with_ties;

/// A way of choosing between tied proposals.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum TieBreaker {
    /// Look back through the tallies after each transfer, most recent first, for a point
    /// where the tied proposals differed. A partial separation narrows the tie and keeps going back.
    TransferHistory,
    /// Use a random ordering of all proposals drawn once, before counting starts.
    RandomList,
}

/// The count could not continue: a tie could not be broken, or no candidate can reach the quota.
/// Never escapes the crate; the count is returned as incomplete instead.
#[derive(Debug,Clone)]
pub(crate) struct Unresolved(pub(crate) String);

impl Display for Unresolved {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

/// What a tie breaker may look at.
pub(crate) struct TieContext<'r> {
    pub(crate) result : &'r mut ElectionResult,
    /// None if chance is not allowed.
    pub(crate) random_list : Option<&'r [ProposalIndex]>,
}

impl TieBreaker {
    pub fn selection_method(self) -> SelectionMethod {
        match self {
            TieBreaker::TransferHistory => SelectionMethod::History,
            TieBreaker::RandomList => SelectionMethod::Random,
        }
    }

    /// Narrow down `ties`. `most_votes` is true when looking for the most favoured, false for the least favoured.
    /// Returns the proposals still tied, which may be all of them.
    pub(crate) fn reduce(self,ties:Vec<ProposalIndex>,most_votes:bool,context:&mut TieContext<'_>) -> Result<Vec<ProposalIndex>,Unresolved> {
        match self {
            TieBreaker::TransferHistory => {
                let mut ties = ties;
                for stage in context.result.transfer_log.iter().rev() {
                    let votes = &stage.current_votes;
                    let stage_ties = extreme_with_ties(&ties,|&p|votes.get(p),most_votes);
                    if stage_ties.len()<=1 {
                        debug!("Tie resolved by history in favour of {:?}",stage_ties);
                        return Ok(stage_ties);
                    }
                    ties=stage_ties;
                }
                Ok(ties)
            }
            TieBreaker::RandomList => {
                let order = context.random_list.ok_or_else(||Unresolved("Unresolved tiebreak (random disallowed)".to_string()))?;
                context.result.set_randomized(Some(order));
                let chosen = if most_votes { order.iter().find(|p|ties.contains(p)) } else { order.iter().rev().find(|p|ties.contains(p)) };
                warn!("Tie between {:?} resolved by lot",ties);
                Ok(chosen.into_iter().cloned().collect())
            }
        }
    }
}

/// Tie breakers to try, in order, until one of them leaves a single proposal.
#[derive(Debug,Clone,Default)]
pub struct TieBreakerChain {
    pub strategies : Vec<TieBreaker>,
}

impl TieBreakerChain {
    pub fn new(strategies:Vec<TieBreaker>) -> Self { TieBreakerChain{strategies} }

    pub(crate) fn resolve(&self,ties:Vec<ProposalIndex>,most_votes:bool,context:&mut TieContext<'_>) -> Result<(ProposalIndex,SelectionMethod),Unresolved> {
        let mut ties = ties;
        for &strategy in &self.strategies {
            ties = strategy.reduce(ties,most_votes,context)?;
            if ties.len()==1 { return Ok((ties[0],strategy.selection_method())); }
        }
        Err(Unresolved(format!("Unresolved tiebreak between {} proposals",ties.len())))
    }
}
