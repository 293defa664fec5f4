// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Multi seat STV with fractional transfer of surpluses, as used in Scottish local government elections.
//!
//! Each round does exactly one of these, in order of priority:
//! * elect everyone at or above quota,
//! * transfer the surplus of the earliest elected proposal not yet transferred,
//! * elect everyone left if there are no more standing than seats,
//! * exclude the proposal with the fewest votes.

use crate::election_result::SelectionMethod;
use crate::preference_distribution::{CountingRules, PreferenceDistributor};
use crate::quota::QuotaRule;
use crate::tie_resolution::{TieBreaker, Unresolved};
use crate::transfer_value::TransferValue;

pub struct ScottishStv {}

impl CountingRules for ScottishStv {
    fn name() -> &'static str { "ScottishSTV" }
    fn default_quota() -> QuotaRule { QuotaRule::Droop }
    fn default_tie_breakers(random_in_tiebreaks: bool) -> Vec<TieBreaker> {
        if random_in_tiebreaks { vec![TieBreaker::TransferHistory,TieBreaker::RandomList] } else { vec![TieBreaker::TransferHistory] }
    }

    fn calculate_round(distributor: &mut PreferenceDistributor<'_, Self>) -> Result<(), Unresolved> {
        let standing = distributor.standing_proposals();
        let above_quota : Vec<_> = standing.iter().cloned().filter(|&p|distributor.get_votes(p)>=distributor.quota).collect();
        if !above_quota.is_empty() {
            // with a small quota more may qualify than there are seats left.
            let above_quota = distributor.most_votes(above_quota,distributor.seats_to_fill())?;
            let elected = distributor.elect_multiple(above_quota,SelectionMethod::Direct)?;
            distributor.pending_surplus_distribution.extend(elected);
            return Ok(());
        }
        if let Some(proposal) = distributor.pending_surplus_distribution.pop_front() {
            distributor.transfer_surplus(proposal);
            return Ok(());
        }
        // possible when votes exhaust.
        if distributor.seats_to_fill()>=standing.len() {
            distributor.elect_multiple(standing,SelectionMethod::NoCompetition)?;
            return Ok(());
        }
        let (loser,method) = distributor.get_proposal(false,&standing)?;
        distributor.exclude(loser,method);
        distributor.transfer_votes(loser,&TransferValue::one());
        Ok(())
    }
}
