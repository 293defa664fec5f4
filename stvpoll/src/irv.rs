// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Instant runoff voting. One seat, won by a strict majority of the formal ballots.

use crate::election_result::SelectionMethod;
use crate::preference_distribution::{CountingRules, PreferenceDistributor};
use crate::quota::QuotaRule;
use crate::tie_resolution::{TieBreaker, Unresolved};
use crate::transfer_value::TransferValue;

pub struct Irv {}

impl CountingRules for Irv {
    fn name() -> &'static str { "IRV" }
    fn default_quota() -> QuotaRule { QuotaRule::IrvMajority }
    fn default_tie_breakers(random_in_tiebreaks: bool) -> Vec<TieBreaker> {
        if random_in_tiebreaks { vec![TieBreaker::RandomList] } else { vec![] }
    }

    fn calculate_round(distributor: &mut PreferenceDistributor<'_, Self>) -> Result<(), Unresolved> {
        let standing = distributor.standing_proposals();
        let majority : Vec<_> = standing.iter().cloned().filter(|&p|distributor.get_votes(p)>=distributor.quota).collect();
        if let Some(&winner) = distributor.most_votes(majority,1)?.first() {
            distributor.elect(winner,SelectionMethod::Direct);
            return Ok(());
        }
        if standing.len()<=1 { return Err(Unresolved("No candidate can get majority.".to_string())); }
        let (loser,method) = distributor.get_proposal(false,&standing)?;
        distributor.exclude(loser,method);
        distributor.transfer_votes(loser,&TransferValue::one());
        Ok(())
    }
}
