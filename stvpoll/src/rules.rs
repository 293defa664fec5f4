// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use std::str::FromStr;
use std::fmt::{Display, Formatter};
use serde::{Serialize,Deserialize};
use crate::cpo_stv::CpoStv;
use crate::election_data::Election;
use crate::election_result::ElectionResult;
use crate::irv::Irv;
use crate::preference_distribution::distribute_preferences;
use crate::random_util::Randomness;
use crate::scottish_stv::ScottishStv;

#[derive(Copy,Clone,Debug,PartialEq,Eq,Serialize,Deserialize)]
pub enum CountingMethod {
    IRV,
    ScottishSTV,
    #[serde(alias = "CPO-STV")]
    CPOSTV,
}

impl FromStr for CountingMethod {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IRV" => Ok(CountingMethod::IRV),
            "ScottishSTV" => Ok(CountingMethod::ScottishSTV),
            "CPOSTV" => Ok(CountingMethod::CPOSTV),
            "CPO-STV" => Ok(CountingMethod::CPOSTV), // common spelling
            _ => Err("No such counting method supported")
        }
    }
}

impl Display for CountingMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CountingMethod::IRV => "IRV",
            CountingMethod::ScottishSTV => "ScottishSTV",
            CountingMethod::CPOSTV => "CPOSTV",
        };
        f.write_str(s)
    }
}

impl CountingMethod {
    /// Some methods only make sense for a particular number of seats.
    pub fn forced_seats(self) -> Option<usize> {
        match self {
            CountingMethod::IRV => Some(1),
            _ => None,
        }
    }

    pub fn count(self,election:&Election,randomness:&mut Randomness) -> ElectionResult {
        match self {
            CountingMethod::IRV => distribute_preferences::<Irv>(election,randomness),
            CountingMethod::ScottishSTV => distribute_preferences::<ScottishStv>(election,randomness),
            CountingMethod::CPOSTV => distribute_preferences::<CpoStv>(election,randomness),
        }
    }
}

pub struct RulesDetails{
    pub name : String,
    pub description : String,
}

impl RulesDetails {
    pub fn list() -> Vec<RulesDetails> {
        vec![
            RulesDetails{ name: "IRV".to_string(), description: "Instant runoff voting. A single seat, won by a majority of formal ballots. The proposal with the fewest votes is excluded until someone has a majority.".to_string() },
            RulesDetails{ name: "ScottishSTV".to_string(), description: "Multi seat STV with a Droop quota and exact fractional transfer of surpluses, one at a time. Ties are resolved by looking at earlier counts, then by lot.".to_string() },
            RulesDetails{ name: "CPOSTV".to_string(), description: "Comparison of Pairs of Outcomes STV. Every possible set of winners is compared with every other using a Hagenbach-Bischof quota, and a Condorcet winning set is elected, using the Smith set and minimax if needed.".to_string() },
        ]
    }
}
