// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Properties that every count should have, whatever the votes.

mod common;

use std::collections::HashSet;
use common::all_fixtures;
use stvpoll::ballot_metadata::{ProposalIndex, ProposalStatus};
use stvpoll::election_result::SelectionMethod;
use stvpoll::random_util::Randomness;
use stvpoll::rules::CountingMethod;
use stvpoll::transfer_value::convert_usize_to_rational;

const METHODS : [CountingMethod;3] = [CountingMethod::IRV,CountingMethod::ScottishSTV,CountingMethod::CPOSTV];

#[test]
fn test_votes_are_conserved() {
    for method in METHODS {
        for election in all_fixtures(method) {
            let total = convert_usize_to_rational(election.ballot_count());
            let result = election.calculate_with_randomness(&mut Randomness::seeded(3));
            assert!(!result.transfer_log.is_empty());
            for entry in &result.transfer_log {
                assert_eq!(total,entry.current_votes.total()+&entry.exhausted_votes,"{} lost votes",method);
            }
            assert_eq!(result.exhausted,result.transfer_log.last().unwrap().exhausted_votes);
        }
    }
}

#[test]
fn test_each_proposal_decided_at_most_once() {
    for method in METHODS {
        for election in all_fixtures(method) {
            let result = election.calculate_with_randomness(&mut Randomness::seeded(3));
            assert!(result.rounds.len()<=result.proposals.len());
            assert!(result.elected.len()<=result.seats);
            let mut decided : HashSet<ProposalIndex> = HashSet::new();
            let mut elected = vec![];
            for (i,round) in result.rounds.iter().enumerate() {
                assert_eq!(i+1,round.index);
                assert!(!round.selected.is_empty());
                for &p in &round.selected {
                    assert!(decided.insert(p),"{} decided {:?} twice",method,p);
                    if round.status==Some(ProposalStatus::Elected) { elected.push(p); }
                }
            }
            assert_eq!(elected,result.elected);
        }
    }
}

#[test]
fn test_direct_election_needs_quota() {
    for election in all_fixtures(CountingMethod::ScottishSTV) {
        let result = election.calculate_with_randomness(&mut Randomness::seeded(3));
        for round in &result.rounds {
            if round.status==Some(ProposalStatus::Elected) && round.method==Some(SelectionMethod::Direct) {
                for &p in &round.selected { assert!(round.votes.get(p)>=result.quota); }
            }
        }
    }
}

#[test]
fn test_surplus_leaves_exactly_quota() {
    for election in all_fixtures(CountingMethod::ScottishSTV) {
        let result = election.calculate_with_randomness(&mut Randomness::seeded(3));
        // nobody is excluded while a surplus is waiting to be transferred.
        for round in result.rounds.iter().filter(|r|r.status==Some(ProposalStatus::Excluded)) {
            for previous in result.rounds.iter().take_while(|r|r.index<round.index) {
                if previous.status==Some(ProposalStatus::Elected) && previous.method==Some(SelectionMethod::Direct) {
                    for &p in &previous.selected { assert_eq!(result.quota,round.votes.get(p)); }
                }
            }
        }
    }
}

#[test]
fn test_same_seed_gives_same_report() -> anyhow::Result<()> {
    for method in METHODS {
        for election in all_fixtures(method) {
            let report = |seed:u64| -> anyhow::Result<serde_json::Value> {
                let result = election.calculate_with_randomness(&mut Randomness::seeded(seed));
                let mut json = serde_json::to_value(result.as_report())?;
                if let Some(map) = json.as_object_mut() { map.remove("runtime"); }
                Ok(json)
            };
            assert_eq!(report(11)?,report(11)?);
        }
    }
    Ok(())
}

#[test]
fn test_quota_fixed_for_the_count() {
    for method in METHODS {
        for election in all_fixtures(method) {
            let first = election.calculate_with_randomness(&mut Randomness::seeded(1));
            let second = election.calculate_with_randomness(&mut Randomness::seeded(2));
            assert_eq!(first.quota,second.quota);
            assert_eq!(first.empty_ballot_count,election.empty_ballot_count);
        }
    }
}
