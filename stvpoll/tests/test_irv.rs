// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use stvpoll::ballot_metadata::{Proposal, ProposalIndex};
use stvpoll::election_data::{Election, ElectionOptions};
use stvpoll::election_result::SelectionMethod;
use stvpoll::error::StvError;
use stvpoll::random_util::Randomness;
use stvpoll::rules::CountingMethod;

fn election(ballots:&[(&[&str],usize)],options:ElectionOptions) -> anyhow::Result<Election> {
    // IRV always has one seat, whatever is asked for.
    let mut election = Election::new(CountingMethod::IRV,3,["A","B","C"],options)?;
    for &(ranking,n) in ballots { election.add_ballot(ranking.iter().cloned(),n)?; }
    Ok(election)
}

#[test]
fn test_majority_after_exclusion() -> anyhow::Result<()> {
    let election = election(&[(&["A"],4),(&["B","A"],3),(&["C","B"],2)],ElectionOptions::default())?;
    assert_eq!(1,election.seats);
    let result = election.calculate_with_randomness(&mut Randomness::seeded(1));
    assert_eq!(vec![Proposal::from("B")],result.elected_names());
    assert_eq!("5",result.quota.to_string());
    assert!(!result.randomized());
    assert_eq!(2,result.rounds.len());
    assert_eq!(vec![ProposalIndex(2)],result.rounds[0].selected);
    Ok(())
}

#[test]
fn test_first_preference_majority() -> anyhow::Result<()> {
    let election = election(&[(&["C"],5),(&["A","C"],4)],ElectionOptions::default())?;
    let result = election.calculate_with_randomness(&mut Randomness::seeded(1));
    assert_eq!(vec![Proposal::from("C")],result.elected_names());
    assert_eq!(Some(SelectionMethod::Direct),result.rounds[0].method);
    Ok(())
}

#[test]
fn test_no_majority_is_incomplete() -> anyhow::Result<()> {
    let election = election(&[(&["A"],2),(&["B"],2),(&["C"],1)],ElectionOptions::default())?;
    let result = election.calculate_with_randomness(&mut Randomness::seeded(7));
    assert!(!result.is_complete());
    assert!(result.randomized());
    assert_eq!(Some("No candidate can get majority.".to_string()),result.incomplete_reason);
    Ok(())
}

#[test]
fn test_tie_without_chance_is_incomplete() -> anyhow::Result<()> {
    let options = ElectionOptions{ random_in_tiebreaks: false, ..ElectionOptions::default() };
    let election = election(&[(&["A"],2),(&["B"],2),(&["C"],1)],options)?;
    let result = election.calculate();
    assert!(!result.is_complete());
    assert!(!result.randomized());
    // C was still excluded before the tie.
    assert_eq!(1,result.rounds.len());
    Ok(())
}

#[test]
fn test_bad_ballots() -> anyhow::Result<()> {
    let mut election = election(&[],ElectionOptions::default())?;
    assert!(matches!(election.add_ballot(["A","D"],1),Err(StvError::CandidateDoesNotExist(_))));
    assert!(matches!(election.add_ballot(["A","B","A"],1),Err(StvError::RepeatedPreference(_))));
    assert!(matches!(election.add_ballot(["A"],0),Err(StvError::ZeroBallotCount)));
    election.add_ballot(Vec::<&str>::new(),2)?;
    assert_eq!(2,election.empty_ballot_count);
    assert_eq!(0,election.ballot_count());
    Ok(())
}
