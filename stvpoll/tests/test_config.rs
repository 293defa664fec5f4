// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


use stvpoll::ballot_metadata::Proposal;
use stvpoll::election_data::{ElectionOptions, ElectionSpecification};
use stvpoll::error::StvError;
use stvpoll::quota::QuotaRule;
use stvpoll::rules::CountingMethod;
use stvpoll::tie_resolution::TieBreaker;

const HISTORY_TIE : &str = r#"{
    "method" : "ScottishSTV",
    "seats" : 1,
    "proposals" : ["Andrea","Robin","Gorm"],
    "ballots" : [
        {"prefs":["Andrea"],"n":3},
        {"prefs":["Robin"],"n":2},
        {"prefs":["Gorm","Robin"]},
        {"prefs":[],"n":3}
    ],
    "options" : { "quota" : {"Fixed":100}, "random_in_tiebreaks" : false, "seed" : 42 }
}"#;

#[test]
fn test_specification_from_json() -> anyhow::Result<()> {
    let spec : ElectionSpecification = serde_json::from_str(HISTORY_TIE)?;
    assert_eq!(CountingMethod::ScottishSTV,spec.method);
    assert_eq!(1,spec.ballots[2].n);
    assert_eq!(Some(42),spec.options.seed);
    assert_eq!(1,spec.options.duel_threads);
    let election = spec.into_election()?;
    assert_eq!(6,election.ballot_count());
    assert_eq!(3,election.empty_ballot_count);
    let result = election.calculate();
    assert_eq!(vec![Proposal::from("Andrea")],result.elected_names());
    Ok(())
}

#[test]
fn test_report_json() -> anyhow::Result<()> {
    let spec : ElectionSpecification = serde_json::from_str(HISTORY_TIE)?;
    let report = serde_json::to_value(spec.into_election()?.calculate().as_report())?;
    assert_eq!(serde_json::json!(["Andrea"]),report["winners"]);
    assert_eq!(serde_json::json!(true),report["complete"]);
    assert_eq!(serde_json::json!(false),report["randomized"]);
    assert_eq!(serde_json::json!("100"),report["quota"]);
    assert_eq!(serde_json::json!(3),report["empty_ballot_count"]);
    assert!(report["runtime"].is_number());
    assert!(report.get("incomplete_reason").is_none());
    let rounds = report["rounds"].as_array().map(|r|r.len()).unwrap_or(0);
    assert_eq!(3,rounds);
    assert_eq!(serde_json::json!("tiebreak_history"),report["rounds"][1]["method"]);
    assert_eq!(serde_json::json!("excluded"),report["rounds"][1]["status"]);
    assert_eq!(serde_json::json!("no_competition_left"),report["rounds"][2]["method"]);
    Ok(())
}

#[test]
fn test_random_list_is_reported() -> anyhow::Result<()> {
    let spec : ElectionSpecification = serde_json::from_str(r#"{
        "method":"CPO-STV", "seats":2, "proposals":["Andrea","Batman","Robin","Gorm"],
        "ballots":[{"prefs":["Andrea","Batman","Robin"]},{"prefs":["Robin","Andrea","Batman"]},{"prefs":["Batman","Robin","Andrea"]},{"prefs":["Gorm"],"n":2}],
        "options":{"seed":5}
    }"#)?;
    assert_eq!(CountingMethod::CPOSTV,spec.method);
    let result = spec.into_election()?.calculate();
    let report = serde_json::to_value(result.as_report())?;
    assert_eq!(serde_json::json!(true),report["randomized"]);
    assert_eq!(2,report["winners"].as_array().map(|w|w.len()).unwrap_or(0));
    Ok(())
}

#[test]
fn test_explicit_tie_breakers() -> anyhow::Result<()> {
    // without looking at history the tie is decided by lot.
    let mut spec : ElectionSpecification = serde_json::from_str(HISTORY_TIE)?;
    spec.options.random_in_tiebreaks=true;
    spec.options.tie_breakers=Some(vec![TieBreaker::RandomList]);
    let result = spec.into_election()?.calculate();
    assert!(result.randomized());
    assert!(result.is_complete());
    assert!(result.extra_data.contains_key("randomized_proposal_list"));
    Ok(())
}

#[test]
fn test_custom_quota() -> anyhow::Result<()> {
    let mut spec : ElectionSpecification = serde_json::from_str(HISTORY_TIE)?;
    spec.options.quota=Some(QuotaRule::Custom(|inputs|num::BigRational::from_integer((inputs.ballot_count+inputs.empty_ballot_count).into())));
    let result = spec.into_election()?.calculate();
    assert_eq!("9",result.quota.to_string());
    Ok(())
}

#[test]
fn test_bad_specifications() {
    let too_many_seats = ElectionSpecification{ method: CountingMethod::ScottishSTV, seats: 4, proposals: vec!["one".into(),"two".into(),"three".into()], ballots: vec![], options: ElectionOptions::default() };
    assert!(matches!(too_many_seats.into_election(),Err(StvError::NotEnoughCandidates{seats:4,proposals:3})));
    let no_threads = ElectionSpecification{ method: CountingMethod::CPOSTV, seats: 1, proposals: vec!["one".into()], ballots: vec![], options: ElectionOptions{ duel_threads: 0, ..ElectionOptions::default() } };
    assert!(matches!(no_threads.into_election(),Err(StvError::Specification(_))));
    let duplicate : Result<ElectionSpecification,_> = serde_json::from_str(r#"{"method":"IRV","seats":1,"proposals":["a","a"]}"#);
    assert!(matches!(duplicate.map(|s|s.into_election()),Ok(Err(StvError::DuplicateProposal(_)))));
    assert!(serde_json::from_str::<ElectionSpecification>(r#"{"method":"Borda","seats":1,"proposals":["a"]}"#).is_err());
}
