// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Polls shared by the tests for several counting methods.

#![allow(dead_code)]

use std::collections::HashSet;
use stvpoll::ballot_metadata::Proposal;
use stvpoll::election_data::{Election, ElectionOptions};
use stvpoll::quota::QuotaRule;
use stvpoll::rules::CountingMethod;

pub fn names(list:&[&str]) -> HashSet<Proposal> { list.iter().map(|&s|Proposal::from(s)).collect() }

fn poll(method:CountingMethod,seats:usize,proposals:&[&str],ballots:&[(&[&str],usize)],options:ElectionOptions) -> Election {
    let mut election = Election::new(method,seats,proposals.iter().cloned(),options).unwrap();
    for &(ranking,n) in ballots {
        election.add_ballot(ranking.iter().cloned(),n).unwrap();
    }
    election
}

/// 28 Alice>Bob>Chris, 26 Bob>Alice>Chris, 3 Chris, 2 Don, 1 Eric.
pub fn opa_example(method:CountingMethod) -> Election {
    poll(method,3,&["Alice","Bob","Chris","Don","Eric"],&[
        (&["Alice","Bob","Chris"],28),
        (&["Bob","Alice","Chris"],26),
        (&["Chris"],3),
        (&["Don"],2),
        (&["Eric"],1),
    ],ElectionOptions::default())
}

/// The dessert example commonly used to explain STV.
pub fn desserts_example(method:CountingMethod) -> Election {
    poll(method,3,&["orange","chocolate","pear","strawberry","bonbon"],&[
        (&["orange"],4),
        (&["pear","orange"],2),
        (&["chocolate","strawberry"],8),
        (&["chocolate","bonbon"],4),
        (&["strawberry"],1),
        (&["bonbon"],1),
    ],ElectionOptions::default())
}

/// The example commonly used to explain CPO-STV, where it gives a different answer to plain STV.
pub fn cpo_explanation_example(method:CountingMethod) -> Election {
    poll(method,3,&["Andrea","Carter","Brad","Delilah","Scott"],&[
        (&["Andrea"],25),
        (&["Carter","Brad","Delilah"],34),
        (&["Brad","Delilah"],7),
        (&["Delilah","Brad"],8),
        (&["Delilah","Scott"],5),
        (&["Scott","Delilah"],21),
    ],ElectionOptions::default())
}

/// A three way cycle for the second seat.
pub fn extreme_tie(method:CountingMethod) -> Election {
    poll(method,2,&["Andrea","Batman","Robin","Gorm"],&[
        (&["Andrea","Batman","Robin"],1),
        (&["Robin","Andrea","Batman"],1),
        (&["Batman","Robin","Andrea"],1),
        (&["Gorm"],2),
    ],ElectionOptions::default())
}

/// A tie that earlier tallies can separate. Nobody can reach the quota.
pub fn tiebreak_history(method:CountingMethod) -> Election {
    poll(method,1,&["Andrea","Robin","Gorm"],&[
        (&["Andrea"],3),
        (&["Robin"],2),
        (&["Gorm","Robin"],1),
        (&[],3),
    ],ElectionOptions{ quota: Some(QuotaRule::Fixed(100)), ..ElectionOptions::default() })
}

/// Two proposals nobody voted for compete for the last seat, and chance is not allowed.
pub fn incomplete_result(method:CountingMethod) -> Election {
    poll(method,3,&["Andrea","Batman","Robin","Gorm"],&[
        (&["Batman"],1),
        (&["Gorm"],2),
    ],ElectionOptions{ random_in_tiebreaks: false, ..ElectionOptions::default() })
}

pub fn tie_break_that_breaks(method:CountingMethod) -> Election {
    poll(method,3,&["A","B","C","D","E","F"],&[
        (&["A","D","C"],1),
        (&["E","C","A","B"],1),
    ],ElectionOptions::default())
}

pub fn multiple_quota_tiebreak(method:CountingMethod) -> Election {
    poll(method,4,&["one","two","three","four","five","six"],&[
        (&["one","three"],1),
        (&["two","four"],1),
        (&["five","six"],1),
    ],ElectionOptions::default())
}

/// "one" and "two" reach the quota together with the same votes.
pub fn simultaneous_winners(method:CountingMethod,pedantic_order:bool) -> Election {
    poll(method,2,&["one","two","three"],&[
        (&["one","two"],2),
        (&["two","one"],2),
        (&["three"],1),
    ],ElectionOptions{ random_in_tiebreaks: false, pedantic_order, ..ElectionOptions::default() })
}

/// Every fixture above, for checks that should hold for any poll.
pub fn all_fixtures(method:CountingMethod) -> Vec<Election> {
    vec![
        opa_example(method),
        desserts_example(method),
        cpo_explanation_example(method),
        extreme_tie(method),
        tiebreak_history(method),
        incomplete_result(method),
        tie_break_that_breaks(method),
        multiple_quota_tiebreak(method),
        simultaneous_winners(method,true),
        simultaneous_winners(method,false),
    ]
}
