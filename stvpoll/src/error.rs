// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Errors that abort setting up a poll. Difficulties during the count itself are never errors;
//! they produce an incomplete result instead.

use crate::ballot_metadata::Proposal;

#[derive(thiserror::Error, Debug)]
pub enum StvError {
    #[error("Not enough candidates to fill seats : {seats} seats but only {proposals} proposals")]
    NotEnoughCandidates { seats: usize, proposals: usize },
    #[error("There must be at least one seat to fill")]
    NoSeats,
    #[error("Proposal {0} is listed more than once")]
    DuplicateProposal(Proposal),
    #[error("Candidate {0} does not exist")]
    CandidateDoesNotExist(Proposal),
    #[error("Candidate {0} appears more than once in a ranking")]
    RepeatedPreference(Proposal),
    #[error("A ballot must be counted at least once")]
    ZeroBallotCount,
    #[error("Invalid election specification : {0}")]
    Specification(String),
}
