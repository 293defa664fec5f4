// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Counting ranked ballot polls by instant runoff, Scottish STV, or CPO-STV, with exact arithmetic.


pub mod ballot_paper;
pub mod ballot_metadata;
pub mod election_data;
pub mod transfer_value;
pub mod vote_ledger;
pub mod preference_distribution;
pub mod election_result;
pub mod util;
pub mod tie_resolution;
pub mod quota;
pub mod error;
pub mod random_util;
pub mod irv;
pub mod scottish_stv;
pub mod cpo_stv;
pub mod smith_set;
pub mod rules;
