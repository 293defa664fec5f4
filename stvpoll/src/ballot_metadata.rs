// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Information about the poll, such as the proposals (candidates) standing.

use serde::{Serialize,Deserialize};
use std::collections::HashMap;
use std::fmt;
use crate::error::StvError;

/// a proposal, referred to by position in the list of proposals given when the poll was created, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProposalIndex(pub usize);
// type alias really, don't want long display
impl fmt::Display for ProposalIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for ProposalIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// The externally visible identifier of a proposal. Callers may name proposals by string or integer.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Proposal {
    Number(i64),
    Name(String),
}

impl fmt::Display for Proposal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Proposal::Number(n) => write!(f, "{}", n),
            Proposal::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Proposal {
    fn from(s: &str) -> Self { Proposal::Name(s.to_string()) }
}
impl From<String> for Proposal {
    fn from(s: String) -> Self { Proposal::Name(s) }
}
impl From<&String> for Proposal {
    fn from(s: &String) -> Self { Proposal::Name(s.clone()) }
}
impl From<i64> for Proposal {
    fn from(n: i64) -> Self { Proposal::Number(n) }
}
impl From<i32> for Proposal {
    fn from(n: i32) -> Self { Proposal::Number(n as i64) }
}
impl From<&Proposal> for Proposal {
    fn from(p: &Proposal) -> Self { p.clone() }
}

/// Where a proposal is in the count. Transitions are one way, from Hopeful to one of the others.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Hopeful,
    Elected,
    Excluded,
}

/// The fixed, ordered set of proposals in a poll.
#[derive(Clone, Debug)]
pub struct PollMetadata {
    pub proposals : Vec<Proposal>,
    lookup : HashMap<Proposal,ProposalIndex>,
}

impl PollMetadata {
    /// Make the metadata, checking that no proposal is listed twice.
    pub fn new(proposals:Vec<Proposal>) -> Result<Self,StvError> {
        let mut lookup = HashMap::with_capacity(proposals.len());
        for (i,p) in proposals.iter().enumerate() {
            if lookup.insert(p.clone(),ProposalIndex(i)).is_some() {
                return Err(StvError::DuplicateProposal(p.clone()));
            }
        }
        Ok(PollMetadata{proposals,lookup})
    }
    pub fn num_proposals(&self) -> usize { self.proposals.len() }
    pub fn proposal(&self,index:ProposalIndex) -> &Proposal { &self.proposals[index.0] }
    pub fn find(&self,proposal:&Proposal) -> Option<ProposalIndex> { self.lookup.get(proposal).cloned() }
    /// All indices, in the order given when the poll was created.
    pub fn all_indices(&self) -> impl Iterator<Item=ProposalIndex> + '_ { (0..self.proposals.len()).map(ProposalIndex) }
}
