// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

//! Exact arithmetic for votes. All vote weights are rationals; there is no rounding anywhere.

use serde::Serialize;
use num::{One, Zero, BigRational, BigInt, Signed};
use std::fmt::{Display, Formatter};

/// The fraction of a ballot's current value that moves on to the next preference in a transfer.
/// 1 for an exclusion, surplus/votes for an elected proposal with a surplus. Always in [0,1].
#[derive(Clone,Debug,Ord, PartialOrd, Eq, PartialEq,Hash)]
pub struct TransferValue(pub(crate) BigRational);

impl TransferValue {
    pub fn one() -> Self { TransferValue(BigRational::one())}
    pub fn zero() -> Self { TransferValue(BigRational::zero())}
    pub fn new(numerator:BigInt,denominator:BigInt) -> Self {
        TransferValue(BigRational::new(numerator,denominator))
    }
    /// The fraction of `votes` that is above `quota`, that is (votes-quota)/votes.
    /// Zero if there is no surplus.
    pub fn from_surplus(votes:&BigRational,quota:&BigRational) -> Self {
        if votes<=quota || !votes.is_positive() { TransferValue::zero() }
        else { TransferValue((votes-quota)/votes) }
    }
    /// the value that moves on when this transfer value is applied to `value`.
    pub fn apply(&self,value:&BigRational) -> BigRational { value*&self.0 }
    pub fn as_rational(&self) -> &BigRational { &self.0 }
    pub fn is_valid_fraction(&self) -> bool { !self.0.is_negative() && self.0<=BigRational::one() }
}

pub fn convert_usize_to_rational(tally:usize) -> BigRational {
    BigRational::new(BigInt::from(tally),BigInt::one())
}

impl Display for TransferValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.0)
    }
}

#[derive(Clone,Debug,Serialize,Ord, PartialOrd, Eq, PartialEq,Hash)]
#[serde(into = "String")]
/// A rational number that should be serialized as a string, like "17/3". Used for vote tallies in reports.
pub struct StringSerializedRational(pub BigRational);

impl Display for StringSerializedRational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.0)
    }
}

impl From<StringSerializedRational> for String {
    fn from(t: StringSerializedRational) -> Self { t.0.to_string() }
}

impl From<&BigRational> for StringSerializedRational {
    fn from(r: &BigRational) -> Self { StringSerializedRational(r.clone()) }
}
