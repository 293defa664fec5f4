// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.

/// All the items with the highest (or lowest if `highest` is false) key, in their original order.
/// Empty only if `items` is empty.
/// ```
/// use stvpoll::util::extreme_with_ties;
/// assert_eq!(vec![3,7],extreme_with_ties(&[3,4,7,5],|&x|x%4,true));
/// assert_eq!(vec![4],extreme_with_ties(&[3,4,7,5],|&x|x%4,false));
/// ```
pub fn extreme_with_ties<T:Clone,K:Ord>(items:&[T],key:impl Fn(&T)->K,highest:bool) -> Vec<T> {
    let mut best : Option<K> = None;
    let mut res : Vec<T> = vec![];
    for item in items {
        let k = key(item);
        let better = match &best {
            None => true,
            Some(b) => if highest { k>*b } else { k<*b },
        };
        if better {
            res.clear();
            res.push(item.clone());
            best=Some(k);
        } else if best.as_ref()==Some(&k) {
            res.push(item.clone());
        }
    }
    res
}

/// n choose k, or None if it does not fit in a usize.
/// ```
/// use stvpoll::util::choose;
/// assert_eq!(Some(10),choose(5,2));
/// assert_eq!(Some(1),choose(5,5));
/// assert_eq!(Some(0),choose(2,5));
/// assert_eq!(Some(1832624140942590534),choose(64,32));
/// assert_eq!(None,choose(70,35));
/// ```
pub fn choose(n:usize,k:usize) -> Option<usize> {
    if k>n { return Some(0); }
    let k = k.min(n-k) as u128;
    let n = n as u128;
    let mut res : u128 = 1;
    // res is C(n,i) at the start of each step, so the division is exact.
    for i in 0..k {
        res = res.checked_mul(n-i)?/(i+1);
    }
    usize::try_from(res).ok()
}
