// Copyright 2021-2024 Andrew Conway.
// This file is part of ConcreteSTV.
// ConcreteSTV is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteSTV is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteSTV.  If not, see <https://www.gnu.org/licenses/>.


//! Condorcet style analysis of a set of pairwise contests between options numbered 0..n.
//!
//! The defeat graph has an edge from the loser of each contest to its winner, and edges both ways
//! for a tie. The Smith set is then the component of the graph that nothing leads out of.

use num::{BigRational, Zero};

/// The outcome of a contest between two options.
#[derive(Clone,Debug,PartialEq)]
pub struct PairwiseResult {
    pub winner : usize,
    pub loser : usize,
    /// how much the winner won by. Zero means a tie, in which case winner and loser are interchangeable.
    pub margin : BigRational,
}

impl PairwiseResult {
    pub fn is_tie(&self) -> bool { self.margin.is_zero() }
    /// true if `option` lost or tied this contest.
    pub fn not_won_by(&self,option:usize) -> bool { self.loser==option || (self.is_tie() && self.winner==option) }
}

/// successors[loser] contains winner.
pub fn defeat_graph(num_options:usize,results:&[PairwiseResult]) -> Vec<Vec<usize>> {
    let mut successors = vec![vec![];num_options];
    for r in results {
        successors[r.loser].push(r.winner);
        if r.is_tie() { successors[r.winner].push(r.loser); }
    }
    successors
}

/// Tarjan's algorithm, without recursion. Each component is sorted; components come out
/// in reverse topological order, so a component only has edges to components before it.
pub fn strongly_connected_components(successors:&[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = successors.len();
    let mut index : Vec<Option<usize>> = vec![None;n];
    let mut lowlink = vec![0;n];
    let mut on_stack = vec![false;n];
    let mut stack : Vec<usize> = vec![];
    let mut next_index = 0;
    let mut components = vec![];
    for root in 0..n {
        if index[root].is_some() { continue; }
        // (node, position in its successor list)
        let mut call_stack : Vec<(usize,usize)> = vec![];
        let mut to_visit = Some(root);
        loop {
            if let Some(v) = to_visit.take() {
                index[v]=Some(next_index);
                lowlink[v]=next_index;
                next_index+=1;
                stack.push(v);
                on_stack[v]=true;
                call_stack.push((v,0));
            }
            let Some(&(v,pos)) = call_stack.last() else { break };
            if let Some(&w) = successors[v].get(pos) {
                if let Some(top) = call_stack.last_mut() { top.1+=1; }
                match index[w] {
                    None => { to_visit=Some(w); }
                    Some(w_index) => if on_stack[w] { lowlink[v]=lowlink[v].min(w_index); }
                }
            } else {
                call_stack.pop();
                if let Some(&(parent,_)) = call_stack.last() { lowlink[parent]=lowlink[parent].min(lowlink[v]); }
                if Some(lowlink[v])==index[v] {
                    let mut component = vec![];
                    while let Some(w) = stack.pop() {
                        on_stack[w]=false;
                        component.push(w);
                        if w==v { break; }
                    }
                    component.sort_unstable();
                    components.push(component);
                }
            }
        }
    }
    components
}

/// The union of the components with no edges leading out of them. For a complete set of
/// contests there is exactly one such component.
pub fn smith_set(num_options:usize,results:&[PairwiseResult]) -> Vec<usize> {
    let successors = defeat_graph(num_options,results);
    let components = strongly_connected_components(&successors);
    let mut component_of = vec![0;num_options];
    for (c,component) in components.iter().enumerate() {
        for &v in component { component_of[v]=c; }
    }
    let mut res : Vec<usize> = components.iter().enumerate()
        .filter(|(c,component)|component.iter().all(|&v|successors[v].iter().all(|&w|component_of[w]==*c)))
        .flat_map(|(_,component)|component.iter().cloned())
        .collect();
    res.sort_unstable();
    res
}

/// The options in `candidates` whose largest margin of defeat (counting ties as defeats by zero)
/// is smallest. An option that never lost or tied scores zero.
pub fn minimax(candidates:&[usize],results:&[PairwiseResult]) -> Vec<usize> {
    let worst_defeat = |option:usize| results.iter().filter(|r|r.not_won_by(option)).map(|r|r.margin.clone()).max().unwrap_or_else(BigRational::zero);
    crate::util::extreme_with_ties(candidates,|&option|worst_defeat(option),false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer_value::convert_usize_to_rational;

    fn beat(winner:usize,loser:usize,margin:usize) -> PairwiseResult { PairwiseResult{ winner, loser, margin: convert_usize_to_rational(margin) } }

    #[test]
    fn test_components_come_out_sinks_first() {
        // 0 -> 1 -> 2 -> 1, 3 -> 0
        let successors = vec![vec![1],vec![2],vec![1],vec![0]];
        let components = strongly_connected_components(&successors);
        assert_eq!(vec![vec![1,2],vec![0],vec![3]],components);
    }

    #[test]
    fn test_condorcet_winner_is_whole_smith_set() {
        let results = vec![beat(2,0,3),beat(2,1,1),beat(0,1,4)];
        assert_eq!(vec![2],smith_set(3,&results));
    }

    #[test]
    fn test_cycle_with_minimax() {
        // 0 beats 1 by 5, 1 beats 2 by 1, 2 beats 0 by 2, and all of them beat 3.
        let results = vec![beat(0,1,5),beat(1,2,1),beat(2,0,2),beat(0,3,1),beat(1,3,1),beat(2,3,1)];
        let smith = smith_set(4,&results);
        assert_eq!(vec![0,1,2],smith);
        assert_eq!(vec![2],minimax(&smith,&results));
    }

    #[test]
    fn test_ties_join_components() {
        let results = vec![beat(0,1,0),beat(0,2,2),beat(1,2,1)];
        let smith = smith_set(3,&results);
        assert_eq!(vec![0,1],smith);
        assert_eq!(vec![0,1],minimax(&smith,&results));
    }
}
