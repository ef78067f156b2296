// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Maximum bipartite matching between givers and recipients.
//!
//! Both sides of the bipartite graph are the same roster: the left side
//! gives, the right side receives. A perfect matching is exactly a valid
//! assignment, so the size of a maximum matching decides feasibility.

use rand::Rng;
use rand::seq::SliceRandom;

/// A (possibly partial) matching of givers to recipients.
#[derive(Debug, Clone)]
pub(crate) struct Matching {
    pub(crate) recipient_of: Vec<Option<usize>>,
    pub(crate) size: usize,
}

impl Matching {
    pub(crate) fn is_perfect(&self) -> bool {
        self.size == self.recipient_of.len()
    }

    /// Returns the recipient of every giver, or `None` if some giver is unmatched.
    pub(crate) fn into_recipients(self) -> Option<Vec<usize>> {
        self.recipient_of.into_iter().collect()
    }
}

/// Computes a maximum matching with augmenting paths.
///
/// Givers are processed in `order`; each one tries the recipients of its
/// adjacency list in list order. Shuffling either input changes which
/// maximum matching is returned but never its size.
pub(crate) fn maximum_matching(adjacency: &[Vec<usize>], order: &[usize]) -> Matching {
    let count: usize = adjacency.len();
    let mut recipient_of: Vec<Option<usize>> = vec![None; count];
    let mut giver_of: Vec<Option<usize>> = vec![None; count];
    let mut visited: Vec<bool> = vec![false; count];
    let mut size: usize = 0;

    for &root in order {
        visited.fill(false);
        if augment(
            adjacency,
            root,
            &mut recipient_of,
            &mut giver_of,
            &mut visited,
        ) {
            size += 1;
        }
    }

    Matching { recipient_of, size }
}

/// Computes a perfect matching using shuffled giver order and adjacency lists.
///
/// Returns `None` when the graph has no perfect matching.
pub(crate) fn randomized_perfect_matching<R: Rng + ?Sized>(
    adjacency: &[Vec<usize>],
    rng: &mut R,
) -> Option<Vec<usize>> {
    let mut shuffled: Vec<Vec<usize>> = adjacency.to_vec();
    for targets in &mut shuffled {
        targets.shuffle(rng);
    }

    let mut order: Vec<usize> = (0..adjacency.len()).collect();
    order.shuffle(rng);

    let matching: Matching = maximum_matching(&shuffled, &order);
    if !matching.is_perfect() {
        return None;
    }
    matching.into_recipients()
}

/// Searches for an augmenting path starting at the unmatched giver `root`
/// and flips it into the matching if one is found.
///
/// Iterative depth-first search. `stack[k]` is a giver together with the
/// next position of its adjacency list to try; `path[k]` is the recipient
/// through which `stack[k + 1]` was reached. Outside of the flip,
/// `path.len() == stack.len() - 1`.
fn augment(
    adjacency: &[Vec<usize>],
    root: usize,
    recipient_of: &mut [Option<usize>],
    giver_of: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
    let mut path: Vec<usize> = Vec::new();

    while let Some(top) = stack.len().checked_sub(1) {
        let (giver, cursor) = stack[top];

        let Some(&recipient) = adjacency[giver].get(cursor) else {
            stack.pop();
            path.pop();
            continue;
        };
        stack[top].1 = cursor + 1;

        if visited[recipient] {
            continue;
        }
        visited[recipient] = true;
        path.push(recipient);

        match giver_of[recipient] {
            None => {
                for (&(path_giver, _), &path_recipient) in stack.iter().zip(path.iter()) {
                    recipient_of[path_giver] = Some(path_recipient);
                    giver_of[path_recipient] = Some(path_giver);
                }
                return true;
            }
            Some(current_giver) => stack.push((current_giver, 0)),
        }
    }

    false
}
