// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rand::Rng;
use rand::seq::SliceRandom;

/// One level of the backtracking search: a giver and its shuffled candidates.
struct Frame {
    giver: usize,
    candidates: Vec<usize>,
    cursor: usize,
    chosen: Option<usize>,
}

impl Frame {
    fn new<R: Rng + ?Sized>(giver: usize, targets: &[usize], rng: &mut R) -> Self {
        let mut candidates: Vec<usize> = targets.to_vec();
        candidates.shuffle(rng);
        Self {
            giver,
            candidates,
            cursor: 0,
            chosen: None,
        }
    }
}

/// Runs one randomized backtracking attempt.
///
/// Givers are visited in a freshly shuffled order and each tries its
/// shuffled candidates, skipping recipients already taken in this attempt.
/// A giver that runs out of candidates is abandoned and the previous
/// giver moves on to its next candidate.
///
/// Every candidate inspected counts as one step. The attempt gives up once
/// `step_limit` steps have been spent, or when the search space is
/// exhausted.
///
/// Returns the recipient index of every giver on success.
pub(crate) fn attempt<R: Rng + ?Sized>(
    targets: &[Vec<usize>],
    step_limit: Option<u64>,
    rng: &mut R,
) -> Option<Vec<usize>> {
    let count: usize = targets.len();
    let mut order: Vec<usize> = (0..count).collect();
    order.shuffle(rng);

    let first: usize = *order.first()?;
    let mut used: Vec<bool> = vec![false; count];
    let mut frames: Vec<Frame> = Vec::with_capacity(count);
    frames.push(Frame::new(first, &targets[first], rng));
    let mut steps: u64 = 0;

    while let Some(frame) = frames.last_mut() {
        // Returning to this level means the previous choice led nowhere.
        if let Some(previous) = frame.chosen.take() {
            used[previous] = false;
        }

        let mut next: Option<usize> = None;
        while let Some(&candidate) = frame.candidates.get(frame.cursor) {
            frame.cursor += 1;
            steps += 1;
            if step_limit.is_some_and(|limit| steps > limit) {
                return None;
            }
            if !used[candidate] {
                next = Some(candidate);
                break;
            }
        }

        let Some(recipient) = next else {
            frames.pop();
            continue;
        };
        used[recipient] = true;
        frame.chosen = Some(recipient);

        let depth: usize = frames.len();
        if depth == count {
            return Some(collect_recipients(&frames, count));
        }
        let giver: usize = order[depth];
        frames.push(Frame::new(giver, &targets[giver], rng));
    }

    None
}

fn collect_recipients(frames: &[Frame], count: usize) -> Vec<usize> {
    let mut recipients: Vec<usize> = vec![0; count];
    for frame in frames {
        if let Some(recipient) = frame.chosen {
            recipients[frame.giver] = recipient;
        }
    }
    recipients
}
