//! Spatial Clustering Engine
//!
//! Density clustering with a minimum cluster size of one: two words are
//! neighbours when their Euclidean pixel distance is ≤ `eps`, and a
//! cluster is a connected component of that relation. Every word lands
//! in exactly one cluster; isolated words become singletons.
//!
//! Output is deterministic (clusters ordered by their first member,
//! members in input order), but callers should only rely on membership.

use std::collections::VecDeque;

use crate::types::WordRecord;

/// One spatial "paragraph": borrowed members in input order
pub type WordCluster<'a, W> = Vec<&'a W>;

/// Group words into density-connected clusters
pub fn cluster_words<W: WordRecord>(words: &[W], eps: f64) -> Vec<WordCluster<'_, W>> {
    let n = words.len();
    let mut assigned = vec![false; n];
    let mut clusters = Vec::new();

    for seed in 0..n {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;

        let mut members = vec![seed];
        let mut frontier = VecDeque::from([seed]);
        while let Some(current) = frontier.pop_front() {
            let here = words[current].location();
            for (other, word) in words.iter().enumerate() {
                if !assigned[other] && here.distance(&word.location()) <= eps {
                    assigned[other] = true;
                    members.push(other);
                    frontier.push_back(other);
                }
            }
        }

        members.sort_unstable();
        clusters.push(members.into_iter().map(|i| &words[i]).collect());
    }

    clusters
}
