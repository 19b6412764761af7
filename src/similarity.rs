/**
 * UserReco
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::cmp::Ordering;
use std::fmt;

use crate::store::RatingStore;
use crate::types::{Row, UserId};

/// A neighbor of some implicit query user, together with its similarity to that user.
#[derive(Debug, Clone, Copy)]
pub struct SimilarUser {
    pub similarity: f32,
    pub user: UserId,
}

impl SimilarUser {
    pub fn new(user: UserId, similarity: f32) -> Self {
        SimilarUser { similarity, user }
    }
}

impl fmt::Display for SimilarUser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{similarity={:.1} user={}}}", self.similarity, self.user)
    }
}

/// Most similar users first, ties are broken by ascending user id so that neighbor lists do
/// not depend on the iteration order of the store. Similarities are compared with
/// `total_cmp`, which keeps the order total even for NaN.
fn cmp_by_similarity(user_a: &SimilarUser, user_b: &SimilarUser) -> Ordering {
    user_b.similarity.total_cmp(&user_a.similarity)
        .then(user_a.user.cmp(&user_b.user))
}

impl PartialEq for SimilarUser {
    fn eq(&self, other: &Self) -> bool {
        cmp_by_similarity(self, other) == Ordering::Equal
    }
}

impl Eq for SimilarUser {}

impl Ord for SimilarUser {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_by_similarity(self, other)
    }
}

impl PartialOrd for SimilarUser {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_by_similarity(self, other))
    }
}

/// Absolute cosine similarity between the rows of two users. Unknown users have empty rows.
pub fn cosine_similarity(ratings: &RatingStore, user_a: UserId, user_b: UserId) -> f32 {
    match (ratings.row(user_a), ratings.row(user_b)) {
        (Some(row_a), Some(row_b)) => row_similarity(row_a, row_b),
        _ => 0.0,
    }
}

/// The sum of the products of the ratings for the items both rows share, divided by the
/// product of the euclidean norms of the full rows. The absolute value is reported, so users
/// with opposite tastes count as similar as well.
///
/// Rows with a norm of zero (e.g. users whose normalized ratings are all 0) have a similarity
/// of 0 to everyone, and so do rows holding non-finite ratings.
pub fn row_similarity(row_a: &Row, row_b: &Row) -> f32 {

    let norm_a = l2norm(row_a);
    let norm_b = l2norm(row_b);

    if !is_usable_norm(norm_a) || !is_usable_norm(norm_b) {
        return 0.0;
    }

    let (smaller, larger) = if row_a.len() <= row_b.len() {
        (row_a, row_b)
    } else {
        (row_b, row_a)
    };

    // Rows are ordered by item, so the shared items are summed up in the same order no
    // matter which row we iterate, this keeps the similarity exactly symmetric.
    let numerator: f64 = smaller.iter()
        .filter_map(|(item, rating)| {
            larger.get(item).map(|other_rating| *rating as f64 * *other_rating as f64)
        })
        .sum();

    let similarity = (numerator / (norm_a * norm_b)).abs() as f32;

    if similarity.is_finite() { similarity } else { 0.0 }
}

fn is_usable_norm(norm: f64) -> bool {
    norm.is_finite() && norm != 0.0
}

fn l2norm(row: &Row) -> f64 {
    row.values()
        .map(|rating| *rating as f64 * *rating as f64)
        .sum::<f64>()
        .sqrt()
}

/// Ranks all other users in the store by their similarity to `user`. Computes the similarity
/// to every user, which costs O(num_users * avg_row_size) per call. Nothing is cached.
pub fn nearest_neighbors(ratings: &RatingStore, user: UserId) -> Vec<SimilarUser> {

    let mut neighbors: Vec<SimilarUser> = Vec::with_capacity(ratings.num_users());

    let row = ratings.row(user);

    for (other_user, other_row) in ratings.rows() {
        if other_user == user {
            continue;
        }

        let similarity = match row {
            Some(row) => row_similarity(row, other_row),
            None => 0.0,
        };

        neighbors.push(SimilarUser::new(other_user, similarity));
    }

    neighbors.sort();
    neighbors
}
