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

use fnv::FnvHashMap;
use serde_derive::Serialize;

use crate::config::Config;
use crate::predict::Support;
use crate::similarity::SimilarUser;
use crate::store::RatingStore;
use crate::types::{self, ItemId, Rating, Row, UserId};

/// An item proposed to a user, scored with the mean normalized rating of its supporters.
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct Recommendation {
    pub item: ItemId,
    pub predicted_score: Rating,
}

/// Proposes `count` items the user has not rated yet. Neighbors vote for an item by rating it
/// with at least the like threshold. An item becomes a recommendation the moment it collects
/// `support` votes, scored with the mean of exactly these votes, so the result lists the items
/// in the order in which they reached their support.
///
/// We stop as soon as `count` items are found. If the neighbors are exhausted before that we
/// return `None`, partial lists are never returned.
pub fn recommend(
    ratings: &RatingStore,
    user: UserId,
    neighbors: &[SimilarUser],
    count: usize,
    config: &Config,
) -> Option<Vec<Recommendation>> {

    if count == 0 {
        return Some(Vec::new());
    }

    let no_history = types::new_row();
    let history: &Row = ratings.row(user).unwrap_or(&no_history);

    let mut votes: FnvHashMap<ItemId, Support> =
        FnvHashMap::with_capacity_and_hasher(100, Default::default());

    let mut recommendations: Vec<Recommendation> = Vec::with_capacity(count);

    for neighbor in neighbors {

        let neighbor_row = match ratings.row(neighbor.user) {
            Some(row) => row,
            None => continue,
        };

        for (item, rating) in neighbor_row.iter() {

            if history.contains_key(item) || *rating < config.like_threshold() {
                continue;
            }

            let votes_for_item = votes.entry(*item).or_insert_with(Support::default);
            votes_for_item.add(*rating);

            if votes_for_item.count() == config.support() {
                recommendations.push(Recommendation {
                    item: *item,
                    predicted_score: votes_for_item.mean(),
                });

                if recommendations.len() == count {
                    return Some(recommendations);
                }
            }
        }
    }

    None
}
