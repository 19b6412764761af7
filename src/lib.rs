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

pub mod batch;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod io;
pub mod normalize;
pub mod predict;
pub mod recommend;
pub mod similarity;
pub mod store;
pub mod types;

mod usage_tests;

use log::debug;

use crate::config::Config;
use crate::recommend::Recommendation;
use crate::similarity::SimilarUser;
use crate::store::RatingStore;
use crate::types::{ItemId, Rating, UserId};

/// User-based collaborative filtering over a normalized rating matrix. The recommender owns the
/// ratings, which are read-only from here on, so queries for different users can be answered
/// concurrently (see the `batch` module). Every query ranks all other users from scratch.
pub struct UserBasedRecommender {
    ratings: RatingStore,
    config: Config,
}

impl UserBasedRecommender {

    /// Expects ratings which have already been normalized via
    /// [`RatingStore::normalize_all_users`].
    pub fn new(ratings: RatingStore, config: Config) -> Self {
        UserBasedRecommender { ratings, config }
    }

    /// Normalizes the raw ratings and takes ownership of them.
    pub fn normalized(mut ratings: RatingStore, config: Config) -> Self {
        ratings.normalize_all_users();
        UserBasedRecommender::new(ratings, config)
    }

    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cosine_similarity(&self, user_a: UserId, user_b: UserId) -> f32 {
        similarity::cosine_similarity(&self.ratings, user_a, user_b)
    }

    pub fn nearest_neighbors(&self, user: UserId) -> Vec<SimilarUser> {
        similarity::nearest_neighbors(&self.ratings, user)
    }

    /// Predicted normalized rating of `user` for `item`, `None` if not enough neighbors
    /// rated the item.
    pub fn predict_rating(&self, user: UserId, item: ItemId) -> Option<Rating> {
        let neighbors = self.nearest_neighbors(user);
        let prediction = predict::predict_rating(
            &self.ratings,
            &neighbors,
            item,
            self.config.support(),
        );

        if prediction.is_none() {
            debug!("Not enough support to predict the rating of user {} for item {}", user, item);
        }

        prediction
    }

    /// `count` new items for `user`, `None` if the neighbors do not support that many items.
    pub fn recommend(&self, user: UserId, count: usize) -> Option<Vec<Recommendation>> {
        let neighbors = self.nearest_neighbors(user);
        let recommendations = recommend::recommend(
            &self.ratings,
            user,
            &neighbors,
            count,
            &self.config,
        );

        if recommendations.is_none() {
            debug!("Not enough support to recommend {} items to user {}", count, user);
        }

        recommendations
    }
}
