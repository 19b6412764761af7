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
use log::{info, warn};
use serde_derive::Serialize;

use crate::UserBasedRecommender;
use crate::batch;
use crate::config::Config;
use crate::normalize::scale;
use crate::store::RatingStore;
use crate::types::{ItemId, Rating, UserId};

/// A held-out rating next to its prediction. `actual` is the rating as found in the input,
/// `actual_normalized` is that rating on the scale of the predictions. `rmse` is the root mean
/// squared error over all predictions made up to and including this rating, `None` as long as
/// nothing was predicted.
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct EvaluatedRating {
    pub user: UserId,
    pub item: ItemId,
    pub predicted: Option<Rating>,
    pub actual: Rating,
    pub actual_normalized: Rating,
    pub rmse: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunningRmse {
    sum_of_squared_errors: f64,
    count: u64,
}

impl RunningRmse {

    pub fn add(&mut self, predicted: Rating, actual: Rating) {
        let error = predicted as f64 - actual as f64;
        self.sum_of_squared_errors += error * error;
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some((self.sum_of_squared_errors / self.count as f64).sqrt())
        }
    }
}

/// Predicts every rating of the `test` partition from the `train` partition. Both partitions are
/// expected to contain raw ratings. The train ratings get normalized here, and each held-out
/// rating is rescaled with the minimum and maximum of the user's raw train ratings, so that
/// predictions and actual ratings are comparable. Held-out ratings of users without any train
/// ratings cannot be rescaled and are skipped.
///
/// The ratings are evaluated in ascending (user, item) order.
pub fn evaluate(
    train: RatingStore,
    test: &RatingStore,
    config: Config,
    pool_size: usize,
) -> Vec<EvaluatedRating> {

    let train_ranges: FnvHashMap<UserId, (Rating, Rating)> = train.rows()
        .filter_map(|(user, _)| train.rating_range(user).map(|range| (user, range)))
        .collect();

    let mut test_users: Vec<UserId> = test.users().collect();
    test_users.sort();

    let mut queries: Vec<(UserId, ItemId)> = Vec::with_capacity(test.num_ratings());
    let mut actual_ratings: Vec<(Rating, Rating)> = Vec::with_capacity(test.num_ratings());
    let mut num_skipped = 0;

    for user in test_users {
        let held_out = match test.row(user) {
            Some(row) => row,
            None => continue,
        };

        match train_ranges.get(&user) {
            Some(&(min, max)) => {
                for (item, rating) in held_out.iter() {
                    queries.push((user, *item));
                    actual_ratings.push((*rating, scale(min, max, *rating)));
                }
            },
            None => num_skipped += held_out.len(),
        }
    }

    if num_skipped > 0 {
        warn!("Skipped {} held-out ratings of users without train ratings", num_skipped);
    }

    info!("Predicting {} held-out ratings on {} threads", queries.len(), pool_size);

    let recommender = UserBasedRecommender::normalized(train, config);
    let predictions = batch::predict_all(&recommender, &queries, pool_size);

    let mut rmse = RunningRmse::default();

    let evaluation: Vec<EvaluatedRating> = queries.into_iter()
        .zip(predictions.into_iter())
        .zip(actual_ratings.into_iter())
        .map(|(((user, item), predicted), (actual, actual_normalized))| {
            if let Some(predicted) = predicted {
                rmse.add(predicted, actual_normalized);
            }
            EvaluatedRating {
                user,
                item,
                predicted,
                actual,
                actual_normalized,
                rmse: rmse.value(),
            }
        })
        .collect();

    info!(
        "Predicted {} of {} held-out ratings, RMSE {:?}",
        rmse.count(),
        evaluation.len(),
        rmse.value(),
    );

    evaluation
}
