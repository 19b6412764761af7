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

use std::cmp;

use scoped_pool::Pool;

use crate::UserBasedRecommender;
use crate::recommend::Recommendation;
use crate::types::{ItemId, Rating, UserId};

// Chunks of queries handed out per thread
const CHUNKS_PER_THREAD: usize = 4;

fn chunk_size(num_queries: usize, pool_size: usize) -> usize {
    let num_chunks = pool_size * CHUNKS_PER_THREAD;
    cmp::max(1, (num_queries + num_chunks - 1) / num_chunks)
}

/// Predicts the ratings for all (user, item) pairs on `pool_size` threads. The predictions are
/// returned in the order of the queries.
pub fn predict_all(
    recommender: &UserBasedRecommender,
    queries: &[(UserId, ItemId)],
    pool_size: usize,
) -> Vec<Option<Rating>> {

    let pool_size = cmp::max(1, pool_size);
    let mut predictions: Vec<Option<Rating>> = vec![None; queries.len()];
    let chunk_size = chunk_size(queries.len(), pool_size);

    let pool = Pool::new(pool_size);

    pool.scoped(|scope| {
        let chunks = queries.chunks(chunk_size).zip(predictions.chunks_mut(chunk_size));

        for (queries_chunk, predictions_chunk) in chunks {
            scope.execute(move || {
                for (&(user, item), prediction) in queries_chunk.iter().zip(predictions_chunk) {
                    *prediction = recommender.predict_rating(user, item);
                }
            });
        }
    });

    pool.shutdown();

    predictions
}

/// Computes `count` recommendations for each of the `users` on `pool_size` threads. The
/// recommendations are returned in the order of the users.
pub fn recommend_all(
    recommender: &UserBasedRecommender,
    users: &[UserId],
    count: usize,
    pool_size: usize,
) -> Vec<Option<Vec<Recommendation>>> {

    let pool_size = cmp::max(1, pool_size);
    let mut recommendations: Vec<Option<Vec<Recommendation>>> = vec![None; users.len()];
    let chunk_size = chunk_size(users.len(), pool_size);

    let pool = Pool::new(pool_size);

    pool.scoped(|scope| {
        let chunks = users.chunks(chunk_size).zip(recommendations.chunks_mut(chunk_size));

        for (users_chunk, recommendations_chunk) in chunks {
            scope.execute(move || {
                for (&user, user_recommendations) in users_chunk.iter().zip(recommendations_chunk) {
                    *user_recommendations = recommender.recommend(user, count);
                }
            });
        }
    });

    pool.shutdown();

    recommendations
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::config::Config;
    use crate::store::RatingStore;

    fn recommender() -> UserBasedRecommender {
        let ratings: RatingStore = vec![
            (1, 1, 5.0), (1, 2, 3.0), (1, 3, 1.0),
            (2, 1, 4.0), (2, 2, 2.0), (2, 4, 5.0), (2, 5, 1.0),
            (3, 1, 1.0), (3, 3, 5.0), (3, 4, 4.0),
            (4, 2, 5.0), (4, 4, 1.0), (4, 5, 3.0),
            (5, 1, 2.0), (5, 5, 4.0), (5, 6, 5.0),
        ].into_iter().collect();

        UserBasedRecommender::normalized(ratings, Config::new(1, 0.1).unwrap())
    }

    #[test]
    fn parallel_predictions_match_sequential_ones() {
        let recommender = recommender();

        let queries: Vec<(UserId, ItemId)> = (1..6)
            .flat_map(|user| (1..8).map(move |item| (user, item)))
            .collect();

        let predictions = predict_all(&recommender, &queries, 3);

        assert_eq!(predictions.len(), queries.len());
        for (&(user, item), prediction) in queries.iter().zip(predictions.iter()) {
            assert_eq!(*prediction, recommender.predict_rating(user, item));
        }
    }

    #[test]
    fn parallel_recommendations_match_sequential_ones() {
        let recommender = recommender();
        let users: Vec<UserId> = vec![5, 4, 3, 2, 1, 42];

        let recommendations = recommend_all(&recommender, &users, 1, 2);

        assert_eq!(recommendations.len(), users.len());
        for (&user, user_recommendations) in users.iter().zip(recommendations.iter()) {
            assert_eq!(*user_recommendations, recommender.recommend(user, 1));
        }
    }

    #[test]
    fn no_queries() {
        let recommender = recommender();

        assert!(predict_all(&recommender, &[], 4).is_empty());
        assert!(recommend_all(&recommender, &[], 3, 0).is_empty());
    }

    #[test]
    fn chunking() {
        assert_eq!(chunk_size(0, 4), 1);
        assert_eq!(chunk_size(10, 4), 1);
        assert_eq!(chunk_size(100, 4), 7);
    }
}
