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

use crate::similarity::SimilarUser;
use crate::store::RatingStore;
use crate::types::{ItemId, Rating};

/// Running sum and count of the neighbor ratings that support a prediction.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Support {
    sum: f64,
    count: usize,
}

impl Support {

    pub(crate) fn add(&mut self, rating: Rating) {
        self.sum += rating as f64;
        self.count += 1;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn mean(&self) -> Rating {
        (self.sum / self.count as f64) as Rating
    }
}

/// Averages the ratings for `item` of the most similar neighbors who rated it. We walk the
/// neighbors in order and stop as soon as `support` of them have rated the item. Returns `None`
/// if we run out of neighbors before that, we never fall back to an average over fewer ratings.
pub fn predict_rating(
    ratings: &RatingStore,
    neighbors: &[SimilarUser],
    item: ItemId,
    support: usize,
) -> Option<Rating> {

    let mut supporting_ratings = Support::default();

    for neighbor in neighbors {
        if let Some(rating) = ratings.rating(neighbor.user, item) {
            supporting_ratings.add(rating);

            if supporting_ratings.count() >= support {
                return Some(supporting_ratings.mean());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::similarity::nearest_neighbors;

    fn ratings() -> RatingStore {
        vec![
            (0, 1, 0.5),
            (1, 1, 1.0), (1, 2, 0.5),
            (2, 1, 0.5), (2, 2, 1.0),
            (3, 2, -1.0), (3, 3, 1.0),
            (4, 1, -1.0), (4, 3, 1.0),
        ].into_iter().collect()
    }

    #[test]
    fn averages_the_first_supporting_neighbors() {
        let ratings = ratings();
        let neighbors = vec![
            SimilarUser::new(3, 0.9),
            SimilarUser::new(1, 0.8),
            SimilarUser::new(2, 0.7),
            SimilarUser::new(4, 0.1),
        ];

        let prediction = predict_rating(&ratings, &neighbors, 2, 2).unwrap();
        assert!(close_enough_to(prediction, -0.25));

        // The third rating from user 2 must not be taken into account
        let prediction = predict_rating(&ratings, &neighbors, 1, 2).unwrap();
        assert!(close_enough_to(prediction, 0.75));
    }

    #[test]
    fn insufficient_support_gives_no_prediction() {
        let ratings = ratings();
        let neighbors = nearest_neighbors(&ratings, 0);

        assert_eq!(predict_rating(&ratings, &neighbors, 3, 3), None);
        assert_eq!(predict_rating(&ratings, &neighbors, 99, 1), None);
        assert!(predict_rating(&ratings, &neighbors, 3, 2).is_some());
    }

    #[test]
    fn query_user_does_not_support_itself() {
        let ratings = ratings();
        let neighbors = nearest_neighbors(&ratings, 3);

        // Only user 4 rated item 3 besides user 3
        assert_eq!(predict_rating(&ratings, &neighbors, 3, 2), None);
        assert_eq!(predict_rating(&ratings, &neighbors, 3, 1), Some(1.0));
    }

    #[test]
    fn support_accumulator() {
        let mut support = Support::default();
        support.add(1.0);
        support.add(0.5);
        support.add(-0.3);

        assert_eq!(support.count(), 3);
        assert!(close_enough_to(support.mean(), 0.4));
    }

    fn close_enough_to(value: Rating, expected: Rating) -> bool {
        (value - expected).abs() < 0.0001
    }
}
