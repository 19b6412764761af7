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

#[cfg(test)]
mod tests {

    use crate::UserBasedRecommender;
    use crate::config::Config;
    use crate::io::{self, Partition};
    use crate::store::RatingStore;
    use crate::types::{ItemId, UserId};

    const ALICE: UserId = 1;
    const BOB: UserId = 2;
    const CHARLES: UserId = 3;

    /* Alice and Bob rated the same 40 items very similarly, Bob additionally loves item 100.
       Charles rated a disjoint set of items and loves item 300. */
    fn three_users() -> RatingStore {
        let mut ratings = RatingStore::new();

        for item in 1..41 {
            let rating = (item % 5 + 1) as f32;
            ratings.add_rating(ALICE, item, rating);
            ratings.add_rating(BOB, item, rating);
        }
        ratings.add_rating(BOB, 100, 5.0);

        for item in 200..210 {
            ratings.add_rating(CHARLES, item, (item % 3 + 1) as f32);
        }
        ratings.add_rating(CHARLES, 300, 5.0);

        ratings
    }

    fn single_supporter() -> Config {
        Config::new(1, 0.1).unwrap()
    }

    #[test]
    fn recommends_what_similar_users_like() {
        let recommender = UserBasedRecommender::normalized(three_users(), single_supporter());

        let neighbors = recommender.nearest_neighbors(ALICE);
        assert_eq!(neighbors[0].user, BOB);
        assert_eq!(neighbors[1].user, CHARLES);
        assert_eq!(neighbors[1].similarity, 0.0);

        let recommendations = recommender.recommend(ALICE, 1).unwrap();
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].item, 100);
        assert!((recommendations[0].predicted_score - 1.0).abs() < 0.0001);
    }

    #[test]
    fn queries_do_not_change_results() {
        let recommender = UserBasedRecommender::normalized(three_users(), single_supporter());

        let first = recommender.nearest_neighbors(ALICE);
        let first_similarity = recommender.cosine_similarity(ALICE, BOB);

        for _ in 0..3 {
            assert_eq!(recommender.nearest_neighbors(ALICE), first);
            assert_eq!(recommender.cosine_similarity(ALICE, BOB), first_similarity);
            assert_eq!(recommender.recommend(ALICE, 1), recommender.recommend(ALICE, 1));
        }
    }

    /* With the default support of 40, we need a crowd of like-minded users. Everyone in the
       crowd shares ten items with Alice and loves item 100, just like Bob. */
    fn with_crowd(crowd_size: UserId) -> RatingStore {
        let mut ratings = three_users();

        for user in 1000..(1000 + crowd_size) {
            for item in 1..11 {
                ratings.add_rating(user, item, (item % 5 + 1) as f32);
            }
            ratings.add_rating(user, 100, 5.0);
        }

        ratings
    }

    #[test]
    fn default_support_needs_forty_neighbors() {
        let recommender = UserBasedRecommender::normalized(with_crowd(39), Config::default());

        // Bob and the 39 users of the crowd rated item 100
        let prediction = recommender.predict_rating(ALICE, 100).unwrap();
        assert!((prediction - 1.0).abs() < 0.0001);

        let recommendations = recommender.recommend(ALICE, 1).unwrap();
        assert_eq!(recommendations[0].item, 100);

        // Item 300 only has a single supporter
        assert_eq!(recommender.predict_rating(ALICE, 300), None);
        assert_eq!(recommender.recommend(ALICE, 2), None);
    }

    #[test]
    fn thirty_nine_supporters_are_not_enough() {
        let recommender = UserBasedRecommender::normalized(with_crowd(38), Config::default());

        // Bob and the 38 users of the crowd rated item 100
        assert_eq!(recommender.predict_rating(ALICE, 100), None);
        assert_eq!(recommender.recommend(ALICE, 1), None);
    }

    #[test]
    fn not_enough_support_with_defaults() {
        let recommender = UserBasedRecommender::normalized(three_users(), Config::default());

        assert_eq!(recommender.predict_rating(ALICE, 100), None);
        assert_eq!(recommender.recommend(ALICE, 1), None);
    }

    #[test]
    fn programmatic_usage() {

        /* Our input data comprises ratings in the format user::item::rating::timestamp. */
        let input = "1::10::5::978300760\n\
                     1::20::3::978302109\n\
                     1::30::1::978301968\n\
                     2::10::4::978300275\n\
                     2::20::2::978824291\n\
                     2::40::5::978302268\n\
                     3::10::1::978302039\n\
                     3::30::5::978300719\n\
                     3::40::2::978302268\n";

        let ratings = io::read_ratings(input.as_bytes(), Partition::All).unwrap();

        assert_eq!(ratings.num_users(), 3);
        assert_eq!(ratings.num_items(), 4);

        /* Ratings are normalized per user before we look for similar users. For this tiny
           dataset, a single supporting neighbor is enough. */
        let recommender = UserBasedRecommender::normalized(ratings, single_supporter());

        let recommendations = recommender.recommend(1, 1).unwrap();
        let items: Vec<ItemId> = recommendations.iter().map(|r| r.item).collect();

        /* User 3 has the opposite taste of user 1, which makes it the closest neighbor, but it
           dislikes item 40. User 2 loves it. */
        assert_eq!(items, vec![40]);

        for recommendation in recommendations.iter() {
            println!("Recommended item {} with predicted score {:.2}",
                recommendation.item, recommendation.predicted_score);
        }
    }
}
