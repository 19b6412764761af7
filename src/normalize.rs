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

use crate::store::{self, RatingStore};
use crate::types::Rating;

impl RatingStore {

    /// Rescales the ratings of every user to [-1, 1], based on the smallest and largest rating
    /// of that user. This is destructive and must happen exactly once, before the store is
    /// queried. Applying it a second time rescales the already normalized ratings again.
    pub fn normalize_all_users(&mut self) {
        for row in self.rows_mut() {
            if let Some((min, max)) = store::row_range(row) {
                for rating in row.values_mut() {
                    *rating = scale(min, max, *rating);
                }
            }
        }
    }
}

/// Linearly maps `value` from [`min`, `max`] to [-1, 1]. Returns 0 if `min == max`, which
/// covers users with a single rating or with identical ratings only.
pub fn scale(min: Rating, max: Rating, value: Rating) -> Rating {
    let range_size = max - min;
    if range_size == 0.0 {
        return 0.0;
    }
    -1.0 + 2.0 * ((value - min) / range_size)
}
