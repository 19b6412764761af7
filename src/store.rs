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

use std::fmt;
use std::iter::FromIterator;

use fnv::FnvHashSet;

use crate::types::{self, ItemId, Rating, Row, Rows, UserId};

/// Sparse user-item rating matrix. Only observed (user, item) pairs are stored, rows are
/// allocated lazily on the first rating of a user.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    rows: Rows,
}

impl RatingStore {

    pub fn new() -> Self {
        RatingStore { rows: types::new_rows(100) }
    }

    /// Inserts the rating for (`user`, `item`), overwriting a previous rating for the same
    /// pair. No range validation happens here.
    pub fn add_rating(&mut self, user: UserId, item: ItemId, rating: Rating) {
        self.rows.entry(user)
            .or_insert_with(types::new_row)
            .insert(item, rating);
    }

    /// Returns `None` if either the user or the item is unknown, which is the common case for
    /// a sparse matrix and not an error.
    pub fn rating(&self, user: UserId, item: ItemId) -> Option<Rating> {
        self.rows.get(&user)
            .and_then(|row| row.get(&item))
            .cloned()
    }

    pub fn row(&self, user: UserId) -> Option<&Row> {
        self.rows.get(&user)
    }

    pub fn contains_user(&self, user: UserId) -> bool {
        self.rows.contains_key(&user)
    }

    pub fn users(&self) -> impl Iterator<Item=UserId> + '_ {
        self.rows.keys().cloned()
    }

    pub fn rows(&self) -> impl Iterator<Item=(UserId, &Row)> {
        self.rows.iter().map(|(user, row)| (*user, row))
    }

    pub(crate) fn rows_mut(&mut self) -> impl Iterator<Item=&mut Row> {
        self.rows.values_mut()
    }

    pub fn num_users(&self) -> usize {
        self.rows.len()
    }

    pub fn num_items(&self) -> usize {
        let mut items = FnvHashSet::with_capacity_and_hasher(self.rows.len(), Default::default());
        for row in self.rows.values() {
            items.extend(row.keys().cloned());
        }
        items.len()
    }

    pub fn num_ratings(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    /// Smallest and largest rating of a user, `None` for unknown users.
    pub fn rating_range(&self, user: UserId) -> Option<(Rating, Rating)> {
        self.rows.get(&user).and_then(row_range)
    }

    /// Diagnostic rendering of a user's row, see [`RowDisplay`].
    pub fn display_row(&self, user: UserId) -> Option<RowDisplay<'_>> {
        self.rows.get(&user).map(RowDisplay)
    }
}

pub(crate) fn row_range(row: &Row) -> Option<(Rating, Rating)> {
    if row.is_empty() {
        return None;
    }

    let range = row.values().fold(
        (Rating::INFINITY, Rating::NEG_INFINITY),
        |(min, max), rating| (min.min(*rating), max.max(*rating)),
    );

    Some(range)
}

impl Extend<(UserId, ItemId, Rating)> for RatingStore {
    fn extend<I: IntoIterator<Item=(UserId, ItemId, Rating)>>(&mut self, ratings: I) {
        for (user, item, rating) in ratings {
            self.add_rating(user, item, rating);
        }
    }
}

impl FromIterator<(UserId, ItemId, Rating)> for RatingStore {
    fn from_iter<I: IntoIterator<Item=(UserId, ItemId, Rating)>>(ratings: I) -> Self {
        let mut store = RatingStore::new();
        store.extend(ratings);
        store
    }
}

/// Renders a row with one `item: rating,` line per item in ascending item order, ratings with
/// a single decimal.
pub struct RowDisplay<'a>(&'a Row);

impl<'a> fmt::Display for RowDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{{")?;
        for (item, rating) in self.0.iter() {
            writeln!(f, "{}: {:.1},", item, rating)?;
        }
        writeln!(f, "}}")
    }
}
