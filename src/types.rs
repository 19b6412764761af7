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

use std::collections::BTreeMap;

use fnv::FnvHashMap;

pub type UserId = u32;
pub type ItemId = u32;
pub type Rating = f32;

/// The ratings of a single user. Keyed by item id in ascending order, which makes display,
/// similarity computation and candidate aggregation independent of insertion order.
pub type Row = BTreeMap<ItemId, Rating>;

pub type Rows = FnvHashMap<UserId, Row>;

pub fn new_row() -> Row {
    BTreeMap::new()
}

pub fn new_rows(capacity: usize) -> Rows {
    FnvHashMap::with_capacity_and_hasher(capacity, Default::default())
}
