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

use crate::error::ConfigError;
use crate::types::Rating;

/// Number of supporting neighbor ratings required before we trust a prediction or a
/// recommended item.
pub const DEFAULT_SUPPORT: usize = 40;

/// Minimum normalized rating (in [-1, 1]) for a neighbor rating to count as a vote for an item.
pub const DEFAULT_LIKE_THRESHOLD: Rating = 0.1;

/// Thresholds of the recommender. A support of zero is rejected, every prediction and every
/// recommended item needs at least one supporting neighbor rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    support: usize,
    like_threshold: Rating,
}

impl Config {

    pub fn new(support: usize, like_threshold: Rating) -> Result<Self, ConfigError> {
        if support == 0 {
            return Err(ConfigError::ZeroSupport);
        }
        if !like_threshold.is_finite() {
            return Err(ConfigError::NonFiniteLikeThreshold(like_threshold));
        }
        Ok(Config { support, like_threshold })
    }

    pub fn support(&self) -> usize {
        self.support
    }

    pub fn like_threshold(&self) -> Rating {
        self.like_threshold
    }
}

impl Default for Config {
    fn default() -> Self {
        Config { support: DEFAULT_SUPPORT, like_threshold: DEFAULT_LIKE_THRESHOLD }
    }
}
