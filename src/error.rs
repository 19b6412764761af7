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

use std::io;

use thiserror::Error;

/// Reasons for which reading a ratings file fails. Line numbers start at 1.
#[derive(Debug, Error)]
pub enum LoadError {

    #[error("Failed reading input file: {0}")]
    Io(#[from] io::Error),

    #[error("Missing {field} on line {line}")]
    MissingField { field: &'static str, line: usize },

    #[error("Invalid user ID '{value}' on line {line}")]
    InvalidUserId { value: String, line: usize },

    #[error("Invalid item ID '{value}' on line {line}")]
    InvalidItemId { value: String, line: usize },

    #[error("Invalid rating '{value}' on line {line}")]
    InvalidRating { value: String, line: usize },
}

/// Threshold settings the recommender cannot work with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {

    #[error("The support must be at least 1")]
    ZeroSupport,

    #[error("The like threshold must be a finite number, got {0}")]
    NonFiniteLikeThreshold(f32),
}
