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

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::io::stdout;
use std::path::Path;

use log::{debug, info};
use serde_derive::Serialize;
use sha1::{Digest, Sha1};

use crate::error::LoadError;
use crate::evaluate::EvaluatedRating;
use crate::recommend::Recommendation;
use crate::store::RatingStore;
use crate::types::{ItemId, Rating, UserId};

const FIELD_SEPARATOR: &str = "::";

/// Which records of a ratings file to load. We hold out roughly 20% of the records as test
/// data, based on a hash of the record text, so that the same file always splits the same way
/// and the train and test partitions never overlap. The record text is the line exactly as it
/// appears in the file, including its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    All,
    Train,
    Test,
}

impl Partition {

    pub fn accepts(&self, record: &str) -> bool {
        match *self {
            Partition::All => true,
            Partition::Train => !is_test_record(record),
            Partition::Test => is_test_record(record),
        }
    }
}

pub fn is_test_record(record: &str) -> bool {
    hash_mod(record, 10) < 2
}

/// Interprets the first eight bytes of the SHA-1 digest of the record as a big endian integer.
fn hash_mod(record: &str, modulus: u64) -> u64 {
    let digest = Sha1::digest(record.as_bytes());

    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[..8]);

    u64::from_be_bytes(prefix) % modulus
}

/// Parses a `user::item::rating[::...]` record, any trailing fields (such as timestamps) are
/// ignored. Ratings may be integers or decimals, but must be finite.
pub fn parse_record(record: &str, line: usize) -> Result<(UserId, ItemId, Rating), LoadError> {

    let mut fields = record.split(FIELD_SEPARATOR).map(str::trim);

    let user_field = fields.next()
        .filter(|field| !field.is_empty())
        .ok_or(LoadError::MissingField { field: "user ID", line })?;
    let item_field = fields.next()
        .ok_or(LoadError::MissingField { field: "item ID", line })?;
    let rating_field = fields.next()
        .ok_or(LoadError::MissingField { field: "rating", line })?;

    let user: UserId = user_field.parse()
        .map_err(|_| LoadError::InvalidUserId { value: user_field.to_string(), line })?;
    let item: ItemId = item_field.parse()
        .map_err(|_| LoadError::InvalidItemId { value: item_field.to_string(), line })?;
    let rating: Rating = rating_field.parse().ok()
        .filter(|rating: &Rating| rating.is_finite())
        .ok_or_else(|| LoadError::InvalidRating { value: rating_field.to_string(), line })?;

    Ok((user, item, rating))
}

/// Reads all records of the given partition. Blank lines are skipped. Every record is parsed,
/// including the ones of the other partition, so a malformed file fails for both partitions.
pub fn read_ratings<R: BufRead>(
    mut reader: R,
    partition: Partition,
) -> Result<RatingStore, LoadError> {

    let mut ratings = RatingStore::new();
    let mut num_skipped: u64 = 0;

    let mut line = String::new();
    let mut line_number: usize = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line_number += 1;

        let record = line.trim_end_matches(|c: char| c == '\n' || c == '\r');

        if record.trim().is_empty() {
            continue;
        }

        let (user, item, rating) = parse_record(record, line_number)?;

        if partition.accepts(&line) {
            ratings.add_rating(user, item, rating);
        } else {
            num_skipped += 1;
        }
    }

    debug!("Skipped {} records outside of the {:?} partition", num_skipped, partition);

    Ok(ratings)
}

pub fn read_ratings_file<P: AsRef<Path>>(
    path: P,
    partition: Partition,
) -> Result<RatingStore, LoadError> {

    let path = path.as_ref();
    info!("Reading {:?} partition of {}", partition, path.display());

    let file = File::open(path)?;
    let ratings = read_ratings(BufReader::new(file), partition)?;

    info!(
        "Found {} ratings between {} users and {} items.",
        ratings.num_ratings(),
        ratings.num_users(),
        ratings.num_items(),
    );

    Ok(ratings)
}

/// Struct used for JSON serialization of computed recommendations. Field names will be used in
/// JSON, users without enough support have `null` recommendations.
#[derive(Serialize)]
struct UserRecommendations<'a> {
    for_user: UserId,
    recommended_items: Option<&'a [Recommendation]>,
}

/// Outputs recommendations as one JSON object per line. If an `output_path` is supplied, we
/// write to a file at the specified path, otherwise we output to stdout.
pub fn write_recommendations(
    recommendations: &[(UserId, Option<Vec<Recommendation>>)],
    output_path: Option<String>,
) -> io::Result<()> {

    let mut out: Box<dyn Write> = match output_path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout()),
    };

    for (user, recommended_items) in recommendations.iter() {
        let record = UserRecommendations {
            for_user: *user,
            recommended_items: recommended_items.as_ref().map(|items| items.as_slice()),
        };

        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }

    out.flush()
}

/// Outputs an evaluation run as tab separated values with a header line.
pub fn write_evaluation<W: Write>(evaluation: &[EvaluatedRating], out: W) -> Result<(), csv::Error> {

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(out);

    for evaluated_rating in evaluation {
        writer.serialize(evaluated_rating)?;
    }

    writer.flush()?;

    Ok(())
}
