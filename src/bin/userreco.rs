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

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::stdout;
use std::process;

use getopts::{Matches, Options};
use log::{info, warn};
use rand::Rng;

use userreco::{batch, evaluate, io, UserBasedRecommender};
use userreco::config::{Config, DEFAULT_LIKE_THRESHOLD, DEFAULT_SUPPORT};
use userreco::io::Partition;
use userreco::recommend::Recommendation;
use userreco::types::UserId;

fn main() {

    sensible_env_logger::init!();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("n", "num-items", "Number of items to recommend per user (optional, defaults \
        to 3).", "NUMBER");
    opts.optopt("u", "user", "User to compute recommendations for (optional, an arbitrary user \
        is chosen by default).", "ID");
    opts.optflag("a", "all-users", "Compute recommendations for every user.");
    opts.optflag("e", "evaluate", "Hold out 20% of the ratings and print the predicted rating, \
        the actual rating and the running RMSE for each of them.");
    opts.optopt("s", "support", "Number of supporting neighbor ratings required for a \
        prediction (optional, defaults to 40).", "NUMBER");
    opts.optopt("l", "like-threshold", "Minimum normalized rating in [-1,1] for a neighbor to \
        vote for an item (optional, defaults to 0.1).", "NUMBER");
    opts.optopt("t", "threads", "Number of threads to use (optional, defaults to the number of \
        CPUs).", "NUMBER");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, &opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, &opts, None);
    }

    let ratings_path = match matches.free.first() {
        Some(path) => path.clone(),
        None => return print_usage_and_exit(
            &program,
            &opts,
            Some("Please specify a ratings file."),
        ),
    };

    let settings = match Settings::parse(&matches) {
        Ok(settings) => settings,
        Err(hint) => return print_usage_and_exit(&program, &opts, Some(&hint)),
    };

    let result = if matches.opt_present("e") {
        evaluate_predictions(&ratings_path, &settings)
    } else {
        compute_recommendations(&ratings_path, &settings)
    };

    if let Err(error) = result {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn print_usage_and_exit(program: &str, opts: &Options, hint: Option<&str>) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options] RATINGS_FILE", program);
    eprint!("{}", opts.usage(&brief));

    process::exit(if hint.is_some() { 1 } else { 0 });
}

struct Settings {
    config: Config,
    num_items: usize,
    user: Option<UserId>,
    all_users: bool,
    pool_size: usize,
    output_path: Option<String>,
}

impl Settings {

    fn parse(matches: &Matches) -> Result<Self, String> {

        let support: usize = matches.opt_get_default("s", DEFAULT_SUPPORT)
            .map_err(|failure| format!("Problem with option 's': {}", failure))?;

        let like_threshold = matches.opt_get_default("l", DEFAULT_LIKE_THRESHOLD)
            .map_err(|failure| format!("Problem with option 'l': {}", failure))?;

        let config = Config::new(support, like_threshold)
            .map_err(|failure| failure.to_string())?;

        let num_items: usize = matches.opt_get_default("n", 3)
            .map_err(|failure| format!("Problem with option 'n': {}", failure))?;

        let user: Option<UserId> = matches.opt_get("u")
            .map_err(|failure| format!("Problem with option 'u': {}", failure))?;

        let pool_size: usize = matches.opt_get_default("t", num_cpus::get())
            .map_err(|failure| format!("Problem with option 't': {}", failure))?;

        Ok(Settings {
            config,
            num_items,
            user,
            all_users: matches.opt_present("a"),
            pool_size,
            output_path: matches.opt_str("o"),
        })
    }
}

fn compute_recommendations(ratings_path: &str, settings: &Settings) -> Result<(), Box<dyn Error>> {

    let ratings = io::read_ratings_file(ratings_path, Partition::All)?;

    let mut users: Vec<UserId> = ratings.users().collect();
    users.sort();

    let recommender = UserBasedRecommender::normalized(ratings, settings.config);

    let recommendations: Vec<(UserId, Option<Vec<Recommendation>>)> = if settings.all_users {
        info!("Computing {} recommendations for {} users", settings.num_items, users.len());

        let recommendations_per_user =
            batch::recommend_all(&recommender, &users, settings.num_items, settings.pool_size);

        users.into_iter().zip(recommendations_per_user.into_iter()).collect()
    } else {
        let user = match settings.user {
            Some(user) => user,
            None => match rand::thread_rng().choose(&users) {
                Some(user) => *user,
                None => return Err(From::from("No ratings found, cannot choose a user.")),
            },
        };

        if !recommender.ratings().contains_user(user) {
            warn!("User {} has no ratings", user);
        }

        info!("Computing {} recommendations for user {}", settings.num_items, user);

        let user_recommendations = recommender.recommend(user, settings.num_items);
        if user_recommendations.is_none() {
            warn!("Not enough support to recommend {} items to user {}", settings.num_items, user);
        }

        vec![(user, user_recommendations)]
    };

    io::write_recommendations(&recommendations, settings.output_path.clone())?;

    Ok(())
}

fn evaluate_predictions(ratings_path: &str, settings: &Settings) -> Result<(), Box<dyn Error>> {

    let train = io::read_ratings_file(ratings_path, Partition::Train)?;
    let test = io::read_ratings_file(ratings_path, Partition::Test)?;

    let evaluation = evaluate::evaluate(train, &test, settings.config, settings.pool_size);

    match settings.output_path {
        Some(ref path) => io::write_evaluation(&evaluation, File::create(path)?)?,
        None => io::write_evaluation(&evaluation, stdout())?,
    }

    Ok(())
}
