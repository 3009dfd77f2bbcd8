/*
 * secretshare: Shamir secret sharing over prime fields
 * Copyright (C) 2018-2022 Aleksa Sarai <cyphar@cyphar.com>
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
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::{
    error::Error as StdError,
    fs::File,
    io,
    io::{prelude::*, BufReader},
};

use anyhow::{anyhow, ensure, Context, Error};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

extern crate secretshare_core;
use secretshare_core::{FromWire, Secret, SecretShare, Share, ToWire};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Hex,
    Base64,
}

impl Format {
    fn from_matches(matches: &ArgMatches) -> Result<Self, Error> {
        match matches
            .get_one::<String>("format")
            .context("--format argument has no default")?
            .as_str()
        {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            format => Err(anyhow!("unknown share format '{}'", format)),
        }
    }

    fn encode<T: ToWire>(self, value: &T) -> String {
        match self {
            Self::Hex => value.to_hex(),
            Self::Base64 => value.to_base64(),
        }
    }

    fn decode<T: FromWire>(self, data: &str) -> Result<T, secretshare_core::Error> {
        match self {
            Self::Hex => T::from_hex(data),
            Self::Base64 => T::from_base64(data),
        }
    }
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .help("Text encoding used for shares.")
        .value_parser(["hex", "base64"])
        .default_value("hex")
        .action(ArgAction::Set)
}

fn open_input(path: &str) -> Result<Box<dyn Read>, Error> {
    Ok(if path == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(
            File::open(path).with_context(|| format!("failed to open input file '{}'", path))?,
        )
    })
}

// secretshare split --threshold <T> --shares <N> [--format <FORMAT>] INPUT
fn split_cli() -> Command {
    Command::new("split")
            .about("Split a secret into shares, a threshold of which are needed to recover it.")
            .arg(Arg::new("threshold")
                .short('t')
                .long("threshold")
                .value_name("THRESHOLD")
                .help("Number of shares required to recover the secret (must not be larger than --shares).")
                .action(ArgAction::Set)
                .required(true))
            .arg(Arg::new("shares")
                .short('n')
                .long("shares")
                .value_name("NUM SHARES")
                .help("Number of shares to create (at most 255).")
                .action(ArgAction::Set)
                .required(true))
            .arg(format_arg())
            .arg(Arg::new("INPUT")
                .help(r#"Path to file containing the secret data to split ("-" to read from stdin)."#)
                .action(ArgAction::Set)
                .allow_hyphen_values(true)
                .required(true)
                .index(1))
}

fn parse_secret(data: &[u8]) -> Result<Secret, Error> {
    ensure!(!data.is_empty(), "secret data must not be empty");
    // Leading NUL bytes cannot survive the round-trip through an integer.
    ensure!(data[0] != 0, "secret data must not start with a NUL byte");
    ensure!(
        data.len() <= Secret::max_bytes(),
        "secret data is {} bytes long but at most {} bytes can be split",
        data.len(),
        Secret::max_bytes()
    );
    Secret::from_wire(data).context("secret data is too large")
}

fn split(matches: &ArgMatches) -> Result<(), Error> {
    let threshold: u8 = matches
        .get_one::<String>("threshold")
        .context("required --threshold argument not provided")?
        .parse()
        .context("--threshold argument was not an integer between 1 and 255")?;
    let share_count: u8 = matches
        .get_one::<String>("shares")
        .context("required --shares argument not provided")?
        .parse()
        .context("--shares argument was not an integer between 1 and 255")?;
    let format = Format::from_matches(matches)?;
    let input_path = matches
        .get_one::<String>("INPUT")
        .context("required INPUT argument not provided")?;

    let mut data = Vec::new();
    BufReader::new(open_input(input_path)?)
        .read_to_end(&mut data)
        .with_context(|| format!("failed to read secret data from '{}'", input_path))?;

    let secret = parse_secret(&data)?;
    let shares = SecretShare::new(threshold, share_count)?
        .split(&secret)
        .context("splitting secret")?;

    let mut stdout = io::stdout().lock();
    for share in &shares {
        writeln!(stdout, "{}", format.encode(share))?;
    }
    Ok(())
}

// secretshare combine [--format <FORMAT>] [--output <OUTPUT>] [SHARE]...
fn combine_cli() -> Command {
    Command::new("combine")
            .about("Recover a secret from a set of shares. The result is NOT verified: too few shares, or shares from different secrets, silently produce garbage.")
            .arg(format_arg())
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .value_name("OUTPUT")
                .help(r#"Path to write the recovered secret data to ("-" to write to stdout)."#)
                .default_value("-")
                .allow_hyphen_values(true)
                .action(ArgAction::Set))
            .arg(Arg::new("SHARES")
                .value_name("SHARE")
                .help("Encoded shares. If none are given, shares are read from stdin (one per line).")
                .action(ArgAction::Append))
}

/// Read one share per line, skipping blank lines.
fn read_shares<R: BufRead>(reader: R, format: Format) -> Result<Vec<Share>, Error> {
    reader
        .lines()
        .enumerate()
        .filter(|(_, line)| !matches!(line.as_deref().map(str::trim), Ok("")))
        .map(|(idx, line)| {
            let line = line.context("failed to read share from stdin")?;
            format
                .decode(&line)
                .with_context(|| format!("failed to parse share on line {}", idx + 1))
        })
        .collect()
}

fn combine(matches: &ArgMatches) -> Result<(), Error> {
    let format = Format::from_matches(matches)?;
    let output_path = matches
        .get_one::<String>("output")
        .context("--output argument has no default")?;

    let shares = match matches.get_many::<String>("SHARES") {
        Some(args) => args
            .enumerate()
            .map(|(idx, arg)| {
                format
                    .decode(arg)
                    .with_context(|| format!("failed to parse share argument {}", idx + 1))
            })
            .collect::<Result<Vec<Share>, Error>>()?,
        None => read_shares(io::stdin().lock(), format)?,
    };
    tracing::debug!(num_shares = shares.len(), "read shares");

    let secret = secretshare_core::combine(&shares).context("recovering secret data")?;
    eprintln!(
        "warning: recovered secret from {} shares, but its correctness cannot be verified",
        shares.len()
    );

    let (mut stdout_writer, mut file_writer);
    let output_file: &mut dyn Write = if output_path == "-" {
        stdout_writer = io::stdout();
        &mut stdout_writer
    } else {
        file_writer = File::create(output_path)
            .with_context(|| format!("failed to open output file '{}' for writing", output_path))?;
        &mut file_writer
    };

    output_file
        .write_all(&secret.to_bytes_trimmed())
        .context("write secret data to file")?;

    Ok(())
}

fn cli() -> Command {
    Command::new("secretshare")
        .version("0.0.0")
        .author("Aleksa Sarai <cyphar@cyphar.com>")
        .about("Split secrets into shares using Shamir's threshold secret sharing.")
        // secretshare split --threshold <T> --shares <N> [--format <FORMAT>] INPUT
        .subcommand(split_cli())
        // secretshare combine [--format <FORMAT>] [--output <OUTPUT>] [SHARE]...
        .subcommand(combine_cli())
}

fn main() -> Result<(), Box<dyn StdError>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut app = cli();

    let ret = match app.get_matches_mut().subcommand() {
        Some(("split", sub_matches)) => split(sub_matches),
        Some(("combine", sub_matches)) => combine(sub_matches),
        Some((subcommand, _)) => {
            // We should never end up here.
            app.print_help()?;
            Err(anyhow!("unknown subcommand '{}'", subcommand))
        }
        None => {
            app.print_help()?;
            Err(anyhow!("no subcommand specified"))
        }
    }?;

    Ok(ret)
}
