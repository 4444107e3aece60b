//! CLI parse tests.

use super::{Cli, CliCommand, FetchArgs};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

pub(crate) fn parse_fetch(args: &[&str]) -> FetchArgs {
    match parse(args) {
        CliCommand::Fetch(a) => a,
        other => panic!("expected Fetch, got {:?}", other),
    }
}

pub(super) fn parse_err(args: &[&str]) -> clap::Error {
    Cli::try_parse_from(args).unwrap_err()
}

mod fetch;
