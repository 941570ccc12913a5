use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

mod utils;

pub(crate) const CMD_NAME: &str = "gribview";

#[test]
fn help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("Usage:")
                .and(predicate::str::contains("Options:"))
                .and(predicate::str::contains("Commands:")),
        )
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn no_subcommand_specified() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("--help");
    let help_msg = cmd.output()?.stdout;
    let help_msg = String::from_utf8(help_msg)?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::diff(help_msg));

    Ok(())
}

#[test]
fn no_such_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("foo");
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::starts_with("error: unrecognized subcommand 'foo'")
                .and(predicate::str::contains("Usage:")),
        );

    Ok(())
}

#[test]
fn logging_goes_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::testdata::wind_speed()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.env("GRIBVIEW_LOG", "debug")
        .arg("list")
        .arg(input.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wind speed"))
        .stderr(predicate::str::contains("indexed GRIB source"));

    Ok(())
}
