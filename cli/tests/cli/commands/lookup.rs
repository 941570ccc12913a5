use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::{CMD_NAME, utils};

crate::commands::test_simple_display! {
    (
        lookup_of_value,
        "lookup",
        utils::testdata::wind_speed()?,
        vec!["Wind speed", "10", "110"],
        "2.5\n"
    ),
    (
        lookup_of_masked_cell,
        "lookup",
        utils::testdata::wind_speed()?,
        vec!["Wind speed", "20.0", "110.0"],
        "--\n"
    ),
    (
        lookup_with_negative_latitude,
        "lookup",
        utils::testdata::multi_parameter()?,
        vec!["Temperature", "-10", "10"],
        "281.0\n"
    ),
    (
        lookup_with_hemisphere_letters,
        "lookup",
        utils::testdata::multi_parameter()?,
        vec!["Temperature", "10S", "10E"],
        "281.0\n"
    ),
    (
        lookup_in_north_to_south_grid,
        "lookup",
        utils::testdata::multi_parameter()?,
        vec!["1.0", "20N", "150E"],
        "1.0\n"
    ),
}

macro_rules! test_lookup_failures {
    ($(($name:ident, $args:expr, $expected_stderr:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let input = utils::testdata::wind_speed()?;
            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg("lookup").arg(input.path()).args($args);
            cmd.assert()
                .failure()
                .stdout(predicate::str::is_empty())
                .stderr(predicate::str::diff($expected_stderr));

            Ok(())
        }
    )*);
}

test_lookup_failures! {
    (
        lookup_off_grid_latitude,
        vec!["Wind speed", "30", "100"],
        "error: latitude 30 is not a grid coordinate of this parameter\n"
    ),
    (
        lookup_between_longitudes,
        vec!["Wind speed", "10", "105.5"],
        "error: longitude 105.5 is not a grid coordinate of this parameter\n"
    ),
    (
        lookup_with_longitude_letter_for_latitude,
        vec!["Wind speed", "10E", "100"],
        "error: latitude must be suffixed with 'N' or 'S'\n"
    ),
}
