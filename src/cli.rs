// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn horizon_arg() -> Arg {
    Arg::new("horizon")
        .long("horizon")
        .value_parser(value_parser!(i64))
        .allow_negative_numbers(true)
        .help("Months to forecast (default from config, else 3)")
}

fn calendar_arg() -> Arg {
    Arg::new("calendar-gaps")
        .long("calendar-gaps")
        .action(ArgAction::SetTrue)
        .help("Fit the trend over calendar distance instead of month position")
}

pub fn build_cli() -> Command {
    Command::new("finboard")
        .about("Personal income/expense tracker with charts and expense forecasting")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("FINBOARD_DB")
                .help("Path to the SQLite database"),
        )
        .subcommand(Command::new("init").about("Create the database if it does not exist"))
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description").short('d').required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Non-negative amount; direction comes from --type"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Income or Expense"),
                        )
                        .arg(Arg::new("category").long("category").default_value("")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change a transaction's description")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .default_value("Updated Entry"),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summaries and charts")
                .subcommand(json_args(
                    Command::new("monthly").about("Monthly income vs expenses"),
                ))
                .subcommand(json_args(
                    Command::new("categories").about("Expense spending by category"),
                ))
                .subcommand(json_args(
                    Command::new("savings").about("Cumulative savings over time"),
                ))
                .subcommand(json_args(
                    Command::new("forecast")
                        .about("Forecast monthly expenses")
                        .arg(horizon_arg())
                        .arg(calendar_arg()),
                )),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Render every report in one pass")
                .arg(horizon_arg())
                .arg(calendar_arg()),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true).allow_negative_numbers(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export all transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv or json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn negative_horizon_reaches_the_handler() {
        let m = build_cli().get_matches_from(["finboard", "report", "forecast", "--horizon", "-1"]);
        let (_, report) = m.subcommand().unwrap();
        let (_, fc) = report.subcommand().unwrap();
        assert_eq!(fc.get_one::<i64>("horizon"), Some(&-1));
    }
}
