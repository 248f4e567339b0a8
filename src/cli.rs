// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn all_flag() -> Arg {
    Arg::new("all")
        .long("all")
        .action(ArgAction::SetTrue)
        .help("Include deleted records")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true)
}

fn date_range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("Start date YYYY-MM-DD (default: start of this month)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("End date YYYY-MM-DD (default: end of this month)"),
    )
}

fn tx_filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("account").long("account"))
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("type").long("type").value_parser(["income", "expense"]))
        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
        .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
}

pub fn build_cli() -> Command {
    Command::new("tally")
        .about("Personal finance from the command line, backed by the finance REST API")
        .version(clap::crate_version!())
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("API base URL (overrides TALLY_API_URL)"),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session token")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Create a user and sign in")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true))
                .arg(Arg::new("confirm").long("confirm").required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the stored session token"))
        .subcommand(Command::new("whoami").about("Show the signed-in user").arg(json_flag()))
        .subcommand(
            Command::new("profile").about("Manage the signed-in user").subcommand(
                Command::new("update")
                    .arg(Arg::new("name").long("name"))
                    .arg(Arg::new("email").long("email")),
            ),
        )
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("checking")
                                .value_parser(["checking", "savings", "credit", "other"]),
                        )
                        .arg(Arg::new("balance").long("balance")),
                )
                .subcommand(Command::new("list").arg(all_flag()).arg(json_flag()))
                .subcommand(Command::new("show").arg(id_arg()).arg(json_flag()))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["checking", "savings", "credit", "other"]),
                        )
                        .arg(Arg::new("balance").long("balance")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(Command::new("list").arg(all_flag()).arg(json_flag()))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD")),
                )
                .subcommand(tx_filter_args(
                    Command::new("list")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(all_flag())
                        .arg(json_flag()),
                ))
                .subcommand(Command::new("show").arg(id_arg()).arg(json_flag()))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move money between accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD")),
                )
                .subcommand(Command::new("list").arg(all_flag()).arg(json_flag()))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("from").long("from"))
                        .arg(Arg::new("to").long("to"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage budgets")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .default_value("monthly")
                                .value_parser(["monthly", "yearly"]),
                        )
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(Arg::new("end").long("end").required(true)),
                )
                .subcommand(Command::new("list").arg(all_flag()).arg(json_flag()))
                .subcommand(Command::new("status").arg(id_arg()).arg(json_flag()))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_parser(["monthly", "yearly"]),
                        )
                        .arg(Arg::new("start").long("start"))
                        .arg(Arg::new("end").long("end")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("analytics")
                .about("Aggregated reports computed by the server")
                .subcommand(date_range_args(Command::new("summary").arg(json_flag())))
                .subcommand(date_range_args(
                    Command::new("by-category")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(json_flag()),
                ))
                .subcommand(
                    Command::new("monthly")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(json_flag()),
                )
                .subcommand(date_range_args(
                    Command::new("trends")
                        .arg(
                            Arg::new("group-by")
                                .long("group-by")
                                .default_value("day")
                                .value_parser(["day", "week", "month"]),
                        )
                        .arg(json_flag()),
                ))
                .subcommand(date_range_args(
                    Command::new("chart")
                        .about("Expense vs income series")
                        .arg(
                            Arg::new("group-by")
                                .long("group-by")
                                .default_value("day")
                                .value_parser(["day", "week", "month"]),
                        )
                        .arg(json_flag()),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand(tx_filter_args(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                )),
        )
}
