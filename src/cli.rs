// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("finview")
        .version(crate_version!())
        .about("FinView: personal finance tracking with live views, budgets, and AI savings tips")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Sign up, sign in, and manage the session")
                .subcommand(
                    Command::new("signup")
                        .about("Create a profile and sign in")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .about("Sign in")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Sign out"))
                .subcommand(json_flags(
                    Command::new("whoami").about("Show the signed-in user"),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Delete the signed-in user and all their data")
                        .arg(Arg::new("password").long("password").required(true)),
                ),
        )
        .subcommand(
            Command::new("profile")
                .about("Show and update the signed-in profile")
                .subcommand(json_flags(Command::new("show").about("Show the profile")))
                .subcommand(
                    Command::new("update")
                        .about("Update display name and photo")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("photo").long("photo")),
                )
                .subcommand(
                    Command::new("notify")
                        .about("Set notification preferences")
                        .arg(
                            Arg::new("weekly-summary")
                                .long("weekly-summary")
                                .value_parser(value_parser!(bool)),
                        )
                        .arg(
                            Arg::new("budget-alerts")
                                .long("budget-alerts")
                                .value_parser(value_parser!(bool)),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Per-category monthly limits")
                .subcommand(
                    Command::new("set")
                        .about("Set the limit for a category")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List budgets with derived spend"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Linked financial accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Checking, Savings, or Credit Card"),
                        )
                        .arg(Arg::new("provider").long("provider").required(true))
                        .arg(Arg::new("balance").long("balance").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts")))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(json_flags(Command::new("dashboard").about(
            "Overview totals, monthly series, category totals, and budget progress",
        )))
        .subcommand(
            Command::new("advisor")
                .about("AI savings tips")
                .subcommand(
                    Command::new("configure")
                        .about("Set the advisor endpoint")
                        .arg(Arg::new("url").long("url").required(true))
                        .arg(Arg::new("token").long("token")),
                )
                .subcommand(json_flags(
                    Command::new("tips").about("Generate savings tips from spending data"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Export the transaction partition")
                        .arg(Arg::new("format").long("format").required(true))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for integrity issues"))
}
