use clap::{Arg, ArgAction, Command};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print as JSON, derived fields included")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Id of the author")
}

pub fn arg_parser() -> Command {
    Command::new("catalog")
        .about("Author catalog")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add a record")
                .subcommand_required(true)
                .subcommand(
                    Command::new("author")
                        .arg(Arg::new("first-name").long("first-name").required(true))
                        .arg(Arg::new("family-name").long("family-name").required(true))
                        .arg(Arg::new("born").long("born").help("Date of birth"))
                        .arg(Arg::new("died").long("died").help("Date of death")),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List records")
                .subcommand_required(true)
                .subcommand(Command::new("authors").arg(json_flag())),
        )
        .subcommand(
            Command::new("show")
                .about("Show a single record")
                .subcommand_required(true)
                .subcommand(Command::new("author").arg(id_arg()).arg(json_flag())),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a record")
                .subcommand_required(true)
                .subcommand(Command::new("author").arg(id_arg())),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
}
