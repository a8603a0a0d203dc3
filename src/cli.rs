use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("camsnap")
        .version("0.1.0")
        .about("Gets a snapshot from each of your configured cameras")
        .arg(
            Arg::new("conf-folder-name")
                .long("conf-folder-name")
                .value_name("NAME")
                .help("The name of the folder in which the configuration is kept")
                .default_value("config")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("conf-file-name")
                .long("conf-file-name")
                .value_name("NAME")
                .help("Name of the config file, assumed to be under the config folder")
                .default_value("cameras.json")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("snap-folder-name")
                .long("snap-folder-name")
                .value_name("NAME")
                .help("The name of the folder our snapshots will be saved to")
                .default_value("snaps")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
}
