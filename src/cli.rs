use clap::{App, Arg};

const DEFAULT_CONFIG: &str = "config.yml";

#[derive(Debug)]
pub struct Args {
    pub config_path: String,
    pub dry_run: bool,
    pub debug: bool,
}

fn app() -> App<'static, 'static> {
    App::new("backsync")
        .version(crate_version!())
        .about("Mirror directories with rsync, excluding whatever .gitignore files ignore")
        .arg(Arg::with_name("config")
                 .help("Configuration file to load")
                 .short("c")
                 .long("config")
                 .takes_value(true)
                 .value_name("file")
                 .default_value(DEFAULT_CONFIG))
        .arg(Arg::with_name("dry-run")
                 .help("Compute and log the rsync commands without executing them")
                 .long("dry-run"))
        .arg(Arg::with_name("verbose")
                 .help("Print debugging messages to stderr")
                 .short("v")
                 .long("verbose"))
}

pub fn get_args() -> Args {
    let args = app().get_matches();

    Args {
        config_path: args.value_of("config").unwrap_or(DEFAULT_CONFIG).to_string(),
        dry_run: args.is_present("dry-run"),
        debug: args.is_present("verbose"),
    }
}
