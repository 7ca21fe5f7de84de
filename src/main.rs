use backsync::{cli, run};

fn main() {
    let args = cli::get_args();
    if let Err(err) = run(args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
