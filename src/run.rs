use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli::Args;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::gitignore;
use crate::process;
use crate::runlog::{RunLog, LOG_FILE};

fn init_logger(debug: bool) {
    let mut log_builder = env_logger::Builder::new();
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    log_builder
        .format(|buf, r| writeln!(buf, "*** {}", r.args()))
        .filter(None, level)
        .init();
}

pub fn run(args: Args) -> Result<()> {
    init_logger(args.debug);

    let mut runlog = RunLog::open(Path::new(LOG_FILE));
    let stdin = io::stdin();
    let mut input = stdin.lock();

    run_with(&args, &mut runlog, &mut input)
}

fn run_with<R: BufRead>(args: &Args, runlog: &mut RunLog, input: &mut R) -> Result<()> {
    let config = match Config::load(Path::new(&args.config_path)) {
        Ok(config) => config,
        Err(err) => return fatal(runlog, err),
    };

    // A dry run never spawns anything, so it may proceed without the tool.
    if !args.dry_run && process::find_tool(process::SYNC_TOOL).is_none() {
        return fatal(runlog, Error::ToolNotFound(process::SYNC_TOOL.to_string()));
    }

    if !Path::new(&config.paths.dest_dir).is_dir() {
        let err = Error::MissingDir(config.paths.dest_dir.clone());
        runlog.error(&err.to_string());
        acknowledge(input);
        return Err(err);
    }

    if config.options.delete && !confirmed(input, &mut io::stdout()) {
        println!("Cancelled.");
        runlog.info("Run cancelled at the --delete confirmation");
        return Ok(());
    }

    for source in &config.paths.source_dirs {
        if !Path::new(source).is_dir() {
            println!("Not Found {}", source);
            let err = Error::MissingDir(source.clone());
            runlog.error(&err.to_string());
            acknowledge(input);
            return Err(err);
        }

        if let Err(err) = backup(source, &config, runlog, args.dry_run) {
            return fatal(runlog, err);
        }
    }

    Ok(())
}

fn backup(source: &str, config: &Config, runlog: &mut RunLog, dry_run: bool) -> Result<()> {
    println!("Backing up {} to {}", source, config.paths.dest_dir);

    let excludes = gitignore::exclusions(Path::new(source))?;
    debug!("{} exclusions under {}", excludes.len(), source);

    let cmd = process::sync_command(source, &config.paths.dest_dir, &excludes, config);
    let line = cmd.join(" ");
    println!("{}", line);
    runlog.info(&line);

    if dry_run {
        return Ok(());
    }

    // The exit status is logged but never acted on; the next source
    // directory is attempted either way.
    let status = process::spawn(&cmd)?;
    debug!("{} exited with {}", process::SYNC_TOOL, status);

    Ok(())
}

fn fatal<T>(runlog: &mut RunLog, err: Error) -> Result<T> {
    runlog.error(&err.to_string());
    Err(err)
}

/// Ask before a destructive run. Only the literal answer "yes" proceeds.
fn confirmed<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> bool {
    let _ = write!(
        output,
        "--delete will remove destination files with no source counterpart. Continue? (yes/no): "
    );
    let _ = output.flush();

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }

    answer.trim() == "yes"
}

/// Hold the console open so the operator sees the failure before exit.
fn acknowledge<R: BufRead>(input: &mut R) {
    println!("Press Enter to exit");
    let mut line = String::new();
    let _ = input.read_line(&mut line);
}

#[cfg(test)]
mod tests {
    use super::{confirmed, run_with};
    use crate::cli::Args;
    use crate::error::Error;
    use crate::runlog::RunLog;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn args(config_path: &Path) -> Args {
        Args {
            config_path: config_path.display().to_string(),
            dry_run: true,
            debug: false,
        }
    }

    fn write_config(dir: &Path, sources: &[&str], dest: &str, delete: bool) -> std::path::PathBuf {
        let mut doc = String::from("paths:\n  source_dirs:\n");
        for source in sources {
            doc.push_str(&format!("    - {}\n", source));
        }
        doc.push_str(&format!("  dest_dir: {}\n", dest));
        doc.push_str(&format!("config:\n  delete: {}\n  progress: false\n", delete));

        let path = dir.join("config.yml");
        fs::write(&path, doc).unwrap();
        path
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let scratch = TempDir::new().unwrap();
        let mut runlog = RunLog::open(&scratch.path().join("run.log"));

        let err = run_with(
            &args(&scratch.path().join("no-such.yml")),
            &mut runlog,
            &mut Cursor::new(Vec::new()),
        )
        .unwrap_err();

        match err {
            Error::Config(_, _) => {}
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_source_halts_and_logs() {
        let scratch = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let config = write_config(
            scratch.path(),
            &[&scratch.path().join("gone").display().to_string()],
            &dest.path().display().to_string(),
            false,
        );
        let log_path = scratch.path().join("run.log");
        let mut runlog = RunLog::open(&log_path);

        let err = run_with(&args(&config), &mut runlog, &mut Cursor::new(Vec::new()))
            .unwrap_err();

        match err {
            Error::MissingDir(path) => assert!(path.ends_with("gone")),
            other => panic!("unexpected error: {}", other),
        }
        let logged = fs::read_to_string(&log_path).unwrap();
        assert!(logged.contains("ERROR"), "log: {}", logged);
        assert!(logged.contains("gone"), "log: {}", logged);
    }

    #[test]
    fn test_missing_dest_halts_and_logs() {
        let scratch = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        let config = write_config(
            scratch.path(),
            &[&source.path().display().to_string()],
            &scratch.path().join("no-dest").display().to_string(),
            false,
        );
        let log_path = scratch.path().join("run.log");
        let mut runlog = RunLog::open(&log_path);

        let err = run_with(&args(&config), &mut runlog, &mut Cursor::new(Vec::new()))
            .unwrap_err();

        match err {
            Error::MissingDir(path) => assert!(path.ends_with("no-dest")),
            other => panic!("unexpected error: {}", other),
        }
        assert!(fs::read_to_string(&log_path).unwrap().contains("ERROR"));
    }

    #[test]
    fn test_declining_delete_cancels_cleanly() {
        let scratch = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let config = write_config(
            scratch.path(),
            &[&source.path().display().to_string()],
            &dest.path().display().to_string(),
            true,
        );
        let log_path = scratch.path().join("run.log");
        let mut runlog = RunLog::open(&log_path);

        let result = run_with(&args(&config), &mut runlog, &mut Cursor::new(b"no\n".to_vec()));

        assert!(result.is_ok());
        let logged = fs::read_to_string(&log_path).unwrap();
        assert!(logged.contains("cancelled"), "log: {}", logged);
        // Cancelled before any exclusion computation or command assembly.
        assert!(!logged.contains("rsync"), "log: {}", logged);
    }

    #[test]
    fn test_affirmed_delete_builds_the_command() {
        let scratch = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        fs::write(source.path().join(".gitignore"), "*.log\n").unwrap();
        fs::write(source.path().join("a.txt"), "").unwrap();
        fs::write(source.path().join("b.log"), "").unwrap();
        let config = write_config(
            scratch.path(),
            &[&source.path().display().to_string()],
            &dest.path().display().to_string(),
            true,
        );
        let log_path = scratch.path().join("run.log");
        let mut runlog = RunLog::open(&log_path);

        let result = run_with(&args(&config), &mut runlog, &mut Cursor::new(b"yes\n".to_vec()));

        assert!(result.is_ok());
        let logged = fs::read_to_string(&log_path).unwrap();
        assert!(logged.contains("rsync -av --delete --exclude b.log"), "log: {}", logged);
    }

    #[test]
    fn test_dry_run_logs_one_command_per_source() {
        let scratch = TempDir::new().unwrap();
        let source_a = TempDir::new().unwrap();
        let source_b = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let config = write_config(
            scratch.path(),
            &[
                &source_a.path().display().to_string(),
                &source_b.path().display().to_string(),
            ],
            &dest.path().display().to_string(),
            false,
        );
        let log_path = scratch.path().join("run.log");
        let mut runlog = RunLog::open(&log_path);

        let result = run_with(&args(&config), &mut runlog, &mut Cursor::new(Vec::new()));

        assert!(result.is_ok());
        let logged = fs::read_to_string(&log_path).unwrap();
        assert_eq!(logged.matches("INFO: rsync -av").count(), 2, "log: {}", logged);
    }

    #[test]
    fn test_confirmation_requires_the_literal_yes() {
        for answer in &["y\n", "YES\n", "yes please\n", "\n", ""] {
            let mut output = Vec::new();
            assert!(
                !confirmed(&mut Cursor::new(answer.as_bytes().to_vec()), &mut output),
                "answer {:?} should not confirm",
                answer
            );
        }

        let mut output = Vec::new();
        assert!(confirmed(&mut Cursor::new(b"yes\n".to_vec()), &mut output));
        assert!(!output.is_empty());
    }
}
