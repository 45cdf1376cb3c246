use anyhow::{Context, Result};
use grumblebug::cli::{self, CliArgs};
use grumblebug::config::Config;
use grumblebug::context::{AppContext, StandardContext};
use grumblebug::logging::init_logging;
use grumblebug::model::Task;
use grumblebug::storage::LocalStorage;
use grumblebug::Session;
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    let args = match CliArgs::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            cli::print_help("grumblebug");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help("grumblebug");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());
    let config = Config::load_or_default(&ctx)?;
    let task_path = match &args.file {
        Some(file) => file.clone(),
        None => config.task_file_path(&ctx)?,
    };

    // CLI Command: grumblebug export
    if args.export {
        let outcome = LocalStorage::load(&task_path)
            .with_context(|| format!("Failed to read {}", task_path.display()))?;
        let tasks: Vec<&Task> = outcome.tasks.iter().collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    init_logging(config.log_level_filter(), &ctx.get_log_path()?)?;

    // Skipped records are already reported through the logger (stderr + file).
    let (session, _warnings) = Session::open(&task_path)
        .with_context(|| format!("Failed to load tasks from {}", task_path.display()))?;
    let mut session = session.with_save_on_exit(config.save_on_exit);

    println!("Grumblebug here. What do you want now?");

    run_loop(&mut session)
}

fn run_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let reply = session.handle(line.trim_end_matches('\r'));
        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;
        if session.is_exit_requested() {
            break;
        }
    }
    Ok(())
}
