// File: ./src/cli.rs
//! Command-line arguments and help text for the `grumblebug` binary.
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub export: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments, program name excluded.
    pub fn parse<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" | "help" => out.help = true,
                "export" => out.export = true,
                "-r" | "--root" => {
                    let value = args.next().ok_or("--root needs a path")?;
                    out.root = Some(PathBuf::from(value));
                }
                "-f" | "--file" => {
                    let value = args.next().ok_or("--file needs a path")?;
                    out.file = Some(PathBuf::from(value));
                }
                other => return Err(format!("Unknown argument: {}", other)),
            }
        }
        Ok(out)
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Grumblebug v{} - a grumpy task tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--file <path>]", binary_name);
    println!("    {} export [--root <path>] [--file <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -f, --file <path>     Use this task file instead of the configured one.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXPORT COMMAND:");
    println!(
        "    {} export                 Print the stored tasks as JSON",
        binary_name
    );
    println!();
    println!("COMMANDS (inside the session):");
    println!("    list | todo DESC | deadline NAME yyyy-MM-dd | event NAME START END");
    println!("    mark N | unmark N | delete N | find KEYWORD | save | help | bye");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = CliArgs::parse(["export", "--root", "/tmp/gb", "-f", "x.txt"]).unwrap();
        assert!(args.export);
        assert!(!args.help);
        assert_eq!(args.root, Some(PathBuf::from("/tmp/gb")));
        assert_eq!(args.file, Some(PathBuf::from("x.txt")));

        assert_eq!(CliArgs::parse(Vec::<String>::new()).unwrap(), CliArgs::default());
        assert!(CliArgs::parse(["-h"]).unwrap().help);
    }

    #[test]
    fn rejects_bad_flags() {
        assert!(CliArgs::parse(["--root"]).is_err());
        assert!(CliArgs::parse(["--colour"]).is_err());
    }
}
