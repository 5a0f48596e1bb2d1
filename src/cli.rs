use crate::error::Result;
use crate::selector::Selector;
use crate::shell;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "trybox",
    version,
    about = "Lightweight scratch workspaces: fuzzy-pick a try directory or start a new one",
    after_help = "Add to your ~/.zshrc or ~/.bashrc:\n\n  eval \"$(trybox init)\"\n\nThe base path defaults to ~/src/tries; override with TRY_PATH or --path."
)]
pub struct Cli {
    /// Base directory holding the try directories.
    #[arg(long, global = true, env = "TRY_PATH", value_name = "PATH")]
    pub path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the shell function to eval for aliasing.
    Init,
    /// Run the interactive selector and print the resulting shell command.
    Cd {
        /// Seed the search query.
        query: Vec<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let base = cli.path.unwrap_or_else(default_base_path);

    match cli.command {
        Command::Init => {
            print!("{}", shell::init_snippet(&current_exe(), &base));
        }
        Command::Cd { query } => {
            let result = Selector::new(&query.join(" "), &base).run()?;
            if let Some(command) = shell::command_for(&result) {
                print!("{command}");
                io::stdout().flush()?;
            }
        }
    }
    Ok(())
}

pub fn default_base_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("src")
        .join("tries")
}

fn current_exe() -> PathBuf {
    std::env::current_exe().unwrap_or_else(|_| PathBuf::from("trybox"))
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, default_base_path};
    use clap::Parser;

    #[test]
    fn cd_collects_query_words() {
        let cli = Cli::try_parse_from(["trybox", "cd", "cool", "idea"]).expect("parse");
        match cli.command {
            Command::Cd { query } => assert_eq!(query, vec!["cool", "idea"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn path_flag_overrides_the_default() {
        let cli = Cli::try_parse_from(["trybox", "cd", "--path", "/elsewhere"]).expect("parse");
        assert_eq!(cli.path.as_deref(), Some(std::path::Path::new("/elsewhere")));
    }

    #[test]
    fn default_base_lives_under_src_tries() {
        let base = default_base_path();
        assert!(base.ends_with("src/tries"));
    }
}
