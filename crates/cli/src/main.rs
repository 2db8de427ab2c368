//! Supactl CLI
//!
//! Copyright 2025 Supactl Contributors
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
mod hooks;
mod logging;
mod session;
#[cfg(test)]
mod test_helpers;
mod utils;

use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use commands::completion;
use commands::gen::{keys, types};
use session::GlobalOptions;
use std::path::PathBuf;
use supactl_codegen::OutputFormat;

const TYPESCRIPT_EXAMPLES: &str = "Examples:
  supactl gen types typescript --local
  supactl gen types typescript --linked
  supactl gen types typescript --project-id abcdefghijklmnopqrst --schema public --schema private
  supactl gen types typescript --db-url 'postgresql://...' --schema public,auth";

/// Supactl CLI - Manage hosted Postgres projects
#[derive(Parser)]
#[command(name = "supactl")]
#[command(about = "Supactl CLI - Manage hosted Postgres projects", long_about = None)]
#[command(version = env!("SUPACTL_VERSION"))]
struct Cli {
    /// Path to a project directory (defaults to the current directory)
    #[arg(long, global = true)]
    workdir: Option<PathBuf>,
    /// Output debug logs to stderr
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run code generation tools
    Gen {
        #[command(subcommand)]
        command: GenCommands,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum GenCommands {
    /// Generate keys for preview branch
    Keys {
        /// Project ref of the Supabase project
        #[arg(long)]
        project_ref: Option<String>,
        /// Output format of key variables
        #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Env)]
        output: OutputFormat,
        /// Override specific variable names
        #[arg(long, value_name = "KEY=NAME", value_delimiter = ',')]
        override_name: Vec<String>,
    },
    /// Generate types from Postgres schema
    Types {
        #[command(subcommand)]
        command: TypesCommands,
    },
}

#[derive(Subcommand)]
enum TypesCommands {
    /// Generate types for TypeScript
    #[command(group(
        ArgGroup::new("target").args(["local", "linked", "project_id", "db_url"])
    ))]
    #[command(after_help = TYPESCRIPT_EXAMPLES)]
    Typescript {
        /// Generate types from the local dev database
        #[arg(long)]
        local: bool,
        /// Generate types from the linked project
        #[arg(long)]
        linked: bool,
        /// Generate types from a project ID
        #[arg(long)]
        project_id: Option<String>,
        /// Generate types from a database url
        #[arg(long)]
        db_url: Option<String>,
        /// Comma separated list of schema to include
        #[arg(long, short = 's', value_delimiter = ',')]
        schema: Vec<String>,
        /// Generate types compatible with PostgREST v9 and below. Only use together with --db-url
        #[arg(long)]
        postgrest_v9_compat: bool,
    },
}

/// Command tree, used for shell completions
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    let global = GlobalOptions {
        workdir: cli.workdir,
        debug: cli.debug,
    };

    let exit_code = match cli.command {
        Commands::Gen { command } => match command {
            GenCommands::Keys {
                project_ref,
                output,
                override_name,
            } => {
                let opts = keys::Options {
                    project_ref,
                    output,
                    override_name,
                };
                keys::run(&global, &opts)
            }
            GenCommands::Types {
                command:
                    TypesCommands::Typescript {
                        local,
                        linked,
                        project_id,
                        db_url,
                        schema,
                        postgrest_v9_compat,
                    },
            } => {
                let opts = types::Options {
                    local,
                    linked,
                    project_id,
                    db_url,
                    schema,
                    postgrest_v9_compat,
                };
                types::run(&global, &opts)
            }
        },
        Commands::Completion { shell } => completion::run(&completion::Options { shell }),
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("supactl").chain(args.iter().copied()))
    }

    fn typescript(args: &[&str]) -> Result<TypesCommands, clap::Error> {
        let mut full = vec!["gen", "types", "typescript"];
        full.extend_from_slice(args);
        match parse(&full)?.command {
            Commands::Gen {
                command: GenCommands::Types { command },
            } => Ok(command),
            _ => panic!("Expected gen types command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_target_flags_are_mutually_exclusive() {
        let flags: [&[&str]; 4] = [
            &["--local"],
            &["--linked"],
            &["--project-id", "abcdefghijklmnopqrst"],
            &["--db-url", "postgresql://localhost/postgres"],
        ];
        for (i, first) in flags.iter().enumerate() {
            for second in flags.iter().skip(i + 1) {
                let mut args = first.to_vec();
                args.extend_from_slice(second);
                let err = match typescript(&args) {
                    Err(err) => err,
                    Ok(_) => panic!("{args:?} should conflict"),
                };
                assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
                let message = err.to_string();
                assert!(message.contains(first[0]), "{message}");
                assert!(message.contains(second[0]), "{message}");
            }
        }
    }

    #[test]
    fn test_single_target_flag_is_selected() {
        match typescript(&["--linked"]).unwrap() {
            TypesCommands::Typescript {
                local,
                linked,
                project_id,
                db_url,
                ..
            } => {
                assert!(!local);
                assert!(linked);
                assert!(project_id.is_none());
                assert!(db_url.is_none());
            }
        }
    }

    #[test]
    fn test_schema_accepts_commas_and_repeats() {
        match typescript(&["--local", "-s", "public,auth", "--schema", "private"]).unwrap() {
            TypesCommands::Typescript { schema, .. } => {
                assert_eq!(schema, vec!["public", "auth", "private"]);
            }
        }
    }

    #[test]
    fn test_empty_db_url_counts_as_supplied() {
        match typescript(&["--db-url", "", "--postgrest-v9-compat"]).unwrap() {
            TypesCommands::Typescript {
                db_url,
                postgrest_v9_compat,
                ..
            } => {
                assert_eq!(db_url.as_deref(), Some(""));
                assert!(postgrest_v9_compat);
            }
        }
    }

    #[test]
    fn test_keys_output_defaults_to_env() {
        match parse(&["gen", "keys"]).unwrap().command {
            Commands::Gen {
                command: GenCommands::Keys { output, .. },
            } => assert_eq!(output, OutputFormat::Env),
            _ => panic!("Expected gen keys command"),
        }
    }

    #[test]
    fn test_keys_output_rejects_unknown_format() {
        let err = match parse(&["gen", "keys", "--output", "xml"]) {
            Err(err) => err,
            Ok(_) => panic!("xml should be rejected"),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_keys_override_names_split_on_commas() {
        match parse(&[
            "gen",
            "keys",
            "-o",
            "yaml",
            "--override-name",
            "api.url=URL,db.password=PW",
        ])
        .unwrap()
        .command
        {
            Commands::Gen {
                command:
                    GenCommands::Keys {
                        output,
                        override_name,
                        ..
                    },
            } => {
                assert_eq!(output, OutputFormat::Yaml);
                assert_eq!(override_name, vec!["api.url=URL", "db.password=PW"]);
            }
            _ => panic!("Expected gen keys command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["gen", "keys", "--workdir", "/tmp", "--debug"]).unwrap();
        assert_eq!(cli.workdir, Some(PathBuf::from("/tmp")));
        assert!(cli.debug);
    }
}
