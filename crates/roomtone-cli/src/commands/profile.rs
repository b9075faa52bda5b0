//! Analysis profile commands.
//!
//! Lists the built-in profiles, shows a resolved profile as TOML, and writes
//! templates for hand editing.

use clap::{Args, Subcommand};
use roomtone_config::{AnalysisProfile, factory_profiles, resolve_profile};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    command: ProfileCommand,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// List built-in profiles
    List,

    /// Print a profile as TOML
    Show {
        /// Profile name or path
        name: String,
    },

    /// Write a profile template to a TOML file
    Init {
        /// Output TOML file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Start from this profile instead of the defaults
        #[arg(long)]
        from: Option<String>,

        /// Name stored in the new profile
        #[arg(long)]
        name: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: ProfileArgs) -> anyhow::Result<()> {
    match args.command {
        ProfileCommand::List => {
            println!("Built-in profiles:");
            for profile in factory_profiles() {
                println!(
                    "  {:<14} target {:.2}s, window {:>5}  {}",
                    profile.name,
                    profile.analysis.target_rt60,
                    profile.analysis.window_size,
                    profile.description.as_deref().unwrap_or("")
                );
            }
        }

        ProfileCommand::Show { name } => {
            let profile = resolve_profile(&name)?;
            print!("{}", profile.to_toml()?);
        }

        ProfileCommand::Init {
            output,
            from,
            name,
            force,
        } => {
            if output.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    output.display()
                );
            }

            let mut profile = match from {
                Some(source) => resolve_profile(&source)?,
                None => AnalysisProfile::default(),
            };
            if let Some(name) = name {
                profile.name = name;
            }
            profile.validate()?;
            profile.save(&output)?;
            println!("Wrote profile '{}' to {}", profile.name, output.display());
        }
    }

    Ok(())
}
