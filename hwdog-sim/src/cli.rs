// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, Scenario};

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "hwdog-sim")]
#[command(about = "Run the hwdog control loop on virtual time")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a kick pattern
    Run {
        /// Idle ticks before a reset fires
        #[arg(short, long, default_value = "3")]
        threshold: u32,

        /// Number of ticks to simulate
        #[arg(short = 'n', long, default_value = "12")]
        ticks: u32,

        /// Ticks (1-based) on which the host kicks, comma separated
        #[arg(short, long, value_delimiter = ',')]
        activity: Vec<u32>,

        /// Kick on every tick
        #[arg(long, conflicts_with = "activity")]
        every_tick: bool,
    },

    /// Replay one of the reference scenarios and check the result
    Scenario {
        #[arg(value_enum)]
        which: Scenario,
    },

    /// Show the configuration compiled into the firmware
    Config,
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            threshold,
            ticks,
            activity,
            every_tick,
        } => commands::run(threshold, ticks, &activity, every_tick),
        Commands::Scenario { which } => commands::scenario(which),
        Commands::Config => commands::show_config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activity_list() {
        let cli = Cli::try_parse_from(["hwdog-sim", "run", "-t", "5", "-a", "2,7,9"]).unwrap();
        match cli.command {
            Commands::Run {
                threshold,
                ticks,
                activity,
                every_tick,
            } => {
                assert_eq!(threshold, 5);
                assert_eq!(ticks, 12);
                assert_eq!(activity, vec![2, 7, 9]);
                assert!(!every_tick);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_scenario() {
        let cli = Cli::try_parse_from(["hwdog-sim", "scenario", "d"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Scenario { which: Scenario::D }
        ));
    }

    #[test]
    fn test_every_tick_conflicts_with_activity() {
        assert!(Cli::try_parse_from(["hwdog-sim", "run", "-a", "1", "--every-tick"]).is_err());
    }
}
