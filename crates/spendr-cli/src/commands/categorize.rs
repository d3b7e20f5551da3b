//! Categorize command - check which category a payee description falls into.

use clap::Args;
use console::style;

use spendr_core::{Categorizer, Category};

use super::config::load_config;

/// Arguments for the categorize command.
#[derive(Args)]
pub struct CategorizeArgs {
    /// Payee description, e.g. "Apollo Pharmacy"
    #[arg(required = true)]
    description: Vec<String>,
}

pub fn run(args: CategorizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let categorizer = Categorizer::new(config.categories);

    let description = args.description.join(" ");

    match categorizer.matching_rule(&description) {
        Some((category, keyword)) => {
            println!("{}", category);
            println!(
                "{} matched keyword {:?}",
                style("ℹ").blue(),
                keyword
            );
        }
        None => {
            println!("{}", Category::Miscellaneous);
            println!("{} no keyword matched", style("ℹ").blue());
        }
    }

    Ok(())
}
