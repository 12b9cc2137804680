pub mod analyze;
pub mod plan;

use anyhow::{Result, bail};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  bet-strategist plan [START TARGET ODDS INCREMENT] [--csv [PATH]] [--json]
  bet-strategist analyze TEAM_A TEAM_B

Missing plan values are asked for interactively. A value right after --csv
that reads as a number is taken as a plan value, not as a path.";

const INTRO: &str = "\
Stratégie de Montante (Tout Miser)
Calculez une stratégie de \"montante\" agressive. À chaque étape, vous misez \
l'intégralité de votre capital sur une cote qui augmente progressivement pour \
atteindre rapidement votre objectif.";

/// Printed under every plan and analysis.
pub const FOOTER: &str = "Veuillez parier de manière responsable. Cet outil est à des fins d'illustration et ne garantit aucun résultat.";

pub fn help_text() -> String {
    format!("{}\n\n{}\n\n{}", INTRO, USAGE, FOOTER)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanArgs {
    /// start, target, start odds, odds increment, as typed
    pub values: Option<[String; 4]>,
    /// `Some(None)` exports to the configured path
    pub csv: Option<Option<PathBuf>>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Plan(PlanArgs),
    Analyze { team_a: String, team_b: String },
    Help,
}

/// Parses the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match name.as_str() {
        "plan" => parse_plan(rest).map(Command::Plan),
        "analyze" | "analyse" => match rest {
            [a, b] => Ok(Command::Analyze {
                team_a: a.clone(),
                team_b: b.clone(),
            }),
            _ => bail!("analyze expects exactly two team names\n\n{}", USAGE),
        },
        "help" | "-h" | "--help" => Ok(Command::Help),
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }
}

fn parse_plan(rest: &[String]) -> Result<PlanArgs> {
    let mut out = PlanArgs::default();
    let mut positional = Vec::new();
    let mut iter = rest.iter().peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => out.json = true,
            "--csv" => {
                // `--csv 10 1000 1.2 0.05` exports to the default path
                let path = iter
                    .next_if(|next| !next.starts_with("--") && next.parse::<f64>().is_err())
                    .map(PathBuf::from);
                out.csv = Some(path);
            }
            // "-0.5" is a value, not a flag
            flag if flag.starts_with("--") => bail!("unknown flag '{}'\n\n{}", flag, USAGE),
            _ => positional.push(arg.clone()),
        }
    }

    match positional.len() {
        0 => {}
        4 => out.values = positional.try_into().ok(),
        n => bail!("plan expects 0 or 4 values, got {}\n\n{}", n, USAGE),
    }
    Ok(out)
}
