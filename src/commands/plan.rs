use crate::commands::{FOOTER, PlanArgs};
use crate::config::config::StakingCfg;
use crate::report::csv::write_csv;
use crate::report::table::render_table;
use crate::strategy::progressive::ProgressiveStaker;
use crate::strategy::types::StakingParameters;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// Form labels and the values pre-filled when the user just hits enter.
const FIELDS: [(&str, &str); 4] = [
    ("Montant de départ (€)", "10"),
    ("Montant cible (€)", "1000"),
    ("Cote de départ", "1.20"),
    ("Incrément de cote par palier", "0.05"),
];

fn get_input<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    default: &str,
) -> Result<String> {
    write!(output, "{} [{}]: ", prompt, default)?;
    output.flush()?;
    let mut buffer = String::new();
    input.read_line(&mut buffer).context("reading stdin")?;
    if buffer.trim().is_empty() {
        Ok(default.to_string())
    } else {
        Ok(buffer.trim().to_string())
    }
}

pub fn prompt_values<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<[String; 4]> {
    let mut values: [String; 4] = Default::default();
    for (slot, (label, default)) in values.iter_mut().zip(FIELDS) {
        *slot = get_input(input, output, label, default)?;
    }
    Ok(values)
}

pub fn run<R: BufRead, W: Write>(
    cfg: &StakingCfg,
    args: PlanArgs,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let [start, target, odds, increment] = match args.values {
        Some(values) => values,
        None => prompt_values(input, output)?,
    };

    let params = StakingParameters::parse(&start, &target, &odds, &increment)?;
    let plan = ProgressiveStaker::default().generate(&params)?;
    info!(steps = plan.len(), "Plan computed");

    if args.json {
        serde_json::to_writer_pretty(&mut *output, &plan).context("serializing plan")?;
        writeln!(output)?;
    } else {
        writeln!(output, "{}", render_table(&plan))?;
        writeln!(output, "\n{}", FOOTER)?;
    }

    if let Some(path) = args.csv {
        let path = path.unwrap_or_else(|| PathBuf::from(&cfg.export_path));
        if write_csv(&plan, &path)? {
            writeln!(output, "Plan exporté : {}", path.display())?;
        }
    }
    Ok(())
}
