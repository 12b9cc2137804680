use crate::report::format::two_decimals;
use crate::strategy::types::StakingPlan;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub const EXPORT_FILE_NAME: &str = "strategie-montante.csv";

const BOM: char = '\u{FEFF}';

const HEADERS: [&str; 6] = [
    "Palier",
    "Capital (€)",
    "Mise (€)",
    "Cote",
    "Gain Potentiel (€)",
    "Nouveau Capital (€)",
];

/// Builds the export document, or `None` for an empty plan.
pub fn render_csv(plan: &StakingPlan) -> Option<String> {
    if plan.is_empty() {
        return None;
    }

    let mut rows = Vec::with_capacity(plan.len() + 1);
    rows.push(HEADERS.join(","));
    for step in plan {
        rows.push(
            [
                step.index.to_string(),
                two_decimals(step.bankroll_before),
                two_decimals(step.stake),
                two_decimals(step.odds),
                two_decimals(step.potential_win),
                two_decimals(step.bankroll_after),
            ]
            .join(","),
        );
    }

    Some(format!("{}{}", BOM, rows.join("\n")))
}

/// Writes the export to `path`. Returns `false` when there was nothing to write.
pub fn write_csv(plan: &StakingPlan, path: &Path) -> Result<bool> {
    let Some(doc) = render_csv(plan) else {
        return Ok(false);
    };
    std::fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
    info!("Plan exported to {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::progressive::ProgressiveStaker;
    use crate::strategy::types::StakingParameters;

    fn plan() -> StakingPlan {
        let p = StakingParameters::new(10.0, 100.0, 2.0, 0.5).unwrap();
        ProgressiveStaker::default().generate(&p).unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let doc = render_csv(&plan()).unwrap();
        assert!(doc.starts_with('\u{FEFF}'));

        let lines: Vec<&str> = doc.trim_start_matches('\u{FEFF}').split('\n').collect();
        assert_eq!(
            lines[0],
            "Palier,Capital (€),Mise (€),Cote,Gain Potentiel (€),Nouveau Capital (€)"
        );
        // 10 x2 = 20, x2.5 = 50, x3 = 150
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "1,10.00,10.00,2.00,20.00,20.00");
        assert_eq!(lines[2], "2,20.00,20.00,2.50,50.00,50.00");
        assert_eq!(lines[3], "3,50.00,50.00,3.00,150.00,150.00");
        assert!(!doc.ends_with('\n'));
    }

    #[test]
    fn test_overflowed_plan_has_no_raw_floats() {
        let p = StakingParameters::new(1e300, 1.7e308, 1000.0, 0.0).unwrap();
        let plan = ProgressiveStaker::default().generate(&p).unwrap();
        let doc = render_csv(&plan).unwrap();

        let lines: Vec<&str> = doc.split('\n').collect();
        assert!(lines[1].starts_with("1,1e+300,1e+300,1000.00,"));
        assert!(lines[3].ends_with(",Infinity,Infinity"));
        assert!(!doc.contains("inf,") && !doc.ends_with("inf"));
        assert!(lines.iter().all(|l| l.len() < 120));
    }

    #[test]
    fn test_empty_plan_has_no_export() {
        assert!(render_csv(&StakingPlan::from_steps(Vec::new())).is_none());
    }

    #[test]
    fn test_write_csv_to_disk() {
        let path = std::env::temp_dir().join(format!("bet-strategist-{}.csv", std::process::id()));
        assert!(write_csv(&plan(), &path).unwrap());

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        std::fs::remove_file(&path).unwrap();
    }
}
