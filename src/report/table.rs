use crate::report::format::{euros, two_decimals};
use crate::strategy::types::StakingPlan;

const COLUMNS: [&str; 6] = [
    "Palier",
    "Capital",
    "Mise (100%)",
    "Cote",
    "Gain Potentiel",
    "Nouveau Capital",
];

pub const RISK_WARNING: &str = "Attention : Cette stratégie est extrêmement risquée. La perte d'un seul pari entraîne la perte de l'intégralité du capital.";

/// Renders the plan as a fixed-width text table, rounding at display time only.
pub fn render_table(plan: &StakingPlan) -> String {
    let rows: Vec<[String; 6]> = plan
        .iter()
        .map(|s| {
            [
                s.index.to_string(),
                euros(s.bankroll_before),
                euros(s.stake),
                two_decimals(s.odds),
                euros(s.potential_win),
                euros(s.bankroll_after),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut out = Vec::with_capacity(rows.len() + 7);
    out.push(format!("Votre Plan de Montante en {} Étapes", plan.len()));
    out.push(String::new());
    out.push(line(&header[..]));
    out.push(separator);
    for row in &rows {
        out.push(line(row.as_slice()));
    }
    out.push(String::new());
    out.push(format!("Cote combinée : {}", two_decimals(plan.total_odds())));
    out.push(RISK_WARNING.to_string());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::progressive::ProgressiveStaker;
    use crate::strategy::types::StakingParameters;

    #[test]
    fn test_table_contents() {
        let p = StakingParameters::new(10.0, 1000.0, 1.20, 0.05).unwrap();
        let plan = ProgressiveStaker::default().generate(&p).unwrap();
        let table = render_table(&plan);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Votre Plan de Montante en 13 Étapes");
        assert!(lines[2].contains("Mise (100%)"));
        assert!(lines[4].contains("10.00 €"));
        assert!(lines[4].contains("1.20"));
        assert!(lines[4].contains("12.00 €"));
        assert!(table.contains("1756.51 €"));
        assert!(table.ends_with(RISK_WARNING));

        // every data row has the same visible width
        let width = lines[2].chars().count();
        for row in &lines[3..3 + 1 + plan.len()] {
            assert_eq!(row.chars().count(), width);
        }
    }
}
