use crate::analysis::types::MatchReport;

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

pub fn render_match_card(report: &MatchReport) -> String {
    let a = &report.analysis;
    let mut out = vec![
        format!("{} vs {}", report.team_a, report.team_b),
        format!("Score prédit : {}", or_na(&a.predicted_score)),
        String::new(),
        format!("Total Buts     : {}", or_na(&a.total_goals)),
        format!("Total Corners  : {}", or_na(&a.total_corners)),
        format!("Total Cartons  : {}", or_na(&a.total_cards)),
        format!("Total Touches  : {}", or_na(&a.total_throw_ins)),
        String::new(),
        "Résumé de l'Analyse".to_string(),
        or_na(&a.summary).to_string(),
        format!("Niveau de confiance : {}", or_na(&a.confidence)),
    ];

    if !a.banker_bet.trim().is_empty() {
        out.push(String::new());
        out.push("L'Option Sûre de l'IA".to_string());
        out.push(a.banker_bet.clone());
    }

    if !report.sources.is_empty() {
        out.push(String::new());
        out.push("Sources de l'analyse :".to_string());
        for source in &report.sources {
            out.push(format!("  - {} <{}>", source.label(), source.web.uri));
        }
    }

    out.join("\n")
}
