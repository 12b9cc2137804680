use crate::analysis::MatchAnalyzer;
use crate::commands::FOOTER;
use crate::report::match_card::render_match_card;
use anyhow::Result;
use std::io::Write;

pub const MISSING_TEAMS: &str = "Veuillez entrer les noms des deux équipes.";

pub async fn run<W: Write>(
    analyzer: &MatchAnalyzer,
    team_a: &str,
    team_b: &str,
    output: &mut W,
) -> Result<()> {
    let (team_a, team_b) = (team_a.trim(), team_b.trim());
    anyhow::ensure!(!team_a.is_empty() && !team_b.is_empty(), MISSING_TEAMS);

    let report = analyzer.analyze(team_a, team_b).await?;
    writeln!(output, "{}", render_match_card(&report))?;
    writeln!(output, "\n{}", FOOTER)?;
    Ok(())
}
