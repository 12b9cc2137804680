use crate::analysis::extract::json_region;
use crate::analysis::types::{GroundingSource, MatchAnalysis, MatchReport};
use crate::llm::client::GenerativeClient;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Every variant displays the same kind of retry-later message; details stay
/// in the source chain and the logs.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Réponse invalide de l'IA ne contenant pas de JSON.")]
    NoJsonFound,

    #[error("L'IA a retourné une réponse malformée. Veuillez réessayer.")]
    MalformedJson(#[source] serde_json::Error),

    #[error("L'analyse du match a échoué. Veuillez réessayer.")]
    RequestFailed(#[source] anyhow::Error),
}

impl AnalysisError {
    fn label(&self) -> &'static str {
        match self {
            AnalysisError::NoJsonFound => "no_json_found",
            AnalysisError::MalformedJson(_) => "malformed_json",
            AnalysisError::RequestFailed(_) => "request_failed",
        }
    }
}

pub fn build_prompt(team_a: &str, team_b: &str) -> String {
    format!(
        r#"
En tant qu'expert analyste de paris sportifs, analyse en profondeur le prochain match entre {team_a} et {team_b}.
Utilise tes connaissances et les informations du web pour fournir une analyse complète.
Base-toi sur les statistiques récentes des équipes, leur forme actuelle, les confrontations directes, les joueurs clés, et les tactiques probables.
Ne mentionne pas que tu es une IA. Agis comme si tu avais accès à des bases de données comme Sofascore.

Fournis des prédictions pour les statistiques suivantes :
1. Score exact
2. Total de buts (ex: Plus de 2.5)
3. Total de corners (ex: Moins de 10.5)
4. Total de cartons (ex: Plus de 3.5)
5. Total de touches (ex: Entre 35 et 45)

Identifie également l'option de pari la plus sûre (le "banker bet") pour ce match, avec une brève justification (ex: "Victoire de {team_a} - Ils sont invaincus à domicile en 10 matchs.").

Termine ta réponse en incluant un bloc de code JSON contenant les prédictions. Le bloc JSON doit être clairement délimité et avoir la structure suivante, sans texte supplémentaire à l'intérieur du bloc :
{{
  "predictedScore": "string",
  "totalGoals": "string",
  "totalCorners": "string",
  "totalCards": "string",
  "totalThrowIns": "string",
  "confidence": "string (Élevée, Moyenne, ou Faible)",
  "summary": "Un bref résumé de l'analyse en 2-3 phrases expliquant le raisonnement.",
  "bankerBet": "L'option de pari la plus sûre avec sa justification."
}}
"#
    )
}

/// Pulls the prediction block out of free text.
pub fn parse_analysis(text: &str) -> Result<MatchAnalysis, AnalysisError> {
    // prose before and after the block is dropped
    let region = json_region(text).ok_or(AnalysisError::NoJsonFound)?;
    serde_json::from_str(region).map_err(AnalysisError::MalformedJson)
}

pub struct MatchAnalyzer {
    client: Arc<dyn GenerativeClient>,
}

impl MatchAnalyzer {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self { client }
    }

    /// One outbound call per invocation. Calling again is a fresh request.
    #[tracing::instrument(skip(self))]
    pub async fn analyze(&self, team_a: &str, team_b: &str) -> Result<MatchReport, AnalysisError> {
        let result = self.run(team_a, team_b).await;

        match &result {
            Ok(report) => {
                info!(
                    model = self.client.model(),
                    sources = report.sources.len(),
                    "Match analysis complete"
                );
                metrics::counter!("match_analyses_total", "outcome" => "ok").increment(1);
            }
            Err(e) => {
                metrics::counter!("match_analyses_total", "outcome" => e.label()).increment(1);
            }
        }
        result
    }

    async fn run(&self, team_a: &str, team_b: &str) -> Result<MatchReport, AnalysisError> {
        let prompt = build_prompt(team_a, team_b);

        // single attempt
        let generation = self.client.generate(&prompt).await.map_err(|e| {
            error!("LLM call failed: {:?}", e);
            AnalysisError::RequestFailed(e)
        })?;

        let analysis = parse_analysis(&generation.text).inspect_err(|e| match e {
            // raw reply goes to the log only
            AnalysisError::NoJsonFound => {
                warn!("Invalid response from LLM, no JSON found: {}", generation.text)
            }
            other => warn!("Failed to parse LLM JSON: {:?}", other),
        })?;

        Ok(MatchReport {
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            analysis,
            // web citations with a uri only
            sources: GroundingSource::from_chunks(generation.grounding_chunks),
        })
    }
}
