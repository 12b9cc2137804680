use crate::llm::client::GroundingChunk;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Prediction block requested from the model. Every field is free text; a
/// missing field is left empty and rendered as "N/A".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchAnalysis {
    #[serde(deserialize_with = "lenient_text")]
    pub predicted_score: String,
    #[serde(deserialize_with = "lenient_text")]
    pub total_goals: String,
    #[serde(deserialize_with = "lenient_text")]
    pub total_corners: String,
    #[serde(deserialize_with = "lenient_text")]
    pub total_cards: String,
    #[serde(deserialize_with = "lenient_text")]
    pub total_throw_ins: String,
    #[serde(deserialize_with = "lenient_text")]
    pub confidence: String, // "Élevée", "Moyenne", "Faible"
    #[serde(deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient_text")]
    pub banker_bet: String,
}

// models sometimes answer `"totalGoals": 3` instead of a string
fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebSource {
    pub uri: String,
    pub title: String,
}

/// A web citation backing the analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundingSource {
    pub web: WebSource,
}

impl GroundingSource {
    /// Keeps only citations that carry a web descriptor.
    pub fn from_chunks(chunks: Vec<GroundingChunk>) -> Vec<GroundingSource> {
        chunks
            .into_iter()
            .filter_map(|c| c.web)
            .map(|w| GroundingSource {
                web: WebSource {
                    uri: w.uri,
                    title: w.title,
                },
            })
            .collect()
    }

    /// Title, or the host of the uri when the title is blank.
    pub fn label(&self) -> String {
        if !self.web.title.trim().is_empty() {
            return self.web.title.clone();
        }
        Url::parse(&self.web.uri)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.web.uri.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub team_a: String,
    pub team_b: String,
    pub analysis: MatchAnalysis,
    pub sources: Vec<GroundingSource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::WebChunk;

    #[test]
    fn test_analysis_fields_default_and_coerce() {
        let a: MatchAnalysis =
            serde_json::from_str(r#"{"predictedScore": "2-1", "totalGoals": 3, "bankerBet": null}"#)
                .unwrap();
        assert_eq!(a.predicted_score, "2-1");
        assert_eq!(a.total_goals, "3");
        assert_eq!(a.banker_bet, "");
        assert_eq!(a.total_throw_ins, "");
    }

    #[test]
    fn test_sources_filtered_to_web() {
        let chunks = vec![
            GroundingChunk {
                web: Some(WebChunk {
                    uri: "https://www.lequipe.fr/match".into(),
                    title: "".into(),
                }),
            },
            GroundingChunk { web: None },
            GroundingChunk {
                web: Some(WebChunk {
                    uri: "https://sofascore.com".into(),
                    title: "Sofascore".into(),
                }),
            },
        ];
        let sources = GroundingSource::from_chunks(chunks);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].label(), "www.lequipe.fr");
        assert_eq!(sources[1].label(), "Sofascore");
    }

    #[test]
    fn test_label_falls_back_to_raw_uri() {
        let s = GroundingSource {
            web: WebSource {
                uri: "not a url".into(),
                title: " ".into(),
            },
        };
        assert_eq!(s.label(), "not a url");
    }
}
