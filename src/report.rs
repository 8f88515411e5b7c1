//! Human-readable report formatting.
//!
//! The reporting collaborator consumes a [`ScoringResult`] verbatim and
//! renders it for a human reviewer: the fake probability as a percentage,
//! the risk tier uppercased, and the explanation as a bullet list. Delivery
//! (mail, HTTP) is out of scope; formatting is the contract.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::profile::ScoringResult;
use crate::risk::RiskLevel;

/// A formatted detection report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// `RPT-YYYYMMDD-nnnn`.
    pub report_id: String,
    pub platform: String,
    pub username: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub explanation: Vec<String>,
    /// Ledger transaction hash, when the profile was recorded.
    pub tx_hash: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Build a report from one scoring result.
    pub fn new(
        platform: &str,
        username: &str,
        result: &ScoringResult,
        tx_hash: Option<String>,
    ) -> Self {
        let generated_at = Utc::now();
        let report_id = format!(
            "RPT-{}-{:04}",
            generated_at.format("%Y%m%d"),
            rand::rng().random_range(1000..10000)
        );

        Report {
            report_id,
            platform: platform.to_string(),
            username: username.to_string(),
            risk_score: result.fake_probability,
            risk_level: result.risk_level,
            confidence: result.confidence,
            explanation: result.explanation.clone(),
            tx_hash,
            generated_at,
        }
    }

    /// Priority mirrors the risk tier.
    pub fn priority(&self) -> RiskLevel {
        self.risk_level
    }

    /// Render the report as plain text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("FAKE ACCOUNT DETECTION REPORT\n");
        out.push_str("=============================\n\n");
        out.push_str(&format!("Report ID:  {}\n", self.report_id));
        out.push_str(&format!("Priority:   {}\n\n", self.priority().as_str().to_uppercase()));

        out.push_str("Account\n");
        out.push_str(&format!("  Platform:  {}\n", self.platform));
        out.push_str(&format!("  Username:  @{}\n\n", self.username));

        out.push_str("Analysis\n");
        out.push_str(&format!("  Risk score:  {:.2}%\n", self.risk_score * 100.0));
        out.push_str(&format!(
            "  Risk level:  {}\n",
            self.risk_level.as_str().to_uppercase()
        ));
        out.push_str(&format!("  Confidence:  {:.2}%\n\n", self.confidence * 100.0));

        out.push_str("Evidence\n");
        if self.explanation.is_empty() {
            out.push_str("  No risk indicators triggered\n");
        } else {
            for reason in &self.explanation {
                out.push_str(&format!("  - {reason}\n"));
            }
        }
        out.push('\n');

        out.push_str("Recommended actions\n");
        out.push_str("  - Verify account manually\n");
        out.push_str("  - Contact platform for suspension\n");
        out.push_str("  - Monitor for similar patterns\n\n");

        out.push_str(&format!(
            "Ledger record: {}\n",
            self.tx_hash.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&format!(
            "Generated at:  {}\n",
            self.generated_at.to_rfc3339()
        ));
        out
    }
}
