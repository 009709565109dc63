use anyhow::Result;

use crate::domain::recommendation::model::{Confidence, Recommendation};

/// Static advisory list; no analysis backs these yet.
pub async fn list_recommendations() -> Result<Vec<Recommendation>> {
    Ok(vec![
        Recommendation {
            id: "REC-001".into(),
            kind: "Right-sizing".into(),
            description: "Downsize analytics-worker-pool nodes".into(),
            potential_savings: 15.00,
            potential_carbon_reduction: 40.0,
            confidence: Confidence::High,
        },
        Recommendation {
            id: "REC-002".into(),
            kind: "Time-shifting".into(),
            description: "Schedule batch-job-xyz to 02:00 AM UTC (High Renewables Window)".into(),
            potential_savings: 2.00,
            potential_carbon_reduction: 15.0,
            confidence: Confidence::Medium,
        },
    ])
}
