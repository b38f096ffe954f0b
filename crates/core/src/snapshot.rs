//! An in-memory copy of the document store.
//!
//! A snapshot is one JSON object keyed by collection name, each collection
//! mapping document ids to documents:
//!
//! ```json
//! {
//!   "roofing_options": { "good": { "type": "good", "pricePerSquare": 625 } },
//!   "loan_options": { "l1": { "name": "10 Year", "rate": 5.99, "years": 10 } },
//!   "proposals": {}
//! }
//! ```

use std::collections::BTreeMap;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::records::{Document, LoanRecord, ProposalRecord, TierRecord};
use crate::source::QuoteSource;
use crate::types::ProposalId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    #[serde(default)]
    pub roofing_options: BTreeMap<String, TierRecord>,
    #[serde(default)]
    pub loan_options: BTreeMap<String, LoanRecord>,
    #[serde(default)]
    pub proposals: BTreeMap<String, ProposalRecord>,
}

impl DocumentSnapshot {
    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a snapshot object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_tier(mut self, id: impl Into<String>, record: TierRecord) -> Self {
        self.roofing_options.insert(id.into(), record);
        self
    }

    #[must_use]
    pub fn with_loan(mut self, id: impl Into<String>, record: LoanRecord) -> Self {
        self.loan_options.insert(id.into(), record);
        self
    }

    #[must_use]
    pub fn with_proposal(mut self, id: impl Into<String>, record: ProposalRecord) -> Self {
        self.proposals.insert(id.into(), record);
        self
    }

    /// Ids of every stored proposal.
    pub fn proposal_ids(&self) -> impl Iterator<Item = ProposalId> + '_ {
        self.proposals.keys().map(|id| ProposalId::new(id.as_str()))
    }

    fn documents<T: Clone>(collection: &BTreeMap<String, T>) -> Vec<Document<T>> {
        collection
            .iter()
            .map(|(id, record)| Document::new(id.clone(), record.clone()))
            .collect()
    }
}

impl QuoteSource for DocumentSnapshot {
    type Error = Infallible;

    async fn tier_documents(&self) -> Result<Vec<Document<TierRecord>>, Self::Error> {
        Ok(Self::documents(&self.roofing_options))
    }

    async fn loan_documents(&self) -> Result<Vec<Document<LoanRecord>>, Self::Error> {
        Ok(Self::documents(&self.loan_options))
    }

    async fn proposal_document(
        &self,
        id: &ProposalId,
    ) -> Result<Option<Document<ProposalRecord>>, Self::Error> {
        Ok(self
            .proposals
            .get(id.as_str())
            .map(|record| Document::new(id.as_str(), record.clone())))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::source::{QuoteError, load_config, quote_proposal};
    use crate::types::TierKind;

    const SNAPSHOT: &str = r#"{
        "roofing_options": {
            "good": { "type": "good", "title": "Standard Quality", "pricePerSquare": 625, "pricePerSquareUnder16": 725 },
            "better": { "type": "better", "pricePerSquare": 770 },
            "best": { "type": "best", "pricePerSquare": 850, "pricePerSqaure": 1 }
        },
        "loan_options": {
            "ten": { "name": "10 Year Fixed", "rate": 5.99, "years": 10 }
        },
        "proposals": {
            "p1": {
                "customerName": "Jordan Ellis",
                "address": "14 Harbor View Rd",
                "squares": 10,
                "createdBy": "rep@example.com",
                "createdAt": "2025-06-02T15:00:00Z"
            }
        }
    }"#;

    #[tokio::test]
    async fn test_quote_from_snapshot() {
        let snapshot = DocumentSnapshot::from_json(SNAPSHOT).unwrap();
        let quoted = quote_proposal(&snapshot, &ProposalId::new("p1")).await.unwrap();

        assert_eq!(quoted.proposal.customer_name, "Jordan Ellis");
        let good = quoted.quote.priced(TierKind::Good).unwrap();
        assert_eq!(good.resolution.total_price, 7_250.0);
        assert_eq!(quoted.integrity.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_proposal() {
        let snapshot = DocumentSnapshot::from_json(SNAPSHOT).unwrap();
        let err = quote_proposal(&snapshot, &ProposalId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::NotFound(id) if id.as_str() == "nope"));
    }

    #[tokio::test]
    async fn test_load_config_from_empty_snapshot() {
        let (config, report) = load_config(&DocumentSnapshot::default()).await.unwrap();
        assert!(config.tiers.is_empty());
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_builder_and_ids() {
        let snapshot = DocumentSnapshot::default()
            .with_tier("good", TierRecord::default())
            .with_loan("l1", LoanRecord::default())
            .with_proposal("p2", ProposalRecord::default())
            .with_proposal("p1", ProposalRecord::default());

        let ids: Vec<String> = snapshot.proposal_ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["p1", "p2"]);
        assert_eq!(snapshot.roofing_options.len(), 1);
    }
}
