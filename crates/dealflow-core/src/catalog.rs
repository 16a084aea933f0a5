//! Read-only catalog of opportunities and the simulated investor panel.
//!
//! The seed data is compiled into the binary as `static` items, so the
//! catalog is initialised before `main` runs, is never mutated, and can be
//! shared by reference without locking.

use crate::domain::{CounterpartProfile, OpportunityRecord, Score, Sector};

/// Immutable view over a set of records and counterpart profiles.
#[derive(Debug)]
pub struct Catalog {
    records: &'static [OpportunityRecord],
    counterparts: &'static [CounterpartProfile],
}

impl Catalog {
    pub const fn new(
        records: &'static [OpportunityRecord],
        counterparts: &'static [CounterpartProfile],
    ) -> Self {
        Self {
            records,
            counterparts,
        }
    }

    /// The built-in catalog every binary starts from.
    pub fn seeded() -> &'static Catalog {
        &SEEDED
    }

    /// Records in catalog order.
    pub fn records(&self) -> &'static [OpportunityRecord] {
        self.records
    }

    pub fn counterparts(&self) -> &'static [CounterpartProfile] {
        self.counterparts
    }

    pub fn get(&self, id: u32) -> Option<&'static OpportunityRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

static SEEDED: Catalog = Catalog::new(&RECORDS, &COUNTERPARTS);

static RECORDS: [OpportunityRecord; 6] = [
    OpportunityRecord {
        id: 1,
        name: "MediSync",
        sector: Sector::HealthTech,
        funding_ask: 2_500_000,
        equity_offered: 12.0,
        market_fit: Score::seeded(87),
        risk_score: Score::seeded(32),
        traction: Score::seeded(74),
        summary: "MediSync is a cloud-based platform that unifies electronic health records across \
                  hospitals, enabling real-time patient data sharing and reducing diagnostic errors \
                  by up to 40%.",
        highlights: &[
            "Signed LOIs with 3 regional hospital networks",
            "15K monthly active users in beta",
            "Patent-pending NLP engine for medical notes",
        ],
        risks: &[
            "Regulatory approval timelines (HIPAA, FDA)",
            "High customer acquisition cost in healthcare",
            "Dependency on hospital IT infrastructure",
        ],
    },
    OpportunityRecord {
        id: 2,
        name: "FinLedger",
        sector: Sector::FinTech,
        funding_ask: 1_800_000,
        equity_offered: 10.0,
        market_fit: Score::seeded(79),
        risk_score: Score::seeded(45),
        traction: Score::seeded(68),
        summary: "FinLedger automates bookkeeping and compliance reporting for SMBs using AI, \
                  reducing accounting overhead by 60% and enabling real-time financial insights.",
        highlights: &[
            "500+ paying SMB customers",
            "Integration with QuickBooks, Xero, Stripe",
            "MRR growing 18% month-over-month",
        ],
        risks: &[
            "Crowded market with established competitors",
            "Thin margins on SMB pricing tier",
            "Need for SOC 2 Type II certification",
        ],
    },
    OpportunityRecord {
        id: 3,
        name: "EduVerse",
        sector: Sector::EdTech,
        funding_ask: 3_000_000,
        equity_offered: 15.0,
        market_fit: Score::seeded(82),
        risk_score: Score::seeded(38),
        traction: Score::seeded(71),
        summary: "EduVerse is an immersive learning platform using spatial computing and AI tutors \
                  to deliver personalized K-12 STEM education in underserved communities.",
        highlights: &[
            "Pilot programs in 12 school districts",
            "90% student engagement rate in trials",
            "Strategic partnership with a major hardware OEM",
        ],
        risks: &[
            "Hardware dependency increases deployment cost",
            "Long sales cycles with public school budgets",
            "Content development is time-intensive",
        ],
    },
    OpportunityRecord {
        id: 4,
        name: "GreenGrid AI",
        sector: Sector::CleanTech,
        funding_ask: 5_000_000,
        equity_offered: 8.0,
        market_fit: Score::seeded(91),
        risk_score: Score::seeded(28),
        traction: Score::seeded(83),
        summary: "GreenGrid AI optimizes energy distribution for renewable microgrids using \
                  predictive AI, helping utilities reduce waste by 35% and cut costs for end \
                  consumers.",
        highlights: &[
            "Live deployment with 2 utility companies",
            "$1.2M ARR with 140% net revenue retention",
            "Team includes former Tesla and Google DeepMind engineers",
        ],
        risks: &[
            "Capital-intensive infrastructure deals",
            "Regulatory variance across states",
            "Long enterprise sales cycles (6-12 months)",
        ],
    },
    OpportunityRecord {
        id: 5,
        name: "CodePilot",
        sector: Sector::AiMl,
        funding_ask: 4_000_000,
        equity_offered: 10.0,
        market_fit: Score::seeded(88),
        risk_score: Score::seeded(35),
        traction: Score::seeded(77),
        summary: "CodePilot provides AI-powered code review and automated refactoring for \
                  enterprise engineering teams, reducing bug rates by 50% and cutting review time \
                  by 70%.",
        highlights: &[
            "Used by 3 Fortune 500 engineering teams",
            "Supports 12 programming languages",
            "SOC 2 Type II certified",
        ],
        risks: &[
            "Competition from GitHub Copilot ecosystem",
            "Enterprise sales require long POC periods",
            "Model accuracy varies across niche frameworks",
        ],
    },
    OpportunityRecord {
        id: 6,
        name: "AgriSense",
        sector: Sector::Saas,
        funding_ask: 1_500_000,
        equity_offered: 14.0,
        market_fit: Score::seeded(76),
        risk_score: Score::seeded(42),
        traction: Score::seeded(62),
        summary: "AgriSense is a SaaS platform for precision agriculture that uses satellite \
                  imagery and IoT sensors to give farmers real-time crop health analytics and \
                  yield predictions.",
        highlights: &[
            "Active on 200+ farms across 3 states",
            "Partnerships with 2 agricultural co-ops",
            "Average 22% yield improvement for users",
        ],
        risks: &[
            "Seasonal revenue patterns",
            "Farmer adoption of technology is slow",
            "IoT sensor hardware margins are thin",
        ],
    },
];

static COUNTERPARTS: [CounterpartProfile; 4] = [
    CounterpartProfile {
        id: "aws",
        name: "AWS AI",
        focus: "Infrastructure cost at scale",
        fit_score: Score::seeded(92),
    },
    CounterpartProfile {
        id: "clickhouse",
        name: "ClickHouse AI",
        focus: "Real-time data pipelines",
        fit_score: Score::seeded(87),
    },
    CounterpartProfile {
        id: "elevenlabs",
        name: "ElevenLabs AI",
        focus: "Voice and natural language interfaces",
        fit_score: Score::seeded(78),
    },
    CounterpartProfile {
        id: "slack",
        name: "Slack AI",
        focus: "Team communication integrations",
        fit_score: Score::seeded(84),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_catalog_shape() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.counterparts().len(), 4);
    }

    #[test]
    fn test_record_ids_are_unique() {
        let ids: HashSet<u32> = Catalog::seeded().records().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), Catalog::seeded().len());
    }

    #[test]
    fn test_every_sector_is_represented() {
        let sectors: HashSet<Sector> = Catalog::seeded()
            .records()
            .iter()
            .map(|r| r.sector)
            .collect();
        assert_eq!(sectors.len(), Sector::ALL.len());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.get(4).map(|r| r.name), Some("GreenGrid AI"));
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_seeded_equity_is_positive() {
        for record in Catalog::seeded().records() {
            assert!(record.equity_offered > 0.0, "{} has no equity", record.name);
            assert!(!record.highlights.is_empty());
            assert!(!record.risks.is_empty());
        }
    }
}
