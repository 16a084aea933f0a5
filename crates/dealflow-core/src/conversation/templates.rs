//! Fixed pool of counterpart reply templates.

use rand::Rng;

use crate::domain::OpportunityRecord;
use crate::format::{format_ask, format_percent};

/// One of the five canned founder-representative answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyTemplate {
    UnitEconomics,
    SectorTailwind,
    TeamExperience,
    EquityAllocation,
    Runway,
}

impl ReplyTemplate {
    pub const ALL: [ReplyTemplate; 5] = [
        ReplyTemplate::UnitEconomics,
        ReplyTemplate::SectorTailwind,
        ReplyTemplate::TeamExperience,
        ReplyTemplate::EquityAllocation,
        ReplyTemplate::Runway,
    ];

    /// Uniform pick over [`ReplyTemplate::ALL`].
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReplyTemplate::UnitEconomics => "unit_economics",
            ReplyTemplate::SectorTailwind => "sector_tailwind",
            ReplyTemplate::TeamExperience => "team_experience",
            ReplyTemplate::EquityAllocation => "equity_allocation",
            ReplyTemplate::Runway => "runway",
        }
    }

    /// Interpolate the record into the template.
    ///
    /// Every rendered reply names the record: templates whose body does not
    /// mention it are prefixed with `"{name}: "`.
    pub fn render(&self, record: &OpportunityRecord) -> String {
        let body = match self {
            ReplyTemplate::UnitEconomics => format!(
                "Great question. At {}, we've focused heavily on unit economics. Our current CAC \
                 payback period is under 8 months and improving each quarter.",
                record.name
            ),
            ReplyTemplate::SectorTailwind => format!(
                "We see {} as a massive tailwind. Our competitive moat comes from proprietary \
                 data and deep domain expertise that takes years to replicate.",
                record.sector
            ),
            ReplyTemplate::TeamExperience => "Our team has a combined 40+ years in this space. \
                 The founding team previously built and exited a company in a related vertical, \
                 so we understand the playbook."
                .to_string(),
            ReplyTemplate::EquityAllocation => format!(
                "We're targeting a {} equity allocation at this stage because we believe the \
                 valuation is fair given our traction and the market opportunity ahead.",
                format_percent(record.equity_offered)
            ),
            ReplyTemplate::Runway => format!(
                "Absolutely. We have detailed financial models and projections we can share. Our \
                 burn rate is conservative and the funding ask of {} gives us 18+ months of runway.",
                format_ask(record.funding_ask)
            ),
        };

        if body.contains(record.name) {
            body
        } else {
            format!("{}: {body}", record.name)
        }
    }
}

/// Opening message of every conversation.
pub fn greeting(record: &OpportunityRecord) -> String {
    format!(
        "Hi! I'm the AI representative for {}. I'd be happy to answer any questions you have \
         about our startup, business model, traction, or funding needs. What would you like to \
         know?",
        record.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_every_template_names_every_record() {
        for record in Catalog::seeded().records() {
            for template in ReplyTemplate::ALL {
                let text = template.render(record);
                assert!(
                    text.contains(record.name),
                    "{} reply for {} lacks the name: {text}",
                    template.name(),
                    record.name
                );
            }
        }
    }

    #[test]
    fn test_interpolation() {
        let record = Catalog::seeded().get(1).unwrap();
        assert!(ReplyTemplate::SectorTailwind.render(record).contains("HealthTech"));
        assert!(ReplyTemplate::EquityAllocation.render(record).contains("12% equity"));
        assert!(ReplyTemplate::Runway.render(record).contains("$2.5M"));

        let eduverse = Catalog::seeded().get(3).unwrap();
        assert!(ReplyTemplate::Runway
            .render(eduverse)
            .contains("funding ask of $3M gives"));
        assert!(ReplyTemplate::UnitEconomics
            .render(record)
            .starts_with("Great question. At MediSync"));
        assert!(ReplyTemplate::TeamExperience
            .render(record)
            .starts_with("MediSync: Our team"));
    }

    #[test]
    fn test_greeting_names_record() {
        let record = Catalog::seeded().get(5).unwrap();
        assert!(greeting(record).contains("AI representative for CodePilot"));
    }

    #[test]
    fn test_choose_covers_the_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: HashSet<ReplyTemplate> =
            (0..500).map(|_| ReplyTemplate::choose(&mut rng)).collect();
        assert_eq!(seen.len(), ReplyTemplate::ALL.len());
    }

    #[test]
    fn test_choose_is_reproducible_with_seed() {
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(ReplyTemplate::choose(&mut a), ReplyTemplate::choose(&mut b));
        }
    }
}
