//! Integration tests for the investor workflow.

use dealflow_core::{
    acceptance_probability, format_currency, AcceptanceLabel, Catalog, DealflowError,
    EngineConfig, Intent, Sector, Stage, StageView, WorkflowMachine,
};

fn machine() -> WorkflowMachine {
    WorkflowMachine::new(Catalog::seeded(), EngineConfig::default().with_rng_seed(11))
}

fn walk(m: &mut WorkflowMachine, intents: Vec<Intent>) -> Vec<Stage> {
    intents
        .into_iter()
        .map(|intent| m.apply(intent).map(|t| t.to).unwrap())
        .collect()
}

// ── Stage transitions ──

#[test]
fn forward_path_visits_every_stage_in_order() {
    let mut m = machine();
    let stages = walk(
        &mut m,
        vec![
            Intent::Proceed,
            Intent::Select(1),
            Intent::StartConversation,
        ],
    );
    assert_eq!(
        stages,
        vec![Stage::Discovery, Stage::Detail, Stage::Conversation]
    );
}

#[test]
fn back_walks_one_stage_at_a_time() {
    let mut m = machine();
    walk(
        &mut m,
        vec![Intent::Proceed, Intent::Select(3), Intent::StartConversation],
    );
    let stages = walk(&mut m, vec![Intent::Back, Intent::Back, Intent::Back]);
    assert_eq!(
        stages,
        vec![Stage::Detail, Stage::Discovery, Stage::Profiling]
    );
    assert!(m.apply(Intent::Back).is_err());
}

#[test]
fn stage_never_skips() {
    let mut m = machine();
    let script = vec![
        Intent::AdjustInvestment(1_000_000),
        Intent::Proceed,
        Intent::SetQuery("ai".into()),
        Intent::Select(4),
        Intent::AdjustDeal {
            investment: 3_000_000,
            equity_percent: 12.5,
        },
        Intent::StartConversation,
        Intent::Submit("Tell me about the grid contracts".into()),
        Intent::Back,
        Intent::Back,
        Intent::Proceed,
        Intent::Back,
        Intent::StartConversation,
    ];
    for intent in script {
        let before = m.stage();
        match m.apply(intent) {
            Ok(t) => assert!(before.is_adjacent(t.to), "{before} -> {}", t.to),
            Err(_) => assert_eq!(m.stage(), before),
        }
    }
}

#[test]
fn backing_out_to_profiling_keeps_everything() {
    let mut m = machine();
    walk(
        &mut m,
        vec![
            Intent::ToggleTag(Sector::FinTech),
            Intent::Proceed,
            Intent::SetQuery("fin".into()),
            Intent::Select(2),
        ],
    );
    let stages = walk(&mut m, vec![Intent::Back, Intent::Back]);
    assert_eq!(stages, vec![Stage::Discovery, Stage::Profiling]);
    assert_eq!(m.preference().selected_tags(), &[Sector::FinTech]);
    assert_eq!(m.query(), "fin");
    assert_eq!(m.selected().map(|r| r.name), Some("FinLedger"));
}

#[test]
fn wrong_stage_intents_are_rejected() {
    let mut m = machine();
    let err = m.apply(Intent::StartConversation).unwrap_err();
    assert!(matches!(
        err,
        DealflowError::InvalidTransition {
            stage: Stage::Profiling,
            ..
        }
    ));

    m.apply(Intent::Proceed).unwrap();
    assert!(m.apply(Intent::AdjustInvestment(1_000_000)).is_err());
    assert!(m.apply(Intent::Proceed).is_err());
    assert_eq!(m.stage(), Stage::Discovery);
}

// ── Discovery ──

#[test]
fn discovery_view_reflects_tags_and_query() {
    let mut m = machine();
    walk(
        &mut m,
        vec![
            Intent::ToggleTag(Sector::AiMl),
            Intent::ToggleTag(Sector::CleanTech),
            Intent::Proceed,
            Intent::SetQuery("pilot".into()),
        ],
    );
    match m.view() {
        StageView::Discovery { records, query, .. } => {
            assert_eq!(query, "pilot");
            let names: Vec<&str> = records.iter().map(|r| r.name).collect();
            assert_eq!(names, vec!["CodePilot"]);
        }
        other => panic!("unexpected view {:?}", other.stage()),
    }
}

#[test]
fn empty_search_still_allows_profiling_round_trip() {
    let mut m = machine();
    walk(
        &mut m,
        vec![Intent::Proceed, Intent::SetQuery("zzz".into())],
    );
    assert!(m.visible_records().is_empty());
    assert!(matches!(
        m.apply(Intent::Select(1)),
        Err(DealflowError::UnknownRecord(1))
    ));
    assert_eq!(m.apply(Intent::Back).unwrap().to, Stage::Profiling);
}

// ── Scoring through the detail stage ──

#[test]
fn reference_deal_scores_very_likely() {
    let mut m = machine();
    walk(
        &mut m,
        vec![
            Intent::Proceed,
            Intent::Select(1),
            Intent::AdjustDeal {
                investment: 2_000_000,
                equity_percent: 10.0,
            },
        ],
    );
    let detail = m.detail().unwrap();
    assert_eq!(detail.assessment.post_money, 20_000_000);
    assert_eq!(detail.assessment.pre_money, 18_000_000);
    assert_eq!(detail.assessment.probability, 90);
    assert_eq!(detail.assessment.label, AcceptanceLabel::VeryLikely);
    assert_eq!(format_currency(detail.assessment.pre_money), "$18.0M");
    assert_eq!(acceptance_probability(2_000_000, 10.0).unwrap(), 90);
}

#[test]
fn detail_view_serializes_with_stage_tag() {
    let mut m = machine();
    walk(&mut m, vec![Intent::Proceed, Intent::Select(6)]);
    let json = serde_json::to_value(m.view()).unwrap();
    assert_eq!(json["stage"], "detail");
    assert_eq!(json["record"]["name"], "AgriSense");
    assert_eq!(json["assessment"]["investment"], 1_500_000);
}
