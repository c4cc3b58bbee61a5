use proptest::prelude::*;

use super::common::*;
use crate::matching::domain::{EmployeeSkillRecord, ProficiencyLevel, SkillKind};
use crate::matching::keys::SkillMap;
use crate::matching::scoring::{MatchScorer, ScoringConfig};

use ProficiencyLevel::*;

fn skills(entries: &[(&str, Option<ProficiencyLevel>, bool)]) -> SkillMap<EmployeeSkillRecord> {
    let mut map = SkillMap::new();
    for (name, level, verified) in entries {
        map.insert(
            name,
            EmployeeSkillRecord {
                skill_name: name.to_string(),
                level: *level,
                verified: *verified,
            },
        );
    }
    map
}

#[test]
fn verified_expert_over_skilled_target_scores_one_point_oh_eight() {
    let scorer = MatchScorer::default();
    let reqs = requirements(vec![required("Python")], Vec::new());
    let prof = profile(0.5, vec![target("Python", Skilled)], Vec::new());

    let scored = scorer.score(
        &employee(1, "Ada Park"),
        &skills(&[("Python", Some(Expert), true)]),
        &reqs,
        &prof,
    );

    let detail = &scored.matched_skills[0];
    approx(detail.match_ratio, 1.0);
    approx(detail.contribution.expect("scored contribution"), 1.08);
    approx(scored.coverage_required, 1.0);
    approx(scored.total_score, 1.08);
}

#[test]
fn missing_required_skill_is_penalized_by_complexity() {
    let scorer = MatchScorer::default();
    let reqs = requirements(vec![required("Python")], Vec::new());
    let prof = profile(0.5, vec![target("Python", Skilled)], Vec::new());

    let scored = scorer.score(&employee(1, "Ada Park"), &skills(&[]), &reqs, &prof);

    approx(scored.total_score, -0.91);
    approx(scored.coverage_required, 0.0);
    let detail = &scored.matched_skills[0];
    assert_eq!(detail.employee_level, None);
    assert_eq!(detail.note.as_deref(), Some("missing"));
    assert_eq!(detail.contribution, None);
}

#[test]
fn penalty_constants_are_tunable() {
    let scorer = MatchScorer::new(ScoringConfig {
        missing_penalty_complexity_factor: 0.6,
        ..ScoringConfig::default()
    });
    let reqs = requirements(vec![required("Python")], Vec::new());
    let prof = profile(0.5, vec![target("Python", Skilled)], Vec::new());

    let scored = scorer.score(&employee(1, "Ada Park"), &skills(&[]), &reqs, &prof);

    approx(scored.total_score, -(0.8 + 0.3) * 0.7);
}

#[test]
fn below_target_earns_partial_credit_without_coverage() {
    let scorer = MatchScorer::default();
    let reqs = requirements(vec![required("Kubernetes")], Vec::new());
    let prof = profile(0.9, vec![target("Kubernetes", Expert)], Vec::new());

    let scored = scorer.score(
        &employee(1, "Ada Park"),
        &skills(&[("Kubernetes", Some(Skilled), false)]),
        &reqs,
        &prof,
    );

    let detail = &scored.matched_skills[0];
    approx(detail.match_ratio, 0.5);
    assert!(!detail.meets_target());
    approx(scored.coverage_required, 0.0);
    approx(scored.total_score, 0.5 * 0.7);
}

#[test]
fn exceeding_target_earns_nothing_extra() {
    let scorer = MatchScorer::default();
    let reqs = requirements(vec![required("SQL")], Vec::new());
    let prof = profile(0.4, vec![target("SQL", Advanced)], Vec::new());

    let at_target = scorer.score(
        &employee(1, "Ada Park"),
        &skills(&[("SQL", Some(Advanced), false)]),
        &reqs,
        &prof,
    );
    let above_target = scorer.score(
        &employee(2, "Ben Cho"),
        &skills(&[("SQL", Some(Expert), false)]),
        &reqs,
        &prof,
    );

    assert_eq!(at_target.total_score, above_target.total_score);
    assert_eq!(
        at_target.matched_skills[0].contribution,
        above_target.matched_skills[0].contribution
    );
}

#[test]
fn missing_preferred_skill_is_neutral() {
    let scorer = MatchScorer::default();
    let prof = profile(0.5, vec![target("Python", Skilled)], Vec::new());
    let evidence = skills(&[("Python", Some(Skilled), false)]);

    let without_preferred = scorer.score(
        &employee(1, "Ada Park"),
        &evidence,
        &requirements(vec![required("Python")], Vec::new()),
        &prof,
    );
    let with_missing_preferred = scorer.score(
        &employee(1, "Ada Park"),
        &evidence,
        &requirements(vec![required("Python")], vec![preferred("Tableau")]),
        &prof,
    );

    assert_eq!(
        without_preferred.total_score,
        with_missing_preferred.total_score
    );
    assert_eq!(with_missing_preferred.matched_skills.len(), 1);
    approx(with_missing_preferred.coverage_preferred, 0.0);
}

#[test]
fn preferred_contribution_uses_multiplier_and_default_target() {
    let scorer = MatchScorer::default();
    let reqs = requirements(Vec::new(), vec![preferred("Tableau")]);
    let prof = profile(0.5, Vec::new(), Vec::new());

    let scored = scorer.score(
        &employee(1, "Ada Park"),
        &skills(&[("Tableau", Some(Awareness), true)]),
        &reqs,
        &prof,
    );

    let detail = &scored.matched_skills[0];
    assert_eq!(detail.kind, SkillKind::Preferred);
    assert_eq!(detail.target_level, Awareness);
    assert!(detail.default_target);
    // 0.33 * (1 * 1 * 0.5) * blend(1.0, 0.6) * (1.0 + 0.05)
    let expected: f64 = 0.33 * 0.5 * 0.8 * 1.05;
    approx(detail.contribution.expect("scored contribution"), (expected * 1e6).round() / 1e6);
    approx(scored.coverage_preferred, 1.0);
    // No required lines: coverage_required stays 0 and the floor applies.
    approx(scored.total_score, ((expected * 0.7) * 1e6).round() / 1e6);
}

#[test]
fn skill_names_match_case_insensitively() {
    let scorer = MatchScorer::default();
    let reqs = requirements(vec![required("  python ")], Vec::new());
    let prof = profile(0.5, vec![target("PYTHON", Advanced)], Vec::new());

    let scored = scorer.score(
        &employee(1, "Ada Park"),
        &skills(&[("Python", Some(Advanced), false)]),
        &reqs,
        &prof,
    );

    let detail = &scored.matched_skills[0];
    assert_eq!(detail.skill, "Python");
    assert_eq!(detail.target_level, Advanced);
    assert!(!detail.default_target);
    approx(scored.coverage_required, 1.0);
}

#[test]
fn skill_listed_on_both_sides_counts_once_as_required() {
    let scorer = MatchScorer::default();
    let reqs = requirements(vec![required("Python")], vec![preferred("python")]);
    let prof = profile(0.5, vec![target("Python", Skilled)], Vec::new());

    let scored = scorer.score(
        &employee(1, "Ada Park"),
        &skills(&[("Python", Some(Skilled), false)]),
        &reqs,
        &prof,
    );

    assert_eq!(scored.matched_skills.len(), 1);
    assert_eq!(scored.matched_skills[0].kind, SkillKind::Required);
    approx(scored.total_score, 1.0);
}

#[test]
fn unrecognized_level_is_no_evidence() {
    let scorer = MatchScorer::default();
    let reqs = requirements(vec![required("Python")], Vec::new());
    let prof = profile(0.0, vec![target("Python", Skilled)], Vec::new());
    let mut evidence = SkillMap::new();
    evidence.insert(
        "Python",
        EmployeeSkillRecord::from_label("Python", Some("ninja"), true),
    );

    let scored = scorer.score(&employee(1, "Ada Park"), &evidence, &reqs, &prof);

    assert_eq!(scored.matched_skills[0].employee_level, None);
    assert!(scored.total_score < 0.0);
}

#[test]
fn coverage_counts_only_skills_met_at_target() {
    let scorer = MatchScorer::default();
    let reqs = requirements(
        vec![required("Python"), required("SQL"), required("Spark"), required("Airflow")],
        Vec::new(),
    );
    let prof = profile(
        0.5,
        vec![
            target("Python", Skilled),
            target("SQL", Advanced),
            target("Spark", Advanced),
            target("Airflow", Skilled),
        ],
        Vec::new(),
    );

    let scored = scorer.score(
        &employee(1, "Ada Park"),
        &skills(&[
            ("Python", Some(Expert), false),
            ("SQL", Some(Advanced), false),
            ("Spark", Some(Skilled), false),
        ]),
        &reqs,
        &prof,
    );

    approx(scored.coverage_required, 0.5);
    assert_eq!(scored.required_coverage_set().len(), 2);
    assert_eq!(
        scored.reasoning,
        "required=0.50, preferred=0.00, complexity=medium (0.50)."
    );
}

#[test]
fn scoring_is_idempotent() {
    let scorer = MatchScorer::default();
    let reqs = requirements(vec![required("Python"), required("SQL")], vec![preferred("Go")]);
    let prof = profile(0.7, vec![target("Python", Advanced)], Vec::new());
    let evidence = skills(&[("Python", Some(Skilled), true), ("Go", Some(Expert), false)]);

    let first = scorer.score(&employee(1, "Ada Park"), &evidence, &reqs, &prof);
    let second = scorer.score(&employee(1, "Ada Park"), &evidence, &reqs, &prof);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
}

const LEVELS: [ProficiencyLevel; 4] = [Awareness, Skilled, Advanced, Expert];

proptest! {
    #[test]
    fn raising_a_present_level_never_lowers_the_total(
        levels in proptest::collection::vec(0usize..4, 3),
        raise_index in 0usize..3,
        targets in proptest::collection::vec(0usize..4, 3),
        verified in any::<bool>(),
        complexity in 0.0f64..=1.0,
    ) {
        let names = ["Python", "SQL", "Spark"];
        let scorer = MatchScorer::default();
        let reqs = requirements(names.iter().map(|name| required(name)).collect(), Vec::new());
        let prof = profile(
            complexity,
            names
                .iter()
                .zip(&targets)
                .map(|(name, level)| target(name, LEVELS[*level]))
                .collect(),
            Vec::new(),
        );

        let build = |levels: &[usize]| {
            let entries: Vec<(&str, Option<ProficiencyLevel>, bool)> = names
                .iter()
                .zip(levels)
                .map(|(name, level)| (*name, Some(LEVELS[*level]), verified))
                .collect();
            skills(&entries)
        };

        let mut raised = levels.clone();
        raised[raise_index] = (raised[raise_index] + 1).min(3);

        let before = scorer.score(&employee(1, "Ada Park"), &build(&levels), &reqs, &prof);
        let after = scorer.score(&employee(1, "Ada Park"), &build(&raised), &reqs, &prof);

        prop_assert!(after.total_score >= before.total_score);
        prop_assert!(after.coverage_required >= before.coverage_required);
        prop_assert!(after.coverage_required <= 1.0);
    }

    #[test]
    fn gaining_a_preferred_skill_never_lowers_the_total(
        level in 0usize..4,
        complexity in 0.0f64..=1.0,
    ) {
        let scorer = MatchScorer::default();
        let reqs = requirements(vec![required("Python")], vec![preferred("Go")]);
        let prof = profile(complexity, Vec::new(), Vec::new());

        let without = scorer.score(&employee(1, "Ada Park"), &skills(&[]), &reqs, &prof);
        let with = scorer.score(
            &employee(1, "Ada Park"),
            &skills(&[("Go", Some(LEVELS[level]), false)]),
            &reqs,
            &prof,
        );

        prop_assert!(with.total_score >= without.total_score);
    }
}
