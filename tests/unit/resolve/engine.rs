use super::*;
use crate::report::model::Report;

const SCENARIO: &str = r#"{
  "VideoInfo": { "Fps": 30 },
  "Analysis": {
    "Steps": [ { "Id": 1, "FrameIndex": 0 }, { "Id": 2, "FrameIndex": 30 } ],
    "Problems": [
      { "IssueName": "HipTurn", "Severity": 2, "Score": 0.5, "StepId": 2, "Guidelines": ["RotateHip"] }
    ]
  },
  "Coordinates": { "Guidelines": {
    "RotateHip": [
      { "StepId": 2, "Guideline": [ { "RenderType": 2, "Points": [ { "X": 0.4, "Y": 0.6 } ], "Value": 15 } ] }
    ]
  } }
}"#;

struct Fixture {
    report: Report,
    catalog: GuidelineCatalog,
    state: ResolutionState,
    defaults: DefaultGuidelineSet,
}

impl Fixture {
    fn new(json: &str) -> Self {
        let report = Report::from_json_str(json).unwrap();
        let catalog = GuidelineCatalog::build(&report);
        Self {
            report,
            catalog,
            state: ResolutionState::new(),
            defaults: DefaultGuidelineSet::idle(),
        }
    }

    fn resolve(&mut self, problem: &str, frame: u64) -> Option<Vec<ResolvedInstance>> {
        let problem = self.report.problem(problem);
        let ctx = ResolveCtx::new(&self.catalog, problem, Fps::new(30.0).unwrap());
        GuidelineResolver::resolve(
            &ctx,
            FrameIndex(frame),
            &mut self.state,
            &mut self.defaults,
        )
    }
}

fn of(out: &[ResolvedInstance], category: Category) -> Vec<&ResolvedInstance> {
    out.iter().filter(|r| r.category == category).collect()
}

#[test]
fn scenario_idle_then_reveal_then_expire_then_sticky() {
    let mut fx = Fixture::new(SCENARIO);

    let out = fx.resolve("HipTurn", 10).unwrap();
    let hip = of(&out, Category::RotateHip);
    assert_eq!(hip.len(), 1);
    assert!(!hip[0].gated);
    assert_eq!(hip[0].displayed_value(), 0.0);

    let out = fx.resolve("HipTurn", 30).unwrap();
    let hip = of(&out, Category::RotateHip);
    assert_eq!(hip.len(), 1);
    assert!(hip[0].gated);
    assert_eq!(hip[0].displayed_value(), 15.0);

    let out = fx.resolve("HipTurn", 40).unwrap();
    assert_eq!(of(&out, Category::RotateHip)[0].displayed_value(), 15.0);

    let out = fx.resolve("HipTurn", 61).unwrap();
    assert!(of(&out, Category::RotateHip).is_empty());

    let out = fx.resolve("HipTurn", 5).unwrap();
    let hip = of(&out, Category::RotateHip);
    assert_eq!(hip.len(), 1);
    assert_eq!(hip[0].displayed_value(), 15.0);
}

#[test]
fn expiry_window_is_inclusive_of_end_plus_fps() {
    let mut fx = Fixture::new(SCENARIO);
    let out = fx.resolve("HipTurn", 60).unwrap();
    assert_eq!(of(&out, Category::RotateHip).len(), 1);
    let out = fx.resolve("HipTurn", 61).unwrap();
    assert!(of(&out, Category::RotateHip).is_empty());
}

#[test]
fn borrowed_category_set_matches_problem_categories() {
    let report = Report::from_json_str(SCENARIO).unwrap();
    let catalog = GuidelineCatalog::build(&report);
    let problem = report.problem("HipTurn");
    let relevant = problem.map(Problem::categories);
    let fps = Fps::new(30.0).unwrap();

    let owned = ResolveCtx::new(&catalog, problem, fps);
    let borrowed = ResolveCtx::with_relevant(&catalog, relevant.as_ref(), fps);
    assert_eq!(owned.relevant(), borrowed.relevant());
    assert!(borrowed.relevant().unwrap().contains(&Category::RotateHip));
    assert!(ResolveCtx::with_relevant(&catalog, None, fps).relevant().is_none());
}

#[test]
fn no_problem_selected_renders_nothing() {
    let mut fx = Fixture::new(SCENARIO);
    assert!(fx.resolve("NotAProblem", 30).is_none());
    assert_eq!(fx.state.iter().count(), 0);
}

#[test]
fn empty_default_set_and_no_candidates_is_none() {
    let mut fx = Fixture::new(SCENARIO);
    fx.defaults = DefaultGuidelineSet::new(vec![]);
    assert!(fx.resolve("HipTurn", 10).is_none());
    assert!(fx.resolve("HipTurn", 30).is_some());
}

#[test]
fn irrelevant_sticky_categories_keep_idle_entries_unmodified() {
    let mut fx = Fixture::new(include_str!("../../data/swing_report.json"));
    let idle = DefaultGuidelineSet::idle();
    // Readouts of these categories expire 30 frames after their last recorded step.
    for frame in [0, 12, 60, 75, 90] {
        let out = fx.resolve("Sway", frame).unwrap();
        for c in [
            Category::HeadPosition,
            Category::RotateShoulder,
            Category::SpineDegree,
            Category::RotateHip,
        ] {
            let got: Vec<_> = of(&out, c).iter().map(|r| r.instance.clone()).collect();
            assert_eq!(got, idle.get(c).unwrap().instances, "frame {frame} {c}");
        }
    }
}

#[test]
fn sticky_category_never_swaps_to_later_record() {
    let mut fx = Fixture::new(include_str!("../../data/swing_report.json"));
    let mut first_value = None;
    for frame in 0..=150u64 {
        let out = fx.resolve("HeadMovement", frame).unwrap();
        let spine = of(&out, Category::Spine);
        if frame < 12 {
            assert!(spine.is_empty(), "frame {frame}");
            continue;
        }
        assert_eq!(spine.len(), 1, "frame {frame}");
        let pts = spine[0].instance.points.clone();
        match &first_value {
            None => first_value = Some(pts),
            Some(first) => assert_eq!(&pts, first, "frame {frame}"),
        }
    }
    assert_eq!(fx.state.gate(Category::Spine), Some(FrameIndex(12)));
}

#[test]
fn forward_seek_reveals_latest_reached_record() {
    let mut fx = Fixture::new(include_str!("../../data/swing_report.json"));
    let out = fx.resolve("HipTurn", 80).unwrap();
    assert_eq!(fx.state.gate(Category::RotateHip), Some(FrameIndex(60)));
    assert_eq!(fx.state.gate(Category::SpineDegree), Some(FrameIndex(75)));
    let shoulder = of(&out, Category::RotateShoulder);
    assert_eq!(shoulder[0].displayed_value(), 42.5);
}

#[test]
fn always_on_categories_ignore_playback_position() {
    let mut fx = Fixture::new(include_str!("../../data/swing_report.json"));
    for frame in [0, 5, 500] {
        let out = fx.resolve("AddressPosture", frame).unwrap();
        assert_eq!(of(&out, Category::AddressBodyShape).len(), 1);
        // The record with an unresolved step is dropped.
        let hip = of(&out, Category::HipVertical);
        assert_eq!(hip.len(), 1);
        assert!(hip[0].gated);
    }
}

#[test]
fn unknown_problem_categories_are_skipped() {
    let mut fx = Fixture::new(include_str!("../../data/swing_report.json"));
    let out = fx.resolve("HipTurn", 50).unwrap();
    assert!(out.iter().all(|r| Category::ALL.contains(&r.category)));
    assert_eq!(of(&out, Category::VZone).len(), 1);
}

#[test]
fn degree_before_gate_reads_zero_even_with_recorded_value() {
    let mut fx = Fixture::new(include_str!("../../data/swing_report.json"));
    let out = fx.resolve("HipTurn", 29).unwrap();
    let spine_degree = of(&out, Category::SpineDegree);
    assert!(!spine_degree[0].gated);
    assert_eq!(spine_degree[0].displayed_value(), 0.0);

    let out = fx.resolve("HipTurn", 30).unwrap();
    assert_eq!(of(&out, Category::SpineDegree)[0].displayed_value(), 8.0);
}

#[test]
fn non_degree_values_pass_through_ungated() {
    let mut fx = Fixture::new(include_str!("../../data/swing_report.json"));
    let out = fx.resolve("HipTurn", 0).unwrap();
    let head = of(&out, Category::HeadPosition);
    assert!(!head[0].gated);
    assert_eq!(head[0].displayed_value(), 22.85);
}
