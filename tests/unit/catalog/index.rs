use super::*;

fn fixture() -> Report {
    Report::from_json_str(include_str!("../../data/swing_report.json")).unwrap()
}

#[test]
fn step_references_resolve_to_frames() {
    let catalog = GuidelineCatalog::build(&fixture());
    let frames: Vec<_> = catalog
        .records_in_step_order(Category::RotateHip)
        .iter()
        .map(|r| r.frame)
        .collect();
    assert_eq!(frames, vec![Some(FrameIndex(12)), Some(FrameIndex(60))]);
}

#[test]
fn unresolved_step_reference_keeps_record_with_no_frame() {
    let catalog = GuidelineCatalog::build(&fixture());
    let recs = catalog.records_in_step_order(Category::HipVertical);
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].step_id, Some(StepId(9)));
    assert_eq!(recs[0].frame, None);
    assert_eq!(recs[1].frame, Some(FrameIndex(12)));
}

#[test]
fn unknown_categories_are_not_indexed() {
    let catalog = GuidelineCatalog::build(&fixture());
    assert_eq!(catalog.categories().count(), 9);
    assert!(catalog.categories().all(|c| Category::ALL.contains(&c)));
}

#[test]
fn stane_group_indexes_as_stance() {
    let catalog = GuidelineCatalog::build(&fixture());
    assert_eq!(catalog.records_in_step_order(Category::Stance).len(), 1);
}

#[test]
fn end_frame_is_last_recorded_step() {
    let catalog = GuidelineCatalog::build(&fixture());
    assert_eq!(catalog.end_frame(Category::RotateHip), Some(FrameIndex(60)));
    assert_eq!(
        catalog.end_frame(Category::RotateShoulder),
        Some(FrameIndex(60))
    );
    assert_eq!(catalog.end_frame(Category::SpineDegree), Some(FrameIndex(75)));
}

#[test]
fn anchor_is_first_point_of_first_record() {
    let catalog = GuidelineCatalog::build(&fixture());
    assert_eq!(
        catalog.anchor(Category::RotateHip),
        Some(NormPoint::new(0.4, 0.6))
    );
    assert_eq!(
        catalog.anchor(Category::HeadPosition),
        Some(NormPoint::new(0.5, 0.4))
    );
}

#[test]
fn missing_category_is_empty_not_an_error() {
    let catalog = GuidelineCatalog::build(&Report::default());
    assert!(catalog.is_empty());
    assert!(catalog.records_in_step_order(Category::Spine).is_empty());
    assert_eq!(catalog.end_frame(Category::Spine), None);
    assert_eq!(catalog.anchor(Category::Spine), None);
}
