use super::*;

#[test]
fn names_round_trip_through_from_name() {
    for c in Category::ALL {
        assert_eq!(Category::from_name(c.name()), Some(c));
    }
}

#[test]
fn report_spelling_of_stance_is_accepted() {
    assert_eq!(Category::from_name("Stane"), Some(Category::Stance));
    let c: Category = serde_json::from_str("\"Stane\"").unwrap();
    assert_eq!(c, Category::Stance);
}

#[test]
fn unknown_names_are_not_categories() {
    assert_eq!(Category::from_name("ElbowAngle"), None);
    assert_eq!(Category::from_name("headposition"), None);
    assert_eq!(Category::from_name(""), None);
}

#[test]
fn policies_split_sticky_and_always_on() {
    let sticky: Vec<_> = Category::ALL.into_iter().filter(|c| c.is_sticky()).collect();
    assert_eq!(
        sticky,
        vec![
            Category::HeadPosition,
            Category::RotateHip,
            Category::RotateShoulder,
            Category::SpineDegree,
            Category::Spine,
            Category::Stance,
        ]
    );
    assert_eq!(Category::VZone.policy(), GatingPolicy::AlwaysOn);
    assert_eq!(Category::AddressBodyShape.policy(), GatingPolicy::AlwaysOn);
    assert_eq!(Category::HipVertical.policy(), GatingPolicy::AlwaysOn);
}
