use figlayout_common::error::FigLayoutCommonError;
use figlayout_common::types::{Anchor, HorizontalAnchor, Margins, Side, VerticalAnchor};
use figlayout_common::value::ScalarOrArray;
use rstest::rstest;

#[rstest]
#[case(vec![2.0], Margins::new(2.0, 2.0, 2.0, 2.0))]
#[case(vec![1.0, 2.0], Margins::new(1.0, 2.0, 1.0, 2.0))]
#[case(vec![1.0, 2.0, 3.0], Margins::new(1.0, 2.0, 3.0, 2.0))]
#[case(vec![1.0, 2.0, 3.0, 4.0], Margins::new(1.0, 2.0, 3.0, 4.0))]
fn margins_like_arguments_expand(#[case] values: Vec<f64>, #[case] expected: Margins<f64>) {
    let arg = ScalarOrArray::from(values);
    assert_eq!(arg.to_margins().unwrap(), expected);
}

#[test]
fn margins_from_json() {
    let arg: ScalarOrArray<f64> = serde_json::from_str("[3, 5]").unwrap();
    assert_eq!(arg.to_margins().unwrap(), Margins::new(3.0, 5.0, 3.0, 5.0));

    let flags: ScalarOrArray<bool> = serde_json::from_str("true").unwrap();
    assert_eq!(flags.to_margins().unwrap(), Margins::splat(true));
}

#[rstest]
#[case("upper left", VerticalAnchor::Upper, HorizontalAnchor::Left)]
#[case("upper center", VerticalAnchor::Upper, HorizontalAnchor::Center)]
#[case("center right", VerticalAnchor::Center, HorizontalAnchor::Right)]
#[case("lower right", VerticalAnchor::Lower, HorizontalAnchor::Right)]
#[case("left", VerticalAnchor::Center, HorizontalAnchor::Left)]
#[case("upper", VerticalAnchor::Upper, HorizontalAnchor::Center)]
fn anchors_parse(
    #[case] name: &str,
    #[case] vertical: VerticalAnchor,
    #[case] horizontal: HorizontalAnchor,
) {
    assert_eq!(name.parse::<Anchor>().unwrap(), Anchor::new(vertical, horizontal));
}

#[test]
fn invalid_side_lists_valid_names() {
    let err = Side::parse("middle").unwrap_err();
    let FigLayoutCommonError::InvalidChoice { valid, .. } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(*valid, &["top", "right", "bottom", "left"]);
    assert!(err.to_string().contains("middle"));
}
