use quad_ngin::validation::Comparator;

#[test]
fn ordering_comparators_accept_their_bounds() {
    assert!(Comparator::GreaterEqual(0).compare(&0));
    assert!(!Comparator::GreaterEqual(0).compare(&-1));
    assert!(Comparator::InRangeInclusive(1, 3).compare(&3));
    assert!(!Comparator::InRangeExclusive(1, 3).compare(&3));
    assert!(Comparator::LessThan(2.5).compare(&2.0));
    assert!(Comparator::NotEqual(7).compare(&8));
    assert!(Comparator::<i64>::Always.compare(&i64::MIN));
}

#[test]
fn text_comparators_use_the_textual_form() {
    let frag = Comparator::EndsWith(".frag".to_string());
    assert!(frag.compare(&"sprite.frag".to_string()));
    assert!(!frag.compare(&"sprite.vert".to_string()));
    assert!(Comparator::StartsWith(12).compare(&1234));
}

#[test]
fn describe_fills_the_template() {
    assert_eq!(Comparator::GreaterEqual(0).describe(), "be greater or equal to 0");
    assert_eq!(Comparator::InRangeInclusive(0, 4).describe(), "be in the range [0, 4]");
    assert_eq!(Comparator::InRangeExclusive(0.5, 1.0).describe(), "be in the range ]0.5, 1[");
    assert_eq!(
        Comparator::EndsWith(".vert".to_string()).describe(),
        "end with \".vert\""
    );
    assert_eq!(Comparator::<i64>::Always.describe(), "be anything");
    assert_eq!(Comparator::<i64>::default(), Comparator::Always);
}
