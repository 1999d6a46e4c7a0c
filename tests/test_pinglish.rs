use parsinorm::pinglish::{convert_word, fix_diacritics, is_pinglish_token, pinglish_to_persian};
use parsinorm::Normalizer;

#[test]
fn known_word_ignores_case() {
    let expected = convert_word("kAS", None);
    assert_eq!(expected, "کاشْ");
    for variant in ["kas", "KAS", "Kas", "kAs"] {
        assert_eq!(convert_word(variant, None), expected);
    }
}

#[test]
fn homograph_default_and_reference() {
    assert!(convert_word("tArikh", None).starts_with('ت'));
    assert!(convert_word("tArikh", Some("تاریخ")).starts_with('ت'));
    assert!(convert_word("tArikh", Some("طاریخ")).starts_with('ط'));
    assert!(convert_word("sabr", Some("صبر")).starts_with('ص'));
    assert!(convert_word("zohr", Some("ظُهر")).starts_with('ظ'));
    assert!(convert_word("hasan", Some("حسن")).starts_with('ح'));
    assert!(convert_word("qazA", Some("غذا")).starts_with('غ'));
}

#[test]
fn mi_prefix_is_joined_with_zwnj() {
    let out = pinglish_to_persian("kAS to ham miAmadi", Some("کاش تو هم می آمدی"));
    assert!(out.contains("می\u{200c}آ"), "{out}");
    assert!(!out.contains("می آ"));
}

#[test]
fn reference_word_replaces_same_length_mismatch() {
    assert_eq!(pinglish_to_persian("kAr", Some("گار")), "گار");
    assert_eq!(pinglish_to_persian("kAr to", Some("گار")), "کارْ تو");
}

#[test]
fn unknown_characters_pass_through() {
    assert_eq!(pinglish_to_persian("salAm!", None), "سَلامْ!");
    assert_eq!(pinglish_to_persian("", None), "");
}

#[test]
fn cleanup_of_scanner_marks() {
    assert_eq!(fix_diacritics("ب\u{0652}\u{0650}"), "ب\u{0650}");
    assert_eq!(fix_diacritics("ب\u{0650}\u{0650}\u{0650}"), "ب\u{0650}");
}

#[test]
fn token_detection() {
    assert!(is_pinglish_token("?Ali"));
    assert!(!is_pinglish_token("علی"));
}

#[test]
fn normalizer_delegates() {
    let normalizer = Normalizer::new();
    assert_eq!(
        normalizer.pinglish_to_persian("?Ali be madrese miravad", None),
        "عَلی بِه مَدْرِسِه می\u{200c}رَوَدْ"
    );
}

#[test]
fn stand_in_letters_keep_short_vowels() {
    assert_eq!(convert_word("Sir", None), "شِرْ");
    assert_eq!(convert_word("Si", None), "شِ");
    assert_eq!(convert_word("SAh", None), "شَهْ");
}
