use std::fs;
use std::sync::Arc;
use std::thread;

use parsinorm::{Normalizer, NormalizerConfig};
use tempfile::tempdir;

#[test]
fn unifies_letters_and_joins_suffix() {
    let normalizer = Normalizer::new();
    assert_eq!(normalizer.normalize("كتاب ها"), "کتاب\u{200c}ها");
    assert_eq!(normalizer.normalize("  كتاب  ها  "), "کتاب\u{200c}ها");
}

#[test]
fn spells_out_dates() {
    let normalizer = Normalizer::new();
    let out = normalizer.normalize("تاریخ 1401/05/12");
    assert!(out.starts_with("تاریخ دوازدهم مرداد هزار وَ چهارصد وَ یک"), "{out}");
    assert!(!out.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn spells_out_times_and_numbers() {
    let normalizer = Normalizer::new();
    assert!(normalizer
        .normalize("ساعت 12:30 است")
        .contains("دوازده وَ سی دقیقه"));
    assert!(normalizer.normalize("من 25 سال دارم").contains("بیست وَ پنج"));
    assert!(normalizer.normalize("۱۲۳").contains("صد وَ بیست وَ سه"));
}

#[test]
fn flags_disable_passes() {
    let config = NormalizerConfig::default()
        .with_number_to_text(false)
        .with_date_normalizing(false)
        .with_time_normalizing(false);
    let normalizer = Normalizer::with_config(config).unwrap();
    assert!(normalizer.normalize("من 25 سال دارم").contains("25"));
}

#[test]
fn punctuation_becomes_clause_separators() {
    let normalizer = Normalizer::new();
    assert_eq!(normalizer.normalize("سلام، خوبی؟"), "سلام | خوبی");
}

#[test]
fn compound_correction_runs_last() {
    let normalizer = Normalizer::new();
    assert_eq!(normalizer.normalize("او بازی کن است"), "او بازی\u{200c}کن است");

    let without = Normalizer::with_config(NormalizerConfig::default().with_half_space_correction(false)).unwrap();
    assert_eq!(without.normalize("او بازی کن است"), "او بازی کن است");
}

#[test]
fn normalization_is_deterministic() {
    let normalizer = Normalizer::new();
    let text = "آنها گفت و گو می کنند ، تاریخ 1402/01/01";
    assert_eq!(normalizer.normalize(text), normalizer.normalize(text));
}

#[test]
fn batch_preserves_order_in_both_modes() {
    let mut normalizer = Normalizer::new();
    let texts = ["كتاب ها", "من 3 سال", "سلام، خوبی؟", ""];
    let expected: Vec<String> = texts.iter().map(|t| normalizer.normalize(t)).collect();

    assert_eq!(normalizer.normalize_batch(&texts), expected);
    normalizer.set_parallel(false);
    assert_eq!(normalizer.normalize_batch(&texts), expected);
}

#[test]
fn shared_across_threads() {
    let normalizer = Arc::new(Normalizer::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let normalizer = Arc::clone(&normalizer);
            thread::spawn(move || normalizer.normalize("كتاب ها"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "کتاب\u{200c}ها");
    }
}

#[test]
fn config_from_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "number_to_text": false, "parallel": false }"#).unwrap();

    let config = NormalizerConfig::from_json_file(&path).unwrap();
    assert!(!config.number_to_text);
    assert!(!config.parallel);
    assert!(config.date_normalizing);

    let normalizer = Normalizer::with_config(config).unwrap();
    assert!(!normalizer.get_parallel());
}

#[test]
fn bad_resource_dir_fails_construction() {
    let dir = tempdir().unwrap();
    let config = NormalizerConfig::default().with_resource_dir(dir.path().join("missing"));
    assert!(Normalizer::with_config(config).is_err());
}

#[test]
fn statistical_correction_with_trained_model() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("corpus.txt");
    let model = dir.path().join("merger.cbor");
    fs::write(&corpus, "کتاب‌ها خوب است\nکتاب‌ها را بده\n").unwrap();

    let config = NormalizerConfig::default()
        .with_statistical_space_correction(true)
        .with_half_space_correction(false)
        .with_token_merger(model.clone(), Some(corpus));
    let normalizer = Normalizer::with_config(config).unwrap();

    assert!(model.is_file());
    assert_eq!(normalizer.normalize("کتاب ها خوب است"), "کتاب\u{200c}ها خوب است");
}

#[test]
fn yearless_dates_follow_the_veto_list() {
    let text = "مورخ 5/6 رسید";
    assert!(!Normalizer::new().normalize(text).contains("مرداد"));

    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "date_veto_keywords": ["میلادی"] }"#).unwrap();
    let config = NormalizerConfig::from_json_file(&path).unwrap();
    assert_eq!(config.date_veto_keywords, Some(vec!["میلادی".to_string()]));

    let normalizer = Normalizer::with_config(config).unwrap();
    assert!(normalizer.normalize(text).contains("مرداد"));
}
