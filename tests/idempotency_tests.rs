//! Idempotency tests
//!
//! Verifies that normalization is idempotent:
//! `normalize(normalize(input)) == normalize(input)`
//!
//! and that outputs survive a JSON round trip, so they can be fed back in.

use ferro_norm::hgvs::{Interval, NaEdit, Position, Variant};
use ferro_norm::{MockProvider, NormalizeConfig, Normalizer, ShuffleDirection};
use rstest::rstest;

fn del() -> NaEdit {
    NaEdit::Deletion { reference: None }
}

fn ins(alt: &str) -> NaEdit {
    NaEdit::Insertion {
        alternate: alt.to_string(),
    }
}

fn g(start: i64, end: i64, edit: NaEdit) -> Variant {
    Variant::genomic("NC_000001.11", Interval::bases(start, end), edit)
}

fn check_idempotent(variant: &Variant, config: NormalizeConfig) {
    let normalizer = Normalizer::with_config(MockProvider::with_test_data(), config);
    let once = normalizer.normalize(variant).unwrap();
    let twice = normalizer.normalize(&once).unwrap();
    assert_eq!(once, twice, "{} -> {} -> {}", variant, once, twice);

    let json = serde_json::to_string(&once).unwrap();
    let reparsed: Variant = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, once);
    assert_eq!(normalizer.normalize(&reparsed).unwrap(), once);
}

#[rstest]
#[case::del_run(g(13, 13, del()))]
#[case::del_dinucleotide(g(33, 34, del()))]
#[case::del_long_run(g(121, 121, del()))]
#[case::ins_to_dup(g(12, 13, ins("A")))]
#[case::ins_unit(g(54, 55, ins("ACGT")))]
#[case::ins_plain(g(74, 75, ins("ACGT")))]
#[case::dup(g(140, 140, NaEdit::Duplication { sequence: None }))]
#[case::delins_trim(g(201, 203, NaEdit::Delins { reference: None, alternate: "GAA".into() }))]
#[case::delins_to_ins(g(200, 200, NaEdit::Delins { reference: None, alternate: "AGG".into() }))]
#[case::inversion(g(201, 203, NaEdit::Inversion))]
#[case::cds_del(Variant::cds("NM_001166478.1", Interval::bases(61, 61), del()))]
#[case::cds_utr3(Variant::cds("NM_001166478.1", Interval::point(Position::utr3(1)), del()))]
#[case::cds_utr5(Variant::cds("NM_001166478.1", Interval::point(Position::new(-2)), del()))]
#[case::tx_del(Variant::tx("NR_024540.1", Interval::bases(41, 41), del()))]
#[case::ins_sequence_start(g(1, 2, ins("CA")))]
#[case::ins_before_first_base(g(0, 1, ins("AC")))]
#[case::ins_after_last_base(g(240, 241, ins("G")))]
#[case::ins_cds_start(Variant::tx("NM_001166478.1", Interval::bases(21, 22), ins("CA")))]
#[case::ins_exon_end(Variant::tx("NM_001166478.1", Interval::bases(59, 60), ins("TC")))]
#[case::ins_noncoding_end(Variant::tx("NR_024540.1", Interval::bases(99, 100), ins("CG")))]
fn test_idempotent(
    #[case] variant: Variant,
    #[values(ShuffleDirection::ThreePrime, ShuffleDirection::FivePrime)] direction: ShuffleDirection,
    #[values(true, false)] fill: bool,
) {
    let config = NormalizeConfig::default()
        .with_direction(direction)
        .with_fill(fill);
    check_idempotent(&variant, config);
}

#[test]
fn test_idempotent_when_crossing_boundaries() {
    let config = NormalizeConfig::default()
        .with_direction(ShuffleDirection::FivePrime)
        .allow_crossing_boundaries();
    check_idempotent(
        &Variant::tx("NM_001166478.1", Interval::bases(62, 62), del()),
        config,
    );
}

#[test]
fn test_normalized_output_is_stable_across_directions() {
    // a 5' result re-normalized 3' lands on the 3' result
    let variant = g(13, 13, del());
    let five = Normalizer::with_config(
        MockProvider::with_test_data(),
        NormalizeConfig::default().with_direction(ShuffleDirection::FivePrime),
    )
    .normalize(&variant)
    .unwrap();
    let three = Normalizer::new(MockProvider::with_test_data());
    assert_eq!(
        three.normalize(&five).unwrap(),
        three.normalize(&variant).unwrap()
    );
}
