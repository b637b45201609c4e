// End-to-end checks: DIM export -> store snapshot -> verb analysis report.

use beygja_core::config::Config;
use beygja_core::core::classify::MixedVerbSet;
use beygja_core::core::codes::CodeMapper;
use beygja_core::core::engine::{Outcome, SkipReason};
use beygja_core::core::types::Forms;
use beygja_core::import::{import_syllables, import_words};
use beygja_core::report::Report;
use beygja_core::store::Store;
use beygja_core::{Result, VerbEngine};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::time::Duration;

const DIM: &str = indoc! {"
    kalla;1;so;alm;1;;;;K;kalla;GM-NH;;;;
    kalla;1;so;alm;1;;;;K;kalla;GM-FH-NT-1P-ET;;;;
    kalla;1;so;alm;1;;;;K;kallar;GM-FH-NT-3P-ET;;;;
    kalla;1;so;alm;1;;;;K;köllum;GM-FH-NT-1P-FT;;;;
    kalla;1;so;alm;1;;;;K;kallaði;GM-FH-ÞT-3P-ET;;;;
    kalla;1;so;alm;1;;;;K;kölluðu;GM-FH-ÞT-3P-FT;;;;
    kalla;1;so;alm;1;;;;K;kallaðu;GM-FH-ÞT-3P-FT2;4;URE;;
    kalla;1;so;alm;1;;;;K;kalla;GM-BH-ST;;;;
    dæma;2;so;alm;1;;;;K;dæma;GM-NH;;;;
    dæma;2;so;alm;1;;;;K;dæmi;GM-FH-NT-1P-ET;;;;
    dæma;2;so;alm;1;;;;K;dæmdi;GM-FH-ÞT-3P-ET;;;;
    dæma;2;so;alm;1;;;;K;dæmdu;GM-VH-ÞT-3P-FT;;;;
    dæma;2;so;alm;1;;;;K;dæmdur;LHÞT-SB-KK-NFET;;;;
    hafa;3;so;alm;1;;;;K;hef;GM-FH-NT-1P-ET;;;;
    hafa;3;so;alm;1;;;;K;hafði;GM-FH-ÞT-3P-ET;;;;
    sofa;4;so;alm;1;;;;K;svaf;GM-FH-ÞT-3P-ET;;;;
    vera;5;so;alm;1;;;;K;var;GM-FH-ÞT-3P-ET;;;;
    nálgast;6;so;alm;1;;;;K;nálgast;MM-NH;;;;
    nálgast;6;so;alm;1;;;;K;nálgaðist;MM-FH-ÞT-3P-ET;;;;
    telja;7;so;alm;1;;;;K;taldi;GM-FH-ÞT-3P-ET;;;;
    hestur;8;kk;alm;1;;;;K;hestur;NFET;;;;
"};

fn imported() -> Store {
    let mut store = Store::new();
    let mut mapper = CodeMapper::new();
    import_words(DIM.as_bytes(), 0, &mut store, &mut mapper, Duration::from_secs(60)).unwrap();
    import_syllables("1;1\n2;1\n".as_bytes(), &mut store).unwrap();
    store
}

fn run(store: &Store, config: &Config) -> Report {
    let engine = VerbEngine::new(config.strict).with_mixed_verbs(MixedVerbSet::new(["telja"]));
    let filter = config.paradigm_filter();
    let mut report = Report::new(config.strict);
    for word in store.verbs() {
        let paradigm = store
            .collated_paradigm(word.id, &filter, engine.collator())
            .unwrap();
        let syllables = word.syllables.unwrap_or(config.default_syllables);
        report.record(
            &word.headword,
            word.external_id,
            engine.analyze(&word.headword, usize::from(syllables), &paradigm),
        );
    }
    report
}

fn mismatched(report: &Report) -> Vec<&str> {
    report.mismatched.iter().map(|v| v.headword.as_str()).collect()
}

#[test]
fn loose_run_flags_only_irregular_present() {
    let report = run(&imported(), &Config::default());
    assert_eq!(report.analyzed, 4);
    assert_eq!(report.without_shared_cells, 1);
    assert_eq!(mismatched(&report), ["hafa"]);

    let hafa = &report.mismatched[0].analysis.mismatches;
    assert_eq!(hafa.len(), 1);
    assert_eq!(hafa[0].code, "Fair1v");
    assert_eq!(hafa[0].predicted, ["hafi"]);
    assert_eq!(hafa[0].actual, ["hef"]);

    let skipped: Vec<(&str, &SkipReason)> = report
        .skipped
        .iter()
        .map(|s| (s.headword.as_str(), &s.reason))
        .collect();
    assert_eq!(
        skipped,
        [
            ("sofa", &SkipReason::Strong),
            ("vera", &SkipReason::Special),
            ("telja", &SkipReason::Mixed("telja".into())),
        ]
    );
}

#[test]
fn strict_run_rejects_unexplained_variant() {
    let config = Config {
        strict: true,
        ..Config::default()
    };
    let report = run(&imported(), &config);
    assert_eq!(mismatched(&report), ["kalla", "hafa"]);
    let kalla = &report.mismatched[0].analysis.mismatches;
    assert_eq!(kalla[0].code, "Faip3w");
    assert_eq!(kalla[0].actual, ["kallaðu", "kölluðu"]);
}

#[test]
fn grade_filter_hides_nonstandard_variant() {
    let config = Config {
        strict: true,
        max_grade: Some(3),
        ..Config::default()
    };
    assert_eq!(mismatched(&run(&imported(), &config)), ["hafa"]);

    let registers = Config {
        strict: true,
        excluded_registers: vec!["URE".into()],
        ..Config::default()
    };
    assert_eq!(mismatched(&run(&imported(), &registers)), ["hafa"]);
}

#[test]
fn middle_only_verb_uses_artificial_parts() {
    let store = imported();
    let word = store.word_by_external(6).unwrap();
    let paradigm = store.paradigm(word.id, &Config::default().paradigm_filter()).unwrap();
    match VerbEngine::new(true).analyze(&word.headword, 1, &paradigm) {
        Outcome::Compared(analysis) => {
            assert!(analysis.parts.artificial);
            assert_eq!(analysis.parts.infinitive, "nálga");
            assert_eq!(analysis.parts.past_singular, ["nálgaði"]);
            assert_eq!(analysis.shared_cells, 0);
            assert!(analysis.mismatches.is_empty());
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn imported_codes_survive_snapshot() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dim.bin");
    imported().save(&path)?;

    let store = Store::load(&path)?;
    let word = store.word_by_external(2).unwrap();
    assert_eq!(word.syllables, Some(1));
    let paradigm = store.paradigm(word.id, &Default::default())?;
    let codes: Vec<&str> = paradigm.keys().map(String::as_str).collect();
    assert_eq!(codes, ["Faip3v", "Fair1v", "Fasp3w", "Ia", "Ps1v4"]);
    assert_eq!(paradigm["Ps1v4"], Forms::One("dæmdur".into()));
    assert_eq!(store.word_by_external(1).unwrap().syllables, Some(1));
    Ok(())
}
