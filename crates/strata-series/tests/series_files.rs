//! Series protocol and on-disk round trips through summary files.

use strata_core::{ProtocolError, ReportDate};
use strata_kw::Layout;
use strata_series::{
    DataFiles, ReportStepRule, ResultSeries, SeriesError, SeriesFiles, SeriesReader,
    VariableDescriptor, WriteOptions,
};
use strata_test_utils::fixtures::{production_series, scenario_series};
use strata_test_utils::init_tracing;

#[test]
fn defaults_and_missing_report() {
    init_tracing();
    let mut s = scenario_series();
    s.append_ministep(10.0).unwrap();
    assert_eq!(s.value_at_report("WWCT:OP-1", 0).unwrap(), Some(0.0));
    assert_eq!(s.value_at_report("FOPT", 0).unwrap(), Some(99.0));
    assert_eq!(s.value_at_report("TIME", 0).unwrap(), Some(10.0));
    assert_eq!(s.value_at_report("WWCT:OP-1", 1).unwrap(), None);
}

#[test]
fn protocol_is_enforced() {
    let mut s = scenario_series();
    assert!(matches!(
        s.set_by_key("FOPT", 1.0),
        Err(SeriesError::Protocol(ProtocolError::NoMinistep))
    ));
    s.append_ministep(1.0).unwrap();
    assert!(matches!(
        s.register(VariableDescriptor::new("FGPT")),
        Err(SeriesError::Protocol(ProtocolError::RegisterAfterSeal { .. }))
    ));
    assert!(matches!(
        s.append_ministep(0.5),
        Err(SeriesError::Protocol(ProtocolError::NonIncreasingTime { .. }))
    ));
    assert_eq!(s.nvars(), 3);
    assert_eq!(s.ministep_count(), 1);
}

fn assert_same_series(a: &ResultSeries, b: &ResultSeries) {
    assert_eq!(a.descriptors(), b.descriptors());
    assert_eq!(a.report_starts(), b.report_starts());
    assert_eq!(a.elapsed_days(), b.elapsed_days());
    assert_eq!(a.config().start_date, b.config().start_date);
    assert_eq!(a.config().grid_dims, b.config().grid_dims);
    for m in 0..a.ministep_count() {
        assert_eq!(a.ministep(m), b.ministep(m));
    }
}

#[test]
fn unified_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut series = production_series(6);
    series
        .set_report_rule(ReportStepRule::Explicit(vec![0, 2, 5]))
        .unwrap();
    let case = dir.path().join("NORNE");
    let written = series.save(&case, &WriteOptions::default()).unwrap();
    assert_eq!(written.data, DataFiles::Unified(dir.path().join("NORNE.UNSMRY")));

    let loaded = SeriesReader::new().open(&case).unwrap();
    assert_same_series(&series, &loaded);
    assert_eq!(loaded.report_step_count(), 3);
    assert_eq!(loaded.value_at_report("FOPT", 1).unwrap(), Some(500.0));
    assert_eq!(loaded.value_at_report("BPR:3,3,2", 2).unwrap(), Some(234.0));
}

#[test]
fn resave_replaces_older_case_files() {
    let dir = tempfile::tempdir().unwrap();
    let case = dir.path().join("CASE");
    let per_step = |layout| WriteOptions {
        layout,
        unified: false,
    };
    production_series(3)
        .save(&case, &WriteOptions::default())
        .unwrap();

    let mut short = scenario_series();
    short.append_ministep(5.0).unwrap();
    short.save(&case, &per_step(Layout::Binary)).unwrap();
    assert!(!dir.path().join("CASE.UNSMRY").exists());
    let loaded = SeriesReader::new().open(&case).unwrap();
    assert_eq!(loaded.elapsed_days(), &[5.0]);

    production_series(4)
        .save(&case, &per_step(Layout::Formatted))
        .unwrap();
    assert!(!dir.path().join("CASE.SMSPEC").exists());
    assert!(!dir.path().join("CASE.S0001").exists());
    assert_eq!(SeriesReader::new().open(&case).unwrap().ministep_count(), 4);

    production_series(2)
        .save(&case, &per_step(Layout::Formatted))
        .unwrap();
    assert!(!dir.path().join("CASE.A0003").exists());
    let loaded = SeriesReader::new().open(&case).unwrap();
    assert_eq!(loaded.elapsed_days(), &[1.0, 2.0]);
}

#[test]
fn per_step_formatted_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let series = production_series(4);
    let options = WriteOptions {
        layout: Layout::Formatted,
        unified: false,
    };
    let case = dir.path().join("CASE");
    series.save(&case, &options).unwrap();

    let files = SeriesFiles::resolve(dir.path().join("CASE.DATA")).unwrap();
    assert_eq!(files.layout, Layout::Formatted);
    assert_eq!(files.header, dir.path().join("CASE.FSMSPEC"));
    assert_eq!(files.data.paths().len(), 4);
    assert_eq!(files.data.paths()[3], dir.path().join("CASE.A0004"));

    let loaded = SeriesReader::new().open(&case).unwrap();
    assert_same_series(&series, &loaded);
    assert_eq!(loaded.values("RPR:2").unwrap(), vec![249.0, 248.0, 247.0, 246.0]);
}

#[test]
fn time_map_from_loaded_series() {
    let dir = tempfile::tempdir().unwrap();
    let series = production_series(3);
    series.save(dir.path().join("CASE"), &WriteOptions::default()).unwrap();
    let loaded = SeriesReader::new().open(dir.path().join("CASE")).unwrap();
    let tm = loaded.time_map().unwrap();
    assert_eq!(tm.len(), 4);
    assert_eq!(
        tm.index_of_date(ReportDate::new(2010, 1, 3).unwrap()),
        Some(2)
    );
}

#[test]
fn report_steps_follow_marker_variable() {
    let mut s = scenario_series();
    let marker = s.register(VariableDescriptor::new("STEPNO")).unwrap();
    for (t, step) in [(1.0, 1.0), (2.0, 1.0), (3.0, 1.0), (4.0, 2.0), (5.0, 3.0), (6.0, 3.0)] {
        s.append_ministep(t).unwrap();
        s.set(marker, step).unwrap();
    }
    s.set_report_rule(ReportStepRule::OnChange(marker)).unwrap();
    assert_eq!(s.report_starts(), vec![0, 3, 4]);
    assert_eq!(s.report_ends(), vec![2, 3, 5]);
    assert_eq!(s.value_at_report("TIME", 0).unwrap(), Some(3.0));
    assert_eq!(s.value_at_report("TIME", 2).unwrap(), Some(6.0));
    assert_eq!(s.value_at_report("TIME", 3).unwrap(), None);
}

#[test]
fn missing_case_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        SeriesReader::new().open(dir.path().join("NOPE")),
        Err(SeriesError::NotFound(_))
    ));
}
