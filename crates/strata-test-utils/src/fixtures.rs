//! Reusable series and report fixtures.
//!
//! - [`scenario_series`]: `TIME`, `FOPT` (default 99), `WWCT:OP-1`
//! - [`production_series`]: a few ministeps of field and well data
//! - [`scenario_catalog`]: one three-connection pressure report for `OP-1`

use strata_core::{Ijk, ReportDate};
use strata_rft::{ConnectionRecord, ConnectionValues, ReportCatalog, ReportKind, WellReport};
use strata_series::{ResultSeries, SeriesConfig, VariableDescriptor};

pub fn date(y: i32, m: u32, d: u32) -> ReportDate {
    ReportDate::new(y, m, d).unwrap()
}

/// A defining-state series with `TIME`, `FOPT` and `WWCT:OP-1`.
pub fn scenario_series() -> ResultSeries {
    let mut s = ResultSeries::new(SeriesConfig::default()).unwrap();
    s.register(VariableDescriptor::new("TIME").unit("DAYS")).unwrap();
    s.register(VariableDescriptor::new("FOPT").unit("SM3").default_value(99.0))
        .unwrap();
    s.register(VariableDescriptor::new("WWCT").owner("OP-1")).unwrap();
    s
}

/// A sealed series with field, well, region and block variables over
/// `steps` ministeps, one day apart. Values are exact in both layouts.
pub fn production_series(steps: usize) -> ResultSeries {
    let config = SeriesConfig {
        start_date: date(2010, 1, 1),
        grid_dims: Some([10, 10, 3]),
        ..SeriesConfig::new()
    };
    let mut s = ResultSeries::new(config).unwrap();
    s.register(VariableDescriptor::new("TIME").unit("DAYS")).unwrap();
    s.register(VariableDescriptor::new("FOPT").unit("SM3")).unwrap();
    s.register(VariableDescriptor::new("WOPR").owner("OP-1").unit("SM3/DAY"))
        .unwrap();
    s.register(VariableDescriptor::new("WWCT").owner("OP-1")).unwrap();
    s.register(VariableDescriptor::new("RPR").num(2).unit("BARSA"))
        .unwrap();
    s.register(VariableDescriptor::new("BPR").num(123).unit("BARSA"))
        .unwrap();
    for step in 0..steps {
        let t = (step + 1) as f32;
        s.append_ministep(f64::from(t)).unwrap();
        s.set_by_key("FOPT", 100.0 * t).unwrap();
        s.set_by_key("WOPR:OP-1", 100.0).unwrap();
        s.set_by_key("WWCT:OP-1", 0.125 * t).unwrap();
        s.set_by_key("RPR:2", 250.0 - t).unwrap();
        s.set_by_key("BPR:3,3,2", 240.0 - t).unwrap();
    }
    s
}

/// A pressure report for `well` on `when` with connections down one
/// column at `(i, j)`.
pub fn pressure_report(well: &str, when: ReportDate, i: usize, j: usize, cells: usize) -> WellReport {
    WellReport {
        well: well.to_string(),
        date: when,
        elapsed_days: 0.0,
        kind: ReportKind::Pressure,
        connections: (0..cells)
            .map(|k| ConnectionRecord {
                ijk: Ijk::new(i, j, k),
                depth: 2000.0 + 5.0 * k as f32,
                pressure: 200.0 + k as f32,
                values: ConnectionValues::Saturations {
                    swat: 0.25,
                    sgas: 0.125,
                },
            })
            .collect(),
    }
}

/// One report for `OP-1` on 2010-01-01 with three connections.
pub fn scenario_catalog() -> ReportCatalog {
    [pressure_report("OP-1", date(2010, 1, 1), 1, 1, 3)]
        .into_iter()
        .collect()
}
