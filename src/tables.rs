//! Output table row types
//!
//! Three fixed-schema, append-only tables. `reversed` and `order` stay
//! optional because the raw format never guarantees them even on scene-bearing
//! steps; absent values serialize as empty CSV cells.

use std::fmt;

use serde::Serialize;

/// Per-trial task performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRow {
    pub scene: i32,
    pub reversed: Option<bool>,
    pub order: Option<i32>,
    /// Mean of the first 4 selected-object flags
    pub td: f64,
    pub uid: i32,
}

impl PerformanceRow {
    pub const HEADERS: [&'static str; 5] = ["scene", "reversed", "order", "td", "uid"];
}

/// Per-trial self-reported effort rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffortSliderRow {
    pub scene: i32,
    pub reversed: Option<bool>,
    pub order: Option<i32>,
    pub effort: f64,
    pub uid: i32,
}

impl EffortSliderRow {
    pub const HEADERS: [&'static str; 5] = ["scene", "reversed", "order", "effort", "uid"];
}

/// One resampled point of a trial's effort-dial signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffortDialRow {
    pub scene: i32,
    pub reversed: Option<bool>,
    pub order: Option<i32>,
    /// Time on the resampling grid, ms since trial start
    pub rt: f32,
    pub scale: f32,
    pub uid: i32,
}

impl EffortDialRow {
    pub const HEADERS: [&'static str; 6] = ["scene", "reversed", "order", "rt", "scale", "uid"];
}

/// A trial that recorded an effort-dial trace with no samples in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialDropout {
    pub uid: i32,
    pub scene: i32,
}

/// The three output tables plus dropout diagnostics, built by appending
/// per-subject row-sets in subject order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialTables {
    pub performance: Vec<PerformanceRow>,
    pub effort_slider: Vec<EffortSliderRow>,
    pub effort_dial: Vec<EffortDialRow>,
    pub dropouts: Vec<DialDropout>,
}

impl TrialTables {
    /// Append another set of tables onto this one, preserving order
    pub fn extend(&mut self, other: TrialTables) {
        self.performance.extend(other.performance);
        self.effort_slider.extend(other.effort_slider);
        self.effort_dial.extend(other.effort_dial);
        self.dropouts.extend(other.dropouts);
    }

    pub fn is_empty(&self) -> bool {
        self.performance.is_empty() && self.effort_slider.is_empty() && self.effort_dial.is_empty()
    }
}

fn opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

impl fmt::Display for TrialTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "performance ({} rows)", self.performance.len())?;
        writeln!(f, "{}", PerformanceRow::HEADERS.join(","))?;
        for r in &self.performance {
            writeln!(
                f,
                "{},{},{},{},{}",
                r.scene,
                opt(&r.reversed),
                opt(&r.order),
                r.td,
                r.uid
            )?;
        }

        writeln!(f, "\neffort_slider ({} rows)", self.effort_slider.len())?;
        writeln!(f, "{}", EffortSliderRow::HEADERS.join(","))?;
        for r in &self.effort_slider {
            writeln!(
                f,
                "{},{},{},{},{}",
                r.scene,
                opt(&r.reversed),
                opt(&r.order),
                r.effort,
                r.uid
            )?;
        }

        writeln!(f, "\neffort_dial ({} rows)", self.effort_dial.len())?;
        writeln!(f, "{}", EffortDialRow::HEADERS.join(","))?;
        for r in &self.effort_dial {
            writeln!(
                f,
                "{},{},{},{},{},{}",
                r.scene,
                opt(&r.reversed),
                opt(&r.order),
                r.rt,
                r.scale,
                r.uid
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn perf_row(scene: i32, uid: i32) -> PerformanceRow {
        PerformanceRow {
            scene,
            reversed: Some(false),
            order: Some(0),
            td: 1.0,
            uid,
        }
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut tables = TrialTables::default();
        tables.extend(TrialTables {
            performance: vec![perf_row(1, 0)],
            ..Default::default()
        });
        tables.extend(TrialTables {
            performance: vec![perf_row(2, 1)],
            ..Default::default()
        });

        assert_eq!(tables.performance.len(), 2);
        assert_eq!(tables.performance[0].uid, 0);
        assert_eq!(tables.performance[1].uid, 1);
    }

    #[test]
    fn test_display_renders_missing_fields_empty() {
        let tables = TrialTables {
            performance: vec![PerformanceRow {
                scene: 3,
                reversed: None,
                order: None,
                td: 0.5,
                uid: 0,
            }],
            ..Default::default()
        };

        let rendered = tables.to_string();
        assert!(rendered.contains("performance (1 rows)"));
        assert!(rendered.contains("3,,,0.5,0"));
    }
}
