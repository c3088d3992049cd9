//! Per-subject timeline parsing
//!
//! Scans one subject's ordered step list, locates the start of the scored
//! trials, and extracts the three row-sets from the trial steps that follow.

use tracing::warn;

use crate::resampler::{resample, DialConfig};
use crate::schema::{ObjectFlag, Step};
use crate::tables::{DialDropout, EffortDialRow, EffortSliderRow, PerformanceRow, TrialTables};

/// Step type marking a passed comprehension quiz
pub const QUIZ_MARKER: &str = "comp_quiz";

/// How many selected-object flags count toward `td`
const TD_WINDOW: usize = 4;

/// Extract the three row-sets from one subject's timeline.
///
/// The trial region starts two steps past the first passed comprehension quiz
/// (the quiz is followed by a ready page before the first trial) and excludes
/// the final step, which is always the exit page. A timeline without a passed
/// quiz is treated as all trials from the start.
pub fn parse_subject(steps: &[Step], uid: i32) -> TrialTables {
    let start = match steps
        .iter()
        .position(|s| s.step_type.as_deref() == Some(QUIZ_MARKER) && s.correct == Some(true))
    {
        Some(i) => i + 2,
        None => {
            warn!(uid, "no passed comprehension quiz; treating whole timeline as trials");
            0
        }
    };
    let end = steps.len().saturating_sub(1);
    let region = if start < end { &steps[start..end] } else { &[] };

    let mut tables = TrialTables::default();
    let dial_config = DialConfig::default();

    for step in region {
        let Some(scene) = step.trial_id else {
            continue;
        };
        let reversed = step.reversed;
        let order = step.trial_index;

        if let Some(objects) = &step.selected_objects {
            let window = &objects[..objects.len().min(TD_WINDOW)];
            let td = window.iter().map(ObjectFlag::value).sum::<f64>() / window.len() as f64;
            tables.performance.push(PerformanceRow {
                scene,
                reversed,
                order,
                td,
                uid,
            });
        }

        if let Some(effort) = step.response {
            tables.effort_slider.push(EffortSliderRow {
                scene,
                reversed,
                order,
                effort,
                uid,
            });
        }

        if let Some(presses) = &step.effort_dial_responses {
            if presses.is_empty() {
                warn!(uid, scene, "effort dial trace recorded with no samples");
                tables.dropouts.push(DialDropout { uid, scene });
            } else {
                for point in resample(presses, &dial_config) {
                    tables.effort_dial.push(EffortDialRow {
                        scene,
                        reversed,
                        order,
                        rt: point.time_ms(),
                        scale: point.scale(),
                        uid,
                    });
                }
            }
        }
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DialSample;
    use pretty_assertions::assert_eq;

    fn flags(bits: &[u8]) -> Option<Vec<ObjectFlag>> {
        Some(bits.iter().map(|&b| ObjectFlag::Bool(b != 0)).collect())
    }

    fn quiz_passed() -> Step {
        Step {
            step_type: Some(QUIZ_MARKER.to_string()),
            correct: Some(true),
            ..Default::default()
        }
    }

    fn filler() -> Step {
        Step {
            step_type: Some("instructions".to_string()),
            ..Default::default()
        }
    }

    fn trial(scene: i32) -> Step {
        Step {
            trial_id: Some(scene),
            reversed: Some(false),
            trial_index: Some(scene),
            ..Default::default()
        }
    }

    #[test]
    fn test_trial_region_starts_two_past_marker() {
        // trial before the marker must not be extracted
        let steps = vec![
            trial(99),
            quiz_passed(),
            filler(),
            Step {
                selected_objects: flags(&[1, 1, 0, 0]),
                ..trial(1)
            },
            filler(), // exit page
        ];
        let tables = parse_subject(&steps, 0);

        assert_eq!(tables.performance.len(), 1);
        assert_eq!(tables.performance[0].scene, 1);
        assert_eq!(tables.performance[0].td, 0.5);
    }

    #[test]
    fn test_fallback_to_start_without_marker() {
        let steps = vec![
            Step {
                selected_objects: flags(&[1, 1, 1, 1]),
                ..trial(4)
            },
            filler(), // exit page
        ];
        let tables = parse_subject(&steps, 3);

        assert_eq!(tables.performance.len(), 1);
        assert_eq!(tables.performance[0].scene, 4);
        assert_eq!(tables.performance[0].uid, 3);
    }

    #[test]
    fn test_failed_quiz_is_not_a_marker() {
        let failed = Step {
            step_type: Some(QUIZ_MARKER.to_string()),
            correct: Some(false),
            ..Default::default()
        };
        let passed_region_trial = Step {
            selected_objects: flags(&[1]),
            ..trial(1)
        };
        // no passed quiz anywhere: region is the whole timeline minus exit
        let steps = vec![failed, passed_region_trial, filler()];
        let tables = parse_subject(&steps, 0);

        assert_eq!(tables.performance.len(), 1);
    }

    #[test]
    fn test_final_step_is_excluded() {
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                selected_objects: flags(&[1, 1, 1, 1]),
                ..trial(8)
            }, // exit-page slot, must be dropped
        ];
        let tables = parse_subject(&steps, 0);

        assert!(tables.performance.is_empty());
    }

    #[test]
    fn test_step_without_scene_contributes_nothing() {
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                selected_objects: flags(&[1, 1]),
                response: Some(55.0),
                effort_dial_responses: Some(vec![DialSample(0.0, 0.5)]),
                ..Default::default()
            },
            filler(),
        ];
        let tables = parse_subject(&steps, 0);

        assert!(tables.performance.is_empty());
        assert!(tables.effort_slider.is_empty());
        assert!(tables.effort_dial.is_empty());
    }

    #[test]
    fn test_td_uses_first_four_flags_only() {
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                selected_objects: flags(&[1, 1, 1, 1, 0, 0, 0, 0]),
                ..trial(2)
            },
            filler(),
        ];
        let tables = parse_subject(&steps, 0);

        assert_eq!(tables.performance[0].td, 1.0);
    }

    #[test]
    fn test_short_selection_list_averages_what_is_there() {
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                selected_objects: flags(&[1, 0]),
                ..trial(2)
            },
            filler(),
        ];
        let tables = parse_subject(&steps, 0);

        assert_eq!(tables.performance[0].td, 0.5);
    }

    #[test]
    fn test_empty_selection_list_yields_nan_td() {
        // a row is still emitted; its mean over zero flags is NaN
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                selected_objects: flags(&[]),
                ..trial(2)
            },
            filler(),
        ];
        let tables = parse_subject(&steps, 0);

        assert_eq!(tables.performance.len(), 1);
        assert!(tables.performance[0].td.is_nan());
    }

    #[test]
    fn test_slider_row_copies_trial_fields() {
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                response: Some(72.0),
                reversed: Some(true),
                ..trial(5)
            },
            filler(),
        ];
        let tables = parse_subject(&steps, 2);

        assert_eq!(tables.effort_slider.len(), 1);
        let row = &tables.effort_slider[0];
        assert_eq!(row.scene, 5);
        assert_eq!(row.reversed, Some(true));
        assert_eq!(row.effort, 72.0);
        assert_eq!(row.uid, 2);
    }

    #[test]
    fn test_dial_trace_resampled_onto_default_grid() {
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                effort_dial_responses: Some(vec![
                    DialSample(0.0, 0.0),
                    DialSample(15000.0, 1.0),
                ]),
                ..trial(6)
            },
            filler(),
        ];
        let tables = parse_subject(&steps, 1);

        assert_eq!(tables.effort_dial.len(), 300);
        assert!(tables.effort_dial.iter().all(|r| r.scene == 6 && r.uid == 1));
        // rows follow the grid in time order
        assert!(tables
            .effort_dial
            .windows(2)
            .all(|pair| pair[0].rt < pair[1].rt));
        assert!(tables.dropouts.is_empty());
    }

    #[test]
    fn test_empty_dial_trace_records_one_dropout() {
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                effort_dial_responses: Some(vec![]),
                ..trial(9)
            },
            filler(),
        ];
        let tables = parse_subject(&steps, 4);

        assert!(tables.effort_dial.is_empty());
        assert_eq!(tables.dropouts, vec![DialDropout { uid: 4, scene: 9 }]);
    }

    #[test]
    fn test_one_step_can_feed_all_three_tables() {
        let steps = vec![
            quiz_passed(),
            filler(),
            filler(),
            Step {
                selected_objects: flags(&[1, 0, 0, 0]),
                response: Some(30.0),
                effort_dial_responses: Some(vec![DialSample(100.0, 0.4)]),
                ..trial(3)
            },
            filler(),
        ];
        let tables = parse_subject(&steps, 0);

        assert_eq!(tables.performance.len(), 1);
        assert_eq!(tables.effort_slider.len(), 1);
        assert_eq!(tables.effort_dial.len(), 300);
    }

    #[test]
    fn test_marker_region_overrunning_timeline_is_empty() {
        // marker so late that start lands past the trimmed end
        let steps = vec![filler(), quiz_passed(), filler()];
        let tables = parse_subject(&steps, 0);

        assert!(tables.is_empty());
    }
}
