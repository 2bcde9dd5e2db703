//! Custom assertion helpers for E2E tests.

use sk_protocol::ipc::Event;

/// Index of the first event matching `predicate`.
#[allow(dead_code)]
pub fn position_of(events: &[Event], predicate: impl Fn(&Event) -> bool) -> Option<usize> {
    events.iter().position(predicate)
}

/// Log texts in the order they were appended.
#[allow(dead_code)]
pub fn logged_texts(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::LogAppended { entry, .. } => Some(entry.text.clone()),
            _ => None,
        })
        .collect()
}

/// Final display of every metric, taken from its non-counting frame.
#[allow(dead_code)]
pub fn final_metric_displays(events: &[Event]) -> Vec<(String, String)> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::MetricUpdated {
                target_id,
                display,
                counting: false,
                ..
            } => Some((target_id.clone(), display.clone())),
            _ => None,
        })
        .collect()
}

/// Assert the stage events form the expected sequence for `step_count`
/// stages: activate and complete each stage in order, with a connector
/// after every stage but the last.
#[allow(dead_code)]
pub fn assert_stage_sequence(events: &[Event], step_count: usize) {
    let mut expected = Vec::new();
    for i in 0..step_count {
        expected.push(format!("activate {i}"));
        expected.push(format!("complete {i}"));
        if i + 1 < step_count {
            expected.push(format!("connector {i}"));
        }
    }

    let actual: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            Event::StageActivated { step_index, .. } => Some(format!("activate {step_index}")),
            Event::StageCompleted { step_index, .. } => Some(format!("complete {step_index}")),
            Event::ConnectorCompleted {
                connector_index, ..
            } => Some(format!("connector {connector_index}")),
            _ => None,
        })
        .collect();

    assert_eq!(actual, expected, "stage events out of order");
}
