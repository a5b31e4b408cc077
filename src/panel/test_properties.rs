//! Property-based tests for panel reducer and view invariants.
//!
//! Arbitrary interleavings of trigger activations and animation completions
//! must keep at most one pane visible and never over-notify the host.

use proptest::prelude::*;

use super::controller::{PanelController, PanelOptions};
use super::recording::{RecordingDriver, RecordingHost};
use crate::diagnostics::DiagnosticsModel;
use crate::diagnostics::fixtures::sample_payload_json;
use crate::section::SectionId;
use crate::view::sections::{build_queries, legacy_line_markup};

type TestPanel = PanelController<RecordingHost, RecordingDriver>;

// ──────────────────── strategies ────────────────────

#[derive(Debug, Clone, Copy)]
enum Op {
    Activate(SectionId),
    SettleOldest,
    SettleNewest,
    /// Replay a completion callback that already fired.
    SettleStale,
}

fn arb_section() -> impl Strategy<Value = SectionId> {
    prop::sample::select(SectionId::ALL.to_vec())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => arb_section().prop_map(Op::Activate),
        2 => Just(Op::SettleOldest),
        1 => Just(Op::SettleNewest),
        1 => Just(Op::SettleStale),
    ]
}

/// Activations with no immediate repeats; a target may come back later.
fn arb_burst() -> impl Strategy<Value = Vec<SectionId>> {
    prop::collection::vec(arb_section(), 1..12).prop_map(|mut ids| {
        ids.dedup();
        ids
    })
}

fn mount() -> TestPanel {
    PanelController::mount_json(
        sample_payload_json(),
        RecordingHost::default(),
        RecordingDriver::default(),
        PanelOptions::default(),
    )
    .unwrap()
}

fn apply(panel: &mut TestPanel, op: Op, settled: &mut Vec<super::model::AnimationToken>) {
    match op {
        Op::Activate(id) => panel.activate(id),
        Op::SettleOldest => {
            if let Some(token) = panel.pending_animations().first().copied() {
                panel.animation_settled(token);
                settled.push(token);
            }
        }
        Op::SettleNewest => {
            if let Some(token) = panel.pending_animations().last().copied() {
                panel.animation_settled(token);
                settled.push(token);
            }
        }
        Op::SettleStale => {
            if let Some(token) = settled.first().copied() {
                panel.animation_settled(token);
            }
        }
    }
}

// ──────────────────── properties ────────────────────

proptest! {
    #[test]
    fn at_most_one_pane_visible(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut panel = mount();
        let mut settled = Vec::new();
        for op in ops {
            apply(&mut panel, op, &mut settled);
            let visible = panel.driver().visible();
            prop_assert!(visible.len() <= 1);
            prop_assert_eq!(visible, panel.open_section().into_iter().collect::<Vec<_>>());
            prop_assert_eq!(panel.driver().current, panel.open_section());
        }
    }

    #[test]
    fn notifications_never_outrun_transitions(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut panel = mount();
        let mut settled = Vec::new();
        let mut activations = 0u64;
        for op in ops {
            if matches!(op, Op::Activate(_)) {
                activations += 1;
            }
            apply(&mut panel, op, &mut settled);
            prop_assert!(panel.host().height_notifications <= activations);
            prop_assert_eq!(panel.host().height_notifications, panel.notifications());
        }
        panel.settle_all();
        prop_assert!(panel.pending_animations().is_empty());
    }

    #[test]
    fn toggling_open_pane_closes_it(
        ops in prop::collection::vec(arb_op(), 0..30),
    ) {
        let mut panel = mount();
        let mut settled = Vec::new();
        for op in ops {
            apply(&mut panel, op, &mut settled);
        }
        panel.settle_all();
        if let Some(open) = panel.open_section() {
            panel.activate(open);
            prop_assert!(panel.state().is_closed());
            panel.settle_all();
            prop_assert!(panel.driver().visible().is_empty());
            prop_assert_eq!(panel.driver().current, None);
        }
    }

    #[test]
    fn burst_opens_last_and_notifies_once(burst in arb_burst()) {
        let mut panel = mount();
        for id in &burst {
            panel.activate(*id);
        }
        prop_assert_eq!(panel.host().height_notifications, 0);
        panel.settle_all();
        prop_assert_eq!(panel.open_section(), burst.last().copied());
        prop_assert_eq!(panel.host().height_notifications, 1);
    }

    #[test]
    fn query_rows_are_sequence_numbered(
        queries in prop::collection::vec(("[a-zA-Z0-9 <>*=]{0,24}", 0.0f64..10.0, "[A-Za-z:]{1,16}"), 0..20),
    ) {
        let mut value = sample_payload_json();
        value["queries"] = serde_json::Value::Array(
            queries
                .iter()
                .map(|(sql, time, function)| serde_json::json!({"sql": sql, "time": time, "function": function}))
                .collect(),
        );
        let model = DiagnosticsModel::from_value(value).unwrap();
        let rows = build_queries(&model).table_rows();
        prop_assert_eq!(rows.len(), queries.len() + 1);
        for (i, row) in rows.iter().skip(1).enumerate() {
            prop_assert_eq!(&row[0], &(i + 1).to_string());
            prop_assert_eq!(&row[1], &queries[i].0);
            prop_assert!(row[2].ends_with("ms"));
        }
    }

    #[test]
    fn legacy_markup_only_introduces_line_breaks(line in "\\PC{0,40}(\n\\PC{0,10}){0,3}") {
        let markup = legacy_line_markup(&line);
        prop_assert!(!markup.replace("<br />", "").contains('<'));
        prop_assert_eq!(markup.matches("<br />").count(), line.matches('\n').count());
    }
}
