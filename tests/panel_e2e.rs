//! End-to-end panel scenarios: payload file → mounted toolbar → transitions.

use std::fs;

use debug_toolbar::core::config::Config;
use debug_toolbar::panel::recording::{DriverCall, RecordingDriver, RecordingHost};
use debug_toolbar::prelude::*;
use serde_json::json;

fn payload() -> serde_json::Value {
    json!({
        "log": [{"type": "deprecated", "msg": "Use <code>wfFoo</code>", "caller": "Hooks::run"}],
        "queries": [{"sql": "SELECT 1", "time": 0.0021, "function": "Foo::bar"}],
        "debugLog": ["Start request GET /\nHTTP HEADERS:", "<b>raw</b>"],
        "request": {
            "method": "POST",
            "url": "/api.php",
            "headers": {"Content-Type": "application/json", "Cookie": "x=1"},
            "params": []
        },
        "includes": [{"name": "index.php", "size": 1234}],
        "profile": [],
        "mwVersion": "1.25wmf1",
        "gitRevision": false,
        "gitViewUrl": false,
        "gitBranch": false,
        "phpEngine": "HHVM",
        "phpVersion": "3.3.0-dev",
        "time": 0.04,
        "memory": 4_194_304,
        "memoryPeak": 8_388_608
    })
}

fn mount_from_file(options: PanelOptions) -> PanelController<RecordingHost, RecordingDriver> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payload.json");
    fs::write(&path, serde_json::to_vec(&payload()).unwrap()).unwrap();
    let model = DiagnosticsModel::from_path(&path).unwrap();
    PanelController::mount(
        model,
        RecordingHost::default(),
        RecordingDriver::default(),
        options,
    )
}

#[test]
fn mounted_html_contains_every_pane_in_order() {
    let panel = mount_from_file(PanelOptions::default());
    let html = &panel.host().mounts[0];
    let positions: Vec<usize> = SectionId::ALL
        .iter()
        .map(|id| html.find(&format!("id=\"{}\"", id.pane_element_id())).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(html.starts_with("<div id=\"mw-debug-toolbar\""));
}

#[test]
fn query_pane_row_matches_reference_rendering() {
    let panel = mount_from_file(PanelOptions::default());
    let rows = panel.view(SectionId::Queries).unwrap().body().table_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].join(" | "), "1 | SELECT 1 | 2.1000ms | Foo::bar");
}

#[test]
fn panes_render_payload_sections() {
    let panel = mount_from_file(PanelOptions::default());
    let root = panel.root();

    let console = root.find_by_id("mw-debug-console").unwrap();
    assert_eq!(console.table_rows()[0][0], "Deprecated");
    assert!(console.to_html().contains("Use <code>wfFoo</code>"));

    let log = root.find_by_id("mw-debug-pane-debuglog").unwrap().to_html();
    assert!(log.contains("Start request GET /<br />\nHTTP HEADERS:"));
    assert!(log.contains("&lt;b&gt;raw&lt;/b&gt;"));

    let request = panel.view(SectionId::Request).unwrap().body();
    assert!(request.text_content().starts_with("POST /api.php"));
    assert_eq!(request.table_rows().len(), 4);

    let runtime = root.find_by_id("mw-debug-phpversion").unwrap();
    assert_eq!(runtime.text_content(), "HHVM: 3.3.0-dev");
    assert!(root.find_by_id("mw-debug-gitbranch").is_none());
    assert_eq!(
        root.find_by_id("mw-debug-debuglog").unwrap().text_content(),
        "Debug log (2)"
    );
}

#[test]
fn full_transition_walkthrough() {
    let mut panel = mount_from_file(PanelOptions::default());

    panel.activate(SectionId::Console);
    let reveal = panel.driver_mut().take_pending();
    assert_eq!(reveal.len(), 1);
    assert_eq!(panel.host().height_notifications, 0);
    panel.animation_settled(reveal[0]);
    assert_eq!(panel.host().height_notifications, 1);

    panel.activate(SectionId::Queries);
    assert_eq!(panel.host().height_notifications, 2);
    assert!(panel.driver_mut().take_pending().is_empty());

    panel.activate(SectionId::Queries);
    assert!(panel.state().is_closed());
    assert_eq!(panel.driver().current, None);
    let collapse = panel.driver_mut().take_pending();
    panel.animation_settled(collapse[0]);
    panel.animation_settled(collapse[0]);
    assert_eq!(panel.host().height_notifications, 3);

    let calls = &panel.driver().calls;
    assert!(matches!(
        calls.last(),
        Some(DriverCall::SlideUp {
            pane: SectionId::Queries,
            ..
        })
    ));
}

#[test]
fn config_file_drives_summary_and_log() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs").join("panel.jsonl");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[summary]\nproduct_name = \"WikiFarm\"\nproduct_url = \"https://farm.example/\"\n\
             [log]\njsonl_path = \"{}\"\n",
            log_path.display()
        ),
    )
    .unwrap();
    let config = Config::load(Some(&config_path)).unwrap();

    let mut panel = mount_from_file(PanelOptions::from_config(&config));
    panel.activate(SectionId::Includes);
    panel.settle_all();
    drop(panel.into_parts());

    let version = {
        let panel = mount_from_file(PanelOptions {
            summary: config.summary.clone(),
            ..PanelOptions::default()
        });
        panel
            .root()
            .find_by_id("mw-debug-mwversion")
            .unwrap()
            .to_html()
    };
    assert!(version.contains("<a href=\"https://farm.example/\">WikiFarm</a>: 1.25wmf1 "));

    let lines = fs::read_to_string(&log_path).unwrap();
    assert_eq!(lines.lines().count(), 4);
    assert!(lines.contains("\"pane\":\"includes\""));
}

#[test]
fn malformed_payload_never_mounts() {
    let mut value = payload();
    value.as_object_mut().unwrap().remove("includes");
    let err = DiagnosticsModel::from_value(value).unwrap_err();
    assert_eq!(err.code(), "DBG-1001");
    assert!(err.to_string().contains("includes"));
}
