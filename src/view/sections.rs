//! Builders turning each payload section into its pane body.
//!
//! All builders are pure functions of the [`DiagnosticsModel`]; they run once
//! when the panel is constructed.

use crate::diagnostics::{DiagnosticsModel, OrderedPairs};
use crate::section::SectionId;
use crate::view::markup::{Element, escape_html};
use crate::view::profile::ProfileRenderer;

/// Console label column: 20px padding + 10 glyphs at 11px.
const CONSOLE_KIND_WIDTH_PX: u32 = 20 + 10 * 11;
const CONSOLE_CALLER_WIDTH_PX: u32 = 350;

/// Rendered body of one pane, immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    id: SectionId,
    body: Element,
}

impl SectionView {
    #[must_use]
    pub const fn new(id: SectionId, body: Element) -> Self {
        Self { id, body }
    }

    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.id
    }

    #[must_use]
    pub const fn body(&self) -> &Element {
        &self.body
    }

    /// Wrap the body in its pane container.
    #[must_use]
    pub fn pane_element(&self) -> Element {
        Element::new("div")
            .class("mw-debug-pane")
            .id(self.id.pane_element_id())
            .child(self.body.clone())
    }
}

/// Build every section view in summary bar order.
pub fn build_all(model: &DiagnosticsModel, profile: &dyn ProfileRenderer) -> Vec<SectionView> {
    SectionId::ALL
        .into_iter()
        .map(|id| build_section(id, model, profile))
        .collect()
}

/// Build the view for a single section.
pub fn build_section(
    id: SectionId,
    model: &DiagnosticsModel,
    profile: &dyn ProfileRenderer,
) -> SectionView {
    let body = match id {
        SectionId::Console => build_console(model),
        SectionId::Queries => build_queries(model),
        SectionId::LegacyLog => build_legacy_log(model),
        SectionId::Request => build_request(model),
        SectionId::Includes => build_includes(model),
        SectionId::Profile => profile.render(model.profile_trace()),
    };
    SectionView::new(id, body)
}

#[must_use]
pub fn build_console(model: &DiagnosticsModel) -> Element {
    let mut table = Element::new("table")
        .id("mw-debug-console")
        .child(Element::new("colgroup").style(format!("width: {CONSOLE_KIND_WIDTH_PX}px")))
        .child(Element::new("colgroup"))
        .child(Element::new("colgroup").style(format!("width: {CONSOLE_CALLER_WIDTH_PX}px")));

    for entry in model.log_entries() {
        table.push(
            Element::new("tr")
                .child(
                    Element::new("td")
                        .class(format!("mw-debug-console-{}", entry.kind.as_wire()))
                        .text(entry.kind.label()),
                )
                .child(Element::new("td").raw(entry.message.clone()))
                .child(Element::new("td").text(entry.caller.clone())),
        );
    }
    table
}

#[must_use]
pub fn build_queries(model: &DiagnosticsModel) -> Element {
    let mut table = Element::new("table").id("mw-debug-querylist").child(
        Element::new("tr")
            .child(Element::new("th").style("width: 4em").text("#"))
            .child(Element::new("th").text("SQL"))
            .child(Element::new("th").style("width: 8em").text("Time"))
            .child(Element::new("th").style("width: 18em").text("Call")),
    );

    for (index, query) in model.queries().iter().enumerate() {
        table.push(
            Element::new("tr")
                .child(Element::new("td").text((index + 1).to_string()))
                .child(Element::new("td").text(query.sql.clone()))
                .child(
                    Element::new("td")
                        .class("stats")
                        .text(format_elapsed_ms(query.elapsed_seconds)),
                )
                .child(Element::new("td").text(query.caller_function.clone())),
        );
    }
    table
}

/// Seconds as milliseconds with four fractional digits (`0.0021` → `2.1000ms`).
#[must_use]
pub fn format_elapsed_ms(seconds: f64) -> String {
    format!("{:.4}ms", seconds * 1000.0)
}

#[must_use]
pub fn build_legacy_log(model: &DiagnosticsModel) -> Element {
    Element::new("ul").children(
        model
            .legacy_log_lines()
            .iter()
            .map(|line| Element::new("li").raw(legacy_line_markup(line))),
    )
}

/// Escape a log line, then turn its newlines into explicit breaks.
///
/// The order matters: substituting first would let content smuggle markup.
#[must_use]
pub fn legacy_line_markup(line: &str) -> String {
    escape_html(line).replace('\n', "<br />\n")
}

#[must_use]
pub fn build_request(model: &DiagnosticsModel) -> Element {
    let request = model.request();
    Element::new("div")
        .text(format!("{} {}", request.method, request.url))
        .child(key_value_unit("Headers", &request.headers))
        .child(key_value_unit("Parameters", &request.params))
}

fn key_value_unit(title: &str, pairs: &OrderedPairs) -> Element {
    let table = Element::new("table")
        .child(
            Element::new("tr")
                .child(Element::new("th").text("Key"))
                .child(Element::new("th").text("Value")),
        )
        .children(pairs.iter().map(|(key, value)| {
            Element::new("tr")
                .child(Element::new("th").text(key))
                .child(Element::new("td").text(value))
        }));
    Element::new("div")
        .child(Element::new("h2").text(title))
        .child(table)
}

#[must_use]
pub fn build_includes(model: &DiagnosticsModel) -> Element {
    Element::new("table").children(model.included_resources().iter().map(|file| {
        Element::new("tr")
            .child(Element::new("td").text(file.name.clone()))
            .child(Element::new("td").class("nr").text(file.size_bytes.to_string()))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::fixtures::sample_payload_json;
    use crate::view::profile::RawTraceRenderer;

    fn model() -> DiagnosticsModel {
        DiagnosticsModel::from_value(sample_payload_json()).unwrap()
    }

    #[test]
    fn console_rows_map_kinds_and_keep_markup() {
        let table = build_console(&model());
        let rows = table.table_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Log", "<b>hello</b>", "Setup.php"]);
        assert_eq!(rows[1][0], "Warning");
        assert_eq!(rows[2][0], "Unknown");

        let html = table.to_html();
        assert!(html.contains("<td><b>hello</b></td>"));
        assert!(html.contains("class=\"mw-debug-console-trace\""));
        assert!(html.contains("width: 130px"));
    }

    #[test]
    fn query_rows_are_numbered_from_one() {
        let table = build_queries(&model());
        let rows = table.table_rows();
        assert_eq!(rows.len(), 1 + model().queries().len());
        assert_eq!(rows[0], vec!["#", "SQL", "Time", "Call"]);
        assert_eq!(rows[1].join(" | "), "1 | SELECT 1 | 2.1000ms | Foo::bar");
        assert_eq!(rows[2][0], "2");
        assert_eq!(rows[2][2], "500.0000ms");
    }

    #[test]
    fn query_sql_is_escaped() {
        let html = build_queries(&model()).to_html();
        assert!(html.contains("WHERE a &lt; 3"));
    }

    #[test]
    fn legacy_log_escapes_before_line_breaks() {
        assert_eq!(legacy_line_markup("a\nb"), "a<br />\nb");
        assert_eq!(legacy_line_markup("<i>\nx"), "&lt;i&gt;<br />\nx");

        let list = build_legacy_log(&model());
        let items = list.find_all("li");
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].to_html(), "<li>&lt;script&gt;</li>");
    }

    #[test]
    fn request_pane_keeps_header_order() {
        let pane = build_request(&model());
        let html = pane.to_html();
        assert!(html.starts_with("<div>GET /index.php?title=Main<div><h2>Headers</h2>"));
        let rows = pane.table_rows();
        assert_eq!(rows[0], vec!["Key", "Value"]);
        assert_eq!(rows[1], vec!["Host", "example.org"]);
        assert_eq!(rows[2], vec!["Accept", "text/html"]);
        assert_eq!(rows[3], vec!["Key", "Value"]);
        assert_eq!(rows[4], vec!["title", "Main"]);
    }

    #[test]
    fn includes_rows_carry_size_column() {
        let table = build_includes(&model());
        assert_eq!(
            table.table_rows()[0],
            vec!["/srv/includes/Setup.php", "2048"]
        );
        assert!(table.to_html().contains("<td class=\"nr\">512</td>"));
    }

    #[test]
    fn build_all_follows_summary_order() {
        let views = build_all(&model(), &RawTraceRenderer);
        let ids: Vec<SectionId> = views.iter().map(SectionView::id).collect();
        assert_eq!(ids, SectionId::ALL.to_vec());
        let pane = views[5].pane_element();
        assert_eq!(pane.get_attr("id"), Some("mw-debug-pane-profile"));
        assert_eq!(pane.child_elements().next().unwrap().tag(), "pre");
    }

    #[test]
    fn empty_sections_render_empty_tables() {
        let mut value = sample_payload_json();
        value["queries"] = serde_json::json!([]);
        value["log"] = serde_json::json!([]);
        let model = DiagnosticsModel::from_value(value).unwrap();
        assert_eq!(build_queries(&model).table_rows().len(), 1);
        assert!(build_console(&model).table_rows().is_empty());
    }
}
