//! Summary bar assembly: one trigger per section plus environment bits.

use crate::core::config::SummaryConfig;
use crate::diagnostics::{DiagnosticsModel, Environment};
use crate::section::{ID_PREFIX, SectionId};
use crate::view::markup::Element;
use crate::view::sections::SectionView;

/// Trigger text, with the count appended only when it is non-zero.
#[must_use]
pub fn trigger_label(id: SectionId, count: Option<usize>) -> String {
    match count {
        Some(n) if n > 0 => format!("{} ({n})", id.label()),
        _ => id.label().to_string(),
    }
}

/// Build the always-visible strip of triggers and environment fields.
#[must_use]
pub fn build_summary_bar(model: &DiagnosticsModel, config: &SummaryConfig) -> Element {
    Element::new("div")
        .class("mw-debug-bits")
        .children(
            SectionId::ALL
                .into_iter()
                .map(|id| trigger_bit(id, model.section_count(id))),
        )
        .children(environment_bits(model.environment(), config))
}

fn trigger_bit(id: SectionId, count: Option<usize>) -> Element {
    Element::new("div")
        .id(id.trigger_element_id())
        .class("mw-debug-bit mw-debug-panelink")
        .child(
            Element::new("a")
                .class("mw-debug-panelabel")
                .attr("href", format!("#{}", id.pane_element_id()))
                .text(trigger_label(id, count)),
        )
}

fn bit(name: &str) -> Element {
    Element::new("div")
        .id(format!("{ID_PREFIX}{name}"))
        .class("mw-debug-bit")
}

fn environment_bits(env: &Environment, config: &SummaryConfig) -> Vec<Element> {
    let mut bits = Vec::with_capacity(5);

    let mut version = bit("mwversion")
        .child(
            Element::new("a")
                .attr("href", config.product_url.clone())
                .text(config.product_name.clone()),
        )
        .text(format!(": {} ", env.product_version));
    if let Some(revision) = &env.vcs_revision {
        let short: String = revision.chars().take(config.revision_abbrev_len).collect();
        let label = format!("({short})");
        version = match &env.vcs_view_url {
            Some(url) => version.child(Element::new("a").attr("href", url.clone()).text(label)),
            None => version.text(label),
        };
    }
    bits.push(version);

    if let Some(branch) = &env.vcs_branch {
        bits.push(bit("gitbranch").text(format!("Git branch: {branch}")));
    }

    let (engine_label, engine_url) = if env.runtime_engine == config.alternate_engine {
        (&config.alternate_engine, &config.alternate_engine_url)
    } else {
        (&config.default_engine, &config.default_engine_url)
    };
    bits.push(
        bit("phpversion")
            .child(
                Element::new("a")
                    .attr("href", engine_url.clone())
                    .text(engine_label.clone()),
            )
            .text(format!(": {}", env.runtime_version)),
    );

    bits.push(bit("time").text(format!("Time: {:.5}", env.wall_time_seconds)));
    bits.push(bit("memory").text(format!(
        "Memory: {} (Peak: {})",
        env.memory_bytes, env.peak_memory_bytes
    )));
    bits
}

/// The toolbar root: summary bar followed by every pane container.
#[must_use]
pub fn build_root(summary: Element, views: &[SectionView]) -> Element {
    Element::new("div")
        .id("mw-debug-toolbar")
        .class("mw-debug")
        .attr("lang", "en")
        .attr("dir", "ltr")
        .child(summary)
        .children(views.iter().map(SectionView::pane_element))
}
