// src/visual/palette.rs
//! The one kind -> color table used by nodes, edges and the SVG renderer.

use crate::model::{ElementKind, FlowKind};

/// Anything that gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKind {
    Element(ElementKind),
    Flow(FlowKind),
}

pub const FALLBACK_COLOR: &str = "#6c757d";

const PALETTE: &[(DisplayKind, &str)] = &[
    (DisplayKind::Element(ElementKind::StartEvent), "#28a745"),
    (DisplayKind::Element(ElementKind::EndEvent), "#dc3545"),
    (DisplayKind::Element(ElementKind::ServiceTask), "#007bff"),
    (DisplayKind::Element(ElementKind::UserTask), "#6f42c1"),
    (DisplayKind::Element(ElementKind::ExclusiveGateway), "#fd7e14"),
    (DisplayKind::Element(ElementKind::ParallelGateway), "#20c997"),
    (DisplayKind::Flow(FlowKind::Sequence), FALLBACK_COLOR),
];

#[must_use]
pub fn color_of(kind: DisplayKind) -> &'static str {
    PALETTE
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(FALLBACK_COLOR, |(_, color)| color)
}

#[must_use]
pub fn element_color(kind: ElementKind) -> &'static str {
    color_of(DisplayKind::Element(kind))
}

#[must_use]
pub fn flow_color(kind: FlowKind) -> &'static str {
    color_of(DisplayKind::Flow(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_and_fallback_colors() {
        assert_eq!(element_color(ElementKind::StartEvent), "#28a745");
        assert_eq!(element_color(ElementKind::ParallelGateway), "#20c997");
        assert_eq!(element_color(ElementKind::ScriptTask), FALLBACK_COLOR);
        assert_eq!(flow_color(FlowKind::Sequence), "#6c757d");
    }
}
