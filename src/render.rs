//! Rendering of the visible graph, either as a static SVG image or as an interactive HTML page.
//!
//! Rendering only reads the graph. Failures to write the output propagate as
//! [`Error::Io`](crate::error::Error::Io).

use std::{
    collections::{BTreeMap, HashMap},
    f64::consts::TAU,
    fmt::Write as _,
    fs,
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::Result,
    graph::{Graph, NodeId},
};

/// Node coordinates in the unit square, `(0, 0)` being the bottom left corner.
pub type Positions = HashMap<NodeId, (f64, f64)>;

const MARGIN: f64 = 10.0;

/// Appearance of a rendered graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub node_radius: f64,
    pub node_color: String,
    pub edge_width: f64,
    pub edge_color: String,
    /// Show the interactive configuration panel (HTML only).
    pub show_buttons: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 700,
            node_radius: 2.5,
            node_color: "green".to_owned(),
            edge_width: 0.5,
            edge_color: "blue".to_owned(),
            show_buttons: false,
        }
    }
}

impl RenderOptions {
    /// Maps unit square coordinates to canvas pixels, flipping the y axis.
    fn to_canvas(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let width = f64::from(self.width) - 2.0 * MARGIN;
        let height = f64::from(self.height) - 2.0 * MARGIN;

        (MARGIN + x * width, MARGIN + (1.0 - y) * height)
    }
}

/// Resolves a position for every alive node. Nodes missing from `positions` are laid out evenly on
/// a circle, in id order.
fn layout(graph: &Graph, positions: Option<&Positions>) -> BTreeMap<NodeId, (f64, f64)> {
    let nodes = graph.alive_nodes();
    let n = nodes.len() as f64;

    nodes
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let position = positions.and_then(|p| p.get(&id)).copied().unwrap_or_else(|| {
                let angle = TAU * i as f64 / n;
                (0.5 + 0.45 * angle.cos(), 0.5 + 0.45 * angle.sin())
            });

            (id, position)
        })
        .collect()
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the visible graph as an SVG document.
///
/// # Examples
///
/// ```
/// use disnet::graph::Graph;
/// use disnet::render::{to_svg, RenderOptions};
///
/// let mut graph = Graph::new();
/// let (a, b) = (graph.add_node(), graph.add_node());
/// graph.add_edge(a, b).unwrap();
///
/// let svg = to_svg(&graph, None, &RenderOptions::default());
/// assert_eq!(svg.matches("<circle").count(), 2);
/// assert_eq!(svg.matches("<line").count(), 1);
/// ```
pub fn to_svg(graph: &Graph, positions: Option<&Positions>, options: &RenderOptions) -> String {
    let layout = layout(graph, positions);
    let mut svg = String::new();

    // Writing to a `String` can't fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = options.width,
        h = options.height,
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

    let _ = writeln!(
        svg,
        r#"<g stroke="{}" stroke-width="{}">"#,
        escape(&options.edge_color),
        options.edge_width
    );
    for edge in graph.alive_edges() {
        let (a, b) = edge.pair();
        let (x1, y1) = options.to_canvas(layout[&a]);
        let (x2, y2) = options.to_canvas(layout[&b]);
        let _ = writeln!(
            svg,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}"/>"#
        );
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(svg, r#"<g fill="{}">"#, escape(&options.node_color));
    for (id, position) in &layout {
        let (cx, cy) = options.to_canvas(*position);
        let _ = writeln!(
            svg,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{}"><title>{id}</title></circle>"#,
            options.node_radius
        );
    }
    let _ = writeln!(svg, "</g>");
    let _ = writeln!(svg, "</svg>");

    svg
}

/// Renders the visible graph as a standalone vis-network HTML page.
pub fn to_html(graph: &Graph, positions: Option<&Positions>, options: &RenderOptions) -> String {
    let layout = layout(graph, positions);

    let nodes: Vec<_> = layout
        .iter()
        .map(|(id, position)| {
            let (x, y) = options.to_canvas(*position);
            json!({ "id": id, "label": id.to_string(), "x": x, "y": y, "color": options.node_color })
        })
        .collect();
    let edges: Vec<_> = graph
        .alive_edges()
        .iter()
        .map(|edge| json!({ "from": edge.source(), "to": edge.target() }))
        .collect();
    let settings = json!({
        "physics": false,
        "edges": { "color": options.edge_color, "width": options.edge_width },
        "configure": { "enabled": options.show_buttons },
    });

    // Keep the embedded JSON from closing the script element.
    let script_safe = |value: serde_json::Value| value.to_string().replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
<style>#network {{ width: {width}px; height: {height}px; border: 1px solid lightgray; }}</style>
</head>
<body>
<div id="network"></div>
<script>
const nodes = new vis.DataSet({nodes});
const edges = new vis.DataSet({edges});
new vis.Network(document.getElementById("network"), {{ nodes, edges }}, {settings});
</script>
</body>
</html>
"#,
        title = escape(&graph.to_string()),
        width = options.width,
        height = options.height,
        nodes = script_safe(json!(nodes)),
        edges = script_safe(json!(edges)),
        settings = script_safe(settings),
    )
}

/// Writes [`to_svg`] to `path`.
pub fn render_svg(
    graph: &Graph,
    positions: Option<&Positions>,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<()> {
    fs::write(path, to_svg(graph, positions, options))?;
    Ok(())
}

/// Writes [`to_html`] to `path`.
pub fn render_html(
    graph: &Graph,
    positions: Option<&Positions>,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<()> {
    fs::write(path, to_html(graph, positions, options))?;
    Ok(())
}
