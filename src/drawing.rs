//! # Relation Drawing
//!
//! Renders a [`Relation`] as a directed graph. Nodes sit on a circle at equal
//! angles, in carrier order, starting from the top. Each pair becomes one edge:
//!
//! - a self pair `(x,x)` is a small loop on the left of its node,
//! - a pair whose reverse is also present is a quadratic Bézier bowed to one side
//!   of the straight line, so the two directions of a symmetric pair never overlap,
//! - any other pair is a straight line ending at the rim of its target.
//!
//! Every edge ends in a triangular arrowhead. Geometry is built as
//! [`kurbo::BezPath`]s, which [`RelationDrawing::to_svg`] serialises directly.
//! For Graphviz users, [`Relation::dot`] emits the same graph in DOT with
//! symmetric pairs coloured.
//!
//! Drawing only borrows the relation; layout state lives in the returned
//! [`RelationDrawing`].

use std::{
    f64::consts::{FRAC_PI_2, FRAC_PI_6, PI},
    fmt::{self, Write},
};

use indexmap::IndexMap;
use kurbo::{Arc, BezPath, Point, Shape, Vec2};
use serde::{Deserialize, Serialize};

use crate::relation::{Element, Pair, Relation};

const NODE_FILL: &str = "#6366f1";
const NODE_STROKE: &str = "#0f172a";
const NODE_TEXT: &str = "#ffffff";
const EDGE_COLOR: &str = "#64748b";
const SYMMETRIC_EDGE_COLOR: &str = "#0ea5e9";

/// Canvas and shape sizes, in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub width: f64,
    pub height: f64,
    /// Radius of the circle the nodes are placed on.
    pub radius: f64,
    pub node_radius: f64,
    /// Distance of a curved edge's control point from the straight line.
    pub curve_amount: f64,
    pub arrow_size: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        LayoutSettings {
            width: 500.,
            height: 400.,
            radius: 150.,
            node_radius: 25.,
            curve_amount: 30.,
            arrow_size: 10.,
        }
    }
}

impl LayoutSettings {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2., self.height / 2.)
    }
}

/// Equal-angle placement of the carrier on a circle.
#[derive(Debug, Clone)]
pub struct CircularLayout {
    positions: IndexMap<Element, Point>,
}

impl CircularLayout {
    pub fn new(relation: &Relation, settings: &LayoutSettings) -> Self {
        let n = relation.n_elements();
        let center = settings.center();
        let positions = relation
            .carrier()
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let angle = (i as f64 / n as f64) * 2. * PI - FRAC_PI_2;
                (element.clone(), center + unit(angle) * settings.radius)
            })
            .collect();
        CircularLayout { positions }
    }

    pub fn position(&self, element: &Element) -> Option<Point> {
        self.positions.get(element).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Element, Point)> {
        self.positions.iter().map(|(e, p)| (e, *p))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn unit(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// The shape of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeGeometry {
    /// Half circle swept clockwise from the top of `center`'s circle.
    Loop { center: Point, radius: f64 },
    Straight { from: Point, to: Point },
    Curved {
        from: Point,
        control: Point,
        to: Point,
    },
}

impl EdgeGeometry {
    pub fn path(&self) -> BezPath {
        match *self {
            EdgeGeometry::Loop { center, radius } => Arc {
                center,
                radii: Vec2::new(radius, radius),
                start_angle: -FRAC_PI_2,
                sweep_angle: PI,
                x_rotation: 0.,
            }
            .to_path(0.1),
            EdgeGeometry::Straight { from, to } => {
                let mut path = BezPath::new();
                path.move_to(from);
                path.line_to(to);
                path
            }
            EdgeGeometry::Curved { from, control, to } => {
                let mut path = BezPath::new();
                path.move_to(from);
                path.quad_to(control, to);
                path
            }
        }
    }
}

/// A filled triangle whose tip sits at `tip`, pointing along `angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub tip: Point,
    pub angle: f64,
}

impl Arrowhead {
    pub fn path(&self, size: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.tip);
        path.line_to(self.tip - unit(self.angle - FRAC_PI_6) * size);
        path.line_to(self.tip - unit(self.angle + FRAC_PI_6) * size);
        path.close_path();
        path
    }
}

#[derive(Debug, Clone)]
pub struct LayoutEdge {
    pub pair: Pair,
    /// The reverse pair is present as well.
    pub symmetric: bool,
    pub geometry: EdgeGeometry,
    pub arrow: Arrowhead,
}

impl LayoutEdge {
    fn new(pair: &Pair, symmetric: bool, from: Point, to: Point, settings: &LayoutSettings) -> Self {
        let r = settings.node_radius;

        if pair.is_loop() {
            let center = from - Vec2::new(1.5 * r, 0.);
            let radius = 0.8 * r;
            let at = FRAC_PI_2 + 0.2;
            return LayoutEdge {
                pair: pair.clone(),
                symmetric,
                geometry: EdgeGeometry::Loop { center, radius },
                arrow: Arrowhead {
                    tip: center + unit(at) * radius,
                    angle: at - FRAC_PI_2,
                },
            };
        }

        let angle = (to - from).atan2();

        if symmetric {
            // The normal flips with the direction, so `(a,b)` and `(b,a)` bow apart.
            let control = from.midpoint(to) + unit(angle - FRAC_PI_2) * settings.curve_amount;
            let tangent = (to - control).atan2();
            LayoutEdge {
                pair: pair.clone(),
                symmetric,
                geometry: EdgeGeometry::Curved { from, control, to },
                arrow: Arrowhead {
                    tip: to - unit(tangent) * r,
                    angle: tangent,
                },
            }
        } else {
            let end = to - unit(angle) * r;
            LayoutEdge {
                pair: pair.clone(),
                symmetric,
                geometry: EdgeGeometry::Straight { from, to: end },
                arrow: Arrowhead { tip: end, angle },
            }
        }
    }
}

/// A relation laid out and ready to be serialised.
#[derive(Debug, Clone)]
pub struct RelationDrawing {
    settings: LayoutSettings,
    layout: CircularLayout,
    edges: Vec<LayoutEdge>,
}

impl RelationDrawing {
    pub fn new(relation: &Relation, settings: LayoutSettings) -> Self {
        let layout = CircularLayout::new(relation, &settings);
        let edges = relation
            .iter()
            .filter_map(|pair| {
                let from = layout.position(&pair.source)?;
                let to = layout.position(&pair.target)?;
                Some(LayoutEdge::new(
                    pair,
                    relation.has_reverse(pair),
                    from,
                    to,
                    &settings,
                ))
            })
            .collect();

        RelationDrawing {
            settings,
            layout,
            edges,
        }
    }

    pub fn layout(&self) -> &CircularLayout {
        &self.layout
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn svg_serialize_fmt(&self, out: &mut impl Write) -> fmt::Result {
        let LayoutSettings {
            width,
            height,
            node_radius,
            arrow_size,
            ..
        } = self.settings;

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;

        writeln!(out, r#"  <g class="edges" fill="none" stroke-width="2">"#)?;
        for edge in &self.edges {
            let (class, color) = edge_style(edge);
            writeln!(
                out,
                r#"    <path class="{class}" stroke="{color}" d="{}"/>"#,
                edge.geometry.path().to_svg()
            )?;
        }
        writeln!(out, "  </g>")?;

        writeln!(out, r#"  <g class="arrows">"#)?;
        for edge in &self.edges {
            let (_, color) = edge_style(edge);
            writeln!(
                out,
                r#"    <path fill="{color}" d="{}"/>"#,
                edge.arrow.path(arrow_size).to_svg()
            )?;
        }
        writeln!(out, "  </g>")?;

        writeln!(
            out,
            r#"  <g class="nodes" font-family="sans-serif" font-size="16" font-weight="bold">"#
        )?;
        for (element, p) in self.layout.iter() {
            writeln!(
                out,
                r#"    <circle cx="{}" cy="{}" r="{node_radius}" fill="{NODE_FILL}" stroke="{NODE_STROKE}"/>"#,
                p.x, p.y
            )?;
            writeln!(
                out,
                r#"    <text x="{}" y="{}" fill="{NODE_TEXT}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                p.x,
                p.y,
                xml_escape(element.as_str())
            )?;
        }
        writeln!(out, "  </g>")?;

        writeln!(out, "</svg>")
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.svg_serialize_fmt(&mut out);
        out
    }
}

fn edge_style(edge: &LayoutEdge) -> (&'static str, &'static str) {
    if edge.symmetric && !edge.pair.is_loop() {
        ("edge symmetric", SYMMETRIC_EDGE_COLOR)
    } else {
        ("edge", EDGE_COLOR)
    }
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

impl Relation {
    pub fn dot_serialize_fmt(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "digraph {{")?;
        for element in self.carrier() {
            writeln!(out, "  {:?};", element.as_str())?;
        }
        for pair in self {
            write!(
                out,
                "  {:?} -> {:?}",
                pair.source.as_str(),
                pair.target.as_str()
            )?;
            if !pair.is_loop() && self.has_reverse(pair) {
                write!(out, " [color={SYMMETRIC_EDGE_COLOR:?}]")?;
            }
            writeln!(out, ";")?;
        }
        writeln!(out, "}}")
    }

    pub fn dot(&self) -> String {
        let mut out = String::new();
        let _ = self.dot_serialize_fmt(&mut out);
        out
    }

    pub fn draw(&self, settings: LayoutSettings) -> RelationDrawing {
        RelationDrawing::new(self, settings)
    }
}
