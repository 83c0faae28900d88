//! Glyph canvas rendering
//!
//! Draws a laid-out flowchart into a grid of cells and converts the grid
//! into [`Markup`]: plain text spans tagged with a semantic [`Role`].
//! Line cells carry connection bits so crossing and merging edges produce
//! proper junction glyphs.

use super::error::{DiagramError, DiagramResult};
use super::layout::{layout_flowchart, CellRect, DiagramLayout};
use super::parser::{Flowchart, NodeShape, Stroke};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

/// Largest canvas the engine will draw
pub const MAX_CANVAS_WIDTH: usize = 400;
pub const MAX_CANVAS_HEIGHT: usize = 300;

const UP: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const DOWN: u8 = 0b0100;
const LEFT: u8 = 0b1000;

/// Glyph set used for borders, edges and arrowheads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphMode {
    #[default]
    Unicode,
    Ascii,
}

/// Semantic role of a run of characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Blank,
    Cluster,
    ClusterTitle,
    Edge,
    Arrow,
    EdgeLabel,
    NodeBorder,
    NodeLabel,
    Emphasis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSpan {
    pub text: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupLine {
    pub spans: Vec<MarkupSpan>,
}

impl MarkupLine {
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Rendered diagram, ready to be styled by the view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub theme: Theme,
    pub width: usize,
    pub lines: Vec<MarkupLine>,
}

impl Markup {
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.spans.is_empty())
    }

    /// Markup without roles, one line per row
    #[cfg(test)]
    pub fn to_plain(&self) -> String {
        self.lines
            .iter()
            .map(MarkupLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Glyph palette
// ═══════════════════════════════════════════════════════════════════════════════

struct BoxGlyphs {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    top: char,
    bottom: char,
    left: char,
    right: char,
}

/// Character set selected by [`GlyphMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPalette {
    mode: GlyphMode,
}

impl GlyphPalette {
    pub fn new(mode: GlyphMode) -> Self {
        Self { mode }
    }

    /// Line glyph for a set of connection bits
    fn line(&self, bits: u8, stroke: Stroke) -> char {
        let vertical = bits & (UP | DOWN) != 0;
        let horizontal = bits & (LEFT | RIGHT) != 0;

        if self.mode == GlyphMode::Ascii {
            return match (vertical, horizontal) {
                (true, true) => '+',
                (true, false) => match stroke {
                    Stroke::Dotted => ':',
                    _ => '|',
                },
                _ => match stroke {
                    Stroke::Dotted => '.',
                    Stroke::Thick => '=',
                    Stroke::Solid => '-',
                },
            };
        }

        let thick = stroke == Stroke::Thick;
        match bits {
            b if b == UP | DOWN || b == UP || b == DOWN => match stroke {
                Stroke::Solid => '│',
                Stroke::Dotted => '┆',
                Stroke::Thick => '┃',
            },
            b if b == LEFT | RIGHT || b == LEFT || b == RIGHT || b == 0 => match stroke {
                Stroke::Solid => '─',
                Stroke::Dotted => '┄',
                Stroke::Thick => '━',
            },
            b if b == RIGHT | DOWN => pick(thick, '┏', '┌'),
            b if b == LEFT | DOWN => pick(thick, '┓', '┐'),
            b if b == UP | RIGHT => pick(thick, '┗', '└'),
            b if b == UP | LEFT => pick(thick, '┛', '┘'),
            b if b == UP | DOWN | RIGHT => pick(thick, '┣', '├'),
            b if b == UP | DOWN | LEFT => pick(thick, '┫', '┤'),
            b if b == LEFT | RIGHT | DOWN => pick(thick, '┳', '┬'),
            b if b == LEFT | RIGHT | UP => pick(thick, '┻', '┴'),
            _ => pick(thick, '╋', '┼'),
        }
    }

    fn arrow(&self, towards: u8) -> char {
        match (self.mode, towards) {
            (GlyphMode::Unicode, DOWN) => '▼',
            (GlyphMode::Unicode, UP) => '▲',
            (GlyphMode::Unicode, RIGHT) => '▶',
            (GlyphMode::Unicode, _) => '◀',
            (GlyphMode::Ascii, DOWN) => 'v',
            (GlyphMode::Ascii, UP) => '^',
            (GlyphMode::Ascii, RIGHT) => '>',
            (GlyphMode::Ascii, _) => '<',
        }
    }

    fn shape(&self, shape: NodeShape) -> BoxGlyphs {
        let ascii = self.mode == GlyphMode::Ascii;
        let (tl, tr, bl, br) = match shape {
            NodeShape::Rect => {
                if ascii {
                    ('+', '+', '+', '+')
                } else {
                    ('┌', '┐', '└', '┘')
                }
            }
            NodeShape::Round | NodeShape::Stadium | NodeShape::Circle | NodeShape::Cylinder => {
                if ascii {
                    ('.', '.', '\'', '\'')
                } else {
                    ('╭', '╮', '╰', '╯')
                }
            }
            NodeShape::Diamond | NodeShape::Hexagon => {
                if ascii {
                    ('/', '\\', '\\', '/')
                } else {
                    ('╱', '╲', '╲', '╱')
                }
            }
        };
        let (left, right) = match shape {
            NodeShape::Stadium | NodeShape::Circle => ('(', ')'),
            NodeShape::Hexagon => ('<', '>'),
            _ => pick(ascii, ('|', '|'), ('│', '│')),
        };
        let top = match shape {
            NodeShape::Cylinder => pick(ascii, '=', '═'),
            _ => pick(ascii, '-', '─'),
        };
        BoxGlyphs {
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
            bottom_right: br,
            top,
            bottom: pick(ascii, '-', '─'),
            left,
            right,
        }
    }

    /// Tee replacing a border cell where an edge leaves a box
    fn attach(&self, border: char, side: u8) -> char {
        if self.mode == GlyphMode::Ascii {
            return '+';
        }
        match (border, side) {
            ('─', DOWN) => '┬',
            ('─', UP) => '┴',
            ('│', RIGHT) => '├',
            ('│', LEFT) => '┤',
            (other, _) => other,
        }
    }
}

fn pick<T>(first: bool, a: T, b: T) -> T {
    if first {
        a
    } else {
        b
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Canvas
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
enum Glyph {
    Char(char),
    /// Line cell resolved from connection bits at output time
    Line(u8, Stroke),
    /// Right half of a double-width character
    Continuation,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    glyph: Glyph,
    role: Role,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Char(' '),
    role: Role::Blank,
};

struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    fn set(&mut self, x: usize, y: usize, glyph: Glyph, role: Role) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell { glyph, role };
        }
    }

    fn put_char(&mut self, x: usize, y: usize, ch: char, role: Role) {
        self.set(x, y, Glyph::Char(ch), role);
    }

    /// Write text left to right, returning the width consumed
    fn put_text(&mut self, x: usize, y: usize, text: &str, role: Role) -> usize {
        let mut cx = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            self.put_char(cx, y, ch, role);
            if w == 2 {
                self.set(cx + 1, y, Glyph::Continuation, role);
            }
            cx += w;
        }
        cx - x
    }

    /// Merge connection bits into a line cell
    fn add_bits(&mut self, x: usize, y: usize, bits: u8, stroke: Stroke) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cell = &mut self.cells[y * self.width + x];
        cell.glyph = match cell.glyph {
            Glyph::Line(existing, existing_stroke) => {
                let stroke = if existing_stroke == Stroke::Solid {
                    stroke
                } else {
                    existing_stroke
                };
                Glyph::Line(existing | bits, stroke)
            }
            _ => Glyph::Line(bits, stroke),
        };
        cell.role = Role::Edge;
    }

    fn into_markup(self, palette: &GlyphPalette, theme: Theme) -> Markup {
        let mut lines = Vec::with_capacity(self.height);
        let mut width = 0;

        for y in 0..self.height {
            let row = &self.cells[y * self.width..(y + 1) * self.width];
            let used = row
                .iter()
                .rposition(|c| c.glyph != Glyph::Char(' ') || c.role != Role::Blank)
                .map_or(0, |p| p + 1);
            width = width.max(used);

            let mut spans: Vec<MarkupSpan> = Vec::new();
            for cell in &row[..used] {
                let ch = match cell.glyph {
                    Glyph::Char(ch) => ch,
                    Glyph::Line(bits, stroke) => palette.line(bits, stroke),
                    Glyph::Continuation => continue,
                };
                match spans.last_mut() {
                    Some(last) if last.role == cell.role => last.text.push(ch),
                    _ => spans.push(MarkupSpan {
                        text: ch.to_string(),
                        role: cell.role,
                    }),
                }
            }
            lines.push(MarkupLine { spans });
        }

        Markup {
            theme,
            width,
            lines,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Drawing
// ═══════════════════════════════════════════════════════════════════════════════

/// Lay out and draw a flowchart
pub fn render_flowchart(
    chart: &Flowchart,
    palette: &GlyphPalette,
    theme: Theme,
) -> DiagramResult<Markup> {
    let layout = layout_flowchart(chart);
    if layout.width > MAX_CANVAS_WIDTH || layout.height > MAX_CANVAS_HEIGHT {
        return Err(DiagramError::TooLarge {
            width: layout.width,
            height: layout.height,
        });
    }

    let mut canvas = Canvas::new(layout.width, layout.height);

    draw_clusters(&mut canvas, chart, &layout, palette);
    for route in &layout.routes {
        draw_route(&mut canvas, &route.points, chart.edges[route.edge].stroke);
    }
    for (idx, node) in chart.nodes.iter().enumerate() {
        draw_node(&mut canvas, &layout.boxes[idx], node.shape, &node.label, node.emphasized, palette);
    }
    for route in &layout.routes {
        let edge = &chart.edges[route.edge];
        attach_source(&mut canvas, &route.points, &layout.boxes[edge.from], palette);
        if edge.arrow {
            draw_arrowhead(&mut canvas, &route.points, palette);
        }
        if let (Some((x, y)), Some(text)) = (route.label, edge.label.as_deref()) {
            canvas.put_text(x, y, text, Role::EdgeLabel);
        }
    }

    Ok(canvas.into_markup(palette, theme))
}

fn draw_clusters(
    canvas: &mut Canvas,
    chart: &Flowchart,
    layout: &DiagramLayout,
    palette: &GlyphPalette,
) {
    for frame in &layout.clusters {
        let rect = frame.rect;
        if rect.width < 2 || rect.height < 2 {
            continue;
        }
        let glyphs = palette.shape(NodeShape::Rect);
        draw_border(canvas, &rect, &glyphs, Role::Cluster);

        let title = &chart.subgraphs[frame.subgraph].title;
        if !title.is_empty() {
            canvas.put_char(rect.x + 1, rect.y, ' ', Role::Cluster);
            let used = canvas.put_text(rect.x + 2, rect.y, title, Role::ClusterTitle);
            canvas.put_char(rect.x + 2 + used, rect.y, ' ', Role::Cluster);
        }
    }
}

fn draw_border(canvas: &mut Canvas, rect: &CellRect, glyphs: &BoxGlyphs, role: Role) {
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;

    for x in rect.x + 1..right {
        canvas.put_char(x, rect.y, glyphs.top, role);
        canvas.put_char(x, bottom, glyphs.bottom, role);
    }
    for y in rect.y + 1..bottom {
        canvas.put_char(rect.x, y, glyphs.left, role);
        canvas.put_char(right, y, glyphs.right, role);
    }
    canvas.put_char(rect.x, rect.y, glyphs.top_left, role);
    canvas.put_char(right, rect.y, glyphs.top_right, role);
    canvas.put_char(rect.x, bottom, glyphs.bottom_left, role);
    canvas.put_char(right, bottom, glyphs.bottom_right, role);
}

fn draw_node(
    canvas: &mut Canvas,
    rect: &CellRect,
    shape: NodeShape,
    label: &[String],
    emphasized: bool,
    palette: &GlyphPalette,
) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }

    // Clear the interior so edges pass behind the node
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            canvas.put_char(x, y, ' ', Role::NodeLabel);
        }
    }

    let border_role = if emphasized {
        Role::Emphasis
    } else {
        Role::NodeBorder
    };
    draw_border(canvas, rect, &palette.shape(shape), border_role);

    let inner = rect.width - 2;
    for (i, line) in label.iter().enumerate() {
        let line_width = unicode_width::UnicodeWidthStr::width(line.as_str());
        let offset = inner.saturating_sub(line_width) / 2;
        canvas.put_text(rect.x + 1 + offset, rect.y + 1 + i, line, Role::NodeLabel);
    }
}

/// Unit step from `a` towards `b` on a shared row or column
fn direction(a: (usize, usize), b: (usize, usize)) -> Option<u8> {
    match (a.0.cmp(&b.0), a.1.cmp(&b.1)) {
        (std::cmp::Ordering::Less, _) => Some(RIGHT),
        (std::cmp::Ordering::Greater, _) => Some(LEFT),
        (_, std::cmp::Ordering::Less) => Some(DOWN),
        (_, std::cmp::Ordering::Greater) => Some(UP),
        _ => None,
    }
}

fn opposite(dir: u8) -> u8 {
    match dir {
        UP => DOWN,
        DOWN => UP,
        LEFT => RIGHT,
        _ => LEFT,
    }
}

fn step(point: (usize, usize), dir: u8) -> (usize, usize) {
    match dir {
        UP => (point.0, point.1.saturating_sub(1)),
        DOWN => (point.0, point.1 + 1),
        LEFT => (point.0.saturating_sub(1), point.1),
        _ => (point.0 + 1, point.1),
    }
}

fn draw_route(canvas: &mut Canvas, points: &[(usize, usize)], stroke: Stroke) {
    let Some(&start) = points.first() else {
        return;
    };

    // Stub towards the source box so the first cell reads as connected
    if let Some(first_dir) = points.windows(2).find_map(|w| direction(w[0], w[1])) {
        canvas.add_bits(start.0, start.1, opposite(first_dir), stroke);
    } else {
        canvas.add_bits(start.0, start.1, 0, stroke);
    }

    for pair in points.windows(2) {
        let (mut current, target) = (pair[0], pair[1]);
        while let Some(dir) = direction(current, target) {
            let next = step(current, dir);
            canvas.add_bits(current.0, current.1, dir, stroke);
            canvas.add_bits(next.0, next.1, opposite(dir), stroke);
            current = next;
        }
    }

    // Stub into the destination box
    if let (Some(&end), Some(last_dir)) = (
        points.last(),
        points.windows(2).rev().find_map(|w| direction(w[0], w[1])),
    ) {
        canvas.add_bits(end.0, end.1, last_dir, stroke);
    }
}

fn draw_arrowhead(canvas: &mut Canvas, points: &[(usize, usize)], palette: &GlyphPalette) {
    let (Some(&end), Some(dir)) = (
        points.last(),
        points.windows(2).rev().find_map(|w| direction(w[0], w[1])),
    ) else {
        return;
    };
    canvas.put_char(end.0, end.1, palette.arrow(dir), Role::Arrow);
}

/// Turn the border cell the edge leaves from into a tee
fn attach_source(
    canvas: &mut Canvas,
    points: &[(usize, usize)],
    source: &CellRect,
    palette: &GlyphPalette,
) {
    let (Some(&start), Some(dir)) = (
        points.first(),
        points.windows(2).find_map(|w| direction(w[0], w[1])),
    ) else {
        return;
    };
    let toward_box = opposite(dir);
    let border = step(start, toward_box);
    let inside = border.0 >= source.x
        && border.0 < source.right()
        && border.1 >= source.y
        && border.1 < source.bottom();
    if !inside {
        return;
    }
    if let Some(&Cell {
        glyph: Glyph::Char(ch),
        role,
    }) = canvas.get(border.0, border.1)
    {
        if matches!(role, Role::NodeBorder | Role::Emphasis) {
            canvas.put_char(border.0, border.1, palette.attach(ch, dir), role);
        }
    }
}
