//! Flowchart source parser
//!
//! Turns the textual flowchart syntax into a [`Flowchart`]. The accepted
//! language is the common subset of Mermaid flowcharts used by the lesson
//! content: a `flowchart`/`graph` header, node declarations with shapes,
//! link chains, subgraphs and style directives.

use super::error::{DiagramError, DiagramResult};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// `subgraph id[Title]` or `subgraph id["Title"]`
static SUBGRAPH_WITH_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([A-Za-z0-9_]+)\s*\[\s*"?([^"\]]*)"?\s*\]$"#).unwrap()
});

/// A bare node identifier
static NODE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

// ═══════════════════════════════════════════════════════════════════════════════
// Flowchart IR
// ═══════════════════════════════════════════════════════════════════════════════

/// Flow direction declared in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    #[default]
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
}

impl FlowDirection {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "TB" | "TD" => Some(FlowDirection::TopBottom),
            "BT" => Some(FlowDirection::BottomTop),
            "LR" => Some(FlowDirection::LeftRight),
            "RL" => Some(FlowDirection::RightLeft),
            _ => None,
        }
    }

    /// Whether ranks advance horizontally
    pub fn is_horizontal(self) -> bool {
        matches!(self, FlowDirection::LeftRight | FlowDirection::RightLeft)
    }
}

/// Node outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Rect,
    Round,
    Stadium,
    Cylinder,
    Circle,
    Diamond,
    Hexagon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode {
    pub id: String,
    /// Label split into display lines
    pub label: Vec<String>,
    pub shape: NodeShape,
    /// Targeted by a `style` or `class` directive
    pub emphasized: bool,
    /// Innermost subgraph the node was first declared in
    pub subgraph: Option<usize>,
}

/// Line style of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dotted,
    Thick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub stroke: Stroke,
    /// Whether the link ends in an arrowhead
    pub arrow: bool,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    pub id: String,
    pub title: String,
    pub parent: Option<usize>,
}

/// Parsed flowchart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flowchart {
    pub direction: FlowDirection,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub subgraphs: Vec<Subgraph>,
    node_index: HashMap<String, usize>,
}

impl Flowchart {
    /// Look up a node by identifier
    #[cfg(test)]
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Subgraph chain from the node's innermost subgraph outwards
    pub fn subgraph_chain(&self, node: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = self.nodes[node].subgraph;
        while let Some(idx) = current {
            chain.push(idx);
            current = self.subgraphs[idx].parent;
        }
        chain
    }

    fn ensure_node(&mut self, id: &str, subgraph: Option<usize>) -> usize {
        if let Some(&idx) = self.node_index.get(id) {
            if self.nodes[idx].subgraph.is_none() {
                self.nodes[idx].subgraph = subgraph;
            }
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(FlowNode {
            id: id.to_string(),
            label: vec![id.to_string()],
            shape: NodeShape::Rect,
            emphasized: false,
            subgraph,
        });
        self.node_index.insert(id.to_string(), idx);
        idx
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Parser
// ═══════════════════════════════════════════════════════════════════════════════

/// Parse flowchart source into its IR
pub fn parse_flowchart(source: &str) -> DiagramResult<Flowchart> {
    let statements = split_statements(source);
    let Some(((header_line, header), rest)) = statements.split_first() else {
        return Err(DiagramError::Empty);
    };

    let mut chart = Flowchart {
        direction: parse_header(*header_line, header)?,
        ..Flowchart::default()
    };

    // (subgraph index, line it was opened on)
    let mut open_subgraphs: Vec<(usize, usize)> = Vec::new();
    // Style targets may name nodes declared further down
    let mut pending_emphasis: Vec<(usize, String)> = Vec::new();

    for (line, statement) in rest {
        let line = *line;
        let (keyword, args) = match statement.split_once(char::is_whitespace) {
            Some((keyword, args)) => (keyword, args.trim()),
            None => (statement.as_str(), ""),
        };

        match keyword {
            "subgraph" => {
                let (id, title) = parse_subgraph_header(line, args)?;
                let parent = open_subgraphs.last().map(|(idx, _)| *idx);
                chart.subgraphs.push(Subgraph { id, title, parent });
                open_subgraphs.push((chart.subgraphs.len() - 1, line));
            }
            "end" if args.is_empty() => {
                if open_subgraphs.pop().is_none() {
                    return Err(DiagramError::syntax(line, "'end' without an open subgraph"));
                }
            }
            "style" => {
                let target = args.split_whitespace().next().ok_or_else(|| {
                    DiagramError::syntax(line, "'style' needs a target node")
                })?;
                pending_emphasis.extend(split_targets(line, target)?);
            }
            "class" => {
                let mut parts = args.split_whitespace();
                let (Some(targets), Some(_class_name)) = (parts.next(), parts.next()) else {
                    return Err(DiagramError::syntax(
                        line,
                        "'class' needs target nodes and a class name",
                    ));
                };
                pending_emphasis.extend(split_targets(line, targets)?);
            }
            "classDef" => {
                if args.is_empty() {
                    return Err(DiagramError::syntax(line, "'classDef' needs a class name"));
                }
            }
            "linkStyle" | "click" | "direction" => {}
            _ => {
                let subgraph = open_subgraphs.last().map(|(idx, _)| *idx);
                ChainParser::new(line, statement, &mut chart, subgraph).parse()?;
            }
        }
    }

    if let Some(&(idx, line)) = open_subgraphs.last() {
        return Err(DiagramError::UnclosedSubgraph {
            line,
            name: chart.subgraphs[idx].title.clone(),
        });
    }

    for (line, target) in pending_emphasis {
        let Some(&idx) = chart.node_index.get(&target) else {
            return Err(DiagramError::syntax(
                line,
                format!("style directive targets unknown node '{}'", target),
            ));
        };
        chart.nodes[idx].emphasized = true;
    }

    if chart.nodes.is_empty() {
        return Err(DiagramError::syntax(*header_line, "flowchart declares no nodes"));
    }

    Ok(chart)
}

fn parse_header(line: usize, header: &str) -> DiagramResult<FlowDirection> {
    let mut words = header.split_whitespace();
    let kind = words.next().unwrap_or_default();
    if kind != "flowchart" && kind != "graph" {
        return Err(DiagramError::UnknownDiagramType {
            found: kind.to_string(),
        });
    }

    let direction = match words.next() {
        Some(token) => FlowDirection::parse(token).ok_or_else(|| {
            DiagramError::syntax(line, format!("unknown direction '{}'", token))
        })?,
        None => FlowDirection::default(),
    };

    if let Some(extra) = words.next() {
        return Err(DiagramError::syntax(
            line,
            format!("unexpected '{}' after diagram header", extra),
        ));
    }
    Ok(direction)
}

fn parse_subgraph_header(line: usize, args: &str) -> DiagramResult<(String, String)> {
    if args.is_empty() {
        return Err(DiagramError::syntax(line, "'subgraph' needs a name"));
    }
    if let Some(caps) = SUBGRAPH_WITH_TITLE.captures(args) {
        return Ok((caps[1].to_string(), caps[2].trim().to_string()));
    }
    let title = args.trim_matches('"').to_string();
    Ok((title.clone(), title))
}

fn split_targets(line: usize, targets: &str) -> DiagramResult<Vec<(usize, String)>> {
    targets
        .split(',')
        .map(|target| {
            let target = target.trim();
            if NODE_ID.is_match(target) {
                Ok((line, target.to_string()))
            } else {
                Err(DiagramError::syntax(
                    line,
                    format!("invalid style target '{}'", target),
                ))
            }
        })
        .collect()
}

/// Split source into trimmed statements tagged with their 1-based line
///
/// Statements end at a newline or at a `;` outside labels. Comments (`%%`)
/// and blank statements are dropped.
fn split_statements(source: &str) -> Vec<(usize, String)> {
    let mut statements = Vec::new();

    for (idx, raw_line) in source.lines().enumerate() {
        let line = idx + 1;
        let mut current = String::new();
        let mut depth = 0usize;
        let mut in_quote = false;

        for ch in raw_line.chars() {
            match ch {
                '"' => in_quote = !in_quote,
                '[' | '(' | '{' if !in_quote => depth += 1,
                ']' | ')' | '}' if !in_quote => depth = depth.saturating_sub(1),
                ';' if !in_quote && depth == 0 => {
                    push_statement(&mut statements, line, &current);
                    current.clear();
                    continue;
                }
                _ => {}
            }
            current.push(ch);
        }
        push_statement(&mut statements, line, &current);
    }

    statements
}

fn push_statement(statements: &mut Vec<(usize, String)>, line: usize, text: &str) {
    let text = text.trim();
    if !text.is_empty() && !text.starts_with("%%") {
        statements.push((line, text.to_string()));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chain statements: A[x] --> B & C -.->|label| D
// ─────────────────────────────────────────────────────────────────────────────

struct Link {
    stroke: Stroke,
    arrow: bool,
    label: Option<String>,
    text: String,
}

struct ChainParser<'a> {
    line: usize,
    chars: Vec<char>,
    pos: usize,
    chart: &'a mut Flowchart,
    subgraph: Option<usize>,
}

impl<'a> ChainParser<'a> {
    fn new(line: usize, statement: &str, chart: &'a mut Flowchart, subgraph: Option<usize>) -> Self {
        Self {
            line,
            chars: statement.chars().collect(),
            pos: 0,
            chart,
            subgraph,
        }
    }

    fn parse(mut self) -> DiagramResult<()> {
        let mut previous = self.parse_group()?;

        loop {
            self.skip_whitespace();
            if self.at_end() {
                return Ok(());
            }

            let link = self.parse_link()?;
            self.skip_whitespace();
            if self.at_end() {
                return Err(DiagramError::syntax(
                    self.line,
                    format!("expected node after link '{}'", link.text),
                ));
            }

            let next = self.parse_group()?;
            for &from in &previous {
                for &to in &next {
                    self.chart.edges.push(FlowEdge {
                        from,
                        to,
                        stroke: link.stroke,
                        arrow: link.arrow,
                        label: link.label.clone(),
                    });
                }
            }
            previous = next;
        }
    }

    /// One or more node references joined by `&`
    fn parse_group(&mut self) -> DiagramResult<Vec<usize>> {
        let mut group = vec![self.parse_node()?];
        loop {
            let checkpoint = self.pos;
            self.skip_whitespace();
            if self.peek() == Some('&') {
                self.pos += 1;
                self.skip_whitespace();
                group.push(self.parse_node()?);
            } else {
                self.pos = checkpoint;
                return Ok(group);
            }
        }
    }

    fn parse_node(&mut self) -> DiagramResult<usize> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }

        if self.pos == start {
            let found = self.rest();
            return Err(DiagramError::syntax(
                self.line,
                if found.is_empty() {
                    "expected node identifier".to_string()
                } else {
                    format!("expected node identifier, found '{}'", found)
                },
            ));
        }

        let id: String = self.chars[start..self.pos].iter().collect();
        let idx = self.chart.ensure_node(&id, self.subgraph);

        if let Some((shape, closer)) = self.shape_opener() {
            let label = self.read_label(&id, closer)?;
            let node = &mut self.chart.nodes[idx];
            node.shape = shape;
            node.label = split_label(&label, &id);
        }

        Ok(idx)
    }

    /// Consume a shape opener and return the shape with its closing delimiter
    fn shape_opener(&mut self) -> Option<(NodeShape, &'static str)> {
        const OPENERS: &[(&str, NodeShape, &str)] = &[
            ("([", NodeShape::Stadium, "])"),
            ("[(", NodeShape::Cylinder, ")]"),
            ("((", NodeShape::Circle, "))"),
            ("{{", NodeShape::Hexagon, "}}"),
            ("[", NodeShape::Rect, "]"),
            ("(", NodeShape::Round, ")"),
            ("{", NodeShape::Diamond, "}"),
            (">", NodeShape::Rect, "]"),
        ];

        for (opener, shape, closer) in OPENERS {
            if self.starts_with(opener) {
                self.pos += opener.chars().count();
                return Some((*shape, closer));
            }
        }
        None
    }

    fn read_label(&mut self, id: &str, closer: &str) -> DiagramResult<String> {
        let line = self.line;
        let unterminated = || {
            DiagramError::syntax(
                line,
                format!("unterminated label for node '{}' (missing '{}')", id, closer),
            )
        };

        if self.peek() == Some('"') {
            self.pos += 1;
            let start = self.pos;
            while self.peek().is_some_and(|c| c != '"') {
                self.pos += 1;
            }
            if self.at_end() {
                return Err(unterminated());
            }
            let label: String = self.chars[start..self.pos].iter().collect();
            self.pos += 1;
            if !self.starts_with(closer) {
                return Err(unterminated());
            }
            self.pos += closer.chars().count();
            return Ok(label);
        }

        let start = self.pos;
        while !self.at_end() && !self.starts_with(closer) {
            self.pos += 1;
        }
        if self.at_end() {
            return Err(unterminated());
        }
        let label: String = self.chars[start..self.pos].iter().collect();
        self.pos += closer.chars().count();
        Ok(label)
    }

    fn parse_link(&mut self) -> DiagramResult<Link> {
        let start = self.pos;
        let mut link = match self.peek() {
            Some('-') if self.peek_at(1) == Some('.') => self.parse_dotted_link()?,
            Some('-') => self.parse_run_link('-', Stroke::Solid)?,
            Some('=') => self.parse_run_link('=', Stroke::Thick)?,
            _ => {
                return Err(DiagramError::syntax(
                    self.line,
                    format!("expected link or end of statement, found '{}'", self.rest()),
                ))
            }
        };
        link.text = self.chars[start..self.pos].iter().collect();

        self.skip_whitespace();
        if self.peek() == Some('|') {
            self.pos += 1;
            let label_start = self.pos;
            while self.peek().is_some_and(|c| c != '|') {
                self.pos += 1;
            }
            if self.at_end() {
                return Err(DiagramError::syntax(self.line, "unterminated edge label '|'"));
            }
            let label: String = self.chars[label_start..self.pos].iter().collect();
            self.pos += 1;
            link.label = clean_edge_label(&label);
        }

        Ok(link)
    }

    /// `-->`, `---`, `==>`, `===` and the inline label forms `-- text -->`
    fn parse_run_link(&mut self, ch: char, stroke: Stroke) -> DiagramResult<Link> {
        let run = self.count_run(ch);
        if run < 2 {
            return Err(DiagramError::syntax(
                self.line,
                format!("incomplete link '{}'", self.rest()),
            ));
        }
        self.pos += run;

        if self.peek() == Some('>') {
            self.pos += 1;
            return Ok(Link { stroke, arrow: true, label: None, text: String::new() });
        }
        if run >= 3 {
            return Ok(Link { stroke, arrow: false, label: None, text: String::new() });
        }

        // `-- text -->`: the label runs up to the closing link
        let arrow_close: String = [ch, ch, '>'].iter().collect();
        let open_close: String = [ch, ch, ch].iter().collect();
        let label_start = self.pos;
        while !self.at_end() && !self.starts_with(&arrow_close) && !self.starts_with(&open_close) {
            self.pos += 1;
        }
        if self.at_end() {
            return Err(DiagramError::syntax(
                self.line,
                format!("unterminated link label after '{}{}'", ch, ch),
            ));
        }
        let label: String = self.chars[label_start..self.pos].iter().collect();
        let arrow = self.starts_with(&arrow_close);
        self.pos += 3;
        Ok(Link {
            stroke,
            arrow,
            label: clean_edge_label(&label),
            text: String::new(),
        })
    }

    /// `-.->` and `-.-` (any number of dots)
    fn parse_dotted_link(&mut self) -> DiagramResult<Link> {
        self.pos += 1;
        let dots = self.count_run('.');
        self.pos += dots;
        if self.peek() != Some('-') {
            return Err(DiagramError::syntax(
                self.line,
                "incomplete dotted link (expected '-.->' or '-.-')",
            ));
        }
        self.pos += 1;
        let arrow = self.peek() == Some('>');
        if arrow {
            self.pos += 1;
        }
        Ok(Link {
            stroke: Stroke::Dotted,
            arrow,
            label: None,
            text: String::new(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scanner helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        let mut idx = self.pos;
        for ch in pattern.chars() {
            if self.chars.get(idx) != Some(&ch) {
                return false;
            }
            idx += 1;
        }
        true
    }

    fn count_run(&self, ch: char) -> usize {
        self.chars[self.pos..].iter().take_while(|&&c| c == ch).count()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn rest(&self) -> String {
        self.chars[self.pos.min(self.chars.len())..].iter().collect()
    }
}

/// Split a node label into display lines, falling back to the node id
fn split_label(label: &str, id: &str) -> Vec<String> {
    let normalized = label
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("<br>", "\n");
    let lines: Vec<String> = normalized
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        vec![id.to_string()]
    } else {
        lines
    }
}

fn clean_edge_label(label: &str) -> Option<String> {
    let label = label.trim().trim_matches('"').trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_chain() {
        let chart = parse_flowchart("flowchart TB\nA-->B").unwrap();
        assert_eq!(chart.direction, FlowDirection::TopBottom);
        assert_eq!(chart.nodes.len(), 2);
        assert_eq!(chart.edges.len(), 1);
        assert_eq!(chart.edges[0].from, 0);
        assert_eq!(chart.edges[0].to, 1);
        assert!(chart.edges[0].arrow);
    }

    #[test]
    fn test_dangling_link_is_rejected() {
        let err = parse_flowchart("flowchart TB\nA-->").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("expected node after link"));
    }

    #[test]
    fn test_unknown_diagram_type() {
        let err = parse_flowchart("sequenceDiagram\nA->>B: hi").unwrap_err();
        assert_eq!(
            err,
            DiagramError::UnknownDiagramType {
                found: "sequenceDiagram".to_string()
            }
        );
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(parse_flowchart("   \n  ").unwrap_err(), DiagramError::Empty);
    }

    #[test]
    fn test_shapes_and_labels() {
        let chart = parse_flowchart(
            "graph LR\n\
             api([API Server]) --> etcd[(etcd)]\n\
             api --> sched{Scheduler?}\n\
             sched --> node((Node))\n\
             node --> kubelet{{kubelet}}\n\
             kubelet --> pod(\"Pod<br/>running\")",
        )
        .unwrap();

        assert_eq!(chart.direction, FlowDirection::LeftRight);
        assert_eq!(chart.node("api").unwrap().shape, NodeShape::Stadium);
        assert_eq!(chart.node("etcd").unwrap().shape, NodeShape::Cylinder);
        assert_eq!(chart.node("sched").unwrap().shape, NodeShape::Diamond);
        assert_eq!(chart.node("node").unwrap().shape, NodeShape::Circle);
        assert_eq!(chart.node("kubelet").unwrap().shape, NodeShape::Hexagon);
        assert_eq!(chart.node("pod").unwrap().shape, NodeShape::Round);
        assert_eq!(chart.node("pod").unwrap().label, vec!["Pod", "running"]);
        assert_eq!(chart.node("api").unwrap().label, vec!["API Server"]);
    }

    #[test]
    fn test_link_styles_and_labels() {
        let chart = parse_flowchart(
            "flowchart TB\n\
             A -->|routes| B\n\
             B -.-> C\n\
             C ==> D\n\
             D --- E\n\
             E -- watches --> F\n\
             F -.- G",
        )
        .unwrap();

        let edges = &chart.edges;
        assert_eq!(edges.len(), 6);
        assert_eq!(edges[0].label.as_deref(), Some("routes"));
        assert_eq!(edges[1].stroke, Stroke::Dotted);
        assert!(edges[1].arrow);
        assert_eq!(edges[2].stroke, Stroke::Thick);
        assert!(!edges[3].arrow);
        assert_eq!(edges[4].label.as_deref(), Some("watches"));
        assert!(edges[4].arrow);
        assert_eq!(edges[5].stroke, Stroke::Dotted);
        assert!(!edges[5].arrow);
    }

    #[test]
    fn test_fan_out_with_ampersand() {
        let chart = parse_flowchart("flowchart TB\nsvc --> p1 & p2 & p3").unwrap();
        assert_eq!(chart.edges.len(), 3);
        assert!(chart.edges.iter().all(|e| e.from == 0));
    }

    #[test]
    fn test_semicolons_split_statements() {
        let chart = parse_flowchart("graph TD; A-->B; B-->C").unwrap();
        assert_eq!(chart.nodes.len(), 3);
        assert_eq!(chart.edges.len(), 2);
    }

    #[test]
    fn test_subgraphs_assign_members() {
        let chart = parse_flowchart(
            "flowchart TB\n\
             subgraph cp[Control Plane]\n\
               api --> etcd\n\
               subgraph inner\n\
                 sched\n\
               end\n\
             end\n\
             api --> kubelet",
        )
        .unwrap();

        assert_eq!(chart.subgraphs.len(), 2);
        assert_eq!(chart.subgraphs[0].title, "Control Plane");
        assert_eq!(chart.subgraphs[1].parent, Some(0));
        let sched = chart.node_index["sched"];
        assert_eq!(chart.subgraph_chain(sched), vec![1, 0]);
        assert_eq!(chart.node("kubelet").unwrap().subgraph, None);
    }

    #[test]
    fn test_unclosed_subgraph() {
        let err = parse_flowchart("flowchart TB\nsubgraph workers\nA-->B").unwrap_err();
        assert_eq!(
            err,
            DiagramError::UnclosedSubgraph {
                line: 2,
                name: "workers".to_string()
            }
        );
    }

    #[test]
    fn test_stray_end() {
        let err = parse_flowchart("flowchart TB\nA-->B\nend").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_unterminated_label() {
        let err = parse_flowchart("flowchart TB\nA[Pod --> B").unwrap_err();
        assert!(err.to_string().contains("unterminated label"));
    }

    #[test]
    fn test_style_directives_emphasize_nodes() {
        let chart = parse_flowchart(
            "flowchart TB\n\
             A --> B\n\
             classDef hot fill:#f96\n\
             class B hot\n\
             style A fill:#bbf,stroke:#333",
        )
        .unwrap();
        assert!(chart.node("A").unwrap().emphasized);
        assert!(chart.node("B").unwrap().emphasized);
    }

    #[test]
    fn test_style_unknown_target() {
        let err = parse_flowchart("flowchart TB\nA --> B\nstyle Z fill:#fff").unwrap_err();
        assert!(err.to_string().contains("unknown node 'Z'"));
    }

    #[test]
    fn test_comments_are_ignored() {
        let chart = parse_flowchart("flowchart TB\n%% a comment\nA --> B").unwrap();
        assert_eq!(chart.nodes.len(), 2);
    }

    #[test]
    fn test_header_only_is_rejected() {
        let err = parse_flowchart("flowchart LR").unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_bad_direction() {
        let err = parse_flowchart("flowchart XY\nA-->B").unwrap_err();
        assert!(err.to_string().contains("unknown direction"));
    }

    #[test]
    fn test_redeclaration_updates_label() {
        let chart = parse_flowchart("flowchart TB\nA --> B\nB[Backend]").unwrap();
        assert_eq!(chart.node("B").unwrap().label, vec!["Backend"]);
        assert_eq!(chart.nodes.len(), 2);
    }
}
