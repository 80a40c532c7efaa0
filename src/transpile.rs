//! Template syntax transpiler.
//! Converts chezmoi's Go-template syntax into dotforge's Handlebars-style
//! destination syntax. The source text is scanned into literal and action
//! tokens, parsed into a tree of tagged block nodes, and printed back out
//! in destination syntax. Block nesting lives in the tree, so every
//! generic `end` closes exactly the construct that is open and is emitted
//! as that construct's own closer.

use crate::constants::SOURCE_NAMESPACE;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Matches one template action, including its delimiters.
static ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("action pattern is valid"));

/// Errors for a single file's transpile pass.
///
/// All of these mean the source template's blocks do not balance; the
/// file's output is discarded rather than emitted malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranspileError {
    /// A block opener was never matched by an `end`
    #[error("block opened on line {line} is never closed")]
    UnclosedBlock { line: usize },

    /// An `end` appeared with no block open
    #[error("closing token on line {line} has no matching opener")]
    UnexpectedCloser { line: usize },

    /// An `else` appeared with no block open
    #[error("'else' on line {line} is outside of any block")]
    DanglingElse { line: usize },
}

/// Block constructs of the destination syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Conditional,
    NegatedConditional,
    Iteration,
}

impl BlockKind {
    /// Construct-specific closing tag body.
    fn closer(self) -> &'static str {
        match self {
            BlockKind::Conditional => "/if",
            BlockKind::NegatedConditional => "/unless",
            BlockKind::Iteration => "/each",
        }
    }
}

/// One node of the parsed template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    /// Text between actions, kept byte-identical
    Literal(String),
    /// A rewritten expression, printed as `{{...}}`
    Expr(String),
    /// An action outside the observed subset, kept byte-identical
    Passthrough(String),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Block {
    kind: BlockKind,
    /// Destination opener body, e.g. `#if (eq os "darwin")`
    head: String,
    arms: Vec<Arm>,
}

/// A block body segment: the main body, or an `else`/`else if` branch.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Arm {
    label: Option<String>,
    nodes: Vec<Node>,
}

#[derive(Debug)]
enum Token {
    Literal(String),
    Action { body: String, raw: String, line: usize },
}

/// A block that has been opened but not yet closed. The parser's stack of
/// these frames is the block-matching state; it must be empty at end of
/// input.
struct OpenBlock {
    kind: BlockKind,
    head: String,
    arms: Vec<Arm>,
    line: usize,
}

/// Transpiles source template text into destination syntax.
///
/// Pure function; the caller decides what to do with the output. Text that
/// matches no rewrite passes through unchanged. Unbalanced blocks are the
/// only failure mode.
pub fn transpile(input: &str) -> Result<String, TranspileError> {
    let nodes = parse(scan(input))?;
    let mut out = String::with_capacity(input.len());
    emit_nodes(&nodes, &mut out);
    Ok(out)
}

/// Splits the input into literal and action tokens, tracking line numbers
/// for diagnostics.
fn scan(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line = 1;
    let mut last = 0;

    for found in ACTION_RE.captures_iter(input) {
        let action = found.get(0).expect("whole match always present");
        if action.start() > last {
            let literal = &input[last..action.start()];
            line += literal.matches('\n').count();
            tokens.push(Token::Literal(literal.to_string()));
        }

        let raw = action.as_str();
        tokens.push(Token::Action {
            body: action_body(found.get(1).map_or("", |m| m.as_str())),
            raw: raw.to_string(),
            line,
        });
        line += raw.matches('\n').count();
        last = action.end();
    }

    if last < input.len() {
        tokens.push(Token::Literal(input[last..].to_string()));
    }

    tokens
}

/// Normalizes an action's inner text: surrounding whitespace and the
/// whitespace-trim markers (`{{- ... -}}`) are dropped.
fn action_body(inner: &str) -> String {
    let mut body = inner.trim();
    if let Some(stripped) = body.strip_prefix('-') {
        body = stripped.trim_start();
    }
    if let Some(stripped) = body.strip_suffix('-') {
        body = stripped.trim_end();
    }
    body.to_string()
}

/// Builds the template tree. Openers push a frame, `end` pops one, and
/// `else`/`else if` start a new arm on the innermost frame.
fn parse(tokens: Vec<Token>) -> Result<Vec<Node>, TranspileError> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<OpenBlock> = Vec::new();

    fn push_node(root: &mut Vec<Node>, stack: &mut [OpenBlock], node: Node) {
        match stack.last_mut() {
            Some(open) => open
                .arms
                .last_mut()
                .expect("open block always has an arm")
                .nodes
                .push(node),
            None => root.push(node),
        }
    }

    for token in tokens {
        match token {
            Token::Literal(text) => push_node(&mut root, &mut stack, Node::Literal(text)),
            Token::Action { body, raw, line } => {
                if body == "end" {
                    let open = stack
                        .pop()
                        .ok_or(TranspileError::UnexpectedCloser { line })?;
                    let node = Node::Block(Block {
                        kind: open.kind,
                        head: open.head,
                        arms: open.arms,
                    });
                    push_node(&mut root, &mut stack, node);
                } else if let Some(rest) = body.strip_prefix("else if ") {
                    let open = stack.last_mut().ok_or(TranspileError::DanglingElse { line })?;
                    open.arms.push(Arm {
                        label: Some(format!("else if {}", test_expr(rest))),
                        nodes: Vec::new(),
                    });
                } else if body == "else" {
                    let open = stack.last_mut().ok_or(TranspileError::DanglingElse { line })?;
                    open.arms.push(Arm { label: Some("else".to_string()), nodes: Vec::new() });
                } else if let Some(rest) = body.strip_prefix("if ") {
                    let (kind, head) = opener(rest);
                    stack.push(OpenBlock {
                        kind,
                        head,
                        arms: vec![Arm { label: None, nodes: Vec::new() }],
                        line,
                    });
                } else if let Some(rest) = body.strip_prefix("range ") {
                    let target = resolve_var(rest.trim()).unwrap_or_else(|| rest.trim().to_string());
                    stack.push(OpenBlock {
                        kind: BlockKind::Iteration,
                        head: format!("#each {}", target),
                        arms: vec![Arm { label: None, nodes: Vec::new() }],
                        line,
                    });
                } else {
                    let node = match rewrite_expr(&body) {
                        Some(expr) => Node::Expr(expr),
                        None => Node::Passthrough(raw),
                    };
                    push_node(&mut root, &mut stack, node);
                }
            }
        }
    }

    if let Some(open) = stack.first() {
        return Err(TranspileError::UnclosedBlock { line: open.line });
    }

    Ok(root)
}

/// Classifies a conditional opener. `if not <var>` becomes the negated
/// construct; everything else is a plain conditional.
fn opener(condition: &str) -> (BlockKind, String) {
    if let Some(negated) = condition.strip_prefix("not ") {
        if let Some(var) = resolve_var(negated.trim()) {
            return (BlockKind::NegatedConditional, format!("#unless {}", var));
        }
    }
    (BlockKind::Conditional, format!("#if {}", test_expr(condition)))
}

/// Rewrites a conditional test into destination form.
///
/// Equality and inequality tests become `(eq var "lit")` / `(ne var
/// "lit")`; a bare variable stays a truthy test; anything else is kept
/// verbatim rather than guessed at.
fn test_expr(condition: &str) -> String {
    for op in ["eq", "ne"] {
        if let Some(args) = condition.strip_prefix(op).and_then(|rest| rest.strip_prefix(' ')) {
            if let Some((var, literal)) = args.trim().split_once(char::is_whitespace) {
                let var = resolve_var(var).unwrap_or_else(|| var.to_string());
                return format!("({} {} {})", op, var, literal.trim_start());
            }
        }
    }

    match resolve_var(condition.trim()) {
        Some(var) => var,
        None => condition.to_string(),
    }
}

/// Rewrites a non-control action into a destination expression. Returns
/// `None` when the action is outside the observed subset, in which case
/// the original text passes through unchanged.
///
/// Order is most-specific-first: filtered variables (with and without
/// arguments) before plain variables, so the general rewrite cannot
/// consume a pipe expression.
fn rewrite_expr(body: &str) -> Option<String> {
    if body.contains('|') {
        let mut parts = body.split('|').map(str::trim);
        let var = resolve_var(parts.next()?)?;
        let filters: Vec<&str> = parts.collect();
        if filters.iter().any(|filter| filter.is_empty()) {
            return None;
        }

        let mut expr = var;
        for (index, filter) in filters.iter().enumerate() {
            let applied = match filter.split_once(' ') {
                Some((name, args)) => format!("{} {} {}", name, expr, args.trim_start()),
                None => format!("{} {}", filter, expr),
            };
            expr = if index + 1 < filters.len() { format!("({})", applied) } else { applied };
        }
        return Some(expr);
    }

    resolve_var(body)
}

/// Resolves a source variable reference to its destination name.
///
/// The well-known namespaced variables map to flat names; namespaced
/// variables outside that list resolve to `None` so the caller passes them
/// through unchanged. The bare iteration scope `.` becomes `this`.
fn resolve_var(token: &str) -> Option<String> {
    if token == "." {
        return Some("this".to_string());
    }

    if let Some(name) = token.strip_prefix(SOURCE_NAMESPACE) {
        return match name {
            "os" | "arch" | "hostname" | "username" => Some(name.to_string()),
            "homeDir" => Some("home".to_string()),
            _ => None,
        };
    }

    let path = token.strip_prefix('.')?;
    if path == "chezmoi" || path.starts_with("chezmoi.") {
        return None;
    }

    let valid = !path.is_empty()
        && path.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    valid.then(|| path.to_string())
}

/// Prints the tree back out in destination syntax.
fn emit_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Literal(text) | Node::Passthrough(text) => out.push_str(text),
            Node::Expr(expr) => {
                out.push_str("{{");
                out.push_str(expr);
                out.push_str("}}");
            }
            Node::Block(block) => {
                out.push_str("{{");
                out.push_str(&block.head);
                out.push_str("}}");
                for arm in &block.arms {
                    if let Some(label) = &arm.label {
                        out.push_str("{{");
                        out.push_str(label);
                        out.push_str("}}");
                    }
                    emit_nodes(&arm.nodes, out);
                }
                out.push_str("{{");
                out.push_str(block.kind.closer());
                out.push_str("}}");
            }
        }
    }
}
