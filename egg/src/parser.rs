use crate::scanner::{skip_space, skip_space_and_comments};
use crate::stack::ensure_sufficient_stack;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Syntax errors carry the text where parsing stopped.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum SyntaxError {
    #[error("unexpected syntax: {0:?}")]
    UnexpectedSyntax(String),
    #[error("expected ',' or ')' at: {0:?}")]
    ExpectedDelimiter(String),
    #[error("unexpected trailing text: {0:?}")]
    TrailingText(String),
}

#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    String(String),
    Number(f64),
}

/// Syntax tree of an Egg program. Nodes are never mutated once built.
///
/// Trees can nest as deep as the input does, so cloning, comparing and
/// printing grow the stack as they go and dropping walks a work list.
#[derive(Debug)]
pub enum Node {
    Literal(Literal),
    Identifier(String),
    Application { operator: Box<Node>, arguments: Vec<Node> },
}

/// A recognized node along with the unconsumed rest of the input.
pub type Parsed<'a> = (Node, &'a str);

impl Node {
    pub fn string(s: impl Into<String>) -> Node {
        Node::Literal(Literal::String(s.into()))
    }

    pub fn number(n: f64) -> Node {
        Node::Literal(Literal::Number(n))
    }

    pub fn identifier(name: impl Into<String>) -> Node {
        Node::Identifier(name.into())
    }

    pub fn apply(operator: Node, arguments: Vec<Node>) -> Node {
        Node::Application { operator: Box::new(operator), arguments }
    }
}

impl Clone for Node {
    fn clone(&self) -> Node {
        match self {
            Node::Literal(lit) => Node::Literal(lit.clone()),
            Node::Identifier(name) => Node::Identifier(name.clone()),
            Node::Application { operator, arguments } => ensure_sufficient_stack(|| {
                Node::Application { operator: operator.clone(), arguments: arguments.clone() }
            }),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Literal(a), Node::Literal(b)) => a == b,
            (Node::Identifier(a), Node::Identifier(b)) => a == b,
            (Node::Application { operator: op_a, arguments: args_a },
             Node::Application { operator: op_b, arguments: args_b }) =>
                ensure_sufficient_stack(|| op_a == op_b && args_a == args_b),
            _ => false,
        }
    }
}

// Detach children onto `pending` so no drop recurses into a subtree.
fn detach_children(node: &mut Node, pending: &mut Vec<Node>) {
    if let Node::Application { operator, arguments } = node {
        pending.push(std::mem::replace(&mut **operator, Node::Identifier(String::new())));
        pending.append(arguments);
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Number(n) => write!(f, "{}", n),
        }
    }
}

// Prints nodes back in source form, parse(node.to_string()) == node
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Literal(lit) => write!(f, "{}", lit),
            Node::Identifier(name) => write!(f, "{}", name),
            Node::Application { operator, arguments } => ensure_sufficient_stack(|| {
                write!(f, "{}(", operator)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    !(c.is_whitespace() || matches!(c, '(' | ')' | ',' | '#' | '"'))
}

// "..." with no escapes, returns (content, length of the whole token)
fn match_string(text: &str) -> Option<(&str, usize)> {
    let body = text.strip_prefix('"')?;
    let end = body.find('"')?;
    Some((&body[..end], end + 2))
}

// [0-9]+ that must end on a word boundary
fn match_integer(text: &str) -> Option<&str> {
    let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    match text[end..].chars().next() {
        Some(c) if is_word_char(c) => None,
        _ => Some(&text[..end]),
    }
}

fn match_identifier(text: &str) -> Option<&str> {
    let end = text.find(|c: char| !is_identifier_char(c)).unwrap_or(text.len());
    if end == 0 { None } else { Some(&text[..end]) }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Parser {
    comments: bool,
}

impl Parser {
    /// Parser for the bare grammar, '#' is never valid input.
    pub fn new() -> Parser {
        Parser { comments: false }
    }

    /// Parser that treats '#' up to end of line as whitespace.
    pub fn with_comments() -> Parser {
        Parser { comments: true }
    }

    pub fn comments(&self) -> bool { self.comments }

    fn skip<'a>(&self, text: &'a str) -> &'a str {
        if self.comments {
            skip_space_and_comments(text)
        } else {
            skip_space(text)
        }
    }

    /// Parse a whole program, which is exactly one expression.
    pub fn parse(&self, source: &str) -> Result<Node, SyntaxError> {
        let (node, rest) = self.parse_expression(source)?;
        let rest = self.skip(rest);
        if !rest.is_empty() {
            return Err(SyntaxError::TrailingText(rest.to_string()));
        }
        Ok(node)
    }

    /// Parse the primary expression at the head of `text` and any calls
    /// applied to it.
    pub fn parse_expression<'a>(&self, text: &'a str) -> Result<Parsed<'a>, SyntaxError> {
        ensure_sufficient_stack(|| {
            let text = self.skip(text);
            trace!(remaining = text.len(), "parse_expression");
            // order matters: "5" is a string, 5 is a number, 5a is a word
            let (node, len) = if let Some((s, len)) = match_string(text) {
                (Node::string(s), len)
            } else if let Some(digits) = match_integer(text) {
                let n = digits.parse::<f64>()
                    .map_err(|_| SyntaxError::UnexpectedSyntax(text.to_string()))?;
                (Node::number(n), digits.len())
            } else if let Some(word) = match_identifier(text) {
                (Node::identifier(word), word.len())
            } else {
                return Err(SyntaxError::UnexpectedSyntax(text.to_string()));
            };
            self.parse_apply(node, &text[len..])
        })
    }

    /// Parse zero or more argument lists applied to `node`, so that
    /// `f(x)(y)` nests as `(f(x))(y)`.
    pub fn parse_apply<'a>(&self, mut node: Node, text: &'a str) -> Result<Parsed<'a>, SyntaxError> {
        let mut text = self.skip(text);
        while let Some(rest) = text.strip_prefix('(') {
            let mut arguments = Vec::new();
            text = self.skip(rest);
            if let Some(rest) = text.strip_prefix(')') {
                text = rest;
            } else {
                loop {
                    let (arg, rest) = self.parse_expression(text)?;
                    arguments.push(arg);
                    text = self.skip(rest);
                    if let Some(rest) = text.strip_prefix(',') {
                        text = self.skip(rest);
                    } else if let Some(rest) = text.strip_prefix(')') {
                        text = rest;
                        break;
                    } else {
                        return Err(SyntaxError::ExpectedDelimiter(text.to_string()));
                    }
                }
            }
            trace!(arguments = arguments.len(), "parse_apply");
            node = Node::apply(node, arguments);
            text = self.skip(text);
        }
        Ok((node, text))
    }
}

/// Parse `source` with the bare grammar.
pub fn parse(source: &str) -> Result<Node, SyntaxError> {
    Parser::new().parse(source)
}
