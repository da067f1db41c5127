//! AST (Abstract Syntax Tree) definitions for the Pascal subset
//!
//! Every node kind is its own struct with private fields; [`AstNode`] is the
//! closed sum type used wherever any statement or expression may appear.
//! Nodes are built bottom-up by a parser and never mutated afterwards.
//! Constructors check the token kinds they are given, so a tree that exists
//! is well formed.
//!
//! # Shape
//!
//! ```text
//! Program
//! └── Block
//!     ├── VarDecl*  (Var, Type)
//!     └── Compound
//!         └── Assign | Compound | NoOp
//!             └── BinOp | UnaryOp | Num | Var
//! ```

use super::token::{SourceLocation, Token, TokenKind, TokenValue};
use std::fmt;
use thiserror::Error;

/// Errors raised when a node is constructed from the wrong parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    #[error("Malformed {node} at {location}: expected {expected}, found {found}")]
    UnexpectedToken {
        node: &'static str,
        expected: &'static str,
        found: TokenKind,
        location: SourceLocation,
    },

    #[error("Malformed {node}: {found} is not an expression")]
    NotAnExpression {
        node: &'static str,
        found: &'static str,
    },

    #[error("Malformed Compound: {found} is not a statement")]
    NotAStatement { found: &'static str },
}

fn expect_kind(
    node: &'static str,
    expected: &'static str,
    token: &Token,
    allowed: &[TokenKind],
) -> Result<(), AstError> {
    if allowed.contains(&token.kind) {
        Ok(())
    } else {
        Err(AstError::UnexpectedToken {
            node,
            expected,
            found: token.kind,
            location: token.location,
        })
    }
}

fn expect_expression(node: &'static str, expr: &AstNode) -> Result<(), AstError> {
    if expr.is_expression() {
        Ok(())
    } else {
        Err(AstError::NotAnExpression {
            node,
            found: expr.kind_name(),
        })
    }
}

/// Numeric payload of a [`Num`] node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Real(x) => write!(f, "{:?}", x),
        }
    }
}

/// Root of a compiled unit: `PROGRAM name; block .`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    name: Var,
    block: Block,
}

impl Program {
    pub fn new(name: Var, block: Block) -> Self {
        Self { name, block }
    }

    /// Program identifier
    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn name_node(&self) -> &Var {
        &self.name
    }

    pub fn block(&self) -> &Block {
        &self.block
    }
}

/// Declarations followed by the main compound statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    declarations: Vec<VarDecl>,
    compound_statement: Compound,
}

impl Block {
    pub fn new(declarations: Vec<VarDecl>, compound_statement: Compound) -> Self {
        Self {
            declarations,
            compound_statement,
        }
    }

    pub fn declarations(&self) -> &[VarDecl] {
        &self.declarations
    }

    pub fn compound_statement(&self) -> &Compound {
        &self.compound_statement
    }
}

/// Binds one variable to one type.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    var_node: Var,
    type_node: Type,
}

impl VarDecl {
    pub fn new(var_node: Var, type_node: Type) -> Self {
        Self {
            var_node,
            type_node,
        }
    }

    pub fn var_node(&self) -> &Var {
        &self.var_node
    }

    pub fn type_node(&self) -> &Type {
        &self.type_node
    }
}

/// Type specification: `INTEGER` or `REAL`
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    token: Token,
}

impl Type {
    pub fn new(token: Token) -> Result<Self, AstError> {
        expect_kind(
            "Type",
            "INTEGER or REAL",
            &token,
            &[TokenKind::Integer, TokenKind::Real],
        )?;
        Ok(Self { token })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }
}

/// Ordered statement list between `BEGIN` and `END`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    children: Vec<AstNode>,
}

impl Compound {
    pub fn new(children: Vec<AstNode>) -> Result<Self, AstError> {
        if let Some(bad) = children.iter().find(|child| !child.is_statement()) {
            return Err(AstError::NotAStatement {
                found: bad.kind_name(),
            });
        }
        Ok(Self { children })
    }

    /// Statements in execution order.
    pub fn children(&self) -> &[AstNode] {
        &self.children
    }
}

/// `left := right`
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    left: Var,
    op: Token,
    right: Box<AstNode>,
}

impl Assign {
    pub fn new(left: Var, op: Token, right: AstNode) -> Result<Self, AstError> {
        expect_kind("Assign", "':='", &op, &[TokenKind::Assign])?;
        expect_expression("Assign", &right)?;
        Ok(Self {
            left,
            op,
            right: Box::new(right),
        })
    }

    pub fn left(&self) -> &Var {
        &self.left
    }

    pub fn op(&self) -> &Token {
        &self.op
    }

    pub fn right(&self) -> &AstNode {
        &self.right
    }
}

/// Variable reference
#[derive(Debug, Clone, PartialEq)]
pub struct Var {
    token: Token,
    value: String,
}

impl Var {
    pub fn new(token: Token) -> Result<Self, AstError> {
        let value = match (token.kind, &token.value) {
            (TokenKind::Id, Some(TokenValue::Text(name))) if !name.is_empty() => name.clone(),
            _ => {
                return Err(AstError::UnexpectedToken {
                    node: "Var",
                    expected: "identifier",
                    found: token.kind,
                    location: token.location,
                })
            }
        };
        Ok(Self { token, value })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Identifier name
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    left: Box<AstNode>,
    op: Token,
    right: Box<AstNode>,
}

impl BinOp {
    pub fn new(left: AstNode, op: Token, right: AstNode) -> Result<Self, AstError> {
        expect_kind(
            "BinOp",
            "'+', '-', '*', 'DIV' or '/'",
            &op,
            &[
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Mul,
                TokenKind::IntegerDiv,
                TokenKind::FloatDiv,
            ],
        )?;
        expect_expression("BinOp", &left)?;
        expect_expression("BinOp", &right)?;
        Ok(Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn left(&self) -> &AstNode {
        &self.left
    }

    pub fn op(&self) -> &Token {
        &self.op
    }

    pub fn right(&self) -> &AstNode {
        &self.right
    }
}

/// Unary sign
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    op: Token,
    expr: Box<AstNode>,
}

impl UnaryOp {
    pub fn new(op: Token, expr: AstNode) -> Result<Self, AstError> {
        expect_kind(
            "UnaryOp",
            "'+' or '-'",
            &op,
            &[TokenKind::Plus, TokenKind::Minus],
        )?;
        expect_expression("UnaryOp", &expr)?;
        Ok(Self {
            op,
            expr: Box::new(expr),
        })
    }

    pub fn op(&self) -> &Token {
        &self.op
    }

    pub fn expr(&self) -> &AstNode {
        &self.expr
    }
}

/// Numeric literal
#[derive(Debug, Clone, PartialEq)]
pub struct Num {
    token: Token,
    value: Number,
}

impl Num {
    pub fn new(token: Token) -> Result<Self, AstError> {
        let value = match (token.kind, &token.value) {
            (TokenKind::IntegerConst, Some(TokenValue::Integer(n))) => Number::Integer(*n),
            (TokenKind::RealConst, Some(TokenValue::Real(x))) => Number::Real(*x),
            _ => {
                return Err(AstError::UnexpectedToken {
                    node: "Num",
                    expected: "numeric constant",
                    found: token.kind,
                    location: token.location,
                })
            }
        };
        Ok(Self { token, value })
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn value(&self) -> Number {
        self.value
    }
}

/// AST nodes representing the program structure, statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Program(Program),
    Block(Block),
    VarDecl(VarDecl),
    Type(Type),
    Compound(Compound),
    Assign(Assign),
    Var(Var),
    BinOp(BinOp),
    UnaryOp(UnaryOp),
    Num(Num),
    NoOp,
}

impl AstNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::Program(_) => "Program",
            AstNode::Block(_) => "Block",
            AstNode::VarDecl(_) => "VarDecl",
            AstNode::Type(_) => "Type",
            AstNode::Compound(_) => "Compound",
            AstNode::Assign(_) => "Assign",
            AstNode::Var(_) => "Var",
            AstNode::BinOp(_) => "BinOp",
            AstNode::UnaryOp(_) => "UnaryOp",
            AstNode::Num(_) => "Num",
            AstNode::NoOp => "NoOp",
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            AstNode::BinOp(_) | AstNode::UnaryOp(_) | AstNode::Num(_) | AstNode::Var(_)
        )
    }

    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            AstNode::Assign(_) | AstNode::Compound(_) | AstNode::NoOp
        )
    }

    /// Direct children in source order, borrowed from this node.
    pub fn children(&self) -> Vec<NodeRef<'_>> {
        NodeRef::from(self).children()
    }

    /// Location of the token that anchors this node, if it has one.
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            AstNode::Type(node) => Some(node.token.location),
            AstNode::Assign(node) => Some(node.op.location),
            AstNode::Var(node) => Some(node.token.location),
            AstNode::BinOp(node) => Some(node.op.location),
            AstNode::UnaryOp(node) => Some(node.op.location),
            AstNode::Num(node) => Some(node.token.location),
            AstNode::VarDecl(node) => Some(node.var_node.token.location),
            AstNode::Program(_) | AstNode::Block(_) | AstNode::Compound(_) | AstNode::NoOp => {
                None
            }
        }
    }
}

macro_rules! impl_from_node {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for AstNode {
                fn from(node: $variant) -> Self {
                    AstNode::$variant(node)
                }
            }
        )*
    };
}

impl_from_node!(Program, Block, VarDecl, Type, Compound, Assign, Var, BinOp, UnaryOp, Num);

/// Borrowed view of any node, including the struct-typed children
/// (`Block`, `VarDecl`, `Var`, `Type`) that are not stored as [`AstNode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Block(&'a Block),
    VarDecl(&'a VarDecl),
    Type(&'a Type),
    Compound(&'a Compound),
    Assign(&'a Assign),
    Var(&'a Var),
    BinOp(&'a BinOp),
    UnaryOp(&'a UnaryOp),
    Num(&'a Num),
    NoOp,
}

impl<'a> NodeRef<'a> {
    pub fn kind_name(self) -> &'static str {
        match self {
            NodeRef::Program(_) => "Program",
            NodeRef::Block(_) => "Block",
            NodeRef::VarDecl(_) => "VarDecl",
            NodeRef::Type(_) => "Type",
            NodeRef::Compound(_) => "Compound",
            NodeRef::Assign(_) => "Assign",
            NodeRef::Var(_) => "Var",
            NodeRef::BinOp(_) => "BinOp",
            NodeRef::UnaryOp(_) => "UnaryOp",
            NodeRef::Num(_) => "Num",
            NodeRef::NoOp => "NoOp",
        }
    }

    /// Direct children in source order. Nothing is cloned.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        match self {
            NodeRef::Program(program) => vec![NodeRef::Block(&program.block)],
            NodeRef::Block(block) => block
                .declarations
                .iter()
                .map(NodeRef::VarDecl)
                .chain(std::iter::once(NodeRef::Compound(&block.compound_statement)))
                .collect(),
            NodeRef::VarDecl(decl) => vec![
                NodeRef::Var(&decl.var_node),
                NodeRef::Type(&decl.type_node),
            ],
            NodeRef::Compound(compound) => compound.children.iter().map(NodeRef::from).collect(),
            NodeRef::Assign(assign) => vec![NodeRef::Var(&assign.left), NodeRef::from(&*assign.right)],
            NodeRef::BinOp(binop) => vec![NodeRef::from(&*binop.left), NodeRef::from(&*binop.right)],
            NodeRef::UnaryOp(unary) => vec![NodeRef::from(&*unary.expr)],
            NodeRef::Type(_) | NodeRef::Var(_) | NodeRef::Num(_) | NodeRef::NoOp => Vec::new(),
        }
    }
}

impl<'a> From<&'a AstNode> for NodeRef<'a> {
    fn from(node: &'a AstNode) -> Self {
        match node {
            AstNode::Program(node) => NodeRef::Program(node),
            AstNode::Block(node) => NodeRef::Block(node),
            AstNode::VarDecl(node) => NodeRef::VarDecl(node),
            AstNode::Type(node) => NodeRef::Type(node),
            AstNode::Compound(node) => NodeRef::Compound(node),
            AstNode::Assign(node) => NodeRef::Assign(node),
            AstNode::Var(node) => NodeRef::Var(node),
            AstNode::BinOp(node) => NodeRef::BinOp(node),
            AstNode::UnaryOp(node) => NodeRef::UnaryOp(node),
            AstNode::Num(node) => NodeRef::Num(node),
            AstNode::NoOp => NodeRef::NoOp,
        }
    }
}

// S-expression rendering, used for diagnostics and parser tests

fn op_text(token: &Token) -> &str {
    token
        .as_text()
        .or_else(|| token.kind.lexeme())
        .unwrap_or("?")
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Program {} {})", self.name.value, self.block)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Block")?;
        for decl in &self.declarations {
            write!(f, " {}", decl)?;
        }
        write!(f, " {})", self.compound_statement)
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(VarDecl {} {})", self.var_node, self.type_node)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Type {})", self.token.kind)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Compound")?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Assign {} {})", self.left, self.right)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Var {})", self.value)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(BinOp {} {} {})", op_text(&self.op), self.left, self.right)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(UnaryOp {} {})", op_text(&self.op), self.expr)
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Num {})", self.value)
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Program(node) => fmt::Display::fmt(node, f),
            AstNode::Block(node) => fmt::Display::fmt(node, f),
            AstNode::VarDecl(node) => fmt::Display::fmt(node, f),
            AstNode::Type(node) => fmt::Display::fmt(node, f),
            AstNode::Compound(node) => fmt::Display::fmt(node, f),
            AstNode::Assign(node) => fmt::Display::fmt(node, f),
            AstNode::Var(node) => fmt::Display::fmt(node, f),
            AstNode::BinOp(node) => fmt::Display::fmt(node, f),
            AstNode::UnaryOp(node) => fmt::Display::fmt(node, f),
            AstNode::Num(node) => fmt::Display::fmt(node, f),
            AstNode::NoOp => write!(f, "(NoOp)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(0, 1, 1)
    }

    fn int(n: i64) -> AstNode {
        Num::new(Token::new(
            TokenKind::IntegerConst,
            Some(TokenValue::Integer(n)),
            loc(),
        ))
        .unwrap()
        .into()
    }

    fn id(name: &str) -> Var {
        Var::new(Token::new(
            TokenKind::Id,
            Some(TokenValue::Text(name.to_string())),
            loc(),
        ))
        .unwrap()
    }

    #[test]
    fn test_num_preserves_value() {
        let num = Num::new(Token::new(
            TokenKind::IntegerConst,
            Some(TokenValue::Integer(42)),
            loc(),
        ))
        .unwrap();
        assert_eq!(num.value(), Number::Integer(42));

        let real = Num::new(Token::new(
            TokenKind::RealConst,
            Some(TokenValue::Real(2.5)),
            loc(),
        ))
        .unwrap();
        assert_eq!(real.value(), Number::Real(2.5));
    }

    #[test]
    fn test_var_preserves_name() {
        assert_eq!(id("alpha").value(), "alpha");
    }

    #[test]
    fn test_var_rejects_missing_name() {
        let err = Var::new(Token::new(TokenKind::Id, None, loc())).unwrap_err();
        assert!(matches!(
            err,
            AstError::UnexpectedToken { node: "Var", found: TokenKind::Id, .. }
        ));

        let numeric = Token::new(TokenKind::Id, Some(TokenValue::Integer(5)), loc());
        assert!(Var::new(numeric).is_err());

        let empty = Token::new(TokenKind::Id, Some(TokenValue::Text(String::new())), loc());
        assert!(Var::new(empty).is_err());
    }

    #[test]
    fn test_num_rejects_identifier() {
        let err = Num::new(Token::new(
            TokenKind::Id,
            Some(TokenValue::Text("x".to_string())),
            loc(),
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            AstError::UnexpectedToken { node: "Num", found: TokenKind::Id, .. }
        ));
    }

    #[test]
    fn test_binop_rejects_non_operator() {
        let err = BinOp::new(int(1), Token::punct(TokenKind::Semi, loc()), int(2)).unwrap_err();
        assert!(matches!(err, AstError::UnexpectedToken { node: "BinOp", .. }));
    }

    #[test]
    fn test_unary_rejects_mul() {
        let err = UnaryOp::new(Token::punct(TokenKind::Mul, loc()), int(1)).unwrap_err();
        assert!(matches!(err, AstError::UnexpectedToken { node: "UnaryOp", .. }));
    }

    #[test]
    fn test_binop_rejects_statement_operand() {
        let err = BinOp::new(AstNode::NoOp, Token::punct(TokenKind::Plus, loc()), int(2))
            .unwrap_err();
        assert_eq!(
            err,
            AstError::NotAnExpression {
                node: "BinOp",
                found: "NoOp"
            }
        );
    }

    #[test]
    fn test_compound_rejects_expression() {
        let err = Compound::new(vec![int(1)]).unwrap_err();
        assert_eq!(err, AstError::NotAStatement { found: "Num" });
    }

    #[test]
    fn test_type_accepts_only_type_keywords() {
        assert!(Type::new(Token::punct(TokenKind::Real, loc())).is_ok());
        assert!(Type::new(Token::punct(TokenKind::Begin, loc())).is_err());
    }

    #[test]
    fn test_display() {
        let sum = BinOp::new(int(1), Token::punct(TokenKind::Plus, loc()), int(2)).unwrap();
        let neg = UnaryOp::new(Token::punct(TokenKind::Minus, loc()), sum.into()).unwrap();
        let assign = Assign::new(id("x"), Token::punct(TokenKind::Assign, loc()), neg.into())
            .unwrap();
        let compound = Compound::new(vec![assign.into(), AstNode::NoOp]).unwrap();

        assert_eq!(
            compound.to_string(),
            "(Compound (Assign (Var x) (UnaryOp - (BinOp + (Num 1) (Num 2)))) (NoOp))"
        );
    }

    #[test]
    fn test_children_order() {
        let diff = BinOp::new(
            AstNode::Var(id("a")),
            Token::punct(TokenKind::Minus, loc()),
            int(3),
        )
        .unwrap();
        let node = AstNode::from(diff);
        let children = node.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind_name(), "Var");
        assert_eq!(children[1].kind_name(), "Num");
        assert!(AstNode::NoOp.children().is_empty());

        match (&node, children[0]) {
            (AstNode::BinOp(binop), NodeRef::Var(var)) => match binop.left() {
                AstNode::Var(left) => assert!(std::ptr::eq(left, var)),
                other => panic!("Expected Var, got {}", other),
            },
            _ => panic!("Expected BinOp with a Var child"),
        }
    }

    #[test]
    fn test_program_name_comes_from_identifier() {
        let program = Program::new(id("demo"), Block::new(Vec::new(), Compound::default()));
        assert_eq!(program.name(), "demo");
        assert_eq!(program.to_string(), "(Program demo (Block (Compound)))");
    }
}
