use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Ordered sequence of statements; a whole program is one block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Statements in source order
    pub statements: Vec<Statement>,
}

impl Block {
    /// Creates a block from its statements
    pub fn new(statements: Vec<Statement>) -> Self {
        Block { statements }
    }

    /// Returns true if the block holds no statements
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// A `fun name(params) { body }` definition
///
/// Shared behind an `Rc` so closures can hold the body without copying the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// Function name
    pub name: String,
    /// Parameter names in declaration order
    pub params: Vec<String>,
    /// Function body
    pub body: Block,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Function definition: `fun name(a, b) { ... }`
    FunctionDefinition(Rc<FunctionDecl>),

    /// Nested block: `{ ... }`
    Block(Block),

    /// Variable declaration: `var x = expr`
    VariableDeclaration {
        /// Name of the declared variable
        name: String,
        /// Optional initializer, defaults to 0
        init: Option<Expression>,
    },

    /// Expression statement
    Expression(Expression),

    /// While loop
    While {
        /// Loop condition expression
        condition: Expression,
        /// Statement executed on every iteration
        body: Box<Statement>,
    },

    /// If statement
    If {
        /// Condition expression to evaluate
        condition: Expression,
        /// Statement to execute if condition is non-zero
        then_branch: Box<Statement>,
        /// Optional statement to execute if condition is zero
        else_branch: Option<Box<Statement>>,
    },

    /// Variable assignment: `x = expr`
    Assignment {
        /// Name of the variable to assign to
        name: String,
        /// Expression value to assign
        value: Expression,
    },

    /// Return statement
    Return {
        /// Value to return
        value: Expression,
    },
}

impl Statement {
    /// Builds a function definition statement
    pub fn function(name: impl Into<String>, params: &[&str], body: Vec<Statement>) -> Self {
        Statement::FunctionDefinition(Rc::new(FunctionDecl {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
            body: Block::new(body),
        }))
    }

    /// Builds a nested block statement
    pub fn block(statements: Vec<Statement>) -> Self {
        Statement::Block(Block::new(statements))
    }

    /// Builds a variable declaration
    pub fn var(name: impl Into<String>, init: Option<Expression>) -> Self {
        Statement::VariableDeclaration {
            name: name.into(),
            init,
        }
    }

    /// Builds an assignment
    pub fn assign(name: impl Into<String>, value: Expression) -> Self {
        Statement::Assignment {
            name: name.into(),
            value,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Function call: `name(args...)`
    Call {
        /// Name of the function to call
        name: String,
        /// Arguments, evaluated left to right
        args: Vec<Expression>,
    },

    /// Integer literal expression
    Literal(i64),

    /// Variable reference expression
    Identifier(String),

    /// Binary operation expression
    Binary {
        /// Left operand expression
        left: Box<Expression>,
        /// Binary operator to apply
        op: BinaryOp,
        /// Right operand expression
        right: Box<Expression>,
    },
}

impl Expression {
    /// Builds a call expression
    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.into(),
            args,
        }
    }

    /// Builds an identifier expression
    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    /// Builds a binary expression
    pub fn binary(left: Expression, op: BinaryOp, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Binary operators with a fixed token mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Logical
    /// `||`
    Or,
    /// `&&`
    And,

    // Comparison
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,

    // Arithmetic
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `+`
    Add,
    /// `-`
    Sub,
}

/// Binding strength of binary operators, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`, `!=`
    Equality,
    /// `<`, `<=`, `>`, `>=`
    Comparison,
    /// `+`, `-`
    Term,
    /// `*`, `/`, `%`
    Factor,
}

impl BinaryOp {
    /// Every operator, in token-table order
    pub const ALL: [BinaryOp; 13] = [
        BinaryOp::Or,
        BinaryOp::And,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Add,
        BinaryOp::Sub,
    ];

    /// The source token for this operator
    pub fn token(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
        }
    }

    /// Looks up the operator for a source token
    pub fn from_token(token: &str) -> Option<BinaryOp> {
        Self::ALL.iter().copied().find(|op| op.token() == token)
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            BinaryOp::Or => Precedence::Or,
            BinaryOp::And => Precedence::And,
            BinaryOp::Eq | BinaryOp::NotEq => Precedence::Equality,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => Precedence::Comparison,
            BinaryOp::Add | BinaryOp::Sub => Precedence::Term,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => Precedence::Factor,
        }
    }

    /// `||` and `&&` only evaluate their right side conditionally
    pub fn is_short_circuit(&self) -> bool {
        matches!(self, BinaryOp::Or | BinaryOp::And)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.token())
    }
}
