use core::fmt;
use std::fmt::{Display, Formatter};

/// Handle of a node inside a [`SourceTree`](crate::arena::SourceTree).
///
/// Ids are assigned in pre-order starting from zero, so the module root is
/// always `InputId(0)` and a parent's id is smaller than any of its children's.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct InputId(pub(crate) u32);

impl InputId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for InputId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source position of an input node.
///
/// `line` is 1-based, `column` is the 0-based byte offset inside that line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Location {
    pub offset_start: u32,
    pub offset_end: u32,
    pub line: u32,
    pub column: u32,
}

impl Location {
    #[must_use]
    pub fn new(offset_start: u32, offset_end: u32, line: u32, column: u32) -> Self {
        Self {
            offset_start,
            offset_end,
            line,
            column,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

macro_rules! node_kinds {
    (
        $(
            $(#[$attr:meta])*
            $variant:ident => $grammar:literal
        ),* $(,)?
    ) => {
        /// Grammar production of an input node.
        ///
        /// One variant per named production of the Python grammar, plus
        /// [`NodeKind::Token`] for anonymous tokens kept because they are bound
        /// to a field (operators, mostly).
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub enum NodeKind {
            $(
                $(#[$attr])*
                $variant,
            )*
            Token,
        }

        impl NodeKind {
            /// Maps a tree-sitter node kind onto a variant.
            #[must_use]
            pub fn from_grammar(kind: &str) -> Option<Self> {
                match kind {
                    $( $grammar => Some(NodeKind::$variant), )*
                    _ => None,
                }
            }

            #[must_use]
            pub fn grammar_name(self) -> &'static str {
                match self {
                    $( NodeKind::$variant => $grammar, )*
                    NodeKind::Token => "token",
                }
            }
        }
    };
}

node_kinds! {
    Module => "module",
    Comment => "comment",
    LineContinuation => "line_continuation",

    // statements
    ExpressionStatement => "expression_statement",
    ImportStatement => "import_statement",
    ImportFromStatement => "import_from_statement",
    FutureImportStatement => "future_import_statement",
    ImportPrefix => "import_prefix",
    RelativeImport => "relative_import",
    AliasedImport => "aliased_import",
    WildcardImport => "wildcard_import",
    DottedName => "dotted_name",
    PrintStatement => "print_statement",
    Chevron => "chevron",
    AssertStatement => "assert_statement",
    ReturnStatement => "return_statement",
    DeleteStatement => "delete_statement",
    RaiseStatement => "raise_statement",
    PassStatement => "pass_statement",
    BreakStatement => "break_statement",
    ContinueStatement => "continue_statement",
    IfStatement => "if_statement",
    ElifClause => "elif_clause",
    ElseClause => "else_clause",
    MatchStatement => "match_statement",
    CaseClause => "case_clause",
    Block => "block",
    ForStatement => "for_statement",
    WhileStatement => "while_statement",
    TryStatement => "try_statement",
    ExceptClause => "except_clause",
    ExceptGroupClause => "except_group_clause",
    FinallyClause => "finally_clause",
    WithStatement => "with_statement",
    WithClause => "with_clause",
    WithItem => "with_item",
    FunctionDefinition => "function_definition",
    Parameters => "parameters",
    LambdaParameters => "lambda_parameters",
    GlobalStatement => "global_statement",
    NonlocalStatement => "nonlocal_statement",
    ExecStatement => "exec_statement",
    TypeAliasStatement => "type_alias_statement",
    ClassDefinition => "class_definition",
    TypeParameter => "type_parameter",
    DecoratedDefinition => "decorated_definition",
    Decorator => "decorator",

    // parameters and patterns
    DefaultParameter => "default_parameter",
    TypedDefaultParameter => "typed_default_parameter",
    TypedParameter => "typed_parameter",
    PositionalSeparator => "positional_separator",
    KeywordSeparator => "keyword_separator",
    ListSplat => "list_splat",
    DictionarySplat => "dictionary_splat",
    ParenthesizedListSplat => "parenthesized_list_splat",
    ListSplatPattern => "list_splat_pattern",
    DictionarySplatPattern => "dictionary_splat_pattern",
    AsPattern => "as_pattern",
    PatternList => "pattern_list",
    TuplePattern => "tuple_pattern",
    ListPattern => "list_pattern",
    CasePattern => "case_pattern",
    ClassPattern => "class_pattern",
    ComplexPattern => "complex_pattern",
    DictPattern => "dict_pattern",
    KeywordPattern => "keyword_pattern",
    SplatPattern => "splat_pattern",
    UnionPattern => "union_pattern",

    // expressions
    ExpressionList => "expression_list",
    NamedExpression => "named_expression",
    NotOperator => "not_operator",
    BooleanOperator => "boolean_operator",
    BinaryOperator => "binary_operator",
    UnaryOperator => "unary_operator",
    ComparisonOperator => "comparison_operator",
    Lambda => "lambda",
    Assignment => "assignment",
    AugmentedAssignment => "augmented_assignment",
    Yield => "yield",
    Await => "await",
    Attribute => "attribute",
    Subscript => "subscript",
    Slice => "slice",
    Ellipsis => "ellipsis",
    Call => "call",
    ArgumentList => "argument_list",
    KeywordArgument => "keyword_argument",
    List => "list",
    Set => "set",
    Tuple => "tuple",
    Dictionary => "dictionary",
    Pair => "pair",
    ListComprehension => "list_comprehension",
    DictionaryComprehension => "dictionary_comprehension",
    SetComprehension => "set_comprehension",
    GeneratorExpression => "generator_expression",
    ForInClause => "for_in_clause",
    IfClause => "if_clause",
    ConditionalExpression => "conditional_expression",
    ParenthesizedExpression => "parenthesized_expression",
    ConcatenatedString => "concatenated_string",
    String => "string",
    StringStart => "string_start",
    StringContent => "string_content",
    StringEnd => "string_end",
    EscapeSequence => "escape_sequence",
    EscapeInterpolation => "escape_interpolation",
    Interpolation => "interpolation",
    FormatSpecifier => "format_specifier",
    FormatExpression => "format_expression",
    TypeConversion => "type_conversion",
    Identifier => "identifier",
    Integer => "integer",
    Float => "float",
    True => "true",
    False => "false",
    None => "none",

    // annotations
    Type => "type",
    GenericType => "generic_type",
    UnionType => "union_type",
    ConstrainedType => "constrained_type",
    MemberType => "member_type",
    SplatType => "splat_type",
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.grammar_name())
    }
}

/// A node of the parsed Python tree.
///
/// Children are kept in document order together with the grammar field they
/// are bound to, if any. Only named children and field-bound anonymous tokens
/// are kept; punctuation and comments are dropped by the builder.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InputNode {
    pub id: InputId,
    pub kind: NodeKind,
    /// Source slice covered by the node.
    pub text: String,
    /// Absent for the module root.
    pub location: Option<Location>,
    pub(crate) children: Vec<(Option<&'static str>, InputId)>,
}

impl InputNode {
    #[must_use]
    pub fn new(
        id: InputId,
        kind: NodeKind,
        text: String,
        location: Option<Location>,
        children: Vec<(Option<&'static str>, InputId)>,
    ) -> Self {
        Self {
            id,
            kind,
            text,
            location,
            children,
        }
    }

    /// First child bound to the grammar field `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<InputId> {
        self.children
            .iter()
            .find(|(field, _)| *field == Some(name))
            .map(|(_, id)| *id)
    }

    /// Every child bound to the grammar field `name`, in document order.
    pub fn fields<'n>(&'n self, name: &'n str) -> impl Iterator<Item = InputId> + 'n {
        self.children
            .iter()
            .filter(move |(field, _)| *field == Some(name))
            .map(|(_, id)| *id)
    }

    /// Children that are not bound to any field.
    pub fn unnamed_children(&self) -> impl Iterator<Item = InputId> + '_ {
        self.children
            .iter()
            .filter(|(field, _)| field.is_none())
            .map(|(_, id)| *id)
    }

    /// All kept children in document order.
    pub fn children(&self) -> impl Iterator<Item = InputId> + '_ {
        self.children.iter().map(|(_, id)| *id)
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }
}

impl Display for InputNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.text)
    }
}
