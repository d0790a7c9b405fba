//! The closed set of node kinds.
//!
//! Every node carries one [`Kind`]. A handful of kinds require a payload: text
//! kinds (identifiers, string and regex literals, named members) and the numeric
//! literal kind. [`Kind::variant`] tells which payload shape a kind demands, and the
//! arena refuses to build a node whose payload does not match.

use core::fmt;
use std::fmt::{Display, Formatter};

/// Payload shape demanded by a [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// No payload; the kind alone carries the meaning.
    Generic,
    /// A required, non-null text value.
    Text,
    /// A required numeric value.
    Number,
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Generic => write!(f, "generic"),
            Variant::Text => write!(f, "text"),
            Variant::Number => write!(f, "number"),
        }
    }
}

macro_rules! kinds {
    (@variant) => { Variant::Generic };
    (@variant text) => { Variant::Text };
    (@variant number) => { Variant::Number };

    (
        $(
            $(#[$attr:meta])*
            $variant:ident = $name:literal $(: $payload:ident)?
        ),* $(,)?
    ) => {
        /// Syntactic or semantic role of a node.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[repr(u8)]
        pub enum Kind {
            $(
                $(#[$attr])*
                $variant,
            )*
        }

        impl Kind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [Kind] = &[$(Kind::$variant,)*];

            /// Diagnostic name, e.g. `PARAM_LIST`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Kind::$variant => $name,)*
                }
            }

            #[must_use]
            pub const fn variant(self) -> Variant {
                match self {
                    $(Kind::$variant => kinds!(@variant $($payload)?),)*
                }
            }
        }
    };
}

kinds! {
    // Top level
    Root = "ROOT",
    Script = "SCRIPT",
    ModuleBody = "MODULE_BODY",

    // Statements
    Block = "BLOCK",
    Empty = "EMPTY",
    ExprResult = "EXPR_RESULT",
    Var = "VAR",
    Let = "LET",
    Const = "CONST",
    If = "IF",
    Switch = "SWITCH",
    Case = "CASE",
    DefaultCase = "DEFAULT_CASE",
    While = "WHILE",
    Do = "DO",
    For = "FOR",
    ForIn = "FOR_IN",
    ForOf = "FOR_OF",
    ForAwaitOf = "FOR_AWAIT_OF",
    Break = "BREAK",
    Continue = "CONTINUE",
    Return = "RETURN",
    Throw = "THROW",
    Try = "TRY",
    Catch = "CATCH",
    With = "WITH",
    Label = "LABEL",
    LabelName = "LABEL_NAME": text,
    Debugger = "DEBUGGER",

    // Functions and classes
    Function = "FUNCTION",
    ParamList = "PARAM_LIST",
    Class = "CLASS",
    ClassMembers = "CLASS_MEMBERS",
    Extends = "EXTENDS",
    MemberFunctionDef = "MEMBER_FUNCTION_DEF": text,
    MemberFieldDef = "MEMBER_FIELD_DEF": text,
    ComputedProp = "COMPUTED_PROP",
    ComputedFieldDef = "COMPUTED_FIELD_DEF",
    GetterDef = "GETTER_DEF": text,
    SetterDef = "SETTER_DEF": text,
    Super = "SUPER",
    NewTarget = "NEW_TARGET",
    Yield = "YIELD",
    Await = "AWAIT",

    // Literals and atoms
    Name = "NAME": text,
    String = "STRING": text,
    Number = "NUMBER": number,
    BigInt = "BIGINT": text,
    Regexp = "REGEXP": text,
    Null = "NULL",
    This = "THIS",
    True = "TRUE",
    False = "FALSE",
    ArrayLit = "ARRAYLIT",
    ObjectLit = "OBJECTLIT",
    StringKey = "STRING_KEY": text,
    TemplateLit = "TEMPLATELIT",
    TemplateLitSub = "TEMPLATELIT_SUB",
    TemplateLitString = "TEMPLATELIT_STRING": text,
    TaggedTemplateLit = "TAGGED_TEMPLATELIT",

    // Member access and calls
    GetProp = "GETPROP",
    GetElem = "GETELEM",
    OptChainGetProp = "OPTCHAIN_GETPROP",
    OptChainGetElem = "OPTCHAIN_GETELEM",
    OptChainCall = "OPTCHAIN_CALL",
    Call = "CALL",
    New = "NEW",
    DynamicImport = "DYNAMIC_IMPORT",
    ImportMeta = "IMPORT_META",

    // Unary operators
    Not = "NOT",
    BitNot = "BITNOT",
    Pos = "POS",
    Neg = "NEG",
    TypeOf = "TYPEOF",
    Void = "VOID",
    DelProp = "DELPROP",
    Inc = "INC",
    Dec = "DEC",

    // Binary operators
    BitOr = "BITOR",
    BitXor = "BITXOR",
    BitAnd = "BITAND",
    Eq = "EQ",
    Ne = "NE",
    ShEq = "SHEQ",
    ShNe = "SHNE",
    Lt = "LT",
    Le = "LE",
    Gt = "GT",
    Ge = "GE",
    Lsh = "LSH",
    Rsh = "RSH",
    Ursh = "URSH",
    Add = "ADD",
    Sub = "SUB",
    Mul = "MUL",
    Div = "DIV",
    Mod = "MOD",
    Exponent = "EXPONENT",
    In = "IN",
    InstanceOf = "INSTANCEOF",
    Or = "OR",
    And = "AND",
    Coalesce = "COALESCE",
    Comma = "COMMA",
    Hook = "HOOK",

    // Assignment
    Assign = "ASSIGN",
    AssignBitOr = "ASSIGN_BITOR",
    AssignBitXor = "ASSIGN_BITXOR",
    AssignBitAnd = "ASSIGN_BITAND",
    AssignLsh = "ASSIGN_LSH",
    AssignRsh = "ASSIGN_RSH",
    AssignUrsh = "ASSIGN_URSH",
    AssignAdd = "ASSIGN_ADD",
    AssignSub = "ASSIGN_SUB",
    AssignMul = "ASSIGN_MUL",
    AssignDiv = "ASSIGN_DIV",
    AssignMod = "ASSIGN_MOD",
    AssignExponent = "ASSIGN_EXPONENT",
    AssignOr = "ASSIGN_OR",
    AssignAnd = "ASSIGN_AND",
    AssignCoalesce = "ASSIGN_COALESCE",

    // Destructuring and spread
    ArrayPattern = "ARRAY_PATTERN",
    ObjectPattern = "OBJECT_PATTERN",
    DestructuringLhs = "DESTRUCTURING_LHS",
    DefaultValue = "DEFAULT_VALUE",
    IterRest = "ITER_REST",
    ObjectRest = "OBJECT_REST",
    IterSpread = "ITER_SPREAD",
    ObjectSpread = "OBJECT_SPREAD",

    // Modules
    Import = "IMPORT",
    ImportSpecs = "IMPORT_SPECS",
    ImportSpec = "IMPORT_SPEC",
    ImportStar = "IMPORT_STAR": text,
    Export = "EXPORT",
    ExportSpecs = "EXPORT_SPECS",
    ExportSpec = "EXPORT_SPEC",

    // Type annotation syntax
    Cast = "CAST",
    StringType = "STRING_TYPE",
    BooleanType = "BOOLEAN_TYPE",
    NumberType = "NUMBER_TYPE",
    AnyType = "ANY_TYPE",
    VoidType = "VOID_TYPE",
    UndefinedType = "UNDEFINED_TYPE",
    NamedType = "NAMED_TYPE",
    ArrayType = "ARRAY_TYPE",
    FunctionType = "FUNCTION_TYPE",
    ParameterizedType = "PARAMETERIZED_TYPE",
    UnionType = "UNION_TYPE",
    NullableType = "NULLABLE_TYPE",
    RecordType = "RECORD_TYPE",
    RestParameterType = "REST_PARAMETER_TYPE",
    OptionalParameter = "OPTIONAL_PARAMETER",
    GenericType = "GENERIC_TYPE",
    GenericTypeList = "GENERIC_TYPE_LIST",
    Interface = "INTERFACE",
    InterfaceExtends = "INTERFACE_EXTENDS",
    InterfaceMembers = "INTERFACE_MEMBERS",
    Enum = "ENUM",
    EnumMembers = "ENUM_MEMBERS",
    TypeAlias = "TYPE_ALIAS",
    IndexSignature = "INDEX_SIGNATURE",
    CallSignature = "CALL_SIGNATURE",
    Namespace = "NAMESPACE",
    NamespaceElements = "NAMESPACE_ELEMENTS",
    Declare = "DECLARE",

    // Doc-comment type expressions
    Bang = "BANG",
    Qmark = "QMARK",
    Ellipsis = "ELLIPSIS",
    Pipe = "PIPE",
    Star = "STAR",
    Equals = "EQUALS",
}

impl Kind {
    #[must_use]
    pub const fn has_payload(self) -> bool {
        !matches!(self.variant(), Variant::Generic)
    }

    #[must_use]
    pub const fn is_function(self) -> bool {
        matches!(self, Kind::Function)
    }

    #[must_use]
    pub const fn is_declaration(self) -> bool {
        matches!(self, Kind::Var | Kind::Let | Kind::Const)
    }

    #[must_use]
    pub const fn is_assign_op(self) -> bool {
        matches!(
            self,
            Kind::Assign
                | Kind::AssignBitOr
                | Kind::AssignBitXor
                | Kind::AssignBitAnd
                | Kind::AssignLsh
                | Kind::AssignRsh
                | Kind::AssignUrsh
                | Kind::AssignAdd
                | Kind::AssignSub
                | Kind::AssignMul
                | Kind::AssignDiv
                | Kind::AssignMod
                | Kind::AssignExponent
                | Kind::AssignOr
                | Kind::AssignAnd
                | Kind::AssignCoalesce
        )
    }

    /// Whether a node of this kind may appear directly in a statement list.
    #[must_use]
    pub const fn may_be_statement(self) -> bool {
        matches!(
            self,
            Kind::Block
                | Kind::Empty
                | Kind::ExprResult
                | Kind::Var
                | Kind::Let
                | Kind::Const
                | Kind::If
                | Kind::Switch
                | Kind::While
                | Kind::Do
                | Kind::For
                | Kind::ForIn
                | Kind::ForOf
                | Kind::ForAwaitOf
                | Kind::Break
                | Kind::Continue
                | Kind::Return
                | Kind::Throw
                | Kind::Try
                | Kind::With
                | Kind::Label
                | Kind::Debugger
                | Kind::Function
                | Kind::Class
                | Kind::Import
                | Kind::Export
                | Kind::Interface
                | Kind::Enum
                | Kind::TypeAlias
                | Kind::Namespace
                | Kind::Declare
        )
    }

    /// Whether a node of this kind may be used as a value.
    #[must_use]
    pub const fn may_be_expression(self) -> bool {
        matches!(
            self,
            Kind::Function
                | Kind::Class
                | Kind::Name
                | Kind::String
                | Kind::Number
                | Kind::BigInt
                | Kind::Regexp
                | Kind::Null
                | Kind::This
                | Kind::True
                | Kind::False
                | Kind::ArrayLit
                | Kind::ObjectLit
                | Kind::TemplateLit
                | Kind::TaggedTemplateLit
                | Kind::GetProp
                | Kind::GetElem
                | Kind::OptChainGetProp
                | Kind::OptChainGetElem
                | Kind::OptChainCall
                | Kind::Call
                | Kind::New
                | Kind::DynamicImport
                | Kind::ImportMeta
                | Kind::NewTarget
                | Kind::Super
                | Kind::Yield
                | Kind::Await
                | Kind::Cast
                | Kind::Not
                | Kind::BitNot
                | Kind::Pos
                | Kind::Neg
                | Kind::TypeOf
                | Kind::Void
                | Kind::DelProp
                | Kind::Inc
                | Kind::Dec
                | Kind::BitOr
                | Kind::BitXor
                | Kind::BitAnd
                | Kind::Eq
                | Kind::Ne
                | Kind::ShEq
                | Kind::ShNe
                | Kind::Lt
                | Kind::Le
                | Kind::Gt
                | Kind::Ge
                | Kind::Lsh
                | Kind::Rsh
                | Kind::Ursh
                | Kind::Add
                | Kind::Sub
                | Kind::Mul
                | Kind::Div
                | Kind::Mod
                | Kind::Exponent
                | Kind::In
                | Kind::InstanceOf
                | Kind::Or
                | Kind::And
                | Kind::Coalesce
                | Kind::Comma
                | Kind::Hook
        ) || self.is_assign_op()
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
