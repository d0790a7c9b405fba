//! Sparse per-node metadata.
//!
//! Dozens of annotation kinds exist, but a live node usually carries zero to three
//! of them, so each node keeps a small inline list of set entries instead of a
//! struct of mostly-unset fields. Lookups are linear in the number of entries set
//! on that node, which stays tiny in practice.

use std::{any::Any, rc::Rc};

use crate::node::NodeId;

macro_rules! props {
    (
        $(
            $(#[$attr:meta])*
            $variant:ident = $id:literal => $name:literal
        ),* $(,)?
    ) => {
        /// Property key. The discriminant is the stable numeric id used for ordering.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[repr(u8)]
        pub enum Prop {
            $(
                $(#[$attr])*
                $variant = $id,
            )*
        }

        impl Prop {
            pub const ALL: &'static [Prop] = &[$(Prop::$variant,)*];

            /// Human-readable name used by debug output.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Prop::$variant => $name,)*
                }
            }
        }
    };
}

props! {
    /// Attached documentation comment.
    JsDocInfo = 1 => "jsdoc_info",
    /// Name of a variadic parameter.
    VarArgsName = 2 => "var_args_name",
    /// Set on INC/DEC when the operator is postfix.
    IncrDecr = 3 => "incrdecr",
    /// A string key or property name that was quoted in source.
    Quoted = 4 => "quoted",
    OptArgName = 5 => "opt_arg",
    Synthetic = 6 => "synthetic",
    AddedBlock = 7 => "added_block",
    /// Name before renaming passes ran.
    OriginalName = 8 => "originalname",
    SideEffectFlags = 9 => "side_effect_flags",
    IsConstantName = 10 => "is_constant_name",
    IsNamespace = 11 => "is_namespace",
    Directives = 12 => "directives",
    DirectEval = 13 => "direct_eval",
    FreeCall = 14 => "free_call",
    SourceFile = 15 => "source_file",
    InputId = 16 => "input_id",
    ChangeTime = 17 => "change_time",
    ReflectedObject = 18 => "reflected_object",
    StaticMember = 19 => "static_member",
    GeneratorFn = 20 => "generator_fn",
    ArrowFn = 21 => "arrow_fn",
    AsyncFn = 22 => "async_fn",
    YieldAll = 23 => "yield_all",
    ExportDefault = 24 => "export_default",
    ExportAllFrom = 25 => "export_all_from",
    IsConstantVar = 26 => "is_constant_var",
    GeneratorMarker = 27 => "is_generator_marker",
    GeneratorSafe = 28 => "is_generator_safe",
    ComputedPropMethod = 29 => "computed_prop_method",
    ComputedPropGetter = 30 => "computed_prop_getter",
    ComputedPropSetter = 31 => "computed_prop_setter",
    ComputedPropVariable = 32 => "computed_prop_variable",
    ConstantPropertyDef = 33 => "constant_property_def",
    DeclaredTypeExpr = 34 => "declared_type_expr",
    TypeBeforeCast = 35 => "type_before_cast",
    DeclaredType = 36 => "declared_type",
    GenericTypeList = 37 => "generic_type_list",
    ImplementsList = 38 => "implements",
    ConstructSignature = 39 => "construct_signature",
    AccessModifier = 40 => "access_modifier",
    NonIndexable = 41 => "non_indexable",
    ParseResults = 42 => "parse_results",
    GoogModule = 43 => "goog_module",
    FeatureSet = 44 => "feature_set",
    IsModuleName = 45 => "is_module_name",
    WasPreviouslyProvided = 46 => "was_previously_provided",
    IsClass = 47 => "is_class",
    Transpiled = 48 => "transpiled",
    Deleted = 49 => "deleted",
    ModuleAlias = 50 => "module_alias",
    IsUnusedParameter = 51 => "is_unused_parameter",
    ModuleExport = 52 => "module_export",
    IsShorthandProperty = 53 => "is_shorthand_property",
    StartOfOptChain = 54 => "start_of_opt_chain",
    TrailingComma = 55 => "trailing_comma",
    Length = 56 => "length",
}

/// Object half of a property value.
#[derive(Clone, Debug)]
pub enum PropObject {
    Text(Rc<str>),
    /// A node in the same arena; never recursed into by debug output.
    Node(NodeId),
    /// Pass-private data the tree only carries around.
    Opaque(Rc<dyn Any>),
}

impl PartialEq for PropObject {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropObject::Text(a), PropObject::Text(b)) => a == b,
            (PropObject::Node(a), PropObject::Node(b)) => a == b,
            (PropObject::Opaque(a), PropObject::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PropEntry {
    pub key: Prop,
    pub int_value: i32,
    pub object: Option<PropObject>,
}

/// The set entries of one node, keyed by [`Prop`]. Keys are unique.
#[derive(Clone, Debug, Default)]
pub struct PropertyList {
    entries: Vec<PropEntry>,
}

impl PartialEq for PropertyList {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|e| other.entry(e.key).is_some_and(|o| o == e))
    }
}

impl PropertyList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: Prop) -> bool {
        self.entry(key).is_some()
    }

    #[must_use]
    pub fn entry(&self, key: Prop) -> Option<&PropEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    #[must_use]
    pub fn get_bool(&self, key: Prop) -> bool {
        self.get_int(key, 0) != 0
    }

    #[must_use]
    pub fn get_int(&self, key: Prop, default: i32) -> i32 {
        self.entry(key).map_or(default, |e| e.int_value)
    }

    #[must_use]
    pub fn get_object(&self, key: Prop) -> Option<&PropObject> {
        self.entry(key).and_then(|e| e.object.as_ref())
    }

    /// Sets a flag. Clearing a flag drops its entry.
    pub fn put_bool(&mut self, key: Prop, value: bool) {
        if value {
            self.put_int(key, 1);
        } else {
            self.remove(key);
        }
    }

    pub fn put_int(&mut self, key: Prop, value: i32) {
        self.entry_mut(key).int_value = value;
    }

    pub fn put_object(&mut self, key: Prop, value: PropObject) {
        self.entry_mut(key).object = Some(value);
    }

    /// Removes `key`, returning its entry if it was set.
    pub fn remove(&mut self, key: Prop) -> Option<PropEntry> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index))
    }

    /// Set keys in ascending id order. Only meant for deterministic output.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<Prop> {
        let mut keys: Vec<Prop> = self.entries.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropEntry> {
        self.entries.iter()
    }

    /// Finds `key`, or creates it at the head of the list.
    fn entry_mut(&mut self, key: Prop) -> &mut PropEntry {
        let index = match self.entries.iter().position(|e| e.key == key) {
            Some(index) => index,
            None => {
                self.entries.insert(
                    0,
                    PropEntry {
                        key,
                        int_value: 0,
                        object: None,
                    },
                );
                0
            }
        };
        &mut self.entries[index]
    }
}
