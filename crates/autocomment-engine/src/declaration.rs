//! Recognized declaration shapes: one variant per declaration kind.

use crate::config::AccessModifier;

/// Kind keyword of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKeyword {
    Class,
    Interface,
    Struct,
    Enum,
}

impl TypeKeyword {
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "struct" => Some(Self::Struct),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Enum => "enum",
        }
    }
}

/// A return or property type token, e.g. `Task<List<int>>?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    /// The token exactly as written
    pub written: String,
    /// Dotted identifier before any generic suffix
    pub base: String,
    /// Raw `<...>` suffix, brackets included
    pub generic: Option<String>,
}

impl TypeRef {
    /// `base` followed by the raw generic suffix.
    pub fn full(&self) -> String {
        match &self.generic {
            Some(generic) => format!("{}{}", self.base, generic),
            None => self.base.clone(),
        }
    }

    /// Text inside the outermost angle brackets, empty when not generic.
    pub fn generic_inner(&self) -> &str {
        self.generic
            .as_deref()
            .and_then(|g| g.strip_prefix('<'))
            .and_then(|g| g.strip_suffix('>'))
            .unwrap_or("")
    }

    pub fn is_void(&self) -> bool {
        self.written == "void"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub indent: String,
    pub access: AccessModifier,
    pub keyword: TypeKeyword,
    pub name: String,
    /// Base type / interface list after `:`, empty when absent
    pub inheritances: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDeclaration {
    pub indent: String,
    pub access: AccessModifier,
    pub name: String,
    /// Text between the parentheses; truncated at end of line when open
    pub raw_parameters: String,
    pub parameters_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub indent: String,
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_async: bool,
    pub return_type: TypeRef,
    pub name: String,
    pub raw_parameters: String,
    pub parameters_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    pub indent: String,
    pub access: AccessModifier,
    pub property_type: TypeRef,
    pub name: String,
    pub has_getter: bool,
    pub has_setter: bool,
    pub has_initer: bool,
}

/// A declaration recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizedDeclaration {
    Type(TypeDeclaration),
    Constructor(ConstructorDeclaration),
    Method(MethodDeclaration),
    Property(PropertyDeclaration),
}

impl RecognizedDeclaration {
    pub fn indent(&self) -> &str {
        match self {
            Self::Type(d) => &d.indent,
            Self::Constructor(d) => &d.indent,
            Self::Method(d) => &d.indent,
            Self::Property(d) => &d.indent,
        }
    }

    pub fn access(&self) -> AccessModifier {
        match self {
            Self::Type(d) => d.access,
            Self::Constructor(d) => d.access,
            Self::Method(d) => d.access,
            Self::Property(d) => d.access,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Type(d) => &d.name,
            Self::Constructor(d) => &d.name,
            Self::Method(d) => &d.name,
            Self::Property(d) => &d.name,
        }
    }

    /// Parameter text captured on the declaration line.
    pub fn raw_parameters(&self) -> Option<&str> {
        match self {
            Self::Constructor(d) => Some(&d.raw_parameters),
            Self::Method(d) => Some(&d.raw_parameters),
            Self::Type(_) | Self::Property(_) => None,
        }
    }

    /// True when the parameter list continues on following lines.
    pub fn is_open(&self) -> bool {
        match self {
            Self::Constructor(d) => !d.parameters_complete,
            Self::Method(d) => !d.parameters_complete,
            Self::Type(_) | Self::Property(_) => false,
        }
    }
}
