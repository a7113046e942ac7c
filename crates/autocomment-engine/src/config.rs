//! Template configuration for a generation pass.
//!
//! One template string per declaration kind plus the set of access modifiers
//! that receive comments. The persisted form lives with the caller; the engine
//! only reads a resolved [`TemplateConfig`] snapshot.

// -- Stock templates ----------------------------------------------------------

pub const DEFAULT_CLASS_TEMPLATE: &str = "/// <summary>{nl}/// The {name} {type}.{nl}/// </summary>";

pub const DEFAULT_CONSTRUCTOR_TEMPLATE: &str = "/// <summary>{nl}/// Initializes a new instance of the <see cref=\"{name}\"/> class.{nl}/// </summary>{parameters}";

pub const DEFAULT_METHOD_TEMPLATE: &str = "/// <summary>{nl}/// {name}.{nl}/// </summary>{parameters}{returns}";

pub const DEFAULT_PARAMETER_TEMPLATE: &str = "/// <param name=\"{name}\">The {name}.</param>";

pub const DEFAULT_RETURNS_TEMPLATE: &str = "/// <returns>A <see cref=\"{baseType}\"/>.</returns>";

pub const DEFAULT_GET_TEMPLATE: &str = "/// <summary>{nl}/// Gets the {name}.{nl}/// </summary>";

pub const DEFAULT_GET_SET_TEMPLATE: &str = "/// <summary>{nl}/// Gets or sets the {name}.{nl}/// </summary>";

pub const DEFAULT_GET_INIT_TEMPLATE: &str = "/// <summary>{nl}/// Gets or initializes the {name}.{nl}/// </summary>";

pub const DEFAULT_SET_TEMPLATE: &str = "/// <summary>{nl}/// Sets the {name}.{nl}/// </summary>";

pub const DEFAULT_INIT_TEMPLATE: &str = "/// <summary>{nl}/// Initializes the {name}.{nl}/// </summary>";

// -- Access modifiers ---------------------------------------------------------

/// Visibility keyword captured from a declaration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessModifier {
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    Private,
    PrivateProtected,
}

impl AccessModifier {
    pub const ALL: [AccessModifier; 6] = [
        AccessModifier::Public,
        AccessModifier::Internal,
        AccessModifier::Protected,
        AccessModifier::ProtectedInternal,
        AccessModifier::Private,
        AccessModifier::PrivateProtected,
    ];

    /// Parse modifier text as captured from source. Words may be separated by
    /// any whitespace run and two-word forms are accepted in either order.
    pub fn parse(text: &str) -> Option<Self> {
        let words: Vec<&str> = text.split_whitespace().collect();
        match words.as_slice() {
            ["public"] => Some(Self::Public),
            ["internal"] => Some(Self::Internal),
            ["protected"] => Some(Self::Protected),
            ["private"] => Some(Self::Private),
            ["protected", "internal"] | ["internal", "protected"] => Some(Self::ProtectedInternal),
            ["private", "protected"] | ["protected", "private"] => Some(Self::PrivateProtected),
            _ => None,
        }
    }

    /// Canonical source spelling, used for the `{access}` placeholder.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Protected => "protected",
            Self::ProtectedInternal => "protected internal",
            Self::Private => "private",
            Self::PrivateProtected => "private protected",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of access modifiers for which comments are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessModifiers(u8);

impl AccessModifiers {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        AccessModifier::ALL.into_iter().collect()
    }

    pub fn contains(&self, modifier: AccessModifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn insert(&mut self, modifier: AccessModifier) {
        self.0 |= modifier.bit();
    }

    pub fn remove(&mut self, modifier: AccessModifier) {
        self.0 &= !modifier.bit();
    }

    /// Builder form of [`insert`](Self::insert) / [`remove`](Self::remove).
    pub fn with(mut self, modifier: AccessModifier, enabled: bool) -> Self {
        if enabled {
            self.insert(modifier);
        } else {
            self.remove(modifier);
        }
        self
    }
}

impl Default for AccessModifiers {
    /// Public surface only: everything except `private` and `private protected`.
    fn default() -> Self {
        [
            AccessModifier::Public,
            AccessModifier::Internal,
            AccessModifier::Protected,
            AccessModifier::ProtectedInternal,
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<AccessModifier> for AccessModifiers {
    fn from_iter<I: IntoIterator<Item = AccessModifier>>(iter: I) -> Self {
        let mut set = Self::empty();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

// -- Template configuration ---------------------------------------------------

/// Read-only template snapshot for one pass.
///
/// Placeholders use `{name}` syntax. The type template also serves enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    pub class: String,
    pub constructor: String,
    pub method: String,
    pub parameter: String,
    pub returns: String,
    pub get: String,
    pub get_set: String,
    pub get_init: String,
    pub set: String,
    pub init: String,
    pub enabled: AccessModifiers,
}

impl TemplateConfig {
    /// Whether declarations with this modifier receive a comment.
    pub fn allows(&self, modifier: AccessModifier) -> bool {
        self.enabled.contains(modifier)
    }

    /// Template for a property accessor combination.
    ///
    /// Only the five combinations below have a template. No accessor at all,
    /// or a setter together with an initer, yields `None`.
    pub fn property_template(&self, getter: bool, setter: bool, initer: bool) -> Option<&str> {
        match (getter, setter, initer) {
            (true, false, false) => Some(&self.get),
            (true, true, false) => Some(&self.get_set),
            (true, false, true) => Some(&self.get_init),
            (false, true, false) => Some(&self.set),
            (false, false, true) => Some(&self.init),
            _ => None,
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            class: DEFAULT_CLASS_TEMPLATE.to_string(),
            constructor: DEFAULT_CONSTRUCTOR_TEMPLATE.to_string(),
            method: DEFAULT_METHOD_TEMPLATE.to_string(),
            parameter: DEFAULT_PARAMETER_TEMPLATE.to_string(),
            returns: DEFAULT_RETURNS_TEMPLATE.to_string(),
            get: DEFAULT_GET_TEMPLATE.to_string(),
            get_set: DEFAULT_GET_SET_TEMPLATE.to_string(),
            get_init: DEFAULT_GET_INIT_TEMPLATE.to_string(),
            set: DEFAULT_SET_TEMPLATE.to_string(),
            init: DEFAULT_INIT_TEMPLATE.to_string(),
            enabled: AccessModifiers::default(),
        }
    }
}
