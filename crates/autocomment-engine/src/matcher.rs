//! Declaration matcher: classifies one line of C# source.
//!
//! Purely syntactic: a line is tested against one pattern per declaration
//! shape in a fixed order and the first match wins. Surrounding lines are
//! never consulted; cross-line context belongs to the scanner.

use crate::config::AccessModifier;
use crate::declaration::*;
use crate::params::ListDepth;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// -- Pattern fragments --------------------------------------------------------

const INDENT: &str = r"^(?P<indent>[\t\f\v ]*)";

// Two-word modifiers must be tried before their one-word prefixes.
const ACCESS: &str = r"(?P<access>public|internal\s+protected|internal|protected\s+internal|protected\s+private|protected|private\s+protected|private)";

const TYPE_MODIFIERS: &str = r"(?:(?:static|abstract|sealed|partial|readonly|unsafe|ref|new)\s+)*";

const METHOD_MODIFIERS: &str =
    r"(?P<mods>(?:(?:static|async|virtual|override|abstract|sealed|new|extern|unsafe|partial)\s+)*)";

const PROPERTY_MODIFIERS: &str =
    r"(?:(?:static|virtual|override|abstract|sealed|new|required|readonly|unsafe|extern)\s+)*";

const TYPE_TOKEN: &str =
    r"(?P<type>(?P<base>\w+(?:\.\w+)*)(?P<generic><[\w\s,.?<>\[\]]*>)?\??(?:\[[,\s]*\])*\??)";

const ACCESSOR_MODIFIER: &str = r"(?:(?:private|protected|internal)\s+)?";

// -- Regex patterns -----------------------------------------------------------

static RE_EXISTING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\t\f\v ]*///").unwrap());

static RE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\t\f\v ]*\[").unwrap());

static RE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{INDENT}{ACCESS}\s+{TYPE_MODIFIERS}(?P<kind>class|interface|struct|enum)\s+(?P<name>\w+)(?:\s*<[^>]*>)?(?:\s*:\s*(?P<inherits>[\w.]+(?:<[\w\s,.<>]*>)?(?:\s*,\s*[\w.]+(?:<[\w\s,.<>]*>)?)*))?"
    ))
    .unwrap()
});

// Declaration heads stop at the list's opening `(`; `parameter_list` finds
// the matching `)`.
static RE_CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{INDENT}{ACCESS}\s+(?P<name>\w+)\s*\(")).unwrap()
});

static RE_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{INDENT}{ACCESS}\s+{METHOD_MODIFIERS}{TYPE_TOKEN}\s+(?P<name>\w+)\s*(?:<[^<>()]*>)?\s*\("
    ))
    .unwrap()
});

static RE_PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{INDENT}{ACCESS}\s+{PROPERTY_MODIFIERS}{TYPE_TOKEN}\s+(?P<name>\w+)\s*\{{\s*(?P<get>get;)?\s*(?P<set>{ACCESSOR_MODIFIER}set;)?\s*(?P<init>{ACCESSOR_MODIFIER}init;)?\s*\}}"
    ))
    .unwrap()
});

// -- Classification -----------------------------------------------------------

/// Classification of a single source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// A `///` documentation comment line
    ExistingComment,
    /// A line opening with `[`
    Attribute,
    Declaration(RecognizedDeclaration),
    /// Body code, blank lines, anything unrecognized
    Other,
}

/// Classify a line. Comment and attribute checks take priority over the
/// declaration patterns.
pub fn classify(line: &str) -> LineClass {
    if is_existing_comment(line) {
        return LineClass::ExistingComment;
    }
    if is_attribute(line) {
        return LineClass::Attribute;
    }
    match match_declaration(line) {
        Some(decl) => LineClass::Declaration(decl),
        None => LineClass::Other,
    }
}

pub fn is_existing_comment(line: &str) -> bool {
    RE_EXISTING_COMMENT.is_match(line)
}

pub fn is_attribute(line: &str) -> bool {
    RE_ATTRIBUTE.is_match(line)
}

/// Try every declaration pattern in precedence order:
/// type, constructor, method, property. Constructors and methods are open
/// when their parameter list does not close on this line.
pub fn match_declaration(line: &str) -> Option<RecognizedDeclaration> {
    if let Some(caps) = RE_TYPE.captures(line) {
        return type_declaration(&caps);
    }
    if let Some(caps) = RE_CONSTRUCTOR.captures(line) {
        return constructor(&caps, parameter_list(line, &caps));
    }
    if let Some(caps) = RE_METHOD.captures(line) {
        return method(&caps, parameter_list(line, &caps));
    }
    if let Some(caps) = RE_PROPERTY.captures(line) {
        return property(&caps);
    }
    None
}

// -- Capture extraction -------------------------------------------------------

fn type_declaration(caps: &Captures) -> Option<RecognizedDeclaration> {
    Some(RecognizedDeclaration::Type(TypeDeclaration {
        indent: group(caps, "indent"),
        access: access(caps)?,
        keyword: TypeKeyword::parse(&caps["kind"])?,
        name: group(caps, "name"),
        inheritances: group(caps, "inherits"),
    }))
}

fn constructor(caps: &Captures, (raw, complete): (String, bool)) -> Option<RecognizedDeclaration> {
    Some(RecognizedDeclaration::Constructor(ConstructorDeclaration {
        indent: group(caps, "indent"),
        access: access(caps)?,
        name: group(caps, "name"),
        raw_parameters: raw,
        parameters_complete: complete,
    }))
}

fn method(caps: &Captures, (raw, complete): (String, bool)) -> Option<RecognizedDeclaration> {
    let mods = group(caps, "mods");
    let has_modifier = |keyword: &str| mods.split_whitespace().any(|m| m == keyword);
    Some(RecognizedDeclaration::Method(MethodDeclaration {
        indent: group(caps, "indent"),
        access: access(caps)?,
        is_static: has_modifier("static"),
        is_async: has_modifier("async"),
        return_type: type_ref(caps),
        name: group(caps, "name"),
        raw_parameters: raw,
        parameters_complete: complete,
    }))
}

fn property(caps: &Captures) -> Option<RecognizedDeclaration> {
    Some(RecognizedDeclaration::Property(PropertyDeclaration {
        indent: group(caps, "indent"),
        access: access(caps)?,
        property_type: type_ref(caps),
        name: group(caps, "name"),
        has_getter: caps.name("get").is_some(),
        has_setter: caps.name("set").is_some(),
        has_initer: caps.name("init").is_some(),
    }))
}

/// Text between the head's `(` and its matching `)`, and whether that `)`
/// is on this line. An open list runs to the end of the line.
fn parameter_list(line: &str, caps: &Captures) -> (String, bool) {
    let rest = &line[caps.get(0).map_or(line.len(), |m| m.end())..];
    match ListDepth::opened().advance(rest) {
        Some(close) => (rest[..close].to_string(), true),
        None => (rest.to_string(), false),
    }
}

fn type_ref(caps: &Captures) -> TypeRef {
    TypeRef {
        written: group(caps, "type"),
        base: group(caps, "base"),
        generic: caps.name("generic").map(|m| m.as_str().to_string()),
    }
}

fn access(caps: &Captures) -> Option<AccessModifier> {
    AccessModifier::parse(&caps["access"])
}

fn group(caps: &Captures, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(line: &str) -> RecognizedDeclaration {
        match_declaration(line).unwrap_or_else(|| panic!("no match: {line:?}"))
    }

    #[test]
    fn existing_comment_any_leading_whitespace() {
        assert!(is_existing_comment("/// <summary>"));
        assert!(is_existing_comment("    /// text"));
        assert!(is_existing_comment("\t\x0c\x0b///"));
        assert!(!is_existing_comment("// plain comment"));
        assert!(!is_existing_comment("int x; /// trailing"));
    }

    #[test]
    fn attribute_line() {
        assert!(is_attribute("[Obsolete]"));
        assert!(is_attribute("    [JsonProperty(\"id\")]"));
        assert!(!is_attribute("int[] values;"));
        assert_eq!(classify("  [Serializable]"), LineClass::Attribute);
    }

    #[test]
    fn comment_takes_priority_over_declaration() {
        assert_eq!(classify("/// public class Foo"), LineClass::ExistingComment);
        assert_eq!(classify("{"), LineClass::Other);
        assert_eq!(classify(""), LineClass::Other);
    }

    #[test]
    fn type_declaration_captures() {
        let RecognizedDeclaration::Type(t) = decl("    public sealed partial class Repo<T> : Base<T>, IDisposable") else {
            panic!("expected type");
        };
        assert_eq!(t.indent, "    ");
        assert_eq!(t.access, AccessModifier::Public);
        assert_eq!(t.keyword, TypeKeyword::Class);
        assert_eq!(t.name, "Repo");
        assert_eq!(t.inheritances, "Base<T>, IDisposable");
    }

    #[test]
    fn type_keywords() {
        for (line, keyword) in [
            ("internal interface IShape", TypeKeyword::Interface),
            ("public readonly struct Point", TypeKeyword::Struct),
            ("public enum Color : byte", TypeKeyword::Enum),
            ("public static class Extensions", TypeKeyword::Class),
        ] {
            let RecognizedDeclaration::Type(t) = decl(line) else {
                panic!("expected type for {line}");
            };
            assert_eq!(t.keyword, keyword);
        }
    }

    #[test]
    fn constructor_complete() {
        let RecognizedDeclaration::Constructor(c) = decl("    public Foo(int a, string b) : base(a)") else {
            panic!("expected constructor");
        };
        assert_eq!(c.name, "Foo");
        assert_eq!(c.raw_parameters, "int a, string b");
        assert!(c.parameters_complete);
    }

    #[test]
    fn constructor_open() {
        let d = decl("    protected internal Foo(int a,");
        assert!(d.is_open());
        assert_eq!(d.access(), AccessModifier::ProtectedInternal);
        let RecognizedDeclaration::Constructor(c) = d else {
            panic!("expected constructor");
        };
        assert_eq!(c.raw_parameters, "int a,");
    }

    #[test]
    fn method_complete_with_modifiers() {
        let RecognizedDeclaration::Method(m) =
            decl("        public static async Task<List<int>> LoadAsync<T>(string path, CancellationToken token)")
        else {
            panic!("expected method");
        };
        assert!(m.is_static);
        assert!(m.is_async);
        assert_eq!(m.return_type.written, "Task<List<int>>");
        assert_eq!(m.return_type.base, "Task");
        assert_eq!(m.return_type.generic_inner(), "List<int>");
        assert_eq!(m.name, "LoadAsync");
        assert_eq!(m.raw_parameters, "string path, CancellationToken token");
        assert!(m.parameters_complete);
    }

    #[test]
    fn method_nullable_and_array_returns() {
        let RecognizedDeclaration::Method(m) = decl("public string? Find(int id)") else {
            panic!("expected method");
        };
        assert_eq!(m.return_type.written, "string?");
        assert_eq!(m.return_type.base, "string");
        let RecognizedDeclaration::Method(m) = decl("public override byte[] ToArray()") else {
            panic!("expected method");
        };
        assert_eq!(m.return_type.written, "byte[]");
        assert!(!m.is_static);
    }

    #[test]
    fn nested_parentheses_do_not_close_the_list() {
        let RecognizedDeclaration::Method(m) =
            decl("public void Set([Range(1, 10)] int level, string name) {}")
        else {
            panic!("expected method");
        };
        assert!(m.parameters_complete);
        assert_eq!(m.raw_parameters, "[Range(1, 10)] int level, string name");

        let RecognizedDeclaration::Constructor(c) =
            decl("public Job(CancellationToken token = default(CancellationToken), string tag)")
        else {
            panic!("expected constructor");
        };
        assert!(c.parameters_complete);
        assert_eq!(c.raw_parameters, "CancellationToken token = default(CancellationToken), string tag");
    }

    #[test]
    fn nested_close_on_open_line_keeps_list_open() {
        let d = decl("    public Foo([Range(1, 10)] int level,");
        assert!(d.is_open());
        assert_eq!(d.raw_parameters(), Some("[Range(1, 10)] int level,"));
    }

    #[test]
    fn method_open() {
        let d = decl("    public void Configure(IServiceCollection services,");
        assert!(d.is_open());
        assert_eq!(d.name(), "Configure");
    }

    #[test]
    fn property_accessor_flags() {
        let RecognizedDeclaration::Property(p) = decl("    public int Count { get; }") else {
            panic!("expected property");
        };
        assert_eq!(p.name, "Count");
        assert_eq!(p.property_type.base, "int");
        assert!(p.has_getter && !p.has_setter && !p.has_initer);

        let RecognizedDeclaration::Property(p) = decl("public List<string> Names { get; private set; } = new();") else {
            panic!("expected property");
        };
        assert!(p.has_getter && p.has_setter && !p.has_initer);

        let RecognizedDeclaration::Property(p) = decl("public required string Id { get; init; }") else {
            panic!("expected property");
        };
        assert!(p.has_getter && !p.has_setter && p.has_initer);
    }

    #[test]
    fn property_set_and_init_still_matches() {
        let RecognizedDeclaration::Property(p) = decl("public int X { get; set; init; }") else {
            panic!("expected property");
        };
        assert!(p.has_setter && p.has_initer);
    }

    #[test]
    fn constructor_wins_over_method() {
        assert!(matches!(
            decl("public Widget()"),
            RecognizedDeclaration::Constructor(_)
        ));
        assert!(matches!(
            decl("public Widget Create()"),
            RecognizedDeclaration::Method(_)
        ));
    }

    #[test]
    fn unmatched_lines() {
        assert_eq!(match_declaration("public int field;"), None);
        assert_eq!(match_declaration("void Helper() {}"), None);
        assert_eq!(match_declaration("var x = Foo(1);"), None);
        assert_eq!(match_declaration("// public void Commented()"), None);
        assert_eq!(match_declaration("public int Total => _total;"), None);
    }

    #[test]
    fn private_declarations_are_still_recognized() {
        let d = decl("    private void Helper() {}");
        assert_eq!(d.access(), AccessModifier::Private);
        assert_eq!(
            decl("private protected Node Next { get; set; }").access(),
            AccessModifier::PrivateProtected
        );
    }
}
