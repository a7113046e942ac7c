//! Template renderer: turns a recognized declaration into comment text.
//!
//! Every multi-line expansion reuses one newline token (line break followed
//! by the declaration's indent), so inserted lines line up with the
//! declaration. Substitution is a single left-to-right pass: text produced by
//! a placeholder is never scanned again, so `{parameters}`/`{returns}` output
//! is safe from later replacements.

use crate::config::TemplateConfig;
use crate::declaration::*;
use crate::params::parse_parameters;

/// Marker left in the rendering of an open declaration; later parameter
/// fragments are spliced in here once the list closes.
pub const ADDITIONAL_PARAMETERS: &str = "{additional parameters}";

/// Render the comment block for `decl`, including the leading indent and the
/// trailing line break. `None` when the shape has no template.
pub fn render(decl: &RecognizedDeclaration, config: &TemplateConfig, line_break: &str) -> Option<String> {
    let indent = decl.indent();
    let nl = newline_token(line_break, indent);

    let body = match decl {
        RecognizedDeclaration::Type(t) => substitute(
            &config.class,
            &[
                ("name", t.name.as_str()),
                ("type", t.keyword.as_str()),
                ("access", t.access.as_str()),
                ("inheritances", t.inheritances.as_str()),
                ("nl", nl.as_str()),
            ],
        ),
        RecognizedDeclaration::Constructor(c) => {
            let parameters = parameter_block(&c.raw_parameters, c.parameters_complete, &nl, config);
            substitute(
                &config.constructor,
                &[
                    ("name", c.name.as_str()),
                    ("access", c.access.as_str()),
                    ("parameters", parameters.as_str()),
                    ("nl", nl.as_str()),
                ],
            )
        }
        RecognizedDeclaration::Method(m) => {
            let parameters = parameter_block(&m.raw_parameters, m.parameters_complete, &nl, config);
            let returns = render_returns(&m.return_type, &nl, config);
            let full = m.return_type.full();
            substitute(
                &config.method,
                &[
                    ("name", m.name.as_str()),
                    ("access", m.access.as_str()),
                    ("parameters", parameters.as_str()),
                    ("returns", returns.as_str()),
                    ("type", m.return_type.written.as_str()),
                    ("baseType", m.return_type.base.as_str()),
                    ("genericType", m.return_type.generic_inner()),
                    ("fullType", full.as_str()),
                    ("nl", nl.as_str()),
                ],
            )
        }
        RecognizedDeclaration::Property(p) => {
            let template = config.property_template(p.has_getter, p.has_setter, p.has_initer)?;
            let full = p.property_type.full();
            substitute(
                template,
                &[
                    ("name", p.name.as_str()),
                    ("access", p.access.as_str()),
                    ("type", p.property_type.written.as_str()),
                    ("baseType", p.property_type.base.as_str()),
                    ("genericType", p.property_type.generic_inner()),
                    ("fullType", full.as_str()),
                    ("nl", nl.as_str()),
                ],
            )
        }
    };

    Some(format!("{indent}{body}{line_break}"))
}

/// Line break followed by the declaration indent.
pub fn newline_token(line_break: &str, indent: &str) -> String {
    format!("{line_break}{indent}")
}

/// Render each parameter of a raw list through the parameter template, every
/// entry prefixed by the newline token. Empty when nothing parses.
pub fn render_parameters(raw: &str, nl: &str, config: &TemplateConfig) -> String {
    parse_parameters(raw)
        .iter()
        .map(|p| {
            let entry = substitute(
                &config.parameter,
                &[("type", p.ty.as_str()), ("name", p.name.as_str()), ("nl", nl)],
            );
            format!("{nl}{entry}")
        })
        .collect()
}

fn parameter_block(raw: &str, complete: bool, nl: &str, config: &TemplateConfig) -> String {
    let mut block = render_parameters(raw, nl, config);
    if !complete {
        block.push_str(ADDITIONAL_PARAMETERS);
    }
    block
}

/// The returns section, or empty for `void`.
fn render_returns(return_type: &TypeRef, nl: &str, config: &TemplateConfig) -> String {
    if return_type.is_void() {
        return String::new();
    }
    let full = return_type.full();
    let entry = substitute(
        &config.returns,
        &[
            ("type", return_type.written.as_str()),
            ("baseType", return_type.base.as_str()),
            ("genericType", return_type.generic_inner()),
            ("fullType", full.as_str()),
            ("nl", nl),
        ],
    );
    format!("{nl}{entry}")
}

/// Replace `{key}` tokens found in `values`; unknown tokens are kept verbatim.
fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((v, close)) => {
                out.push_str(v);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
