//! Classification of dynamic expressions embedded in translatable text.
//!
//! Every `${expr}` in a template and every `{expr}` merged into JSX text becomes
//! a placeholder. The analyzer decides whether a readable parameter name can be
//! derived from the expression, and whether its shape deserves a warning because
//! translators will only ever see the placeholder.

use swc_ecma_ast::{Callee, Expr, MemberProp};

use crate::warnings::{ExtractionWarning, Severity, WarningKind};

/// Units with more embedded expressions than this raise `too-many-interpolations`.
pub const MAX_INTERPOLATIONS: usize = 10;

/// Calls that only coerce or format a value; the placeholder stays readable.
const FORMATTER_CALLS: &[&str] = &[
    "String",
    "Number",
    "toFixed",
    "toString",
    "toLocaleString",
    "format",
    "formatNumber",
    "formatDate",
    "parseInt",
    "parseFloat",
];

/// Closed set of expression shapes the analyzer distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprShape {
    Identifier(String),
    /// `a.b.c` with every segment statically named.
    StaticMember(Vec<String>),
    ComputedMember,
    NestedTemplate,
    Conditional,
    /// Call with the last static segment of its callee, if any.
    Call(Option<String>),
    Binary,
    Other(&'static str),
}

impl ExprShape {
    pub fn of(expr: &Expr) -> Self {
        match unwrap_transparent(expr) {
            Expr::Ident(ident) => ExprShape::Identifier(ident.sym.to_string()),
            member @ Expr::Member(_) if has_computed_segment(member) => ExprShape::ComputedMember,
            member @ Expr::Member(_) => match static_member_path(member) {
                Some(path) => ExprShape::StaticMember(path),
                None => ExprShape::Other("member expression"),
            },
            Expr::Tpl(_) => ExprShape::NestedTemplate,
            Expr::Cond(_) => ExprShape::Conditional,
            Expr::Call(call) => ExprShape::Call(match &call.callee {
                Callee::Expr(callee) => callee_name(callee),
                _ => None,
            }),
            Expr::Bin(_) => ExprShape::Binary,
            Expr::Lit(_) => ExprShape::Other("literal"),
            Expr::Unary(_) => ExprShape::Other("unary expression"),
            Expr::Update(_) => ExprShape::Other("update expression"),
            Expr::Assign(_) => ExprShape::Other("assignment"),
            Expr::Arrow(_) | Expr::Fn(_) => ExprShape::Other("function"),
            Expr::Object(_) => ExprShape::Other("object literal"),
            Expr::Array(_) => ExprShape::Other("array literal"),
            Expr::New(_) => ExprShape::Other("constructor call"),
            Expr::Await(_) => ExprShape::Other("await expression"),
            Expr::Seq(_) => ExprShape::Other("sequence expression"),
            Expr::TaggedTpl(_) => ExprShape::Other("tagged template"),
            Expr::OptChain(_) => ExprShape::Other("optional chain"),
            Expr::JSXElement(_) | Expr::JSXFragment(_) => ExprShape::Other("JSX element"),
            Expr::This(_) => ExprShape::Other("this"),
            _ => ExprShape::Other("expression"),
        }
    }
}

/// How risky an expression is for translators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Complexity {
    Simple,
    Complex {
        kind: WarningKind,
        severity: Severity,
        label: String,
    },
}

/// Result of analyzing one embedded expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprAnalysis {
    /// Readable parameter name, when one can be derived.
    pub name: Option<String>,
    pub complexity: Complexity,
}

impl ExprAnalysis {
    fn simple(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            complexity: Complexity::Simple,
        }
    }

    fn complex(kind: WarningKind, severity: Severity, label: impl Into<String>) -> Self {
        Self {
            name: None,
            complexity: Complexity::Complex {
                kind,
                severity,
                label: label.into(),
            },
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self.complexity, Complexity::Complex { .. })
    }

    /// Turn a complex classification into a warning at the expression's location.
    pub fn to_warning(
        &self,
        file: &str,
        line: usize,
        column: usize,
        code: Option<&str>,
    ) -> Option<ExtractionWarning> {
        let Complexity::Complex {
            kind,
            severity,
            label,
        } = &self.complexity
        else {
            return None;
        };

        let (message, suggestion) = match kind {
            WarningKind::NestedTemplate => (
                "Nested template literal in interpolation".to_string(),
                "Extract the inner template into its own translatable string",
            ),
            WarningKind::ConditionalExpression => (
                "Conditional expression in interpolation".to_string(),
                "Split each branch into a separate translatable string",
            ),
            WarningKind::FunctionCall => (
                format!("Function call {} in interpolation", label),
                "Compute the value into a named variable before interpolating",
            ),
            WarningKind::BinaryExpression => (
                "Binary expression in interpolation".to_string(),
                "Compute the value into a named variable before interpolating",
            ),
            _ => (
                format!("Complex expression ({}) in interpolation", label),
                "Assign the value to a named variable before interpolating",
            ),
        };

        let mut warning = ExtractionWarning::new(*kind, *severity, message, file, line, column)
            .with_suggestion(suggestion);
        if let Some(code) = code {
            warning = warning.with_code(code);
        }
        Some(warning)
    }
}

/// Classify an embedded expression. First matching shape wins.
pub fn analyze(expr: &Expr) -> ExprAnalysis {
    match ExprShape::of(expr) {
        ExprShape::Identifier(name) => ExprAnalysis::simple(name),
        ExprShape::StaticMember(path) => ExprAnalysis::simple(path.join("_")),
        ExprShape::ComputedMember => ExprAnalysis::complex(
            WarningKind::ComplexExpression,
            Severity::Warning,
            "computed member access",
        ),
        ExprShape::NestedTemplate => ExprAnalysis::complex(
            WarningKind::NestedTemplate,
            Severity::Warning,
            "nested template",
        ),
        ExprShape::Conditional => ExprAnalysis::complex(
            WarningKind::ConditionalExpression,
            Severity::Warning,
            "conditional",
        ),
        ExprShape::Call(Some(name)) if FORMATTER_CALLS.contains(&name.as_str()) => {
            ExprAnalysis::simple("formatted")
        }
        ExprShape::Call(name) => ExprAnalysis::complex(
            WarningKind::FunctionCall,
            Severity::Info,
            match name {
                Some(name) => format!("{}()", name),
                None => "call".to_string(),
            },
        ),
        ExprShape::Binary => ExprAnalysis::complex(
            WarningKind::BinaryExpression,
            Severity::Info,
            "binary expression",
        ),
        ExprShape::Other(label) => {
            ExprAnalysis::complex(WarningKind::ComplexExpression, Severity::Info, label)
        }
    }
}

/// Warning for a unit with more than [`MAX_INTERPOLATIONS`] expressions.
pub fn check_interpolation_count(
    count: usize,
    file: &str,
    line: usize,
    column: usize,
) -> Option<ExtractionWarning> {
    (count > MAX_INTERPOLATIONS).then(|| {
        ExtractionWarning::new(
            WarningKind::TooManyInterpolations,
            Severity::Warning,
            format!(
                "Text has {} interpolations (more than {})",
                count, MAX_INTERPOLATIONS
            ),
            file,
            line,
            column,
        )
        .with_suggestion("Split the text into smaller translatable units")
    })
}

/// Strip parentheses and TypeScript-only wrappers.
fn unwrap_transparent(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_transparent(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_transparent(&ts_as.expr),
        Expr::TsNonNull(non_null) => unwrap_transparent(&non_null.expr),
        Expr::TsSatisfies(satisfies) => unwrap_transparent(&satisfies.expr),
        Expr::TsConstAssertion(assertion) => unwrap_transparent(&assertion.expr),
        Expr::TsTypeAssertion(assertion) => unwrap_transparent(&assertion.expr),
        _ => expr,
    }
}

/// `a.b.c` → `["a", "b", "c"]`; `None` when any segment is dynamic.
fn static_member_path(expr: &Expr) -> Option<Vec<String>> {
    match unwrap_transparent(expr) {
        Expr::Ident(ident) => Some(vec![ident.sym.to_string()]),
        Expr::This(_) => Some(vec!["this".to_string()]),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let mut path = static_member_path(&member.obj)?;
            path.push(prop.sym.to_string());
            Some(path)
        }
        _ => None,
    }
}

/// `a[k]`, `a[k].b`, `a.b[0].c`: any computed access along the chain.
fn has_computed_segment(expr: &Expr) -> bool {
    match unwrap_transparent(expr) {
        Expr::Member(member) => member.prop.is_computed() || has_computed_segment(&member.obj),
        _ => false,
    }
}

/// Last static segment of a callee: `Number` for `Number(x)`, `toFixed` for `a.b.toFixed(2)`.
fn callee_name(callee: &Expr) -> Option<String> {
    match unwrap_transparent(callee) {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Some(prop.sym.to_string()),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swc_common::{FileName, SourceMap};
    use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

    fn parse_expr(code: &str) -> Box<Expr> {
        let source_map = SourceMap::default();
        let source_file =
            source_map.new_source_file(FileName::Real("test.ts".into()).into(), code.to_string());
        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);
        parser.parse_expr().unwrap()
    }

    fn kind_of(code: &str) -> Option<(WarningKind, Severity)> {
        match analyze(&parse_expr(code)).complexity {
            Complexity::Simple => None,
            Complexity::Complex { kind, severity, .. } => Some((kind, severity)),
        }
    }

    #[test]
    fn test_simple_names() {
        assert_eq!(analyze(&parse_expr("username")).name.as_deref(), Some("username"));
        assert_eq!(analyze(&parse_expr("user.name")).name.as_deref(), Some("user_name"));
        assert_eq!(
            analyze(&parse_expr("this.props.count")).name.as_deref(),
            Some("this_props_count")
        );
        assert_eq!(analyze(&parse_expr("(count as number)")).name.as_deref(), Some("count"));
        assert_eq!(analyze(&parse_expr("user!.name")).name.as_deref(), Some("user_name"));
    }

    #[test]
    fn test_formatter_calls_are_simple() {
        for code in ["String(n)", "Number(n)", "price.toFixed(2)", "formatDate(d)", "parseInt(s, 10)"] {
            let analysis = analyze(&parse_expr(code));
            assert!(!analysis.is_complex(), "{}", code);
            assert_eq!(analysis.name.as_deref(), Some("formatted"));
        }
    }

    #[test]
    fn test_complex_shapes() {
        assert_eq!(
            kind_of("items[index]"),
            Some((WarningKind::ComplexExpression, Severity::Warning))
        );
        assert_eq!(
            kind_of("`${a}b`"),
            Some((WarningKind::NestedTemplate, Severity::Warning))
        );
        assert_eq!(
            kind_of("ok ? a : b"),
            Some((WarningKind::ConditionalExpression, Severity::Warning))
        );
        assert_eq!(
            kind_of("rows[i].label"),
            Some((WarningKind::ComplexExpression, Severity::Warning))
        );
        assert_eq!(
            kind_of("data.items[0].name"),
            Some((WarningKind::ComplexExpression, Severity::Warning))
        );
        assert_eq!(kind_of("getName()"), Some((WarningKind::FunctionCall, Severity::Info)));
        assert_eq!(kind_of("a + b"), Some((WarningKind::BinaryExpression, Severity::Info)));
        assert_eq!(kind_of("!done"), Some((WarningKind::ComplexExpression, Severity::Info)));
    }

    #[test]
    fn test_other_shape_is_labeled() {
        let analysis = analyze(&parse_expr("() => 1"));
        let warning = analysis.to_warning("a.ts", 2, 5, Some("() => 1")).unwrap();
        assert_eq!(warning.kind, WarningKind::ComplexExpression);
        assert!(warning.message.contains("function"));
        assert_eq!(warning.code.as_deref(), Some("() => 1"));
        assert_eq!((warning.line, warning.column), (2, 5));
    }

    #[test]
    fn test_simple_has_no_warning() {
        assert!(analyze(&parse_expr("name")).to_warning("a.ts", 1, 0, None).is_none());
    }

    #[test]
    fn test_interpolation_count() {
        assert!(check_interpolation_count(10, "a.ts", 1, 0).is_none());
        let warning = check_interpolation_count(11, "a.ts", 1, 0).unwrap();
        assert_eq!(warning.kind, WarningKind::TooManyInterpolations);
        assert_eq!(warning.severity, Severity::Warning);
    }
}
