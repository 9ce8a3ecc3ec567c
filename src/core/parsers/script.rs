use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedScript {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

/// Pick the parser dialect from the file extension.
///
/// Plain `.ts` is parsed without JSX so `<T>value` assertions keep working.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let ext = file_path.rsplit('.').next().unwrap_or_default();
    match ext {
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Parse a script source string into a module.
///
/// Accepts a shared SourceMap so positions can be resolved after parsing.
pub fn parse_script_source(
    code: String,
    file_path: &str,
    syntax: Syntax,
    source_map: Arc<SourceMap>,
) -> Result<ParsedScript> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!(
                "{} ({}:{})",
                e.kind().msg(),
                loc.line,
                loc.col.0
            )
        })?;

        Ok(ParsedScript { module, source_map })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_extension() {
        let sm = Arc::new(SourceMap::default());
        let tsx = "const a = <div>你好</div>;".to_string();
        assert!(parse_script_source(tsx.clone(), "a.tsx", syntax_for_path("a.tsx"), sm.clone()).is_ok());
        assert!(parse_script_source(tsx.clone(), "a.jsx", syntax_for_path("a.jsx"), sm.clone()).is_ok());

        let assertion = "const n = <number>value;".to_string();
        assert!(parse_script_source(assertion, "a.ts", syntax_for_path("a.ts"), sm).is_ok());
    }

    #[test]
    fn test_parse_error_reports_position() {
        let sm = Arc::new(SourceMap::default());
        let err = parse_script_source(
            "const a = {\n  b: \n".to_string(),
            "broken.ts",
            syntax_for_path("broken.ts"),
            sm,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains(':'));
    }
}
