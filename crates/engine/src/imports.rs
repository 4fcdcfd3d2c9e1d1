//! Static import scanning with nom combinators.
//!
//! Recognizes single-line `import ... from '<spec>'`, `import '<spec>'` and
//! `export {...}|* from '<spec>'` statements. The specifier must close the
//! statement, so string literals that merely contain `from` never match.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{anychar, char, multispace0, multispace1, one_of},
    combinator::{eof, map, opt, peek, value},
    multi::many_till,
    sequence::{delimited, preceded},
};

/// Extracts static import specifiers, one statement per line.
pub fn scan_imports(code: &str) -> Vec<&str> {
    code.lines().filter_map(import_specifier).collect()
}

fn import_specifier(line: &str) -> Option<&str> {
    alt((side_effect_import, import_from, export_from))
        .parse(line.trim())
        .ok()
        .map(|(_, specifier)| specifier)
}

/// `import './x.js';`
fn side_effect_import(input: &str) -> IResult<&str, &str> {
    delimited((tag("import"), multispace0), quoted, statement_end).parse(input)
}

/// `import x from './x.js';`
fn import_from(input: &str) -> IResult<&str, &str> {
    preceded((tag("import"), multispace1), from_clause).parse(input)
}

/// `export { x } from './x.js';` and `export * from './x.js';`
fn export_from(input: &str) -> IResult<&str, &str> {
    preceded((tag("export"), multispace0, peek(one_of("*{"))), from_clause).parse(input)
}

/// Skips the binding list up to the `from '<spec>'` that ends the statement.
fn from_clause(input: &str) -> IResult<&str, &str> {
    map(
        many_till(
            anychar,
            (multispace0, tag("from"), multispace0, quoted, statement_end),
        ),
        |(_, (_, _, _, specifier, _))| specifier,
    )
    .parse(input)
}

/// A single- or double-quoted literal without escapes.
fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_till(|c| c == '\''), char('\'')),
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
    ))
    .parse(input)
}

fn statement_end(input: &str) -> IResult<&str, ()> {
    value((), (multispace0, opt(char(';')), multispace0, eof)).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_imports() {
        let code = r#"
import { buildTime } from 'virtual:vite-info';
import "./style.js";
import './side-effect.js';
import * as lib from '../lib/index.ts'
export { helper } from "../lib/helper.ts";
export * from './reexport.js';
export const local = 1;
const notAnImport = "import x from 'y'";
"#;

        assert_eq!(
            scan_imports(code),
            vec![
                "virtual:vite-info",
                "./style.js",
                "./side-effect.js",
                "../lib/index.ts",
                "../lib/helper.ts",
                "./reexport.js",
            ]
        );
    }

    #[test]
    fn test_string_literals_containing_from_are_ignored() {
        let code = "export const greeting = 'Hello from \"Rust\"';\n\
                    export const other = \"it is from 'here'\";\n\
                    import { a } from './a.js'; const s = ' from \"b\"';\n";

        assert!(scan_imports(code).is_empty());
    }

    #[test]
    fn test_binding_named_from() {
        assert_eq!(
            scan_imports("import { from } from './keywords.js';"),
            vec!["./keywords.js"]
        );
    }

    #[test]
    fn test_export_declarations_are_not_reexports() {
        assert!(scan_imports("export function from() {}").is_empty());
        assert!(scan_imports("export default 'from \"x\"';").is_empty());
    }
}
