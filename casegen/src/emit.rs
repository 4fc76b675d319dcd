//! Producing one `#[test]` declaration per (case, target function)

use std::{
    collections::HashMap,
    fmt::{self, Display},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use log::{debug, trace};
use regex::Regex;

use crate::{
    case::{parse_cases, ParsedCase},
    disambiguate::Disambiguator,
    fold::fold_name,
    source::DefinitionFile,
    Error,
};

/// Strict and reserved keywords, 2021 edition, plus `gen` from 2024.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "gen", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Whether `name` can be used verbatim as a Rust function name.
pub fn is_identifier(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:[A-Za-z][A-Za-z0-9_]*|_[A-Za-z0-9_]+)$").unwrap())
        .is_match(name)
        && !KEYWORDS.contains(&name)
}

/// What a target function takes beyond the font and selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationShape {
    /// Parsed fields after the selector passed through as string arguments
    pub extra_fields: usize,
    /// Pass the case's counter as a trailing integer argument
    pub pass_counter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(u32),
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(value) => write!(f, "\"{value}\""),
            Literal::Int(value) => write!(f, "{value}"),
        }
    }
}

/// A field can sit between plain double quotes only if nothing in it ends the
/// literal early, starts an escape, or is a bare CR (not allowed in a literal).
fn str_literal(path: &Path, case: &ParsedCase, field: &str) -> Result<Literal, Error> {
    if field.contains(['"', '\\', '\r']) {
        return Err(Error::UnrepresentableField {
            path: path.to_path_buf(),
            line: case.line + 1,
            field: field.to_string(),
        });
    }
    Ok(Literal::Str(field.to_string()))
}

/// A generated test, rendered with [`Display`] as a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTestFunction {
    pub ident: String,
    pub function: String,
    pub args: Vec<Literal>,
}

impl Display for GeneratedTestFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#[test] fn {}() {{{}(", self.ident, self.function)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")}")
    }
}

/// Emits declarations for one output target.
///
/// Owns the target's counters, so every file fed to the same emitter shares
/// one numbering.
#[derive(Debug)]
pub struct Emitter {
    functions: Vec<String>,
    shape: InvocationShape,
    counters: Disambiguator,
    // identifier => where it was first generated
    seen: HashMap<String, (PathBuf, usize)>,
}

impl Emitter {
    pub fn new(functions: Vec<String>, shape: InvocationShape) -> Emitter {
        Emitter {
            functions,
            shape,
            counters: Disambiguator::new(),
            seen: HashMap::new(),
        }
    }

    /// Declarations for every case in `file`: line order, then function order.
    pub fn emit_file(
        &mut self,
        file: &DefinitionFile,
    ) -> Result<Vec<GeneratedTestFunction>, Error> {
        let cases = parse_cases(file, self.shape.extra_fields)?;
        debug!("{:?}: {} cases", file.path(), cases.len());
        let mut generated = Vec::with_capacity(cases.len() * self.functions.len());
        for case in cases.iter() {
            generated.extend(self.emit_case(file.path(), case)?);
        }
        Ok(generated)
    }

    pub fn emit_case(
        &mut self,
        path: &Path,
        case: &ParsedCase,
    ) -> Result<Vec<GeneratedTestFunction>, Error> {
        let mut args = case
            .fields()
            .take(2 + self.shape.extra_fields)
            .map(|field| str_literal(path, case, field))
            .collect::<Result<Vec<_>, _>>()?;

        // consumed once per case, however many functions there are
        let counter = self.counters.assign(&case.font);
        if self.shape.pass_counter {
            args.push(Literal::Int(counter));
        }
        let fragment = fold_name(&case.font);

        let mut generated = Vec::with_capacity(self.functions.len());
        for function in self.functions.iter() {
            let ident = format!("{fragment}_{counter}_{function}");
            if let Some((first_path, first_line)) = self.seen.get(&ident) {
                return Err(Error::IdentifierCollision {
                    identifier: ident,
                    first_path: first_path.clone(),
                    first_line: first_line + 1,
                    path: path.to_path_buf(),
                    line: case.line + 1,
                });
            }
            self.seen
                .insert(ident.clone(), (path.to_path_buf(), case.line));
            let test = GeneratedTestFunction {
                ident,
                function: function.clone(),
                args: args.clone(),
            };
            trace!("{test}");
            generated.push(test);
        }
        Ok(generated)
    }
}
