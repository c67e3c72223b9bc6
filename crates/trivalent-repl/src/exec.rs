use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use lazy_regex::regex_is_match;
use log::{debug, info};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use trivalent::fuzzy::is_degree_of_truth;
use trivalent::{BooleanEvaluator, EvalError, EvalResult, FuzzyEvaluator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Bool,
    Fuzzy,
}

/// Script lines starting with this are printed instead of evaluated. It must not be the symbol
/// of an operator or bracket.
pub const ECHO_MARKER: char = '"';

/// Arguments accepted by `:s`.
pub const SETTINGS: [&str; 4] = ["bool", "fuzzy", "debug", "normal"];

#[derive(Debug, Default)]
pub struct ExecContext {
    pub is_repl: bool,
    pub debug_mode: bool,
    pub mode: Mode,
}

/// Literal bindings, kept separately for each mode.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    pub boolean: HashMap<String, bool>,
    pub fuzzy: HashMap<String, f64>,
}

impl Bindings {
    fn boolean_evaluator(&self) -> BooleanEvaluator {
        BooleanEvaluator::boolean(self.boolean.iter().map(|(name, value)| (name.as_str(), *value)))
    }

    fn fuzzy_evaluator(&self) -> EvalResult<FuzzyEvaluator> {
        FuzzyEvaluator::fuzzy(self.fuzzy.iter().map(|(name, value)| (name.as_str(), *value)))
    }

    fn names(&self, mode: Mode) -> Vec<&str> {
        match mode {
            Mode::Bool => self.boolean.keys().map(String::as_str).sorted().collect_vec(),
            Mode::Fuzzy => self.fuzzy.keys().map(String::as_str).sorted().collect_vec(),
        }
    }

    fn remove(&mut self, mode: Mode, name: &str) -> bool {
        match mode {
            Mode::Bool => self.boolean.remove(name).is_some(),
            Mode::Fuzzy => self.fuzzy.remove(name).is_some(),
        }
    }

    fn clear(&mut self, mode: Mode) {
        match mode {
            Mode::Bool => self.boolean.clear(),
            Mode::Fuzzy => self.fuzzy.clear(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Bool(bool),
    Degree(f64),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Degree(value) => write!(f, "{value}"),
        }
    }
}

pub fn is_valid_identifier(name: &str) -> bool {
    regex_is_match!(r"^\p{L}[\p{L}0-9_]*$", name) && name != "true" && name != "false"
}

pub fn exec_file(
    path: &Path,
    exec_ctx: &mut ExecContext,
    bindings: &mut Bindings,
) -> std::io::Result<()> {
    info!("executing {}", path.display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    exec_reader(reader, exec_ctx, bindings)
}

fn exec_reader(
    reader: impl BufRead,
    exec_ctx: &mut ExecContext,
    bindings: &mut Bindings,
) -> std::io::Result<()> {
    for res in reader.lines() {
        let line = res?;
        if let Some(string) = line.strip_prefix(ECHO_MARKER) {
            println!("{}", string.trim());
            continue;
        }

        match exec_line(&line, exec_ctx, bindings) {
            Some(ExecResult::Error | ExecResult::Exit) => return Ok(()),
            None => (),
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum ExecResult {
    Exit,
    Error,
}

pub fn exec_line(
    mut line: &str,
    exec_ctx: &mut ExecContext,
    bindings: &mut Bindings,
) -> Option<ExecResult> {
    if let Some(remainder) = line.strip_prefix(":") {
        let shutdown = eval_command(remainder, exec_ctx, bindings);
        return if shutdown {
            Some(ExecResult::Exit)
        } else {
            None
        };
    }

    if let Some((body, _comment)) = line.split_once('#') {
        line = body;
    }

    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some((head, tail)) = line.split_once(":=") {
        let name = head.trim();
        if !is_valid_identifier(name) {
            println!("Invalid literal name: {name}");
            return Some(ExecResult::Error);
        }
        return match bind(name, tail.trim(), exec_ctx, bindings) {
            Ok(value) => {
                if exec_ctx.is_repl {
                    println!("Bound {name} to {value}");
                }
                None
            }
            Err(error) => {
                println!("Error: {error}");
                Some(ExecResult::Error)
            }
        };
    }

    if exec_ctx.debug_mode {
        print_tokens(line, exec_ctx.mode, bindings);
    }

    match evaluate(line, exec_ctx.mode, bindings) {
        Ok(value) => {
            println!("{value}");
            None
        }
        Err(error) => {
            println!("Error: {error}");
            Some(ExecResult::Error)
        }
    }
}

/// Binds `name` to a literal value or to the value of an expression over earlier bindings.
fn bind(
    name: &str,
    source: &str,
    exec_ctx: &ExecContext,
    bindings: &mut Bindings,
) -> EvalResult<Value> {
    let value = match exec_ctx.mode {
        Mode::Fuzzy => match f64::from_str(source) {
            Ok(degree) if !is_degree_of_truth(degree) => {
                return Err(EvalError::InvalidDegreeOfTruth {
                    literal: name.to_owned(),
                    value: degree,
                });
            }
            Ok(degree) => Value::Degree(degree),
            Err(_) => evaluate(source, Mode::Fuzzy, bindings)?,
        },
        Mode::Bool => evaluate(source, Mode::Bool, bindings)?,
    };

    debug!("binding {name} to {value}");
    match value {
        Value::Bool(value) => {
            bindings.boolean.insert(name.to_owned(), value);
        }
        Value::Degree(value) => {
            bindings.fuzzy.insert(name.to_owned(), value);
        }
    }
    Ok(value)
}

pub fn evaluate(expression: &str, mode: Mode, bindings: &Bindings) -> EvalResult<Value> {
    match mode {
        Mode::Bool => bindings
            .boolean_evaluator()
            .evaluate(expression)
            .map(Value::Bool),
        Mode::Fuzzy => bindings
            .fuzzy_evaluator()?
            .evaluate(expression)
            .map(Value::Degree),
    }
}

fn print_tokens(line: &str, mode: Mode, bindings: &Bindings) {
    let tokens = match mode {
        Mode::Bool => bindings.boolean_evaluator().tokens(line).join(", "),
        Mode::Fuzzy => match bindings.fuzzy_evaluator() {
            Ok(evaluator) => evaluator.tokens(line).join(", "),
            Err(error) => format!("unavailable, {error}"),
        },
    };
    println!("Tokens: [{tokens}]");
}

fn eval_command(command: &str, exec_ctx: &mut ExecContext, bindings: &mut Bindings) -> bool {
    let Some(kind) = command.chars().next() else {
        return false;
    };
    let args = command[kind.len_utf8()..].split_whitespace().collect_vec();

    match kind {
        'q' => return true,
        'h' => print_help(&args, exec_ctx),
        'l' => list_bindings(&args, exec_ctx, bindings),
        's' => update_settings(&args, exec_ctx),
        'r' => reset_bindings(&args, exec_ctx, bindings),
        'e' => {
            if let Some(name) = args.first() {
                let path = Path::new(name);
                if let Err(err) = exec_file(path, exec_ctx, bindings) {
                    println!("Cannot execute file {name}: {err}");
                }
            }
        }
        _ => println!("Unknown command type {kind}. Ignoring"),
    }

    false
}

fn reset_bindings(names: &[&str], exec_ctx: &ExecContext, bindings: &mut Bindings) {
    if names.is_empty() {
        bindings.clear(exec_ctx.mode);
        return;
    }
    for name in names {
        if !bindings.remove(exec_ctx.mode, name) {
            println!("{name} is not bound");
        }
    }
}

fn list_bindings(args: &[&str], exec_ctx: &ExecContext, bindings: &Bindings) {
    let modes = if args.contains(&"all") {
        Mode::iter().collect_vec()
    } else {
        vec![exec_ctx.mode]
    };

    for mode in modes {
        println!("\n{mode} literals:");
        for name in bindings.names(mode) {
            let value = match mode {
                Mode::Bool => bindings.boolean[name].to_string(),
                Mode::Fuzzy => bindings.fuzzy[name].to_string(),
            };
            println!("   {name: <4}=   {value}");
        }
    }
}

fn update_settings(args: &[&str], exec_ctx: &mut ExecContext) {
    let Some(setting) = args.first() else {
        println!("Current mode is {}", exec_ctx.mode);
        return;
    };
    match *setting {
        "debug" => exec_ctx.debug_mode = true,
        "normal" => exec_ctx.debug_mode = false,
        other => match Mode::from_str(other) {
            Ok(mode) => exec_ctx.mode = mode,
            Err(_) => println!("Unknown setting {other}"),
        },
    }
}

fn print_help(args: &[&str], exec_ctx: &ExecContext) {
    if args.contains(&"commands") {
        println!(
            ":q          quit
:h          show this help
:l [all]    list bound literals
:r [NAME..] reset all or the named literals
:s SETTING  switch to {} or toggle the debug/normal output
:e FILE     execute a file line by line",
            Mode::iter().join("/")
        );
        return;
    }

    let constants = match exec_ctx.mode {
        Mode::Bool => "true and false are always available.",
        Mode::Fuzzy => "Literals hold degrees of truth between 0 and 1.",
    };
    println!(
        "Trivalent, an evaluator for boolean and fuzzy logic

Type an expression to evaluate it, for instance A & !B -> C.
Connectives from tightest to loosest: ! & | -> <->
Use := to bind literals. {constants}
For a complete list of commands, type :h commands"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivalent::Registry;

    fn run(lines: &[&str], mode: Mode) -> (Vec<Option<ExecResult>>, Bindings) {
        let mut exec_ctx = ExecContext {
            mode,
            ..Default::default()
        };
        let mut bindings = Bindings::default();
        let results = lines
            .iter()
            .map(|line| exec_line(line, &mut exec_ctx, &mut bindings))
            .collect_vec();
        (results, bindings)
    }

    #[test]
    fn bind_and_evaluate() {
        let lines = ["A := true", "B := A & false # comment", "A | B"];
        let (results, bindings) = run(&lines, Mode::Bool);
        assert!(results.iter().all(Option::is_none));
        assert_eq!(bindings.boolean.get("A"), Some(&true));
        assert_eq!(bindings.boolean.get("B"), Some(&false));
        assert_eq!(evaluate("A -> B", Mode::Bool, &bindings), Ok(Value::Bool(false)));
    }

    #[test]
    fn fuzzy_bindings() {
        let (results, bindings) = run(&["A := 0.25", "B := !A", "C := 1.5"], Mode::Fuzzy);
        assert_eq!(results, [None, None, Some(ExecResult::Error)]);
        assert_eq!(bindings.fuzzy.get("B"), Some(&0.75));
        assert!(!bindings.fuzzy.contains_key("C"));
        assert_eq!(evaluate("A & B", Mode::Fuzzy, &bindings), Ok(Value::Degree(0.25)));
    }

    #[test]
    fn invalid_names() {
        let (results, _) = run(&["true := false", "2x := true", "a b := true"], Mode::Bool);
        assert!(results.iter().all(|res| *res == Some(ExecResult::Error)));
        assert!(is_valid_identifier("rain_2"));
        assert!(is_valid_identifier("λ"));
    }

    #[test]
    fn commands() {
        let mut exec_ctx = ExecContext::default();
        let mut bindings = Bindings::default();
        assert_eq!(exec_line(":s fuzzy", &mut exec_ctx, &mut bindings), None);
        assert_eq!(exec_ctx.mode, Mode::Fuzzy);
        assert_eq!(exec_line(":s debug", &mut exec_ctx, &mut bindings), None);
        assert!(exec_ctx.debug_mode);
        assert_eq!(exec_line("A := 0.5", &mut exec_ctx, &mut bindings), None);
        assert_eq!(exec_line(":r A", &mut exec_ctx, &mut bindings), None);
        assert!(bindings.fuzzy.is_empty());
        assert_eq!(exec_line("A", &mut exec_ctx, &mut bindings), Some(ExecResult::Error));
        assert_eq!(exec_line(":q", &mut exec_ctx, &mut bindings), Some(ExecResult::Exit));
    }

    #[test]
    fn script_stops_at_first_error() {
        let script = "\" heading\nA := true\nA & B\nB := true\n";
        let mut exec_ctx = ExecContext::default();
        let mut bindings = Bindings::default();
        exec_reader(script.as_bytes(), &mut exec_ctx, &mut bindings).unwrap();
        assert_eq!(bindings.boolean.len(), 1);
    }

    #[test]
    fn script_evaluates_negated_lines() {
        // "!C" fails on the unbound C, so B is never bound
        let script = "A := true\n!A & A\n!C\nB := true\n";
        let mut exec_ctx = ExecContext::default();
        let mut bindings = Bindings::default();
        exec_reader(script.as_bytes(), &mut exec_ctx, &mut bindings).unwrap();
        assert_eq!(bindings.boolean.len(), 1);
        assert!(!bindings.boolean.contains_key("B"));
    }

    #[test]
    fn echo_marker_is_not_a_delimiter() {
        let marker = ECHO_MARKER.to_string();
        assert!(!Registry::standard().delimiters().contains(&marker.as_str()));
    }
}
