use itertools::Itertools;
use lazy_regex::regex_find;
use log::{info, warn};
use std::borrow::Cow::{self, Borrowed, Owned};

use rustyline::completion::{Completer, Pair};
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter, MatchingBracketHighlighter};
use rustyline::history::DefaultHistory;
use rustyline::validate::MatchingBracketValidator;
use rustyline::{Completer, Helper, Hinter, Validator};
use rustyline::{CompletionType, Config, Editor};

use crate::exec::{Bindings, ExecContext, ExecResult, Mode, SETTINGS, exec_line};

const HISTORY_FILE: &str = "trivalent_history.txt";

#[derive(Helper, Completer, Hinter, Validator)]
struct ReplHelper {
    #[rustyline(Completer)]
    completer: SettingCompleter,
    highlighter: MatchingBracketHighlighter,
    #[rustyline(Validator)]
    validator: MatchingBracketValidator,
}

/// Completes the argument of the `:s` command.
struct SettingCompleter {}

impl Completer for SettingCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        if pos == line.len()
            && line.starts_with(":s ")
            && let Some(partial) = regex_find!(r"[a-z]*$", line)
        {
            let start = pos - partial.len();
            let pairs = SETTINGS
                .iter()
                .filter(|setting| setting.starts_with(partial))
                .map(|setting| Pair {
                    display: (*setting).to_owned(),
                    replacement: (*setting).to_owned(),
                })
                .collect_vec();
            Ok((start, pairs))
        } else {
            Ok((0, Vec::with_capacity(0)))
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Owned(format!("\x1b[1;36m{prompt}\x1b[0m"))
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

pub fn repl(mode: Mode, bindings: &mut Bindings) {
    println!("\nStarting Trivalent REPL in {mode} mode...");

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let helper = ReplHelper {
        completer: SettingCompleter {},
        highlighter: MatchingBracketHighlighter::new(),
        validator: MatchingBracketValidator::new(),
    };

    let mut editor: Editor<ReplHelper, DefaultHistory> = match Editor::with_config(config) {
        Ok(editor) => editor,
        Err(err) => {
            println!("Could not start line editor: {err}");
            return;
        }
    };
    editor.set_helper(Some(helper));

    editor.set_auto_add_history(true);

    if let Err(err) = editor.load_history(HISTORY_FILE) {
        info!("no history loaded from {HISTORY_FILE}: {err}");
    }

    let mut exec_ctx = ExecContext {
        is_repl: true,
        mode,
        ..Default::default()
    };

    loop {
        println!();
        // The prompt names the mode, which `:s` can change between lines
        let prompt = format!("{}> ", exec_ctx.mode);
        let read_result = editor.readline(&prompt);

        let line = match read_result {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => {
                break;
            }
            Err(err) => {
                println!("Encountered error while reading input: {err}");
                continue;
            }
        };

        if let Err(err) = editor.save_history(HISTORY_FILE) {
            warn!("could not save history to {HISTORY_FILE}: {err}");
        }

        match exec_line(&line, &mut exec_ctx, bindings) {
            Some(ExecResult::Exit) => {
                println!("Exiting...");
                break;
            }
            Some(ExecResult::Error) | None => (),
        }
    }
}
