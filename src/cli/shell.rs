use std::{
    borrow::Cow,
    env,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::app::{Modal, Navigator, Tab};
use crate::cli::{output, render, CliError, TerminalAnnouncer};
use crate::config::Settings;
use crate::domain::LITRE_STEP;
use crate::storage::FileStore;
use crate::time::SystemClock;

const PROMPT: &str = "milkbook> ";

const COMMANDS: &[&str] = &[
    "add", "apply", "back", "cancel", "clear", "close", "confirm", "edit", "entry", "exit",
    "help", "less", "month", "next", "none", "prev", "rate", "save", "settings", "share", "show",
    "theme", "today", "voice", "yesterday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

/// Draft of the settings form while the settings modal is open. Presentation
/// state only; the navigator sees it on `apply`.
struct SettingsDraft {
    rate_text: String,
    voice: bool,
    dark: bool,
}

impl SettingsDraft {
    fn from_settings(settings: Settings) -> Self {
        Self {
            rate_text: settings.rate.to_string(),
            voice: settings.voice_enabled,
            dark: settings.dark_mode,
        }
    }
}

struct ShellContext {
    navigator: Navigator,
    draft: Option<SettingsDraft>,
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if env::var_os("MILKBOOK_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let store = FileStore::new_default()?;
    let navigator = Navigator::new(
        Box::new(store),
        Box::new(TerminalAnnouncer),
        Box::new(SystemClock),
        ambient_dark(),
    );
    let mut context = ShellContext {
        navigator,
        draft: None,
    };

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

/// Ambient theme preference supplied by the host environment.
fn ambient_dark() -> bool {
    !matches!(env::var("MILKBOOK_THEME"), Ok(value) if value.eq_ignore_ascii_case("light"))
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new()));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    render::render(&context.navigator);

    loop {
        context.navigator.tick();
        let line = editor.readline(PROMPT);

        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    LoopControl::Continue => {}
                    LoopControl::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        context.navigator.tick();
        if line.trim().is_empty() {
            continue;
        }
        match handle_line(context, &line) {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> LoopControl {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err.to_string());
            return LoopControl::Continue;
        }
    };
    if tokens.is_empty() {
        return LoopControl::Continue;
    }

    let command = tokens[0].to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    let control = dispatch(context, &command, &args);

    // The draft only lives while the settings modal is open.
    if !matches!(context.navigator.modal(), Some(Modal::Settings)) {
        context.draft = None;
    }

    if control == LoopControl::Continue {
        match (&context.draft, context.navigator.modal()) {
            (Some(draft), Some(Modal::Settings)) => {
                render::render_settings(&draft.rate_text, draft.voice, draft.dark);
            }
            _ => render::render(&context.navigator),
        }
    }
    control
}

fn dispatch(context: &mut ShellContext, command: &str, args: &[&str]) -> LoopControl {
    let navigator = &mut context.navigator;
    match command {
        "help" => print_help(),
        "show" => {}
        "today" => navigator.show_today(),
        "yesterday" => navigator.show_yesterday(),
        "add" => match parse_litres(args.first(), LITRE_STEP) {
            Some(litres) => navigator.adjust_pending(litres),
            None => output::warning("Usage: add [litres]"),
        },
        "less" => match parse_litres(args.first(), LITRE_STEP) {
            Some(litres) => navigator.adjust_pending(-litres),
            None => output::warning("Usage: less [litres]"),
        },
        "none" => navigator.mark_no_delivery(),
        "clear" => navigator.clear_pending(),
        "save" => navigator.commit_pending(),
        "entry" => navigator.switch_tab(Tab::Entry),
        "month" => navigator.switch_tab(Tab::LedgerView),
        "next" => navigator.change_calendar_month(1),
        "prev" => navigator.change_calendar_month(-1),
        "edit" => match args.first() {
            Some(date_key) => navigator.begin_edit_from_calendar(date_key),
            None => output::warning("Usage: edit <YYYY-MM-DD>"),
        },
        "confirm" => navigator.confirm_edit(),
        "cancel" => navigator.cancel_edit(),
        "settings" => {
            navigator.open_settings();
            if matches!(navigator.modal(), Some(Modal::Settings)) {
                context.draft = Some(SettingsDraft::from_settings(navigator.settings()));
            }
        }
        "rate" => match (&mut context.draft, args.first()) {
            (Some(draft), Some(value)) => draft.rate_text = (*value).to_string(),
            (None, _) => output::warning("Open `settings` first."),
            (_, None) => output::warning("Usage: rate <amount>"),
        },
        "voice" => match (&mut context.draft, args.first()) {
            (Some(draft), Some(&"on")) => draft.voice = true,
            (Some(draft), Some(&"off")) => draft.voice = false,
            (None, _) => output::warning("Open `settings` first."),
            _ => output::warning("Usage: voice on|off"),
        },
        "theme" => match (&mut context.draft, args.first()) {
            (Some(draft), Some(&"dark")) => draft.dark = true,
            (Some(draft), Some(&"light")) => draft.dark = false,
            (None, _) => output::warning("Open `settings` first."),
            _ => output::warning("Usage: theme dark|light"),
        },
        "apply" => match context.draft.take() {
            Some(draft) => navigator.save_settings(&draft.rate_text, draft.voice, draft.dark),
            None => output::warning("Open `settings` first."),
        },
        "close" => navigator.close_settings(),
        "back" => navigator.back(),
        "share" => output::info(navigator.share_text()),
        "exit" | "quit" => return LoopControl::Exit,
        other => output::warning(format!("Unknown command `{other}`. Try `help`.")),
    }
    LoopControl::Continue
}

fn parse_litres(arg: Option<&&str>, default: f64) -> Option<f64> {
    match arg {
        None => Some(default),
        Some(raw) => raw.parse::<f64>().ok().filter(|litres| litres.is_finite()),
    }
}

fn print_help() {
    output::info("Entry:    today | yesterday | add [L] | less [L] | none | clear | save");
    output::info("Ledger:   month | entry | next | prev | edit <YYYY-MM-DD> | confirm | cancel");
    output::info("Settings: settings | rate <n> | voice on|off | theme dark|light | apply | close");
    output::info("Other:    show | share | back | help | exit");
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = COMMANDS.iter().map(|name| name.to_string()).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);

        let trimmed = prefix.trim_start();
        if let Some(space_idx) = trimmed.find(char::is_whitespace) {
            let leading = prefix.len().saturating_sub(trimmed.len());
            if pos > leading + space_idx {
                return Ok((start, Vec::new()));
            }
        }

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}
