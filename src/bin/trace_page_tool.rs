use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trace_view::api::{TracePage, TracePageConfig, TraceViewType};
use trace_view::core::{SpanId, Trace, derive_subtrace};

const USAGE: &str = "usage: trace_page_tool <subtrace|replay> --input <trace.json> --output <path> [--focus <span-id>] [--config <config.json>] [--script <script.json>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Subtrace,
    Replay,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    input: PathBuf,
    output: PathBuf,
    focus: Option<String>,
    config: Option<PathBuf>,
    script: Option<PathBuf>,
}

/// One scripted page event for `replay`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
enum ScriptStep {
    Shortcut { name: String },
    Key { combo: String },
    SetRange { start: f64, end: f64 },
    Focus { span_id: Option<String> },
    Representation { key: String },
    Search { text: String },
    View { view: TraceViewType },
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ReplayScript {
    #[serde(default)]
    steps: Vec<ScriptStep>,
}

fn main() {
    let _ = trace_view::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let trace: Trace = read_json(&args.input)?;
    match args.command {
        CommandKind::Subtrace => {
            let focus = args.focus.map(SpanId::new);
            let displayed = derive_subtrace(Some(&trace), focus.as_ref()).unwrap_or(trace);
            write_json(&args.output, &displayed)
        }
        CommandKind::Replay => {
            let config = match &args.config {
                Some(path) => TracePageConfig::from_json_str(&read_text(path)?)
                    .map_err(|err| err.to_string())?,
                None => TracePageConfig::default(),
            };
            let script: ReplayScript = match &args.script {
                Some(path) => read_json(path)?,
                None => ReplayScript::default(),
            };
            let mut page = TracePage::new(config).map_err(|err| err.to_string())?;
            page.navigate(trace.trace_id().clone(), args.focus.map(SpanId::new));
            page.on_trace_loaded(trace);
            for step in script.steps {
                apply_step(&mut page, step)?;
            }
            let payload = page
                .snapshot()
                .to_json_contract_v1_pretty()
                .map_err(|err| err.to_string())?;
            fs::write(&args.output, payload)
                .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))
        }
    }
}

fn apply_step(page: &mut TracePage, step: ScriptStep) -> Result<(), String> {
    match step {
        ScriptStep::Shortcut { name } => {
            if !page.handle_shortcut(&name) {
                return Err(format!("unknown shortcut `{name}`"));
            }
        }
        ScriptStep::Key { combo } => {
            if !page.handle_key(&combo) {
                return Err(format!("unbound key combo `{combo}`"));
            }
        }
        ScriptStep::SetRange { start, end } => {
            page.set_view_range(start, end, None)
                .map_err(|err| err.to_string())?;
        }
        ScriptStep::Focus { span_id } => page.set_focus_span(span_id.map(SpanId::new)),
        ScriptStep::Representation { key } => {
            let _ = page.select_representation(&key);
        }
        ScriptStep::Search { text } => page.set_search_text(text),
        ScriptStep::View { view } => {
            let _ = page.set_view_type(view);
        }
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, String> {
    serde_json::from_str(&read_text(path)?).map_err(|err| format!("invalid json: {err}"))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    fs::write(path, payload).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("subtrace") => CommandKind::Subtrace,
        Some("replay") => CommandKind::Replay,
        _ => return Err(USAGE.to_owned()),
    };

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut focus = None::<String>;
    let mut config = None::<PathBuf>;
    let mut script = None::<PathBuf>;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value()?)),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--focus" => focus = Some(value()?),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--script" => script = Some(PathBuf::from(value()?)),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    Ok(CliArgs {
        command,
        input: input.ok_or_else(|| "missing --input".to_owned())?,
        output: output.ok_or_else(|| "missing --output".to_owned())?,
        focus,
        config,
        script,
    })
}
