//! Command execution logic.
//!
//! Contains the `execute_command` function that runs parsed commands
//! against the simulated filesystem and clock and returns results.

use tracing::debug;

use crate::batch::{BatchJob, parse_duration};
use crate::config::{
    BATCH_EXTENSION, HELP_COLUMNS, HELP_SHELL_TEXT, HELP_SLURM_TEXT, HELP_TEXT, ShellConfig,
};
use crate::filesystem::{EntryKind, FileContents, FileKind, Filesystem};
use crate::format::{format_sim_date, justify, pad_number};
use crate::output::OutputLine;

use super::{Command, CommandResult, EditRequest, SchedulerRequest};

/// Mutable session state a command runs against.
pub(crate) struct Context<'a> {
    pub fs: &'a mut Filesystem,
    /// Simulated clock, in milliseconds
    pub clock_ms: &'a mut u64,
    /// Command history, oldest first, including the running command
    pub history: &'a [String],
    pub config: &'a ShellConfig,
}

/// Execute a parsed command and return output lines.
///
/// Filesystem changes and clock advances are applied directly; editor and
/// scheduler work is returned in the result for the front end.
pub(crate) fn execute_command(cmd: Command, ctx: Context<'_>) -> CommandResult {
    let now = *ctx.clock_ms;

    match cmd {
        Command::Help(topic) => execute_help(topic.as_deref(), ctx.config),
        Command::Clear => CommandResult::clear(),
        Command::Sleep(duration) => execute_sleep(&duration, ctx.clock_ms),
        Command::History => execute_history(ctx.history, ctx.config.history_depth),
        Command::Ls { paths, long } => execute_ls(&paths, long, ctx.fs, ctx.config),
        Command::Pwd => CommandResult::output(vec![OutputLine::text(ctx.fs.working_dir())]),
        Command::Mkdir(paths) => for_each_path("mkdir", &paths, |p| ctx.fs.mkdir(p, now)),
        Command::Touch(paths) => for_each_path("touch", &paths, |p| {
            ctx.fs.create_file(p, now, FileKind::Text, true)
        }),
        Command::Cp { src, dst } => match ctx.fs.copy_file(&src, &dst, now) {
            Ok(()) => CommandResult::empty(),
            Err(e) => CommandResult::error(format!("cp: {}", e)),
        },
        Command::Rm { paths, recursive } => {
            for_each_path("rm", &paths, |p| ctx.fs.remove_file(p, recursive))
        }
        Command::Cat(paths) => execute_cat(&paths, ctx.fs),
        Command::Whoami => CommandResult::output(vec![OutputLine::text(&ctx.config.user)]),
        Command::Cd(path) => match ctx.fs.change_working_dir(path.as_deref()) {
            Ok(()) => CommandResult::empty(),
            Err(e) => {
                debug!(error = %e, "cd failed");
                CommandResult::error("cd: cannot navigate to directory")
            }
        },
        Command::Edit(path) => execute_edit(&path, ctx.fs),
        Command::Date(None) => CommandResult::output(vec![OutputLine::text(format_sim_date(now))]),
        Command::Date(Some(path)) => match ctx.fs.get_date(&path) {
            Some(created) => CommandResult::output(vec![OutputLine::text(format_sim_date(created))]),
            None => CommandResult::error(format!("date: {}: no such file or directory", path)),
        },
        Command::Sbatch(path) => execute_sbatch(&path, ctx.fs),
        Command::Squeue => CommandResult::scheduler(SchedulerRequest::Queue),
        Command::Scancel(job) => CommandResult::scheduler(SchedulerRequest::Cancel(job)),
        Command::Unsupported(name) => CommandResult::error(format!(
            "command '{}' is not supported (use the 'edit' command)",
            name
        )),
        Command::Usage(message) => CommandResult::error(message),
        Command::Unknown(name) => execute_unknown(&name, ctx.fs),
    }
}

/// Run a filesystem operation on every path, reporting each failure.
fn for_each_path<E, F>(name: &str, paths: &[String], mut op: F) -> CommandResult
where
    E: std::fmt::Display,
    F: FnMut(&str) -> Result<(), E>,
{
    let output = paths
        .iter()
        .filter_map(|path| op(path).err())
        .map(|e| OutputLine::error(format!("{}: {}", name, e)))
        .collect();
    CommandResult::output(output)
}

/// Execute `help [topic]`.
fn execute_help(topic: Option<&str>, config: &ShellConfig) -> CommandResult {
    let text = match topic {
        None => HELP_TEXT.to_string(),
        Some("about") => config.about_text(),
        Some("shell") => HELP_SHELL_TEXT.to_string(),
        Some("slurm") => HELP_SLURM_TEXT.to_string(),
        Some(_) => return CommandResult::error("help: unknown help topic"),
    };
    let lines = justify(text.trim_end(), HELP_COLUMNS)
        .into_iter()
        .map(OutputLine::text)
        .collect();
    CommandResult::output(lines)
}

/// Execute `sleep [[h:]m:]s`.
fn execute_sleep(duration: &str, clock_ms: &mut u64) -> CommandResult {
    let Some(secs) = parse_duration(duration) else {
        return CommandResult::error("sleep: invalid argument");
    };
    *clock_ms = clock_ms.saturating_add(secs.saturating_mul(1_000));
    debug!(secs, clock_ms = *clock_ms, "advanced simulated clock");
    CommandResult::scheduler(SchedulerRequest::AdvanceTime(secs))
}

/// Execute `history`: the most recent entries, numbered from 1.
fn execute_history(history: &[String], depth: usize) -> CommandResult {
    let total = history.len();
    let lines = history
        .iter()
        .enumerate()
        .skip(total.saturating_sub(depth))
        .map(|(i, line)| OutputLine::text(format!(" {}  {}", pad_number(i + 1, total), line)))
        .collect();
    CommandResult::output(lines)
}

/// Execute `ls [-l] [paths..]`.
fn execute_ls(paths: &[String], long: bool, fs: &Filesystem, config: &ShellConfig) -> CommandResult {
    let default = [".".to_string()];
    let targets = if paths.is_empty() { &default[..] } else { paths };
    let with_headers = targets.len() > 1;
    let mut output = Vec::new();

    for (i, target) in targets.iter().enumerate() {
        let mut entries = match fs.list_files(Some(target)) {
            Ok(entries) => entries,
            Err(e) => {
                output.push(OutputLine::error(format!("ls: {}", e)));
                return CommandResult::output(output);
            }
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        if with_headers && fs.is_directory(target) {
            if i > 0 {
                output.push(OutputLine::empty());
            }
            output.push(OutputLine::text(format!("{}:", target)));
        }
        if long {
            output.extend(entries.iter().map(|e| OutputLine::long_entry(e, &config.user)));
        } else {
            output.extend(OutputLine::list_rows(&entries, config.columns));
        }
    }

    CommandResult::output(output)
}

/// Execute `cat <paths..>`.
fn execute_cat(paths: &[String], fs: &Filesystem) -> CommandResult {
    let mut output = Vec::new();
    for path in paths {
        match fs.open_file(path) {
            Some(FileContents::Text(content)) => {
                output.extend(content.split('\n').map(OutputLine::text));
            }
            Some(FileContents::Binary) => {
                output.push(OutputLine::error("cat: operation not permitted"));
            }
            None => output.push(OutputLine::error("cat: file not found")),
        }
    }
    CommandResult::output(output)
}

/// Execute `edit <path>`: hand the file's content to the front end.
fn execute_edit(path: &str, fs: &Filesystem) -> CommandResult {
    match fs.open_file(path) {
        Some(FileContents::Text(content)) => {
            let abs = fs.normalize_path(path);
            CommandResult::edit(EditRequest {
                batch_script: abs.ends_with(BATCH_EXTENSION),
                path: abs,
                content: content.to_string(),
            })
        }
        Some(FileContents::Binary) => CommandResult::error("edit: file is binary"),
        None => CommandResult::error("edit: operation not permitted"),
    }
}

/// Execute `sbatch <script>`: validate the script into a job request.
fn execute_sbatch(path: &str, fs: &Filesystem) -> CommandResult {
    let abs = fs.normalize_path(path);
    let text = match fs.open_file(&abs) {
        Some(FileContents::Text(text)) => text,
        Some(FileContents::Binary) if abs.ends_with(BATCH_EXTENSION) => {
            return CommandResult::error("sbatch: operation not permitted");
        }
        // Binary files fall through to the extension check
        Some(FileContents::Binary) => "",
        None => return CommandResult::error("sbatch: file not found"),
    };

    match BatchJob::from_script(&abs, text) {
        Ok(job) => {
            debug!(script = %job.script, nodes = job.num_nodes, secs = job.duration_secs, "batch job ready");
            CommandResult::scheduler(SchedulerRequest::Submit(job))
        }
        Err(e) => CommandResult::error(format!("sbatch: {}", e)),
    }
}

/// A command name that matches nothing may still be a path.
fn execute_unknown(name: &str, fs: &Filesystem) -> CommandResult {
    match fs.file_exists(name) {
        Some(EntryKind::BinaryFile) => {
            CommandResult::error("cannot execute programs on the cluster's head node")
        }
        Some(_) => CommandResult::error("operation not allowed"),
        None => CommandResult::error(format!("command '{}' not found.", name)),
    }
}

// =============================================================================
// Tests
// =============================================================================
