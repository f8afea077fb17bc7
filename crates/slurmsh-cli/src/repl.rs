//! Line-oriented read-eval-print loop over a [`Session`].
//!
//! Input conventions:
//! - A line ending in TAB is completed instead of executed; the completed
//!   text stays pending and the next input line is appended to it
//! - `edit` prints the file, then reads replacement lines until a lone `.`

use std::io::{self, BufRead, Write};

use slurmsh_core::{Completion, EditRequest, SchedulerRequest, Session};
use tracing::{debug, warn};

use crate::render::{render_line, render_prompt};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const EDIT_TERMINATOR: &str = ".";

pub struct Repl<R, W> {
    session: Session,
    input: R,
    out: W,
    /// Completed text waiting for the rest of the line
    pending: String,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(session: Session, input: R, out: W) -> Self {
        Self {
            session,
            input,
            out,
            pending: String::new(),
        }
    }

    /// Run until end of input.
    pub fn run(&mut self) -> io::Result<()> {
        while let Some(line) = self.read_line(true)? {
            let line = format!("{}{}", std::mem::take(&mut self.pending), line);
            match line.strip_suffix('\t') {
                Some(partial) => self.complete(partial)?,
                None => self.execute(&line)?,
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Read one line without its terminator. `None` at end of input.
    fn read_line(&mut self, show_prompt: bool) -> io::Result<Option<String>> {
        if show_prompt {
            write!(self.out, "{}", render_prompt(&self.session.prompt()))?;
            if !self.pending.is_empty() {
                write!(self.out, "{}", self.pending)?;
            }
            self.out.flush()?;
        }
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.strip_suffix('\n').unwrap_or(&buf);
        Ok(Some(trimmed.strip_suffix('\r').unwrap_or(trimmed).to_string()))
    }

    fn complete(&mut self, partial: &str) -> io::Result<()> {
        match self.session.complete(partial) {
            Completion::Line(line) => self.pending = line,
            Completion::Candidates(candidates) => {
                for candidate in candidates {
                    writeln!(self.out, "{}", candidate)?;
                }
                self.pending = partial.to_string();
            }
        }
        Ok(())
    }

    fn execute(&mut self, line: &str) -> io::Result<()> {
        let result = self.session.execute(line);

        if result.clear {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }
        for output in &result.output {
            writeln!(self.out, "{}", render_line(output))?;
        }
        if let Some(edit) = result.edit {
            self.edit(edit)?;
        }
        if let Some(request) = result.scheduler {
            self.schedule(request)?;
        }
        Ok(())
    }

    fn edit(&mut self, request: EditRequest) -> io::Result<()> {
        writeln!(self.out, "--- {} ---", request.path)?;
        writeln!(self.out, "{}", request.content)?;
        writeln!(
            self.out,
            "--- enter new content, end with a line containing only '{}' ---",
            EDIT_TERMINATOR
        )?;
        self.out.flush()?;

        let mut lines = Vec::new();
        loop {
            match self.read_line(false)? {
                Some(line) if line == EDIT_TERMINATOR => break,
                Some(line) => lines.push(line),
                None => {
                    warn!(path = %request.path, "input ended while editing; changes discarded");
                    return Ok(());
                }
            }
        }

        if let Err(e) = self.session.save_edit(&request.path, &lines.join("\n")) {
            writeln!(self.out, "edit: {}", e)?;
        }
        Ok(())
    }

    fn schedule(&mut self, request: SchedulerRequest) -> io::Result<()> {
        debug!(?request, "scheduler request");
        match request {
            SchedulerRequest::AdvanceTime(_) => Ok(()),
            SchedulerRequest::Submit(_) | SchedulerRequest::Queue | SchedulerRequest::Cancel(_) => {
                writeln!(self.out, "{}: no scheduler connected", scheduler_command(&request))
            }
        }
    }

    #[cfg(test)]
    fn session(&self) -> &Session {
        &self.session
    }
}

fn scheduler_command(request: &SchedulerRequest) -> &'static str {
    match request {
        SchedulerRequest::Submit(_) => "sbatch",
        SchedulerRequest::Queue => "squeue",
        SchedulerRequest::Cancel(_) => "scancel",
        SchedulerRequest::AdvanceTime(_) => "sleep",
    }
}
