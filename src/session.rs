// Interactive session: one command per line, each applied to the store and re-rendered

use crate::filter::StatusFilter;
use crate::input::InputBuffer;
use crate::models::TaskId;
use crate::render::Renderer;
use crate::store::TaskStore;
use colored::Colorize;
use eyre::{Context, Result, eyre};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

pub const HELP: &str = "\
commands:
  add [TEXT]       submit TEXT (or the pending input) as a new task
  type TEXT        set the pending input without submitting it
  edit ID TEXT     change the title of task ID
  done ID          mark task ID complete
  undone ID        mark task ID not complete
  delete ID        move task ID to the trash
  restore ID       bring task ID back from the trash
  filter NAME      show all | completed | unchecked | trash
  purge            permanently remove trashed tasks (trash view only)
  list             show the current view
  json             print the current view as JSON
  help             show this help
  quit             leave the session";

/// One user event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add the inline text when present, otherwise submit the input buffer
    Add(Option<String>),
    Type(String),
    Edit(TaskId, String),
    Complete(TaskId, bool),
    Delete(TaskId, bool),
    Filter(StatusFilter),
    Purge,
    List,
    Json,
    Help,
    Quit,
}

impl Command {
    /// Parse a single input line; blank lines yield `None`
    ///
    /// Free text is everything after the single space following the verb or id,
    /// taken verbatim.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let line = line.trim_start();
        let (verb, rest) = split_word(line);

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" => Command::Add(rest.map(str::to_string)),
            "type" => Command::Type(rest.unwrap_or_default().to_string()),
            "edit" => {
                let (id, title) = split_word(rest.ok_or_else(|| eyre!("Usage: edit ID TEXT"))?);
                Command::Edit(parse_id(id)?, title.unwrap_or_default().to_string())
            }
            "done" => Command::Complete(parse_id_arg(verb, rest)?, true),
            "undone" => Command::Complete(parse_id_arg(verb, rest)?, false),
            "delete" => Command::Delete(parse_id_arg(verb, rest)?, true),
            "restore" => Command::Delete(parse_id_arg(verb, rest)?, false),
            "filter" => {
                let name = rest.ok_or_else(|| eyre!("Usage: filter all|completed|unchecked|trash"))?;
                Command::Filter(name.parse()?)
            }
            "purge" => Command::Purge,
            "list" | "ls" => Command::List,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(eyre!("Unknown command: {} (try `help`)", other)),
        };

        Ok(Some(command))
    }

    /// Whether the view should be redrawn after this command
    fn rerenders(&self) -> bool {
        !matches!(self, Command::Type(_) | Command::Json | Command::Help | Command::Quit)
    }
}

/// Split off the first word; the remainder keeps everything after the single separating space
fn split_word(s: &str) -> (&str, Option<&str>) {
    match s.split_once(' ') {
        Some((word, rest)) => (word, Some(rest)),
        None => (s, None),
    }
}

fn parse_id(s: &str) -> Result<TaskId> {
    let s = s.trim();
    s.parse::<u64>()
        .map(TaskId)
        .map_err(|_| eyre!("Invalid task id: {:?}", s))
}

fn parse_id_arg(verb: &str, rest: Option<&str>) -> Result<TaskId> {
    let arg = rest.ok_or_else(|| eyre!("Usage: {} ID", verb))?;
    parse_id(arg)
}

/// Whether the session keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the store and the input buffer for the lifetime of the session
pub struct Session<W: Write> {
    store: TaskStore,
    input: InputBuffer,
    renderer: Renderer,
    out: W,
    prompt: Option<String>,
}

impl<W: Write> Session<W> {
    pub fn new(store: TaskStore, renderer: Renderer, out: W) -> Self {
        Self {
            store,
            input: InputBuffer::new(),
            renderer,
            out,
            prompt: None,
        }
    }

    /// Print `prompt` before reading each line
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Consume the session, returning the output sink
    pub fn into_output(self) -> W {
        self.out
    }

    /// Process lines from `reader` until EOF or `quit`
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<()> {
        info!("Session started");
        self.render()?;

        let mut lines = reader.lines();
        loop {
            self.write_prompt()?;

            let line = match lines.next() {
                Some(line) => line.context("Failed to read input line")?,
                None => break,
            };

            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }

        info!(tasks = self.store.len(), "Session ended");
        Ok(())
    }

    /// Parse and apply one line; malformed commands are reported, not fatal
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match Command::parse(line) {
            Ok(Some(command)) => self.apply(command),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                warn!(line, error = %e, "Rejected command");
                let message = self.paint_error(&format!("error: {}", e));
                writeln!(self.out, "{}", message)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Apply a parsed command to the store
    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "apply");

        match &command {
            Command::Add(text) => {
                // Inline text bypasses the buffer, which is only cleared once a task is added
                let added = match text {
                    Some(text) => self.store.add(text).inspect(|_| self.input.clear()),
                    None => self.input.submit(&mut self.store),
                };
                if added.is_none() {
                    self.notice("nothing to add")?;
                }
            }
            Command::Type(text) => self.input.set(text.as_str()),
            Command::Edit(id, title) => {
                let matched = self.store.edit_title(*id, title);
                self.report_missing(*id, matched)?;
            }
            Command::Complete(id, value) => {
                let matched = self.store.toggle_complete(*id, *value);
                self.report_missing(*id, matched)?;
            }
            Command::Delete(id, value) => {
                let matched = self.store.toggle_delete(*id, *value);
                self.report_missing(*id, matched)?;
            }
            Command::Filter(filter) => self.store.set_filter(*filter),
            Command::Purge => {
                if self.store.active_filter() != StatusFilter::Trash {
                    self.notice("purge is only available in the trash view (`filter trash`)")?;
                    return Ok(Flow::Continue);
                }
                let removed = self.store.purge();
                self.notice(&format!("purged {} task(s)", removed))?;
            }
            Command::List => {}
            Command::Json => {
                let json = serde_json::to_string_pretty(&self.store.filtered_view())
                    .context("Failed to serialize view")?;
                writeln!(self.out, "{}", json)?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        if command.rerenders() {
            self.render()?;
        }
        Ok(Flow::Continue)
    }

    fn render(&mut self) -> Result<()> {
        let rendered = self.renderer.render(&self.store);
        write!(self.out, "{}", rendered)?;
        self.out.flush()?;
        Ok(())
    }

    fn write_prompt(&mut self) -> Result<()> {
        if let Some(prompt) = &self.prompt {
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn report_missing(&mut self, id: TaskId, matched: bool) -> Result<()> {
        if !matched {
            self.notice(&format!("no task #{}", id))?;
        }
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        let line = if self.renderer.color {
            message.yellow().to_string()
        } else {
            message.to_string()
        };
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn paint_error(&self, message: &str) -> String {
        if self.renderer.color {
            message.red().to_string()
        } else {
            message.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<Vec<u8>> {
        Session::new(TaskStore::new(), Renderer::new(false, true), Vec::new())
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            Command::parse("add Buy milk").unwrap(),
            Some(Command::Add(Some("Buy milk".to_string())))
        );
        assert_eq!(Command::parse("add").unwrap(), Some(Command::Add(None)));
        assert_eq!(
            Command::parse("add   ").unwrap(),
            Some(Command::Add(Some("  ".to_string())))
        );
        assert_eq!(
            Command::parse("ADD x\r\n").unwrap(),
            Some(Command::Add(Some("x".to_string())))
        );
    }

    #[test]
    fn test_parse_id_commands() {
        assert_eq!(Command::parse("done 3").unwrap(), Some(Command::Complete(TaskId(3), true)));
        assert_eq!(Command::parse("undone 3").unwrap(), Some(Command::Complete(TaskId(3), false)));
        assert_eq!(Command::parse("delete 1").unwrap(), Some(Command::Delete(TaskId(1), true)));
        assert_eq!(Command::parse("restore 1").unwrap(), Some(Command::Delete(TaskId(1), false)));
        assert_eq!(
            Command::parse("edit 2 Call Alice").unwrap(),
            Some(Command::Edit(TaskId(2), "Call Alice".to_string()))
        );
        assert_eq!(
            Command::parse("edit 2").unwrap(),
            Some(Command::Edit(TaskId(2), String::new()))
        );
    }

    #[test]
    fn test_parse_filter_and_misc() {
        assert_eq!(
            Command::parse("filter trash").unwrap(),
            Some(Command::Filter(StatusFilter::Trash))
        );
        assert_eq!(Command::parse("purge").unwrap(), Some(Command::Purge));
        assert_eq!(Command::parse("ls").unwrap(), Some(Command::List));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("done").is_err());
        assert!(Command::parse("done abc").is_err());
        assert!(Command::parse("edit x title").is_err());
        assert!(Command::parse("filter deleted").is_err());
        assert!(Command::parse("filter").is_err());
    }

    #[test]
    fn test_add_and_toggle_flow() {
        let mut session = session();
        session.handle_line("add Buy milk").unwrap();
        session.handle_line("add Call Bob").unwrap();
        session.handle_line("done 1").unwrap();

        let store = session.store();
        assert_eq!(store.len(), 2);
        assert!(store.get(TaskId(1)).unwrap().completed);
        assert!(session.input().is_empty());

        let out = output(session);
        assert!(out.contains("[ ] #2 Call Bob\n[x] #1 Buy milk\n"));
    }

    #[test]
    fn test_type_then_add_submits_buffer() {
        let mut session = session();
        session.handle_line("type Draft").unwrap();
        assert_eq!(session.input().text(), "Draft");
        assert!(session.store().is_empty());

        session.handle_line("add").unwrap();
        assert_eq!(session.store().get(TaskId(1)).unwrap().title, "Draft");
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_rejected_inline_add_keeps_pending_input() {
        let mut session = session();
        session.handle_line("type Draft").unwrap();

        // "add " carries an empty inline text
        session.handle_line("add ").unwrap();
        assert!(session.store().is_empty());
        assert_eq!(session.input().text(), "Draft");

        session.handle_line("add Other").unwrap();
        assert_eq!(session.store().get(TaskId(1)).unwrap().title, "Other");
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_empty_add_is_noop() {
        let mut session = session();
        session.handle_line("add").unwrap();
        assert!(session.store().is_empty());
        assert_eq!(session.store().next_id(), TaskId(1));
        assert!(output(session).contains("nothing to add"));
    }

    #[test]
    fn test_purge_requires_trash_view() {
        let mut session = session();
        session.handle_line("add Old").unwrap();
        session.handle_line("delete 1").unwrap();

        session.handle_line("purge").unwrap();
        assert_eq!(session.store().len(), 1);

        session.handle_line("filter trash").unwrap();
        session.handle_line("purge").unwrap();
        assert!(session.store().is_empty());

        let out = output(session);
        assert!(out.contains("only available in the trash view"));
        assert!(out.contains("purged 1 task(s)"));
    }

    #[test]
    fn test_missing_id_reports_notice() {
        let mut session = session();
        session.handle_line("done 42").unwrap();
        assert!(session.store().is_empty());
        assert!(output(session).contains("no task #42"));
    }

    #[test]
    fn test_bad_command_does_not_stop_session() {
        let mut session = session();
        assert_eq!(session.handle_line("bogus").unwrap(), Flow::Continue);
        assert_eq!(session.handle_line("quit").unwrap(), Flow::Quit);
        assert!(output(session).contains("error: Unknown command: bogus"));
    }

    #[test]
    fn test_json_prints_filtered_view() {
        let mut session = session();
        session.handle_line("add a").unwrap();
        session.handle_line("add b").unwrap();
        session.handle_line("delete 2").unwrap();
        session.handle_line("json").unwrap();

        let out = output(session);
        // Checkbox rows also contain brackets; the pretty-printed array opens on its own line
        let start = out.find("[\n").unwrap();
        let end = out.rfind(']').unwrap();
        let tasks: Vec<serde_json::Value> = serde_json::from_str(&out[start..=end]).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["id"], 1);
        assert_eq!(tasks[0]["title"], "a");
    }

    #[test]
    fn test_run_stops_at_quit() {
        let mut session = session().with_prompt("> ");
        let script = "add one\nquit\nadd two\n";
        session.run(script.as_bytes()).unwrap();

        assert_eq!(session.store().len(), 1);
        let out = output(session);
        assert!(out.contains("> "));
        assert!(!out.contains("two"));
    }

    #[test]
    fn test_run_until_eof() {
        let mut session = session();
        session.run("add one\n\nadd two".as_bytes()).unwrap();
        assert_eq!(session.store().len(), 2);
    }
}
