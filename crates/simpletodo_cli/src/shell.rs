//! Line-oriented interactive shell over a to-do session.

use anyhow::Result;
use log::warn;
use simpletodo_core::{EditOutcome, EditRequest, EditResult, EditSurface, ListStore, TodoService};
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  list           show items
  add <text>     append an item (text may be empty)
  edit <n>       edit item n; type the new text, or :q to cancel
  rm <n>         remove item n
  help           show this help
  quit           leave";

const CANCEL: &str = ":q";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Add(String),
    Edit(usize),
    Remove(usize),
    Help,
    Quit,
    Invalid(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };
        match word {
            "list" | "ls" => Self::List,
            "add" => Self::Add(rest.to_string()),
            "edit" => parse_position(rest).map_or_else(Self::Invalid, Self::Edit),
            "rm" => parse_position(rest).map_or_else(Self::Invalid, Self::Remove),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "" => Self::Help,
            other => Self::Invalid(format!("unknown command `{other}`")),
        }
    }
}

fn parse_position(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("expected a position, got `{}`", raw.trim()))
}

/// Confirms every edit with a preset text.
pub struct FixedTextSurface {
    text: String,
}

impl FixedTextSurface {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl EditSurface for FixedTextSurface {
    fn edit(&mut self, request: &EditRequest) -> EditOutcome {
        EditOutcome::Confirmed(EditResult {
            text: self.text.clone(),
            position: request.position,
        })
    }
}

/// Prompts on the shell streams for the replacement text.
struct PromptSurface<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<R, W: Write> PromptSurface<'_, R, W> {
    fn prompt(&mut self, request: &EditRequest) -> std::io::Result<()> {
        writeln!(
            self.out,
            "editing [{}] {} ({CANCEL} cancels)",
            request.position, request.text
        )?;
        write!(self.out, "new text> ")?;
        self.out.flush()
    }
}

impl<R: BufRead, W: Write> EditSurface for PromptSurface<'_, R, W> {
    fn edit(&mut self, request: &EditRequest) -> EditOutcome {
        if let Err(err) = self.prompt(request) {
            warn!("event=edit_prompt module=cli status=error error={err}");
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => EditOutcome::Cancelled,
            Ok(_) => {
                let text = line.trim_end_matches(['\r', '\n']);
                if text == CANCEL {
                    EditOutcome::Cancelled
                } else {
                    EditOutcome::Confirmed(EditResult {
                        text: text.to_string(),
                        position: request.position,
                    })
                }
            }
        }
    }
}

/// Interactive loop bound to one session and a pair of streams.
pub struct Shell<'s, S: ListStore, R, W> {
    service: &'s mut TodoService<S>,
    input: R,
    out: W,
}

impl<'s, S: ListStore, R: BufRead, W: Write> Shell<'s, S, R, W> {
    pub fn new(service: &'s mut TodoService<S>, input: R, out: W) -> Self {
        Self {
            service,
            input,
            out,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(mut self) -> Result<()> {
        print_rows(&mut self.out, self.service.rows())?;
        loop {
            write!(self.out, "todo> ")?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                return Ok(());
            }
            if !self.step(ShellCommand::parse(&line))? {
                return Ok(());
            }
        }
    }

    fn step(&mut self, command: ShellCommand) -> Result<bool> {
        let ack = match command {
            ShellCommand::List => {
                print_rows(&mut self.out, self.service.rows())?;
                None
            }
            ShellCommand::Add(text) => {
                self.service.set_input(text);
                Some(self.service.add())
            }
            ShellCommand::Edit(position) => match self.service.tap(position) {
                Some(request) => {
                    let outcome = PromptSurface {
                        input: &mut self.input,
                        out: &mut self.out,
                    }
                    .edit(&request);
                    let ack = self.service.finish_edit(outcome);
                    if ack.is_none() {
                        writeln!(self.out, "Edit cancelled.")?;
                    }
                    ack
                }
                None => {
                    writeln!(self.out, "No item at position {position}.")?;
                    None
                }
            },
            ShellCommand::Remove(position) => {
                let ack = self.service.long_press(position);
                if ack.is_none() {
                    writeln!(self.out, "No item at position {position}.")?;
                }
                ack
            }
            ShellCommand::Help => {
                writeln!(self.out, "{HELP}")?;
                None
            }
            ShellCommand::Quit => return Ok(false),
            ShellCommand::Invalid(message) => {
                writeln!(self.out, "{message}; try `help`")?;
                None
            }
        };

        if let Some(ack) = ack {
            writeln!(self.out, "{ack}")?;
        }
        // Rows are re-printed whole; a terminal has no per-row redraw.
        if !self.service.take_changes().is_empty() {
            print_rows(&mut self.out, self.service.rows())?;
        }
        Ok(true)
    }
}

/// Prints rows as `[position] text`.
pub fn print_rows<W: Write>(out: &mut W, rows: &[String]) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "(no items)");
    }
    for (position, row) in rows.iter().enumerate() {
        writeln!(out, "[{position}] {row}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{PromptSurface, Shell, ShellCommand};
    use simpletodo_core::{EditOutcome, EditRequest, EditSurface, MemoryListStore, TodoService};
    use std::io::{self, Write};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn prompt_write_failure_still_reads_the_reply() {
        let mut input = "fresh text\n".as_bytes();
        let mut out = BrokenPipe;
        let mut surface = PromptSurface {
            input: &mut input,
            out: &mut out,
        };
        let request = EditRequest {
            text: "stale".to_string(),
            position: 4,
        };

        match surface.edit(&request) {
            EditOutcome::Confirmed(result) => {
                assert_eq!(result.text, "fresh text");
                assert_eq!(result.position, 4);
            }
            EditOutcome::Cancelled => panic!("reply should confirm the edit"),
        }
    }

    fn run_script(service: &mut TodoService<MemoryListStore>, script: &str) -> String {
        let mut out = Vec::new();
        Shell::new(service, script.as_bytes(), &mut out)
            .run()
            .expect("shell run");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn parse_recognizes_commands() {
        assert_eq!(ShellCommand::parse("list\n"), ShellCommand::List);
        assert_eq!(
            ShellCommand::parse("add Buy milk\n"),
            ShellCommand::Add("Buy milk".to_string())
        );
        assert_eq!(ShellCommand::parse("add\n"), ShellCommand::Add(String::new()));
        assert_eq!(ShellCommand::parse("edit 2"), ShellCommand::Edit(2));
        assert_eq!(ShellCommand::parse("rm 0"), ShellCommand::Remove(0));
        assert_eq!(ShellCommand::parse("quit"), ShellCommand::Quit);
        assert!(matches!(ShellCommand::parse("rm x"), ShellCommand::Invalid(_)));
        assert!(matches!(ShellCommand::parse("frob"), ShellCommand::Invalid(_)));
    }

    #[test]
    fn scripted_session_applies_add_edit_remove() {
        let mut service = TodoService::open(MemoryListStore::new());
        let output = run_script(
            &mut service,
            "add Buy milk\nadd Walk dog\nedit 0\nBuy oat milk\nrm 1\nquit\n",
        );

        assert_eq!(service.items(), ["Buy oat milk".to_string()]);
        assert_eq!(service.store().saved(), vec!["Buy oat milk".to_string()]);
        assert!(output.contains("Item was added"));
        assert!(output.contains("Successfully updated item"));
        assert!(output.contains("Successfully removed item"));
    }

    #[test]
    fn edit_can_be_cancelled() {
        let mut service =
            TodoService::open(MemoryListStore::with_items(vec!["keep".to_string()]));
        let output = run_script(&mut service, "edit 0\n:q\n");

        assert_eq!(service.items(), ["keep".to_string()]);
        assert!(output.contains("Edit cancelled."));
    }

    #[test]
    fn stale_positions_are_reported() {
        let mut service = TodoService::open(MemoryListStore::new());
        let output = run_script(&mut service, "rm 3\nedit 1\n");
        assert_eq!(output.matches("No item at position").count(), 2);
    }
}
