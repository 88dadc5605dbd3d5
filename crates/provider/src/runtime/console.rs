//! Console — line commands standing in for the buttons and logs screens.
//!
//! Each line is parsed into a [`Command`], executed against the shared
//! state, and answered on stdout. `watch` spawns one observer task per
//! identifier that prints every change it is told about; `unwatch` stops it.

use std::collections::HashMap;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::provider::{ContentValues, Operation, QueryArgs};
use crate::state::SharedState;
use crate::uri::ContentUri;

pub const HELP: &str = "\
commands:
  button <1|2|3>     record an interaction with a button
  logs               list every recorded interaction
  clear              delete every recorded interaction
  query <uri>        query the provider
  type <uri>         ask the provider for a MIME type
  insert <uri>       try to insert through the provider
  update <uri>       try to update through the provider
  delete <uri>       try to delete through the provider
  watch <uri>        print change notifications for <uri> and below
  unwatch <uri>      stop a watch started with 'watch'
  help               show this message
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Button(u8),
    Logs,
    Clear,
    Query(ContentUri),
    Write(Operation, ContentUri),
    Watch(ContentUri),
    Unwatch(ContentUri),
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Ok(None);
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments for '{}'", verb));
        }

        let uri = |arg: Option<&str>| -> Result<ContentUri, String> {
            let raw = arg.ok_or_else(|| format!("'{}' needs a URI", verb))?;
            ContentUri::parse(raw).map_err(|e| e.to_string())
        };

        let command = match verb {
            "button" => {
                let n = arg
                    .and_then(|s| s.parse::<u8>().ok())
                    .filter(|n| (1..=3).contains(n))
                    .ok_or_else(|| "button needs 1, 2 or 3".to_string())?;
                Command::Button(n)
            }
            "logs" => Command::Logs,
            "clear" => Command::Clear,
            "query" => Command::Query(uri(arg)?),
            "type" => Command::Write(Operation::GetType, uri(arg)?),
            "insert" => Command::Write(Operation::Insert, uri(arg)?),
            "update" => Command::Write(Operation::Update, uri(arg)?),
            "delete" => Command::Write(Operation::Delete, uri(arg)?),
            "watch" => Command::Watch(uri(arg)?),
            "unwatch" => Command::Unwatch(uri(arg)?),
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}' (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

/// Run a command that answers synchronously. `Watch`, `Unwatch` and
/// `Quit` need the console loop's [`Watchers`] and are handled by [`run`].
pub fn execute(state: &SharedState, command: &Command) -> String {
    match command {
        Command::Button(n) => match state.logger.add_log(&format!("Interaction with 'Button {}'", n)) {
            Ok(()) => format!("logged button {}", n),
            Err(e) => format!("error: {}", e),
        },
        Command::Logs => {
            let logs = state.logger.get_all_logs();
            if logs.is_empty() {
                return "no logs".to_string();
            }
            logs.iter()
                .map(|log| format!("{}  {}", state.formatter.format_date(log.timestamp), log.msg))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Command::Clear => match state.logger.remove_logs() {
            Ok(()) => "logs removed".to_string(),
            Err(e) => format!("error: {}", e),
        },
        Command::Query(uri) => match state.provider.query(uri, &QueryArgs::default()) {
            Ok(Some(cursor)) if cursor.is_empty() => "0 rows".to_string(),
            Ok(Some(cursor)) => cursor
                .iter()
                .map(|row| serde_json::to_string(row).unwrap_or_else(|e| format!("error: {}", e)))
                .collect::<Vec<_>>()
                .join("\n"),
            Ok(None) => "no data source".to_string(),
            Err(e) => format!("error: {}", e),
        },
        Command::Write(operation, uri) => {
            let values = ContentValues::new();
            let outcome = match operation {
                Operation::GetType => state.provider.get_type(uri),
                Operation::Insert => state.provider.insert(uri, &values).map(|u| u.to_string()),
                Operation::Update => state.provider.update(uri, &values, None, &[]).map(|n| n.to_string()),
                Operation::Delete => state.provider.delete(uri, None, &[]).map(|n| n.to_string()),
            };
            match outcome {
                Ok(answer) => answer,
                Err(e) => format!("error: {}", e),
            }
        }
        Command::Watch(uri) | Command::Unwatch(uri) => format!("{} is handled by the console loop", uri),
        Command::Help => HELP.to_string(),
        Command::Quit => "bye".to_string(),
    }
}

/// Observer tasks started from the console, at most one per identifier.
/// Dropping the set stops every task.
#[derive(Default)]
pub struct Watchers {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl Watchers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start printing changes for `uri`. Returns `false` when a watch on
    /// the same identifier is still running.
    pub fn watch(&mut self, state: &SharedState, uri: ContentUri) -> bool {
        self.tasks.retain(|_, task| !task.is_finished());
        if self.tasks.contains_key(uri.as_str()) {
            return false;
        }

        let key = uri.as_str().to_string();
        let mut subscription = state.hub.subscribe(uri, true);
        let task = tokio::spawn(async move {
            while let Some(changed) = subscription.changed().await {
                println!("[change] {} (watching {})", changed, subscription.uri());
            }
        });
        self.tasks.insert(key, task);
        true
    }

    /// Stop the watch on `uri`. Returns `false` if there was none.
    pub fn unwatch(&mut self, uri: &ContentUri) -> bool {
        match self.tasks.remove(uri.as_str()) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_watching(&self, uri: &ContentUri) -> bool {
        self.tasks.contains_key(uri.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for Watchers {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

/// Read commands from stdin until `quit`, EOF or Ctrl-C.
pub async fn run(state: SharedState) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let prompt = state.config.console.prompt.clone();
    let mut watchers = Watchers::new();

    println!("{}", HELP);
    loop {
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Watch(uri))) => {
                if watchers.watch(&state, uri.clone()) {
                    println!("watching {}", uri);
                } else {
                    println!("already watching {}", uri);
                }
            }
            Ok(Some(Command::Unwatch(uri))) => {
                if watchers.unwatch(&uri) {
                    println!("stopped watching {}", uri);
                } else {
                    println!("not watching {}", uri);
                }
            }
            Ok(Some(command)) => println!("{}", execute(&state, &command)),
            Err(e) => {
                warn!("Rejected console input: {}", e);
                println!("{}", e);
            }
        }
    }

    info!("Console closed");
    Ok(())
}
