//! Output Rendering
//!
//! Human-readable progress lines and error reports. The NDJSON stream used
//! with `--json` lives in [`crate::infrastructure::JsonEventSink`].

use std::error::Error as StdError;
use std::io::{self, Write};
use std::sync::Mutex;

use is_terminal::IsTerminal;

use crate::domain::ports::{PushEvent, PushEventSink};
use crate::error::PushError;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Progress lines on stderr
    #[default]
    Text,
    /// NDJSON events on stdout
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
#[derive(Debug, Clone, Copy)]
struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
    skip: &'static str,
    arrow: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
            skip: "○",
            arrow: "↑",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
            skip: "[ ]",
            arrow: "^",
        }
    }

    fn select(unicode: bool) -> Self {
        if unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Event sink that prints progress lines for people at a terminal
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    icons: Icons,
    verbose: u8,
}

impl ConsoleEventSink {
    /// Progress on stderr; unicode icons only when stderr is a terminal
    pub fn stderr(verbose: u8) -> Self {
        let unicode = io::stderr().is_terminal();
        Self::with_writer(io::stderr(), unicode, verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, unicode: bool, verbose: u8) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            icons: Icons::select(unicode),
            verbose,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }
}

impl PushEventSink for ConsoleEventSink {
    fn on_event(&self, event: PushEvent) {
        let icons = self.icons;
        let text = match event {
            PushEvent::Started {
                lockfile,
                policy_group,
            } => format!(
                "Pushing {} to policy group {}",
                lockfile.display(),
                policy_group
            ),
            PushEvent::CookbookUpdated {
                name,
                previous,
                current,
            } => format!(
                "  {} cookbook {} changed: {} {} {}",
                icons.write, name, previous, icons.write, current
            ),
            PushEvent::LockValidated {
                name,
                revision_id,
                cookbook_count,
            } => format!(
                "  {} validated {} ({} cookbooks, revision {})",
                icons.check,
                name,
                cookbook_count,
                short_id(&revision_id)
            ),
            PushEvent::LockfileWritten { path } => {
                format!("  {} wrote {}", icons.write, path.display())
            }
            PushEvent::UploadStarted { name, policy_group } => {
                format!("  {} uploading {} to {}", icons.arrow, name, policy_group)
            }
            PushEvent::ArtifactUploaded { name, identifier } => {
                format!("    {} {} {}", icons.arrow, name, short_id(&identifier))
            }
            PushEvent::ArtifactSkipped { name, identifier } => {
                format!("    {} {} {} (already on server)", icons.skip, name, short_id(&identifier))
            }
            PushEvent::PolicyUploaded {
                name,
                revision_id,
                policy_group,
            } => format!(
                "  {} {} revision {} assigned to {}",
                icons.check,
                name,
                short_id(&revision_id),
                policy_group
            ),
            PushEvent::Completed {
                name,
                revision_id,
                policy_group,
            } => format!(
                "{} Uploaded policy {} ({}) to policy group {}",
                icons.check, name, revision_id, policy_group
            ),
        };
        self.line(text);
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose > 0
    }
}

fn short_id(id: &str) -> &str {
    id.get(..10).unwrap_or(id)
}

/// Render a push failure: the message, each cause on its own line, and a hint.
pub fn render_error(err: &PushError, unicode: bool) -> String {
    let icons = Icons::select(unicode);
    let mut out = format!("{} Error: {}\n", icons.cross, err);

    let mut cause: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(current) = cause {
        out.push_str(&format!("  caused by: {}\n", current));
        cause = current.source();
    }

    if let Some(hint) = err.hint() {
        out.push_str(&format!("\n  hint: {}\n", hint));
    }
    out
}

/// Render a failure that is not a [`PushError`] (bad arguments, config)
pub fn render_other_error(err: &anyhow::Error, unicode: bool) -> String {
    let icons = Icons::select(unicode);
    let mut out = format!("{} Error: {}\n", icons.cross, err);
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }
    out
}
