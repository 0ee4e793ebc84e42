use crate::events::{BlockKind, EventKind, ParseEvent};
use std::io::Write;

/// Prints an event stream as an indented outline, one line per event.
pub struct Walker<'a> {
    events: &'a [ParseEvent],
}

impl<'a> Walker<'a> {
    pub fn new(events: &'a [ParseEvent]) -> Self {
        Self { events }
    }

    pub fn walk_stdout(&self) -> std::io::Result<()> {
        self.walk(&mut std::io::stdout().lock())
    }

    pub fn walk_to_string(&self) -> String {
        let mut output: Vec<u8> = Vec::new();
        if self.walk(&mut output).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&output).into_owned()
    }

    pub fn walk(&self, f: &mut dyn Write) -> std::io::Result<()> {
        let mut depth = 0usize;
        for event in self.events {
            if matches!(event.kind, EventKind::End { .. } | EventKind::EndStylesheet) {
                depth = depth.saturating_sub(1);
            }
            write_event(event, depth, f)?;
            if matches!(event.kind, EventKind::Start(_) | EventKind::StartStylesheet) {
                depth += 1;
            }
        }
        Ok(())
    }
}

fn write_event(event: &ParseEvent, depth: usize, f: &mut dyn Write) -> std::io::Result<()> {
    let prefix = " ".repeat(depth * 2);
    match &event.kind {
        EventKind::StartStylesheet => writeln!(f, "{}[Stylesheet]", prefix),
        EventKind::EndStylesheet | EventKind::End { .. } => Ok(()),
        EventKind::Start(kind) => write_block(kind, &prefix, f),
        EventKind::Property(decl) => {
            write!(f, "{}[Declaration] {}: {}", prefix, decl.property, decl.value)?;
            if decl.important {
                write!(f, " !important")?;
            }
            match &decl.invalid {
                Some(err) => writeln!(f, " (invalid: {})", err.message),
                None => writeln!(f),
            }
        }
        EventKind::Error { error, .. } => writeln!(f, "{}[Error] {} {}", prefix, event.location, error.message),
        EventKind::Warning { message } => writeln!(f, "{}[Warning] {} {}", prefix, event.location, message),
        _ => writeln!(f, "{}{}", prefix, event),
    }
}

fn write_block(kind: &BlockKind, prefix: &str, f: &mut dyn Write) -> std::io::Result<()> {
    match kind {
        BlockKind::Rule { selectors } => {
            writeln!(f, "{}[Rule]", prefix)?;
            for sel in selectors {
                writeln!(f, "{}  [Selector] {} ({})", prefix, sel.text, sel.specificity())?;
            }
            Ok(())
        }
        BlockKind::Media { media } => {
            let list = media.iter().map(|m| m.text.as_str()).collect::<Vec<_>>();
            writeln!(f, "{}[AtRule] media {}", prefix, list.join(", "))
        }
        BlockKind::Keyframes { name, .. } => writeln!(f, "{}[AtRule] keyframes {}", prefix, name),
        BlockKind::KeyframeRule { keys } => writeln!(f, "{}[Keyframe] {}", prefix, keys.join(", ")),
        other => writeln!(f, "{}[AtRule] {}", prefix, other.name()),
    }
}
