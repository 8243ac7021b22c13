//! Interactive session
//!
//! Each line is one command. Activations mutate the in-memory document
//! only; nothing is written back to disk.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::session::Session;

const HELP: &str = "\
commands:
  click <trigger>   activate a trigger (#id or index)
  triggers          list bound triggers
  show              print the document
  classes <#id>     print an element's classes
  help              this text
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Click(String),
    Triggers,
    Show,
    Classes(String),
    Help,
    Quit,
    Empty,
}

impl ReplCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Ok(ReplCommand::Empty);
        };
        let arg = parts.next();

        match (head, arg) {
            ("click" | "c", Some(t)) => Ok(ReplCommand::Click(t.to_string())),
            ("click" | "c", None) => Err("usage: click <trigger>".to_string()),
            ("triggers" | "t", _) => Ok(ReplCommand::Triggers),
            ("show" | "s", _) => Ok(ReplCommand::Show),
            ("classes", Some(id)) => Ok(ReplCommand::Classes(id.to_string())),
            ("classes", None) => Err("usage: classes <#id>".to_string()),
            ("help" | "?", _) => Ok(ReplCommand::Help),
            ("quit" | "exit" | "q", _) => Ok(ReplCommand::Quit),
            (other, _) => Err(format!("unknown command {:?}, try help", other)),
        }
    }
}

/// Run one command. Returns `None` when the session should end.
pub fn execute(session: &mut Session, command: ReplCommand) -> Option<String> {
    let output = match command {
        ReplCommand::Quit => return None,
        ReplCommand::Empty => String::new(),
        ReplCommand::Help => format!("{}\n", HELP),
        ReplCommand::Triggers => session.describe_triggers(),
        ReplCommand::Show => format!("{}\n", session.doc.to_html()),
        ReplCommand::Click(reference) => match session.click(&reference) {
            Ok(report) => session.describe_activation(&report),
            Err(e) => format!("error: {}\n", e),
        },
        ReplCommand::Classes(reference) => {
            let id = reference.trim_start_matches('#');
            match session.doc.element_by_id(id) {
                Some(node) => format!("{}\n", session.label(node)),
                None => format!("no element with id {:?}\n", id),
            }
        }
    };
    Some(output)
}

pub fn run(mut session: Session) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("{} triggers bound, type help for commands", session.toggler.triggers().len());

    loop {
        match editor.readline("stateclass> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                let output = match ReplCommand::parse(&line) {
                    Ok(command) => execute(&mut session, command),
                    Err(message) => Some(format!("{}\n", message)),
                };
                match output {
                    Some(text) => print!("{}", text),
                    None => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stateclass::StateclassConfig;

    fn session() -> Session {
        Session::from_html(
            r#"<a id="t" data-class="on" data-class-target="x">t</a><p id="p" class="x"></p>"#,
            StateclassConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("click #t"), Ok(ReplCommand::Click("#t".into())));
        assert_eq!(ReplCommand::parse("  c 0 "), Ok(ReplCommand::Click("0".into())));
        assert_eq!(ReplCommand::parse("triggers"), Ok(ReplCommand::Triggers));
        assert_eq!(ReplCommand::parse(""), Ok(ReplCommand::Empty));
        assert_eq!(ReplCommand::parse("exit"), Ok(ReplCommand::Quit));
        assert!(ReplCommand::parse("click").is_err());
        assert!(ReplCommand::parse("dance").is_err());
    }

    #[test]
    fn test_execute_click_then_classes() {
        let mut session = session();
        execute(&mut session, ReplCommand::Click("#t".into())).unwrap();
        let out = execute(&mut session, ReplCommand::Classes("#p".into())).unwrap();
        assert_eq!(out, "<p#p.x.on>\n");
    }

    #[test]
    fn test_execute_click_error_is_reported() {
        let mut session = session();
        let out = execute(&mut session, ReplCommand::Click("9".into())).unwrap();
        assert!(out.starts_with("error: "));
    }

    #[test]
    fn test_execute_quit() {
        let mut session = session();
        assert_eq!(execute(&mut session, ReplCommand::Quit), None);
    }
}
