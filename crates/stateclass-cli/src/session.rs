//! One loaded document with its bound toggler

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use stateclass::{ActionStatus, Activation, Document, NodeId, StateclassConfig, Toggler};

pub struct Session {
    pub doc: Document,
    pub toggler: Toggler,
}

impl Session {
    /// Parse markup and bind triggers at the document root.
    pub fn from_html(html: &str, config: StateclassConfig) -> Result<Self> {
        let doc = Document::parse(html)?;
        let toggler = Toggler::bind(config, &doc, doc.root());
        Ok(Self { doc, toggler })
    }

    pub fn open(path: &Path, config: StateclassConfig) -> Result<Self> {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let session = Self::from_html(&html, config)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            nodes = session.doc.len(),
            triggers = session.toggler.triggers().len(),
            "Document loaded"
        );
        Ok(session)
    }

    pub fn click(&mut self, reference: &str) -> Result<Activation> {
        let trigger = self.toggler.find_trigger(&self.doc, reference)?;
        Ok(self.toggler.activate(&mut self.doc, trigger)?)
    }

    /// Short label for an element: `<tag#id.class1.class2>`.
    pub fn label(&self, id: NodeId) -> String {
        let mut out = String::from("<");
        out.push_str(self.doc.tag_name(id).unwrap_or("?"));
        if let Some(html_id) = self.doc.get_attribute(id, "id") {
            let _ = write!(out, "#{}", html_id);
        }
        for class in self.doc.classes(id).unwrap_or_default() {
            let _ = write!(out, ".{}", class);
        }
        out.push('>');
        out
    }

    /// One line per trigger with its parsed actions.
    pub fn describe_triggers(&self) -> String {
        let mut out = String::new();
        for (index, trigger) in self.toggler.triggers().iter().enumerate() {
            let _ = write!(out, "{:>3}  {}", index, self.label(*trigger));
            match self.toggler.actions_for(&self.doc, *trigger) {
                Ok(parsed) => {
                    for (_, action) in &parsed.actions {
                        let _ = write!(out, "\n       {}", action);
                    }
                    for skipped in &parsed.skipped {
                        let _ = write!(out, "\n       [{}] skipped: {}", skipped.index, skipped.reason);
                    }
                }
                Err(e) => {
                    let _ = write!(out, "\n       error: {}", e);
                }
            }
            out.push('\n');
        }
        if out.is_empty() {
            out.push_str("no triggers\n");
        }
        out
    }

    /// Human-readable activation summary.
    pub fn describe_activation(&self, activation: &Activation) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "activated {}", self.label(activation.trigger));
        for outcome in &activation.actions {
            let status = match outcome.status {
                ActionStatus::Applied => "applied",
                ActionStatus::ScopeNotFound => "scope not found",
                ActionStatus::NoTargets => "no targets",
            };
            let _ = writeln!(out, "  [{}] {} ({})", outcome.index, outcome.action, status);
            for m in &outcome.mutations {
                let sign = if m.present { '+' } else { '-' };
                let note = if m.changed { "" } else { " (unchanged)" };
                let _ = writeln!(out, "      {}{} {}{}", sign, m.class, self.label(m.node), note);
            }
        }
        for skipped in &activation.skipped {
            let _ = writeln!(out, "  [{}] skipped: {}", skipped.index, skipped.reason);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<button id="go" data-class="open" data-class-target="menu">x</button><ul id="m" class="menu"></ul>"#;

    #[test]
    fn test_click_by_id() {
        let mut session = Session::from_html(PAGE, StateclassConfig::default()).unwrap();
        let report = session.click("#go").unwrap();
        assert_eq!(report.mutation_count(), 1);
        let m = session.doc.element_by_id("m").unwrap();
        assert_eq!(session.label(m), "<ul#m.menu.open>");
    }

    #[test]
    fn test_click_unknown_trigger() {
        let mut session = Session::from_html(PAGE, StateclassConfig::default()).unwrap();
        let err = session.click("#nope").unwrap_err();
        assert!(err.to_string().contains("Unknown trigger"));
    }

    #[test]
    fn test_describe_triggers() {
        let session = Session::from_html(PAGE, StateclassConfig::default()).unwrap();
        assert_eq!(
            session.describe_triggers(),
            "  0  <button#go>\n       toggle .open on .menu\n"
        );
    }

    #[test]
    fn test_describe_activation() {
        let mut session = Session::from_html(PAGE, StateclassConfig::default()).unwrap();
        let report = session.click("0").unwrap();
        assert_eq!(
            session.describe_activation(&report),
            "activated <button#go>\n  [0] toggle .open on .menu (applied)\n      +open <ul#m.menu.open>\n"
        );
    }
}
