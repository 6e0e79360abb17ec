//! Replay scripts: drive a typeahead over an in-memory surface from YAML
//!
//! ```yaml
//! text: "hello "
//! source: prefix        # prefix | substring | fuzzy
//! candidates:
//!   - help
//!   - { id: h2, label: Hello, value: "hello", detail: greeting }
//! steps:
//!   - "/hel"            # plain strings are typed
//!   - key: down
//!   - key: enter
//!   - click: 0
//!   - dismiss: true
//! ```

use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::candidates::{
    CandidateItem, CandidateRequest, CandidateResponse, CandidateSource, FilterMode, FuzzySource,
    StaticSource,
};
use crate::config::TypeaheadConfig;
use crate::editable::InlineSurface;
use crate::hooks::{EnterOutcome, TypeaheadHooks};
use crate::keymap::KeymapError;
use crate::resolution::ActiveMatch;
use crate::runtime::{parse_script_key, Omnibar};

/// A candidate entry: a bare string or a full item
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CandidateEntry {
    Value(String),
    Item(CandidateItem),
}

impl CandidateEntry {
    fn into_item(self) -> CandidateItem {
        match self {
            CandidateEntry::Value(value) => CandidateItem::simple(value),
            CandidateEntry::Item(item) => item,
        }
    }
}

/// How the script's candidates are filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Prefix,
    Substring,
    Fuzzy,
}

/// One scripted input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// Type this text
    Text(String),
    Action(StepAction),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StepAction {
    /// Text to type
    #[serde(rename = "type")]
    pub text: Option<String>,
    /// A named key, e.g. "down" or "ctrl+n"
    pub key: Option<String>,
    /// Pointer over a menu row
    pub hover: Option<usize>,
    /// Pointer click on a menu row
    pub click: Option<usize>,
    /// Close the menu (e.g. focus lost)
    pub dismiss: bool,
}

/// A parsed replay script
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Initial surface text; the cursor starts at its end
    pub text: String,
    pub source: SourceKind,
    pub candidates: Vec<CandidateEntry>,
    pub steps: Vec<Step>,
}

#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    Key { step: usize, error: KeymapError },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(e) => write!(f, "failed to read script: {}", e),
            ScriptError::Parse(e) => write!(f, "failed to parse script: {}", e),
            ScriptError::Key { step, error } => write!(f, "step {}: {}", step + 1, error),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io(e) => Some(e),
            ScriptError::Parse(e) => Some(e),
            ScriptError::Key { .. } => None,
        }
    }
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path).map_err(ScriptError::Io)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        serde_yaml::from_str(content).map_err(ScriptError::Parse)
    }
}

/// State after a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub text: String,
    /// (line, column) of the cursor
    pub cursor: (usize, usize),
    /// Query of the active match, if any
    pub query: Option<String>,
    /// Labels in the open menu
    pub menu: Vec<String>,
    pub highlighted: Option<usize>,
    /// Hook calls, in order
    pub events: Vec<String>,
    pub redraws: usize,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "text: {:?}", self.text)?;
        writeln!(f, "cursor: {}:{}", self.cursor.0 + 1, self.cursor.1 + 1)?;
        match &self.query {
            Some(query) => writeln!(f, "active: {:?}", query)?,
            None => writeln!(f, "active: -")?,
        }
        for (i, label) in self.menu.iter().enumerate() {
            let marker = if self.highlighted == Some(i) { '>' } else { ' ' };
            writeln!(f, "  {} {}", marker, label)?;
        }
        writeln!(f, "events:")?;
        for event in &self.events {
            writeln!(f, "  {}", event)?;
        }
        Ok(())
    }
}

/// Run a script against a fresh surface
pub fn replay(script: &Script, config: TypeaheadConfig) -> Result<ReplayReport, ScriptError> {
    let items: Vec<CandidateItem> = script
        .candidates
        .iter()
        .cloned()
        .map(CandidateEntry::into_item)
        .collect();
    let source = ScriptSource::new(script.source, items);

    let log = EventLog::default();
    let surface = InlineSurface::from_text(&script.text);
    let mut omnibar = Omnibar::with_hooks(surface, config, source, log.clone());

    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!("step {}: {:?}", index + 1, step);
        match step {
            Step::Text(text) => omnibar.type_text(text),
            Step::Action(action) => run_action(&mut omnibar, index, action)?,
        }
    }

    let typeahead = omnibar.typeahead();
    let menu = typeahead.menu();
    let query = typeahead.active_match().map(|m| m.leading_text.clone());
    let open = query.is_some();
    Ok(ReplayReport {
        text: omnibar.surface().text(),
        cursor: omnibar.surface().cursor_position(),
        query,
        menu: if open {
            menu.items().iter().map(|item| item.label.clone()).collect()
        } else {
            Vec::new()
        },
        highlighted: if open { menu.highlighted_index() } else { None },
        events: log.take(),
        redraws: omnibar.redraw_count(),
    })
}

fn run_action(
    omnibar: &mut Omnibar<InlineSurface, ScriptSource>,
    index: usize,
    action: &StepAction,
) -> Result<(), ScriptError> {
    if let Some(text) = &action.text {
        omnibar.type_text(text);
    }
    if let Some(key) = &action.key {
        let keystroke =
            parse_script_key(key).map_err(|error| ScriptError::Key { step: index, error })?;
        omnibar.press(keystroke);
    }
    if let Some(row) = action.hover {
        omnibar.hover(row);
    }
    if let Some(row) = action.click {
        omnibar.click(row);
    }
    if action.dismiss {
        omnibar.dismiss();
    }
    Ok(())
}

enum ScriptSource {
    Static(StaticSource),
    Fuzzy(FuzzySource),
}

impl ScriptSource {
    fn new(kind: SourceKind, items: Vec<CandidateItem>) -> Self {
        match kind {
            SourceKind::Prefix => ScriptSource::Static(StaticSource::new(items)),
            SourceKind::Substring => {
                ScriptSource::Static(StaticSource::new(items).with_mode(FilterMode::Substring))
            }
            SourceKind::Fuzzy => ScriptSource::Fuzzy(FuzzySource::new(items)),
        }
    }
}

impl CandidateSource for ScriptSource {
    fn request(&mut self, request: &CandidateRequest) -> CandidateResponse {
        match self {
            ScriptSource::Static(source) => source.request(request),
            ScriptSource::Fuzzy(source) => source.request(request),
        }
    }
}

/// Hooks that record every call as a line of text
#[derive(Debug, Clone, Default)]
struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    fn push(&self, event: String) {
        self.0.borrow_mut().push(event);
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl TypeaheadHooks for EventLog {
    fn on_trigger(&mut self, active: &ActiveMatch) {
        self.push(format!("trigger {}", active.trigger));
    }

    fn on_untrigger(&mut self) {
        self.push("untrigger".to_string());
    }

    fn on_query_change(&mut self, query: Option<&str>) {
        match query {
            Some(query) => self.push(format!("query {:?}", query)),
            None => self.push("query -".to_string()),
        }
    }

    fn on_select(&mut self, item: &CandidateItem) {
        self.push(format!("select {}", item.id));
    }

    fn on_enter(&mut self, query: Option<&str>) -> EnterOutcome {
        match query {
            Some(query) => self.push(format!("enter {:?}", query)),
            None => self.push("enter -".to_string()),
        }
        EnterOutcome::Commit
    }
}
