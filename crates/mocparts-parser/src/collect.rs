//! Model collection.
//!
//! The collector walks the classified lines of a document and partitions
//! them into models. It is a small state machine: outside of any model,
//! inside a model, or inside an LPub capture block whose rows are replaced
//! by the single entry the block header names.

use std::mem;

use log::{debug, trace};

use mocparts_core::{
    color::ColorId,
    model::{ModelName, RawEntry},
    trace::DiagnosticTrace,
};

use crate::{
    error::{Diagnostic, ParseError},
    line::{self, BoundaryKind, Line, LineKind, MetaBlock},
    model_map::ModelMap,
};

/// A model whose rows are still being read.
#[derive(Debug)]
struct OpenModel {
    name: ModelName,
    entries: Vec<RawEntry>,
}

#[derive(Debug)]
enum State {
    Outside,
    InModel(OpenModel),
    InMetaBlock(OpenModel),
}

/// Collector context threaded through the per-line transitions.
struct Collector<'t> {
    state: State,
    models: ModelMap,
    trace: &'t mut DiagnosticTrace,
}

impl<'t> Collector<'t> {
    fn new(trace: &'t mut DiagnosticTrace) -> Self {
        Self {
            state: State::Outside,
            models: ModelMap::new(),
            trace,
        }
    }

    /// Returns `true` while the rows of a capture block are being skipped.
    fn in_capture(&self) -> bool {
        matches!(self.state, State::InMetaBlock(_))
    }

    /// Classify `line` for the current state. Rows inside a capture block
    /// are never parsed, only scanned for the markers that end the block.
    fn classify(&self, line: &Line<'_>) -> Result<LineKind, Diagnostic> {
        let kind = if self.in_capture() {
            line::classify_in_capture(line)
        } else {
            line::classify(line)
        };
        kind.map_err(|diagnostic| match &self.state {
            State::InModel(model) | State::InMetaBlock(model) => diagnostic.in_model(&model.name),
            State::Outside => diagnostic,
        })
    }

    fn step(&mut self, line: &Line<'_>, kind: LineKind) {
        let state = mem::replace(&mut self.state, State::Outside);
        self.state = match (state, kind) {
            (State::InMetaBlock(model), LineKind::MetaBlockClose | LineKind::ModelEnd) => {
                trace!(line = line.number; "Capture block closed");
                State::InModel(model)
            }
            (
                State::InMetaBlock(model) | State::InModel(model),
                LineKind::ModelBoundary {
                    name,
                    kind: BoundaryKind::File,
                },
            ) => {
                self.seal(model);
                self.open(name)
            }
            (State::InMetaBlock(model), _) => State::InMetaBlock(model),

            (State::Outside, LineKind::ModelBoundary { name, .. }) => self.open(name),
            (State::InModel(model), LineKind::ModelBoundary { .. }) => State::InModel(model),

            (State::InModel(model), LineKind::ModelEnd) => {
                self.seal(model);
                State::Outside
            }

            (state, LineKind::MetaBlockOpen(MetaBlock::Capture(entry))) => {
                match self.ensure_open(state, line) {
                    Some(mut model) => {
                        self.push(&mut model, entry);
                        State::InMetaBlock(model)
                    }
                    None => State::Outside,
                }
            }

            (state, kind @ (LineKind::DirectPart { .. } | LineKind::SubModelRef { .. })) => {
                match (self.ensure_open(state, line), kind.into_entry()) {
                    (Some(mut model), Some(entry)) => {
                        self.push(&mut model, entry);
                        State::InModel(model)
                    }
                    (Some(model), None) => State::InModel(model),
                    (None, _) => State::Outside,
                }
            }

            (
                state,
                LineKind::Ignore
                | LineKind::ModelEnd
                | LineKind::MetaBlockClose
                | LineKind::MetaBlockOpen(MetaBlock::PassThrough),
            ) => state,
        };
    }

    /// Open a model for a placement row. Outside of any model, an implicit
    /// root is opened if no model was seen yet; later stray rows are dropped.
    fn ensure_open(&mut self, state: State, line: &Line<'_>) -> Option<OpenModel> {
        match state {
            State::InModel(model) | State::InMetaBlock(model) => Some(model),
            State::Outside if self.models.root().is_none() => {
                Some(self.open_model(ModelName::unnamed()))
            }
            State::Outside => {
                debug!(line = line.number; "Ignoring row outside of any model");
                None
            }
        }
    }

    fn open(&mut self, name: ModelName) -> State {
        State::InModel(self.open_model(name))
    }

    fn open_model(&mut self, name: ModelName) -> OpenModel {
        self.trace.info(format!("New model: {name}"));
        self.models.set_root(&name);
        OpenModel {
            name,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, model: &mut OpenModel, entry: RawEntry) {
        if let RawEntry::SubModelRef {
            override_color,
            model_name,
        } = &entry
        {
            let color = override_color
                .as_ref()
                .map_or(ColorId::INHERIT, ColorId::as_str);
            self.trace
                .info(format!("  Submodel: {model_name} (color {color})"));
        }
        model.entries.push(entry);
    }

    fn seal(&mut self, model: OpenModel) {
        let OpenModel { name, entries } = model;
        self.trace
            .info(format!("Saving model {name} ({} entries)", entries.len()));
        if self.models.seal(name.clone(), entries).is_some() {
            debug!(model = name.as_str(); "Model redefined, keeping the later definition");
        }
    }

    fn finish(mut self) -> ModelMap {
        match mem::replace(&mut self.state, State::Outside) {
            State::InModel(model) | State::InMetaBlock(model) => self.seal(model),
            State::Outside => {}
        }
        self.models
    }
}

/// Partition `source` into models.
///
/// # Errors
///
/// Fails on the first line that cannot be classified (see
/// [`line::classify`]). The diagnostic names the model that was open.
pub fn collect(source: &str, trace: &mut DiagnosticTrace) -> Result<ModelMap, ParseError> {
    let mut collector = Collector::new(trace);
    for line in line::lines(source) {
        let kind = collector.classify(&line)?;
        collector.step(&line, kind);
    }
    Ok(collector.finish())
}
