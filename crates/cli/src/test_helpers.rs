//! Test helpers for unit tests
//!
//! Stand-ins for the project ref resolver and the generators so command
//! handlers can be exercised without a terminal, a network or docker.
//! For integration tests, see `tests/integration_test_helpers.rs`.

use crate::session::Session;
use crate::utils::project_ref::{ProjectRefError, ProjectRefResolver};
use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;
use supactl_codegen::{
    CustomName, GenError, KeyGenerator, OutputFormat, Target, TypeGenerator, TypesOptions,
};

/// Resolver returning a fixed ref or a fresh error on every call
pub struct StubResolver {
    outcome: Box<dyn Fn() -> Result<String, ProjectRefError>>,
    calls: Cell<usize>,
    last_request: RefCell<Option<(Option<String>, bool)>>,
}

impl StubResolver {
    pub fn returning(project_ref: &str) -> Self {
        let project_ref = project_ref.to_string();
        Self::with(move || Ok(project_ref.clone()))
    }

    pub fn failing_with(error: impl Fn() -> ProjectRefError + 'static) -> Self {
        Self::with(move || Err(error()))
    }

    fn with(outcome: impl Fn() -> Result<String, ProjectRefError> + 'static) -> Self {
        Self {
            outcome: Box::new(outcome),
            calls: Cell::new(0),
            last_request: RefCell::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Explicit ref and interactive flag of the most recent call
    pub fn last_request(&self) -> Option<(Option<String>, bool)> {
        self.last_request.borrow().clone()
    }
}

impl ProjectRefResolver for StubResolver {
    fn resolve(
        &self,
        explicit: Option<&str>,
        _session: &Session,
        interactive: bool,
    ) -> Result<String, ProjectRefError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some((explicit.map(str::to_string), interactive));
        (self.outcome)()
    }
}

/// Arguments of one key generator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCall {
    pub project_ref: String,
    pub format: OutputFormat,
    pub names: CustomName,
}

/// Key generator that records its calls and writes a marker line
#[derive(Default)]
pub struct RecordingKeyGenerator {
    pub calls: RefCell<Vec<KeyCall>>,
}

impl KeyGenerator for RecordingKeyGenerator {
    fn generate(
        &self,
        project_ref: &str,
        format: OutputFormat,
        names: &CustomName,
        out: &mut dyn Write,
    ) -> Result<(), GenError> {
        self.calls.borrow_mut().push(KeyCall {
            project_ref: project_ref.to_string(),
            format,
            names: names.clone(),
        });
        writeln!(out, "keys for {project_ref}")?;
        Ok(())
    }
}

/// Type generator sharing its call log so it can be built inside a factory closure
#[derive(Clone, Default)]
pub struct RecordingTypeGenerator {
    pub calls: Rc<RefCell<Vec<(Target, TypesOptions)>>>,
    pub fail_with_status: Option<u16>,
}

impl TypeGenerator for RecordingTypeGenerator {
    fn generate(
        &self,
        target: &Target,
        options: &TypesOptions,
        out: &mut dyn Write,
    ) -> Result<(), GenError> {
        self.calls
            .borrow_mut()
            .push((target.clone(), options.clone()));
        if let Some(status) = self.fail_with_status {
            return Err(GenError::Api {
                status,
                body: "upstream failure".to_string(),
            });
        }
        writeln!(out, "export type Database = {{}}")?;
        Ok(())
    }
}
