//! Pre-run hook chains
//!
//! Every command runs an ordered list of hooks before its handler. A hook may
//! mutate the command context; the first failing hook stops the chain and its
//! error becomes the command's result.

use crate::error::CliResult;
use crate::session::{Environment, GlobalOptions, Session};

pub type Hook<C> = fn(&mut C) -> CliResult<()>;

/// Context carried through a command's pre-run hooks
pub trait CommandContext {
    fn global(&self) -> &GlobalOptions;
    fn env(&self) -> &Environment;
    fn set_session(&mut self, session: Session);
}

/// Ordered list of named pre-run hooks
pub struct PreRunChain<C> {
    hooks: Vec<(&'static str, Hook<C>)>,
}

impl<C> Default for PreRunChain<C> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<C> PreRunChain<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, name: &'static str, hook: Hook<C>) -> Self {
        self.hooks.push((name, hook));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|(name, _)| *name).collect()
    }

    pub fn run(&self, ctx: &mut C) -> CliResult<()> {
        for (name, hook) in &self.hooks {
            tracing::debug!(hook = name, "running pre-run hook");
            hook(ctx)?;
        }
        Ok(())
    }
}

/// Shared setup every command ends up running: session and credentials
pub fn root_pre_run<C: CommandContext>(ctx: &mut C) -> CliResult<()> {
    let session = Session::load(ctx.global(), ctx.env())?;
    tracing::debug!(
        workdir = %session.workdir.display(),
        has_access_token = session.access_token.is_some(),
        debug = ctx.global().debug,
        "session loaded"
    );
    ctx.set_session(session);
    Ok(())
}
