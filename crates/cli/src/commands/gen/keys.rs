//! `gen keys` command implementation

use crate::error::{CliError, CliResult};
use crate::hooks::{root_pre_run, CommandContext, PreRunChain};
use crate::session::{process_environment, Environment, GlobalOptions, Session};
use crate::utils::project_ref::{LinkedProjectResolver, ProjectRefError, ProjectRefResolver};
use std::io::{self, Write};
use supactl_codegen::{BranchKeyGenerator, CustomName, EnvSet, KeyGenerator, OutputFormat};

/// Prefix of environment variables overriding key variable names
pub const OVERRIDE_ENV_PREFIX: &str = "SUPABASE_GEN_KEYS_";

pub const PROJECT_REF_REQUIRED: &str = "Must specify --project-ref or link a project";

pub struct Options {
    pub project_ref: Option<String>,
    pub output: OutputFormat,
    pub override_name: Vec<String>,
}

struct Context<'a> {
    global: &'a GlobalOptions,
    options: &'a Options,
    env: Environment,
    names: CustomName,
    session: Option<Session>,
}

impl CommandContext for Context<'_> {
    fn global(&self) -> &GlobalOptions {
        self.global
    }

    fn env(&self) -> &Environment {
        &self.env
    }

    fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }
}

/// Decode name overrides from the environment and `--override-name`, flags winning
fn overlay_names(ctx: &mut Context<'_>) -> CliResult<()> {
    let from_env = EnvSet::from_vars(&ctx.env, OVERRIDE_ENV_PREFIX)?;
    let from_flags = EnvSet::from_entries(&ctx.options.override_name)?;
    let overrides = from_env.merge(from_flags);
    ctx.names = CustomName::from_env_set(&overrides)?;
    tracing::debug!(overrides = overrides.len(), "key names resolved");
    Ok(())
}

/// The overlay must run first, then hand over to the shared root setup
fn pre_run_chain<'a>() -> PreRunChain<Context<'a>> {
    PreRunChain::new()
        .then("overlay-names", overlay_names)
        .then("root", root_pre_run)
}

pub fn run(global: &GlobalOptions, options: &Options) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run_inner(
        global,
        options,
        process_environment(),
        &LinkedProjectResolver,
        &BranchKeyGenerator,
        &mut out,
    ) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Key generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(
    global: &GlobalOptions,
    options: &Options,
    env: Environment,
    resolver: &dyn ProjectRefResolver,
    generator: &dyn KeyGenerator,
    out: &mut dyn Write,
) -> CliResult<()> {
    let mut ctx = Context {
        global,
        options,
        env,
        names: CustomName::default(),
        session: None,
    };
    pre_run_chain().run(&mut ctx)?;

    let session = ctx
        .session
        .as_ref()
        .ok_or_else(|| CliError::Message("Session was not initialized".to_string()))?;
    let project_ref = match resolver.resolve(options.project_ref.as_deref(), session, false) {
        Ok(project_ref) => project_ref,
        Err(ProjectRefError::NotLinked) => {
            return Err(CliError::Usage(PROJECT_REF_REQUIRED.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    generator.generate(&project_ref, options.output, &ctx.names, out)?;
    Ok(())
}
