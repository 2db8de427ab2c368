//! `gen types typescript` command implementation

use crate::error::{CliError, CliResult};
use crate::hooks::{root_pre_run, CommandContext, PreRunChain};
use crate::session::{process_environment, Environment, GlobalOptions, Session};
use crate::utils::project_ref::{LinkedProjectResolver, ProjectRefResolver};
use crate::utils::target::{resolve_target, TargetSelector};
use std::io::{self, Write};
use supactl_codegen::{TypeGenerator, TypeScriptGenerator, TypesOptions};

pub const POSTGREST_V9_COMPAT_REQUIRES_DB_URL: &str =
    "--postgrest-v9-compat can only be used together with --db-url.";

pub struct Options {
    pub local: bool,
    pub linked: bool,
    pub project_id: Option<String>,
    /// `Some` whenever the flag was given on the command line, even if empty
    pub db_url: Option<String>,
    pub schema: Vec<String>,
    pub postgrest_v9_compat: bool,
}

impl Options {
    fn selector(&self) -> TargetSelector {
        TargetSelector::from_flags(
            self.local,
            self.linked,
            self.project_id.as_deref(),
            self.db_url.as_deref(),
        )
    }
}

struct Context<'a> {
    global: &'a GlobalOptions,
    options: &'a Options,
    env: Environment,
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

fn check_postgrest_compat(ctx: &mut Context<'_>) -> CliResult<()> {
    if ctx.options.postgrest_v9_compat && ctx.options.db_url.is_none() {
        return Err(CliError::Usage(
            POSTGREST_V9_COMPAT_REQUIRES_DB_URL.to_string(),
        ));
    }
    Ok(())
}

fn pre_run_chain<'a>() -> PreRunChain<Context<'a>> {
    PreRunChain::new()
        .then("root", root_pre_run)
        .then("postgrest-v9-compat", check_postgrest_compat)
}

/// Default generator configured from the session
fn typescript_generator(session: &Session) -> TypeScriptGenerator {
    TypeScriptGenerator {
        api_url: session.api_url.clone(),
        access_token: session.access_token.clone(),
        pg_meta_image: session.pg_meta_image.clone(),
    }
}

pub fn run(global: &GlobalOptions, options: &Options) -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run_inner(
        global,
        options,
        process_environment(),
        &LinkedProjectResolver,
        typescript_generator,
        &mut out,
    ) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Type generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner<G: TypeGenerator>(
    global: &GlobalOptions,
    options: &Options,
    env: Environment,
    resolver: &dyn ProjectRefResolver,
    make_generator: impl FnOnce(&Session) -> G,
    out: &mut dyn Write,
) -> CliResult<()> {
    let mut ctx = Context {
        global,
        options,
        env,
        session: None,
    };
    pre_run_chain().run(&mut ctx)?;

    let session = ctx
        .session
        .as_ref()
        .ok_or_else(|| CliError::Message("Session was not initialized".to_string()))?;
    let target = resolve_target(&options.selector(), session, resolver)?;

    let types_options = TypesOptions {
        schemas: options.schema.clone(),
        postgrest_v9_compat: options.postgrest_v9_compat,
    };
    make_generator(session).generate(&target, &types_options, out)?;
    Ok(())
}
