use anyhow::{bail, Context};
use clap::Parser;
use fs_err as fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use vibe_prompts::cli::{self, Command, RenderArgs};
use vibe_prompts::config::{self, Config};
use vibe_prompts::options::{Credentials, PromptOptions, SupabaseConnection};
use vibe_prompts::safety::{MarkupAllowlist, TagName};
use vibe_prompts::{library, log, ux, wire};

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("vibe_prompts=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vibe_prompts=info,warn"))
    };
    // stderr only: stdout carries the rendered document
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_tracing(args.debug);

    let cfg = match &args.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("failed to load config {path}"))?,
        None => Config::default(),
    };

    match &args.command {
        Command::List => {
            ux::show_variants(&library::list_variants());
            Ok(())
        }
        Command::Render(render_args) => render(render_args, &cfg, args.debug),
        Command::Check { reply } => check(reply),
    }
}

/// Config values first, then whatever the flags override.
fn build_options(args: &RenderArgs, cfg: &Config) -> anyhow::Result<PromptOptions> {
    let mut opts = cfg.prompt_options();

    if let Some(cwd) = &args.cwd {
        opts.cwd = cwd.clone();
    }
    if !args.allow.is_empty() {
        opts.allowed_html_elements = MarkupAllowlist::new(args.allow.iter().cloned())?;
    }
    if let Some(tag) = &args.modification_tag {
        opts.modification_tag_name = TagName::new(tag.as_str())?;
    }
    if let Some(path) = &args.design_scheme {
        let scheme = config::load_design_scheme(Path::new(path))
            .with_context(|| format!("failed to load design scheme {path}"))?;
        opts.design_scheme = Some(scheme);
    }
    if args.touches_supabase() {
        let has_credentials = args.supabase_url.is_some() || args.supabase_anon_key.is_some();
        opts.supabase = Some(SupabaseConnection {
            is_connected: args.supabase_connected,
            has_selected_project: args.supabase_project,
            credentials: has_credentials.then(|| Credentials {
                supabase_url: args.supabase_url.clone(),
                anon_key: args.supabase_anon_key.clone(),
            }),
        });
    }
    Ok(opts)
}

fn render(args: &RenderArgs, cfg: &Config, debug: bool) -> anyhow::Result<()> {
    let variant = args.variant.clone().unwrap_or_else(|| cfg.variant.clone());
    let options = build_options(args, cfg)?;
    let document = library::resolve(&variant, &options)?;

    match &args.out {
        Some(path) => fs::write(path, &document)?,
        None => print!("{document}"),
    }
    ux::print_render_summary(&variant, &document);

    if args.save {
        let saved = log::save_render(Path::new(&cfg.out_dir), Uuid::new_v4(), &variant, &options, &document)?;
        if debug {
            log::print_saved_paths(&saved);
        }
    }
    Ok(())
}

fn check(path: &str) -> anyhow::Result<()> {
    let reply = fs::read_to_string(path)?;
    let actions = wire::parse_quick_actions(&reply)
        .with_context(|| format!("invalid quick actions in {path}"))?;

    let artifacts: Vec<_> = wire::parse_artifacts(&reply)
        .with_context(|| format!("invalid database action in {path}"))?
        .into_iter()
        .map(|a| {
            let pairing = wire::check_pairing(&a);
            (a, pairing)
        })
        .collect();
    ux::print_check_report(&actions, &artifacts);

    if artifacts.iter().any(|(_, pairing)| pairing.is_err()) {
        bail!("reply breaks the migration/query pairing rule");
    }
    Ok(())
}
