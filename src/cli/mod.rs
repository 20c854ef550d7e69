use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vibe_prompts", version, about = "Render system prompts for the code-planning assistant")]
pub struct Args {
    /// Config file (.toml, .yaml or .json) providing defaults
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List selectable prompt variants
    List,
    /// Render a prompt variant
    Render(RenderArgs),
    /// Validate an assistant reply against the quick action and migration grammar
    Check {
        /// File holding the reply text
        reply: String,
    },
}

#[derive(ClapArgs, Debug, Default)]
pub struct RenderArgs {
    #[arg(long)]
    pub variant: Option<String>,

    #[arg(long)]
    pub cwd: Option<String>,

    /// Allowed HTML element; repeat to build the list (replaces the default list)
    #[arg(long = "allow")]
    pub allow: Vec<String>,

    #[arg(long)]
    pub modification_tag: Option<String>,

    /// JSON/TOML/YAML file with a design scheme ({ name, colors })
    #[arg(long)]
    pub design_scheme: Option<String>,

    #[arg(long, default_value_t = false)]
    pub supabase_connected: bool,

    #[arg(long, default_value_t = false)]
    pub supabase_project: bool,

    #[arg(long)]
    pub supabase_url: Option<String>,

    #[arg(long)]
    pub supabase_anon_key: Option<String>,

    /// Write the document here instead of stdout
    #[arg(long)]
    pub out: Option<String>,

    /// Save the document, options and metadata under the configured out_dir
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

impl RenderArgs {
    /// True when any supabase flag was given on the command line.
    pub fn touches_supabase(&self) -> bool {
        self.supabase_connected
            || self.supabase_project
            || self.supabase_url.is_some()
            || self.supabase_anon_key.is_some()
    }
}
