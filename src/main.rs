use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};
use vortex_ease::{config, content, output, search, server};

#[derive(Parser)]
#[command(name = "vortex-ease")]
#[command(about = "Marketing site for a visa-services business")]
#[command(long_about = "\
Marketing site for a visa-services business

Pages are rendered on request from YAML records and markdown files, so
content edits show up without a restart (except the two singletons, which
are loaded once at startup).

Site structure:

  site/
  ├── site.toml                          # Site config (optional)
  ├── content/
  │   ├── visa_service_countries.yaml    # Country directory
  │   ├── testimonial.yaml               # Home page testimonial block
  │   ├── landing/new_zealand.yaml       # /tourist-visa/new-zealand/
  │   ├── pages/about.md                 # /about, /faq, /team, ...
  │   └── blog/student-visa-guide.md     # /blog/student-visa-guide
  └── static/                            # Served under /static
      └── img/testimonials/eu_ge_01.png  # Success stories (country from name)

Run 'vortex-ease gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site root holding site.toml, content/ and static/
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the site over HTTP
    Serve {
        /// Listen address (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load every content file and report problems
    Check,
    /// Run a site search from the command line
    Search {
        /// Query text
        query: String,
        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Command::Serve { host, port } => {
            let mut site_config = config::load_config(&cli.root)?;
            if let Some(host) = host {
                site_config.server.host = host;
            }
            if let Some(port) = port {
                site_config.server.port = port;
            }
            site_config.validate()?;

            let address = site_config.server.address();
            let state = server::AppState::load(&cli.root, site_config)?;
            tracing::info!(
                countries = state.content.countries.countries.len(),
                "Site content loaded from {}",
                cli.root.display()
            );

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(state, &address))?;
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            let store = content::ContentStore::new(site_config.content_path(&cli.root));
            let site_content = content::SiteContent::load(store)?;
            let report = content::check(
                &site_content,
                &site_config.static_path(&cli.root),
                &site_config.stories.dir,
            )?;
            output::print_check_output(&report);
            if report.problems() > 0 {
                std::process::exit(1);
            }
        }
        Command::Search { query, json } => {
            let site_config = config::load_config(&cli.root)?;
            let store = content::ContentStore::new(site_config.content_path(&cli.root));
            let countries = store.load_countries()?;
            let hits = search::search(&query, &countries.countries);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                output::print_search_output(&query, &hits);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
