use clap::{Parser, Subcommand};
use folio::{config, generate, output, route};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Prerender a portfolio single-page app into static HTML")]
#[command(long_about = "\
Prerender a portfolio single-page app into static HTML

Run after the client bundle is built. Every route gets its own
index.html with the page markup in place and per-page SEO metadata
(title, description, canonical, Open Graph, Twitter, JSON-LD).

Content structure:

  content/
  ├── articles/
  │   └── event-driven-nestjs.md   # → /articles/event-driven-nestjs
  └── projects/
      └── erzengel-ecommerce.md    # → /projects/erzengel-ecommerce

Header block (all fields optional):

  ---
  title: Event-Driven NestJS
  date: 2024-10-23
  readingTime: 6 min read
  thumbnail: /images/kafka.png
  ---

The public base URL comes from $SITE_URL, else $VITE_SITE_URL, else
site.base_url.

Run 'folio gen-config' to generate a documented site.toml.")]
#[command(version = env!("FOLIO_VERSION"))]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Built client bundle directory; prerendered files are written here
    #[arg(long, default_value = "dist", global = true)]
    dist: PathBuf,

    /// Site config file (stock defaults when absent)
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Prerender every route, then write sitemap.xml, robots.txt and 404.html
    Build,
    /// Print the routes that would be prerendered
    Routes,
    /// Load config and content and print an inventory without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

impl Cli {
    fn build_options(&self) -> generate::BuildOptions {
        generate::BuildOptions {
            content_dir: self.content.clone(),
            dist_dir: self.dist.clone(),
            config_path: self.config.clone(),
            base_url_env: config::base_url_from_env(|name| std::env::var(name).ok()),
            today: chrono::Local::now().date_naive(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match &cli.command {
        Command::Build => {
            let options = cli.build_options();
            println!("==> Prerendering {} → {}", cli.content.display(), cli.dist.display());
            let report = generate::build(&options)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", report.dist_dir.display());
        }
        Command::Routes => {
            let ctx = generate::load_context(&cli.build_options())?;
            output::print_routes(&route::routes(&ctx.catalog));
        }
        Command::Check => {
            println!("==> Checking {}", cli.content.display());
            let ctx = generate::load_context(&cli.build_options())?;
            output::print_check_output(&ctx, &cli.content);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
