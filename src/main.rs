use clap::{Parser, Subcommand};
use linkpage::{codec, config, logging, output, page_file, query::QueryParams, render};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "linkpage")]
#[command(about = "Link-in-bio pages that live in their URL")]
#[command(long_about = "\
Link-in-bio pages that live in their URL

A page is a name, a photo URL and a list of sections. Each section is either
free text or a list of links. The whole page is stored in the share link's
query string:

  n   creator name
  i   photo URL
  s   sections, as JSON with spaces and underscores exchanged

Page files (for 'encode' and 'check') are JSON, or TOML when the file name
ends in .toml:

  name = \"Ada Lovelace\"
  image_url = \"https://img.example/ada.png\"

  [[sections]]
  id = 0
  title = \"About me\"
  type = \"text\"
  content = \"Mathematician.\"

Run 'linkpage gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Log progress, not just problems (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the share URL for a page file
    Encode {
        /// Page file (.json or .toml)
        page: PathBuf,
        /// Base URL, overriding base_url from config
        #[arg(long)]
        base: Option<String>,
    },
    /// Print the page in a share URL as JSON
    Decode {
        /// Share URL, `?query` or bare query string
        url: String,
    },
    /// Summarize the page in a share URL
    Show {
        /// Share URL, `?query` or bare query string
        url: String,
    },
    /// Write the HTML a visitor of the URL would see
    Render {
        /// Share URL, `?query` or bare query string (empty for the creation form)
        #[arg(default_value = "")]
        url: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a page file without encoding it
    Check {
        /// Page file (.json or .toml)
        page: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Encode { page, base } => {
            let site_config = config::load_config(&cli.config)?;
            let description = page_file::load_valid_page(&page)?;
            let base = base.unwrap_or(site_config.base_url);
            tracing::info!(sections = description.sections.len(), "Encoding page");
            println!("{}", codec::share_url(&base, &description));
        }
        Command::Decode { url } => match codec::decode_url(&url) {
            Some(description) => {
                println!("{}", serde_json::to_string_pretty(&description)?);
            }
            None => println!("No page parameters in URL"),
        },
        Command::Show { url } => {
            let site_config = config::load_config(&cli.config)?;
            match codec::decode_url(&url) {
                Some(description) => {
                    output::print_page_summary(&description, &site_config.unnamed_title)
                }
                None => println!("No page parameters in URL"),
            }
        }
        Command::Render {
            url,
            output: out_path,
        } => {
            let site_config = config::load_config(&cli.config)?;
            let html = render::render_landing(&QueryParams::from_url(&url), &site_config);
            match out_path {
                Some(path) => {
                    std::fs::write(&path, html.into_string())?;
                    println!("Generated {}", path.display());
                }
                None => print!("{}", html.into_string()),
            }
        }
        Command::Check { page } => {
            let description = page_file::load_page(&page)?;
            let problems = page_file::find_problems(&description);
            output::print_check_output(&description, &problems);
            if !problems.is_empty() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
