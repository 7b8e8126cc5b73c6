use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wedding_site::gallery::GalleryState;
use wedding_site::lightbox::{ChromeCell, Lightbox};
use wedding_site::locale::{Locale, LocaleContext};
use wedding_site::preferences::FileStore;
use wedding_site::render::{self, PageContext};
use wedding_site::routes::{self, Route};
use wedding_site::rsvp::{LogSink, RsvpForm};
use wedding_site::{config, generate, logging, output};

#[derive(Parser)]
#[command(name = "wedding-site")]
#[command(about = "Static site generator for a multilingual wedding website")]
#[command(long_about = "\
Static site generator for a multilingual wedding website

Every page is rendered for French (at the site root), English, German and
Spanish (under /en/, /de/, /es/). The gallery is read from a JSON manifest;
if it is missing or broken, four placeholder photos are used instead.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  └── images/                      # Copied to the output as /images/
      ├── gallery.json             # Gallery manifest
      ├── 001.jpg
      └── ...

Manifest format:

  { \"generated\": \"2026-05-02T18:04:11\",
    \"images\": [ { \"filename\": \"001.jpg\", \"path\": \"/images/001.jpg\", \"alt\": \"...\" } ] }

Run 'wedding-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory holding local preferences (chosen language)
    #[arg(long, default_value = ".wedding-site", global = true)]
    state_dir: PathBuf,

    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the whole site for every locale
    Build,
    /// Validate config and gallery manifest without building
    Check,
    /// Print the route table
    Routes,
    /// Render one page to stdout
    Preview {
        /// Site path, optionally locale-prefixed (/info, /en/gallery, /gallery/3/)
        #[arg(default_value = "/")]
        path: String,
        /// Browser language to resolve the locale with (e.g. de-CH)
        #[arg(long)]
        accept_language: Option<String>,
        /// Open the gallery viewer on image N (1-based)
        #[arg(long, value_name = "N")]
        open: Option<usize>,
        /// Submit the RSVP form with this name
        #[arg(long, value_name = "NAME")]
        rsvp_name: Option<String>,
        /// Submit the RSVP form as not attending
        #[arg(long, requires = "rsvp_name")]
        declined: bool,
    },
    /// Show or change the preferred language
    Lang {
        #[command(subcommand)]
        action: Option<LangAction>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum LangAction {
    /// Show supported languages and the active one
    Show {
        /// Browser language used when nothing is stored
        #[arg(long)]
        accept_language: Option<String>,
    },
    /// Store a preferred language (fr, en, de, es)
    Set { code: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Build => {
            println!(
                "==> Building {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let summary = generate::generate(&cli.source, &cli.output)?;
            output::print_build_output(&summary);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = generate::check(&cli.source)?;
            output::print_check_output(&report);
        }
        Command::Routes => {
            output::print_routes();
        }
        Command::Preview {
            path,
            accept_language,
            open,
            rsvp_name,
            declined,
        } => {
            let store = preference_store(&cli.state_dir);
            let (prefixed, route, viewer_index) = match routes::resolve_viewer(&path) {
                Some(_) if open.is_some() => {
                    return Err("--open cannot be combined with a viewer page path".into());
                }
                Some((locale, index)) => (locale, Route::Gallery, Some(index)),
                None => {
                    let (locale, route) = Route::resolve_localized(&path);
                    let index = match open {
                        Some(n) => Some(n.checked_sub(1).ok_or("--open counts from 1")?),
                        None => None,
                    };
                    (locale, route, index)
                }
            };
            if viewer_index.is_some() && route != Route::Gallery {
                return Err("--open only applies to the gallery page".into());
            }
            if rsvp_name.is_some() && route != Route::Rsvp {
                return Err("--rsvp-name only applies to the RSVP page".into());
            }
            let locale = if prefixed != Locale::DEFAULT {
                LocaleContext::new(prefixed)
            } else {
                LocaleContext::load(&store, accept_language.as_deref())?
            };

            let site_config = config::load_config(&cli.source)?;
            let css = generate::stylesheet(&site_config);
            let gallery = match route {
                Route::Gallery => generate::load_gallery(&cli.source, &site_config),
                _ => GalleryState::Loading,
            };
            let ctx = PageContext::new(&site_config, &css, locale);

            let mut form = RsvpForm::default();
            if let Some(name) = rsvp_name {
                form.set_name(name);
                form.set_attending(!declined);
                form.submit(&mut LogSink)?;
            }

            let html = match viewer_index {
                Some(index) => {
                    let mut viewer =
                        Lightbox::new(gallery.images().len(), ChromeCell::default())?;
                    render::render_viewer(&ctx, &gallery, &mut viewer, index)?
                }
                None => render::render_route(&ctx, route, &gallery, &form),
            };
            println!("{}", html.into_string());
        }
        Command::Lang { action } => {
            let mut store = preference_store(&cli.state_dir);
            match action.unwrap_or(LangAction::Show {
                accept_language: None,
            }) {
                LangAction::Show { accept_language } => {
                    let context = LocaleContext::load(&store, accept_language.as_deref())?;
                    output::print_lang_output(context.current());
                }
                LangAction::Set { code } => {
                    let locale: Locale = code.parse()?;
                    let mut context = LocaleContext::load(&store, None)?;
                    context.set(locale, &mut store)?;
                    output::print_lang_output(context.current());
                    println!("Saved to {}", store.path().display());
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn preference_store(state_dir: &Path) -> FileStore {
    FileStore::new(state_dir.join("preferences.json"))
}
