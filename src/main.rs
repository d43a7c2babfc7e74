use clap::{Args, Parser, Subcommand};
use letterpress::{
    CatalogQuery, FontFamily, InMemoryCatalog, LetterSession, PipelineBuilder, PipelineError, Region, RenderMode,
    RichDocument, TemplateCatalog, categories, select,
};
use std::fs;
use std::path::PathBuf;

/// Fill in letter templates and export them as PDF files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Template catalog JSON file (defaults to the bundled banking letters)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Pipeline configuration JSON file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the templates available in a region
    List {
        #[arg(long, default_value_t = Region::default())]
        region: Region,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List template categories
    Categories {
        #[arg(long)]
        region: Option<Region>,
    },
    /// Show the fields a template asks for
    Fields { id: String },
    /// Print the filled-in letter
    Preview {
        #[command(flatten)]
        letter: LetterArgs,
        /// Print the emphasis as normalized <b>, <i> and <u> markup instead
        /// of the raw template text
        #[arg(long)]
        markup: bool,
    },
    /// Render the letter and save it as a PDF
    Export {
        #[command(flatten)]
        letter: LetterArgs,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// helvetica, times or courier
        #[arg(long)]
        font: Option<FontFamily>,
        #[arg(long, value_parser = clap::value_parser!(u16).range(8..=32))]
        size: Option<u16>,
        #[arg(long)]
        bold: bool,
        #[arg(long)]
        italic: bool,
        #[arg(long)]
        underline: bool,
        /// Keep bold, italic and underline spans from the template markup
        #[arg(long)]
        rich: bool,
    },
}

#[derive(Args, Debug)]
struct LetterArgs {
    /// Template id
    id: String,
    #[arg(long, default_value_t = Region::default())]
    region: Region,
    /// Field value as key=value (repeatable)
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,
    /// Use this file as the letter body instead of the catalog's
    #[arg(long)]
    template_file: Option<PathBuf>,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn load_catalog(path: Option<&PathBuf>) -> Result<InMemoryCatalog, PipelineError> {
    Ok(match path {
        Some(path) => InMemoryCatalog::from_path(path)?,
        None => InMemoryCatalog::builtin()?,
    })
}

fn open_session(catalog: &InMemoryCatalog, args: &LetterArgs) -> Result<LetterSession, PipelineError> {
    let template = catalog.require(&args.id)?.clone();
    let mut session = LetterSession::start(template, args.region);
    for (key, value) in &args.fields {
        session.set_field(key.as_str(), value.as_str());
    }
    if let Some(path) = &args.template_file {
        session.set_custom_template(Some(fs::read_to_string(path)?));
    }
    Ok(session)
}

fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("letterpress=info")).init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_ref())?;

    match cli.command {
        Command::List { region, category, search } => {
            let mut query = CatalogQuery::new(region).with_search(search);
            query.category = category;
            for template in select(&catalog, &query) {
                println!("{:<28} {:<12} {}", template.id, template.category, template.title);
            }
        }
        Command::Categories { region } => {
            for category in categories(&catalog, region) {
                println!("{}", category);
            }
        }
        Command::Fields { id } => {
            let template = catalog.require(&id)?;
            println!("{}: {}", template.title, template.description);
            for field in &template.fields {
                let marker = if field.required { "*" } else { " " };
                println!("{} {:<16} {:<10} {}", marker, field.id, format!("{:?}", field.kind), field.label);
            }
        }
        Command::Preview { letter, markup } => {
            let session = open_session(&catalog, &letter)?;
            let (filled, total) = session.required_progress();
            log::info!("{}/{} required fields filled", filled, total);
            let text = session.preview()?;
            if markup {
                println!("{}", RichDocument::from_markup(&text).to_markup());
            } else {
                println!("{}", text);
            }
        }
        Command::Export { letter, out, font, size, bold, italic, underline, rich } => {
            let mut builder = PipelineBuilder::new();
            if let Some(path) = &cli.config {
                builder = builder.with_config_file(path)?;
            }
            if rich {
                builder = builder.with_render_mode(RenderMode::Rich);
            }
            let pipeline = builder.build()?;

            let base = pipeline.config().style;
            let style = base
                .with_family(font.unwrap_or(base.family))
                .with_size(size.unwrap_or(base.size))
                .with_bold(bold || base.bold)
                .with_italic(italic || base.italic)
                .with_underline(underline || base.underline);

            let mut session = open_session(&catalog, &letter)?;
            session.set_style(style);
            fs::create_dir_all(&out)?;
            let path = pipeline.export(&session, &out)?;
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}
