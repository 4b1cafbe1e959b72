use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use wordcloud_studio::app::App;
use wordcloud_studio::cli::{Cli, Commands, InputArgs};
use wordcloud_studio::document::pdf;
use wordcloud_studio::export::OutputFormat;
use wordcloud_studio::util::{image::detect_picker, log};
use wordcloud_studio::{Document, Session, StudioConfig};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    pdf::install_parser_panic_filter();
    let cli = Cli::parse();
    let config = StudioConfig::load(cli.config.as_deref())?;

    match cli.command {
        None => run_tui(config, None, None).await,
        Some(Commands::Tui { file, mime }) => run_tui(config, file, mime).await,
        Some(Commands::Info { input }) => {
            log::init_stderr();
            let session = open_session(&config, &input)?;
            let details = serde_json::to_string_pretty(&session.details())?;
            println!("{}", details);
            println!();
            println!("{}", session.preview()?);
            Ok(())
        }
        Some(Commands::Counts { input, output }) => {
            log::init_stderr();
            let session = open_session(&config, &input)?;
            let csv = session.frequency_csv()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &csv.bytes)?;
                    println!("{}", path.display());
                }
                None => std::io::stdout().write_all(&csv.bytes)?,
            }
            Ok(())
        }
        Some(Commands::Cloud { input, format, no_stopwords, exclude, output }) => {
            log::init_stderr();
            let mut session = open_session(&config, &input)?;
            apply_cloud_args(&mut session, format, no_stopwords, exclude);

            let cloud = session.generate_cloud(&config.cloud)?;
            let dir = output.unwrap_or_else(|| config.output_dir.clone());
            let path = cloud.download.save(&dir)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run_tui(
    config: StudioConfig,
    file: Option<PathBuf>,
    mime: Option<String>,
) -> color_eyre::Result<()> {
    let log_path = log::init_file(&config.log_dir)?;
    tracing::info!("Logging to {}", log_path.display());

    let terminal = ratatui::init();
    pdf::install_parser_panic_filter();
    let picker = detect_picker();
    let mut app = App::new(config, Some(picker));
    if let Some(file) = file {
        app.open(file, mime.as_deref());
    }
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}

fn open_session(config: &StudioConfig, input: &InputArgs) -> color_eyre::Result<Session> {
    let document = Document::open(&input.file, input.mime.as_deref())?;
    Ok(Session::new(document, config.defaults.clone()))
}

fn apply_cloud_args(
    session: &mut Session,
    format: Option<OutputFormat>,
    no_stopwords: bool,
    exclude: Vec<String>,
) {
    let settings = &mut session.settings;
    if let Some(format) = format {
        settings.format = format;
    }
    if no_stopwords {
        settings.use_standard_stopwords = false;
    }
    for word in exclude {
        let word = word.to_lowercase();
        if !settings.is_excluded(&word) {
            settings.additional_stopwords.push(word);
        }
    }
}
