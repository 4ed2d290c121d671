use clap::{error::ErrorKind, ArgGroup, CommandFactory, Parser};
use fa::commands::{
    fields,
    fill::{self, DataSource},
};
use fa::{common, GlobalOpts};
use fa_logger as logger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fill-pdf")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Fill PDF form fields.",
    long_about = "List the fillable fields of a PDF form, or fill them from a JSON mapping of field name to value."
)]
#[command(group(ArgGroup::new("mode").required(true).args(["list_fields", "fill"])))]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    /// Path to the input PDF
    input_pdf: PathBuf,

    /// Path for the output PDF (required with --fill)
    output_pdf: Option<PathBuf>,

    /// List all fillable fields
    #[arg(long)]
    list_fields: bool,

    /// Fill form fields
    #[arg(long)]
    fill: bool,

    /// JSON string of field name to value mappings
    #[arg(long, conflicts_with = "data_file")]
    data: Option<String>,

    /// Path to JSON file with field mappings
    #[arg(long)]
    data_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    common::init_logging(&cli.global);

    let result = if cli.list_fields {
        fields::handle_list_fields(&cli.input_pdf)
    } else {
        // Argument problems go through clap's error path before any PDF I/O
        let Some(output) = cli.output_pdf.as_deref() else {
            Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "--fill requires an output PDF path",
                )
                .exit()
        };
        let source = match (cli.data, cli.data_file) {
            (_, Some(path)) => DataSource::File(path),
            (Some(json), None) => DataSource::Inline(json),
            (None, None) => Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "--fill requires --data or --data-file",
                )
                .exit(),
        };
        fill::handle_fill(&cli.input_pdf, output, &source)
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        if logger::get_verbosity() > 0 {
            logger::show_log_path();
        }
        std::process::exit(1);
    }
}
