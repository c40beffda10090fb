use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamFormat {
    #[default]
    Text,
    Jsonl,
}

impl StreamFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Jsonl => "jsonl",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "imggen", version, about = "Generate, edit and batch-produce images")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// How progress is printed on stdout.
    #[arg(long, value_enum, default_value_t = StreamFormat::Text, global = true)]
    pub stream_format: StreamFormat,

    /// Plain ASCII status marks.
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Show a progress bar on stderr (text format only).
    #[arg(long, global = true)]
    pub progress: bool,

    /// File consulted for the API credential when it is not in the environment.
    #[arg(long, global = true)]
    pub env_file: Option<String>,
}

impl GlobalArgs {
    pub fn is_jsonl(&self) -> bool {
        self.stream_format == StreamFormat::Jsonl
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(short, long)]
    pub prompt: String,

    /// Reference image; repeat for several.
    #[arg(short = 'i', long = "image", action = clap::ArgAction::Append)]
    pub images: Vec<String>,

    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long)]
    pub model: Option<String>,

    /// 1K, 2K or 4K.
    #[arg(short, long)]
    pub resolution: Option<String>,

    /// square, portrait, landscape, wide, or a ratio such as 4:3.
    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    #[arg(short, long)]
    pub style: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EditArgs {
    /// Image to edit; repeat to combine several.
    #[arg(short = 'i', long = "image", required = true, num_args = 1.., action = clap::ArgAction::Append)]
    pub images: Vec<String>,

    /// Editing instruction.
    #[arg(short, long)]
    pub prompt: String,

    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long)]
    pub model: Option<String>,

    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    #[arg(short, long)]
    pub resolution: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BatchArgs {
    /// JSON or CSV prompt document.
    #[arg(short, long)]
    pub input: String,

    /// Output directory (default: a timestamped directory).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Tasks per chunk, clamped to 1..=10.
    #[arg(short, long, allow_negative_numbers = true)]
    pub parallelism: Option<i64>,

    /// Default model for tasks that do not name one.
    #[arg(short, long)]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one image from a prompt.
    Generate(GenerateArgs),
    /// Edit or combine existing images.
    Edit(EditArgs),
    /// Run every prompt in a JSON or CSV document.
    Batch(BatchArgs),
}
