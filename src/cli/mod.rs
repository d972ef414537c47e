pub mod ask;
pub mod init;
pub mod knowledge;
pub mod serve;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "saber")]
#[command(about = "Question answering backed by a semantic answer cache")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or migrate the knowledge base
    Init,
    /// Run the HTTP server
    Serve {
        /// Address to bind (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Open the landing page in a browser
        #[arg(long)]
        open: bool,
    },
    /// Answer a single question and print the result
    Ask {
        /// The question, in natural language
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Inspect stored answers
    Knowledge {
        #[command(subcommand)]
        command: KnowledgeCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum KnowledgeCommands {
    /// List stored questions, newest first
    List {
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show how many questions are stored
    Count,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let rt = Runtime::new()?;

        rt.block_on(async {
            match self.command {
                Commands::Init => init::handle_init_command().await,
                Commands::Serve { host, port, open } => {
                    serve::handle_serve_command(host, port, open).await
                }
                Commands::Ask { question } => ask::handle_ask_command(question.join(" ")).await,
                Commands::Knowledge { command } => match command {
                    KnowledgeCommands::List { limit } => knowledge::handle_list_command(limit),
                    KnowledgeCommands::Count => knowledge::handle_count_command(),
                },
            }
        })
    }
}
