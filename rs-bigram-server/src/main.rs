use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::info;

use rs_bigram_core::similarity::{LexicalEmbedder, RemoteDelegate};
use rs_bigram_core::{BigramTable, SimilarityDelegate, TextService};

mod error;
mod routes;

/// Sentences indexed when no corpus file is given
const SAMPLE_CORPUS: [&str; 4] = [
	"The king is powerful and rules the land",
	"The queen is wise and leads the people",
	"A cat sat on the mat",
	"A dog chased the cat",
];

/// Bigram text generation and similarity server
#[derive(Parser, Debug)]
#[command(name = "rs-bigram-server", version)]
struct Args {
	/// Address to bind
	#[arg(long, env = "BIGRAM_HOST", default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, env = "BIGRAM_PORT", default_value_t = 5000)]
	port: u16,

	/// Corpus file, one sentence per line (built-in sample corpus if omitted)
	#[arg(long, env = "BIGRAM_CORPUS")]
	corpus: Option<PathBuf>,

	/// Base URL of an external NLP service (in-process lexical embedder if omitted)
	#[arg(long, env = "BIGRAM_NLP_URL")]
	nlp_url: Option<String>,

	/// Request timeout for the external NLP service, in seconds
	#[arg(long, env = "BIGRAM_NLP_TIMEOUT_SECS", default_value_t = 30)]
	nlp_timeout_secs: u64,
}

async fn run_server(service: TextService, host: &str, port: u16) -> std::io::Result<()> {
	let data = web::Data::new(service);

	info!("Listening on {host}:{port}");
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.app_data(data.clone())
			.configure(routes::configure)
	})
		.bind((host, port))?
		.run()
		.await
}

/// Main entry point for the server.
///
/// Builds the bigram table and the similarity delegate once, then serves
/// them read-only to every worker.
///
/// # Notes
/// - The delegate is created outside the async runtime: the remote client
///   is blocking and must not be dropped inside it.
fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let table = match &args.corpus {
		Some(path) => BigramTable::from_file(path)?,
		None => {
			info!("No corpus file given, using the built-in sample corpus");
			BigramTable::build(SAMPLE_CORPUS)
		}
	};

	let delegate: Arc<dyn SimilarityDelegate> = match &args.nlp_url {
		Some(url) => {
			info!("Using external NLP service at {url}");
			Arc::new(RemoteDelegate::new(url, Duration::from_secs(args.nlp_timeout_secs))?)
		}
		None => {
			info!("Using the in-process lexical embedder");
			Arc::new(LexicalEmbedder::default())
		}
	};

	let service = TextService::new(table, delegate);
	actix_web::rt::System::new().block_on(run_server(service.clone(), &args.host, args.port))?;
	drop(service);

	Ok(())
}
