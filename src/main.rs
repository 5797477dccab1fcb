use anyhow::{Context, Result};
use clap::Parser;
use databricks_stream::{
    AsyncChunkStream, GenericStreamingChunk, StreamConfig, SyncChunkIterator, transport,
};
use futures::StreamExt;
use std::io::{Read, Write};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

/// Normalize a captured SSE chat completion stream into generic chunks (one JSON line each)
#[derive(Debug, Parser)]
#[command(name = "stream-normalize", version)]
struct Args {
    /// Captured stream body; stdin when omitted
    input: Option<PathBuf>,

    /// Drive the async adapter, which stops at the terminator
    #[arg(long = "async")]
    use_async: bool,

    /// TOML config file
    #[arg(short, long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StreamConfig::from_file(path)?,
        None => StreamConfig::from_env()?,
    };
    config.validate()?;

    if args.use_async {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tokio runtime")?;
        runtime.block_on(run_async(&args, &config))
    } else {
        run_sync(&args, &config)
    }
}

fn run_sync(args: &Args, config: &StreamConfig) -> Result<()> {
    let body = match &args.input {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut body = Vec::new();
            std::io::stdin().read_to_end(&mut body)?;
            body
        }
    };

    let frames = transport::frames_from_bytes(&body);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for chunk in SyncChunkIterator::with_options(frames, config.sync_options()) {
        emit(&mut out, &chunk?)?;
    }
    Ok(())
}

async fn run_async(args: &Args, config: &StreamConfig) -> Result<()> {
    let mut body = Vec::new();
    match &args.input {
        Some(path) => {
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?
                .read_to_end(&mut body)
                .await?;
        }
        None => {
            tokio::io::stdin().read_to_end(&mut body).await?;
        }
    }

    let body: transport::ByteStream<std::io::Error> =
        Box::pin(futures::stream::iter([Ok(bytes::Bytes::from(body))]));
    let frames = transport::sse_frames(body);
    let mut chunks = AsyncChunkStream::with_options(frames, config.async_options());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    while let Some(chunk) = chunks.next().await {
        emit(&mut out, &chunk?)?;
    }
    Ok(())
}

fn emit(out: &mut impl Write, chunk: &GenericStreamingChunk) -> Result<()> {
    serde_json::to_writer(&mut *out, chunk)?;
    writeln!(out)?;
    Ok(())
}
