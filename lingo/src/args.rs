use std::path::PathBuf;

use clap::Parser;

/// Lingo language service
#[derive(Debug, Parser)]
#[command(name = "lingo", about = "Speech synthesis, sentence embeddings and Q&A chunking over HTTP")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lingo.toml", env = "LINGO_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "LINGO_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter directives, e.g. `info,lingo_chunker=debug`
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["lingo"]).unwrap();
        assert_eq!(args.config, PathBuf::from("lingo.toml"));
        assert!(args.listen.is_none());
    }

    #[test]
    fn listen_override() {
        let args = Args::try_parse_from(["lingo", "--listen", "127.0.0.1:9000", "-c", "custom.toml"]).unwrap();
        assert_eq!(args.listen, Some("127.0.0.1:9000".parse().unwrap()));
        assert_eq!(args.config, PathBuf::from("custom.toml"));
    }
}
