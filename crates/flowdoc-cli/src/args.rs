//! Command-line argument definitions for the Flowdoc CLI.

use clap::Parser;

/// Render a process-flow definition to an SVG diagram and a step summary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a flow definition (TOML); the built-in flow is used when omitted
    pub input: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "flow.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also print a text preview of the diagram
    #[arg(long)]
    pub interactive: bool,

    /// Do not print the step summary
    #[arg(long)]
    pub no_summary: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["flowdoc"]);
        assert!(args.input.is_none());
        assert_eq!(args.output, "flow.svg");
        assert_eq!(args.log_level, "warn");
        assert!(!args.interactive);
        assert!(!args.no_summary);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "flowdoc",
            "deploy.toml",
            "-o",
            "deploy.svg",
            "-c",
            "style.toml",
            "--interactive",
            "--no-summary",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.input.as_deref(), Some("deploy.toml"));
        assert_eq!(args.output, "deploy.svg");
        assert_eq!(args.config.as_deref(), Some("style.toml"));
        assert!(args.interactive);
        assert!(args.no_summary);
        assert_eq!(args.log_level, "debug");
    }
}
