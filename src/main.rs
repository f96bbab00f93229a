//! ap-query CLI
//!
//! Queries async-profiler output (collapsed stacks) and prints compact
//! plain-text answers.

use anyhow::Result;
use ap_query::commands::{
    execute_callers, execute_collapse, execute_diff, execute_filter, execute_flamegraph,
    execute_hot, execute_info, execute_lines, execute_threads, execute_trace, execute_tree,
    DiffArgs, FilterArgs, FlamegraphArgs, HotArgs, InfoArgs, InputArgs, LinesArgs, ThreadsArgs,
    TraceArgs, TreeArgs,
};
use ap_query::flamegraph::FlamegraphConfig;
use ap_query::utils::config::{
    DEFAULT_DIFF_TOP, DEFAULT_FLAMEGRAPH_TITLE, DEFAULT_HOT_TOP, DEFAULT_INFO_EXPAND,
    DEFAULT_INFO_METHODS, DEFAULT_INFO_THREADS, DEFAULT_LINES_TOP, DEFAULT_MIN_DELTA,
    DEFAULT_MIN_PCT, DEFAULT_THREADS_TOP, DEFAULT_TRACE_MIN_PCT, DEFAULT_TREE_DEPTH,
};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// ap-query - query async-profiler stack samples
#[derive(Parser, Debug)]
#[command(name = "ap-query")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Keep only stacks whose thread name contains this substring
    #[arg(short, long, global = true)]
    thread: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// One-shot triage: top threads, hot methods and drill-downs
    Info {
        /// Profile path (`-` for stdin, `.gz` accepted)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Thread rows to show
        #[arg(long, default_value_t = DEFAULT_INFO_THREADS)]
        top_threads: usize,

        /// Rows per hot-method table
        #[arg(long, default_value_t = DEFAULT_INFO_METHODS)]
        top_methods: usize,

        /// Number of hottest methods to drill into
        #[arg(long, default_value_t = DEFAULT_INFO_EXPAND)]
        expand: usize,
    },

    /// Rank methods by self time and total time
    Hot {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Rows per table (0 = all)
        #[arg(long, default_value_t = DEFAULT_HOT_TOP)]
        top: usize,

        /// Show fully-qualified names
        #[arg(long)]
        fqn: bool,

        /// Exit non-zero if the top self-time method is at or above this percentage
        #[arg(long)]
        assert_below: Option<f64>,

        /// Print a JSON report instead of tables
        #[arg(long)]
        json: bool,

        /// Write the JSON report to this file
        #[arg(short, long, requires = "json")]
        output: Option<PathBuf>,
    },

    /// Callee tree below a method (whole profile without -m)
    Tree {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Method name or substring
        #[arg(short, long)]
        method: Option<String>,

        /// Levels to render
        #[arg(long, default_value_t = DEFAULT_TREE_DEPTH)]
        depth: usize,

        /// Hide nodes below this percentage of all samples
        #[arg(long, default_value_t = DEFAULT_MIN_PCT)]
        min_pct: f64,
    },

    /// Caller tree above a method
    Callers {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Method name or substring
        #[arg(short, long)]
        method: String,

        #[arg(long, default_value_t = DEFAULT_TREE_DEPTH)]
        depth: usize,

        #[arg(long, default_value_t = DEFAULT_MIN_PCT)]
        min_pct: f64,
    },

    /// Follow the hottest child from a method down to a leaf
    Trace {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Method name or substring
        #[arg(short, long)]
        method: String,

        /// Ignore children below this percentage of all samples
        #[arg(long, default_value_t = DEFAULT_TRACE_MIN_PCT)]
        min_pct: f64,

        #[arg(long)]
        fqn: bool,
    },

    /// Samples per source line of a method
    Lines {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Method name or substring
        #[arg(short, long)]
        method: String,

        /// Rows to show (0 = all)
        #[arg(long, default_value_t = DEFAULT_LINES_TOP)]
        top: usize,

        #[arg(long)]
        fqn: bool,
    },

    /// Sample distribution by thread
    Threads {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Rows to show (0 = all)
        #[arg(long, default_value_t = DEFAULT_THREADS_TOP)]
        top: usize,
    },

    /// Compare self-time shares of two profiles
    Diff {
        /// Baseline profile
        before: PathBuf,

        /// Profile to compare against the baseline
        after: PathBuf,

        /// Ignore changes smaller than this many percentage points
        #[arg(long, default_value_t = DEFAULT_MIN_DELTA)]
        min_delta: f64,

        /// Rows per section (0 = all)
        #[arg(long, default_value_t = DEFAULT_DIFF_TOP)]
        top: usize,

        #[arg(long)]
        fqn: bool,

        /// Print a JSON report instead of sections
        #[arg(long)]
        json: bool,

        /// Write the JSON report to this file
        #[arg(short, long, requires = "json")]
        output: Option<PathBuf>,
    },

    /// Re-emit the profile as collapsed stacks
    Collapse {
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Emit only collapsed stacks that pass through a method
    Filter {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Method name or substring
        #[arg(short, long)]
        method: String,

        /// Keep the callers above the matched frame
        #[arg(long)]
        include_callers: bool,
    },

    /// Render an SVG flamegraph
    Flamegraph {
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output path for the SVG
        #[arg(short, long, default_value = "flamegraph.svg")]
        output: PathBuf,

        /// Flamegraph title
        #[arg(long, default_value = DEFAULT_FLAMEGRAPH_TITLE)]
        title: String,

        /// Draw roots at the top (icicle graph)
        #[arg(long)]
        inverted: bool,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging (stderr); stdout carries only query output
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let input = |path: PathBuf| InputArgs {
        path,
        thread: cli.thread.clone(),
    };

    // Execute command
    match cli.command {
        Commands::Info {
            input: path,
            top_threads,
            top_methods,
            expand,
        } => execute_info(InfoArgs {
            input: input(path),
            top_threads,
            top_methods,
            expand,
        }),

        Commands::Hot {
            input: path,
            top,
            fqn,
            assert_below,
            json,
            output,
        } => execute_hot(HotArgs {
            input: input(path),
            top,
            fqn,
            assert_below,
            json,
            output,
        }),

        Commands::Tree {
            input: path,
            method,
            depth,
            min_pct,
        } => execute_tree(TreeArgs {
            input: input(path),
            method,
            depth,
            min_pct,
        }),

        Commands::Callers {
            input: path,
            method,
            depth,
            min_pct,
        } => execute_callers(TreeArgs {
            input: input(path),
            method: Some(method),
            depth,
            min_pct,
        }),

        Commands::Trace {
            input: path,
            method,
            min_pct,
            fqn,
        } => execute_trace(TraceArgs {
            input: input(path),
            method,
            min_pct,
            fqn,
        }),

        Commands::Lines {
            input: path,
            method,
            top,
            fqn,
        } => execute_lines(LinesArgs {
            input: input(path),
            method,
            top,
            fqn,
        }),

        Commands::Threads { input: path, top } => execute_threads(ThreadsArgs {
            input: input(path),
            top,
        }),

        Commands::Diff {
            before,
            after,
            min_delta,
            top,
            fqn,
            json,
            output,
        } => execute_diff(DiffArgs {
            before: input(before),
            after: input(after),
            min_delta,
            top,
            fqn,
            json,
            output,
        }),

        Commands::Collapse { input: path } => execute_collapse(input(path)),

        Commands::Filter {
            input: path,
            method,
            include_callers,
        } => execute_filter(FilterArgs {
            input: input(path),
            method,
            include_callers,
        }),

        Commands::Flamegraph {
            input: path,
            output,
            title,
            inverted,
        } => execute_flamegraph(FlamegraphArgs {
            input: input(path),
            output,
            config: FlamegraphConfig::new()
                .with_title(title)
                .with_inverted(inverted),
        }),
    }
}
