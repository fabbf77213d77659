//! Taskweave CLI binary: run one goal through the orchestration engine.
//!
//! `taskweave "Implement a queue in Rust"` plans, executes, and synthesizes,
//! then prints the final answer (and the run log to stderr). `--json` emits
//! the full report instead.

mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use taskweave::{
    MockGenerator, OpenAiGenerator, Orchestrator, OrchestratorConfig, TextGenerator,
    WorkerRegistry,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Parser, Debug)]
#[command(name = "taskweave")]
#[command(about = "Taskweave — decompose a goal into worker tasks and synthesize one answer")]
struct Args {
    /// Goal text (or pass as positional arguments)
    #[arg(short, long, value_name = "TEXT")]
    goal: Option<String>,

    /// Positional args: goal when -g/--goal is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Use the offline scripted generator instead of an HTTP backend
    #[arg(long)]
    mock: bool,

    /// OpenAI-compatible base URL (default: TASKWEAVE_BASE_URL or the OpenAI API)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Model name (default: TASKWEAVE_MODEL or gpt-4o-mini)
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Name of the environment variable holding the API key
    #[arg(long, value_name = "VAR", default_value = "OPENAI_API_KEY")]
    api_key_env: String,

    /// Load worker profiles from a YAML file instead of the built-in catalog
    #[arg(long, value_name = "PATH")]
    workers: Option<PathBuf>,

    /// Maximum number of planned tasks
    #[arg(long, value_name = "N")]
    max_tasks: Option<usize>,

    /// Output the full report as JSON
    #[arg(long)]
    json: bool,

    /// With --json, pretty-print (multi-line). Default: one compact line
    #[arg(long)]
    pretty: bool,

    /// Verbose: mirror the run log to stderr as it happens
    #[arg(short, long)]
    verbose: bool,
}

/// Reads a u32 override from the environment. Missing/invalid keeps the default.
fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn resolve_base_url(args: &Args) -> String {
    args.base_url
        .clone()
        .or_else(|| std::env::var("TASKWEAVE_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn resolve_model(args: &Args) -> String {
    args.model
        .clone()
        .or_else(|| std::env::var("TASKWEAVE_MODEL").ok())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Builds the engine config from defaults, env overrides, then flags.
fn build_config(args: &Args) -> OrchestratorConfig {
    let mut config = OrchestratorConfig::default();
    config.plan_token_budget = env_u32("TASKWEAVE_PLAN_TOKENS", config.plan_token_budget);
    config.task_token_budget = env_u32("TASKWEAVE_TASK_TOKENS", config.task_token_budget);
    config.synthesis_token_budget =
        env_u32("TASKWEAVE_SYNTHESIS_TOKENS", config.synthesis_token_budget);
    if let Some(n) = args.max_tasks {
        config.max_tasks = n;
    }
    config
}

fn build_generator(args: &Args) -> Arc<dyn TextGenerator> {
    if args.mock {
        return Arc::new(MockGenerator::fixed(
            "Mock backend response. Pass a real --base-url for generated text.",
        ));
    }
    let mut generator = OpenAiGenerator::new(resolve_base_url(args), resolve_model(args));
    if let Ok(key) = std::env::var(&args.api_key_env) {
        generator = generator.with_api_key(key);
    }
    Arc::new(generator)
}

fn build_registry(args: &Args) -> Result<WorkerRegistry, Box<dyn std::error::Error>> {
    match &args.workers {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)?;
            Ok(WorkerRegistry::from_yaml_str(&yaml)?)
        }
        None => Ok(WorkerRegistry::builtin()?),
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();
    if let Err(e) = logging::init(args.verbose) {
        eprintln!("taskweave: logging init failed: {e}");
    }

    let goal = match args.goal.clone().or_else(|| {
        if args.rest.is_empty() {
            None
        } else {
            Some(args.rest.join(" "))
        }
    }) {
        Some(goal) => goal,
        None => {
            eprintln!("taskweave: provide a goal via -g/--goal or positional args");
            std::process::exit(1);
        }
    };

    let registry = match build_registry(&args) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            eprintln!("taskweave: worker catalog: {e}");
            std::process::exit(1);
        }
    };

    let orchestrator =
        match Orchestrator::with_config(build_generator(&args), registry, build_config(&args)) {
            Ok(orchestrator) => orchestrator,
            Err(e) => {
                eprintln!("taskweave: {e}");
                std::process::exit(1);
            }
        };

    let report = match orchestrator.execute_goal(&goal).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("taskweave: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        let out = if args.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        match out {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("taskweave: serialize report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        for line in &report.execution_log {
            eprintln!("{line}");
        }
        println!("{}", report.final_output);
    }
}
