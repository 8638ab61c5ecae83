use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use stock_gym::{
    charts::{ChartRenderer, Renderer},
    constants::files,
    data::{historical, PriceFrame},
    Action, EnvConfig, FrameBound, Position, Stocks, StocksConfig, TradingEnv,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stock_gym")]
#[command(about = "Single-asset trading environment runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one episode and print its summary
    Run {
        /// Postcard bar file, a seeded random walk is used when absent
        #[arg(short, long)]
        data: Option<PathBuf>,

        #[arg(long, default_value_t = 500)]
        ticks: usize,

        #[arg(short, long, default_value_t = 10)]
        window_size: usize,

        /// start,end of the traded rows
        #[arg(short, long, value_delimiter = ',')]
        frame_bound: Option<Vec<usize>>,

        /// JSON file with the stocks reward/accounting/settlement settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Agent::Random)]
        agent: Agent,

        #[arg(short, long)]
        seed: Option<u64>,

        /// Where to write the position chart
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Write a random walk as a postcard bar file
    Generate {
        #[arg(short, long, default_value_t = 500)]
        ticks: usize,

        #[arg(long, default_value_t = 100.0)]
        start_price: f64,

        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Agent {
    Random,
    Hold,
    /// Buy when flat, sell when long
    Alternate,
}

impl Agent {
    fn act(self, env: &mut TradingEnv<Stocks>) -> Action {
        match self {
            Agent::Random => env.sample_action(),
            Agent::Hold => Action::Hold,
            Agent::Alternate => match env.state().map(|state| state.position) {
                Some(Position::High) => Action::Sell,
                _ => Action::Buy,
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Commands::Run {
            data,
            ticks,
            window_size,
            frame_bound,
            config,
            agent,
            seed,
            chart,
        } => {
            let bars = match data {
                Some(path) => historical::read_bars(&path)
                    .with_context(|| format!("failed to load bars from {}", path.display()))?,
                None => historical::random_walk_bars(ticks, 100., seed.unwrap_or_default()),
            };
            let frame = PriceFrame::from_bars(&bars)?;

            let frame_bound = match frame_bound {
                Some(values) => FrameBound::try_from(values.as_slice())?,
                None => FrameBound::new(window_size, frame.len()),
            };
            let stocks_config: StocksConfig = match config {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    serde_json::from_str(&text).context("invalid stocks config")?
                }
                None => StocksConfig::default(),
            };

            let env_config = EnvConfig {
                seed,
                ..EnvConfig::new(window_size, frame_bound)
            };
            let mut env = TradingEnv::new(&frame, env_config, Stocks::new(stocks_config))?;

            run_episode(&mut env, agent, chart)
        }
        Commands::Generate {
            ticks,
            start_price,
            seed,
            out,
        } => {
            let out = out.unwrap_or_else(|| PathBuf::from(files::DATA_PATH).join("random_walk.bin"));
            let bars = historical::random_walk_bars(ticks, start_price, seed);
            historical::write_bars(&out, &bars)?;

            println!("Wrote {} bars to {}", bars.len(), out.display());
            Ok(())
        }
    }
}

fn run_episode(env: &mut TradingEnv<Stocks>, agent: Agent, chart: Option<PathBuf>) -> Result<()> {
    env.reset();
    let mut renderer = ChartRenderer::new();

    loop {
        let action = agent.act(env);
        let step = env.step(action)?;
        if step.done {
            break;
        }
    }

    let summary = env.summary();
    let change = summary.value_change_percent();
    let change = if change >= 0. {
        format!("{change:+.2}%").green()
    } else {
        format!("{change:+.2}%").red()
    };

    println!("{}", format!("Episode {}", summary.episode).bold());
    println!("  steps          {}", summary.steps);
    println!(
        "  actions        sell {} / buy {} / hold {}",
        summary.actions[Action::Sell],
        summary.actions[Action::Buy],
        summary.actions[Action::Hold]
    );
    println!("  trades         {}", summary.trades);
    println!("  total reward   {:.4}", summary.total_reward);
    println!("  total value    {:.2} ({change})", summary.total_value);
    println!("  total profit   {:.4}", summary.total_profit);
    match env.max_possible_profit() {
        Ok(max) => println!("  max profit     {max:.4}"),
        Err(err) => println!("  max profit     {}", err.to_string().dimmed()),
    }

    if let Some(path) = chart {
        if let Some(view) = env.render_view() {
            renderer.render_all(&view)?;
            renderer.save(&path)?;
            println!("  chart          {}", path.display());
        }
    }
    renderer.close();

    Ok(())
}
