//! Real Estate Financial Calculator CLI
//!
//! Command-line front end for amortization schedules, NPV and batch runs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use real_estate_calculator::{
    batch::{load_loans, BatchRunner},
    config::MAX_DECIMALS,
    form::{self, FormError},
    render, AmortizationEngine, AmortizationSchedule, NpvEngine, NpvResult, OutputFormat, RenderConfig,
};

#[derive(Parser)]
#[command(name = "fincalc", version, about = "Loan amortization and net present value calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (overrides CALC_OUTPUT_FORMAT)
    #[arg(long, global = true)]
    format: Option<FormatArg>,

    /// Decimal places for amounts, at most 15 (overrides CALC_DECIMALS)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=MAX_DECIMALS as i64))]
    decimals: Option<u8>,

    /// Only print the first N schedule rows in table output
    #[arg(long, global = true)]
    preview_rows: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the amortization schedule for a fixed-rate loan
    #[command(allow_hyphen_values = true)]
    Amortize {
        /// Loan amount
        #[arg(long)]
        principal: String,
        /// Number of monthly payments
        #[arg(long)]
        months: String,
        /// Annual interest rate as a decimal (e.g. 0.05)
        #[arg(long)]
        rate: String,
    },
    /// Net present value of comma-separated cash flows
    #[command(allow_hyphen_values = true)]
    Npv {
        /// Discount rate as a decimal (e.g. 0.05)
        #[arg(long)]
        rate: String,
        /// Cash flows, period 0 first (e.g. "-1000, 300, 400, 500")
        #[arg(long)]
        cash_flows: String,
    },
    /// Amortize every loan in a CSV file (LoanID,Principal,TermMonths,AnnualRate)
    Batch {
        #[arg(long)]
        input: PathBuf,
        /// Summary destination, written in --format (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Table,
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn render_config(cli: &Cli) -> RenderConfig {
    let mut config = RenderConfig::from_env();
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if let Some(decimals) = cli.decimals {
        config.set_decimals(decimals as usize);
    }
    if cli.preview_rows.is_some() {
        config.preview_rows = cli.preview_rows;
    }
    config
}

/// What a form calculation produced
enum Calculation {
    Schedule(AmortizationSchedule),
    Npv(NpvResult),
}

fn calculate(command: &Commands) -> Result<Option<Calculation>, FormError> {
    match command {
        Commands::Amortize { principal, months, rate } => {
            let loan = form::parse_loan_form(principal, months, rate)?;
            let schedule = AmortizationEngine::new().schedule(&loan)?;
            Ok(Some(Calculation::Schedule(schedule)))
        }
        Commands::Npv { rate, cash_flows } => {
            let input = form::parse_npv_form(rate, cash_flows)?;
            let result = NpvEngine::new().evaluate(&input)?;
            Ok(Some(Calculation::Npv(result)))
        }
        Commands::Batch { .. } => Ok(None),
    }
}

fn write_calculation(calculation: &Calculation, config: &RenderConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match calculation {
        Calculation::Schedule(schedule) => render::write_schedule(&mut out, schedule, config)?,
        Calculation::Npv(result) => render::write_npv(&mut out, result, config)?,
    }

    out.flush()?;
    Ok(())
}

fn run_batch(input: &Path, output: Option<&PathBuf>, config: &RenderConfig) -> Result<()> {
    let loans = load_loans(input)?;
    info!("Loaded {} loans from {}", loans.len(), input.display());

    let outcomes = BatchRunner::new().run(&loans);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            render::write_batch(&mut out, &outcomes, config)?;
            out.flush()?;
            println!("Summary for {} loans written to: {}", outcomes.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render::write_batch(&mut out, &outcomes, config)?;
            out.flush()?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = render_config(&cli);

    if let Commands::Batch { input, output } = &cli.command {
        if let Err(e) = run_batch(input, output.as_ref(), &config) {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
        return;
    }

    match calculate(&cli.command) {
        Ok(Some(calculation)) => {
            if let Err(e) = write_calculation(&calculation, &config) {
                eprintln!("error: {:#}", e);
                process::exit(1);
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("{}", form::error_message(&e));
            info!("Calculation rejected: {}", e);
            process::exit(1);
        }
    }
}
