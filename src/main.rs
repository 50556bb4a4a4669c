use cpu_scheduling_sim::{
    config::{Config, OutputFormat},
    error::{AppError, ConfigError},
    logger,
    scheduler::ReportViewer,
    Simulation,
};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use log::LevelFilter;
use std::{io, process};

fn main() {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(ConfigError::Cli(error)) => error.exit(),
        Err(error) => {
            eprintln!("error: {error}");
            process::exit(2);
        }
    };

    if let Err(error) = run(config) {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

fn run(config: Config) -> Result<(), AppError> {
    // Log lines would tear through the terminal view
    let level = match config.format {
        OutputFormat::Tui => LevelFilter::Off,
        _ => logger::level_for(config.verbosity),
    };
    logger::init(level)?;

    let simulation = Simulation::new(config.processes, config.quantum, config.makespan);
    let reports = simulation.run_all(&config.policies)?;

    match config.format {
        OutputFormat::Text => reports.iter().for_each(|report| print!("{report}")),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Tui => {
            execute!(io::stdout(), Clear(ClearType::All))?;
            {
                let mut viewer = ReportViewer::new(reports, config.makespan)?;
                while viewer.run()? {}
            }
            execute!(io::stdout(), Clear(ClearType::All))?;
        }
    }
    Ok(())
}
