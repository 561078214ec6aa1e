use std::fs;

use anyhow::{Context, Result};
use bleu::io::ext_repr::ExtSolution;
use bleu::solver::Bleu;
use bleu_cli::config::load_config;
use bleu_cli::io::cli::Cli;
use bleu_cli::io::output::Output;
use bleu_cli::{EPOCH, io};
use clap::Parser as ClapParser;
use log::info;
use thousands::Separable;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = load_config(args.config_file.as_deref())?;
    info!("Successfully parsed BleuConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid file stem")?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_instance = io::read_instance(args.input_file.as_path())?;
    let instance = bleu::io::import(&ext_instance)?;
    info!(
        "[MAIN] instance {} with {} items, strip width {}, total area {}",
        input_file_stem,
        instance.n_items(),
        instance.strip_width(),
        instance.total_area().separate_with_commas()
    );

    let solver = Bleu::new(instance.clone(), config);
    let solution: ExtSolution = match args.height {
        Some(height) => {
            let evaluation = solver.evaluate(height);
            bleu::io::export(&instance, &evaluation, solver.lower_bound(), *EPOCH)
        }
        None => {
            let report = solver.minimize();
            info!(
                "[MAIN] height search finished: {:?} after {} evaluations, lower bound {}",
                report.status, report.n_evaluations, report.lower_bound
            );
            bleu::io::export_height_search(&instance, &report, *EPOCH)
        }
    };
    info!(
        "[MAIN] height {}: {:?} in {}ms",
        solution.height, solution.status, solution.run_time_ms
    );

    let output = Output {
        instance: ext_instance,
        solution,
        config,
    };
    let solution_path = args
        .solution_folder
        .join(format!("sol_{input_file_stem}.json"));
    io::write_json(&output, &solution_path)?;

    Ok(())
}
